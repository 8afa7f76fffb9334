use serde::{Deserialize, Serialize};

/// One unit of note content.
///
/// Serialized with an explicit `type` discriminator. Link blocks written by
/// older versions used `path` instead of `url` for their payload; both are
/// accepted on input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Text { content: String },
    Image { path: String },
    Link {
        #[serde(alias = "path")]
        url: String,
    },
}

impl ContentBlock {
    pub fn text(content: impl Into<String>) -> Self {
        ContentBlock::Text {
            content: content.into(),
        }
    }

    pub fn image(path: impl Into<String>) -> Self {
        ContentBlock::Image { path: path.into() }
    }

    pub fn link(url: impl Into<String>) -> Self {
        ContentBlock::Link { url: url.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Note {
    pub title: String,
    pub content_blocks: Vec<ContentBlock>,
    pub tags: Vec<String>,
    /// Legacy single-link field, superseded by inline link blocks.
    pub links: Vec<String>,
}

impl Note {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_blocks(mut self, blocks: Vec<ContentBlock>) -> Self {
        self.content_blocks = blocks;
        self
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Plain text of the note body, with images and links as placeholders.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for block in &self.content_blocks {
            match block {
                ContentBlock::Text { content } => out.push_str(content),
                ContentBlock::Image { .. } => out.push_str("[image]"),
                ContentBlock::Link { url } => out.push_str(url),
            }
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    name: String,
    notes: Vec<Note>,
}

impl Folder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            notes: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub(crate) fn notes_mut(&mut self) -> &mut Vec<Note> {
        &mut self.notes
    }
}

/// All folders and their notes, in insertion order.
///
/// Folder names are unique (exact, case-sensitive). Mutation is only
/// available inside the crate; commands are the public way to change it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Library {
    folders: Vec<Folder>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    pub fn folder_names(&self) -> Vec<String> {
        self.folders.iter().map(|f| f.name.clone()).collect()
    }

    pub fn folder(&self, name: &str) -> Option<&Folder> {
        self.folders.iter().find(|f| f.name == name)
    }

    pub fn note_count(&self) -> usize {
        self.folders.iter().map(|f| f.notes.len()).sum()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.folders.iter().position(|f| f.name == name)
    }

    pub(crate) fn folder_mut(&mut self, name: &str) -> Option<&mut Folder> {
        self.folders.iter_mut().find(|f| f.name == name)
    }

    /// Appends a folder. Callers check uniqueness first.
    pub(crate) fn push_folder(&mut self, folder: Folder) {
        debug_assert!(!self.contains(&folder.name));
        self.folders.push(folder);
    }

    pub(crate) fn remove_folder(&mut self, name: &str) -> Option<Folder> {
        self.position(name).map(|pos| self.folders.remove(pos))
    }

    /// Renames in place so the folder keeps its position.
    pub(crate) fn rename_folder(&mut self, old: &str, new: &str) -> bool {
        match self.folder_mut(old) {
            Some(folder) => {
                folder.name = new.to_string();
                true
            }
            None => false,
        }
    }
}
