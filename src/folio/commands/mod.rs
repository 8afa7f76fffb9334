use crate::error::{FolioError, Result};
use crate::index::DisplayNote;
use crate::model::{ContentBlock, Library, Note};

pub mod folders;
pub mod notes;
pub mod search;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_notes: Vec<Note>,
    pub listed_notes: Vec<DisplayNote>,
    pub listed_folders: Vec<String>,
    pub messages: Vec<CmdMessage>,
    /// Whether the command changed the library and needs a save.
    pub mutated: bool,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn mutated() -> Self {
        Self {
            mutated: true,
            ..Self::default()
        }
    }

    pub fn with_affected_notes(mut self, notes: Vec<Note>) -> Self {
        self.affected_notes = notes;
        self
    }

    pub fn with_listed_notes(mut self, notes: Vec<DisplayNote>) -> Self {
        self.listed_notes = notes;
        self
    }

    pub fn with_listed_folders(mut self, folders: Vec<String>) -> Self {
        self.listed_folders = folders;
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Error)
    }
}

/// Changes applied by `update_note`. Fields left as `None` are kept; an
/// update with no fields rewrites the note unchanged.
#[derive(Debug, Clone, Default)]
pub struct NoteUpdate {
    pub title: Option<String>,
    pub content_blocks: Option<Vec<ContentBlock>>,
    pub tags: Option<Vec<String>>,
    pub links: Option<Vec<String>>,
}

impl NoteUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn blocks(mut self, blocks: Vec<ContentBlock>) -> Self {
        self.content_blocks = Some(blocks);
        self
    }

    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn links(mut self, links: Vec<String>) -> Self {
        self.links = Some(links);
        self
    }

    pub(crate) fn apply(self, note: &mut Note) {
        if let Some(title) = self.title {
            note.title = title;
        }
        if let Some(blocks) = self.content_blocks {
            note.content_blocks = blocks;
        }
        if let Some(tags) = self.tags {
            note.tags = tags;
        }
        if let Some(links) = self.links {
            note.links = links;
        }
    }
}

pub(crate) fn folder_notes<'a>(library: &'a Library, folder: &str) -> Result<&'a [Note]> {
    library
        .folder(folder)
        .map(|f| f.notes())
        .ok_or_else(|| FolioError::FolderNotFound(folder.to_string()))
}

pub(crate) fn folder_notes_mut<'a>(
    library: &'a mut Library,
    folder: &str,
) -> Result<&'a mut Vec<Note>> {
    library
        .folder_mut(folder)
        .map(|f| f.notes_mut())
        .ok_or_else(|| FolioError::FolderNotFound(folder.to_string()))
}

pub(crate) fn check_index(notes: &[Note], index: usize) -> Result<()> {
    if index >= notes.len() {
        return Err(FolioError::IndexOutOfRange {
            index,
            len: notes.len(),
        });
    }
    Ok(())
}
