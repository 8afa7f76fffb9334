use super::DataStore;
use crate::codec::{decode_library, encode_library};
use crate::error::{FolioError, Result};
use crate::model::Library;
use std::path::PathBuf;

/// In-memory storage for testing and development.
/// Does NOT persist data past the process.
///
/// The library is kept encoded, so every save and load goes through the
/// same codec as the file store.
#[derive(Default)]
pub struct InMemoryStore {
    document: Option<String>,
    fail_writes: bool,
    saves: usize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing raw document, valid or not.
    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: Some(document.into()),
            ..Self::default()
        }
    }

    /// Makes every subsequent save fail with `WriteFailure`.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    /// Number of successful saves.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl DataStore for InMemoryStore {
    fn load(&mut self) -> Result<Library> {
        match &self.document {
            Some(text) => decode_library(text),
            None => Ok(Library::new()),
        }
    }

    fn save(&mut self, library: &Library) -> Result<()> {
        if self.fail_writes {
            return Err(FolioError::WriteFailure {
                path: PathBuf::from(self.location()),
                source: std::io::Error::other("simulated write failure"),
            });
        }
        self.document = Some(encode_library(library)?);
        self.saves += 1;
        Ok(())
    }

    fn location(&self) -> String {
        "<memory>".to_string()
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{ContentBlock, Folder, Note};

    /// Builds a library and hands it out already saved in an [`InMemoryStore`].
    #[derive(Default)]
    pub struct StoreFixture {
        library: Library,
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_folder(mut self, name: &str, titles: &[&str]) -> Self {
            let mut folder = Folder::new(name);
            for title in titles {
                folder.notes_mut().push(Note::new(*title));
            }
            self.library.push_folder(folder);
            self
        }

        pub fn with_note(mut self, folder: &str, note: Note) -> Self {
            if !self.library.contains(folder) {
                self.library.push_folder(Folder::new(folder));
            }
            if let Some(f) = self.library.folder_mut(folder) {
                f.notes_mut().push(note);
            }
            self
        }

        pub fn with_tagged_note(self, folder: &str, title: &str, tags: &[&str]) -> Self {
            let note = Note::new(title)
                .with_blocks(vec![ContentBlock::text(format!("Body of {}", title))])
                .with_tags(tags.iter().copied());
            self.with_note(folder, note)
        }

        pub fn library(&self) -> &Library {
            &self.library
        }

        pub fn store(&self) -> InMemoryStore {
            let mut store = InMemoryStore::new();
            store
                .save(&self.library)
                .expect("in-memory save cannot fail");
            store.saves = 0;
            store
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::StoreFixture;
    use super::*;

    #[test]
    fn empty_store_loads_empty_library() {
        let mut store = InMemoryStore::new();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn fixture_roundtrips_through_codec() {
        let fixture = StoreFixture::new()
            .with_folder("Work", &["A", "B"])
            .with_tagged_note("Home", "Plants", &["green"]);
        let mut store = fixture.store();
        assert_eq!(&store.load().unwrap(), fixture.library());
        assert_eq!(store.saves(), 0);
    }

    #[test]
    fn simulated_failure_keeps_previous_document() {
        let mut store = StoreFixture::new().with_folder("Work", &[]).store();
        let before = store.document().unwrap().to_string();
        store.set_fail_writes(true);

        let err = store.save(&Library::new()).unwrap_err();
        assert!(matches!(err, FolioError::WriteFailure { .. }));
        assert_eq!(store.document().unwrap(), before);
    }

    #[test]
    fn garbage_document_is_corrupted() {
        let mut store = InMemoryStore::with_document("not json at all");
        assert!(matches!(
            store.load().unwrap_err(),
            FolioError::CorruptedData(_)
        ));
    }
}
