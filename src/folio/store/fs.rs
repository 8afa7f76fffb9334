use super::DataStore;
use crate::codec::{decode_library, encode_library};
use crate::error::{FolioError, Result};
use crate::model::Library;
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

pub const DEFAULT_DATA_FILE: &str = "notes.json";

pub struct FileStore {
    root: PathBuf,
    file_name: String,
    // Set when the last load found a document it could not read.
    preserve_existing: bool,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            file_name: DEFAULT_DATA_FILE.to_string(),
            preserve_existing: false,
        }
    }

    pub fn with_file_name(mut self, name: &str) -> Self {
        self.file_name = name.to_string();
        self
    }

    pub fn data_path(&self) -> PathBuf {
        self.root.join(&self.file_name)
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(|source| FolioError::WriteFailure {
                path: path.to_path_buf(),
                source,
            })?;
        }
        Ok(())
    }

    /// Moves an unreadable document out of the way so the next write cannot
    /// destroy it.
    fn set_aside(&self, data_file: &Path) -> Result<()> {
        if !data_file.exists() {
            return Ok(());
        }
        // Stamps repeat within a second; the suffix keeps backups distinct.
        let stamp = Utc::now().format("%Y%m%d%H%M%S");
        let suffix = Uuid::new_v4().simple().to_string();
        let backup = self.root.join(format!(
            "{}.corrupt-{}-{}",
            self.file_name,
            stamp,
            &suffix[..8]
        ));
        fs::rename(data_file, &backup).map_err(|source| FolioError::WriteFailure {
            path: backup.clone(),
            source,
        })?;
        warn!(backup = %backup.display(), "Moved unreadable document aside");
        Ok(())
    }
}

impl DataStore for FileStore {
    fn load(&mut self) -> Result<Library> {
        let data_file = self.data_path();
        if !data_file.exists() {
            debug!(path = %data_file.display(), "No document yet, starting empty");
            return Ok(Library::new());
        }

        let loaded = fs::read_to_string(&data_file)
            .map_err(FolioError::Io)
            .and_then(|text| decode_library(&text));

        match loaded {
            Ok(library) => {
                self.preserve_existing = false;
                info!(
                    path = %data_file.display(),
                    folders = library.len(),
                    notes = library.note_count(),
                    "Loaded library"
                );
                Ok(library)
            }
            Err(e) => {
                self.preserve_existing = true;
                warn!(path = %data_file.display(), error = %e, "Could not load library");
                Err(e)
            }
        }
    }

    fn save(&mut self, library: &Library) -> Result<()> {
        self.ensure_dir(&self.root)?;
        let data_file = self.data_path();

        if self.preserve_existing {
            self.set_aside(&data_file)?;
            self.preserve_existing = false;
        }

        let content = encode_library(library)?;

        // Atomic write: a failure leaves the previous document intact
        let tmp_file = self.root.join(format!(".{}-{}.tmp", self.file_name, Uuid::new_v4()));
        if let Err(source) = fs::write(&tmp_file, content) {
            let _ = fs::remove_file(&tmp_file);
            return Err(FolioError::WriteFailure {
                path: data_file,
                source,
            });
        }
        if let Err(source) = fs::rename(&tmp_file, &data_file) {
            let _ = fs::remove_file(&tmp_file);
            return Err(FolioError::WriteFailure {
                path: data_file,
                source,
            });
        }

        debug!(path = %data_file.display(), "Saved library");
        Ok(())
    }

    fn location(&self) -> String {
        self.data_path().display().to_string()
    }
}
