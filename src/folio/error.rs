use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FolioError {
    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Note title cannot be empty")]
    EmptyTitle,

    #[error("Folder already exists: {0}")]
    AlreadyExists(String),

    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    /// `index` is the 0-based position; the message shows it 1-based.
    #[error("Note {} is out of range (folder has {len} notes)", .index + 1)]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Nothing to do: {0}")]
    NoOp(String),

    #[error("Stored data is corrupted: {0}")]
    CorruptedData(String),

    #[error("Failed to write {}: {source}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot load image {}: {reason}", path.display())]
    ImageLoadFailure { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Api Error: {0}")]
    Api(String),
}

impl FolioError {
    /// Validation errors leave the library untouched and are safe to show
    /// to the user as a plain message.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            FolioError::EmptyName
                | FolioError::EmptyTitle
                | FolioError::AlreadyExists(_)
                | FolioError::FolderNotFound(_)
                | FolioError::IndexOutOfRange { .. }
                | FolioError::NoOp(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, FolioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_out_of_range_mentions_both_numbers() {
        let e = FolioError::IndexOutOfRange { index: 6, len: 3 };
        let msg = e.to_string();
        assert!(msg.contains('7'));
        assert!(msg.contains('3'));
    }

    #[test]
    fn write_failure_is_not_validation() {
        let e = FolioError::WriteFailure {
            path: PathBuf::from("notes.json"),
            source: std::io::Error::other("disk full"),
        };
        assert!(!e.is_validation());
        assert!(e.to_string().contains("notes.json"));
        assert!(FolioError::EmptyName.is_validation());
    }
}
