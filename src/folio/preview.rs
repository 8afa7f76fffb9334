//! Resolves a note's blocks for display.
//!
//! Image blocks only carry a path. When the file is gone or unreadable the
//! block turns into an [`ResolvedBlock::Unavailable`] placeholder; the rest of
//! the note is unaffected.

use crate::error::FolioError;
use crate::model::{ContentBlock, Note};
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum ResolvedBlock {
    Text(String),
    Image(PathBuf),
    Link(String),
    Unavailable { path: PathBuf, error: FolioError },
}

impl ResolvedBlock {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, ResolvedBlock::Unavailable { .. })
    }
}

pub fn resolve_blocks(blocks: &[ContentBlock]) -> Vec<ResolvedBlock> {
    blocks
        .iter()
        .map(|block| match block {
            ContentBlock::Text { content } => ResolvedBlock::Text(content.clone()),
            ContentBlock::Link { url } => ResolvedBlock::Link(url.clone()),
            ContentBlock::Image { path } => match check_image(Path::new(path)) {
                Ok(()) => ResolvedBlock::Image(PathBuf::from(path)),
                Err(error) => ResolvedBlock::Unavailable {
                    path: PathBuf::from(path),
                    error,
                },
            },
        })
        .collect()
}

fn check_image(path: &Path) -> Result<(), FolioError> {
    let failure = |reason: String| FolioError::ImageLoadFailure {
        path: path.to_path_buf(),
        reason,
    };

    let meta = path.metadata().map_err(|e| failure(e.to_string()))?;
    if !meta.is_file() {
        return Err(failure("not a regular file".to_string()));
    }
    File::open(path).map_err(|e| failure(e.to_string()))?;
    Ok(())
}

/// Every link a note carries: inline link blocks first, then the legacy
/// `link` entries not already present.
pub fn links_of(note: &Note) -> Vec<String> {
    let mut links: Vec<String> = note
        .content_blocks
        .iter()
        .filter_map(|b| match b {
            ContentBlock::Link { url } => Some(url.clone()),
            _ => None,
        })
        .collect();
    for legacy in &note.links {
        if !links.contains(legacy) {
            links.push(legacy.clone());
        }
    }
    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_image_becomes_placeholder() {
        let temp = TempDir::new().unwrap();
        let present = temp.path().join("cat.png");
        fs::write(&present, b"\x89PNG").unwrap();
        let missing = temp.path().join("gone.png");

        let blocks = vec![
            ContentBlock::text("before "),
            ContentBlock::image(missing.to_string_lossy()),
            ContentBlock::image(present.to_string_lossy()),
            ContentBlock::text(" after"),
        ];
        let resolved = resolve_blocks(&blocks);

        assert_eq!(resolved.len(), 4);
        assert!(matches!(&resolved[0], ResolvedBlock::Text(t) if t == "before "));
        match &resolved[1] {
            ResolvedBlock::Unavailable { path, error } => {
                assert_eq!(path, &missing);
                assert!(matches!(error, FolioError::ImageLoadFailure { .. }));
            }
            other => panic!("expected placeholder, got {:?}", other),
        }
        assert!(matches!(&resolved[2], ResolvedBlock::Image(p) if p == &present));
        assert!(matches!(&resolved[3], ResolvedBlock::Text(t) if t == " after"));
    }

    #[test]
    fn directory_is_not_an_image() {
        let temp = TempDir::new().unwrap();
        let blocks = vec![ContentBlock::image(temp.path().to_string_lossy())];
        assert!(resolve_blocks(&blocks)[0].is_unavailable());
    }

    #[test]
    fn links_merge_inline_and_legacy() {
        let mut note = Note::new("n").with_blocks(vec![
            ContentBlock::link("https://a.example"),
            ContentBlock::text(" "),
            ContentBlock::link("https://b.example"),
        ]);
        note.links = vec!["https://a.example".into(), "https://old.example".into()];
        assert_eq!(
            links_of(&note),
            vec![
                "https://a.example",
                "https://b.example",
                "https://old.example"
            ]
        );
    }
}
