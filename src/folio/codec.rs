//! # Persistence Codec
//!
//! Converts notes to and from their flat record form, and the whole
//! [`Library`] to and from the JSON document kept on disk.
//!
//! ## Document Format
//!
//! ```text
//! {
//!   "<folder name>": [
//!     { "type": "note", "title": "...",
//!       "content_blocks": [ {"type": "text", "content": "..."}, ... ],
//!       "tags": ["..."], "link": ["..."] },
//!     ...
//!   ],
//!   ...
//! }
//! ```
//!
//! Folder order is the key order of the object. There is no version field.
//!
//! ## Backward Compatibility
//!
//! Records written by earlier versions may lack `tags`, `link` or
//! `content_blocks`; those default to empty. The oldest records carried the
//! body as a single `content` string, which becomes one text block.

use crate::error::{FolioError, Result};
use crate::model::{ContentBlock, Folder, Library, Note};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const NOTE_KIND: &str = "note";

/// A note as it appears in the stored document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRecord {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_blocks: Option<Vec<ContentBlock>>,
    /// Body of the oldest schema, before content blocks existed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub link: Vec<String>,
}

pub fn serialize_note(note: &Note) -> NoteRecord {
    NoteRecord {
        kind: Some(NOTE_KIND.to_string()),
        title: note.title.clone(),
        content_blocks: Some(note.content_blocks.clone()),
        content: None,
        tags: note.tags.clone(),
        link: note.links.clone(),
    }
}

pub fn deserialize_note(record: NoteRecord) -> Note {
    let content_blocks = match (record.content_blocks, record.content) {
        (Some(blocks), _) => blocks,
        (None, Some(text)) if !text.is_empty() => vec![ContentBlock::Text { content: text }],
        (None, _) => Vec::new(),
    };

    Note {
        title: record.title,
        content_blocks,
        tags: record.tags,
        links: record.link,
    }
}

pub fn decode_library(text: &str) -> Result<Library> {
    let doc: Value =
        serde_json::from_str(text).map_err(|e| FolioError::CorruptedData(e.to_string()))?;

    let Value::Object(entries) = doc else {
        return Err(FolioError::CorruptedData(
            "top-level value is not an object".to_string(),
        ));
    };

    let mut library = Library::new();
    for (name, notes) in entries {
        let records: Vec<NoteRecord> = serde_json::from_value(notes)
            .map_err(|e| FolioError::CorruptedData(format!("folder \"{}\": {}", name, e)))?;

        let mut folder = Folder::new(name);
        folder
            .notes_mut()
            .extend(records.into_iter().map(deserialize_note));
        library.push_folder(folder);
    }

    Ok(library)
}

pub fn encode_library(library: &Library) -> Result<String> {
    let mut doc = Map::new();
    for folder in library.folders() {
        let records: Vec<NoteRecord> = folder.notes().iter().map(serialize_note).collect();
        let value = serde_json::to_value(records).map_err(FolioError::Serialization)?;
        doc.insert(folder.name().to_string(), value);
    }
    serde_json::to_string_pretty(&Value::Object(doc)).map_err(FolioError::Serialization)
}
