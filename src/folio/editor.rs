//! External editor integration.
//!
//! A note is edited as a plain text buffer:
//!
//! ```text
//! Title line
//!
//! Body text with an image ![image](/abs/path/cat.png) and a link
//! <https://example.org> in the middle.
//! ```
//!
//! Text blocks are written verbatim. Images become `![image](path)` markers,
//! with backslashes and `)` in the path escaped by a backslash. Links are
//! written as `<url>`. When the buffer is read back, markers and link spans
//! (`<url>`, bare `http://`, `https://` and `www.` spans) become blocks again,
//! in order.

use crate::error::{FolioError, Result};
use crate::model::{ContentBlock, Note};
use once_cell::sync::Lazy;
use regex::Regex;
use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;
use tracing::debug;
use uuid::Uuid;

static SPAN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"!\[image\]\((?P<image>(?:[^)\\\n]|\\[\\)])+)\)",
        r"|<(?P<angled>(?:https?://|www\.)[^>\s]+)>",
        r"|(?P<bare>(?:https?://|www\.)[^\s<>()]+)",
    ))
    .expect("span pattern is valid")
});

const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', '\'', '"'];

/// Represents the content parsed from an editor buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorContent {
    pub title: String,
    pub blocks: Vec<ContentBlock>,
}

impl EditorContent {
    pub fn new(title: String, blocks: Vec<ContentBlock>) -> Self {
        Self { title, blocks }
    }

    pub fn from_note(note: &Note) -> Self {
        Self::new(note.title.clone(), note.content_blocks.clone())
    }

    /// Formats the content for the editor buffer.
    pub fn to_buffer(&self) -> String {
        format!("{}\n\n{}\n", self.title, blocks_to_text(&self.blocks))
    }

    /// Parses an editor buffer back into title and blocks.
    /// First line is the title, an optional blank line, then the body.
    pub fn from_buffer(buffer: &str) -> Self {
        let (title, rest) = buffer.split_once('\n').unwrap_or((buffer, ""));
        let rest = rest.strip_prefix('\n').unwrap_or(rest);
        let body = rest.strip_suffix('\n').unwrap_or(rest);

        Self {
            title: title.trim_end().to_string(),
            blocks: text_to_blocks(body),
        }
    }
}

pub fn blocks_to_text(blocks: &[ContentBlock]) -> String {
    let mut out = String::new();
    for block in blocks {
        match block {
            ContentBlock::Text { content } => out.push_str(content),
            ContentBlock::Image { path } => {
                out.push_str("![image](");
                for c in path.chars() {
                    if matches!(c, '\\' | ')') {
                        out.push('\\');
                    }
                    out.push(c);
                }
                out.push(')');
            }
            ContentBlock::Link { url } => {
                out.push('<');
                out.push_str(url);
                out.push('>');
            }
        }
    }
    out
}

/// Splits text into blocks, recognizing image markers and link spans.
pub fn text_to_blocks(text: &str) -> Vec<ContentBlock> {
    let mut blocks = Vec::new();
    let mut pending = String::new();
    let mut cursor = 0;

    for caps in SPAN_RE.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        pending.push_str(&text[cursor..whole.start()]);
        cursor = whole.end();

        if let Some(image) = caps.name("image") {
            flush_text(&mut blocks, &mut pending);
            blocks.push(ContentBlock::image(unescape_path(image.as_str())));
        } else if let Some(url) = caps.name("angled") {
            flush_text(&mut blocks, &mut pending);
            blocks.push(ContentBlock::link(url.as_str()));
        } else if let Some(url) = caps.name("bare") {
            let raw = url.as_str();
            let trimmed = raw.trim_end_matches(TRAILING_PUNCTUATION);
            if trimmed.is_empty() {
                pending.push_str(raw);
                continue;
            }
            flush_text(&mut blocks, &mut pending);
            blocks.push(ContentBlock::link(trimmed));
            pending.push_str(&raw[trimmed.len()..]);
        }
    }

    pending.push_str(&text[cursor..]);
    flush_text(&mut blocks, &mut pending);
    blocks
}

fn unescape_path(escaped: &str) -> String {
    let mut path = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => path.extend(chars.next()),
            other => path.push(other),
        }
    }
    path
}

fn flush_text(blocks: &mut Vec<ContentBlock>, pending: &mut String) {
    if pending.is_empty() {
        return;
    }
    blocks.push(ContentBlock::text(std::mem::take(pending)));
}

/// Gets the editor command from environment.
/// Checks $EDITOR, then $VISUAL, then falls back to common editors.
pub fn get_editor() -> Result<String> {
    for var in ["EDITOR", "VISUAL"] {
        if let Ok(editor) = env::var(var) {
            if !editor.is_empty() {
                return Ok(editor);
            }
        }
    }

    for fallback in &["vim", "vi", "nano"] {
        if Command::new("which")
            .arg(fallback)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
        {
            return Ok((*fallback).to_string());
        }
    }

    Err(FolioError::Api(
        "No editor found. Set $EDITOR environment variable.".to_string(),
    ))
}

/// Opens a file in the user's editor and waits for it to close.
/// Returns the contents of the file after editing.
pub fn open_in_editor<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let editor = get_editor()?;
    let path = file_path.as_ref();
    debug!(%editor, path = %path.display(), "Launching editor");

    let status = Command::new(&editor)
        .arg(path)
        .status()
        .map_err(|e| FolioError::Api(format!("Failed to launch editor '{}': {}", editor, e)))?;

    if !status.success() {
        return Err(FolioError::Api(format!(
            "Editor '{}' exited with non-zero status",
            editor
        )));
    }

    fs::read_to_string(path).map_err(FolioError::Io)
}

/// Opens an editor with initial content and returns the edited content.
pub fn edit_content(initial: &EditorContent) -> Result<EditorContent> {
    let temp_file = env::temp_dir().join(format!("folio-edit-{}.txt", Uuid::new_v4()));
    fs::write(&temp_file, initial.to_buffer()).map_err(FolioError::Io)?;

    let result = open_in_editor(&temp_file);
    let _ = fs::remove_file(&temp_file);

    Ok(EditorContent::from_buffer(&result?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mixed_blocks() -> Vec<ContentBlock> {
        vec![
            ContentBlock::text("Packing list\n- boots\n"),
            ContentBlock::image("/home/me/Pictures/map.png"),
            ContentBlock::text("\nBook at "),
            ContentBlock::link("https://example.org/booking?id=7"),
            ContentBlock::text(" before friday."),
        ]
    }

    #[test]
    fn buffer_layout() {
        let ec = EditorContent::new("Trip".into(), vec![ContentBlock::text("hi")]);
        assert_eq!(ec.to_buffer(), "Trip\n\nhi\n");
    }

    #[test]
    fn roundtrip_mixed_content() {
        let original = EditorContent::new("Trip".into(), mixed_blocks());
        let parsed = EditorContent::from_buffer(&original.to_buffer());
        assert_eq!(parsed, original);
    }

    #[test]
    fn roundtrip_preserves_trailing_newlines() {
        let original = EditorContent::new("T".into(), vec![ContentBlock::text("line\n\n")]);
        assert_eq!(EditorContent::from_buffer(&original.to_buffer()), original);
    }

    #[test]
    fn roundtrip_adjacent_link_and_text() {
        let original = EditorContent::new(
            "T".into(),
            vec![
                ContentBlock::link("https://a.example"),
                ContentBlock::text("suffix"),
            ],
        );
        assert_eq!(EditorContent::from_buffer(&original.to_buffer()), original);
    }

    #[test]
    fn empty_body() {
        let ec = EditorContent::new("Only title".into(), vec![]);
        assert_eq!(EditorContent::from_buffer(&ec.to_buffer()), ec);
        assert_eq!(
            EditorContent::from_buffer("Only title"),
            EditorContent::new("Only title".into(), vec![])
        );
        assert_eq!(
            EditorContent::from_buffer(""),
            EditorContent::new(String::new(), vec![])
        );
    }

    #[test]
    fn no_blank_separator() {
        let ec = EditorContent::from_buffer("Title\nContent without blank");
        assert_eq!(ec.title, "Title");
        assert_eq!(ec.blocks, vec![ContentBlock::text("Content without blank")]);
    }

    #[test]
    fn recognizes_bare_links_and_trims_punctuation() {
        let blocks = text_to_blocks("Docs: https://docs.rs/regex. Also www.example.com!");
        assert_eq!(
            blocks,
            vec![
                ContentBlock::text("Docs: "),
                ContentBlock::link("https://docs.rs/regex"),
                ContentBlock::text(". Also "),
                ContentBlock::link("www.example.com"),
                ContentBlock::text("!"),
            ]
        );
    }

    #[test]
    fn recognizes_image_markers() {
        let blocks = text_to_blocks("![image](/a.png)![image](/b.png)");
        assert_eq!(
            blocks,
            vec![ContentBlock::image("/a.png"), ContentBlock::image("/b.png")]
        );
    }

    #[test]
    fn plain_text_stays_single_block() {
        assert_eq!(
            text_to_blocks("just words (and parens)"),
            vec![ContentBlock::text("just words (and parens)")]
        );
        assert!(text_to_blocks("").is_empty());
    }

    #[test]
    fn image_paths_with_parens_and_backslashes_roundtrip() {
        let original = EditorContent::new(
            "Photos".into(),
            vec![
                ContentBlock::image("/home/me/Pictures/photo (1).png"),
                ContentBlock::text(" and "),
                ContentBlock::image(r"C:\Users\me\scan (final)).jpg"),
            ],
        );
        let buffer = original.to_buffer();
        assert!(buffer.contains(r"photo (1\).png"));
        assert_eq!(EditorContent::from_buffer(&buffer), original);
    }

    #[test]
    fn image_path_keeps_surrounding_spaces() {
        let original = EditorContent::new("T".into(), vec![ContentBlock::image(" odd name ")]);
        assert_eq!(EditorContent::from_buffer(&original.to_buffer()), original);
    }
}
