//! Case-insensitive substring search over folder names, note titles and tags.
//!
//! Note search always walks the complete list. In highlight mode every note
//! comes back, flagged; in filter mode only matches remain, each keeping the
//! index it has in the full list so it can still be addressed.

use crate::commands::{folder_notes, CmdResult};
use crate::error::Result;
use crate::index::{DisplayNote, MatchSegment};
use crate::model::{Library, Note};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    #[default]
    Highlight,
    Filter,
}

impl std::str::FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "highlight" => Ok(SearchMode::Highlight),
            "filter" => Ok(SearchMode::Filter),
            other => Err(format!(
                "Unknown search mode: {} (expected highlight or filter)",
                other
            )),
        }
    }
}

impl std::fmt::Display for SearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchMode::Highlight => write!(f, "highlight"),
            SearchMode::Filter => write!(f, "filter"),
        }
    }
}

pub fn search_folders(query: &str, names: &[String]) -> Vec<String> {
    let query = fold(query.trim());
    if query.is_empty() {
        return names.to_vec();
    }
    names
        .iter()
        .filter(|name| fold(name).contains(&query))
        .cloned()
        .collect()
}

/// Annotates every note with whether it matches `query`.
pub fn search_notes(query: &str, notes: &[Note]) -> Vec<DisplayNote> {
    let query = query.trim();
    let query_folded = fold(query);

    notes
        .iter()
        .enumerate()
        .map(|(pos, note)| {
            let mut dn = DisplayNote::new(pos, note.clone());
            if !query_folded.is_empty() {
                let in_title = fold(&note.title).contains(&query_folded);
                let in_tags = note.tags.iter().any(|t| fold(t).contains(&query_folded));
                dn.matched = in_title || in_tags;
                if in_title {
                    dn.title_segments = highlight(&note.title, query);
                }
            }
            dn
        })
        .collect()
}

pub fn run_folders(library: &Library, query: &str) -> CmdResult {
    CmdResult::default().with_listed_folders(search_folders(query, &library.folder_names()))
}

pub fn run_notes(
    library: &Library,
    folder: &str,
    query: &str,
    mode: SearchMode,
) -> Result<CmdResult> {
    let notes = folder_notes(library, folder)?;
    let annotated = search_notes(query, notes);
    let listed = match mode {
        SearchMode::Highlight => annotated,
        SearchMode::Filter if query.trim().is_empty() => annotated,
        SearchMode::Filter => annotated.into_iter().filter(|dn| dn.matched).collect(),
    };
    Ok(CmdResult::default().with_listed_notes(listed))
}

/// Lowercases one char at a time, so offsets can be traced back to `text`.
fn fold(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// Splits `text` into plain and matched segments, case-insensitively.
///
/// Lowercasing may change a char's byte length, so every byte of the folded
/// text records the span of the char it came from. Matches are widened to
/// whole chars of the original.
fn highlight(text: &str, query: &str) -> Vec<MatchSegment> {
    let query_folded = fold(query);
    if query_folded.is_empty() {
        return vec![MatchSegment::Plain(text.to_string())];
    }

    let mut folded = String::with_capacity(text.len());
    let mut origin: Vec<(usize, usize)> = Vec::with_capacity(text.len());
    for (start, c) in text.char_indices() {
        let end = start + c.len_utf8();
        for lower in c.to_lowercase() {
            folded.push(lower);
            origin.extend(std::iter::repeat((start, end)).take(lower.len_utf8()));
        }
    }

    let mut segments = Vec::new();
    let mut cursor = 0;
    let mut from = 0;
    while let Some(found) = folded[from..].find(&query_folded) {
        let folded_start = from + found;
        let folded_end = folded_start + query_folded.len();
        from = folded_end;

        let start = origin[folded_start].0.max(cursor);
        let end = origin[folded_end - 1].1;
        if end <= start {
            continue;
        }
        if start > cursor {
            segments.push(MatchSegment::Plain(text[cursor..start].to_string()));
        }
        segments.push(MatchSegment::Match(text[start..end].to_string()));
        cursor = end;
    }
    if cursor < text.len() {
        segments.push(MatchSegment::Plain(text[cursor..].to_string()));
    }
    segments
}
