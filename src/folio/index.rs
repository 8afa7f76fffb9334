//! # Display Indexes
//!
//! Notes are addressed by their position in the folder's list. The store works
//! with 0-based positions; users see and type 1-based numbers. [`DisplayIndex`]
//! is the user-facing form and converts at the boundary.
//!
//! Positions are only meaningful against the list they were computed from.
//! Deleting a note shifts every later note down by one, so callers resolve
//! indexes against the current list on every operation and never keep them
//! across a mutation.

use crate::error::FolioError;
use crate::model::Note;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// A segment of a title, either plain text or a part that matched a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchSegment {
    Plain(String),
    Match(String),
}

/// A user-facing, 1-based note index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DisplayIndex(pub usize);

impl DisplayIndex {
    pub fn from_position(position: usize) -> Self {
        DisplayIndex(position + 1)
    }

    /// 0-based position in the folder's list.
    pub fn position(self) -> Option<usize> {
        self.0.checked_sub(1)
    }
}

impl std::fmt::Display for DisplayIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DisplayIndex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<usize>() {
            Ok(0) => Err("Indexes start at 1".to_string()),
            Ok(n) => Ok(DisplayIndex(n)),
            Err(_) => Err(format!("Invalid index format: {}", s)),
        }
    }
}

/// A note as listed to the user: its index, the note itself and search
/// annotations.
#[derive(Debug, Clone)]
pub struct DisplayNote {
    pub index: DisplayIndex,
    pub note: Note,
    pub matched: bool,
    pub title_segments: Vec<MatchSegment>,
}

impl DisplayNote {
    pub fn new(position: usize, note: Note) -> Self {
        let title_segments = vec![MatchSegment::Plain(note.title.clone())];
        Self {
            index: DisplayIndex::from_position(position),
            note,
            matched: false,
            title_segments,
        }
    }
}

pub fn index_notes(notes: &[Note]) -> Vec<DisplayNote> {
    notes
        .iter()
        .enumerate()
        .map(|(pos, note)| DisplayNote::new(pos, note.clone()))
        .collect()
}

/// An inclusive run of display indexes as typed, not yet checked against a
/// list. A single index is a run of one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexRange {
    pub start: DisplayIndex,
    pub end: DisplayIndex,
}

impl IndexRange {
    pub fn single(index: DisplayIndex) -> Self {
        Self {
            start: index,
            end: index,
        }
    }

    /// The 0-based positions covered, once the whole run fits in a list of
    /// `len` notes. Nothing is expanded before that check.
    pub fn positions(&self, len: usize) -> Result<RangeInclusive<usize>, FolioError> {
        let (Some(first), Some(last)) = (self.start.position(), self.end.position()) else {
            return Err(FolioError::Api("Indexes start at 1".to_string()));
        };
        if last >= len {
            return Err(FolioError::IndexOutOfRange { index: last, len });
        }
        Ok(first..=last)
    }
}

/// Parses a single index ("3") or an inclusive range ("2-4").
///
/// Whether the indexes exist is checked later, against the current list.
pub fn parse_index_or_range(s: &str) -> Result<IndexRange, String> {
    if let Some((start, end)) = s.split_once('-') {
        let start = DisplayIndex::from_str(start)?;
        let end = DisplayIndex::from_str(end)?;
        if start > end {
            return Err(format!(
                "Invalid range: start ({}) must be <= end ({})",
                start, end
            ));
        }
        return Ok(IndexRange { start, end });
    }

    DisplayIndex::from_str(s).map(IndexRange::single)
}

pub fn parse_indexes<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<IndexRange>, String> {
    inputs
        .iter()
        .map(|input| parse_index_or_range(input.as_ref()))
        .collect()
}
