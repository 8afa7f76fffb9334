//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for all folio operations, whatever the UI.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Owns** the in-memory [`Library`] and the [`DataStore`] it came from
//! - **Dispatches** to the appropriate command function
//! - **Persists** the whole library after every successful mutation
//! - **Normalizes inputs** (user-facing 1-based indexes to list positions)
//! - **Tracks** the session selection (current folder and note)
//!
//! ## Persistence Policy
//!
//! Saves are best effort. When a save fails the mutation stays in memory,
//! the result carries an error message and the facade is marked dirty. The
//! next mutation, or an explicit [`FolioApi::save`], writes the full library
//! again.
//!
//! ## Loading
//!
//! [`FolioApi::open`] never fails. An unreadable document is reported through
//! [`FolioApi::startup_messages`] and the session starts with an empty
//! library; the document itself is left for the store to preserve.
//!
//! ## Selection
//!
//! The current note is a position, so it goes stale as soon as the folder's
//! list changes shape. Every structural mutation re-resolves it: deleting an
//! earlier note shifts it down, deleting the selected note clears it.

use crate::commands;
use crate::error::{FolioError, Result};
use crate::index::{parse_indexes, DisplayIndex, DisplayNote};
use crate::model::{Library, Note};
use crate::store::DataStore;
use std::str::FromStr;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Selection {
    folder: Option<String>,
    note: Option<usize>,
}

/// The main API facade for folio operations.
///
/// Generic over `DataStore` to allow different storage backends.
pub struct FolioApi<S: DataStore> {
    store: S,
    library: Library,
    selection: Selection,
    dirty: bool,
    search_mode: SearchMode,
    startup_messages: Vec<CmdMessage>,
}

impl<S: DataStore> FolioApi<S> {
    pub fn open(mut store: S) -> Self {
        let mut startup_messages = Vec::new();
        let library = match store.load() {
            Ok(library) => library,
            Err(e) => {
                warn!(location = %store.location(), error = %e, "Starting with an empty library");
                startup_messages.push(CmdMessage::warning(format!(
                    "Could not read {} ({}). Starting with an empty library; the file was left in place.",
                    store.location(),
                    e
                )));
                Library::new()
            }
        };

        Self {
            store,
            library,
            selection: Selection::default(),
            dirty: false,
            search_mode: SearchMode::default(),
            startup_messages,
        }
    }

    pub fn with_search_mode(mut self, mode: SearchMode) -> Self {
        self.search_mode = mode;
        self
    }

    pub fn startup_messages(&self) -> &[CmdMessage] {
        &self.startup_messages
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// True when the in-memory library has changes the store does not have.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn save(&mut self) -> Result<()> {
        self.store.save(&self.library)?;
        self.dirty = false;
        Ok(())
    }

    fn persist(&mut self, mut result: CmdResult) -> CmdResult {
        if !result.mutated {
            return result;
        }
        self.dirty = true;
        match self.save() {
            Ok(()) => debug!("Library persisted"),
            Err(e) => {
                warn!(error = %e, "Save failed, keeping changes in memory");
                result.add_message(CmdMessage::error(format!(
                    "Changes are kept for this session but were not saved: {}",
                    e
                )));
            }
        }
        result
    }

    // --- Folders ---

    pub fn add_folder(&mut self, name: &str) -> Result<CmdResult> {
        let result = commands::folders::add(&mut self.library, name)?;
        Ok(self.persist(result))
    }

    pub fn rename_folder(&mut self, old: &str, new: &str) -> Result<CmdResult> {
        let result = commands::folders::rename(&mut self.library, old, new)?;
        if self.selection.folder.as_deref() == Some(old) {
            self.selection.folder = result.listed_folders.first().cloned();
        }
        Ok(self.persist(result))
    }

    pub fn delete_folder(&mut self, name: &str) -> Result<CmdResult> {
        let result = commands::folders::delete(&mut self.library, name)?;
        if self.selection.folder.as_deref() == Some(name) {
            self.selection = Selection::default();
        }
        Ok(self.persist(result))
    }

    pub fn list_folders(&self) -> CmdResult {
        commands::folders::list(&self.library)
    }

    pub fn search_folders(&self, query: &str) -> CmdResult {
        commands::search::run_folders(&self.library, query)
    }

    // --- Notes ---

    pub fn add_note(&mut self, folder: &str, title: &str) -> Result<CmdResult> {
        let result = commands::notes::add(&mut self.library, folder, title)?;
        Ok(self.persist(result))
    }

    pub fn delete_note(&mut self, folder: &str, index: usize) -> Result<CmdResult> {
        let result = commands::notes::delete(&mut self.library, folder, index)?;
        self.reresolve_after_delete(folder, &[index]);
        Ok(self.persist(result))
    }

    /// Deletes notes by user-facing indexes ("1", "3-5"), all resolved against
    /// the list as it is before the call.
    pub fn delete_notes<I: AsRef<str>>(
        &mut self,
        folder: &str,
        indexes: &[I],
    ) -> Result<CmdResult> {
        let len = commands::folder_notes(&self.library, folder)?.len();
        let positions = parse_positions(indexes, len)?;
        let result = commands::notes::delete_many(&mut self.library, folder, &positions)?;
        self.reresolve_after_delete(folder, &positions);
        Ok(self.persist(result))
    }

    pub fn update_note(
        &mut self,
        folder: &str,
        index: usize,
        update: NoteUpdate,
    ) -> Result<CmdResult> {
        let result = commands::notes::update(&mut self.library, folder, index, update)?;
        Ok(self.persist(result))
    }

    pub fn list_notes(&self, folder: &str) -> Result<CmdResult> {
        commands::notes::list(&self.library, folder)
    }

    /// Note search using the configured mode unless one is given.
    pub fn search_notes(
        &self,
        folder: &str,
        query: &str,
        mode: Option<SearchMode>,
    ) -> Result<CmdResult> {
        let mode = mode.unwrap_or(self.search_mode);
        commands::search::run_notes(&self.library, folder, query, mode)
    }

    pub fn get_note(&self, folder: &str, index: usize) -> Result<DisplayNote> {
        commands::notes::get(&self.library, folder, index)
    }

    pub fn view_notes<I: AsRef<str>>(&self, folder: &str, indexes: &[I]) -> Result<CmdResult> {
        let len = commands::folder_notes(&self.library, folder)?.len();
        let positions = parse_positions(indexes, len)?;
        let listed = positions
            .into_iter()
            .map(|pos| commands::notes::get(&self.library, folder, pos))
            .collect::<Result<Vec<_>>>()?;
        Ok(CmdResult::default().with_listed_notes(listed))
    }

    // --- Selection ---

    pub fn select_folder(&mut self, name: &str) -> Result<()> {
        if !self.library.contains(name) {
            return Err(FolioError::FolderNotFound(name.to_string()));
        }
        self.selection = Selection {
            folder: Some(name.to_string()),
            note: None,
        };
        Ok(())
    }

    pub fn select_note(&mut self, index: usize) -> Result<()> {
        let folder = self
            .selection
            .folder
            .clone()
            .ok_or_else(|| FolioError::Api("No folder selected".to_string()))?;
        commands::notes::get(&self.library, &folder, index)?;
        self.selection.note = Some(index);
        Ok(())
    }

    pub fn current_folder(&self) -> Option<&str> {
        self.selection.folder.as_deref()
    }

    /// The selected note, looked up fresh from the current list.
    pub fn current_note(&self) -> Option<(usize, &Note)> {
        let folder = self.library.folder(self.selection.folder.as_deref()?)?;
        let index = self.selection.note?;
        folder.notes().get(index).map(|n| (index, n))
    }

    fn reresolve_after_delete(&mut self, folder: &str, removed: &[usize]) {
        if self.selection.folder.as_deref() != Some(folder) {
            return;
        }
        if let Some(current) = self.selection.note {
            if removed.contains(&current) {
                self.selection.note = None;
            } else {
                let mut unique: Vec<usize> = removed.to_vec();
                unique.sort_unstable();
                unique.dedup();
                let shift = unique.iter().filter(|&&r| r < current).count();
                self.selection.note = Some(current - shift);
            }
        }
    }
}

/// Converts one user-facing index ("3") to a list position.
pub fn resolve_display_index(input: &str) -> Result<usize> {
    DisplayIndex::from_str(input)
        .map_err(FolioError::Api)?
        .position()
        .ok_or_else(|| FolioError::Api("Indexes start at 1".to_string()))
}

/// Resolves typed indexes and ranges against a list of `len` notes. Every
/// run is bounds-checked before it is expanded.
fn parse_positions<I: AsRef<str>>(inputs: &[I], len: usize) -> Result<Vec<usize>> {
    let mut positions = Vec::new();
    for range in parse_indexes(inputs).map_err(FolioError::Api)? {
        positions.extend(range.positions(len)?);
    }
    Ok(positions)
}

pub use crate::commands::search::SearchMode;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel, NoteUpdate};
