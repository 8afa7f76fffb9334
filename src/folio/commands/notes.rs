use crate::commands::{
    check_index, folder_notes, folder_notes_mut, CmdMessage, CmdResult, NoteUpdate,
};
use crate::error::{FolioError, Result};
use crate::index::{index_notes, DisplayIndex, DisplayNote};
use crate::model::{Library, Note};

pub fn add(library: &mut Library, folder: &str, title: &str) -> Result<CmdResult> {
    let notes = folder_notes_mut(library, folder)?;
    if title.trim().is_empty() {
        return Err(FolioError::EmptyTitle);
    }

    let note = Note::new(title);
    notes.push(note.clone());
    let index = DisplayIndex::from_position(notes.len() - 1);

    let mut result = CmdResult::mutated().with_affected_notes(vec![note]);
    result.add_message(CmdMessage::success(format!(
        "Note created ({}): {}",
        index, title
    )));
    Ok(result)
}

pub fn delete(library: &mut Library, folder: &str, index: usize) -> Result<CmdResult> {
    let notes = folder_notes_mut(library, folder)?;
    check_index(notes, index)?;

    let removed = notes.remove(index);

    let mut result = CmdResult::mutated();
    result.add_message(CmdMessage::success(format!(
        "Note deleted ({}): {}",
        DisplayIndex::from_position(index),
        removed.title
    )));
    result.affected_notes.push(removed);
    Ok(result)
}

/// Deletes several notes addressed by positions in the list as it is now.
///
/// Every position is validated before anything is removed. Removal runs from
/// the highest position down, so earlier removals never shift a position
/// that is still pending.
pub fn delete_many(
    library: &mut Library,
    folder: &str,
    indexes: &[usize],
) -> Result<CmdResult> {
    let notes = folder_notes_mut(library, folder)?;
    for &index in indexes {
        check_index(notes, index)?;
    }

    let mut ordered: Vec<usize> = indexes.to_vec();
    ordered.sort_unstable();
    ordered.dedup();

    let mut result = CmdResult::mutated();
    let mut removed = Vec::with_capacity(ordered.len());
    for &index in ordered.iter().rev() {
        removed.push((index, notes.remove(index)));
    }
    removed.reverse();

    for (index, note) in removed {
        result.add_message(CmdMessage::success(format!(
            "Note deleted ({}): {}",
            DisplayIndex::from_position(index),
            note.title
        )));
        result.affected_notes.push(note);
    }
    Ok(result)
}

pub fn update(
    library: &mut Library,
    folder: &str,
    index: usize,
    update: NoteUpdate,
) -> Result<CmdResult> {
    let notes = folder_notes_mut(library, folder)?;
    check_index(notes, index)?;

    let note = &mut notes[index];
    update.apply(note);

    let mut result = CmdResult::mutated().with_affected_notes(vec![note.clone()]);
    result.add_message(CmdMessage::success(format!(
        "Note updated ({}): {}",
        DisplayIndex::from_position(index),
        note.title
    )));
    Ok(result)
}

pub fn list(library: &Library, folder: &str) -> Result<CmdResult> {
    let notes = folder_notes(library, folder)?;
    Ok(CmdResult::default().with_listed_notes(index_notes(notes)))
}

pub fn get(library: &Library, folder: &str, index: usize) -> Result<DisplayNote> {
    let notes = folder_notes(library, folder)?;
    check_index(notes, index)?;
    Ok(DisplayNote::new(index, notes[index].clone()))
}
