use crate::commands::{CmdMessage, CmdResult};
use crate::error::{FolioError, Result};
use crate::model::{Folder, Library};

fn clean_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(FolioError::EmptyName);
    }
    Ok(trimmed.to_string())
}

pub fn add(library: &mut Library, name: &str) -> Result<CmdResult> {
    let name = clean_name(name)?;
    if library.contains(&name) {
        return Err(FolioError::AlreadyExists(name));
    }

    library.push_folder(Folder::new(name.clone()));

    let mut result = CmdResult::mutated().with_listed_folders(vec![name.clone()]);
    result.add_message(CmdMessage::success(format!("Folder created: {}", name)));
    Ok(result)
}

pub fn rename(library: &mut Library, old: &str, new: &str) -> Result<CmdResult> {
    let new = clean_name(new)?;
    if !library.contains(old) {
        return Err(FolioError::FolderNotFound(old.to_string()));
    }
    if new == old {
        return Err(FolioError::NoOp(format!("folder is already named {}", old)));
    }
    if library.contains(&new) {
        return Err(FolioError::AlreadyExists(new));
    }

    library.rename_folder(old, &new);

    let mut result = CmdResult::mutated().with_listed_folders(vec![new.clone()]);
    result.add_message(CmdMessage::success(format!(
        "Folder renamed: {} -> {}",
        old, new
    )));
    Ok(result)
}

/// Removes a folder and all of its notes. Callers confirm with the user first.
pub fn delete(library: &mut Library, name: &str) -> Result<CmdResult> {
    let folder = library
        .remove_folder(name)
        .ok_or_else(|| FolioError::FolderNotFound(name.to_string()))?;

    let removed = folder.notes().to_vec();
    let mut result = CmdResult::mutated().with_affected_notes(removed);
    result.add_message(CmdMessage::success(format!(
        "Folder deleted: {} ({} notes)",
        name,
        folder.notes().len()
    )));
    Ok(result)
}

pub fn list(library: &Library) -> CmdResult {
    CmdResult::default().with_listed_folders(library.folder_names())
}
