//! # CLI Layer
//!
//! This module is **one possible UI client** for folio. It is the only place
//! that reads arguments, talks to the terminal and decides exit codes.
//!
//! Handlers resolve user input (folder names, 1-based indexes, paths), call
//! one [`FolioApi`] method and print the returned [`CmdResult`]. Business
//! rules live in the library; nothing here touches the stored document.
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Builds `AppContext` from the data directory
//! - `handle_*()`: Per-command handlers that call the API and format output

use super::external::{confirm, open_url};
use super::print::{print_folders, print_full_note, print_messages, print_notes};
use super::setup::{print_help, Cli, Commands, FolderCommands, MiscCommands, NoteCommands};
use clap::Parser;
use folio::api::{resolve_display_index, CmdMessage, CmdResult, FolioApi, NoteUpdate, SearchMode};
use folio::config::FolioConfig;
use folio::editor::{edit_content, EditorContent};
use folio::error::{FolioError, Result};
use folio::init::{data_dir, initialize};
use folio::model::ContentBlock;
use folio::preview::{links_of, resolve_blocks};
use folio::store::fs::FileStore;
use folio::tags::parse_tags;
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

struct AppContext {
    api: FolioApi<FileStore>,
    config: FolioConfig,
    data_dir: PathBuf,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.help {
        print_help(cli.command.as_ref().map(Commands::name));
        return Ok(());
    }

    if let Some(Commands::Misc(MiscCommands::Help { command })) = &cli.command {
        return handle_help(command.as_deref());
    }

    let mut ctx = init_context()?;

    match cli.command {
        Some(Commands::Folder(cmd)) => match cmd {
            FolderCommands::Folders { search } => handle_folders(&ctx, search),
            FolderCommands::AddFolder { name } => handle_add_folder(&mut ctx, &name),
            FolderCommands::RenameFolder { old, new } => {
                handle_rename_folder(&mut ctx, &old, &new)
            }
            FolderCommands::DeleteFolder { name, yes } => {
                handle_delete_folder(&mut ctx, &name, yes)
            }
        },
        Some(Commands::Note(cmd)) => match cmd {
            NoteCommands::List {
                folder,
                search,
                filter,
            } => handle_list(&ctx, &folder, search, filter),
            NoteCommands::Create {
                folder,
                no_editor,
                title,
            } => handle_create(&mut ctx, &folder, &title.join(" "), no_editor),
            NoteCommands::View { folder, indexes } => handle_view(&ctx, &folder, &indexes),
            NoteCommands::Edit { folder, index } => handle_edit(&mut ctx, &folder, &index),
            NoteCommands::Delete {
                folder,
                indexes,
                yes,
            } => handle_delete(&mut ctx, &folder, &indexes, yes),
            NoteCommands::Tag {
                folder,
                index,
                tags,
            } => handle_tag(&mut ctx, &folder, &index, &tags),
            NoteCommands::Attach {
                folder,
                index,
                path,
            } => handle_attach(&mut ctx, &folder, &index, &path),
            NoteCommands::Link { folder, index, url } => {
                handle_link(&mut ctx, &folder, &index, &url)
            }
            NoteCommands::OpenLink { folder, index, n } => {
                handle_open_link(&mut ctx, &folder, &index, n)
            }
        },
        Some(Commands::Misc(cmd)) => match cmd {
            MiscCommands::Config { key, value } => handle_config(&mut ctx, key, value),
            MiscCommands::Help { command } => handle_help(command.as_deref()),
        },
        None => handle_folders(&ctx, None),
    }
}

/// `-v` raises the level from warn to info, debug and trace. `RUST_LOG`
/// still wins when set.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn init_context() -> Result<AppContext> {
    let dir = data_dir()?;
    let ctx = initialize(&dir);
    print_messages(ctx.api.startup_messages());

    Ok(AppContext {
        api: ctx.api,
        config: ctx.config,
        data_dir: ctx.data_dir,
    })
}

fn finish(result: CmdResult) -> Result<()> {
    print_messages(&result.messages);
    Ok(())
}

// --- Folders ---

fn handle_folders(ctx: &AppContext, search: Option<String>) -> Result<()> {
    let result = match search {
        Some(query) => ctx.api.search_folders(&query),
        None => ctx.api.list_folders(),
    };
    print_folders(&result.listed_folders);
    finish(result)
}

fn handle_add_folder(ctx: &mut AppContext, name: &str) -> Result<()> {
    let result = ctx.api.add_folder(name)?;
    finish(result)
}

fn handle_rename_folder(ctx: &mut AppContext, old: &str, new: &str) -> Result<()> {
    let result = ctx.api.rename_folder(old, new)?;
    finish(result)
}

fn handle_delete_folder(ctx: &mut AppContext, name: &str, yes: bool) -> Result<()> {
    let folder = ctx
        .api
        .library()
        .folder(name)
        .ok_or_else(|| FolioError::FolderNotFound(name.to_string()))?;
    let count = folder.notes().len();

    if needs_confirmation(ctx, yes)
        && !confirm(&format!(
            "Delete folder '{}' and its {} note(s)?",
            name, count
        ))
    {
        println!("Aborted.");
        return Ok(());
    }

    let result = ctx.api.delete_folder(name)?;
    finish(result)
}

// --- Notes ---

fn handle_list(
    ctx: &AppContext,
    folder: &str,
    search: Option<String>,
    filter: bool,
) -> Result<()> {
    match search {
        Some(query) => {
            let mode = filter.then_some(SearchMode::Filter);
            let result = ctx.api.search_notes(folder, &query, mode)?;
            print_notes(&result.listed_notes, !query.trim().is_empty());
            finish(result)
        }
        None => {
            let result = ctx.api.list_notes(folder)?;
            print_notes(&result.listed_notes, false);
            finish(result)
        }
    }
}

fn handle_create(ctx: &mut AppContext, folder: &str, title: &str, no_editor: bool) -> Result<()> {
    if !ctx.api.library().contains(folder) {
        return Err(FolioError::FolderNotFound(folder.to_string()));
    }

    if no_editor {
        let result = ctx.api.add_note(folder, title)?;
        return finish(result);
    }

    let edited = edit_content(&EditorContent::new(title.to_string(), Vec::new()))?;
    let result = ctx.api.add_note(folder, &edited.title)?;
    if edited.blocks.is_empty() {
        return finish(result);
    }
    print_messages(&result.messages);

    let position = last_position(ctx, folder)?;
    let result = ctx
        .api
        .update_note(folder, position, NoteUpdate::new().blocks(edited.blocks))?;
    finish(result)
}

fn last_position(ctx: &AppContext, folder: &str) -> Result<usize> {
    ctx.api
        .library()
        .folder(folder)
        .and_then(|f| f.notes().len().checked_sub(1))
        .ok_or_else(|| FolioError::FolderNotFound(folder.to_string()))
}

fn handle_view(ctx: &AppContext, folder: &str, indexes: &[String]) -> Result<()> {
    let result = ctx.api.view_notes(folder, indexes)?;
    for (i, dn) in result.listed_notes.iter().enumerate() {
        let blocks = resolve_blocks(&dn.note.content_blocks);
        print_full_note(dn, &blocks, i == 0);
    }
    finish(result)
}

fn handle_edit(ctx: &mut AppContext, folder: &str, index: &str) -> Result<()> {
    let position = select(ctx, folder, index)?;
    let initial = match ctx.api.current_note() {
        Some((_, note)) => EditorContent::from_note(note),
        None => return Err(FolioError::Api("No note selected".to_string())),
    };

    let edited = edit_content(&initial)?;
    if edited.title.trim().is_empty() {
        return Err(FolioError::EmptyTitle);
    }
    if edited == initial {
        println!("No changes.");
        return Ok(());
    }

    let update = NoteUpdate::new()
        .title(edited.title)
        .blocks(edited.blocks);
    let result = ctx.api.update_note(folder, position, update)?;
    finish(result)
}

fn handle_delete(
    ctx: &mut AppContext,
    folder: &str,
    indexes: &[String],
    yes: bool,
) -> Result<()> {
    // Resolve everything up front so a bad index fails before the prompt.
    let targets = ctx.api.view_notes(folder, indexes)?;

    if needs_confirmation(ctx, yes) {
        let titles: Vec<String> = targets
            .listed_notes
            .iter()
            .map(|dn| format!("{}. {}", dn.index, dn.note.title))
            .collect();
        if !confirm(&format!("Delete {}?", titles.join(", "))) {
            println!("Aborted.");
            return Ok(());
        }
    }

    let result = ctx.api.delete_notes(folder, indexes)?;
    finish(result)
}

fn handle_tag(ctx: &mut AppContext, folder: &str, index: &str, tags: &str) -> Result<()> {
    let position = resolve_display_index(index)?;
    let update = NoteUpdate::new().tags(parse_tags(tags));
    let result = ctx.api.update_note(folder, position, update)?;
    finish(result)
}

fn handle_attach(ctx: &mut AppContext, folder: &str, index: &str, path: &str) -> Result<()> {
    let position = select(ctx, folder, index)?;
    let absolute = canonical_image_path(Path::new(path))?;
    append_block(
        ctx,
        folder,
        position,
        ContentBlock::image(absolute.to_string_lossy()),
    )
}

fn canonical_image_path(path: &Path) -> Result<PathBuf> {
    let failure = |reason: String| FolioError::ImageLoadFailure {
        path: path.to_path_buf(),
        reason,
    };
    let absolute = path.canonicalize().map_err(|e| failure(e.to_string()))?;
    if !absolute.is_file() {
        return Err(failure("not a regular file".to_string()));
    }
    Ok(absolute)
}

fn handle_link(ctx: &mut AppContext, folder: &str, index: &str, url: &str) -> Result<()> {
    let url = url.trim();
    if url.is_empty() {
        return Err(FolioError::Api("Link cannot be empty".to_string()));
    }
    let position = select(ctx, folder, index)?;
    append_block(ctx, folder, position, ContentBlock::link(url))
}

fn append_block(
    ctx: &mut AppContext,
    folder: &str,
    position: usize,
    block: ContentBlock,
) -> Result<()> {
    let mut blocks = ctx
        .api
        .current_note()
        .map(|(_, note)| note.content_blocks.clone())
        .unwrap_or_default();
    blocks.push(block);

    let result = ctx
        .api
        .update_note(folder, position, NoteUpdate::new().blocks(blocks))?;
    finish(result)
}

fn handle_open_link(
    ctx: &mut AppContext,
    folder: &str,
    index: &str,
    n: Option<usize>,
) -> Result<()> {
    select(ctx, folder, index)?;
    let links = ctx
        .api
        .current_note()
        .map(|(_, note)| links_of(note))
        .unwrap_or_default();

    let which = n.unwrap_or(1);
    let url = which
        .checked_sub(1)
        .and_then(|i| links.get(i))
        .ok_or_else(|| match links.len() {
            0 => FolioError::Api("Note has no links".to_string()),
            len => FolioError::Api(format!("Link {} not found (note has {})", which, len)),
        })?;

    open_url(url)?;
    println!("Opened {}", url);
    Ok(())
}

/// Selects `folder` and the note at the user-facing `index`, returning its
/// list position.
fn select(ctx: &mut AppContext, folder: &str, index: &str) -> Result<usize> {
    let position = resolve_display_index(index)?;
    ctx.api.select_folder(folder)?;
    ctx.api.select_note(position)?;
    Ok(position)
}

fn needs_confirmation(ctx: &AppContext, yes: bool) -> bool {
    !yes && ctx.config.confirm_deletes
}

// --- Misc ---

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    match (key, value) {
        (None, _) => {
            for (k, v) in ctx.config.list_all() {
                println!("{} = {}", k, v);
            }
        }
        (Some(k), None) => match ctx.config.get(&k) {
            Some(v) => println!("{} = {}", k, v),
            None => return Err(FolioError::Api(format!("Unknown config key: {}", k))),
        },
        (Some(k), Some(v)) => {
            ctx.config.set(&k, &v)?;
            ctx.config.save(&ctx.data_dir)?;
            let mut result = CmdResult::default();
            result.add_message(CmdMessage::success(format!(
                "{} set to {}",
                k,
                ctx.config.get(&k).unwrap_or_default()
            )));
            return finish(result);
        }
    }
    Ok(())
}

fn handle_help(command: Option<&str>) -> Result<()> {
    print_help(command);
    Ok(())
}
