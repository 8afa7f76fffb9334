use clap::{ArgAction, CommandFactory, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "folio",
    bin_name = "folio",
    version,
    disable_help_flag = true,
    disable_help_subcommand = true
)]
#[command(about = "Folders of notes with text, images and links", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (repeat for more)
    #[arg(short, long, global = true, action = ArgAction::Count, help_heading = "Options")]
    pub verbose: u8,

    /// Print help
    #[arg(short, long, global = true)]
    pub help: bool,
}

/// Help sections in display order, each with the commands it lists.
const HELP_SECTIONS: &[(&str, &[&str])] = &[
    (
        "Folder Commands:",
        &["folders", "add-folder", "rename-folder", "delete-folder"],
    ),
    (
        "Note Commands:",
        &[
            "list", "create", "view", "edit", "delete", "tag", "attach", "link", "open-link",
        ],
    ),
    ("Miscellaneous:", &["config", "help"]),
];

/// Top-level help: commands by section, then the global options.
pub fn help_text() -> String {
    let cmd = Cli::command();
    let mut out = format!("folio {}\n", cmd.get_version().unwrap_or("unknown"));
    out.push_str("Folders of notes with text, images and links\n\n");
    out.push_str("Usage: folio [OPTIONS] [COMMAND]\n");

    for (title, names) in HELP_SECTIONS {
        out.push_str(&format!("\n{}\n", title));
        for name in *names {
            let about = cmd
                .find_subcommand(name)
                .and_then(|sc| sc.get_about())
                .map(|a| a.to_string())
                .unwrap_or_default();
            out.push_str(&format!("  {:<14} {}\n", name, about));
        }
    }

    out.push_str("\nOptions:\n");
    out.push_str("  -v, --verbose    Verbose output (repeat for more)\n");
    out.push_str("  -h, --help       Print help\n");
    out.push_str("  -V, --version    Print version\n");
    out
}

/// Prints top-level help, or clap's help for one command. Unknown names fall
/// back to the top-level help on stderr.
pub fn print_help(command: Option<&str>) {
    let Some(name) = command else {
        print!("{}", help_text());
        return;
    };

    let mut cmd = Cli::command();
    match cmd.find_subcommand_mut(name) {
        Some(sub) => print!("{}", sub.render_help()),
        None => {
            eprintln!("Unknown command: {}\n", name);
            eprint!("{}", help_text());
        }
    }
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Folder(c) => match c {
                FolderCommands::Folders { .. } => "folders",
                FolderCommands::AddFolder { .. } => "add-folder",
                FolderCommands::RenameFolder { .. } => "rename-folder",
                FolderCommands::DeleteFolder { .. } => "delete-folder",
            },
            Commands::Note(c) => match c {
                NoteCommands::List { .. } => "list",
                NoteCommands::Create { .. } => "create",
                NoteCommands::View { .. } => "view",
                NoteCommands::Edit { .. } => "edit",
                NoteCommands::Delete { .. } => "delete",
                NoteCommands::Tag { .. } => "tag",
                NoteCommands::Attach { .. } => "attach",
                NoteCommands::Link { .. } => "link",
                NoteCommands::OpenLink { .. } => "open-link",
            },
            Commands::Misc(c) => match c {
                MiscCommands::Config { .. } => "config",
                MiscCommands::Help { .. } => "help",
            },
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Folder(FolderCommands),

    #[command(flatten)]
    Note(NoteCommands),

    #[command(flatten)]
    Misc(MiscCommands),
}

#[derive(Subcommand, Debug)]
pub enum FolderCommands {
    /// List folders
    #[command(alias = "f", display_order = 1)]
    Folders {
        /// Only show folders whose name contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Create a folder
    #[command(display_order = 2)]
    AddFolder { name: String },

    /// Rename a folder, keeping its notes
    #[command(display_order = 3)]
    RenameFolder { old: String, new: String },

    /// Delete a folder and every note in it
    #[command(display_order = 4)]
    DeleteFolder {
        name: String,

        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum NoteCommands {
    /// List the notes in a folder
    #[command(alias = "ls", display_order = 10)]
    List {
        folder: String,

        /// Search titles and tags
        #[arg(short, long)]
        search: Option<String>,

        /// Show only matching notes instead of highlighting them
        #[arg(long, requires = "search")]
        filter: bool,
    },

    /// Create a note
    #[command(alias = "n", display_order = 11)]
    Create {
        folder: String,

        /// Skip opening the editor
        #[arg(long)]
        no_editor: bool,

        /// Title words (joined with spaces)
        #[arg(required = true, trailing_var_arg = true)]
        title: Vec<String>,
    },

    /// View one or more notes
    #[command(alias = "v", display_order = 12)]
    View {
        folder: String,

        /// Indexes of the notes (e.g. 1 3-5)
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Edit a note in the editor
    #[command(alias = "e", display_order = 13)]
    Edit { folder: String, index: String },

    /// Delete one or more notes
    #[command(alias = "rm", display_order = 14)]
    Delete {
        folder: String,

        /// Indexes of the notes (e.g. 1 3-5)
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,

        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Replace a note's tags (comma separated, empty to clear)
    #[command(display_order = 15)]
    Tag {
        folder: String,
        index: String,
        tags: String,
    },

    /// Append an image to a note
    #[command(display_order = 16)]
    Attach {
        folder: String,
        index: String,
        path: String,
    },

    /// Append a link to a note
    #[command(display_order = 17)]
    Link {
        folder: String,
        index: String,
        url: String,
    },

    /// Open a note's link in the browser
    #[command(display_order = 18)]
    OpenLink {
        folder: String,
        index: String,

        /// Which link, counting from 1 (default: the first)
        n: Option<usize>,
    },
}

#[derive(Subcommand, Debug)]
pub enum MiscCommands {
    /// Get or set configuration
    #[command(display_order = 30)]
    Config {
        /// Configuration key (data-file, search-mode, confirm-deletes)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Print help for folio or a subcommand
    #[command(display_order = 31)]
    Help {
        /// Subcommand to get help for
        command: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_sections_cover_every_command() {
        let listed: Vec<&str> = HELP_SECTIONS
            .iter()
            .flat_map(|(_, names)| names.iter().copied())
            .collect();
        for sc in Cli::command().get_subcommands() {
            assert!(
                listed.contains(&sc.get_name()),
                "{} is missing from help",
                sc.get_name()
            );
        }
        assert_eq!(listed.len(), Cli::command().get_subcommands().count());
    }

    #[test]
    fn parses_grouped_subcommands() {
        let cli =
            Cli::try_parse_from(["folio", "-vv", "delete", "Work", "1", "3-4", "-y"]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Some(Commands::Note(NoteCommands::Delete {
                folder,
                indexes,
                yes,
            })) => {
                assert_eq!(folder, "Work");
                assert_eq!(indexes, vec!["1", "3-4"]);
                assert!(yes);
            }
            other => panic!("unexpected parse: {:?}", other),
        }
    }

    #[test]
    fn create_joins_title_words() {
        let cli = Cli::try_parse_from(["folio", "create", "Inbox", "buy", "milk"]).unwrap();
        match cli.command {
            Some(Commands::Note(NoteCommands::Create { title, .. })) => {
                assert_eq!(title.join(" "), "buy milk")
            }
            other => panic!("unexpected parse: {:?}", other),
        }
    }

    #[test]
    fn filter_requires_search() {
        assert!(Cli::try_parse_from(["folio", "list", "Inbox", "--filter"]).is_err());
    }

    #[test]
    fn help_text_lists_commands() {
        let help = help_text();
        assert!(help.contains("Folder Commands:"));
        assert!(help.contains("open-link"));
    }
}
