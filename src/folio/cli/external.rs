//! Collaborators outside the process: the terminal prompt and the system URL
//! opener.

use folio::error::{FolioError, Result};
use std::io::{self, BufRead, Write};
use std::process::Command;
use tracing::debug;

/// Asks a yes/no question on stdin. Anything but `y`/`yes` declines,
/// including end of input.
pub(super) fn confirm(question: &str) -> bool {
    print!("{} [y/N] ", question);
    let _ = io::stdout().flush();

    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(0) | Err(_) => false,
        Ok(_) => is_yes(&answer),
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Hands a URL to the platform's default handler without waiting for it.
pub(super) fn open_url(url: &str) -> Result<()> {
    let target = if url.starts_with("www.") {
        format!("https://{}", url)
    } else {
        url.to_string()
    };

    let mut command = opener_command(&target);
    debug!(url = %target, "Opening link");
    command
        .spawn()
        .map(|_| ())
        .map_err(|e| FolioError::Api(format!("Failed to open {}: {}", target, e)))
}

#[cfg(target_os = "macos")]
fn opener_command(url: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(url);
    cmd
}

#[cfg(target_os = "windows")]
fn opener_command(url: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", "", url]);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener_command(url: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(url);
    cmd
}
