use colored::Colorize;
use folio::api::{CmdMessage, MessageLevel};
use folio::index::{DisplayNote, MatchSegment};
use folio::preview::ResolvedBlock;
use folio::tags::format_tags;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TAGS_WIDTH: usize = 28;
const MATCH_MARKER: &str = "›";
const PREVIEW_CHARS: usize = 50;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => eprintln!("{}", message.content.yellow()),
            MessageLevel::Error => eprintln!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_folders(folders: &[String]) {
    if folders.is_empty() {
        println!("No folders found.");
        return;
    }
    for name in folders {
        println!("  {}", name);
    }
}

/// Prints a note list. With `searching` set, matching notes are marked and
/// their matched title parts highlighted; the rest are dimmed.
pub(super) fn print_notes(notes: &[DisplayNote], searching: bool) {
    if notes.is_empty() {
        println!("No notes found.");
        return;
    }

    for dn in notes {
        let idx_str = format!("{}. ", dn.index);
        let left_prefix = if searching && dn.matched {
            format!("  {} ", MATCH_MARKER)
        } else {
            "    ".to_string()
        };

        let tags = truncate_to_width(&format_tags(&dn.note.tags), TAGS_WIDTH);
        let fixed_width = left_prefix.width() + idx_str.width() + TAGS_WIDTH + 2;
        let available = LINE_WIDTH.saturating_sub(fixed_width);

        let (mut title_display, mut title_width) = render_title(dn, searching, available);
        let preview = preview_text(&dn.note.plain_text());
        let room = available.saturating_sub(title_width + 1);
        if !preview.is_empty() && room > 1 {
            let cut = truncate_to_width(&preview, room);
            title_width += cut.width() + 1;
            title_display.push(' ');
            title_display.push_str(&cut.dimmed().to_string());
        }
        let padding = available.saturating_sub(title_width);

        let idx_colored = if searching && dn.matched {
            idx_str.yellow()
        } else {
            idx_str.normal()
        };

        println!(
            "{}{}{}{}  {}",
            left_prefix,
            idx_colored,
            title_display,
            " ".repeat(padding),
            tags.dimmed()
        );
    }
}

fn preview_text(body: &str) -> String {
    body.chars()
        .take(PREVIEW_CHARS)
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}

fn render_title(dn: &DisplayNote, searching: bool, max_width: usize) -> (String, usize) {
    let mut out = String::new();
    let mut width = 0;
    let mut budget = max_width;

    for segment in &dn.title_segments {
        let (text, is_match) = match segment {
            MatchSegment::Plain(t) => (t, false),
            MatchSegment::Match(t) => (t, true),
        };
        let piece = truncate_to_width(text, budget);
        let piece_width = piece.width();
        let styled = if !searching {
            piece.normal()
        } else if !dn.matched {
            piece.dimmed()
        } else if is_match {
            piece.yellow().bold()
        } else {
            piece.normal()
        };
        out.push_str(&styled.to_string());
        width += piece_width;
        if piece_width < text.width() {
            break;
        }
        budget = budget.saturating_sub(piece_width);
    }

    (out, width)
}

pub(super) fn print_full_note(dn: &DisplayNote, blocks: &[ResolvedBlock], first: bool) {
    if !first {
        println!("\n================================\n");
    }
    println!("{} {}", dn.index.to_string().yellow(), dn.note.title.bold());
    if !dn.note.tags.is_empty() {
        println!("{}", format_tags(&dn.note.tags).dimmed());
    }
    println!("--------------------------------");

    let mut body = String::new();
    for block in blocks {
        let rendered = match block {
            ResolvedBlock::Text(t) => t.normal(),
            ResolvedBlock::Image(path) => format!("[image: {}]", path.display()).cyan(),
            ResolvedBlock::Link(url) => url.blue().underline(),
            ResolvedBlock::Unavailable { error, .. } => format!("[{}]", error).red(),
        };
        body.push_str(&rendered.to_string());
    }
    println!("{}", body);

    if !dn.note.links.is_empty() {
        println!();
        for link in &dn.note.links {
            println!("  {}", link.blue());
        }
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}
