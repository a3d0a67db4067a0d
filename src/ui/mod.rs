//! Terminal output helpers for the CLI.
//!
//! Colored status lines, the search spinner, and the results table.

use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::time::Duration;

use crate::models::PaperRecord;

/// Check if stdout is a terminal.
pub fn is_terminal() -> bool {
    std::io::stdout().is_terminal()
}

/// Status types for colored output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Error,
    Warning,
    Info,
    Search,
    Export,
}

/// Status icons for different operations.
pub fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Success => "✓",
        Status::Error => "✗",
        Status::Warning => "⚠",
        Status::Info => "ℹ",
        Status::Search => "🔍",
        Status::Export => "📤",
    }
}

/// Print a styled status message to stderr.
pub fn print_status(status: Status, msg: &str) {
    let icon = status_icon(status);
    match status {
        Status::Success => eprintln!("{} {}", icon.green().bold(), msg),
        Status::Error => eprintln!("{} {}", icon.red().bold(), msg),
        Status::Warning => eprintln!("{} {}", icon.yellow().bold(), msg),
        Status::Info => eprintln!("{} {}", icon.cyan().bold(), msg),
        Status::Search => eprintln!("{} {}", icon.yellow(), msg),
        Status::Export => eprintln!("{} {}", icon.magenta(), msg),
    }
}

/// Welcome banner for the web form.
pub fn print_banner(addr: &str) {
    let version = env!("CARGO_PKG_VERSION");

    println!();
    println!("{}", format!("━━━ 🧠 ScholarSift v{} ━━━", version).bold().cyan());
    println!("  Search arXiv and export the results as Text, Word, PDF or Excel");
    println!("  Open {} in your browser", format!("http://{}", addr).underline());
    println!();
}

/// Print search results header.
pub fn print_search_header(query: &str, count: usize, duration: Duration) {
    println!();
    println!(
        "{} Search results for: \"{}\"",
        status_icon(Status::Search).yellow().bold(),
        query.cyan().bold()
    );
    println!(
        "{} Found {} papers in {:.2}s",
        "─".repeat(30).dimmed(),
        count.to_string().green().bold(),
        duration.as_secs_f64()
    );
    println!();
}

/// Spinner shown while the feed request is in flight.
pub fn search_spinner(query: &str) -> indicatif::ProgressBar {
    let spinner = indicatif::ProgressBar::new_spinner();
    if let Ok(style) = indicatif::ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        spinner.set_style(style.tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "));
    }
    spinner.set_message(format!("Searching arXiv for \"{}\"...", query));
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Build a table with one row per paper.
pub fn results_table(papers: &[PaperRecord]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(comfy_table::presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Title", "Authors", "Published", "PDF Link"]);

    for (idx, paper) in papers.iter().enumerate() {
        table.add_row(vec![
            Cell::new(idx + 1),
            Cell::new(truncate_with_ellipsis(&paper.title, 60)).add_attribute(Attribute::Bold),
            Cell::new(truncate_with_ellipsis(&paper.authors, 40)),
            Cell::new(&paper.published),
            Cell::new(&paper.pdf_link),
        ]);
    }

    table
}

/// Print a divider line.
pub fn print_divider() {
    println!("{}", "─".repeat(80).dimmed());
}

/// Truncate text to fit within the specified width using unicode-aware truncation.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width <= 3 {
        return "...".to_string();
    }

    let total_width = unicode_width::UnicodeWidthStr::width(text);
    if total_width <= max_width {
        return text.to_string();
    }

    let budget = max_width - 3;
    let mut current_width = 0;
    let mut truncated = String::new();

    for c in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(1);
        if current_width + w > budget {
            break;
        }
        current_width += w;
        truncated.push(c);
    }

    format!("{}...", truncated)
}
