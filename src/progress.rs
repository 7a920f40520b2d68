//! Progress display module
//!
//! Styled status lines, the search spinner and the statistics summary.

use crate::enumerator::SearchStatus;
use crate::search::SearchOutcome;
use bytesize::ByteSize;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Print the application banner
pub fn print_banner() {
    let banner = r#"
╔══════════════════════════════════════════════════════════════╗
║   W O R D C O V E R                                          ║
║   Every way to spell your letters with whole words   v1.0.0  ║
╚══════════════════════════════════════════════════════════════╝
"#;

    println!("{}", banner.green());
}

/// Print a section header
pub fn print_header(text: &str) {
    println!("\n{} {}", "▶".green(), text.green().bold());
}

/// Print an info message
pub fn print_info(text: &str) {
    println!("  {} {}", "ℹ".cyan(), text);
}

/// Print a success message
pub fn print_success(text: &str) {
    println!("  {} {}", "✔".green(), text.green());
}

/// Print a warning message
pub fn print_warning(text: &str) {
    println!("  {} {}", "⚠".yellow(), text.yellow());
}

/// Print an error message
pub fn print_error(text: &str) {
    eprintln!("  {} {}", "✖".red(), text.red());
}

/// Create a styled spinner for indeterminate progress
pub fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();

    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "),
    );

    pb.set_message(msg.to_string());
    pb
}

/// Print final statistics for one search
pub fn print_summary(outcome: &SearchOutcome, dictionary_bytes: u64) {
    println!();
    println!("{}", "═".repeat(60).green());
    println!("{}", summary_title(&outcome.status).green().bold());
    println!("{}", "═".repeat(60).green());
    println!();

    println!("  {} {}", "Letters:        ".green(), outcome.letters.total());
    println!("  {} {}", "Distinct:       ".green(), outcome.letters.len());
    println!(
        "  {} {} ({})",
        "Dictionary:     ".green(),
        format_number(outcome.dictionary_words as u64),
        ByteSize(dictionary_bytes)
    );
    println!(
        "  {} {}",
        "Candidates:     ".green(),
        format_number(outcome.stats.candidates as u64)
    );
    println!();

    println!(
        "  {} {}",
        "Nodes visited:  ".green(),
        format_number(outcome.stats.nodes_visited)
    );
    println!(
        "  {} {}",
        "Covers found:   ".green(),
        format_number(outcome.stats.combinations_found)
    );
    println!(
        "  {} {}",
        "Duplicates:     ".yellow(),
        format_number(outcome.stats.duplicates)
    );
    println!(
        "  {} {}",
        "Unique results: ".green().bold(),
        format_number(outcome.results.len() as u64).green().bold()
    );

    match outcome.status {
        SearchStatus::Completed => {}
        SearchStatus::Cancelled => {
            println!("  {} {}", "Status:         ".red(), "cancelled (partial)".red());
        }
        SearchStatus::TimedOut { elapsed } => {
            println!(
                "  {} {}",
                "Status:         ".red(),
                format!("timed out after {} (partial)", format_duration(elapsed)).red()
            );
        }
    }

    println!();
    println!("  {} {}", "Duration:       ".green(), format_duration(outcome.elapsed));
    println!();
    println!("{}", "═".repeat(60).green());
}

fn summary_title(status: &SearchStatus) -> &'static str {
    match status {
        SearchStatus::Completed => "                    SEARCH COMPLETE",
        SearchStatus::Cancelled => "                    SEARCH CANCELLED",
        SearchStatus::TimedOut { .. } => "                    SEARCH TIMED OUT",
    }
}

/// Format a number with thousand separators
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}

/// Format duration as human-readable string
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();

    if secs < 60 {
        format!("{:.1}s", duration.as_secs_f64())
    } else if secs < 3600 {
        let mins = secs / 60;
        let secs = secs % 60;
        format!("{}m {}s", mins, secs)
    } else {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        format!("{}h {}m", hours, mins)
    }
}
