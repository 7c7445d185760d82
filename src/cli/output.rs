//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use chrono::{DateTime, Utc};
use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::library::RecordingSummary;

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Human-readable size of a single recording: `512 B`, `1.5 KB`, `2.0 MB`.
pub fn format_size(bytes: u64) -> String {
    if bytes < KIB {
        format!("{bytes} B")
    } else if bytes < MIB {
        format!("{:.1} KB", bytes as f64 / KIB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MIB as f64)
    }
}

/// Human-readable library total: always KB below 1 MB, MB above.
pub fn format_total_size(bytes: u64) -> String {
    if bytes < MIB {
        format!("{:.1} KB", bytes as f64 / KIB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MIB as f64)
    }
}

/// `YYYY-MM-DD HH:MM` of the stored UTC timestamp.
pub fn format_date(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M").to_string()
}

/// Print a table of recordings (Name, Size, Date, Protected).
pub fn print_recordings_table(recordings: &[RecordingSummary]) {
    if recordings.is_empty() {
        info("No recordings yet.");
        tip("Run `reelvault upload <FILE>` to store your first recording.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Size", "Date (UTC)", "Protected"]);

    for r in recordings {
        let protected = if r.encrypted {
            style("yes").yellow().to_string()
        } else {
            "no".to_string()
        };
        table.add_row(vec![
            r.filename.clone(),
            format_size(r.size_bytes),
            format_date(&r.created_at),
            protected,
        ]);
    }

    println!("{table}");
}
