//! `reelvault audit` — show what happened to recordings, newest first.

use chrono::{TimeDelta, Utc};
use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::audit::{AuditEntry, AuditLog, AuditOp};
use crate::cli::output;
use crate::cli::{Cli, Context};
use crate::errors::{ReelVaultError, Result};

pub fn execute(cli: &Cli, last: usize, since: Option<&str>) -> Result<()> {
    let ctx = Context::load(cli)?;
    let cutoff = match since {
        Some(s) => {
            let window = parse_window(s)?;
            let cutoff = Utc::now().checked_sub_signed(window).ok_or_else(|| {
                ReelVaultError::CommandFailed(format!("--since {s} reaches too far back"))
            })?;
            Some(cutoff)
        }
        None => None,
    };

    let log = AuditLog::open(&ctx.recordings_dir)?;
    let entries = log.recent(last, cutoff)?;

    if entries.is_empty() {
        output::info("No audit entries found.");
    } else {
        println!("{}", render(&entries));
    }
    Ok(())
}

/// `7d`, `24h` or `30m` as a look-back window.
fn parse_window(input: &str) -> Result<TimeDelta> {
    let input = input.trim();
    let invalid = || {
        ReelVaultError::CommandFailed(format!(
            "invalid --since value '{input}' (expected e.g. 7d, 24h, 30m)"
        ))
    };

    let unit = input.chars().last().ok_or_else(invalid)?;
    let amount: i64 = input[..input.len() - unit.len_utf8()]
        .parse()
        .map_err(|_| invalid())?;

    let window = match unit {
        'd' => TimeDelta::try_days(amount),
        'h' => TimeDelta::try_hours(amount),
        'm' => TimeDelta::try_minutes(amount),
        _ => None,
    };
    window.filter(|w| *w >= TimeDelta::zero()).ok_or_else(invalid)
}

fn render(entries: &[AuditEntry]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["When (UTC)", "Operation", "Recording", "Details"]);

    for e in entries {
        let op = match AuditOp::parse(&e.operation) {
            Some(AuditOp::Upload) => style(&e.operation).green(),
            Some(AuditOp::Download) => style(&e.operation).cyan(),
            Some(AuditOp::Decrypt) => style(&e.operation).yellow(),
            Some(AuditOp::Delete) => style(&e.operation).red(),
            None => style(&e.operation).dim(),
        };
        table.add_row(vec![
            e.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            op.to_string(),
            e.filename.clone().unwrap_or_else(|| "-".into()),
            e.details.clone().unwrap_or_else(|| "-".into()),
        ]);
    }
    table
}
