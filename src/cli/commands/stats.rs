//! `reelvault stats` — recording count and total size.

use console::style;

use crate::cli::output::format_total_size;
use crate::cli::{Cli, Context};
use crate::errors::Result;

/// Execute the `stats` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let ctx = Context::load(cli)?;
    let library = ctx.open_library()?;
    let stats = library.stats()?;

    println!(
        "{} {}",
        style("Recordings:").bold(),
        stats.total_recordings
    );
    println!(
        "{} {}",
        style("Total size:").bold(),
        format_total_size(stats.total_bytes)
    );

    Ok(())
}
