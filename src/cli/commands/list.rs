//! `reelvault list` — display all recordings.

use crate::cli::output;
use crate::cli::{Cli, Context};
use crate::errors::{ReelVaultError, Result};

/// Execute the `list` command.
pub fn execute(cli: &Cli, json: bool) -> Result<()> {
    let ctx = Context::load(cli)?;
    let library = ctx.open_library()?;
    let recordings = library.list()?;

    if json {
        let out = serde_json::to_string_pretty(&recordings)
            .map_err(|e| ReelVaultError::SerializationError(format!("recordings: {e}")))?;
        println!("{out}");
        return Ok(());
    }

    output::info(&format!("{} recording(s)", recordings.len()));
    output::print_recordings_table(&recordings);

    Ok(())
}
