//! `reelvault delete` — remove a recording from the library.

use dialoguer::Confirm;

use crate::audit::AuditOp;
use crate::cli::output;
use crate::cli::{Cli, Context};
use crate::errors::{ReelVaultError, Result};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, name: &str, force: bool) -> Result<()> {
    let ctx = Context::load(cli)?;

    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        output::warning("Deleting a protected recording also destroys its salt; it cannot be recovered.");
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete recording '{name}'?"))
            .default(false)
            .interact()
            .map_err(|e| ReelVaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let mut library = ctx.open_library()?;
    library.delete(name)?;

    ctx.audit(AuditOp::Delete, Some(name), None);
    output::success(&format!("Deleted recording '{name}'"));

    Ok(())
}
