//! `reelvault verify` — check a password without saving anything.

use crate::cli::output;
use crate::cli::{prompt_password, Cli, Context};
use crate::errors::{ReelVaultError, Result};

/// Execute the `verify` command.
pub fn execute(cli: &Cli, name: &str, deep: bool) -> Result<()> {
    let ctx = Context::load(cli)?;
    let library = ctx.open_library()?;
    let password = prompt_password()?;

    let ok = if deep {
        library.verify_deep(name, &password)?
    } else {
        library.verify_password(name, &password)?
    };

    if !ok {
        return Err(ReelVaultError::WrongPassword);
    }

    if deep {
        output::success(&format!("Password correct — '{name}' decrypts cleanly"));
    } else {
        output::success(&format!("Password matches '{name}'"));
        output::tip("Use --deep to also prove the recording decrypts.");
    }

    Ok(())
}
