//! `reelvault upload` — store a recording, optionally password protected.

use std::fs;
use std::path::Path;

use crate::audit::AuditOp;
use crate::cli::output;
use crate::cli::{prompt_new_password, Cli, Context};
use crate::errors::{ReelVaultError, Result};

/// Execute the `upload` command.
pub fn execute(cli: &Cli, file: &str, protect: bool, name: Option<&str>) -> Result<()> {
    let ctx = Context::load(cli)?;
    let path = Path::new(file);

    if !path.is_file() {
        return Err(ReelVaultError::CommandFailed(format!(
            "'{file}' is not a readable file"
        )));
    }

    let original_name = match name {
        Some(n) => n.to_string(),
        None => path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };

    let data = fs::read(path)?;

    let password = if protect {
        Some(prompt_new_password()?)
    } else {
        None
    };

    let mut library = ctx.open_library()?;
    let receipt = library.upload(&original_name, &data, password.as_ref().map(|p| p.as_str()))?;

    let details = if receipt.encrypted { "protected" } else { "plain" };
    ctx.audit(AuditOp::Upload, Some(&receipt.filename), Some(details));

    if receipt.encrypted {
        output::success(&format!(
            "Recording saved with password protection as '{}'",
            receipt.filename
        ));
        output::tip("Keep the password safe: without it the recording cannot be recovered.");
    } else {
        output::success(&format!("Recording saved as '{}'", receipt.filename));
    }

    Ok(())
}
