//! `reelvault decrypt` — decrypt a protected recording to a file.

use std::fs;

use zeroize::Zeroize;

use crate::audit::AuditOp;
use crate::cli::output;
use crate::cli::{prompt_password, Cli, Context};
use crate::errors::{ReelVaultError, Result};

/// Execute the `decrypt` command.
pub fn execute(cli: &Cli, name: &str, out: Option<&str>) -> Result<()> {
    let ctx = Context::load(cli)?;
    let library = ctx.open_library()?;
    let password = prompt_password()?;

    let mut recording = match library.decrypt(name, &password) {
        Ok(r) => r,
        Err(e) => {
            if matches!(
                e,
                ReelVaultError::WrongPassword | ReelVaultError::MalformedEnvelope
            ) {
                ctx.audit(AuditOp::Decrypt, Some(name), Some("failed"));
            }
            return Err(e);
        }
    };

    let target = out.unwrap_or(&recording.download_name).to_string();
    let written = fs::write(&target, &recording.data);
    let size = recording.data.len() as u64;
    recording.data.zeroize();
    written?;

    ctx.audit(AuditOp::Decrypt, Some(name), Some("ok"));
    output::success(&format!(
        "Decrypted '{name}' to {target} ({})",
        output::format_size(size)
    ));

    Ok(())
}
