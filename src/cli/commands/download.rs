//! `reelvault download` — copy an unprotected recording out of the library.

use std::fs;

use crate::audit::AuditOp;
use crate::cli::output;
use crate::cli::{Cli, Context};
use crate::errors::Result;

/// Execute the `download` command.
pub fn execute(cli: &Cli, name: &str, out: Option<&str>) -> Result<()> {
    let ctx = Context::load(cli)?;
    let library = ctx.open_library()?;

    let data = library.download(name)?;
    let target = out.unwrap_or(name);
    fs::write(target, &data)?;

    ctx.audit(AuditOp::Download, Some(name), None);
    output::success(&format!(
        "Saved '{name}' to {target} ({})",
        output::format_size(data.len() as u64)
    ));

    Ok(())
}
