//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;

use zeroize::Zeroizing;

use crate::audit::AuditOp;
use crate::config::Settings;
use crate::errors::{ReelVaultError, Result};
use crate::library::Library;
use crate::storage::FsBlobStore;

/// Environment variable consulted before prompting for a password.
pub const PASSWORD_ENV: &str = "REELVAULT_PASSWORD";

/// ReelVault CLI: password-protected recording library.
#[derive(Parser)]
#[command(
    name = "reelvault",
    about = "Password-protected screen recording library",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Recordings directory (overrides `recordings_dir` in .reelvault.toml)
    #[arg(long, global = true)]
    pub dir: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Store a recording, optionally password protected
    Upload {
        /// Path to the recording to upload
        file: String,
        /// Encrypt the recording with a password
        #[arg(short, long)]
        protect: bool,
        /// Original name to record (defaults to the file's name)
        #[arg(long)]
        name: Option<String>,
    },

    /// List all recordings, newest first
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Save an unprotected recording to a file
    Download {
        /// Stored recording name
        name: String,
        /// Output file path (defaults to the recording name)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Decrypt a protected recording to a file
    Decrypt {
        /// Stored recording name
        name: String,
        /// Output file path (defaults to the name with .enc swapped for .webm)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Check a password against a protected recording
    Verify {
        /// Stored recording name
        name: String,
        /// Also decrypt the recording to prove the password
        #[arg(long)]
        deep: bool,
    },

    /// Delete a recording
    Delete {
        /// Stored recording name
        name: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Show recording count and total size
    Stats,

    /// View the audit log of library operations
    Audit {
        /// Number of entries to show (default: 50)
        #[arg(long, default_value = "50")]
        last: usize,
        /// Show entries since a duration ago (e.g. 7d, 24h, 30m)
        #[arg(long)]
        since: Option<String>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },

    /// Show version
    Version,
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Everything a command needs to touch the library.
pub struct Context {
    pub settings: Settings,
    pub project_dir: PathBuf,
    pub recordings_dir: PathBuf,
}

impl Context {
    /// Resolve settings from `.reelvault.toml` in the current directory,
    /// applying the `--dir` override.
    pub fn load(cli: &Cli) -> Result<Self> {
        let project_dir = std::env::current_dir()?;
        let mut settings = Settings::load(&project_dir)?;
        if let Some(dir) = &cli.dir {
            settings.recordings_dir = dir.clone();
        }
        let recordings_dir = settings.recordings_path(&project_dir);
        Ok(Self {
            settings,
            project_dir,
            recordings_dir,
        })
    }

    /// Open the filesystem-backed library.
    pub fn open_library(&self) -> Result<Library<FsBlobStore>> {
        Library::open(&self.project_dir, &self.settings)
    }

    /// Record an audit event; never fails.
    pub fn audit(&self, op: AuditOp, filename: Option<&str>, details: Option<&str>) {
        crate::audit::log_audit(&self.recordings_dir, op, filename, details);
    }
}

/// Get a password for an existing recording, trying in order:
/// 1. `REELVAULT_PASSWORD` env var (scripts/CI)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        return Ok(pw);
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter recording password")
        .interact()
        .map_err(|e| ReelVaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new password with confirmation (used by `upload --protect`).
///
/// Also respects `REELVAULT_PASSWORD` for scripted usage.
pub fn prompt_new_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        return Ok(pw);
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Choose recording password")
        .with_confirmation(
            "Confirm recording password",
            "Passwords do not match, try again",
        )
        .interact()
        .map_err(|e| ReelVaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

fn password_from_env() -> Option<Zeroizing<String>> {
    match std::env::var(PASSWORD_ENV) {
        Ok(pw) if !pw.is_empty() => Some(Zeroizing::new(pw)),
        _ => None,
    }
}
