use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{ReelVaultError, Result};

/// Project-level configuration, loaded from `.reelvault.toml`.
///
/// Every field has a sensible default so ReelVault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory (relative to project root) where recordings are stored.
    #[serde(default = "default_recordings_dir")]
    pub recordings_dir: String,

    /// SQLite catalog file name, relative to the recordings directory.
    #[serde(default = "default_database_file")]
    pub database_file: String,

    /// Largest accepted upload in bytes.  `None` means unlimited.
    #[serde(default)]
    pub max_upload_bytes: Option<u64>,

    /// File extensions accepted on upload (compared case-insensitively).
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_recordings_dir() -> String {
    "recordings".to_string()
}

fn default_database_file() -> String {
    "metadata.db".to_string()
}

fn default_allowed_extensions() -> Vec<String> {
    vec!["webm".to_string(), "mp4".to_string(), "enc".to_string()]
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            recordings_dir: default_recordings_dir(),
            database_file: default_database_file(),
            max_upload_bytes: None,
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".reelvault.toml";

    /// Load settings from `<project_dir>/.reelvault.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            ReelVaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Reject values that would make the library unusable.
    pub fn validate(&self) -> Result<()> {
        if self.recordings_dir.trim().is_empty() {
            return Err(ReelVaultError::ConfigError(
                "recordings_dir cannot be empty".into(),
            ));
        }
        if self.database_file.trim().is_empty() {
            return Err(ReelVaultError::ConfigError(
                "database_file cannot be empty".into(),
            ));
        }
        if self.allowed_extensions.is_empty() {
            return Err(ReelVaultError::ConfigError(
                "allowed_extensions must list at least one extension".into(),
            ));
        }
        Ok(())
    }

    /// Full path to the recordings directory.
    ///
    /// Example: `project_dir/recordings`
    pub fn recordings_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.recordings_dir)
    }

    /// Full path to the SQLite catalog.
    ///
    /// Example: `project_dir/recordings/metadata.db`
    pub fn database_path(&self, project_dir: &Path) -> PathBuf {
        self.recordings_path(project_dir).join(&self.database_file)
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings_are_sensible() {
        let s = Settings::default();
        assert_eq!(s.recordings_dir, "recordings");
        assert_eq!(s.database_file, "metadata.db");
        assert_eq!(s.max_upload_bytes, None);
        assert_eq!(s.allowed_extensions, vec!["webm", "mp4", "enc"]);
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.recordings_dir, "recordings");
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let config = r#"
recordings_dir = "captures"
database_file = "catalog.sqlite"
max_upload_bytes = 1048576
allowed_extensions = ["webm", "mkv"]
"#;
        fs::write(tmp.path().join(".reelvault.toml"), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.recordings_dir, "captures");
        assert_eq!(settings.database_file, "catalog.sqlite");
        assert_eq!(settings.max_upload_bytes, Some(1_048_576));
        assert_eq!(settings.allowed_extensions, vec!["webm", "mkv"]);
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".reelvault.toml"), "max_upload_bytes = 10\n").unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.max_upload_bytes, Some(10));
        assert_eq!(settings.recordings_dir, "recordings");
        assert_eq!(settings.database_file, "metadata.db");
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".reelvault.toml"), "not valid {{toml").unwrap();

        assert!(Settings::load(tmp.path()).is_err());
    }

    #[test]
    fn load_rejects_empty_extension_list() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".reelvault.toml"), "allowed_extensions = []\n").unwrap();

        assert!(Settings::load(tmp.path()).is_err());
    }

    #[test]
    fn paths_are_built_from_project_dir() {
        let s = Settings::default();
        let project = Path::new("/home/user/studio");
        assert_eq!(
            s.recordings_path(project),
            PathBuf::from("/home/user/studio/recordings")
        );
        assert_eq!(
            s.database_path(project),
            PathBuf::from("/home/user/studio/recordings/metadata.db")
        );
    }
}
