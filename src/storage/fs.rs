//! Filesystem blob store: one file per blob under a root directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::BlobStore;
use crate::errors::{ReelVaultError, Result};
use crate::naming::sanitize_filename;

/// Stores each blob as `<root>/<name>`.
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(root: &Path) -> Result<Self> {
        if !root.exists() {
            fs::create_dir_all(root).map_err(|e| {
                ReelVaultError::StorageError(format!(
                    "cannot create recordings directory {}: {e}",
                    root.display()
                ))
            })?;
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Returns the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a blob name to a path inside the root.
    ///
    /// Names are sanitized so a blob can never escape the root directory.
    fn blob_path(&self, name: &str) -> Result<PathBuf> {
        let name = sanitize_filename(name)?;
        Ok(self.root.join(name))
    }
}

impl BlobStore for FsBlobStore {
    /// Write a blob **atomically** via temp file + rename.
    ///
    /// The temp file is in the same directory so the rename stays on one
    /// filesystem and readers never see a half-written recording.
    fn put(&self, name: &str, data: &[u8]) -> Result<()> {
        let path = self.blob_path(name)?;
        let tmp_path = self.root.join(format!(".{name}.tmp"));

        fs::write(&tmp_path, data)?;

        // On Unix, restrict permissions to owner-only read/write.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&tmp_path, perms)?;
        }

        if let Err(e) = fs::rename(&tmp_path, &path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        Ok(())
    }

    fn get(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.blob_path(name)?;
        match fs::read(&path) {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(ReelVaultError::BlobNotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn delete(&self, name: &str) -> Result<bool> {
        let path = self.blob_path(name)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.blob_path(name)?.is_file())
    }
}
