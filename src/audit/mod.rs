//! Operation history for the recordings directory.
//!
//! Every upload, download, decrypt and delete appends a row to
//! `<recordings_dir>/audit.db`.  Writing is best effort: a library whose
//! audit database cannot be opened keeps working, it just stops recording
//! history.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};

use crate::catalog::{parse_timestamp, timestamp};
use crate::errors::{ReelVaultError, Result};

const AUDIT_DB: &str = "audit.db";

/// Library operations that leave a trace in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditOp {
    Upload,
    Download,
    Decrypt,
    Delete,
}

impl AuditOp {
    pub fn as_str(self) -> &'static str {
        match self {
            AuditOp::Upload => "upload",
            AuditOp::Download => "download",
            AuditOp::Decrypt => "decrypt",
            AuditOp::Delete => "delete",
        }
    }

    /// Inverse of `as_str`; unknown names come from older or foreign rows.
    pub fn parse(name: &str) -> Option<Self> {
        [Self::Upload, Self::Download, Self::Decrypt, Self::Delete]
            .into_iter()
            .find(|op| op.as_str() == name)
    }
}

impl fmt::Display for AuditOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of history.
#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    /// Kept as text so rows written by other versions still load.
    pub operation: String,
    pub filename: Option<String>,
    pub details: Option<String>,
}

pub struct AuditLog {
    conn: Connection,
}

impl AuditLog {
    pub fn db_path(recordings_dir: &Path) -> PathBuf {
        recordings_dir.join(AUDIT_DB)
    }

    /// Open or create the audit database inside `recordings_dir`.
    pub fn open(recordings_dir: &Path) -> Result<Self> {
        let path = Self::db_path(recordings_dir);
        let conn = Connection::open(&path)
            .map_err(|e| ReelVaultError::AuditError(format!("open {}: {e}", path.display())))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600));
        }

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS audit_log (
                id        INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp TEXT NOT NULL,
                operation TEXT NOT NULL,
                filename  TEXT,
                details   TEXT
            );",
        )
        .map_err(|e| ReelVaultError::AuditError(format!("schema: {e}")))?;

        Ok(Self { conn })
    }

    pub fn record(&self, op: AuditOp, filename: Option<&str>, details: Option<&str>) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO audit_log (timestamp, operation, filename, details)
                 VALUES (?1, ?2, ?3, ?4)",
                params![timestamp(Utc::now()), op.as_str(), filename, details],
            )
            .map_err(|e| ReelVaultError::AuditError(format!("insert: {e}")))?;
        Ok(())
    }

    /// Up to `limit` entries, newest first, optionally only those at or
    /// after `since`.
    pub fn recent(&self, limit: usize, since: Option<DateTime<Utc>>) -> Result<Vec<AuditEntry>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let since = since.map(timestamp);

        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, timestamp, operation, filename, details
                 FROM audit_log
                 WHERE ?1 IS NULL OR timestamp >= ?1
                 ORDER BY id DESC
                 LIMIT ?2",
            )
            .map_err(|e| ReelVaultError::AuditError(format!("prepare: {e}")))?;

        let entries = stmt
            .query_map(params![since, limit], entry_from_row)
            .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>())
            .map_err(|e| ReelVaultError::AuditError(format!("read: {e}")))?;
        Ok(entries)
    }
}

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<AuditEntry> {
    Ok(AuditEntry {
        id: row.get(0)?,
        timestamp: parse_timestamp(1, &row.get::<_, String>(1)?)?,
        operation: row.get(2)?,
        filename: row.get(3)?,
        details: row.get(4)?,
    })
}

/// Append to the audit log under `recordings_dir`, swallowing every error.
pub fn log_audit(recordings_dir: &Path, op: AuditOp, filename: Option<&str>, details: Option<&str>) {
    if let Ok(log) = AuditLog::open(recordings_dir) {
        let _ = log.record(op, filename, details);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn log_in(dir: &TempDir) -> AuditLog {
        AuditLog::open(dir.path()).unwrap()
    }

    #[test]
    fn op_names_round_trip() {
        for op in [AuditOp::Upload, AuditOp::Download, AuditOp::Decrypt, AuditOp::Delete] {
            assert_eq!(AuditOp::parse(op.as_str()), Some(op));
        }
        assert_eq!(AuditOp::parse("rotate"), None);
    }

    #[test]
    fn recent_is_newest_first_and_keeps_fields() {
        let dir = TempDir::new().unwrap();
        let log = log_in(&dir);
        log.record(AuditOp::Upload, Some("recording_20240309_140509.enc"), Some("protected"))
            .unwrap();
        log.record(AuditOp::Decrypt, Some("recording_20240309_140509.enc"), Some("failed"))
            .unwrap();

        let entries = log.recent(10, None).unwrap();
        let ops: Vec<&str> = entries.iter().map(|e| e.operation.as_str()).collect();
        assert_eq!(ops, ["decrypt", "upload"]);
        assert_eq!(entries[1].details.as_deref(), Some("protected"));
        assert!(entries[0].id > entries[1].id);
    }

    #[test]
    fn limit_caps_result() {
        let dir = TempDir::new().unwrap();
        let log = log_in(&dir);
        for _ in 0..5 {
            log.record(AuditOp::Download, None, None).unwrap();
        }
        assert_eq!(log.recent(2, None).unwrap().len(), 2);
        assert_eq!(log.recent(0, None).unwrap().len(), 0);
    }

    #[test]
    fn since_skips_older_rows() {
        let dir = TempDir::new().unwrap();
        let log = log_in(&dir);
        log.conn
            .execute(
                "INSERT INTO audit_log (timestamp, operation) VALUES (?1, 'delete')",
                [timestamp(Utc::now() - chrono::Duration::days(3))],
            )
            .unwrap();
        log.record(AuditOp::Upload, None, None).unwrap();

        let day_ago = Utc::now() - chrono::Duration::days(1);
        let entries = log.recent(10, Some(day_ago)).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, "upload");
    }

    #[test]
    fn corrupt_timestamp_is_an_error() {
        let dir = TempDir::new().unwrap();
        let log = log_in(&dir);
        log.conn
            .execute(
                "INSERT INTO audit_log (timestamp, operation) VALUES ('yesterday', 'upload')",
                [],
            )
            .unwrap();
        assert!(matches!(log.recent(10, None), Err(ReelVaultError::AuditError(_))));
    }

    #[test]
    fn log_audit_ignores_missing_directory() {
        let missing = Path::new("/nonexistent/reelvault/recordings");
        assert!(AuditLog::open(missing).is_err());
        log_audit(missing, AuditOp::Delete, Some("a.webm"), None);
    }

    #[cfg(unix)]
    #[test]
    fn database_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        log_audit(dir.path(), AuditOp::Upload, None, None);
        let mode = std::fs::metadata(AuditLog::db_path(dir.path()))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
