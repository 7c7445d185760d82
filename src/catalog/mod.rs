//! Recording catalog — SQLite-backed metadata table.
//!
//! One row per stored recording.  The blob itself lives in a
//! `BlobStore`; the catalog only records its name, size, and, for
//! protected recordings, the verification hash and base64 salt.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::Error::FromSqlConversionFailure;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::errors::{ReelVaultError, Result};

/// A single catalog row.
#[derive(Debug, Clone)]
pub struct RecordingRecord {
    pub id: i64,
    pub filename: String,
    pub original_name: Option<String>,
    /// Stored size in bytes (envelope size for protected recordings).
    pub file_size: u64,
    pub encrypted: bool,
    /// Hex SHA-256 of the password, present only when `encrypted`.
    pub password_hash: Option<String>,
    /// Base64 copy of the envelope salt, present only when `encrypted`.
    pub salt: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when inserting a new recording.
#[derive(Debug, Clone)]
pub struct NewRecording {
    pub filename: String,
    pub original_name: String,
    pub file_size: u64,
    pub password_hash: Option<String>,
    pub salt: Option<String>,
}

/// Aggregate numbers over the whole catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogStats {
    pub count: u64,
    pub total_bytes: u64,
}

const COLUMNS: &str = "id, filename, original_name, file_size, encrypted, password_hash, salt, created_at, updated_at";

/// SQLite-backed recording catalog.
pub struct Catalog {
    conn: Connection,
}

impl Catalog {
    /// Open (or create) the catalog database at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .map_err(|e| ReelVaultError::CatalogError(format!("open {}: {e}", path.display())))?;

        // Set restrictive permissions on the catalog (owner-only).
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            let _ = std::fs::set_permissions(path, perms);
        }

        Self::init(conn)
    }

    /// Open a throwaway catalog that lives only in memory.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS recordings (
                id            INTEGER PRIMARY KEY AUTOINCREMENT,
                filename      TEXT UNIQUE NOT NULL,
                original_name TEXT,
                file_size     INTEGER,
                encrypted     BOOLEAN DEFAULT FALSE,
                password_hash TEXT,
                salt          TEXT,
                created_at    TEXT NOT NULL,
                updated_at    TEXT NOT NULL
            );",
        )?;
        Ok(Self { conn })
    }

    /// Insert a new recording row and return it.
    pub fn insert(&self, new: &NewRecording) -> Result<RecordingRecord> {
        let size = i64::try_from(new.file_size).map_err(|_| {
            ReelVaultError::CatalogError(format!("file size {} exceeds i64", new.file_size))
        })?;
        let now = timestamp(Utc::now());
        let encrypted = new.password_hash.is_some();

        self.conn
            .execute(
                "INSERT INTO recordings
                    (filename, original_name, file_size, encrypted, password_hash, salt, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
                params![
                    new.filename,
                    new.original_name,
                    size,
                    encrypted,
                    new.password_hash,
                    new.salt,
                    now
                ],
            )
            .map_err(|e| ReelVaultError::CatalogError(format!("insert {}: {e}", new.filename)))?;

        self.get(&new.filename)?
            .ok_or_else(|| ReelVaultError::CatalogError("inserted row vanished".into()))
    }

    /// Look up a recording by filename.
    pub fn get(&self, filename: &str) -> Result<Option<RecordingRecord>> {
        let sql = format!("SELECT {COLUMNS} FROM recordings WHERE filename = ?1");
        let record = self
            .conn
            .query_row(&sql, params![filename], row_to_record)
            .optional()?;
        Ok(record)
    }

    /// Returns `true` if a row exists for `filename`.
    pub fn contains(&self, filename: &str) -> Result<bool> {
        let found: Option<i64> = self
            .conn
            .query_row(
                "SELECT 1 FROM recordings WHERE filename = ?1",
                params![filename],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// All recordings, newest first.
    pub fn list(&self) -> Result<Vec<RecordingRecord>> {
        let sql = format!("SELECT {COLUMNS} FROM recordings ORDER BY created_at DESC, id DESC");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], row_to_record)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    /// Remove the row for `filename`.  Returns `false` if there was none.
    pub fn delete(&self, filename: &str) -> Result<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM recordings WHERE filename = ?1", params![filename])?;
        Ok(changed > 0)
    }

    /// Count and total stored size.
    pub fn stats(&self) -> Result<CatalogStats> {
        let (count, total): (i64, i64) = self.conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(file_size), 0) FROM recordings",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        Ok(CatalogStats {
            count: u64::try_from(count).unwrap_or(0),
            total_bytes: u64::try_from(total).unwrap_or(0),
        })
    }
}

/// Fixed-width RFC 3339 so lexical order matches time order.
pub(crate) fn timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored timestamp; a malformed value fails the row read.
pub(crate) fn parse_timestamp(column: usize, s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| FromSqlConversionFailure(column, Type::Text, Box::new(e)))
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<RecordingRecord> {
    let size: Option<i64> = row.get(3)?;
    let encrypted: Option<bool> = row.get(4)?;
    let created: String = row.get(7)?;
    let updated: String = row.get(8)?;

    Ok(RecordingRecord {
        id: row.get(0)?,
        filename: row.get(1)?,
        original_name: row.get(2)?,
        file_size: size.and_then(|s| u64::try_from(s).ok()).unwrap_or(0),
        encrypted: encrypted.unwrap_or(false),
        password_hash: row.get(5)?,
        salt: row.get(6)?,
        created_at: parse_timestamp(7, &created)?,
        updated_at: parse_timestamp(8, &updated)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn plain(name: &str, size: u64) -> NewRecording {
        NewRecording {
            filename: name.to_string(),
            original_name: "blob".to_string(),
            file_size: size,
            password_hash: None,
            salt: None,
        }
    }

    #[test]
    fn open_creates_database() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("metadata.db");
        Catalog::open(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn insert_and_get() {
        let catalog = Catalog::open_in_memory().unwrap();
        let rec = catalog
            .insert(&NewRecording {
                filename: "recording_1.enc".into(),
                original_name: "blob".into(),
                file_size: 99,
                password_hash: Some("ab".repeat(32)),
                salt: Some("c2FsdA==".into()),
            })
            .unwrap();

        assert!(rec.encrypted);
        assert_eq!(rec.file_size, 99);
        assert_eq!(rec.original_name.as_deref(), Some("blob"));

        let fetched = catalog.get("recording_1.enc").unwrap().unwrap();
        assert_eq!(fetched.id, rec.id);
        assert_eq!(fetched.salt.as_deref(), Some("c2FsdA=="));
        assert!(catalog.get("missing.webm").unwrap().is_none());
    }

    #[test]
    fn duplicate_filename_is_rejected() {
        let catalog = Catalog::open_in_memory().unwrap();
        catalog.insert(&plain("a.webm", 1)).unwrap();
        assert!(catalog.insert(&plain("a.webm", 2)).is_err());
    }

    #[test]
    fn list_is_newest_first() {
        let catalog = Catalog::open_in_memory().unwrap();
        catalog.insert(&plain("first.webm", 1)).unwrap();
        catalog.insert(&plain("second.webm", 2)).unwrap();
        catalog.insert(&plain("third.webm", 3)).unwrap();

        let names: Vec<String> = catalog
            .list()
            .unwrap()
            .into_iter()
            .map(|r| r.filename)
            .collect();
        assert_eq!(names, vec!["third.webm", "second.webm", "first.webm"]);
    }

    #[test]
    fn delete_and_contains() {
        let catalog = Catalog::open_in_memory().unwrap();
        catalog.insert(&plain("a.webm", 1)).unwrap();
        assert!(catalog.contains("a.webm").unwrap());
        assert!(catalog.delete("a.webm").unwrap());
        assert!(!catalog.contains("a.webm").unwrap());
        assert!(!catalog.delete("a.webm").unwrap());
    }

    #[test]
    fn stats_sum_sizes() {
        let catalog = Catalog::open_in_memory().unwrap();
        assert_eq!(
            catalog.stats().unwrap(),
            CatalogStats {
                count: 0,
                total_bytes: 0
            }
        );

        catalog.insert(&plain("a.webm", 1000)).unwrap();
        catalog.insert(&plain("b.webm", 24)).unwrap();
        assert_eq!(
            catalog.stats().unwrap(),
            CatalogStats {
                count: 2,
                total_bytes: 1024
            }
        );
    }

    #[test]
    fn corrupt_created_at_is_reported() {
        let catalog = Catalog::open_in_memory().unwrap();
        catalog.insert(&plain("a.webm", 1)).unwrap();
        catalog
            .conn
            .execute("UPDATE recordings SET created_at = 'not a date'", [])
            .unwrap();

        assert!(matches!(catalog.get("a.webm"), Err(ReelVaultError::CatalogError(_))));
        assert!(catalog.list().is_err());
    }
}
