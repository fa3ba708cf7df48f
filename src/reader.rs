//! Read-only extraction of the legacy SQLite localStorage database
//!
//! The legacy file is consumed strictly read-only; opening it must never
//! create, migrate, or write to it. Any failure degrades to an empty
//! snapshot so a corrupt or locked database results in a skipped
//! migration instead of a crashed host.

use crate::config::MigrationConfig;
use crate::error::MigrationResult;
use crate::snapshot::MigrationSnapshot;
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use tracing::{debug, warn};

/// Reads the legacy key-value table into a [`MigrationSnapshot`].
pub struct LegacyStoreReader {
    table: String,
}

impl LegacyStoreReader {
    pub fn new(config: &MigrationConfig) -> Self {
        Self {
            table: config.table.clone(),
        }
    }

    /// Extracts every row of the key-value table. Soft-fails: open or
    /// query errors are logged and yield an empty snapshot.
    pub fn read_all(&self, db_file: &Path) -> MigrationSnapshot {
        match self.try_read_all(db_file) {
            Ok(snapshot) => {
                debug!(items = snapshot.len(), "extracted legacy store");
                snapshot
            }
            Err(err) => {
                warn!(
                    db = %db_file.display(),
                    error = %err,
                    "failed to read legacy store, treating as empty"
                );
                MigrationSnapshot::default()
            }
        }
    }

    fn try_read_all(&self, db_file: &Path) -> MigrationResult<MigrationSnapshot> {
        // The connection is dropped on every exit path, error included.
        let conn = Connection::open_with_flags(db_file, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        let mut stmt = conn.prepare(&format!("SELECT key, value FROM {}", self.table))?;
        let mut rows = stmt.query([])?;

        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            let key: String = match row.get(0) {
                Ok(key) => key,
                Err(err) => {
                    warn!(error = %err, "skipping row with unreadable key");
                    continue;
                }
            };
            let value: String = match row.get(1) {
                Ok(value) => value,
                Err(err) => {
                    warn!(key = %key, error = %err, "skipping row with unreadable value");
                    continue;
                }
            };
            debug!(key = %key, "read legacy item");
            entries.push((key, value));
        }

        Ok(MigrationSnapshot::from_rows(entries))
    }
}
