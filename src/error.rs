//! Error types for the migration pipeline
//!
//! Errors here never reach the host: the reader and the injector
//! recover locally and the controller maps every fault to a skipped
//! run. The typed enum exists for the fallible internals and for
//! diagnostics in logs.

use thiserror::Error;

/// Result type for migration internals.
pub type MigrationResult<T> = Result<T, MigrationError>;

#[derive(Error, Debug)]
pub enum MigrationError {
    /// Filesystem probe or read failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Legacy database could not be opened or queried.
    #[error("legacy database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Snapshot could not be serialized into the injection payload.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The new store rejected the injected script.
    #[error("store injection failed: {0}")]
    Injection(#[source] anyhow::Error),
}
