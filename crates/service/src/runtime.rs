//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` so the server only needs the database
//! configuration to prepare the filesystem.

use configs::DatabaseConfig;

/// Create the directory of a file-backed SQLite database if needed.
pub async fn ensure_env(db: &DatabaseConfig) -> anyhow::Result<()> {
    match common::env::sqlite_data_dir(&db.url) {
        Some(dir) => common::env::ensure_data_dir(&dir).await,
        None => Ok(()),
    }
}
