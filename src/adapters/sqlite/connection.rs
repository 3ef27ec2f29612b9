//! SQLite pool setup for the credential table.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::domain::models::{DatabaseConfig, TableSchema};

#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("Invalid database URL: {0}")]
    InvalidDatabaseUrl(String),
    #[error("Failed to create database directory: {0}")]
    DirectoryCreationFailed(#[source] std::io::Error),
    #[error("Failed to open database: {0}")]
    OpenFailed(#[source] sqlx::Error),
    #[error("Table '{table}' does not exist; run `exactonline-store init` first")]
    MissingTable { table: String },
}

/// Pool settings derived from [`DatabaseConfig`].
#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub max_connections: u32,
    /// How long a writer waits on SQLite's lock before failing with `SQLITE_BUSY`.
    pub busy_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::from(&DatabaseConfig::default())
    }
}

impl From<&DatabaseConfig> for PoolConfig {
    fn from(config: &DatabaseConfig) -> Self {
        Self {
            max_connections: config.max_connections,
            busy_timeout: Duration::from_millis(config.busy_timeout_ms),
        }
    }
}

/// Open a file-backed pool, creating the file and its directory if needed.
///
/// Accessors from several processes may race on the same row, so WAL mode and
/// the busy timeout let concurrent writers queue instead of erroring out.
pub async fn create_pool(
    database_url: &str,
    config: Option<PoolConfig>,
) -> Result<SqlitePool, ConnectionError> {
    let config = config.unwrap_or_default();
    ensure_parent_directory(database_url)?;

    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|_| ConnectionError::InvalidDatabaseUrl(database_url.to_string()))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(config.busy_timeout);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await
        .map_err(ConnectionError::OpenFailed)?;

    tracing::debug!(
        url = database_url,
        max_connections = config.max_connections,
        busy_timeout = ?config.busy_timeout,
        "sqlite pool opened"
    );
    Ok(pool)
}

/// In-memory pool for tests. One connection that never expires, so the
/// database lives as long as the pool.
pub async fn create_test_pool() -> Result<SqlitePool, ConnectionError> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .map_err(|_| ConnectionError::InvalidDatabaseUrl("sqlite::memory:".to_string()))?;

    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .map_err(ConnectionError::OpenFailed)
}

fn ensure_parent_directory(database_url: &str) -> Result<(), ConnectionError> {
    let path = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
        .unwrap_or(database_url);

    if path.is_empty() || path.starts_with(":memory:") {
        return Ok(());
    }

    match Path::new(path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            std::fs::create_dir_all(parent).map_err(ConnectionError::DirectoryCreationFailed)
        }
        _ => Ok(()),
    }
}

/// Check that the key/value table named by `schema` exists.
///
/// Opening a pool on a fresh path succeeds and creates an empty file, so
/// without this every accessor would fail later with a raw "no such table".
pub async fn verify_table(pool: &SqlitePool, schema: &TableSchema) -> Result<(), ConnectionError> {
    let found: Option<(i64,)> = sqlx::query_as(
        "SELECT 1 FROM sqlite_master WHERE type IN ('table', 'view') AND name = ?1",
    )
    .bind(&schema.table)
    .fetch_optional(pool)
    .await
    .map_err(ConnectionError::OpenFailed)?;

    match found {
        Some(_) => Ok(()),
        None => Err(ConnectionError::MissingTable {
            table: schema.table.clone(),
        }),
    }
}
