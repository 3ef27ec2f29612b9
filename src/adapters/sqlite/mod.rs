//! SQLite database adapters for the credential store.

pub mod connection;
pub mod migrations;
pub mod provision;
pub mod row_table;

pub use connection::{create_pool, create_test_pool, verify_table, ConnectionError, PoolConfig};
pub use migrations::{Migration, MigrationError, Migrator, MIGRATIONS};
pub use provision::{provision_endpoint, provision_endpoints};
pub use row_table::SqliteRowTable;

use sqlx::SqlitePool;

#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Connection error: {0}")]
    Connection(#[from] ConnectionError),
    #[error("Migration error: {0}")]
    Migration(#[from] MigrationError),
    #[error("Query error: {0}")]
    Query(#[from] sqlx::Error),
}

pub async fn initialize_database(
    database_url: &str,
    config: Option<PoolConfig>,
) -> Result<SqlitePool, DatabaseError> {
    let pool = create_pool(database_url, config).await?;
    Migrator::new(pool.clone()).run().await?;
    Ok(pool)
}

/// Create an in-memory test pool with all migrations applied.
pub async fn create_migrated_test_pool() -> Result<SqlitePool, DatabaseError> {
    let pool = create_test_pool().await?;
    Migrator::new(pool.clone()).run().await?;
    Ok(pool)
}
