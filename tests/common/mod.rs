//! Common test utilities for integration tests
//!
//! Provides shared fixtures used across multiple integration test files.

use std::sync::Arc;

use exactonline_store::adapters::sqlite::create_migrated_test_pool;
use exactonline_store::{CredentialStore, SqliteRowTable, StaticCredentials, TableSchema};
use sqlx::SqlitePool;

/// Create an in-memory database with the schema migrated and keys seeded.
pub async fn setup_test_db() -> SqlitePool {
    create_migrated_test_pool()
        .await
        .expect("failed to create test database")
}

/// Store bound to the default table of `pool`, without client credentials.
pub fn store_for(pool: &SqlitePool) -> CredentialStore<SqliteRowTable> {
    CredentialStore::sqlite(
        pool.clone(),
        &TableSchema::default(),
        Arc::new(StaticCredentials::default()),
    )
    .expect("default schema should be valid")
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
#[allow(dead_code)]
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
