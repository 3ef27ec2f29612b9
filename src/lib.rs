//! Exact Online session storage
//!
//! Persists the OAuth2 session state of an Exact Online REST client (access
//! and refresh tokens, token expiry, division, endpoint URLs, iteration limit)
//! in a key/value table, and exposes it through typed accessors.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): key set, row shapes, errors, port traits
//! - **Adapter Layer** (`adapters`): SQLite and in-memory row tables
//! - **Service Layer** (`services`): the `CredentialStore`
//! - **Infrastructure Layer** (`infrastructure`): configuration, logging, client credentials
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use exactonline_store::adapters::sqlite::initialize_database;
//! use exactonline_store::{CredentialStore, EnvCredentials, TableSchema};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pool = initialize_database("sqlite:.exactonline/exactonline.db", None).await?;
//!     let store = CredentialStore::sqlite(pool, &TableSchema::default(), Arc::new(EnvCredentials::default()))?;
//!     store.set_access_expiry(1426492503).await?;
//!     let token_url = store.refresh_url().await?;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

pub use adapters::{MemoryRowTable, SqliteRowTable};
pub use domain::models::{Config, CredentialKey, RawValue, StoredRow, TableSchema};
pub use domain::ports::{ClientCredentialSource, RowTable};
pub use domain::{StoreError, StoreResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::credentials::{EnvCredentials, StaticCredentials};
pub use services::CredentialStore;
