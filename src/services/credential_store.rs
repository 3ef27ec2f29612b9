//! Typed access to OAuth session state kept in a key/value row table.
//!
//! Every accessor is an independent single-query session against the row
//! table. There is no caching and no atomicity across calls: a caller doing
//! "read token, decide it is stale, write a new one" can race another caller
//! doing the same, and the last write wins.

use std::sync::Arc;

use sqlx::SqlitePool;
use tracing::instrument;

use crate::adapters::sqlite::SqliteRowTable;
use crate::domain::errors::{StoreError, StoreResult};
use crate::domain::models::{CredentialKey, TableSchema};
use crate::domain::ports::{ClientCredentialSource, RowTable};

/// Conversion between a semantic value type and its stored text.
pub trait FieldValue: Sized {
    /// Convert normalized stored text into the value for `key`.
    fn from_stored(key: CredentialKey, text: String) -> StoreResult<Self>;

    /// Text written to the value column.
    fn to_stored(&self) -> String;
}

impl FieldValue for String {
    fn from_stored(_key: CredentialKey, text: String) -> StoreResult<Self> {
        Ok(text)
    }

    fn to_stored(&self) -> String {
        self.clone()
    }
}

impl FieldValue for i64 {
    fn from_stored(key: CredentialKey, text: String) -> StoreResult<Self> {
        text.parse().map_err(|source| StoreError::Parse {
            key: key.to_string(),
            value: text,
            source,
        })
    }

    fn to_stored(&self) -> String {
        self.to_string()
    }
}

/// OAuth session storage for the Exact Online client.
///
/// Endpoint URLs are read-only; tokens, expiry, division and iteration limit
/// have setters. Client id and secret come from the injected
/// [`ClientCredentialSource`], never from the table.
pub struct CredentialStore<T: RowTable> {
    table: T,
    credentials: Arc<dyn ClientCredentialSource>,
}

impl CredentialStore<SqliteRowTable> {
    /// Bind a store to a provisioned SQLite table.
    pub fn sqlite(
        pool: SqlitePool,
        schema: &TableSchema,
        credentials: Arc<dyn ClientCredentialSource>,
    ) -> StoreResult<Self> {
        Ok(Self::new(SqliteRowTable::new(pool, schema)?, credentials))
    }
}

impl<T: RowTable> CredentialStore<T> {
    /// Build a store over any row table.
    pub fn new(table: T, credentials: Arc<dyn ClientCredentialSource>) -> Self {
        Self { table, credentials }
    }

    /// The underlying row table.
    pub const fn table(&self) -> &T {
        &self.table
    }

    #[instrument(skip_all, fields(key = %key), level = "debug")]
    async fn read<V: FieldValue>(&self, key: CredentialKey) -> StoreResult<V> {
        let row = self
            .table
            .find(key.as_str())
            .await?
            .ok_or_else(|| StoreError::RecordNotFound {
                key: key.to_string(),
            })?;
        let text = row.value.ok_or_else(|| StoreError::ValueNotSet {
            key: key.to_string(),
        })?;
        V::from_stored(key, text)
    }

    #[instrument(skip_all, fields(key = %key), level = "debug")]
    async fn write<V: FieldValue + Sync>(&self, key: CredentialKey, value: &V) -> StoreResult<()> {
        debug_assert!(key.is_settable(), "{key} is read-only");
        let affected = self.table.update(key.as_str(), &value.to_stored()).await?;
        if affected == 0 {
            tracing::warn!(%key, "update matched no row; table is not provisioned");
            return Err(StoreError::RecordNotFound {
                key: key.to_string(),
            });
        }
        tracing::debug!(%key, affected, "value updated");
        Ok(())
    }

    /// OAuth2 authorization endpoint.
    pub async fn auth_url(&self) -> StoreResult<String> {
        self.read(CredentialKey::AuthUrl).await
    }

    /// Root of the REST API.
    pub async fn rest_url(&self) -> StoreResult<String> {
        self.read(CredentialKey::RestUrl).await
    }

    /// OAuth2 token endpoint.
    pub async fn token_url(&self) -> StoreResult<String> {
        self.read(CredentialKey::TokenUrl).await
    }

    /// Base URL of the calling application.
    pub async fn base_url(&self) -> StoreResult<String> {
        self.read(CredentialKey::BaseUrl).await
    }

    /// Redirect URI registered for the OAuth2 callback.
    pub async fn response_url(&self) -> StoreResult<String> {
        self.read(CredentialKey::ResponseUrl).await
    }

    /// Refreshing a token uses the same endpoint as obtaining one.
    pub async fn refresh_url(&self) -> StoreResult<String> {
        self.token_url().await
    }

    /// Current OAuth2 access token.
    pub async fn access_token(&self) -> StoreResult<String> {
        self.read(CredentialKey::AccessToken).await
    }

    /// Replace the stored access token.
    pub async fn set_access_token(&self, value: &str) -> StoreResult<()> {
        self.write(CredentialKey::AccessToken, &value.to_string()).await
    }

    /// Current OAuth2 refresh token.
    pub async fn refresh_token(&self) -> StoreResult<String> {
        self.read(CredentialKey::RefreshToken).await
    }

    /// Replace the stored refresh token.
    pub async fn set_refresh_token(&self, value: &str) -> StoreResult<()> {
        self.write(CredentialKey::RefreshToken, &value.to_string()).await
    }

    /// Unix timestamp at which the access token expires.
    pub async fn access_expiry(&self) -> StoreResult<i64> {
        self.read(CredentialKey::AccessExpiry).await
    }

    /// Store the access token expiry as a Unix timestamp.
    pub async fn set_access_expiry(&self, value: i64) -> StoreResult<()> {
        self.write(CredentialKey::AccessExpiry, &value).await
    }

    /// Exact Online division (administration) requests are scoped to.
    pub async fn division(&self) -> StoreResult<i64> {
        self.read(CredentialKey::Division).await
    }

    /// Switch to another division.
    pub async fn set_division(&self, value: i64) -> StoreResult<()> {
        self.write(CredentialKey::Division, &value).await
    }

    /// Upper bound on pages fetched per paginated request.
    pub async fn iteration_limit(&self) -> StoreResult<i64> {
        self.read(CredentialKey::IterationLimit).await
    }

    /// Change the pagination bound.
    pub async fn set_iteration_limit(&self, value: i64) -> StoreResult<()> {
        self.write(CredentialKey::IterationLimit, &value).await
    }

    /// OAuth2 client id, looked up on every call.
    pub fn client_id(&self) -> Option<String> {
        self.credentials.client_id()
    }

    /// OAuth2 client secret, looked up on every call.
    pub fn client_secret(&self) -> Option<String> {
        self.credentials.client_secret()
    }
}
