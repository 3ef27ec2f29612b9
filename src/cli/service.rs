//! Glue between CLI commands and the credential store.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Serialize;

use crate::adapters::sqlite::{create_pool, verify_table, PoolConfig, SqliteRowTable};
use crate::domain::errors::StoreResult;
use crate::domain::models::{Config, CredentialKey};
use crate::domain::ports::RowTable;
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::credentials::credentials_from_config;
use crate::services::CredentialStore;

/// Load configuration from an explicit file or the project defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

/// Open a store against the configured database.
pub async fn open_store(config: &Config) -> Result<CredentialStore<SqliteRowTable>> {
    let url = config.database.url();
    let pool = create_pool(&url, Some(PoolConfig::from(&config.database)))
        .await
        .with_context(|| format!("Failed to open database {url}"))?;
    verify_table(&pool, &config.table).await?;

    let credentials = credentials_from_config(&config.credentials);
    CredentialStore::sqlite(pool, &config.table, credentials)
        .context("Failed to bind credential store to table")
}

/// A value read through the store's typed accessor for its key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldReading {
    Text(String),
    Integer(i64),
}

impl FieldReading {
    pub fn display(&self, key: CredentialKey, reveal: bool) -> String {
        match self {
            Self::Text(text) if key.is_secret() && !reveal => super::output::mask_secret(text),
            Self::Text(text) => text.clone(),
            Self::Integer(n) => n.to_string(),
        }
    }
}

pub async fn read_field<T: RowTable>(
    store: &CredentialStore<T>,
    key: CredentialKey,
) -> StoreResult<FieldReading> {
    Ok(match key {
        CredentialKey::AuthUrl => FieldReading::Text(store.auth_url().await?),
        CredentialKey::RestUrl => FieldReading::Text(store.rest_url().await?),
        CredentialKey::TokenUrl => FieldReading::Text(store.token_url().await?),
        CredentialKey::BaseUrl => FieldReading::Text(store.base_url().await?),
        CredentialKey::ResponseUrl => FieldReading::Text(store.response_url().await?),
        CredentialKey::AccessToken => FieldReading::Text(store.access_token().await?),
        CredentialKey::RefreshToken => FieldReading::Text(store.refresh_token().await?),
        CredentialKey::AccessExpiry => FieldReading::Integer(store.access_expiry().await?),
        CredentialKey::Division => FieldReading::Integer(store.division().await?),
        CredentialKey::IterationLimit => FieldReading::Integer(store.iteration_limit().await?),
    })
}

/// Write `raw` through the typed setter for `key`.
///
/// Integer keys must parse as base-10 `i64`; endpoint URLs are refused.
pub async fn write_field<T: RowTable>(
    store: &CredentialStore<T>,
    key: CredentialKey,
    raw: &str,
) -> Result<()> {
    let parse_integer = || {
        raw.trim()
            .parse::<i64>()
            .with_context(|| format!("{key} expects an integer, got '{raw}'"))
    };

    match key {
        CredentialKey::AccessToken => store.set_access_token(raw).await?,
        CredentialKey::RefreshToken => store.set_refresh_token(raw).await?,
        CredentialKey::AccessExpiry => store.set_access_expiry(parse_integer()?).await?,
        CredentialKey::Division => store.set_division(parse_integer()?).await?,
        CredentialKey::IterationLimit => store.set_iteration_limit(parse_integer()?).await?,
        CredentialKey::AuthUrl
        | CredentialKey::RestUrl
        | CredentialKey::TokenUrl
        | CredentialKey::BaseUrl
        | CredentialKey::ResponseUrl => {
            bail!("{key} is read-only; provision endpoint URLs with `init`")
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryRowTable;
    use crate::infrastructure::credentials::StaticCredentials;
    use std::sync::Arc;

    fn store() -> CredentialStore<MemoryRowTable> {
        CredentialStore::new(
            MemoryRowTable::provisioned(),
            Arc::new(StaticCredentials::default()),
        )
    }

    #[tokio::test]
    async fn test_write_then_read_integer_field() {
        let store = store();
        write_field(&store, CredentialKey::Division, " 123456 ").await.unwrap();
        assert_eq!(
            read_field(&store, CredentialKey::Division).await.unwrap(),
            FieldReading::Integer(123_456)
        );
    }

    #[tokio::test]
    async fn test_write_rejects_non_integer() {
        let store = store();
        let err = write_field(&store, CredentialKey::AccessExpiry, "soon")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("expects an integer"));
    }

    #[tokio::test]
    async fn test_open_store_requires_initialized_table() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.database.path = dir.path().join("fresh.db").display().to_string();

        let err = open_store(&config).await.err().expect("table is missing");
        assert!(err.to_string().contains("exactonline-store init"));
    }

    #[tokio::test]
    async fn test_write_covers_every_key() {
        let store = store();
        for key in CredentialKey::ALL {
            let result = write_field(&store, key, "42").await;
            if key.is_settable() {
                assert!(result.is_ok(), "{key} should accept a value");
                assert_eq!(
                    read_field(&store, key).await.unwrap().display(key, true),
                    "42"
                );
            } else {
                assert!(result.unwrap_err().to_string().contains("read-only"));
            }
        }
    }

    #[tokio::test]
    async fn test_write_rejects_read_only_key() {
        let store = store();
        let err = write_field(&store, CredentialKey::TokenUrl, "https://evil.example")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("read-only"));
    }

    #[test]
    fn test_display_masks_tokens() {
        let reading = FieldReading::Text("dAfjGhB1k2tE2dkG12sd1Ff1A1fj2fH2".to_string());
        assert_eq!(
            reading.display(CredentialKey::AccessToken, false),
            "dAfj... (32 chars)"
        );
        assert_eq!(
            reading.display(CredentialKey::AccessToken, true),
            "dAfjGhB1k2tE2dkG12sd1Ff1A1fj2fH2"
        );
        assert_eq!(
            reading.display(CredentialKey::BaseUrl, false),
            "dAfjGhB1k2tE2dkG12sd1Ff1A1fj2fH2"
        );
    }
}
