//! Provisioning of the read-only endpoint rows.
//!
//! The credential store only updates rows that already exist. This is the
//! external side that writes endpoint URLs, typically once from `init`.

use sqlx::SqlitePool;

use crate::domain::errors::StoreResult;
use crate::domain::models::{CredentialKey, EndpointsConfig, TableSchema};

/// Upsert the configured endpoint URLs in a single transaction.
///
/// Unset optional endpoints are left untouched. Returns the number of rows
/// written.
pub async fn provision_endpoints(
    pool: &SqlitePool,
    schema: &TableSchema,
    endpoints: &EndpointsConfig,
) -> StoreResult<usize> {
    schema.validate()?;
    let sql = schema.upsert_value_sql();

    let entries = [
        (CredentialKey::AuthUrl, Some(endpoints.auth_url.as_str())),
        (CredentialKey::RestUrl, Some(endpoints.rest_url.as_str())),
        (CredentialKey::TokenUrl, Some(endpoints.token_url.as_str())),
        (CredentialKey::BaseUrl, endpoints.base_url.as_deref()),
        (CredentialKey::ResponseUrl, endpoints.response_url.as_deref()),
    ];

    let mut tx = pool.begin().await?;
    let mut written = 0;
    for (key, value) in entries {
        let Some(value) = value else { continue };
        sqlx::query(&sql)
            .bind(key.as_str())
            .bind(value)
            .execute(&mut *tx)
            .await?;
        written += 1;
    }
    tx.commit().await?;

    tracing::info!(written, table = %schema.table, "endpoint rows provisioned");
    Ok(written)
}

/// Upsert one endpoint row.
pub async fn provision_endpoint(
    pool: &SqlitePool,
    schema: &TableSchema,
    key: CredentialKey,
    url: &str,
) -> StoreResult<()> {
    schema.validate()?;
    sqlx::query(&schema.upsert_value_sql())
        .bind(key.as_str())
        .bind(url)
        .execute(pool)
        .await?;
    Ok(())
}
