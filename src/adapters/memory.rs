//! In-process RowTable keeping native values in a map.
//!
//! Useful for embedding and for exercising the store without a database. It
//! stores [`RawValue`]s so byte and integer representations survive until the
//! single decode step in [`RowTable::find`].

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::errors::{StoreError, StoreResult};
use crate::domain::models::{CredentialKey, RawValue, StoredRow};
use crate::domain::ports::RowTable;

#[derive(Debug, Clone, Default)]
pub struct MemoryRowTable {
    rows: Arc<RwLock<HashMap<String, RawValue>>>,
}

impl MemoryRowTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// A table with every recognized key present and unset.
    pub fn provisioned() -> Self {
        let rows = CredentialKey::ALL
            .into_iter()
            .map(|key| (key.as_str().to_string(), RawValue::Null))
            .collect();
        Self {
            rows: Arc::new(RwLock::new(rows)),
        }
    }

    /// Create or replace a row, as external provisioning would.
    pub async fn insert(&self, key: impl Into<String>, value: impl Into<RawValue>) {
        self.rows.write().await.insert(key.into(), value.into());
    }

    pub async fn remove(&self, key: &str) -> Option<RawValue> {
        self.rows.write().await.remove(key)
    }
}

#[async_trait]
impl RowTable for MemoryRowTable {
    async fn find(&self, key: &str) -> StoreResult<Option<StoredRow>> {
        let raw = self.rows.read().await.get(key).cloned();
        let Some(raw) = raw else {
            return Ok(None);
        };
        let value = raw.normalize().map_err(|source| StoreError::Decode {
            key: key.to_string(),
            source,
        })?;
        Ok(Some(StoredRow {
            key: key.to_string(),
            value,
        }))
    }

    async fn update(&self, key: &str, value: &str) -> StoreResult<u64> {
        let mut rows = self.rows.write().await;
        match rows.get_mut(key) {
            Some(slot) => {
                *slot = RawValue::Text(value.to_string());
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_provisioned_has_every_key() {
        let table = MemoryRowTable::provisioned();
        for key in CredentialKey::ALL {
            let row = table.find(key.as_str()).await.unwrap();
            assert_eq!(row.unwrap().value, None);
        }
    }

    #[tokio::test]
    async fn test_update_does_not_create_rows() {
        let table = MemoryRowTable::new();
        assert_eq!(table.update("access_token", "x").await.unwrap(), 0);
        assert!(table.find("access_token").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_integer_native_value() {
        let table = MemoryRowTable::new();
        table.insert("division", 123_456_i64).await;
        let row = table.find("division").await.unwrap().unwrap();
        assert_eq!(row.value.as_deref(), Some("123456"));
    }
}
