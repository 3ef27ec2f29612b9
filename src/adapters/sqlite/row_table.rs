//! SQLite adapter for RowTable.

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool, TypeInfo, ValueRef};

use crate::domain::errors::{StoreError, StoreResult};
use crate::domain::models::{RawValue, StoredRow, TableSchema};
use crate::domain::ports::RowTable;

/// `RowTable` over a provisioned SQLite key/value table.
///
/// Every call opens its own transaction on the pool and commits it before
/// returning; an early return drops the transaction, which rolls it back.
#[derive(Clone)]
pub struct SqliteRowTable {
    pool: SqlitePool,
    select_sql: String,
    update_sql: String,
}

impl SqliteRowTable {
    pub fn new(pool: SqlitePool, schema: &TableSchema) -> StoreResult<Self> {
        schema.validate()?;
        Ok(Self {
            pool,
            select_sql: schema.select_value_sql(),
            update_sql: schema.update_value_sql(),
        })
    }

    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Capture the column's runtime storage class.
///
/// SQLite is dynamically typed, so a TEXT-declared column can still hand
/// back a BLOB or INTEGER depending on how the row was written. TEXT is read
/// as bytes too: SQLite does not validate the encoding of stored text, and
/// UTF-8 checking belongs to `RawValue::normalize`.
fn read_raw_value(row: &SqliteRow) -> Result<RawValue, sqlx::Error> {
    let raw = row.try_get_raw(0)?;
    if raw.is_null() {
        return Ok(RawValue::Null);
    }
    let storage_class = raw.type_info().name().to_string();
    match storage_class.as_str() {
        "BLOB" => Ok(RawValue::Bytes(row.try_get(0)?)),
        "INTEGER" => Ok(RawValue::Integer(row.try_get(0)?)),
        "REAL" => Ok(RawValue::Real(row.try_get(0)?)),
        _ => Ok(RawValue::Bytes(row.try_get_unchecked(0)?)),
    }
}

#[async_trait]
impl RowTable for SqliteRowTable {
    async fn find(&self, key: &str) -> StoreResult<Option<StoredRow>> {
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query(&self.select_sql)
            .bind(key)
            .fetch_optional(&mut *tx)
            .await?;
        tx.commit().await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let value = read_raw_value(&row)?
            .normalize()
            .map_err(|source| StoreError::Decode {
                key: key.to_string(),
                source,
            })?;

        Ok(Some(StoredRow {
            key: key.to_string(),
            value,
        }))
    }

    async fn update(&self, key: &str, value: &str) -> StoreResult<u64> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(&self.update_sql)
            .bind(key)
            .bind(value)
            .execute(&mut *tx)
            .await?;

        let affected = result.rows_affected();
        if affected == 0 {
            // Nothing changed; leave the transaction to roll back on drop.
            return Ok(0);
        }
        tx.commit().await?;
        Ok(affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::create_migrated_test_pool;

    async fn setup() -> SqliteRowTable {
        let pool = create_migrated_test_pool().await.unwrap();
        SqliteRowTable::new(pool, &TableSchema::default()).unwrap()
    }

    #[tokio::test]
    async fn test_find_seeded_row_is_null() {
        let table = setup().await;
        let row = table.find("access_token").await.unwrap().unwrap();
        assert_eq!(row.key, "access_token");
        assert_eq!(row.value, None);
    }

    #[tokio::test]
    async fn test_find_missing_row() {
        let table = setup().await;
        assert!(table.find("code").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_then_find() {
        let table = setup().await;
        let affected = table.update("division", "123456").await.unwrap();
        assert_eq!(affected, 1);

        let row = table.find("division").await.unwrap().unwrap();
        assert_eq!(row.value.as_deref(), Some("123456"));
    }

    #[tokio::test]
    async fn test_update_missing_row_affects_nothing() {
        let table = setup().await;
        assert_eq!(table.update("code", "abc").await.unwrap(), 0);
        assert!(table.find("code").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_blob_value_is_decoded() {
        let table = setup().await;
        sqlx::query("UPDATE exact_online SET value = X'68656C6C6F' WHERE key = 'refresh_token'")
            .execute(table.pool())
            .await
            .unwrap();

        let row = table.find("refresh_token").await.unwrap().unwrap();
        assert_eq!(row.value.as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn test_invalid_blob_fails_to_decode() {
        let table = setup().await;
        sqlx::query("UPDATE exact_online SET value = X'C328' WHERE key = 'refresh_token'")
            .execute(table.pool())
            .await
            .unwrap();

        let err = table.find("refresh_token").await.unwrap_err();
        assert!(matches!(err, StoreError::Decode { key, .. } if key == "refresh_token"));
    }

    #[tokio::test]
    async fn test_invalid_text_fails_to_decode() {
        let table = setup().await;
        sqlx::query(
            "UPDATE exact_online SET value = CAST(X'C328' AS TEXT) WHERE key = 'refresh_token'",
        )
        .execute(table.pool())
        .await
        .unwrap();

        let err = table.find("refresh_token").await.unwrap_err();
        assert!(matches!(err, StoreError::Decode { key, .. } if key == "refresh_token"));
    }

    #[tokio::test]
    async fn test_rejects_invalid_schema() {
        let pool = create_migrated_test_pool().await.unwrap();
        let schema = TableSchema {
            table: "exact online".to_string(),
            ..TableSchema::default()
        };
        assert!(matches!(
            SqliteRowTable::new(pool, &schema),
            Err(StoreError::InvalidSchema(_))
        ));
    }
}
