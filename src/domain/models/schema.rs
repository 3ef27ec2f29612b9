//! Descriptor of the key/value table a row table adapter binds to.

use serde::{Deserialize, Serialize};

use crate::domain::errors::{StoreError, StoreResult};

/// Names the table and the two columns holding keys and values.
///
/// Lets the same store run against any provisioned schema, e.g. an existing
/// `settings(name, val)` table instead of the default `exact_online(key, value)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TableSchema {
    #[serde(default = "default_table")]
    pub table: String,

    #[serde(default = "default_key_column")]
    pub key_column: String,

    #[serde(default = "default_value_column")]
    pub value_column: String,
}

fn default_table() -> String {
    "exact_online".to_string()
}

fn default_key_column() -> String {
    "key".to_string()
}

fn default_value_column() -> String {
    "value".to_string()
}

impl Default for TableSchema {
    fn default() -> Self {
        Self {
            table: default_table(),
            key_column: default_key_column(),
            value_column: default_value_column(),
        }
    }
}

impl TableSchema {
    pub fn new(
        table: impl Into<String>,
        key_column: impl Into<String>,
        value_column: impl Into<String>,
    ) -> StoreResult<Self> {
        let schema = Self {
            table: table.into(),
            key_column: key_column.into(),
            value_column: value_column.into(),
        };
        schema.validate()?;
        Ok(schema)
    }

    /// Identifiers are interpolated into SQL, so only plain names pass.
    pub fn validate(&self) -> StoreResult<()> {
        for (what, ident) in [
            ("table", &self.table),
            ("key column", &self.key_column),
            ("value column", &self.value_column),
        ] {
            if !is_plain_identifier(ident) {
                return Err(StoreError::InvalidSchema(format!(
                    "{what} name '{ident}' must be ASCII letters, digits or '_' and not start with a digit"
                )));
            }
        }
        if self.key_column == self.value_column {
            return Err(StoreError::InvalidSchema(
                "key and value columns must differ".to_string(),
            ));
        }
        Ok(())
    }

    pub fn select_value_sql(&self) -> String {
        format!(
            r#"SELECT "{value}" FROM "{table}" WHERE "{key}" = ?1 LIMIT 1"#,
            value = self.value_column,
            table = self.table,
            key = self.key_column,
        )
    }

    pub fn update_value_sql(&self) -> String {
        format!(
            r#"UPDATE "{table}" SET "{value}" = ?2 WHERE "{key}" = ?1"#,
            table = self.table,
            value = self.value_column,
            key = self.key_column,
        )
    }

    /// Used by provisioning only; the store itself never inserts.
    pub fn upsert_value_sql(&self) -> String {
        format!(
            r#"INSERT INTO "{table}" ("{key}", "{value}") VALUES (?1, ?2)
               ON CONFLICT("{key}") DO UPDATE SET "{value}" = excluded."{value}""#,
            table = self.table,
            key = self.key_column,
            value = self.value_column,
        )
    }
}

fn is_plain_identifier(ident: &str) -> bool {
    let mut chars = ident.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schema_is_valid() {
        let schema = TableSchema::default();
        assert!(schema.validate().is_ok());
        assert_eq!(
            schema.select_value_sql(),
            r#"SELECT "value" FROM "exact_online" WHERE "key" = ?1 LIMIT 1"#
        );
        assert_eq!(
            schema.update_value_sql(),
            r#"UPDATE "exact_online" SET "value" = ?2 WHERE "key" = ?1"#
        );
    }

    #[test]
    fn test_custom_schema() {
        let schema = TableSchema::new("settings", "name", "val").unwrap();
        assert!(schema.select_value_sql().contains(r#"FROM "settings""#));
        assert!(schema.update_value_sql().contains(r#"SET "val" = ?2"#));
    }

    #[test]
    fn test_rejects_injection() {
        let result = TableSchema::new("exact_online; DROP TABLE x", "key", "value");
        assert!(matches!(result, Err(StoreError::InvalidSchema(_))));
    }

    #[test]
    fn test_rejects_leading_digit_and_empty() {
        assert!(TableSchema::new("1table", "key", "value").is_err());
        assert!(TableSchema::new("table", "", "value").is_err());
    }

    #[test]
    fn test_rejects_same_columns() {
        assert!(TableSchema::new("t", "key", "key").is_err());
    }
}
