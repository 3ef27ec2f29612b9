//! Implementation of the `exactonline-store show` command.

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Args;
use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};

use crate::cli::output::{output, CommandOutput};
use crate::cli::service::{open_store, read_field, FieldReading};
use crate::domain::errors::StoreError;
use crate::domain::models::{Config, CredentialKey};
use crate::domain::ports::RowTable;
use crate::services::CredentialStore;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Print tokens in full instead of masked
    #[arg(long)]
    pub reveal: bool,
}

#[derive(Debug, serde::Serialize)]
pub struct FieldStatus {
    pub key: CredentialKey,
    pub value: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, serde::Serialize)]
pub struct ShowOutput {
    pub fields: Vec<FieldStatus>,
    pub access_expires_at: Option<DateTime<Utc>>,
    pub access_expired: Option<bool>,
    pub client_id_configured: bool,
    pub client_secret_configured: bool,
}

impl CommandOutput for ShowOutput {
    fn to_human(&self) -> String {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL_CONDENSED)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("Key").add_attribute(Attribute::Bold),
                Cell::new("Value").add_attribute(Attribute::Bold),
            ]);

        for field in &self.fields {
            let value_cell = match (&field.value, &field.error) {
                (Some(value), _) => Cell::new(value),
                (None, Some(error)) => Cell::new(error).fg(Color::Yellow),
                (None, None) => Cell::new("-"),
            };
            table.add_row(vec![Cell::new(field.key.as_str()), value_cell]);
        }

        let mut lines = vec![table.to_string()];
        if let Some(expires_at) = self.access_expires_at {
            let state = if self.access_expired == Some(true) {
                "expired"
            } else {
                "valid"
            };
            lines.push(format!("Access token {state} (expiry {})", expires_at.to_rfc3339()));
        }
        lines.push(format!(
            "Client id: {}, client secret: {}",
            configured(self.client_id_configured),
            configured(self.client_secret_configured)
        ));
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

const fn configured(present: bool) -> &'static str {
    if present {
        "configured"
    } else {
        "missing"
    }
}

/// Read every recognized key, one accessor call each.
///
/// A failing key is reported in its row rather than aborting the listing.
pub async fn collect<T: RowTable>(store: &CredentialStore<T>, reveal: bool) -> ShowOutput {
    let mut fields = Vec::with_capacity(CredentialKey::ALL.len());
    let mut expiry = None;

    for key in CredentialKey::ALL {
        let status = match read_field(store, key).await {
            Ok(reading) => {
                if let (CredentialKey::AccessExpiry, FieldReading::Integer(ts)) = (key, &reading) {
                    expiry = DateTime::<Utc>::from_timestamp(*ts, 0);
                }
                FieldStatus {
                    key,
                    value: Some(reading.display(key, reveal)),
                    error: None,
                }
            }
            Err(StoreError::ValueNotSet { .. }) => FieldStatus {
                key,
                value: None,
                error: None,
            },
            Err(err) => FieldStatus {
                key,
                value: None,
                error: Some(err.to_string()),
            },
        };
        fields.push(status);
    }

    ShowOutput {
        fields,
        access_expires_at: expiry,
        access_expired: expiry.map(|at| at <= Utc::now()),
        client_id_configured: store.client_id().is_some_and(|id| !id.is_empty()),
        client_secret_configured: store.client_secret().is_some_and(|s| !s.is_empty()),
    }
}

pub async fn execute(args: ShowArgs, config: &Config, json_mode: bool) -> Result<()> {
    let store = open_store(config).await?;
    let summary = collect(&store, args.reveal).await;
    output(&summary, json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryRowTable;
    use crate::infrastructure::credentials::StaticCredentials;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_collect_reports_each_key() {
        let table = MemoryRowTable::provisioned();
        table.insert("division", "not-a-number").await;
        table.remove("response_url").await;
        let store = CredentialStore::new(
            table,
            Arc::new(StaticCredentials::new(Some("client".to_string()), None)),
        );
        store.set_access_expiry(1_426_492_503).await.unwrap();
        store.set_access_token("dAfjGhB1k2tE2dkG12sd1Ff1A1fj2fH2").await.unwrap();

        let summary = collect(&store, false).await;

        assert_eq!(summary.fields.len(), CredentialKey::ALL.len());
        let field = |key: CredentialKey| -> Option<String> {
            let status = summary.fields.iter().find(|f| f.key == key).unwrap();
            status.value.clone().or_else(|| status.error.clone())
        };

        assert_eq!(
            field(CredentialKey::AccessToken).as_deref(),
            Some("dAfj... (32 chars)")
        );
        assert!(field(CredentialKey::Division).unwrap().contains("not an integer"));
        assert!(field(CredentialKey::ResponseUrl)
            .unwrap()
            .contains("No row provisioned"));
        assert_eq!(field(CredentialKey::RefreshToken), None);
        assert_eq!(summary.access_expired, Some(true));
        assert!(summary.client_id_configured);
        assert!(!summary.client_secret_configured);
    }
}
