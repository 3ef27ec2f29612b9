//! Implementation of the `exactonline-store get` command.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::output::{output, CommandOutput};
use crate::cli::service::{open_store, read_field, FieldReading};
use crate::domain::models::{Config, CredentialKey};

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Key to read (auth_url, access_token, division, ...)
    pub key: CredentialKey,

    /// Print tokens in full instead of masked
    #[arg(long)]
    pub reveal: bool,
}

#[derive(Debug, serde::Serialize)]
pub struct GetOutput {
    pub key: CredentialKey,
    #[serde(skip)]
    pub display: String,
    pub value: serde_json::Value,
}

impl CommandOutput for GetOutput {
    fn to_human(&self) -> String {
        self.display.clone()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: GetArgs, config: &Config, json_mode: bool) -> Result<()> {
    let store = open_store(config).await?;
    let reading = read_field(&store, args.key)
        .await
        .with_context(|| format!("Failed to read {}", args.key))?;

    let display = reading.display(args.key, args.reveal);
    let value = match &reading {
        FieldReading::Text(_) => serde_json::Value::String(display.clone()),
        FieldReading::Integer(n) => serde_json::Value::from(*n),
    };

    output(
        &GetOutput {
            key: args.key,
            display,
            value,
        },
        json_mode,
    );
    Ok(())
}
