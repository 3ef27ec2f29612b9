//! Implementation of the `exactonline-store set` command.

use anyhow::Result;
use clap::Args;

use crate::cli::output::{output, CommandOutput};
use crate::cli::service::{open_store, write_field};
use crate::domain::models::{Config, CredentialKey};

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Settable key (access_token, refresh_token, access_expiry, division, iteration_limit)
    pub key: CredentialKey,

    /// New value; integers are written as decimal text
    pub value: String,
}

#[derive(Debug, serde::Serialize)]
pub struct SetOutput {
    pub success: bool,
    pub key: CredentialKey,
}

impl CommandOutput for SetOutput {
    fn to_human(&self) -> String {
        format!("Updated {}", self.key)
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: SetArgs, config: &Config, json_mode: bool) -> Result<()> {
    let store = open_store(config).await?;
    write_field(&store, args.key, &args.value).await?;

    output(
        &SetOutput {
            success: true,
            key: args.key,
        },
        json_mode,
    );
    Ok(())
}
