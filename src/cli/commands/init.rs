//! Implementation of the `exactonline-store init` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tokio::fs;

use crate::adapters::sqlite::{initialize_database, provision_endpoints, PoolConfig};
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing config file with the effective configuration
    #[arg(long, short)]
    pub force: bool,

    /// Only create the schema; leave endpoint rows as they are
    #[arg(long)]
    pub skip_endpoints: bool,

    /// Target directory (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

#[derive(Debug, serde::Serialize)]
pub struct InitOutput {
    pub success: bool,
    pub message: String,
    pub database: String,
    pub config_written: Option<PathBuf>,
    pub endpoints_provisioned: usize,
}

impl CommandOutput for InitOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![self.message.clone()];
        lines.push(format!("\nDatabase ready at {}", self.database));
        if let Some(path) = &self.config_written {
            lines.push(format!("Wrote configuration to {}", path.display()));
        }
        if self.endpoints_provisioned > 0 {
            lines.push(format!(
                "Provisioned {} endpoint URL(s)",
                self.endpoints_provisioned
            ));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: InitArgs, config: &Config, json_mode: bool) -> Result<()> {
    let target_path = if args.path.is_absolute() {
        args.path.clone()
    } else {
        std::env::current_dir()
            .context("Failed to get current directory")?
            .join(&args.path)
    };

    let config_written = write_config(&target_path, config, args.force).await?;

    let database_path = resolve_database_path(&target_path, &config.database.path);
    let url = format!("sqlite:{}", database_path.display());
    let pool = initialize_database(&url, Some(PoolConfig::from(&config.database)))
        .await
        .context("Failed to initialize database")?;

    let endpoints_provisioned = if args.skip_endpoints {
        0
    } else {
        provision_endpoints(&pool, &config.table, &config.endpoints)
            .await
            .context("Failed to provision endpoint URLs")?
    };
    pool.close().await;

    let output_data = InitOutput {
        success: true,
        message: "Credential store initialized.".to_string(),
        database: database_path.display().to_string(),
        config_written,
        endpoints_provisioned,
    };

    output(&output_data, json_mode);
    Ok(())
}

fn resolve_database_path(target: &Path, configured: &str) -> PathBuf {
    let configured = configured.strip_prefix("sqlite:").unwrap_or(configured);
    let path = Path::new(configured);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        target.join(path)
    }
}

async fn write_config(target: &Path, config: &Config, force: bool) -> Result<Option<PathBuf>> {
    let dir = target.join(".exactonline");
    let path = dir.join("config.yaml");
    if path.exists() && !force {
        return Ok(None);
    }

    fs::create_dir_all(&dir)
        .await
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    // Inline client credentials stay out of the file; they belong in the
    // environment or in local.yaml.
    let mut persisted = config.clone();
    persisted.credentials.client_id = None;
    persisted.credentials.client_secret = None;

    let yaml = serde_yaml::to_string(&persisted).context("Failed to serialize configuration")?;
    fs::write(&path, yaml)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_database_path() {
        let resolved = resolve_database_path(Path::new("/srv/app"), ".exactonline/exactonline.db");
        assert_eq!(resolved, PathBuf::from("/srv/app/.exactonline/exactonline.db"));
    }

    #[test]
    fn test_resolve_absolute_database_path() {
        let resolved = resolve_database_path(Path::new("/srv/app"), "sqlite:/var/lib/eo.db");
        assert_eq!(resolved, PathBuf::from("/var/lib/eo.db"));
    }

    #[tokio::test]
    async fn test_init_creates_database_and_config() {
        let dir = tempfile::tempdir().unwrap();
        let args = InitArgs {
            force: false,
            skip_endpoints: false,
            path: dir.path().to_path_buf(),
        };

        execute(args, &Config::default(), true).await.unwrap();

        assert!(dir.path().join(".exactonline/config.yaml").exists());
        assert!(dir.path().join(".exactonline/exactonline.db").exists());
    }
}
