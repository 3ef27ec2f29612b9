use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::schema::TableSchema;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Key/value table the store binds to
    #[serde(default)]
    pub table: TableSchema,

    /// Where client id and secret come from
    #[serde(default)]
    pub credentials: CredentialsConfig,

    /// Endpoint URLs written by `init`
    #[serde(default)]
    pub endpoints: EndpointsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabaseConfig {
    /// Path to `SQLite` database file
    #[serde(default = "default_database_path")]
    pub path: String,

    /// Maximum number of database connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Milliseconds a writer waits on a locked database before giving up
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

fn default_database_path() -> String {
    ".exactonline/exactonline.db".to_string()
}

const fn default_max_connections() -> u32 {
    5
}

const fn default_busy_timeout_ms() -> u64 {
    30_000
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            max_connections: default_max_connections(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

impl DatabaseConfig {
    pub fn url(&self) -> String {
        if self.path.starts_with("sqlite:") {
            self.path.clone()
        } else {
            format!("sqlite:{}", self.path)
        }
    }
}

/// Source of the OAuth client identity.
///
/// With `client_id`/`client_secret` set, those values are used as-is.
/// Otherwise the named environment variables are read on every access.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CredentialsConfig {
    #[serde(default = "default_client_id_var")]
    pub client_id_var: String,

    #[serde(default = "default_client_secret_var")]
    pub client_secret_var: String,

    #[serde(default)]
    pub client_id: Option<String>,

    #[serde(default)]
    pub client_secret: Option<String>,
}

fn default_client_id_var() -> String {
    "EXACTONLINE_CLIENT_ID".to_string()
}

fn default_client_secret_var() -> String {
    "EXACTONLINE_CLIENT_SECRET".to_string()
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            client_id_var: default_client_id_var(),
            client_secret_var: default_client_secret_var(),
            client_id: None,
            client_secret: None,
        }
    }
}

/// Endpoint URLs provisioned into the read-only rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EndpointsConfig {
    #[serde(default = "default_auth_url")]
    pub auth_url: String,

    #[serde(default = "default_rest_url")]
    pub rest_url: String,

    #[serde(default = "default_token_url")]
    pub token_url: String,

    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default)]
    pub response_url: Option<String>,
}

fn default_auth_url() -> String {
    "https://start.exactonline.co.uk/api/oauth2/auth".to_string()
}

fn default_rest_url() -> String {
    "https://start.exactonline.co.uk/api".to_string()
}

fn default_token_url() -> String {
    "https://start.exactonline.co.uk/api/oauth2/token".to_string()
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            auth_url: default_auth_url(),
            rest_url: default_rest_url(),
            token_url: default_token_url(),
            base_url: None,
            response_url: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for stdout
    #[serde(default)]
    pub format: LogFormat,

    /// Directory for rolling log files; stdout only when unset
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    #[serde(default = "default_true")]
    pub enable_stdout: bool,

    #[serde(default)]
    pub rotation: RotationPolicy,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    #[default]
    Daily,
    Hourly,
    Never,
}

fn default_log_level() -> String {
    "info".to_string()
}

const fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            log_dir: None,
            enable_stdout: true,
            rotation: RotationPolicy::default(),
        }
    }
}
