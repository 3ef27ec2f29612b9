//! Client credential sources
//!
//! - Environment variables, read at call time
//! - Static values injected from configuration

use std::env;
use std::fmt;
use std::sync::Arc;

use crate::domain::models::CredentialsConfig;
use crate::domain::ports::ClientCredentialSource;

pub const CLIENT_ID_VAR: &str = "EXACTONLINE_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "EXACTONLINE_CLIENT_SECRET";

/// Reads client id and secret from environment variables on every call.
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    client_id_var: String,
    client_secret_var: String,
}

impl EnvCredentials {
    pub fn new(client_id_var: impl Into<String>, client_secret_var: impl Into<String>) -> Self {
        Self {
            client_id_var: client_id_var.into(),
            client_secret_var: client_secret_var.into(),
        }
    }
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::new(CLIENT_ID_VAR, CLIENT_SECRET_VAR)
    }
}

impl ClientCredentialSource for EnvCredentials {
    fn client_id(&self) -> Option<String> {
        env::var(&self.client_id_var).ok()
    }

    fn client_secret(&self) -> Option<String> {
        env::var(&self.client_secret_var).ok()
    }
}

/// Fixed client credentials.
#[derive(Clone, Default)]
pub struct StaticCredentials {
    client_id: Option<String>,
    client_secret: Option<String>,
}

impl StaticCredentials {
    pub const fn new(client_id: Option<String>, client_secret: Option<String>) -> Self {
        Self {
            client_id,
            client_secret,
        }
    }
}

impl fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl ClientCredentialSource for StaticCredentials {
    fn client_id(&self) -> Option<String> {
        self.client_id.clone()
    }

    fn client_secret(&self) -> Option<String> {
        self.client_secret.clone()
    }
}

/// Pick the credential source described by configuration.
///
/// Static values win when both are configured; otherwise the environment is
/// consulted on each access.
pub fn credentials_from_config(config: &CredentialsConfig) -> Arc<dyn ClientCredentialSource> {
    match (&config.client_id, &config.client_secret) {
        (Some(id), Some(secret)) => Arc::new(StaticCredentials::new(
            Some(id.clone()),
            Some(secret.clone()),
        )),
        _ => Arc::new(EnvCredentials::new(
            config.client_id_var.clone(),
            config.client_secret_var.clone(),
        )),
    }
}
