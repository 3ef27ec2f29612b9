//! The closed set of keys the credential store understands.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::errors::StoreError;

/// Semantic type of the value stored under a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Integer,
}

/// A recognized row key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialKey {
    AuthUrl,
    RestUrl,
    TokenUrl,
    BaseUrl,
    ResponseUrl,
    AccessToken,
    RefreshToken,
    AccessExpiry,
    Division,
    IterationLimit,
}

impl CredentialKey {
    /// Every recognized key, in provisioning order.
    pub const ALL: [Self; 10] = [
        Self::AuthUrl,
        Self::RestUrl,
        Self::TokenUrl,
        Self::BaseUrl,
        Self::ResponseUrl,
        Self::AccessToken,
        Self::RefreshToken,
        Self::AccessExpiry,
        Self::Division,
        Self::IterationLimit,
    ];

    /// Row key as stored in the table.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AuthUrl => "auth_url",
            Self::RestUrl => "rest_url",
            Self::TokenUrl => "token_url",
            Self::BaseUrl => "base_url",
            Self::ResponseUrl => "response_url",
            Self::AccessToken => "access_token",
            Self::RefreshToken => "refresh_token",
            Self::AccessExpiry => "access_expiry",
            Self::Division => "division",
            Self::IterationLimit => "iteration_limit",
        }
    }

    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::AccessExpiry | Self::Division | Self::IterationLimit => ValueKind::Integer,
            _ => ValueKind::Text,
        }
    }

    /// Whether the store exposes a setter for this key.
    ///
    /// Endpoint URLs are provisioned externally and are read-only here.
    pub const fn is_settable(&self) -> bool {
        !matches!(
            self,
            Self::AuthUrl | Self::RestUrl | Self::TokenUrl | Self::BaseUrl | Self::ResponseUrl
        )
    }

    /// Whether the value is session secret material.
    pub const fn is_secret(&self) -> bool {
        matches!(self, Self::AccessToken | Self::RefreshToken)
    }
}

impl fmt::Display for CredentialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CredentialKey {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| StoreError::UnknownKey(s.to_string()))
    }
}
