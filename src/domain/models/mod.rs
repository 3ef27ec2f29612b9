pub mod config;
pub mod credential_key;
pub mod row;
pub mod schema;

pub use config::{
    Config, CredentialsConfig, DatabaseConfig, EndpointsConfig, LogFormat, LoggingConfig,
    RotationPolicy,
};
pub use credential_key::{CredentialKey, ValueKind};
pub use row::{RawValue, StoredRow};
pub use schema::TableSchema;
