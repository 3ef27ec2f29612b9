//! Infrastructure layer module
//!
//! - Configuration management (figment)
//! - Logging infrastructure (tracing)
//! - Client credential sources

pub mod config;
pub mod credentials;
pub mod logging;

pub use config::{ConfigError, ConfigLoader};
pub use credentials::{credentials_from_config, EnvCredentials, StaticCredentials};
pub use logging::LoggerImpl;
