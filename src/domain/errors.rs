//! Domain errors for the credential store.

use std::num::ParseIntError;
use std::string::FromUtf8Error;

use thiserror::Error;

/// Errors surfaced by the credential store and its row table adapters.
///
/// Backend failures are carried unmodified in [`StoreError::Database`];
/// nothing here is retried or replaced with a default.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No row exists for a recognized key. The table was not provisioned.
    #[error("No row provisioned for key '{key}'")]
    RecordNotFound { key: String },

    /// The row exists but its value is NULL.
    #[error("Value for key '{key}' has not been set")]
    ValueNotSet { key: String },

    /// The stored bytes are not valid UTF-8 text.
    #[error("Value for key '{key}' is not valid UTF-8: {source}")]
    Decode {
        key: String,
        #[source]
        source: FromUtf8Error,
    },

    /// The stored text is not a base-10 integer where one is required.
    #[error("Value '{value}' for key '{key}' is not an integer: {source}")]
    Parse {
        key: String,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("Unknown credential key: {0}")]
    UnknownKey(String),

    #[error("Invalid table schema: {0}")]
    InvalidSchema(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
