//! Service layer
//!
//! - CredentialStore: typed OAuth session state over a row table

pub mod credential_store;

pub use credential_store::{CredentialStore, FieldValue};
