//! Domain layer for the credential store
//!
//! This module contains the key set, row shapes, configuration models and
//! the port traits adapters implement.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{StoreError, StoreResult};
