//! Port trait definitions (Hexagonal Architecture)
//!
//! - RowTable: key/value row persistence
//! - ClientCredentialSource: OAuth client identity
//!
//! The credential store depends on these traits, not on concrete adapters.

pub mod client_credentials;
pub mod row_table;

pub use client_credentials::ClientCredentialSource;
pub use row_table::RowTable;
