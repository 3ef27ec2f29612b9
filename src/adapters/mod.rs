//! Adapters implementing the domain ports.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryRowTable;
pub use sqlite::SqliteRowTable;
