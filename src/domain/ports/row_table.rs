//! Repository port for the key/value row table.

use async_trait::async_trait;

use crate::domain::errors::StoreResult;
use crate::domain::models::StoredRow;

/// A persistence backend holding one row per key.
///
/// Each call is its own scoped session: implementations acquire, perform
/// exactly one query and release before returning, on success and on error.
/// Values are returned as canonical text; decoding native representations is
/// the adapter's job.
#[async_trait]
pub trait RowTable: Send + Sync {
    /// Find the row whose key equals `key`.
    ///
    /// # Returns
    /// - `Some(row)` for the first match
    /// - `None` if no row has that key
    async fn find(&self, key: &str) -> StoreResult<Option<StoredRow>>;

    /// Set the value of every row whose key equals `key`.
    ///
    /// Returns the number of rows affected. Rows are never created here.
    async fn update(&self, key: &str, value: &str) -> StoreResult<u64>;
}
