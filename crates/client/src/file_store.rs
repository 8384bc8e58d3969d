//! Content-addressed file store contract.

use async_trait::async_trait;

use crate::error::FileStoreError;

/// Write interface to the external content-addressed file store.
///
/// Storing identical bytes twice yields the same reference, so a
/// repeated upload after a failed ledger write is harmless. No delete
/// operation is assumed.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Stores the bytes and returns their opaque content reference.
    async fn store(&self, bytes: &[u8]) -> Result<String, FileStoreError>;
}
