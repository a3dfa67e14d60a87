//! External shared-state store for two-player rooms.
//!
//! The store is a plain string key/value surface with no compare-and-set
//! primitive: concurrent writers interleave arbitrarily and the last write
//! wins. The session layer's synchronizer is the only consumer and is
//! written to tolerate that.

mod file_store;
mod memory;
mod record;

pub use file_store::FileStore;
pub use memory::MemoryStore;
pub use record::RoomRecord;

/// Errors from the store layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Eventually-consistent shared key/value store.
///
/// No atomicity is assumed beyond single get/set calls; there is
/// deliberately no compare-and-swap in this contract.
pub trait SharedStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}
