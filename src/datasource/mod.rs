//! Object store abstraction for fetching daily transfer logs and side tables.

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

pub mod local;
pub mod mock;
pub mod transfer_logs;

pub use local::LocalObjectStore;
pub use mock::MockObjectStore;
pub use transfer_logs::{decode_transfers, TRANSFER_FIELD_COUNT};

/// Minimal object store interface: list a bucket, fetch one object.
///
/// Implementations may retry beneath this interface; callers treat every
/// returned error as final.
#[async_trait]
pub trait ObjectStore: Send + Sync + fmt::Debug {
    /// List every object key in `bucket`.
    async fn list(&self, bucket: &str) -> Result<Vec<String>, StoreError>;

    /// Fetch the full body of `key` in `bucket`.
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError>;
}

/// Error type for object store operations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Bucket or object does not exist.
    #[error("not found: {bucket}/{key}")]
    NotFound { bucket: String, key: String },
    /// Key that cannot be mapped onto the store (e.g. path traversal).
    #[error("invalid key: {0}")]
    InvalidKey(String),
    /// Transport or filesystem failure.
    #[error("I/O error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::NotFound {
            bucket: "daily".to_string(),
            key: "1700000000-part0".to_string(),
        };
        assert_eq!(err.to_string(), "not found: daily/1700000000-part0");

        let err = StoreError::InvalidKey("../etc".to_string());
        assert_eq!(err.to_string(), "invalid key: ../etc");

        let err = StoreError::Io("connection reset".to_string());
        assert_eq!(err.to_string(), "I/O error: connection reset");
    }
}
