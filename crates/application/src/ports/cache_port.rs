//! Cache port definition
//!
//! Interface for the process-wide time-bounded cache in front of the
//! upstream provider. Values are stored as raw bytes with a per-entry TTL;
//! callers handle serialization. A read after an entry's TTL has elapsed is
//! a miss, never a stale hit.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::ApplicationError;

/// Cache port for storing and retrieving cached values
///
/// Implementations must be safe for concurrent readers and writers. A race
/// that lets two simultaneous misses both fetch upstream is acceptable and
/// self-correcting.
#[async_trait]
pub trait CachePort: Send + Sync + std::fmt::Debug {
    /// Get a cached value by key
    ///
    /// Returns `None` if the key doesn't exist or has expired.
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, ApplicationError>;

    /// Set a cached value with a time-to-live
    ///
    /// If the key already exists, its value and TTL are replaced.
    async fn set_bytes(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl: Duration,
    ) -> Result<(), ApplicationError>;
}

/// Extension trait for typed cache operations
///
/// Provides typed get/set on top of the raw byte interface using JSON.
#[async_trait]
pub trait CachePortExt: CachePort {
    /// Get a typed value from cache
    async fn get<T>(&self, key: &str) -> Result<Option<T>, ApplicationError>
    where
        T: serde::de::DeserializeOwned + Send,
    {
        match self.get_bytes(key).await? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes).map_err(|e| {
                    ApplicationError::Internal(format!("Cache deserialization error: {e}"))
                })?;
                Ok(Some(value))
            },
            None => Ok(None),
        }
    }

    /// Set a typed value in cache
    async fn set<T>(&self, key: &str, value: &T, ttl: Duration) -> Result<(), ApplicationError>
    where
        T: serde::Serialize + Send + Sync,
    {
        let bytes = serde_json::to_vec(value).map_err(|e| {
            ApplicationError::Internal(format!("Cache serialization error: {e}"))
        })?;
        self.set_bytes(key, bytes, ttl).await
    }
}

#[async_trait]
impl<T: CachePort + ?Sized> CachePortExt for T {}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn CachePort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn CachePort>();
    }
}
