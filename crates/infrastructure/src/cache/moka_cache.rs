//! Moka in-memory cache implementation
//!
//! Thread-safe in-memory cache with per-entry TTL. Upstream payload validity
//! ranges from five minutes (current weather) to thirty days (geocoding), so
//! entries carry their own TTL and an `Expiry` implementation reads it back;
//! a cache-level TTL cannot express that spread.

use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::{Duration, Instant},
};

use application::{error::ApplicationError, ports::CachePort};
use async_trait::async_trait;
use moka::{future::Cache, Expiry};
use tracing::{debug, instrument};

/// Maximum cache size in MB
const DEFAULT_MAX_CAPACITY_MB: u64 = 64;

/// Configuration for the Moka cache
#[derive(Debug, Clone, Copy)]
pub struct MokaCacheConfig {
    /// Maximum capacity in megabytes
    pub max_capacity_mb: u64,
}

impl Default for MokaCacheConfig {
    fn default() -> Self {
        Self {
            max_capacity_mb: DEFAULT_MAX_CAPACITY_MB,
        }
    }
}

/// A cached value together with its time-to-live
#[derive(Debug, Clone)]
struct TtlEntry {
    bytes: Vec<u8>,
    ttl: Duration,
}

/// Expiry policy that honors each entry's own TTL
struct PerEntryTtl;

impl Expiry<String, TtlEntry> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &TtlEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Moka-based in-memory cache with per-entry TTL
pub struct MokaCache {
    cache: Cache<String, TtlEntry>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl std::fmt::Debug for MokaCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaCache")
            .field("entries", &self.cache.entry_count())
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .field("misses", &self.misses.load(Ordering::Relaxed))
            .finish()
    }
}

impl MokaCache {
    /// Create a new cache with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MokaCacheConfig::default())
    }

    /// Create a new cache with custom configuration
    #[must_use]
    pub fn with_config(config: MokaCacheConfig) -> Self {
        let max_capacity_bytes = config.max_capacity_mb * 1024 * 1024;

        let cache = Cache::builder()
            .max_capacity(max_capacity_bytes)
            .expire_after(PerEntryTtl)
            .weigher(|_key: &String, value: &TtlEntry| -> u32 {
                value.bytes.len().try_into().unwrap_or(u32::MAX)
            })
            .build();

        Self {
            cache,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }
}

impl Default for MokaCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CachePort for MokaCache {
    #[instrument(skip(self), level = "debug")]
    #[allow(clippy::option_if_let_else)]
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, ApplicationError> {
        if let Some(entry) = self.cache.get(key).await {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(key = %key, "Cache hit");
            Ok(Some(entry.bytes))
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            debug!(key = %key, "Cache miss");
            Ok(None)
        }
    }

    #[instrument(skip(self, value), level = "debug")]
    async fn set_bytes(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl: Duration,
    ) -> Result<(), ApplicationError> {
        self.cache
            .insert(key.to_string(), TtlEntry { bytes: value, ttl })
            .await;
        debug!(key = %key, ttl_secs = ttl.as_secs(), "Cache set");
        Ok(())
    }
}
