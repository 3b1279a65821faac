//! Caching decorator for the weather port
//!
//! Wraps any weather port with a byte cache, one TTL per call kind.
//! Current conditions go stale in minutes while geocoding results are
//! effectively static, so the TTLs differ by orders of magnitude. Only
//! successful responses are stored; a cache failure degrades to a direct
//! provider call rather than failing the request.

use std::{sync::Arc, time::Duration};

use application::{
    error::ApplicationError,
    ports::{
        CachePort, CachePortExt, CurrentConditions, DailyForecast, ForecastBlocks, GeocodeMatch,
        HourlyForecast, WeatherPort,
    },
};
use async_trait::async_trait;
use domain::UnitSystem;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, warn};

/// Time-to-live per call kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    pub current: Duration,
    pub hourly: Duration,
    pub daily: Duration,
    pub blocks: Duration,
    pub geocode: Duration,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            current: Duration::from_secs(5 * 60),
            hourly: Duration::from_secs(30 * 60),
            daily: Duration::from_secs(3 * 60 * 60),
            blocks: Duration::from_secs(60 * 60),
            geocode: Duration::from_secs(30 * 24 * 60 * 60),
        }
    }
}

/// Weather port decorator that consults the cache before the provider
pub struct CachedWeatherClient {
    inner: Arc<dyn WeatherPort>,
    cache: Arc<dyn CachePort>,
    policy: CachePolicy,
}

impl CachedWeatherClient {
    pub fn new(inner: Arc<dyn WeatherPort>, cache: Arc<dyn CachePort>, policy: CachePolicy) -> Self {
        Self {
            inner,
            cache,
            policy,
        }
    }

    /// Cache read that degrades to a miss on error
    async fn lookup<T: DeserializeOwned + Send>(&self, key: &str) -> Option<T> {
        match self.cache.get(key).await {
            Ok(hit) => {
                if hit.is_some() {
                    debug!(key, "Cache hit");
                }
                hit
            },
            Err(e) => {
                warn!(key, error = %e, "Cache read failed, fetching upstream");
                None
            },
        }
    }

    /// Cache write that logs instead of failing the request
    async fn store<T: Serialize + Send + Sync>(&self, key: &str, value: &T, ttl: Duration) {
        if let Err(e) = self.cache.set(key, value, ttl).await {
            warn!(key, error = %e, "Cache write failed");
        }
    }
}

impl std::fmt::Debug for CachedWeatherClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedWeatherClient")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

fn coord_key(kind: &str, lat: f64, lon: f64, units: UnitSystem) -> String {
    format!("wx:{kind}:{lat:.4}:{lon:.4}:{units}")
}

fn counted_key(kind: &str, lat: f64, lon: f64, units: UnitSystem, count: u8) -> String {
    format!("wx:{kind}:{lat:.4}:{lon:.4}:{units}:{count}")
}

#[async_trait]
impl WeatherPort for CachedWeatherClient {
    #[instrument(skip(self))]
    async fn fetch_current(
        &self,
        lat: f64,
        lon: f64,
        units: UnitSystem,
    ) -> Result<CurrentConditions, ApplicationError> {
        let key = coord_key("current", lat, lon, units);
        if let Some(hit) = self.lookup(&key).await {
            return Ok(hit);
        }
        let fresh = self.inner.fetch_current(lat, lon, units).await?;
        self.store(&key, &fresh, self.policy.current).await;
        Ok(fresh)
    }

    #[instrument(skip(self))]
    async fn fetch_hourly(
        &self,
        lat: f64,
        lon: f64,
        units: UnitSystem,
        count: u8,
    ) -> Result<HourlyForecast, ApplicationError> {
        let key = counted_key("hourly", lat, lon, units, count);
        if let Some(hit) = self.lookup(&key).await {
            return Ok(hit);
        }
        let fresh = self.inner.fetch_hourly(lat, lon, units, count).await?;
        self.store(&key, &fresh, self.policy.hourly).await;
        Ok(fresh)
    }

    #[instrument(skip(self))]
    async fn fetch_daily(
        &self,
        lat: f64,
        lon: f64,
        units: UnitSystem,
        count: u8,
    ) -> Result<DailyForecast, ApplicationError> {
        let key = counted_key("daily", lat, lon, units, count);
        if let Some(hit) = self.lookup(&key).await {
            return Ok(hit);
        }
        let fresh = self.inner.fetch_daily(lat, lon, units, count).await?;
        self.store(&key, &fresh, self.policy.daily).await;
        Ok(fresh)
    }

    #[instrument(skip(self))]
    async fn fetch_blocks(
        &self,
        lat: f64,
        lon: f64,
        units: UnitSystem,
        count: u8,
    ) -> Result<ForecastBlocks, ApplicationError> {
        let key = counted_key("blocks", lat, lon, units, count);
        if let Some(hit) = self.lookup(&key).await {
            return Ok(hit);
        }
        let fresh = self.inner.fetch_blocks(lat, lon, units, count).await?;
        self.store(&key, &fresh, self.policy.blocks).await;
        Ok(fresh)
    }

    #[instrument(skip(self))]
    async fn geocode(&self, place: &str) -> Result<Vec<GeocodeMatch>, ApplicationError> {
        // Case-insensitive key so "London" and "london" share an entry
        let key = format!("wx:geo:{}", place.trim().to_lowercase());
        if let Some(hit) = self.lookup(&key).await {
            return Ok(hit);
        }
        let fresh = self.inner.geocode(place).await?;
        self.store(&key, &fresh, self.policy.geocode).await;
        Ok(fresh)
    }

    #[instrument(skip(self))]
    async fn reverse_geocode(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<Vec<GeocodeMatch>, ApplicationError> {
        let key = format!("wx:rgeo:{lat:.4}:{lon:.4}");
        if let Some(hit) = self.lookup(&key).await {
            return Ok(hit);
        }
        let fresh = self.inner.reverse_geocode(lat, lon).await?;
        self.store(&key, &fresh, self.policy.geocode).await;
        Ok(fresh)
    }
}
