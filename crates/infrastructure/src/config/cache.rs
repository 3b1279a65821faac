//! Cache validity configuration.

use serde::{Deserialize, Serialize};

/// Per-call-kind cache validity in seconds
///
/// Geocoding results are effectively static, current conditions churn fast;
/// the defaults follow that spread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Current weather validity (default: 5 minutes)
    #[serde(default = "default_current_secs")]
    pub current_secs: u64,

    /// Hourly forecast validity (default: 30 minutes)
    #[serde(default = "default_hourly_secs")]
    pub hourly_secs: u64,

    /// Daily forecast validity (default: 3 hours)
    #[serde(default = "default_daily_secs")]
    pub daily_secs: u64,

    /// 3-hour-block forecast validity (default: 1 hour)
    #[serde(default = "default_blocks_secs")]
    pub blocks_secs: u64,

    /// Geocoding validity (default: 30 days)
    #[serde(default = "default_geocode_secs")]
    pub geocode_secs: u64,

    /// In-memory cache capacity in megabytes
    #[serde(default = "default_max_capacity_mb")]
    pub max_capacity_mb: u64,
}

const fn default_current_secs() -> u64 {
    5 * 60
}

const fn default_hourly_secs() -> u64 {
    30 * 60
}

const fn default_daily_secs() -> u64 {
    3 * 60 * 60
}

const fn default_blocks_secs() -> u64 {
    60 * 60
}

const fn default_geocode_secs() -> u64 {
    30 * 24 * 60 * 60
}

const fn default_max_capacity_mb() -> u64 {
    64
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            current_secs: default_current_secs(),
            hourly_secs: default_hourly_secs(),
            daily_secs: default_daily_secs(),
            blocks_secs: default_blocks_secs(),
            geocode_secs: default_geocode_secs(),
            max_capacity_mb: default_max_capacity_mb(),
        }
    }
}
