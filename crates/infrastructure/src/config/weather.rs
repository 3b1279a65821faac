//! Upstream weather provider configuration.

use serde::{Deserialize, Serialize};

/// Weather provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Weather API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Geocoding API base URL
    #[serde(default = "default_geo_base_url")]
    pub geo_base_url: String,

    /// API key (required for live operation)
    #[serde(default)]
    pub api_key: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Number of hourly entries requested (default: 24)
    #[serde(default = "default_hourly_count")]
    pub hourly_count: u8,

    /// Number of daily entries requested (default: 7)
    #[serde(default = "default_daily_count")]
    pub daily_count: u8,

    /// Number of 3-hour blocks requested for summary cards (default: 5)
    #[serde(default = "default_block_count")]
    pub block_count: u8,

    /// Location served when neither request nor session supplies one
    #[serde(default)]
    pub fallback_location: FallbackLocationConfig,
}

/// Built-in fallback location
///
/// Ships with coordinates so the cold-start path never depends on a live
/// geocoding call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackLocationConfig {
    pub name: String,
    /// Latitude (-90.0 to 90.0)
    pub latitude: f64,
    /// Longitude (-180.0 to 180.0)
    pub longitude: f64,
}

impl Default for FallbackLocationConfig {
    fn default() -> Self {
        Self {
            name: "Bulawayo".to_string(),
            latitude: -20.15,
            longitude: 28.5833,
        }
    }
}

fn default_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_geo_base_url() -> String {
    "https://api.openweathermap.org/geo/1.0".to_string()
}

const fn default_timeout() -> u64 {
    10
}

const fn default_hourly_count() -> u8 {
    24
}

const fn default_daily_count() -> u8 {
    7
}

const fn default_block_count() -> u8 {
    5
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            geo_base_url: default_geo_base_url(),
            api_key: String::new(),
            timeout_secs: default_timeout(),
            hourly_count: default_hourly_count(),
            daily_count: default_daily_count(),
            block_count: default_block_count(),
            fallback_location: FallbackLocationConfig::default(),
        }
    }
}
