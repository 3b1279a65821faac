//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `weather`: upstream provider endpoints, credentials, request counts
//! - `cache`: per-call-kind cache validity
//! - `database`: SQLite place reference table

mod cache;
mod database;
mod server;
mod weather;

use serde::{Deserialize, Serialize};

pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use server::ServerConfig;
pub use weather::{FallbackLocationConfig, WeatherConfig};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream weather provider configuration
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Cache validity configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Place reference database configuration
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (optional) and `SKYCAST_*`
    /// environment variables, over built-in defaults
    ///
    /// # Errors
    ///
    /// Returns an error if a source is malformed or deserialization fails.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            // e.g. SKYCAST_WEATHER_API_KEY
            .add_source(
                config::Environment::with_prefix("SKYCAST")
                    .separator("_")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
