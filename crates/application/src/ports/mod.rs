//! Port definitions
//!
//! Interfaces implemented by infrastructure and integration adapters.

pub mod cache_port;
pub mod place_search_port;
pub mod session_store;
pub mod weather_port;

pub use cache_port::{CachePort, CachePortExt};
pub use place_search_port::{clamp_search_limit, PlaceMatch, PlaceSearchPort, DEFAULT_SEARCH_LIMIT};
pub use session_store::SessionStorePort;
pub use weather_port::{
    BlockEntry, CurrentConditions, DailyEntry, DailyForecast, ForecastBlocks, GeocodeMatch,
    HourlyEntry, HourlyForecast, WeatherPort, DEFAULT_BLOCK_COUNT, DEFAULT_DAILY_COUNT,
    DEFAULT_HOURLY_COUNT,
};

#[cfg(test)]
pub use weather_port::MockWeatherPort;
