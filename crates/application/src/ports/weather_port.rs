//! Weather provider port
//!
//! Defines the interface to the upstream weather/geocoding provider and the
//! normalized payload shapes the assembler consumes. Payloads are read-only
//! once fetched; each carries the location's UTC-offset in seconds so local
//! wall time can be derived without a timezone database.

use async_trait::async_trait;
use domain::UnitSystem;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Default number of hourly entries requested
pub const DEFAULT_HOURLY_COUNT: u8 = 24;
/// Default number of daily entries requested
pub const DEFAULT_DAILY_COUNT: u8 = 7;
/// Default number of 3-hour forecast blocks requested (summary cards)
pub const DEFAULT_BLOCK_COUNT: u8 = 5;

/// Current conditions payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Observation time, Unix epoch seconds (UTC)
    pub dt: i64,
    /// Location UTC offset in seconds
    pub timezone_offset: i32,
    /// Place name as reported by the provider
    pub place_name: String,
    /// Temperature in the requested units
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    /// Short condition description, provider casing (e.g. "clear sky")
    pub description: String,
    /// Provider icon code (e.g. "01d")
    pub icon: String,
    /// Wind speed: m/s for metric, mph for imperial
    pub wind_speed: f64,
    /// Relative humidity percent
    pub humidity: u8,
    /// Cloud cover percent
    pub cloud_cover: u8,
    /// Visibility in meters, when reported
    pub visibility_m: Option<f64>,
    /// Rain volume over the last hour: mm for metric, inches for imperial
    pub rain_1h: Option<f64>,
}

/// One hourly forecast record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyEntry {
    /// Forecast hour, Unix epoch seconds (UTC)
    pub dt: i64,
    pub feels_like: f64,
    /// Provider icon code
    pub icon: String,
}

/// Hourly forecast payload, entries in provider (chronological) order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyForecast {
    /// Location UTC offset in seconds
    pub timezone_offset: i32,
    pub hours: Vec<HourlyEntry>,
}

/// One daily forecast record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyEntry {
    /// Forecast day reference time, Unix epoch seconds (UTC)
    pub dt: i64,
    /// Sunrise, Unix epoch seconds (UTC)
    pub sunrise: i64,
    /// Sunset, Unix epoch seconds (UTC)
    pub sunset: i64,
    pub temp_min: f64,
    pub temp_max: f64,
    /// Provider icon code
    pub icon: String,
    /// Condition group (e.g. "Clouds"), used as the day's description
    pub description: String,
}

/// Daily forecast payload, entries in provider (chronological) order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    /// Location UTC offset in seconds
    pub timezone_offset: i32,
    pub days: Vec<DailyEntry>,
}

/// One 3-hour forecast block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockEntry {
    /// Block start, Unix epoch seconds (UTC)
    pub dt: i64,
    pub temp: f64,
    /// Provider icon code
    pub icon: String,
}

/// 3-hour-block forecast payload (short outlook for summary cards)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastBlocks {
    /// Location UTC offset in seconds
    pub timezone_offset: i32,
    pub blocks: Vec<BlockEntry>,
}

/// One geocoding candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeMatch {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub country: Option<String>,
    pub state: Option<String>,
}

/// Port for the upstream weather/geocoding provider
///
/// All operations are idempotent reads with a bounded timeout. Errors are
/// normalized: transport/status failures become `Unavailable`, a provider
/// response whose embedded status signals failure becomes `NotFound` with
/// the query as subject. No retries happen at this layer.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherPort: Send + Sync {
    /// Current conditions by coordinates
    async fn fetch_current(
        &self,
        lat: f64,
        lon: f64,
        units: UnitSystem,
    ) -> Result<CurrentConditions, ApplicationError>;

    /// Hourly forecast by coordinates
    async fn fetch_hourly(
        &self,
        lat: f64,
        lon: f64,
        units: UnitSystem,
        count: u8,
    ) -> Result<HourlyForecast, ApplicationError>;

    /// Daily forecast by coordinates
    async fn fetch_daily(
        &self,
        lat: f64,
        lon: f64,
        units: UnitSystem,
        count: u8,
    ) -> Result<DailyForecast, ApplicationError>;

    /// 3-hour-block forecast by coordinates
    async fn fetch_blocks(
        &self,
        lat: f64,
        lon: f64,
        units: UnitSystem,
        count: u8,
    ) -> Result<ForecastBlocks, ApplicationError>;

    /// Coordinates by place name; at most one match is requested, an empty
    /// result means "not found" to the resolver
    async fn geocode(&self, place: &str) -> Result<Vec<GeocodeMatch>, ApplicationError>;

    /// Nearest place name by coordinates
    async fn reverse_geocode(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<Vec<GeocodeMatch>, ApplicationError>;
}
