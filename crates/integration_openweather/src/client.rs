//! OpenWeatherMap HTTP client
//!
//! One bounded-timeout reqwest client behind the weather port. Errors are
//! normalized at this boundary: transport failures and non-success HTTP
//! statuses become `Unavailable` tagged with the call kind, and a success
//! response whose embedded `cod` signals failure becomes `NotFound`.

use application::{error::ApplicationError, ports::WeatherPort};
use async_trait::async_trait;
use domain::UnitSystem;
use reqwest::Client;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, instrument};

use crate::models::{
    BlockResponse, CurrentResponse, DailyResponse, GeocodeEntry, HourlyResponse, ProviderStatus,
};

use application::ports::{
    CurrentConditions, DailyForecast, ForecastBlocks, GeocodeMatch, HourlyForecast,
};

/// OpenWeatherMap client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenWeatherConfig {
    /// Data API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Geocoding API base URL
    #[serde(default = "default_geo_base_url")]
    pub geo_base_url: String,

    /// API key passed as the `appid` query parameter
    pub api_key: String,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
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

impl OpenWeatherConfig {
    /// Configuration pointing at the public API with the given key
    #[must_use]
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            base_url: default_base_url(),
            geo_base_url: default_geo_base_url(),
            api_key: api_key.into(),
            timeout_secs: default_timeout(),
        }
    }
}

/// OpenWeatherMap HTTP client
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Client,
    config: OpenWeatherConfig,
}

impl OpenWeatherClient {
    /// Create a client with a bounded request timeout
    pub fn new(config: OpenWeatherConfig) -> Result<Self, ApplicationError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApplicationError::Configuration(format!("http client: {e}")))?;
        Ok(Self { client, config })
    }

    /// Fetch and decode one provider endpoint, normalizing failures
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
        kind: &str,
    ) -> Result<T, ApplicationError> {
        debug!(url, kind, "Provider request");

        let response = self
            .client
            .get(url)
            .query(params)
            .query(&[("appid", self.config.api_key.as_str())])
            .send()
            .await
            .map_err(|e| ApplicationError::Unavailable(format!("{kind}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApplicationError::Unavailable(format!(
                "{kind}: HTTP {status}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ApplicationError::Unavailable(format!("{kind}: decode: {e}")))
    }

    /// Map a failing embedded status to not-found for the queried subject
    fn check_status(cod: &ProviderStatus, subject: String) -> Result<(), ApplicationError> {
        if cod.is_success() {
            Ok(())
        } else {
            Err(ApplicationError::not_found(subject))
        }
    }

    fn coord_subject(lat: f64, lon: f64) -> String {
        format!("{lat:.4},{lon:.4}")
    }
}

#[async_trait]
impl WeatherPort for OpenWeatherClient {
    #[instrument(skip(self))]
    async fn fetch_current(
        &self,
        lat: f64,
        lon: f64,
        units: UnitSystem,
    ) -> Result<CurrentConditions, ApplicationError> {
        let url = format!("{}/weather", self.config.base_url);
        let params = [
            ("lat", lat.to_string()),
            ("lon", lon.to_string()),
            ("units", units.as_provider_param().to_string()),
        ];
        let response: CurrentResponse = self.get_json(&url, &params, "current weather").await?;
        Self::check_status(&response.cod, Self::coord_subject(lat, lon))?;
        Ok(response.into_conditions())
    }

    #[instrument(skip(self))]
    async fn fetch_hourly(
        &self,
        lat: f64,
        lon: f64,
        units: UnitSystem,
        count: u8,
    ) -> Result<HourlyForecast, ApplicationError> {
        let url = format!("{}/forecast/hourly", self.config.base_url);
        let params = [
            ("lat", lat.to_string()),
            ("lon", lon.to_string()),
            ("units", units.as_provider_param().to_string()),
            ("cnt", count.to_string()),
        ];
        let response: HourlyResponse = self.get_json(&url, &params, "hourly forecast").await?;
        Self::check_status(&response.cod, Self::coord_subject(lat, lon))?;
        Ok(response.into_forecast())
    }

    #[instrument(skip(self))]
    async fn fetch_daily(
        &self,
        lat: f64,
        lon: f64,
        units: UnitSystem,
        count: u8,
    ) -> Result<DailyForecast, ApplicationError> {
        let url = format!("{}/forecast/daily", self.config.base_url);
        let params = [
            ("lat", lat.to_string()),
            ("lon", lon.to_string()),
            ("units", units.as_provider_param().to_string()),
            ("cnt", count.to_string()),
        ];
        let response: DailyResponse = self.get_json(&url, &params, "daily forecast").await?;
        Self::check_status(&response.cod, Self::coord_subject(lat, lon))?;
        Ok(response.into_forecast())
    }

    #[instrument(skip(self))]
    async fn fetch_blocks(
        &self,
        lat: f64,
        lon: f64,
        units: UnitSystem,
        count: u8,
    ) -> Result<ForecastBlocks, ApplicationError> {
        let url = format!("{}/forecast", self.config.base_url);
        let params = [
            ("lat", lat.to_string()),
            ("lon", lon.to_string()),
            ("units", units.as_provider_param().to_string()),
            ("cnt", count.to_string()),
        ];
        let response: BlockResponse = self.get_json(&url, &params, "block forecast").await?;
        Self::check_status(&response.cod, Self::coord_subject(lat, lon))?;
        Ok(response.into_blocks())
    }

    #[instrument(skip(self))]
    async fn geocode(&self, place: &str) -> Result<Vec<GeocodeMatch>, ApplicationError> {
        let url = format!("{}/direct", self.config.geo_base_url);
        let params = [("q", place.to_string()), ("limit", "1".to_string())];
        let entries: Vec<GeocodeEntry> = self.get_json(&url, &params, "geocode").await?;
        Ok(entries.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn reverse_geocode(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<Vec<GeocodeMatch>, ApplicationError> {
        let url = format!("{}/reverse", self.config.geo_base_url);
        let params = [
            ("lat", lat.to_string()),
            ("lon", lon.to_string()),
            ("limit", "1".to_string()),
        ];
        let entries: Vec<GeocodeEntry> = self.get_json(&url, &params, "reverse geocode").await?;
        Ok(entries.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = OpenWeatherConfig::with_api_key("key");
        assert_eq!(config.base_url, "https://api.openweathermap.org/data/2.5");
        assert_eq!(config.geo_base_url, "https://api.openweathermap.org/geo/1.0");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: OpenWeatherConfig = serde_json::from_str(r#"{"api_key": "k"}"#).unwrap();
        assert_eq!(config.api_key, "k");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn failing_status_maps_to_not_found() {
        let err = OpenWeatherClient::check_status(
            &ProviderStatus::Text("404".to_string()),
            "51.5000,-0.1000".to_string(),
        )
        .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { .. }));
    }

    #[test]
    fn success_status_passes() {
        assert!(OpenWeatherClient::check_status(&ProviderStatus::Number(200), String::new()).is_ok());
    }

    #[test]
    fn coord_subject_is_stable() {
        assert_eq!(OpenWeatherClient::coord_subject(51.5, -0.1), "51.5000,-0.1000");
    }

    #[test]
    fn client_creation_succeeds() {
        let client = OpenWeatherClient::new(OpenWeatherConfig::with_api_key("k"));
        assert!(client.is_ok());
    }
}
