//! Application state shared across handlers

use std::sync::Arc;

use application::{
    WeatherService,
    ports::{PlaceSearchPort, SessionStorePort, WeatherPort},
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Forecast orchestration service
    pub weather_service: Arc<WeatherService>,
    /// Local place reference table
    pub place_search: Arc<dyn PlaceSearchPort>,
    /// Per-client session persistence
    pub sessions: Arc<dyn SessionStorePort>,
    /// Direct provider access for reverse geocoding
    pub weather: Arc<dyn WeatherPort>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("weather_service", &self.weather_service)
            .finish_non_exhaustive()
    }
}
