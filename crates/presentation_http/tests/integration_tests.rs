//! Integration tests for HTTP handlers
#![allow(clippy::expect_used)]

use std::sync::Arc;

use application::{
    ForecastCounts, LocationResolver, WeatherService,
    error::ApplicationError,
    ports::{
        BlockEntry, CurrentConditions, DailyEntry, DailyForecast, ForecastBlocks, GeocodeMatch,
        HourlyEntry, HourlyForecast, PlaceMatch, PlaceSearchPort, SessionStorePort, WeatherPort,
    },
};
use async_trait::async_trait;
use axum_test::TestServer;
use domain::{Location, UnitSystem};
use infrastructure::InMemorySessionStore;
use presentation_http::{routes::create_router, state::AppState};

/// Payload timestamps track real time so relative day labels line up
fn base_ts() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Canned weather provider for testing
struct StubWeather {
    available: bool,
    geocode_hit: bool,
}

impl StubWeather {
    fn new() -> Self {
        Self {
            available: true,
            geocode_hit: true,
        }
    }

    fn unavailable() -> Self {
        Self {
            available: false,
            geocode_hit: true,
        }
    }

    fn no_geocode_match() -> Self {
        Self {
            available: true,
            geocode_hit: false,
        }
    }

    fn check(&self, kind: &str) -> Result<(), ApplicationError> {
        if self.available {
            Ok(())
        } else {
            Err(ApplicationError::Unavailable(format!("{kind}: down")))
        }
    }
}

#[async_trait]
impl WeatherPort for StubWeather {
    async fn fetch_current(
        &self,
        _lat: f64,
        _lon: f64,
        _units: UnitSystem,
    ) -> Result<CurrentConditions, ApplicationError> {
        self.check("current weather")?;
        Ok(CurrentConditions {
            dt: base_ts(),
            timezone_offset: 7200,
            place_name: "Bulawayo".to_string(),
            temp: 24.6,
            feels_like: 25.2,
            temp_min: 18.4,
            temp_max: 27.5,
            description: "clear sky".to_string(),
            icon: "01d".to_string(),
            wind_speed: 3.5,
            humidity: 48,
            cloud_cover: 10,
            visibility_m: Some(10_000.0),
            rain_1h: None,
        })
    }

    async fn fetch_hourly(
        &self,
        _lat: f64,
        _lon: f64,
        _units: UnitSystem,
        count: u8,
    ) -> Result<HourlyForecast, ApplicationError> {
        self.check("hourly forecast")?;
        Ok(HourlyForecast {
            timezone_offset: 7200,
            hours: (0..i64::from(count))
                .map(|i| HourlyEntry {
                    dt: base_ts() + i * 3600,
                    feels_like: 20.0,
                    icon: "01d".to_string(),
                })
                .collect(),
        })
    }

    async fn fetch_daily(
        &self,
        _lat: f64,
        _lon: f64,
        _units: UnitSystem,
        count: u8,
    ) -> Result<DailyForecast, ApplicationError> {
        self.check("daily forecast")?;
        Ok(DailyForecast {
            timezone_offset: 7200,
            days: (0..i64::from(count))
                .map(|i| DailyEntry {
                    dt: base_ts() + i * 86_400,
                    sunrise: base_ts() + i * 86_400 + 3600,
                    sunset: base_ts() + i * 86_400 + 12 * 3600,
                    temp_min: 15.0,
                    temp_max: 25.0,
                    icon: "02d".to_string(),
                    description: "Clouds".to_string(),
                })
                .collect(),
        })
    }

    async fn fetch_blocks(
        &self,
        _lat: f64,
        _lon: f64,
        _units: UnitSystem,
        count: u8,
    ) -> Result<ForecastBlocks, ApplicationError> {
        self.check("block forecast")?;
        Ok(ForecastBlocks {
            timezone_offset: 7200,
            blocks: (0..i64::from(count))
                .map(|i| BlockEntry {
                    dt: base_ts() + i * 3 * 3600,
                    temp: 20.0,
                    icon: "01d".to_string(),
                })
                .collect(),
        })
    }

    async fn geocode(&self, place: &str) -> Result<Vec<GeocodeMatch>, ApplicationError> {
        self.check("geocode")?;
        if !self.geocode_hit {
            return Ok(Vec::new());
        }
        Ok(vec![GeocodeMatch {
            name: place.to_string(),
            lat: -20.15,
            lon: 28.5833,
            country: Some("ZW".to_string()),
            state: None,
        }])
    }

    async fn reverse_geocode(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<Vec<GeocodeMatch>, ApplicationError> {
        self.check("reverse geocode")?;
        Ok(vec![GeocodeMatch {
            name: "Bulawayo".to_string(),
            lat,
            lon,
            country: Some("ZW".to_string()),
            state: None,
        }])
    }
}

/// Canned place table for testing
struct StubPlaces {
    healthy: bool,
}

#[async_trait]
impl PlaceSearchPort for StubPlaces {
    async fn search(&self, prefix: &str, limit: u8) -> Result<Vec<PlaceMatch>, ApplicationError> {
        if !self.healthy {
            return Err(ApplicationError::Internal("database: gone".to_string()));
        }
        if prefix.trim().is_empty() {
            return Ok(Vec::new());
        }
        let all = [
            PlaceMatch {
                name: "London".to_string(),
                lat: 51.5074,
                lon: -0.1278,
                subdivision: Some("England".to_string()),
                country: "United Kingdom".to_string(),
            },
            PlaceMatch {
                name: "Long Beach".to_string(),
                lat: 33.7701,
                lon: -118.1937,
                subdivision: Some("California".to_string()),
                country: "United States".to_string(),
            },
        ];
        Ok(all
            .into_iter()
            .filter(|p| p.name.starts_with(prefix))
            .take(usize::from(limit))
            .collect())
    }
}

fn create_state(weather: StubWeather, places: StubPlaces) -> AppState {
    let weather: Arc<dyn WeatherPort> = Arc::new(weather);
    let resolver = LocationResolver::new(
        Arc::clone(&weather),
        Location::new("Bulawayo", -20.15, 28.5833).expect("valid fallback"),
    );
    let weather_service = Arc::new(WeatherService::new(
        Arc::clone(&weather),
        resolver,
        ForecastCounts::default(),
    ));
    let sessions: Arc<dyn SessionStorePort> = Arc::new(InMemorySessionStore::new());
    AppState {
        weather_service,
        place_search: Arc::new(places),
        sessions,
        weather,
    }
}

fn create_test_server() -> TestServer {
    let state = create_state(StubWeather::new(), StubPlaces { healthy: true });
    let mut server = TestServer::new(create_router(state)).expect("Failed to create test server");
    server.save_cookies();
    server
}

// ============ Health Endpoint Tests ============

#[tokio::test]
async fn health_endpoint_returns_ok() {
    let server = create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn readiness_endpoint_reports_database() {
    let server = create_test_server();

    let response = server.get("/ready").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["ready"], true);
    assert_eq!(body["database"]["healthy"], true);
}

#[tokio::test]
async fn readiness_endpoint_unavailable_when_database_down() {
    let state = create_state(StubWeather::new(), StubPlaces { healthy: false });
    let server = TestServer::new(create_router(state)).expect("Failed to create test server");

    let response = server.get("/ready").await;

    response.assert_status_service_unavailable();
    let body: serde_json::Value = response.json();
    assert_eq!(body["ready"], false);
}

// ============ Weather View Tests ============

#[tokio::test]
async fn weather_view_by_coordinates() {
    let server = create_test_server();

    let response = server
        .get("/v1/weather")
        .add_query_param("lat", "-20.15")
        .add_query_param("lon", "28.5833")
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["units"], "metric");
    assert_eq!(body["current"]["place"], "Bulawayo");
    assert_eq!(body["daily"][0]["day"], "Today");
    assert!(body["hourly"].as_array().expect("hourly array").len() >= 24);
}

#[tokio::test]
async fn weather_view_sets_session_cookie() {
    let server = create_test_server();

    let response = server
        .get("/v1/weather")
        .add_query_param("city", "Bulawayo")
        .await;

    response.assert_status_ok();
    assert!(response.cookie("skycast_session").value().len() > 10);
}

#[tokio::test]
async fn weather_view_defaults_to_fallback_location() {
    let server = create_test_server();

    let response = server.get("/v1/weather").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["location"]["name"], "Bulawayo");
}

#[tokio::test]
async fn weather_view_unknown_city_is_not_found() {
    let state = create_state(StubWeather::no_geocode_match(), StubPlaces { healthy: true });
    let server = TestServer::new(create_router(state)).expect("Failed to create test server");

    let response = server
        .get("/v1/weather")
        .add_query_param("city", "Atlantis")
        .await;

    response.assert_status_not_found();
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "not_found");
}

#[tokio::test]
async fn weather_view_provider_down_is_service_unavailable() {
    let state = create_state(StubWeather::unavailable(), StubPlaces { healthy: true });
    let server = TestServer::new(create_router(state)).expect("Failed to create test server");

    let response = server
        .get("/v1/weather")
        .add_query_param("lat", "1.0")
        .add_query_param("lon", "2.0")
        .await;

    response.assert_status_service_unavailable();
}

#[tokio::test]
async fn weather_view_bad_coordinates_is_bad_request() {
    let server = create_test_server();

    let response = server
        .get("/v1/weather")
        .add_query_param("lat", "not-a-number")
        .add_query_param("lon", "2.0")
        .await;

    response.assert_status_bad_request();
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "bad_request");
}

#[tokio::test]
async fn weather_responses_are_never_cacheable() {
    let server = create_test_server();

    let response = server.get("/v1/weather").await;

    response.assert_status_ok();
    assert_eq!(
        response.headers().get("cache-control").expect("header"),
        "no-cache, no-store, must-revalidate"
    );
    assert_eq!(response.headers().get("pragma").expect("header"), "no-cache");
}

// ============ Recent Locations Tests ============

#[tokio::test]
async fn recent_is_empty_for_fresh_session() {
    let server = create_test_server();

    let response = server.get("/v1/weather/recent").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body.as_array().expect("array").len(), 0);
}

#[tokio::test]
async fn viewed_location_appears_in_recent() {
    let server = create_test_server();

    server
        .get("/v1/weather")
        .add_query_param("city", "Bulawayo")
        .await
        .assert_status_ok();

    let response = server.get("/v1/weather/recent").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let cards = body.as_array().expect("array");
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0]["location"]["name"], "Bulawayo");
    assert_eq!(cards[0]["outlook"].as_array().expect("outlook").len(), 5);
}

#[tokio::test]
async fn unit_preference_persists_across_requests() {
    let server = create_test_server();

    server
        .get("/v1/weather")
        .add_query_param("city", "Bulawayo")
        .add_query_param("units", "imperial")
        .await
        .assert_status_ok();

    // No override on the second request, the stored preference applies
    let response = server.get("/v1/weather").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["units"], "imperial");
}

// ============ Place Search Tests ============

#[tokio::test]
async fn cities_endpoint_returns_matches() {
    let server = create_test_server();

    let response = server
        .get("/v1/cities")
        .add_query_param("city", "Lon")
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let matches = body.as_array().expect("array");
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0]["name"], "London");
    assert_eq!(matches[0]["country"], "United Kingdom");
}

#[tokio::test]
async fn cities_endpoint_empty_prefix_returns_empty() {
    let server = create_test_server();

    let response = server.get("/v1/cities").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body.as_array().expect("array").len(), 0);
}

#[tokio::test]
async fn cities_endpoint_respects_limit() {
    let server = create_test_server();

    let response = server
        .get("/v1/cities")
        .add_query_param("city", "Lon")
        .add_query_param("limit", "1")
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body.as_array().expect("array").len(), 1);
}

// ============ Locate Tests ============

#[tokio::test]
async fn locate_returns_nearest_place() {
    let server = create_test_server();

    let response = server
        .get("/v1/locate")
        .add_query_param("lat", "-20.15")
        .add_query_param("lon", "28.5833")
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body[0]["name"], "Bulawayo");
}

#[tokio::test]
async fn locate_without_coordinates_returns_empty() {
    let server = create_test_server();

    let response = server.get("/v1/locate").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body.as_array().expect("array").len(), 0);
}
