//! Skycast HTTP Server
//!
//! Main entry point for the HTTP API server.

use std::{sync::Arc, time::Duration};

use application::{ForecastCounts, LocationResolver, WeatherService, ports::WeatherPort};
use domain::Location;
use infrastructure::{AppConfig, InMemorySessionStore, MokaCache, MokaCacheConfig, SqlitePlaceStore};
use integration_openweather::{CachePolicy, CachedWeatherClient, OpenWeatherClient, OpenWeatherConfig};
use presentation_http::{routes, state::AppState};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skycast_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Skycast v{} starting...", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });

    info!(
        host = %config.server.host,
        port = %config.server.port,
        database = %config.database.path,
        "Configuration loaded"
    );

    // Provider client behind the per-kind TTL cache
    let provider = OpenWeatherClient::new(OpenWeatherConfig {
        base_url: config.weather.base_url.clone(),
        geo_base_url: config.weather.geo_base_url.clone(),
        api_key: config.weather.api_key.clone(),
        timeout_secs: config.weather.timeout_secs,
    })
    .map_err(|e| anyhow::anyhow!("Failed to initialize weather client: {e}"))?;

    let cache = Arc::new(MokaCache::with_config(MokaCacheConfig {
        max_capacity_mb: config.cache.max_capacity_mb,
    }));

    let policy = CachePolicy {
        current: Duration::from_secs(config.cache.current_secs),
        hourly: Duration::from_secs(config.cache.hourly_secs),
        daily: Duration::from_secs(config.cache.daily_secs),
        blocks: Duration::from_secs(config.cache.blocks_secs),
        geocode: Duration::from_secs(config.cache.geocode_secs),
    };

    let weather: Arc<dyn WeatherPort> =
        Arc::new(CachedWeatherClient::new(Arc::new(provider), cache, policy));

    // Location resolution with the built-in fallback
    let fallback = Location::new(
        config.weather.fallback_location.name.clone(),
        config.weather.fallback_location.latitude,
        config.weather.fallback_location.longitude,
    )
    .map_err(|e| anyhow::anyhow!("Invalid fallback location: {e}"))?;

    let resolver = LocationResolver::new(Arc::clone(&weather), fallback);
    let counts = ForecastCounts {
        hourly: config.weather.hourly_count,
        daily: config.weather.daily_count,
        blocks: config.weather.block_count,
    };
    let weather_service = Arc::new(WeatherService::new(
        Arc::clone(&weather),
        resolver,
        counts,
    ));

    // Place reference table
    let place_store = SqlitePlaceStore::connect(&config.database)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to open place database: {e}"))?;
    place_store
        .ensure_schema()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to prepare place database: {e}"))?;

    let state = AppState {
        weather_service,
        place_search: Arc::new(place_store),
        sessions: Arc::new(InMemorySessionStore::new()),
        weather,
    };

    // Build router
    let app = routes::create_router(state);

    // Configure CORS layer
    let cors_layer = if config.server.allowed_origins.is_empty() {
        // Development mode: allow all origins
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production mode: restrict to configured origins
        use axum::http::{HeaderValue, Method};
        let origins: Vec<HeaderValue> = config
            .server
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET])
            .allow_headers(Any)
    };

    let app = app.layer(TraceLayer::new_for_http()).layer(cors_layer);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;

    info!("Server listening on http://{}", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM) and handle graceful shutdown
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }

    info!("Waiting up to {:?} for connections to close...", timeout);
}
