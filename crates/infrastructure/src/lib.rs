//! Infrastructure layer - adapters for external systems
//!
//! Implements the ports defined in the application layer: the in-memory
//! cache, the SQLite place reference table, the session store, and
//! configuration loading.

pub mod cache;
pub mod config;
pub mod persistence;
pub mod session;

pub use cache::{MokaCache, MokaCacheConfig};
pub use config::{
    AppConfig, CacheConfig, DatabaseConfig, FallbackLocationConfig, ServerConfig, WeatherConfig,
};
pub use persistence::SqlitePlaceStore;
pub use session::InMemorySessionStore;
