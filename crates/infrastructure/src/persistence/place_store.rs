//! Prefix search over the local cities database using sqlx
//!
//! The database is a read-only reference built offline: a `cities` table
//! (name, subdivision, country code, coordinates) and a `countries` table
//! mapping ISO codes to display names. Search matches names starting with
//! the given prefix and ranks shorter names first.

use std::str::FromStr;

use application::{
    error::ApplicationError,
    ports::{PlaceMatch, PlaceSearchPort},
};
use async_trait::async_trait;
use sqlx::{
    Row, SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
};
use tracing::{debug, info, instrument};

use crate::config::DatabaseConfig;

/// SQLite adapter for the place search port
#[derive(Debug, Clone)]
pub struct SqlitePlaceStore {
    pool: SqlitePool,
}

impl SqlitePlaceStore {
    /// Open a pool against the configured database file
    #[instrument(skip_all, fields(path = %config.path))]
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, ApplicationError> {
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", config.path))
            .map_err(|e| ApplicationError::Configuration(format!("database url: {e}")))?
            .create_if_missing(true)
            .read_only(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await
            .map_err(|e| ApplicationError::Configuration(format!("database connect: {e}")))?;

        sqlx::query("PRAGMA busy_timeout=5000")
            .execute(&pool)
            .await
            .map_err(|e| ApplicationError::Internal(format!("database pragma: {e}")))?;

        info!(max_connections = config.max_connections, "Place database pool created");
        Ok(Self { pool })
    }

    /// In-memory store for tests
    pub async fn in_memory() -> Result<Self, ApplicationError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| ApplicationError::Internal(format!("database connect: {e}")))?;
        Ok(Self { pool })
    }

    /// Create the reference tables if the database is empty.
    ///
    /// A production database ships pre-built; this only matters for fresh
    /// files and test databases.
    pub async fn ensure_schema(&self) -> Result<(), ApplicationError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS countries (
                code TEXT PRIMARY KEY,
                name TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(internal)?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS cities (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                state TEXT,
                country TEXT NOT NULL,
                lat REAL NOT NULL,
                lon REAL NOT NULL
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(internal)?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_cities_name ON cities(name)")
            .execute(&self.pool)
            .await
            .map_err(internal)?;

        debug!("Place schema ensured");
        Ok(())
    }

    /// Underlying pool, for seeding in tests
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn internal(e: sqlx::Error) -> ApplicationError {
    ApplicationError::Internal(format!("database: {e}"))
}

/// Escape LIKE wildcards so a literal `%` or `_` in the prefix matches
/// itself instead of acting as a pattern.
fn escape_like(prefix: &str) -> String {
    let mut escaped = String::with_capacity(prefix.len());
    for c in prefix.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn row_to_match(row: &SqliteRow) -> PlaceMatch {
    PlaceMatch {
        name: row.get("name"),
        lat: row.get("lat"),
        lon: row.get("lon"),
        subdivision: row
            .get::<Option<String>, _>("state")
            .filter(|s| !s.is_empty()),
        country: row.get("country_name"),
    }
}

#[async_trait]
impl PlaceSearchPort for SqlitePlaceStore {
    #[instrument(skip(self), fields(limit))]
    async fn search(&self, prefix: &str, limit: u8) -> Result<Vec<PlaceMatch>, ApplicationError> {
        let prefix = prefix.trim();
        if prefix.is_empty() {
            return Ok(Vec::new());
        }

        let pattern = format!("{}%", escape_like(prefix));
        let rows = sqlx::query(
            "SELECT c.name, c.state, c.lat, c.lon, \
                    COALESCE(co.name, c.country) AS country_name \
             FROM cities c \
             LEFT JOIN countries co ON co.code = c.country \
             WHERE c.name LIKE $1 ESCAPE '\\' \
             ORDER BY length(c.name), c.name \
             LIMIT $2",
        )
        .bind(&pattern)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(internal)?;

        debug!(matches = rows.len(), "Place search completed");
        Ok(rows.iter().map(row_to_match).collect())
    }
}
