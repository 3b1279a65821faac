//! Per-request orchestration
//!
//! Composes unit/location defaults, the three upstream fetches, and the
//! forecast assembler into a single view, and updates session state once at
//! the end of every successful resolution.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use domain::{Location, UnitSystem};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::WeatherPort;
use crate::ports::{DEFAULT_BLOCK_COUNT, DEFAULT_DAILY_COUNT, DEFAULT_HOURLY_COUNT};
use crate::services::forecast::{
    build_current, build_daily, build_hourly, build_outlook, CurrentCard, DailyItem, OutlookItem,
    TimelineItem,
};
use crate::services::location_resolver::LocationResolver;
use crate::session::SessionState;

/// How many entries to request per forecast kind
#[derive(Debug, Clone, Copy)]
pub struct ForecastCounts {
    pub hourly: u8,
    pub daily: u8,
    pub blocks: u8,
}

impl Default for ForecastCounts {
    fn default() -> Self {
        Self {
            hourly: DEFAULT_HOURLY_COUNT,
            daily: DEFAULT_DAILY_COUNT,
            blocks: DEFAULT_BLOCK_COUNT,
        }
    }
}

/// Raw query input for a location view
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViewRequest {
    /// Free-text place name
    pub city: Option<String>,
    /// Latitude as supplied (parsed by the resolver)
    pub lat: Option<String>,
    /// Longitude as supplied
    pub lon: Option<String>,
    /// Unit override; an unrecognized value is ignored
    pub units: Option<String>,
}

/// The assembled view for one location
#[derive(Debug, Clone, Serialize)]
pub struct LocationView {
    pub location: Location,
    pub units: UnitSystem,
    pub current: CurrentCard,
    pub hourly: Vec<TimelineItem>,
    pub daily: Vec<DailyItem>,
}

/// Summary card for one recently viewed location
#[derive(Debug, Clone, Serialize)]
pub struct RecentSummary {
    pub location: Location,
    pub current: CurrentCard,
    pub outlook: Vec<OutlookItem>,
}

/// Orchestrates resolution, fetching, and assembly for incoming requests
pub struct WeatherService {
    weather: Arc<dyn WeatherPort>,
    resolver: LocationResolver,
    counts: ForecastCounts,
}

impl std::fmt::Debug for WeatherService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherService")
            .field("counts", &self.counts)
            .finish_non_exhaustive()
    }
}

impl WeatherService {
    #[must_use]
    pub fn new(
        weather: Arc<dyn WeatherPort>,
        resolver: LocationResolver,
        counts: ForecastCounts,
    ) -> Self {
        Self {
            weather,
            resolver,
            counts,
        }
    }

    /// Build the full view for a request
    ///
    /// Units resolve as query override, then session, then metric. The three
    /// fetches run concurrently and the first failure short-circuits; no
    /// partial view is produced. The session is mutated only after all three
    /// succeed: units stored, resolved location upserted to the front of the
    /// recent list.
    #[instrument(skip(self, session), fields(city = ?request.city))]
    pub async fn location_view(
        &self,
        request: &ViewRequest,
        session: &mut SessionState,
        now: DateTime<Utc>,
    ) -> Result<LocationView, ApplicationError> {
        let units = Self::effective_units(request.units.as_deref(), session);
        let location = self
            .resolver
            .resolve(
                request.city.as_deref(),
                request.lat.as_deref(),
                request.lon.as_deref(),
                session,
            )
            .await?;

        let (lat, lon) = (location.latitude(), location.longitude());
        let (current, hourly, daily) = tokio::try_join!(
            self.weather.fetch_current(lat, lon, units),
            self.weather.fetch_hourly(lat, lon, units, self.counts.hourly),
            self.weather.fetch_daily(lat, lon, units, self.counts.daily),
        )?;

        let view = LocationView {
            current: build_current(&current, units),
            hourly: build_hourly(&hourly, Some(&daily)),
            daily: build_daily(&daily, now),
            location: location.clone(),
            units,
        };

        session.set_units(units);
        session.upsert_recent(location);

        Ok(view)
    }

    /// Summary cards for the session's recent locations
    ///
    /// Each card needs current conditions plus the short block outlook; a
    /// failing entry is skipped rather than failing the whole listing.
    #[instrument(skip(self, session))]
    pub async fn recent_summaries(&self, session: &SessionState) -> Vec<RecentSummary> {
        let units = session.units();
        let mut cards = Vec::with_capacity(session.recent().len());

        for location in session.recent() {
            let (lat, lon) = (location.latitude(), location.longitude());
            let fetched = tokio::try_join!(
                self.weather.fetch_current(lat, lon, units),
                self.weather.fetch_blocks(lat, lon, units, self.counts.blocks),
            );
            match fetched {
                Ok((current, blocks)) => cards.push(RecentSummary {
                    location: location.clone(),
                    current: build_current(&current, units),
                    outlook: build_outlook(&blocks),
                }),
                Err(e) => {
                    warn!(location = %location, error = %e, "Skipping recent location summary");
                },
            }
        }

        cards
    }

    /// Query override when valid, else the session's stored preference
    fn effective_units(requested: Option<&str>, session: &SessionState) -> UnitSystem {
        match requested.map(str::parse::<UnitSystem>) {
            Some(Ok(units)) => units,
            Some(Err(e)) => {
                debug!(error = %e, "Ignoring invalid unit override");
                session.units()
            },
            None => session.units(),
        }
    }
}
