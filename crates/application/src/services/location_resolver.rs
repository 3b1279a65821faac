//! Location resolution
//!
//! Turns request input (optional place name, optional coordinate strings)
//! into a concrete [`Location`], with a fixed precedence: explicit
//! coordinates, then the place name via geocoding, then the session's most
//! recent location, then a built-in fallback. The fallback ships with
//! coordinates so the cold-start path never needs a network call.

use std::sync::Arc;

use domain::Location;
use tracing::{debug, instrument};

use crate::error::ApplicationError;
use crate::ports::WeatherPort;
use crate::session::SessionState;

/// Resolves request input to a location
pub struct LocationResolver {
    weather: Arc<dyn WeatherPort>,
    fallback: Location,
}

impl std::fmt::Debug for LocationResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationResolver")
            .field("fallback", &self.fallback)
            .finish_non_exhaustive()
    }
}

impl LocationResolver {
    /// Create a resolver with a built-in fallback location
    #[must_use]
    pub fn new(weather: Arc<dyn WeatherPort>, fallback: Location) -> Self {
        Self { weather, fallback }
    }

    /// Resolve a location from request input and session state
    ///
    /// Precedence:
    /// 1. Both coordinates supplied and parsable: returned as-is, name and
    ///    session ignored. Coordinates supplied but unparsable (or only one
    ///    of the pair): `InvalidInput`.
    /// 2. Place name: geocoded with limit 1; an empty result is `NotFound`.
    /// 3. The session's most recent location.
    /// 4. The built-in fallback.
    #[instrument(skip(self, session), fields(name, lat, lon))]
    pub async fn resolve(
        &self,
        name: Option<&str>,
        lat: Option<&str>,
        lon: Option<&str>,
        session: &SessionState,
    ) -> Result<Location, ApplicationError> {
        if lat.is_some() || lon.is_some() {
            let (Some(lat), Some(lon)) = (lat, lon) else {
                return Err(ApplicationError::InvalidInput(
                    "both lat and lon are required".to_string(),
                ));
            };
            let lat: f64 = lat.trim().parse().map_err(|_| {
                ApplicationError::InvalidInput(format!("lat is not a number: {lat}"))
            })?;
            let lon: f64 = lon.trim().parse().map_err(|_| {
                ApplicationError::InvalidInput(format!("lon is not a number: {lon}"))
            })?;
            return Location::new(name.unwrap_or_default(), lat, lon)
                .map_err(|e| ApplicationError::InvalidInput(e.to_string()));
        }

        if let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) {
            let matches = self.weather.geocode(name).await?;
            let Some(hit) = matches.first() else {
                return Err(ApplicationError::not_found(name));
            };
            let resolved_name = if hit.name.is_empty() { name } else { &hit.name };
            return Location::new(resolved_name, hit.lat, hit.lon)
                .map_err(|e| ApplicationError::Internal(format!("geocode result: {e}")));
        }

        if let Some(recent) = session.most_recent() {
            debug!(location = %recent, "Resolved from session");
            return Ok(recent.clone());
        }

        debug!(fallback = %self.fallback, "Resolved to built-in fallback");
        Ok(self.fallback.clone())
    }
}
