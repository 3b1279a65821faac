//! Reverse geocoding handler

use axum::{Json, extract::Query, extract::State};
use serde::Deserialize;
use tracing::instrument;

use application::ports::GeocodeMatch;

use crate::{error::ApiError, state::AppState};

/// Query parameters for reverse geocoding
#[derive(Debug, Deserialize)]
pub struct LocateParams {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// Nearest place name for a coordinate pair
///
/// GET /v1/locate?lat=..&lon=..
///
/// Either coordinate missing yields an empty list rather than an error.
#[instrument(skip(state))]
pub async fn locate(
    State(state): State<AppState>,
    Query(params): Query<LocateParams>,
) -> Result<Json<Vec<GeocodeMatch>>, ApiError> {
    let (Some(lat), Some(lon)) = (params.lat, params.lon) else {
        return Ok(Json(Vec::new()));
    };

    let matches = state.weather.reverse_geocode(lat, lon).await?;
    Ok(Json(matches))
}
