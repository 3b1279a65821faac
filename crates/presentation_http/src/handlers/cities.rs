//! Place search handler

use axum::{Json, extract::Query, extract::State};
use serde::Deserialize;
use tracing::instrument;

use application::ports::{PlaceMatch, clamp_search_limit};

use crate::{error::ApiError, state::AppState};

/// Query parameters for place search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Name prefix to match
    pub city: Option<String>,
    /// Result cap, clamped to 1..=20 (default 10)
    pub limit: Option<u8>,
}

/// Prefix search against the local reference table
///
/// GET /v1/cities?city=..&limit=..
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<PlaceMatch>>, ApiError> {
    let prefix = params.city.unwrap_or_default();
    let limit = clamp_search_limit(params.limit);
    let matches = state.place_search.search(&prefix, limit).await?;
    Ok(Json(matches))
}
