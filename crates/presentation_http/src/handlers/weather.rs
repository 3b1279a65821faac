//! Weather view handlers
//!
//! The main location view and the recent-locations summary. Session state
//! is loaded once per request and written back after the view succeeds;
//! the cookie rides along on every response so fresh clients get one.

use axum::{Json, extract::Query, extract::State};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use tracing::instrument;

use application::{LocationView, RecentSummary, ViewRequest};

use crate::{
    error::ApiError,
    session::{extract_session, with_session_cookie},
    state::AppState,
};

/// Render the weather view for a requested or remembered location
///
/// GET /v1/weather?city=..&lat=..&lon=..&units=..
#[instrument(skip(state, jar), fields(city = ?request.city))]
pub async fn location_view(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(request): Query<ViewRequest>,
) -> Result<(CookieJar, Json<LocationView>), ApiError> {
    let id = extract_session(&jar);
    let mut session = state.sessions.load(&id).await?;

    let view = state
        .weather_service
        .location_view(&request, &mut session, Utc::now())
        .await?;

    state.sessions.save(&id, session).await?;
    Ok((with_session_cookie(jar, &id), Json(view)))
}

/// Summary cards for the session's recently viewed locations
///
/// GET /v1/weather/recent
#[instrument(skip(state, jar))]
pub async fn recent(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<Vec<RecentSummary>>), ApiError> {
    let id = extract_session(&jar);
    let session = state.sessions.load(&id).await?;

    let cards = state.weather_service.recent_summaries(&session).await;
    Ok((with_session_cookie(jar, &id), Json(cards)))
}
