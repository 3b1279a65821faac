//! Place search port
//!
//! Prefix search over the local city/country reference table backing the
//! autocomplete endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Default result count when the caller supplies no limit
pub const DEFAULT_SEARCH_LIMIT: u8 = 10;
/// Smallest accepted caller-supplied limit
pub const MIN_SEARCH_LIMIT: u8 = 1;
/// Largest accepted caller-supplied limit
pub const MAX_SEARCH_LIMIT: u8 = 20;

/// One row of the reference table, country code already resolved to a name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceMatch {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    /// Administrative subdivision (state/province), when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subdivision: Option<String>,
    pub country: String,
}

/// Clamp a caller-supplied limit to the accepted range, defaulting to
/// [`DEFAULT_SEARCH_LIMIT`] when absent
#[must_use]
pub fn clamp_search_limit(requested: Option<u8>) -> u8 {
    requested.map_or(DEFAULT_SEARCH_LIMIT, |l| {
        l.clamp(MIN_SEARCH_LIMIT, MAX_SEARCH_LIMIT)
    })
}

/// Port for the read-only place reference table
#[async_trait]
pub trait PlaceSearchPort: Send + Sync {
    /// Names starting with `prefix`, ordered by name length then
    /// lexicographically. An empty prefix yields an empty result, not all
    /// rows. `limit` is taken as already clamped.
    async fn search(&self, prefix: &str, limit: u8) -> Result<Vec<PlaceMatch>, ApplicationError>;
}
