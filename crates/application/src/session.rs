//! Per-client session state
//!
//! Holds the unit preference and a small most-recent-first list of viewed
//! locations. The state is loaded once at the start of a request and written
//! back once at the end; no hidden mutation from deep in the call graph.

use domain::{Location, UnitSystem};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Maximum number of recent locations kept per session
pub const RECENT_CAP: usize = 5;

/// Opaque per-client session identifier (cookie value)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh random session id
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap an existing cookie value
    #[must_use]
    pub fn from_cookie(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw cookie value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mutable per-client state: unit preference plus recently viewed locations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default)]
    units: UnitSystem,
    #[serde(default)]
    recent: Vec<Location>,
}

impl SessionState {
    /// The stored unit preference (metric by default)
    #[must_use]
    pub const fn units(&self) -> UnitSystem {
        self.units
    }

    /// Overwrite the unit preference
    pub fn set_units(&mut self, units: UnitSystem) {
        self.units = units;
    }

    /// Record a viewed location at the front of the recent list
    ///
    /// Any existing entry with the same coordinates is removed first, so a
    /// location appears at most once. The list is truncated to `RECENT_CAP`
    /// entries, most recent first.
    pub fn upsert_recent(&mut self, location: Location) {
        self.recent.retain(|l| !l.same_point(&location));
        self.recent.insert(0, location);
        self.recent.truncate(RECENT_CAP);
    }

    /// The most recently viewed location, if any
    #[must_use]
    pub fn most_recent(&self) -> Option<&Location> {
        self.recent.first()
    }

    /// All recent locations, most recent first
    #[must_use]
    pub fn recent(&self) -> &[Location] {
        &self.recent
    }
}
