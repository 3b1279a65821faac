//! In-memory session store
//!
//! Sessions live for the lifetime of the process. A `parking_lot` lock
//! keeps the hot path synchronous; the async port methods never await
//! while holding it.

use std::collections::HashMap;

use application::{
    error::ApplicationError,
    ports::SessionStorePort,
    session::{SessionId, SessionState},
};
use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

/// Process-local session store keyed by cookie value
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, SessionState>>,
}

impl InMemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live sessions
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}

#[async_trait]
impl SessionStorePort for InMemorySessionStore {
    async fn load(&self, id: &SessionId) -> Result<SessionState, ApplicationError> {
        let state = self
            .sessions
            .read()
            .get(id.as_str())
            .cloned()
            .unwrap_or_default();
        Ok(state)
    }

    async fn save(&self, id: &SessionId, state: SessionState) -> Result<(), ApplicationError> {
        self.sessions
            .write()
            .insert(id.as_str().to_string(), state);
        debug!(session = %id, "Session saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{Location, UnitSystem};

    #[tokio::test]
    async fn unknown_session_loads_defaults() {
        let store = InMemorySessionStore::new();
        let state = store.load(&SessionId::generate()).await.unwrap();
        assert_eq!(state, SessionState::default());
        // A miss does not create a session
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let store = InMemorySessionStore::new();
        let id = SessionId::generate();

        let mut state = SessionState::default();
        state.set_units(UnitSystem::Imperial);
        state.upsert_recent(Location::new("Berlin", 52.52, 13.405).unwrap());
        store.save(&id, state.clone()).await.unwrap();

        let loaded = store.load(&id).await.unwrap();
        assert_eq!(loaded, state);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let store = InMemorySessionStore::new();
        let a = SessionId::generate();
        let b = SessionId::generate();

        let mut state = SessionState::default();
        state.set_units(UnitSystem::Imperial);
        store.save(&a, state).await.unwrap();

        let other = store.load(&b).await.unwrap();
        assert_eq!(other.units(), UnitSystem::Metric);
    }

    #[tokio::test]
    async fn save_overwrites_existing() {
        let store = InMemorySessionStore::new();
        let id = SessionId::generate();

        let mut first = SessionState::default();
        first.set_units(UnitSystem::Imperial);
        store.save(&id, first).await.unwrap();

        store.save(&id, SessionState::default()).await.unwrap();
        let loaded = store.load(&id).await.unwrap();
        assert_eq!(loaded.units(), UnitSystem::Metric);
        assert_eq!(store.len(), 1);
    }
}
