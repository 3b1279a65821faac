//! Session store port

use async_trait::async_trait;

use crate::error::ApplicationError;
use crate::session::{SessionId, SessionState};

/// Port for persisting per-client session state
///
/// A session is created empty on first load and never explicitly destroyed;
/// expiry belongs to the store implementation. One writer per client session
/// is assumed.
#[async_trait]
pub trait SessionStorePort: Send + Sync {
    /// Load the state for a session, empty defaults if the id is unknown
    async fn load(&self, id: &SessionId) -> Result<SessionState, ApplicationError>;

    /// Persist the state for a session
    async fn save(&self, id: &SessionId, state: SessionState) -> Result<(), ApplicationError>;
}
