//! Application layer - use cases and orchestration
//!
//! Contains the forecast-assembly pipeline, location resolution, per-client
//! session state, and the port definitions implemented by infrastructure and
//! integration adapters.

pub mod error;
pub mod ports;
pub mod services;
pub mod session;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
pub use session::{SessionId, SessionState, RECENT_CAP};
