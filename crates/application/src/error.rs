//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
///
/// The three user-facing variants mirror the failure modes of the pipeline:
/// malformed input, an unmatched place, and an unreachable provider.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Malformed request input (e.g. unparsable coordinates)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The queried place or coordinates yielded no provider match
    #[error("Not found: {subject}")]
    NotFound { subject: String },

    /// Transport failure, non-success status, or timeout from the provider
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Create a not-found error for a queried subject
    pub fn not_found(subject: impl Into<String>) -> Self {
        Self::NotFound {
            subject: subject.into(),
        }
    }
}
