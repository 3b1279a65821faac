//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Latitude or longitude outside the valid range
    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,

    /// Unrecognized unit system name
    #[error("Invalid unit system: {0}. Use 'metric' or 'imperial'")]
    InvalidUnitSystem(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}
