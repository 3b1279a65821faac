//! Domain layer for skycast
//!
//! Core value objects and domain errors for the weather-lookup service.
//! This layer has no I/O dependencies and defines the ubiquitous language.

pub mod errors;
pub mod value_objects;

pub use errors::DomainError;
pub use value_objects::*;
