//! Resolved location value object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// A resolved location: a display name plus validated coordinates
///
/// Two locations are equal when their coordinates are equal; the name is
/// display metadata only. Two spellings that resolve to the same point are
/// the same location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    name: String,
    /// Latitude in degrees (-90 to 90)
    latitude: f64,
    /// Longitude in degrees (-180 to 180)
    longitude: f64,
}

impl Location {
    /// Create a new location with coordinate validation
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinates` if latitude is not in
    /// [-90, 90] or longitude is not in [-180, 180], or either is not finite.
    pub fn new(
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Result<Self, DomainError> {
        if !latitude.is_finite()
            || !longitude.is_finite()
            || !(-90.0..=90.0).contains(&latitude)
            || !(-180.0..=180.0).contains(&longitude)
        {
            return Err(DomainError::InvalidCoordinates);
        }
        Ok(Self {
            name: name.into(),
            latitude,
            longitude,
        })
    }

    /// Create a location without validation (for trusted sources such as
    /// built-in defaults and the local reference table)
    #[must_use]
    pub fn new_unchecked(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }

    /// Get the display name (may be empty for coordinate-only lookups)
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the latitude
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Get the longitude
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Whether this location shares coordinates with another
    #[must_use]
    pub fn same_point(&self, other: &Self) -> bool {
        self.latitude.to_bits() == other.latitude.to_bits()
            && self.longitude.to_bits() == other.longitude.to_bits()
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.same_point(other)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_coordinates() {
        let loc = Location::new("Berlin", 52.52, 13.405).expect("valid coordinates");
        assert_eq!(loc.name(), "Berlin");
        assert!((loc.latitude() - 52.52).abs() < f64::EPSILON);
        assert!((loc.longitude() - 13.405).abs() < f64::EPSILON);
    }

    #[test]
    fn boundary_coordinates() {
        assert!(Location::new("", 90.0, 180.0).is_ok());
        assert!(Location::new("", -90.0, -180.0).is_ok());
        assert!(Location::new("", 0.0, 0.0).is_ok());
    }

    #[test]
    fn invalid_latitude() {
        assert!(Location::new("", 91.0, 0.0).is_err());
        assert!(Location::new("", -91.0, 0.0).is_err());
    }

    #[test]
    fn invalid_longitude() {
        assert!(Location::new("", 0.0, 181.0).is_err());
        assert!(Location::new("", 0.0, -181.0).is_err());
    }

    #[test]
    fn non_finite_rejected() {
        assert!(Location::new("", f64::NAN, 0.0).is_err());
        assert!(Location::new("", 0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn equality_ignores_name() {
        let a = Location::new("New York", 40.71, -74.01).expect("valid");
        let b = Location::new("NYC", 40.71, -74.01).expect("valid");
        assert_eq!(a, b);
    }

    #[test]
    fn equality_compares_coordinates() {
        let a = Location::new("A", 40.71, -74.01).expect("valid");
        let b = Location::new("A", 40.72, -74.01).expect("valid");
        assert_ne!(a, b);
    }

    #[test]
    fn display_uses_name_when_present() {
        let loc = Location::new("London", 51.5074, -0.1278).expect("valid");
        assert_eq!(loc.to_string(), "London");
    }

    #[test]
    fn display_falls_back_to_coordinates() {
        let loc = Location::new("", 51.5074, -0.1278).expect("valid");
        assert!(loc.to_string().contains("51.5074"));
    }

    #[test]
    fn serialization_round_trip() {
        let loc = Location::new("Berlin", 52.52, 13.405).expect("valid");
        let json = serde_json::to_string(&loc).expect("serialize");
        let back: Location = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(loc, back);
        assert_eq!(back.name(), "Berlin");
    }
}
