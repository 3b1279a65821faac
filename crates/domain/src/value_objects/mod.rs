//! Value objects

mod location;
mod unit_system;

pub use location::Location;
pub use unit_system::UnitSystem;
