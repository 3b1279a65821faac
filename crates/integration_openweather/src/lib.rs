//! OpenWeatherMap integration
//!
//! HTTP client for the OpenWeatherMap data and geocoding APIs, plus a
//! caching decorator that fronts the client with per-call-kind TTLs.

pub mod cached;
pub mod client;
pub mod models;

pub use cached::{CachePolicy, CachedWeatherClient};
pub use client::{OpenWeatherClient, OpenWeatherConfig};
