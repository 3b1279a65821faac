//! HTTP request handlers

pub mod cities;
pub mod health;
pub mod locate;
pub mod weather;
