//! SQLite-backed place reference table

pub mod place_store;

pub use place_store::SqlitePlaceStore;
