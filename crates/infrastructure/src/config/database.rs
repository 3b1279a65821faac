//! Place reference database configuration.

use serde::{Deserialize, Serialize};

/// SQLite database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the cities database file
    #[serde(default = "default_path")]
    pub path: String,

    /// Maximum pool connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_path() -> String {
    "instance/cities.db".to_string()
}

const fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            max_connections: default_max_connections(),
        }
    }
}
