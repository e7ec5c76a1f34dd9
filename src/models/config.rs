//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// JSON or CSV file imported when the catalog starts empty.
    #[serde(default)]
    pub seed_file: Option<String>,
}
