//! Environment-driven settings, read once at boot. `main` loads `.env`
//! via dotenvy first, so local development can keep keys out of the shell.

use std::time::Duration;

pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_OMDB_API_KEY: &str = "OMDB_API_KEY";
pub const ENV_OMDB_TIMEOUT_SECS: &str = "OMDB_TIMEOUT_SECS";
pub const ENV_HISTORY_CAPACITY: &str = "HISTORY_CAPACITY";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_OMDB_TIMEOUT_SECS: u64 = 10;
const DEFAULT_HISTORY_CAPACITY: usize = 2000;

#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_addr: String,
    /// Absent key disables the OMDb provider; the engine endpoints still work.
    pub omdb_api_key: Option<String>,
    pub omdb_timeout: Duration,
    pub history_capacity: usize,
}

impl Settings {
    pub fn from_env() -> Self {
        let bind_addr =
            std::env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let omdb_api_key = std::env::var(ENV_OMDB_API_KEY)
            .ok()
            .filter(|k| !k.trim().is_empty());

        let omdb_timeout = std::env::var(ENV_OMDB_TIMEOUT_SECS)
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_OMDB_TIMEOUT_SECS));

        let history_capacity = std::env::var(ENV_HISTORY_CAPACITY)
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_HISTORY_CAPACITY);

        Self {
            bind_addr,
            omdb_api_key,
            omdb_timeout,
            history_capacity,
        }
    }
}
