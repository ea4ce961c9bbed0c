use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub struct Config {
    pub gateway_url: String,
    pub recent_searches_path: PathBuf,
    pub gateway_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            gateway_url: env::var("GATEWAY_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            recent_searches_path: env::var("RECENT_SEARCHES_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".weather-dashboard/recent_searches.json")),
            gateway_timeout: Duration::from_secs(
                env::var("GATEWAY_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            ),
        }
    }
}
