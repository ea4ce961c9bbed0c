use std::env;
use std::time::Duration;

pub struct Config {
    pub port: u16,
    pub api_key: Option<String>,
    pub openweather_url: String,
    pub upstream_timeout: Duration,
    pub log_json: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            // A missing key is reported per request, not at startup
            api_key: env::var("OPENWEATHERMAP_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            openweather_url: env::var("OPENWEATHERMAP_URL")
                .unwrap_or_else(|_| "https://api.openweathermap.org/data/2.5".to_string()),
            upstream_timeout: Duration::from_secs(
                env::var("UPSTREAM_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            ),
            log_json: env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")),
        }
    }
}
