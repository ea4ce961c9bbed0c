use common::errors::GatewayError;
use common::http_client::{FetchError, HttpClient};
use serde_json::Value;
use tracing::{error, info, instrument, warn};

/// The two provider resources the gateway proxies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Current,
    Forecast,
}

impl Endpoint {
    fn provider_path(self) -> &'static str {
        match self {
            Endpoint::Current => "weather",
            Endpoint::Forecast => "forecast",
        }
    }

    /// Message returned when the provider gives no usable one
    pub fn generic_message(self) -> &'static str {
        match self {
            Endpoint::Current => "Failed to fetch weather data",
            Endpoint::Forecast => "Failed to fetch forecast data",
        }
    }
}

pub struct OpenWeatherClient {
    http_client: HttpClient,
    base_url: String,
    api_key: Option<String>,
}

impl OpenWeatherClient {
    pub fn new(http_client: HttpClient, base_url: String, api_key: Option<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    pub async fn get_current(&self, city: &str) -> Result<Value, GatewayError> {
        self.fetch(Endpoint::Current, city).await
    }

    pub async fn get_forecast(&self, city: &str) -> Result<Value, GatewayError> {
        self.fetch(Endpoint::Forecast, city).await
    }

    /// Relay one provider document for `city` in metric units.
    ///
    /// `city` must already be validated as non-blank.
    #[instrument(skip(self), fields(city = %city, endpoint = ?endpoint))]
    async fn fetch(&self, endpoint: Endpoint, city: &str) -> Result<Value, GatewayError> {
        let Some(api_key) = self.api_key.as_deref() else {
            error!("OPENWEATHERMAP_API_KEY is not configured");
            return Err(GatewayError::Configuration);
        };

        info!(city = %city, "Fetching from provider");

        let url = format!("{}/{}", self.base_url, endpoint.provider_path());
        let query = [("q", city), ("units", "metric"), ("appid", api_key)];

        match self.http_client.get_json::<Value>(&url, &query).await {
            Ok(body) => Ok(body),
            Err(FetchError::Status { status, message }) => {
                warn!(city = %city, status, message = ?message, "Provider rejected request");
                Err(GatewayError::upstream(
                    status,
                    message.unwrap_or_else(|| endpoint.generic_message().to_string()),
                ))
            }
            Err(e) => {
                error!(city = %city, error = %e, "Provider request failed");
                Err(GatewayError::transport(endpoint.generic_message()))
            }
        }
    }
}
