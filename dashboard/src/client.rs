use common::http_client::HttpClient;
use common::models::{CurrentConditions, ForecastEntry, ProviderCurrent, ProviderForecast};
use std::future::Future;
use tracing::instrument;

use crate::error::DashboardError;

/// Where the dashboard gets its data from
pub trait WeatherSource: Send + Sync {
    fn current(
        &self,
        city: &str,
    ) -> impl Future<Output = Result<CurrentConditions, DashboardError>> + Send;

    fn forecast(
        &self,
        city: &str,
    ) -> impl Future<Output = Result<Vec<ForecastEntry>, DashboardError>> + Send;
}

/// Talks to the gateway's `/api/weather` and `/api/forecast` endpoints
#[derive(Debug, Clone)]
pub struct GatewayClient {
    http_client: HttpClient,
    base_url: String,
}

impl GatewayClient {
    pub fn new(http_client: HttpClient, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, resource: &str, city: &str) -> String {
        format!(
            "{}/api/{}?city={}",
            self.base_url,
            resource,
            urlencoding::encode(city)
        )
    }
}

impl WeatherSource for GatewayClient {
    #[instrument(skip(self), fields(city = %city))]
    async fn current(&self, city: &str) -> Result<CurrentConditions, DashboardError> {
        let raw: ProviderCurrent = self
            .http_client
            .get_json(&self.url("weather", city), &[])
            .await
            .map_err(|e| DashboardError::from_fetch(e, "Failed to fetch weather data"))?;

        Ok(raw.into())
    }

    #[instrument(skip(self), fields(city = %city))]
    async fn forecast(&self, city: &str) -> Result<Vec<ForecastEntry>, DashboardError> {
        let raw: ProviderForecast = self
            .http_client
            .get_json(&self.url("forecast", city), &[])
            .await
            .map_err(|e| DashboardError::from_fetch(e, "Failed to fetch forecast data"))?;

        Ok(raw.into())
    }
}
