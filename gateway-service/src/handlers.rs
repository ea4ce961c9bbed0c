use axum::{
    extract::{Query, State},
    response::Json,
};
use common::errors::GatewayError;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;
use utoipa::IntoParams;

use crate::api_client::OpenWeatherClient;

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<OpenWeatherClient>,
}

#[derive(Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CityQuery {
    /// City name, e.g. `London` or `Rio de Janeiro`
    pub city: Option<String>,
}

impl CityQuery {
    /// Build from raw query pairs. A repeated `city` keeps its first value.
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let city = pairs
            .into_iter()
            .find_map(|(key, value)| (key == "city").then_some(value));
        Self { city }
    }

    fn required_city(&self) -> Result<&str, GatewayError> {
        self.city
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or_else(GatewayError::city_required)
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check")
    )
)]
pub async fn health() -> Json<Value> {
    Json(serde_json::json!({ "status": "ok", "service": "gateway-service" }))
}

#[utoipa::path(
    get,
    path = "/api/weather",
    params(CityQuery),
    responses(
        (status = 200, description = "Current conditions from the provider", body = common::models::ProviderCurrent),
        (status = 400, description = "City parameter missing", body = common::models::ErrorBody),
        (status = 500, description = "API key not configured or provider unreachable", body = common::models::ErrorBody)
    ),
    tag = "weather"
)]
pub async fn get_weather(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Value>, GatewayError> {
    let params = CityQuery::from_pairs(pairs);
    let city = params.required_city()?;
    info!(city = %city, "Current weather request received");

    let body = state.client.get_current(city).await?;

    Ok(Json(body))
}

#[utoipa::path(
    get,
    path = "/api/forecast",
    params(CityQuery),
    responses(
        (status = 200, description = "5-day/3-hour forecast from the provider", body = common::models::ProviderForecast),
        (status = 400, description = "City parameter missing", body = common::models::ErrorBody),
        (status = 500, description = "API key not configured or provider unreachable", body = common::models::ErrorBody)
    ),
    tag = "weather"
)]
pub async fn get_forecast(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Value>, GatewayError> {
    let params = CityQuery::from_pairs(pairs);
    let city = params.required_city()?;
    info!(city = %city, "Forecast request received");

    let body = state.client.get_forecast(city).await?;

    Ok(Json(body))
}
