use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use common::models::{
    ErrorBody, ProviderCity, ProviderCondition, ProviderCurrent, ProviderForecast,
    ProviderForecastItem, ProviderMain, ProviderSys, ProviderWind,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::get_weather,
        handlers::get_forecast,
    ),
    components(schemas(
        ErrorBody,
        ProviderCurrent,
        ProviderForecast,
        ProviderForecastItem,
        ProviderMain,
        ProviderSys,
        ProviderWind,
        ProviderCondition,
        ProviderCity,
    )),
    tags(
        (name = "weather", description = "Weather provider proxy endpoints"),
    ),
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
