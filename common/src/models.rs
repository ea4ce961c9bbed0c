use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Icon code assumed when the provider sends no condition block
pub const DEFAULT_ICON: &str = "01d";

/// Error body returned by the proxy endpoints
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct ErrorBody {
    pub message: String,
}

/// OpenWeatherMap `weather` response, relayed verbatim by the gateway
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct ProviderCurrent {
    pub name: String,
    #[serde(default)]
    pub sys: Option<ProviderSys>,
    pub main: ProviderMain,
    #[serde(default)]
    pub wind: Option<ProviderWind>,
    #[serde(default)]
    pub weather: Vec<ProviderCondition>,
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct ProviderSys {
    #[serde(default)]
    pub country: Option<String>,
}

/// Temperatures in °C, humidity in %, pressure in hPa
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct ProviderMain {
    pub temp: f64,
    #[serde(default)]
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    #[serde(default)]
    pub humidity: f64,
    #[serde(default)]
    pub pressure: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct ProviderWind {
    pub speed: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct ProviderCondition {
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub description: String,
}

/// OpenWeatherMap 5-day/3-hour `forecast` response
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct ProviderForecast {
    pub list: Vec<ProviderForecastItem>,
    #[serde(default)]
    pub city: Option<ProviderCity>,
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct ProviderForecastItem {
    pub dt: i64,
    pub main: ProviderMain,
    #[serde(default)]
    pub weather: Vec<ProviderCondition>,
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct ProviderCity {
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
}

/// Present-moment snapshot for a location
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CurrentConditions {
    pub name: String,
    pub country: Option<String>,
    pub temperature: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub wind_speed: f64,
    pub icon: String,
    pub description: String,
}

/// One 3-hour interval of the forecast feed
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastEntry {
    pub timestamp: i64,
    pub temperature: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub icon: String,
    pub description: String,
}

fn first_condition(conditions: Vec<ProviderCondition>) -> (String, String) {
    match conditions.into_iter().next() {
        Some(c) if !c.icon.is_empty() => (c.icon, c.description),
        Some(c) => (DEFAULT_ICON.to_string(), c.description),
        None => (DEFAULT_ICON.to_string(), String::new()),
    }
}

impl From<ProviderCurrent> for CurrentConditions {
    fn from(raw: ProviderCurrent) -> Self {
        let (icon, description) = first_condition(raw.weather);
        Self {
            name: raw.name,
            country: raw.sys.and_then(|s| s.country),
            temperature: raw.main.temp,
            feels_like: raw.main.feels_like,
            temp_min: raw.main.temp_min,
            temp_max: raw.main.temp_max,
            humidity: raw.main.humidity,
            pressure: raw.main.pressure,
            wind_speed: raw.wind.map(|w| w.speed).unwrap_or_default(),
            icon,
            description,
        }
    }
}

impl From<ProviderForecastItem> for ForecastEntry {
    fn from(raw: ProviderForecastItem) -> Self {
        let (icon, description) = first_condition(raw.weather);
        Self {
            timestamp: raw.dt,
            temperature: raw.main.temp,
            temp_min: raw.main.temp_min,
            temp_max: raw.main.temp_max,
            icon,
            description,
        }
    }
}

impl From<ProviderForecast> for Vec<ForecastEntry> {
    fn from(raw: ProviderForecast) -> Self {
        raw.list.into_iter().map(ForecastEntry::from).collect()
    }
}
