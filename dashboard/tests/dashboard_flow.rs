use common::http_client::HttpClient;
use common::models::{CurrentConditions, ForecastEntry};
use dashboard::{
    Dashboard, DashboardError, GatewayClient, InMemoryStore, QueryOutcome, Status, WeatherSource,
};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

// 2024-01-01T12:00:00Z
const NOON: i64 = 1_704_110_400;

fn current_body(name: &str) -> Value {
    json!({
        "name": name,
        "sys": { "country": "FR" },
        "main": { "temp": 18.0, "feels_like": 17.0, "temp_min": 16.0, "temp_max": 20.0,
                  "humidity": 60, "pressure": 1014 },
        "wind": { "speed": 3.5 },
        "weather": [{ "icon": "02d", "description": "few clouds" }]
    })
}

fn forecast_body(days: i64) -> Value {
    let list: Vec<Value> = (0..days * 8)
        .map(|i| {
            json!({
                "dt": NOON + i * 3 * 3_600,
                "main": { "temp": 10.0, "temp_min": 5.0 + i as f64, "temp_max": 15.0 + i as f64 },
                "weather": [{ "icon": "10d", "description": "light rain" }]
            })
        })
        .collect();
    json!({ "list": list, "city": { "name": "Paris", "country": "FR" } })
}

async fn mount_city(server: &MockServer, city: &str) {
    Mock::given(method("GET"))
        .and(path("/api/weather"))
        .and(query_param("city", city))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body(city)))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/forecast"))
        .and(query_param("city", city))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(6)))
        .mount(server)
        .await;
}

fn gateway_dashboard(
    server: &MockServer,
    store: InMemoryStore,
) -> Dashboard<GatewayClient, InMemoryStore> {
    let http_client = HttpClient::new(Duration::from_secs(2)).expect("Failed to build client");
    Dashboard::new(GatewayClient::new(http_client, server.uri()), store)
}

#[tokio::test]
async fn test_successful_query_populates_view() {
    let server = MockServer::start().await;
    mount_city(&server, "Paris").await;
    let store = InMemoryStore::new();
    let dashboard = gateway_dashboard(&server, store.clone());

    assert_eq!(dashboard.submit("Paris").await, QueryOutcome::Settled);

    let view = dashboard.view().await;
    assert_eq!(view.status, Status::Success);
    let current = view.current.expect("current conditions");
    assert_eq!(current.name, "Paris");
    assert_eq!(current.country.as_deref(), Some("FR"));
    assert!(view.days.len() <= 5);
    assert!(!view.days.is_empty());
    assert_eq!(view.recent, vec!["Paris".to_string()]);
    assert_eq!(store.snapshot(), vec!["Paris".to_string()]);
}

#[tokio::test]
async fn test_city_not_found_message_reaches_user() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/weather"))
        .and(query_param("city", "Zzzzz"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "city not found" })),
        )
        .mount(&server)
        .await;
    // Current conditions failed, so the forecast must never be requested
    Mock::given(method("GET"))
        .and(path("/api/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(1)))
        .expect(0)
        .mount(&server)
        .await;

    let dashboard = gateway_dashboard(&server, InMemoryStore::new());

    assert_eq!(dashboard.submit("Zzzzz").await, QueryOutcome::Settled);

    let view = dashboard.view().await;
    assert_eq!(view.status.error(), Some("city not found"));
    assert!(view.current.is_none());
    assert!(view.recent.is_empty());
}

#[tokio::test]
async fn test_forecast_failure_discards_partial_result_and_keeps_previous() {
    let server = MockServer::start().await;
    mount_city(&server, "Paris").await;
    Mock::given(method("GET"))
        .and(path("/api/weather"))
        .and(query_param("city", "Rome"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body("Rome")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/forecast"))
        .and(query_param("city", "Rome"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let dashboard = gateway_dashboard(&server, InMemoryStore::new());
    dashboard.submit("Paris").await;
    let before = dashboard.view().await;

    dashboard.submit("Rome").await;

    let view = dashboard.view().await;
    assert_eq!(view.status.error(), Some("Failed to fetch forecast data"));
    assert_eq!(view.current.as_ref().map(|c| c.name.as_str()), Some("Paris"));
    assert_eq!(view.days, before.days);
    assert_eq!(view.recent, vec!["Paris".to_string()]);
}

#[tokio::test]
async fn test_unreachable_gateway_shows_generic_message() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let uri = format!("http://{}", listener.local_addr().expect("No local addr"));
    drop(listener);

    let http_client = HttpClient::new(Duration::from_secs(2)).expect("Failed to build client");
    let dashboard = Dashboard::new(GatewayClient::new(http_client, uri), InMemoryStore::new());

    dashboard.submit("Paris").await;

    let view = dashboard.view().await;
    assert_eq!(
        view.status.error(),
        Some("Something went wrong. Please try again.")
    );
}

#[tokio::test]
async fn test_recent_searches_dedupe_and_cap() {
    let server = MockServer::start().await;
    for city in ["Paris", "paris", "Rome", "Oslo", "Lima", "Kyiv", "Baku"] {
        mount_city(&server, city).await;
    }
    let store = InMemoryStore::new();
    let dashboard = gateway_dashboard(&server, store.clone());

    dashboard.submit("Paris").await;
    dashboard.submit("paris").await;
    assert_eq!(dashboard.view().await.recent, vec!["paris".to_string()]);

    for city in ["Rome", "Oslo", "Lima", "Kyiv", "Baku"] {
        dashboard.submit(city).await;
    }

    let expected: Vec<String> = ["Baku", "Kyiv", "Lima", "Oslo", "Rome"]
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(dashboard.view().await.recent, expected);
    assert_eq!(store.snapshot(), expected);
}

#[tokio::test]
async fn test_refresh_uses_displayed_location_name() {
    let server = MockServer::start().await;
    // The provider normalises "paris" to "Paris"
    Mock::given(method("GET"))
        .and(path("/api/weather"))
        .and(query_param("city", "paris"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body("Paris")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/forecast"))
        .and(query_param("city", "paris"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(1)))
        .mount(&server)
        .await;
    mount_city(&server, "Paris").await;

    let dashboard = gateway_dashboard(&server, InMemoryStore::new());
    assert_eq!(dashboard.refresh().await, QueryOutcome::Ignored);

    dashboard.submit("paris").await;
    assert_eq!(dashboard.refresh().await, QueryOutcome::Settled);

    assert_eq!(dashboard.view().await.recent, vec!["Paris".to_string()]);
}

#[tokio::test]
async fn test_remove_and_select_recent() {
    let server = MockServer::start().await;
    mount_city(&server, "Oslo").await;
    let store = InMemoryStore::with_items(["Oslo", "Lima"]);
    let dashboard = gateway_dashboard(&server, store.clone());

    assert!(dashboard.remove_recent_search("Lima").await);
    assert!(!dashboard.remove_recent_search("Lima").await);
    assert_eq!(store.snapshot(), vec!["Oslo".to_string()]);

    assert_eq!(dashboard.select_recent("Oslo").await, QueryOutcome::Settled);
    assert_eq!(dashboard.view().await.status, Status::Success);
}

#[tokio::test]
async fn test_blank_submission_is_ignored() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dashboard = gateway_dashboard(&server, InMemoryStore::new());

    assert_eq!(dashboard.submit("  ").await, QueryOutcome::Ignored);
    assert_eq!(dashboard.view().await.status, Status::Idle);
}

/// Source whose "Slow" city never answers until released
struct GatedSource {
    gate: Arc<Notify>,
}

fn conditions(name: &str) -> CurrentConditions {
    CurrentConditions {
        name: name.to_string(),
        country: None,
        temperature: 1.0,
        feels_like: 1.0,
        temp_min: 0.0,
        temp_max: 2.0,
        humidity: 80.0,
        pressure: 1000.0,
        wind_speed: 1.0,
        icon: "13d".to_string(),
        description: "snow".to_string(),
    }
}

impl WeatherSource for GatedSource {
    async fn current(&self, city: &str) -> Result<CurrentConditions, DashboardError> {
        if city == "Slow" {
            self.gate.notified().await;
        }
        Ok(conditions(city))
    }

    async fn forecast(&self, _city: &str) -> Result<Vec<ForecastEntry>, DashboardError> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn test_newer_submission_replaces_in_flight_query() {
    let gate = Arc::new(Notify::new());
    let dashboard = Dashboard::new(GatedSource { gate: gate.clone() }, InMemoryStore::new());

    let (slow, fast) = tokio::join!(dashboard.submit("Slow"), async {
        let outcome = dashboard.submit("Fast").await;
        gate.notify_waiters();
        outcome
    });

    assert_eq!(slow, QueryOutcome::Superseded);
    assert_eq!(fast, QueryOutcome::Settled);

    let view = dashboard.view().await;
    assert_eq!(view.status, Status::Success);
    assert_eq!(view.current.map(|c| c.name), Some("Fast".to_string()));
    assert_eq!(view.recent, vec!["Fast".to_string()]);
}
