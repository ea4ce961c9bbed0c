use common::http_client::HttpClient;
use common::tracing::{init_tracing, init_tracing_pretty};
use gateway_service::api_client::OpenWeatherClient;
use gateway_service::config::Config;
use gateway_service::{AppState, router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();

    if config.log_json {
        init_tracing();
    } else {
        init_tracing_pretty();
    }

    if config.api_key.is_none() {
        warn!("OPENWEATHERMAP_API_KEY is not set; proxy requests will fail");
    }

    let http_client = HttpClient::new(config.upstream_timeout)?;
    let client = Arc::new(OpenWeatherClient::new(
        http_client,
        config.openweather_url.clone(),
        config.api_key.clone(),
    ));

    let app = router(AppState { client });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Gateway service starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Gateway service stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT, starting graceful shutdown...");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown...");
        },
    }

    warn!("Shutting down gracefully...");
}
