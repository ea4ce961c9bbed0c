use common::http_client::HttpClient;
use common::tracing::init_tracing_pretty;
use dashboard::config::Config;
use dashboard::{Dashboard, DashboardView, GatewayClient, JsonFileStore, Status, WeatherCategory};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

enum Command<'a> {
    Search(&'a str),
    Refresh,
    Recent,
    Pick(&'a str),
    Remove(&'a str),
    Help,
    Quit,
}

fn parse(line: &str) -> Command<'_> {
    let line = line.trim();
    let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();
    match word {
        "search" => Command::Search(rest),
        "refresh" => Command::Refresh,
        "recent" => Command::Recent,
        "pick" => Command::Pick(rest),
        "remove" => Command::Remove(rest),
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Search(line),
    }
}

fn render(view: &DashboardView) {
    match &view.status {
        Status::Idle => {}
        Status::Loading { city } => println!("Loading {city}..."),
        Status::Success => {}
        Status::Failed { message } => println!("Error: {message}"),
    }

    if let Some(current) = &view.current {
        let country = current
            .country
            .as_deref()
            .map(|c| format!(" ({c})"))
            .unwrap_or_default();
        println!(
            "\n{}{} - {} [{}]",
            current.name,
            country,
            current.description,
            WeatherCategory::from_icon_code(&current.icon)
        );
        println!(
            "  {:.0}°C, feels like {:.0}°C, {:.0}°/{:.0}°",
            current.temperature, current.feels_like, current.temp_max, current.temp_min
        );
        println!(
            "  humidity {:.0}%  pressure {:.0} hPa  wind {:.1} m/s",
            current.humidity, current.pressure, current.wind_speed
        );
    }

    if !view.days.is_empty() {
        println!("\n5-Day Forecast");
        for day in &view.days {
            println!(
                "  {}  {:<12} {:>4.0}°C  {:.0}° / {:.0}°  {}",
                day.date.format("%a, %b %-d"),
                day.category().as_str(),
                day.representative.temperature,
                day.temp_max,
                day.temp_min,
                day.representative.description
            );
        }
    }

    if !view.recent.is_empty() {
        println!("\nRecent: {}", view.recent.join(", "));
    }
}

const HELP: &str = "Commands: <city> | search <city> | refresh | recent | pick <city> | remove <city> | quit";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing_pretty();

    let config = Config::from_env();
    let http_client = HttpClient::new(config.gateway_timeout)?;
    let client = GatewayClient::new(http_client, config.gateway_url.clone());
    let store = JsonFileStore::new(config.recent_searches_path.clone());

    info!(gateway = %config.gateway_url, store = %store.path().display(), "Weather dashboard starting");

    let dashboard = Dashboard::new(client, store);
    render(&dashboard.view().await);
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse(&line) {
            Command::Search(city) => {
                dashboard.submit(city).await;
            }
            Command::Refresh => {
                dashboard.refresh().await;
            }
            Command::Recent => {}
            Command::Pick(city) => {
                dashboard.select_recent(city).await;
            }
            Command::Remove(city) => {
                dashboard.remove_recent_search(city).await;
            }
            Command::Help => {
                println!("{HELP}");
                continue;
            }
            Command::Quit => break,
        }
        render(&dashboard.view().await);
    }

    Ok(())
}
