//! Client side of the weather dashboard: the query session, the persisted
//! recent-search history and the day-by-day forecast aggregation.

pub mod category;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod forecast;
pub mod recent;
pub mod session;

pub use category::WeatherCategory;
pub use client::{GatewayClient, WeatherSource};
pub use dashboard::{Dashboard, DashboardView, QueryOutcome};
pub use error::DashboardError;
pub use forecast::{DaySummary, aggregate, aggregate_in};
pub use recent::{InMemoryStore, JsonFileStore, RecentSearches, RecentSearchesStore};
pub use session::{SessionState, Status};
