use common::models::{CurrentConditions, ForecastEntry};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::error::DashboardError;
use crate::forecast::{DaySummary, aggregate};
use crate::recent::{RecentSearches, RecentSearchesStore};

/// Where the session is in its query cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Idle,
    Loading { city: String },
    Success,
    Failed { message: String },
}

impl Status {
    pub fn is_loading(&self) -> bool {
        matches!(self, Status::Loading { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Status::Failed { message } => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Handle for one in-flight query
#[derive(Debug, Clone)]
pub struct QueryTicket {
    generation: u64,
    city: String,
    cancel: CancellationToken,
}

impl QueryTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    /// Resolves once a newer query replaced this one
    pub async fn cancelled(&self) {
        self.cancel.cancelled().await
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Both halves of a successful query cycle
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    pub forecast: Vec<ForecastEntry>,
}

/// Client-side state of the dashboard.
///
/// I/O free: callers obtain a [`QueryTicket`] from [`SessionState::begin`],
/// fetch the data themselves and hand the outcome to [`SessionState::complete`].
/// Only the ticket of the latest generation may settle the session.
pub struct SessionState<R> {
    status: Status,
    report: Option<WeatherReport>,
    recent: RecentSearches,
    store: R,
    generation: u64,
    in_flight: Option<CancellationToken>,
}

impl<R: RecentSearchesStore> SessionState<R> {
    /// Start idle with the history loaded from `store`
    pub fn new(store: R) -> Self {
        let stored = match store.load() {
            Ok(stored) => stored,
            Err(e) => {
                warn!(error = %e, "Failed to load recent searches, starting empty");
                Vec::new()
            }
        };
        let recent = RecentSearches::from_stored(stored);
        debug!(count = recent.len(), "Loaded recent searches");

        Self {
            status: Status::Idle,
            report: None,
            recent,
            store,
            generation: 0,
            in_flight: None,
        }
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn current(&self) -> Option<&CurrentConditions> {
        self.report.as_ref().map(|r| &r.current)
    }

    pub fn forecast(&self) -> Option<&[ForecastEntry]> {
        self.report.as_ref().map(|r| r.forecast.as_slice())
    }

    pub fn recent_searches(&self) -> &[String] {
        self.recent.as_slice()
    }

    /// Aggregated forecast for the displayed report
    pub fn day_summaries(&self) -> Vec<DaySummary> {
        self.forecast().map(aggregate).unwrap_or_default()
    }

    /// Start a query for `city`, trimmed. Blank input is ignored.
    ///
    /// Any in-flight query is cancelled and will be discarded if it still completes.
    pub fn begin(&mut self, city: &str) -> Option<QueryTicket> {
        let city = city.trim();
        if city.is_empty() {
            debug!("Ignoring blank city");
            return None;
        }

        if let Some(previous) = self.in_flight.take() {
            debug!(generation = self.generation, "Replacing in-flight query");
            previous.cancel();
        }

        self.generation += 1;
        let cancel = CancellationToken::new();
        self.in_flight = Some(cancel.clone());
        self.status = Status::Loading {
            city: city.to_string(),
        };

        info!(city = %city, generation = self.generation, "Query started");

        Some(QueryTicket {
            generation: self.generation,
            city: city.to_string(),
            cancel,
        })
    }

    /// Settle the query `ticket` belongs to. Returns `false` when the ticket is
    /// stale and the outcome was dropped.
    pub fn complete(
        &mut self,
        ticket: &QueryTicket,
        outcome: Result<WeatherReport, DashboardError>,
    ) -> bool {
        if ticket.generation != self.generation || ticket.is_cancelled() {
            debug!(
                generation = ticket.generation,
                latest = self.generation,
                "Discarding stale query result"
            );
            return false;
        }
        self.in_flight = None;

        match outcome {
            Ok(report) => {
                info!(
                    city = %ticket.city,
                    location = %report.current.name,
                    entries = report.forecast.len(),
                    "Query succeeded"
                );
                self.report = Some(report);
                self.recent.record(&ticket.city);
                self.persist_recent();
                self.status = Status::Success;
            }
            Err(e) => {
                warn!(city = %ticket.city, error = %e, "Query failed");
                self.status = Status::Failed {
                    message: e.to_string(),
                };
            }
        }
        true
    }

    /// City to re-query on refresh: the displayed location, only after a success
    pub fn refresh_target(&self) -> Option<String> {
        match self.status {
            Status::Success => self.current().map(|c| c.name.clone()),
            _ => None,
        }
    }

    /// Remove `city` (exact match) from the history without touching the status
    pub fn remove_recent_search(&mut self, city: &str) -> bool {
        let removed = self.recent.remove(city);
        if removed {
            self.persist_recent();
        }
        removed
    }

    fn persist_recent(&self) {
        if let Err(e) = self.store.save(self.recent.as_slice()) {
            error!(error = %e, "Failed to persist recent searches");
        }
    }
}
