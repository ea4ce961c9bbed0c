use common::models::CurrentConditions;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use crate::client::WeatherSource;
use crate::error::DashboardError;
use crate::forecast::DaySummary;
use crate::recent::RecentSearchesStore;
use crate::session::{SessionState, Status, WeatherReport};

/// How a submitted query ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Blank input, nothing happened
    Ignored,
    /// The session moved to `Success` or `Failed`
    Settled,
    /// A newer query replaced this one before it finished
    Superseded,
}

/// Everything the presentation layer needs to draw one frame
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub status: Status,
    pub current: Option<CurrentConditions>,
    pub days: Vec<DaySummary>,
    pub recent: Vec<String>,
}

/// Drives a [`SessionState`] against a [`WeatherSource`].
///
/// The session lock is never held across a network call, so a new
/// submission can replace one still in flight.
pub struct Dashboard<S, R> {
    source: S,
    session: Mutex<SessionState<R>>,
}

impl<S, R> Dashboard<S, R>
where
    S: WeatherSource,
    R: RecentSearchesStore,
{
    pub fn new(source: S, store: R) -> Self {
        Self {
            source,
            session: Mutex::new(SessionState::new(store)),
        }
    }

    #[instrument(skip(self))]
    pub async fn submit(&self, city: &str) -> QueryOutcome {
        let ticket = self.session.lock().await.begin(city);
        let Some(ticket) = ticket else {
            return QueryOutcome::Ignored;
        };

        let outcome = tokio::select! {
            _ = ticket.cancelled() => {
                debug!(generation = ticket.generation(), "Query superseded");
                return QueryOutcome::Superseded;
            }
            outcome = self.fetch(ticket.city()) => outcome,
        };

        if self.session.lock().await.complete(&ticket, outcome) {
            QueryOutcome::Settled
        } else {
            QueryOutcome::Superseded
        }
    }

    /// Re-query the displayed location. Ignored unless the last query succeeded.
    pub async fn refresh(&self) -> QueryOutcome {
        let target = self.session.lock().await.refresh_target();
        match target {
            Some(city) => self.submit(&city).await,
            None => QueryOutcome::Ignored,
        }
    }

    /// Query a city picked from the recent-search list
    pub async fn select_recent(&self, city: &str) -> QueryOutcome {
        self.submit(city).await
    }

    pub async fn remove_recent_search(&self, city: &str) -> bool {
        self.session.lock().await.remove_recent_search(city)
    }

    pub async fn view(&self) -> DashboardView {
        let session = self.session.lock().await;
        DashboardView {
            status: session.status().clone(),
            current: session.current().cloned(),
            days: session.day_summaries(),
            recent: session.recent_searches().to_vec(),
        }
    }

    /// Current conditions first; the forecast is only requested when they succeed
    async fn fetch(&self, city: &str) -> Result<WeatherReport, DashboardError> {
        let current = self.source.current(city).await?;
        let forecast = self.source.forecast(city).await?;
        Ok(WeatherReport { current, forecast })
    }
}
