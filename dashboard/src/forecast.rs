use chrono::{Local, NaiveDate, TimeZone};
use common::models::ForecastEntry;
use serde::Serialize;

use crate::category::WeatherCategory;

/// Maximum number of days shown in the forecast strip
pub const MAX_DAYS: usize = 5;

/// One calendar day of forecast entries boiled down to a single card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub representative: ForecastEntry,
    pub temp_min: f64,
    pub temp_max: f64,
}

impl DaySummary {
    pub fn category(&self) -> WeatherCategory {
        WeatherCategory::from_icon_code(&self.representative.icon)
    }
}

/// Group entries by local calendar date. See [`aggregate_in`].
pub fn aggregate(entries: &[ForecastEntry]) -> Vec<DaySummary> {
    aggregate_in(entries, &Local)
}

/// Group 3-hour entries into at most [`MAX_DAYS`] day summaries.
///
/// Days keep the order in which they first appear in `entries`. The
/// representative of a day is its entry at index `len / 2`; min and max come
/// from every entry's own bounds.
pub fn aggregate_in<Tz: TimeZone>(entries: &[ForecastEntry], tz: &Tz) -> Vec<DaySummary> {
    let mut days: Vec<(NaiveDate, Vec<&ForecastEntry>)> = Vec::new();

    for entry in entries {
        let Some(at) = tz.timestamp_opt(entry.timestamp, 0).earliest() else {
            continue;
        };
        let date = at.date_naive();

        match days.iter_mut().find(|(d, _)| *d == date) {
            Some((_, group)) => group.push(entry),
            None => days.push((date, vec![entry])),
        }
    }

    days.into_iter()
        .take(MAX_DAYS)
        .map(|(date, group)| summarize(date, &group))
        .collect()
}

fn summarize(date: NaiveDate, group: &[&ForecastEntry]) -> DaySummary {
    let representative = group[group.len() / 2].clone();
    let temp_min = group.iter().map(|e| e.temp_min).fold(f64::INFINITY, f64::min);
    let temp_max = group
        .iter()
        .map(|e| e.temp_max)
        .fold(f64::NEG_INFINITY, f64::max);

    DaySummary {
        date,
        representative,
        temp_min,
        temp_max,
    }
}
