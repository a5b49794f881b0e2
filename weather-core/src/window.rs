//! Extraction of the upcoming hourly entries from a forecast payload.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::model::{HourEntry, WeatherPayload};

pub const DEFAULT_WINDOW_HOURS: usize = 8;

/// What to do when the window reaches the end of the first forecast day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayBoundary {
    /// Stop at the last hour of the first day; the window gets shorter late in the day.
    #[default]
    Truncate,
    /// Keep going with the leading hours of the following days.
    Continue,
}

/// Prefix of the hour entry the window starts at: `now + 1h`, as `YYYY-MM-DD HH:00`.
pub fn target_hour(now: NaiveDateTime) -> String {
    (now + Duration::hours(1)).format("%Y-%m-%d %H:00").to_string()
}

/// Up to [`DEFAULT_WINDOW_HOURS`] entries of the first forecast day, starting at the next hour.
pub fn next_8_hours(payload: Option<&WeatherPayload>, now: NaiveDateTime) -> Vec<HourEntry> {
    next_hours(payload, now, DEFAULT_WINDOW_HOURS, DayBoundary::Truncate)
}

/// Up to `len` consecutive hourly entries starting at the hour after `now`.
///
/// Entries are assumed sorted ascending by time. A payload without a matching
/// hour yields an empty window; that is logged, not reported as an error.
pub fn next_hours(
    payload: Option<&WeatherPayload>,
    now: NaiveDateTime,
    len: usize,
    boundary: DayBoundary,
) -> Vec<HourEntry> {
    let Some(payload) = payload else {
        return Vec::new();
    };

    let hours = candidate_hours(payload, boundary);
    let target = target_hour(now);

    let Some(start) = hours.iter().position(|h| h.time.starts_with(&target)) else {
        warn!(%target, location = %payload.location.name, "current hour not found in forecast data");
        return Vec::new();
    };

    hours[start..].iter().take(len).map(|h| (*h).clone()).collect()
}

fn candidate_hours(payload: &WeatherPayload, boundary: DayBoundary) -> Vec<&HourEntry> {
    match boundary {
        DayBoundary::Truncate => payload
            .today()
            .map(|day| day.hour.iter().collect())
            .unwrap_or_default(),
        DayBoundary::Continue => payload
            .forecast
            .forecastday
            .iter()
            .flat_map(|day| day.hour.iter())
            .collect(),
    }
}
