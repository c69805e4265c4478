//! Date window calculation for period-over-period comparison.

use super::MetricsError;

use chrono::{Days, NaiveDate};
use serde::Serialize;

/// An inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    #[serde(rename = "startDate")]
    pub start: NaiveDate,
    #[serde(rename = "endDate")]
    pub end: NaiveDate,
}

impl DateWindow {
    /// Number of days covered, counting both endpoints.
    pub fn len_days(&self) -> u32 {
        (self.end - self.start).num_days() as u32 + 1
    }
}

/// The current reporting window and the preceding window of equal length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WindowPair {
    pub current: DateWindow,
    pub previous: DateWindow,
}

/// Compute the current and previous reporting windows.
///
/// The current window is the `window_days` days ending at `as_of`
/// inclusive; the previous window is the `window_days` days immediately
/// before it. `as_of` is expected to already account for the upstream
/// reporting lag.
pub fn compute_windows(as_of: NaiveDate, window_days: u32) -> Result<WindowPair, MetricsError> {
    if window_days < 1 {
        return Err(MetricsError::InvalidArgument(
            "window length must be at least 1 day".to_string(),
        ));
    }

    let span = Days::new(window_days as u64 - 1);

    let current_end = as_of;
    let current_start = current_end
        .checked_sub_days(span)
        .ok_or_else(|| out_of_range(as_of))?;

    let previous_end = current_start
        .checked_sub_days(Days::new(1))
        .ok_or_else(|| out_of_range(as_of))?;
    let previous_start = previous_end
        .checked_sub_days(span)
        .ok_or_else(|| out_of_range(as_of))?;

    Ok(WindowPair {
        current: DateWindow {
            start: current_start,
            end: current_end,
        },
        previous: DateWindow {
            start: previous_start,
            end: previous_end,
        },
    })
}

fn out_of_range(as_of: NaiveDate) -> MetricsError {
    MetricsError::InvalidArgument(format!("window extends past the calendar range from {}", as_of))
}
