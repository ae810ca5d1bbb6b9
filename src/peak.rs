//! Peak/off-peak classification of tap timestamps.
//!
//! Peak is any weekday time before 21:30. There is no opening-time floor and no
//! holiday calendar.

use crate::error::{PassError, Result};
use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

/// Format of the `Time` column in a card usage export, e.g. `03/14/25 08:05 AM`.
pub const TIMESTAMP_FORMAT: &str = "%m/%d/%y %I:%M %p";

/// Minutes after midnight at which peak pricing ends (21:30).
const PEAK_CLOSE_MINUTES: u32 = 21 * 60 + 30;

/// Parses a card usage timestamp.
pub fn parse_timestamp(text: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text.trim(), TIMESTAMP_FORMAT).map_err(|_| {
        PassError::InvalidTimestamp {
            value: text.to_string(),
        }
    })
}

/// Returns `true` if the timestamp falls in peak pricing hours.
pub fn is_peak(timestamp: &NaiveDateTime) -> bool {
    let weekday = !matches!(timestamp.weekday(), Weekday::Sat | Weekday::Sun);
    let minutes = timestamp.hour() * 60 + timestamp.minute();
    weekday && minutes < PEAK_CLOSE_MINUTES
}

/// Parses then classifies in one step.
pub fn is_peak_str(text: &str) -> Result<bool> {
    parse_timestamp(text).map(|ts| is_peak(&ts))
}
