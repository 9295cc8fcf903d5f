//! Wall-clock and weekday helpers shared by the models.
//!
//! Shift and store times are same-day `HH:MM` strings in the source data.
//! They are parsed into [`NaiveTime`] and compared as minute-of-day values,
//! so no anchor date or timezone is ever involved.

use chrono::{NaiveTime, Timelike, Weekday};

use crate::error::{EngineError, EngineResult};

const CLOCK_FORMAT: &str = "%H:%M";

/// Weekday names in Monday-first order, as used for store hour keys.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Parses a `HH:MM` clock time.
///
/// # Example
///
/// ```
/// use roster_engine::models::parse_clock_time;
/// use chrono::NaiveTime;
///
/// assert_eq!(
///     parse_clock_time("09:30").unwrap(),
///     NaiveTime::from_hms_opt(9, 30, 0).unwrap()
/// );
/// assert!(parse_clock_time("9am").is_err());
/// ```
pub fn parse_clock_time(value: &str) -> EngineResult<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), CLOCK_FORMAT).map_err(|_| EngineError::InvalidTime {
        value: value.to_string(),
    })
}

/// Formats a clock time as `HH:MM`.
pub fn format_clock_time(time: NaiveTime) -> String {
    time.format(CLOCK_FORMAT).to_string()
}

/// Returns the number of whole minutes since midnight.
pub fn minute_of_day(time: NaiveTime) -> i64 {
    i64::from(time.num_seconds_from_midnight() / 60)
}

/// Returns the lowercase name used as a store hours key.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    WEEKDAY_NAMES[weekday.num_days_from_monday() as usize]
}

/// Parses a weekday name, case-insensitively.
///
/// Full names (`"Monday"`) and three-letter abbreviations (`"mon"`) are
/// accepted.
pub fn parse_weekday(value: &str) -> EngineResult<Weekday> {
    value
        .trim()
        .parse::<Weekday>()
        .map_err(|_| EngineError::InvalidWeekday {
            value: value.to_string(),
        })
}

/// Serde adapter for `HH:MM` clock times.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serializes a time as `HH:MM`.
    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_clock_time(*time))
    }

    /// Deserializes a time from `HH:MM`.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_clock_time(&raw).map_err(serde::de::Error::custom)
    }
}
