//! Default shift times derived from a store's opening hours.

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::{Store, format_clock_time, parse_clock_time, weekday_name};

/// Pre-filled start and end times for a new shift.
///
/// Both fields are `HH:MM` strings, or both are empty when the store has no
/// usable hours for the day. The strings feed straight into a time input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultTimes {
    /// Suggested start, or empty.
    pub start_time: String,
    /// Suggested end, or empty.
    pub end_time: String,
}

impl DefaultTimes {
    /// Returns true when no default is available.
    pub fn is_empty(&self) -> bool {
        self.start_time.is_empty() && self.end_time.is_empty()
    }

    /// Returns the parsed `(start, end)` pair when both times are present.
    pub fn resolved(&self) -> Option<(NaiveTime, NaiveTime)> {
        let start = parse_clock_time(&self.start_time).ok()?;
        let end = parse_clock_time(&self.end_time).ok()?;
        Some((start, end))
    }
}

/// Returns the store's opening and closing time for `weekday_name`.
///
/// The weekday is matched case-insensitively. A day with no entry, an empty
/// entry or unusable hours (half-filled, unparseable, or closing before
/// opening) gives empty times.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use roster_engine::models::{DayHours, Store};
/// use roster_engine::scheduling::default_times_for;
///
/// let mut hours = BTreeMap::new();
/// hours.insert("monday".to_string(), DayHours::new("08:00", "16:00"));
/// let store = Store {
///     id: "store_a".to_string(),
///     name: "Downtown".to_string(),
///     location: String::new(),
///     hours,
/// };
///
/// let monday = default_times_for(&store, "Monday");
/// assert_eq!(monday.start_time, "08:00");
/// assert_eq!(monday.end_time, "16:00");
/// assert!(default_times_for(&store, "sunday").is_empty());
/// ```
pub fn default_times_for(store: &Store, weekday_name: &str) -> DefaultTimes {
    let Some(hours) = store.hours_for(weekday_name) else {
        return DefaultTimes::default();
    };
    match hours.parse() {
        Ok(Some((open, close))) => DefaultTimes {
            start_time: format_clock_time(open),
            end_time: format_clock_time(close),
        },
        Ok(None) | Err(_) => DefaultTimes::default(),
    }
}

/// Same as [`default_times_for`], with the weekday taken from `date`.
pub fn default_times_for_date(store: &Store, date: NaiveDate) -> DefaultTimes {
    default_times_for(store, weekday_name(date.weekday()))
}
