//! Store model and weekly opening hours.

use std::collections::BTreeMap;

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serialize};

use super::clock::{WEEKDAY_NAMES, parse_clock_time};

/// Opening hours for a single weekday.
///
/// Both values are `HH:MM` strings as entered in the store form. An empty
/// value means the store is closed that day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHours {
    /// Opening time, or empty.
    #[serde(default)]
    pub open: String,
    /// Closing time, or empty.
    #[serde(default)]
    pub close: String,
}

impl DayHours {
    /// Creates opening hours from two `HH:MM` strings.
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }

    /// Returns true when both values are empty.
    pub fn is_closed(&self) -> bool {
        self.open.trim().is_empty() && self.close.trim().is_empty()
    }

    /// Parses the hours into an `(open, close)` pair.
    ///
    /// Returns `Ok(None)` for a closed day and `Err` with a reason when the
    /// hours are half-filled, unparseable, or do not open before they close.
    pub fn parse(&self) -> Result<Option<(NaiveTime, NaiveTime)>, String> {
        if self.is_closed() {
            return Ok(None);
        }
        if self.open.trim().is_empty() || self.close.trim().is_empty() {
            return Err("only one of open/close is set".to_string());
        }
        let open = parse_clock_time(&self.open).map_err(|e| e.to_string())?;
        let close = parse_clock_time(&self.close).map_err(|e| e.to_string())?;
        if open >= close {
            return Err(format!("opens at {} but closes at {}", self.open, self.close));
        }
        Ok(Some((open, close)))
    }
}

/// Represents a store that shifts are worked at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    /// Unique identifier for the store.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-form location.
    #[serde(default)]
    pub location: String,
    /// Opening hours keyed by lowercase weekday name (`"monday"`..`"sunday"`).
    /// Keys are lowercased when deserialized.
    #[serde(default, deserialize_with = "deserialize_hours")]
    pub hours: BTreeMap<String, DayHours>,
}

/// Trims and lowercases weekday keys. On a collision the later key wins.
pub(crate) fn normalize_hours<I>(hours: I) -> BTreeMap<String, DayHours>
where
    I: IntoIterator<Item = (String, DayHours)>,
{
    hours
        .into_iter()
        .map(|(day, hours)| (day.trim().to_lowercase(), hours))
        .collect()
}

fn deserialize_hours<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<String, DayHours>, D::Error> {
    let raw = BTreeMap::<String, DayHours>::deserialize(deserializer)?;
    Ok(normalize_hours(raw))
}

impl Store {
    /// Returns the hours for a weekday key, matched case-insensitively on
    /// both sides.
    pub fn hours_for(&self, weekday_name: &str) -> Option<&DayHours> {
        let key = weekday_name.trim().to_lowercase();
        self.hours.get(&key).or_else(|| {
            self.hours
                .iter()
                .find(|(day, _)| day.trim().eq_ignore_ascii_case(&key))
                .map(|(_, hours)| hours)
        })
    }

    /// Checks every weekday entry and returns `(weekday, reason)` for each
    /// one that is unusable, in Monday-first order.
    ///
    /// Keys that are not weekday names are reported too.
    pub fn validate_hours(&self) -> Vec<(String, String)> {
        let mut problems: Vec<(String, String)> = WEEKDAY_NAMES
            .iter()
            .filter_map(|day| {
                let hours = self.hours_for(day)?;
                hours.parse().err().map(|reason| (day.to_string(), reason))
            })
            .collect();

        problems.extend(
            self.hours
                .keys()
                .filter(|key| !WEEKDAY_NAMES.contains(&key.trim().to_lowercase().as_str()))
                .map(|key| (key.clone(), "not a weekday name".to_string())),
        );

        problems
    }
}
