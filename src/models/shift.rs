//! Shift model and related types.
//!
//! This module defines the Shift struct and ShiftKind enum for representing
//! scheduled work on a store's calendar.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::clock::{format_clock_time, hhmm, minute_of_day};
use super::issue::DataIssue;

/// Which calendar a shift belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftKind {
    /// A shift on the in-store employee calendar.
    #[default]
    Employee,
    /// A shift on the driver calendar.
    Driver,
}

/// Represents a same-day work shift.
///
/// Times are wall-clock `HH:MM` values on `date`. Shifts never wrap past
/// midnight; a shift whose end is not after its start is kept for display
/// but counts for zero hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    /// Unique identifier for the shift.
    pub id: String,
    /// The person working the shift. May reference a deleted person.
    pub person_id: String,
    /// The store the shift is worked at. May reference a deleted store.
    pub store_id: String,
    /// The date of the shift.
    pub date: NaiveDate,
    /// The start time of the shift.
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    /// The end time of the shift.
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    /// Employee or driver calendar.
    #[serde(default)]
    pub kind: ShiftKind,
}

impl Shift {
    /// Returns true when the shift ends after it starts.
    pub fn has_valid_time_range(&self) -> bool {
        self.end_time > self.start_time
    }

    /// Returns the worked minutes, or `None` when the time range is invalid.
    pub fn worked_minutes(&self) -> Option<i64> {
        if !self.has_valid_time_range() {
            return None;
        }
        Some(minute_of_day(self.end_time) - minute_of_day(self.start_time))
    }

    /// Calculates the worked hours for the shift.
    ///
    /// Hours are derived from minute-of-day subtraction. An invalid time
    /// range yields zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use roster_engine::models::{Shift, ShiftKind};
    /// use chrono::{NaiveDate, NaiveTime};
    /// use rust_decimal::Decimal;
    ///
    /// let shift = Shift {
    ///     id: "shift_001".to_string(),
    ///     person_id: "emp_001".to_string(),
    ///     store_id: "store_a".to_string(),
    ///     date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
    ///     start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
    ///     end_time: NaiveTime::from_hms_opt(17, 30, 0).unwrap(),
    ///     kind: ShiftKind::Employee,
    /// };
    /// assert_eq!(shift.worked_hours(), Decimal::new(85, 1)); // 8.5 hours
    /// ```
    pub fn worked_hours(&self) -> Decimal {
        let minutes = self.worked_minutes().unwrap_or(0);
        Decimal::from(minutes) / Decimal::from(60)
    }

    /// Returns an [`DataIssue::InvalidTimeRange`] when the shift does not end
    /// after it starts.
    pub fn time_range_issue(&self) -> Option<DataIssue> {
        if self.has_valid_time_range() {
            return None;
        }
        Some(DataIssue::InvalidTimeRange {
            shift_id: self.id.clone(),
            date: self.date,
            start_time: format_clock_time(self.start_time),
            end_time: format_clock_time(self.end_time),
        })
    }

    /// Returns the day of the week for the shift.
    pub fn day_of_week(&self) -> Weekday {
        self.date.weekday()
    }

    /// Returns a copy of this shift moved by `days`, under a new id.
    pub fn copied(&self, new_id: impl Into<String>, days: i64) -> Shift {
        Shift {
            id: new_id.into(),
            date: self.date + Duration::days(days),
            ..self.clone()
        }
    }

    /// Ordering key used wherever shifts are listed.
    pub(crate) fn sort_key(&self) -> (NaiveDate, NaiveTime, &str, &str) {
        (self.date, self.start_time, &self.person_id, &self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_time(value: &str) -> NaiveTime {
        NaiveTime::parse_from_str(value, "%H:%M").unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn create_test_shift(start: &str, end: &str) -> Shift {
        Shift {
            id: "SH-001".to_string(),
            person_id: "emp_001".to_string(),
            store_id: "store_a".to_string(),
            date: make_date("2026-01-15"),
            start_time: make_time(start),
            end_time: make_time(end),
            kind: ShiftKind::Employee,
        }
    }

    #[test]
    fn test_8_hour_shift() {
        let shift = create_test_shift("09:00", "17:00");
        assert_eq!(shift.worked_minutes(), Some(480));
        assert_eq!(shift.worked_hours(), Decimal::new(8, 0));
    }

    #[test]
    fn test_quarter_hour_shift() {
        let shift = create_test_shift("09:00", "11:15");
        assert_eq!(shift.worked_hours(), Decimal::new(225, 2)); // 2.25
    }

    #[test]
    fn test_inverted_shift_counts_zero_and_is_flagged() {
        let shift = create_test_shift("18:00", "17:00");
        assert_eq!(shift.worked_minutes(), None);
        assert_eq!(shift.worked_hours(), Decimal::ZERO);

        match shift.time_range_issue() {
            Some(DataIssue::InvalidTimeRange {
                shift_id,
                start_time,
                end_time,
                ..
            }) => {
                assert_eq!(shift_id, "SH-001");
                assert_eq!(start_time, "18:00");
                assert_eq!(end_time, "17:00");
            }
            other => panic!("Expected InvalidTimeRange, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_duration_shift_is_flagged() {
        let shift = create_test_shift("09:00", "09:00");
        assert_eq!(shift.worked_hours(), Decimal::ZERO);
        assert!(shift.time_range_issue().is_some());
    }

    #[test]
    fn test_valid_shift_has_no_issue() {
        assert!(create_test_shift("09:00", "17:00").time_range_issue().is_none());
    }

    #[test]
    fn test_day_of_week() {
        // 2026-01-15 is a Thursday
        assert_eq!(create_test_shift("09:00", "17:00").day_of_week(), Weekday::Thu);
    }

    #[test]
    fn test_copied_moves_date_and_replaces_id() {
        let shift = create_test_shift("09:00", "17:00");
        let copy = shift.copied("SH-002", 7);
        assert_eq!(copy.id, "SH-002");
        assert_eq!(copy.date, make_date("2026-01-22"));
        assert_eq!(copy.start_time, shift.start_time);
        assert_eq!(copy.person_id, shift.person_id);
    }

    #[test]
    fn test_shift_serializes_times_as_hh_mm() {
        let shift = create_test_shift("09:00", "17:00");
        let json = serde_json::to_value(&shift).unwrap();
        assert_eq!(json["start_time"], "09:00");
        assert_eq!(json["end_time"], "17:00");
        assert_eq!(json["kind"], "employee");
    }

    #[test]
    fn test_shift_deserialization() {
        let json = r#"{
            "id": "shift_001",
            "person_id": "drv_001",
            "store_id": "store_a",
            "date": "2026-01-15",
            "start_time": "10:00",
            "end_time": "14:30",
            "kind": "driver"
        }"#;

        let shift: Shift = serde_json::from_str(json).unwrap();
        assert_eq!(shift.kind, ShiftKind::Driver);
        assert_eq!(shift.worked_minutes(), Some(270));
    }
}
