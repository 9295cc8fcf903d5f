//! Non-fatal data quality findings.
//!
//! A week grid must always render, even over partial or stale data. Problems
//! found in a snapshot are therefore collected as [`DataIssue`] values and
//! handed to the host, never raised as errors.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The kind of record a [`DataIssue`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// A person (employee, driver, manager or admin).
    Person,
    /// A store.
    Store,
    /// A shift.
    Shift,
    /// A driver tip entry.
    TipEntry,
    /// A weekly payroll entry.
    PayrollEntry,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Person => write!(f, "person"),
            RecordKind::Store => write!(f, "store"),
            RecordKind::Shift => write!(f, "shift"),
            RecordKind::TipEntry => write!(f, "tip entry"),
            RecordKind::PayrollEntry => write!(f, "payroll entry"),
        }
    }
}

/// A data quality problem found while loading or aggregating a roster.
///
/// # Example
///
/// ```
/// use roster_engine::models::{DataIssue, RecordKind};
///
/// let issue = DataIssue::MalformedRecord {
///     kind: RecordKind::Shift,
///     id: None,
///     reason: "missing field `id`".to_string(),
/// };
/// assert_eq!(issue.code(), "MALFORMED_RECORD");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataIssue {
    /// A record was missing a required field or held an unparseable value.
    /// The record was dropped.
    MalformedRecord {
        /// The kind of record.
        kind: RecordKind,
        /// The record id, when one was present.
        id: Option<String>,
        /// What was wrong with it.
        reason: String,
    },

    /// A shift ends at or before its start. It contributes zero hours.
    InvalidTimeRange {
        /// The shift id.
        shift_id: String,
        /// The shift date.
        date: NaiveDate,
        /// The recorded start, as `HH:MM`.
        start_time: String,
        /// The recorded end, as `HH:MM`.
        end_time: String,
    },

    /// A record points at a person or store that is not in the roster.
    MissingReference {
        /// The kind of record holding the reference.
        kind: RecordKind,
        /// The id of the record holding the reference.
        id: String,
        /// The kind of record that could not be found.
        target: RecordKind,
        /// The dangling id.
        target_id: String,
    },

    /// A store's opening hours for one weekday are unusable.
    InvalidStoreHours {
        /// The store id.
        store_id: String,
        /// The weekday key, e.g. `"monday"`.
        weekday: String,
        /// What was wrong with the hours.
        reason: String,
    },

    /// More than one payroll entry shared a person/week/store key.
    DuplicatePayrollEntry {
        /// The person id of the duplicated key.
        person_id: String,
        /// The week start of the duplicated key.
        week_start: NaiveDate,
        /// The store id of the duplicated key.
        store_id: Option<String>,
    },
}

impl DataIssue {
    /// Returns a stable code for programmatic handling by the host.
    pub fn code(&self) -> &'static str {
        match self {
            DataIssue::MalformedRecord { .. } => "MALFORMED_RECORD",
            DataIssue::InvalidTimeRange { .. } => "INVALID_TIME_RANGE",
            DataIssue::MissingReference { .. } => "MISSING_REFERENCE",
            DataIssue::InvalidStoreHours { .. } => "INVALID_STORE_HOURS",
            DataIssue::DuplicatePayrollEntry { .. } => "DUPLICATE_PAYROLL_ENTRY",
        }
    }
}

impl fmt::Display for DataIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataIssue::MalformedRecord { kind, id, reason } => match id {
                Some(id) => write!(f, "Dropped malformed {} '{}': {}", kind, id, reason),
                None => write!(f, "Dropped malformed {}: {}", kind, reason),
            },
            DataIssue::InvalidTimeRange {
                shift_id,
                date,
                start_time,
                end_time,
            } => write!(
                f,
                "Shift '{}' on {} ends at {} which is not after its start {}",
                shift_id, date, end_time, start_time
            ),
            DataIssue::MissingReference {
                kind,
                id,
                target,
                target_id,
            } => write!(f, "{} '{}' references unknown {} '{}'", kind, id, target, target_id),
            DataIssue::InvalidStoreHours {
                store_id,
                weekday,
                reason,
            } => write!(f, "Store '{}' has invalid {} hours: {}", store_id, weekday, reason),
            DataIssue::DuplicatePayrollEntry {
                person_id,
                week_start,
                store_id,
            } => write!(
                f,
                "Duplicate payroll entry for person '{}' week {} store '{}'",
                person_id,
                week_start,
                store_id.as_deref().unwrap_or("")
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        let issue = DataIssue::InvalidTimeRange {
            shift_id: "sh_1".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
            start_time: "18:00".to_string(),
            end_time: "17:00".to_string(),
        };
        assert_eq!(issue.code(), "INVALID_TIME_RANGE");
    }

    #[test]
    fn test_display_invalid_time_range() {
        let issue = DataIssue::InvalidTimeRange {
            shift_id: "sh_1".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
            start_time: "18:00".to_string(),
            end_time: "17:00".to_string(),
        };
        assert_eq!(
            issue.to_string(),
            "Shift 'sh_1' on 2026-01-12 ends at 17:00 which is not after its start 18:00"
        );
    }

    #[test]
    fn test_display_missing_reference() {
        let issue = DataIssue::MissingReference {
            kind: RecordKind::Shift,
            id: "sh_9".to_string(),
            target: RecordKind::Person,
            target_id: "emp_gone".to_string(),
        };
        assert_eq!(
            issue.to_string(),
            "shift 'sh_9' references unknown person 'emp_gone'"
        );
    }

    #[test]
    fn test_serializes_with_code_tag() {
        let issue = DataIssue::MalformedRecord {
            kind: RecordKind::Person,
            id: None,
            reason: "missing field `id`".to_string(),
        };
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["code"], "MALFORMED_RECORD");
        assert_eq!(json["kind"], "person");
    }
}
