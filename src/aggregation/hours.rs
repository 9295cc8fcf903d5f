//! Hours and earnings calculation.
//!
//! This module sums a person's scheduled time and multiplies it by their
//! hourly rate. It is the building block for grid rows, payroll rows and
//! the dashboard summary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::{DataIssue, Shift};

const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// The result of summing one person's shifts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursAndEarnings {
    /// Total worked minutes. This is the additive quantity; callers that
    /// combine results sum minutes and convert once.
    pub minutes: i64,
    /// `minutes / 60`, unrounded.
    pub hours: Decimal,
    /// `minutes * hourly_rate / 60`, unrounded.
    pub earnings: Decimal,
    /// Shifts that did not end after they started and counted for zero.
    pub flagged: Vec<DataIssue>,
}

/// Converts whole minutes to decimal hours.
pub(crate) fn minutes_to_hours(minutes: i64) -> Decimal {
    Decimal::from(minutes) / MINUTES_PER_HOUR
}

/// Pay for whole minutes at an hourly rate. The division comes last so an
/// exact result is never rounded through an inexact hour count.
pub(crate) fn minutes_to_earnings(minutes: i64, hourly_rate: Decimal) -> Decimal {
    Decimal::from(minutes) * hourly_rate / MINUTES_PER_HOUR
}

/// Calculates the hours and earnings of one person over a set of shifts.
///
/// Only shifts whose `person_id` matches are counted, so callers can pass a
/// whole week of shifts. Minutes are summed first; hours and earnings are
/// both derived from the minute total, dividing by 60 last.
///
/// # Arguments
///
/// * `person_id` - The person whose shifts are summed
/// * `shifts` - Candidate shifts; other people's shifts are skipped
/// * `hourly_rate` - The person's hourly pay
///
/// # Returns
///
/// Zeros when the person has no shifts. A shift that ends at or before its
/// start contributes nothing and is reported in `flagged`.
///
/// # Examples
///
/// ```
/// use roster_engine::aggregation::hours_and_earnings;
/// use roster_engine::models::{Shift, ShiftKind};
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let shift = Shift {
///     id: "sh_1".to_string(),
///     person_id: "emp_001".to_string(),
///     store_id: "store_a".to_string(),
///     date: NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
///     start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
///     kind: ShiftKind::Employee,
/// };
///
/// let result = hours_and_earnings("emp_001", [&shift], Decimal::new(20, 0));
/// assert_eq!(result.hours, Decimal::new(8, 0));
/// assert_eq!(result.earnings, Decimal::new(160, 0));
/// assert!(result.flagged.is_empty());
/// ```
pub fn hours_and_earnings<'a, I>(person_id: &str, shifts: I, hourly_rate: Decimal) -> HoursAndEarnings
where
    I: IntoIterator<Item = &'a Shift>,
{
    let mut minutes = 0i64;
    let mut flagged = Vec::new();

    for shift in shifts.into_iter().filter(|s| s.person_id == person_id) {
        match shift.worked_minutes() {
            Some(worked) => minutes += worked,
            None => {
                warn!(
                    shift_id = %shift.id,
                    person_id = %person_id,
                    "Shift counted as zero hours: end is not after start"
                );
                if let Some(issue) = shift.time_range_issue() {
                    flagged.push(issue);
                }
            }
        }
    }

    HoursAndEarnings {
        minutes,
        hours: minutes_to_hours(minutes),
        earnings: minutes_to_earnings(minutes, hourly_rate),
        flagged,
    }
}
