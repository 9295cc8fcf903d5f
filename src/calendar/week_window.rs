//! Week window arithmetic.
//!
//! Every calendar grid and payroll table works on a 7-day window anchored on
//! a caller-chosen start day. The functions here are plain date arithmetic;
//! no timezone is involved because all dates are local calendar dates.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::config::SchedulerConfig;

/// Number of days in a window.
pub const DAYS_PER_WEEK: i64 = 7;

/// Returns the most recent `start_day` on or before `reference_date`.
///
/// # Example
///
/// ```
/// use roster_engine::calendar::week_start;
/// use chrono::{NaiveDate, Weekday};
///
/// // 2026-01-15 is a Thursday
/// let thursday = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
/// assert_eq!(
///     week_start(thursday, Weekday::Mon),
///     NaiveDate::from_ymd_opt(2026, 1, 12).unwrap()
/// );
/// assert_eq!(
///     week_start(thursday, Weekday::Sun),
///     NaiveDate::from_ymd_opt(2026, 1, 11).unwrap()
/// );
/// ```
pub fn week_start(reference_date: NaiveDate, start_day: Weekday) -> NaiveDate {
    let offset = (i64::from(reference_date.weekday().num_days_from_monday())
        - i64::from(start_day.num_days_from_monday()))
    .rem_euclid(DAYS_PER_WEEK);
    reference_date - Duration::days(offset)
}

/// Returns the last day of the week that starts on `week_start`.
pub fn week_end(week_start: NaiveDate) -> NaiveDate {
    week_start + Duration::days(DAYS_PER_WEEK - 1)
}

/// Returns the 7 dates of the week, in order.
pub fn days_of_week(week_start: NaiveDate) -> [NaiveDate; 7] {
    std::array::from_fn(|offset| week_start + Duration::days(offset as i64))
}

/// Moves a week start by `delta_weeks` whole weeks (negative moves back).
pub fn shift_week(week_start: NaiveDate, delta_weeks: i64) -> NaiveDate {
    week_start + Duration::days(DAYS_PER_WEEK * delta_weeks)
}

/// A 7-day window used by calendar grids and payroll tables.
///
/// # Example
///
/// ```
/// use roster_engine::calendar::WeekWindow;
/// use chrono::{NaiveDate, Weekday};
///
/// let window = WeekWindow::containing(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(), Weekday::Mon);
/// assert_eq!(window.start(), NaiveDate::from_ymd_opt(2026, 1, 12).unwrap());
/// assert_eq!(window.end(), NaiveDate::from_ymd_opt(2026, 1, 18).unwrap());
/// assert_eq!(window.day_keys()[0], "2026-01-12");
/// assert_eq!(window.next().start(), NaiveDate::from_ymd_opt(2026, 1, 19).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WeekWindow {
    start: NaiveDate,
}

impl WeekWindow {
    /// The window containing `reference_date`, starting on `start_day`.
    pub fn containing(reference_date: NaiveDate, start_day: Weekday) -> Self {
        Self {
            start: week_start(reference_date, start_day),
        }
    }

    /// The window containing `reference_date`, starting on the configured
    /// week start day.
    pub fn for_config(config: &SchedulerConfig, reference_date: NaiveDate) -> Self {
        Self::containing(reference_date, config.week_starts_on())
    }

    /// The window starting exactly on `start`, whatever weekday that is.
    pub fn starting(start: NaiveDate) -> Self {
        Self { start }
    }

    /// First day of the window.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the window.
    pub fn end(&self) -> NaiveDate {
        week_end(self.start)
    }

    /// The weekday the window starts on.
    pub fn start_day(&self) -> Weekday {
        self.start.weekday()
    }

    /// The 7 dates of the window, in order.
    pub fn days(&self) -> [NaiveDate; 7] {
        days_of_week(self.start)
    }

    /// The 7 dates formatted as `YYYY-MM-DD`, for use as stable grid keys.
    pub fn day_keys(&self) -> [String; 7] {
        self.days().map(|day| day.format("%Y-%m-%d").to_string())
    }

    /// Returns true if `date` falls inside the window (inclusive).
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end()
    }

    /// Position of `date` within the window, 0 to 6.
    pub fn day_index(&self, date: NaiveDate) -> Option<usize> {
        if !self.contains(date) {
            return None;
        }
        Some((date - self.start).num_days() as usize)
    }

    /// The window `delta_weeks` away.
    pub fn shifted(&self, delta_weeks: i64) -> Self {
        Self {
            start: shift_week(self.start, delta_weeks),
        }
    }

    /// The preceding window.
    pub fn previous(&self) -> Self {
        self.shifted(-1)
    }

    /// The following window.
    pub fn next(&self) -> Self {
        self.shifted(1)
    }
}
