//! Shift materialisation: drafting a shift for a grid cell, copying a week
//! forward and clearing a week.
//!
//! Nothing here persists. Each operation returns the shifts or ids the host
//! should write or delete.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::default_times::{DefaultTimes, default_times_for_date};
use crate::calendar::{DAYS_PER_WEEK, WeekWindow};
use crate::error::{EngineError, EngineResult};
use crate::models::{Person, Shift, ShiftKind, Store, parse_clock_time};

/// An unsaved shift as shown in the shift editor.
///
/// Times stay as `HH:MM` strings until [`into_shift`](ShiftDraft::into_shift)
/// so that an empty default can be shown and edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftDraft {
    /// The person the shift is for.
    pub person_id: String,
    /// The store the shift is worked at, if one has been chosen.
    pub store_id: Option<String>,
    /// The grid cell's date.
    pub date: NaiveDate,
    /// `HH:MM`, or empty.
    pub start_time: String,
    /// `HH:MM`, or empty.
    pub end_time: String,
    /// Employee or driver calendar.
    pub kind: ShiftKind,
}

impl ShiftDraft {
    /// Drafts a shift for an empty grid cell.
    ///
    /// The store defaults to the person's home store and the times to that
    /// store's hours on `date`. `home_store` is the person's home store as
    /// looked up by the caller, if it still exists.
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use roster_engine::models::{DayHours, Person, Role, Store};
    /// use roster_engine::scheduling::ShiftDraft;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let mut hours = BTreeMap::new();
    /// hours.insert("monday".to_string(), DayHours::new("08:00", "16:00"));
    /// let store = Store {
    ///     id: "store_a".to_string(),
    ///     name: "Downtown".to_string(),
    ///     location: String::new(),
    ///     hours,
    /// };
    /// let person = Person {
    ///     id: "emp_001".to_string(),
    ///     name: "Dana".to_string(),
    ///     role: Role::Employee,
    ///     store_id: Some("store_a".to_string()),
    ///     hourly_pay: Decimal::new(20, 0),
    ///     email: String::new(),
    ///     claimed: true,
    /// };
    ///
    /// let monday = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
    /// let draft = ShiftDraft::for_cell(&person, Some(&store), monday);
    /// assert_eq!(draft.start_time, "08:00");
    ///
    /// let shift = draft.into_shift("sh_1").unwrap();
    /// assert_eq!(shift.store_id, "store_a");
    /// ```
    pub fn for_cell(person: &Person, home_store: Option<&Store>, date: NaiveDate) -> Self {
        let defaults = home_store
            .map(|store| default_times_for_date(store, date))
            .unwrap_or_default();
        let kind = if person.is_driver() {
            ShiftKind::Driver
        } else {
            ShiftKind::Employee
        };

        Self {
            person_id: person.id.clone(),
            store_id: person.store_id.clone(),
            date,
            start_time: defaults.start_time,
            end_time: defaults.end_time,
            kind,
        }
    }

    /// Replaces the draft's times.
    pub fn with_times(mut self, times: DefaultTimes) -> Self {
        self.start_time = times.start_time;
        self.end_time = times.end_time;
        self
    }

    /// Moves the draft to another store.
    pub fn with_store(mut self, store_id: impl Into<String>) -> Self {
        self.store_id = Some(store_id.into());
        self
    }

    /// Validates the draft and turns it into a shift with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidShift`] when no store is set, when a time
    /// is missing or not `HH:MM`, or when the shift does not end after it
    /// starts. Shifts never run past midnight.
    pub fn into_shift(self, id: impl Into<String>) -> EngineResult<Shift> {
        let id = id.into();
        let invalid = |message: String| EngineError::InvalidShift {
            shift_id: id.clone(),
            message,
        };

        let store_id = self
            .store_id
            .filter(|store_id| !store_id.trim().is_empty())
            .ok_or_else(|| invalid("no store selected".to_string()))?;

        if self.start_time.trim().is_empty() || self.end_time.trim().is_empty() {
            return Err(invalid("start and end time are required".to_string()));
        }
        let start_time = parse_clock_time(&self.start_time).map_err(|e| invalid(e.to_string()))?;
        let end_time = parse_clock_time(&self.end_time).map_err(|e| invalid(e.to_string()))?;
        if end_time <= start_time {
            return Err(invalid(format!(
                "ends at {} which is not after its start {}",
                self.end_time, self.start_time
            )));
        }

        Ok(Shift {
            id,
            person_id: self.person_id,
            store_id,
            date: self.date,
            start_time,
            end_time,
            kind: self.kind,
        })
    }
}

/// Copies every shift dated inside `window` to the same weekday of the
/// following week.
///
/// Each copy gets a fresh UUID v4 id; everything else but the date is kept.
/// Shifts outside the window are ignored. The result follows the input
/// order.
pub fn copy_week_forward<'a, I>(shifts: I, window: WeekWindow) -> Vec<Shift>
where
    I: IntoIterator<Item = &'a Shift>,
{
    let copies: Vec<Shift> = shifts
        .into_iter()
        .filter(|shift| window.contains(shift.date))
        .map(|shift| shift.copied(Uuid::new_v4().to_string(), DAYS_PER_WEEK))
        .collect();

    debug!(
        week_start = %window.start(),
        copied = copies.len(),
        "Copied week forward"
    );
    copies
}

/// Returns the ids of the shifts dated inside `window`, optionally only
/// those at `store_id`, for the host to delete.
pub fn clear_week<'a, I>(shifts: I, window: WeekWindow, store_id: Option<&str>) -> Vec<String>
where
    I: IntoIterator<Item = &'a Shift>,
{
    shifts
        .into_iter()
        .filter(|shift| window.contains(shift.date))
        .filter(|shift| store_id.is_none_or(|id| shift.store_id == id))
        .map(|shift| shift.id.clone())
        .collect()
}
