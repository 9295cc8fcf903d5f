//! The week calendar grid.
//!
//! A week view has one row per person and one column per day. Each cell
//! holds the shifts that person works that day. Rows carry the weekly hours
//! and earnings shown at the end of the grid.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::hours::{hours_and_earnings, minutes_to_hours};
use crate::calendar::WeekWindow;
use crate::models::{DataIssue, RecordKind, Shift};
use crate::roster::RosterStore;

/// One person's row in the week grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekRow {
    /// The person id, which may no longer be on the roster.
    pub person_id: String,
    /// The person's name, or the unknown label.
    pub name: String,
    /// Whether the person is on the roster.
    pub known: bool,
    /// The person's home store, if known.
    pub store_id: Option<String>,
    /// Minutes worked in the view.
    pub minutes: i64,
    /// Hours worked in the view.
    pub hours: Decimal,
    /// Hours multiplied by the person's rate. Zero for unknown people.
    pub earnings: Decimal,
    /// Shifts that counted for zero hours.
    pub flagged: Vec<DataIssue>,
}

/// A computed week grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekView {
    /// The week shown.
    pub window: WeekWindow,
    /// The store the grid is filtered to, if any.
    pub store_id: Option<String>,
    /// The 7 column dates.
    pub days: Vec<NaiveDate>,
    /// The 7 column keys, `YYYY-MM-DD`.
    pub day_keys: Vec<String>,
    /// Rows ordered by person id.
    pub rows: Vec<WeekRow>,
    /// Shifts keyed by person id, then date. Empty cells are absent.
    pub cells: BTreeMap<String, BTreeMap<NaiveDate, Vec<Shift>>>,
    /// Hours scheduled per column.
    pub day_hours: Vec<Decimal>,
    /// Flagged shifts and shifts of people no longer on the roster.
    pub issues: Vec<DataIssue>,
}

impl WeekView {
    /// The shifts in one cell, in start time order.
    pub fn cell(&self, person_id: &str, date: NaiveDate) -> &[Shift] {
        self.cells
            .get(person_id)
            .and_then(|days| days.get(&date))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The row of `person_id`, if shown.
    pub fn row(&self, person_id: &str) -> Option<&WeekRow> {
        self.rows.iter().find(|row| row.person_id == person_id)
    }

    /// Hours of all rows, converted once from the summed minutes.
    pub fn total_hours(&self) -> Decimal {
        minutes_to_hours(self.rows.iter().map(|row| row.minutes).sum())
    }

    /// Sum of all row earnings.
    pub fn total_earnings(&self) -> Decimal {
        self.rows.iter().map(|row| row.earnings).sum()
    }
}

/// Computes the week grid for `window`.
///
/// Rows are the people whose home store is `store_filter` (everybody when
/// `None`) plus anyone with a shift shown in the grid. People no longer on
/// the roster still get a row, labelled with the unknown label, so their
/// shifts stay visible. With a store filter only that store's shifts are
/// shown and counted.
///
/// # Examples
///
/// ```
/// use roster_engine::aggregation::compute_week_view;
/// use roster_engine::calendar::WeekWindow;
/// use roster_engine::roster::{RosterSnapshot, RosterStore};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let roster = RosterStore::from_snapshot(RosterSnapshot::from_json(r#"{
///     "people": [{"id": "emp_001", "name": "Dana", "role": "employee", "store_id": "store_a", "pay": 20}],
///     "stores": [{"id": "store_a", "name": "Downtown"}],
///     "shifts": [{"id": "sh_1", "employee_id": "emp_001", "store_id": "store_a",
///                 "date": "2026-01-12", "start_time": "09:00", "end_time": "17:00"}]
/// }"#).unwrap());
///
/// let monday = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
/// let view = compute_week_view(WeekWindow::starting(monday), &roster, None);
/// assert_eq!(view.cell("emp_001", monday).len(), 1);
/// assert_eq!(view.rows[0].earnings, Decimal::new(160, 0));
/// ```
pub fn compute_week_view(
    window: WeekWindow,
    roster: &RosterStore,
    store_filter: Option<&str>,
) -> WeekView {
    let shifts: Vec<&Shift> = roster
        .shifts_in_range(window.start(), window.end())
        .into_iter()
        .filter(|shift| store_filter.is_none_or(|id| shift.store_id == id))
        .collect();

    let mut person_ids: BTreeSet<&str> = roster
        .people()
        .filter(|person| store_filter.is_none_or(|id| person.works_at(id)))
        .map(|person| person.id.as_str())
        .collect();
    person_ids.extend(shifts.iter().map(|shift| shift.person_id.as_str()));

    let mut cells: BTreeMap<String, BTreeMap<NaiveDate, Vec<Shift>>> = BTreeMap::new();
    let mut day_minutes = [0i64; 7];
    for shift in &shifts {
        cells
            .entry(shift.person_id.clone())
            .or_default()
            .entry(shift.date)
            .or_default()
            .push((*shift).clone());
        if let (Some(index), Some(minutes)) = (window.day_index(shift.date), shift.worked_minutes()) {
            day_minutes[index] += minutes;
        }
    }

    let mut issues = Vec::new();
    let rows: Vec<WeekRow> = person_ids
        .into_iter()
        .map(|person_id| {
            let person = roster.person(person_id);
            let rate = person.map(|p| p.hourly_pay).unwrap_or(Decimal::ZERO);
            let person_shifts = cells
                .get(person_id)
                .into_iter()
                .flat_map(|days| days.values().flatten());
            let totals = hours_and_earnings(person_id, person_shifts, rate);
            issues.extend(totals.flagged.iter().cloned());

            WeekRow {
                person_id: person_id.to_string(),
                name: roster.display_name(person_id).to_string(),
                known: person.is_some(),
                store_id: person.and_then(|p| p.store_id.clone()),
                minutes: totals.minutes,
                hours: totals.hours,
                earnings: totals.earnings,
                flagged: totals.flagged,
            }
        })
        .collect();

    issues.extend(
        shifts
            .iter()
            .filter(|shift| roster.person(&shift.person_id).is_none())
            .map(|shift| DataIssue::MissingReference {
                kind: RecordKind::Shift,
                id: shift.id.clone(),
                target: RecordKind::Person,
                target_id: shift.person_id.clone(),
            }),
    );

    debug!(
        week_start = %window.start(),
        store_id = store_filter.unwrap_or(""),
        rows = rows.len(),
        shifts = shifts.len(),
        "Computed week view"
    );

    WeekView {
        window,
        store_id: store_filter.map(str::to_string),
        days: window.days().to_vec(),
        day_keys: window.day_keys().to_vec(),
        rows,
        cells,
        day_hours: day_minutes.into_iter().map(minutes_to_hours).collect(),
        issues,
    }
}
