//! Weekly payroll rows and the payroll table.
//!
//! A payroll row combines the hours and earnings derived from a person's
//! shifts with the tips, deductibles and readiness a user entered. Rows are
//! always recomputed from shifts; the persisted entry only contributes the
//! user-entered fields.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::hours::{hours_and_earnings, minutes_to_hours};
use crate::calendar::WeekWindow;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    DataIssue, PayrollEdit, PayrollEntry, PayrollKey, PayrollStatus, Person, RecordKind, Role,
    Shift,
};
use crate::roster::RosterStore;

/// The week and store filter a payroll table is computed for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollContext {
    /// The payroll week.
    pub window: WeekWindow,
    /// The selected store, or `None` for "All Stores".
    pub store_id: Option<String>,
}

impl PayrollContext {
    /// Creates a context for `window`, optionally filtered to one store.
    pub fn new(window: WeekWindow, store_id: Option<&str>) -> Self {
        Self {
            window,
            store_id: store_id.map(str::to_string),
        }
    }

    /// The payroll key of `person_id` in this context.
    pub fn key_for(&self, person_id: &str) -> PayrollKey {
        PayrollKey {
            person_id: person_id.to_string(),
            week_start: self.window.start(),
            store_id: self.store_id.clone(),
        }
    }

    fn includes(&self, shift: &Shift) -> bool {
        self.window.contains(shift.date)
            && self
                .store_id
                .as_deref()
                .is_none_or(|store_id| shift.store_id == store_id)
    }
}

/// One computed row of the payroll table.
///
/// Serializes with the full [`PayrollEntry`] shape plus display fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRow {
    /// The person's display name.
    pub name: String,
    /// The rate used for `total_earnings`.
    pub hourly_pay: Decimal,
    /// Minutes behind `total_hours`.
    pub minutes: i64,
    /// The entry the host would persist for this row.
    #[serde(flatten)]
    pub entry: PayrollEntry,
    /// Whether a persisted entry exists for this row's key.
    pub persisted: bool,
    /// Shifts that counted for zero hours.
    pub flagged: Vec<DataIssue>,
}

impl PayrollRow {
    /// The identity of this row.
    pub fn key(&self) -> PayrollKey {
        self.entry.key()
    }
}

/// Builds the payroll row of one person.
///
/// This function computes the row by:
/// 1. Restricting `shifts` to the context's week and store
/// 2. Summing hours and earnings at the person's hourly pay
/// 3. Taking tips, deductibles and status from the persisted entry, if any
/// 4. Recomputing `final_earnings = total_earnings + tips - deductibles`
///
/// Nothing is persisted. Without an entry, tips and deductibles are zero
/// and the row is not ready.
///
/// # Arguments
///
/// * `person` - The person being paid
/// * `shifts` - Candidate shifts; other people's shifts are skipped
/// * `entry` - The persisted entry for this row's key, if any
/// * `context` - The payroll week and store filter
pub fn payroll_row<'a, I>(
    person: &Person,
    shifts: I,
    entry: Option<&PayrollEntry>,
    context: &PayrollContext,
) -> PayrollRow
where
    I: IntoIterator<Item = &'a Shift>,
{
    // Step 1: Restrict to the week and store
    let in_scope = shifts.into_iter().filter(|shift| context.includes(shift));

    // Step 2: Hours and earnings from shifts
    let totals = hours_and_earnings(&person.id, in_scope, person.hourly_pay);

    // Step 3: User-entered fields
    let (tips, deductibles, status) = entry
        .map(|e| (e.tips, e.deductibles, e.status))
        .unwrap_or((Decimal::ZERO, Decimal::ZERO, PayrollStatus::NotReady));

    // Step 4: Final earnings
    let key = context.key_for(&person.id);
    PayrollRow {
        name: person.name.clone(),
        hourly_pay: person.hourly_pay,
        minutes: totals.minutes,
        entry: PayrollEntry {
            person_id: key.person_id,
            store_id: key.store_id,
            week_start: key.week_start,
            total_hours: totals.hours,
            total_earnings: totals.earnings,
            tips,
            deductibles,
            final_earnings: totals.earnings + tips - deductibles,
            status,
        },
        persisted: entry.is_some(),
        flagged: totals.flagged,
    }
}

/// Applies a pending edit to a computed row.
///
/// Returns the entry the host should upsert under the row's key. Derived
/// fields come from the row and `final_earnings` is recomputed.
///
/// # Errors
///
/// Returns [`EngineError::InvalidAmount`] for negative tips or deductibles
/// and [`EngineError::PayrollKeyMismatch`] when the edit is for another row.
///
/// # Examples
///
/// ```
/// use roster_engine::aggregation::{PayrollContext, apply_payroll_edit, payroll_row};
/// use roster_engine::calendar::WeekWindow;
/// use roster_engine::models::{PayrollEdit, PayrollStatus, Person, Role};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let person = Person {
///     id: "emp_001".to_string(),
///     name: "Dana".to_string(),
///     role: Role::Employee,
///     store_id: None,
///     hourly_pay: Decimal::new(20, 0),
///     email: String::new(),
///     claimed: false,
/// };
/// let window = WeekWindow::starting(NaiveDate::from_ymd_opt(2026, 1, 12).unwrap());
/// let context = PayrollContext::new(window, None);
/// let row = payroll_row(&person, std::iter::empty(), None, &context);
///
/// let edit = PayrollEdit::new(row.key())
///     .with_tips(Decimal::new(25, 0))
///     .with_status(PayrollStatus::Ready);
/// let entry = apply_payroll_edit(&row, &edit).unwrap();
/// assert_eq!(entry.final_earnings, Decimal::new(25, 0));
/// assert_eq!(entry.status, PayrollStatus::Ready);
/// ```
pub fn apply_payroll_edit(row: &PayrollRow, edit: &PayrollEdit) -> EngineResult<PayrollEntry> {
    edit.validate()?;
    if edit.key != row.key() {
        return Err(EngineError::PayrollKeyMismatch {
            row_person_id: row.entry.person_id.clone(),
            edit_person_id: edit.key.person_id.clone(),
        });
    }

    let mut entry = row.entry.clone();
    if let Some(tips) = edit.tips {
        entry.tips = tips;
    }
    if let Some(deductibles) = edit.deductibles {
        entry.deductibles = deductibles;
    }
    if let Some(status) = edit.status {
        entry.status = status;
    }
    entry.final_earnings = entry.recomputed_final_earnings();
    Ok(entry)
}

/// Column sums of a payroll table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollTotals {
    /// Sum of row minutes.
    pub minutes: i64,
    /// `minutes` as hours.
    pub total_hours: Decimal,
    /// Sum of `total_earnings`.
    pub total_earnings: Decimal,
    /// Sum of `tips`.
    pub tips: Decimal,
    /// Sum of `deductibles`.
    pub deductibles: Decimal,
    /// Sum of `final_earnings`.
    pub final_earnings: Decimal,
    /// Rows marked ready.
    pub ready_rows: usize,
}

/// The payroll table for one week and store filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollTable {
    /// First day of the payroll week.
    pub week_start: NaiveDate,
    /// The selected store, or `None` for "All Stores".
    pub store_id: Option<String>,
    /// One row per person in scope, ordered by person id.
    pub rows: Vec<PayrollRow>,
    /// Column sums.
    pub totals: PayrollTotals,
    /// Flagged shifts and shifts worked by people no longer on the roster.
    pub issues: Vec<DataIssue>,
}

/// Computes the payroll table for `window`.
///
/// With a store selected, the table lists the people whose home store it is
/// and counts only their shifts at that store. Without one, it lists
/// everybody on the roster with all their shifts. Administrators are never
/// on payroll.
pub fn compute_payroll_table(
    store_id: Option<&str>,
    window: WeekWindow,
    roster: &RosterStore,
) -> PayrollTable {
    let context = PayrollContext::new(window, store_id);
    let week_shifts = roster.shifts_in_range(window.start(), window.end());

    let rows: Vec<PayrollRow> = roster
        .people()
        .filter(|person| person.role != Role::Admin)
        .filter(|person| store_id.is_none_or(|id| person.works_at(id)))
        .map(|person| {
            let shifts = roster.shifts_for_person(&person.id, window.start(), window.end());
            let entry = roster.payroll_entry(&context.key_for(&person.id));
            payroll_row(person, shifts, entry, &context)
        })
        .collect();

    let mut totals = PayrollTotals::default();
    let mut issues = Vec::new();
    for row in &rows {
        totals.minutes += row.minutes;
        totals.total_earnings += row.entry.total_earnings;
        totals.tips += row.entry.tips;
        totals.deductibles += row.entry.deductibles;
        totals.final_earnings += row.entry.final_earnings;
        if row.entry.status == PayrollStatus::Ready {
            totals.ready_rows += 1;
        }
        issues.extend(row.flagged.iter().cloned());
    }
    totals.total_hours = minutes_to_hours(totals.minutes);

    issues.extend(
        week_shifts
            .iter()
            .filter(|shift| context.includes(shift))
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
        store_id = store_id.unwrap_or(""),
        rows = rows.len(),
        issues = issues.len(),
        "Computed payroll table"
    );

    PayrollTable {
        week_start: window.start(),
        store_id: context.store_id,
        rows,
        totals,
        issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShiftKind;
    use chrono::NaiveTime;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn create_person() -> Person {
        Person {
            id: "emp_001".to_string(),
            name: "Dana".to_string(),
            role: Role::Employee,
            store_id: Some("store_a".to_string()),
            hourly_pay: Decimal::new(20, 0),
            email: String::new(),
            claimed: true,
        }
    }

    fn create_shift(id: &str, store_id: &str, date: &str, start: &str, end: &str) -> Shift {
        Shift {
            id: id.to_string(),
            person_id: "emp_001".to_string(),
            store_id: store_id.to_string(),
            date: make_date(date),
            start_time: NaiveTime::parse_from_str(start, "%H:%M").unwrap(),
            end_time: NaiveTime::parse_from_str(end, "%H:%M").unwrap(),
            kind: ShiftKind::Employee,
        }
    }

    fn create_context(store_id: Option<&str>) -> PayrollContext {
        PayrollContext::new(WeekWindow::starting(make_date("2026-01-12")), store_id)
    }

    #[test]
    fn test_row_without_entry_defaults() {
        let shifts = vec![create_shift("sh_1", "store_a", "2026-01-12", "09:00", "17:00")];
        let row = payroll_row(&create_person(), &shifts, None, &create_context(None));
        assert_eq!(row.entry.total_hours, Decimal::new(8, 0));
        assert_eq!(row.entry.total_earnings, Decimal::new(160, 0));
        assert_eq!(row.entry.tips, Decimal::ZERO);
        assert_eq!(row.entry.deductibles, Decimal::ZERO);
        assert_eq!(row.entry.final_earnings, Decimal::new(160, 0));
        assert_eq!(row.entry.status, PayrollStatus::NotReady);
        assert!(!row.persisted);
    }

    #[test]
    fn test_row_with_entry_uses_entered_fields() {
        let shifts = vec![create_shift("sh_1", "store_a", "2026-01-12", "09:00", "17:00")];
        let context = create_context(None);
        let entry = PayrollEntry {
            person_id: "emp_001".to_string(),
            store_id: None,
            week_start: make_date("2026-01-12"),
            // Stale stored totals are not trusted
            total_hours: Decimal::new(99, 0),
            total_earnings: Decimal::new(9999, 0),
            tips: Decimal::new(50, 0),
            deductibles: Decimal::new(10, 0),
            final_earnings: Decimal::ZERO,
            status: PayrollStatus::Ready,
        };
        let row = payroll_row(&create_person(), &shifts, Some(&entry), &context);
        assert_eq!(row.entry.total_earnings, Decimal::new(160, 0));
        assert_eq!(row.entry.final_earnings, Decimal::new(200, 0));
        assert_eq!(row.entry.status, PayrollStatus::Ready);
        assert!(row.persisted);
    }

    #[test]
    fn test_row_restricted_to_store_and_week() {
        let shifts = vec![
            create_shift("sh_1", "store_a", "2026-01-12", "09:00", "17:00"),
            create_shift("sh_2", "store_b", "2026-01-13", "09:00", "17:00"),
            create_shift("sh_3", "store_a", "2026-01-20", "09:00", "17:00"),
        ];
        let row = payroll_row(&create_person(), &shifts, None, &create_context(Some("store_a")));
        assert_eq!(row.entry.total_hours, Decimal::new(8, 0));
        assert_eq!(row.entry.store_id.as_deref(), Some("store_a"));

        let all = payroll_row(&create_person(), &shifts, None, &create_context(None));
        assert_eq!(all.entry.total_hours, Decimal::new(16, 0));
    }

    #[test]
    fn test_apply_edit_recomputes_final() {
        let shifts = vec![create_shift("sh_1", "store_a", "2026-01-12", "09:00", "17:00")];
        let row = payroll_row(&create_person(), &shifts, None, &create_context(None));
        let edit = PayrollEdit::new(row.key())
            .with_tips(Decimal::new(50, 0))
            .with_deductibles(Decimal::new(10, 0));
        let entry = apply_payroll_edit(&row, &edit).unwrap();
        assert_eq!(entry.final_earnings, Decimal::new(200, 0));
        assert_eq!(entry.status, PayrollStatus::NotReady);
    }

    #[test]
    fn test_apply_edit_rejects_negative() {
        let row = payroll_row(&create_person(), std::iter::empty(), None, &create_context(None));
        let edit = PayrollEdit::new(row.key()).with_deductibles(Decimal::new(-1, 0));
        match apply_payroll_edit(&row, &edit) {
            Err(EngineError::InvalidAmount { field, .. }) => assert_eq!(field, "deductibles"),
            other => panic!("Expected InvalidAmount, got {:?}", other),
        }
    }

    #[test]
    fn test_apply_edit_rejects_other_key() {
        let row = payroll_row(&create_person(), std::iter::empty(), None, &create_context(None));
        let mut key = row.key();
        key.store_id = Some("store_a".to_string());
        let edit = PayrollEdit::new(key).with_tips(Decimal::ONE);
        assert!(matches!(
            apply_payroll_edit(&row, &edit),
            Err(EngineError::PayrollKeyMismatch { .. })
        ));
    }

    #[test]
    fn test_row_serializes_flat() {
        let row = payroll_row(&create_person(), std::iter::empty(), None, &create_context(None));
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["person_id"], "emp_001");
        assert_eq!(json["name"], "Dana");
        assert_eq!(json["status"], "not_ready");
    }

    #[test]
    fn test_table_totals_sum_minutes() {
        use crate::roster::{PersonRecord, RosterSnapshot, RosterStore, ShiftRecord};

        let person = |id: &str| PersonRecord {
            id: Some(id.to_string()),
            name: Some(id.to_string()),
            role: Some("employee".to_string()),
            hourly_pay: Some(Decimal::new(3, 0)),
            ..Default::default()
        };
        let shift = |id: &str, person_id: &str, start: &str, end: &str| ShiftRecord {
            id: Some(id.to_string()),
            person_id: Some(person_id.to_string()),
            store_id: Some("store_a".to_string()),
            date: Some("2026-01-12".to_string()),
            start_time: Some(start.to_string()),
            end_time: Some(end.to_string()),
            kind: None,
        };
        let roster = RosterStore::from_snapshot(RosterSnapshot {
            people: vec![person("emp_001"), person("emp_002")],
            shifts: vec![
                shift("sh_1", "emp_001", "09:00", "09:20"),
                shift("sh_2", "emp_002", "10:00", "10:20"),
            ],
            ..Default::default()
        });

        let table = compute_payroll_table(None, create_context(None).window, &roster);
        assert_eq!(table.rows[0].minutes, 20);
        assert_eq!(table.rows[0].entry.total_earnings, Decimal::ONE);
        assert_eq!(table.totals.minutes, 40);
        assert_eq!(table.totals.total_hours, minutes_to_hours(40));
        assert_eq!(table.totals.total_earnings, Decimal::new(2, 0));
    }
}
