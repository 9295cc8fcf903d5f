//! Dashboard head counts and weekly totals.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::hours::minutes_to_hours;
use crate::calendar::WeekWindow;
use crate::models::Role;
use crate::roster::RosterStore;

/// Figures shown on the analytics dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterSummary {
    /// First day of the summarised week.
    pub week_start: NaiveDate,
    /// People with the employee role.
    pub employees: usize,
    /// People with the driver role.
    pub drivers: usize,
    /// People with the manager role.
    pub managers: usize,
    /// Stores on the roster.
    pub stores: usize,
    /// Shifts dated inside the week.
    pub shifts_scheduled: usize,
    /// Hours of those shifts. Invalid shifts count zero.
    pub hours_scheduled: Decimal,
    /// Mean hourly pay of employees, unrounded. `None` without employees.
    pub average_employee_pay: Option<Decimal>,
}

/// Computes the dashboard summary for `window`.
///
/// Hours cover every shift in the week, including shifts of people no
/// longer on the roster.
pub fn roster_summary(window: WeekWindow, roster: &RosterStore) -> RosterSummary {
    let mut employees = 0usize;
    let mut drivers = 0usize;
    let mut managers = 0usize;
    let mut employee_pay = Decimal::ZERO;

    for person in roster.people() {
        match person.role {
            Role::Employee => {
                employees += 1;
                employee_pay += person.hourly_pay;
            }
            Role::Driver => drivers += 1,
            Role::Manager => managers += 1,
            Role::Admin => {}
        }
    }

    let shifts = roster.shifts_in_range(window.start(), window.end());
    let minutes: i64 = shifts
        .iter()
        .filter_map(|shift| shift.worked_minutes())
        .sum();

    let average_employee_pay = if employees == 0 {
        None
    } else {
        Some(employee_pay / Decimal::from(employees))
    };

    debug!(
        week_start = %window.start(),
        employees,
        drivers,
        managers,
        shifts = shifts.len(),
        "Computed roster summary"
    );

    RosterSummary {
        week_start: window.start(),
        employees,
        drivers,
        managers,
        stores: roster.stores().count(),
        shifts_scheduled: shifts.len(),
        hours_scheduled: minutes_to_hours(minutes),
        average_employee_pay,
    }
}
