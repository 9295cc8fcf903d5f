//! Derived figures for calendar grids, payroll and the dashboard.
//!
//! This module contains every calculation the views display: hours and
//! earnings per person, grouping by store, payroll rows and tables, driver
//! tip totals, the week grid, the store legend and the dashboard summary.
//! All functions are pure and return deterministically ordered results.

mod grouping;
mod hours;
mod legend;
mod payroll;
mod summary;
mod tips;
mod week_view;

pub use grouping::group_by_store;
pub use hours::{HoursAndEarnings, hours_and_earnings};
pub use legend::{Legend, LegendEntry, compute_legend};
pub use payroll::{
    PayrollContext, PayrollRow, PayrollTable, PayrollTotals, apply_payroll_edit,
    compute_payroll_table, payroll_row,
};
pub use summary::{RosterSummary, roster_summary};
pub use tips::{DriverTips, TipTotals, tips_by_driver, weekly_tip_total};
pub use week_view::{WeekRow, WeekView, compute_week_view};
