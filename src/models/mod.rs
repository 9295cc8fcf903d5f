//! Core data models for the Roster Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod clock;
mod issue;
mod payroll;
mod person;
mod shift;
mod store;
mod tip;

pub use clock::{
    WEEKDAY_NAMES, format_clock_time, hhmm, minute_of_day, parse_clock_time, parse_weekday,
    weekday_name,
};
pub use issue::{DataIssue, RecordKind};
pub use payroll::{PayrollEdit, PayrollEntry, PayrollKey, PayrollStatus};
pub use person::{Person, Role};
pub use shift::{Shift, ShiftKind};
pub use store::{DayHours, Store};
pub(crate) use store::normalize_hours;
pub use tip::{ADJUSTED_TIP_FACTOR, TipEntry, round_currency};
