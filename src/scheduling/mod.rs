//! Default shift times and shift materialisation.
//!
//! This module resolves pre-filled times for a new shift from the store's
//! opening hours, and produces the shifts and ids the host persists when
//! a cell is filled, a week is copied forward, or a week is cleared.

mod default_times;
mod shift_ops;

pub use default_times::{DefaultTimes, default_times_for, default_times_for_date};
pub use shift_ops::{ShiftDraft, clear_week, copy_week_forward};
