//! Calendar week windows.
//!
//! Views disagree on whether weeks start on Sunday or Monday, so every
//! function here takes the start day explicitly. Hosts normally pass
//! [`SchedulerConfig::week_starts_on`](crate::config::SchedulerConfig::week_starts_on).

mod week_window;

pub use week_window::{
    DAYS_PER_WEEK, WeekWindow, days_of_week, shift_week, week_end, week_start,
};
