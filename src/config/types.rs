//! Configuration types for the scheduler.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from `scheduler.yaml`.

use chrono::Weekday;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::parse_weekday;

/// The colour tokens stores are assigned on calendar legends, in order.
pub const DEFAULT_LEGEND_PALETTE: [&str; 10] = [
    "bg-orange-200",
    "bg-blue-200",
    "bg-green-200",
    "bg-yellow-200",
    "bg-red-200",
    "bg-pink-200",
    "bg-indigo-200",
    "bg-gray-200",
    "bg-purple-200",
    "bg-teal-200",
];

/// Label shown for a person or store that is no longer on the roster.
pub const DEFAULT_UNKNOWN_LABEL: &str = "Unknown";

/// Raw shape of `scheduler.yaml`. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchedulerFile {
    /// Weekday name the calendar week starts on.
    pub week_starts_on: Option<String>,
    /// Label for dangling person/store references.
    pub unknown_label: Option<String>,
    /// Legend colour tokens.
    pub legend_palette: Option<Vec<String>>,
}

/// Validated scheduler settings.
///
/// # Example
///
/// ```
/// use roster_engine::config::SchedulerConfig;
/// use chrono::Weekday;
///
/// let config = SchedulerConfig::default();
/// assert_eq!(config.week_starts_on(), Weekday::Mon);
/// assert_eq!(config.unknown_label(), "Unknown");
/// assert_eq!(config.legend_palette().len(), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerConfig {
    week_starts_on: Weekday,
    unknown_label: String,
    legend_palette: Vec<String>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            week_starts_on: Weekday::Mon,
            unknown_label: DEFAULT_UNKNOWN_LABEL.to_string(),
            legend_palette: DEFAULT_LEGEND_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl SchedulerConfig {
    /// Builds validated settings from the raw file, filling gaps with defaults.
    pub fn from_file(file: SchedulerFile) -> EngineResult<Self> {
        let defaults = Self::default();

        let week_starts_on = match file.week_starts_on {
            Some(name) => parse_weekday(&name).map_err(|_| EngineError::InvalidConfig {
                field: "week_starts_on".to_string(),
                message: format!("'{}' is not a weekday", name),
            })?,
            None => defaults.week_starts_on,
        };

        let unknown_label = match file.unknown_label {
            Some(label) if label.trim().is_empty() => {
                return Err(EngineError::InvalidConfig {
                    field: "unknown_label".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
            Some(label) => label,
            None => defaults.unknown_label,
        };

        let legend_palette = match file.legend_palette {
            Some(palette) if palette.is_empty() => {
                return Err(EngineError::InvalidConfig {
                    field: "legend_palette".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
            Some(palette) => palette,
            None => defaults.legend_palette,
        };

        Ok(Self {
            week_starts_on,
            unknown_label,
            legend_palette,
        })
    }

    /// Returns a copy that starts weeks on `weekday`.
    pub fn with_week_starts_on(mut self, weekday: Weekday) -> Self {
        self.week_starts_on = weekday;
        self
    }

    /// The weekday calendar weeks start on.
    pub fn week_starts_on(&self) -> Weekday {
        self.week_starts_on
    }

    /// Label for dangling person/store references.
    pub fn unknown_label(&self) -> &str {
        &self.unknown_label
    }

    /// Legend colour tokens; never empty.
    pub fn legend_palette(&self) -> &[String] {
        &self.legend_palette
    }
}
