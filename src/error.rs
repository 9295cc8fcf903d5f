//! Error types for the Roster Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for operations that can legitimately reject their input. Data quality
//! problems found while aggregating a snapshot are not errors; they are
//! reported as [`DataIssue`](crate::models::DataIssue) values instead.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the Roster Engine.
///
/// # Example
///
/// ```
/// use roster_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/scheduler.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/scheduler.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds a value the engine cannot use.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// A clock time was not in `HH:MM` form.
    #[error("Invalid time '{value}': expected HH:MM")]
    InvalidTime {
        /// The rejected input.
        value: String,
    },

    /// A weekday name was not recognised.
    #[error("Invalid weekday '{value}'")]
    InvalidWeekday {
        /// The rejected input.
        value: String,
    },

    /// A shift was invalid or contained inconsistent data.
    #[error("Invalid shift '{shift_id}': {message}")]
    InvalidShift {
        /// The ID of the invalid shift.
        shift_id: String,
        /// A description of what made the shift invalid.
        message: String,
    },

    /// A user-entered monetary amount was rejected.
    #[error("Invalid amount for '{field}': {value} must not be negative")]
    InvalidAmount {
        /// The field the amount was entered into.
        field: String,
        /// The rejected amount.
        value: Decimal,
    },

    /// A payroll edit was applied to a row with a different key.
    #[error("Payroll edit for '{edit_person_id}' does not match row for '{row_person_id}'")]
    PayrollKeyMismatch {
        /// Person id of the row.
        row_person_id: String,
        /// Person id of the edit.
        edit_person_id: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
