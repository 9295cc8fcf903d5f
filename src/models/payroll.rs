//! Weekly payroll entry models.
//!
//! This module contains the [`PayrollEntry`] the host persists once per
//! person, week and store, and the [`PayrollEdit`] value object describing a
//! pending change to one.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Whether a payroll row has been reviewed for disbursement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayrollStatus {
    /// Reviewed and ready to pay.
    Ready,
    /// Not yet reviewed.
    #[default]
    NotReady,
}

/// The identity of a payroll entry: one per person, week and store.
///
/// `store_id` is `None` for the "All Stores" payroll table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PayrollKey {
    /// The person being paid.
    pub person_id: String,
    /// First day of the payroll week.
    pub week_start: NaiveDate,
    /// The store the table was filtered to, if any.
    pub store_id: Option<String>,
}

/// A weekly payroll row as persisted by the host.
///
/// `total_hours` and `total_earnings` are derived from shifts; `tips` and
/// `deductibles` are entered by a user.
///
/// # Example
///
/// ```
/// use roster_engine::models::{PayrollEntry, PayrollStatus};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let entry = PayrollEntry {
///     person_id: "emp_001".to_string(),
///     store_id: Some("store_a".to_string()),
///     week_start: NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
///     total_hours: Decimal::new(8, 0),
///     total_earnings: Decimal::new(160, 0),
///     tips: Decimal::new(50, 0),
///     deductibles: Decimal::new(10, 0),
///     final_earnings: Decimal::new(200, 0),
///     status: PayrollStatus::NotReady,
/// };
/// assert_eq!(entry.recomputed_final_earnings(), Decimal::new(200, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollEntry {
    /// The person being paid.
    pub person_id: String,
    /// The store the payroll table was filtered to, if any.
    #[serde(default)]
    pub store_id: Option<String>,
    /// First day of the payroll week.
    pub week_start: NaiveDate,
    /// Hours worked in the week.
    #[serde(default)]
    pub total_hours: Decimal,
    /// Hours multiplied by the hourly rate.
    #[serde(default)]
    pub total_earnings: Decimal,
    /// Tips added on top of earnings.
    #[serde(default)]
    pub tips: Decimal,
    /// Amounts withheld from earnings.
    #[serde(default)]
    pub deductibles: Decimal,
    /// `total_earnings + tips - deductibles`.
    #[serde(default)]
    pub final_earnings: Decimal,
    /// Review state.
    #[serde(default)]
    pub status: PayrollStatus,
}

impl PayrollEntry {
    /// Returns the identity of this entry.
    pub fn key(&self) -> PayrollKey {
        PayrollKey {
            person_id: self.person_id.clone(),
            week_start: self.week_start,
            store_id: self.store_id.clone(),
        }
    }

    /// Returns `total_earnings + tips - deductibles` from the current fields.
    pub fn recomputed_final_earnings(&self) -> Decimal {
        self.total_earnings + self.tips - self.deductibles
    }
}

/// A pending user edit to one payroll row.
///
/// The UI builds one of these when a tips or deductibles field loses focus,
/// or when the readiness toggle is flipped. The host applies it with
/// [`apply_payroll_edit`](crate::aggregation::apply_payroll_edit) and
/// persists the resulting entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollEdit {
    /// The row being edited.
    pub key: PayrollKey,
    /// New tips, if changed.
    #[serde(default)]
    pub tips: Option<Decimal>,
    /// New deductibles, if changed.
    #[serde(default)]
    pub deductibles: Option<Decimal>,
    /// New review state, if changed.
    #[serde(default)]
    pub status: Option<PayrollStatus>,
}

impl PayrollEdit {
    /// Creates an edit that changes nothing yet.
    pub fn new(key: PayrollKey) -> Self {
        Self {
            key,
            tips: None,
            deductibles: None,
            status: None,
        }
    }

    /// Sets the tips amount.
    pub fn with_tips(mut self, tips: Decimal) -> Self {
        self.tips = Some(tips);
        self
    }

    /// Sets the deductibles amount.
    pub fn with_deductibles(mut self, deductibles: Decimal) -> Self {
        self.deductibles = Some(deductibles);
        self
    }

    /// Sets the review state.
    pub fn with_status(mut self, status: PayrollStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Rejects negative amounts.
    pub fn validate(&self) -> EngineResult<()> {
        for (field, value) in [("tips", self.tips), ("deductibles", self.deductibles)] {
            match value {
                Some(value) if value < Decimal::ZERO => {
                    return Err(EngineError::InvalidAmount {
                        field: field.to_string(),
                        value,
                    });
                }
                _ => {}
            }
        }
        Ok(())
    }
}
