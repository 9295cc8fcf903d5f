//! Person model and related types.
//!
//! This module defines the Person struct and Role enum for representing
//! employees, drivers, managers and administrators on a roster.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The role a person holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// In-store staff.
    Employee,
    /// Delivery driver; the only role that records tips.
    Driver,
    /// Store manager.
    Manager,
    /// Administrator of the whole roster.
    Admin,
}

/// Represents a person who can be scheduled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Unique identifier for the person.
    pub id: String,
    /// Display name.
    pub name: String,
    /// The role this person holds.
    pub role: Role,
    /// The person's home store, if any.
    #[serde(default)]
    pub store_id: Option<String>,
    /// Hourly pay rate. Never negative.
    pub hourly_pay: Decimal,
    /// Contact email.
    #[serde(default)]
    pub email: String,
    /// Whether the person has activated a login.
    #[serde(default)]
    pub claimed: bool,
}

impl Person {
    /// Marks the account as claimed.
    ///
    /// Returns `true` only for the call that flips the flag; claiming an
    /// already claimed account is a no-op.
    ///
    /// # Examples
    ///
    /// ```
    /// use roster_engine::models::{Person, Role};
    /// use rust_decimal::Decimal;
    ///
    /// let mut person = Person {
    ///     id: "emp_001".to_string(),
    ///     name: "Dana".to_string(),
    ///     role: Role::Employee,
    ///     store_id: None,
    ///     hourly_pay: Decimal::new(20, 0),
    ///     email: "dana@example.com".to_string(),
    ///     claimed: false,
    /// };
    /// assert!(person.claim());
    /// assert!(!person.claim());
    /// assert!(person.claimed);
    /// ```
    pub fn claim(&mut self) -> bool {
        if self.claimed {
            return false;
        }
        self.claimed = true;
        true
    }

    /// Returns true if the person is a driver.
    pub fn is_driver(&self) -> bool {
        self.role == Role::Driver
    }

    /// Returns true if the person's home store is `store_id`.
    pub fn works_at(&self, store_id: &str) -> bool {
        self.store_id.as_deref() == Some(store_id)
    }
}
