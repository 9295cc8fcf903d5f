//! Driver tip entries.
//!
//! A tip entry records what one driver received on one day, broken down by
//! delivery platform. Totals are never stored: they are recomputed from the
//! per-platform amounts every time they are read or serialized.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize, Serializer};

/// Share of a tip total the driver keeps after the fixed 10% platform fee.
pub const ADJUSTED_TIP_FACTOR: Decimal = Decimal::from_parts(9, 0, 0, false, 1);

/// Rounds a monetary amount to cents, midpoint away from zero.
///
/// Aggregates keep full precision; this is applied at display time and to
/// the adjusted tip total.
///
/// # Example
///
/// ```
/// use roster_engine::models::round_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_currency(Decimal::new(10125, 3)), Decimal::new(1013, 2)); // 10.125 -> 10.13
/// ```
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// One driver's tips for one day.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TipEntry {
    /// Unique identifier for the entry.
    pub id: String,
    /// The driver who received the tips.
    pub driver_id: String,
    /// The day the tips were received.
    pub date: NaiveDate,
    /// Amount received per platform name.
    #[serde(default)]
    pub platforms: BTreeMap<String, Decimal>,
}

impl TipEntry {
    /// Sum of the per-platform amounts.
    pub fn total(&self) -> Decimal {
        self.platforms.values().copied().sum()
    }

    /// The total after the platform fee, rounded to cents.
    ///
    /// # Example
    ///
    /// ```
    /// use roster_engine::models::TipEntry;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    /// use std::collections::BTreeMap;
    ///
    /// let mut platforms = BTreeMap::new();
    /// platforms.insert("doordash".to_string(), Decimal::new(2000, 2));
    /// platforms.insert("ubereats".to_string(), Decimal::new(1550, 2));
    ///
    /// let entry = TipEntry {
    ///     id: "tip_001".to_string(),
    ///     driver_id: "drv_001".to_string(),
    ///     date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
    ///     platforms,
    /// };
    /// assert_eq!(entry.total(), Decimal::new(3550, 2));
    /// assert_eq!(entry.adjusted_total(), Decimal::new(3195, 2));
    /// ```
    pub fn adjusted_total(&self) -> Decimal {
        round_currency(self.total() * ADJUSTED_TIP_FACTOR)
    }

    /// Sets one platform's amount; totals follow automatically.
    pub fn set_platform_amount(&mut self, platform: impl Into<String>, amount: Decimal) {
        self.platforms.insert(platform.into(), amount);
    }

    /// Removes a platform from the entry.
    pub fn remove_platform(&mut self, platform: &str) -> Option<Decimal> {
        self.platforms.remove(platform)
    }
}

#[derive(Serialize)]
struct TipEntryView<'a> {
    id: &'a str,
    driver_id: &'a str,
    date: NaiveDate,
    platforms: &'a BTreeMap<String, Decimal>,
    total: Decimal,
    adjusted_total: Decimal,
}

impl Serialize for TipEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        TipEntryView {
            id: &self.id,
            driver_id: &self.driver_id,
            date: self.date,
            platforms: &self.platforms,
            total: self.total(),
            adjusted_total: self.adjusted_total(),
        }
        .serialize(serializer)
    }
}
