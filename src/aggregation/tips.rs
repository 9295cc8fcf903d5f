//! Driver tip totals.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::TipEntry;
use crate::roster::RosterStore;

/// Sums over a set of tip entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TipTotals {
    /// Sum of entry totals.
    pub total: Decimal,
    /// Sum of per-entry adjusted totals.
    pub adjusted_total: Decimal,
    /// Number of entries summed.
    pub entries: usize,
}

/// Sums the totals and adjusted totals of `entries`.
///
/// The adjusted figure is the sum of each entry's rounded adjusted total,
/// matching what each driver was shown per entry.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use roster_engine::aggregation::weekly_tip_total;
/// use roster_engine::models::TipEntry;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let entry = |id: &str, cents: i64| TipEntry {
///     id: id.to_string(),
///     driver_id: "drv_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
///     platforms: BTreeMap::from([("doordash".to_string(), Decimal::new(cents, 2))]),
/// };
/// let entries = vec![entry("t1", 1000), entry("t2", 2000)];
///
/// let totals = weekly_tip_total(&entries);
/// assert_eq!(totals.total, Decimal::new(30, 0));
/// assert_eq!(totals.adjusted_total, Decimal::new(27, 0));
/// ```
pub fn weekly_tip_total<'a, I>(entries: I) -> TipTotals
where
    I: IntoIterator<Item = &'a TipEntry>,
{
    entries
        .into_iter()
        .fold(TipTotals::default(), |mut totals, entry| {
            totals.total += entry.total();
            totals.adjusted_total += entry.adjusted_total();
            totals.entries += 1;
            totals
        })
}

/// One driver's tips over a set of entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverTips {
    /// The driver id.
    pub driver_id: String,
    /// The driver's name, or the unknown label.
    pub name: String,
    /// Every amount received per platform, in entry order.
    pub platforms: BTreeMap<String, Vec<Decimal>>,
    /// Sum per platform.
    pub platform_totals: BTreeMap<String, Decimal>,
    /// Ids of the summed entries, for editing and deleting.
    pub entry_ids: Vec<String>,
    /// Sum of entry totals.
    pub total: Decimal,
    /// Sum of per-entry adjusted totals.
    pub adjusted_total: Decimal,
}

/// Breaks `entries` down per driver, ordered by driver id.
///
/// Drivers no longer on the roster are named with the roster's unknown
/// label.
pub fn tips_by_driver<'a, I>(entries: I, roster: &RosterStore) -> Vec<DriverTips>
where
    I: IntoIterator<Item = &'a TipEntry>,
{
    let mut by_driver: BTreeMap<&str, DriverTips> = BTreeMap::new();

    for entry in entries {
        let driver = by_driver
            .entry(entry.driver_id.as_str())
            .or_insert_with(|| DriverTips {
                driver_id: entry.driver_id.clone(),
                name: roster.display_name(&entry.driver_id).to_string(),
                platforms: BTreeMap::new(),
                platform_totals: BTreeMap::new(),
                entry_ids: Vec::new(),
                total: Decimal::ZERO,
                adjusted_total: Decimal::ZERO,
            });

        for (platform, amount) in &entry.platforms {
            driver
                .platforms
                .entry(platform.clone())
                .or_default()
                .push(*amount);
            *driver
                .platform_totals
                .entry(platform.clone())
                .or_insert(Decimal::ZERO) += *amount;
        }
        driver.entry_ids.push(entry.id.clone());
        driver.total += entry.total();
        driver.adjusted_total += entry.adjusted_total();
    }

    by_driver.into_values().collect()
}
