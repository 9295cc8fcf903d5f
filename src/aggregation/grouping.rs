//! Grouping of shifts by store.

use std::collections::BTreeMap;

use crate::models::Shift;

/// Groups shifts by store id.
///
/// Stores come out in ascending id order and each group is ordered by
/// (date, start time, person id, id), whatever the input order.
///
/// # Examples
///
/// ```
/// use roster_engine::aggregation::group_by_store;
/// use roster_engine::models::{Shift, ShiftKind};
/// use chrono::{NaiveDate, NaiveTime};
///
/// let shift = |id: &str, store_id: &str| Shift {
///     id: id.to_string(),
///     person_id: "emp_001".to_string(),
///     store_id: store_id.to_string(),
///     date: NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
///     start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
///     kind: ShiftKind::Employee,
/// };
/// let shifts = vec![shift("sh_1", "store_b"), shift("sh_2", "store_a")];
///
/// let groups = group_by_store(&shifts);
/// let stores: Vec<&str> = groups.keys().map(String::as_str).collect();
/// assert_eq!(stores, vec!["store_a", "store_b"]);
/// ```
pub fn group_by_store<'a, I>(shifts: I) -> BTreeMap<String, Vec<&'a Shift>>
where
    I: IntoIterator<Item = &'a Shift>,
{
    let mut groups: BTreeMap<String, Vec<&'a Shift>> = BTreeMap::new();
    for shift in shifts {
        groups.entry(shift.store_id.clone()).or_default().push(shift);
    }
    for group in groups.values_mut() {
        group.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    }
    groups
}
