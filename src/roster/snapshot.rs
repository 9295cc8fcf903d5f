//! Raw snapshot records handed over by the host.
//!
//! The host's document store gives no schema guarantees, so every record
//! field is optional here. Conversion into the domain models happens one
//! record at a time; a record that cannot be converted becomes a
//! [`DataIssue::MalformedRecord`] and the rest of the snapshot still loads.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::models::{
    DataIssue, DayHours, PayrollEntry, PayrollStatus, Person, RecordKind, Role, Shift, ShiftKind,
    Store, TipEntry, normalize_hours, parse_clock_time,
};

/// A person as stored by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonRecord {
    /// Document id.
    pub id: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// `employee`, `driver`, `manager` or `admin`.
    pub role: Option<String>,
    /// Home store id; an empty string means none.
    pub store_id: Option<String>,
    /// Hourly rate. The source forms save it as `pay`.
    #[serde(alias = "pay")]
    pub hourly_pay: Option<Decimal>,
    /// Contact email.
    pub email: Option<String>,
    /// Whether the login has been activated.
    pub claimed: Option<bool>,
}

/// A store as stored by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreRecord {
    /// Document id.
    pub id: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Free-form location.
    pub location: Option<String>,
    /// Opening hours keyed by weekday name.
    pub hours: Option<BTreeMap<String, DayHours>>,
}

/// A shift as stored by the host.
///
/// The employee and driver calendars store the person under different field
/// names; all of them are accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShiftRecord {
    /// Document id.
    pub id: Option<String>,
    /// The person working the shift.
    #[serde(alias = "employee_id", alias = "driver_id", alias = "manager_id")]
    pub person_id: Option<String>,
    /// The store the shift is worked at.
    pub store_id: Option<String>,
    /// `YYYY-MM-DD`.
    pub date: Option<String>,
    /// `HH:MM`.
    pub start_time: Option<String>,
    /// `HH:MM`.
    pub end_time: Option<String>,
    /// `employee` or `driver`; defaults to `employee`.
    pub kind: Option<String>,
}

/// One platform line of a tip form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformTipRecord {
    /// Platform name.
    pub platform: String,
    /// Amount received.
    pub amount: Decimal,
}

/// Per-platform tip amounts, either as a mapping or as the form's line list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlatformsRecord {
    /// `{"doordash": "12.00"}`
    Map(BTreeMap<String, Decimal>),
    /// `[{"platform": "doordash", "amount": "12.00"}]`
    List(Vec<PlatformTipRecord>),
}

/// A driver tip entry as stored by the host.
///
/// Stored totals are deliberately not read; they are recomputed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TipEntryRecord {
    /// Document id.
    pub id: Option<String>,
    /// The driver who received the tips.
    #[serde(alias = "driverId")]
    pub driver_id: Option<String>,
    /// `YYYY-MM-DD`.
    pub date: Option<String>,
    /// Per-platform amounts.
    pub platforms: Option<PlatformsRecord>,
}

/// Nested tips/deductibles object used by older payroll documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TipsAndDeductiblesRecord {
    /// Tips.
    pub tips: Option<Decimal>,
    /// Deductibles.
    pub deductibles: Option<Decimal>,
}

/// A weekly payroll entry as stored by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PayrollEntryRecord {
    /// The person being paid.
    pub person_id: Option<String>,
    /// Store filter; an empty string means "All Stores".
    pub store_id: Option<String>,
    /// `YYYY-MM-DD`.
    pub week_start: Option<String>,
    /// Stored hours.
    pub total_hours: Option<Decimal>,
    /// Stored earnings.
    pub total_earnings: Option<Decimal>,
    /// Tips.
    pub tips: Option<Decimal>,
    /// Deductibles.
    pub deductibles: Option<Decimal>,
    /// Older documents nest tips and deductibles here.
    pub tips_and_deductibles: Option<TipsAndDeductiblesRecord>,
    /// `ready` or `not_ready`.
    pub status: Option<PayrollStatus>,
}

/// Everything the host fetched for one render.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterSnapshot {
    /// Employees, drivers, managers and admins.
    #[serde(default)]
    pub people: Vec<PersonRecord>,
    /// Stores.
    #[serde(default)]
    pub stores: Vec<StoreRecord>,
    /// Employee and driver shifts.
    #[serde(default)]
    pub shifts: Vec<ShiftRecord>,
    /// Driver tip entries.
    #[serde(default)]
    pub tip_entries: Vec<TipEntryRecord>,
    /// Weekly payroll entries.
    #[serde(default)]
    pub payroll_entries: Vec<PayrollEntryRecord>,
    /// Records rejected before conversion, e.g. by [`RosterSnapshot::from_json`].
    #[serde(skip)]
    pub rejected: Vec<DataIssue>,
}

#[derive(Deserialize)]
struct JsonSnapshot {
    #[serde(default)]
    people: Vec<serde_json::Value>,
    #[serde(default)]
    stores: Vec<serde_json::Value>,
    #[serde(default)]
    shifts: Vec<serde_json::Value>,
    #[serde(default)]
    tip_entries: Vec<serde_json::Value>,
    #[serde(default)]
    payroll_entries: Vec<serde_json::Value>,
}

impl RosterSnapshot {
    /// Parses a snapshot from JSON.
    ///
    /// Only a document that is not a JSON object with array collections is an
    /// error. Individual records that do not fit their record type are
    /// collected in [`rejected`](RosterSnapshot::rejected).
    ///
    /// # Example
    ///
    /// ```
    /// use roster_engine::roster::RosterSnapshot;
    ///
    /// let snapshot = RosterSnapshot::from_json(r#"{
    ///     "people": [{"id": "emp_001", "name": "Dana", "role": "employee", "pay": 20}],
    ///     "shifts": [{"id": "sh_1", "hourly": ["not", "a", "shift"], "date": 5}]
    /// }"#).unwrap();
    /// assert_eq!(snapshot.people.len(), 1);
    /// assert_eq!(snapshot.rejected.len(), 1);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let raw: JsonSnapshot = serde_json::from_str(json)?;
        let mut rejected = Vec::new();

        let snapshot = RosterSnapshot {
            people: decode_all(raw.people, RecordKind::Person, &mut rejected),
            stores: decode_all(raw.stores, RecordKind::Store, &mut rejected),
            shifts: decode_all(raw.shifts, RecordKind::Shift, &mut rejected),
            tip_entries: decode_all(raw.tip_entries, RecordKind::TipEntry, &mut rejected),
            payroll_entries: decode_all(
                raw.payroll_entries,
                RecordKind::PayrollEntry,
                &mut rejected,
            ),
            rejected,
        };
        Ok(snapshot)
    }
}

fn decode_all<T: DeserializeOwned>(
    values: Vec<serde_json::Value>,
    kind: RecordKind,
    rejected: &mut Vec<DataIssue>,
) -> Vec<T> {
    values
        .into_iter()
        .filter_map(|value| {
            let id = value
                .get("id")
                .and_then(|id| id.as_str())
                .map(str::to_string);
            match serde_json::from_value::<T>(value) {
                Ok(record) => Some(record),
                Err(e) => {
                    rejected.push(DataIssue::MalformedRecord {
                        kind,
                        id,
                        reason: e.to_string(),
                    });
                    None
                }
            }
        })
        .collect()
}

/// Treats missing and blank strings alike.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn malformed(kind: RecordKind, id: Option<&str>, reason: impl Into<String>) -> DataIssue {
    DataIssue::MalformedRecord {
        kind,
        id: id.map(str::to_string),
        reason: reason.into(),
    }
}

fn require(
    value: Option<String>,
    field: &str,
    kind: RecordKind,
    id: Option<&str>,
) -> Result<String, DataIssue> {
    present(value).ok_or_else(|| malformed(kind, id, format!("missing field `{}`", field)))
}

fn parse_date(
    value: Option<String>,
    field: &str,
    kind: RecordKind,
    id: Option<&str>,
) -> Result<NaiveDate, DataIssue> {
    let raw = require(value, field, kind, id)?;
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| malformed(kind, id, format!("invalid date `{}` in `{}`", raw, field)))
}

impl TryFrom<PersonRecord> for Person {
    type Error = DataIssue;

    fn try_from(record: PersonRecord) -> Result<Self, Self::Error> {
        let kind = RecordKind::Person;
        let id = require(record.id, "id", kind, None)?;
        let name = require(record.name, "name", kind, Some(&id))?;
        let role_name = require(record.role, "role", kind, Some(&id))?;
        let role = match role_name.trim().to_lowercase().as_str() {
            "employee" => Role::Employee,
            "driver" => Role::Driver,
            "manager" => Role::Manager,
            "admin" => Role::Admin,
            other => return Err(malformed(kind, Some(&id), format!("unknown role `{}`", other))),
        };
        let hourly_pay = record.hourly_pay.unwrap_or(Decimal::ZERO);
        if hourly_pay < Decimal::ZERO {
            return Err(malformed(
                kind,
                Some(&id),
                format!("negative hourly pay {}", hourly_pay),
            ));
        }

        Ok(Person {
            id,
            name,
            role,
            store_id: present(record.store_id),
            hourly_pay,
            email: record.email.unwrap_or_default(),
            claimed: record.claimed.unwrap_or(false),
        })
    }
}

impl TryFrom<StoreRecord> for Store {
    type Error = DataIssue;

    fn try_from(record: StoreRecord) -> Result<Self, Self::Error> {
        let kind = RecordKind::Store;
        let id = require(record.id, "id", kind, None)?;
        let name = require(record.name, "name", kind, Some(&id))?;
        let hours = normalize_hours(record.hours.unwrap_or_default());

        Ok(Store {
            id,
            name,
            location: record.location.unwrap_or_default(),
            hours,
        })
    }
}

impl TryFrom<ShiftRecord> for Shift {
    type Error = DataIssue;

    fn try_from(record: ShiftRecord) -> Result<Self, Self::Error> {
        let kind = RecordKind::Shift;
        let id = require(record.id, "id", kind, None)?;
        let person_id = require(record.person_id, "person_id", kind, Some(&id))?;
        let store_id = require(record.store_id, "store_id", kind, Some(&id))?;
        let date = parse_date(record.date, "date", kind, Some(&id))?;

        let start_raw = require(record.start_time, "start_time", kind, Some(&id))?;
        let end_raw = require(record.end_time, "end_time", kind, Some(&id))?;
        let start_time =
            parse_clock_time(&start_raw).map_err(|e| malformed(kind, Some(&id), e.to_string()))?;
        let end_time =
            parse_clock_time(&end_raw).map_err(|e| malformed(kind, Some(&id), e.to_string()))?;

        let shift_kind = match present(record.kind).map(|k| k.trim().to_lowercase()) {
            None => ShiftKind::Employee,
            Some(k) if k == "employee" => ShiftKind::Employee,
            Some(k) if k == "driver" => ShiftKind::Driver,
            Some(other) => {
                return Err(malformed(
                    kind,
                    Some(&id),
                    format!("unknown shift kind `{}`", other),
                ));
            }
        };

        Ok(Shift {
            id,
            person_id,
            store_id,
            date,
            start_time,
            end_time,
            kind: shift_kind,
        })
    }
}

impl TryFrom<TipEntryRecord> for TipEntry {
    type Error = DataIssue;

    fn try_from(record: TipEntryRecord) -> Result<Self, Self::Error> {
        let kind = RecordKind::TipEntry;
        let id = require(record.id, "id", kind, None)?;
        let driver_id = require(record.driver_id, "driver_id", kind, Some(&id))?;
        let date = parse_date(record.date, "date", kind, Some(&id))?;

        let mut platforms: BTreeMap<String, Decimal> = BTreeMap::new();
        match record.platforms {
            None => {}
            Some(PlatformsRecord::Map(map)) => platforms = map,
            Some(PlatformsRecord::List(lines)) => {
                // The form allows the same platform on several lines.
                for line in lines {
                    *platforms.entry(line.platform).or_insert(Decimal::ZERO) += line.amount;
                }
            }
        }
        if let Some((platform, amount)) = platforms.iter().find(|(_, a)| **a < Decimal::ZERO) {
            return Err(malformed(
                kind,
                Some(&id),
                format!("negative tip {} for `{}`", amount, platform),
            ));
        }

        Ok(TipEntry {
            id,
            driver_id,
            date,
            platforms,
        })
    }
}

impl TryFrom<PayrollEntryRecord> for PayrollEntry {
    type Error = DataIssue;

    fn try_from(record: PayrollEntryRecord) -> Result<Self, Self::Error> {
        let kind = RecordKind::PayrollEntry;
        let person_id = require(record.person_id, "person_id", kind, None)?;
        let week_start = parse_date(record.week_start, "week_start", kind, Some(&person_id))?;

        let nested = record.tips_and_deductibles.unwrap_or_default();
        let tips = record.tips.or(nested.tips).unwrap_or(Decimal::ZERO);
        let deductibles = record
            .deductibles
            .or(nested.deductibles)
            .unwrap_or(Decimal::ZERO);
        if tips < Decimal::ZERO || deductibles < Decimal::ZERO {
            return Err(malformed(
                kind,
                Some(&person_id),
                "tips and deductibles must not be negative",
            ));
        }

        let total_earnings = record.total_earnings.unwrap_or(Decimal::ZERO);
        Ok(PayrollEntry {
            person_id,
            store_id: present(record.store_id),
            week_start,
            total_hours: record.total_hours.unwrap_or(Decimal::ZERO),
            total_earnings,
            tips,
            deductibles,
            final_earnings: total_earnings + tips - deductibles,
            status: record.status.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn reason_of(issue: DataIssue) -> String {
        match issue {
            DataIssue::MalformedRecord { reason, .. } => reason,
            other => panic!("Expected MalformedRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_person_from_source_shape() {
        let record: PersonRecord = serde_json::from_str(
            r#"{"id": "emp_001", "name": "Dana", "role": "Employee", "store_id": "", "pay": "18.25"}"#,
        )
        .unwrap();
        let person = Person::try_from(record).unwrap();
        assert_eq!(person.role, Role::Employee);
        assert_eq!(person.store_id, None);
        assert_eq!(person.hourly_pay, Decimal::new(1825, 2));
        assert!(!person.claimed);
    }

    #[test]
    fn test_person_without_id_is_malformed() {
        let record = PersonRecord {
            name: Some("Nobody".to_string()),
            ..Default::default()
        };
        assert_eq!(
            reason_of(Person::try_from(record).unwrap_err()),
            "missing field `id`"
        );
    }

    #[test]
    fn test_person_with_negative_pay_is_malformed() {
        let record = PersonRecord {
            id: Some("emp_001".to_string()),
            name: Some("Dana".to_string()),
            role: Some("employee".to_string()),
            hourly_pay: Some(Decimal::new(-1, 0)),
            ..Default::default()
        };
        assert!(Person::try_from(record).is_err());
    }

    #[test]
    fn test_shift_accepts_source_person_aliases() {
        let record: ShiftRecord = serde_json::from_str(
            r#"{"id": "sh_1", "driver_id": "drv_001", "store_id": "store_a",
                "date": "2026-01-12", "start_time": "10:00", "end_time": "14:00", "kind": "driver"}"#,
        )
        .unwrap();
        let shift = Shift::try_from(record).unwrap();
        assert_eq!(shift.person_id, "drv_001");
        assert_eq!(shift.kind, ShiftKind::Driver);
        assert_eq!(shift.start_time, NaiveTime::from_hms_opt(10, 0, 0).unwrap());
    }

    #[test]
    fn test_shift_with_blank_time_is_malformed() {
        let record = ShiftRecord {
            id: Some("sh_1".to_string()),
            person_id: Some("emp_001".to_string()),
            store_id: Some("store_a".to_string()),
            date: Some("2026-01-12".to_string()),
            start_time: Some("".to_string()),
            end_time: Some("17:00".to_string()),
            kind: None,
        };
        assert_eq!(
            reason_of(Shift::try_from(record).unwrap_err()),
            "missing field `start_time`"
        );
    }

    #[test]
    fn test_shift_with_impossible_date_is_malformed() {
        let record = ShiftRecord {
            id: Some("sh_1".to_string()),
            person_id: Some("emp_001".to_string()),
            store_id: Some("store_a".to_string()),
            date: Some("2026-02-30".to_string()),
            start_time: Some("09:00".to_string()),
            end_time: Some("17:00".to_string()),
            kind: None,
        };
        assert!(reason_of(Shift::try_from(record).unwrap_err()).contains("invalid date"));
    }

    #[test]
    fn test_inverted_shift_still_converts() {
        let record = ShiftRecord {
            id: Some("sh_1".to_string()),
            person_id: Some("emp_001".to_string()),
            store_id: Some("store_a".to_string()),
            date: Some("2026-01-12".to_string()),
            start_time: Some("18:00".to_string()),
            end_time: Some("17:00".to_string()),
            kind: None,
        };
        let shift = Shift::try_from(record).unwrap();
        assert!(!shift.has_valid_time_range());
    }

    #[test]
    fn test_tip_entry_from_line_list_sums_duplicates() {
        let record: TipEntryRecord = serde_json::from_str(
            r#"{"id": "tip_1", "driverId": "drv_001", "date": "2026-01-12",
                "platforms": [
                    {"platform": "doordash", "amount": "5.00"},
                    {"platform": "doordash", "amount": "2.50"},
                    {"platform": "ubereats", "amount": "4"}
                ],
                "total": "1000", "adjustedTotal": "900"}"#,
        )
        .unwrap();
        let entry = TipEntry::try_from(record).unwrap();
        assert_eq!(entry.platforms["doordash"], Decimal::new(750, 2));
        assert_eq!(entry.total(), Decimal::new(1150, 2));
    }

    #[test]
    fn test_tip_entry_from_map() {
        let record: TipEntryRecord = serde_json::from_str(
            r#"{"id": "tip_1", "driver_id": "drv_001", "date": "2026-01-12",
                "platforms": {"grubhub": "3.10"}}"#,
        )
        .unwrap();
        let entry = TipEntry::try_from(record).unwrap();
        assert_eq!(entry.total(), Decimal::new(310, 2));
    }

    #[test]
    fn test_payroll_entry_reads_nested_tips() {
        let record: PayrollEntryRecord = serde_json::from_str(
            r#"{"person_id": "emp_001", "store_id": "", "week_start": "2026-01-12",
                "total_earnings": "160",
                "tips_and_deductibles": {"tips": "50", "deductibles": "10"}}"#,
        )
        .unwrap();
        let entry = PayrollEntry::try_from(record).unwrap();
        assert_eq!(entry.store_id, None);
        assert_eq!(entry.tips, Decimal::new(50, 0));
        assert_eq!(entry.final_earnings, Decimal::new(200, 0));
        assert_eq!(entry.status, PayrollStatus::NotReady);
    }

    #[test]
    fn test_from_json_rejects_only_bad_records() {
        let snapshot = RosterSnapshot::from_json(
            r#"{
                "people": [
                    {"id": "emp_001", "name": "Dana", "role": "employee", "pay": 20},
                    {"id": "emp_002", "name": "Kim", "role": "employee", "pay": {"nested": true}}
                ],
                "stores": [{"id": "store_a", "name": "Downtown"}]
            }"#,
        )
        .unwrap();
        assert_eq!(snapshot.people.len(), 1);
        assert_eq!(snapshot.stores.len(), 1);
        assert_eq!(snapshot.rejected.len(), 1);
        match &snapshot.rejected[0] {
            DataIssue::MalformedRecord { kind, id, .. } => {
                assert_eq!(*kind, RecordKind::Person);
                assert_eq!(id.as_deref(), Some("emp_002"));
            }
            other => panic!("Expected MalformedRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_from_json_rejects_non_object_document() {
        assert!(RosterSnapshot::from_json("[1, 2, 3]").is_err());
    }
}
