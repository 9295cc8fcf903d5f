//! In-memory roster of people, stores, shifts, tips and payroll entries.
//!
//! The host fetches raw records from its own persistence layer and hands
//! them over as a [`RosterSnapshot`]. [`RosterStore::load`] converts them,
//! drops what cannot be used, records a [`DataIssue`] for every problem and
//! rebuilds the lookup indices. Everything else in the crate reads from the
//! store and never writes to it.

mod snapshot;

pub use snapshot::{
    PayrollEntryRecord, PersonRecord, PlatformTipRecord, PlatformsRecord, RosterSnapshot,
    ShiftRecord, StoreRecord, TipEntryRecord, TipsAndDeductiblesRecord,
};

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::calendar::WeekWindow;
use crate::config::SchedulerConfig;
use crate::models::{
    DataIssue, PayrollEntry, PayrollKey, Person, RecordKind, Shift, Store, TipEntry,
};

/// The loaded roster with its lookup indices.
///
/// # Example
///
/// ```
/// use roster_engine::roster::{RosterSnapshot, RosterStore};
///
/// let snapshot = RosterSnapshot::from_json(r#"{
///     "people": [{"id": "emp_001", "name": "Dana", "role": "employee", "store_id": "store_a", "pay": 20}],
///     "stores": [{"id": "store_a", "name": "Downtown"}],
///     "shifts": [{"id": "sh_1", "employee_id": "emp_001", "store_id": "store_a",
///                 "date": "2026-01-12", "start_time": "09:00", "end_time": "17:00"}]
/// }"#).unwrap();
///
/// let roster = RosterStore::from_snapshot(snapshot);
/// assert_eq!(roster.people_by_store("store_a").len(), 1);
/// assert_eq!(roster.display_name("emp_001"), "Dana");
/// assert_eq!(roster.display_name("emp_gone"), "Unknown");
/// assert!(roster.issues().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RosterStore {
    config: SchedulerConfig,
    people: BTreeMap<String, Person>,
    stores: BTreeMap<String, Store>,
    /// Sorted by [`Shift::sort_key`].
    shifts: Vec<Shift>,
    /// Sorted by (date, driver id, id).
    tips: Vec<TipEntry>,
    payroll: BTreeMap<PayrollKey, PayrollEntry>,
    people_by_store: HashMap<String, Vec<String>>,
    /// Positions into `shifts`, ascending.
    shifts_by_person: HashMap<String, Vec<usize>>,
    issues: Vec<DataIssue>,
}

impl RosterStore {
    /// Creates an empty roster that uses `config` for labels.
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Creates a roster from `snapshot` with default settings.
    pub fn from_snapshot(snapshot: RosterSnapshot) -> Self {
        let mut roster = Self::default();
        roster.load(snapshot);
        roster
    }

    /// Creates a roster from `snapshot` with the given settings.
    pub fn with_config(config: SchedulerConfig, snapshot: RosterSnapshot) -> Self {
        let mut roster = Self::new(config);
        roster.load(snapshot);
        roster
    }

    /// Replaces the loaded roster with `snapshot` and rebuilds the indices.
    ///
    /// Malformed records are dropped. Every problem found is available from
    /// [`issues`](RosterStore::issues) until the next load.
    pub fn load(&mut self, snapshot: RosterSnapshot) {
        let RosterSnapshot {
            people,
            stores,
            shifts,
            tip_entries,
            payroll_entries,
            rejected,
        } = snapshot;

        self.people.clear();
        self.stores.clear();
        self.shifts.clear();
        self.tips.clear();
        self.payroll.clear();
        self.people_by_store.clear();
        self.shifts_by_person.clear();
        self.issues = Vec::new();

        for issue in rejected {
            self.report_dropped(issue);
        }

        for record in people {
            match Person::try_from(record) {
                Ok(person) if self.people.contains_key(&person.id) => {
                    let issue = duplicate_id(RecordKind::Person, &person.id);
                    self.report_dropped(issue);
                }
                Ok(person) => {
                    self.people.insert(person.id.clone(), person);
                }
                Err(issue) => self.report_dropped(issue),
            }
        }

        for record in stores {
            match Store::try_from(record) {
                Ok(store) if self.stores.contains_key(&store.id) => {
                    let issue = duplicate_id(RecordKind::Store, &store.id);
                    self.report_dropped(issue);
                }
                Ok(store) => {
                    for (weekday, reason) in store.validate_hours() {
                        warn!(
                            store_id = %store.id,
                            weekday = %weekday,
                            reason = %reason,
                            "Store has unusable opening hours"
                        );
                        self.issues.push(DataIssue::InvalidStoreHours {
                            store_id: store.id.clone(),
                            weekday,
                            reason,
                        });
                    }
                    self.stores.insert(store.id.clone(), store);
                }
                Err(issue) => self.report_dropped(issue),
            }
        }

        let mut seen_shift_ids = HashSet::new();
        for record in shifts {
            match Shift::try_from(record) {
                Ok(shift) if !seen_shift_ids.insert(shift.id.clone()) => {
                    let issue = duplicate_id(RecordKind::Shift, &shift.id);
                    self.report_dropped(issue);
                }
                Ok(shift) => {
                    if let Some(issue) = shift.time_range_issue() {
                        warn!(
                            shift_id = %shift.id,
                            date = %shift.date,
                            "Shift does not end after it starts; counting zero hours"
                        );
                        self.issues.push(issue);
                    }
                    self.shifts.push(shift);
                }
                Err(issue) => self.report_dropped(issue),
            }
        }
        self.shifts.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

        let mut seen_tip_ids = HashSet::new();
        for record in tip_entries {
            match TipEntry::try_from(record) {
                Ok(entry) if !seen_tip_ids.insert(entry.id.clone()) => {
                    let issue = duplicate_id(RecordKind::TipEntry, &entry.id);
                    self.report_dropped(issue);
                }
                Ok(entry) => self.tips.push(entry),
                Err(issue) => self.report_dropped(issue),
            }
        }
        self.tips.sort_by(|a, b| {
            (a.date, &a.driver_id, &a.id).cmp(&(b.date, &b.driver_id, &b.id))
        });

        for record in payroll_entries {
            match PayrollEntry::try_from(record) {
                Ok(entry) => {
                    let key = entry.key();
                    if self.payroll.insert(key.clone(), entry).is_some() {
                        warn!(
                            person_id = %key.person_id,
                            week_start = %key.week_start,
                            "Duplicate payroll entry; keeping the last one"
                        );
                        self.issues.push(DataIssue::DuplicatePayrollEntry {
                            person_id: key.person_id,
                            week_start: key.week_start,
                            store_id: key.store_id,
                        });
                    }
                }
                Err(issue) => self.report_dropped(issue),
            }
        }

        self.rebuild_indices();
        self.check_references();

        debug!(
            people = self.people.len(),
            stores = self.stores.len(),
            shifts = self.shifts.len(),
            tip_entries = self.tips.len(),
            payroll_entries = self.payroll.len(),
            issues = self.issues.len(),
            "Roster loaded"
        );
    }

    fn report_dropped(&mut self, issue: DataIssue) {
        warn!(code = issue.code(), "{}", issue);
        self.issues.push(issue);
    }

    fn rebuild_indices(&mut self) {
        // People iterate in id order, so each bucket comes out sorted.
        for person in self.people.values() {
            if let Some(store_id) = &person.store_id {
                self.people_by_store
                    .entry(store_id.clone())
                    .or_default()
                    .push(person.id.clone());
            }
        }

        for (position, shift) in self.shifts.iter().enumerate() {
            self.shifts_by_person
                .entry(shift.person_id.clone())
                .or_default()
                .push(position);
        }
    }

    fn check_references(&mut self) {
        let mut missing = Vec::new();

        for person in self.people.values() {
            if let Some(store_id) = &person.store_id {
                if !self.stores.contains_key(store_id) {
                    missing.push(DataIssue::MissingReference {
                        kind: RecordKind::Person,
                        id: person.id.clone(),
                        target: RecordKind::Store,
                        target_id: store_id.clone(),
                    });
                }
            }
        }

        for shift in &self.shifts {
            if !self.people.contains_key(&shift.person_id) {
                missing.push(DataIssue::MissingReference {
                    kind: RecordKind::Shift,
                    id: shift.id.clone(),
                    target: RecordKind::Person,
                    target_id: shift.person_id.clone(),
                });
            }
            if !self.stores.contains_key(&shift.store_id) {
                missing.push(DataIssue::MissingReference {
                    kind: RecordKind::Shift,
                    id: shift.id.clone(),
                    target: RecordKind::Store,
                    target_id: shift.store_id.clone(),
                });
            }
        }

        for entry in &self.tips {
            if !self.people.contains_key(&entry.driver_id) {
                missing.push(DataIssue::MissingReference {
                    kind: RecordKind::TipEntry,
                    id: entry.id.clone(),
                    target: RecordKind::Person,
                    target_id: entry.driver_id.clone(),
                });
            }
        }

        if !missing.is_empty() {
            debug!(count = missing.len(), "Roster has dangling references");
        }
        self.issues.extend(missing);
    }

    /// Settings this roster was loaded with.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// The week containing `date`, starting on the configured week start day.
    pub fn week_containing(&self, date: NaiveDate) -> WeekWindow {
        WeekWindow::for_config(&self.config, date)
    }

    /// Looks up a person by id.
    pub fn person(&self, person_id: &str) -> Option<&Person> {
        self.people.get(person_id)
    }

    /// Looks up a store by id.
    pub fn store(&self, store_id: &str) -> Option<&Store> {
        self.stores.get(store_id)
    }

    /// All people, ordered by id.
    pub fn people(&self) -> impl Iterator<Item = &Person> {
        self.people.values()
    }

    /// All stores, ordered by id.
    pub fn stores(&self) -> impl Iterator<Item = &Store> {
        self.stores.values()
    }

    /// All shifts, ordered by (date, start time, person id, id).
    pub fn shifts(&self) -> &[Shift] {
        &self.shifts
    }

    /// All tip entries, ordered by (date, driver id, id).
    pub fn tip_entries(&self) -> &[TipEntry] {
        &self.tips
    }

    /// People whose home store is `store_id`, ordered by id.
    pub fn people_by_store(&self, store_id: &str) -> Vec<&Person> {
        self.people_by_store
            .get(store_id)
            .map(|ids| ids.iter().filter_map(|id| self.people.get(id)).collect())
            .unwrap_or_default()
    }

    /// Shifts dated `start..=end`, ordered by (date, start time, person id, id).
    pub fn shifts_in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<&Shift> {
        if end < start {
            return Vec::new();
        }
        let from = self.shifts.partition_point(|shift| shift.date < start);
        let to = self.shifts.partition_point(|shift| shift.date <= end);
        self.shifts[from..to].iter().collect()
    }

    /// Shifts of one person dated `start..=end`, in the same order as
    /// [`shifts_in_range`](RosterStore::shifts_in_range).
    ///
    /// Works for person ids that are no longer on the roster.
    pub fn shifts_for_person(
        &self,
        person_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<&Shift> {
        self.shifts_by_person
            .get(person_id)
            .map(|positions| {
                positions
                    .iter()
                    .map(|&position| &self.shifts[position])
                    .filter(|shift| shift.date >= start && shift.date <= end)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The person's name, or the configured unknown label.
    pub fn display_name(&self, person_id: &str) -> &str {
        self.people
            .get(person_id)
            .map(|person| person.name.as_str())
            .unwrap_or_else(|| self.config.unknown_label())
    }

    /// The store's name, or the configured unknown label.
    pub fn store_name(&self, store_id: &str) -> &str {
        self.stores
            .get(store_id)
            .map(|store| store.name.as_str())
            .unwrap_or_else(|| self.config.unknown_label())
    }

    /// The persisted payroll entry for `key`, if any.
    pub fn payroll_entry(&self, key: &PayrollKey) -> Option<&PayrollEntry> {
        self.payroll.get(key)
    }

    /// All persisted payroll entries, ordered by key.
    pub fn payroll_entries(&self) -> impl Iterator<Item = &PayrollEntry> {
        self.payroll.values()
    }

    /// Tip entries dated `start..=end`, optionally for one driver.
    pub fn tips_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        driver_id: Option<&str>,
    ) -> Vec<&TipEntry> {
        self.tips
            .iter()
            .filter(|entry| entry.date >= start && entry.date <= end)
            .filter(|entry| driver_id.is_none_or(|id| entry.driver_id == id))
            .collect()
    }

    /// Problems found by the last [`load`](RosterStore::load).
    pub fn issues(&self) -> &[DataIssue] {
        &self.issues
    }
}

fn duplicate_id(kind: RecordKind, id: &str) -> DataIssue {
    DataIssue::MalformedRecord {
        kind,
        id: Some(id.to_string()),
        reason: "duplicate id".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayHours, PayrollStatus, Role};
    use rust_decimal::Decimal;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn person(id: &str, store_id: Option<&str>) -> PersonRecord {
        PersonRecord {
            id: Some(id.to_string()),
            name: Some(format!("Name {}", id)),
            role: Some("employee".to_string()),
            store_id: store_id.map(str::to_string),
            hourly_pay: Some(Decimal::new(20, 0)),
            ..Default::default()
        }
    }

    fn store(id: &str) -> StoreRecord {
        StoreRecord {
            id: Some(id.to_string()),
            name: Some(format!("Store {}", id)),
            ..Default::default()
        }
    }

    fn shift(id: &str, person_id: &str, store_id: &str, date: &str, start: &str, end: &str) -> ShiftRecord {
        ShiftRecord {
            id: Some(id.to_string()),
            person_id: Some(person_id.to_string()),
            store_id: Some(store_id.to_string()),
            date: Some(date.to_string()),
            start_time: Some(start.to_string()),
            end_time: Some(end.to_string()),
            kind: None,
        }
    }

    fn create_test_roster() -> RosterStore {
        RosterStore::from_snapshot(RosterSnapshot {
            people: vec![
                person("emp_002", Some("store_a")),
                person("emp_001", Some("store_a")),
                person("emp_003", Some("store_b")),
            ],
            stores: vec![store("store_a"), store("store_b")],
            shifts: vec![
                shift("sh_3", "emp_001", "store_a", "2026-01-13", "09:00", "17:00"),
                shift("sh_2", "emp_002", "store_a", "2026-01-12", "12:00", "18:00"),
                shift("sh_1", "emp_001", "store_a", "2026-01-12", "09:00", "17:00"),
                shift("sh_4", "emp_003", "store_b", "2026-01-19", "09:00", "17:00"),
            ],
            ..Default::default()
        })
    }

    #[test]
    fn test_clean_snapshot_has_no_issues() {
        let roster = create_test_roster();
        assert!(roster.issues().is_empty());
        assert_eq!(roster.people().count(), 3);
        assert_eq!(roster.stores().count(), 2);
    }

    #[test]
    fn test_people_by_store_ordered_by_id() {
        let roster = create_test_roster();
        let ids: Vec<&str> = roster
            .people_by_store("store_a")
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["emp_001", "emp_002"]);
        assert!(roster.people_by_store("store_z").is_empty());
    }

    #[test]
    fn test_shifts_in_range_is_inclusive_and_ordered() {
        let roster = create_test_roster();
        let ids: Vec<&str> = roster
            .shifts_in_range(make_date("2026-01-12"), make_date("2026-01-18"))
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(ids, vec!["sh_1", "sh_2", "sh_3"]);

        let single_day = roster.shifts_in_range(make_date("2026-01-19"), make_date("2026-01-19"));
        assert_eq!(single_day.len(), 1);
    }

    #[test]
    fn test_shifts_in_inverted_range_is_empty() {
        let roster = create_test_roster();
        assert!(
            roster
                .shifts_in_range(make_date("2026-01-18"), make_date("2026-01-12"))
                .is_empty()
        );
    }

    #[test]
    fn test_shifts_for_person() {
        let roster = create_test_roster();
        let shifts = roster.shifts_for_person("emp_001", make_date("2026-01-12"), make_date("2026-01-18"));
        assert_eq!(shifts.len(), 2);
        assert_eq!(shifts[0].id, "sh_1");
        assert!(
            roster
                .shifts_for_person("emp_009", make_date("2026-01-12"), make_date("2026-01-18"))
                .is_empty()
        );
    }

    #[test]
    fn test_orphan_shift_is_kept_and_reported() {
        let roster = RosterStore::from_snapshot(RosterSnapshot {
            stores: vec![store("store_a")],
            shifts: vec![shift("sh_1", "emp_gone", "store_a", "2026-01-12", "09:00", "17:00")],
            ..Default::default()
        });
        let shifts = roster.shifts_for_person("emp_gone", make_date("2026-01-12"), make_date("2026-01-12"));
        assert_eq!(shifts.len(), 1);
        assert_eq!(roster.display_name("emp_gone"), "Unknown");
        assert_eq!(roster.issues().len(), 1);
        assert_eq!(roster.issues()[0].code(), "MISSING_REFERENCE");
    }

    #[test]
    fn test_malformed_records_are_dropped() {
        let bad_shift = shift("sh_1", "emp_001", "store_a", "2026-01-12", "9am", "17:00");
        let roster = RosterStore::from_snapshot(RosterSnapshot {
            people: vec![person("emp_001", None), PersonRecord::default()],
            stores: vec![store("store_a")],
            shifts: vec![bad_shift],
            ..Default::default()
        });
        assert_eq!(roster.people().count(), 1);
        assert!(roster.shifts().is_empty());
        let codes: Vec<&str> = roster.issues().iter().map(|i| i.code()).collect();
        assert_eq!(codes, vec!["MALFORMED_RECORD", "MALFORMED_RECORD"]);
    }

    #[test]
    fn test_inverted_shift_kept_and_flagged() {
        let roster = RosterStore::from_snapshot(RosterSnapshot {
            people: vec![person("emp_001", None)],
            stores: vec![store("store_a")],
            shifts: vec![shift("sh_1", "emp_001", "store_a", "2026-01-12", "18:00", "17:00")],
            ..Default::default()
        });
        assert_eq!(roster.shifts().len(), 1);
        assert_eq!(roster.issues()[0].code(), "INVALID_TIME_RANGE");
    }

    #[test]
    fn test_invalid_store_hours_keep_store() {
        let mut record = store("store_a");
        let mut hours = BTreeMap::new();
        hours.insert("Monday".to_string(), DayHours::new("17:00", "08:00"));
        record.hours = Some(hours);
        let roster = RosterStore::from_snapshot(RosterSnapshot {
            stores: vec![record],
            ..Default::default()
        });
        assert!(roster.store("store_a").is_some());
        match &roster.issues()[0] {
            DataIssue::InvalidStoreHours { weekday, .. } => assert_eq!(weekday, "monday"),
            other => panic!("Expected InvalidStoreHours, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_payroll_last_wins() {
        let first = PayrollEntryRecord {
            person_id: Some("emp_001".to_string()),
            week_start: Some("2026-01-12".to_string()),
            tips: Some(Decimal::new(5, 0)),
            ..Default::default()
        };
        let second = PayrollEntryRecord {
            tips: Some(Decimal::new(7, 0)),
            status: Some(PayrollStatus::Ready),
            ..first.clone()
        };
        let roster = RosterStore::from_snapshot(RosterSnapshot {
            people: vec![person("emp_001", None)],
            payroll_entries: vec![first, second],
            ..Default::default()
        });
        let key = PayrollKey {
            person_id: "emp_001".to_string(),
            week_start: make_date("2026-01-12"),
            store_id: None,
        };
        let entry = roster.payroll_entry(&key).unwrap();
        assert_eq!(entry.tips, Decimal::new(7, 0));
        assert_eq!(entry.status, PayrollStatus::Ready);
        assert_eq!(roster.issues()[0].code(), "DUPLICATE_PAYROLL_ENTRY");
    }

    #[test]
    fn test_duplicate_person_id_keeps_first() {
        let mut second = person("emp_001", None);
        second.name = Some("Impostor".to_string());
        let roster = RosterStore::from_snapshot(RosterSnapshot {
            people: vec![person("emp_001", None), second],
            ..Default::default()
        });
        assert_eq!(roster.display_name("emp_001"), "Name emp_001");
        assert_eq!(roster.issues().len(), 1);
    }

    #[test]
    fn test_load_replaces_previous_snapshot() {
        let mut roster = create_test_roster();
        roster.load(RosterSnapshot {
            people: vec![person("emp_009", None)],
            ..Default::default()
        });
        assert!(roster.person("emp_001").is_none());
        assert!(roster.shifts().is_empty());
        assert!(roster.people_by_store("store_a").is_empty());
        assert_eq!(roster.person("emp_009").map(|p| p.role), Some(Role::Employee));
    }

    #[test]
    fn test_tips_in_range_filters_driver() {
        let mut platforms = BTreeMap::new();
        platforms.insert("doordash".to_string(), Decimal::new(10, 0));
        let tip = |id: &str, driver: &str, date: &str| TipEntryRecord {
            id: Some(id.to_string()),
            driver_id: Some(driver.to_string()),
            date: Some(date.to_string()),
            platforms: Some(PlatformsRecord::Map(platforms.clone())),
        };
        let roster = RosterStore::from_snapshot(RosterSnapshot {
            tip_entries: vec![
                tip("t1", "drv_001", "2026-01-12"),
                tip("t2", "drv_002", "2026-01-13"),
                tip("t3", "drv_001", "2026-01-20"),
            ],
            ..Default::default()
        });
        let start = make_date("2026-01-12");
        let end = make_date("2026-01-18");
        assert_eq!(roster.tips_in_range(start, end, None).len(), 2);
        assert_eq!(roster.tips_in_range(start, end, Some("drv_001")).len(), 1);
    }

    #[test]
    fn test_custom_unknown_label() {
        let config = SchedulerConfig::from_file(crate::config::SchedulerFile {
            unknown_label: Some("(removed)".to_string()),
            ..Default::default()
        })
        .unwrap();
        let roster = RosterStore::with_config(config, RosterSnapshot::default());
        assert_eq!(roster.display_name("emp_001"), "(removed)");
        assert_eq!(roster.store_name("store_a"), "(removed)");
    }

    #[test]
    fn test_week_containing_follows_config() {
        let thursday = make_date("2026-01-15");
        let roster = RosterStore::default();
        assert_eq!(roster.week_containing(thursday).start(), make_date("2026-01-12"));

        let config = SchedulerConfig::default().with_week_starts_on(chrono::Weekday::Sun);
        let roster = RosterStore::new(config);
        assert_eq!(roster.week_containing(thursday).start(), make_date("2026-01-11"));
    }
}
