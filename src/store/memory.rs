//! In-memory repository implementation.
//!
//! Used by tests, benchmarks and single-process deployments. Each table is
//! guarded by its own lock, and every check-then-act happens while the lock
//! is held, which gives the same guarantees a unique index and a
//! conditional `UPDATE ... WHERE` give in a database.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::NaiveDate;
use parking_lot::{Mutex, RwLock};

use crate::models::{
    AttendanceCompletion, AttendanceRecord, EmployeeProfile, PayrollRecord, PayrollStatus,
};

use super::{
    AttendanceFilter, AttendanceRepository, PayrollFilter, PayrollRepository, RosterRepository,
    StoreError, StoreResult, composite_key,
};

type RecordKey = (String, NaiveDate);

/// In-memory store implementing every repository trait.
#[derive(Debug, Default)]
pub struct MemoryStore {
    employees: RwLock<HashMap<String, EmployeeProfile>>,
    attendance: Mutex<BTreeMap<RecordKey, AttendanceRecord>>,
    payroll: Mutex<BTreeMap<RecordKey, PayrollRecord>>,
    /// When set, every operation fails with `Unavailable`.
    unavailable: AtomicBool,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-loaded with a roster.
    pub fn with_employees(employees: impl IntoIterator<Item = EmployeeProfile>) -> Self {
        let store = Self::new();
        for employee in employees {
            store.upsert_employee(employee);
        }
        store
    }

    /// Adds or replaces a roster entry.
    pub fn upsert_employee(&self, employee: EmployeeProfile) {
        self.employees.write().insert(employee.id.clone(), employee);
    }

    /// Simulates an outage of the backing store.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("in-memory store is offline".to_string()));
        }
        Ok(())
    }
}

impl RosterRepository for MemoryStore {
    async fn get_employee(&self, employee_id: &str) -> StoreResult<Option<EmployeeProfile>> {
        self.check_available()?;
        Ok(self.employees.read().get(employee_id).cloned())
    }

    async fn list_employees(&self) -> StoreResult<Vec<EmployeeProfile>> {
        self.check_available()?;
        let mut employees: Vec<EmployeeProfile> =
            self.employees.read().values().cloned().collect();
        employees.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(employees)
    }
}

impl AttendanceRepository for MemoryStore {
    async fn get_attendance(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> StoreResult<Option<AttendanceRecord>> {
        self.check_available()?;
        let key = (employee_id.to_string(), date);
        Ok(self.attendance.lock().get(&key).cloned())
    }

    async fn find_attendance(&self, filter: AttendanceFilter) -> StoreResult<Vec<AttendanceRecord>> {
        self.check_available()?;
        Ok(self
            .attendance
            .lock()
            .values()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect())
    }

    async fn insert_attendance(&self, record: AttendanceRecord) -> StoreResult<AttendanceRecord> {
        self.check_available()?;
        let key = (record.employee_id.clone(), record.date);
        let mut table = self.attendance.lock();
        if table.contains_key(&key) {
            return Err(StoreError::Duplicate {
                entity: "AttendanceRecord".to_string(),
                key: composite_key(&key.0, key.1),
            });
        }
        table.insert(key, record.clone());
        Ok(record)
    }

    async fn close_attendance(
        &self,
        employee_id: &str,
        date: NaiveDate,
        completion: AttendanceCompletion,
    ) -> StoreResult<AttendanceRecord> {
        self.check_available()?;
        let key = (employee_id.to_string(), date);
        let mut table = self.attendance.lock();
        let record = table.get_mut(&key).ok_or_else(|| StoreError::NotFound {
            entity: "AttendanceRecord".to_string(),
            key: composite_key(employee_id, date),
        })?;

        if !record.is_open() {
            return Err(StoreError::PreconditionFailed {
                entity: "AttendanceRecord".to_string(),
                key: composite_key(employee_id, date),
                message: "record is already closed".to_string(),
            });
        }

        record.complete(&completion);
        Ok(record.clone())
    }
}

impl PayrollRepository for MemoryStore {
    async fn get_payroll(
        &self,
        employee_id: &str,
        period_start: NaiveDate,
    ) -> StoreResult<Option<PayrollRecord>> {
        self.check_available()?;
        let key = (employee_id.to_string(), period_start);
        Ok(self.payroll.lock().get(&key).cloned())
    }

    async fn find_payroll(&self, filter: PayrollFilter) -> StoreResult<Vec<PayrollRecord>> {
        self.check_available()?;
        Ok(self
            .payroll
            .lock()
            .values()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect())
    }

    async fn insert_payroll(&self, record: PayrollRecord) -> StoreResult<PayrollRecord> {
        self.check_available()?;
        let key = (record.employee_id.clone(), record.pay_period_start);
        let mut table = self.payroll.lock();
        if table.contains_key(&key) {
            return Err(StoreError::Duplicate {
                entity: "PayrollRecord".to_string(),
                key: composite_key(&key.0, key.1),
            });
        }
        table.insert(key, record.clone());
        Ok(record)
    }

    async fn update_payroll(
        &self,
        current: &PayrollRecord,
        updated: PayrollRecord,
    ) -> StoreResult<PayrollRecord> {
        self.check_available()?;
        let key = (current.employee_id.clone(), current.pay_period_start);
        let mut table = self.payroll.lock();
        let stored = table.get_mut(&key).ok_or_else(|| StoreError::NotFound {
            entity: "PayrollRecord".to_string(),
            key: composite_key(&key.0, key.1),
        })?;

        if *stored != *current {
            return Err(StoreError::PreconditionFailed {
                entity: "PayrollRecord".to_string(),
                key: composite_key(&key.0, key.1),
                message: "record changed since it was read".to_string(),
            });
        }

        *stored = updated.clone();
        Ok(updated)
    }

    async fn mark_processed(
        &self,
        employee_id: &str,
        period_start: NaiveDate,
    ) -> StoreResult<PayrollRecord> {
        self.check_available()?;
        let key = (employee_id.to_string(), period_start);
        let mut table = self.payroll.lock();
        let stored = table.get_mut(&key).ok_or_else(|| StoreError::NotFound {
            entity: "PayrollRecord".to_string(),
            key: composite_key(employee_id, period_start),
        })?;

        if stored.status != PayrollStatus::Pending {
            return Err(StoreError::PreconditionFailed {
                entity: "PayrollRecord".to_string(),
                key: composite_key(employee_id, period_start),
                message: format!("expected status Pending, found {:?}", stored.status),
            });
        }

        stored.status = PayrollStatus::Processed;
        Ok(stored.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountKind, AttendanceStatus, Role};
    use chrono::{DateTime, FixedOffset};
    use rust_decimal::Decimal;
    use std::sync::Arc;
    use uuid::Uuid;

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn ts(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn employee(id: &str) -> EmployeeProfile {
        EmployeeProfile {
            id: id.to_string(),
            first_name: None,
            last_name: None,
            username: None,
            email: None,
            department: None,
            role: Role::Employee,
            annual_salary: Decimal::from(60000),
            account_kind: AccountKind::Employee,
        }
    }

    fn open_record(employee_id: &str, date: &str) -> AttendanceRecord {
        AttendanceRecord::open(
            employee_id,
            make_date(date),
            ts(&format!("{date}T08:45:00+00:00")),
            AttendanceStatus::Present,
        )
    }

    fn payroll_record(status: PayrollStatus) -> PayrollRecord {
        PayrollRecord {
            id: Uuid::new_v4(),
            employee_id: "emp_001".to_string(),
            pay_period_start: make_date("2026-01-01"),
            pay_period_end: make_date("2026-01-31"),
            base_salary: Decimal::from(5000),
            overtime_hours: Decimal::ZERO,
            overtime_pay: Decimal::ZERO,
            deductions: Decimal::from(1250),
            gross_pay: Decimal::from(5000),
            net_pay: Decimal::from(3750),
            status,
        }
    }

    #[tokio::test]
    async fn test_roster_lookup() {
        let store = MemoryStore::with_employees([employee("emp_002"), employee("emp_001")]);

        assert!(store.get_employee("emp_001").await.unwrap().is_some());
        assert!(store.get_employee("emp_404").await.unwrap().is_none());

        let ids: Vec<String> = store
            .list_employees()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["emp_001", "emp_002"]);
    }

    #[tokio::test]
    async fn test_insert_attendance_rejects_duplicate_key() {
        let store = MemoryStore::new();
        store
            .insert_attendance(open_record("emp_001", "2026-01-15"))
            .await
            .unwrap();

        let result = store
            .insert_attendance(open_record("emp_001", "2026-01-15"))
            .await;
        assert!(matches!(result, Err(StoreError::Duplicate { .. })));

        // Different day is a different key
        store
            .insert_attendance(open_record("emp_001", "2026-01-16"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_close_attendance_only_once() {
        let store = MemoryStore::new();
        store
            .insert_attendance(open_record("emp_001", "2026-01-15"))
            .await
            .unwrap();

        let completion = AttendanceCompletion {
            check_out_time: ts("2026-01-15T17:00:00+00:00"),
            total_hours: Decimal::new(825, 2),
        };

        let closed = store
            .close_attendance("emp_001", make_date("2026-01-15"), completion.clone())
            .await
            .unwrap();
        assert_eq!(closed.status, AttendanceStatus::Completed);

        let second = store
            .close_attendance("emp_001", make_date("2026-01-15"), completion)
            .await;
        assert!(matches!(second, Err(StoreError::PreconditionFailed { .. })));
    }

    #[tokio::test]
    async fn test_close_missing_attendance_is_not_found() {
        let store = MemoryStore::new();
        let result = store
            .close_attendance(
                "emp_001",
                make_date("2026-01-15"),
                AttendanceCompletion {
                    check_out_time: ts("2026-01-15T17:00:00+00:00"),
                    total_hours: Decimal::from(8),
                },
            )
            .await;
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_find_attendance_applies_filter() {
        let store = MemoryStore::new();
        for (id, date) in [
            ("emp_001", "2026-01-14"),
            ("emp_001", "2026-01-15"),
            ("emp_002", "2026-01-15"),
        ] {
            store.insert_attendance(open_record(id, date)).await.unwrap();
        }

        let today = store
            .find_attendance(AttendanceFilter::on_date(make_date("2026-01-15")))
            .await
            .unwrap();
        assert_eq!(today.len(), 2);

        let mine = store
            .find_attendance(AttendanceFilter::for_employee("emp_001"))
            .await
            .unwrap();
        assert_eq!(mine.len(), 2);
    }

    #[tokio::test]
    async fn test_update_payroll_requires_unchanged_record() {
        let store = MemoryStore::new();
        let original = store
            .insert_payroll(payroll_record(PayrollStatus::Pending))
            .await
            .unwrap();

        let mut first = original.clone();
        first.deductions = Decimal::from(1000);
        first.net_pay = Decimal::from(4000);
        store.update_payroll(&original, first.clone()).await.unwrap();

        // A writer still holding the original snapshot must not overwrite
        let mut stale = original.clone();
        stale.overtime_hours = Decimal::from(4);
        let result = store.update_payroll(&original, stale).await;
        assert!(matches!(result, Err(StoreError::PreconditionFailed { .. })));

        let stored = store
            .get_payroll("emp_001", make_date("2026-01-01"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored, first);
    }

    #[tokio::test]
    async fn test_mark_processed_keeps_stored_figures() {
        let store = MemoryStore::new();
        let original = store
            .insert_payroll(payroll_record(PayrollStatus::Pending))
            .await
            .unwrap();

        let mut adjusted = original.clone();
        adjusted.overtime_hours = Decimal::from(10);
        adjusted.overtime_pay = Decimal::from(469);
        adjusted.gross_pay = Decimal::from(5469);
        store.update_payroll(&original, adjusted).await.unwrap();

        let processed = store
            .mark_processed("emp_001", make_date("2026-01-01"))
            .await
            .unwrap();
        assert_eq!(processed.status, PayrollStatus::Processed);
        assert_eq!(processed.overtime_hours, Decimal::from(10));
        assert_eq!(processed.gross_pay, Decimal::from(5469));

        let again = store
            .mark_processed("emp_001", make_date("2026-01-01"))
            .await;
        assert!(matches!(again, Err(StoreError::PreconditionFailed { .. })));
    }

    #[tokio::test]
    async fn test_insert_payroll_rejects_duplicate_period() {
        let store = MemoryStore::new();
        store
            .insert_payroll(payroll_record(PayrollStatus::Pending))
            .await
            .unwrap();
        let result = store
            .insert_payroll(payroll_record(PayrollStatus::Pending))
            .await;
        assert!(matches!(result, Err(StoreError::Duplicate { .. })));
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_every_call() {
        let store = MemoryStore::with_employees([employee("emp_001")]);
        store.set_unavailable(true);

        assert!(matches!(
            store.get_employee("emp_001").await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(matches!(
            store.find_payroll(PayrollFilter::default()).await,
            Err(StoreError::Unavailable(_))
        ));

        store.set_unavailable(false);
        assert!(store.get_employee("emp_001").await.is_ok());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_inserts_admit_one_winner() {
        let store = Arc::new(MemoryStore::new());

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    store
                        .insert_attendance(open_record("emp_001", "2026-01-15"))
                        .await
                        .is_ok()
                })
            })
            .collect();

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap() {
                winners += 1;
            }
        }
        assert_eq!(winners, 1);
    }
}
