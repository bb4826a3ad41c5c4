//! Repository traits for data access abstraction.
//!
//! The engines never talk to a database directly; they go through these
//! traits. All operations are async. Implementations must enforce the
//! unique keys, (employee_id, date) for attendance and (employee_id,
//! pay_period_start) for payroll, atomically: a racing insert on an existing
//! key fails with [`StoreError::Duplicate`], and conditional updates fail
//! with [`StoreError::PreconditionFailed`] when the stored state has moved on.

mod memory;

pub use memory::MemoryStore;

use chrono::NaiveDate;
use thiserror::Error;

use crate::error::EngineError;
use crate::models::{
    AttendanceCompletion, AttendanceRecord, EmployeeProfile, PayrollRecord, PayrollStatus,
};

/// Data-access error type.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record with the same unique key already exists.
    #[error("{entity} already exists: {key}")]
    Duplicate {
        /// The kind of record.
        entity: String,
        /// The conflicting key.
        key: String,
    },

    /// No record exists for the key.
    #[error("{entity} not found: {key}")]
    NotFound {
        /// The kind of record.
        entity: String,
        /// The key that was looked up.
        key: String,
    },

    /// A conditional update found the record in an unexpected state.
    #[error("Precondition failed for {entity} {key}: {message}")]
    PreconditionFailed {
        /// The kind of record.
        entity: String,
        /// The key of the record.
        key: String,
        /// What the store found instead.
        message: String,
    },

    /// The backing store could not complete the operation.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// A type alias for Results that return StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, key } => EngineError::NotFound { entity, key },
            other => EngineError::Upstream {
                message: other.to_string(),
            },
        }
    }
}

/// Formats a composite key the same way everywhere.
pub(crate) fn composite_key(employee_id: &str, date: NaiveDate) -> String {
    format!("{employee_id}/{date}")
}

/// Filter for attendance queries. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceFilter {
    /// Only this employee's records.
    pub employee_id: Option<String>,
    /// First day to include.
    pub from: Option<NaiveDate>,
    /// Last day to include.
    pub to: Option<NaiveDate>,
}

impl AttendanceFilter {
    /// Records of one employee.
    pub fn for_employee(employee_id: impl Into<String>) -> Self {
        Self {
            employee_id: Some(employee_id.into()),
            ..Self::default()
        }
    }

    /// Records of every employee on one day.
    pub fn on_date(date: NaiveDate) -> Self {
        Self {
            employee_id: None,
            from: Some(date),
            to: Some(date),
        }
    }

    /// Restricts the filter to an inclusive date range.
    pub fn between(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    /// Checks a record against every set field.
    pub fn matches(&self, record: &AttendanceRecord) -> bool {
        self.employee_id
            .as_deref()
            .is_none_or(|id| record.employee_id == id)
            && self.from.is_none_or(|from| record.date >= from)
            && self.to.is_none_or(|to| record.date <= to)
    }
}

/// Filter for payroll queries. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayrollFilter {
    /// Only this employee's records.
    pub employee_id: Option<String>,
    /// Only records of the period starting on this day.
    pub period_start: Option<NaiveDate>,
    /// Only records with this status.
    pub status: Option<PayrollStatus>,
}

impl PayrollFilter {
    /// Records of one pay period.
    pub fn for_period(period_start: NaiveDate) -> Self {
        Self {
            period_start: Some(period_start),
            ..Self::default()
        }
    }

    /// Restricts the filter to one status.
    pub fn with_status(mut self, status: PayrollStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Checks a record against every set field.
    pub fn matches(&self, record: &PayrollRecord) -> bool {
        self.employee_id
            .as_deref()
            .is_none_or(|id| record.employee_id == id)
            && self
                .period_start
                .is_none_or(|start| record.pay_period_start == start)
            && self.status.is_none_or(|status| record.status == status)
    }
}

/// Read access to the employee roster.
pub trait RosterRepository: Send + Sync {
    /// Looks up one profile.
    fn get_employee(
        &self,
        employee_id: &str,
    ) -> impl Future<Output = StoreResult<Option<EmployeeProfile>>> + Send;
    /// Returns the whole roster, eligible or not.
    fn list_employees(&self) -> impl Future<Output = StoreResult<Vec<EmployeeProfile>>> + Send;
}

/// Storage for attendance records, unique per (employee_id, date).
pub trait AttendanceRepository: Send + Sync {
    /// Looks up one day's record.
    fn get_attendance(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> impl Future<Output = StoreResult<Option<AttendanceRecord>>> + Send;
    /// Returns every record matching `filter`, in no particular order.
    fn find_attendance(
        &self,
        filter: AttendanceFilter,
    ) -> impl Future<Output = StoreResult<Vec<AttendanceRecord>>> + Send;
    /// Fails with `Duplicate` if a record exists for (employee_id, date).
    fn insert_attendance(
        &self,
        record: AttendanceRecord,
    ) -> impl Future<Output = StoreResult<AttendanceRecord>> + Send;
    /// Applies a clock-out to an open record. Fails with
    /// `PreconditionFailed` if the record is already closed.
    fn close_attendance(
        &self,
        employee_id: &str,
        date: NaiveDate,
        completion: AttendanceCompletion,
    ) -> impl Future<Output = StoreResult<AttendanceRecord>> + Send;
}

/// Storage for payroll records, unique per (employee_id, pay period start).
pub trait PayrollRepository: Send + Sync {
    /// Looks up one period's record.
    fn get_payroll(
        &self,
        employee_id: &str,
        period_start: NaiveDate,
    ) -> impl Future<Output = StoreResult<Option<PayrollRecord>>> + Send;
    /// Returns every record matching `filter`, in no particular order.
    fn find_payroll(
        &self,
        filter: PayrollFilter,
    ) -> impl Future<Output = StoreResult<Vec<PayrollRecord>>> + Send;
    /// Fails with `Duplicate` if a record exists for (employee_id, period start).
    fn insert_payroll(
        &self,
        record: PayrollRecord,
    ) -> impl Future<Output = StoreResult<PayrollRecord>> + Send;
    /// Replaces `current` with `updated`. Fails with `PreconditionFailed`
    /// unless the stored record still equals `current`.
    fn update_payroll(
        &self,
        current: &PayrollRecord,
        updated: PayrollRecord,
    ) -> impl Future<Output = StoreResult<PayrollRecord>> + Send;
    /// Moves a pending record to `Processed`, leaving every other field as
    /// stored. Fails with `PreconditionFailed` if it is already processed.
    fn mark_processed(
        &self,
        employee_id: &str,
        period_start: NaiveDate,
    ) -> impl Future<Output = StoreResult<PayrollRecord>> + Send;
}
