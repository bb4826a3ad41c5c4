use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::AttendancePolicy;
use crate::error::{EngineError, EngineResult, require_id};
use crate::models::{
    AttendanceCompletion, AttendanceRecord, AttendanceStatus, AuditWarning, DailyAttendance,
    WarningSeverity,
};
use crate::store::{AttendanceFilter, AttendanceRepository, RosterRepository, StoreError};
use crate::time::{date_key, hours_between, is_late};

/// Warning code attached to a clock-out that is not after its clock-in.
pub const NON_POSITIVE_DURATION: &str = "NON_POSITIVE_DURATION";

/// The result of a successful clock-out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClockOutOutcome {
    /// The completed record.
    pub record: AttendanceRecord,
    /// Anomalies noticed while closing the record.
    pub warnings: Vec<AuditWarning>,
}

/// Applies clock-in and clock-out events and answers attendance queries.
///
/// The engine keeps no state of its own. Uniqueness of a day's record and
/// the single clock-out are enforced by the store, so concurrent requests
/// for the same employee and day cannot both succeed.
#[derive(Debug)]
pub struct AttendanceEngine<S> {
    store: Arc<S>,
    policy: AttendancePolicy,
}

impl<S> AttendanceEngine<S>
where
    S: RosterRepository + AttendanceRepository,
{
    /// Creates an engine over `store`.
    pub fn new(store: Arc<S>, policy: AttendancePolicy) -> Self {
        Self { store, policy }
    }

    /// The policy the engine applies.
    pub fn policy(&self) -> &AttendancePolicy {
        &self.policy
    }

    /// Opens today's record for `employee_id`.
    ///
    /// The record is `Late` when the local time of `at` is after the
    /// policy cutoff, otherwise `Present`.
    ///
    /// # Errors
    ///
    /// - `Validation` for a blank employee id
    /// - `NotFound` if the employee is not on the roster
    /// - `AlreadyClockedIn` if a record already exists for the day
    pub async fn clock_in(
        &self,
        employee_id: &str,
        at: DateTime<FixedOffset>,
    ) -> EngineResult<AttendanceRecord> {
        require_id("employee_id", employee_id)?;

        if self.store.get_employee(employee_id).await?.is_none() {
            return Err(EngineError::not_found("Employee", employee_id));
        }

        let date = date_key(&at);
        if self.store.get_attendance(employee_id, date).await?.is_some() {
            return Err(already_clocked_in(employee_id, date));
        }

        let status = if is_late(&at, self.policy.late_cutoff) {
            AttendanceStatus::Late
        } else {
            AttendanceStatus::Present
        };

        let record = AttendanceRecord::open(employee_id, date, at, status);
        let record = self
            .store
            .insert_attendance(record)
            .await
            .map_err(|err| match err {
                StoreError::Duplicate { .. } => already_clocked_in(employee_id, date),
                other => other.into(),
            })?;

        info!(
            employee_id = %employee_id,
            date = %date,
            status = ?record.status,
            "Clocked in"
        );

        Ok(record)
    }

    /// Closes today's record for `employee_id`.
    ///
    /// A check-out at or before the check-in is still recorded, but the
    /// outcome carries a [`NON_POSITIVE_DURATION`] warning.
    ///
    /// # Errors
    ///
    /// - `Validation` for a blank employee id
    /// - `NoActiveClockIn` if there is no record for the day
    /// - `AlreadyClockedOut` if the record is already closed
    pub async fn clock_out(
        &self,
        employee_id: &str,
        at: DateTime<FixedOffset>,
    ) -> EngineResult<ClockOutOutcome> {
        require_id("employee_id", employee_id)?;

        let date = date_key(&at);
        let existing = self
            .store
            .get_attendance(employee_id, date)
            .await?
            .ok_or_else(|| no_active_clock_in(employee_id, date))?;

        if !existing.is_open() {
            return Err(already_clocked_out(employee_id, date));
        }

        let total_hours = hours_between(&existing.check_in_time, &at);
        let mut warnings = Vec::new();
        if total_hours <= Decimal::ZERO {
            warn!(
                employee_id = %employee_id,
                date = %date,
                check_in = %existing.check_in_time,
                check_out = %at,
                "Clock-out is not after clock-in"
            );
            warnings.push(AuditWarning::new(
                NON_POSITIVE_DURATION,
                format!(
                    "Check-out {} is not after check-in {}; recorded {} hours",
                    at, existing.check_in_time, total_hours
                ),
                WarningSeverity::High,
            ));
        }

        let completion = AttendanceCompletion {
            check_out_time: at,
            total_hours,
        };

        let record = self
            .store
            .close_attendance(employee_id, date, completion)
            .await
            .map_err(|err| match err {
                StoreError::PreconditionFailed { .. } => already_clocked_out(employee_id, date),
                StoreError::NotFound { .. } => no_active_clock_in(employee_id, date),
                other => other.into(),
            })?;

        info!(
            employee_id = %employee_id,
            date = %date,
            total_hours = %total_hours,
            "Clocked out"
        );

        Ok(ClockOutOutcome { record, warnings })
    }

    /// Reports the employee's state for `date`.
    ///
    /// A missing record is reported as [`DailyAttendance::Absent`], never as
    /// an error.
    pub async fn current_status(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> EngineResult<DailyAttendance> {
        require_id("employee_id", employee_id)?;

        let daily = match self.store.get_attendance(employee_id, date).await? {
            Some(record) => DailyAttendance::Recorded(record),
            None => DailyAttendance::Absent {
                employee_id: employee_id.to_string(),
                date,
            },
        };

        debug!(employee_id = %employee_id, date = %date, state = ?daily.state(), "Status lookup");
        Ok(daily)
    }

    /// Returns the employee's most recent records, newest first.
    ///
    /// `limit` defaults to the policy's default and is capped at the
    /// policy's maximum.
    ///
    /// # Errors
    ///
    /// - `Validation` for a blank employee id or a zero limit
    /// - `NotFound` if the employee is not on the roster
    pub async fn history(
        &self,
        employee_id: &str,
        limit: Option<usize>,
    ) -> EngineResult<Vec<AttendanceRecord>> {
        require_id("employee_id", employee_id)?;

        let limit = match limit {
            Some(0) => return Err(EngineError::validation("limit", "must be at least 1")),
            Some(n) => n.min(self.policy.history_max_limit),
            None => self.policy.history_default_limit,
        };

        if self.store.get_employee(employee_id).await?.is_none() {
            return Err(EngineError::not_found("Employee", employee_id));
        }

        let mut records = self
            .store
            .find_attendance(AttendanceFilter::for_employee(employee_id))
            .await?;
        records.sort_by(|a, b| b.date.cmp(&a.date));
        records.truncate(limit);

        Ok(records)
    }
}

fn already_clocked_in(employee_id: &str, date: NaiveDate) -> EngineError {
    EngineError::AlreadyClockedIn {
        employee_id: employee_id.to_string(),
        date,
    }
}

fn already_clocked_out(employee_id: &str, date: NaiveDate) -> EngineError {
    EngineError::AlreadyClockedOut {
        employee_id: employee_id.to_string(),
        date,
    }
}

fn no_active_clock_in(employee_id: &str, date: NaiveDate) -> EngineError {
    EngineError::NoActiveClockIn {
        employee_id: employee_id.to_string(),
        date,
    }
}
