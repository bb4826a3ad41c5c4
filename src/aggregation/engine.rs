use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use crate::config::{AttendancePolicy, RosterPolicy};
use crate::error::{EngineError, EngineResult, require_id};
use crate::models::{AttendanceOverview, WeeklyStats};
use crate::store::{AttendanceFilter, AttendanceRepository, RosterRepository};
use crate::time::DateWindow;

use super::{attendance_overview, weekly_stats};

/// Loads attendance records and roster data and feeds them to the pure
/// aggregation functions. Reads may observe slightly stale data.
#[derive(Debug)]
pub struct AggregationEngine<S> {
    store: Arc<S>,
    attendance: AttendancePolicy,
    roster: RosterPolicy,
}

impl<S> AggregationEngine<S>
where
    S: RosterRepository + AttendanceRepository,
{
    /// Creates an engine over `store`.
    pub fn new(store: Arc<S>, attendance: AttendancePolicy, roster: RosterPolicy) -> Self {
        Self {
            store,
            attendance,
            roster,
        }
    }

    /// Totals for `employee_id` over the trailing window ending `today`.
    ///
    /// # Errors
    ///
    /// - `Validation` for a blank employee id
    /// - `NotFound` if the employee is not on the roster
    pub async fn weekly_stats(
        &self,
        employee_id: &str,
        today: NaiveDate,
    ) -> EngineResult<WeeklyStats> {
        require_id("employee_id", employee_id)?;

        if self.store.get_employee(employee_id).await?.is_none() {
            return Err(EngineError::not_found("Employee", employee_id));
        }

        let window = DateWindow::trailing(today, self.attendance.weekly_window_days);
        let records = self
            .store
            .find_attendance(
                AttendanceFilter::for_employee(employee_id).between(window.start, window.end),
            )
            .await?;

        let stats = weekly_stats(employee_id, today, &records, &self.attendance);
        debug!(
            employee_id = %employee_id,
            total_hours = %stats.total_hours,
            overtime_hours = %stats.overtime_hours,
            "Weekly stats computed"
        );
        Ok(stats)
    }

    /// Attendance snapshot of the eligible roster for `date`.
    pub async fn overview(
        &self,
        date: NaiveDate,
        department: Option<&str>,
    ) -> EngineResult<AttendanceOverview> {
        let roster = self.store.list_employees().await?;
        let records = self
            .store
            .find_attendance(AttendanceFilter::on_date(date))
            .await?;

        let overview = attendance_overview(
            date,
            &roster,
            &records,
            department,
            &self.roster.placeholder_name,
        );
        debug!(
            date = %date,
            department = ?department,
            total = overview.summary.total_employees,
            absent = overview.summary.absent_today,
            "Attendance overview built"
        );
        Ok(overview)
    }
}
