//! Report models produced by the aggregation and payroll engines.
//!
//! None of these types are persisted.

use chrono::{DateTime, FixedOffset, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{DayState, PayPeriod, PayrollRecord, Role};
use crate::time::DateWindow;

/// One employee's attendance totals over a trailing week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyStats {
    /// The employee the totals belong to.
    pub employee_id: String,
    /// Days covered by the totals.
    pub window: DateWindow,
    /// All recorded hours, one decimal place.
    pub total_hours: Decimal,
    /// Hours up to the weekly threshold.
    pub regular_hours: Decimal,
    /// Hours beyond the weekly threshold.
    pub overtime_hours: Decimal,
    /// Days with a present or completed record.
    pub days_present: usize,
    /// Days with an open late record.
    pub days_late: usize,
}

/// One roster member's line in an attendance overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverviewEntry {
    /// The employee.
    pub employee_id: String,
    /// Resolved display name.
    pub name: String,
    /// The employee's department.
    pub department: Option<String>,
    /// The employee's role.
    pub role: Role,
    /// State for the overview date.
    pub status: DayState,
    /// Clock-in time, if any.
    pub check_in_time: Option<DateTime<FixedOffset>>,
    /// Clock-out time, only for completed days.
    pub check_out_time: Option<DateTime<FixedOffset>>,
    /// Worked hours, only for completed days.
    pub total_hours: Option<Decimal>,
}

/// Organization-wide counts for an attendance overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverviewSummary {
    /// Employees in the filtered roster.
    pub total_employees: usize,
    /// Employees that are present, late or completed.
    pub present_today: usize,
    /// Employees with no record.
    pub absent_today: usize,
    /// Employees whose record is late.
    pub late_today: usize,
    /// Mean hours over completed employees, one decimal place.
    pub average_hours: String,
}

/// A date-scoped attendance snapshot across the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceOverview {
    /// The day being reported.
    pub date: NaiveDate,
    /// Department filter that was applied, if any.
    pub department: Option<String>,
    /// One entry per roster member.
    pub employees: Vec<OverviewEntry>,
    /// Aggregate counts.
    pub summary: OverviewSummary,
}

/// Aggregate figures for one pay period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSummary {
    /// Number of payroll records.
    pub employee_count: usize,
    /// Sum of gross pay.
    pub total_gross: Decimal,
    /// Sum of deductions.
    pub total_deductions: Decimal,
    /// Sum of net pay.
    pub total_net: Decimal,
    /// Records already processed.
    pub processed: usize,
    /// Records still pending.
    pub pending: usize,
}

/// Payroll records for one pay period with their totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollOverview {
    /// The pay period.
    pub pay_period: PayPeriod,
    /// Department filter that was applied, if any.
    pub department: Option<String>,
    /// One record per eligible employee.
    pub records: Vec<PayrollRecord>,
    /// Aggregate figures.
    pub summary: PayrollSummary,
}
