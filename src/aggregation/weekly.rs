//! Trailing-week attendance totals.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::AttendancePolicy;
use crate::models::{AttendanceRecord, AttendanceStatus, WeeklyStats};
use crate::time::{DateWindow, one_decimal};

/// Computes an employee's totals over the trailing window ending `today`.
///
/// Records of other employees and records outside the window are ignored,
/// so callers may pass a superset. Open records count towards the day
/// counters but contribute no hours.
///
/// `regular_hours` is capped at the policy's weekly threshold and the
/// remainder is overtime. Both are derived from the rounded total, so
/// they always add up to it.
///
/// # Example
///
/// ```
/// use chrono::{DateTime, NaiveDate};
/// use rust_decimal::Decimal;
/// use workforce_engine::aggregation::weekly_stats;
/// use workforce_engine::config::AttendancePolicy;
/// use workforce_engine::models::{AttendanceCompletion, AttendanceRecord, AttendanceStatus};
///
/// let today = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
/// let mut record = AttendanceRecord::open(
///     "emp_001",
///     today,
///     DateTime::parse_from_rfc3339("2026-01-15T08:00:00Z").unwrap(),
///     AttendanceStatus::Present,
/// );
/// record.complete(&AttendanceCompletion {
///     check_out_time: DateTime::parse_from_rfc3339("2026-01-15T16:30:00Z").unwrap(),
///     total_hours: Decimal::new(85, 1),
/// });
///
/// let stats = weekly_stats("emp_001", today, &[record], &AttendancePolicy::default());
/// assert_eq!(stats.total_hours.to_string(), "8.5");
/// assert_eq!(stats.overtime_hours.to_string(), "0.0");
/// assert_eq!(stats.days_present, 1);
/// ```
pub fn weekly_stats(
    employee_id: &str,
    today: NaiveDate,
    records: &[AttendanceRecord],
    policy: &AttendancePolicy,
) -> WeeklyStats {
    let window = DateWindow::trailing(today, policy.weekly_window_days);

    let in_window = records
        .iter()
        .filter(|record| record.employee_id == employee_id && window.contains(record.date));

    let mut raw_total = Decimal::ZERO;
    let mut days_present = 0;
    let mut days_late = 0;
    for record in in_window {
        raw_total += record.total_hours.unwrap_or(Decimal::ZERO);
        match record.status {
            AttendanceStatus::Present | AttendanceStatus::Completed => days_present += 1,
            AttendanceStatus::Late => days_late += 1,
        }
    }

    let total_hours = one_decimal(raw_total);
    let regular_hours = one_decimal(total_hours.min(policy.weekly_regular_hours));
    let overtime_hours = one_decimal((total_hours - regular_hours).max(Decimal::ZERO));

    WeeklyStats {
        employee_id: employee_id.to_string(),
        window,
        total_hours,
        regular_hours,
        overtime_hours,
        days_present,
        days_late,
    }
}
