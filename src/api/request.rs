//! Request envelope for the action layer.
//!
//! Every request is a JSON object whose `"action"` field names the
//! operation. Timestamps are RFC 3339 with an offset and dates are
//! `YYYY-MM-DD`. Optional timestamps and dates default to the service
//! clock.

use chrono::{DateTime, FixedOffset, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single action request.
///
/// # Example
///
/// ```
/// use workforce_engine::api::ActionRequest;
///
/// let request: ActionRequest = serde_json::from_str(
///     r#"{"action": "clock_in", "employee_id": "emp_001", "at": "2026-01-15T08:55:00+10:00"}"#,
/// )
/// .unwrap();
/// assert_eq!(request.name(), "clock_in");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActionRequest {
    /// Open the day's attendance record.
    ClockIn {
        /// The employee clocking in.
        employee_id: String,
        /// Event time; defaults to now.
        #[serde(default)]
        at: Option<DateTime<FixedOffset>>,
    },
    /// Close the day's attendance record.
    ClockOut {
        /// The employee clocking out.
        employee_id: String,
        /// Event time; defaults to now.
        #[serde(default)]
        at: Option<DateTime<FixedOffset>>,
    },
    /// Look up one employee's state for a day.
    CurrentStatus {
        /// The employee to look up.
        employee_id: String,
        /// The day; defaults to today.
        #[serde(default)]
        date: Option<NaiveDate>,
    },
    /// List an employee's most recent records.
    History {
        /// The employee to list.
        employee_id: String,
        /// Maximum number of records.
        #[serde(default)]
        limit: Option<usize>,
    },
    /// Trailing-week totals for one employee.
    WeeklyStats {
        /// The employee to total.
        employee_id: String,
        /// Last day of the window; defaults to today.
        #[serde(default)]
        today: Option<NaiveDate>,
    },
    /// Attendance snapshot of the roster.
    Overview {
        /// The day; defaults to today.
        #[serde(default)]
        date: Option<NaiveDate>,
        /// Exact department filter.
        #[serde(default)]
        department: Option<String>,
    },
    /// Get or create an employee's payroll record.
    EnsurePayroll {
        /// The employee being paid.
        employee_id: String,
        /// Any day in the pay period; defaults to today.
        #[serde(default)]
        date: Option<NaiveDate>,
        /// Overtime hours for a newly created record.
        #[serde(default)]
        overtime_hours: Decimal,
    },
    /// Change a pending payroll record.
    AdjustPayroll {
        /// The employee being paid.
        employee_id: String,
        /// First day (or any day) of the pay period.
        period_start: NaiveDate,
        /// New overtime hours.
        #[serde(default)]
        overtime_hours: Option<Decimal>,
        /// Deductions override.
        #[serde(default)]
        deductions: Option<Decimal>,
    },
    /// Build a paystub.
    Paystub {
        /// The employee being paid.
        employee_id: String,
        /// Any day in the pay period; defaults to today.
        #[serde(default)]
        date: Option<NaiveDate>,
    },
    /// Payroll records and totals for a pay period.
    PayrollOverview {
        /// Any day in the pay period; defaults to today.
        #[serde(default)]
        date: Option<NaiveDate>,
        /// Exact department filter.
        #[serde(default)]
        department: Option<String>,
    },
    /// Process every pending record of a pay period.
    RunPayroll {
        /// Any day in the pay period; defaults to today.
        #[serde(default)]
        date: Option<NaiveDate>,
    },
    /// Stateless gross pay calculation.
    ComputeGrossPay {
        /// Annual salary.
        annual_salary: Decimal,
        /// Overtime hours in the period.
        #[serde(default)]
        overtime_hours: Decimal,
    },
    /// Stateless deductions and net pay calculation.
    ComputeNetPay {
        /// Gross pay for the period.
        gross_pay: Decimal,
    },
}

impl ActionRequest {
    /// The action name as it appears on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            ActionRequest::ClockIn { .. } => "clock_in",
            ActionRequest::ClockOut { .. } => "clock_out",
            ActionRequest::CurrentStatus { .. } => "current_status",
            ActionRequest::History { .. } => "history",
            ActionRequest::WeeklyStats { .. } => "weekly_stats",
            ActionRequest::Overview { .. } => "overview",
            ActionRequest::EnsurePayroll { .. } => "ensure_payroll",
            ActionRequest::AdjustPayroll { .. } => "adjust_payroll",
            ActionRequest::Paystub { .. } => "paystub",
            ActionRequest::PayrollOverview { .. } => "payroll_overview",
            ActionRequest::RunPayroll { .. } => "run_payroll",
            ActionRequest::ComputeGrossPay { .. } => "compute_gross_pay",
            ActionRequest::ComputeNetPay { .. } => "compute_net_pay",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_deserialize_clock_in_without_time() {
        let request: ActionRequest =
            serde_json::from_str(r#"{"action": "clock_in", "employee_id": "emp_001"}"#).unwrap();
        assert_eq!(
            request,
            ActionRequest::ClockIn {
                employee_id: "emp_001".to_string(),
                at: None
            }
        );
    }

    #[test]
    fn test_deserialize_clock_out_keeps_offset() {
        let request: ActionRequest = serde_json::from_str(
            r#"{"action": "clock_out", "employee_id": "emp_001", "at": "2026-01-15T17:00:00-05:00"}"#,
        )
        .unwrap();
        match request {
            ActionRequest::ClockOut { at: Some(at), .. } => {
                assert_eq!(at.offset().local_minus_utc(), -5 * 3600);
            }
            other => panic!("Expected ClockOut, got {:?}", other),
        }
    }

    #[test]
    fn test_deserialize_gross_pay_with_string_and_number_amounts() {
        let request: ActionRequest = serde_json::from_str(
            r#"{"action": "compute_gross_pay", "annual_salary": "60000", "overtime_hours": 10}"#,
        )
        .unwrap();
        assert_eq!(
            request,
            ActionRequest::ComputeGrossPay {
                annual_salary: Decimal::from(60000),
                overtime_hours: Decimal::from(10),
            }
        );
    }

    #[test]
    fn test_deserialize_adjust_payroll() {
        let request: ActionRequest = serde_json::from_str(
            r#"{
                "action": "adjust_payroll",
                "employee_id": "emp_001",
                "period_start": "2026-01-01",
                "deductions": "999.50"
            }"#,
        )
        .unwrap();
        match request {
            ActionRequest::AdjustPayroll {
                overtime_hours,
                deductions,
                ..
            } => {
                assert!(overtime_hours.is_none());
                assert_eq!(deductions, Some(Decimal::from_str("999.50").unwrap()));
            }
            other => panic!("Expected AdjustPayroll, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_field_is_reported() {
        let err = serde_json::from_str::<ActionRequest>(r#"{"action": "history"}"#).unwrap_err();
        assert!(err.to_string().contains("missing field"));
    }

    #[test]
    fn test_unknown_action_is_reported() {
        let err =
            serde_json::from_str::<ActionRequest>(r#"{"action": "delete_everything"}"#).unwrap_err();
        assert!(err.to_string().contains("unknown variant"));
    }

    #[test]
    fn test_name_matches_wire_tag() {
        let request = ActionRequest::RunPayroll { date: None };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["action"], request.name());
    }
}
