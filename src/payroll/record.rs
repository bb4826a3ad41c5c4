//! Payroll record construction and recomputation.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::config::PayrollPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, EmployeeProfile, PayPeriod, PayrollAdjustment, PayrollRecord, PayrollStatus,
};

use super::{compute_deductions_and_net, compute_gross_pay};

/// Builds a payroll record for `employee` over `period`.
///
/// Returns the record together with the audit trail of the gross and net
/// calculations.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use workforce_engine::config::PayrollPolicy;
/// use workforce_engine::models::{
///     AccountKind, EmployeeProfile, PayPeriod, PayrollStatus, Role,
/// };
/// use workforce_engine::payroll::build_payroll_record;
///
/// let employee = EmployeeProfile {
///     id: "emp_001".to_string(),
///     first_name: None,
///     last_name: None,
///     username: None,
///     email: None,
///     department: None,
///     role: Role::Employee,
///     annual_salary: Decimal::from(60000),
///     account_kind: AccountKind::Employee,
/// };
/// let period = PayPeriod::containing(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
///
/// let (record, trail) = build_payroll_record(
///     &employee,
///     period,
///     Decimal::ZERO,
///     PayrollStatus::Pending,
///     &PayrollPolicy::default(),
/// )
/// .unwrap();
/// assert_eq!(record.net_pay, Decimal::from(3750));
/// assert!(record.is_consistent());
/// assert_eq!(trail.len(), 2);
/// ```
pub fn build_payroll_record(
    employee: &EmployeeProfile,
    period: PayPeriod,
    overtime_hours: Decimal,
    status: PayrollStatus,
    policy: &PayrollPolicy,
) -> EngineResult<(PayrollRecord, Vec<AuditStep>)> {
    let gross = compute_gross_pay(employee.annual_salary, overtime_hours, policy, 1)?;
    let net = compute_deductions_and_net(gross.gross_pay, policy, 2)?;

    let record = PayrollRecord {
        id: Uuid::new_v4(),
        employee_id: employee.id.clone(),
        pay_period_start: period.start_date,
        pay_period_end: period.end_date,
        base_salary: gross.monthly_base,
        overtime_hours,
        overtime_pay: gross.overtime_pay,
        deductions: net.deductions,
        gross_pay: gross.gross_pay,
        net_pay: net.net_pay,
        status,
    };

    Ok((record, vec![gross.audit_step, net.audit_step]))
}

/// Applies an adjustment to a copy of `record`.
///
/// New overtime hours recompute overtime pay from the employee's current
/// salary, then gross, deductions and net. A deductions override replaces
/// the computed deductions and recomputes net. The base salary is never
/// changed.
pub fn apply_adjustment(
    record: &PayrollRecord,
    employee: &EmployeeProfile,
    adjustment: &PayrollAdjustment,
    policy: &PayrollPolicy,
) -> EngineResult<PayrollRecord> {
    if adjustment.is_empty() {
        return Err(EngineError::validation(
            "adjustment",
            "at least one of overtime_hours or deductions is required",
        ));
    }
    if adjustment
        .deductions
        .is_some_and(|d| d.is_sign_negative() && !d.is_zero())
    {
        return Err(EngineError::validation("deductions", "must not be negative"));
    }

    let mut adjusted = record.clone();

    if let Some(overtime_hours) = adjustment.overtime_hours {
        let gross = compute_gross_pay(employee.annual_salary, overtime_hours, policy, 1)?;
        adjusted.overtime_hours = overtime_hours;
        adjusted.overtime_pay = gross.overtime_pay;
        adjusted.gross_pay = adjusted.base_salary + gross.overtime_pay;
        adjusted.deductions = compute_deductions_and_net(adjusted.gross_pay, policy, 2)?.deductions;
    }

    if let Some(deductions) = adjustment.deductions {
        adjusted.deductions = deductions;
    }

    adjusted.net_pay = adjusted.gross_pay - adjusted.deductions;
    Ok(adjusted)
}
