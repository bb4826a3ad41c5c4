//! Gross pay calculation functionality.
//!
//! A salaried employee's pay period gross is their share of the annual
//! salary plus overtime paid at a multiple of the implied hourly rate.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::PayrollPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;
use crate::time::round_money;

/// The result of a gross pay calculation, including the audit step.
#[derive(Debug, Clone, Serialize)]
pub struct GrossPayResult {
    /// Annual salary divided by pay periods, rounded to whole units.
    pub monthly_base: Decimal,
    /// Annual salary divided by pay periods and standard hours, unrounded.
    pub hourly_rate: Decimal,
    /// Overtime hours x hourly rate x overtime multiplier, rounded.
    pub overtime_pay: Decimal,
    /// `monthly_base + overtime_pay`.
    pub gross_pay: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the gross pay for one pay period.
///
/// # Arguments
///
/// * `annual_salary` - The employee's annual salary
/// * `overtime_hours` - Overtime hours worked in the period
/// * `policy` - Divisors and the overtime multiplier
/// * `step_number` - The step number for audit trail sequencing
///
/// # Errors
///
/// Returns `Validation` if either amount is negative.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use workforce_engine::config::PayrollPolicy;
/// use workforce_engine::payroll::compute_gross_pay;
///
/// let result = compute_gross_pay(
///     Decimal::from(60000),
///     Decimal::from(10),
///     &PayrollPolicy::default(),
///     1,
/// )
/// .unwrap();
/// assert_eq!(result.hourly_rate, Decimal::new(3125, 2));
/// assert_eq!(result.overtime_pay, Decimal::from(469));
/// assert_eq!(result.gross_pay, Decimal::from(5469));
/// ```
pub fn compute_gross_pay(
    annual_salary: Decimal,
    overtime_hours: Decimal,
    policy: &PayrollPolicy,
    step_number: u32,
) -> EngineResult<GrossPayResult> {
    if annual_salary.is_sign_negative() && !annual_salary.is_zero() {
        return Err(EngineError::validation(
            "annual_salary",
            "must not be negative",
        ));
    }
    if overtime_hours.is_sign_negative() && !overtime_hours.is_zero() {
        return Err(EngineError::validation(
            "overtime_hours",
            "must not be negative",
        ));
    }

    let period_salary = annual_salary / policy.periods_per_year;
    let monthly_base = round_money(period_salary);
    let hourly_rate = period_salary / policy.standard_period_hours;
    let overtime_pay = round_money(overtime_hours * hourly_rate * policy.overtime_multiplier);
    let gross_pay = monthly_base + overtime_pay;

    let audit_step = AuditStep {
        step_number,
        rule_id: "gross_pay".to_string(),
        rule_name: "Gross Pay Calculation".to_string(),
        input: serde_json::json!({
            "annual_salary": annual_salary.normalize().to_string(),
            "overtime_hours": overtime_hours.normalize().to_string(),
            "periods_per_year": policy.periods_per_year.normalize().to_string(),
            "standard_period_hours": policy.standard_period_hours.normalize().to_string(),
            "overtime_multiplier": policy.overtime_multiplier.normalize().to_string()
        }),
        output: serde_json::json!({
            "monthly_base": monthly_base.normalize().to_string(),
            "hourly_rate": hourly_rate.normalize().to_string(),
            "overtime_pay": overtime_pay.normalize().to_string(),
            "gross_pay": gross_pay.normalize().to_string()
        }),
        reasoning: format!(
            "${} / {} = ${} base; {}h x ${} x {} = ${} overtime; gross ${}",
            annual_salary.normalize(),
            policy.periods_per_year.normalize(),
            monthly_base.normalize(),
            overtime_hours.normalize(),
            hourly_rate.normalize(),
            policy.overtime_multiplier.normalize(),
            overtime_pay.normalize(),
            gross_pay.normalize()
        ),
    };

    Ok(GrossPayResult {
        monthly_base,
        hourly_rate,
        overtime_pay,
        gross_pay,
        audit_step,
    })
}
