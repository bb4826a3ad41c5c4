//! Deductions and net pay.
//!
//! Stored deduction totals use the flat model: a withholding percentage of
//! gross plus a fixed benefits amount. Paystubs show an itemized view that
//! reconciles to the stored total through `other_withholding`.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::{ItemizedRates, PayrollPolicy};
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, DeductionBreakdown};
use crate::time::round_money;

/// The result of a deductions calculation, including the audit step.
#[derive(Debug, Clone, Serialize)]
pub struct NetPayResult {
    /// Total deductions.
    pub deductions: Decimal,
    /// `gross - deductions`.
    pub net_pay: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes total deductions and net pay from gross pay.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use workforce_engine::config::PayrollPolicy;
/// use workforce_engine::payroll::compute_deductions_and_net;
///
/// let result = compute_deductions_and_net(Decimal::from(5469), &PayrollPolicy::default(), 2)
///     .unwrap();
/// assert_eq!(result.deductions, Decimal::from(1353));
/// assert_eq!(result.net_pay, Decimal::from(4116));
/// ```
pub fn compute_deductions_and_net(
    gross_pay: Decimal,
    policy: &PayrollPolicy,
    step_number: u32,
) -> EngineResult<NetPayResult> {
    if gross_pay.is_sign_negative() && !gross_pay.is_zero() {
        return Err(EngineError::validation("gross_pay", "must not be negative"));
    }

    let withholding = round_money(gross_pay * policy.flat_withholding_rate);
    let deductions = withholding + policy.benefits_deduction;
    let net_pay = gross_pay - deductions;

    let audit_step = AuditStep {
        step_number,
        rule_id: "net_pay".to_string(),
        rule_name: "Deductions and Net Pay".to_string(),
        input: serde_json::json!({
            "gross_pay": gross_pay.normalize().to_string(),
            "withholding_rate": policy.flat_withholding_rate.normalize().to_string(),
            "benefits_deduction": policy.benefits_deduction.normalize().to_string()
        }),
        output: serde_json::json!({
            "deductions": deductions.normalize().to_string(),
            "net_pay": net_pay.normalize().to_string()
        }),
        reasoning: format!(
            "${} x {} = ${} + ${} benefits = ${} deductions; net ${}",
            gross_pay.normalize(),
            policy.flat_withholding_rate.normalize(),
            withholding.normalize(),
            policy.benefits_deduction.normalize(),
            deductions.normalize(),
            net_pay.normalize()
        ),
    };

    Ok(NetPayResult {
        deductions,
        net_pay,
        audit_step,
    })
}

/// Splits a stored deduction total into paystub line items.
///
/// Each percentage line is rounded on its own. Whatever the lines do not
/// account for is reported as `other_withholding`, so the breakdown always
/// sums to `total_deductions`.
pub fn itemize_deductions(
    gross_pay: Decimal,
    total_deductions: Decimal,
    rates: &ItemizedRates,
) -> DeductionBreakdown {
    let mut breakdown = DeductionBreakdown {
        federal_tax: round_money(gross_pay * rates.federal_tax_rate),
        state_tax: round_money(gross_pay * rates.state_tax_rate),
        social_security: round_money(gross_pay * rates.social_security_rate),
        medicare: round_money(gross_pay * rates.medicare_rate),
        health_insurance: rates.health_insurance,
        other_withholding: Decimal::ZERO,
        total_deductions,
    };
    breakdown.other_withholding = total_deductions - breakdown.itemized_sum();
    breakdown
}
