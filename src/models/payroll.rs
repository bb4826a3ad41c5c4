//! Payroll record and paystub models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{PayPeriod, Role};

/// Lifecycle of a payroll record.
///
/// Records move from `Pending` to `Processed` only through an explicit
/// payroll run, and never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayrollStatus {
    /// Computed but not yet paid out.
    Pending,
    /// Paid out; the figures are frozen.
    Processed,
}

/// One employee's payroll for one pay period.
///
/// The derived fields always satisfy `gross_pay = base_salary +
/// overtime_pay` and `net_pay = gross_pay - deductions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// Record identifier.
    pub id: Uuid,
    /// The employee being paid.
    pub employee_id: String,
    /// First day of the pay period.
    pub pay_period_start: NaiveDate,
    /// Last day of the pay period.
    pub pay_period_end: NaiveDate,
    /// The period's share of the annual salary.
    pub base_salary: Decimal,
    /// Overtime hours worked in the period.
    pub overtime_hours: Decimal,
    /// Pay for the overtime hours.
    pub overtime_pay: Decimal,
    /// Total deductions.
    pub deductions: Decimal,
    /// Base salary plus overtime pay.
    pub gross_pay: Decimal,
    /// Gross pay minus deductions.
    pub net_pay: Decimal,
    /// Lifecycle status.
    pub status: PayrollStatus,
}

impl PayrollRecord {
    /// Returns the pay period this record covers.
    pub fn pay_period(&self) -> PayPeriod {
        PayPeriod {
            start_date: self.pay_period_start,
            end_date: self.pay_period_end,
        }
    }

    /// Checks both derived-field invariants.
    pub fn is_consistent(&self) -> bool {
        self.gross_pay == self.base_salary + self.overtime_pay
            && self.net_pay == self.gross_pay - self.deductions
    }
}

/// Changes requested to a pending payroll record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollAdjustment {
    /// New overtime hours; recomputes overtime pay, gross, deductions and net.
    #[serde(default)]
    pub overtime_hours: Option<Decimal>,
    /// Explicit deductions override; recomputes net.
    #[serde(default)]
    pub deductions: Option<Decimal>,
}

impl PayrollAdjustment {
    /// Returns true if the adjustment changes nothing.
    pub fn is_empty(&self) -> bool {
        self.overtime_hours.is_none() && self.deductions.is_none()
    }
}

/// Itemized deductions shown on a paystub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionBreakdown {
    /// Federal income tax.
    pub federal_tax: Decimal,
    /// State income tax.
    pub state_tax: Decimal,
    /// Social security contribution.
    pub social_security: Decimal,
    /// Medicare contribution.
    pub medicare: Decimal,
    /// Health insurance premium.
    pub health_insurance: Decimal,
    /// Difference between the stored total and the itemized lines.
    pub other_withholding: Decimal,
    /// Total deductions as stored on the payroll record.
    pub total_deductions: Decimal,
}

impl DeductionBreakdown {
    /// Sum of the named line items, excluding `other_withholding`.
    pub fn itemized_sum(&self) -> Decimal {
        self.federal_tax
            + self.state_tax
            + self.social_security
            + self.medicare
            + self.health_insurance
    }
}

/// A displayable paystub. Recomputed on every request, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paystub {
    /// The payroll record this stub was built from.
    pub payroll_id: Uuid,
    /// The employee being paid.
    pub employee_id: String,
    /// Resolved display name.
    pub employee_name: String,
    /// The employee's department.
    pub department: Option<String>,
    /// The employee's role.
    pub role: Role,
    /// Pay period covered.
    pub pay_period: PayPeriod,
    /// The period's share of the annual salary.
    pub base_salary: Decimal,
    /// Overtime hours worked.
    pub overtime_hours: Decimal,
    /// Pay for overtime hours.
    pub overtime_pay: Decimal,
    /// Gross pay.
    pub gross_pay: Decimal,
    /// Itemized deductions.
    pub deductions: DeductionBreakdown,
    /// Net pay, as stored on the payroll record.
    pub net_pay: Decimal,
    /// Payroll status.
    pub status: PayrollStatus,
}
