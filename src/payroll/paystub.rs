//! Paystub projection.

use crate::aggregation::display_name;
use crate::config::ItemizedRates;
use crate::models::{EmployeeProfile, PayrollRecord, Paystub};

use super::itemize_deductions;

/// Projects a profile and its payroll record into a paystub.
///
/// All monetary figures come from the record; only the deduction
/// breakdown is derived here.
pub fn build_paystub(
    profile: &EmployeeProfile,
    record: &PayrollRecord,
    rates: &ItemizedRates,
    placeholder: &str,
) -> Paystub {
    Paystub {
        payroll_id: record.id,
        employee_id: record.employee_id.clone(),
        employee_name: display_name(profile, placeholder),
        department: profile.department.clone(),
        role: profile.role,
        pay_period: record.pay_period(),
        base_salary: record.base_salary,
        overtime_hours: record.overtime_hours,
        overtime_pay: record.overtime_pay,
        gross_pay: record.gross_pay,
        deductions: itemize_deductions(record.gross_pay, record.deductions, rates),
        net_pay: record.net_pay,
        status: record.status,
    }
}
