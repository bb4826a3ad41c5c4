//! Configuration types for workforce policy.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML policy files. Every type has a `Default`
//! matching the shipped `config/default` files.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Attendance rules: late cutoff, weekly thresholds and history limits.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AttendancePolicy {
    /// Clock-ins strictly after this local wall time are late.
    pub late_cutoff: NaiveTime,
    /// Hours per week paid at the regular rate before overtime starts.
    pub weekly_regular_hours: Decimal,
    /// Length of the trailing window used for weekly statistics, in days.
    pub weekly_window_days: u32,
    /// Number of history entries returned when no limit is requested.
    pub history_default_limit: usize,
    /// Upper bound on the number of history entries per request.
    pub history_max_limit: usize,
}

impl Default for AttendancePolicy {
    fn default() -> Self {
        Self {
            late_cutoff: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
            weekly_regular_hours: Decimal::from(40),
            weekly_window_days: 7,
            history_default_limit: 30,
            history_max_limit: 366,
        }
    }
}

/// Rates used for the itemized paystub breakdown.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ItemizedRates {
    /// Federal income tax rate applied to gross pay.
    pub federal_tax_rate: Decimal,
    /// State income tax rate applied to gross pay.
    pub state_tax_rate: Decimal,
    /// Social security rate applied to gross pay.
    pub social_security_rate: Decimal,
    /// Medicare rate applied to gross pay.
    pub medicare_rate: Decimal,
    /// Flat health insurance premium per period.
    pub health_insurance: Decimal,
}

impl Default for ItemizedRates {
    fn default() -> Self {
        Self {
            federal_tax_rate: Decimal::new(12, 2),
            state_tax_rate: Decimal::new(5, 2),
            social_security_rate: Decimal::new(62, 3),
            medicare_rate: Decimal::new(145, 4),
            health_insurance: Decimal::from(150),
        }
    }
}

/// Payroll arithmetic constants.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PayrollPolicy {
    /// Number of pay periods per year (the annual salary divisor).
    pub periods_per_year: Decimal,
    /// Standard working hours in one pay period, used for the hourly rate.
    pub standard_period_hours: Decimal,
    /// Multiplier applied to the hourly rate for overtime hours.
    pub overtime_multiplier: Decimal,
    /// Flat withholding rate applied to gross pay.
    pub flat_withholding_rate: Decimal,
    /// Flat benefits deduction added on top of withholding.
    pub benefits_deduction: Decimal,
    /// Rates for the itemized paystub breakdown.
    pub itemized: ItemizedRates,
}

impl Default for PayrollPolicy {
    fn default() -> Self {
        Self {
            periods_per_year: Decimal::from(12),
            standard_period_hours: Decimal::from(160),
            overtime_multiplier: Decimal::new(15, 1),
            flat_withholding_rate: Decimal::new(22, 2),
            benefits_deduction: Decimal::from(150),
            itemized: ItemizedRates::default(),
        }
    }
}

/// Roster display rules.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RosterPolicy {
    /// Name shown when a profile has no usable name, username or email.
    pub placeholder_name: String,
}

impl Default for RosterPolicy {
    fn default() -> Self {
        Self {
            placeholder_name: "Unknown Employee".to_string(),
        }
    }
}

/// The complete workforce policy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Policy {
    /// Attendance rules.
    pub attendance: AttendancePolicy,
    /// Payroll arithmetic constants.
    pub payroll: PayrollPolicy,
    /// Roster display rules.
    pub roster: RosterPolicy,
}
