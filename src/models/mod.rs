//! Core data models for the workforce engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod audit;
mod employee;
mod pay_period;
mod payroll;
mod stats;

pub use attendance::{
    AttendanceCompletion, AttendanceRecord, AttendanceStatus, DailyAttendance, DayState,
};
pub use audit::{AuditStep, AuditWarning, WarningSeverity};
pub use employee::{AccountKind, EmployeeProfile, Role};
pub use pay_period::PayPeriod;
pub use payroll::{
    DeductionBreakdown, PayrollAdjustment, PayrollRecord, PayrollStatus, Paystub,
};
pub use stats::{
    AttendanceOverview, OverviewEntry, OverviewSummary, PayrollOverview, PayrollSummary,
    WeeklyStats,
};
