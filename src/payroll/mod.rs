//! Payroll computation.
//!
//! This module contains the payroll arithmetic (gross pay, flat deductions,
//! itemized paystub deductions), record construction and adjustment, and
//! the [`PayrollEngine`] that persists records through the store.

mod deductions;
mod engine;
mod gross_pay;
mod paystub;
mod record;

pub use deductions::{NetPayResult, compute_deductions_and_net, itemize_deductions};
pub use engine::PayrollEngine;
pub use gross_pay::{GrossPayResult, compute_gross_pay};
pub use paystub::build_paystub;
pub use record::{apply_adjustment, build_payroll_record};
