//! Policy configuration for the workforce engine.
//!
//! This module loads the business constants (late cutoff, weekly overtime
//! threshold, payroll divisors and deduction rates) from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use workforce_engine::config::PolicyLoader;
//!
//! let loader = PolicyLoader::load("./config/default").unwrap();
//! println!("Overtime multiplier: {}", loader.payroll().overtime_multiplier);
//! ```

mod loader;
mod types;

pub use loader::PolicyLoader;
pub use types::{AttendancePolicy, ItemizedRates, PayrollPolicy, Policy, RosterPolicy};
