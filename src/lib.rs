//! Workforce Engine
//!
//! This crate is the computational core of a workforce-management backend:
//! it derives daily attendance state from clock-in and clock-out events,
//! aggregates attendance into weekly and organization-wide statistics, and
//! computes payroll (gross pay, deductions, net pay and paystubs) from
//! salaries and worked hours.
//!
//! Persistence sits behind the repository traits in [`store`]; the
//! [`api`] module exposes every operation through a JSON action envelope.

#![warn(missing_docs)]

pub mod aggregation;
pub mod api;
pub mod attendance;
pub mod config;
pub mod error;
pub mod models;
pub mod payroll;
pub mod store;
pub mod time;
