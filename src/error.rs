//! Error types for the workforce engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur in the attendance, aggregation
//! and payroll engines.

use chrono::NaiveDate;
use thiserror::Error;

/// Broad classification of an [`EngineError`].
///
/// Callers use the kind to decide how to react (e.g. whether a retry might
/// help) without matching on every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A requested record does not exist.
    NotFound,
    /// The operation violates a state rule (duplicate, already closed, ...).
    Conflict,
    /// The input was missing or malformed.
    Validation,
    /// The data store failed for a reason unrelated to business rules.
    UpstreamFailure,
    /// Policy configuration could not be loaded.
    Configuration,
}

/// The main error type for the workforce engine.
///
/// # Example
///
/// ```
/// use workforce_engine::error::{EngineError, ErrorKind};
///
/// let error = EngineError::NoActiveClockIn {
///     employee_id: "emp_001".to_string(),
///     date: chrono::NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
/// };
/// assert_eq!(error.kind(), ErrorKind::Conflict);
/// assert_eq!(
///     error.to_string(),
///     "No active clock-in for employee 'emp_001' on 2026-01-15"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// No record exists for the requested key.
    #[error("{entity} not found: {key}")]
    NotFound {
        /// The kind of record that was looked up.
        entity: String,
        /// The key that was looked up.
        key: String,
    },

    /// A clock-in was attempted for a day that already has a record.
    #[error("Employee '{employee_id}' already clocked in on {date}")]
    AlreadyClockedIn {
        /// The employee that attempted to clock in.
        employee_id: String,
        /// The day of the attempt.
        date: NaiveDate,
    },

    /// A clock-out was attempted for a record that is already closed.
    #[error("Employee '{employee_id}' already clocked out on {date}")]
    AlreadyClockedOut {
        /// The employee that attempted to clock out.
        employee_id: String,
        /// The day of the attempt.
        date: NaiveDate,
    },

    /// A clock-out was attempted without a clock-in on the same day.
    #[error("No active clock-in for employee '{employee_id}' on {date}")]
    NoActiveClockIn {
        /// The employee that attempted to clock out.
        employee_id: String,
        /// The day of the attempt.
        date: NaiveDate,
    },

    /// A payroll record already exists for the employee and period.
    #[error("Payroll for employee '{employee_id}' already exists for period starting {period_start}")]
    DuplicatePayrollPeriod {
        /// The employee of the payroll record.
        employee_id: String,
        /// The first day of the pay period.
        period_start: NaiveDate,
    },

    /// A processed payroll record cannot be changed.
    #[error("Payroll for employee '{employee_id}' starting {period_start} is already processed")]
    PayrollAlreadyProcessed {
        /// The employee of the payroll record.
        employee_id: String,
        /// The first day of the pay period.
        period_start: NaiveDate,
    },

    /// The payroll record changed between being read and being written.
    #[error("Payroll for employee '{employee_id}' starting {period_start} was modified concurrently")]
    PayrollModified {
        /// The employee of the payroll record.
        employee_id: String,
        /// The first day of the pay period.
        period_start: NaiveDate,
    },

    /// A required input was missing or invalid.
    #[error("Invalid field '{field}': {message}")]
    Validation {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The data store failed.
    #[error("Data store failure: {message}")]
    Upstream {
        /// A description of the failure.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl EngineError {
    /// Returns the broad classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::NotFound { .. } => ErrorKind::NotFound,
            EngineError::AlreadyClockedIn { .. }
            | EngineError::AlreadyClockedOut { .. }
            | EngineError::NoActiveClockIn { .. }
            | EngineError::DuplicatePayrollPeriod { .. }
            | EngineError::PayrollAlreadyProcessed { .. }
            | EngineError::PayrollModified { .. } => ErrorKind::Conflict,
            EngineError::Validation { .. } => ErrorKind::Validation,
            EngineError::Upstream { .. } => ErrorKind::UpstreamFailure,
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ErrorKind::Configuration
            }
        }
    }

    /// Shorthand for a [`EngineError::NotFound`].
    pub fn not_found(entity: impl Into<String>, key: impl Into<String>) -> Self {
        EngineError::NotFound {
            entity: entity.into(),
            key: key.into(),
        }
    }

    /// Shorthand for a [`EngineError::Validation`].
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

/// Rejects an empty or whitespace-only identifier.
pub(crate) fn require_id(field: &str, value: &str) -> EngineResult<()> {
    if value.trim().is_empty() {
        return Err(EngineError::validation(field, "must not be empty"));
    }
    Ok(())
}
