//! Configuration loading functionality.
//!
//! This module provides the [`PolicyLoader`] type for loading workforce
//! policy from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{AttendancePolicy, PayrollPolicy, Policy, RosterPolicy};

/// Loads and provides access to workforce policy.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── attendance.yaml  # Late cutoff, weekly thresholds, history limits
/// ├── payroll.yaml     # Salary divisors, overtime and deduction rates
/// └── roster.yaml      # Display placeholder
/// ```
///
/// # Example
///
/// ```no_run
/// use workforce_engine::config::PolicyLoader;
///
/// let loader = PolicyLoader::load("./config/default").unwrap();
/// println!("Late after {}", loader.attendance().late_cutoff);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PolicyLoader {
    policy: Policy,
}

impl PolicyLoader {
    /// Loads policy from the specified directory.
    ///
    /// Returns an error if any of the three policy files is missing or
    /// contains invalid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let attendance = Self::load_yaml::<AttendancePolicy>(&path.join("attendance.yaml"))?;
        let payroll = Self::load_yaml::<PayrollPolicy>(&path.join("payroll.yaml"))?;
        let roster = Self::load_yaml::<RosterPolicy>(&path.join("roster.yaml"))?;

        let policy = Policy {
            attendance,
            payroll,
            roster,
        };
        Self::validate(&policy)?;

        Ok(Self { policy })
    }

    /// Wraps an already-built policy.
    pub fn from_policy(policy: Policy) -> Self {
        Self { policy }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Rejects values that would make the engines divide by zero or loop
    /// over an empty window.
    fn validate(policy: &Policy) -> EngineResult<()> {
        let invalid = |file: &str, message: &str| EngineError::ConfigParseError {
            path: file.to_string(),
            message: message.to_string(),
        };

        if policy.payroll.periods_per_year.is_zero() {
            return Err(invalid("payroll.yaml", "periods_per_year must be non-zero"));
        }
        if policy.payroll.standard_period_hours.is_zero() {
            return Err(invalid(
                "payroll.yaml",
                "standard_period_hours must be non-zero",
            ));
        }
        if policy.attendance.weekly_window_days == 0 {
            return Err(invalid(
                "attendance.yaml",
                "weekly_window_days must be at least 1",
            ));
        }
        if policy.attendance.history_default_limit == 0
            || policy.attendance.history_default_limit > policy.attendance.history_max_limit
        {
            return Err(invalid(
                "attendance.yaml",
                "history_default_limit must be between 1 and history_max_limit",
            ));
        }
        Ok(())
    }

    /// Returns the full policy.
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Returns the attendance rules.
    pub fn attendance(&self) -> &AttendancePolicy {
        &self.policy.attendance
    }

    /// Returns the payroll constants.
    pub fn payroll(&self) -> &PayrollPolicy {
        &self.policy.payroll
    }

    /// Returns the roster display rules.
    pub fn roster(&self) -> &RosterPolicy {
        &self.policy.roster
    }
}
