//! Audit trail models.
//!
//! Calculations record each rule they apply as an [`AuditStep`] so that a
//! payroll figure can always be traced back to its inputs. Conditions that
//! do not stop an operation but deserve attention become [`AuditWarning`]s.

use serde::{Deserialize, Serialize};

/// A single step in the audit trace recording a calculation decision.
///
/// # Example
///
/// ```
/// use workforce_engine::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "gross_pay".to_string(),
///     rule_name: "Gross Pay Calculation".to_string(),
///     input: serde_json::json!({"annual_salary": "60000", "overtime_hours": "0"}),
///     output: serde_json::json!({"gross_pay": "5000"}),
///     reasoning: "60000 / 12 = 5000 base, no overtime".to_string(),
/// };
/// assert_eq!(step.rule_id, "gross_pay");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// Severity of an [`AuditWarning`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningSeverity {
    /// Informational.
    Low,
    /// Should be reviewed.
    Medium,
    /// Likely a data error.
    High,
}

/// A warning generated during an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// How serious the warning is.
    pub severity: WarningSeverity,
}

impl AuditWarning {
    /// Creates a new warning.
    pub fn new(code: impl Into<String>, message: impl Into<String>, severity: WarningSeverity) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity,
        }
    }
}
