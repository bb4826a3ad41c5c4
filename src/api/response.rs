//! Response types for the action layer.
//!
//! Successful actions return an [`ActionResponse`]; failures return an
//! [`ApiError`] carrying a stable machine-readable code.

use serde::{Deserialize, Serialize};

use crate::attendance::ClockOutOutcome;
use crate::error::{EngineError, ErrorKind};
use crate::models::{
    AttendanceOverview, AttendanceRecord, DailyAttendance, PayrollOverview, PayrollRecord,
    Paystub, WeeklyStats,
};
use crate::payroll::{GrossPayResult, NetPayResult};

/// The result of a successful action. Serializes as the bare payload.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ActionResponse {
    /// `clock_in`
    ClockedIn(AttendanceRecord),
    /// `clock_out`
    ClockedOut(ClockOutOutcome),
    /// `current_status`
    Status(DailyAttendance),
    /// `history`
    History(Vec<AttendanceRecord>),
    /// `weekly_stats`
    WeeklyStats(WeeklyStats),
    /// `overview`
    Overview(AttendanceOverview),
    /// `ensure_payroll` and `adjust_payroll`
    Payroll(PayrollRecord),
    /// `paystub`
    Paystub(Paystub),
    /// `payroll_overview`
    PayrollOverview(PayrollOverview),
    /// `run_payroll`
    PayrollRun(Vec<PayrollRecord>),
    /// `compute_gross_pay`
    GrossPay(GrossPayResult),
    /// `compute_net_pay`
    NetPay(NetPayResult),
}

/// API error response structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates an unknown action error response.
    pub fn unknown_action(message: impl Into<String>) -> Self {
        Self::with_details(
            "UNKNOWN_ACTION",
            message,
            "The \"action\" field does not name a supported operation",
        )
    }

    /// Maps a request-body parse failure to an error response.
    ///
    /// Missing or ill-typed fields are validation errors; broken JSON is
    /// malformed.
    pub fn from_parse_error(err: &serde_json::Error) -> Self {
        let text = err.to_string();
        match err.classify() {
            serde_json::error::Category::Data if text.contains("unknown variant") => {
                Self::unknown_action(text)
            }
            serde_json::error::Category::Data => Self::validation_error(text),
            _ => Self::malformed_json(text),
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::NotFound { entity, key } => ApiError::with_details(
                "NOT_FOUND",
                message,
                format!("No {} exists for key '{}'", entity, key),
            ),
            EngineError::AlreadyClockedIn { .. } => ApiError::new("ALREADY_CLOCKED_IN", message),
            EngineError::AlreadyClockedOut { .. } => ApiError::new("ALREADY_CLOCKED_OUT", message),
            EngineError::NoActiveClockIn { .. } => ApiError::new("NO_ACTIVE_CLOCK_IN", message),
            EngineError::DuplicatePayrollPeriod { .. } => {
                ApiError::new("DUPLICATE_PAYROLL_PERIOD", message)
            }
            EngineError::PayrollAlreadyProcessed { .. } => ApiError::with_details(
                "PAYROLL_ALREADY_PROCESSED",
                message,
                "Processed payroll records cannot be changed",
            ),
            EngineError::PayrollModified { .. } => ApiError::with_details(
                "PAYROLL_MODIFIED",
                message,
                "Re-read the record and retry the adjustment",
            ),
            EngineError::Validation { .. } => ApiError::validation_error(message),
            EngineError::Upstream { .. } => ApiError::with_details(
                "UPSTREAM_FAILURE",
                "The data store could not complete the request",
                message,
            ),
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message)
            }
        }
    }
}

impl ApiError {
    /// The broad class of failure the code belongs to, if it came from
    /// the engine.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self.code.as_str() {
            "NOT_FOUND" => Some(ErrorKind::NotFound),
            "ALREADY_CLOCKED_IN"
            | "ALREADY_CLOCKED_OUT"
            | "NO_ACTIVE_CLOCK_IN"
            | "DUPLICATE_PAYROLL_PERIOD"
            | "PAYROLL_ALREADY_PROCESSED"
            | "PAYROLL_MODIFIED" => Some(ErrorKind::Conflict),
            "VALIDATION_ERROR" => Some(ErrorKind::Validation),
            "UPSTREAM_FAILURE" => Some(ErrorKind::UpstreamFailure),
            "CONFIG_ERROR" => Some(ErrorKind::Configuration),
            _ => None,
        }
    }
}
