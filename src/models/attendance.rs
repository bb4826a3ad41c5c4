//! Attendance record model and the query-side daily view.
//!
//! A stored [`AttendanceRecord`] is only ever present, late or completed.
//! "Absent" exists solely as [`DailyAttendance::Absent`], produced when a
//! lookup finds no record.

use chrono::{DateTime, FixedOffset, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stored status of an attendance record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// Clocked in on time, not yet clocked out.
    Present,
    /// Clocked in after the cutoff, not yet clocked out.
    Late,
    /// Clocked out.
    Completed,
}

/// One employee's attendance for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Record identifier.
    pub id: Uuid,
    /// The employee this record belongs to.
    pub employee_id: String,
    /// The calendar day (local to the clock-in offset).
    pub date: NaiveDate,
    /// When the employee clocked in.
    pub check_in_time: DateTime<FixedOffset>,
    /// When the employee clocked out, if they have.
    pub check_out_time: Option<DateTime<FixedOffset>>,
    /// Stored status.
    pub status: AttendanceStatus,
    /// Hours between check-in and check-out, set at clock-out.
    pub total_hours: Option<Decimal>,
}

impl AttendanceRecord {
    /// Creates an open record for a clock-in.
    pub fn open(
        employee_id: impl Into<String>,
        date: NaiveDate,
        check_in_time: DateTime<FixedOffset>,
        status: AttendanceStatus,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_id: employee_id.into(),
            date,
            check_in_time,
            check_out_time: None,
            status,
            total_hours: None,
        }
    }

    /// Returns true while the employee has not clocked out.
    pub fn is_open(&self) -> bool {
        self.check_out_time.is_none()
    }

    /// Applies a clock-out: time, hours and status change together.
    pub fn complete(&mut self, completion: &AttendanceCompletion) {
        self.check_out_time = Some(completion.check_out_time);
        self.total_hours = Some(completion.total_hours);
        self.status = AttendanceStatus::Completed;
    }
}

/// The fields a clock-out writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceCompletion {
    /// When the employee clocked out.
    pub check_out_time: DateTime<FixedOffset>,
    /// Worked hours, rounded to two decimals.
    pub total_hours: Decimal,
}

/// Flattened attendance state for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayState {
    /// No record for the day.
    Absent,
    /// Clocked in on time.
    Present,
    /// Clocked in late.
    Late,
    /// Clocked out.
    Completed,
}

impl From<AttendanceStatus> for DayState {
    fn from(status: AttendanceStatus) -> Self {
        match status {
            AttendanceStatus::Present => DayState::Present,
            AttendanceStatus::Late => DayState::Late,
            AttendanceStatus::Completed => DayState::Completed,
        }
    }
}

/// The result of looking up one employee's day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DailyAttendance {
    /// No record exists for the day.
    Absent {
        /// The employee that was looked up.
        employee_id: String,
        /// The day that was looked up.
        date: NaiveDate,
    },
    /// A record exists.
    Recorded(AttendanceRecord),
}

impl DailyAttendance {
    /// Returns the flattened state.
    pub fn state(&self) -> DayState {
        match self {
            DailyAttendance::Absent { .. } => DayState::Absent,
            DailyAttendance::Recorded(record) => record.status.into(),
        }
    }

    /// Returns the record, if one exists.
    pub fn record(&self) -> Option<&AttendanceRecord> {
        match self {
            DailyAttendance::Absent { .. } => None,
            DailyAttendance::Recorded(record) => Some(record),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn ts(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn open_record() -> AttendanceRecord {
        AttendanceRecord::open(
            "emp_001",
            make_date("2026-01-15"),
            ts("2026-01-15T08:55:00+00:00"),
            AttendanceStatus::Present,
        )
    }

    #[test]
    fn test_open_record_has_no_checkout() {
        let record = open_record();
        assert!(record.is_open());
        assert!(record.total_hours.is_none());
        assert_eq!(record.status, AttendanceStatus::Present);
    }

    #[test]
    fn test_complete_sets_all_fields_together() {
        let mut record = open_record();
        record.complete(&AttendanceCompletion {
            check_out_time: ts("2026-01-15T17:00:00+00:00"),
            total_hours: Decimal::from_str("8.08").unwrap(),
        });

        assert!(!record.is_open());
        assert_eq!(record.status, AttendanceStatus::Completed);
        assert_eq!(record.total_hours, Some(Decimal::from_str("8.08").unwrap()));
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&AttendanceStatus::Completed).unwrap(),
            "\"completed\""
        );
        assert_eq!(serde_json::to_string(&DayState::Absent).unwrap(), "\"absent\"");
    }

    #[test]
    fn test_absent_serializes_with_state_tag() {
        let absent = DailyAttendance::Absent {
            employee_id: "emp_001".to_string(),
            date: make_date("2026-01-15"),
        };
        let json = serde_json::to_value(&absent).unwrap();
        assert_eq!(json["state"], "absent");
        assert_eq!(json["date"], "2026-01-15");
        assert_eq!(absent.state(), DayState::Absent);
        assert!(absent.record().is_none());
    }

    #[test]
    fn test_recorded_serializes_record_fields() {
        let daily = DailyAttendance::Recorded(open_record());
        let json = serde_json::to_value(&daily).unwrap();
        assert_eq!(json["state"], "recorded");
        assert_eq!(json["status"], "present");
        assert_eq!(json["employee_id"], "emp_001");
        assert_eq!(daily.state(), DayState::Present);
    }

    #[test]
    fn test_day_state_from_status() {
        assert_eq!(DayState::from(AttendanceStatus::Late), DayState::Late);
        assert_eq!(DayState::from(AttendanceStatus::Completed), DayState::Completed);
    }
}
