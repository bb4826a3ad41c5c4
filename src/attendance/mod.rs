//! Attendance state engine.
//!
//! Tracks one record per employee per calendar day through the transitions
//! Absent → Present | Late → Completed. Absent is never stored; it is what
//! a lookup reports when no record exists.

mod engine;

pub use engine::{AttendanceEngine, ClockOutOutcome, NON_POSITIVE_DURATION};
