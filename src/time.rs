//! Time and rounding utilities shared by the engines.
//!
//! Timestamps are always carried with their UTC offset; "local" means the
//! wall-clock time in that offset. Nothing here consults the host time zone
//! except [`SystemClock`].

use chrono::{DateTime, Days, FixedOffset, Local, NaiveDate, NaiveTime};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Returns the calendar day of `at` in its own offset.
///
/// # Example
///
/// ```
/// use chrono::{DateTime, NaiveDate};
/// use workforce_engine::time::date_key;
///
/// let at = DateTime::parse_from_rfc3339("2026-01-15T23:30:00-05:00").unwrap();
/// assert_eq!(date_key(&at), NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
/// ```
pub fn date_key(at: &DateTime<FixedOffset>) -> NaiveDate {
    at.date_naive()
}

/// Returns true when the local wall time of `at` is strictly after `cutoff`.
///
/// # Example
///
/// ```
/// use chrono::{DateTime, NaiveTime};
/// use workforce_engine::time::is_late;
///
/// let cutoff = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
/// let on_time = DateTime::parse_from_rfc3339("2026-01-15T09:00:00+10:00").unwrap();
/// let late = DateTime::parse_from_rfc3339("2026-01-15T09:00:01+10:00").unwrap();
/// assert!(!is_late(&on_time, cutoff));
/// assert!(is_late(&late, cutoff));
/// ```
pub fn is_late(at: &DateTime<FixedOffset>, cutoff: NaiveTime) -> bool {
    at.time() > cutoff
}

/// Returns the signed duration from `start` to `end` in hours, rounded to
/// two decimal places.
///
/// # Example
///
/// ```
/// use chrono::DateTime;
/// use rust_decimal::Decimal;
/// use workforce_engine::time::hours_between;
///
/// let start = DateTime::parse_from_rfc3339("2026-01-15T09:00:00Z").unwrap();
/// let end = DateTime::parse_from_rfc3339("2026-01-15T17:20:00Z").unwrap();
/// assert_eq!(hours_between(&start, &end), Decimal::new(833, 2));
/// ```
pub fn hours_between(start: &DateTime<FixedOffset>, end: &DateTime<FixedOffset>) -> Decimal {
    let millis = end.signed_duration_since(*start).num_milliseconds();
    (Decimal::from(millis) / Decimal::from(MILLIS_PER_HOUR))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a monetary amount to the nearest whole unit (halves away from zero).
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to one decimal place and fixes the scale at exactly one, so the
/// value always displays as e.g. `40.0`.
pub fn one_decimal(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(1);
    rounded
}

/// An inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    /// First day in the window.
    pub start: NaiveDate,
    /// Last day in the window.
    pub end: NaiveDate,
}

impl DateWindow {
    /// The `days`-long window ending on (and including) `today`.
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use workforce_engine::time::DateWindow;
    ///
    /// let today = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
    /// let window = DateWindow::trailing(today, 7);
    /// assert_eq!(window.start, NaiveDate::from_ymd_opt(2026, 1, 9).unwrap());
    /// assert!(window.contains(today));
    /// ```
    pub fn trailing(today: NaiveDate, days: u32) -> Self {
        let back = Days::new(u64::from(days.saturating_sub(1)));
        Self {
            start: today.checked_sub_days(back).unwrap_or(NaiveDate::MIN),
            end: today,
        }
    }

    /// Checks whether `date` falls inside the window (inclusive).
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Source of the current time for callers that omit a timestamp.
pub trait Clock: Send + Sync {
    /// The current instant with its offset.
    fn now(&self) -> DateTime<FixedOffset>;

    /// The current calendar day in the clock's offset.
    fn today(&self) -> NaiveDate {
        date_key(&self.now())
    }
}

/// Reads the host clock in the host's local offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}
