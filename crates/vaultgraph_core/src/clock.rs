//! Explicit projection clock.
//!
//! # Responsibility
//! - Carry the caller-supplied `today` and `now` through every temporal rule.
//! - Derive week boundaries without touching wall-clock time.
//!
//! # Invariants
//! - No function in this crate reads the system clock.
//! - Weeks run Monday..Sunday; `end_of_week` is never before `today`.

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use std::error::Error;
use std::fmt::{Display, Formatter};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors for malformed clock inputs at the caller boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClockError {
    /// `today` is not a `YYYY-MM-DD` calendar date.
    InvalidDate(String),
    /// `now` is not an RFC 3339 timestamp.
    InvalidTimestamp(String),
}

impl Display for ClockError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate(value) => write!(f, "invalid date `{value}`; expected YYYY-MM-DD"),
            Self::InvalidTimestamp(value) => {
                write!(f, "invalid timestamp `{value}`; expected RFC 3339")
            }
        }
    }
}

impl Error for ClockError {}

/// Reference point for one projection call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    /// Calendar day used by due/scheduled/defer rules.
    pub today: NaiveDate,
    /// Instant used by the recently-modified window.
    pub now: DateTime<Utc>,
}

impl Clock {
    pub fn new(today: NaiveDate, now: DateTime<Utc>) -> Self {
        Self { today, now }
    }

    /// Builds a clock whose `today` is the UTC calendar day of `now`.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            today: now.date_naive(),
            now,
        }
    }

    /// Builds a clock for `today` with `now` at that day's UTC midnight.
    pub fn on(today: NaiveDate) -> Self {
        Self {
            today,
            now: today.and_time(chrono::NaiveTime::MIN).and_utc(),
        }
    }

    /// Parses caller strings; `now` defaults to midnight of `today`.
    ///
    /// # Errors
    /// - `InvalidDate` when `today` is not `YYYY-MM-DD`.
    /// - `InvalidTimestamp` when `now` is present and not RFC 3339.
    pub fn parse(today: &str, now: Option<&str>) -> Result<Self, ClockError> {
        let day = parse_date(today)?;
        match now {
            None => Ok(Self::on(day)),
            Some(raw) => {
                let instant = DateTime::parse_from_rfc3339(raw.trim())
                    .map_err(|_| ClockError::InvalidTimestamp(raw.to_string()))?
                    .with_timezone(&Utc);
                Ok(Self::new(day, instant))
            }
        }
    }

    /// Upcoming Sunday, inclusive of today.
    pub fn end_of_week(&self) -> NaiveDate {
        let remaining = 6 - u64::from(self.today.weekday().num_days_from_monday());
        self.today
            .checked_add_days(Days::new(remaining))
            .unwrap_or(NaiveDate::MAX)
    }
}

/// Parses one `YYYY-MM-DD` date string.
pub fn parse_date(value: &str) -> Result<NaiveDate, ClockError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| ClockError::InvalidDate(value.to_string()))
}
