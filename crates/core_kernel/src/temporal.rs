//! Deadlines, clocks and timezone handling
//!
//! Submission deadlines are published as local wall-clock instants in the
//! federal council's timezone. They are parsed once into UTC instants and every
//! deadline check afterwards is a pure comparison against the current time
//! supplied by a [`Clock`].

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::RwLock;
use thiserror::Error;

/// Format of deadline literals (`2026-03-31T23:59:59`)
pub const DEADLINE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid local datetime '{value}': {reason}")]
    InvalidDateTime { value: String, reason: String },

    #[error("Local time {0} does not map to a single instant")]
    AmbiguousLocalTime(String),
}

/// Timezone wrapper used to anchor local dates and deadlines
///
/// Wraps chrono_tz::Tz with custom serialization support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timezone(pub Tz);

impl Serialize for Timezone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.name())
    }
}

impl<'de> Deserialize<'de> for Timezone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Tz::from_str(&s)
            .map(Timezone)
            .map_err(|_| serde::de::Error::custom(format!("Invalid timezone: {}", s)))
    }
}

impl FromStr for Timezone {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tz::from_str(s.trim())
            .map(Timezone)
            .map_err(|_| TemporalError::InvalidTimezone(s.to_string()))
    }
}

impl Timezone {
    pub fn new(tz: Tz) -> Self {
        Self(tz)
    }

    /// Timezone of the federal council
    pub fn sao_paulo() -> Self {
        Self(chrono_tz::America::Sao_Paulo)
    }

    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    /// Converts a UTC datetime to the local timezone
    pub fn to_local(&self, utc: DateTime<Utc>) -> DateTime<Tz> {
        utc.with_timezone(&self.0)
    }

    /// Local calendar date of a UTC instant
    pub fn local_date(&self, utc: DateTime<Utc>) -> NaiveDate {
        self.to_local(utc).date_naive()
    }

    /// Interprets a naive local datetime in this timezone
    pub fn from_local(&self, local: NaiveDateTime) -> Result<DateTime<Utc>, TemporalError> {
        local
            .and_local_timezone(self.0)
            .single()
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or_else(|| TemporalError::AmbiguousLocalTime(local.to_string()))
    }

    /// Gets the start of day (00:00:00) in this timezone as UTC
    pub fn start_of_day(&self, date: NaiveDate) -> Result<DateTime<Utc>, TemporalError> {
        let local = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| TemporalError::InvalidDateTime {
                value: date.to_string(),
                reason: "no midnight".to_string(),
            })?;
        self.from_local(local)
    }

    /// Gets the end of day (23:59:59.999) in this timezone as UTC
    pub fn end_of_day(&self, date: NaiveDate) -> Result<DateTime<Utc>, TemporalError> {
        let local = date
            .and_hms_milli_opt(23, 59, 59, 999)
            .ok_or_else(|| TemporalError::InvalidDateTime {
                value: date.to_string(),
                reason: "no end of day".to_string(),
            })?;
        self.from_local(local)
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self::sao_paulo()
    }
}

impl fmt::Display for Timezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.name())
    }
}

/// A fixed submission deadline
///
/// The deadline instant itself is still inside the window: an action is late
/// only when `now > deadline`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Deadline {
    at: DateTime<Utc>,
}

impl Deadline {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self { at }
    }

    /// Parses a local wall-clock literal (`2026-03-31T23:59:59`) in `timezone`
    ///
    /// # Errors
    ///
    /// Returns `TemporalError::InvalidDateTime` if the literal is malformed and
    /// `TemporalError::AmbiguousLocalTime` if it falls in a DST gap or overlap.
    pub fn parse_local(value: &str, timezone: Timezone) -> Result<Self, TemporalError> {
        let naive = NaiveDateTime::parse_from_str(value.trim(), DEADLINE_FORMAT).map_err(|e| {
            TemporalError::InvalidDateTime {
                value: value.to_string(),
                reason: e.to_string(),
            }
        })?;
        timezone.from_local(naive).map(Self::new)
    }

    pub fn at(&self) -> DateTime<Utc> {
        self.at
    }

    /// True once `now` is strictly after the deadline
    pub fn has_passed(&self, now: DateTime<Utc>) -> bool {
        now > self.at
    }

    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        !self.has_passed(now)
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.at.to_rfc3339())
    }
}

/// Source of "now" for deadline checks and audit timestamps
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to
#[derive(Debug)]
pub struct FixedClock {
    now: RwLock<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        match self.now.write() {
            Ok(mut guard) => *guard = now,
            Err(poisoned) => *poisoned.into_inner() = now,
        }
    }

    pub fn advance(&self, by: Duration) {
        let next = self.now() + by;
        self.set(next);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        match self.now.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_deadline_parse_is_local_time() {
        let deadline = Deadline::parse_local("2026-03-31T23:59:59", Timezone::sao_paulo()).unwrap();
        // Sao Paulo is UTC-3 with no DST in 2026
        assert_eq!(deadline.at(), Utc.with_ymd_and_hms(2026, 4, 1, 2, 59, 59).unwrap());
    }

    #[test]
    fn test_deadline_boundary_is_inclusive() {
        let deadline = Deadline::new(Utc.with_ymd_and_hms(2026, 3, 31, 12, 0, 0).unwrap());
        assert!(deadline.is_open(deadline.at()));
        assert!(deadline.has_passed(deadline.at() + Duration::seconds(1)));
    }

    #[test]
    fn test_deadline_rejects_malformed_literal() {
        let result = Deadline::parse_local("31/03/2026", Timezone::sao_paulo());
        assert!(matches!(result, Err(TemporalError::InvalidDateTime { .. })));
    }

    #[test]
    fn test_fixed_clock_advance() {
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let clock = FixedClock::new(start);
        clock.advance(Duration::days(1));
        assert_eq!(clock.now(), start + Duration::days(1));
    }

    #[test]
    fn test_end_of_day_in_timezone() {
        let tz = Timezone::sao_paulo();
        let date = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();
        let end = tz.end_of_day(date).unwrap();
        assert_eq!(tz.local_date(end), date);
        assert_eq!(tz.local_date(end + Duration::milliseconds(1)), date.succ_opt().unwrap());
    }

    #[test]
    fn test_timezone_serde() {
        let tz: Timezone = serde_json::from_str("\"America/Sao_Paulo\"").unwrap();
        assert_eq!(tz, Timezone::sao_paulo());
        assert!(serde_json::from_str::<Timezone>("\"Mars/Olympus\"").is_err());
    }
}
