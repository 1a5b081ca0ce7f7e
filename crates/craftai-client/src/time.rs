//! Time-derived context properties.
//!
//! Models may declare `time_of_day`, `day_of_week` and `timezone` properties
//! as generated; their values come from the operation timestamp and a UTC
//! offset.

use chrono::{DateTime, Datelike, FixedOffset, Offset, Timelike, Utc};

use crate::error::{Error, Result};

/// Largest accepted UTC offset, in minutes.
const MAX_OFFSET_MINUTES: i32 = 14 * 60;

/// A timestamp seen from a fixed UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Time {
    timestamp: i64,
    local: DateTime<FixedOffset>,
}

impl Time {
    /// Create a time from a unix timestamp and an optional UTC offset.
    ///
    /// Accepted offsets: `Z`, `UTC`, `+HH:MM`, `-HH:MM`, `+HHMM`, `+HH`.
    pub fn new(timestamp: i64, timezone: Option<&str>) -> Result<Self> {
        let offset = match timezone {
            Some(tz) => parse_offset(tz)?,
            None => utc(),
        };
        let utc_time = DateTime::from_timestamp(timestamp, 0)
            .ok_or_else(|| Error::Time(format!("timestamp {} is out of range", timestamp)))?;
        Ok(Self {
            timestamp,
            local: utc_time.with_timezone(&offset),
        })
    }

    /// The unix timestamp, in seconds.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Hours since local midnight, e.g. `13.5` for 13:30.
    pub fn time_of_day(&self) -> f64 {
        let seconds = self.local.num_seconds_from_midnight();
        f64::from(seconds) / 3600.0
    }

    /// Local day of the week, 0 = Monday through 6 = Sunday.
    pub fn day_of_week(&self) -> u32 {
        self.local.weekday().num_days_from_monday()
    }

    /// The offset as `+HH:MM`.
    pub fn timezone(&self) -> String {
        let minutes = self.local.offset().local_minus_utc() / 60;
        let sign = if minutes < 0 { '-' } else { '+' };
        let minutes = minutes.abs();
        format!("{}{:02}:{:02}", sign, minutes / 60, minutes % 60)
    }
}

fn utc() -> FixedOffset {
    Utc.fix()
}

fn parse_offset(tz: &str) -> Result<FixedOffset> {
    let invalid = || Error::Time(format!("invalid timezone '{}'", tz));
    let tz = tz.trim();

    if tz.eq_ignore_ascii_case("z") || tz.eq_ignore_ascii_case("utc") {
        return Ok(utc());
    }

    let (sign, rest) = match tz.split_at_checked(1) {
        Some(("+", rest)) => (1, rest),
        Some(("-", rest)) => (-1, rest),
        _ => return Err(invalid()),
    };
    if !rest.chars().all(|c| c.is_ascii_digit() || c == ':') {
        return Err(invalid());
    }

    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    let (hours, minutes) = match (digits.len(), rest.find(':')) {
        (2, None) => (&digits[..2], "00"),
        (4, None) | (4, Some(2)) => (&digits[..2], &digits[2..]),
        _ => return Err(invalid()),
    };
    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if minutes >= 60 {
        return Err(invalid());
    }

    let total = hours * 60 + minutes;
    if total > MAX_OFFSET_MINUTES {
        return Err(Error::Time(format!("timezone '{}' is out of range", tz)));
    }
    FixedOffset::east_opt(sign * total * 60).ok_or_else(invalid)
}
