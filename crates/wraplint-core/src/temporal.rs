//! # Temporal Types: Zulu Timestamps & Exchange Sessions
//!
//! Day documents carry timestamps in one fixed form, `YYYY-MM-DDTHH:MM:SSZ`:
//! UTC, no sub-seconds, no `+00:00` offset notation. Because every accepted
//! value shares that shape, lexicographic order equals chronological order,
//! which the governance checker relies on.
//!
//! Session inference converts a UTC instant to exchange-local wall time
//! using a [`SessionCalendar`], which carries the standard offset and an
//! optional daylight-saving rule. Boundaries are table data, not literals,
//! because exchange calendars vary by region.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::WraplintError;

/// Byte shape of `YYYY-MM-DDTHH:MM:SSZ`: `d` is an ASCII digit, anything
/// else must match literally.
const ZULU_SHAPE: &[u8; 20] = b"dddd-dd-ddTdd:dd:ddZ";
const DATE_SHAPE: &[u8; 10] = b"dddd-dd-dd";

fn matches_shape(s: &str, shape: &[u8]) -> bool {
    s.len() == shape.len()
        && s.bytes().zip(shape.iter()).all(|(b, &want)| match want {
            b'd' => b.is_ascii_digit(),
            lit => b == lit,
        })
}

/// Returns true when `s` is exactly `YYYY-MM-DDTHH:MM:SSZ` and names a
/// real calendar instant.
pub fn is_zulu_timestamp(s: &str) -> bool {
    parse_zulu(s).is_ok()
}

/// Parse a strict Zulu timestamp.
///
/// # Errors
///
/// Rejects fractional seconds, offset notation (even `+00:00`), lowercase
/// separators, and out-of-range fields.
pub fn parse_zulu(s: &str) -> Result<DateTime<Utc>, WraplintError> {
    if !matches_shape(s, ZULU_SHAPE) {
        return Err(WraplintError::Temporal(format!(
            "timestamp must be YYYY-MM-DDTHH:MM:SSZ, got {s:?}"
        )));
    }
    let naive = NaiveDateTime::parse_from_str(&s[..19], "%Y-%m-%dT%H:%M:%S")
        .map_err(|e| WraplintError::Temporal(format!("invalid timestamp {s:?}: {e}")))?;
    Ok(naive.and_utc())
}

/// Parse a strict `YYYY-MM-DD` calendar date.
pub fn parse_calendar_date(s: &str) -> Result<NaiveDate, WraplintError> {
    if !matches_shape(s, DATE_SHAPE) {
        return Err(WraplintError::Temporal(format!(
            "date must be YYYY-MM-DD, got {s:?}"
        )));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| WraplintError::Temporal(format!("invalid date {s:?}: {e}")))
}

/// Market session state of an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketSession {
    Pre,
    Regular,
    Post,
}

impl MarketSession {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pre => "pre",
            Self::Regular => "regular",
            Self::Post => "post",
        }
    }
}

impl fmt::Display for MarketSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarketSession {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pre" => Ok(Self::Pre),
            "regular" => Ok(Self::Regular),
            "post" => Ok(Self::Post),
            other => Err(format!("unknown market session {other:?}")),
        }
    }
}

/// The `nth` occurrence of `weekday` in `month` (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NthWeekday {
    pub month: u32,
    pub nth: u8,
    pub weekday: Weekday,
}

impl NthWeekday {
    fn resolve(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_weekday_of_month_opt(year, self.month, self.weekday, self.nth)
    }
}

/// Daylight-saving rule. Transitions happen at `transition` local wall
/// time: on `start` the clock is on standard time, on `end` it is on
/// daylight time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DstRule {
    pub start: NthWeekday,
    pub end: NthWeekday,
    pub transition: NaiveTime,
    pub shift_minutes: i32,
}

/// Exchange session calendar for one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCalendar {
    /// Region code matched case-insensitively against `governance.region`.
    pub region: String,
    /// Offset of exchange standard time from UTC, in minutes (UTC−5 is `-300`).
    pub standard_offset_minutes: i32,
    #[serde(default)]
    pub dst: Option<DstRule>,
    pub regular_open: NaiveTime,
    pub regular_close: NaiveTime,
}

impl SessionCalendar {
    /// US equities: Eastern time, 09:30–16:00, DST from the second Sunday
    /// of March to the first Sunday of November at 02:00 local.
    pub fn us_equities() -> Self {
        Self {
            region: "US".to_string(),
            standard_offset_minutes: -300,
            dst: Some(DstRule {
                start: NthWeekday {
                    month: 3,
                    nth: 2,
                    weekday: Weekday::Sun,
                },
                end: NthWeekday {
                    month: 11,
                    nth: 1,
                    weekday: Weekday::Sun,
                },
                transition: NaiveTime::from_hms_opt(2, 0, 0).unwrap_or_default(),
                shift_minutes: 60,
            }),
            regular_open: NaiveTime::from_hms_opt(9, 30, 0).unwrap_or_default(),
            regular_close: NaiveTime::from_hms_opt(16, 0, 0).unwrap_or_default(),
        }
    }

    /// Offset of exchange-local time from UTC at instant `at`, in minutes.
    pub fn utc_offset_minutes(&self, at: DateTime<Utc>) -> i32 {
        let standard = self.standard_offset_minutes;
        let Some(dst) = &self.dst else {
            return standard;
        };
        let t = at.naive_utc();
        let local_year = (t + Duration::minutes(i64::from(standard))).year();
        let (Some(start), Some(end)) = (dst.start.resolve(local_year), dst.end.resolve(local_year))
        else {
            return standard;
        };
        let start_utc = start.and_time(dst.transition) - Duration::minutes(i64::from(standard));
        let end_utc = end.and_time(dst.transition)
            - Duration::minutes(i64::from(standard + dst.shift_minutes));

        // Southern-hemisphere rules wrap the year end.
        let in_dst = if start_utc <= end_utc {
            t >= start_utc && t < end_utc
        } else {
            t >= start_utc || t < end_utc
        };
        if in_dst {
            standard + dst.shift_minutes
        } else {
            standard
        }
    }

    /// Exchange-local wall-clock time of `at`.
    pub fn local_time(&self, at: DateTime<Utc>) -> NaiveDateTime {
        at.naive_utc() + Duration::minutes(i64::from(self.utc_offset_minutes(at)))
    }

    /// Classify an instant into pre-market, regular, or post-market.
    pub fn classify(&self, at: DateTime<Utc>) -> MarketSession {
        let local = self.local_time(at).time();
        if local < self.regular_open {
            MarketSession::Pre
        } else if local < self.regular_close {
            MarketSession::Regular
        } else {
            MarketSession::Post
        }
    }
}
