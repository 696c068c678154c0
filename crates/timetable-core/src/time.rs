//! Time and date encodings used by timetable data.
//!
//! Class times travel as 4-digit `HHMM` strings and are held in memory as
//! [`ClockTime`] (minutes since midnight). Dates arrive either in the legacy
//! `DD/MM` form, whose year comes from the configured academic year, or in the
//! canonical `YYYY-MM-DD` form that doubles as the sort key.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Number of minutes in a day; also the largest valid [`ClockTime`] (`2400`).
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Errors raised when a time or date string is not in a recognised encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeError {
    /// Not a 4-digit `HHMM` string.
    #[error("invalid time {0:?}: expected 4-digit HHMM")]
    InvalidTime(String),
    /// Well-formed digits but hour or minute out of range.
    #[error("time {0:?} is out of range")]
    OutOfRange(String),
    /// Neither `DD/MM` nor `YYYY-MM-DD`, or not a real calendar date.
    #[error("invalid date {0:?}: expected DD/MM or YYYY-MM-DD")]
    InvalidDate(String),
}

/// Converts an `HHMM` string to minutes since midnight.
///
/// Accepts `0000` through `2359`, plus `2400` for end of day.
pub fn time_to_minutes(hhmm: &str) -> Result<u32, TimeError> {
    if hhmm.len() != 4 || !hhmm.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TimeError::InvalidTime(hhmm.to_string()));
    }
    let hours: u32 = hhmm[..2]
        .parse()
        .map_err(|_| TimeError::InvalidTime(hhmm.to_string()))?;
    let minutes: u32 = hhmm[2..]
        .parse()
        .map_err(|_| TimeError::InvalidTime(hhmm.to_string()))?;

    if minutes > 59 || hours > 24 || (hours == 24 && minutes != 0) {
        return Err(TimeError::OutOfRange(hhmm.to_string()));
    }
    Ok(hours * 60 + minutes)
}

/// Converts minutes since midnight back to a zero-padded `HHMM` string.
pub fn minutes_to_time(minutes: u32) -> String {
    format!("{:02}{:02}", minutes / 60, minutes % 60)
}

/// A validated time of day, stored as minutes since midnight.
///
/// Ordering is numeric, which matches the lexical order of the `HHMM` form.
/// Serializes as the `HHMM` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u32);

impl ClockTime {
    /// Midnight at the start of the day.
    pub const START_OF_DAY: ClockTime = ClockTime(0);
    /// Midnight at the end of the day (`2400`).
    pub const END_OF_DAY: ClockTime = ClockTime(MINUTES_PER_DAY);

    /// Creates a time from minutes since midnight.
    pub fn from_minutes(minutes: u32) -> Result<Self, TimeError> {
        if minutes > MINUTES_PER_DAY {
            return Err(TimeError::OutOfRange(minutes_to_time(minutes)));
        }
        Ok(Self(minutes))
    }

    /// Creates a time from an hour and minute.
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self, TimeError> {
        if minute > 59 {
            return Err(TimeError::OutOfRange(format!("{hour:02}{minute:02}")));
        }
        Self::from_minutes(hour * 60 + minute)
    }

    /// Minutes since midnight.
    pub fn minutes(self) -> u32 {
        self.0
    }

    /// Hour component (0..=24).
    pub fn hour(self) -> u32 {
        self.0 / 60
    }

    /// Minute component (0..=59).
    pub fn minute(self) -> u32 {
        self.0 % 60
    }

    /// Human-readable `HH:MM` form.
    pub fn to_display(self) -> String {
        format!("{:02}:{:02}", self.hour(), self.minute())
    }

    /// Absolute distance between two times in minutes.
    pub fn abs_diff(self, other: ClockTime) -> u32 {
        self.0.abs_diff(other.0)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&minutes_to_time(self.0))
    }
}

impl FromStr for ClockTime {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        time_to_minutes(s).map(Self)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Context needed to resolve dates that omit the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateContext {
    /// Year applied to legacy `DD/MM` dates.
    pub academic_year: i32,
}

impl DateContext {
    /// Creates a context for the given academic year.
    pub fn new(academic_year: i32) -> Self {
        Self { academic_year }
    }
}

impl Default for DateContext {
    fn default() -> Self {
        Self::new(Local::now().year())
    }
}

/// Parses an event date in either `DD/MM` or `YYYY-MM-DD` form.
pub fn parse_event_date(date: &str, academic_year: i32) -> Result<NaiveDate, TimeError> {
    let trimmed = date.trim();
    let invalid = || TimeError::InvalidDate(date.to_string());

    if let Some((day, month)) = trimmed.split_once('/') {
        let day: u32 = day.trim().parse().map_err(|_| invalid())?;
        let month: u32 = month.trim().parse().map_err(|_| invalid())?;
        return NaiveDate::from_ymd_opt(academic_year, month, day).ok_or_else(invalid);
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| invalid())
}

/// Returns the canonical `YYYY-MM-DD` sort key for a date.
pub fn sort_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Builds the sort key for a raw event date.
///
/// Legacy `DD/MM` dates are placed in `academic_year`; canonical dates come
/// back unchanged.
pub fn create_sort_key(date: &str, academic_year: i32) -> Result<String, TimeError> {
    parse_event_date(date, academic_year).map(sort_key)
}

/// Returns `true` if the sort key is the local system date.
pub fn is_today(sort_key_str: &str) -> bool {
    is_today_at(sort_key_str, Local::now().date_naive())
}

/// Returns `true` if the sort key matches `today`.
pub fn is_today_at(sort_key_str: &str, today: NaiveDate) -> bool {
    sort_key_str == sort_key(today)
}

/// English weekday name, used for the derived `day` field.
pub fn weekday_name(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Heading shown above a day's events, e.g. `Monday, 2 March 2026`.
pub fn format_date_display(date: NaiveDate) -> String {
    date.format("%A, %-d %B %Y").to_string()
}

/// Lowercased text covering the common ways a user might type a date.
///
/// Lets a free-text search for `02/03`, `2/3`, `mar` or `monday` hit the
/// same occurrence.
pub fn date_search_text(date: NaiveDate) -> String {
    let formats = [
        date.format("%Y-%m-%d").to_string(),
        date.format("%d/%m").to_string(),
        date.format("%-d/%-m").to_string(),
        date.format("%d/%m/%Y").to_string(),
        date.format("%A %a").to_string(),
        date.format("%-d %B %b").to_string(),
    ];
    formats.join(" ").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    mod clock {
        use super::*;

        #[test]
        fn hhmm_to_minutes() {
            assert_eq!(time_to_minutes("0000").unwrap(), 0);
            assert_eq!(time_to_minutes("0830").unwrap(), 510);
            assert_eq!(time_to_minutes("2359").unwrap(), 1439);
            assert_eq!(time_to_minutes("2400").unwrap(), 1440);
        }

        #[test]
        fn minutes_to_hhmm() {
            assert_eq!(minutes_to_time(0), "0000");
            assert_eq!(minutes_to_time(510), "0830");
            assert_eq!(minutes_to_time(1440), "2400");
        }

        #[test]
        fn rejects_malformed_time() {
            assert!(matches!(time_to_minutes("830"), Err(TimeError::InvalidTime(_))));
            assert!(matches!(time_to_minutes("08:30"), Err(TimeError::InvalidTime(_))));
            assert!(matches!(time_to_minutes("ab30"), Err(TimeError::InvalidTime(_))));
        }

        #[test]
        fn rejects_out_of_range_time() {
            assert!(matches!(time_to_minutes("2500"), Err(TimeError::OutOfRange(_))));
            assert!(matches!(time_to_minutes("0860"), Err(TimeError::OutOfRange(_))));
            assert!(matches!(time_to_minutes("2401"), Err(TimeError::OutOfRange(_))));
        }

        #[test]
        fn clock_time_parse_and_display() {
            let t: ClockTime = "0905".parse().unwrap();
            assert_eq!(t.minutes(), 545);
            assert_eq!(t.hour(), 9);
            assert_eq!(t.minute(), 5);
            assert_eq!(t.to_string(), "0905");
            assert_eq!(t.to_display(), "09:05");
        }

        #[test]
        fn clock_time_ordering_matches_string_ordering() {
            let a: ClockTime = "0830".parse().unwrap();
            let b: ClockTime = "1030".parse().unwrap();
            assert!(a < b);
            assert!(a.to_string() < b.to_string());
            assert_eq!(a.abs_diff(b), 120);
            assert_eq!(b.abs_diff(a), 120);
        }

        #[test]
        fn clock_time_serializes_as_hhmm() {
            let t = ClockTime::from_hm(14, 0).unwrap();
            assert_eq!(serde_json::to_string(&t).unwrap(), "\"1400\"");
            let parsed: ClockTime = serde_json::from_str("\"1400\"").unwrap();
            assert_eq!(parsed, t);
            assert!(serde_json::from_str::<ClockTime>("\"2561\"").is_err());
        }

        #[test]
        fn clock_time_bounds() {
            assert!(ClockTime::from_minutes(1441).is_err());
            assert!(ClockTime::from_hm(10, 60).is_err());
            assert_eq!(ClockTime::END_OF_DAY.to_string(), "2400");
        }
    }

    mod dates {
        use super::*;

        #[test]
        fn legacy_date_uses_academic_year() {
            assert_eq!(create_sort_key("02/03", 2026).unwrap(), "2026-03-02");
            assert_eq!(create_sort_key("2/3", 2026).unwrap(), "2026-03-02");
            assert_eq!(create_sort_key(" 15/11 ", 2025).unwrap(), "2025-11-15");
        }

        #[test]
        fn canonical_date_passes_through() {
            assert_eq!(create_sort_key("2026-03-02", 1999).unwrap(), "2026-03-02");
        }

        #[test]
        fn invalid_dates_are_rejected() {
            assert!(create_sort_key("31/02", 2026).is_err());
            assert!(create_sort_key("March 2", 2026).is_err());
            assert!(create_sort_key("2026-13-01", 2026).is_err());
        }

        #[test]
        fn today_comparison() {
            let today = date(2026, 3, 2);
            assert!(is_today_at("2026-03-02", today));
            assert!(!is_today_at("2026-03-03", today));
            assert!(is_today(&sort_key(Local::now().date_naive())));
        }

        #[test]
        fn weekday_and_display() {
            let d = date(2026, 3, 2);
            assert_eq!(weekday_name(d), "Monday");
            assert_eq!(format_date_display(d), "Monday, 2 March 2026");
        }

        #[test]
        fn search_text_covers_common_forms() {
            let text = date_search_text(date(2026, 3, 2));
            for needle in ["2026-03-02", "02/03", "2/3", "monday", "mon", "march", "mar"] {
                assert!(text.contains(needle), "missing {needle} in {text}");
            }
        }
    }
}
