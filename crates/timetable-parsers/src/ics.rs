//! ICS/iCalendar timetable parsing.
//!
//! The document is read with [`icalendar`], which takes care of line
//! unfolding and TEXT unescaping. Every top-level `VEVENT` yields one
//! [`TimetableEvent`] with a single date; nested components such as
//! `VALARM` never contribute properties.

use std::sync::LazyLock;

use chrono::NaiveDate;
use icalendar::{Calendar, CalendarComponent, Component, Event, EventLike};
use regex::Regex;
use timetable_core::time::{sort_key, weekday_name};
use timetable_core::{ClockTime, TimetableEvent};
use tracing::debug;

use crate::error::{ParseError, ParseResult};

/// Extracts the tutor name from an event description.
static TUTOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)Tutor:[ \t]*(.+?)[ \t]*$").expect("Invalid tutor regex"));

/// Parses calendar text into events.
///
/// Events missing a summary, start or end are dropped.
///
/// # Errors
///
/// - `MissingTable` when the text is not an iCalendar document
/// - `InvalidDatetime` when `DTSTART`/`DTEND` is not `YYYYMMDDTHHMM...`
/// - `EmptyResult` when no event could be assembled
pub fn parse_ics(ics: &str) -> ParseResult<Vec<TimetableEvent>> {
    let calendar = ics.parse::<Calendar>().map_err(|e| {
        ParseError::missing_table(format!("not a readable iCalendar document: {e}"))
            .with_format("ics")
    })?;

    let mut events = Vec::new();
    for component in calendar.iter() {
        let CalendarComponent::Event(event) = component else {
            continue;
        };
        match convert_event(event)? {
            Some(converted) => events.push(converted),
            None => debug!("Dropping VEVENT without summary, start or end"),
        }
    }

    if events.is_empty() {
        return Err(ParseError::empty_result("the calendar contains no usable events")
            .with_format("ics"));
    }

    debug!(count = events.len(), "Parsed ICS timetable");
    Ok(events)
}

/// Builds a timetable event from one `VEVENT`.
fn convert_event(event: &Event) -> ParseResult<Option<TimetableEvent>> {
    let (Some(summary), Some(dtstart), Some(dtend)) = (
        event.get_summary(),
        event.property_value("DTSTART"),
        event.property_value("DTEND"),
    ) else {
        return Ok(None);
    };

    let (date, start) = parse_ics_datetime(dtstart.trim())?;
    let (_, end) = parse_ics_datetime(dtend.trim())?;

    let (course, group) = split_summary(summary);
    let tutor = event
        .get_description()
        .and_then(extract_tutor)
        .unwrap_or_default();

    Ok(Some(
        TimetableEvent::new(course, start, end)
            .with_group(group)
            .with_day(weekday_name(date))
            .with_date(sort_key(date))
            .with_venue(event.get_location().unwrap_or_default())
            .with_tutor(tutor),
    ))
}

/// Reads the date and `HHMM` time from `YYYYMMDDTHHMMSS`, ignoring any
/// trailing seconds or zone designator.
pub fn parse_ics_datetime(value: &str) -> ParseResult<(NaiveDate, ClockTime)> {
    let invalid = || {
        ParseError::invalid_datetime(format!("expected YYYYMMDDTHHMMSS, got {value:?}"))
            .with_format("ics")
    };

    let (Some(date_part), Some(sep), Some(time_part)) =
        (value.get(..8), value.get(8..9), value.get(9..13))
    else {
        return Err(invalid());
    };
    if sep != "T" {
        return Err(invalid());
    }

    let date = NaiveDate::parse_from_str(date_part, "%Y%m%d")
        .map_err(|e| invalid().with_source(e))?;
    let time = time_part
        .parse::<ClockTime>()
        .map_err(|e| invalid().with_source(e))?;
    Ok((date, time))
}

/// Splits `COURSE - GROUP` on the first ` - `; the rest is the group.
fn split_summary(summary: &str) -> (String, String) {
    let mut parts = summary.split(" - ");
    let course = parts.next().unwrap_or_default().trim().to_string();
    let group = parts.collect::<Vec<_>>().join(" - ").trim().to_string();
    (course, group)
}

fn extract_tutor(description: &str) -> Option<String> {
    TUTOR_REGEX
        .captures(description)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
