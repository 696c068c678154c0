//! Canonical event model.
//!
//! - [`TimetableEvent`]: one recurring class slot with every date it occurs on
//! - [`EventItem`]: a single dated occurrence, ready for display or comparison

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::time::{ClockTime, DateContext, parse_event_date, sort_key, weekday_name};

/// One class or slot entry as imported from a timetable export.
///
/// An event with N entries in `dates` stands for N occurrences sharing the
/// same time, venue, tutor, course and group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableEvent {
    /// Course code; empty for user-added events.
    #[serde(default)]
    pub course: String,
    /// Section or group label.
    #[serde(default)]
    pub group: String,
    /// Weekday name as given by the source. Informational only.
    #[serde(default)]
    pub day: String,
    /// Start time.
    pub start_time: ClockTime,
    /// End time.
    pub end_time: ClockTime,
    /// Occurrence dates, `DD/MM` or `YYYY-MM-DD`.
    #[serde(default)]
    pub dates: Vec<String>,
    /// Venue, free text.
    #[serde(default)]
    pub venue: String,
    /// Tutor, possibly prefixed with an internal id (`id:Name`).
    #[serde(default)]
    pub tutor: String,
}

impl TimetableEvent {
    /// Creates an event with no dates and empty text fields.
    pub fn new(course: impl Into<String>, start_time: ClockTime, end_time: ClockTime) -> Self {
        Self {
            course: course.into(),
            group: String::new(),
            day: String::new(),
            start_time,
            end_time,
            dates: Vec::new(),
            venue: String::new(),
            tutor: String::new(),
        }
    }

    /// Sets the group.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    /// Sets the source weekday name.
    pub fn with_day(mut self, day: impl Into<String>) -> Self {
        self.day = day.into();
        self
    }

    /// Appends one occurrence date.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.dates.push(date.into());
        self
    }

    /// Replaces the occurrence dates.
    pub fn with_dates<I, S>(mut self, dates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dates = dates.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the venue.
    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = venue.into();
        self
    }

    /// Sets the tutor.
    pub fn with_tutor(mut self, tutor: impl Into<String>) -> Self {
        self.tutor = tutor.into();
        self
    }

    /// Returns `true` for user-added events, which carry no course code.
    pub fn is_custom(&self) -> bool {
        self.course.trim().is_empty()
    }

    /// Tutor name with any `id:` prefix removed.
    pub fn display_tutor(&self) -> &str {
        strip_tutor_id(&self.tutor)
    }
}

/// Removes an internal-id prefix such as `12345:` from a tutor name.
///
/// Only a non-empty prefix without whitespace counts as an id, so a colon
/// inside the name itself (`Dr. Tan: Lab`) is kept.
pub fn strip_tutor_id(tutor: &str) -> &str {
    match tutor.split_once(':') {
        Some((id, name)) if !id.is_empty() && !id.contains(char::is_whitespace) => name.trim(),
        _ => tutor.trim(),
    }
}

/// A single dated occurrence of a [`TimetableEvent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventItem {
    pub course: String,
    pub group: String,
    /// Weekday recomputed from `date`.
    pub day: String,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    pub venue: String,
    /// Tutor with the id prefix stripped.
    pub tutor: String,
    /// Resolved calendar date.
    pub date: NaiveDate,
    /// Canonical `YYYY-MM-DD` key for `date`.
    pub sort_key: String,
}

impl EventItem {
    /// Projects one occurrence of `event` onto `date`.
    pub fn from_event(event: &TimetableEvent, date: NaiveDate) -> Self {
        Self {
            course: event.course.clone(),
            group: event.group.clone(),
            day: weekday_name(date).to_string(),
            start_time: event.start_time,
            end_time: event.end_time,
            venue: event.venue.clone(),
            tutor: event.display_tutor().to_string(),
            date,
            sort_key: sort_key(date),
        }
    }

    /// Course and group joined for display, e.g. `ABC123 G1`.
    pub fn label(&self) -> String {
        match (self.course.is_empty(), self.group.is_empty()) {
            (false, false) => format!("{} {}", self.course, self.group),
            (false, true) => self.course.clone(),
            (true, _) => self.group.clone(),
        }
    }

    /// Length of the occurrence in minutes.
    pub fn duration_minutes(&self) -> u32 {
        self.end_time.minutes().saturating_sub(self.start_time.minutes())
    }
}

/// Expands events into one [`EventItem`] per date.
///
/// Dates that cannot be resolved are logged and skipped.
pub fn expand_events(events: &[TimetableEvent], ctx: &DateContext) -> Vec<EventItem> {
    let mut items = Vec::new();
    for event in events {
        for raw_date in &event.dates {
            match parse_event_date(raw_date, ctx.academic_year) {
                Ok(date) => items.push(EventItem::from_event(event, date)),
                Err(e) => warn!(course = %event.course, error = %e, "Skipping unreadable event date"),
            }
        }
    }
    items
}

/// Lays user-defined events over an imported timetable.
pub fn overlay_custom_events(
    imported: &[TimetableEvent],
    custom: &[TimetableEvent],
) -> Vec<TimetableEvent> {
    imported.iter().chain(custom.iter()).cloned().collect()
}

/// Sorted, de-duplicated course codes, skipping custom events.
pub fn course_codes(events: &[TimetableEvent]) -> Vec<String> {
    events
        .iter()
        .filter(|e| !e.is_custom())
        .map(|e| e.course.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
