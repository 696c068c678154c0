//! Search, filtering and grouping of a single timetable by calendar date.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::event::{EventItem, TimetableEvent};
use crate::time::{DateContext, date_search_text, format_date_display, parse_event_date, sort_key};

/// Filters applied by [`filter_and_group`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventFilters {
    /// Case-insensitive substring matched against course, group, venue,
    /// tutor and several spellings of the date.
    pub search: String,
    /// Course codes to keep. Empty keeps every course.
    pub courses: BTreeSet<String>,
    /// Drop occurrences before today.
    pub hide_past: bool,
    /// Keep only occurrences on this month and day. The year is ignored.
    pub date: Option<NaiveDate>,
}

impl EventFilters {
    /// Creates an empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the free-text search.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Adds a course code to the course filter.
    pub fn with_course(mut self, course: impl Into<String>) -> Self {
        self.courses.insert(course.into());
        self
    }

    /// Sets whether past dates are hidden.
    pub fn with_hide_past(mut self, hide_past: bool) -> Self {
        self.hide_past = hide_past;
        self
    }

    /// Sets the exact-date filter.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Returns `true` if any filter would drop occurrences.
    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty()
            || !self.courses.is_empty()
            || self.hide_past
            || self.date.is_some()
    }
}

/// All occurrences that fall on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedEvent {
    /// Heading for the day, e.g. `Monday, 2 March 2026`.
    pub date: String,
    /// `YYYY-MM-DD` key used for ordering.
    pub sort_key: String,
    /// Occurrences sorted by start time.
    pub events: Vec<EventItem>,
}

/// Result of [`filter_and_group`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedEvents {
    /// Days in ascending order.
    pub grouped_by_date: Vec<GroupedEvent>,
    /// Occurrences before filtering.
    pub total_events: usize,
    /// Occurrences that passed the filters; equals `total_events` when no
    /// filter is active.
    pub filtered_count: usize,
}

/// Filters and groups events using the local date as "today".
pub fn filter_and_group(
    events: &[TimetableEvent],
    filters: &EventFilters,
    ctx: &DateContext,
) -> GroupedEvents {
    filter_and_group_at(events, filters, ctx, Local::now().date_naive())
}

/// Filters and groups events relative to an explicit `today`.
///
/// Each date of an event is judged on its own, so a multi-date event may
/// appear on some days and not others.
pub fn filter_and_group_at(
    events: &[TimetableEvent],
    filters: &EventFilters,
    ctx: &DateContext,
    today: NaiveDate,
) -> GroupedEvents {
    let search = filters.search.trim().to_lowercase();
    let mut groups: BTreeMap<String, GroupedEvent> = BTreeMap::new();
    let mut total_events = 0;
    let mut filtered_count = 0;

    for event in events {
        for raw_date in &event.dates {
            let date = match parse_event_date(raw_date, ctx.academic_year) {
                Ok(date) => date,
                Err(e) => {
                    warn!(course = %event.course, error = %e, "Skipping unreadable event date");
                    continue;
                }
            };
            total_events += 1;

            if !occurrence_matches(event, date, filters, &search, today) {
                continue;
            }
            filtered_count += 1;

            let key = sort_key(date);
            groups
                .entry(key.clone())
                .or_insert_with(|| GroupedEvent {
                    date: format_date_display(date),
                    sort_key: key,
                    events: Vec::new(),
                })
                .events
                .push(EventItem::from_event(event, date));
        }
    }

    let mut grouped_by_date: Vec<GroupedEvent> = groups.into_values().collect();
    for group in &mut grouped_by_date {
        group.events.sort_by_key(|item| item.start_time);
    }

    GroupedEvents {
        grouped_by_date,
        total_events,
        filtered_count: if filters.is_active() {
            filtered_count
        } else {
            total_events
        },
    }
}

fn occurrence_matches(
    event: &TimetableEvent,
    date: NaiveDate,
    filters: &EventFilters,
    search: &str,
    today: NaiveDate,
) -> bool {
    if !filters.courses.is_empty() && !filters.courses.contains(&event.course) {
        return false;
    }

    if filters.hide_past && date < today {
        return false;
    }

    if let Some(wanted) = filters.date
        && (wanted.month() != date.month() || wanted.day() != date.day())
    {
        return false;
    }

    if search.is_empty() {
        return true;
    }

    [
        event.course.as_str(),
        event.group.as_str(),
        event.venue.as_str(),
        event.display_tutor(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(search))
        || date_search_text(date).contains(search)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::ClockTime;

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ctx() -> DateContext {
        DateContext::new(2026)
    }

    fn events() -> Vec<TimetableEvent> {
        vec![
            TimetableEvent::new("ABC123", t("1300"), t("1500"))
                .with_group("G1")
                .with_dates(["02/03", "09/03", "16/03"])
                .with_venue("LT1")
                .with_tutor("Dr. Tan"),
            TimetableEvent::new("ABC123", t("0830"), t("1030"))
                .with_group("T2")
                .with_dates(["02/03"])
                .with_venue("SR3")
                .with_tutor("x99:Ms. Lee"),
            TimetableEvent::new("XYZ789", t("1000"), t("1200"))
                .with_group("L1")
                .with_dates(["2026-03-04", "2026-03-11"])
                .with_venue("Hall B"),
        ]
    }

    #[test]
    fn no_filters_groups_everything() {
        let result = filter_and_group_at(&events(), &EventFilters::new(), &ctx(), date(2026, 3, 1));
        assert_eq!(result.total_events, 6);
        assert_eq!(result.filtered_count, 6);

        let keys: Vec<_> = result.grouped_by_date.iter().map(|g| g.sort_key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["2026-03-02", "2026-03-04", "2026-03-09", "2026-03-11", "2026-03-16"]
        );

        let first = &result.grouped_by_date[0];
        assert_eq!(first.date, "Monday, 2 March 2026");
        let starts: Vec<_> = first.events.iter().map(|e| e.start_time.to_string()).collect();
        assert_eq!(starts, vec!["0830", "1300"]);
    }

    #[test]
    fn groups_are_strictly_ascending() {
        let result = filter_and_group_at(&events(), &EventFilters::new(), &ctx(), date(2026, 3, 1));
        for pair in result.grouped_by_date.windows(2) {
            assert!(pair[0].sort_key < pair[1].sort_key);
        }
        for group in &result.grouped_by_date {
            for pair in group.events.windows(2) {
                assert!(pair[0].start_time <= pair[1].start_time);
            }
        }
    }

    #[test]
    fn search_matches_fields_case_insensitively() {
        let filters = EventFilters::new().with_search("hall b");
        let result = filter_and_group_at(&events(), &filters, &ctx(), date(2026, 3, 1));
        assert_eq!(result.filtered_count, 2);
        assert_eq!(result.total_events, 6);
        assert!(result
            .grouped_by_date
            .iter()
            .all(|g| g.events.iter().all(|e| e.course == "XYZ789")));
    }

    #[test]
    fn search_matches_stripped_tutor_only() {
        let filters = EventFilters::new().with_search("lee");
        let result = filter_and_group_at(&events(), &filters, &ctx(), date(2026, 3, 1));
        assert_eq!(result.filtered_count, 1);

        let filters = EventFilters::new().with_search("x99");
        let result = filter_and_group_at(&events(), &filters, &ctx(), date(2026, 3, 1));
        assert_eq!(result.filtered_count, 0);
    }

    #[test]
    fn search_matches_date_spellings() {
        for needle in ["09/03", "9/3", "2026-03-09"] {
            let filters = EventFilters::new().with_search(needle);
            let result = filter_and_group_at(&events(), &filters, &ctx(), date(2026, 3, 1));
            assert_eq!(result.filtered_count, 1, "search {needle}");
            assert_eq!(result.grouped_by_date[0].sort_key, "2026-03-09");
        }

        let filters = EventFilters::new().with_search("wednesday");
        let result = filter_and_group_at(&events(), &filters, &ctx(), date(2026, 3, 1));
        assert_eq!(result.filtered_count, 2);
    }

    #[test]
    fn course_filter_keeps_selected_courses() {
        let filters = EventFilters::new().with_course("XYZ789");
        let result = filter_and_group_at(&events(), &filters, &ctx(), date(2026, 3, 1));
        assert_eq!(result.filtered_count, 2);
        assert_eq!(result.grouped_by_date.len(), 2);
    }

    #[test]
    fn hide_past_splits_multi_date_event() {
        let filters = EventFilters::new().with_hide_past(true);
        let result = filter_and_group_at(&events(), &filters, &ctx(), date(2026, 3, 9));
        let keys: Vec<_> = result.grouped_by_date.iter().map(|g| g.sort_key.as_str()).collect();
        assert_eq!(keys, vec!["2026-03-09", "2026-03-11", "2026-03-16"]);
        assert_eq!(result.filtered_count, 3);
    }

    #[test]
    fn date_filter_ignores_year() {
        let filters = EventFilters::new().with_date(date(1999, 3, 4));
        let result = filter_and_group_at(&events(), &filters, &ctx(), date(2026, 3, 1));
        assert_eq!(result.filtered_count, 1);
        assert_eq!(result.grouped_by_date[0].sort_key, "2026-03-04");
    }

    #[test]
    fn unreadable_dates_are_not_counted() {
        let broken = vec![
            TimetableEvent::new("BAD1", t("0900"), t("1000")).with_dates(["??", "05/03"]),
        ];
        let result = filter_and_group_at(&broken, &EventFilters::new(), &ctx(), date(2026, 3, 1));
        assert_eq!(result.total_events, 1);
        assert_eq!(result.filtered_count, 1);
    }

    #[test]
    fn filter_activity() {
        assert!(!EventFilters::new().is_active());
        assert!(!EventFilters::new().with_search("   ").is_active());
        assert!(EventFilters::new().with_search("a").is_active());
        assert!(EventFilters::new().with_hide_past(true).is_active());
    }
}
