//! ICS export, the inverse of [`crate::ics::parse_ics`].
//!
//! Every occurrence becomes its own `VEVENT` with a floating
//! `DTSTART`/`DTEND`, so the calendar shows class times as printed on the
//! timetable regardless of the viewer's timezone.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use icalendar::{Calendar, CalendarDateTime, Component, Event, EventLike};
use timetable_core::time::parse_event_date;
use timetable_core::{ClockTime, DateContext, TimetableEvent};
use tracing::{debug, warn};

/// Renders events as an iCalendar document.
///
/// Dates that cannot be resolved are skipped with a warning.
pub fn export_ics(events: &[TimetableEvent], ctx: &DateContext) -> String {
    let mut calendar = Calendar::new();
    let mut count = 0usize;

    for event in events {
        for raw_date in &event.dates {
            let date = match parse_event_date(raw_date, ctx.academic_year) {
                Ok(date) => date,
                Err(e) => {
                    warn!(course = %event.course, error = %e, "Skipping unreadable date in export");
                    continue;
                }
            };
            let (Some(start), Some(end)) = (at(date, event.start_time), at(date, event.end_time))
            else {
                continue;
            };

            let mut vevent = Event::new();
            vevent
                .summary(&summary_for(event))
                .starts(CalendarDateTime::Floating(start))
                .ends(CalendarDateTime::Floating(end));
            if !event.venue.is_empty() {
                vevent.location(&event.venue);
            }
            let tutor = event.display_tutor();
            if !tutor.is_empty() {
                vevent.description(&format!("Tutor: {tutor}"));
            }
            calendar.push(vevent.done());
            count += 1;
        }
    }

    debug!(count, "Exported events to ICS");
    calendar.done().to_string()
}

/// `COURSE - GROUP`, or just the course when there is no group.
pub fn summary_for(event: &TimetableEvent) -> String {
    match (event.course.is_empty(), event.group.is_empty()) {
        (_, true) => event.course.clone(),
        (true, false) => event.group.clone(),
        (false, false) => format!("{} - {}", event.course, event.group),
    }
}

/// Local datetime for a clock time on `date`; `2400` rolls to the next day.
fn at(date: NaiveDate, time: ClockTime) -> Option<NaiveDateTime> {
    date.and_time(NaiveTime::MIN)
        .checked_add_signed(TimeDelta::minutes(i64::from(time.minutes())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ics::parse_ics;

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    fn sample() -> TimetableEvent {
        TimetableEvent::new("ABC123", t("0830"), t("1030"))
            .with_group("G1")
            .with_venue("LT1")
            .with_tutor("Dr. Tan")
            .with_date("2026-03-02")
    }

    #[test]
    fn writes_expected_properties() {
        let ics = export_ics(&[sample()], &DateContext::new(2026));
        assert!(ics.contains("BEGIN:VCALENDAR"));
        assert!(ics.contains("BEGIN:VEVENT"));
        assert!(ics.contains("SUMMARY:ABC123 - G1"));
        assert!(ics.contains("DTSTART:20260302T083000"));
        assert!(ics.contains("DTEND:20260302T103000"));
        assert!(ics.contains("LOCATION:LT1"));
        assert!(ics.contains("DESCRIPTION:Tutor: Dr. Tan"));
    }

    #[test]
    fn round_trips_through_parser() {
        let original = sample();
        let ics = export_ics(&[original.clone()], &DateContext::new(2026));
        let parsed = parse_ics(&ics).unwrap();
        assert_eq!(parsed.len(), 1);

        let event = &parsed[0];
        assert_eq!(event.course, original.course);
        assert_eq!(event.group, original.group);
        assert_eq!(event.start_time, original.start_time);
        assert_eq!(event.end_time, original.end_time);
        assert_eq!(event.venue, original.venue);
        assert_eq!(event.tutor, original.tutor);
        assert_eq!(event.dates, original.dates);
        assert_eq!(event.day, "Monday");
    }

    #[test]
    fn batched_dates_expand_to_one_vevent_each() {
        let event = sample()
            .with_dates(["02/03", "09/03", "bogus"])
            .with_venue("Block B, Room 2");
        let ics = export_ics(&[event], &DateContext::new(2026));
        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 2);

        let parsed = parse_ics(&ics).unwrap();
        let dates: Vec<_> = parsed.iter().flat_map(|e| e.dates.clone()).collect();
        assert_eq!(dates, vec!["2026-03-02", "2026-03-09"]);
        assert!(parsed.iter().all(|e| e.venue == "Block B, Room 2"));
    }

    #[test]
    fn summary_without_group() {
        let event = TimetableEvent::new("ABC123", t("0900"), t("1000"));
        assert_eq!(summary_for(&event), "ABC123");
        let custom = TimetableEvent::new("", t("0900"), t("1000")).with_group("Gym");
        assert_eq!(summary_for(&custom), "Gym");
    }

    #[test]
    fn end_of_day_rolls_over() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let dt = at(date, ClockTime::END_OF_DAY).unwrap();
        assert_eq!(dt.format("%Y%m%dT%H%M%S").to_string(), "20260303T000000");
    }
}
