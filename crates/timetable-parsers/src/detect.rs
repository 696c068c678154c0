//! Source format detection and dispatch.

use timetable_core::TimetableEvent;

use crate::error::ParseResult;
use crate::html::parse_html;
use crate::ics::parse_ics;

/// How far into the document to look for a calendar header.
const SNIFF_BYTES: usize = 1024;

/// Supported timetable source formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    /// Vendor HTML export with an `infotab` table.
    Html,
    /// iCalendar text.
    Ics,
}

impl SourceFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Ics => "ics",
        }
    }
}

/// Guesses the format from the start of the document.
///
/// Anything that does not open with a `BEGIN:VCALENDAR` line is treated as
/// HTML, so unrelated files surface as a missing-table error.
pub fn detect_format(content: &str) -> SourceFormat {
    let head: String = content
        .trim_start_matches('\u{feff}')
        .chars()
        .take(SNIFF_BYTES)
        .collect();
    if head.to_ascii_uppercase().contains("BEGIN:VCALENDAR") {
        SourceFormat::Ics
    } else {
        SourceFormat::Html
    }
}

/// Parses `content` with the parser for its detected format.
pub fn parse_timetable(content: &str) -> ParseResult<Vec<TimetableEvent>> {
    parse_as(content, detect_format(content))
}

/// Parses `content` as the given format.
pub fn parse_as(content: &str, format: SourceFormat) -> ParseResult<Vec<TimetableEvent>> {
    match format {
        SourceFormat::Html => parse_html(content),
        SourceFormat::Ics => parse_ics(content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseErrorCode;

    #[test]
    fn detects_calendar_text() {
        assert_eq!(detect_format("BEGIN:VCALENDAR\r\nVERSION:2.0"), SourceFormat::Ics);
        assert_eq!(detect_format("\u{feff}begin:vcalendar\n"), SourceFormat::Ics);
        assert_eq!(detect_format("<html><body></body></html>"), SourceFormat::Html);
        assert_eq!(detect_format(""), SourceFormat::Html);
    }

    #[test]
    fn dispatches_to_parser() {
        let ics = "BEGIN:VCALENDAR\nBEGIN:VEVENT\nSUMMARY:ABC123 - G1\n\
                   DTSTART:20260302T090000\nDTEND:20260302T100000\nEND:VEVENT\nEND:VCALENDAR\n";
        let events = parse_timetable(ics).unwrap();
        assert_eq!(events[0].course, "ABC123");

        let err = parse_timetable("just some text").unwrap_err();
        assert_eq!(err.code(), ParseErrorCode::MissingTable);
    }
}
