//! Parser for the vendor HTML timetable export.
//!
//! The export holds a table with id `infotab`. Its first row is a header;
//! every following row carries, in order: course, group, day, start, end,
//! comma-separated dates, venue and tutor.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use timetable_core::{ClockTime, TimetableEvent};
use tracing::debug;

use crate::error::{ParseError, ParseResult};

/// Element id of the timetable table.
pub const TABLE_ID: &str = "infotab";

/// Minimum number of cells in a data row.
const MIN_CELLS: usize = 8;

static TABLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table#infotab").expect("Invalid table selector"));

static ROW_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr").expect("Invalid row selector"));

static CELL_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td, th").expect("Invalid cell selector"));

/// Parses an HTML export into events, one per table row.
///
/// # Errors
///
/// - `MissingTable` when there is no `#infotab` table
/// - `EmptyResult` when the table has no usable rows
/// - `InvalidTime` when a start or end cell is not a clock time
pub fn parse_html(html: &str) -> ParseResult<Vec<TimetableEvent>> {
    let document = Html::parse_document(html);
    let table = document.select(&TABLE_SELECTOR).next().ok_or_else(|| {
        ParseError::missing_table(format!(
            "no table with id \"{TABLE_ID}\" found; is this the timetable export?"
        ))
        .with_format("html")
    })?;

    let mut events = Vec::new();
    for (row_idx, row) in table.select(&ROW_SELECTOR).enumerate().skip(1) {
        let cells: Vec<String> = row.select(&CELL_SELECTOR).map(cell_text).collect();
        if cells.len() < MIN_CELLS {
            debug!(row = row_idx, cells = cells.len(), "Skipping short row");
            continue;
        }
        if let Some(event) = parse_row(row_idx, &cells)? {
            events.push(event);
        }
    }

    if events.is_empty() {
        return Err(ParseError::empty_result(
            "the timetable table contains no classes",
        )
        .with_format("html"));
    }

    debug!(count = events.len(), "Parsed HTML timetable");
    Ok(events)
}

/// Builds an event from a row's cell texts. Rows without course or times
/// are skipped.
fn parse_row(row_idx: usize, cells: &[String]) -> ParseResult<Option<TimetableEvent>> {
    let course = &cells[0];
    let (start, end) = (&cells[3], &cells[4]);
    if course.is_empty() || start.is_empty() || end.is_empty() {
        debug!(row = row_idx, "Skipping row without course or times");
        return Ok(None);
    }

    let event = TimetableEvent::new(
        course.as_str(),
        parse_cell_time(row_idx, start)?,
        parse_cell_time(row_idx, end)?,
    )
    .with_group(cells[1].as_str())
    .with_day(cells[2].as_str())
    .with_dates(split_dates(&cells[5]))
    .with_venue(cells[6].as_str())
    .with_tutor(cells[7].as_str());

    Ok(Some(event))
}

/// Text content of a cell with whitespace collapsed.
fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Accepts `0830`, `830` and `08:30`.
fn parse_cell_time(row_idx: usize, raw: &str) -> ParseResult<ClockTime> {
    let digits: String = raw.chars().filter(|c| *c != ':').collect();
    let padded = format!("{digits:0>4}");
    padded.parse().map_err(|e| {
        ParseError::invalid_time(format!("row {row_idx}: invalid time {raw:?}"))
            .with_format("html")
            .with_source(e)
    })
}

/// Splits the dates cell on commas, dropping blanks.
fn split_dates(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .collect()
}
