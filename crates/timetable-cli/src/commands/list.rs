//! `list` command: a filtered agenda of one timetable.

use timetable_core::{DateContext, EventFilters, GroupedEvents, filter_and_group, render_grouped};

use crate::cli::ListArgs;
use crate::commands::load_with_custom;
use crate::error::CliResult;

/// Prints the grouped agenda for `args.source`.
pub fn run(args: &ListArgs, ctx: &DateContext) -> CliResult<()> {
    let loaded = load_with_custom(&args.source, args.custom.as_deref())?;
    let filters = filters_from_args(args);
    let grouped = filter_and_group(&loaded.events, &filters, ctx);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&grouped)?);
    } else {
        print!("{}", render_text(&grouped, &filters));
    }
    Ok(())
}

/// Builds [`EventFilters`] from the command-line flags.
pub fn filters_from_args(args: &ListArgs) -> EventFilters {
    let mut filters = EventFilters::new().with_hide_past(args.hide_past);
    if let Some(ref search) = args.search {
        filters = filters.with_search(search.as_str());
    }
    for course in &args.courses {
        filters = filters.with_course(course.as_str());
    }
    if let Some(date) = args.date {
        filters = filters.with_date(date);
    }
    filters
}

fn render_text(grouped: &GroupedEvents, filters: &EventFilters) -> String {
    if grouped.grouped_by_date.is_empty() {
        return if filters.is_active() {
            "No events match the current filters.\n".to_string()
        } else {
            "No events.\n".to_string()
        };
    }

    let mut out = render_grouped(&grouped.grouped_by_date);
    if filters.is_active() {
        out.push_str(&format!(
            "\nShowing {} of {} events\n",
            grouped.filtered_count, grouped.total_events
        ));
    }
    out
}
