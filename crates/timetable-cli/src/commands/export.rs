//! `export` command.

use std::path::Path;

use timetable_core::DateContext;
use tracing::debug;

use crate::commands::load_with_custom;
use crate::error::CliResult;

/// Writes the timetable as iCalendar to `output`, or stdout.
pub fn run(
    source: &str,
    custom: Option<&Path>,
    output: Option<&Path>,
    ctx: &DateContext,
) -> CliResult<()> {
    let loaded = load_with_custom(source, custom)?;
    let ics = timetable_parsers::export_ics(&loaded.events, ctx);

    match output {
        Some(path) => {
            std::fs::write(path, &ics)?;
            debug!(path = %path.display(), "Wrote calendar");
            eprintln!("Exported {} to {}", loaded.name, path.display());
        }
        None => print!("{ics}"),
    }
    Ok(())
}
