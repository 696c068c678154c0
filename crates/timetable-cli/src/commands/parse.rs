//! `parse` command.

use crate::commands::load_timetable;
use crate::error::CliResult;

/// Prints the canonical events of `source` as pretty JSON.
pub fn run(source: &str) -> CliResult<()> {
    let loaded = load_timetable(source)?;
    println!("{}", serde_json::to_string_pretty(&loaded.events)?);
    Ok(())
}
