//! Command implementations.
//!
//! Commands print their results to stdout; logs and errors go to stderr.

pub mod compare;
pub mod config;
pub mod export;
pub mod list;
pub mod parse;
pub mod share;

use std::path::Path;

use timetable_core::TimetableEvent;
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Events read from a file or share link, with the name they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedTimetable {
    pub events: Vec<TimetableEvent>,
    pub name: String,
}

/// Loads a timetable from a file path, falling back to a share link or token.
pub fn load_timetable(source: &str) -> CliResult<LoadedTimetable> {
    let path = Path::new(source);
    if path.is_file() {
        return load_file(path);
    }

    let token = timetable_share::extract_token(source).ok_or_else(|| {
        CliError::Share(format!("{source:?} is neither a file nor a share link"))
    })?;
    let data = timetable_share::decode(&token)
        .ok_or_else(|| CliError::Share("invalid or corrupted share link".to_string()))?;

    debug!(events = data.events.len(), name = %data.file_name, "Loaded shared timetable");
    Ok(LoadedTimetable {
        events: data.events,
        name: data.file_name,
    })
}

/// Reads and parses a timetable file, detecting HTML or ICS.
pub fn load_file(path: &Path) -> CliResult<LoadedTimetable> {
    let content = std::fs::read_to_string(path)?;
    let events = timetable_parsers::parse_timetable(&content)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    debug!(events = events.len(), path = %path.display(), "Loaded timetable file");
    Ok(LoadedTimetable { events, name })
}

/// Reads user-added events from a JSON array.
pub fn load_custom_events(path: &Path) -> CliResult<Vec<TimetableEvent>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Loads a timetable and overlays custom events when a file is given.
pub(crate) fn load_with_custom(
    source: &str,
    custom: Option<&Path>,
) -> CliResult<LoadedTimetable> {
    let mut loaded = load_timetable(source)?;
    if let Some(path) = custom {
        let custom = load_custom_events(path)?;
        loaded.events = timetable_core::overlay_custom_events(&loaded.events, &custom);
    }
    Ok(loaded)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;

    pub(crate) const SAMPLE_HTML: &str = "<html><body><table id=\"infotab\">\
        <tr><th>Course</th><th>Group</th><th>Day</th><th>Start</th><th>End</th>\
        <th>Dates</th><th>Venue</th><th>Tutor</th></tr>\
        <tr><td>ABC123</td><td>G1</td><td>Mon</td><td>0830</td><td>1030</td>\
        <td>02/03, 09/03</td><td>LT1</td><td>A1:Dr. Tan</td></tr>\
        <tr><td>XYZ789</td><td>L2</td><td>Mon</td><td>1400</td><td>1600</td>\
        <td>02/03</td><td>Lab 3</td><td></td></tr>\
        </table></body></html>";

    pub(crate) fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_html_file() {
        let file = write_temp(".html", SAMPLE_HTML);
        let loaded = load_timetable(file.path().to_str().unwrap()).unwrap();
        assert_eq!(loaded.events.len(), 2);
        assert!(loaded.name.ends_with(".html"));
    }

    #[test]
    fn loads_share_link() {
        let file = write_temp(".html", SAMPLE_HTML);
        let events = load_file(file.path()).unwrap().events;
        let token = timetable_share::encode(&events, "mine.html").unwrap();
        let link = timetable_share::share_url("https://example.org/", &token).unwrap();

        let loaded = load_timetable(&link).unwrap();
        assert_eq!(loaded.events, events);
        assert_eq!(loaded.name, "mine.html");
    }

    #[test]
    fn wrong_file_is_a_parse_error() {
        let file = write_temp(".html", "<html><body>Login page</body></html>");
        let err = load_timetable(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, CliError::Parse(ref e) if e.code().is_wrong_file()));
    }

    #[test]
    fn corrupted_link_is_a_share_error() {
        let err = load_timetable("https://example.org/#share=garbage!").unwrap_err();
        assert!(matches!(err, CliError::Share(_)));
        let err = load_timetable("https://example.org/").unwrap_err();
        assert!(matches!(err, CliError::Share(_)));
    }

    #[test]
    fn overlays_custom_events() {
        let file = write_temp(".html", SAMPLE_HTML);
        let custom = write_temp(
            ".json",
            r#"[{"group":"Gym","startTime":"1800","endTime":"1900","dates":["02/03"]}]"#,
        );
        let loaded =
            load_with_custom(file.path().to_str().unwrap(), Some(custom.path())).unwrap();
        assert_eq!(loaded.events.len(), 3);
        assert!(loaded.events[2].is_custom());
    }
}
