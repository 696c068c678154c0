//! CLI error types.

use std::fmt;

use timetable_parsers::ParseError;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur while running a command.
#[derive(Debug)]
pub enum CliError {
    /// Configuration error.
    Config(String),
    /// IO error.
    Io(std::io::Error),
    /// The input could not be parsed as a timetable.
    Parse(ParseError),
    /// Share link could not be built or read.
    Share(String),
    /// JSON input or output failed.
    Json(serde_json::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::Io(err) => write!(f, "IO error: {}", err),
            Self::Parse(err) if err.code().is_wrong_file() => write!(
                f,
                "{} (expected the HTML timetable export or an .ics calendar)",
                err
            ),
            Self::Parse(err) => write!(f, "failed to parse timetable: {}", err),
            Self::Share(msg) => write!(f, "share error: {}", msg),
            Self::Json(err) => write!(f, "JSON error: {}", err),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ParseError> for CliError {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<timetable_share::ShareError> for CliError {
    fn from(err: timetable_share::ShareError) -> Self {
        Self::Share(err.to_string())
    }
}
