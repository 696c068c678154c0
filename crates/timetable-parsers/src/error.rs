//! Error types for timetable parsing.
//!
//! The code tells callers which remediation to offer: a missing table means
//! the wrong file was uploaded, an empty result means the right kind of file
//! held no usable rows, and the invalid-field codes point at a damaged export.

use std::fmt;
use thiserror::Error;

/// The category of a parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorCode {
    /// The expected timetable structure is absent (wrong file).
    MissingTable,
    /// The document parsed but produced no events.
    EmptyResult,
    /// A `DTSTART`/`DTEND` value is not `YYYYMMDDTHHMMSS`.
    InvalidDatetime,
    /// A time cell is not a valid `HHMM` time.
    InvalidTime,
}

impl ParseErrorCode {
    /// Returns true if the input is a different kind of file altogether.
    pub fn is_wrong_file(&self) -> bool {
        matches!(self, Self::MissingTable)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingTable => "missing_table",
            Self::EmptyResult => "empty_result",
            Self::InvalidDatetime => "invalid_datetime",
            Self::InvalidTime => "invalid_time",
        }
    }
}

impl fmt::Display for ParseErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error raised while turning a source document into events.
#[derive(Debug, Error)]
pub struct ParseError {
    code: ParseErrorCode,
    message: String,
    /// Source format that was being parsed ("html", "ics").
    format: Option<&'static str>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ParseError {
    pub fn new(code: ParseErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            format: None,
            source: None,
        }
    }

    pub fn missing_table(message: impl Into<String>) -> Self {
        Self::new(ParseErrorCode::MissingTable, message)
    }

    pub fn empty_result(message: impl Into<String>) -> Self {
        Self::new(ParseErrorCode::EmptyResult, message)
    }

    pub fn invalid_datetime(message: impl Into<String>) -> Self {
        Self::new(ParseErrorCode::InvalidDatetime, message)
    }

    pub fn invalid_time(message: impl Into<String>) -> Self {
        Self::new(ParseErrorCode::InvalidTime, message)
    }

    /// Sets the source format name.
    pub fn with_format(mut self, format: &'static str) -> Self {
        self.format = Some(format);
        self
    }

    /// Sets the underlying cause.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub fn code(&self) -> ParseErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn format(&self) -> Option<&'static str> {
        self.format
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(format) = self.format {
            write!(f, "[{}] ", format)?;
        }
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// A specialized Result type for parse operations.
pub type ParseResult<T> = Result<T, ParseError>;
