//! Timetable source parsers.
//!
//! - [`parse_html`] reads the vendor HTML export (one event per table row,
//!   all of its dates batched together)
//! - [`parse_ics`] reads iCalendar text (one event per `VEVENT`, one date each)
//! - [`export_ics`] writes events back out as iCalendar text
//! - [`ParseError`] distinguishes a wrong file from an empty one
//!
//! ```text
//!   HTML export ──► parse_html ─┐
//!                               ├──► Vec<TimetableEvent> ──► export_ics ──► .ics
//!   .ics file ────► parse_ics ──┘
//! ```

pub mod detect;
pub mod error;
pub mod export;
pub mod html;
pub mod ics;

pub use detect::{SourceFormat, detect_format, parse_as, parse_timetable};
pub use error::{ParseError, ParseErrorCode, ParseResult};
pub use export::export_ics;
pub use html::parse_html;
pub use ics::parse_ics;
