//! Command-line interface for the timetable toolkit.
//!
//! This crate provides the `timetable` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use cli::Cli;
pub use config::CliConfig;
pub use error::{CliError, CliResult};
