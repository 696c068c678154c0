//! Command-line interface definition.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use timetable_core::{CompareView, MealType, TravelDirection};

/// timetable - Parse, filter, compare and share class timetables
#[derive(Debug, Parser)]
#[command(name = "timetable")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "TIMETABLE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    /// Academic year for dates written without one (overrides the config)
    #[arg(long, global = true)]
    pub year: Option<i32>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
///
/// Every `SOURCE` is a timetable file (HTML export or `.ics`) or a share link.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the canonical events of a timetable as JSON
    Parse {
        /// Timetable file or share link
        source: String,
    },

    /// Show a timetable grouped by day
    List(ListArgs),

    /// Compare two timetables day by day
    Compare(CompareArgs),

    /// Share link commands
    Share {
        #[command(subcommand)]
        action: ShareAction,
    },

    /// Export a timetable as an iCalendar file
    Export {
        /// Timetable file or share link
        source: String,

        /// JSON file of user-added events to include
        #[arg(long)]
        custom: Option<PathBuf>,

        /// Write to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Arguments for `list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Timetable file or share link
    pub source: String,

    /// JSON file of user-added events to overlay
    #[arg(long)]
    pub custom: Option<PathBuf>,

    /// Case-insensitive search over course, group, venue, tutor and date
    #[arg(long, short)]
    pub search: Option<String>,

    /// Only show this course (can be repeated)
    #[arg(long = "course", action = clap::ArgAction::Append)]
    pub courses: Vec<String>,

    /// Hide days before today
    #[arg(long)]
    pub hide_past: bool,

    /// Only show this day (YYYY-MM-DD; the year is ignored)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `compare`.
#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Your timetable file or share link
    pub left: String,

    /// The other timetable file or share link
    pub right: String,

    /// Which days to show: all, identical, travel or meal
    #[arg(long, default_value = "all")]
    pub view: CompareView,

    /// Travel leg required by the travel view: to, from, both or either
    #[arg(long)]
    pub direction: Option<TravelDirection>,

    /// Minutes one person will wait for the other
    #[arg(long)]
    pub wait: Option<u32>,

    /// Meal required by the meal view: lunch or dinner
    #[arg(long)]
    pub meal: Option<MealType>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Share link actions.
#[derive(Debug, Subcommand)]
pub enum ShareAction {
    /// Encode a timetable into a share link
    Encode {
        /// Timetable file
        source: PathBuf,

        /// File name stored in the link (defaults to the source file name)
        #[arg(long)]
        name: Option<String>,

        /// Base URL of the viewer (overrides the config)
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Decode a share link or token and print its contents as JSON
    Decode {
        /// Share link or bare token
        input: String,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}
