//! CLI configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/timetable/config.toml` by default:
//!
//! ```toml
//! academic_year = 2026
//!
//! [compare]
//! wait_minutes = 15
//! direction = "both"
//! meal = "lunch"
//! min_gap_minutes = 60
//! lunch = { start_hour = 11, end_hour = 14 }
//! dinner = { start_hour = 17, end_hour = 20 }
//!
//! [share]
//! base_url = "https://timetable.example.org/"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use timetable_core::time::MINUTES_PER_DAY;
use timetable_core::{CompareConfig, DateContext};

/// Configuration for the timetable CLI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Year applied to `DD/MM` dates. Defaults to the current year.
    pub academic_year: Option<i32>,

    /// Compare engine settings.
    pub compare: CompareConfig,

    /// Share link settings.
    pub share: ShareSettings,
}

/// Share link settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareSettings {
    /// Viewer URL that share links point at. Without it only the bare token
    /// is printed.
    pub base_url: Option<String>,
}

impl CliConfig {
    /// Loads configuration from the default path, or defaults when the file
    /// does not exist.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("failed to read config: {}", e))?;
        toml::from_str(&content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("timetable")
    }

    /// Date context for resolving event dates.
    pub fn date_context(&self) -> DateContext {
        self.academic_year
            .map(DateContext::new)
            .unwrap_or_default()
    }

    /// Checks values that deserialize fine but make no sense.
    pub fn validate(&self) -> Result<(), String> {
        validate_compare(&self.compare)?;

        if let Some(base) = self.share.base_url.as_deref() {
            timetable_share::share_url(base, "")
                .map_err(|e| format!("share.base_url {base:?}: {e}"))?;
        }

        Ok(())
    }
}

/// Checks the `[compare]` section.
pub fn validate_compare(compare: &CompareConfig) -> Result<(), String> {
    for (name, window) in [("lunch", &compare.lunch), ("dinner", &compare.dinner)] {
        if !window.is_valid() {
            return Err(format!(
                "compare.{name} window {}-{} must satisfy start < end <= 24",
                window.start_hour, window.end_hour
            ));
        }
    }

    if compare.wait_minutes >= MINUTES_PER_DAY {
        return Err(format!(
            "compare.wait_minutes must be under {MINUTES_PER_DAY}, got {}",
            compare.wait_minutes
        ));
    }

    Ok(())
}
