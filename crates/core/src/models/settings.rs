use chrono::{FixedOffset, Weekday};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Default reporting offset: UTC-06:00.
pub const DEFAULT_REPORTING_OFFSET_MINUTES: i32 = -6 * 60;

/// Largest accepted offset magnitude (±14:00, the widest real-world zone).
pub const MAX_OFFSET_MINUTES: i32 = 14 * 60;

/// First day of the Week axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

impl WeekStart {
    #[must_use]
    pub fn weekday(self) -> Weekday {
        match self {
            WeekStart::Monday => Weekday::Mon,
            WeekStart::Sunday => Weekday::Sun,
        }
    }
}

/// Host-supplied report configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSettings {
    /// Fixed offset from UTC (in minutes) that every timestamp is shifted
    /// into before any date or hour is read from it.
    #[serde(default = "default_offset")]
    pub reporting_offset_minutes: i32,

    /// First day of the Week axis.
    #[serde(default)]
    pub week_starts_on: WeekStart,
}

fn default_offset() -> i32 {
    DEFAULT_REPORTING_OFFSET_MINUTES
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            reporting_offset_minutes: DEFAULT_REPORTING_OFFSET_MINUTES,
            week_starts_on: WeekStart::default(),
        }
    }
}

impl ReportSettings {
    /// The reporting offset as a chrono `FixedOffset`.
    pub fn reporting_offset(&self) -> Result<FixedOffset, CoreError> {
        offset_from_minutes(self.reporting_offset_minutes)
    }

    /// Check that every field holds a usable value.
    pub fn validate(&self) -> Result<(), CoreError> {
        self.reporting_offset().map(|_| ())
    }

    /// Load settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: ReportSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize settings: {e}")))
    }
}

/// Convert an offset in minutes into a `FixedOffset`, enforcing ±14h.
pub fn offset_from_minutes(minutes: i32) -> Result<FixedOffset, CoreError> {
    if minutes.abs() > MAX_OFFSET_MINUTES {
        return Err(CoreError::InvalidOffset(minutes));
    }
    FixedOffset::east_opt(minutes * 60).ok_or(CoreError::InvalidOffset(minutes))
}
