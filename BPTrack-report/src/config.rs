use std::env;
use std::path::PathBuf;

use bp_track_domain::entities::ParsePeriodError;
use bp_track_domain::Period;
use chrono::{FixedOffset, Offset, Utc};
use thiserror::Error;

const DEFAULT_SIMULATED_READINGS: usize = 48;
const MAX_OFFSET_MINUTES: i32 = 24 * 60;

/// Report configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid BP_REPORT_PERIOD: {0}")]
    Period(#[from] ParsePeriodError),

    #[error("Invalid {name}: '{value}' is not a number")]
    Number { name: &'static str, value: String },

    #[error("BP_UTC_OFFSET_MINUTES must be strictly between -1440 and 1440, got {0}")]
    OffsetOutOfRange(i32),
}

/// Settings for one report run
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// JSON file holding an array of readings; readings are simulated when unset
    pub readings_path: Option<PathBuf>,
    pub period: Period,
    pub simulated_readings: usize,
    /// Offset whose wall clock is used for bucketing
    pub utc_offset: FixedOffset,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            readings_path: None,
            period: Period::Week,
            simulated_readings: DEFAULT_SIMULATED_READINGS,
            utc_offset: Utc.fix(),
        }
    }
}

impl ReportConfig {
    /// Read the configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read the configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("BP_READINGS_PATH").filter(|p| !p.trim().is_empty()) {
            config.readings_path = Some(PathBuf::from(path));
        }

        if let Some(period) = lookup("BP_REPORT_PERIOD") {
            config.period = period.parse()?;
        }

        if let Some(count) = lookup("BP_SIMULATED_READINGS") {
            config.simulated_readings = count.trim().parse().map_err(|_| ConfigError::Number {
                name: "BP_SIMULATED_READINGS",
                value: count.clone(),
            })?;
        }

        if let Some(offset) = lookup("BP_UTC_OFFSET_MINUTES") {
            let minutes: i32 = offset.trim().parse().map_err(|_| ConfigError::Number {
                name: "BP_UTC_OFFSET_MINUTES",
                value: offset.clone(),
            })?;
            if minutes <= -MAX_OFFSET_MINUTES || minutes >= MAX_OFFSET_MINUTES {
                return Err(ConfigError::OffsetOutOfRange(minutes));
            }
            config.utc_offset = FixedOffset::east_opt(minutes * 60)
                .ok_or(ConfigError::OffsetOutOfRange(minutes))?;
        }

        Ok(config)
    }
}
