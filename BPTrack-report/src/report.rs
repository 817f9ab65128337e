use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use bp_track_domain::services::{classify_reading, summarize_in, within_period, AnalysisError};
use bp_track_domain::{Category, Reading, ReadingSummary};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::config::ReportConfig;

/// Where the report's readings came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "path")]
pub enum ReportSource {
    File(PathBuf),
    Simulated,
}

/// Category of the most recent reading, with its guidance text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LatestCategory {
    pub category: Category,
    pub label: &'static str,
    pub description: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// JSON document printed by the report binary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub source: ReportSource,
    pub latest: LatestCategory,
    pub summary: ReadingSummary,
}

/// Read a JSON array of readings
pub fn load_readings(path: &Path) -> anyhow::Result<Vec<Reading>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read readings from {}", path.display()))?;
    let readings: Vec<Reading> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse readings in {}", path.display()))?;

    info!("Loaded {} readings from {}", readings.len(), path.display());
    Ok(readings)
}

/// Summarize the readings taken within the configured period before
/// `generated_at`, bucketed in the configured offset
pub fn build_report(
    readings: &[Reading],
    config: &ReportConfig,
    source: ReportSource,
    generated_at: DateTime<Utc>,
) -> Result<Report, AnalysisError> {
    let recent = within_period(readings, config.period, generated_at);
    let summary = summarize_in(&recent, config.period, &config.utc_offset)?;

    let latest = recent
        .iter()
        .max_by_key(|reading| reading.timestamp)
        .ok_or(AnalysisError::EmptyInput)?;
    let category = classify_reading(latest);

    Ok(Report {
        generated_at,
        source,
        latest: LatestCategory {
            category,
            label: category.label(),
            description: category.description(),
            timestamp: latest.timestamp,
        },
        summary,
    })
}
