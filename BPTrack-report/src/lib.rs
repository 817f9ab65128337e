// BPTrack Report
//
// Loads readings from disk or simulates them, then summarizes them for a period.

pub mod config;
pub mod report;

pub use config::{ConfigError, ReportConfig};
pub use report::{build_report, load_readings, Report, ReportSource};
