use anyhow::Context;
use bp_track_domain::simulation::simulate_recent_readings;
use bp_track_report::{build_report, load_readings, ReportConfig, ReportSource};
use chrono::Utc;
use dotenv::dotenv;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Entry point for the BPTrack report
///
/// 1. Loads environment variables from a .env file when present
/// 2. Sets up tracing on stderr, leaving stdout for the JSON report
/// 3. Loads readings from BP_READINGS_PATH or simulates them
/// 4. Prints the summary for the configured period
fn main() -> anyhow::Result<()> {
    let dotenv_missing = dotenv().is_err();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr))
        .with(env_filter)
        .init();

    if dotenv_missing {
        warn!(".env file not found or couldn't be read. Using environment variables.");
    }

    let config = ReportConfig::from_env().context("Invalid report configuration")?;
    info!(period = %config.period, "Building blood pressure report");

    let (readings, source) = match &config.readings_path {
        Some(path) => (load_readings(path)?, ReportSource::File(path.clone())),
        None => {
            info!("No BP_READINGS_PATH set, simulating {} readings", config.simulated_readings);
            (
                simulate_recent_readings(config.simulated_readings),
                ReportSource::Simulated,
            )
        }
    };

    let report = build_report(&readings, &config, source, Utc::now())
        .context("No readings to report on yet")?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
