//! # Wave Tracker Application Entry Point
//!
//! This binary loads a day of scheduled waves per spot from a JSON file, runs
//! the session-discovery engine over each spot, and prints the ranked riding
//! sessions to stdout. It is the development harness for the engine: feed it
//! a schedule dump, read the plan.
//!
//! `--offline` skips the daylight lookup, ranking on wake quality and
//! frequency alone - handy without network access, and the same degradation
//! path the engine takes when the daylight API misbehaves.

// Test modules
#[cfg(test)]
mod tests;

use std::{env, fs};

use anyhow::Context;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use wave_session_lib::analytics::{SpotAnalytics, WaveAnalyzer};
use wave_session_lib::config::Config;
use wave_session_lib::daylight::DaylightService;
use wave_session_lib::WaveEvent;

/// One spot's day of scheduled waves, as read from the input file.
#[derive(Debug, Deserialize)]
struct SpotInput {
    spot_id: String,
    spot_name: String,
    waves: Vec<WaveEvent>,
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    init_logging();

    // Parse command line arguments
    // Offline mode: skip the daylight lookup, as when the API is unreachable
    let args: Vec<String> = env::args().skip(1).collect();
    let offline = args.iter().any(|arg| arg == "--offline");
    let input_path = args
        .iter()
        .find(|arg| !arg.starts_with("--"))
        .context("usage: wave-tracker <events.json> [--offline]")?;

    let config = Config::load();

    let contents = fs::read_to_string(input_path)
        .with_context(|| format!("failed to read {input_path}"))?;
    let spots: Vec<SpotInput> =
        serde_json::from_str(&contents).with_context(|| format!("failed to parse {input_path}"))?;

    let analyzer = if offline {
        WaveAnalyzer::new(config)
    } else {
        let daylight = DaylightService::new(&config.daylight);
        WaveAnalyzer::with_daylight(config, daylight)
    };

    // Create Tokio runtime for the daylight lookups
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        for spot in spots {
            let analytics = analyzer
                .analyze(&spot.spot_id, &spot.spot_name, spot.waves)
                .await;
            print_analytics(&analytics);
        }
    });

    Ok(())
}

/// Print one spot's ranked sessions.
fn print_analytics(analytics: &SpotAnalytics) {
    println!("{} ({})", analytics.spot_name, analytics.spot_id);

    if analytics.time_slots.is_empty() {
        println!("  no rideable sessions");
        return;
    }

    for (rank, scored) in analytics.time_slots.iter().enumerate() {
        let slot = &scored.slot;
        println!(
            "  {}. {}-{}  {} waves  {:.1}/h  score {:.1}",
            rank + 1,
            slot.start_time.format("%H:%M"),
            slot.end_time.format("%H:%M"),
            slot.wave_count,
            slot.waves_per_hour(),
            scored.score,
        );
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();
}
