//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the
//! wave-config.toml file. It centralizes the session constraints, scoring
//! weights, wake-tier fleet lists and daylight-API coordinates so that tuning
//! the ranking never requires touching the algorithm.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Application configuration loaded from wave-config.toml
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    /// Session window constraints
    pub session: SessionConfig,
    /// Scoring weights
    pub scoring: ScoringConfig,
    /// Wake-tier fleet lists
    pub fleet: FleetConfig,
    /// Daylight lookup coordinates
    pub daylight: DaylightConfig,
}

/// Constraints that define what counts as one riding session
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Maximum gap between consecutive waves within a session, in minutes
    pub max_wave_gap_minutes: i64,
    /// Minimum session duration in minutes
    pub min_duration_minutes: i64,
    /// Maximum session duration in minutes
    pub max_duration_minutes: i64,
    /// How many ranked sessions to keep per spot
    pub max_results: usize,
}

impl SessionConfig {
    /// Maximum gap between consecutive waves as a duration
    pub fn max_wave_gap(&self) -> Duration {
        Duration::minutes(self.max_wave_gap_minutes)
    }

    /// Minimum session duration
    pub fn min_duration(&self) -> Duration {
        Duration::minutes(self.min_duration_minutes)
    }

    /// Maximum session duration
    pub fn max_duration(&self) -> Duration {
        Duration::minutes(self.max_duration_minutes)
    }
}

/// Weights feeding the session score
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ScoringConfig {
    /// Points per wave from a three-wake (premium) vessel
    pub premium_wake_points: f64,
    /// Points per wave from a two-wake vessel
    pub strong_wake_points: f64,
    /// Points per wave from any other named vessel
    pub standard_wake_points: f64,
    /// Points per wave with no vessel assignment
    pub unnamed_points: f64,
    /// Divisor for the waves-per-hour frequency bonus
    /// (bonus = 1 + waves_per_hour / divisor)
    pub frequency_divisor: f64,
    /// Score fraction removed when a session lies fully in twilight
    pub twilight_penalty: f64,
}

/// Vessel names per wake tier.
///
/// Wake ratings exist for the Lake Zürich fleet: the big motor ships and the
/// two steamers push a second wave, the Panta Rhei class a third.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct FleetConfig {
    /// Vessels that throw three rideable wakes
    pub three_wake_ships: Vec<String>,
    /// Vessels that throw two rideable wakes
    pub two_wake_ships: Vec<String>,
}

/// Coordinates for the sunrise/sunset lookup
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DaylightConfig {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            session: SessionConfig {
                max_wave_gap_minutes: 60,
                min_duration_minutes: 60,
                max_duration_minutes: 120,
                max_results: 5,
            },
            scoring: ScoringConfig {
                premium_wake_points: 10.0,
                strong_wake_points: 5.0,
                standard_wake_points: 2.0,
                unnamed_points: 1.0,
                frequency_divisor: 10.0,
                twilight_penalty: 0.8,
            },
            fleet: FleetConfig {
                three_wake_ships: vec![
                    "MS Panta Rhei".to_string(),
                    "MS Albis".to_string(),
                    "EMS Uetliberg".to_string(),
                    "EMS Pfannenstiel".to_string(),
                    "EM Uetliberg".to_string(),
                    "EM Pfannenstiel".to_string(),
                ],
                two_wake_ships: vec![
                    "MS Wädenswil".to_string(),
                    "MS Limmat".to_string(),
                    "MS Helvetia".to_string(),
                    "MS Linth".to_string(),
                    "DS Stadt Zürich".to_string(),
                    "DS Stadt Rapperswil".to_string(),
                ],
            },
            daylight: DaylightConfig {
                // Roughly the middle of Lake Lucerne; close enough for every
                // Swiss lake the schedules cover
                latitude: 47.0136,
                longitude: 8.4324,
            },
        }
    }
}

impl Config {
    /// Load configuration from wave-config.toml file
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path("wave-config.toml")
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => {
                    info!(
                        rated_ships = config.fleet.three_wake_ships.len()
                            + config.fleet.two_wake_ships.len(),
                        "loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    warn!("invalid config file format: {e}");
                    warn!("using default configuration (Lake Zürich fleet)");
                    Self::default()
                }
            },
            Err(_) => {
                info!("no config file found, using default configuration (Lake Zürich fleet)");
                Self::default()
            }
        }
    }

    /// Save current configuration to wave-config.toml
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let contents = toml::to_string_pretty(self)?;
        fs::write("wave-config.toml", contents)?;
        info!("configuration saved to wave-config.toml");
        Ok(())
    }
}
