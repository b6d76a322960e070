//! # Session Quality Scoring
//!
//! Scores a candidate session from three factors, in order of weight:
//!
//! 1. **Wake quality** - what the boats throw. Each wave contributes points
//!    by the vessel's wake tier: three-wake ships are the prize, two-wake
//!    ships are solid, anything else named is standard, and waves without a
//!    vessel assignment count a token point.
//! 2. **Frequency bonus** - denser waves mean less waiting. Multiplicative,
//!    `1 + waves_per_hour / 10` by default, uncapped.
//! 3. **Daylight** - sessions entirely outside the civil-twilight window are
//!    unrideable and score zero; sessions brushing the twilight fringes lose
//!    up to 80% of their score in proportion to the overlap.
//!
//! Sun times are optional. Without them the daylight factor is skipped
//! entirely; the analyzer logs that fallback so it stays observable.

use chrono::{DateTime, Utc};

use crate::config::{Config, ScoringConfig};
use crate::session::WaveTimeSlot;
use crate::{SunTimes, WaveEvent};

/// Scores candidate sessions against a fleet wake-tier table.
///
/// Tier membership is matched on the trimmed ship name. The tier lists only
/// apply to waves flagged as belonging to the classified-fleet lake; a name
/// collision from another lake scores as an ordinary named vessel.
pub struct QualityScorer {
    three_wake: Vec<String>,
    two_wake: Vec<String>,
    weights: ScoringConfig,
}

impl QualityScorer {
    /// Build a scorer from the configured fleet table and weights.
    pub fn new(config: &Config) -> Self {
        let trim = |names: &[String]| -> Vec<String> {
            names.iter().map(|name| name.trim().to_string()).collect()
        };
        QualityScorer {
            three_wake: trim(&config.fleet.three_wake_ships),
            two_wake: trim(&config.fleet.two_wake_ships),
            weights: config.scoring.clone(),
        }
    }

    /// Score one candidate session.
    ///
    /// Returns zero for sessions that lie entirely in darkness; otherwise
    /// `wake quality × frequency bonus × twilight penalty`.
    pub fn score(&self, slot: &WaveTimeSlot, sun_times: Option<&SunTimes>) -> f64 {
        let quality = self.wake_quality(&slot.waves);
        let frequency_bonus = 1.0 + slot.waves_per_hour() / self.weights.frequency_divisor;
        let mut score = quality * frequency_bonus;

        if let Some(sun) = sun_times {
            if in_darkness(slot, sun) {
                return 0.0;
            }
            let twilight = twilight_fraction(slot, sun);
            if twilight > 0.0 {
                score *= 1.0 - twilight * self.weights.twilight_penalty;
            }
        }

        score
    }

    /// Sum of per-wave points over the session.
    fn wake_quality(&self, waves: &[WaveEvent]) -> f64 {
        waves.iter().map(|wave| self.wave_points(wave)).sum()
    }

    fn wave_points(&self, wave: &WaveEvent) -> f64 {
        let Some(name) = wave.ship_name.as_deref() else {
            return self.weights.unnamed_points;
        };
        let name = name.trim();

        if wave.classified_fleet {
            if self.three_wake.iter().any(|ship| ship == name) {
                return self.weights.premium_wake_points;
            }
            if self.two_wake.iter().any(|ship| ship == name) {
                return self.weights.strong_wake_points;
            }
        }

        self.weights.standard_wake_points
    }
}

/// Whether the session lies entirely outside the twilight-to-twilight window.
fn in_darkness(slot: &WaveTimeSlot, sun: &SunTimes) -> bool {
    slot.end_time <= sun.civil_twilight_begin || slot.start_time >= sun.civil_twilight_end
}

/// Fraction of the session spent in morning or evening twilight.
///
/// Morning twilight is `[civil_twilight_begin, sunrise)`, evening twilight is
/// `(sunset, civil_twilight_end]`; each is intersected with the session and
/// the overlaps are summed against the session duration.
fn twilight_fraction(slot: &WaveTimeSlot, sun: &SunTimes) -> f64 {
    let duration = slot.duration().num_seconds();
    if duration <= 0 {
        return 0.0;
    }

    let morning = overlap_seconds(
        slot.start_time,
        slot.end_time,
        sun.civil_twilight_begin,
        sun.sunrise,
    );
    let evening = overlap_seconds(slot.start_time, slot.end_time, sun.sunset, sun.civil_twilight_end);

    (morning + evening) as f64 / duration as f64
}

fn overlap_seconds(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> i64 {
    let start = a_start.max(b_start);
    let end = a_end.min(b_end);
    (end - start).num_seconds().max(0)
}
