//! # Spot Analytics and Orchestration
//!
//! Ties the pipeline together: enumerate candidate sessions, score them,
//! keep the best five, and publish the result per spot. The published map is
//! the only shared mutable state in the crate.
//!
//! ## Concurrency
//!
//! Analyses for different spots are independent and free to run concurrently.
//! Overlapping analyses for the *same* spot are serialized by a per-spot
//! mutex held across compute and publish, so a spot's entry is replaced
//! atomically and never read mid-update. The daylight lookup - the only
//! await point - happens before that lock is taken; no lock is ever held
//! across an await.
//!
//! Each published result carries a fingerprint of the wave batch it was
//! computed from, so consumers can tell whether two results came from the
//! same input.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::daylight::DaylightService;
use crate::score::QualityScorer;
use crate::session::{enumerate_slots, WaveTimeSlot};
use crate::{SunTimes, WaveEvent};

/// A candidate session together with its computed score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoredTimeSlot {
    /// The session window
    pub slot: WaveTimeSlot,
    /// Session quality score, always positive in published results
    pub score: f64,
}

/// The published analysis for one spot: up to five sessions, best first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpotAnalytics {
    /// Stable identifier of the spot
    pub spot_id: String,
    /// Display name of the spot
    pub spot_name: String,
    /// Ranked sessions, descending score, at most five
    pub time_slots: Vec<ScoredTimeSlot>,
    /// Fingerprint of the wave batch this analysis was computed from
    pub batch_fingerprint: u64,
}

impl SpotAnalytics {
    /// The highest-scoring session, if any session survived ranking.
    pub fn best_time_slot(&self) -> Option<&ScoredTimeSlot> {
        self.time_slots.first()
    }

    /// Total waves across all ranked sessions (overlapping sessions count
    /// shared waves once per session).
    pub fn total_waves(&self) -> usize {
        self.time_slots.iter().map(|scored| scored.slot.wave_count).sum()
    }
}

/// Discovers and ranks riding sessions, publishing one result per spot.
pub struct WaveAnalyzer {
    config: Config,
    scorer: QualityScorer,
    daylight: Option<DaylightService>,
    spots: RwLock<HashMap<String, SpotAnalytics>>,
    spot_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl WaveAnalyzer {
    /// Analyzer without a daylight source; scoring uses wake quality and
    /// frequency only.
    pub fn new(config: Config) -> Self {
        Self::build(config, None)
    }

    /// Analyzer with a daylight source for twilight-aware scoring.
    pub fn with_daylight(config: Config, daylight: DaylightService) -> Self {
        Self::build(config, Some(daylight))
    }

    fn build(config: Config, daylight: Option<DaylightService>) -> Self {
        let scorer = QualityScorer::new(&config);
        WaveAnalyzer {
            config,
            scorer,
            daylight,
            spots: RwLock::new(HashMap::new()),
            spot_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Run a full analysis for one spot and publish the result.
    ///
    /// Sun times are looked up for the day of the earliest wave. A failed or
    /// missing daylight lookup degrades to quality-and-frequency scoring.
    pub async fn analyze(
        &self,
        spot_id: &str,
        spot_name: &str,
        waves: Vec<WaveEvent>,
    ) -> SpotAnalytics {
        let sun_times = match (&self.daylight, waves.iter().map(|w| w.time).min()) {
            (Some(service), Some(first_wave)) => {
                match service.sun_times(first_wave.date_naive()).await {
                    Ok(sun) => Some(sun),
                    Err(error) => {
                        warn!(spot_id, %error, "daylight lookup failed, scoring without sun times");
                        None
                    }
                }
            }
            _ => None,
        };

        self.analyze_with_sun_times(spot_id, spot_name, waves, sun_times)
    }

    /// Synchronous analysis core: enumerate, score, rank, publish.
    ///
    /// Held under the spot's serialization lock from first computation to
    /// publication, so two overlapping analyses for one spot cannot
    /// interleave their writes.
    pub fn analyze_with_sun_times(
        &self,
        spot_id: &str,
        spot_name: &str,
        waves: Vec<WaveEvent>,
        sun_times: Option<SunTimes>,
    ) -> SpotAnalytics {
        let lock = self.spot_lock(spot_id);
        let _serialized = lock.lock();

        let batch_fingerprint = batch_fingerprint(&waves);
        let candidates = enumerate_slots(&waves, &self.config.session);

        let mut scored: Vec<ScoredTimeSlot> = candidates
            .into_iter()
            .map(|slot| {
                let score = self.scorer.score(&slot, sun_times.as_ref());
                ScoredTimeSlot { slot, score }
            })
            .filter(|scored| scored.score > 0.0)
            .collect();

        // Stable sort: equal scores keep discovery (start-time) order
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(self.config.session.max_results);

        let analytics = SpotAnalytics {
            spot_id: spot_id.to_string(),
            spot_name: spot_name.to_string(),
            time_slots: scored,
            batch_fingerprint,
        };

        debug!(
            spot_id,
            sessions = analytics.time_slots.len(),
            with_sun_times = sun_times.is_some(),
            "published spot analytics"
        );
        self.spots
            .write()
            .insert(spot_id.to_string(), analytics.clone());

        analytics
    }

    /// The last published analysis for a spot.
    pub fn analytics(&self, spot_id: &str) -> Option<SpotAnalytics> {
        self.spots.read().get(spot_id).cloned()
    }

    /// All published analyses, in no particular order.
    pub fn all_analytics(&self) -> Vec<SpotAnalytics> {
        self.spots.read().values().cloned().collect()
    }

    fn spot_lock(&self, spot_id: &str) -> Arc<Mutex<()>> {
        self.spot_locks
            .lock()
            .entry(spot_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

/// Order-sensitive fingerprint of a wave batch.
fn batch_fingerprint(waves: &[WaveEvent]) -> u64 {
    let mut hasher = DefaultHasher::new();
    waves.len().hash(&mut hasher);
    for wave in waves {
        wave.time.timestamp().hash(&mut hasher);
        wave.ship_name.hash(&mut hasher);
        wave.classified_fleet.hash(&mut hasher);
    }
    hasher.finish()
}
