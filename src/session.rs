//! # Session Window Enumeration
//!
//! A riding session is a contiguous run of waves: consecutive waves at most
//! one hour apart, the whole window between one and two hours long, and at
//! least three waves in it. This module enumerates every candidate window in
//! a day of scheduled waves.
//!
//! Every wave is tried as a session start and extended greedily forward, so
//! candidates starting at different waves may overlap and share member waves.
//! That is deliberate: the ranker later picks the best windows, and a rider
//! choosing the 10:20 start over the 10:00 start still gets the overlapping
//! waves counted for both.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SessionConfig;
use crate::WaveEvent;

/// A candidate riding session: a window of consecutive waves.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaveTimeSlot {
    /// Time of the first wave in the window
    pub start_time: DateTime<Utc>,
    /// Time of the last wave in the window
    pub end_time: DateTime<Utc>,
    /// Number of waves in the window
    pub wave_count: usize,
    /// The member waves, in chronological order
    pub waves: Vec<WaveEvent>,
}

impl WaveTimeSlot {
    /// Window length, first wave to last wave.
    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }

    /// Wave density over the window.
    pub fn waves_per_hour(&self) -> f64 {
        let hours = self.duration().num_seconds() as f64 / 3600.0;
        if hours <= 0.0 {
            0.0
        } else {
            self.wave_count as f64 / hours
        }
    }
}

/// Enumerate all candidate session windows in one day of waves.
///
/// Waves are sorted by time first; the input order does not matter. When the
/// whole day spans less than the minimum session duration there is nothing to
/// ride and no candidates are produced - that is a normal empty result, not
/// an error.
///
/// Each wave is treated as a potential session start and extended forward
/// until the gap to the next wave exceeds `max_wave_gap` or the window would
/// outgrow `max_duration`. A window only becomes a candidate if it reaches
/// `min_duration` and holds at least three waves.
pub fn enumerate_slots(waves: &[WaveEvent], limits: &SessionConfig) -> Vec<WaveTimeSlot> {
    let mut sorted: Vec<WaveEvent> = waves.to_vec();
    sorted.sort_by_key(|wave| wave.time);

    let (Some(first), Some(last)) = (sorted.first(), sorted.last()) else {
        return Vec::new();
    };

    // Not enough scheduled traffic today to fill even a minimal session
    let total_span = last.time - first.time;
    if total_span < limits.min_duration() {
        debug!(
            total_span_minutes = total_span.num_minutes(),
            "day span below minimum session duration, no candidates"
        );
        return Vec::new();
    }

    let max_gap = limits.max_wave_gap();
    let min_duration = limits.min_duration();
    let max_duration = limits.max_duration();

    let mut slots = Vec::new();
    for (index, start) in sorted.iter().enumerate() {
        let mut session_waves = vec![start.clone()];
        let mut last_wave_time = start.time;

        for wave in &sorted[index + 1..] {
            let gap = wave.time - last_wave_time;
            let span = wave.time - start.time;

            // Stop if the gap is too large or the session would run too long
            if gap > max_gap || span > max_duration {
                break;
            }

            session_waves.push(wave.clone());
            last_wave_time = wave.time;
        }

        let session_duration = last_wave_time - start.time;
        if session_duration >= min_duration && session_waves.len() >= 3 {
            slots.push(WaveTimeSlot {
                start_time: start.time,
                end_time: last_wave_time,
                wave_count: session_waves.len(),
                waves: session_waves,
            });
        }
    }

    debug!(
        waves = sorted.len(),
        candidates = slots.len(),
        "enumerated session candidates"
    );
    slots
}
