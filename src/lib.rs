//! # Wave Tracker Core Library
//!
//! This library provides the session-discovery engine and supporting types for
//! the wave tracker application. Scheduled passenger boats on Swiss lakes throw
//! rideable wakes; given one day of scheduled boat passages for a spot, the
//! engine finds the time windows worth paddling out for and ranks them.
//!
//! ## Design Philosophy
//!
//! ### Pure Analysis Core
//! - **No I/O in the engine**: session enumeration and scoring are pure
//!   functions of the wave list (plus optional sun times), so every ranking
//!   decision is unit-testable with fixed timestamps
//! - **Graceful degradation**: when sun times are unavailable the engine keeps
//!   working on wake quality and frequency alone - a missing daylight source
//!   is a logged fallback, never an error
//! - **Replace, don't mutate**: each analysis recomputes a spot's ranking from
//!   the full event batch and replaces the published entry wholesale
//!
//! ### Session Model
//! A session is a contiguous run of waves close enough together to ride as one
//! outing:
//! - **Max gap between waves**: 1 hour - any longer and you're sitting in
//!   flat water
//! - **Duration bounds**: 1 to 2 hours per session
//! - **Minimum 3 waves**: fewer is not worth the wetsuit
//!
//! ### Data Flow
//! 1. **Online**: wave schedule → enumerate candidate windows → fetch sun
//!    times → score (quality × frequency × daylight) → publish top 5
//! 2. **Offline**: same pipeline without the daylight adjustment
//! 3. **Readers**: query the published per-spot analytics at any time
//!
//! ## Core Types
//!
//! The library exports two primary value types shared across modules:
//! - [`WaveEvent`]: a single scheduled boat passage that can produce a wake
//! - [`SunTimes`]: sunrise/sunset and civil twilight bounds for one day

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Module declarations
pub mod analytics;
pub mod config;
pub mod daylight;
pub mod score;
pub mod session;

/// A single scheduled boat passage that can produce a rideable wake.
///
/// Events come from the schedule-fetching pipeline and are consumed read-only
/// by the engine. The ship name is optional - many schedule entries do not
/// carry a vessel assignment.
///
/// `classified_fleet` marks events on the lake whose fleet has wake-tier
/// ratings (Lake Zürich). Events off that lake never match a rated ship, even
/// if a name happens to collide with a rated vessel.
///
/// # Example
/// ```
/// use chrono::{TimeZone, Utc};
/// use wave_session_lib::WaveEvent;
///
/// let wave = WaveEvent {
///     time: Utc.with_ymd_and_hms(2024, 6, 16, 10, 0, 0).unwrap(),
///     ship_name: Some("MS Panta Rhei".to_string()),
///     classified_fleet: true,
/// };
/// assert!(wave.ship_name.is_some());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaveEvent {
    /// Scheduled passage time
    pub time: DateTime<Utc>,
    /// Assigned vessel, when the schedule knows it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ship_name: Option<String>,
    /// Whether this event's lake carries wake-tier ratings for its fleet
    #[serde(default)]
    pub classified_fleet: bool,
}

/// Sunrise, sunset and civil twilight bounds for one calendar day.
///
/// The four timestamps are ordered
/// `civil_twilight_begin <= sunrise <= sunset <= civil_twilight_end`.
/// Sessions entirely outside the twilight-to-twilight window are unrideable
/// (too dark); sessions overlapping the twilight fringes are penalized.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SunTimes {
    /// Sunrise
    pub sunrise: DateTime<Utc>,
    /// Sunset
    pub sunset: DateTime<Utc>,
    /// Start of morning civil twilight
    pub civil_twilight_begin: DateTime<Utc>,
    /// End of evening civil twilight
    pub civil_twilight_end: DateTime<Utc>,
}
