//! # Daylight Data Fetching and Caching
//!
//! This module handles the network lookup of sunrise, sunset and civil
//! twilight times used by the scorer's daylight adjustment. Riding a boat
//! wake in the dark is not a session anyone plans for, so the engine needs to
//! know when the light runs out.
//!
//! ## Data Source
//!
//! ### sunrise-sunset.org
//! - **URL**: https://api.sunrise-sunset.org/json
//! - **Parameters**: `lat`/`lng` (fixed, configurable coordinates),
//!   `date` (YYYY-MM-DD), `formatted=0` for ISO-8601 UTC timestamps
//! - **Format**: JSON envelope with a `status` field (`"OK"` on success) and
//!   a `results` object carrying the four timestamps
//!
//! The coordinates default to central Switzerland; sun times barely differ
//! across the lakes the schedules cover, so one lookup per day serves every
//! spot.
//!
//! ## Caching Strategy
//!
//! Sun times for a calendar day never change, so results are memoized
//! per-date in memory for the life of the process. No TTL, no disk cache -
//! a handful of `SunTimes` values is all the state there is.
//!
//! ## Error Handling
//!
//! All failure modes surface through the [`DaylightError`] enum: transport
//! errors, non-`OK` API status, and malformed timestamps. Callers treat any
//! of them as "no daylight data available" and score without the daylight
//! adjustment - the fallback is logged, never propagated as a failure.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use parking_lot::Mutex;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::config::DaylightConfig;
use crate::SunTimes;

/// Errors that can occur while fetching sun times.
#[derive(Error, Debug)]
pub enum DaylightError {
    /// HTTP request failed (network, server, or protocol error)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered but reported a non-OK status
    #[error("daylight API returned status {0:?}")]
    Api(String),

    /// A timestamp in the response body could not be parsed
    #[error("malformed daylight timestamp {0:?}")]
    Parse(String),
}

/// Fetches and memoizes per-day sun times from sunrise-sunset.org.
pub struct DaylightService {
    client: reqwest::Client,
    latitude: f64,
    longitude: f64,
    cache: Mutex<HashMap<NaiveDate, SunTimes>>,
}

impl DaylightService {
    /// Service for the configured coordinates.
    pub fn new(config: &DaylightConfig) -> Self {
        DaylightService {
            client: reqwest::Client::new(),
            latitude: config.latitude,
            longitude: config.longitude,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Sun times for one calendar day, from cache or the network.
    pub async fn sun_times(&self, date: NaiveDate) -> Result<SunTimes, DaylightError> {
        if let Some(cached) = self.cache.lock().get(&date).copied() {
            return Ok(cached);
        }

        let sun = self.fetch(date).await?;
        self.cache.lock().insert(date, sun);
        Ok(sun)
    }

    async fn fetch(&self, date: NaiveDate) -> Result<SunTimes, DaylightError> {
        debug!(%date, "fetching sun times");

        let response: SunApiResponse = self
            .client
            .get("https://api.sunrise-sunset.org/json")
            .query(&[
                ("lat", self.latitude.to_string()),
                ("lng", self.longitude.to_string()),
                ("date", date.format("%Y-%m-%d").to_string()),
                ("formatted", "0".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        sun_times_from_response(response)
    }
}

// -- Response decoding --

#[derive(Debug, Deserialize)]
struct SunApiResponse {
    results: SunApiResults,
    status: String,
}

#[derive(Debug, Deserialize)]
struct SunApiResults {
    sunrise: String,
    sunset: String,
    civil_twilight_begin: String,
    civil_twilight_end: String,
}

fn sun_times_from_response(response: SunApiResponse) -> Result<SunTimes, DaylightError> {
    if response.status != "OK" {
        return Err(DaylightError::Api(response.status));
    }

    let results = response.results;
    Ok(SunTimes {
        sunrise: parse_utc(&results.sunrise)?,
        sunset: parse_utc(&results.sunset)?,
        civil_twilight_begin: parse_utc(&results.civil_twilight_begin)?,
        civil_twilight_end: parse_utc(&results.civil_twilight_end)?,
    })
}

fn parse_utc(raw: &str) -> Result<DateTime<Utc>, DaylightError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| DaylightError::Parse(raw.to_string()))
}
