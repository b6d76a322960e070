//! # End-to-End Test Suite for the Session Engine
//!
//! These tests drive the full pipeline - enumeration, scoring, ranking and
//! publication - through the analyzer's public surface, the way the
//! application uses it. They pin down the scoring arithmetic on known inputs
//! and the invariants every published result must hold.

use chrono::{Duration, TimeZone, Utc};
use wave_session_lib::analytics::WaveAnalyzer;
use wave_session_lib::config::Config;
use wave_session_lib::{SunTimes, WaveEvent};

fn wave_at(hour: u32, minute: u32, ship: Option<&str>) -> WaveEvent {
    WaveEvent {
        time: Utc.with_ymd_and_hms(2024, 6, 16, hour, minute, 0).unwrap(),
        ship_name: ship.map(|s| s.to_string()),
        classified_fleet: ship.is_some(),
    }
}

fn summer_sun() -> SunTimes {
    let at = |h, m| Utc.with_ymd_and_hms(2024, 6, 16, h, m, 0).unwrap();
    SunTimes {
        civil_twilight_begin: at(5, 0),
        sunrise: at(6, 0),
        sunset: at(20, 0),
        civil_twilight_end: at(21, 0),
    }
}

/// Four unnamed waves over one hour score quality 4, frequency bonus 1.4.
///
/// This is the canonical arithmetic check: 4 waves/hour on token points must
/// come out at exactly 5.6.
#[test]
fn unnamed_hourly_block_scores_5_6() {
    let analyzer = WaveAnalyzer::new(Config::default());
    let waves = vec![
        wave_at(10, 0, None),
        wave_at(10, 20, None),
        wave_at(10, 40, None),
        wave_at(11, 0, None),
    ];

    let result = analyzer.analyze_with_sun_times("zh-1", "Bürkliplatz", waves, None);

    assert_eq!(result.time_slots.len(), 1);
    let best = result.best_time_slot().unwrap();
    assert_eq!(best.slot.wave_count, 4);
    assert_eq!(best.slot.waves_per_hour(), 4.0);
    assert!((best.score - 5.6).abs() < 1e-9, "expected 5.6, got {}", best.score);
}

/// The same block on a premium three-wake vessel scores ten times the
/// quality: 40 × 1.4 = 56.
#[test]
fn premium_fleet_block_scores_56() {
    let analyzer = WaveAnalyzer::new(Config::default());
    let waves = vec![
        wave_at(10, 0, Some("MS Panta Rhei")),
        wave_at(10, 20, Some("MS Panta Rhei")),
        wave_at(10, 40, Some("MS Panta Rhei")),
        wave_at(11, 0, Some("MS Panta Rhei")),
    ];

    let result = analyzer.analyze_with_sun_times("zh-1", "Bürkliplatz", waves, None);

    let best = result.best_time_slot().unwrap();
    assert!((best.score - 56.0).abs() < 1e-9, "expected 56, got {}", best.score);
}

/// A session entirely before civil twilight never reaches the output.
#[test]
fn pre_dawn_session_is_excluded() {
    let analyzer = WaveAnalyzer::new(Config::default());
    let waves = vec![
        wave_at(4, 0, None),
        wave_at(4, 30, None),
        wave_at(5, 0, None), // ends exactly at civil twilight begin
    ];

    let result = analyzer.analyze_with_sun_times("zh-1", "Bürkliplatz", waves, Some(summer_sun()));
    assert!(result.time_slots.is_empty());
}

/// A session overlapping morning twilight keeps exactly the penalized share
/// of its score: 15 of 60 minutes in twilight → factor 0.8.
#[test]
fn morning_twilight_applies_80_percent_factor() {
    let config = Config::default();
    let waves = vec![
        wave_at(6, 15, None),
        wave_at(6, 35, None),
        wave_at(6, 55, None),
        wave_at(7, 15, None),
    ];
    let sun = SunTimes {
        civil_twilight_begin: Utc.with_ymd_and_hms(2024, 6, 16, 6, 0, 0).unwrap(),
        sunrise: Utc.with_ymd_and_hms(2024, 6, 16, 6, 30, 0).unwrap(),
        sunset: Utc.with_ymd_and_hms(2024, 6, 16, 20, 0, 0).unwrap(),
        civil_twilight_end: Utc.with_ymd_and_hms(2024, 6, 16, 21, 0, 0).unwrap(),
    };

    let analyzer = WaveAnalyzer::new(config);
    let with_sun = analyzer.analyze_with_sun_times("zh-1", "Bürkliplatz", waves.clone(), Some(sun));
    let without_sun = analyzer.analyze_with_sun_times("zh-2", "Bürkliplatz", waves, None);

    let penalized = with_sun.best_time_slot().unwrap().score;
    let base = without_sun.best_time_slot().unwrap().score;
    assert!(
        (penalized - base * 0.8).abs() < 1e-9,
        "expected {}, got {penalized}",
        base * 0.8
    );
}

/// Dense traffic produces overlapping candidates; the published ranking
/// holds every invariant: ≤5 sessions, descending score, 1-2h duration,
/// ≥3 waves, gaps ≤1h.
#[test]
fn dense_day_publishes_valid_overlapping_ranking() {
    let analyzer = WaveAnalyzer::new(Config::default());
    // Eight waves 17 minutes apart: total span just under two hours
    let waves: Vec<WaveEvent> = (0..8)
        .map(|i| {
            let minutes = i * 17;
            wave_at(10 + minutes / 60, minutes % 60, None)
        })
        .collect();

    let result = analyzer.analyze_with_sun_times("zh-3", "Thalwil", waves, Some(summer_sun()));

    assert!(result.time_slots.len() > 1, "expected overlapping candidates");
    assert!(result.time_slots.len() <= 5);

    let mut start_times = Vec::new();
    for pair in result.time_slots.windows(2) {
        assert!(pair[0].score >= pair[1].score, "ranking must be descending");
    }
    for scored in &result.time_slots {
        let slot = &scored.slot;
        assert!(slot.duration() >= Duration::hours(1));
        assert!(slot.duration() <= Duration::hours(2));
        assert!(slot.wave_count >= 3);
        for pair in slot.waves.windows(2) {
            assert!(pair[1].time - pair[0].time <= Duration::hours(1));
        }
        start_times.push(slot.start_time);
    }
    // Candidates are distinct by starting wave even where they share members
    start_times.dedup();
    assert_eq!(start_times.len(), result.time_slots.len());
}

/// Re-analyzing a spot replaces its entry; identical input reproduces an
/// identical result.
#[test]
fn reanalysis_upserts_and_is_idempotent() {
    let analyzer = WaveAnalyzer::new(Config::default());
    let morning = vec![
        wave_at(9, 0, None),
        wave_at(9, 30, None),
        wave_at(10, 0, None),
    ];
    let afternoon = vec![
        wave_at(15, 0, Some("MS Albis")),
        wave_at(15, 30, Some("MS Albis")),
        wave_at(16, 0, Some("MS Albis")),
    ];

    let first = analyzer.analyze_with_sun_times("zh-1", "Bürkliplatz", morning.clone(), None);
    let repeat = analyzer.analyze_with_sun_times("zh-1", "Bürkliplatz", morning, None);
    assert_eq!(first, repeat, "identical input must reproduce the result");

    let replaced = analyzer.analyze_with_sun_times("zh-1", "Bürkliplatz", afternoon, None);
    assert_ne!(first.batch_fingerprint, replaced.batch_fingerprint);

    // Exactly one published entry, reflecting the latest batch
    assert_eq!(analyzer.all_analytics().len(), 1);
    assert_eq!(analyzer.analytics("zh-1"), Some(replaced));
}

/// A 40-minute day is below the minimum session duration and publishes an
/// empty ranking rather than failing.
#[test]
fn short_day_yields_empty_ranking() {
    let analyzer = WaveAnalyzer::new(Config::default());
    let waves = vec![wave_at(10, 0, None), wave_at(10, 20, None), wave_at(10, 40, None)];

    let result = analyzer.analyze_with_sun_times("zh-4", "Rapperswil", waves, None);
    assert!(result.time_slots.is_empty());
}

/// The input file format the binary reads: spot id, name, and a wave list
/// with RFC 3339 timestamps.
#[test]
fn spot_input_parses_from_json() {
    let json = r#"[
        {
            "spot_id": "8503651",
            "spot_name": "Zürich Bürkliplatz",
            "waves": [
                { "time": "2024-06-16T10:00:00Z", "ship_name": "MS Panta Rhei", "classified_fleet": true },
                { "time": "2024-06-16T10:20:00Z" }
            ]
        }
    ]"#;

    let spots: Vec<crate::SpotInput> = serde_json::from_str(json).unwrap();
    assert_eq!(spots.len(), 1);
    assert_eq!(spots[0].spot_id, "8503651");
    assert_eq!(spots[0].waves.len(), 2);
    assert_eq!(spots[0].waves[0].ship_name.as_deref(), Some("MS Panta Rhei"));
    assert!(spots[0].waves[0].classified_fleet);
    assert!(spots[0].waves[1].ship_name.is_none());
    assert!(!spots[0].waves[1].classified_fleet);
}
