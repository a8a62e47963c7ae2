use chrono::NaiveDate;

use sunrise_sunset_lut::error::ResolveError;
use sunrise_sunset_lut::resolver::*;
use sunrise_sunset_lut::types::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn minutes(t: ClockTime) -> i32 {
    t.minutes_from_midnight() as i32
}

macro_rules! assert_near_minutes {
    ($time:expr, $expected:expr, $tol:expr) => {
        let (got, want) = (minutes($time), $expected as i32);
        assert!(
            (got - want).abs() <= $tol,
            "time {} is {} minutes from expected {}",
            $time, got - want, want
        );
    };
}

// ── Phase classification ──

#[test]
fn test_classify_thresholds() {
    assert_eq!(DayPhase::classify(10.0), DayPhase::Day);
    assert_eq!(DayPhase::classify(SUNRISE_ALTITUDE), DayPhase::Day);
    assert_eq!(DayPhase::classify(-1.0), DayPhase::Civil);
    assert_eq!(DayPhase::classify(-6.0), DayPhase::Civil);
    assert_eq!(DayPhase::classify(-6.01), DayPhase::Nautical);
    assert_eq!(DayPhase::classify(-12.5), DayPhase::Astronomical);
    assert_eq!(DayPhase::classify(-18.5), DayPhase::Night);
}

#[test]
fn test_day_marker_code() {
    assert_eq!(DayPhase::Day as u8, 4);
    assert_eq!(DayPhase::Night as u8, 0);
    assert!(DayPhase::Civil < DayPhase::Day);
}

// ── Minute truncation ──

#[test]
fn test_truncate_to_minute() {
    assert_eq!(truncate_to_minute(0.0), ClockTime::new(0, 0));
    assert_eq!(truncate_to_minute(21_599.9), ClockTime::new(5, 59));
    assert_eq!(truncate_to_minute(21_600.0), ClockTime::new(6, 0));
    assert_eq!(truncate_to_minute(86_399.99), ClockTime::new(23, 59));
    assert_eq!(truncate_to_minute(SECONDS_PER_DAY), ClockTime::new(0, 0));
}

// ── Transitions ──

#[test]
fn test_equator_equinox_transition_sequence() {
    let resolver = PhaseScanResolver::default();
    let transitions = resolver
        .phase_transitions(GeoCoordinate::new(0.0, 0.0), date(2024, 3, 20))
        .unwrap();
    let phases: Vec<DayPhase> = transitions.iter().map(|t| t.phase).collect();
    assert_eq!(
        phases,
        vec![
            DayPhase::Astronomical,
            DayPhase::Nautical,
            DayPhase::Civil,
            DayPhase::Day,
            DayPhase::Civil,
            DayPhase::Nautical,
            DayPhase::Astronomical,
            DayPhase::Night,
        ]
    );
}

#[test]
fn test_transitions_ordered_within_day() {
    let resolver = PhaseScanResolver::default();
    let transitions = resolver
        .phase_transitions(GeoCoordinate::new(47.5, 19.05), date(2024, 6, 21))
        .unwrap();
    assert!(!transitions.is_empty());
    for pair in transitions.windows(2) {
        assert!(pair[0].seconds_from_midnight < pair[1].seconds_from_midnight);
        assert_ne!(pair[0].phase, pair[1].phase);
    }
    for t in &transitions {
        assert!((0.0..=SECONDS_PER_DAY).contains(&t.seconds_from_midnight));
    }
}

#[test]
fn test_coarse_step_finds_transitions() {
    let fine = PhaseScanResolver::default();
    let coarse = PhaseScanResolver::new(PhaseScanConfig {
        step_seconds: 3600.0,
        ..Default::default()
    });
    let c = GeoCoordinate::new(0.0, 0.0);
    let d = date(2024, 3, 20);
    assert_eq!(coarse.resolve(c, d).unwrap(), fine.resolve(c, d).unwrap());
}

#[test]
fn test_non_positive_tolerance_terminates() {
    let c = GeoCoordinate::new(0.0, 0.0);
    let d = date(2024, 3, 20);
    let expected = PhaseScanResolver::default().resolve(c, d).unwrap();
    for tolerance_seconds in [0.0, -1.0, f64::NAN] {
        let resolver = PhaseScanResolver::new(PhaseScanConfig {
            tolerance_seconds,
            ..Default::default()
        });
        assert_eq!(resolver.resolve(c, d).unwrap(), expected, "tolerance {}", tolerance_seconds);
    }
}

// ── Resolve ──

#[test]
fn test_equator_equinox_sunrise_sunset() {
    let resolver = PhaseScanResolver::default();
    let events = resolver.resolve(GeoCoordinate::new(0.0, 0.0), date(2024, 3, 20)).unwrap();
    assert_near_minutes!(events.sunrise, 6 * 60, 30);
    assert_near_minutes!(events.sunset, 18 * 60, 30);
}

#[test]
fn test_budapest_summer_solstice() {
    let resolver = PhaseScanResolver::default();
    let events = resolver.resolve(GeoCoordinate::new(47.5, 19.05), date(2024, 6, 21)).unwrap();
    assert_near_minutes!(events.sunrise, 2 * 60 + 46, 3);
    assert_near_minutes!(events.sunset, 18 * 60 + 45, 3);
}

#[test]
fn test_budapest_winter_solstice() {
    let resolver = PhaseScanResolver::default();
    let events = resolver.resolve(GeoCoordinate::new(47.5, 19.05), date(2024, 12, 21)).unwrap();
    assert_near_minutes!(events.sunrise, 6 * 60 + 28, 3);
    assert_near_minutes!(events.sunset, 14 * 60 + 55, 3);
}

#[test]
fn test_white_night_still_resolves() {
    // London in June never reaches astronomical night.
    let resolver = PhaseScanResolver::default();
    let c = GeoCoordinate::new(51.5, 0.0);
    let transitions = resolver.phase_transitions(c, date(2024, 6, 21)).unwrap();
    assert!(transitions.iter().all(|t| t.phase != DayPhase::Night));
    let events = resolver.resolve(c, date(2024, 6, 21)).unwrap();
    assert_near_minutes!(events.sunrise, 3 * 60 + 43, 3);
    assert_near_minutes!(events.sunset, 20 * 60 + 21, 3);
}

#[test]
fn test_resolve_is_deterministic() {
    let resolver = PhaseScanResolver::default();
    let c = GeoCoordinate::new(-12.3, 45.6);
    let d = date(2024, 9, 1);
    assert_eq!(resolver.resolve(c, d).unwrap(), resolver.resolve(c, d).unwrap());
}

// ── Failure modes ──

#[test]
fn test_polar_day_has_no_day_transition() {
    let resolver = PhaseScanResolver::default();
    let d = date(2024, 6, 21);
    assert_eq!(
        resolver.resolve(GeoCoordinate::new(80.0, 0.0), d),
        Err(ResolveError::NoDayPhase { date: d })
    );
}

#[test]
fn test_polar_night_has_no_day_transition() {
    let resolver = PhaseScanResolver::default();
    let d = date(2024, 12, 21);
    assert_eq!(
        resolver.resolve(GeoCoordinate::new(80.0, 0.0), d),
        Err(ResolveError::NoDayPhase { date: d })
    );
}

#[test]
fn test_sunset_after_utc_midnight_fails() {
    // California: sunset falls in the next UTC day.
    let resolver = PhaseScanResolver::default();
    let d = date(2024, 6, 21);
    assert_eq!(
        resolver.resolve(GeoCoordinate::new(40.0, -120.0), d),
        Err(ResolveError::NoTransitionAfterSunrise { date: d })
    );
}

#[test]
fn test_non_finite_coordinate_fails() {
    let resolver = PhaseScanResolver::default();
    let d = date(2024, 1, 1);
    assert_eq!(
        resolver.resolve(GeoCoordinate::new(f64::NAN, 0.0), d),
        Err(ResolveError::NonFiniteAltitude { date: d })
    );
}

#[test]
fn test_resolver_by_reference() {
    fn via_trait<R: SolarEventResolver>(r: R) -> SolarEventPair {
        r.resolve(GeoCoordinate::new(0.0, 0.0), NaiveDate::from_ymd_opt(2024, 3, 20).unwrap())
            .unwrap()
    }
    let resolver = PhaseScanResolver::default();
    assert_eq!(via_trait(&resolver), via_trait(resolver));
}
