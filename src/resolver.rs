use chrono::NaiveDate;
use tracing::trace;

use crate::ephemeris;
use crate::error::ResolveError;
use crate::types::{
    ClockTime, DayPhase, GeoCoordinate, PhaseScanConfig, PhaseTransition, SolarEventPair,
};

pub const SECONDS_PER_DAY: f64 = 86_400.0;
const MIN_TOLERANCE_SECONDS: f64 = 1e-6;

/// Upper-limb sunrise altitude: 34' refraction plus 16' semidiameter.
pub const SUNRISE_ALTITUDE: f64 = -50.0 / 60.0;
pub const CIVIL_TWILIGHT_ALTITUDE: f64 = -6.0;
pub const NAUTICAL_TWILIGHT_ALTITUDE: f64 = -12.0;
pub const ASTRONOMICAL_TWILIGHT_ALTITUDE: f64 = -18.0;

impl DayPhase {
    pub fn classify(altitude: f64) -> DayPhase {
        if altitude >= SUNRISE_ALTITUDE {
            DayPhase::Day
        } else if altitude >= CIVIL_TWILIGHT_ALTITUDE {
            DayPhase::Civil
        } else if altitude >= NAUTICAL_TWILIGHT_ALTITUDE {
            DayPhase::Nautical
        } else if altitude >= ASTRONOMICAL_TWILIGHT_ALTITUDE {
            DayPhase::Astronomical
        } else {
            DayPhase::Night
        }
    }
}

/// Source of per-day UTC sunrise/sunset times.
pub trait SolarEventResolver {
    fn resolve(
        &self,
        coordinate: GeoCoordinate,
        date: NaiveDate,
    ) -> Result<SolarEventPair, ResolveError>;
}

/// Resolves sunrise/sunset by scanning the discretized day phase over the
/// UTC day and taking the first transition into [`DayPhase::Day`] and the
/// transition that follows it.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhaseScanResolver {
    config: PhaseScanConfig,
}

impl PhaseScanResolver {
    pub fn new(config: PhaseScanConfig) -> Self {
        Self { config }
    }

    /// All phase transitions in `[00:00, 24:00]` UTC of `date`, in time order.
    pub fn phase_transitions(
        &self,
        coordinate: GeoCoordinate,
        date: NaiveDate,
    ) -> Result<Vec<PhaseTransition>, ResolveError> {
        let midnight = ephemeris::julian_day_at_midnight(date);
        let phase_at = |seconds: f64| -> Result<DayPhase, ResolveError> {
            let julian_day = midnight + seconds / SECONDS_PER_DAY;
            let altitude = ephemeris::solar_altitude_at(coordinate, julian_day);
            if !altitude.is_finite() {
                return Err(ResolveError::NonFiniteAltitude { date });
            }
            Ok(DayPhase::classify(altitude))
        };

        let step = self.config.step_seconds.max(1.0);
        let n_steps = (SECONDS_PER_DAY / step).ceil() as usize;
        let mut transitions = Vec::new();

        let mut lo = 0.0;
        let mut lo_phase = phase_at(lo)?;
        for k in 1..=n_steps {
            let hi = (k as f64 * step).min(SECONDS_PER_DAY);
            let hi_phase = phase_at(hi)?;
            // A single step may cross more than one threshold.
            while hi_phase != lo_phase {
                let transition = self.refine(lo, lo_phase, hi, hi_phase, &phase_at)?;
                trace!(
                    %date,
                    seconds = transition.seconds_from_midnight,
                    phase = ?transition.phase,
                    "phase transition"
                );
                transitions.push(transition);
                lo = transition.seconds_from_midnight;
                lo_phase = transition.phase;
            }
            lo = hi;
            lo_phase = hi_phase;
        }

        Ok(transitions)
    }

    /// Bisects a bracket whose endpoints differ in phase down to the
    /// configured tolerance, never finer than a microsecond.
    fn refine<F>(
        &self,
        mut lo: f64,
        lo_phase: DayPhase,
        mut hi: f64,
        mut hi_phase: DayPhase,
        phase_at: &F,
    ) -> Result<PhaseTransition, ResolveError>
    where
        F: Fn(f64) -> Result<DayPhase, ResolveError>,
    {
        let tolerance = self.config.tolerance_seconds.max(MIN_TOLERANCE_SECONDS);
        while hi - lo > tolerance {
            let mid = 0.5 * (lo + hi);
            let mid_phase = phase_at(mid)?;
            if mid_phase == lo_phase {
                lo = mid;
            } else {
                hi = mid;
                hi_phase = mid_phase;
            }
        }
        Ok(PhaseTransition {
            seconds_from_midnight: hi,
            phase: hi_phase,
        })
    }
}

impl SolarEventResolver for PhaseScanResolver {
    fn resolve(
        &self,
        coordinate: GeoCoordinate,
        date: NaiveDate,
    ) -> Result<SolarEventPair, ResolveError> {
        let transitions = self.phase_transitions(coordinate, date)?;
        let sunrise_idx = transitions
            .iter()
            .position(|t| t.phase == DayPhase::Day)
            .ok_or(ResolveError::NoDayPhase { date })?;
        let sunset = transitions
            .get(sunrise_idx + 1)
            .ok_or(ResolveError::NoTransitionAfterSunrise { date })?;

        Ok(SolarEventPair {
            sunrise: truncate_to_minute(transitions[sunrise_idx].seconds_from_midnight),
            sunset: truncate_to_minute(sunset.seconds_from_midnight),
        })
    }
}

impl<R: SolarEventResolver + ?Sized> SolarEventResolver for &R {
    fn resolve(
        &self,
        coordinate: GeoCoordinate,
        date: NaiveDate,
    ) -> Result<SolarEventPair, ResolveError> {
        (**self).resolve(coordinate, date)
    }
}

/// Clock time of an instant given in seconds after midnight. The next
/// midnight wraps to 00:00.
pub fn truncate_to_minute(seconds_from_midnight: f64) -> ClockTime {
    let whole_minutes = (seconds_from_midnight / 60.0).floor() as i64;
    ClockTime::from_minutes(whole_minutes.rem_euclid(1440) as u16)
}
