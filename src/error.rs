//! Error types for table generation.

use chrono::NaiveDate;

use crate::types::Encoding;

/// Failure to derive sunrise/sunset for a single UTC date.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolveError {
    /// The Sun never enters the day phase during the date (polar night, or
    /// the whole window is already daylight).
    #[error("no transition into daylight on {date}")]
    NoDayPhase { date: NaiveDate },

    /// Sunrise was found but the window ends before the next transition.
    #[error("no transition after sunrise on {date}")]
    NoTransitionAfterSunrise { date: NaiveDate },

    #[error("solar altitude is not finite on {date}")]
    NonFiniteAltitude { date: NaiveDate },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LutError {
    #[error("reference year {year} is not a leap year")]
    NotLeapYear { year: i32 },

    #[error("day index {index} is outside the reference year {year}")]
    DayOutOfRange { year: i32, index: u16 },

    /// The encoded value does not fit the table's integer width.
    #[error("{encoding} value {value} for {minutes} minutes exceeds {max}")]
    ValueOutOfRange {
        encoding: Encoding,
        minutes: u16,
        value: u16,
        max: u16,
    },

    #[error("could not resolve day {day:03}")]
    Resolve {
        day: u16,
        #[source]
        source: ResolveError,
    },
}
