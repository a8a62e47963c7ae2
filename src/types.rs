use std::fmt;

use chrono::NaiveDate;

pub const REFERENCE_YEAR: i32 = 2024;
pub const DAYS_IN_TABLE: usize = 366;
pub const MINUTES_PER_DAY: u16 = 1440;
/// Table row reserved for February 29th.
pub const LEAP_DAY_INDEX: u16 = 59;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// UTC time of day truncated to whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    pub hour: u8,
    pub minute: u8,
}

impl ClockTime {
    pub fn new(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }

    /// Wraps at midnight, so 1440 becomes 00:00.
    pub fn from_minutes(minutes: u16) -> Self {
        let minutes = minutes % MINUTES_PER_DAY;
        Self {
            hour: (minutes / 60) as u8,
            minute: (minutes % 60) as u8,
        }
    }

    pub fn minutes_from_midnight(self) -> u16 {
        u16::from(self.hour) * 60 + u16::from(self.minute)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolarEventPair {
    pub sunrise: ClockTime,
    pub sunset: ClockTime,
}

/// Discretized solar altitude classes, ordered from darkest to full daylight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DayPhase {
    Night = 0,
    Astronomical = 1,
    Nautical = 2,
    Civil = 3,
    Day = 4,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseTransition {
    pub seconds_from_midnight: f64,
    /// Phase entered at this instant.
    pub phase: DayPhase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Encoding {
    /// 6-minute buckets stored as `uint8_t`.
    #[default]
    Coarse,
    /// Whole minutes stored as `uint16_t`.
    Fine,
}

impl Encoding {
    pub fn c_type(self) -> &'static str {
        match self {
            Encoding::Coarse => "uint8_t",
            Encoding::Fine => "uint16_t",
        }
    }

    pub fn hex_digits(self) -> usize {
        match self {
            Encoding::Coarse => 2,
            Encoding::Fine => 4,
        }
    }

    pub fn minutes_per_unit(self) -> u16 {
        match self {
            Encoding::Coarse => 6,
            Encoding::Fine => 1,
        }
    }

    pub fn max_value(self) -> u16 {
        match self {
            Encoding::Coarse => u16::from(u8::MAX),
            Encoding::Fine => MINUTES_PER_DAY - 1,
        }
    }

    pub fn elements_per_line(self) -> usize {
        match self {
            Encoding::Coarse => 2,
            Encoding::Fine => 4,
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Coarse => f.write_str("coarse"),
            Encoding::Fine => f.write_str("fine"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedRow {
    pub sunrise: u16,
    pub sunset: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayEntry {
    pub day_index: u16,
    pub date: NaiveDate,
    pub events: SolarEventPair,
    pub row: EncodedRow,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    pub latitude: f64,
    pub longitude: f64,
    pub year: i32,
    pub encoding: Encoding,
}

impl TableConfig {
    pub fn coordinate(&self) -> GeoCoordinate {
        GeoCoordinate::new(self.latitude, self.longitude)
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            latitude: 0.0,
            longitude: 0.0,
            year: REFERENCE_YEAR,
            encoding: Encoding::Coarse,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LookupTable {
    pub config: TableConfig,
    pub days: Vec<DayEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseScanConfig {
    pub step_seconds: f64,
    pub tolerance_seconds: f64,
}

impl Default for PhaseScanConfig {
    fn default() -> Self {
        Self {
            step_seconds: 300.0,
            tolerance_seconds: 0.001,
        }
    }
}
