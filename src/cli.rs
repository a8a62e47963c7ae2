use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use sunrise_sunset_lut::{Encoding, GeoCoordinate, TableConfig, REFERENCE_YEAR};

/// Sunrise/sunset lookup table generator for the LED timer firmware.
#[derive(Parser, Debug)]
#[command(
    name = "sunrise-sunset-lut",
    version,
    about = "Generate a C sunrise/sunset lookup table for a fixed location"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Latitude in degrees, positive for North, negative for South.
    #[arg(long, value_name = "DECIMAL", allow_hyphen_values = true)]
    pub latitude: Option<String>,

    /// Longitude in degrees, positive for East, negative for West.
    #[arg(long, value_name = "DECIMAL", allow_hyphen_values = true)]
    pub longitude: Option<String>,

    /// Table value encoding.
    #[arg(long, value_enum, default_value_t = EncodingArg::Coarse)]
    pub encoding: EncodingArg,

    /// Reference year; must be a leap year so the table has 366 rows.
    #[arg(long, default_value_t = REFERENCE_YEAR)]
    pub year: i32,

    /// Write the table to a file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EncodingArg {
    /// 6-minute units in uint8_t, 2 bytes per day.
    Coarse,
    /// Whole minutes in uint16_t, 4 bytes per day.
    Fine,
}

impl From<EncodingArg> for Encoding {
    fn from(arg: EncodingArg) -> Self {
        match arg {
            EncodingArg::Coarse => Encoding::Coarse,
            EncodingArg::Fine => Encoding::Fine,
        }
    }
}

impl Cli {
    pub fn table_config(&self, coordinate: GeoCoordinate) -> TableConfig {
        TableConfig {
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
            year: self.year,
            encoding: self.encoding.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("--{0} is mandatory")]
    Missing(&'static str),

    #[error("Latitude and longitude must be valid decimal numbers")]
    InvalidDecimal,
}

/// Checks presence first (latitude, then longitude), then parses both.
pub fn validate(
    latitude: Option<&str>,
    longitude: Option<&str>,
) -> Result<GeoCoordinate, InputError> {
    let latitude = latitude.ok_or(InputError::Missing("latitude"))?;
    let longitude = longitude.ok_or(InputError::Missing("longitude"))?;

    match (parse_decimal(latitude), parse_decimal(longitude)) {
        (Some(lat), Some(lon)) => Ok(GeoCoordinate::new(lat, lon)),
        _ => Err(InputError::InvalidDecimal),
    }
}

fn parse_decimal(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
