use chrono::{Datelike, Days, NaiveDate};
use tracing::{debug, info};

use crate::ephemeris::is_leap_year;
use crate::error::LutError;
use crate::resolver::SolarEventResolver;
use crate::types::{
    ClockTime, DayEntry, EncodedRow, Encoding, LookupTable, SolarEventPair, TableConfig,
    DAYS_IN_TABLE, LEAP_DAY_INDEX, MINUTES_PER_DAY,
};

pub const GENERATOR_NAME: &str = "sunrise-sunset-lut";
pub const TABLE_NAME: &str = "SunriseSunsetLUT";
const ROW_INDENT: &str = "    ";

impl Encoding {
    pub fn encode(self, time: ClockTime) -> Result<u16, LutError> {
        let minutes = time.minutes_from_midnight();
        let value = minutes / self.minutes_per_unit();
        if value > self.max_value() {
            return Err(LutError::ValueOutOfRange {
                encoding: self,
                minutes,
                value,
                max: self.max_value(),
            });
        }
        Ok(value)
    }

    pub fn decode_minutes(self, value: u16) -> u32 {
        u32::from(value) * u32::from(self.minutes_per_unit())
    }

    /// Start of the quantization bucket `value` falls in, wrapped at midnight.
    pub fn decode(self, value: u16) -> ClockTime {
        let minutes = self.decode_minutes(value) % u32::from(MINUTES_PER_DAY);
        ClockTime::from_minutes(minutes as u16)
    }

    pub fn encode_pair(self, events: &SolarEventPair) -> Result<EncodedRow, LutError> {
        Ok(EncodedRow {
            sunrise: self.encode(events.sunrise)?,
            sunset: self.encode(events.sunset)?,
        })
    }

    pub fn decode_row(self, row: EncodedRow) -> SolarEventPair {
        SolarEventPair {
            sunrise: self.decode(row.sunrise),
            sunset: self.decode(row.sunset),
        }
    }
}

pub fn reference_date(year: i32, day_index: u16) -> Result<NaiveDate, LutError> {
    let out_of_range = LutError::DayOutOfRange {
        year,
        index: day_index,
    };
    let date = NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|jan1| jan1.checked_add_days(Days::new(u64::from(day_index))))
        .ok_or_else(|| out_of_range.clone())?;
    if date.year() != year {
        return Err(out_of_range);
    }
    Ok(date)
}

/// Table row holding `date` for firmware running in `date`'s own year.
/// Non-leap years skip the February 29th row.
pub fn table_index(date: NaiveDate) -> usize {
    let ordinal = date.ordinal0() as usize;
    if !is_leap_year(date.year()) && ordinal >= usize::from(LEAP_DAY_INDEX) {
        ordinal + 1
    } else {
        ordinal
    }
}

pub fn generate_table<R>(config: &TableConfig, resolver: &R) -> Result<LookupTable, LutError>
where
    R: SolarEventResolver + ?Sized,
{
    if !is_leap_year(config.year) {
        return Err(LutError::NotLeapYear { year: config.year });
    }

    info!(
        latitude = config.latitude,
        longitude = config.longitude,
        year = config.year,
        encoding = %config.encoding,
        "generating sunrise/sunset table"
    );

    let coordinate = config.coordinate();
    let mut days = Vec::with_capacity(DAYS_IN_TABLE);
    for day_index in 0..DAYS_IN_TABLE as u16 {
        let date = reference_date(config.year, day_index)?;
        let events = resolver
            .resolve(coordinate, date)
            .map_err(|source| LutError::Resolve {
                day: day_index + 1,
                source,
            })?;
        let row = config.encoding.encode_pair(&events)?;
        debug!(
            day = day_index + 1,
            %date,
            sunrise = %events.sunrise,
            sunset = %events.sunset,
            "resolved day"
        );
        days.push(DayEntry {
            day_index,
            date,
            events,
            row,
        });
    }

    info!(rows = days.len(), "table complete");
    Ok(LookupTable {
        config: *config,
        days,
    })
}

impl LookupTable {
    pub fn rows(&self) -> impl Iterator<Item = EncodedRow> + '_ {
        self.days.iter().map(|d| d.row)
    }

    /// Decoded sunrise/sunset for a calendar date, as firmware would read it.
    pub fn lookup(&self, date: NaiveDate) -> Option<SolarEventPair> {
        let day = self.days.get(table_index(date))?;
        Some(self.config.encoding.decode_row(day.row))
    }
}

/// Shortest round-trip decimal form, always with a fractional part.
pub fn format_coordinate(value: f64) -> String {
    format!("{value:?}")
}

pub fn format_element(day_number: u16, row: EncodedRow, encoding: Encoding) -> String {
    let width = encoding.hex_digits();
    format!(
        "/* Day {day_number:03} */ {{ 0x{:0width$X}, 0x{:0width$X} }}",
        row.sunrise, row.sunset
    )
}

/// Lays elements out `per_line` to a line, comma separated, with no
/// trailing comma after the last one.
pub fn join_elements(elements: &[String], per_line: usize) -> String {
    let separator = format!(",\n{ROW_INDENT}");
    elements
        .chunks(per_line.max(1))
        .map(|line| line.join(", "))
        .collect::<Vec<_>>()
        .join(&separator)
}

pub fn render_preamble(config: &TableConfig) -> String {
    let mut out = String::new();
    out.push_str("#include \"Clock.h\"\n");
    out.push_str("#include <stdint.h>\n");
    out.push_str(&format!(
        "// Sunrise-sunset LUT for latitude={}, longitude={}.\n",
        format_coordinate(config.latitude),
        format_coordinate(config.longitude)
    ));
    out.push_str(&format!("// Made by {GENERATOR_NAME}.\n"));
    out.push_str(
        "// First value is the sunrise, second is the sunset, \
         both measured in minutes from midnight, in UTC.\n",
    );
    out.push_str(&format!(
        "// During non-leap years, February 29th (index={LEAP_DAY_INDEX}) must be skipped, \
         all subsequent indices must be offset by 1.\n"
    ));
    out
}

pub fn render_table(table: &LookupTable) -> String {
    let encoding = table.config.encoding;
    let elements: Vec<String> = table
        .days
        .iter()
        .map(|day| format_element(day.day_index + 1, day.row, encoding))
        .collect();

    let mut out = render_preamble(&table.config);
    out.push_str(&format!(
        "const {} {TABLE_NAME}[{DAYS_IN_TABLE}][2] = {{\n{ROW_INDENT}",
        encoding.c_type()
    ));
    out.push_str(&join_elements(&elements, encoding.elements_per_line()));
    out.push_str("\n};\n");
    out
}
