pub mod ephemeris;
pub mod error;
pub mod lookup_table;
pub mod resolver;
pub mod types;

pub use ephemeris::{
    equation_of_time, hour_angle, is_leap_year, julian_century, julian_day,
    julian_day_at_midnight, solar_altitude, solar_altitude_at, solar_declination,
    solar_zenith_angle,
};

pub use error::{LutError, ResolveError};

pub use lookup_table::{
    format_coordinate, format_element, generate_table, join_elements, reference_date,
    render_preamble, render_table, table_index, GENERATOR_NAME, TABLE_NAME,
};

pub use resolver::{truncate_to_minute, PhaseScanResolver, SolarEventResolver};

pub use types::{
    ClockTime, DayEntry, DayPhase, EncodedRow, Encoding, GeoCoordinate, LookupTable,
    PhaseScanConfig, PhaseTransition, SolarEventPair, TableConfig, DAYS_IN_TABLE,
    LEAP_DAY_INDEX, MINUTES_PER_DAY, REFERENCE_YEAR,
};
