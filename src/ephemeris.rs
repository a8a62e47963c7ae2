//! Low-precision solar position model.
//!
//! Series terms follow the NOAA solar calculator (Meeus, *Astronomical
//! Algorithms*, ch. 25), accurate to about a minute in sunrise/sunset for
//! years 1900-2100. Altitudes are geometric, for the centre of the Sun.

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};

use crate::types::GeoCoordinate;

pub const J2000_JULIAN_DAY: f64 = 2_451_545.0;
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;
/// Offset from `num_days_from_ce` (0001-01-01 is day 1) to a midnight Julian day.
const CE_EPOCH_JULIAN_DAY: f64 = 1_721_424.5;
pub const DEGREES_PER_MINUTE_OF_TIME: f64 = 0.25;

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * (std::f64::consts::PI / 180.0)
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * (180.0 / std::f64::consts::PI)
}

pub fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 400 == 0) || (year % 4 == 0 && year % 100 != 0)
}

/// Julian day at 00:00 UTC of `date`.
pub fn julian_day_at_midnight(date: NaiveDate) -> f64 {
    f64::from(date.num_days_from_ce()) + CE_EPOCH_JULIAN_DAY
}

pub fn julian_day(instant: &DateTime<Utc>) -> f64 {
    let midnight = julian_day_at_midnight(instant.date_naive());
    let seconds = f64::from(instant.num_seconds_from_midnight())
        + f64::from(instant.nanosecond()) / 1e9;
    midnight + seconds / 86_400.0
}

pub fn julian_century(julian_day: f64) -> f64 {
    (julian_day - J2000_JULIAN_DAY) / DAYS_PER_JULIAN_CENTURY
}

pub fn geometric_mean_longitude(t: f64) -> f64 {
    normalize_angle(280.46646 + t * (36_000.76983 + t * 0.0003032))
}

pub fn geometric_mean_anomaly(t: f64) -> f64 {
    357.52911 + t * (35_999.05029 - 0.0001537 * t)
}

pub fn orbit_eccentricity(t: f64) -> f64 {
    0.016708634 - t * (0.000042037 + 0.0000001267 * t)
}

pub fn equation_of_center(t: f64) -> f64 {
    let m = deg_to_rad(geometric_mean_anomaly(t));
    m.sin() * (1.914602 - t * (0.004817 + 0.000014 * t))
        + (2.0 * m).sin() * (0.019993 - 0.000101 * t)
        + (3.0 * m).sin() * 0.000289
}

fn nutation_node(t: f64) -> f64 {
    deg_to_rad(125.04 - 1934.136 * t)
}

pub fn apparent_longitude(t: f64) -> f64 {
    let true_longitude = geometric_mean_longitude(t) + equation_of_center(t);
    true_longitude - 0.00569 - 0.00478 * nutation_node(t).sin()
}

pub fn obliquity_correction(t: f64) -> f64 {
    let seconds = 21.448 - t * (46.815 + t * (0.00059 - t * 0.001813));
    let mean_obliquity = 23.0 + (26.0 + seconds / 60.0) / 60.0;
    mean_obliquity + 0.00256 * nutation_node(t).cos()
}

/// Declination in degrees for Julian century `t`.
pub fn solar_declination(t: f64) -> f64 {
    let epsilon = deg_to_rad(obliquity_correction(t));
    let lambda = deg_to_rad(apparent_longitude(t));
    rad_to_deg((epsilon.sin() * lambda.sin()).asin())
}

/// Equation of time in minutes for Julian century `t`.
pub fn equation_of_time(t: f64) -> f64 {
    let epsilon = deg_to_rad(obliquity_correction(t));
    let l0 = deg_to_rad(geometric_mean_longitude(t));
    let m = deg_to_rad(geometric_mean_anomaly(t));
    let e = orbit_eccentricity(t);
    let y = (epsilon / 2.0).tan().powi(2);

    let radians = y * (2.0 * l0).sin() - 2.0 * e * m.sin()
        + 4.0 * e * y * m.sin() * (2.0 * l0).cos()
        - 0.5 * y * y * (4.0 * l0).sin()
        - 1.25 * e * e * (2.0 * m).sin();
    4.0 * rad_to_deg(radians)
}

/// Hour angle in degrees, negative before local solar noon.
pub fn hour_angle(utc_minutes: f64, longitude: f64, equation_of_time: f64) -> f64 {
    let true_solar_minutes = (utc_minutes + equation_of_time + 4.0 * longitude).rem_euclid(1440.0);
    true_solar_minutes * DEGREES_PER_MINUTE_OF_TIME - 180.0
}

/// Angle between the local vertical and the Sun, from `atan2` of the cross
/// and dot products of the two unit vectors so it stays exact near 0 and 180.
pub fn solar_zenith_angle(latitude: f64, declination: f64, hour_angle: f64) -> f64 {
    let (sin_lat, cos_lat) = deg_to_rad(latitude).sin_cos();
    let (sin_dec, cos_dec) = deg_to_rad(declination).sin_cos();
    let (sin_ha, cos_ha) = deg_to_rad(hour_angle).sin_cos();

    let cos_zenith = sin_lat * sin_dec + cos_lat * cos_dec * cos_ha;
    let cross_x = -sin_lat * cos_dec * sin_ha;
    let cross_y = sin_lat * cos_dec * cos_ha - cos_lat * sin_dec;
    let cross_z = cos_lat * cos_dec * sin_ha;
    let sin_zenith = cross_x.hypot(cross_y).hypot(cross_z);
    rad_to_deg(sin_zenith.atan2(cos_zenith))
}

pub fn solar_altitude_at(coordinate: GeoCoordinate, julian_day: f64) -> f64 {
    let t = julian_century(julian_day);
    let utc_minutes = (julian_day + 0.5).rem_euclid(1.0) * 1440.0;
    let ha = hour_angle(utc_minutes, coordinate.longitude, equation_of_time(t));
    90.0 - solar_zenith_angle(coordinate.latitude, solar_declination(t), ha)
}

pub fn solar_altitude(coordinate: GeoCoordinate, instant: &DateTime<Utc>) -> f64 {
    solar_altitude_at(coordinate, julian_day(instant))
}
