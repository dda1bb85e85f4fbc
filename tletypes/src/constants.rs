//! Physical and calendar constants shared by the codec and the propagators.
//!
//! Values are kept bit-identical to the published reference implementations;
//! changing any of them shifts reference propagation results.

use std::f64::consts::PI;

pub const TWO_PI: f64 = 2.0 * PI;

pub const MINUTES_PER_DAY: f64 = 1440.0;
pub const MINUTES_PER_DAY_SQUARED: f64 = MINUTES_PER_DAY * MINUTES_PER_DAY;
pub const MINUTES_PER_DAY_CUBED: f64 = MINUTES_PER_DAY_SQUARED * MINUTES_PER_DAY;
pub const SECONDS_PER_MINUTE: f64 = 60.0;
pub const SECONDS_PER_DAY: f64 = 86400.0;
pub const METERS_PER_KM: f64 = 1000.0;

/// Julian date of 2000 January 1.5 TT
pub const J2000: f64 = 2451545.0;

/// Julian date of 1900 January 0.0, the origin of TLE epochs
pub const JD_1900_JAN_0: f64 = 2415019.5;

/// Julian date of the unix epoch, 1970-01-01T00:00:00Z
pub const JD_UNIX_EPOCH: f64 = 2440587.5;

pub const DAYS_PER_JULIAN_CENTURY: f64 = 36525.0;

/// Two-digit TLE years below this are in the 2000s
pub const TLE_YEAR_PIVOT: u32 = 57;

/// Astronomical unit, [m]
pub const AU_IN_METERS: f64 = 1.495978707e11;

/// Gravitational parameters, [m^3/s^2]
pub const GM_EARTH: f64 = 3.9860044e14;
pub const GM_SUN: f64 = 1.3271243994e20;
pub const GM_MOON: f64 = 4.902798e12;

/// Mean obliquity of the ecliptic at J2000
pub const SIN_OBLIQ_2000: f64 = 0.397777155931913701597179975942380896684;
pub const COS_OBLIQ_2000: f64 = 0.917482062069181825744000384639406458043;

/// Ephemeris type marking a record that carries a state vector
/// instead of mean elements
pub const EPHEMERIS_TYPE_HIGH_ORBIT: char = 'H';

/// Ephemeris type written for ordinary mean element sets
pub const EPHEMERIS_TYPE_DEFAULT: char = '0';

/// Orbits with a period at or above this use the deep-space model, [min]
pub const DEEP_SPACE_PERIOD_MINUTES: f64 = 225.0;
