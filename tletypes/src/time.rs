//! Julian date helpers

use crate::constants::{DAYS_PER_JULIAN_CENTURY, J2000, JD_UNIX_EPOCH, SECONDS_PER_DAY, TWO_PI};
use chrono::prelude::*;

pub type UtcTimestamp = DateTime<Utc>;

pub fn julian_date(t: &UtcTimestamp) -> f64 {
    let secs = t.timestamp() as f64 + f64::from(t.timestamp_subsec_nanos()) * 1e-9;
    JD_UNIX_EPOCH + secs / SECONDS_PER_DAY
}

/// Nearest nanosecond-resolution timestamp, `None` for non-finite or
/// out of range dates
pub fn from_julian_date(jd: f64) -> Option<UtcTimestamp> {
    if !jd.is_finite() {
        return None;
    }
    let secs = (jd - JD_UNIX_EPOCH) * SECONDS_PER_DAY;
    let mut whole = secs.floor();
    let mut nanos = ((secs - whole) * 1e9).round();
    if nanos >= 1e9 {
        whole += 1.0;
        nanos = 0.0;
    }
    if whole < i64::MIN as f64 || whole > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp(whole as i64, nanos as u32)
}

/// Greenwich mean sidereal time (IAU-82), [rad] in 0..2pi
pub fn greenwich_sidereal_time(jd_ut1: f64) -> f64 {
    let tut1 = (jd_ut1 - J2000) / DAYS_PER_JULIAN_CENTURY;
    let seconds = -6.2e-6 * tut1 * tut1 * tut1
        + 0.093104 * tut1 * tut1
        + (876600.0 * 3600.0 + 8640184.812866) * tut1
        + 67310.54841;
    // 240 seconds of time per degree
    let gst = (seconds.to_radians() / 240.0) % TWO_PI;
    if gst < 0.0 {
        gst + TWO_PI
    } else {
        gst
    }
}
