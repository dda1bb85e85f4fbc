//! Fixed-width TLE field readers and writers
//!
//! Readers take exactly the characters of one field and return `None` when
//! the text is not shaped like that field. Writers produce exactly the
//! field width or report the value does not fit.

use crate::parser::{ParseError, Result};
use nom::bytes::complete::take;
use std::{f64::consts::PI, fmt};

/// Named TLE fields, used in error reports
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Field {
    CatalogNumber,
    Classification,
    InternationalDesignator,
    EpochYear,
    EpochDay,
    MeanMotionDot,
    MeanMotionDdot,
    Bstar,
    EphemerisType,
    BulletinNumber,
    Inclination,
    Raan,
    Eccentricity,
    ArgPerigee,
    MeanAnomaly,
    MeanMotion,
    RevolutionNumber,
    Position,
    Velocity,
    Epoch,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        use Field::*;
        match self {
            CatalogNumber => "catalog number",
            Classification => "classification",
            InternationalDesignator => "international designator",
            EpochYear => "epoch year",
            EpochDay => "epoch day",
            MeanMotionDot => "mean motion first derivative",
            MeanMotionDdot => "mean motion second derivative",
            Bstar => "B*",
            EphemerisType => "ephemeris type",
            BulletinNumber => "bulletin number",
            Inclination => "inclination",
            Raan => "right ascension of ascending node",
            Eccentricity => "eccentricity",
            ArgPerigee => "argument of perigee",
            MeanAnomaly => "mean anomaly",
            MeanMotion => "mean motion",
            RevolutionNumber => "revolution number",
            Position => "position",
            Velocity => "velocity",
            Epoch => "epoch",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Angle fields are read as integers in units of 1e-4 degree
const ANGLE_UNIT: f64 = PI / 180e4;

/// Range of the signed 8-digit base-36 field, exclusive
pub const HIGH_VALUE_LIMIT: i64 = 36_i64.pow(8);

/// Take `width` characters and run them through `read`, failing hard with
/// the field name when the text is malformed
pub(crate) fn field<'a, O, F>(
    width: usize,
    which: Field,
    read: F,
) -> impl FnMut(&'a str) -> Result<&'a str, O>
where
    F: Fn(&'a str) -> Option<O>,
{
    move |s: &'a str| {
        let (s, text) = take(width)(s)?;
        match read(text) {
            Some(v) => Ok((s, v)),
            None => Err(nom::Err::Failure(ParseError::Field(which))),
        }
    }
}

/// Skip a separator column, whatever it holds
pub(crate) fn gap(s: &str) -> Result<&str, &str> {
    take(1_usize)(s)
}

fn is_blank(s: &str) -> bool {
    s.bytes().all(|b| b == b' ')
}

/// Right-aligned unsigned integer, blank reads as zero
pub fn read_uint(s: &str) -> Option<u32> {
    let digits = s.trim_matches(' ');
    if digits.is_empty() {
        return Some(0);
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn read_digits_exact(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// "ddd.dddddddd" style field with the point after `int_width` characters,
/// combined as `int + frac * 1e-8`
pub fn read_eight_places(s: &str, int_width: usize) -> Option<f64> {
    let int = s.get(..int_width)?;
    let point = s.get(int_width..int_width + 1)?;
    let frac = s.get(int_width + 1..)?;
    if point != "." || frac.len() != 8 {
        return None;
    }
    let int = read_uint(int)?;
    let frac = read_digits_exact(frac)?;
    Some(f64::from(int) + f64::from(frac) * 1e-8)
}

/// "ddd.dddd" angle, [rad]
pub fn read_angle(s: &str) -> Option<f64> {
    let units = read_eight_places_units(s)?;
    Some(f64::from(units) * ANGLE_UNIT)
}

fn read_eight_places_units(s: &str) -> Option<u32> {
    if s.len() != 8 || !s.is_ascii() || s.as_bytes()[3] != b'.' {
        return None;
    }
    let int = read_uint(&s[..3])?;
    let frac = read_digits_exact(&s[4..])?;
    Some(int * 10_000 + frac)
}

/// Seven digits with an implied leading decimal point
pub fn read_eccentricity(s: &str) -> Option<f64> {
    if s.len() != 7 {
        return None;
    }
    Some(f64::from(read_uint(s)?) * 1e-7)
}

/// First derivative of mean motion "s.dddddddd", [rev/day^2]
pub fn read_ndot(s: &str) -> Option<f64> {
    let b = s.as_bytes();
    if b.len() != 10 || !s.is_ascii() || b[1] != b'.' {
        return None;
    }
    let negative = match b[0] {
        b'-' => true,
        b' ' | b'+' | b'0' => false,
        _ => return None,
    };
    let v = f64::from(read_digits_exact(&s[2..])?) * 1e-8;
    Some(if negative { -v } else { v })
}

/// Packed exponential "sddddd±e" with an implied leading decimal point.
/// A blank mantissa reads as zero.
pub fn read_sci(s: &str) -> Option<f64> {
    let b = s.as_bytes();
    if b.len() != 8 || !s.is_ascii() {
        return None;
    }
    if b[1] == b' ' {
        return is_blank(&s[1..6]).then_some(0.0);
    }
    let negative = match b[0] {
        b'-' => true,
        b' ' | b'+' => false,
        _ => return None,
    };
    let mantissa = read_digits_exact(&s[1..6])?;
    let exp_negative = match b[6] {
        b'-' => true,
        b'+' | b' ' => false,
        _ => return None,
    };
    if !b[7].is_ascii_digit() {
        return None;
    }
    let mut v = f64::from(mantissa) * 1e-5;
    if negative {
        v = -v;
    }
    // Exponent is applied by repeated scaling to keep historical results
    for _ in 0..(b[7] - b'0') {
        if exp_negative {
            v *= 0.1;
        } else {
            v *= 10.0;
        }
    }
    Some(v)
}

fn base36_digit(b: u8) -> Option<i64> {
    match b {
        b'0'..=b'9' => Some(i64::from(b - b'0')),
        b'A'..=b'Z' => Some(i64::from(b - b'A') + 10),
        _ => None,
    }
}

/// Signed 8-digit base-36 integer "s########"
pub fn read_high_value(s: &str) -> Option<f64> {
    let b = s.as_bytes();
    if b.len() != 9 {
        return None;
    }
    let negative = match b[0] {
        b'-' => true,
        b'+' => false,
        _ => return None,
    };
    let mut v: i64 = 0;
    for &c in &b[1..] {
        v = v * 36 + base36_digit(c)?;
    }
    let v = if negative { -v } else { v };
    Some(v as f64)
}

/// Values are rounded to the field resolution; `None` when the rounded
/// value needs more digits than the field has
pub fn write_eight_places(v: f64, int_width: usize, zero_pad: bool) -> Option<String> {
    if !v.is_finite() || v < 0.0 {
        return None;
    }
    let units = (v * 1e8).round() as u64;
    let int = units / 100_000_000;
    let frac = units % 100_000_000;
    let s = if zero_pad {
        format!("{int:0int_width$}.{frac:08}")
    } else {
        format!("{int:int_width$}.{frac:08}")
    };
    (s.len() == int_width + 9).then_some(s)
}

/// Angle written as "ddd.dddd" after wrapping into [0, 360) degrees
pub fn write_angle(rad: f64) -> Option<String> {
    if !rad.is_finite() {
        return None;
    }
    let deg = rad.to_degrees().rem_euclid(360.0);
    let mut units = (deg * 1e4).round() as u32;
    if units >= 3_600_000 {
        units -= 3_600_000;
    }
    Some(format!("{:3}.{:04}", units / 10_000, units % 10_000))
}

pub fn write_eccentricity(e: f64) -> Option<String> {
    if !(0.0..1.0).contains(&e) {
        return None;
    }
    let units = (e * 1e7).round() as u32;
    (units < 10_000_000).then(|| format!("{units:07}"))
}

/// Inverse of [`read_ndot`], input in [rev/day^2]
pub fn write_ndot(v: f64) -> Option<String> {
    if !v.is_finite() {
        return None;
    }
    let units = (v.abs() * 1e8).round() as u64;
    if units >= 100_000_000 {
        return None;
    }
    let sign = if v < 0.0 && units > 0 { '-' } else { ' ' };
    Some(format!("{sign}.{units:08}"))
}

/// Inverse of [`read_sci`]. Magnitudes too small for a one-digit exponent
/// are written as zero.
pub fn write_sci(v: f64) -> Option<String> {
    const ZERO: &str = " 00000-0";

    if !v.is_finite() {
        return None;
    }
    if v == 0.0 {
        return Some(ZERO.to_owned());
    }
    let a = v.abs();
    let mut exp = a.log10().floor() as i32 + 1;
    let mut mantissa = (a / 10_f64.powi(exp) * 1e5).round() as u32;
    if mantissa >= 100_000 {
        mantissa /= 10;
        exp += 1;
    }
    if exp > 9 {
        return None;
    }
    if exp < -9 || mantissa == 0 {
        return Some(ZERO.to_owned());
    }
    let sign = if v < 0.0 { '-' } else { ' ' };
    let exp_sign = if exp < 0 { '-' } else { '+' };
    Some(format!("{sign}{mantissa:05}{exp_sign}{}", exp.abs()))
}

/// Inverse of [`read_high_value`]
pub fn write_high_value(v: f64) -> Option<String> {
    if !v.is_finite() {
        return None;
    }
    let r = v.round();
    if r.abs() >= HIGH_VALUE_LIMIT as f64 {
        return None;
    }
    let mut n = r.abs() as i64;
    let mut digits = [b'0'; 8];
    for d in digits.iter_mut().rev() {
        let rem = (n % 36) as u8;
        *d = if rem < 10 { b'0' + rem } else { b'A' + rem - 10 };
        n /= 36;
    }
    let sign = if r < 0.0 { '-' } else { '+' };
    Some(format!("{sign}{}", String::from_utf8_lossy(&digits)))
}

/// Unsigned integer right-aligned in `width` columns
pub fn write_uint(v: u32, width: usize) -> Option<String> {
    let s = format!("{v:width$}");
    (s.len() == width).then_some(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn uint_fields() {
        assert_eq!(read_uint(" 292"), Some(292));
        assert_eq!(read_uint("    "), Some(0));
        assert_eq!(read_uint("56353"), Some(56353));
        assert_eq!(read_uint(" 2 2"), None);
        assert_eq!(read_uint("12a4"), None);
        assert_eq!(write_uint(292, 4).as_deref(), Some(" 292"));
        assert_eq!(write_uint(10_000, 4), None);
    }

    #[test]
    fn eight_places() {
        assert_relative_eq!(
            read_eight_places("264.51782528", 3).unwrap(),
            264.51782528,
            epsilon = 1e-10
        );
        assert_relative_eq!(
            read_eight_places(" 15.72125391", 3).unwrap(),
            15.72125391,
            epsilon = 1e-10
        );
        assert_eq!(read_eight_places("264,51782528", 3), None);
        assert_eq!(read_eight_places("264.5178252 ", 3), None);

        assert_eq!(
            write_eight_places(8.5, 3, true).as_deref(),
            Some("008.50000000")
        );
        assert_eq!(
            write_eight_places(15.72125391, 2, false).as_deref(),
            Some("15.72125391")
        );
        assert_eq!(write_eight_places(100.0, 2, false), None);
    }

    #[test]
    fn angles() {
        assert_relative_eq!(
            read_angle(" 51.6416").unwrap(),
            51.6416_f64.to_radians(),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            read_angle("  2.3847").unwrap(),
            2.3847_f64.to_radians(),
            epsilon = 1e-12
        );
        assert_eq!(read_angle(" 51 6416"), None);
        assert_eq!(write_angle(51.6416_f64.to_radians()).as_deref(), Some(" 51.6416"));
        assert_eq!(write_angle(-90_f64.to_radians()).as_deref(), Some("270.0000"));
        assert_eq!(write_angle(359.99999_f64.to_radians()).as_deref(), Some("  0.0000"));
    }

    #[test]
    fn eccentricity() {
        assert_relative_eq!(read_eccentricity("0006703").unwrap(), 0.0006703);
        assert_eq!(read_eccentricity("000670"), None);
        assert_eq!(write_eccentricity(0.0006703).as_deref(), Some("0006703"));
        assert_eq!(write_eccentricity(1.0), None);
        assert_eq!(write_eccentricity(0.99999999), None);
    }

    #[test]
    fn ndot() {
        assert_relative_eq!(read_ndot("-.00002182").unwrap(), -2.182e-5, epsilon = 1e-15);
        assert_relative_eq!(read_ndot(" .00073094").unwrap(), 7.3094e-4, epsilon = 1e-15);
        assert_relative_eq!(read_ndot("0.00000076").unwrap(), 7.6e-7, epsilon = 1e-15);
        assert_eq!(read_ndot("x.00000076"), None);
        assert_eq!(write_ndot(-2.182e-5).as_deref(), Some("-.00002182"));
        assert_eq!(write_ndot(0.0).as_deref(), Some(" .00000000"));
        assert_eq!(write_ndot(1.5), None);
    }

    #[test]
    fn sci() {
        assert_relative_eq!(read_sci(" 13844-3").unwrap(), 0.13844e-3, epsilon = 1e-15);
        assert_relative_eq!(read_sci("-11606-4").unwrap(), -0.11606e-4, epsilon = 1e-15);
        assert_relative_eq!(read_sci(" 14311-1").unwrap(), 0.014311, epsilon = 1e-15);
        assert_relative_eq!(read_sci(" 50000+1").unwrap(), 5.0, epsilon = 1e-12);
        assert_eq!(read_sci(" 00000-0"), Some(0.0));
        assert_eq!(read_sci("        "), Some(0.0));
        assert_eq!(read_sci(" 1384a-3"), None);

        assert_eq!(write_sci(0.0).as_deref(), Some(" 00000-0"));
        assert_eq!(write_sci(-0.11606e-4).as_deref(), Some("-11606-4"));
        assert_eq!(write_sci(0.13844e-3).as_deref(), Some(" 13844-3"));
        assert_eq!(write_sci(5.0).as_deref(), Some(" 50000+1"));
        assert_eq!(write_sci(0.999999).as_deref(), Some(" 10000+1"));
        assert_eq!(write_sci(1e-12).as_deref(), Some(" 00000-0"));
        assert_eq!(write_sci(1e10), None);
    }

    #[test]
    fn high_values() {
        assert_eq!(read_high_value("+00000000"), Some(0.0));
        assert_eq!(read_high_value("-0000000Z"), Some(-35.0));
        assert_eq!(read_high_value("+ZZZZZZZZ"), Some((HIGH_VALUE_LIMIT - 1) as f64));
        assert_eq!(read_high_value(" 00000000"), None);
        assert_eq!(read_high_value("+0000000z"), None);

        assert_eq!(write_high_value(-35.2).as_deref(), Some("-0000000Z"));
        assert_eq!(write_high_value(36.0).as_deref(), Some("+00000010"));
        assert_eq!(write_high_value(HIGH_VALUE_LIMIT as f64), None);
        let s = write_high_value(384_400_000.0).unwrap();
        assert_eq!(read_high_value(&s), Some(384_400_000.0));
    }
}
