use crate::{
    catalog::{encode_catalog_number, CatalogNumberError},
    checksum::checksum_digit,
    decode::HIGH_ORBIT_VELOCITY_SCALE,
    fields::*,
};
use thiserror::Error;
use tletypes::{
    constants::{
        EPHEMERIS_TYPE_HIGH_ORBIT, JD_1900_JAN_0, MINUTES_PER_DAY, MINUTES_PER_DAY_CUBED,
        MINUTES_PER_DAY_SQUARED, TWO_PI,
    },
    prelude::*,
};

#[derive(Clone, PartialEq, Debug, Error)]
pub enum EncodeError {
    #[error(transparent)]
    CatalogNumber(#[from] CatalogNumberError),
    #[error("Epoch {0} is outside the 1957 through 2056 range of two-digit years")]
    EpochOutOfRange(f64),
    #[error("Value {value} does not fit in the {field} field")]
    FieldOverflow { field: Field, value: f64 },
    #[error("The {0} field must be printable ASCII of the right width")]
    InvalidText(Field),
    #[error("Mean elements cannot carry ephemeris type '{0}'")]
    AmbiguousEphemerisType(char),
}

/// Encode a record as two TLE lines, checksums included
///
/// Each field is rounded to its column resolution, so decoding the result
/// gives back the record to within that rounding.
pub fn encode(set: &ElementSet) -> Result<(String, String), EncodeError> {
    let catalog = encode_catalog_number(set.catalog_number)?;
    let classification = printable_char(set.classification, Field::Classification)?;
    let designator = designator(&set.international_designator)?;
    let (yy, day) = year_day(set.epoch)?;
    let day = write_eight_places(day, 3, true).ok_or(EncodeError::FieldOverflow {
        field: Field::EpochDay,
        value: day,
    })?;
    let bulletin = uint(set.bulletin_number, 4, Field::BulletinNumber)?;
    let revolution = uint(set.revolution_number, 5, Field::RevolutionNumber)?;

    let header = format!("1 {catalog}{classification} {designator} {yy:02}{day} ");

    let (line1, line2) = match &set.ephemeris {
        Ephemeris::Mean(m) => {
            if m.ephemeris_type == EPHEMERIS_TYPE_HIGH_ORBIT {
                return Err(EncodeError::AmbiguousEphemerisType(m.ephemeris_type));
            }
            let ephemeris_type = printable_char(m.ephemeris_type, Field::EphemerisType)?;
            let ndot = m.mean_motion_dot * MINUTES_PER_DAY_SQUARED / TWO_PI;
            let nddot = m.mean_motion_ddot * MINUTES_PER_DAY_CUBED / TWO_PI;
            let revs_per_day = m.mean_motion * MINUTES_PER_DAY / TWO_PI;
            let line1 = format!(
                "{header}{} {} {} {ephemeris_type} {bulletin}",
                checked(write_ndot(ndot), Field::MeanMotionDot, ndot)?,
                checked(write_sci(nddot), Field::MeanMotionDdot, nddot)?,
                checked(write_sci(m.bstar), Field::Bstar, m.bstar)?,
            );
            let line2 = format!(
                "2 {catalog} {} {} {} {} {} {}{revolution}",
                checked(write_angle(m.inclination), Field::Inclination, m.inclination)?,
                checked(write_angle(m.raan), Field::Raan, m.raan)?,
                checked(
                    write_eccentricity(m.eccentricity),
                    Field::Eccentricity,
                    m.eccentricity
                )?,
                checked(write_angle(m.arg_perigee), Field::ArgPerigee, m.arg_perigee)?,
                checked(write_angle(m.mean_anomaly), Field::MeanAnomaly, m.mean_anomaly)?,
                checked(
                    write_eight_places(revs_per_day, 2, false),
                    Field::MeanMotion,
                    revs_per_day
                )?,
            );
            (line1, line2)
        }
        Ephemeris::HighOrbit(sv) => {
            let p = high_values(&sv.position, Field::Position)?;
            let v = high_values(&(sv.velocity / HIGH_ORBIT_VELOCITY_SCALE), Field::Velocity)?;
            let line1 = format!(
                "{header}{}{} {bulletin}",
                p.join(" "),
                EPHEMERIS_TYPE_HIGH_ORBIT
            );
            let line2 = format!("2 {catalog} {:25}{} {revolution}", "", v.join(" "));
            (line1, line2)
        }
    };

    Ok((with_checksum(line1), with_checksum(line2)))
}

fn with_checksum(mut line: String) -> String {
    let digit = checksum_digit(line.as_bytes());
    line.push(char::from(b'0' + digit));
    line
}

fn checked(text: Option<String>, field: Field, value: f64) -> Result<String, EncodeError> {
    text.ok_or(EncodeError::FieldOverflow { field, value })
}

fn uint(v: u32, width: usize, field: Field) -> Result<String, EncodeError> {
    write_uint(v, width).ok_or(EncodeError::FieldOverflow {
        field,
        value: f64::from(v),
    })
}

fn high_values(v: &Vector3, field: Field) -> Result<Vec<String>, EncodeError> {
    v.iter()
        .map(|&c| checked(write_high_value(c), field, c))
        .collect()
}

fn printable_char(c: char, field: Field) -> Result<char, EncodeError> {
    if (' '..='z').contains(&c) {
        Ok(c)
    } else {
        Err(EncodeError::InvalidText(field))
    }
}

fn designator(d: &str) -> Result<String, EncodeError> {
    if d.len() > 8 || !d.chars().all(|c| (' '..='z').contains(&c)) {
        return Err(EncodeError::InvalidText(Field::InternationalDesignator));
    }
    Ok(format!("{d:8}"))
}

/// Two-digit year and day of year for an epoch, the inverse of
/// `decode::epoch_from_year_day`
fn year_day(epoch: f64) -> Result<(u32, f64), EncodeError> {
    if !epoch.is_finite() {
        return Err(EncodeError::EpochOutOfRange(epoch));
    }
    let since_1900 = epoch - JD_1900_JAN_0;
    // Years counted from 1900, 57 through 156
    for year in (57_u32..=156).rev() {
        let day = since_1900 - f64::from(year * 365 + (year - 1) / 4);
        if day >= 1.0 {
            let days_in_year = if year % 4 == 0 { 366.0 } else { 365.0 };
            if day >= days_in_year + 1.0 {
                break;
            }
            return Ok((year % 100, day));
        }
    }
    Err(EncodeError::EpochOutOfRange(epoch))
}
