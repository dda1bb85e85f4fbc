use crate::{
    catalog::{analyst_designator, read_catalog_number},
    checksum::{tle_checksum, verify_line},
    fields::*,
    parser::{ParseError, Result},
    CHECKSUM_COLUMN, LINE_LENGTH,
};
use nom::{bytes::complete::take, character::complete::anychar};
use thiserror::Error;
use tletypes::{
    constants::{
        EPHEMERIS_TYPE_HIGH_ORBIT, JD_1900_JAN_0, MINUTES_PER_DAY, MINUTES_PER_DAY_CUBED,
        MINUTES_PER_DAY_SQUARED, TLE_YEAR_PIVOT, TWO_PI,
    },
    prelude::*,
};
use tracing::debug;

/// Velocity fields of a state-vector record are in 1e-4 m/s
pub(crate) const HIGH_ORBIT_VELOCITY_SCALE: f64 = 1e-4;

#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum DecodeError {
    #[error("Line {line} does not start with '{line} '")]
    WrongLineMarker { line: u8 },
    #[error("Line {line} is {len} characters long, expected at least 69")]
    TooShort { line: u8, len: usize },
    #[error("Line {line} has invalid character {found:?} at column {column}")]
    InvalidCharacter { line: u8, column: usize, found: char },
    #[error("Line {line} continues past the checksum column")]
    Unterminated { line: u8 },
    #[error("Line {line} has a malformed {field} field")]
    Field { line: u8, field: Field },
    #[error("Line {line} does not follow the fixed column layout")]
    Layout { line: u8 },
}

/// Checksum result for a structurally valid pair of lines
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ChecksumStatus {
    Valid,
    Line1Mismatch,
    Line2Mismatch,
    BothMismatch,
}

impl ChecksumStatus {
    pub fn from_matches(line1_ok: bool, line2_ok: bool) -> Self {
        match (line1_ok, line2_ok) {
            (true, true) => ChecksumStatus::Valid,
            (false, true) => ChecksumStatus::Line1Mismatch,
            (true, false) => ChecksumStatus::Line2Mismatch,
            (false, false) => ChecksumStatus::BothMismatch,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ChecksumStatus::Valid)
    }
}

/// A decoded record along with how its checksums fared
#[derive(Clone, PartialEq, Debug)]
pub struct Decoded {
    pub elements: ElementSet,
    pub checksum: ChecksumStatus,
}

/// Decode a two-line element set
///
/// Checksum mismatches do not stop decoding; they are reported in
/// [`Decoded::checksum`]. Structural problems with either line are errors
/// and no record is produced.
pub fn decode(line1: &str, line2: &str) -> std::result::Result<Decoded, DecodeError> {
    let line1_ok = verify_line(line1, 1)?;
    let line2_ok = verify_line(line2, 2)?;
    let checksum = ChecksumStatus::from_matches(line1_ok, line2_ok);
    for (n, line, ok) in [(1, line1, line1_ok), (2, line2, line2_ok)] {
        if !ok {
            debug!(
                line = n,
                expected = tle_checksum(line)?,
                found = ?line[CHECKSUM_COLUMN..].chars().next(),
                "TLE checksum mismatch"
            );
        }
    }

    // Both lines are printable ASCII through the checksum column
    let line1 = &line1[..LINE_LENGTH];
    let line2 = &line2[..LINE_LENGTH];

    let high_orbit = line1.as_bytes()[62] == EPHEMERIS_TYPE_HIGH_ORBIT as u8;
    let (header, line1_tail) = if high_orbit {
        let (_, (header, position)) = in_line(1, line1_high_orbit(line1))?;
        (header, Line1Tail::Position(position))
    } else {
        let (_, (header, drag)) = in_line(1, line1_mean(line1))?;
        (header, Line1Tail::Drag(drag))
    };

    let ephemeris = match line1_tail {
        Line1Tail::Position(position) => {
            let (_, velocity) = in_line(2, line2_high_orbit(line2))?;
            Ephemeris::HighOrbit(StateVector {
                position,
                velocity: velocity * HIGH_ORBIT_VELOCITY_SCALE,
            })
        }
        Line1Tail::Drag(drag) => {
            let (_, angles) = in_line(2, line2_mean(line2))?;
            Ephemeris::Mean(MeanElements {
                ephemeris_type: drag.ephemeris_type,
                inclination: angles.inclination,
                raan: angles.raan,
                eccentricity: angles.eccentricity,
                arg_perigee: angles.arg_perigee,
                mean_anomaly: angles.mean_anomaly,
                mean_motion: angles.revs_per_day * TWO_PI / MINUTES_PER_DAY,
                mean_motion_dot: drag.ndot * TWO_PI / MINUTES_PER_DAY_SQUARED,
                mean_motion_ddot: drag.nddot * TWO_PI / MINUTES_PER_DAY_CUBED,
                bstar: drag.bstar,
            })
        }
    };
    let revolution_number = in_line(2, revolution_number(line2))?.1;

    let international_designator = if header.designator.starts_with("     ") {
        analyst_designator(header.catalog_number)
    } else {
        header.designator.to_owned()
    };

    Ok(Decoded {
        elements: ElementSet {
            catalog_number: header.catalog_number,
            classification: header.classification,
            international_designator,
            epoch: header.epoch,
            bulletin_number: header.bulletin_number,
            revolution_number,
            ephemeris,
        },
        checksum,
    })
}

/// Epoch from a two-digit year and fractional day of year, [JD]
pub fn epoch_from_year_day(two_digit_year: u32, day: f64) -> f64 {
    let year = if two_digit_year < TLE_YEAR_PIVOT {
        two_digit_year + 100
    } else {
        two_digit_year
    };
    // Day 1.0 is January 1, 0h; year 0 here is 1900
    day + JD_1900_JAN_0 + f64::from(year * 365 + (year - 1) / 4)
}

fn in_line<'a, O>(line: u8, r: Result<&'a str, O>) -> std::result::Result<(&'a str, O), DecodeError> {
    r.map_err(|e| match e {
        nom::Err::Error(ParseError::Field(field)) | nom::Err::Failure(ParseError::Field(field)) => {
            DecodeError::Field { line, field }
        }
        _ => DecodeError::Layout { line },
    })
}

enum Line1Tail {
    Position(Vector3),
    Drag(DragTerms),
}

struct Header<'a> {
    catalog_number: u32,
    classification: char,
    designator: &'a str,
    epoch: f64,
    bulletin_number: u32,
}

struct DragTerms {
    /// [rev/day^2]
    ndot: f64,
    /// [rev/day^3]
    nddot: f64,
    bstar: f64,
    ephemeris_type: char,
}

struct MeanAngles {
    inclination: f64,
    raan: f64,
    eccentricity: f64,
    arg_perigee: f64,
    mean_anomaly: f64,
    revs_per_day: f64,
}

fn year(s: &str) -> Option<u32> {
    read_uint(s).filter(|y| *y < 100)
}

/// Columns 1 through 32, shared by both line 1 layouts
fn line1_prefix(s: &str) -> Result<&str, (u32, char, &str, f64)> {
    let (s, _) = gap(s)?;
    let (s, _) = gap(s)?;
    let (s, catalog_number) = field(5, Field::CatalogNumber, read_catalog_number)(s)?;
    let (s, classification) = anychar(s)?;
    let (s, _) = gap(s)?;
    let (s, designator) = field(8, Field::InternationalDesignator, Some)(s)?;
    let (s, _) = gap(s)?;
    let (s, yy) = field(2, Field::EpochYear, year)(s)?;
    let (s, day) = field(12, Field::EpochDay, |d| read_eight_places(d, 3))(s)?;
    let (s, _) = gap(s)?;
    Ok((
        s,
        (
            catalog_number,
            classification,
            designator,
            epoch_from_year_day(yy, day),
        ),
    ))
}

/// Columns 63 through 68
fn line1_suffix(s: &str) -> Result<&str, (char, u32)> {
    let (s, ephemeris_type) = anychar(s)?;
    let (s, _) = gap(s)?;
    let (s, bulletin_number) = field(4, Field::BulletinNumber, read_uint)(s)?;
    Ok((s, (ephemeris_type, bulletin_number)))
}

fn line1_mean(s: &str) -> Result<&str, (Header<'_>, DragTerms)> {
    let (s, (catalog_number, classification, designator, epoch)) = line1_prefix(s)?;
    let (s, ndot) = field(10, Field::MeanMotionDot, read_ndot)(s)?;
    let (s, _) = gap(s)?;
    let (s, nddot) = field(8, Field::MeanMotionDdot, read_sci)(s)?;
    let (s, _) = gap(s)?;
    let (s, bstar) = field(8, Field::Bstar, read_sci)(s)?;
    let (s, _) = gap(s)?;
    let (s, (ephemeris_type, bulletin_number)) = line1_suffix(s)?;
    Ok((
        s,
        (
            Header {
                catalog_number,
                classification,
                designator,
                epoch,
                bulletin_number,
            },
            DragTerms {
                ndot,
                nddot,
                bstar,
                ephemeris_type,
            },
        ),
    ))
}

/// Three signed base-36 fields in columns 34 through 62
fn high_values(which: Field) -> impl FnMut(&str) -> Result<&str, Vector3> {
    move |s| {
        let (s, x) = field(9, which, read_high_value)(s)?;
        let (s, _) = gap(s)?;
        let (s, y) = field(9, which, read_high_value)(s)?;
        let (s, _) = gap(s)?;
        let (s, z) = field(9, which, read_high_value)(s)?;
        Ok((s, Vector3::new(x, y, z)))
    }
}

fn line1_high_orbit(s: &str) -> Result<&str, (Header<'_>, Vector3)> {
    let (s, (catalog_number, classification, designator, epoch)) = line1_prefix(s)?;
    let (s, position) = high_values(Field::Position)(s)?;
    let (s, (_, bulletin_number)) = line1_suffix(s)?;
    Ok((
        s,
        (
            Header {
                catalog_number,
                classification,
                designator,
                epoch,
                bulletin_number,
            },
            position,
        ),
    ))
}

fn line2_mean(s: &str) -> Result<&str, MeanAngles> {
    let (s, _) = take(8_usize)(s)?;
    let (s, inclination) = field(8, Field::Inclination, read_angle)(s)?;
    let (s, _) = gap(s)?;
    let (s, raan) = field(8, Field::Raan, read_angle)(s)?;
    let (s, _) = gap(s)?;
    let (s, eccentricity) = field(7, Field::Eccentricity, read_eccentricity)(s)?;
    let (s, _) = gap(s)?;
    let (s, arg_perigee) = field(8, Field::ArgPerigee, read_angle)(s)?;
    let (s, _) = gap(s)?;
    let (s, mean_anomaly) = field(8, Field::MeanAnomaly, read_angle)(s)?;
    let (s, revs_per_day) = field(12, Field::MeanMotion, |m| read_eight_places(m, 3))(s)?;
    Ok((
        s,
        MeanAngles {
            inclination,
            raan,
            eccentricity,
            arg_perigee,
            mean_anomaly,
            revs_per_day,
        },
    ))
}

fn line2_high_orbit(s: &str) -> Result<&str, Vector3> {
    // Columns 9 through 33 hold a free-form range/accuracy note
    let (s, _) = take(33_usize)(s)?;
    high_values(Field::Velocity)(s)
}

fn revolution_number(line2: &str) -> Result<&str, u32> {
    let (s, _) = take(63_usize)(line2)?;
    field(5, Field::RevolutionNumber, read_uint)(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const ISS_L1: &str = "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927";
    const ISS_L2: &str = "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";

    #[test]
    fn iss() {
        let d = decode(ISS_L1, ISS_L2).unwrap();
        assert_eq!(d.checksum, ChecksumStatus::Valid);
        let e = &d.elements;
        assert_eq!(e.catalog_number, 25544);
        assert_eq!(e.classification, 'U');
        assert_eq!(e.international_designator, "98067A  ");
        assert_eq!(e.bulletin_number, 292);
        assert_eq!(e.revolution_number, 56353);
        assert_eq!(e.ephemeris_type(), '0');
        // 2008 day 264.51782528
        assert_relative_eq!(e.epoch, 2454730.01782528, epsilon = 1e-8);

        let m = e.mean_elements().unwrap();
        assert_relative_eq!(m.inclination, 51.6416_f64.to_radians(), epsilon = 1e-12);
        assert_relative_eq!(m.raan, 247.4627_f64.to_radians(), epsilon = 1e-12);
        assert_relative_eq!(m.eccentricity, 0.0006703, epsilon = 1e-15);
        assert_relative_eq!(m.arg_perigee, 130.5360_f64.to_radians(), epsilon = 1e-12);
        assert_relative_eq!(m.mean_anomaly, 325.0288_f64.to_radians(), epsilon = 1e-12);
        assert_relative_eq!(m.revolutions_per_day(), 15.72125391, epsilon = 1e-10);
        assert_relative_eq!(
            m.mean_motion_dot,
            -2.182e-5 * TWO_PI / MINUTES_PER_DAY_SQUARED,
            epsilon = 1e-20
        );
        assert_eq!(m.mean_motion_ddot, 0.0);
        assert_relative_eq!(m.bstar, -1.1606e-5, epsilon = 1e-15);
    }

    #[test]
    fn epoch_year_pivot() {
        assert_relative_eq!(epoch_from_year_day(0, 1.0), 2451544.5);
        assert_relative_eq!(epoch_from_year_day(57, 1.0), 2435839.5);
        assert_relative_eq!(epoch_from_year_day(56, 1.0), 2471998.5);
        assert_relative_eq!(epoch_from_year_day(99, 1.0), 2451179.5);
    }

    #[test]
    fn checksum_mismatch_still_decodes() {
        let l1 = format!("{}8", &ISS_L1[..68]);
        let l2 = format!("{}0", &ISS_L2[..68]);
        let d = decode(&l1, ISS_L2).unwrap();
        assert_eq!(d.checksum, ChecksumStatus::Line1Mismatch);
        let d = decode(ISS_L1, &l2).unwrap();
        assert_eq!(d.checksum, ChecksumStatus::Line2Mismatch);
        let d = decode(&l1, &l2).unwrap();
        assert_eq!(d.checksum, ChecksumStatus::BothMismatch);
        assert_eq!(d.elements.catalog_number, 25544);
    }

    #[test]
    fn swapped_lines() {
        assert_eq!(
            decode(ISS_L2, ISS_L1),
            Err(DecodeError::WrongLineMarker { line: 1 })
        );
    }

    #[test]
    fn malformed_field() {
        let mut l2 = ISS_L2.to_owned();
        l2.replace_range(27..28, "x");
        assert_eq!(
            decode(ISS_L1, &l2),
            Err(DecodeError::Field {
                line: 2,
                field: Field::Eccentricity
            })
        );
    }
}
