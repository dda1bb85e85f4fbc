use crate::{
    constants::{EPHEMERIS_TYPE_HIGH_ORBIT, MINUTES_PER_DAY, TWO_PI},
    time::{self, UtcTimestamp},
};
use derive_more::Display;

/// A decoded element record, one per TLE
#[derive(Clone, PartialEq, Debug, Display)]
#[display(
    fmt = "{{catalog_number: {}, designator: {}, epoch: {}, ephemeris: {}}}",
    "catalog_number",
    "international_designator",
    "epoch",
    "ephemeris"
)]
pub struct ElementSet {
    /// NORAD catalog number, 0..=1_047_867_423
    pub catalog_number: u32,

    /// Security classification, almost always 'U'
    pub classification: char,

    /// COSPAR designator, 8 characters, e.g. "98067A  "
    pub international_designator: String,

    /// Epoch, [JD]
    pub epoch: f64,

    pub bulletin_number: u32,

    pub revolution_number: u32,

    pub ephemeris: Ephemeris,
}

/// The trailing element fields, interpreted by ephemeris type
#[derive(Copy, Clone, PartialEq, Debug, Display)]
pub enum Ephemeris {
    /// Brouwer mean elements for the analytic propagators
    Mean(MeanElements),

    /// Epoch state vector for the numerical integrator,
    /// ephemeris type 'H'
    HighOrbit(StateVector),
}

/// Mean orbital elements in radians and minutes
#[derive(Copy, Clone, PartialEq, Debug, Display)]
#[display(
    fmt = "{{i: {}, raan: {}, e: {}, argp: {}, m: {}, n: {}, bstar: {}}}",
    "inclination",
    "raan",
    "eccentricity",
    "arg_perigee",
    "mean_anomaly",
    "mean_motion",
    "bstar"
)]
pub struct MeanElements {
    /// Ephemeris type column, conventionally '0'
    pub ephemeris_type: char,

    /// [rad]
    pub inclination: f64,

    /// Right ascension of the ascending node, [rad]
    pub raan: f64,

    pub eccentricity: f64,

    /// [rad]
    pub arg_perigee: f64,

    /// [rad]
    pub mean_anomaly: f64,

    /// [rad/min]
    pub mean_motion: f64,

    /// First derivative of mean motion divided by two, [rad/min^2]
    pub mean_motion_dot: f64,

    /// Second derivative of mean motion divided by six, [rad/min^3]
    pub mean_motion_ddot: f64,

    /// Drag term, [1/earth radii]
    pub bstar: f64,
}

/// Geocentric equatorial state at epoch
#[derive(Copy, Clone, PartialEq, Debug, Display)]
#[display(fmt = "{{position: {}, velocity: {}}}", "position", "velocity")]
pub struct StateVector {
    /// [m]
    pub position: na::Vector3<f64>,

    /// [m/s]
    pub velocity: na::Vector3<f64>,
}

impl ElementSet {
    pub fn ephemeris_type(&self) -> char {
        match &self.ephemeris {
            Ephemeris::Mean(m) => m.ephemeris_type,
            Ephemeris::HighOrbit(_) => EPHEMERIS_TYPE_HIGH_ORBIT,
        }
    }

    /// Epoch as a UTC timestamp, `None` when outside the representable range
    pub fn epoch_utc(&self) -> Option<UtcTimestamp> {
        time::from_julian_date(self.epoch)
    }

    pub fn mean_elements(&self) -> Option<&MeanElements> {
        match &self.ephemeris {
            Ephemeris::Mean(m) => Some(m),
            Ephemeris::HighOrbit(_) => None,
        }
    }

    pub fn state_vector(&self) -> Option<&StateVector> {
        match &self.ephemeris {
            Ephemeris::Mean(_) => None,
            Ephemeris::HighOrbit(sv) => Some(sv),
        }
    }
}

impl MeanElements {
    /// Orbital period from the Kozai mean motion, [min]
    pub fn period_minutes(&self) -> f64 {
        TWO_PI / self.mean_motion
    }

    pub fn revolutions_per_day(&self) -> f64 {
        self.mean_motion * MINUTES_PER_DAY / TWO_PI
    }
}
