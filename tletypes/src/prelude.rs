pub use crate::elements::{ElementSet, Ephemeris, MeanElements, StateVector};
pub use crate::time::{julian_date, UtcTimestamp};
pub use crate::tle::RawTle;

pub type Vector3 = na::Vector3<f64>;
