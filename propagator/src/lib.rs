//! Orbit propagation for decoded element sets
//!
//! Ordinary element sets go through the SGP4/SDP4 analytic theory.
//! State-vector ('H') sets are integrated numerically under the Earth, the
//! Moon and the Sun. [`Propagator`] picks the right one.

extern crate nalgebra as na;

pub use crate::analytic::{GravityConstants, Sgp4};
pub use crate::config::{ConfigError, GravityModel, IntegratorConfig, PropagatorConfig};
pub use crate::ephemeris::{lunar_solar_position, LunarSolarCache, LunarSolarPosition};
pub use crate::error::PropagationError;
pub use crate::high_orbit::{HighOrbit, Integration};
pub use crate::model::{Model, Prediction, Propagator};

pub mod analytic;
pub mod config;
pub mod ephemeris;
pub mod error;
pub mod high_orbit;
pub mod model;
