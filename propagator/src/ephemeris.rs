//! Low precision lunar and solar positions
//!
//! Truncated series from Meeus, _Astronomical Algorithms_ (chapters 25
//! and 47), geocentric ecliptic coordinates of date in meters. These feed
//! the third-body terms of the high-orbit integrator and must not be
//! refined: the integrated state vectors are fitted against exactly
//! this model.

use tletypes::{
    constants::{AU_IN_METERS, DAYS_PER_JULIAN_CENTURY, J2000},
    prelude::*,
};

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct LunarSolarPosition {
    /// [m]
    pub moon: Vector3,

    /// [m]
    pub moon_distance: f64,

    /// [m]
    pub sun: Vector3,

    /// [m]
    pub sun_distance: f64,
}

/// Lunar and solar positions at `jd`
pub fn lunar_solar_position(jd: f64) -> LunarSolarPosition {
    let t = (jd - J2000) / DAYS_PER_JULIAN_CENTURY;
    let deg = |c0: f64, c1: f64| (c0 + c1 * t).to_radians();

    // Mean lunar longitude (47.1) and anomaly (47.4)
    let l_moon = deg(218.3164477, 481267.88123421);
    let m_moon = deg(134.9633964, 477198.8675055);
    // Mean solar longitude (25.2) and anomaly (47.3)
    let l_sun = deg(280.46646, 36000.76983);
    let m_sun = deg(357.5291092, 35999.0502909);
    // Lunar argument of latitude (47.5) and mean elongation (47.2)
    let f = deg(93.2720950, 483202.0175233);
    let d = deg(297.8501921, 445267.1114034);

    // Table 47.A and 47.B, largest terms only
    let moon_lon = l_moon
        + 6.288774_f64.to_radians() * m_moon.sin()
        + 1.274027_f64.to_radians() * (2.0 * d - m_moon).sin()
        + 0.658314_f64.to_radians() * (2.0 * d).sin()
        + 0.213618_f64.to_radians() * (2.0 * m_moon).sin()
        - 0.185166_f64.to_radians() * m_sun.sin()
        - 0.114332_f64.to_radians() * (2.0 * f).sin();
    let moon_lat = 5.128122_f64.to_radians() * f.sin()
        + 0.280602_f64.to_radians() * (m_moon + f).sin()
        + 0.277693_f64.to_radians() * (m_moon - f).sin()
        + 0.173237_f64.to_radians() * (2.0 * d - f).sin();
    let moon_distance = 385000560.0
        - 20905355.0 * m_moon.cos()
        - 3699111.0 * (2.0 * d - m_moon).cos()
        - 2955968.0 * (2.0 * d).cos()
        - 569925.0 * (2.0 * m_sun).cos();

    // (25.4) and the equation of center
    let sun_ecc = 0.016708634;
    let sun_lon = l_sun + 1.914602_f64.to_radians() * m_sun.sin();
    let sun_distance = AU_IN_METERS * (1.0 - sun_ecc * m_sun.cos());

    let moon_xy = moon_distance * moon_lat.cos();
    LunarSolarPosition {
        moon: Vector3::new(
            moon_xy * moon_lon.cos(),
            moon_xy * moon_lon.sin(),
            moon_distance * moon_lat.sin(),
        ),
        moon_distance,
        sun: Vector3::new(
            sun_distance * sun_lon.cos(),
            sun_distance * sun_lon.sin(),
            0.0,
        ),
        sun_distance,
    }
}

/// Single entry memo of [`lunar_solar_position`]
///
/// The RK4 midpoint stages and the start of the next step share their
/// timestamps with earlier evaluations, so one slot catches most repeats.
/// Give every independent propagation its own cache.
#[derive(Clone, Debug, Default)]
pub struct LunarSolarCache {
    entry: Option<(f64, LunarSolarPosition)>,
}

impl LunarSolarCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&mut self, jd: f64) -> LunarSolarPosition {
        match self.entry {
            Some((cached_jd, pos)) if cached_jd == jd => pos,
            _ => {
                let pos = lunar_solar_position(jd);
                self.entry = Some((jd, pos));
                pos
            }
        }
    }

    /// Time of the cached entry, if any
    pub fn cached_jd(&self) -> Option<f64> {
        self.entry.map(|(jd, _)| jd)
    }
}
