//! Numerical propagation of 'H' state-vector element sets
//!
//! Earth, Moon and Sun as point masses, integrated with classic RK4 in
//! ecliptic coordinates of date. Step size follows the acceleration so
//! close approaches get short steps and distant arcs long ones.

use crate::{
    config::IntegratorConfig, ephemeris::LunarSolarCache, error::PropagationError,
    model::Prediction,
};
use na::Vector6;
use tletypes::{
    constants::{
        COS_OBLIQ_2000, GM_EARTH, GM_MOON, GM_SUN, METERS_PER_KM, MINUTES_PER_DAY,
        SECONDS_PER_DAY, SECONDS_PER_MINUTE, SIN_OBLIQ_2000,
    },
    prelude::*,
};
use tracing::trace;

/// Position [m] and velocity [m/s], ecliptic of date
pub type State = Vector6<f64>;

#[derive(Clone, PartialEq, Debug)]
pub struct HighOrbit {
    epoch: f64,
    state: State,
    integrator: IntegratorConfig,
}

#[derive(Clone, PartialEq, Debug)]
pub struct Integration {
    /// Final ecliptic state
    pub state: State,

    /// RK4 steps taken
    pub steps: usize,
}

impl HighOrbit {
    /// Set up from an epoch [JD] and an equatorial state vector
    pub fn new(
        epoch: f64,
        sv: &StateVector,
        integrator: IntegratorConfig,
    ) -> Result<Self, PropagationError> {
        let finite = sv.position.iter().chain(sv.velocity.iter()).all(|c| c.is_finite());
        if !finite || sv.position.norm() == 0.0 || !epoch.is_finite() {
            return Err(PropagationError::InvalidStateVector);
        }
        if integrator.validate().is_err() {
            return Err(PropagationError::InvalidIntegrator);
        }
        let p = equatorial_to_ecliptic(&sv.position);
        let v = equatorial_to_ecliptic(&sv.velocity);
        Ok(Self {
            epoch,
            state: State::new(p.x, p.y, p.z, v.x, v.y, v.z),
            integrator,
        })
    }

    pub fn epoch(&self) -> f64 {
        self.epoch
    }

    /// Ecliptic state at epoch
    pub fn epoch_state(&self) -> &State {
        &self.state
    }

    /// Integrate `minutes` from epoch, forward or backward.
    ///
    /// Every step but the last covers at least the configured minimum
    /// step, and the last lands exactly on the requested time. Intervals
    /// of more than 2^52 minimum steps are rejected, since subtracting a
    /// step would no longer change the remaining time.
    pub fn integrate(
        &self,
        minutes: f64,
        cache: &mut LunarSolarCache,
    ) -> Result<Integration, PropagationError> {
        if !minutes.is_finite() {
            return Err(PropagationError::NonFiniteTime(minutes));
        }
        let cfg = &self.integrator;
        let mut jd = self.epoch;
        let mut state = self.state;
        let mut remaining = minutes / MINUTES_PER_DAY;
        if remaining.abs() > cfg.min_step_days * MAX_STEP_COUNT {
            return Err(PropagationError::ElapsedTimeTooLarge(minutes));
        }
        let mut steps = 0;

        while remaining != 0.0 {
            let k0 = derivative(jd, &state, cache);
            let max_step = k0
                .fixed_rows::<3>(3)
                .iter()
                .fold(cfg.max_step_days, |step, a| {
                    step.min(cfg.max_velocity_change / a.abs())
                })
                .max(cfg.min_step_days);
            let dt = if remaining > max_step {
                max_step
            } else if remaining < -max_step {
                -max_step
            } else {
                remaining
            };
            let h = dt * SECONDS_PER_DAY;

            let k1 = derivative(jd + dt / 2.0, &(state + k0 * (h / 2.0)), cache);
            let k2 = derivative(jd + dt / 2.0, &(state + k1 * (h / 2.0)), cache);
            let k3 = derivative(jd + dt, &(state + k2 * h), cache);
            state += (k0 + (k1 + k2) * 2.0 + k3) * (h / 6.0);

            jd += dt;
            remaining -= dt;
            steps += 1;
        }

        trace!(days = minutes / MINUTES_PER_DAY, steps, "Integrated high-orbit state");
        Ok(Integration { state, steps })
    }

    /// Equatorial position [km] and velocity [km/min] after `minutes`
    pub fn propagate(
        &self,
        minutes: f64,
        cache: &mut LunarSolarCache,
    ) -> Result<Prediction, PropagationError> {
        let s = self.integrate(minutes, cache)?.state;
        let position = ecliptic_to_equatorial(&s.fixed_rows::<3>(0).into_owned());
        let velocity = ecliptic_to_equatorial(&s.fixed_rows::<3>(3).into_owned());
        Ok(Prediction {
            position: position / METERS_PER_KM,
            velocity: velocity * (SECONDS_PER_MINUTE / METERS_PER_KM),
        })
    }
}

/// 2^52, past which the minimum step drops below the spacing of f64 values
/// near the remaining time
const MAX_STEP_COUNT: f64 = 4_503_599_627_370_496.0;

fn derivative(jd: f64, state: &State, cache: &mut LunarSolarCache) -> State {
    let r = state.fixed_rows::<3>(0).into_owned();
    let a = acceleration(jd, &r, cache);
    State::new(state[3], state[4], state[5], a.x, a.y, a.z)
}

/// Point mass Earth plus the third-body terms of the Sun and the Moon,
/// [m/s^2]
pub fn acceleration(jd: f64, r: &Vector3, cache: &mut LunarSolarCache) -> Vector3 {
    let mut accel = r * (-GM_EARTH / r.norm().powi(3));
    let bodies = cache.position(jd);
    for (gm, s, dist) in [
        (GM_SUN, bodies.sun, bodies.sun_distance),
        (GM_MOON, bodies.moon, bodies.moon_distance),
    ] {
        let delta = s - r;
        accel -= s * (gm / dist.powi(3)) - delta * (gm / delta.norm().powi(3));
    }
    accel
}

/// Rotate by the J2000 obliquity from the equator to the ecliptic
pub fn equatorial_to_ecliptic(v: &Vector3) -> Vector3 {
    Vector3::new(
        v.x,
        v.y * COS_OBLIQ_2000 + v.z * SIN_OBLIQ_2000,
        v.z * COS_OBLIQ_2000 - v.y * SIN_OBLIQ_2000,
    )
}

pub fn ecliptic_to_equatorial(v: &Vector3) -> Vector3 {
    Vector3::new(
        v.x,
        v.y * COS_OBLIQ_2000 - v.z * SIN_OBLIQ_2000,
        v.z * COS_OBLIQ_2000 + v.y * SIN_OBLIQ_2000,
    )
}
