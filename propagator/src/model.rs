use crate::{
    analytic::{GravityConstants, Sgp4},
    config::PropagatorConfig,
    ephemeris::LunarSolarCache,
    error::PropagationError,
    high_orbit::HighOrbit,
};
use derive_more::Display;
use tletypes::{constants::MINUTES_PER_DAY, prelude::*};
use tracing::{debug, warn};

/// Propagation result, equatorial frame
#[derive(Copy, Clone, PartialEq, Debug, Display)]
#[display(fmt = "{{r: {}, v: {}}}", "position", "velocity")]
pub struct Prediction {
    /// [km]
    pub position: Vector3,

    /// [km/min]
    pub velocity: Vector3,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Display)]
pub enum Model {
    #[display(fmt = "SGP4")]
    NearEarth,
    #[display(fmt = "SDP4")]
    DeepSpace,
    #[display(fmt = "RK4")]
    HighOrbit,
}

#[derive(Clone, PartialEq, Debug)]
enum Engine {
    Analytic(Sgp4),
    HighOrbit(HighOrbit),
}

/// Propagates one element set, choosing the model from its ephemeris type
/// and mean motion
#[derive(Clone, PartialEq, Debug)]
pub struct Propagator {
    catalog_number: u32,
    epoch: f64,
    engine: Engine,
}

impl Propagator {
    pub fn new(elements: &ElementSet) -> Result<Self, PropagationError> {
        Self::with_config(elements, &PropagatorConfig::default())
    }

    pub fn with_config(
        elements: &ElementSet,
        config: &PropagatorConfig,
    ) -> Result<Self, PropagationError> {
        let engine = match &elements.ephemeris {
            Ephemeris::Mean(mean) => Engine::Analytic(Sgp4::new(
                elements.epoch,
                mean,
                GravityConstants::from(config.gravity_model),
            )?),
            Ephemeris::HighOrbit(sv) => {
                Engine::HighOrbit(HighOrbit::new(elements.epoch, sv, config.integrator)?)
            }
        };
        let propagator = Self {
            catalog_number: elements.catalog_number,
            epoch: elements.epoch,
            engine,
        };
        debug!(
            catalog_number = elements.catalog_number,
            model = %propagator.model(),
            period_minutes = ?elements.mean_elements().map(MeanElements::period_minutes),
            gravity_model = %config.gravity_model,
            "Initialized propagator"
        );
        Ok(propagator)
    }

    pub fn model(&self) -> Model {
        match &self.engine {
            Engine::Analytic(sgp4) if sgp4.is_deep_space() => Model::DeepSpace,
            Engine::Analytic(_) => Model::NearEarth,
            Engine::HighOrbit(_) => Model::HighOrbit,
        }
    }

    pub fn catalog_number(&self) -> u32 {
        self.catalog_number
    }

    /// Element set epoch, [JD]
    pub fn epoch(&self) -> f64 {
        self.epoch
    }

    /// State `minutes` after epoch (negative for before). State-vector sets
    /// get a fresh lunar/solar cache per call.
    pub fn propagate(&self, minutes: f64) -> Result<Prediction, PropagationError> {
        self.propagate_with_cache(minutes, &mut LunarSolarCache::new())
    }

    /// Like [`Propagator::propagate`], reusing `cache` across calls. The
    /// cache is ignored by the analytic models.
    pub fn propagate_with_cache(
        &self,
        minutes: f64,
        cache: &mut LunarSolarCache,
    ) -> Result<Prediction, PropagationError> {
        let result = match &self.engine {
            Engine::Analytic(sgp4) => sgp4.propagate(minutes),
            Engine::HighOrbit(orbit) => orbit.propagate(minutes, cache),
        };
        if let Err(e) = &result {
            warn!(
                catalog_number = self.catalog_number,
                minutes,
                code = ?e.code(),
                error = %e,
                "Propagation failed"
            );
        }
        result
    }

    /// State at Julian date `jd`
    pub fn propagate_to_jd(&self, jd: f64) -> Result<Prediction, PropagationError> {
        self.propagate((jd - self.epoch) * MINUTES_PER_DAY)
    }
}
