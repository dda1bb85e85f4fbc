use thiserror::Error;

#[derive(Copy, Clone, PartialEq, Debug, Error)]
pub enum PropagationError {
    #[error("Eccentricity {0} is outside 0 <= e < 1")]
    InvalidEccentricity(f64),
    #[error("Mean motion {0} rad/min is not positive")]
    InvalidMeanMotion(f64),
    #[error("Epoch state vector must be finite and away from the geocenter")]
    InvalidStateVector,
    #[error("Integrator step limits must be positive and ordered")]
    InvalidIntegrator,
    #[error("Elapsed time {0} is not finite")]
    NonFiniteTime(f64),
    #[error("Elapsed time {0} minutes is too large to integrate")]
    ElapsedTimeTooLarge(f64),
    #[error("Mean eccentricity {eccentricity} left the range -0.001 <= e < 1 after {minutes} minutes")]
    MeanEccentricity { minutes: f64, eccentricity: f64 },
    #[error("Mean motion is no longer positive after {minutes} minutes")]
    NegativeMeanMotion { minutes: f64 },
    #[error("Perturbed eccentricity {eccentricity} left the range 0 <= e <= 1 after {minutes} minutes")]
    PerturbedEccentricity { minutes: f64, eccentricity: f64 },
    #[error("Semi-latus rectum {semilatus_rectum} is negative after {minutes} minutes")]
    NegativeSemiLatusRectum {
        minutes: f64,
        semilatus_rectum: f64,
    },
    #[error("Orbit radius {radius} earth radii is below the surface after {minutes} minutes")]
    Decayed { minutes: f64, radius: f64 },
}

impl PropagationError {
    /// The classic SGP4 error code, for the errors the analytic
    /// model raises while propagating
    pub fn code(&self) -> Option<u8> {
        use PropagationError::*;
        match self {
            MeanEccentricity { .. } => Some(1),
            NegativeMeanMotion { .. } => Some(2),
            PerturbedEccentricity { .. } => Some(3),
            NegativeSemiLatusRectum { .. } => Some(4),
            Decayed { .. } => Some(6),
            InvalidEccentricity(_)
            | InvalidMeanMotion(_)
            | InvalidStateVector
            | InvalidIntegrator
            | NonFiniteTime(_)
            | ElapsedTimeTooLarge(_) => None,
        }
    }
}
