use crate::config::GravityModel;

/// Earth constants in the canonical units of the analytic model: distances
/// in earth radii, time in minutes
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct GravityConstants {
    /// [km^3/s^2]
    pub mu: f64,

    /// Equatorial radius, [km]
    pub radius: f64,

    /// sqrt(mu) in earth radii^1.5 per minute
    pub xke: f64,

    /// Minutes per time unit, 1 / xke
    pub tumin: f64,

    pub j2: f64,
    pub j3: f64,
    pub j4: f64,
    pub j3oj2: f64,
}

impl From<GravityModel> for GravityConstants {
    fn from(model: GravityModel) -> Self {
        let (mu, radius, j2, j3, j4): (f64, f64, f64, f64, f64) = match model {
            GravityModel::Wgs72Old | GravityModel::Wgs72 => {
                (398600.8, 6378.135, 0.001082616, -0.00000253881, -0.00000165597)
            }
            GravityModel::Wgs84 => (
                398600.5,
                6378.137,
                0.00108262998905,
                -0.00000253215306,
                -0.00000161098761,
            ),
        };
        let (mu, xke) = match model {
            GravityModel::Wgs72Old => (398600.79964, 0.0743669161),
            _ => (mu, 60.0 / (radius * radius * radius / mu).sqrt()),
        };
        Self {
            mu,
            radius,
            xke,
            tumin: 1.0 / xke,
            j2,
            j3,
            j4,
            j3oj2: j3 / j2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn models() {
        let old = GravityConstants::from(GravityModel::Wgs72Old);
        let wgs72 = GravityConstants::from(GravityModel::Wgs72);
        let wgs84 = GravityConstants::from(GravityModel::Wgs84);

        assert_eq!(old.xke, 0.0743669161);
        assert_relative_eq!(wgs72.xke, old.xke, max_relative = 1e-8);
        assert_relative_eq!(wgs84.xke, 0.07436685316871385, max_relative = 1e-12);
        assert_eq!(old.j2, wgs72.j2);
        assert_relative_eq!(wgs72.tumin * wgs72.xke, 1.0);
        assert_relative_eq!(wgs84.j3oj2, -0.0023388905587, max_relative = 1e-9);
    }
}
