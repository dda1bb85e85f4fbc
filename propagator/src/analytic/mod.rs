//! SGP4 and SDP4
//!
//! The AFSPC analytic theory as revised by Vallado et al. ("Revisiting
//! Spacetrack Report #3", AIAA 2006-6753) in its improved operation mode.
//! Initialization computes every coefficient once; [`Sgp4::propagate`] is
//! then a pure function of the elapsed time.

use crate::{error::PropagationError, model::Prediction};
use deep_space::DeepSpace;
use std::f64::consts::PI;
use tletypes::{
    constants::{DEEP_SPACE_PERIOD_MINUTES, TWO_PI},
    prelude::*,
    time::greenwich_sidereal_time,
};

pub use gravity::GravityConstants;

mod deep_space;
mod gravity;

/// Julian date of 1949 December 31 0h, the origin of the model's epochs
const JD_1950: f64 = 2433281.5;

const X2O3: f64 = 2.0 / 3.0;

/// Guards the 1 / (1 + cos i) singularity of retrograde equatorial orbits
const TEMP4: f64 = 1.5e-12;

/// Elements at epoch with the Brouwer (un-Kozai'd) mean motion
#[derive(Copy, Clone, PartialEq, Debug)]
pub(crate) struct EpochElements {
    jd: f64,
    bstar: f64,
    ecco: f64,
    inclo: f64,
    nodeo: f64,
    argpo: f64,
    mo: f64,
    /// [rad/min]
    no: f64,
}

/// Secular rates from the zonal harmonics, [rad/min]
#[derive(Copy, Clone, PartialEq, Debug)]
pub(crate) struct SecularRates {
    mdot: f64,
    argpdot: f64,
    nodedot: f64,
}

/// Mean elements after the secular update
#[derive(Copy, Clone, Debug)]
pub(crate) struct MeanState {
    em: f64,
    inclm: f64,
    argpm: f64,
    nodem: f64,
    mm: f64,
    nm: f64,
}

/// Elements after the lunisolar periodics
#[derive(Copy, Clone, Debug)]
pub(crate) struct OsculatingState {
    ep: f64,
    inclp: f64,
    argpp: f64,
    nodep: f64,
    mp: f64,
}

/// Drag terms of the full near-earth model, absent for deep-space orbits
/// and perigees under 220 km
#[derive(Copy, Clone, PartialEq, Debug)]
struct HigherOrderDrag {
    cc5: f64,
    d2: f64,
    d3: f64,
    d4: f64,
    delmo: f64,
    eta: f64,
    omgcof: f64,
    sinmao: f64,
    t3cof: f64,
    t4cof: f64,
    t5cof: f64,
    xmcof: f64,
}

/// Initialized analytic model of one element set
#[derive(Clone, PartialEq, Debug)]
pub struct Sgp4 {
    gravity: GravityConstants,
    elements: EpochElements,
    rates: SecularRates,
    aycof: f64,
    cc1: f64,
    cc4: f64,
    con41: f64,
    nodecf: f64,
    t2cof: f64,
    x1mth2: f64,
    x7thm1: f64,
    xlcof: f64,
    drag: Option<HigherOrderDrag>,
    deep_space: Option<DeepSpace>,
}

impl Sgp4 {
    pub fn new(
        epoch: f64,
        elements: &MeanElements,
        gravity: GravityConstants,
    ) -> Result<Self, PropagationError> {
        let GravityConstants {
            radius,
            xke,
            j2,
            j3oj2,
            j4,
            ..
        } = gravity;
        let ecco = elements.eccentricity;
        let inclo = elements.inclination;
        let argpo = elements.arg_perigee;
        let mo = elements.mean_anomaly;
        let bstar = elements.bstar;
        if !(0.0..1.0).contains(&ecco) {
            return Err(PropagationError::InvalidEccentricity(ecco));
        }
        if !(elements.mean_motion > 0.0 && elements.mean_motion.is_finite()) {
            return Err(PropagationError::InvalidMeanMotion(elements.mean_motion));
        }

        // Recover the Brouwer mean motion from the Kozai one
        let eccsq = ecco * ecco;
        let omeosq = 1.0 - eccsq;
        let rteosq = omeosq.sqrt();
        let cosio = inclo.cos();
        let cosio2 = cosio * cosio;
        let ak = (xke / elements.mean_motion).powf(X2O3);
        let d1 = 0.75 * j2 * (3.0 * cosio2 - 1.0) / (rteosq * omeosq);
        let del = d1 / (ak * ak);
        let adel = ak * (1.0 - del * del - del * (1.0 / 3.0 + 134.0 * del * del / 81.0));
        let del = d1 / (adel * adel);
        let no = elements.mean_motion / (1.0 + del);

        let ao = (xke / no).powf(X2O3);
        let sinio = inclo.sin();
        let po = ao * omeosq;
        let con42 = 1.0 - 5.0 * cosio2;
        let con41 = -con42 - cosio2 - cosio2;
        let posq = po * po;
        let rp = ao * (1.0 - ecco);

        // Atmosphere density parameters, adjusted for low perigees
        let perigee_km = (rp - 1.0) * radius;
        let (sfour, qzms24) = if perigee_km < 156.0 {
            let s = if perigee_km < 98.0 {
                20.0
            } else {
                perigee_km - 78.0
            };
            (s / radius + 1.0, ((120.0 - s) / radius).powi(4))
        } else {
            (78.0 / radius + 1.0, ((120.0 - 78.0) / radius).powi(4))
        };

        let pinvsq = 1.0 / posq;
        let tsi = 1.0 / (ao - sfour);
        let eta = ao * ecco * tsi;
        let etasq = eta * eta;
        let eeta = ecco * eta;
        let psisq = (1.0 - etasq).abs();
        let coef = qzms24 * tsi.powi(4);
        let coef1 = coef / psisq.powf(3.5);
        let cc2 = coef1
            * no
            * (ao * (1.0 + 1.5 * etasq + eeta * (4.0 + etasq))
                + 0.375 * j2 * tsi / psisq * con41 * (8.0 + 3.0 * etasq * (8.0 + etasq)));
        let cc1 = bstar * cc2;
        let cc3 = if ecco > 1.0e-4 {
            -2.0 * coef * tsi * j3oj2 * no * sinio / ecco
        } else {
            0.0
        };
        let x1mth2 = 1.0 - cosio2;
        let cc4 = 2.0
            * no
            * coef1
            * ao
            * omeosq
            * (eta * (2.0 + 0.5 * etasq) + ecco * (0.5 + 2.0 * etasq)
                - j2 * tsi / (ao * psisq)
                    * (-3.0 * con41 * (1.0 - 2.0 * eeta + etasq * (1.5 - 0.5 * eeta))
                        + 0.75
                            * x1mth2
                            * (2.0 * etasq - eeta * (1.0 + etasq))
                            * (2.0 * argpo).cos()));
        let cc5 = 2.0 * coef1 * ao * omeosq * (1.0 + 2.75 * (etasq + eeta) + eeta * etasq);

        let cosio4 = cosio2 * cosio2;
        let temp1 = 1.5 * j2 * pinvsq * no;
        let temp2 = 0.5 * temp1 * j2 * pinvsq;
        let temp3 = -0.46875 * j4 * pinvsq * pinvsq * no;
        let mdot = no
            + 0.5 * temp1 * rteosq * con41
            + 0.0625 * temp2 * rteosq * (13.0 - 78.0 * cosio2 + 137.0 * cosio4);
        let argpdot = -0.5 * temp1 * con42
            + 0.0625 * temp2 * (7.0 - 114.0 * cosio2 + 395.0 * cosio4)
            + temp3 * (3.0 - 36.0 * cosio2 + 49.0 * cosio4);
        let xhdot1 = -temp1 * cosio;
        let nodedot = xhdot1
            + (0.5 * temp2 * (4.0 - 19.0 * cosio2) + 2.0 * temp3 * (3.0 - 7.0 * cosio2)) * cosio;

        let elements = EpochElements {
            jd: epoch,
            bstar,
            ecco,
            inclo,
            nodeo: elements.raan,
            argpo,
            mo,
            no,
        };
        let rates = SecularRates {
            mdot,
            argpdot,
            nodedot,
        };

        let deep_space = (TWO_PI / no >= DEEP_SPACE_PERIOD_MINUTES).then(|| {
            DeepSpace::new(&elements, &rates, greenwich_sidereal_time(epoch), xke)
        });

        let drag = (deep_space.is_none() && rp >= 220.0 / radius + 1.0).then(|| {
            let cc1sq = cc1 * cc1;
            let d2 = 4.0 * ao * tsi * cc1sq;
            let temp = d2 * tsi * cc1 / 3.0;
            let d3 = (17.0 * ao + sfour) * temp;
            let d4 = 0.5 * temp * ao * tsi * (221.0 * ao + 31.0 * sfour) * cc1;
            HigherOrderDrag {
                cc5,
                d2,
                d3,
                d4,
                delmo: (1.0 + eta * mo.cos()).powi(3),
                eta,
                omgcof: bstar * cc3 * argpo.cos(),
                sinmao: mo.sin(),
                t3cof: d2 + 2.0 * cc1sq,
                t4cof: 0.25 * (3.0 * d3 + cc1 * (12.0 * d2 + 10.0 * cc1sq)),
                t5cof: 0.2
                    * (3.0 * d4 + 12.0 * cc1 * d3 + 6.0 * d2 * d2 + 15.0 * cc1sq * (2.0 * d2 + cc1sq)),
                xmcof: if ecco > 1.0e-4 {
                    -X2O3 * coef * bstar / eeta
                } else {
                    0.0
                },
            }
        });

        Ok(Self {
            gravity,
            elements,
            rates,
            aycof: -0.5 * j3oj2 * sinio,
            cc1,
            cc4,
            con41,
            nodecf: 3.5 * omeosq * xhdot1 * cc1,
            t2cof: 1.5 * cc1,
            x1mth2,
            x7thm1: 7.0 * cosio2 - 1.0,
            xlcof: long_period_coefficient(j3oj2, sinio, cosio),
            drag,
            deep_space,
        })
    }

    pub fn is_deep_space(&self) -> bool {
        self.deep_space.is_some()
    }

    /// Whether the deep-space resonance integration is active
    pub fn is_resonant(&self) -> bool {
        self.deep_space
            .as_ref()
            .map(DeepSpace::is_resonant)
            .unwrap_or(false)
    }

    /// Brouwer mean motion at epoch, [rad/min]
    pub fn mean_motion(&self) -> f64 {
        self.elements.no
    }

    /// Position [km] and velocity [km/min] in the TEME frame, `t` minutes
    /// from epoch
    pub fn propagate(&self, t: f64) -> Result<Prediction, PropagationError> {
        if !t.is_finite() {
            return Err(PropagationError::NonFiniteTime(t));
        }
        let el = &self.elements;
        let GravityConstants {
            radius, xke, j2, ..
        } = self.gravity;

        // Secular gravity and drag
        let xmdf = el.mo + self.rates.mdot * t;
        let argpdf = el.argpo + self.rates.argpdot * t;
        let nodedf = el.nodeo + self.rates.nodedot * t;
        let t2 = t * t;
        let mut m = MeanState {
            em: el.ecco,
            inclm: el.inclo,
            argpm: argpdf,
            nodem: nodedf + self.nodecf * t2,
            mm: xmdf,
            nm: el.no,
        };
        let mut tempa = 1.0 - self.cc1 * t;
        let mut tempe = el.bstar * self.cc4 * t;
        let mut templ = self.t2cof * t2;

        if let Some(d) = &self.drag {
            let delomg = d.omgcof * t;
            let delm = d.xmcof * ((1.0 + d.eta * xmdf.cos()).powi(3) - d.delmo);
            let temp = delomg + delm;
            m.mm = xmdf + temp;
            m.argpm = argpdf - temp;
            let t3 = t2 * t;
            let t4 = t3 * t;
            tempa -= d.d2 * t2 + d.d3 * t3 + d.d4 * t4;
            tempe += el.bstar * d.cc5 * (m.mm.sin() - d.sinmao);
            templ += d.t3cof * t3 + t4 * (d.t4cof + t * d.t5cof);
        }

        if let Some(ds) = &self.deep_space {
            ds.apply_secular(t, &mut m);
        }

        if m.nm <= 0.0 || tempa <= 0.0 {
            return Err(PropagationError::NegativeMeanMotion { minutes: t });
        }

        let am = (xke / m.nm).powf(X2O3) * tempa * tempa;
        let nm = xke / am.powf(1.5);
        let mut em = m.em - tempe;
        if !(-0.001..1.0).contains(&em) {
            return Err(PropagationError::MeanEccentricity {
                minutes: t,
                eccentricity: em,
            });
        }
        em = em.max(1.0e-6);

        let mm = m.mm + el.no * templ;
        let xlm = (mm + m.argpm + m.nodem) % TWO_PI;
        let nodem = m.nodem % TWO_PI;
        let argpm = m.argpm % TWO_PI;
        let mm = (xlm - argpm - nodem) % TWO_PI;

        let mut p = OsculatingState {
            ep: em,
            inclp: m.inclm,
            argpp: argpm,
            nodep: nodem,
            mp: mm,
        };
        let mut aycof = self.aycof;
        let mut xlcof = self.xlcof;
        let mut con41 = self.con41;
        let mut x1mth2 = self.x1mth2;
        let mut x7thm1 = self.x7thm1;

        if let Some(ds) = &self.deep_space {
            ds.apply_periodics(t, &mut p);
            if p.inclp < 0.0 {
                p.inclp = -p.inclp;
                p.nodep += PI;
                p.argpp -= PI;
            }
            if !(0.0..=1.0).contains(&p.ep) {
                return Err(PropagationError::PerturbedEccentricity {
                    minutes: t,
                    eccentricity: p.ep,
                });
            }
            let sinip = p.inclp.sin();
            let cosip = p.inclp.cos();
            let cosisq = cosip * cosip;
            aycof = -0.5 * self.gravity.j3oj2 * sinip;
            xlcof = long_period_coefficient(self.gravity.j3oj2, sinip, cosip);
            con41 = 3.0 * cosisq - 1.0;
            x1mth2 = 1.0 - cosisq;
            x7thm1 = 7.0 * cosisq - 1.0;
        }
        let sinip = p.inclp.sin();
        let cosip = p.inclp.cos();

        // Long-period periodics
        let axnl = p.ep * p.argpp.cos();
        let temp = 1.0 / (am * (1.0 - p.ep * p.ep));
        let aynl = p.ep * p.argpp.sin() + temp * aycof;
        let xl = p.mp + p.argpp + p.nodep + temp * xlcof * axnl;

        // Kepler's equation
        let u = (xl - p.nodep) % TWO_PI;
        let mut eo1 = u;
        for _ in 0..10 {
            let sineo1 = eo1.sin();
            let coseo1 = eo1.cos();
            let step = (u - aynl * coseo1 + axnl * sineo1 - eo1)
                / (1.0 - coseo1 * axnl - sineo1 * aynl);
            let step = step.clamp(-0.95, 0.95);
            eo1 += step;
            if step.abs() < 1.0e-12 {
                break;
            }
        }

        // Short-period periodics
        let sineo1 = eo1.sin();
        let coseo1 = eo1.cos();
        let ecose = axnl * coseo1 + aynl * sineo1;
        let esine = axnl * sineo1 - aynl * coseo1;
        let el2 = axnl * axnl + aynl * aynl;
        let pl = am * (1.0 - el2);
        if pl < 0.0 {
            return Err(PropagationError::NegativeSemiLatusRectum {
                minutes: t,
                semilatus_rectum: pl,
            });
        }

        let rl = am * (1.0 - ecose);
        let rdotl = am.sqrt() * esine / rl;
        let rvdotl = pl.sqrt() / rl;
        let betal = (1.0 - el2).sqrt();
        let temp = esine / (1.0 + betal);
        let sinu = am / rl * (sineo1 - aynl - axnl * temp);
        let cosu = am / rl * (coseo1 - axnl + aynl * temp);
        let su = sinu.atan2(cosu);
        let sin2u = (cosu + cosu) * sinu;
        let cos2u = 1.0 - 2.0 * sinu * sinu;
        let temp = 1.0 / pl;
        let temp1 = 0.5 * j2 * temp;
        let temp2 = temp1 * temp;

        let mrt = rl * (1.0 - 1.5 * temp2 * betal * con41) + 0.5 * temp1 * x1mth2 * cos2u;
        let su = su - 0.25 * temp2 * x7thm1 * sin2u;
        let xnode = p.nodep + 1.5 * temp2 * cosip * sin2u;
        let xinc = p.inclp + 1.5 * temp2 * cosip * sinip * cos2u;
        let mvt = rdotl - nm * temp1 * x1mth2 * sin2u / xke;
        let rvdot = rvdotl + nm * temp1 * (x1mth2 * cos2u + 1.5 * con41) / xke;

        if mrt < 1.0 {
            return Err(PropagationError::Decayed {
                minutes: t,
                radius: mrt,
            });
        }

        // Orientation vectors
        let (sinsu, cossu) = su.sin_cos();
        let (snod, cnod) = xnode.sin_cos();
        let (sini, cosi) = xinc.sin_cos();
        let xmx = -snod * cosi;
        let xmy = cnod * cosi;
        let u = Vector3::new(xmx * sinsu + cnod * cossu, xmy * sinsu + snod * cossu, sini * sinsu);
        let v = Vector3::new(xmx * cossu - cnod * sinsu, xmy * cossu - snod * sinsu, sini * cossu);

        Ok(Prediction {
            position: u * (mrt * radius),
            velocity: (u * mvt + v * rvdot) * (radius * xke),
        })
    }
}

fn long_period_coefficient(j3oj2: f64, sinio: f64, cosio: f64) -> f64 {
    let denom = if (cosio + 1.0).abs() > TEMP4 {
        1.0 + cosio
    } else {
        TEMP4
    };
    -0.25 * j3oj2 * sinio * (3.0 + 5.0 * cosio) / denom
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GravityModel;
    use approx::assert_relative_eq;

    /// ISS (ZARYA), 2008-09-20
    fn iss() -> MeanElements {
        MeanElements {
            ephemeris_type: '0',
            inclination: 51.6416_f64.to_radians(),
            raan: 247.4627_f64.to_radians(),
            eccentricity: 0.0006703,
            arg_perigee: 130.5360_f64.to_radians(),
            mean_anomaly: 325.0288_f64.to_radians(),
            mean_motion: 15.72125391 * TWO_PI / 1440.0,
            mean_motion_dot: 0.0,
            mean_motion_ddot: 0.0,
            bstar: -0.11606e-4,
        }
    }

    const ISS_EPOCH: f64 = 2454730.01782528;

    fn wgs72() -> GravityConstants {
        GravityModel::Wgs72.into()
    }

    #[test]
    fn near_earth_orbit_stays_in_shell() {
        let sgp4 = Sgp4::new(ISS_EPOCH, &iss(), wgs72()).unwrap();
        assert!(!sgp4.is_deep_space());
        assert!(sgp4.drag.is_some());
        for minutes in [0.0, 45.0, 92.5, 1440.0, -1440.0] {
            let p = sgp4.propagate(minutes).unwrap();
            let r = p.position.norm();
            assert!((6650.0..6750.0).contains(&r), "{minutes}: {r}");
            // About 7.7 km/s
            assert_relative_eq!(p.velocity.norm() / 60.0, 7.7, epsilon = 0.1);
            // Circular orbit, velocity nearly perpendicular to position
            assert!(p.position.dot(&p.velocity).abs() / (r * p.velocity.norm()) < 0.01);
        }
    }

    #[test]
    fn brouwer_mean_motion_is_slightly_smaller() {
        let sgp4 = Sgp4::new(ISS_EPOCH, &iss(), wgs72()).unwrap();
        let kozai = iss().mean_motion;
        assert!(sgp4.mean_motion() < kozai);
        assert_relative_eq!(sgp4.mean_motion(), kozai, max_relative = 1e-3);
    }

    #[test]
    fn propagation_is_pure() {
        let sgp4 = Sgp4::new(ISS_EPOCH, &iss(), wgs72()).unwrap();
        let a = sgp4.propagate(300.0).unwrap();
        let _ = sgp4.propagate(-5000.0).unwrap();
        assert_eq!(sgp4.propagate(300.0).unwrap(), a);
    }

    #[test]
    fn heavy_drag_eventually_fails() {
        let mut elements = iss();
        elements.bstar = 0.5;
        let sgp4 = Sgp4::new(ISS_EPOCH, &elements, wgs72()).unwrap();
        let err = sgp4.propagate(1.0e6).unwrap_err();
        assert_eq!(err, PropagationError::NegativeMeanMotion { minutes: 1.0e6 });
        assert_eq!(err.code(), Some(2));
    }

    #[test]
    fn rejects_invalid_elements() {
        let mut elements = iss();
        elements.eccentricity = 1.0;
        assert_eq!(
            Sgp4::new(ISS_EPOCH, &elements, wgs72()),
            Err(PropagationError::InvalidEccentricity(1.0))
        );
        elements.eccentricity = -0.1;
        assert!(Sgp4::new(ISS_EPOCH, &elements, wgs72()).is_err());

        let mut elements = iss();
        elements.mean_motion = 0.0;
        assert_eq!(
            Sgp4::new(ISS_EPOCH, &elements, wgs72()),
            Err(PropagationError::InvalidMeanMotion(0.0))
        );
        elements.mean_motion = f64::NAN;
        assert!(Sgp4::new(ISS_EPOCH, &elements, wgs72()).is_err());

        let sgp4 = Sgp4::new(ISS_EPOCH, &iss(), wgs72()).unwrap();
        assert_eq!(
            sgp4.propagate(f64::NEG_INFINITY),
            Err(PropagationError::NonFiniteTime(f64::NEG_INFINITY))
        );
    }

    #[test]
    fn long_period_coefficient_is_finite_when_retrograde_equatorial() {
        let j3oj2 = wgs72().j3oj2;
        assert!(long_period_coefficient(j3oj2, 0.0, -1.0).is_finite());
        assert_relative_eq!(
            long_period_coefficient(j3oj2, 0.5, 0.5),
            -0.25 * j3oj2 * 0.5 * 5.5 / 1.5
        );
    }
}
