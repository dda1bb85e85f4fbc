//! Lunisolar terms for orbits with periods of 225 minutes and up
//!
//! Secular rates and long-period periodics from the Sun and the Moon, and
//! the numerically integrated resonance terms for geosynchronous (one day)
//! and Molniya-type (half day, eccentric) orbits.

use super::{EpochElements, MeanState, OsculatingState, SecularRates};
use std::f64::consts::PI;
use tletypes::constants::TWO_PI;

/// Days from 1900 Jan 0.5 to the 1950 epoch origin
const DAYS_1900_TO_1950: f64 = 18261.5;

/// Earth rotation rate, [rad/min]
const RPTIM: f64 = 4.37526908801129966e-3;

const ZNS: f64 = 1.19459e-5;
const ZES: f64 = 0.01675;
const ZNL: f64 = 1.5835218e-4;
const ZEL: f64 = 0.05490;

/// Resonance integration step, [min], and half its square
const STEP: f64 = 720.0;
const STEP2: f64 = 259200.0;

/// Inclinations this close to 0 or pi get no lunisolar node rate
const MIN_INCLINATION: f64 = 5.2359877e-2;

/// Below this perturbed inclination the periodics use the Lyddane form
const LYDDANE_INCLINATION: f64 = 0.2;

#[derive(Clone, PartialEq, Debug)]
pub(crate) struct DeepSpace {
    sun: Periodics,
    moon: Periodics,
    dedt: f64,
    didt: f64,
    dmdt: f64,
    dnodt: f64,
    domdt: f64,
    /// Greenwich sidereal time at epoch, [rad]
    gsto: f64,
    resonance: Option<Resonance>,
}

/// Long-period coefficients of one perturbing body
#[derive(Clone, PartialEq, Debug)]
struct Periodics {
    /// Mean anomaly at epoch, rate, and eccentricity of the body
    zm0: f64,
    zn: f64,
    ze: f64,
    e2: f64,
    e3: f64,
    i2: f64,
    i3: f64,
    l2: f64,
    l3: f64,
    l4: f64,
    gh2: f64,
    gh3: f64,
    gh4: f64,
    h2: f64,
    h3: f64,
}

#[derive(Clone, PartialEq, Debug)]
struct Resonance {
    terms: ResonanceTerms,
    xlamo: f64,
    xfact: f64,
    no: f64,
    argpo: f64,
    argpdot: f64,
}

#[derive(Clone, PartialEq, Debug)]
enum ResonanceTerms {
    /// Geosynchronous
    OneDay { del1: f64, del2: f64, del3: f64 },
    /// Twelve hour, eccentric
    HalfDay {
        d2201: f64,
        d2211: f64,
        d3210: f64,
        d3222: f64,
        d4410: f64,
        d4422: f64,
        d5220: f64,
        d5232: f64,
        d5421: f64,
        d5433: f64,
    },
}

/// Direction cosines of a perturbing body's orbit
struct BodyOrientation {
    cosg: f64,
    sing: f64,
    cosi: f64,
    sini: f64,
    cosh: f64,
    sinh: f64,
    /// Gravitational coefficient
    cc: f64,
}

/// Satellite quantities shared by both bodies
struct Satellite {
    em: f64,
    emsq: f64,
    betasq: f64,
    rtemsq: f64,
    sinim: f64,
    cosim: f64,
    sinomm: f64,
    cosomm: f64,
    xnoi: f64,
}

struct BodyTerms {
    s1: f64,
    s2: f64,
    s3: f64,
    s4: f64,
    s5: f64,
    s6: f64,
    s7: f64,
    z1: f64,
    z2: f64,
    z3: f64,
    z11: f64,
    z12: f64,
    z13: f64,
    z21: f64,
    z22: f64,
    z23: f64,
    z31: f64,
    z32: f64,
    z33: f64,
}

impl DeepSpace {
    pub(crate) fn new(
        el: &EpochElements,
        rates: &SecularRates,
        gsto: f64,
        xke: f64,
    ) -> Self {
        let sat = Satellite::new(el);
        let day = el.jd - super::JD_1950 + DAYS_1900_TO_1950;

        // Lunar orbit orientation of date
        let xnodce = (4.5236020 - 9.2422029e-4 * day) % TWO_PI;
        let stem = xnodce.sin();
        let ctem = xnodce.cos();
        let zcosil = 0.91375164 - 0.03568096 * ctem;
        let zsinil = (1.0 - zcosil * zcosil).sqrt();
        let zsinhl = 0.089683511 * stem / zsinil;
        let zcoshl = (1.0 - zsinhl * zsinhl).sqrt();
        let gam = 5.8351514 + 0.0019443680 * day;
        let zx = (0.39785416 * stem / zsinil)
            .atan2(zcoshl * ctem + 0.91744867 * zsinhl * stem);
        let zx = gam + zx - xnodce;

        let snodm = el.nodeo.sin();
        let cnodm = el.nodeo.cos();
        let solar = sat.terms(&BodyOrientation {
            cosg: 0.1945905,
            sing: -0.98088458,
            cosi: 0.91744867,
            sini: 0.39785416,
            cosh: cnodm,
            sinh: snodm,
            cc: 2.9864797e-6,
        });
        let lunar = sat.terms(&BodyOrientation {
            cosg: zx.cos(),
            sing: zx.sin(),
            cosi: zcosil,
            sini: zsinil,
            cosh: zcoshl * cnodm + zsinhl * snodm,
            sinh: snodm * zcoshl - cnodm * zsinhl,
            cc: 4.7968065e-7,
        });

        let zmol = (4.7199672 + 0.22997150 * day - gam) % TWO_PI;
        let zmos = (6.2565837 + 0.017201977 * day) % TWO_PI;
        let sun = Periodics::new(&solar, zmos, ZNS, ZES, sat.emsq);
        let moon = Periodics::new(&lunar, zmol, ZNL, ZEL, sat.emsq);

        let near_equatorial =
            el.inclo < MIN_INCLINATION || el.inclo > PI - MIN_INCLINATION;
        let mut ds = Self {
            sun,
            moon,
            dedt: 0.0,
            didt: 0.0,
            dmdt: 0.0,
            dnodt: 0.0,
            domdt: 0.0,
            gsto,
            resonance: None,
        };
        for (t, zn) in [(&solar, ZNS), (&lunar, ZNL)] {
            ds.dedt += t.s1 * zn * t.s5;
            ds.didt += t.s2 * zn * (t.z11 + t.z13);
            ds.dmdt -= zn * t.s3 * (t.z1 + t.z3 - 14.0 - 6.0 * sat.emsq);
            let dnodt = if near_equatorial {
                0.0
            } else {
                -zn * t.s2 * (t.z21 + t.z23) / sat.sinim
            };
            ds.domdt += t.s4 * zn * (t.z31 + t.z33 - 6.0) - sat.cosim * dnodt;
            ds.dnodt += dnodt;
        }

        ds.resonance = Resonance::new(el, rates, &ds, &sat, xke);
        ds
    }

    pub(crate) fn is_resonant(&self) -> bool {
        self.resonance.is_some()
    }

    /// Lunisolar secular rates and resonance effects on the mean elements
    pub(crate) fn apply_secular(&self, t: f64, m: &mut MeanState) {
        m.em += self.dedt * t;
        m.inclm += self.didt * t;
        m.argpm += self.domdt * t;
        m.nodem += self.dnodt * t;
        m.mm += self.dmdt * t;

        let Some(res) = &self.resonance else {
            return;
        };
        let theta = (self.gsto + t * RPTIM) % TWO_PI;

        // Always integrate from epoch so the result depends on t alone
        let delt = if t > 0.0 { STEP } else { -STEP };
        let mut atime = 0.0;
        let mut xni = res.no;
        let mut xli = res.xlamo;
        let (xndt, xldot, xnddt, ft) = loop {
            let (xndt, xldot, xnddt) = res.rates(xli, xni, atime);
            if (t - atime).abs() < STEP {
                break (xndt, xldot, xnddt, t - atime);
            }
            xli += xldot * delt + xndt * STEP2;
            xni += xndt * delt + xnddt * STEP2;
            atime += delt;
        };

        m.nm = xni + xndt * ft + xnddt * ft * ft * 0.5;
        let xl = xli + xldot * ft + xndt * ft * ft * 0.5;
        m.mm = match res.terms {
            ResonanceTerms::OneDay { .. } => xl - m.nodem - m.argpm + theta,
            ResonanceTerms::HalfDay { .. } => xl - 2.0 * m.nodem + 2.0 * theta,
        };
    }

    /// Lunisolar long-period periodics
    pub(crate) fn apply_periodics(&self, t: f64, p: &mut OsculatingState) {
        let (mut pe, mut pinc, mut pl, mut pgh, mut ph) = (0.0, 0.0, 0.0, 0.0, 0.0);
        for body in [&self.sun, &self.moon] {
            let zm = body.zm0 + body.zn * t;
            let zf = zm + 2.0 * body.ze * zm.sin();
            let sinzf = zf.sin();
            let f2 = 0.5 * sinzf * sinzf - 0.25;
            let f3 = -0.5 * sinzf * zf.cos();
            pe += body.e2 * f2 + body.e3 * f3;
            pinc += body.i2 * f2 + body.i3 * f3;
            pl += body.l2 * f2 + body.l3 * f3 + body.l4 * sinzf;
            pgh += body.gh2 * f2 + body.gh3 * f3 + body.gh4 * sinzf;
            ph += body.h2 * f2 + body.h3 * f3;
        }

        p.inclp += pinc;
        p.ep += pe;
        let sinip = p.inclp.sin();
        let cosip = p.inclp.cos();

        if p.inclp >= LYDDANE_INCLINATION {
            ph /= sinip;
            pgh -= cosip * ph;
            p.argpp += pgh;
            p.nodep += ph;
            p.mp += pl;
        } else {
            // Lyddane modification, avoids the 1/sin(i) singularity
            let sinop = p.nodep.sin();
            let cosop = p.nodep.cos();
            let alfdp = sinip * sinop + ph * cosop + pinc * cosip * sinop;
            let betdp = sinip * cosop - ph * sinop + pinc * cosip * cosop;
            p.nodep %= TWO_PI;
            let xls = p.mp + p.argpp + cosip * p.nodep + pl + pgh - pinc * p.nodep * sinip;
            let xnoh = p.nodep;
            p.nodep = alfdp.atan2(betdp);
            if (xnoh - p.nodep).abs() > PI {
                if p.nodep < xnoh {
                    p.nodep += TWO_PI;
                } else {
                    p.nodep -= TWO_PI;
                }
            }
            p.mp += pl;
            p.argpp = xls - p.mp - cosip * p.nodep;
        }
    }
}

impl Satellite {
    fn new(el: &EpochElements) -> Self {
        let emsq = el.ecco * el.ecco;
        let betasq = 1.0 - emsq;
        Self {
            em: el.ecco,
            emsq,
            betasq,
            rtemsq: betasq.sqrt(),
            sinim: el.inclo.sin(),
            cosim: el.inclo.cos(),
            sinomm: el.argpo.sin(),
            cosomm: el.argpo.cos(),
            xnoi: 1.0 / el.no,
        }
    }

    fn terms(&self, b: &BodyOrientation) -> BodyTerms {
        let Self {
            em,
            emsq,
            betasq,
            rtemsq,
            sinim,
            cosim,
            sinomm,
            cosomm,
            xnoi,
        } = *self;

        let a1 = b.cosg * b.cosh + b.sing * b.cosi * b.sinh;
        let a3 = -b.sing * b.cosh + b.cosg * b.cosi * b.sinh;
        let a7 = -b.cosg * b.sinh + b.sing * b.cosi * b.cosh;
        let a8 = b.sing * b.sini;
        let a9 = b.sing * b.sinh + b.cosg * b.cosi * b.cosh;
        let a10 = b.cosg * b.sini;
        let a2 = cosim * a7 + sinim * a8;
        let a4 = cosim * a9 + sinim * a10;
        let a5 = -sinim * a7 + cosim * a8;
        let a6 = -sinim * a9 + cosim * a10;

        let x1 = a1 * cosomm + a2 * sinomm;
        let x2 = a3 * cosomm + a4 * sinomm;
        let x3 = -a1 * sinomm + a2 * cosomm;
        let x4 = -a3 * sinomm + a4 * cosomm;
        let x5 = a5 * sinomm;
        let x6 = a6 * sinomm;
        let x7 = a5 * cosomm;
        let x8 = a6 * cosomm;

        let z31 = 12.0 * x1 * x1 - 3.0 * x3 * x3;
        let z32 = 24.0 * x1 * x2 - 6.0 * x3 * x4;
        let z33 = 12.0 * x2 * x2 - 3.0 * x4 * x4;
        let z1 = 3.0 * (a1 * a1 + a2 * a2) + z31 * emsq;
        let z2 = 6.0 * (a1 * a3 + a2 * a4) + z32 * emsq;
        let z3 = 3.0 * (a3 * a3 + a4 * a4) + z33 * emsq;
        let z11 = -6.0 * a1 * a5 + emsq * (-24.0 * x1 * x7 - 6.0 * x3 * x5);
        let z12 = -6.0 * (a1 * a6 + a3 * a5)
            + emsq * (-24.0 * (x2 * x7 + x1 * x8) - 6.0 * (x3 * x6 + x4 * x5));
        let z13 = -6.0 * a3 * a6 + emsq * (-24.0 * x2 * x8 - 6.0 * x4 * x6);
        let z21 = 6.0 * a2 * a5 + emsq * (24.0 * x1 * x5 - 6.0 * x3 * x7);
        let z22 = 6.0 * (a4 * a5 + a2 * a6)
            + emsq * (24.0 * (x2 * x5 + x1 * x6) - 6.0 * (x4 * x7 + x3 * x8));
        let z23 = 6.0 * a4 * a6 + emsq * (24.0 * x2 * x6 - 6.0 * x4 * x8);

        let s3 = b.cc * xnoi;
        let s4 = s3 * rtemsq;
        BodyTerms {
            s1: -15.0 * em * s4,
            s2: -0.5 * s3 / rtemsq,
            s3,
            s4,
            s5: x1 * x3 + x2 * x4,
            s6: x2 * x3 + x1 * x4,
            s7: x2 * x4 - x1 * x3,
            z1: 2.0 * z1 + betasq * z31,
            z2: 2.0 * z2 + betasq * z32,
            z3: 2.0 * z3 + betasq * z33,
            z11,
            z12,
            z13,
            z21,
            z22,
            z23,
            z31,
            z32,
            z33,
        }
    }
}

impl Periodics {
    fn new(t: &BodyTerms, zm0: f64, zn: f64, ze: f64, emsq: f64) -> Self {
        Self {
            zm0,
            zn,
            ze,
            e2: 2.0 * t.s1 * t.s6,
            e3: 2.0 * t.s1 * t.s7,
            i2: 2.0 * t.s2 * t.z12,
            i3: 2.0 * t.s2 * (t.z13 - t.z11),
            l2: -2.0 * t.s3 * t.z2,
            l3: -2.0 * t.s3 * (t.z3 - t.z1),
            l4: -2.0 * t.s3 * (-21.0 - 9.0 * emsq) * ze,
            gh2: 2.0 * t.s4 * t.z32,
            gh3: 2.0 * t.s4 * (t.z33 - t.z31),
            gh4: -18.0 * t.s4 * ze,
            h2: -2.0 * t.s2 * t.z22,
            h3: -2.0 * t.s2 * (t.z23 - t.z21),
        }
    }
}

impl Resonance {
    fn new(
        el: &EpochElements,
        rates: &SecularRates,
        ds: &DeepSpace,
        sat: &Satellite,
        xke: f64,
    ) -> Option<Self> {
        let nm = el.no;
        let em = el.ecco;
        let one_day = nm > 0.0034906585 && nm < 0.0052359877;
        let half_day = (8.26e-3..=9.24e-3).contains(&nm) && em >= 0.5;
        if !one_day && !half_day {
            return None;
        }

        let theta = ds.gsto % TWO_PI;
        let aonv = (nm / xke).powf(2.0 / 3.0);
        let (sinim, cosim, emsq) = (sat.sinim, sat.cosim, sat.emsq);

        let (terms, xlamo, xfact) = if half_day {
            let cosisq = cosim * cosim;
            let eoc = em * emsq;
            let g201 = -0.306 - (em - 0.64) * 0.440;
            let (g211, g310, g322, g410, g422, g520);
            if em <= 0.65 {
                g211 = 3.616 - 13.2470 * em + 16.2900 * emsq;
                g310 = -19.302 + 117.3900 * em - 228.4190 * emsq + 156.5910 * eoc;
                g322 = -18.9068 + 109.7927 * em - 214.6334 * emsq + 146.5816 * eoc;
                g410 = -41.122 + 242.6940 * em - 471.0940 * emsq + 313.9530 * eoc;
                g422 = -146.407 + 841.8800 * em - 1629.014 * emsq + 1083.4350 * eoc;
                g520 = -532.114 + 3017.977 * em - 5740.032 * emsq + 3708.2760 * eoc;
            } else {
                g211 = -72.099 + 331.819 * em - 508.738 * emsq + 266.724 * eoc;
                g310 = -346.844 + 1582.851 * em - 2415.925 * emsq + 1246.113 * eoc;
                g322 = -342.585 + 1554.908 * em - 2366.899 * emsq + 1215.972 * eoc;
                g410 = -1052.797 + 4758.686 * em - 7193.992 * emsq + 3651.957 * eoc;
                g422 = -3581.690 + 16178.110 * em - 24462.770 * emsq + 12422.520 * eoc;
                g520 = if em > 0.715 {
                    -5149.66 + 29936.92 * em - 54087.36 * emsq + 31324.56 * eoc
                } else {
                    1464.74 - 4664.75 * em + 3763.64 * emsq
                };
            }
            let (g533, g521, g532);
            if em < 0.7 {
                g533 = -919.22770 + 4988.61 * em - 9064.77 * emsq + 5542.21 * eoc;
                g521 = -822.71072 + 4568.6173 * em - 8491.4146 * emsq + 5337.524 * eoc;
                g532 = -853.66600 + 4690.25 * em - 8624.77 * emsq + 5341.4 * eoc;
            } else {
                g533 = -37995.78 + 161616.52 * em - 229838.2 * emsq + 109377.94 * eoc;
                g521 = -51752.104 + 218913.95 * em - 309468.16 * emsq + 146349.42 * eoc;
                g532 = -40023.88 + 170470.89 * em - 242699.48 * emsq + 115605.82 * eoc;
            }

            let sini2 = sinim * sinim;
            let f220 = 0.75 * (1.0 + 2.0 * cosim + cosisq);
            let f221 = 1.5 * sini2;
            let f321 = 1.875 * sinim * (1.0 - 2.0 * cosim - 3.0 * cosisq);
            let f322 = -1.875 * sinim * (1.0 + 2.0 * cosim - 3.0 * cosisq);
            let f441 = 35.0 * sini2 * f220;
            let f442 = 39.3750 * sini2 * sini2;
            let f522 = 9.84375
                * sinim
                * (sini2 * (1.0 - 2.0 * cosim - 5.0 * cosisq)
                    + 0.33333333 * (-2.0 + 4.0 * cosim + 6.0 * cosisq));
            let f523 = sinim
                * (4.92187512 * sini2 * (-2.0 - 4.0 * cosim + 10.0 * cosisq)
                    + 6.56250012 * (1.0 + 2.0 * cosim - 3.0 * cosisq));
            let f542 = 29.53125
                * sinim
                * (2.0 - 8.0 * cosim + cosisq * (-12.0 + 8.0 * cosim + 10.0 * cosisq));
            let f543 = 29.53125
                * sinim
                * (-2.0 - 8.0 * cosim + cosisq * (12.0 + 8.0 * cosim - 10.0 * cosisq));

            let mut temp1 = 3.0 * nm * nm * aonv * aonv;
            let d22 = temp1 * 1.7891679e-6;
            temp1 *= aonv;
            let d32 = temp1 * 3.7393792e-7;
            temp1 *= aonv;
            let d44 = 2.0 * temp1 * 7.3636953e-9;
            temp1 *= aonv;
            let d52 = temp1 * 1.1428639e-7;
            let d54 = 2.0 * temp1 * 2.1765803e-9;

            let terms = ResonanceTerms::HalfDay {
                d2201: d22 * f220 * g201,
                d2211: d22 * f221 * g211,
                d3210: d32 * f321 * g310,
                d3222: d32 * f322 * g322,
                d4410: d44 * f441 * g410,
                d4422: d44 * f442 * g422,
                d5220: d52 * f522 * g520,
                d5232: d52 * f523 * g532,
                d5421: d54 * f542 * g521,
                d5433: d54 * f543 * g533,
            };
            let xlamo = (el.mo + el.nodeo + el.nodeo - theta - theta) % TWO_PI;
            let xfact = rates.mdot + ds.dmdt + 2.0 * (rates.nodedot + ds.dnodt - RPTIM) - el.no;
            (terms, xlamo, xfact)
        } else {
            let g200 = 1.0 + emsq * (-2.5 + 0.8125 * emsq);
            let g310 = 1.0 + 2.0 * emsq;
            let g300 = 1.0 + emsq * (-6.0 + 6.60937 * emsq);
            let f220 = 0.75 * (1.0 + cosim) * (1.0 + cosim);
            let f311 = 0.9375 * sinim * sinim * (1.0 + 3.0 * cosim) - 0.75 * (1.0 + cosim);
            let f330 = 1.875 * (1.0 + cosim).powi(3);
            let del1 = 3.0 * nm * nm * aonv * aonv;
            let terms = ResonanceTerms::OneDay {
                del1: del1 * f311 * g310 * 2.1460748e-6 * aonv,
                del2: 2.0 * del1 * f220 * g200 * 1.7891679e-6,
                del3: 3.0 * del1 * f330 * g300 * 2.2123015e-7 * aonv,
            };
            let xlamo = (el.mo + el.nodeo + el.argpo - theta) % TWO_PI;
            let xpidot = rates.argpdot + rates.nodedot;
            let xfact =
                rates.mdot + xpidot - RPTIM + ds.dmdt + ds.domdt + ds.dnodt - el.no;
            (terms, xlamo, xfact)
        };

        Some(Self {
            terms,
            xlamo,
            xfact,
            no: el.no,
            argpo: el.argpo,
            argpdot: rates.argpdot,
        })
    }

    /// Mean motion rate, longitude rate and mean motion acceleration
    /// at one point of the resonance integration
    fn rates(&self, xli: f64, xni: f64, atime: f64) -> (f64, f64, f64) {
        const FASX2: f64 = 0.13130908;
        const FASX4: f64 = 2.8843198;
        const FASX6: f64 = 0.37448087;
        const G22: f64 = 5.7686396;
        const G32: f64 = 0.95240898;
        const G44: f64 = 1.8014998;
        const G52: f64 = 1.0508330;
        const G54: f64 = 4.4108898;

        let xldot = xni + self.xfact;
        match self.terms {
            ResonanceTerms::OneDay { del1, del2, del3 } => {
                let xndt = del1 * (xli - FASX2).sin()
                    + del2 * (2.0 * (xli - FASX4)).sin()
                    + del3 * (3.0 * (xli - FASX6)).sin();
                let xnddt = del1 * (xli - FASX2).cos()
                    + 2.0 * del2 * (2.0 * (xli - FASX4)).cos()
                    + 3.0 * del3 * (3.0 * (xli - FASX6)).cos();
                (xndt, xldot, xnddt * xldot)
            }
            ResonanceTerms::HalfDay {
                d2201,
                d2211,
                d3210,
                d3222,
                d4410,
                d4422,
                d5220,
                d5232,
                d5421,
                d5433,
            } => {
                let xomi = self.argpo + self.argpdot * atime;
                let x2omi = xomi + xomi;
                let x2li = xli + xli;
                let xndt = d2201 * (x2omi + xli - G22).sin()
                    + d2211 * (xli - G22).sin()
                    + d3210 * (xomi + xli - G32).sin()
                    + d3222 * (-xomi + xli - G32).sin()
                    + d4410 * (x2omi + x2li - G44).sin()
                    + d4422 * (x2li - G44).sin()
                    + d5220 * (xomi + xli - G52).sin()
                    + d5232 * (-xomi + xli - G52).sin()
                    + d5421 * (xomi + x2li - G54).sin()
                    + d5433 * (-xomi + x2li - G54).sin();
                let xnddt = d2201 * (x2omi + xli - G22).cos()
                    + d2211 * (xli - G22).cos()
                    + d3210 * (xomi + xli - G32).cos()
                    + d3222 * (-xomi + xli - G32).cos()
                    + d5220 * (xomi + xli - G52).cos()
                    + d5232 * (-xomi + xli - G52).cos()
                    + 2.0
                        * (d4410 * (x2omi + x2li - G44).cos()
                            + d4422 * (x2li - G44).cos()
                            + d5421 * (xomi + x2li - G54).cos()
                            + d5433 * (-xomi + x2li - G54).cos());
                (xndt, xldot, xnddt * xldot)
            }
        }
    }
}
