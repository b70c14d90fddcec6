//! Frequency dependence of the degree-2 Love numbers.
//!
//! The frequency-independent step uses one nominal Love number per
//! (n, m); the constituents listed here correct ΔC20, ΔC21, ΔS21, ΔC22
//! and ΔS22 for the departure of each tidal frequency from nominal
//! (IERS Conventions 2010, eq. 6.8a–c).

use std::f64::consts::PI;
use std::sync::Arc;

use iers_series::{FundamentalArguments, TideTerm, TimeFunction};
use iers_time::{Epoch, SECONDS_PER_DAY, gmst_rad};

/// Corrections `[ΔC20, ΔC21, ΔS21, ΔC22, ΔS22]` at an epoch.
pub struct FrequencyDependentTides {
    arguments: Arc<FundamentalArguments>,
    terms: Vec<TideTerm>,
    ut1_minus_tt: f64,
}

impl FrequencyDependentTides {
    pub fn new(arguments: Arc<FundamentalArguments>, terms: Vec<TideTerm>) -> Self {
        Self {
            arguments,
            terms,
            ut1_minus_tt: 0.0,
        }
    }

    /// UT1 − TT in seconds used to evaluate GMST. Defaults to zero.
    pub fn with_ut1_minus_tt(mut self, seconds: f64) -> Self {
        self.ut1_minus_tt = seconds;
        self
    }

    pub fn terms(&self) -> &[TideTerm] {
        &self.terms
    }

    pub fn corrections(&self, epoch: Epoch) -> [f64; 5] {
        let elements = self.arguments.evaluate_all(epoch);
        let jd_ut1 = epoch.as_jd_tt() + self.ut1_minus_tt / SECONDS_PER_DAY;
        let theta_g_plus_pi = gmst_rad(jd_ut1) + PI;

        let mut out = [0.0; 5];
        for term in &self.terms {
            let theta_f = term.order as f64 * theta_g_plus_pi
                - elements.linear_combination(&term.multipliers);
            let (s, c) = theta_f.sin_cos();
            let (ip, op) = (term.in_phase, term.out_of_phase);
            match term.order {
                0 => out[0] += ip * c - op * s,
                1 => {
                    out[1] += ip * s + op * c;
                    out[2] += ip * c - op * s;
                }
                _ => {
                    out[3] += ip * c;
                    out[4] -= ip * s;
                }
            }
        }
        out
    }
}

impl TimeFunction<[f64; 5]> for FrequencyDependentTides {
    fn value(&self, epoch: Epoch) -> [f64; 5] {
        self.corrections(epoch)
    }
}

impl std::fmt::Debug for FrequencyDependentTides {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrequencyDependentTides")
            .field("terms", &self.terms.len())
            .field("ut1_minus_tt", &self.ut1_minus_tt)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iers_series::TIDE_AMPLITUDE_SCALE;

    fn omega_only() -> Arc<FundamentalArguments> {
        Arc::new(FundamentalArguments::parse("Om rad 0.5", "args").unwrap())
    }

    fn term(order: usize, multipliers: [i32; 5], ip: f64, op: f64) -> TideTerm {
        TideTerm {
            order,
            multipliers,
            in_phase: ip * TIDE_AMPLITUDE_SCALE,
            out_of_phase: op * TIDE_AMPLITUDE_SCALE,
        }
    }

    #[test]
    fn long_period_term_only_touches_c20() {
        let tides = FrequencyDependentTides::new(
            omega_only(),
            vec![term(0, [0, 0, 0, 0, 1], 16.6, -6.7)],
        );
        let out = tides.corrections(Epoch::J2000);
        // θ = −Ω
        let (s, c) = (-0.5_f64).sin_cos();
        let expected = (16.6 * c + 6.7 * s) * TIDE_AMPLITUDE_SCALE;
        assert!((out[0] - expected).abs() < 1e-25, "out = {out:?}");
        assert_eq!(&out[1..], &[0.0; 4]);
    }

    #[test]
    fn diurnal_term_uses_sidereal_angle() {
        let tides =
            FrequencyDependentTides::new(omega_only(), vec![term(1, [0; 5], 470.9, -30.2)]);
        let epoch = Epoch::J2000;
        let theta = gmst_rad(epoch.as_jd_tt()) + PI;
        let (s, c) = theta.sin_cos();
        let out = tides.corrections(epoch);
        let scale = TIDE_AMPLITUDE_SCALE;
        assert!((out[1] - (470.9 * s - 30.2 * c) * scale).abs() < 1e-24);
        assert!((out[2] - (470.9 * c + 30.2 * s) * scale).abs() < 1e-24);
        assert_eq!(out[0], 0.0);
    }

    #[test]
    fn semidiurnal_term_fills_c22_s22() {
        let tides = FrequencyDependentTides::new(omega_only(), vec![term(2, [0; 5], -0.3, 0.0)]);
        let epoch = Epoch::from_tt_seconds(3600.0);
        let theta = 2.0 * (gmst_rad(epoch.as_jd_tt()) + PI);
        let out = tides.corrections(epoch);
        let ip = -0.3 * TIDE_AMPLITUDE_SCALE;
        assert!((out[3] - ip * theta.cos()).abs() < 1e-26);
        assert!((out[4] + ip * theta.sin()).abs() < 1e-26);
    }

    #[test]
    fn ut1_offset_moves_diurnal_phase() {
        let terms = vec![term(1, [0; 5], 100.0, 0.0)];
        let a = FrequencyDependentTides::new(omega_only(), terms.clone());
        let b = FrequencyDependentTides::new(omega_only(), terms).with_ut1_minus_tt(-3600.0);
        let epoch = Epoch::J2000;
        let (ca, cb) = (a.corrections(epoch), b.corrections(epoch));
        assert!((ca[2] - cb[2]).abs() > 1e-11, "a = {ca:?}, b = {cb:?}");
    }
}
