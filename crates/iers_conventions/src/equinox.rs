//! Moon terms added to the equation of the equinoxes by IAU 1994
//! resolution C7.

use iers_series::{ARC_SECONDS_TO_RADIANS, BodiesElements, NutationFunction};
use iers_time::Epoch;

/// `eqe1·sin Ω + eqe2·sin 2Ω` from 1997-02-27T00:00:00 UTC on, zero before.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquinoxCorrection1996 {
    eqe1: f64,
    eqe2: f64,
    start: Epoch,
}

impl EquinoxCorrection1996 {
    pub fn new() -> Self {
        Self {
            eqe1: 0.00264 * ARC_SECONDS_TO_RADIANS,
            eqe2: 0.000063 * ARC_SECONDS_TO_RADIANS,
            // 1997-02-27T00:00:00 UTC, when TAI − UTC was 30 s.
            start: Epoch::from_tai_calendar(1997, 2, 27, 0, 0, 30.0),
        }
    }

    /// First epoch at which the terms apply.
    pub fn start(&self) -> Epoch {
        self.start
    }
}

impl Default for EquinoxCorrection1996 {
    fn default() -> Self {
        Self::new()
    }
}

impl NutationFunction for EquinoxCorrection1996 {
    fn value(&self, elements: &BodiesElements) -> f64 {
        if elements.epoch() < self.start {
            return 0.0;
        }
        let om = elements.omega();
        self.eqe1 * om.sin() + self.eqe2 * (om + om).sin()
    }
}
