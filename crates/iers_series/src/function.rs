//! Time functions evaluated against fundamental arguments or epochs.

use iers_time::Epoch;

use crate::arguments::horner;
use crate::elements::BodiesElements;

/// A scalar quantity of the nutation theory evaluated from the
/// fundamental arguments (angles in radians).
pub trait NutationFunction: Send + Sync {
    fn value(&self, elements: &BodiesElements) -> f64;
}

/// A quantity evaluated directly at an epoch.
pub trait TimeFunction<T>: Send + Sync {
    fn value(&self, epoch: Epoch) -> T;
}

impl<T, F> TimeFunction<T> for F
where
    F: Fn(Epoch) -> T + Send + Sync,
{
    fn value(&self, epoch: Epoch) -> T {
        self(epoch)
    }
}

/// Polynomial in Julian centuries of TT, coefficients lowest power first.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coefficients: Vec<f64>,
}

impl Polynomial {
    pub fn new(coefficients: &[f64]) -> Self {
        Self {
            coefficients: coefficients.to_vec(),
        }
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }
}

impl NutationFunction for Polynomial {
    fn value(&self, elements: &BodiesElements) -> f64 {
        horner(&self.coefficients, elements.tc())
    }
}

/// Identically zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Zero;

impl NutationFunction for Zero {
    fn value(&self, _elements: &BodiesElements) -> f64 {
        0.0
    }
}
