//! Mean-of-date frame: precession of the mean equator and equinox.
//!
//! Three equatorial angles ζA, θA and zA (Lieske et al. 1977, as used by
//! the IERS 1996 conventions) carry the mean J2000.0 frame to the mean
//! frame of date:
//!
//! ```text
//! P = Rz(zA) · Ry(−θA) · Rz(ζA)
//! ```

use iers_conventions::{ConventionSet, IersError, SharedFunction};
use iers_series::{FundamentalArguments, NutationFunction};
use iers_time::Epoch;
use nalgebra::{Rotation3, Vector3};
use std::sync::Arc;
use tracing::debug;

/// Equatorial precession angles in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrecessionAngles {
    pub zeta: f64,
    pub theta: f64,
    pub z: f64,
}

/// Rotation from mean-of-J2000 to mean-of-date for the given angles.
pub fn precession_rotation(angles: PrecessionAngles) -> Rotation3<f64> {
    Rotation3::from_axis_angle(&Vector3::z_axis(), angles.z)
        * Rotation3::from_axis_angle(&Vector3::y_axis(), -angles.theta)
        * Rotation3::from_axis_angle(&Vector3::z_axis(), angles.zeta)
}

/// Mean-of-J2000 to mean-of-date transform provider.
pub struct ModProvider {
    arguments: Arc<FundamentalArguments>,
    zeta: SharedFunction,
    theta: SharedFunction,
    z: SharedFunction,
}

impl std::fmt::Debug for ModProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModProvider").finish_non_exhaustive()
    }
}

impl ModProvider {
    /// Fails with [`IersError::UnsupportedModel`] for conventions that
    /// express precession through the CIP coordinates instead.
    pub fn new(conventions: &ConventionSet) -> Result<Self, IersError> {
        let provider = Self {
            zeta: conventions.precession_zeta_function()?,
            theta: conventions.precession_theta_function()?,
            z: conventions.precession_z_function()?,
            arguments: conventions.nutation_arguments()?,
        };
        debug!(conventions = %conventions.conventions(), "mean-of-date provider ready");
        Ok(provider)
    }

    pub fn angles(&self, epoch: Epoch) -> PrecessionAngles {
        let elements = self.arguments.evaluate_all(epoch);
        PrecessionAngles {
            zeta: self.zeta.value(&elements),
            theta: self.theta.value(&elements),
            z: self.z.value(&elements),
        }
    }

    pub fn transform(&self, epoch: Epoch) -> Rotation3<f64> {
        precession_rotation(self.angles(epoch))
    }
}
