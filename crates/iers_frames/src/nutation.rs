//! True-of-date frame: nutation of the mean equator and equinox.
//!
//! The nutation in longitude and obliquity come from the convention's
//! series, optionally corrected by the celestial pole offsets of an IERS
//! EOP history. The rotation is built from the mean obliquity of date:
//!
//! ```text
//! N = Rx(εA + Δε) · Rz(Δψ) · Rx(−εA)
//! ```
//!
//! which maps mean-of-date coordinates to true-of-date coordinates.

use std::sync::Arc;

use iers_conventions::{ConventionSet, IersError, SharedFunction};
use iers_series::{FundamentalArguments, NutationFunction};
use iers_time::{Epoch, EopHistory, NutationCorrection, PoleCorrection};
use nalgebra::{Rotation3, Vector3};
use tracing::debug;

/// Nutation quantities at one epoch, all in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NutationAngles {
    /// Nutation in longitude, EOP correction included.
    pub delta_psi: f64,
    /// Nutation in obliquity, EOP correction included.
    pub delta_epsilon: f64,
    /// Mean obliquity of the ecliptic.
    pub mean_obliquity: f64,
    /// Equation of the equinoxes.
    pub equation_of_equinoxes: f64,
}

impl NutationAngles {
    /// Obliquity of the true equator of date.
    pub fn true_obliquity(&self) -> f64 {
        self.mean_obliquity + self.delta_epsilon
    }
}

/// Rotation from mean-of-date to true-of-date for the given angles (radians).
pub fn nutation_rotation(
    mean_obliquity: f64,
    delta_psi: f64,
    delta_epsilon: f64,
) -> Rotation3<f64> {
    Rotation3::from_axis_angle(&Vector3::x_axis(), mean_obliquity + delta_epsilon)
        * Rotation3::from_axis_angle(&Vector3::z_axis(), delta_psi)
        * Rotation3::from_axis_angle(&Vector3::x_axis(), -mean_obliquity)
}

/// The functions a [`TodProvider`] evaluates.
#[derive(Clone)]
pub struct NutationFunctions {
    pub arguments: Arc<FundamentalArguments>,
    pub nutation_in_longitude: SharedFunction,
    pub nutation_in_obliquity: SharedFunction,
    pub mean_obliquity: SharedFunction,
    pub equation_of_equinoxes_correction: SharedFunction,
}

impl NutationFunctions {
    /// Fetch every function from `conventions`, failing on the first one
    /// the convention does not define or cannot load.
    pub fn from_conventions(conventions: &ConventionSet) -> Result<Self, IersError> {
        Ok(Self {
            arguments: conventions.nutation_arguments()?,
            nutation_in_longitude: conventions.nutation_in_longitude_function()?,
            nutation_in_obliquity: conventions.nutation_in_obliquity_function()?,
            mean_obliquity: conventions.mean_obliquity_function()?,
            equation_of_equinoxes_correction: conventions
                .equation_of_equinoxes_correction_function()?,
        })
    }
}

/// Mean-of-date to true-of-date transform provider.
pub struct TodProvider {
    functions: NutationFunctions,
    eop: Option<Arc<EopHistory>>,
}

impl std::fmt::Debug for TodProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodProvider")
            .field("eop_rows", &self.eop.as_ref().map(|h| h.len()))
            .finish_non_exhaustive()
    }
}

impl TodProvider {
    /// Build a provider from a convention set.
    ///
    /// Without an EOP history the celestial pole offsets, LOD and polar
    /// motion are all zero.
    pub fn new(
        conventions: &ConventionSet,
        eop: Option<Arc<EopHistory>>,
    ) -> Result<Self, IersError> {
        let functions = NutationFunctions::from_conventions(conventions)?;
        debug!(
            conventions = %conventions.conventions(),
            eop = eop.is_some(),
            "true-of-date provider ready"
        );
        Ok(Self::from_functions(functions, eop))
    }

    pub fn from_functions(functions: NutationFunctions, eop: Option<Arc<EopHistory>>) -> Self {
        Self { functions, eop }
    }

    pub fn eop_history(&self) -> Option<&EopHistory> {
        self.eop.as_deref()
    }

    fn nutation_correction(&self, epoch: Epoch) -> NutationCorrection {
        self.eop
            .as_ref()
            .map_or(NutationCorrection::NULL, |h| h.nutation_correction(epoch))
    }

    /// All nutation quantities at `epoch`, from a single evaluation of the
    /// fundamental arguments.
    pub fn angles(&self, epoch: Epoch) -> NutationAngles {
        let elements = self.functions.arguments.evaluate_all(epoch);
        let raw_psi = self.functions.nutation_in_longitude.value(&elements);
        let raw_eps = self.functions.nutation_in_obliquity.value(&elements);
        let mean_obliquity = self.functions.mean_obliquity.value(&elements);
        let correction = self.functions.equation_of_equinoxes_correction.value(&elements);
        let eop = self.nutation_correction(epoch);

        NutationAngles {
            delta_psi: raw_psi + eop.ddpsi,
            delta_epsilon: raw_eps + eop.ddeps,
            mean_obliquity,
            // The EOP offsets are corrections to the pole, not to the
            // equinox: the equation of the equinoxes uses the model Δψ.
            equation_of_equinoxes: raw_psi * mean_obliquity.cos() + correction,
        }
    }

    /// Rotation from mean-of-date to true-of-date at `epoch`.
    pub fn transform(&self, epoch: Epoch) -> Rotation3<f64> {
        let a = self.angles(epoch);
        nutation_rotation(a.mean_obliquity, a.delta_psi, a.delta_epsilon)
    }

    /// Equation of the equinoxes in radians.
    pub fn equation_of_equinoxes(&self, epoch: Epoch) -> f64 {
        self.angles(epoch).equation_of_equinoxes
    }

    /// Length of day excess in seconds, zero outside the EOP coverage.
    pub fn lod(&self, epoch: Epoch) -> f64 {
        self.eop.as_ref().map_or(0.0, |h| h.lod(epoch))
    }

    /// Polar motion in radians, null outside the EOP coverage.
    pub fn pole_correction(&self, epoch: Epoch) -> PoleCorrection {
        self.eop
            .as_ref()
            .map_or(PoleCorrection::NULL, |h| h.pole_correction(epoch))
    }
}
