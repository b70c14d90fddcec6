//! Precession and nutation frame transforms.
//!
//! [`ModProvider`] rotates mean-of-J2000 coordinates to mean-of-date and
//! [`TodProvider`] rotates mean-of-date coordinates to true-of-date, both
//! evaluating the functions of a [`iers_conventions::ConventionSet`].
//!
//! Rotations follow nalgebra's convention: a [`nalgebra::Rotation3`]
//! applied to a vector expressed in the source frame yields the same
//! vector expressed in the target frame.

pub mod nutation;
pub mod precession;

pub use nutation::{NutationAngles, NutationFunctions, TodProvider, nutation_rotation};
pub use precession::{ModProvider, PrecessionAngles, precession_rotation};
