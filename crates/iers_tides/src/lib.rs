//! Solid Earth tide corrections to low-degree gravity field coefficients.
//!
//! [`TidesField`] combines the Love-number response to each tide-generating
//! body with the convention's frequency-dependent corrections and serves the
//! result through [`NormalizedSphericalHarmonicsProvider`], recomputing only
//! when asked for a different time offset.

pub mod body;
pub mod error;
pub mod field;
pub mod legendre;

pub use body::{BodyFrame, CelestialBody, EarthRotationFrame, StaticBody};
pub use error::TidesError;
pub use field::{
    CACHE_TOLERANCE_ULPS, EARTH_EQUATORIAL_RADIUS, EARTH_MU, NormalizedSphericalHarmonicsProvider,
    TideSystem, TidesField, TidesFieldConfig, no_frequency_dependence, permanent_tide_c20,
    ulps_equal,
};
pub use legendre::{LegendreRecursion, MAX_DEGREE, TriangularTable};
