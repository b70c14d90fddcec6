//! Tide-induced corrections to the central body's gravity field.
//!
//! Frequency-independent part from IERS Conventions 2010 eq. 6.6 (direct
//! effect on degrees 2 and 3) and eq. 6.7 (indirect effect of degree-2 tides
//! on degree 4), frequency-dependent part from eq. 6.8a–c.
//!
//! Coefficients are cached for the last requested offset only.

use std::sync::Arc;

use iers_conventions::{ConventionSet, SharedTideCorrection};
use iers_series::{LoveNumbers, SeriesLoader, TimeFunction};
use iers_time::Epoch;
use tracing::{debug, trace};

use crate::body::{BodyFrame, CelestialBody};
use crate::error::TidesError;
use crate::legendre::{LegendreRecursion, MAX_DEGREE, TriangularTable};

/// Offsets closer than this many units in the last place share a cache entry.
pub const CACHE_TOLERANCE_ULPS: u64 = 1;

/// Equatorial radius of the Earth, IERS 2010 (m).
pub const EARTH_EQUATORIAL_RADIUS: f64 = 6_378_136.6;

/// Geocentric gravitational constant, IERS 2010 (m³/s²).
pub const EARTH_MU: f64 = 3.986_004_418e14;

/// How the static field treats the permanent tide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TideSystem {
    /// Permanent tide included in the static C20.
    ZeroTide,
    /// Permanent tide excluded.
    TideFree,
    Unknown,
}

/// Contribution of the permanent tide to C20 for nominal Love number `k20`
/// (IERS Conventions 2010, eq. 6.13).
pub fn permanent_tide_c20(k20: f64) -> f64 {
    4.4228e-8 * -0.31460 * k20
}

/// Gravity field coefficients as a function of time offset from the
/// reference epoch.
pub trait NormalizedSphericalHarmonicsProvider {
    fn max_degree(&self) -> usize;
    fn max_order(&self) -> usize;
    /// Central attraction coefficient, m³/s².
    fn mu(&self) -> f64;
    /// Reference radius, m.
    fn ae(&self) -> f64;
    fn reference_epoch(&self) -> Epoch;

    /// Seconds from [`reference_epoch`](Self::reference_epoch) to `epoch`.
    fn offset(&self, epoch: Epoch) -> f64 {
        epoch.duration_from(self.reference_epoch())
    }

    fn tide_system(&self) -> TideSystem;
    fn normalized_cnm(&mut self, offset: f64, n: usize, m: usize) -> Result<f64, TidesError>;
    fn normalized_snm(&mut self, offset: f64, n: usize, m: usize) -> Result<f64, TidesError>;
}

/// Tidal field configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TidesFieldConfig {
    /// Reference radius of the central body, m.
    pub ae: f64,
    /// Central attraction coefficient, m³/s².
    pub mu: f64,
    /// Tide system of the static field the corrections are added to.
    pub central_tide_system: TideSystem,
    /// Removed from ΔC20 when the static field is zero-tide.
    pub delta_c20_permanent_tide: f64,
}

impl TidesFieldConfig {
    /// Earth constants from IERS 2010 with the permanent tide for `k20`.
    pub fn earth(central_tide_system: TideSystem, k20: f64) -> Self {
        Self {
            ae: EARTH_EQUATORIAL_RADIUS,
            mu: EARTH_MU,
            central_tide_system,
            delta_c20_permanent_tide: permanent_tide_c20(k20),
        }
    }

    fn validate(&self) -> Result<(), TidesError> {
        if !(self.ae.is_finite() && self.ae > 0.0) {
            return Err(TidesError::InvalidConfig("ae must be positive"));
        }
        if !(self.mu.is_finite() && self.mu > 0.0) {
            return Err(TidesError::InvalidConfig("mu must be positive"));
        }
        if !self.delta_c20_permanent_tide.is_finite() {
            return Err(TidesError::InvalidConfig(
                "delta_c20_permanent_tide must be finite",
            ));
        }
        Ok(())
    }
}

/// Whether `a` and `b` are at most `max_ulps` representable values apart.
/// NaN equals nothing.
pub fn ulps_equal(a: f64, b: f64, max_ulps: u64) -> bool {
    if a.is_nan() || b.is_nan() {
        return false;
    }
    let (ia, ib) = (a.to_bits() as i64, b.to_bits() as i64);
    if (ia ^ ib) >= 0 {
        ia.abs_diff(ib) <= max_ulps
    } else {
        // Opposite signs: distance through zero.
        let da = (ia & i64::MAX) as u64;
        let db = (ib & i64::MAX) as u64;
        da.saturating_add(db) <= max_ulps
    }
}

#[derive(Debug, Clone)]
struct CoefficientCache {
    /// NaN until the first successful refill.
    offset: f64,
    cnm: TriangularTable,
    snm: TriangularTable,
}

impl CoefficientCache {
    /// Add the frequency-independent tides raised by one body.
    ///
    /// `mass_ratio` is GM_body / GM_central, `r_ratio` is ae / r.
    fn add_body(
        &mut self,
        love: &LoveNumbers,
        pnm: &TriangularTable,
        mass_ratio: f64,
        r_ratio: f64,
        cos_lambda: f64,
        sin_lambda: f64,
    ) {
        let size = love.size();
        let mut f_m = mass_ratio;
        let mut cos_m_lambda = 1.0;
        let mut sin_m_lambda = 0.0;

        for m in 0..size {
            let mut f_n_plus_1 = f_m;
            for n in m..size {
                f_n_plus_1 *= r_ratio;
                let coeff = (f_n_plus_1 / (2 * n + 1) as f64) * pnm[(n, m)];
                let c_cos = coeff * cos_m_lambda;
                let c_sin = coeff * sin_m_lambda;

                let k_r = love.real(n, m);
                let k_i = love.imaginary(n, m);
                self.cnm[(n, m)] += k_r * c_cos + k_i * c_sin;
                self.snm[(n, m)] += k_r * c_sin - k_i * c_cos;

                if n == 2 {
                    // Degree-2 tides leak into degree 4 through k⁺.
                    let k_p = love.plus(n, m);
                    self.cnm[(4, m)] += k_p * c_cos;
                    self.snm[(4, m)] += k_p * c_sin;
                }
            }

            let next_cos = cos_m_lambda * cos_lambda - sin_m_lambda * sin_lambda;
            sin_m_lambda = sin_m_lambda * cos_lambda + cos_m_lambda * sin_lambda;
            cos_m_lambda = next_cos;
            f_m *= r_ratio;
        }
    }
}

/// Tidal corrections ΔCnm, ΔSnm for degrees 0..=4.
///
/// Refills need `&mut self`; share across threads behind a `Mutex`.
pub struct TidesField {
    config: TidesFieldConfig,
    love: LoveNumbers,
    delta_cs: SharedTideCorrection,
    frame: Box<dyn BodyFrame>,
    bodies: Vec<Box<dyn CelestialBody>>,
    legendre: LegendreRecursion,
    cache: CoefficientCache,
    refills: u64,
}

impl std::fmt::Debug for TidesField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bodies: Vec<&str> = self.bodies.iter().map(|b| b.name()).collect();
        f.debug_struct("TidesField")
            .field("config", &self.config)
            .field("love_size", &self.love.size())
            .field("bodies", &bodies)
            .field("cached_offset", &self.cache.offset)
            .field("refills", &self.refills)
            .finish()
    }
}

impl TidesField {
    pub fn new(
        config: TidesFieldConfig,
        love: LoveNumbers,
        delta_cs: SharedTideCorrection,
        frame: Box<dyn BodyFrame>,
        bodies: Vec<Box<dyn CelestialBody>>,
    ) -> Result<Self, TidesError> {
        config.validate()?;
        if love.size() > MAX_DEGREE + 1 {
            return Err(TidesError::InvalidConfig(
                "Love numbers must not exceed degree 4",
            ));
        }
        Ok(Self {
            config,
            love,
            delta_cs,
            frame,
            bodies,
            legendre: LegendreRecursion::new(),
            cache: CoefficientCache {
                offset: f64::NAN,
                cnm: TriangularTable::zeros(),
                snm: TriangularTable::zeros(),
            },
            refills: 0,
        })
    }

    /// Build with Love numbers read from `love_name` and the convention's
    /// frequency-dependent correction. Fails if either cannot be loaded.
    pub fn from_conventions(
        config: TidesFieldConfig,
        conventions: &ConventionSet,
        loader: &dyn SeriesLoader,
        love_name: &str,
        frame: Box<dyn BodyFrame>,
        bodies: Vec<Box<dyn CelestialBody>>,
    ) -> Result<Self, TidesError> {
        let love = loader
            .load_love_numbers(love_name)
            .map_err(|source| TidesError::ResourceLoad {
                name: love_name.to_string(),
                source,
            })?;
        let delta_cs = conventions.tide_frequency_dependence_function()?;
        Self::new(config, love, delta_cs, frame, bodies)
    }

    pub fn config(&self) -> &TidesFieldConfig {
        &self.config
    }

    /// Number of cache refills so far.
    pub fn refill_count(&self) -> u64 {
        self.refills
    }

    /// Both coefficient tables at `offset`.
    pub fn coefficients(
        &mut self,
        offset: f64,
    ) -> Result<(&TriangularTable, &TriangularTable), TidesError> {
        self.ensure_cached(offset)?;
        Ok((&self.cache.cnm, &self.cache.snm))
    }

    fn ensure_cached(&mut self, offset: f64) -> Result<(), TidesError> {
        if ulps_equal(offset, self.cache.offset, CACHE_TOLERANCE_ULPS) {
            return Ok(());
        }
        // Invalidate first: a failed refill must not leave a usable key.
        self.cache.offset = f64::NAN;
        self.refill(offset)?;
        self.cache.offset = offset;
        self.refills += 1;
        Ok(())
    }

    fn refill(&mut self, offset: f64) -> Result<(), TidesError> {
        self.cache.cnm.reset();
        self.cache.snm.reset();

        let epoch = Epoch::J2000.shifted_by(offset);
        let rotation = self.frame.rotation_from_inertial(epoch);

        for body in &self.bodies {
            let position = rotation * body.position(epoch)?;
            let (x, y, z) = (position.x, position.y, position.z);
            let rho = (x * x + y * y).sqrt();
            let r = (rho * rho + z * z).sqrt();
            trace!(body = body.name(), r, "tide-generating body");

            let pnm = self.legendre.evaluate(z / r, rho / r);
            self.cache.add_body(
                &self.love,
                pnm,
                body.gm() / self.config.mu,
                self.config.ae / r,
                x / rho,
                y / rho,
            );
        }

        let delta = self.delta_cs.value(epoch);
        self.cache.cnm[(2, 0)] += delta[0];
        self.cache.cnm[(2, 1)] += delta[1];
        self.cache.snm[(2, 1)] += delta[2];
        self.cache.cnm[(2, 2)] += delta[3];
        self.cache.snm[(2, 2)] += delta[4];

        if self.config.central_tide_system == TideSystem::ZeroTide {
            self.cache.cnm[(2, 0)] -= self.config.delta_c20_permanent_tide;
        }

        debug!(offset, bodies = self.bodies.len(), "tidal coefficients refilled");
        Ok(())
    }
}

fn check_index(n: usize, m: usize) -> Result<(), TidesError> {
    if m > n || n > MAX_DEGREE {
        return Err(TidesError::InvalidIndex {
            degree: n,
            order: m,
            max: MAX_DEGREE,
        });
    }
    Ok(())
}

impl NormalizedSphericalHarmonicsProvider for TidesField {
    fn max_degree(&self) -> usize {
        MAX_DEGREE
    }

    fn max_order(&self) -> usize {
        MAX_DEGREE
    }

    fn mu(&self) -> f64 {
        self.config.mu
    }

    fn ae(&self) -> f64 {
        self.config.ae
    }

    fn reference_epoch(&self) -> Epoch {
        Epoch::J2000
    }

    /// Always zero-tide: the permanent tide is either removed here or was
    /// never in the corrections.
    fn tide_system(&self) -> TideSystem {
        TideSystem::ZeroTide
    }

    fn normalized_cnm(&mut self, offset: f64, n: usize, m: usize) -> Result<f64, TidesError> {
        check_index(n, m)?;
        self.ensure_cached(offset)?;
        Ok(self.cache.cnm[(n, m)])
    }

    fn normalized_snm(&mut self, offset: f64, n: usize, m: usize) -> Result<f64, TidesError> {
        check_index(n, m)?;
        self.ensure_cached(offset)?;
        Ok(self.cache.snm[(n, m)])
    }
}

/// Frequency-dependent correction that is identically zero.
pub fn no_frequency_dependence() -> SharedTideCorrection {
    Arc::new(|_epoch: Epoch| [0.0; 5])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ulps_equal_neighbours() {
        let a = 1234.5_f64;
        let next = f64::from_bits(a.to_bits() + 1);
        let next2 = f64::from_bits(a.to_bits() + 2);
        assert!(ulps_equal(a, a, 1));
        assert!(ulps_equal(a, next, 1));
        assert!(!ulps_equal(a, next2, 1));
        assert!(ulps_equal(a, next2, 2));
    }

    #[test]
    fn ulps_equal_across_zero() {
        assert!(ulps_equal(0.0, -0.0, 0));
        let tiny = f64::from_bits(1);
        assert!(ulps_equal(tiny, -0.0, 1));
        assert!(!ulps_equal(tiny, -tiny, 1));
        assert!(ulps_equal(tiny, -tiny, 2));
    }

    #[test]
    fn nan_never_equal() {
        assert!(!ulps_equal(f64::NAN, f64::NAN, 1));
        assert!(!ulps_equal(0.0, f64::NAN, u64::MAX));
    }

    #[test]
    fn permanent_tide_for_iers2010_k20() {
        let c = permanent_tide_c20(0.30190);
        assert!((c + 4.2006e-9).abs() < 1e-12, "c = {c}");
    }

    #[test]
    fn config_validation() {
        let good = TidesFieldConfig::earth(TideSystem::TideFree, 0.3);
        assert!(good.validate().is_ok());
        let bad_ae = TidesFieldConfig { ae: 0.0, ..good };
        assert_eq!(
            bad_ae.validate(),
            Err(TidesError::InvalidConfig("ae must be positive"))
        );
        let bad_mu = TidesFieldConfig { mu: f64::NAN, ..good };
        assert!(bad_mu.validate().is_err());
        let bad_tide = TidesFieldConfig {
            delta_c20_permanent_tide: f64::INFINITY,
            ..good
        };
        assert!(bad_tide.validate().is_err());
    }

    #[test]
    fn index_bounds() {
        assert!(check_index(4, 4).is_ok());
        assert!(check_index(0, 0).is_ok());
        assert!(matches!(
            check_index(2, 3),
            Err(TidesError::InvalidIndex { degree: 2, order: 3, max: 4 })
        ));
        assert!(check_index(5, 0).is_err());
    }
}
