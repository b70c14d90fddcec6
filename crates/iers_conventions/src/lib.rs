//! IERS conventions (1996, 2003, 2010) as sets of lazily loaded functions.
//!
//! Each [`ConventionSet`] accessor either hands out a shared function built
//! from the convention's tables or fails with
//! [`IersError::UnsupportedModel`]. Tables are read through a
//! [`SeriesLoader`] on first access and memoized, so later calls return the
//! same `Arc`. A failed load is memoized too.

pub mod equinox;
pub mod error;
mod sources;
pub mod tides;

use std::fmt::{Display, Formatter};
use std::sync::{Arc, OnceLock};

use iers_series::{
    ARC_SECONDS_TO_RADIANS, FundamentalArguments, NutationFunction, Polynomial, SeriesLoader,
    TimeFunction, Zero,
};
use tracing::debug;

pub use equinox::EquinoxCorrection1996;
pub use error::IersError;
pub use tides::FrequencyDependentTides;

use sources::{FunctionSource, sources};

/// Supported IERS conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IersConventions {
    Iers1996,
    Iers2003,
    Iers2010,
}

impl IersConventions {
    pub const ALL: [Self; 3] = [Self::Iers1996, Self::Iers2003, Self::Iers2010];

    /// Publication year.
    pub const fn year(self) -> u16 {
        match self {
            Self::Iers1996 => 1996,
            Self::Iers2003 => 2003,
            Self::Iers2010 => 2010,
        }
    }

    pub const fn from_year(year: u16) -> Option<Self> {
        match year {
            1996 => Some(Self::Iers1996),
            2003 => Some(Self::Iers2003),
            2010 => Some(Self::Iers2010),
            _ => None,
        }
    }
}

impl Display for IersConventions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "IERS {}", self.year())
    }
}

/// Scalar functions a convention may define, each evaluated from the
/// fundamental arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    /// X coordinate of the Celestial Intermediate Pole.
    X,
    /// Y coordinate of the Celestial Intermediate Pole.
    Y,
    /// CIO locator s + XY/2.
    SXy2,
    PrecessionZeta,
    PrecessionTheta,
    PrecessionZ,
    NutationInLongitude,
    NutationInObliquity,
    MeanObliquity,
    EquationOfEquinoxesCorrection,
}

impl Quantity {
    pub const COUNT: usize = 10;

    pub const ALL: [Self; Self::COUNT] = [
        Self::X,
        Self::Y,
        Self::SXy2,
        Self::PrecessionZeta,
        Self::PrecessionTheta,
        Self::PrecessionZ,
        Self::NutationInLongitude,
        Self::NutationInObliquity,
        Self::MeanObliquity,
        Self::EquationOfEquinoxesCorrection,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::X => "X",
            Self::Y => "Y",
            Self::SXy2 => "s + XY/2",
            Self::PrecessionZeta => "precession zeta",
            Self::PrecessionTheta => "precession theta",
            Self::PrecessionZ => "precession z",
            Self::NutationInLongitude => "nutation in longitude",
            Self::NutationInObliquity => "nutation in obliquity",
            Self::MeanObliquity => "mean obliquity of the ecliptic",
            Self::EquationOfEquinoxesCorrection => "equation of the equinoxes correction",
        }
    }
}

/// Shared nutation function handed out by a [`ConventionSet`].
pub type SharedFunction = Arc<dyn NutationFunction>;

/// Shared `[ΔC20, ΔC21, ΔS21, ΔC22, ΔS22]` tide correction.
pub type SharedTideCorrection = Arc<dyn TimeFunction<[f64; 5]>>;

type Memo<T> = OnceLock<Result<T, IersError>>;

/// Functions of one IERS convention, loaded on first use.
///
/// `Send + Sync`: accessors may be called from several threads; each table
/// is loaded at most once.
pub struct ConventionSet {
    conventions: IersConventions,
    loader: Arc<dyn SeriesLoader>,
    arguments: Memo<Arc<FundamentalArguments>>,
    functions: [Memo<SharedFunction>; Quantity::COUNT],
    tides: Memo<SharedTideCorrection>,
}

impl std::fmt::Debug for ConventionSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let loaded = self.functions.iter().filter(|m| m.get().is_some()).count();
        f.debug_struct("ConventionSet")
            .field("conventions", &self.conventions)
            .field("functions_loaded", &loaded)
            .finish()
    }
}

impl ConventionSet {
    /// Create a set that loads tables on first access.
    pub fn new(conventions: IersConventions, loader: Arc<dyn SeriesLoader>) -> Self {
        Self {
            conventions,
            loader,
            arguments: OnceLock::new(),
            functions: std::array::from_fn(|_| OnceLock::new()),
            tides: OnceLock::new(),
        }
    }

    /// Create a set and load every supported function immediately.
    pub fn eager(
        conventions: IersConventions,
        loader: Arc<dyn SeriesLoader>,
    ) -> Result<Self, IersError> {
        let set = Self::new(conventions, loader);
        set.nutation_arguments()?;
        for quantity in Quantity::ALL {
            if set.supports(quantity) {
                set.function(quantity)?;
            }
        }
        if set.supports_tide_frequency_dependence() {
            set.tide_frequency_dependence_function()?;
        }
        debug!(%conventions, "all convention functions loaded");
        Ok(set)
    }

    pub fn conventions(&self) -> IersConventions {
        self.conventions
    }

    pub fn supports(&self, quantity: Quantity) -> bool {
        sources(self.conventions).function(quantity) != FunctionSource::Unsupported
    }

    pub fn supports_tide_frequency_dependence(&self) -> bool {
        sources(self.conventions).tide_frequency_dependence.is_some()
    }

    /// Generator for the fundamental nutation arguments.
    pub fn nutation_arguments(&self) -> Result<Arc<FundamentalArguments>, IersError> {
        self.arguments
            .get_or_init(|| {
                let name = sources(self.conventions).arguments;
                debug!(conventions = %self.conventions, name, "loading nutation arguments");
                self.loader
                    .load_arguments(name)
                    .map(Arc::new)
                    .map_err(|e| IersError::load(name, e))
            })
            .clone()
    }

    /// The function for `quantity`, loading it on first access.
    pub fn function(&self, quantity: Quantity) -> Result<SharedFunction, IersError> {
        self.functions[quantity as usize]
            .get_or_init(|| self.build(quantity))
            .clone()
    }

    fn build(&self, quantity: Quantity) -> Result<SharedFunction, IersError> {
        let source = sources(self.conventions).function(quantity);
        debug!(conventions = %self.conventions, quantity = quantity.name(), "building function");
        match source {
            FunctionSource::Unsupported => Err(IersError::UnsupportedModel {
                conventions: self.conventions,
                function: quantity.name(),
            }),
            FunctionSource::Series {
                name,
                poly_factor,
                non_poly_factor,
            } => {
                let series = self
                    .loader
                    .load_poisson_series(name, poly_factor, non_poly_factor)
                    .map_err(|e| IersError::load(name, e))?;
                Ok(Arc::new(series))
            }
            FunctionSource::Polynomial(arcsec) => {
                let radians: Vec<f64> = arcsec.iter().map(|c| c * ARC_SECONDS_TO_RADIANS).collect();
                Ok(Arc::new(Polynomial::new(&radians)))
            }
            FunctionSource::Zero => Ok(Arc::new(Zero)),
            FunctionSource::EquinoxCorrection1996 => Ok(Arc::new(EquinoxCorrection1996::new())),
        }
    }

    /// X coordinate of the CIP.
    pub fn x_function(&self) -> Result<SharedFunction, IersError> {
        self.function(Quantity::X)
    }

    /// Y coordinate of the CIP.
    pub fn y_function(&self) -> Result<SharedFunction, IersError> {
        self.function(Quantity::Y)
    }

    pub fn s_xy2_function(&self) -> Result<SharedFunction, IersError> {
        self.function(Quantity::SXy2)
    }

    pub fn precession_zeta_function(&self) -> Result<SharedFunction, IersError> {
        self.function(Quantity::PrecessionZeta)
    }

    pub fn precession_theta_function(&self) -> Result<SharedFunction, IersError> {
        self.function(Quantity::PrecessionTheta)
    }

    pub fn precession_z_function(&self) -> Result<SharedFunction, IersError> {
        self.function(Quantity::PrecessionZ)
    }

    /// Δψ, radians.
    pub fn nutation_in_longitude_function(&self) -> Result<SharedFunction, IersError> {
        self.function(Quantity::NutationInLongitude)
    }

    /// Δε, radians.
    pub fn nutation_in_obliquity_function(&self) -> Result<SharedFunction, IersError> {
        self.function(Quantity::NutationInObliquity)
    }

    /// ε_A, radians.
    pub fn mean_obliquity_function(&self) -> Result<SharedFunction, IersError> {
        self.function(Quantity::MeanObliquity)
    }

    pub fn equation_of_equinoxes_correction_function(&self) -> Result<SharedFunction, IersError> {
        self.function(Quantity::EquationOfEquinoxesCorrection)
    }

    /// Frequency-dependent corrections to the degree-2 tidal coefficients.
    pub fn tide_frequency_dependence_function(&self) -> Result<SharedTideCorrection, IersError> {
        self.tides
            .get_or_init(|| {
                let Some(name) = sources(self.conventions).tide_frequency_dependence else {
                    return Err(IersError::UnsupportedModel {
                        conventions: self.conventions,
                        function: "tide frequency dependence",
                    });
                };
                let arguments = self.nutation_arguments()?;
                debug!(conventions = %self.conventions, name, "loading tide terms");
                let terms = self
                    .loader
                    .load_tide_terms(name)
                    .map_err(|e| IersError::load(name, e))?;
                let tides: SharedTideCorrection =
                    Arc::new(FrequencyDependentTides::new(arguments, terms));
                Ok(tides)
            })
            .clone()
    }
}
