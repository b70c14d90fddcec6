//! IERS series tables: fundamental arguments, nutation functions,
//! Love numbers and tide terms, plus the loaders that fetch them.

pub mod arguments;
pub mod elements;
pub mod error;
pub mod function;
pub mod loader;
pub mod love;
pub mod poisson;
pub mod tide_terms;

pub use arguments::{ARGUMENT_COUNT, ARGUMENT_NAMES, FundamentalArguments};
pub use elements::BodiesElements;
pub use error::SeriesError;
pub use function::{NutationFunction, Polynomial, TimeFunction, Zero};
pub use loader::{DirectoryLoader, MemoryLoader, SeriesLoader};
pub use love::{LoveNumbers, MAX_LOVE_DEGREE};
pub use poisson::{MAX_POWER, PoissonSeries};
pub use tide_terms::{TIDE_AMPLITUDE_SCALE, TideTerm};

/// Arc-seconds to radians.
pub const ARC_SECONDS_TO_RADIANS: f64 = std::f64::consts::PI / (180.0 * 3600.0);
