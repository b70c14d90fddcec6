use iers_conventions::IersError;
use iers_series::SeriesError;
use thiserror::Error;

/// Errors from the tidal coefficient provider.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TidesError {
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    /// Degree/order outside `0 ≤ m ≤ n ≤ max`.
    #[error("invalid degree/order ({degree}, {order}), maximum degree is {max}")]
    InvalidIndex {
        degree: usize,
        order: usize,
        max: usize,
    },
    /// A tide-generating body could not provide its position.
    #[error("ephemeris error for {body}: {message}")]
    Ephemeris { body: String, message: String },
    #[error("cannot load {name}: {source}")]
    ResourceLoad {
        name: String,
        #[source]
        source: SeriesError,
    },
    #[error(transparent)]
    Conventions(#[from] IersError),
}
