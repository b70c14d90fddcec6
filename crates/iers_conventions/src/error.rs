use iers_series::SeriesError;
use thiserror::Error;

use crate::IersConventions;

/// Errors from convention accessors.
///
/// `Clone` so a failed lazy load can be memoized and handed out again.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum IersError {
    /// The convention does not define this function.
    #[error("{function} is not available in {conventions} conventions")]
    UnsupportedModel {
        conventions: IersConventions,
        function: &'static str,
    },
    /// The backing table could not be loaded.
    #[error("cannot load IERS table {name}: {source}")]
    ResourceLoad {
        name: String,
        #[source]
        source: SeriesError,
    },
}

impl IersError {
    pub(crate) fn load(name: &str, source: SeriesError) -> Self {
        Self::ResourceLoad {
            name: name.to_string(),
            source,
        }
    }
}
