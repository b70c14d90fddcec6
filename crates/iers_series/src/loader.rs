//! Sources of IERS tables.
//!
//! A loader only knows how to fetch raw text by resource name; the typed
//! `load_*` methods parse it. Implementors provide [`SeriesLoader::read`].

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::{debug, info};

use crate::arguments::FundamentalArguments;
use crate::error::SeriesError;
use crate::love::LoveNumbers;
use crate::poisson::PoissonSeries;
use crate::tide_terms::TideTerm;

pub trait SeriesLoader: Send + Sync {
    /// Raw text of resource `name`.
    fn read(&self, name: &str) -> Result<String, SeriesError>;

    fn load_poisson_series(
        &self,
        name: &str,
        poly_factor: f64,
        non_poly_factor: f64,
    ) -> Result<PoissonSeries, SeriesError> {
        let series = PoissonSeries::parse(&self.read(name)?, name, poly_factor, non_poly_factor)?;
        debug!(name, terms = series.term_count(), "loaded Poisson series");
        Ok(series)
    }

    fn load_arguments(&self, name: &str) -> Result<FundamentalArguments, SeriesError> {
        FundamentalArguments::parse(&self.read(name)?, name)
    }

    fn load_love_numbers(&self, name: &str) -> Result<LoveNumbers, SeriesError> {
        LoveNumbers::parse(&self.read(name)?, name)
    }

    fn load_tide_terms(&self, name: &str) -> Result<Vec<TideTerm>, SeriesError> {
        TideTerm::parse_table(&self.read(name)?, name)
    }
}

/// Resources are files below a root directory, named by relative path.
#[derive(Debug, Clone)]
pub struct DirectoryLoader {
    root: PathBuf,
}

impl DirectoryLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl SeriesLoader for DirectoryLoader {
    fn read(&self, name: &str) -> Result<String, SeriesError> {
        let path = self.root.join(name);
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                info!(path = %path.display(), bytes = content.len(), "read IERS table");
                Ok(content)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(SeriesError::MissingResource(name.to_string()))
            }
            Err(e) => Err(SeriesError::Io {
                name: name.to_string(),
                message: e.to_string(),
            }),
        }
    }
}

/// In-memory resources keyed by name. Counts reads so callers can check
/// that lazy consumers fetch each table once.
#[derive(Debug, Default)]
pub struct MemoryLoader {
    resources: HashMap<String, String>,
    reads: AtomicUsize,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(name, content);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.resources.insert(name.into(), content.into());
    }

    /// Successful and failed reads so far.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::Relaxed)
    }
}

impl SeriesLoader for MemoryLoader {
    fn read(&self, name: &str) -> Result<String, SeriesError> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        self.resources
            .get(name)
            .cloned()
            .ok_or_else(|| SeriesError::MissingResource(name.to_string()))
    }
}
