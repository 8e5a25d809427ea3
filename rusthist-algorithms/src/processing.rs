//! Batch helpers that apply rebinning across many histograms.

use log::debug;
use rayon::prelude::*;
use rusthist_core::{BinEdges, Histogram};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::binning::RebinParams;
use crate::error::{Error, Result};
use crate::rebin::rebin;

/// Configuration for batch processing.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BatchConfig {
    /// Process histograms on the rayon thread pool.
    pub parallel: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { parallel: true }
    }
}

impl BatchConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to use parallel processing.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Rebins every histogram onto the same `edges`.
///
/// Histograms are independent, so with `config.parallel` they are rebinned
/// concurrently. Output order matches input order.
///
/// # Errors
/// [`Error::Batch`] carrying the index of a histogram that failed.
pub fn rebin_all(
    histograms: &[Histogram],
    edges: &BinEdges,
    config: &BatchConfig,
) -> Result<Vec<Histogram>> {
    debug!(
        "rebinning {} histograms onto {} bins (parallel: {})",
        histograms.len(),
        edges.bin_count(),
        config.parallel
    );

    let rebin_one = |(index, histogram): (usize, &Histogram)| {
        rebin(histogram, edges).map_err(|source| Error::Batch { index, source })
    };

    if config.parallel {
        histograms.par_iter().enumerate().map(rebin_one).collect()
    } else {
        histograms.iter().enumerate().map(rebin_one).collect()
    }
}

/// Expands `params` into bin edges and rebins every histogram onto them.
///
/// # Errors
/// [`Error::InvalidParams`] if the parameters cannot be expanded, otherwise
/// see [`rebin_all`].
pub fn rebin_all_with_params(
    histograms: &[Histogram],
    params: &RebinParams,
    config: &BatchConfig,
) -> Result<Vec<Histogram>> {
    let edges = params.create_bin_edges()?;
    rebin_all(histograms, &edges, config)
}
