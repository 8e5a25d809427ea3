//! rusthist-algorithms: Algorithms over rusthist histograms.
//!
//! This crate provides:
//! - **Rebin** - overlap-weighted redistribution onto new bin edges
//! - **Rebin parameters** - `x1, dx1, x2, ..., xn` expansion into bin edges
//! - **Batch processing** - rebinning many histograms, optionally in parallel
//!
#![warn(missing_docs)]

mod binning;
mod error;
mod processing;
mod rebin;

pub use binning::{RebinParams, DEFAULT_LAST_BIN_FRACTION};
pub use error::{Error, Result};
pub use processing::{rebin_all, rebin_all_with_params, BatchConfig};
pub use rebin::rebin;
