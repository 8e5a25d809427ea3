//! rusthist-core: Copy-on-write histogram data model.
//!
//! This crate provides the containers every histogram algorithm works on:
//! shared `f64` storage, strongly-typed wrappers for bin edges, points,
//! counts, frequencies and their uncertainties, the conversions between
//! them, and the [`Histogram`] aggregate.
//!
//! ```
//! use rusthist_core::{BinEdges, Counts, Histogram, YMode};
//!
//! let mut histogram = Histogram::with_counts(
//!     BinEdges::from([0.0, 1.0, 3.0]),
//!     Counts::from([2.0, 4.0]),
//! )?;
//! histogram.convert_to_frequencies()?;
//! assert_eq!(histogram.y_mode(), YMode::Frequencies);
//! assert_eq!(histogram.y(), &[2.0, 2.0]);
//! # Ok::<(), rusthist_core::Error>(())
//! ```

pub mod buffer;
pub mod convert;
pub mod error;
pub mod generator;
pub mod histogram;
pub mod kinds;
mod math;
pub mod validation;
pub mod vector;

pub use buffer::SharedBuffer;
pub use convert::SINGLE_POINT_HALF_WIDTH;
pub use error::{Error, ErrorKind, Result};
pub use histogram::{Histogram, XData, XMode, YData, YMode};
pub use kinds::{
    BinEdges, CountStandardDeviations, CountVariances, Counts, Frequencies,
    FrequencyStandardDeviations, FrequencyVariances, PointStandardDeviations, PointVariances,
    Points,
};
pub use vector::{Addable, Kind, Offsetable, Scalable, Vector};
