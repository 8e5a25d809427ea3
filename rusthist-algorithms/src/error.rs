//! Algorithm error types.

use thiserror::Error;

/// Result type for algorithm operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Algorithm error types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Rebin parameters could not be parsed or are inconsistent.
    #[error("invalid rebin parameters: {0}")]
    InvalidParams(String),

    /// One histogram of a batch failed.
    #[error("histogram {index}: {source}")]
    Batch {
        /// Position of the failing histogram in the input.
        index: usize,
        /// What went wrong.
        #[source]
        source: rusthist_core::Error,
    },

    /// Core library error.
    #[error("core error: {0}")]
    CoreError(#[from] rusthist_core::Error),
}
