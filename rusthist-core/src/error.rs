//! Error types for rusthist-core.

use thiserror::Error;

/// Result type alias for rusthist operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classification of an [`Error`].
///
/// `Logic` errors are caller contract violations detected while building or
/// reshaping containers. `Runtime` errors are algorithmic preconditions that
/// fail while an operation such as a rebin is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Construction or shape error.
    Logic,
    /// Algorithmic precondition error.
    Runtime,
}

/// Core error types for histogram operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A conversion needed bin edges but they were not provided.
    #[error("BinEdges are NULL")]
    NullBinEdges,

    /// Container lengths disagree.
    #[error("size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// A single boundary cannot define a bin, so no point can be derived.
    #[error("cannot construct Points from BinEdges of size 1")]
    SingleBinEdge,

    /// Data was set in a Y mode that differs from the histogram's.
    #[error("Y mode mismatch: histogram holds {current}, cannot set {requested}")]
    YModeMismatch {
        current: &'static str,
        requested: &'static str,
    },

    /// Uncertainties were set on a histogram without Y data.
    #[error("cannot set uncertainties on a histogram without Y data")]
    MissingYData,

    /// Two histograms combined element-wise do not share an X axis.
    #[error("X data mismatch: histograms must share identical X values")]
    XDataMismatch,

    /// The operation requires bin edges.
    #[error("XMode must be BinEdges")]
    InvalidXMode,

    /// The operation requires counts or frequencies.
    #[error("YMode must be defined")]
    UndefinedYMode,

    /// A bin with zero or negative width was found.
    #[error("Negative or zero bin widths not allowed")]
    NonPositiveBinWidth,

    /// Overlapping bins produced a zero or negative overlap.
    #[error("Negative or zero overlaps not allowed")]
    NonPositiveOverlap,

    /// Raw input data failed validation.
    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl Error {
    /// Returns the classification of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidXMode
            | Self::UndefinedYMode
            | Self::NonPositiveBinWidth
            | Self::NonPositiveOverlap => ErrorKind::Runtime,
            _ => ErrorKind::Logic,
        }
    }

    pub(crate) fn size_mismatch(expected: usize, actual: usize) -> Self {
        Self::SizeMismatch { expected, actual }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(Error::NullBinEdges.kind(), ErrorKind::Logic);
        assert_eq!(Error::size_mismatch(3, 4).kind(), ErrorKind::Logic);
        assert_eq!(Error::SingleBinEdge.kind(), ErrorKind::Logic);
        assert_eq!(Error::InvalidXMode.kind(), ErrorKind::Runtime);
        assert_eq!(Error::NonPositiveBinWidth.kind(), ErrorKind::Runtime);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(Error::NullBinEdges.to_string(), "BinEdges are NULL");
        assert_eq!(Error::InvalidXMode.to_string(), "XMode must be BinEdges");
        assert_eq!(
            Error::NonPositiveOverlap.to_string(),
            "Negative or zero overlaps not allowed"
        );
        assert_eq!(
            Error::size_mismatch(5, 4).to_string(),
            "size mismatch: expected 5, got 4"
        );
    }
}
