//! Sequence generators for filling containers.
//!
//! ```
//! use rusthist_core::generator::LinearGenerator;
//! use rusthist_core::BinEdges;
//!
//! let edges = BinEdges::generate(4, LinearGenerator::new(0.0, 0.5));
//! assert_eq!(edges.as_slice(), &[0.0, 0.5, 1.0, 1.5]);
//! ```

/// Yields `start`, `start + increment`, `start + 2 * increment`, ...
///
/// Each value is computed from its index so rounding errors do not
/// accumulate.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGenerator {
    start: f64,
    increment: f64,
    index: u32,
}

impl LinearGenerator {
    /// Creates a generator starting at `start`.
    #[must_use]
    pub fn new(start: f64, increment: f64) -> Self {
        Self {
            start,
            increment,
            index: 0,
        }
    }
}

impl Iterator for LinearGenerator {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let value = self.start + f64::from(self.index) * self.increment;
        self.index = self.index.checked_add(1)?;
        Some(value)
    }
}

/// Yields `start`, `start * (1 + increment)`, `start * (1 + increment)^2`, ...
#[derive(Debug, Clone, PartialEq)]
pub struct LogarithmicGenerator {
    start: f64,
    factor: f64,
    index: i32,
}

impl LogarithmicGenerator {
    /// Creates a generator starting at `start` growing by `increment` per step.
    #[must_use]
    pub fn new(start: f64, increment: f64) -> Self {
        Self {
            start,
            factor: 1.0 + increment,
            index: 0,
        }
    }
}

impl Iterator for LogarithmicGenerator {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let value = self.start * self.factor.powi(self.index);
        self.index = self.index.checked_add(1)?;
        Some(value)
    }
}
