//! Expansion of rebin parameters into bin edges.
//!
//! Parameters follow the `x1, dx1, x2, dx2, ..., xn` convention: each step
//! `dx` applies between the boundaries around it. A positive step is a
//! constant bin width; a negative step is a logarithmic width, each bin
//! being `|dx|` times its lower edge.

use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use rusthist_core::BinEdges;

use crate::error::{Error, Result};

/// Default fraction of a step below which the final partial bin of a range
/// is merged into the bin before it.
pub const DEFAULT_LAST_BIN_FRACTION: f64 = 0.25;

/// Relative slack when deciding whether a full bin still fits a range.
const FULL_BIN_TOLERANCE: f64 = 1e-9;

/// Validated rebin parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RebinParams {
    params: Vec<f64>,
    /// Drop the final partial bin of each range instead of keeping it.
    pub full_bins_only: bool,
    /// Partial bins narrower than this fraction of the step are merged.
    pub last_bin_fraction: f64,
}

impl RebinParams {
    /// Validates `x1, dx1, x2, ..., xn`.
    ///
    /// # Errors
    /// [`Error::InvalidParams`] if the list has an even length or fewer than
    /// three values, contains non-finite values or a zero step, has
    /// boundaries that are not strictly increasing, or uses a logarithmic
    /// step from a non-positive boundary.
    pub fn new(params: Vec<f64>) -> Result<Self> {
        if params.len() == 1 {
            return Err(invalid("a single step needs an explicit range"));
        }
        if params.len() < 3 || params.len().is_multiple_of(2) {
            return Err(invalid(format!(
                "expected x1, dx1, x2, ..., xn (odd count >= 3), got {} values",
                params.len()
            )));
        }
        if let Some(value) = params.iter().find(|value| !value.is_finite()) {
            return Err(invalid(format!("non-finite value {value}")));
        }
        for segment in params.windows(3).step_by(2) {
            let (lower, step, upper) = (segment[0], segment[1], segment[2]);
            if upper <= lower {
                return Err(invalid(format!(
                    "boundaries must increase: {lower} then {upper}"
                )));
            }
            if step == 0.0 {
                return Err(invalid(format!("zero step between {lower} and {upper}")));
            }
            if step < 0.0 && lower <= 0.0 {
                return Err(invalid(format!(
                    "logarithmic step needs a positive lower boundary, got {lower}"
                )));
            }
        }
        Ok(Self {
            params,
            full_bins_only: false,
            last_bin_fraction: DEFAULT_LAST_BIN_FRACTION,
        })
    }

    /// A single step applied across `[xmin, xmax]`.
    ///
    /// # Errors
    /// See [`RebinParams::new`].
    pub fn from_step(step: f64, xmin: f64, xmax: f64) -> Result<Self> {
        Self::new(vec![xmin, step, xmax])
    }

    /// Sets whether partial bins are dropped.
    #[must_use]
    pub fn with_full_bins_only(mut self, full_bins_only: bool) -> Self {
        self.full_bins_only = full_bins_only;
        self
    }

    /// Sets the fraction below which a final partial bin is merged.
    #[must_use]
    pub fn with_last_bin_fraction(mut self, fraction: f64) -> Self {
        self.last_bin_fraction = fraction;
        self
    }

    /// The raw parameter list.
    #[must_use]
    pub fn params(&self) -> &[f64] {
        &self.params
    }

    /// Expands the parameters into bin edges.
    ///
    /// # Errors
    /// [`Error::InvalidParams`] if `last_bin_fraction` is negative or not
    /// finite, if a step is too small to move past the current edge in
    /// floating point, or if no complete bin fits when `full_bins_only` is
    /// set.
    pub fn create_bin_edges(&self) -> Result<BinEdges> {
        if !self.last_bin_fraction.is_finite() || self.last_bin_fraction < 0.0 {
            return Err(invalid(format!(
                "last bin fraction must be finite and not negative, got {}",
                self.last_bin_fraction
            )));
        }

        let mut edges = vec![self.params[0]];
        let mut current = self.params[0];

        for segment in self.params[1..].chunks_exact(2) {
            let (step, upper) = (segment[0], segment[1]);
            loop {
                let width = if step > 0.0 {
                    step
                } else {
                    current * step.abs()
                };
                if current + width <= current {
                    return Err(invalid(format!(
                        "step {step} does not advance past {current}"
                    )));
                }
                if self.full_bins_only {
                    let next = current + width;
                    if next > upper + width * FULL_BIN_TOLERANCE {
                        break;
                    }
                    current = next.min(upper);
                    edges.push(current);
                } else if current + width * (1.0 + self.last_bin_fraction) <= upper {
                    current += width;
                    edges.push(current);
                } else {
                    current = upper;
                    edges.push(current);
                    break;
                }
            }
        }

        if edges.len() < 2 {
            return Err(invalid("no complete bin fits the requested range"));
        }
        Ok(BinEdges::new(edges))
    }
}

impl FromStr for RebinParams {
    type Err = Error;

    /// Parses a comma-separated list such as `"0,0.5,10"`.
    fn from_str(s: &str) -> Result<Self> {
        let params = s
            .split(',')
            .map(str::trim)
            .map(|token| {
                token
                    .parse::<f64>()
                    .map_err(|_| invalid(format!("cannot parse '{token}' as a number")))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(params)
    }
}

fn invalid(message: impl Into<String>) -> Error {
    Error::InvalidParams(message.into())
}
