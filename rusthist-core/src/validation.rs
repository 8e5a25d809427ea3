//! Checks for raw data before it is wrapped in containers.
//!
//! Containers never validate their contents on construction. Loaders and
//! other producers of raw sequences call these functions first.

use crate::error::{Error, Result};
use crate::kinds::{BinEdges, Points};
use crate::vector::{Kind, Vector};

/// Fails on the first non-finite value.
///
/// # Errors
/// [`Error::InvalidData`] naming the offending index.
pub fn check_finite<K: Kind>(data: &Vector<K>) -> Result<()> {
    match data.iter().position(|value| !value.is_finite()) {
        Some(index) => Err(Error::InvalidData(format!(
            "{} contains non-finite value {} at index {index}",
            K::NAME,
            data[index]
        ))),
        None => Ok(()),
    }
}

/// Fails unless every value is finite and not negative.
///
/// Intended for variance and standard-deviation containers.
///
/// # Errors
/// [`Error::InvalidData`] naming the offending index.
pub fn check_uncertainties<K: Kind>(data: &Vector<K>) -> Result<()> {
    check_finite(data)?;
    match data.iter().position(|&value| value < 0.0) {
        Some(index) => Err(Error::InvalidData(format!(
            "{} contains negative value {} at index {index}",
            K::NAME,
            data[index]
        ))),
        None => Ok(()),
    }
}

/// Fails unless the edges are finite and strictly increasing.
///
/// # Errors
/// [`Error::InvalidData`] naming the first offending bin.
pub fn check_bin_edges(edges: &BinEdges) -> Result<()> {
    check_finite(edges)?;
    match edges.widths().position(|width| width <= 0.0) {
        Some(bin) => Err(Error::InvalidData(format!(
            "BinEdges not strictly increasing at bin {bin}: [{}, {}]",
            edges[bin],
            edges[bin + 1]
        ))),
        None => Ok(()),
    }
}

/// Fails unless the points are finite and non-decreasing.
///
/// # Errors
/// [`Error::InvalidData`] naming the first offending index.
pub fn check_points(points: &Points) -> Result<()> {
    check_finite(points)?;
    match points
        .as_slice()
        .windows(2)
        .position(|pair| pair[1] < pair[0])
    {
        Some(index) => Err(Error::InvalidData(format!(
            "Points decreasing at index {}",
            index + 1
        ))),
        None => Ok(()),
    }
}
