//! Conversions between paired container kinds.
//!
//! Conversions that need bin widths take the source container by value and
//! reuse its storage. If the storage is still shared with another holder,
//! it is copied before being transformed, so other holders never observe
//! the change. Pass a clone to keep the source.
//!
//! A null source always converts to a null result.

use crate::error::{Error, Result};
use crate::kinds::{
    BinEdges, CountStandardDeviations, CountVariances, Counts, Frequencies,
    FrequencyStandardDeviations, FrequencyVariances, PointStandardDeviations, PointVariances,
    Points,
};
use crate::vector::{Kind, Vector};

/// Half width of the bin synthesised around a single point.
///
/// A lone point carries no width information, so converting it to bin edges
/// places the edges at `point ± SINGLE_POINT_HALF_WIDTH`.
pub const SINGLE_POINT_HALF_WIDTH: f64 = 0.5;

/// Checks that per-bin data of length `len` lines up with `edges`.
///
/// Edges must be present and hold exactly `len + 1` values, unless both the
/// data and the edges are empty.
///
/// # Errors
/// [`Error::NullBinEdges`] or [`Error::SizeMismatch`].
pub fn check_bin_alignment(len: usize, edges: &BinEdges) -> Result<()> {
    if !edges.is_present() {
        return Err(Error::NullBinEdges);
    }
    if len + 1 != edges.len() && (len != 0 || !edges.is_empty()) {
        return Err(Error::size_mismatch(len + 1, edges.len()));
    }
    Ok(())
}

fn scale_by_width<S: Kind, T: Kind>(
    source: Vector<S>,
    edges: &BinEdges,
    f: impl Fn(f64, f64) -> f64,
) -> Result<Vector<T>> {
    if !source.is_present() {
        return Ok(Vector::null());
    }
    check_bin_alignment(source.len(), edges)?;
    let mut buffer = source.into_buffer();
    for (value, width) in buffer.make_mut().iter_mut().zip(edges.widths()) {
        *value = f(*value, width);
    }
    Ok(Vector::from_buffer(buffer))
}

fn map_values<S: Kind, T: Kind>(source: Vector<S>, f: impl Fn(f64) -> f64) -> Vector<T> {
    let mut target = Vector::from_buffer(source.into_buffer());
    target.apply(f);
    target
}

impl Points {
    /// Bin centres of `edges`: the mean of each adjacent pair.
    ///
    /// # Errors
    /// [`Error::SingleBinEdge`] if `edges` holds exactly one value.
    pub fn from_bin_edges(edges: &BinEdges) -> Result<Self> {
        if !edges.is_present() {
            return Ok(Self::null());
        }
        if edges.len() == 1 {
            return Err(Error::SingleBinEdge);
        }
        Ok(edges
            .as_slice()
            .windows(2)
            .map(|pair| 0.5 * (pair[0] + pair[1]))
            .collect())
    }
}

impl BinEdges {
    /// Bin edges around `points`.
    ///
    /// Inner edges sit at the midpoints of adjacent points. The outer edges
    /// mirror the nearest inner edge about the outermost point. A single
    /// point yields a bin of width `2 * SINGLE_POINT_HALF_WIDTH`.
    #[must_use]
    pub fn from_points(points: &Points) -> Self {
        if !points.is_present() {
            return Self::null();
        }
        let p = points.as_slice();
        match p.len() {
            0 => Self::new(Vec::new()),
            1 => Self::new(vec![
                p[0] - SINGLE_POINT_HALF_WIDTH,
                p[0] + SINGLE_POINT_HALF_WIDTH,
            ]),
            n => {
                let mut edges = Vec::with_capacity(n + 1);
                edges.push(0.0);
                edges.extend(p.windows(2).map(|pair| 0.5 * (pair[0] + pair[1])));
                edges[0] = p[0] - (edges[1] - p[0]);
                edges.push(p[n - 1] + (p[n - 1] - edges[n - 1]));
                Self::new(edges)
            }
        }
    }
}

impl Frequencies {
    /// Divides each count by its bin width.
    ///
    /// # Errors
    /// [`Error::NullBinEdges`] or [`Error::SizeMismatch`] if `counts` is
    /// present and `edges` do not line up with it.
    pub fn from_counts(counts: Counts, edges: &BinEdges) -> Result<Self> {
        scale_by_width(counts, edges, |value, width| value / width)
    }
}

impl Counts {
    /// Multiplies each frequency by its bin width.
    ///
    /// # Errors
    /// [`Error::NullBinEdges`] or [`Error::SizeMismatch`] if `frequencies`
    /// is present and `edges` do not line up with it.
    pub fn from_frequencies(frequencies: Frequencies, edges: &BinEdges) -> Result<Self> {
        scale_by_width(frequencies, edges, |value, width| value * width)
    }
}

impl FrequencyStandardDeviations {
    /// Divides each count uncertainty by its bin width.
    ///
    /// # Errors
    /// See [`Frequencies::from_counts`].
    pub fn from_count_standard_deviations(
        errors: CountStandardDeviations,
        edges: &BinEdges,
    ) -> Result<Self> {
        scale_by_width(errors, edges, |value, width| value / width)
    }

    /// Square root of each frequency variance.
    #[must_use]
    pub fn from_frequency_variances(variances: FrequencyVariances) -> Self {
        map_values(variances, f64::sqrt)
    }
}

impl CountStandardDeviations {
    /// Multiplies each frequency uncertainty by its bin width.
    ///
    /// # Errors
    /// See [`Counts::from_frequencies`].
    pub fn from_frequency_standard_deviations(
        errors: FrequencyStandardDeviations,
        edges: &BinEdges,
    ) -> Result<Self> {
        scale_by_width(errors, edges, |value, width| value * width)
    }

    /// Square root of each count variance.
    #[must_use]
    pub fn from_count_variances(variances: CountVariances) -> Self {
        map_values(variances, f64::sqrt)
    }
}

impl FrequencyVariances {
    /// Divides each count variance by its squared bin width.
    ///
    /// # Errors
    /// See [`Frequencies::from_counts`].
    pub fn from_count_variances(variances: CountVariances, edges: &BinEdges) -> Result<Self> {
        scale_by_width(variances, edges, |value, width| value / (width * width))
    }

    /// Square of each frequency uncertainty.
    #[must_use]
    pub fn from_frequency_standard_deviations(errors: FrequencyStandardDeviations) -> Self {
        map_values(errors, |value| value * value)
    }
}

impl CountVariances {
    /// Multiplies each frequency variance by its squared bin width.
    ///
    /// # Errors
    /// See [`Counts::from_frequencies`].
    pub fn from_frequency_variances(
        variances: FrequencyVariances,
        edges: &BinEdges,
    ) -> Result<Self> {
        scale_by_width(variances, edges, |value, width| value * width * width)
    }

    /// Square of each count uncertainty.
    #[must_use]
    pub fn from_count_standard_deviations(errors: CountStandardDeviations) -> Self {
        map_values(errors, |value| value * value)
    }
}

impl PointVariances {
    /// Square of each point uncertainty.
    #[must_use]
    pub fn from_point_standard_deviations(errors: PointStandardDeviations) -> Self {
        map_values(errors, |value| value * value)
    }
}

impl PointStandardDeviations {
    /// Square root of each point variance.
    #[must_use]
    pub fn from_point_variances(variances: PointVariances) -> Self {
        map_values(variances, f64::sqrt)
    }
}
