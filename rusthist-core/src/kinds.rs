//! The container family: one zero-sized tag per meaning, one alias per tag.

use crate::vector::{Addable, Kind, Offsetable, Scalable, Vector};

macro_rules! container_kind {
    ($(#[$meta:meta])* $tag:ident => $alias:ident, $name:literal) => {
        #[doc = concat!("Tag for [`", stringify!($alias), "`].")]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $tag;

        impl Kind for $tag {
            const NAME: &'static str = $name;
        }

        $(#[$meta])*
        pub type $alias = Vector<$tag>;
    };
}

container_kind!(
    /// Bin boundaries: N+1 ascending values defining N bins.
    BinEdgesKind => BinEdges, "BinEdges"
);
container_kind!(
    /// Bin centres, one per bin (point data).
    PointsKind => Points, "Points"
);
container_kind!(
    /// Integrated intensity per bin.
    CountsKind => Counts, "Counts"
);
container_kind!(
    /// Intensity per unit ordinate width.
    FrequenciesKind => Frequencies, "Frequencies"
);
container_kind!(
    /// Squared uncertainties of [`Counts`].
    CountVariancesKind => CountVariances, "CountVariances"
);
container_kind!(
    /// Uncertainties of [`Counts`].
    CountStandardDeviationsKind => CountStandardDeviations, "CountStandardDeviations"
);
container_kind!(
    /// Squared uncertainties of [`Frequencies`].
    FrequencyVariancesKind => FrequencyVariances, "FrequencyVariances"
);
container_kind!(
    /// Uncertainties of [`Frequencies`].
    FrequencyStandardDeviationsKind => FrequencyStandardDeviations, "FrequencyStandardDeviations"
);
container_kind!(
    /// Squared uncertainties of [`Points`] (X resolution).
    PointVariancesKind => PointVariances, "PointVariances"
);
container_kind!(
    /// Uncertainties of [`Points`] (X resolution).
    PointStandardDeviationsKind => PointStandardDeviations, "PointStandardDeviations"
);

impl Offsetable for BinEdgesKind {}
impl Scalable for BinEdgesKind {}
impl Offsetable for PointsKind {}
impl Scalable for PointsKind {}

impl Addable for CountsKind {}
impl Scalable for CountsKind {}
impl Addable for FrequenciesKind {}
impl Scalable for FrequenciesKind {}

// Variances of independent contributions add.
impl Addable for CountVariancesKind {}
impl Scalable for CountVariancesKind {}
impl Addable for FrequencyVariancesKind {}
impl Scalable for FrequencyVariancesKind {}
impl Addable for PointVariancesKind {}
impl Scalable for PointVariancesKind {}

impl Scalable for CountStandardDeviationsKind {}
impl Scalable for FrequencyStandardDeviationsKind {}
impl Scalable for PointStandardDeviationsKind {}

impl BinEdges {
    /// Iterates over the width of each bin.
    pub fn widths(&self) -> impl Iterator<Item = f64> + '_ {
        self.as_slice().windows(2).map(|pair| pair[1] - pair[0])
    }

    /// Number of bins the edges define.
    #[must_use]
    pub fn bin_count(&self) -> usize {
        self.len().saturating_sub(1)
    }
}
