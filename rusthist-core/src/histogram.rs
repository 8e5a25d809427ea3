//! The histogram aggregate: one X representation, one Y representation and
//! their uncertainties, with the size invariant enforced on every change.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::buffer::SharedBuffer;
use crate::convert::check_bin_alignment;
use crate::error::{Error, Result};
use crate::kinds::{
    BinEdges, CountStandardDeviations, CountVariances, Counts, Frequencies,
    FrequencyStandardDeviations, FrequencyVariances, PointStandardDeviations, PointVariances,
    Points,
};

/// Which X representation a histogram holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum XMode {
    /// N+1 bin boundaries.
    BinEdges,
    /// N bin centres.
    Points,
}

/// Which Y representation a histogram holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum YMode {
    /// No Y data has been set.
    Uninitialized,
    /// Integrated intensity per bin.
    Counts,
    /// Intensity per unit X.
    Frequencies,
}

impl YMode {
    /// Name used in diagnostics.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Counts => "counts",
            Self::Frequencies => "frequencies",
        }
    }
}

/// X data of a histogram.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum XData {
    /// Histogram data.
    BinEdges(BinEdges),
    /// Point data.
    Points(Points),
}

impl XData {
    /// Returns the mode of this representation.
    #[must_use]
    pub fn mode(&self) -> XMode {
        match self {
            Self::BinEdges(_) => XMode::BinEdges,
            Self::Points(_) => XMode::Points,
        }
    }

    /// Raw X values.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        match self {
            Self::BinEdges(edges) => edges.as_slice(),
            Self::Points(points) => points.as_slice(),
        }
    }

    /// Number of Y values this X data supports.
    #[must_use]
    pub fn y_len(&self) -> usize {
        match self {
            Self::BinEdges(edges) => edges.bin_count(),
            Self::Points(points) => points.len(),
        }
    }

    fn as_mut_slice(&mut self) -> &mut [f64] {
        match self {
            Self::BinEdges(edges) => edges.as_mut_slice(),
            Self::Points(points) => points.as_mut_slice(),
        }
    }
}

impl From<BinEdges> for XData {
    fn from(edges: BinEdges) -> Self {
        Self::BinEdges(edges)
    }
}

impl From<Points> for XData {
    fn from(points: Points) -> Self {
        Self::Points(points)
    }
}

/// Y data of a histogram.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum YData {
    /// Integrated intensity per bin.
    Counts(Counts),
    /// Intensity per unit X.
    Frequencies(Frequencies),
}

impl YData {
    /// Returns the mode of this representation.
    #[must_use]
    pub fn mode(&self) -> YMode {
        match self {
            Self::Counts(_) => YMode::Counts,
            Self::Frequencies(_) => YMode::Frequencies,
        }
    }

    /// Raw Y values.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        match self {
            Self::Counts(counts) => counts.as_slice(),
            Self::Frequencies(frequencies) => frequencies.as_slice(),
        }
    }

    /// Number of Y values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Returns true if there are no Y values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn as_mut_slice(&mut self) -> &mut [f64] {
        match self {
            Self::Counts(counts) => counts.as_mut_slice(),
            Self::Frequencies(frequencies) => frequencies.as_mut_slice(),
        }
    }
}

impl From<Counts> for YData {
    fn from(counts: Counts) -> Self {
        Self::Counts(counts)
    }
}

impl From<Frequencies> for YData {
    fn from(frequencies: Frequencies) -> Self {
        Self::Frequencies(frequencies)
    }
}

/// A single spectrum.
///
/// Holds X data (bin edges or points), optional Y data (counts or
/// frequencies), optional Y standard deviations matching the Y mode, and
/// optional X standard deviations (always point shaped).
///
/// Every Y-shaped container has [`Histogram::size`] elements: the number of
/// bins for bin edges, the number of points for point data. Clones share all
/// storage until one side is mutated.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "HistogramRecord"))]
pub struct Histogram {
    x: XData,
    y: Option<YData>,
    e: SharedBuffer,
    dx: PointStandardDeviations,
}

impl Histogram {
    /// Creates a histogram with X data only.
    pub fn new(x: impl Into<XData>) -> Self {
        Self {
            x: x.into(),
            y: None,
            e: SharedBuffer::null(),
            dx: PointStandardDeviations::null(),
        }
    }

    /// Creates a histogram holding counts.
    ///
    /// # Errors
    /// [`Error::SizeMismatch`] if `counts` does not fit `x`.
    pub fn with_counts(x: impl Into<XData>, counts: Counts) -> Result<Self> {
        let mut histogram = Self::new(x);
        histogram.set_counts(counts)?;
        Ok(histogram)
    }

    /// Creates a histogram holding frequencies.
    ///
    /// # Errors
    /// [`Error::SizeMismatch`] if `frequencies` does not fit `x`.
    pub fn with_frequencies(x: impl Into<XData>, frequencies: Frequencies) -> Result<Self> {
        let mut histogram = Self::new(x);
        histogram.set_frequencies(frequencies)?;
        Ok(histogram)
    }

    /// Returns the X mode.
    #[must_use]
    pub fn x_mode(&self) -> XMode {
        self.x.mode()
    }

    /// Returns the Y mode.
    #[must_use]
    pub fn y_mode(&self) -> YMode {
        self.y.as_ref().map_or(YMode::Uninitialized, YData::mode)
    }

    /// Number of Y-shaped entries (bins or points).
    #[must_use]
    pub fn size(&self) -> usize {
        self.x.y_len()
    }

    /// The X representation.
    #[must_use]
    pub fn x_data(&self) -> &XData {
        &self.x
    }

    /// The Y representation, if set.
    #[must_use]
    pub fn y_data(&self) -> Option<&YData> {
        self.y.as_ref()
    }

    /// Raw X values in the current X mode.
    #[must_use]
    pub fn x(&self) -> &[f64] {
        self.x.as_slice()
    }

    /// Raw Y values in the current Y mode (empty if unset).
    #[must_use]
    pub fn y(&self) -> &[f64] {
        match &self.y {
            Some(y) => y.as_slice(),
            None => &[],
        }
    }

    /// Raw Y standard deviations in the current Y mode (empty if unset).
    #[must_use]
    pub fn e(&self) -> &[f64] {
        self.e.as_slice()
    }

    /// Raw X standard deviations (empty if unset).
    #[must_use]
    pub fn dx(&self) -> &[f64] {
        self.dx.as_slice()
    }

    /// Returns true if Y standard deviations are set.
    #[must_use]
    pub fn has_e(&self) -> bool {
        self.e.is_present()
    }

    /// Returns true if X standard deviations are set.
    #[must_use]
    pub fn has_dx(&self) -> bool {
        self.dx.is_present()
    }

    /// Mutable raw X values, copied first if shared.
    pub fn x_mut(&mut self) -> &mut [f64] {
        self.x.as_mut_slice()
    }

    /// Mutable raw Y values, copied first if shared.
    pub fn y_mut(&mut self) -> &mut [f64] {
        match &mut self.y {
            Some(y) => y.as_mut_slice(),
            None => &mut [],
        }
    }

    /// Mutable raw Y standard deviations, copied first if shared.
    pub fn e_mut(&mut self) -> &mut [f64] {
        self.e.make_mut()
    }

    /// Mutable raw X standard deviations, copied first if shared.
    pub fn dx_mut(&mut self) -> &mut [f64] {
        self.dx.as_mut_slice()
    }

    /// Bin edges, derived from points if necessary.
    #[must_use]
    pub fn bin_edges(&self) -> BinEdges {
        match &self.x {
            XData::BinEdges(edges) => edges.clone(),
            XData::Points(points) => BinEdges::from_points(points),
        }
    }

    /// Points, derived from bin edges if necessary.
    ///
    /// # Errors
    /// [`Error::SingleBinEdge`] if the histogram holds a single bin edge.
    pub fn points(&self) -> Result<Points> {
        match &self.x {
            XData::BinEdges(edges) => Points::from_bin_edges(edges),
            XData::Points(points) => Ok(points.clone()),
        }
    }

    /// Counts, derived from frequencies if necessary. Null if Y is unset.
    ///
    /// # Errors
    /// Propagates conversion errors from [`Counts::from_frequencies`].
    pub fn counts(&self) -> Result<Counts> {
        match &self.y {
            None => Ok(Counts::null()),
            Some(YData::Counts(counts)) => Ok(counts.clone()),
            Some(YData::Frequencies(frequencies)) => {
                Counts::from_frequencies(frequencies.clone(), &self.bin_edges())
            }
        }
    }

    /// Frequencies, derived from counts if necessary. Null if Y is unset.
    ///
    /// # Errors
    /// Propagates conversion errors from [`Frequencies::from_counts`].
    pub fn frequencies(&self) -> Result<Frequencies> {
        match &self.y {
            None => Ok(Frequencies::null()),
            Some(YData::Counts(counts)) => {
                Frequencies::from_counts(counts.clone(), &self.bin_edges())
            }
            Some(YData::Frequencies(frequencies)) => Ok(frequencies.clone()),
        }
    }

    /// Count standard deviations, derived if necessary.
    ///
    /// # Errors
    /// Propagates conversion errors.
    pub fn count_standard_deviations(&self) -> Result<CountStandardDeviations> {
        match self.y_mode() {
            YMode::Frequencies => CountStandardDeviations::from_frequency_standard_deviations(
                FrequencyStandardDeviations::from_buffer(self.e.clone()),
                &self.bin_edges(),
            ),
            _ => Ok(CountStandardDeviations::from_buffer(self.e.clone())),
        }
    }

    /// Count variances, derived if necessary.
    ///
    /// # Errors
    /// Propagates conversion errors.
    pub fn count_variances(&self) -> Result<CountVariances> {
        self.count_standard_deviations()
            .map(CountVariances::from_count_standard_deviations)
    }

    /// Frequency standard deviations, derived if necessary.
    ///
    /// # Errors
    /// Propagates conversion errors.
    pub fn frequency_standard_deviations(&self) -> Result<FrequencyStandardDeviations> {
        match self.y_mode() {
            YMode::Counts => FrequencyStandardDeviations::from_count_standard_deviations(
                CountStandardDeviations::from_buffer(self.e.clone()),
                &self.bin_edges(),
            ),
            _ => Ok(FrequencyStandardDeviations::from_buffer(self.e.clone())),
        }
    }

    /// Frequency variances, derived if necessary.
    ///
    /// # Errors
    /// Propagates conversion errors.
    pub fn frequency_variances(&self) -> Result<FrequencyVariances> {
        self.frequency_standard_deviations()
            .map(FrequencyVariances::from_frequency_standard_deviations)
    }

    /// X standard deviations.
    #[must_use]
    pub fn point_standard_deviations(&self) -> PointStandardDeviations {
        self.dx.clone()
    }

    /// X variances.
    #[must_use]
    pub fn point_variances(&self) -> PointVariances {
        PointVariances::from_point_standard_deviations(self.dx.clone())
    }

    /// Replaces the X data with bin edges.
    ///
    /// # Errors
    /// [`Error::SizeMismatch`] if existing Y-shaped data does not fit.
    pub fn set_bin_edges(&mut self, edges: BinEdges) -> Result<()> {
        self.set_x(XData::BinEdges(edges))
    }

    /// Replaces the X data with points.
    ///
    /// # Errors
    /// [`Error::SizeMismatch`] if existing Y-shaped data does not fit.
    pub fn set_points(&mut self, points: Points) -> Result<()> {
        self.set_x(XData::Points(points))
    }

    fn set_x(&mut self, x: XData) -> Result<()> {
        let current = match &self.y {
            Some(y) => Some(y.len()),
            None if self.dx.is_present() => Some(self.dx.len()),
            None => None,
        };
        if let Some(len) = current {
            if len != x.y_len() {
                return Err(Error::size_mismatch(len, x.y_len()));
            }
        }
        self.x = x;
        Ok(())
    }

    /// Sets counts.
    ///
    /// # Errors
    /// [`Error::YModeMismatch`] if the histogram holds frequencies,
    /// [`Error::SizeMismatch`] if the length does not fit the X data.
    pub fn set_counts(&mut self, counts: Counts) -> Result<()> {
        self.set_y(YData::Counts(counts))
    }

    /// Sets frequencies.
    ///
    /// # Errors
    /// [`Error::YModeMismatch`] if the histogram holds counts,
    /// [`Error::SizeMismatch`] if the length does not fit the X data.
    pub fn set_frequencies(&mut self, frequencies: Frequencies) -> Result<()> {
        self.set_y(YData::Frequencies(frequencies))
    }

    fn set_y(&mut self, y: YData) -> Result<()> {
        let current = self.y_mode();
        if current != YMode::Uninitialized && current != y.mode() {
            return Err(Error::YModeMismatch {
                current: current.name(),
                requested: y.mode().name(),
            });
        }
        self.check_size(y.len())?;
        self.y = Some(y);
        Ok(())
    }

    /// Sets count standard deviations. A null argument clears them.
    ///
    /// # Errors
    /// [`Error::MissingYData`], [`Error::YModeMismatch`] or
    /// [`Error::SizeMismatch`].
    pub fn set_count_standard_deviations(&mut self, e: CountStandardDeviations) -> Result<()> {
        self.set_e(YMode::Counts, e.into_buffer())
    }

    /// Sets count variances, stored as standard deviations.
    ///
    /// # Errors
    /// See [`Histogram::set_count_standard_deviations`].
    pub fn set_count_variances(&mut self, variances: CountVariances) -> Result<()> {
        self.set_count_standard_deviations(CountStandardDeviations::from_count_variances(variances))
    }

    /// Sets frequency standard deviations. A null argument clears them.
    ///
    /// # Errors
    /// [`Error::MissingYData`], [`Error::YModeMismatch`] or
    /// [`Error::SizeMismatch`].
    pub fn set_frequency_standard_deviations(
        &mut self,
        e: FrequencyStandardDeviations,
    ) -> Result<()> {
        self.set_e(YMode::Frequencies, e.into_buffer())
    }

    /// Sets frequency variances, stored as standard deviations.
    ///
    /// # Errors
    /// See [`Histogram::set_frequency_standard_deviations`].
    pub fn set_frequency_variances(&mut self, variances: FrequencyVariances) -> Result<()> {
        self.set_frequency_standard_deviations(
            FrequencyStandardDeviations::from_frequency_variances(variances),
        )
    }

    fn set_e(&mut self, mode: YMode, e: SharedBuffer) -> Result<()> {
        let current = self.y_mode();
        if current == YMode::Uninitialized {
            return Err(Error::MissingYData);
        }
        if current != mode {
            return Err(Error::YModeMismatch {
                current: current.name(),
                requested: mode.name(),
            });
        }
        if e.is_present() {
            self.check_size(e.len())?;
        }
        self.e = e;
        Ok(())
    }

    /// Replaces Y standard deviations in whatever mode Y currently has.
    pub(crate) fn replace_e(&mut self, e: SharedBuffer) -> Result<()> {
        self.set_e(self.y_mode(), e)
    }

    /// Sets X standard deviations. A null argument clears them.
    ///
    /// # Errors
    /// [`Error::SizeMismatch`] if the length does not fit the X data.
    pub fn set_point_standard_deviations(&mut self, dx: PointStandardDeviations) -> Result<()> {
        if dx.is_present() {
            self.check_size(dx.len())?;
        }
        self.dx = dx;
        Ok(())
    }

    /// Sets X variances, stored as standard deviations.
    ///
    /// # Errors
    /// See [`Histogram::set_point_standard_deviations`].
    pub fn set_point_variances(&mut self, variances: PointVariances) -> Result<()> {
        self.set_point_standard_deviations(PointStandardDeviations::from_point_variances(variances))
    }

    fn check_size(&self, len: usize) -> Result<()> {
        if len == self.size() {
            Ok(())
        } else {
            Err(Error::size_mismatch(self.size(), len))
        }
    }

    /// Switches X to points. Does nothing if X already holds points.
    ///
    /// # Errors
    /// [`Error::SingleBinEdge`] if the histogram holds a single bin edge.
    pub fn convert_to_points(&mut self) -> Result<()> {
        if let XData::BinEdges(edges) = &self.x {
            self.x = XData::Points(Points::from_bin_edges(edges)?);
        }
        Ok(())
    }

    /// Switches X to bin edges. Does nothing if X already holds bin edges.
    ///
    /// Edges reconstructed from points are an approximation: converting
    /// edges to points and back does not in general restore the original
    /// edges.
    pub fn convert_to_bin_edges(&mut self) {
        if let XData::Points(points) = &self.x {
            self.x = XData::BinEdges(BinEdges::from_points(points));
        }
    }

    /// Switches Y (and its standard deviations) to frequencies.
    ///
    /// Point data is converted using edges derived from the points; the X
    /// mode is left unchanged.
    ///
    /// # Errors
    /// Propagates conversion errors; the histogram is unchanged on error.
    pub fn convert_to_frequencies(&mut self) -> Result<()> {
        if self.y_mode() != YMode::Counts {
            return Ok(());
        }
        let edges = self.bin_edges();
        check_bin_alignment(self.size(), &edges)?;
        if let Some(YData::Counts(counts)) = self.y.take() {
            let errors = CountStandardDeviations::from_buffer(std::mem::take(&mut self.e));
            let errors =
                FrequencyStandardDeviations::from_count_standard_deviations(errors, &edges)?;
            self.y = Some(YData::Frequencies(Frequencies::from_counts(counts, &edges)?));
            self.e = errors.into_buffer();
        }
        Ok(())
    }

    /// Switches Y (and its standard deviations) to counts.
    ///
    /// Point data is converted using edges derived from the points; the X
    /// mode is left unchanged.
    ///
    /// # Errors
    /// Propagates conversion errors; the histogram is unchanged on error.
    pub fn convert_to_counts(&mut self) -> Result<()> {
        if self.y_mode() != YMode::Frequencies {
            return Ok(());
        }
        let edges = self.bin_edges();
        check_bin_alignment(self.size(), &edges)?;
        if let Some(YData::Frequencies(frequencies)) = self.y.take() {
            let errors = FrequencyStandardDeviations::from_buffer(std::mem::take(&mut self.e));
            let errors =
                CountStandardDeviations::from_frequency_standard_deviations(errors, &edges)?;
            self.y = Some(YData::Counts(Counts::from_frequencies(frequencies, &edges)?));
            self.e = errors.into_buffer();
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct HistogramRecord {
    x: XData,
    #[serde(default)]
    y: Option<YData>,
    #[serde(default)]
    e: SharedBuffer,
    #[serde(default)]
    dx: PointStandardDeviations,
}

#[cfg(feature = "serde")]
impl TryFrom<HistogramRecord> for Histogram {
    type Error = Error;

    fn try_from(record: HistogramRecord) -> Result<Self> {
        let mut histogram = Histogram::new(record.x);
        if let Some(y) = record.y {
            histogram.set_y(y)?;
        }
        if record.e.is_present() {
            histogram.replace_e(record.e)?;
        }
        histogram.set_point_standard_deviations(record.dx)?;
        Ok(histogram)
    }
}
