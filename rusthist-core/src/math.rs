//! Arithmetic on whole histograms with uncertainty propagation.

use std::ops::{Div, DivAssign, Mul, MulAssign};

use crate::buffer::SharedBuffer;
use crate::error::{Error, Result};
use crate::histogram::Histogram;

impl MulAssign<f64> for Histogram {
    /// Scales Y by `factor` and the Y standard deviations by `|factor|`.
    fn mul_assign(&mut self, factor: f64) {
        for value in self.y_mut() {
            *value *= factor;
        }
        let magnitude = factor.abs();
        for error in self.e_mut() {
            *error *= magnitude;
        }
    }
}

impl Mul<f64> for Histogram {
    type Output = Histogram;

    fn mul(mut self, factor: f64) -> Histogram {
        self *= factor;
        self
    }
}

impl DivAssign<f64> for Histogram {
    fn div_assign(&mut self, divisor: f64) {
        *self *= 1.0 / divisor;
    }
}

impl Div<f64> for Histogram {
    type Output = Histogram;

    fn div(mut self, divisor: f64) -> Histogram {
        self /= divisor;
        self
    }
}

impl Histogram {
    /// Element-wise sum of two histograms on the same X axis.
    ///
    /// Standard deviations combine in quadrature; a missing side counts as
    /// zero. X standard deviations are taken from `self`.
    ///
    /// # Errors
    /// [`Error::XDataMismatch`] if the X data differ,
    /// [`Error::MissingYData`] if either side has no Y data,
    /// [`Error::YModeMismatch`] if the Y modes differ.
    pub fn try_add(&self, other: &Histogram) -> Result<Histogram> {
        self.combine(other, 1.0)
    }

    /// Element-wise difference of two histograms on the same X axis.
    ///
    /// # Errors
    /// See [`Histogram::try_add`].
    pub fn try_sub(&self, other: &Histogram) -> Result<Histogram> {
        self.combine(other, -1.0)
    }

    fn combine(&self, other: &Histogram, sign: f64) -> Result<Histogram> {
        if self.x_mode() != other.x_mode() || self.x() != other.x() {
            return Err(Error::XDataMismatch);
        }
        let (Some(lhs), Some(rhs)) = (self.y_data(), other.y_data()) else {
            return Err(Error::MissingYData);
        };
        if lhs.mode() != rhs.mode() {
            return Err(Error::YModeMismatch {
                current: lhs.mode().name(),
                requested: rhs.mode().name(),
            });
        }

        let mut result = self.clone();
        for (value, &delta) in result.y_mut().iter_mut().zip(other.y()) {
            *value += sign * delta;
        }

        if self.has_e() || other.has_e() {
            let error_at = |errors: &[f64], index: usize| errors.get(index).copied().unwrap_or(0.0);
            let combined: SharedBuffer = (0..self.size())
                .map(|i| {
                    let a = error_at(self.e(), i);
                    let b = error_at(other.e(), i);
                    (a * a + b * b).sqrt()
                })
                .collect();
            result.replace_e(combined)?;
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::{BinEdges, CountStandardDeviations, Counts, Frequencies, Points};
    use approx::assert_relative_eq;

    fn histogram(counts: [f64; 2], errors: [f64; 2]) -> Histogram {
        let mut h =
            Histogram::with_counts(BinEdges::from([0.0, 1.0, 2.0]), Counts::from(counts)).unwrap();
        h.set_count_standard_deviations(CountStandardDeviations::from(errors))
            .unwrap();
        h
    }

    #[test]
    fn test_scale() {
        let h = histogram([1.0, 2.0], [0.5, 1.0]) * -2.0;
        assert_eq!(h.y(), &[-2.0, -4.0]);
        assert_eq!(h.e(), &[1.0, 2.0]);

        let h = h / 4.0;
        assert_eq!(h.y(), &[-0.5, -1.0]);
        assert_eq!(h.e(), &[0.25, 0.5]);
    }

    #[test]
    fn test_scale_does_not_touch_clones() {
        let original = histogram([1.0, 2.0], [0.5, 1.0]);
        let scaled = original.clone() * 3.0;
        assert_eq!(original.y(), &[1.0, 2.0]);
        assert_eq!(scaled.y(), &[3.0, 6.0]);
    }

    #[test]
    fn test_add_in_quadrature() {
        let a = histogram([1.0, 2.0], [3.0, 0.0]);
        let b = histogram([4.0, 5.0], [4.0, 1.0]);
        let sum = a.try_add(&b).unwrap();
        assert_eq!(sum.y(), &[5.0, 7.0]);
        assert_relative_eq!(sum.e()[0], 5.0);
        assert_relative_eq!(sum.e()[1], 1.0);

        let diff = sum.try_sub(&b).unwrap();
        assert_eq!(diff.y(), &[1.0, 2.0]);
    }

    #[test]
    fn test_add_with_one_side_missing_uncertainties() {
        let a = histogram([1.0, 2.0], [2.0, 2.0]);
        let b = Histogram::with_counts(BinEdges::from([0.0, 1.0, 2.0]), Counts::from([1.0, 1.0]))
            .unwrap();
        let sum = a.try_add(&b).unwrap();
        assert_eq!(sum.e(), &[2.0, 2.0]);
        let sum = b.try_add(&b).unwrap();
        assert!(!sum.has_e());
    }

    #[test]
    fn test_add_mismatches() {
        let a = histogram([1.0, 2.0], [1.0, 1.0]);
        let shifted =
            Histogram::with_counts(BinEdges::from([0.0, 1.0, 2.5]), Counts::from([1.0, 1.0]))
                .unwrap();
        assert_eq!(a.try_add(&shifted), Err(Error::XDataMismatch));

        let points =
            Histogram::with_counts(Points::from([0.0, 1.0, 2.0]), Counts::from([1.0, 1.0, 1.0]))
                .unwrap();
        assert_eq!(a.try_add(&points), Err(Error::XDataMismatch));

        let frequencies = Histogram::with_frequencies(
            BinEdges::from([0.0, 1.0, 2.0]),
            Frequencies::from([1.0, 1.0]),
        )
        .unwrap();
        assert!(matches!(
            a.try_add(&frequencies),
            Err(Error::YModeMismatch { .. })
        ));

        let empty = Histogram::new(BinEdges::from([0.0, 1.0, 2.0]));
        assert_eq!(a.try_add(&empty), Err(Error::MissingYData));
    }
}
