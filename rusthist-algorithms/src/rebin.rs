//! Redistribution of histogram contents onto a new bin grid.
//!
//! Each old bin contributes to every new bin it overlaps, in proportion to
//! the overlap. Contents are assumed to be spread uniformly within a bin.

use rusthist_core::{
    BinEdges, CountVariances, Counts, Error, Frequencies, FrequencyStandardDeviations, Histogram,
    Result, XMode, YData,
};

/// Rebins `input` onto `edges`, keeping its Y mode.
///
/// The input must hold bin edges and Y data. Both edge sequences must be
/// strictly increasing. The input is never modified; on error nothing is
/// produced.
///
/// Counts are split by overlap fraction, and so are their variances.
/// Frequencies are integrated over the overlap and divided by the new bin
/// width; their variances are accumulated as count variances and turned
/// back into a frequency standard deviation once per new bin.
///
/// X standard deviations are not carried over.
///
/// # Errors
/// - [`Error::InvalidXMode`] if the input holds points.
/// - [`Error::UndefinedYMode`] if the input has no Y data.
/// - [`Error::NonPositiveBinWidth`] if either edge sequence has a bin of
///   zero or negative width.
/// - [`Error::NonPositiveOverlap`] if overlapping bins yield no overlap.
pub fn rebin(input: &Histogram, edges: &BinEdges) -> Result<Histogram> {
    if input.x_mode() != XMode::BinEdges {
        return Err(Error::InvalidXMode);
    }
    let Some(y) = input.y_data() else {
        return Err(Error::UndefinedYMode);
    };
    check_bin_widths(input.x())?;
    check_bin_widths(edges.as_slice())?;

    match y {
        YData::Counts(_) => rebin_counts(input, edges),
        YData::Frequencies(_) => rebin_frequencies(input, edges),
    }
}

#[allow(clippy::neg_cmp_op_on_partial_ord)]
fn check_bin_widths(x: &[f64]) -> Result<()> {
    // Negated so NaN widths fail too.
    if x.windows(2).any(|pair| !(pair[1] - pair[0] > 0.0)) {
        return Err(Error::NonPositiveBinWidth);
    }
    Ok(())
}

/// Walks old and new bins in step and calls `accumulate(new, old, overlap,
/// old_width)` for every overlapping pair.
fn sweep(
    xold: &[f64],
    xnew: &[f64],
    mut accumulate: impl FnMut(usize, usize, f64, f64),
) -> Result<()> {
    let old_bins = xold.len().saturating_sub(1);
    let new_bins = xnew.len().saturating_sub(1);
    let (mut iold, mut inew) = (0, 0);

    while iold < old_bins && inew < new_bins {
        let (old_lower, old_upper) = (xold[iold], xold[iold + 1]);
        let (new_lower, new_upper) = (xnew[inew], xnew[inew + 1]);

        if new_upper <= old_lower {
            inew += 1;
        } else if old_upper <= new_lower {
            iold += 1;
        } else {
            let delta = old_upper.min(new_upper) - old_lower.max(new_lower);
            if delta <= 0.0 {
                return Err(Error::NonPositiveOverlap);
            }
            accumulate(inew, iold, delta, old_upper - old_lower);
            if old_upper <= new_upper {
                iold += 1;
            } else {
                inew += 1;
            }
        }
    }
    Ok(())
}

fn rebin_counts(input: &Histogram, edges: &BinEdges) -> Result<Histogram> {
    let (values, errors) = (input.y(), input.e());
    let propagate = input.has_e();
    let bins = edges.bin_count();
    let mut ynew = vec![0.0; bins];
    let mut variances = vec![0.0; bins];

    sweep(input.x(), edges.as_slice(), |inew, iold, delta, width| {
        let factor = 1.0 / width;
        ynew[inew] += values[iold] * delta * factor;
        if propagate {
            variances[inew] += errors[iold] * errors[iold] * delta * factor;
        }
    })?;

    let mut output = Histogram::with_counts(edges.clone(), Counts::new(ynew))?;
    if propagate {
        output.set_count_variances(CountVariances::new(variances))?;
    }
    Ok(output)
}

fn rebin_frequencies(input: &Histogram, edges: &BinEdges) -> Result<Histogram> {
    let (values, errors) = (input.y(), input.e());
    let propagate = input.has_e();
    let bins = edges.bin_count();
    let mut ynew = vec![0.0; bins];
    let mut accumulated = vec![0.0; bins];

    sweep(input.x(), edges.as_slice(), |inew, iold, delta, width| {
        ynew[inew] += values[iold] * delta;
        if propagate {
            accumulated[inew] += errors[iold] * errors[iold] * delta * width;
        }
    })?;

    // One division and one square root per new bin, after all old bins
    // have been summed into it.
    for ((value, error), width) in ynew
        .iter_mut()
        .zip(accumulated.iter_mut())
        .zip(edges.widths())
    {
        *value /= width;
        *error = error.sqrt() / width;
    }

    let mut output = Histogram::with_frequencies(edges.clone(), Frequencies::new(ynew))?;
    if propagate {
        output.set_frequency_standard_deviations(FrequencyStandardDeviations::new(accumulated))?;
    }
    Ok(output)
}
