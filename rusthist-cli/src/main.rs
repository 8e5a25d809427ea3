//! rusthist command-line interface.
//!
//! Reads histograms from JSON, rebins or converts them, and writes JSON back.
#![allow(
    clippy::uninlined_format_args,
    clippy::redundant_closure_for_method_calls,
    clippy::manual_let_else
)]

use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, info};

use rusthist_algorithms::{rebin_all_with_params, BatchConfig, RebinParams};
use rusthist_core::validation::{check_bin_edges, check_finite, check_points, check_uncertainties};
use rusthist_core::{Histogram, XData, YData, YMode};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;

/// Result type for CLI operations.
type Result<T> = std::result::Result<T, CliError>;

/// CLI error types.
#[derive(Error, Debug)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Core error: {0}")]
    Core(#[from] rusthist_core::Error),

    #[error("Rebin error: {0}")]
    Algorithms(#[from] rusthist_algorithms::Error),

    #[error("{path}: histogram {index}: {source}")]
    Invalid {
        path: PathBuf,
        index: usize,
        source: rusthist_core::Error,
    },

    #[error("{0}: no histograms")]
    Empty(PathBuf),
}

/// X representation selection.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum XModeArg {
    /// Bin boundaries
    Edges,
    /// Bin centres
    Points,
}

/// Y representation selection.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum YModeArg {
    /// Integrated intensity per bin
    Counts,
    /// Intensity per unit X
    Frequencies,
}

/// Histogram rebinning and conversion.
#[derive(Parser)]
#[command(name = "rusthist")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebin histograms onto new bin edges
    Rebin {
        /// Input JSON file holding a list of histograms
        #[arg(short, long)]
        input: PathBuf,

        /// Output JSON file
        #[arg(short, long)]
        output: PathBuf,

        /// Rebin parameters "x1,dx1,x2,...,xn", or a single step spanning the data
        #[arg(short, long, allow_hyphen_values = true)]
        params: String,

        /// Drop the final partial bin of each range
        #[arg(long)]
        full_bins_only: bool,

        /// Fraction of a step below which a final partial bin is merged
        #[arg(long, default_value_t = rusthist_algorithms::DEFAULT_LAST_BIN_FRACTION)]
        last_bin_fraction: f64,

        /// Process histograms one at a time
        #[arg(long)]
        sequential: bool,
    },

    /// Switch the X and/or Y representation of histograms
    Convert {
        /// Input JSON file holding a list of histograms
        #[arg(short, long)]
        input: PathBuf,

        /// Output JSON file
        #[arg(short, long)]
        output: PathBuf,

        /// Target X representation
        #[arg(long, value_enum)]
        x_mode: Option<XModeArg>,

        /// Target Y representation
        #[arg(long, value_enum)]
        y_mode: Option<YModeArg>,
    },

    /// Show a summary of each histogram in a file
    Info {
        /// Input JSON file
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    match cli.command {
        Commands::Rebin {
            input,
            output,
            params,
            full_bins_only,
            last_bin_fraction,
            sequential,
        } => {
            let start = Instant::now();
            let histograms = load(&input)?;
            let params = parse_params(&params, &histograms)?
                .with_full_bins_only(full_bins_only)
                .with_last_bin_fraction(last_bin_fraction);
            debug!("Rebin parameters: {:?}", params.params());

            let config = BatchConfig::new().with_parallel(!sequential);
            let rebinned = rebin_all_with_params(&histograms, &params, &config)?;
            save(&output, &rebinned)?;

            info!(
                "Rebinned {} histograms into {} in {:.2}s",
                rebinned.len(),
                output.display(),
                start.elapsed().as_secs_f64()
            );
        }

        Commands::Convert {
            input,
            output,
            x_mode,
            y_mode,
        } => {
            let mut histograms = load(&input)?;
            for histogram in &mut histograms {
                convert(histogram, x_mode, y_mode)?;
            }
            save(&output, &histograms)?;
            info!(
                "Converted {} histograms into {}",
                histograms.len(),
                output.display()
            );
        }

        Commands::Info { input } => {
            let histograms = load(&input)?;
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            writeln!(out, "File: {}", input.display())?;
            writeln!(out, "Histograms: {}", histograms.len())?;
            for (index, histogram) in histograms.iter().enumerate() {
                writeln!(out, "{}", summary(index, histogram))?;
            }
        }
    }

    Ok(())
}

/// Reads and validates a JSON list of histograms.
fn load(path: &Path) -> Result<Vec<Histogram>> {
    debug!("Reading: {}", path.display());
    let reader = BufReader::new(File::open(path)?);
    let histograms: Vec<Histogram> = serde_json::from_reader(reader)?;
    if histograms.is_empty() {
        return Err(CliError::Empty(path.to_path_buf()));
    }
    for (index, histogram) in histograms.iter().enumerate() {
        validate(histogram).map_err(|source| CliError::Invalid {
            path: path.to_path_buf(),
            index,
            source,
        })?;
    }
    debug!("Loaded {} histograms", histograms.len());
    Ok(histograms)
}

fn save(path: &Path, histograms: &[Histogram]) -> Result<()> {
    debug!("Writing output to: {}", path.display());
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, histograms)?;
    writer.flush()?;
    Ok(())
}

/// Rejects non-finite values, unordered X data and negative uncertainties.
fn validate(histogram: &Histogram) -> rusthist_core::Result<()> {
    match histogram.x_data() {
        XData::BinEdges(edges) => check_bin_edges(edges)?,
        XData::Points(points) => check_points(points)?,
    }
    match histogram.y_data() {
        Some(YData::Counts(counts)) => check_finite(counts)?,
        Some(YData::Frequencies(frequencies)) => check_finite(frequencies)?,
        None => {}
    }
    match histogram.y_mode() {
        YMode::Counts => check_uncertainties(&histogram.count_standard_deviations()?)?,
        YMode::Frequencies => check_uncertainties(&histogram.frequency_standard_deviations()?)?,
        YMode::Uninitialized => {}
    }
    check_uncertainties(&histogram.point_standard_deviations())
}

/// Parses `x1,dx1,...,xn`. A lone step spans the X range of all histograms.
fn parse_params(raw: &str, histograms: &[Histogram]) -> Result<RebinParams> {
    if raw.contains(',') {
        return Ok(raw.parse()?);
    }
    let step = match raw.trim().parse::<f64>() {
        Ok(step) => step,
        Err(_) => {
            let message = format!("cannot parse '{}' as a number", raw);
            return Err(rusthist_algorithms::Error::InvalidParams(message).into());
        }
    };
    let (xmin, xmax) = histograms
        .iter()
        .filter_map(|histogram| {
            let x = histogram.x();
            Some((*x.first()?, *x.last()?))
        })
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (first, last)| {
            (lo.min(first), hi.max(last))
        });
    debug!("Single step {} over [{}, {}]", step, xmin, xmax);
    Ok(RebinParams::from_step(step, xmin, xmax)?)
}

fn convert(
    histogram: &mut Histogram,
    x_mode: Option<XModeArg>,
    y_mode: Option<YModeArg>,
) -> rusthist_core::Result<()> {
    match y_mode {
        Some(YModeArg::Counts) => histogram.convert_to_counts()?,
        Some(YModeArg::Frequencies) => histogram.convert_to_frequencies()?,
        None => {}
    }
    match x_mode {
        Some(XModeArg::Edges) => histogram.convert_to_bin_edges(),
        Some(XModeArg::Points) => histogram.convert_to_points()?,
        None => {}
    }
    Ok(())
}

fn summary(index: usize, histogram: &Histogram) -> String {
    let x = histogram.x();
    let range = match (x.first(), x.last()) {
        (Some(first), Some(last)) => format!("{} - {}", first, last),
        _ => "empty".to_string(),
    };
    format!(
        "[{}] x: {:?}, y: {}, size: {}, X range: {}, e: {}, dx: {}",
        index,
        histogram.x_mode(),
        histogram.y_mode().name(),
        histogram.size(),
        range,
        if histogram.has_e() { "yes" } else { "no" },
        if histogram.has_dx() { "yes" } else { "no" },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusthist_core::{BinEdges, CountStandardDeviations, Counts, Points, XMode};

    fn write_input(dir: &tempfile::TempDir, json: &str) -> PathBuf {
        let path = dir.path().join("input.json");
        std::fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn test_load_and_save() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(
            &dir,
            r#"[{"x": {"bin_edges": [0, 1, 2]}, "y": {"counts": [4, 9]}, "e": [2, 3]}]"#,
        );
        let histograms = load(&input).unwrap();
        assert_eq!(histograms.len(), 1);
        assert_eq!(histograms[0].y(), &[4.0, 9.0]);

        let output = dir.path().join("output.json");
        save(&output, &histograms).unwrap();
        assert_eq!(load(&output).unwrap(), histograms);
    }

    #[test]
    fn test_load_rejects_bad_input() {
        let dir = tempfile::tempdir().unwrap();
        let unordered = write_input(
            &dir,
            r#"[{"x": {"bin_edges": [0, 2, 1]}, "y": {"counts": [1, 1]}}]"#,
        );
        assert!(matches!(
            load(&unordered),
            Err(CliError::Invalid { index: 0, .. })
        ));

        let empty = write_input(&dir, "[]");
        assert!(matches!(load(&empty), Err(CliError::Empty(_))));

        let mismatched = write_input(
            &dir,
            r#"[{"x": {"bin_edges": [0, 1, 2]}, "y": {"counts": [1]}}]"#,
        );
        assert!(matches!(load(&mismatched), Err(CliError::Json(_))));
    }

    #[test]
    fn test_validate_rejects_negative_errors() {
        let mut histogram =
            Histogram::with_counts(BinEdges::from([0.0, 1.0]), Counts::from([1.0])).unwrap();
        assert!(validate(&histogram).is_ok());
        histogram
            .set_count_standard_deviations(CountStandardDeviations::from([-1.0]))
            .unwrap();
        assert!(validate(&histogram).is_err());
    }

    #[test]
    fn test_negative_last_bin_fraction_is_rejected() {
        let edges = BinEdges::from([0.0, 4.0]);
        let histograms = vec![Histogram::with_counts(edges, Counts::from([4.0])).unwrap()];
        let params = parse_params("0,1,3.5", &histograms)
            .unwrap()
            .with_last_bin_fraction(-2.0);
        let err = rebin_all_with_params(&histograms, &params, &BatchConfig::default()).unwrap_err();
        assert!(matches!(err, rusthist_algorithms::Error::InvalidParams(_)));
    }

    #[test]
    fn test_single_step_spans_all_histograms() {
        let histograms = vec![
            Histogram::with_counts(BinEdges::from([1.0, 2.0]), Counts::from([1.0])).unwrap(),
            Histogram::with_counts(BinEdges::from([0.0, 3.0]), Counts::from([1.0])).unwrap(),
        ];
        let params = parse_params("1", &histograms).unwrap();
        assert_eq!(params.params(), &[0.0, 1.0, 3.0]);
        let params = parse_params("0,0.5,1", &histograms).unwrap();
        assert_eq!(params.params(), &[0.0, 0.5, 1.0]);
        assert!(parse_params("x", &histograms).is_err());
    }

    #[test]
    fn test_convert_both_modes() {
        let edges = BinEdges::from([0.0, 2.0, 3.0]);
        let mut histogram = Histogram::with_counts(edges, Counts::from([4.0, 3.0])).unwrap();
        convert(
            &mut histogram,
            Some(XModeArg::Points),
            Some(YModeArg::Frequencies),
        )
        .unwrap();
        assert_eq!(histogram.x_mode(), XMode::Points);
        assert_eq!(histogram.points().unwrap(), Points::from([1.0, 2.5]));
        assert_eq!(histogram.y(), &[2.0, 3.0]);
    }

    #[test]
    fn test_summary() {
        let histogram =
            Histogram::with_counts(Points::from([1.0, 2.0]), Counts::from([0.0, 0.0])).unwrap();
        assert_eq!(
            summary(3, &histogram),
            "[3] x: Points, y: counts, size: 2, X range: 1 - 2, e: no, dx: no"
        );
    }
}
