#![allow(clippy::float_cmp)]
use proptest::prelude::*;
use rusthist_algorithms::{rebin, rebin_all, BatchConfig, RebinParams};
use rusthist_core::{
    BinEdges, CountStandardDeviations, Counts, Error, ErrorKind, Histogram, XMode, YMode,
};

fn flat_spectrum() -> Histogram {
    Histogram::with_counts(
        BinEdges::from([0.0, 1.0, 2.0, 3.0, 4.0]),
        Counts::from([1.0, 1.0, 1.0, 1.0]),
    )
    .unwrap()
}

#[test]
fn test_flat_spectrum_onto_coarse_grid() {
    let output = rebin(&flat_spectrum(), &BinEdges::from([0.0, 2.0, 4.0])).unwrap();
    assert_eq!(output.y(), &[2.0, 2.0]);
    assert_eq!(output.x_mode(), XMode::BinEdges);
    assert_eq!(output.y_mode(), YMode::Counts);
    assert_eq!(output.size(), 2);
}

#[test]
fn test_flat_spectrum_onto_uneven_grid() {
    // 0-1 full bin plus half of 1-2 gives 1.5; the rest gives 2.5.
    let output = rebin(&flat_spectrum(), &BinEdges::from([0.0, 1.5, 4.0])).unwrap();
    assert_eq!(output.y(), &[1.5, 2.5]);
}

#[test]
fn test_merge_adjacent_pairs() {
    let input = Histogram::with_counts(
        BinEdges::from([0.0, 1.0, 2.0, 3.0, 4.0]),
        Counts::from([1.0, 2.0, 3.0, 4.0]),
    )
    .unwrap();
    let output = rebin(&input, &BinEdges::from([0.0, 2.0, 4.0])).unwrap();
    assert_eq!(output.y(), &[3.0, 7.0]);
}

#[test]
fn test_identity_grid_preserves_counts_and_errors() {
    let edges = BinEdges::from([-3.0, -1.0, 0.5, 0.75, 9.0]);
    let mut input =
        Histogram::with_counts(edges.clone(), Counts::from([5.0, 0.0, 2.5, 1.0])).unwrap();
    input
        .set_count_standard_deviations(CountStandardDeviations::from([2.0, 0.0, 1.5, 1.0]))
        .unwrap();

    let output = rebin(&input, &edges).unwrap();
    assert_eq!(output.y(), input.y());
    assert_eq!(output.e(), input.e());
}

#[test]
fn test_failure_leaves_input_untouched() {
    let input = flat_spectrum();
    let before = input.clone();
    let err = rebin(&input, &BinEdges::from([0.0, 2.0, 2.0, 4.0])).unwrap_err();
    assert_eq!(err, Error::NonPositiveBinWidth);
    assert_eq!(err.kind(), ErrorKind::Runtime);
    assert_eq!(input, before);
}

#[test]
fn test_rebin_does_not_disturb_shared_input() {
    let input = flat_spectrum();
    let shared = input.clone();
    let _ = rebin(&input, &BinEdges::from([0.0, 4.0])).unwrap();
    assert!(input.counts().unwrap().ptr_eq(&shared.counts().unwrap()));
}

#[test]
fn test_params_pipeline() {
    let params: RebinParams = "0,0.5,2,1,4".parse().unwrap();
    let edges = params.create_bin_edges().unwrap();
    assert_eq!(edges.as_slice(), &[0.0, 0.5, 1.0, 1.5, 2.0, 3.0, 4.0]);

    let inputs = [flat_spectrum(), flat_spectrum() * 2.0];
    let outputs = rebin_all(&inputs, &edges, &BatchConfig::default()).unwrap();
    assert_eq!(outputs[0].y(), &[0.5, 0.5, 0.5, 0.5, 1.0, 1.0]);
    assert_eq!(outputs[1].y(), &[1.0, 1.0, 1.0, 1.0, 2.0, 2.0]);
}

proptest! {
    #[test]
    fn prop_rebin_conserves_total_counts(
        gaps in prop::collection::vec(0.1..5.0f64, 1..40),
        seed in prop::collection::vec(0.0..1.0e3f64, 40),
        step in 0.05..10.0f64,
    ) {
        let edges: Vec<f64> = std::iter::once(0.0)
            .chain(gaps.iter().scan(0.0, |acc, gap| {
                *acc += gap;
                Some(*acc)
            }))
            .collect();
        let last = edges[edges.len() - 1];
        let input = Histogram::with_counts(
            BinEdges::new(edges),
            Counts::new(seed[..gaps.len()].to_vec()),
        )
        .unwrap();

        let target = RebinParams::from_step(step, 0.0, last)
            .unwrap()
            .create_bin_edges()
            .unwrap();
        let output = rebin(&input, &target).unwrap();

        let before: f64 = input.y().iter().sum();
        let after: f64 = output.y().iter().sum();
        prop_assert!((before - after).abs() <= 1e-9 * (1.0 + before), "{} != {}", before, after);
    }
}
