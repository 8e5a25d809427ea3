//! Property-based tests for X and Y mode conversions.

use approx::assert_relative_eq;
use proptest::prelude::*;
use rusthist_core::{BinEdges, Counts, ErrorKind, Frequencies, Histogram, Points, YMode};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * (1.0 + a.abs().max(b.abs()))
}

fn increasing(len: std::ops::Range<usize>) -> impl Strategy<Value = Vec<f64>> {
    (
        -1.0e3..1.0e3f64,
        prop::collection::vec(1.0e-3..10.0f64, len),
    )
        .prop_map(|(start, gaps)| {
            std::iter::once(start)
                .chain(gaps.iter().scan(start, |acc, gap| {
                    *acc += gap;
                    Some(*acc)
                }))
                .collect()
        })
}

fn uniform(len: std::ops::Range<usize>) -> impl Strategy<Value = Vec<f64>> {
    (-1.0e3..1.0e3f64, 1.0e-2..10.0f64, len)
        .prop_map(|(start, step, n)| (0..n).map(|i| start + step * i as f64).collect())
}

proptest! {
    #[test]
    fn prop_points_to_edges_preserves_size(points in increasing(1..64)) {
        let points = Points::new(points);
        let edges = BinEdges::from_points(&points);
        prop_assert_eq!(edges.len(), points.len() + 1);
        let back = Points::from_bin_edges(&edges).unwrap();
        prop_assert_eq!(back.len(), points.len());
    }

    #[test]
    fn prop_uniform_points_round_trip(points in uniform(2..64)) {
        let points = Points::new(points);
        let back = Points::from_bin_edges(&BinEdges::from_points(&points)).unwrap();
        for (a, b) in back.iter().zip(points.iter()) {
            prop_assert!(close(*a, *b), "{} != {}", a, b);
        }
    }

    #[test]
    fn prop_uniform_edges_keep_outer_bounds(edges in uniform(3..64)) {
        let edges = BinEdges::new(edges);
        let points = Points::from_bin_edges(&edges).unwrap();
        let back = BinEdges::from_points(&points);
        prop_assert_eq!(back.len(), edges.len());
        prop_assert!(close(back[0], edges[0]));
        prop_assert!(close(back[back.len() - 1], edges[edges.len() - 1]));
    }

    #[test]
    fn prop_counts_frequencies_round_trip(
        edges in increasing(1..31),
        seed in prop::collection::vec(0.0..1.0e6f64, 31),
    ) {
        let edges = BinEdges::new(edges);
        let counts = Counts::new(seed[..edges.bin_count()].to_vec());
        let frequencies = Frequencies::from_counts(counts.clone(), &edges).unwrap();
        let back = Counts::from_frequencies(frequencies, &edges).unwrap();
        for (a, b) in back.iter().zip(counts.iter()) {
            prop_assert!(close(*a, *b), "{} != {}", a, b);
        }
    }

    #[test]
    fn prop_histogram_mode_round_trip(
        edges in increasing(1..31),
        seed in prop::collection::vec(0.0..1.0e4f64, 31),
    ) {
        let edges = BinEdges::new(edges);
        let counts = Counts::new(seed[..edges.bin_count()].to_vec());
        let original = Histogram::with_counts(edges, counts).unwrap();

        let mut histogram = original.clone();
        histogram.convert_to_frequencies().unwrap();
        prop_assert_eq!(histogram.y_mode(), YMode::Frequencies);
        histogram.convert_to_counts().unwrap();
        prop_assert_eq!(histogram.y_mode(), YMode::Counts);
        for (a, b) in histogram.y().iter().zip(original.y()) {
            prop_assert!(close(*a, *b), "{} != {}", a, b);
        }
    }
}

#[test]
fn test_single_point_gets_unit_bin() {
    let edges = BinEdges::from_points(&Points::from([1.0]));
    assert_eq!(edges.as_slice(), &[0.5, 1.5]);
}

#[test]
fn test_frequencies_need_one_more_edge_than_counts() {
    for edge_count in [2, 3, 5, 6] {
        let edges = BinEdges::new((0..edge_count).map(f64::from).collect());
        let err = Frequencies::from_counts(Counts::from([1.0, 2.0, 3.0]), &edges).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Logic);
    }
    let edges = BinEdges::from([0.0, 1.0, 2.0, 4.0]);
    assert!(Frequencies::from_counts(Counts::from([1.0, 2.0, 3.0]), &edges).is_ok());
}

#[test]
fn test_irregular_points_are_approximated() {
    let points = Points::from([1.0, 2.0, 4.0]);
    let edges = BinEdges::from_points(&points);
    assert_eq!(edges.as_slice(), &[0.5, 1.5, 3.0, 5.0]);
    let back = Points::from_bin_edges(&edges).unwrap();
    assert_relative_eq!(back[0], 1.0);
    assert_relative_eq!(back[1], 2.25);
    assert_relative_eq!(back[2], 4.0);
}
