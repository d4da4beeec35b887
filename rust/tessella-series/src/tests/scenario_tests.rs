//! Cross-backend scenarios exercising the algorithm layer end to end.

use tessella_runs::Run;

use crate::algorithm::{self, Downsample};
use crate::closed_form::{CharacteristicSeries, ConstantSeries, DeltaSeries, HeavisideSeries,
    InverseHeavisideSeries};
use crate::dense::DenseSeries;
use crate::inserter::{CopyAndSwapInserter, OrderedInserter, RunInserter};
use crate::options::SeriesOptions;
use crate::piecewise::PiecewiseSeries;
use crate::series::{Series, same_series};
use crate::sparse::SparseSeries;
use crate::view::{clip, shift};

/// Rebuilds any series into a sparse container through the ordered
/// inserter.
fn rebuild<S>(series: &S) -> SparseSeries<S::Offset, S::Value>
where
    S: Series,
{
    let mut out = SparseSeries::with_zero(series.discretization(), series.zero().clone());
    let mut inserter = CopyAndSwapInserter::new(&mut out);
    algorithm::copy(series, &mut inserter);
    inserter.commit();
    out
}

#[test]
fn test_round_trip_dense() {
    let mut d = DenseSeries::<i64, i64>::new();
    d.set_at(Run::new(0, 4), 2);
    d.set_at(Run::new(4, 6), 7);
    d.set_at(Run::new(9, 12), 2);
    assert!(same_series(&d, &rebuild(&d)));
}

#[test]
fn test_round_trip_sparse() {
    let mut s = SparseSeries::<i64, i64>::new();
    OrderedInserter::new(&mut s)
        .push_at(5, -10)
        .push_run(3, 0, 100)
        .commit();
    assert!(same_series(&s, &rebuild(&s)));
}

#[test]
fn test_round_trip_piecewise() {
    let mut p = PiecewiseSeries::<i64, i64>::new();
    p.set_at(Run::new(4, 8), 4);
    p.set_at(Run::new(0, 1), 42);
    p.set_at(Run::new(3, 5), 4);
    assert!(same_series(&p, &rebuild(&p)));
}

#[test]
fn test_round_trip_closed_forms() {
    let delta = DeltaSeries::<i64, i64>::unit(7);
    assert!(same_series(&delta, &rebuild(&delta)));

    let heaviside = HeavisideSeries::<i64, i64>::unit(-1);
    assert!(same_series(&heaviside, &rebuild(&heaviside)));

    let inverse = InverseHeavisideSeries::<i64, i64>::unit(5);
    assert!(same_series(&inverse, &rebuild(&inverse)));

    let constant = ConstantSeries::<i64, i64>::from_options(SeriesOptions::new().value(9));
    assert!(same_series(&constant, &rebuild(&constant)));

    let window = CharacteristicSeries::<i64, i64>::unit(2, 6);
    assert!(same_series(&window, &rebuild(&window)));
}

#[test]
fn test_round_trip_views() {
    let h = HeavisideSeries::<i64, i64>::unit(3);
    let clipped = clip(&h, 0, 10);
    assert!(same_series(&clipped, &rebuild(&clipped)));

    let mut s = SparseSeries::<i64, i64>::new();
    OrderedInserter::new(&mut s).push_run(2, 0, 5).commit();
    let shifted = shift(&s, 100);
    assert!(same_series(&shifted, &rebuild(&shifted)));
}

#[test]
fn test_equality_across_backends() {
    let mut dense = DenseSeries::<i64, i64>::new();
    dense.set_at(Run::new(0, 3), 5);
    dense.set_at(Run::new(7, 9), 2);

    let mut sparse = SparseSeries::<i64, i64>::new();
    OrderedInserter::new(&mut sparse)
        .push_run(5, 0, 3)
        .push_run(2, 7, 9)
        .commit();

    let mut piecewise = PiecewiseSeries::<i64, i64>::new();
    piecewise.set_at(Run::new(0, 3), 5);
    piecewise.set_at(Run::new(7, 9), 2);

    assert!(same_series(&dense, &sparse));
    assert!(same_series(&sparse, &piecewise));
    assert!(same_series(&dense, &piecewise));
}

#[test]
fn test_equality_detects_differences() {
    let mut a = SparseSeries::<i64, i64>::new();
    OrderedInserter::new(&mut a).push_run(5, 0, 3).commit();
    let mut b = SparseSeries::<i64, i64>::new();
    OrderedInserter::new(&mut b).push_run(5, 0, 4).commit();
    assert!(!same_series(&a, &b));

    let zero_mismatch = SparseSeries::<i64, i64>::from_options(SeriesOptions::new().zero(1));
    assert!(!same_series(&a, &zero_mismatch));

    let h = HeavisideSeries::<i64, i64>::unit(0);
    assert!(!same_series(&a, &h));
}

#[test]
fn test_adjacent_difference_of_dense_block() {
    // A constant block over [0, 100) differentiates to a rise at 0 and a
    // fall at 100.
    let d = DenseSeries::<i64, i64>::from_options(SeriesOptions::new().stop(100).value(2));
    let diff = algorithm::adjacent_difference(&d).unwrap();

    let mut expected = SparseSeries::<i64, i64>::new();
    OrderedInserter::new(&mut expected)
        .push_at(2, 0)
        .push_at(-2, 100)
        .commit();
    assert!(same_series(&diff, &expected));
}

#[test]
fn test_coarse_grain_of_unit_ramp() {
    let mut s = SparseSeries::<i64, i64>::new();
    OrderedInserter::new(&mut s)
        .push_at(1, 0)
        .push(2)
        .push(3)
        .push(4)
        .push(5)
        .push(6)
        .push(7)
        .commit();
    let coarse = algorithm::coarse_grain(&s, 3, Downsample::StartSample).unwrap();

    let mut expected = SparseSeries::<i64, i64>::with_zero(3, 0);
    OrderedInserter::new(&mut expected)
        .push_at(1, 0)
        .push_at(4, 3)
        .push_at(7, 6)
        .commit();
    assert!(same_series(&coarse, &expected));
}

#[test]
fn test_heaviside_random_access() {
    let h = HeavisideSeries::<i64, i64>::unit(-1);
    for x in [-1, 0, 1, 50, 1_000_000] {
        assert_eq!(*h.get_at(x), 1, "get_at({x})");
    }
    for x in [-2, -3, -100, -1_000_000] {
        assert_eq!(*h.get_at(x), 0, "get_at({x})");
    }
}

#[test]
fn test_integrate_linearity() {
    let mut a = SparseSeries::<i64, i64>::new();
    OrderedInserter::new(&mut a)
        .push_run(3, 0, 10)
        .push_at(-2, 20)
        .commit();
    let mut b = SparseSeries::<i64, i64>::new();
    OrderedInserter::new(&mut b)
        .push_run(4, 5, 15)
        .push_at(9, 30)
        .commit();
    let sum = algorithm::add(&a, &b).unwrap();
    assert_eq!(
        algorithm::integrate(&sum).unwrap(),
        algorithm::integrate(&a).unwrap() + algorithm::integrate(&b).unwrap()
    );
}

#[test]
fn test_fine_grain_preserves_bucket_integrals() {
    let mut s = SparseSeries::<i64, i64>::new();
    OrderedInserter::new(&mut s)
        .push_at(1, 0)
        .push(2)
        .push(3)
        .push(4)
        .push(5)
        .push(6)
        .commit();
    let coarse = algorithm::coarse_grain(&s, 2, Downsample::StartSample).unwrap();
    let fine = algorithm::fine_grain(&coarse, 1).unwrap();
    // The piecewise expansion spreads each bucket's sampled value over the
    // whole bucket, so the integrals agree bucket by bucket and in total.
    assert_eq!(
        algorithm::integrate(&fine).unwrap(),
        algorithm::integrate(&coarse).unwrap()
    );
    for bucket_start in [0i64, 2, 4] {
        let coarse_bucket = rebuild(&clip(&coarse, bucket_start, bucket_start + 2));
        let fine_bucket = rebuild(&clip(&fine, bucket_start, bucket_start + 2));
        assert_eq!(
            algorithm::integrate(&coarse_bucket).unwrap(),
            algorithm::integrate(&fine_bucket).unwrap(),
            "bucket at {bucket_start}"
        );
    }
}

#[test]
fn test_clip_feeds_offset_translated_build() {
    // Clipping plus an offset-translating inserter rebases a window onto
    // origin zero without the target seeing absolute offsets.
    let mut s = SparseSeries::<i64, i64>::new();
    OrderedInserter::new(&mut s).push_run(6, 95, 120).commit();

    let window = clip(&s, 100, 110);
    let mut rebased = SparseSeries::<i64, i64>::new();
    let mut inserter =
        crate::inserter::OffsetInserter::new(CopyAndSwapInserter::new(&mut rebased), -100);
    algorithm::copy(&window, &mut inserter);
    inserter.commit();

    let runs: Vec<_> = rebased.runs().map(|(r, v)| (*v, r.start, r.end)).collect();
    assert_eq!(runs, vec![(6, 0, 10)]);
}

#[test]
fn test_transform_pipeline_over_views() {
    let mut s = SparseSeries::<i64, i64>::new();
    OrderedInserter::new(&mut s)
        .push_run(1, 0, 4)
        .push_run(2, 8, 12)
        .commit();
    let doubled = {
        let mut out = PiecewiseSeries::<i64, i64>::new();
        let mut inserter = CopyAndSwapInserter::new(&mut out);
        algorithm::transform(&shift(&s, 10), |v| v * 2, &mut inserter);
        inserter.commit();
        out
    };
    let runs: Vec<_> = doubled.runs().map(|(r, v)| (*v, r.start, r.end)).collect();
    assert_eq!(runs, vec![(2, 10, 14), (4, 18, 22)]);
}
