//! Seeded randomized property tests of the build and edit paths.

use itertools::Itertools;
use tessella_runs::{OffsetType, Run};

use crate::inserter::{CopyAndSwapInserter, OrderedInserter, RunInserter};
use crate::piecewise::PiecewiseSeries;
use crate::series::{Series, same_series};
use crate::sparse::SparseSeries;

/// Checks the canonical-form invariants of a series' stored runs.
fn assert_canonical<S>(series: &S)
where
    S: Series,
    S::Value: Clone,
{
    let runs: Vec<_> = series.runs().map(|(r, v)| (r, v.clone())).collect();
    for (run, value) in &runs {
        assert!(!run.is_empty(), "stored empty run {run:?}");
        assert!(!run.is_unbounded(), "stored unbounded run {run:?}");
        assert!(value != series.zero(), "stored zero-valued run {run:?}");
    }
    for ((a, av), (b, bv)) in runs.iter().tuple_windows() {
        assert!(a.end <= b.start, "overlapping or unordered runs {a:?} {b:?}");
        assert!(
            a.end != b.start || av != bv,
            "unmerged adjacent equal-valued runs at {:?}",
            a.end
        );
    }
}

#[test]
fn test_random_ordered_builds_are_canonical() {
    fastrand::seed(506422917);
    for _ in 0..200 {
        let mut series = SparseSeries::<i64, i64>::new();
        let mut inserter = CopyAndSwapInserter::new(&mut series);
        let mut offset = fastrand::i64(-50..50);
        let mut model: Vec<(Run<i64>, i64)> = Vec::new();
        for _ in 0..fastrand::usize(0..40) {
            // Gaps of zero keep runs adjacent often enough to exercise
            // the merge path.
            offset += fastrand::i64(0..3);
            let len = fastrand::i64(1..5);
            let value = fastrand::i64(0..4);
            let run = Run::new(offset, offset + len);
            inserter.insert(run, value);
            if value != 0 {
                model.push((run, value));
            }
            offset += len;
        }
        inserter.commit();
        assert_canonical(&series);
        // Every modeled offset reads back the inserted value.
        for (run, value) in model {
            let mut at = run.start;
            while at < run.end {
                assert_eq!(series.get_at(at), &value);
                at += 1;
            }
        }
    }
}

#[test]
fn test_random_overwrites_match_a_flat_model() {
    fastrand::seed(297135646);
    for _ in 0..100 {
        let mut series = PiecewiseSeries::<i64, i64>::new();
        let mut model = [0i64; 64];
        for _ in 0..fastrand::usize(1..30) {
            let start = fastrand::i64(0..60);
            let end = start + fastrand::i64(1..12);
            let end = end.min(64);
            let value = fastrand::i64(0..5);
            series.set_at(Run::new(start, end), value);
            for slot in &mut model[start as usize..end as usize] {
                *slot = value;
            }
        }
        assert_canonical(&series);
        for (index, expected) in model.iter().enumerate() {
            assert_eq!(
                series.get_at(index as i64),
                expected,
                "offset {index} after random overwrites"
            );
        }
    }
}

#[test]
fn test_random_round_trips_preserve_equality() {
    fastrand::seed(183650241);
    for _ in 0..100 {
        let mut series = PiecewiseSeries::<i64, i64>::new();
        for _ in 0..fastrand::usize(0..20) {
            let start = fastrand::i64(-100..100);
            let end = start + fastrand::i64(1..20);
            series.set_at(Run::new(start, end), fastrand::i64(-3..4));
        }
        let mut rebuilt = PiecewiseSeries::<i64, i64>::new();
        let mut inserter = CopyAndSwapInserter::new(&mut rebuilt);
        crate::algorithm::copy(&series, &mut inserter);
        inserter.commit();
        assert!(same_series(&series, &rebuilt));
        assert_eq!(series, rebuilt);
    }
}

#[test]
fn test_cursorless_and_positioned_builds_agree() {
    fastrand::seed(911370258);
    for _ in 0..50 {
        let base = fastrand::i64(-20..20);
        let values: Vec<i64> = (0..fastrand::usize(1..12))
            .map(|_| fastrand::i64(0..4))
            .collect();

        let mut chained = SparseSeries::<i64, i64>::new();
        let mut inserter = OrderedInserter::start_at(&mut chained, base);
        for value in &values {
            inserter = inserter.push(*value);
        }
        inserter.commit();

        let mut addressed = SparseSeries::<i64, i64>::new();
        let mut inserter = OrderedInserter::new(&mut addressed);
        for (index, value) in values.iter().enumerate() {
            inserter = inserter.push_at(*value, base + index as i64);
        }
        inserter.commit();

        assert!(same_series(&chained, &addressed));
    }
}

#[test]
fn test_offsets_near_sentinels_stay_finite() {
    // The canonical invariants hold for offsets across the full finite
    // range, not just around zero.
    let lo = i64::neg_inf() + 1;
    let hi = i64::pos_inf() - 1;
    let mut series = SparseSeries::<i64, i64>::new();
    let mut inserter = CopyAndSwapInserter::new(&mut series);
    inserter.insert(Run::new(lo, lo + 3), 4);
    inserter.insert(Run::new(hi - 3, hi), 6);
    inserter.commit();
    assert_canonical(&series);
    assert_eq!(*series.get_at(lo), 4);
    assert_eq!(*series.get_at(hi - 1), 6);
    assert_eq!(*series.get_at(0), 0);
}
