//! Sparse series: an explicit ordered list of runs, gaps implicitly zero.

use num_traits::Zero;
use tessella_runs::{OffsetType, Run};

use crate::inserter::{FromRuns, RunParts};
use crate::options::SeriesOptions;
use crate::run_list::RunList;
use crate::series::{Series, ValueType, same_series};

/// A series stored as an ordered list of value-bearing runs.
///
/// Offsets not covered by a run take the implicit zero value. Runs of any
/// length (≥ 1) are stored as single entries. Built in bulk through the
/// ordered-inserter protocol; for in-place point edits use
/// [`PiecewiseSeries`](crate::PiecewiseSeries) instead.
#[derive(Debug, Clone)]
pub struct SparseSeries<T, V> {
    discretization: T,
    zero: V,
    list: RunList<T, V>,
}

impl<T: OffsetType, V: ValueType> SparseSeries<T, V> {
    /// Creates an empty series with the given discretization and zero
    /// value.
    pub fn with_zero(discretization: T, zero: V) -> Self {
        SparseSeries {
            discretization,
            zero,
            list: RunList::new(),
        }
    }
}

impl<T: OffsetType, V: ValueType + Zero> SparseSeries<T, V> {
    /// Creates an empty series with discretization 1 and the default zero.
    pub fn new() -> Self {
        Self::from_options(SeriesOptions::new())
    }

    pub fn from_options(options: SeriesOptions<T, V>) -> Self {
        SparseSeries {
            discretization: options.discretization_or_default(),
            zero: options.zero_or_default(),
            list: RunList::new(),
        }
    }
}

impl<T: OffsetType, V: ValueType + Zero> Default for SparseSeries<T, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: OffsetType, V: ValueType> Series for SparseSeries<T, V> {
    type Offset = T;
    type Value = V;

    fn discretization(&self) -> T {
        self.discretization
    }

    fn zero(&self) -> &V {
        &self.zero
    }

    fn get_at(&self, offset: T) -> &V {
        self.list.get_at(offset, &self.zero)
    }

    fn runs(&self) -> impl Iterator<Item = (Run<T>, &V)> + '_ {
        self.list.iter()
    }

    fn pre_run(&self) -> Option<(Run<T>, &V)> {
        self.list.pre()
    }

    fn post_run(&self) -> Option<(Run<T>, &V)> {
        self.list.post()
    }
}

impl<T: OffsetType, V: ValueType> FromRuns for SparseSeries<T, V> {
    fn from_runs(discretization: T, zero: V, parts: RunParts<T, V>) -> Self {
        SparseSeries {
            discretization,
            zero,
            list: RunList::from_parts(parts),
        }
    }
}

impl<T: OffsetType, V: ValueType> PartialEq for SparseSeries<T, V> {
    fn eq(&self, other: &Self) -> bool {
        same_series(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inserter::OrderedInserter;

    fn sample() -> SparseSeries<i64, i64> {
        let mut s = SparseSeries::new();
        OrderedInserter::new(&mut s)
            .push_at(3, 10)
            .push_run(7, 20, 25)
            .commit();
        s
    }

    #[test]
    fn test_get_at_inside_runs() {
        let s = sample();
        assert_eq!(*s.get_at(10), 3);
        assert_eq!(*s.get_at(20), 7);
        assert_eq!(*s.get_at(24), 7);
    }

    #[test]
    fn test_get_at_gaps_yield_zero() {
        let s = sample();
        assert_eq!(*s.get_at(9), 0);
        assert_eq!(*s.get_at(11), 0);
        assert_eq!(*s.get_at(25), 0);
        assert_eq!(*s.get_at(-100), 0);
    }

    #[test]
    fn test_runs_are_ordered() {
        let s = sample();
        let runs: Vec<_> = s.runs().map(|(r, v)| (r, *v)).collect();
        assert_eq!(runs, vec![(Run::new(10, 11), 3), (Run::new(20, 25), 7)]);
    }

    #[test]
    fn test_custom_zero() {
        let mut s = SparseSeries::from_options(SeriesOptions::new().zero(-1));
        OrderedInserter::new(&mut s).push_at(5, 0).commit();
        assert_eq!(*s.get_at(100), -1);
        // inserting the zero value materializes nothing
        OrderedInserter::new(&mut s).push_at(-1, 0).commit();
        assert_eq!(s.runs().count(), 0);
    }

    #[test]
    fn test_equality_ignores_construction_path() {
        let a = sample();
        let mut b = SparseSeries::new();
        OrderedInserter::new(&mut b)
            .push_at(3, 10)
            .push_run(7, 20, 22)
            .push_run(7, 22, 25)
            .commit();
        assert_eq!(a, b);
    }
}
