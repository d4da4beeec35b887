//! Piecewise-constant series: a coalescing interval map with
//! overwrite-with-merge edits.

use num_traits::Zero;
use tessella_runs::{OffsetType, Run};

use crate::inserter::{FromRuns, RunParts, SetRun};
use crate::options::SeriesOptions;
use crate::run_list::RunList;
use crate::series::{RunValue, Series, ValueType, same_series};

/// A series stored as a coalescing list of constant runs.
///
/// Like [`SparseSeries`](crate::SparseSeries) this stores an ordered list
/// of value-bearing runs with an implicit zero elsewhere, but it
/// additionally supports random-access overwrite through
/// [`set_at`](PiecewiseSeries::set_at): writing a run splits
/// partially-covered neighbors, erases swallowed runs and merges with
/// equal-valued neighbors so the stored representation stays canonical.
/// This is the usual target of the algorithm layer.
#[derive(Debug, Clone)]
pub struct PiecewiseSeries<T, V> {
    discretization: T,
    zero: V,
    list: RunList<T, V>,
}

impl<T: OffsetType, V: ValueType> PiecewiseSeries<T, V> {
    /// Creates an empty series with the given discretization and zero
    /// value.
    pub fn with_zero(discretization: T, zero: V) -> Self {
        PiecewiseSeries {
            discretization,
            zero,
            list: RunList::new(),
        }
    }

    /// Overwrites `[run.start, run.end)` with `value`.
    ///
    /// Existing runs overlapping the range are split or erased as needed;
    /// the new run merges with adjacent runs of equal value. Writing the
    /// zero value clears the range (the covered span goes back to the
    /// implicit zero; surrounding runs keep their extent).
    ///
    /// Panics if either bound of `run` is infinite.
    pub fn set_at(&mut self, run: Run<T>, value: V) {
        assert!(
            run.start.is_finite_offset() && run.end.is_finite_offset(),
            "piecewise overwrite requires a finite run, got {run:?}"
        );
        if run.is_empty() {
            return;
        }
        let writes = value != self.zero;
        let data = self.list.data_mut();

        // Overlapped entries occupy data[lo..hi].
        let lo = data.partition_point(|rv| rv.run.end <= run.start);
        let hi = data.partition_point(|rv| rv.run.start < run.end);

        // Remnants of partially-covered boundary runs.
        let mut left_piece = None;
        let mut right_piece = None;
        if lo < hi {
            let first = &data[lo];
            if first.run.start < run.start {
                left_piece = Some(RunValue::new(
                    Run::new(first.run.start, run.start),
                    first.value.clone(),
                ));
            }
            let last = &data[hi - 1];
            if last.run.end > run.end {
                right_piece = Some(RunValue::new(
                    Run::new(run.end, last.run.end),
                    last.value.clone(),
                ));
            }
        }

        let mut splice_start = lo;
        let mut splice_end = hi;
        let mut new_run = run;
        if writes {
            // Fuse with whatever ends up adjacent on the left...
            match &left_piece {
                Some(piece) if piece.value == value => {
                    new_run.start = piece.run.start;
                    left_piece = None;
                }
                Some(_) => {}
                None => {
                    if splice_start > 0
                        && data[splice_start - 1].run.end == new_run.start
                        && data[splice_start - 1].value == value
                    {
                        splice_start -= 1;
                        new_run.start = data[splice_start].run.start;
                    }
                }
            }
            // ...and on the right.
            match &right_piece {
                Some(piece) if piece.value == value => {
                    new_run.end = piece.run.end;
                    right_piece = None;
                }
                Some(_) => {}
                None => {
                    if splice_end < data.len()
                        && data[splice_end].run.start == new_run.end
                        && data[splice_end].value == value
                    {
                        new_run.end = data[splice_end].run.end;
                        splice_end += 1;
                    }
                }
            }
        }

        let mut replacement = Vec::with_capacity(3);
        if let Some(piece) = left_piece {
            replacement.push(piece);
        }
        if writes {
            replacement.push(RunValue::new(new_run, value));
        }
        if let Some(piece) = right_piece {
            replacement.push(piece);
        }
        data.splice(splice_start..splice_end, replacement);
    }
}

impl<T: OffsetType, V: ValueType + Zero> PiecewiseSeries<T, V> {
    /// Creates an empty series with discretization 1 and the default zero.
    pub fn new() -> Self {
        Self::from_options(SeriesOptions::new())
    }

    pub fn from_options(options: SeriesOptions<T, V>) -> Self {
        PiecewiseSeries {
            discretization: options.discretization_or_default(),
            zero: options.zero_or_default(),
            list: RunList::new(),
        }
    }
}

impl<T: OffsetType, V: ValueType + Zero> Default for PiecewiseSeries<T, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: OffsetType, V: ValueType> Series for PiecewiseSeries<T, V> {
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

impl<T: OffsetType, V: ValueType> FromRuns for PiecewiseSeries<T, V> {
    fn from_runs(discretization: T, zero: V, parts: RunParts<T, V>) -> Self {
        PiecewiseSeries {
            discretization,
            zero,
            list: RunList::from_parts(parts),
        }
    }
}

impl<T: OffsetType, V: ValueType> SetRun for PiecewiseSeries<T, V> {
    fn set_at(&mut self, run: Run<T>, value: V) {
        PiecewiseSeries::set_at(self, run, value);
    }
}

impl<T: OffsetType, V: ValueType> PartialEq for PiecewiseSeries<T, V> {
    fn eq(&self, other: &Self) -> bool {
        same_series(self, other)
    }
}
