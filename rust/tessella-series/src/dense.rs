//! Dense series: one value per discrete offset slot in a flat buffer.

use num_traits::Zero;
use tessella_runs::{OffsetType, Run};

use crate::inserter::{FromRuns, RunParts, SetRun};
use crate::options::SeriesOptions;
use crate::series::{RunValue, Series, ValueType, same_series};

/// A series backed by a contiguous buffer of values starting at a base
/// offset.
///
/// `get_at` is array indexing; offsets outside the buffer (and outside the
/// optional infinite head/tail segments) yield zero. The buffer may store
/// the zero value explicitly — zero slots simply produce no runs.
///
/// The canonical [`runs`](Series::runs) policy is *maximal merged runs*:
/// consecutive slots holding the same non-zero value are reported as a
/// single run, so iteration cost is proportional to the number of value
/// changes, not to the buffer length.
#[derive(Debug, Clone)]
pub struct DenseSeries<T, V> {
    origin: T,
    buf: Vec<V>,
    discretization: T,
    zero: V,
    pre: Option<RunValue<T, V>>,
    post: Option<RunValue<T, V>>,
}

fn span_to_index<T: OffsetType>(start: T, offset: T) -> usize {
    (offset - start)
        .to_usize()
        .unwrap_or_else(|| panic!("offset span {start:?}..{offset:?} exceeds the address space"))
}

impl<T: OffsetType, V: ValueType> DenseSeries<T, V> {
    /// Creates an empty series with the given discretization and zero
    /// value.
    pub fn with_zero(discretization: T, zero: V) -> Self {
        DenseSeries {
            origin: T::zero(),
            buf: Vec::new(),
            discretization,
            zero,
            pre: None,
            post: None,
        }
    }

    /// The base offset of the first buffer slot.
    #[inline]
    pub fn origin(&self) -> T {
        self.origin
    }

    /// One past the offset of the last buffer slot.
    #[inline]
    pub fn end_offset(&self) -> T {
        self.origin
            + num_traits::cast(self.buf.len()).unwrap_or_else(|| {
                panic!("buffer length {} exceeds the offset type", self.buf.len())
            })
    }

    fn index_of(&self, offset: T) -> Option<usize> {
        if offset < self.origin || offset >= self.end_offset() {
            return None;
        }
        Some(span_to_index(self.origin, offset))
    }

    fn offset_at(&self, index: usize) -> T {
        self.origin
            + num_traits::cast(index)
                .unwrap_or_else(|| panic!("buffer index {index} exceeds the offset type"))
    }

    /// Overwrites `[run.start, run.end)` with `value`, growing the buffer
    /// with zero fill when the run reaches outside the current window. A
    /// run with an infinite bound replaces the corresponding head/tail
    /// segment instead (writing the zero value clears it).
    pub fn set_at(&mut self, run: Run<T>, value: V) {
        if run.is_empty() {
            return;
        }
        if run.start.is_neg_inf() && run.end.is_pos_inf() {
            // An axis-spanning write splits into head and tail at zero.
            self.set_at(Run::head(T::zero()), value.clone());
            self.set_at(Run::tail(T::zero()), value);
            return;
        }
        if run.start.is_neg_inf() {
            self.pre = (value != self.zero).then(|| RunValue::new(run, value));
            return;
        }
        if run.end.is_pos_inf() {
            self.post = (value != self.zero).then(|| RunValue::new(run, value));
            return;
        }
        if self.buf.is_empty() {
            self.origin = run.start;
        } else if run.start < self.origin {
            let grow = span_to_index(run.start, self.origin);
            self.buf.splice(0..0, std::iter::repeat_n(self.zero.clone(), grow));
            self.origin = run.start;
        }
        if run.end > self.end_offset() {
            let len = span_to_index(self.origin, run.end);
            self.buf.resize(len, self.zero.clone());
        }
        let lo = span_to_index(self.origin, run.start);
        let hi = span_to_index(self.origin, run.end);
        self.buf[lo..hi].fill(value);
    }
}

impl<T: OffsetType, V: ValueType + Zero> DenseSeries<T, V> {
    /// Creates an empty series with discretization 1 and the default zero.
    pub fn new() -> Self {
        Self::from_options(SeriesOptions::new())
    }

    /// Creates a series whose buffer covers `[start, stop)` filled with
    /// the `value` option (default: the zero value).
    pub fn from_options(options: SeriesOptions<T, V>) -> Self {
        let start = options.start_or_default();
        let stop = options.stop_or(start);
        assert!(start <= stop, "dense window must satisfy start <= stop");
        let fill = options.value_or_zero();
        let len = span_to_index(start, stop);
        DenseSeries {
            origin: start,
            buf: vec![fill; len],
            discretization: options.discretization_or_default(),
            zero: options.zero_or_default(),
            pre: None,
            post: None,
        }
    }
}

impl<T: OffsetType, V: ValueType + Zero> Default for DenseSeries<T, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator producing maximal merged non-zero runs of a dense buffer.
pub struct DenseRuns<'a, T, V> {
    series: &'a DenseSeries<T, V>,
    index: usize,
}

impl<'a, T: OffsetType, V: ValueType> Iterator for DenseRuns<'a, T, V> {
    type Item = (Run<T>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let buf = &self.series.buf;
        while self.index < buf.len() && buf[self.index] == self.series.zero {
            self.index += 1;
        }
        if self.index >= buf.len() {
            return None;
        }
        let start = self.index;
        let value = &buf[start];
        self.index += 1;
        while self.index < buf.len() && buf[self.index] == *value {
            self.index += 1;
        }
        let run = Run::new(
            self.series.offset_at(start),
            self.series.offset_at(self.index),
        );
        Some((run, value))
    }
}

impl<T: OffsetType, V: ValueType> Series for DenseSeries<T, V> {
    type Offset = T;
    type Value = V;

    fn discretization(&self) -> T {
        self.discretization
    }

    fn zero(&self) -> &V {
        &self.zero
    }

    fn get_at(&self, offset: T) -> &V {
        if let Some(pre) = &self.pre
            && offset < pre.run.end
        {
            return &pre.value;
        }
        if let Some(post) = &self.post
            && offset >= post.run.start
        {
            return &post.value;
        }
        match self.index_of(offset) {
            Some(index) => &self.buf[index],
            None => &self.zero,
        }
    }

    fn runs(&self) -> impl Iterator<Item = (Run<T>, &V)> + '_ {
        DenseRuns {
            series: self,
            index: 0,
        }
    }

    fn pre_run(&self) -> Option<(Run<T>, &V)> {
        self.pre.as_ref().map(|rv| (rv.run, &rv.value))
    }

    fn post_run(&self) -> Option<(Run<T>, &V)> {
        self.post.as_ref().map(|rv| (rv.run, &rv.value))
    }
}

impl<T: OffsetType, V: ValueType> FromRuns for DenseSeries<T, V> {
    fn from_runs(discretization: T, zero: V, parts: RunParts<T, V>) -> Self {
        let mut series = DenseSeries {
            origin: T::zero(),
            buf: Vec::new(),
            discretization,
            zero,
            pre: parts.pre,
            post: parts.post,
        };
        if let (Some(first), Some(last)) = (parts.runs.first(), parts.runs.last()) {
            series.origin = first.run.start;
            let len = span_to_index(series.origin, last.run.end);
            series.buf = vec![series.zero.clone(); len];
            for rv in &parts.runs {
                let lo = span_to_index(series.origin, rv.run.start);
                let hi = span_to_index(series.origin, rv.run.end);
                series.buf[lo..hi].fill(rv.value.clone());
            }
        }
        series
    }
}

impl<T: OffsetType, V: ValueType> SetRun for DenseSeries<T, V> {
    fn set_at(&mut self, run: Run<T>, value: V) {
        DenseSeries::set_at(self, run, value);
    }
}

impl<T: OffsetType, V: ValueType> PartialEq for DenseSeries<T, V> {
    fn eq(&self, other: &Self) -> bool {
        same_series(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_construction() {
        let d = DenseSeries::<i64, i64>::from_options(
            SeriesOptions::new().stop(100).value(2),
        );
        assert_eq!(d.origin(), 0);
        assert_eq!(d.end_offset(), 100);
        assert_eq!(*d.get_at(0), 2);
        assert_eq!(*d.get_at(99), 2);
        assert_eq!(*d.get_at(100), 0);
        assert_eq!(*d.get_at(-1), 0);
    }

    #[test]
    fn test_runs_merge_equal_slots() {
        let mut d = DenseSeries::<i64, i64>::new();
        d.set_at(Run::new(0, 3), 5);
        d.set_at(Run::new(3, 4), 7);
        d.set_at(Run::new(4, 6), 5);
        let runs: Vec<_> = d.runs().map(|(r, v)| (r, *v)).collect();
        assert_eq!(
            runs,
            vec![
                (Run::new(0, 3), 5),
                (Run::new(3, 4), 7),
                (Run::new(4, 6), 5)
            ]
        );
    }

    #[test]
    fn test_runs_skip_zero_slots() {
        let mut d = DenseSeries::<i64, i64>::new();
        d.set_at(Run::new(0, 2), 1);
        d.set_at(Run::new(5, 6), 2);
        let runs: Vec<_> = d.runs().map(|(r, v)| (r, *v)).collect();
        assert_eq!(runs, vec![(Run::new(0, 2), 1), (Run::new(5, 6), 2)]);
    }

    #[test]
    fn test_set_at_grows_front_and_back() {
        let mut d = DenseSeries::<i64, i64>::new();
        d.set_at(Run::new(10, 12), 3);
        d.set_at(Run::new(5, 7), 4);
        d.set_at(Run::new(14, 15), 6);
        assert_eq!(d.origin(), 5);
        assert_eq!(d.end_offset(), 15);
        assert_eq!(*d.get_at(5), 4);
        assert_eq!(*d.get_at(8), 0);
        assert_eq!(*d.get_at(11), 3);
        assert_eq!(*d.get_at(14), 6);
    }

    #[test]
    fn test_zeroing_preserves_window() {
        let mut d = DenseSeries::<i64, i64>::from_options(
            SeriesOptions::new().stop(10).value(9),
        );
        d.set_at(Run::new(3, 6), 0);
        assert_eq!(d.end_offset(), 10);
        assert_eq!(*d.get_at(4), 0);
        let runs: Vec<_> = d.runs().map(|(r, v)| (r, *v)).collect();
        assert_eq!(runs, vec![(Run::new(0, 3), 9), (Run::new(6, 10), 9)]);
    }

    #[test]
    fn test_infinite_segments() {
        let mut d = DenseSeries::<i64, i64>::new();
        d.set_at(Run::tail(50), 7);
        d.set_at(Run::new(0, 2), 1);
        assert_eq!(*d.get_at(1_000_000), 7);
        assert_eq!(d.post_run(), Some((Run::tail(50), &7)));
        assert_eq!(d.runs().count(), 1);
    }
}
