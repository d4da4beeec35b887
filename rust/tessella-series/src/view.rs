//! Lazy series views: windowed (`clip`) and translated (`shift`) reads.
//!
//! Both views satisfy the full [`Series`] read contract, so they compose
//! with every algorithm and with each other; nothing is materialized until
//! the view is fed into an inserter.

use tessella_runs::{OffsetType, Run};

use crate::series::Series;

/// A view restricting a series to the window `[start, stop)`; offsets
/// outside the window read as zero. O(1) to construct.
#[derive(Debug, Clone, Copy)]
pub struct Clipped<'a, S: Series> {
    inner: &'a S,
    window: Run<S::Offset>,
}

impl<'a, S: Series> Clipped<'a, S> {
    /// The intersection of the inner head segment with the window, if
    /// non-empty.
    fn clipped_pre(&self) -> Option<(Run<S::Offset>, &'a S::Value)> {
        let (run, value) = self.inner.pre_run()?;
        let piece = run.overlap(self.window);
        (!piece.is_empty()).then_some((piece, value))
    }

    fn clipped_post(&self) -> Option<(Run<S::Offset>, &'a S::Value)> {
        let (run, value) = self.inner.post_run()?;
        let piece = run.overlap(self.window);
        (!piece.is_empty()).then_some((piece, value))
    }
}

impl<'a, S: Series> Series for Clipped<'a, S> {
    type Offset = S::Offset;
    type Value = S::Value;

    fn discretization(&self) -> S::Offset {
        self.inner.discretization()
    }

    fn zero(&self) -> &S::Value {
        self.inner.zero()
    }

    fn get_at(&self, offset: S::Offset) -> &S::Value {
        if self.window.contains(offset) {
            self.inner.get_at(offset)
        } else {
            self.inner.zero()
        }
    }

    fn runs(&self) -> impl Iterator<Item = (Run<S::Offset>, &S::Value)> + '_ {
        // Where the window cuts an infinite segment, the cut piece becomes
        // an ordinary finite run of the view.
        let window = self.window;
        let head = self.clipped_pre().filter(|(r, _)| !r.is_unbounded());
        let tail = self.clipped_post().filter(|(r, _)| !r.is_unbounded());
        head.into_iter()
            .chain(
                self.inner
                    .runs()
                    .map(move |(r, v)| (r.overlap(window), v))
                    .filter(|(r, _)| !r.is_empty()),
            )
            .chain(tail)
    }

    fn pre_run(&self) -> Option<(Run<S::Offset>, &S::Value)> {
        self.clipped_pre().filter(|(r, _)| r.is_unbounded())
    }

    fn post_run(&self) -> Option<(Run<S::Offset>, &S::Value)> {
        self.clipped_post().filter(|(r, _)| r.is_unbounded())
    }
}

/// Restricts `series` to the window `[start, stop)`.
///
/// The returned view reads zero outside the window. Locating the first
/// relevant run during iteration is linear in the number of runs before
/// the window; point queries keep the inner series' cost.
pub fn clip<S: Series>(series: &S, start: S::Offset, stop: S::Offset) -> Clipped<'_, S> {
    Clipped {
        inner: series,
        window: Run::new(start, stop),
    }
}

/// A view translating every offset of a series by a fixed delta. O(1) to
/// construct; each access translates on the fly.
#[derive(Debug, Clone, Copy)]
pub struct Shifted<'a, S: Series> {
    inner: &'a S,
    delta: S::Offset,
}

impl<'a, S: Series> Series for Shifted<'a, S> {
    type Offset = S::Offset;
    type Value = S::Value;

    fn discretization(&self) -> S::Offset {
        self.inner.discretization()
    }

    fn zero(&self) -> &S::Value {
        self.inner.zero()
    }

    fn get_at(&self, offset: S::Offset) -> &S::Value {
        self.inner.get_at(offset.translate(-self.delta))
    }

    fn runs(&self) -> impl Iterator<Item = (Run<S::Offset>, &S::Value)> + '_ {
        let delta = self.delta;
        self.inner.runs().map(move |(r, v)| (r.translate(delta), v))
    }

    fn pre_run(&self) -> Option<(Run<S::Offset>, &S::Value)> {
        self.inner
            .pre_run()
            .map(|(r, v)| (r.translate(self.delta), v))
    }

    fn post_run(&self) -> Option<(Run<S::Offset>, &S::Value)> {
        self.inner
            .post_run()
            .map(|(r, v)| (r.translate(self.delta), v))
    }
}

/// Translates every run of `series` by `delta` offsets.
pub fn shift<S: Series>(series: &S, delta: S::Offset) -> Shifted<'_, S> {
    Shifted {
        inner: series,
        delta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::closed_form::HeavisideSeries;
    use crate::inserter::OrderedInserter;
    use crate::sparse::SparseSeries;

    fn sample() -> SparseSeries<i64, i64> {
        let mut s = SparseSeries::new();
        OrderedInserter::new(&mut s)
            .push_run(2, 0, 10)
            .push_run(5, 20, 30)
            .commit();
        s
    }

    #[test]
    fn test_clip_restricts_runs() {
        let s = sample();
        let c = clip(&s, 5, 25);
        let runs: Vec<_> = c.runs().map(|(r, v)| (r, *v)).collect();
        assert_eq!(runs, vec![(Run::new(5, 10), 2), (Run::new(20, 25), 5)]);
    }

    #[test]
    fn test_clip_point_queries() {
        let s = sample();
        let c = clip(&s, 5, 25);
        assert_eq!(*c.get_at(4), 0);
        assert_eq!(*c.get_at(5), 2);
        assert_eq!(*c.get_at(24), 5);
        assert_eq!(*c.get_at(25), 0);
    }

    #[test]
    fn test_clip_cuts_infinite_tail_into_finite_run() {
        let h = HeavisideSeries::<i64, i64>::unit(3);
        let c = clip(&h, 0, 10);
        let runs: Vec<_> = c.runs().map(|(r, v)| (r, *v)).collect();
        assert_eq!(runs, vec![(Run::new(3, 10), 1)]);
        assert_eq!(c.pre_run(), None);
        assert_eq!(c.post_run(), None);
    }

    #[test]
    fn test_clip_with_unbounded_window_keeps_tail() {
        let h = HeavisideSeries::<i64, i64>::unit(3);
        let c = clip(&h, 0, i64::pos_inf());
        assert_eq!(c.runs().count(), 0);
        assert_eq!(c.post_run(), Some((Run::tail(3), &1)));
    }

    #[test]
    fn test_shift_translates_runs_and_queries() {
        let s = sample();
        let v = shift(&s, 100);
        let runs: Vec<_> = v.runs().map(|(r, _)| r).collect();
        assert_eq!(runs, vec![Run::new(100, 110), Run::new(120, 130)]);
        assert_eq!(*v.get_at(100), 2);
        assert_eq!(*v.get_at(99), 0);
    }

    #[test]
    fn test_shift_pins_infinite_bounds() {
        let h = HeavisideSeries::<i64, i64>::unit(0);
        let v = shift(&h, 7);
        assert_eq!(v.post_run(), Some((Run::tail(7), &1)));
        assert_eq!(*v.get_at(6), 0);
        assert_eq!(*v.get_at(7), 1);
    }

    #[test]
    fn test_views_compose() {
        let s = sample();
        let v = shift(&s, 10);
        let c = clip(&v, 12, 18);
        let runs: Vec<_> = c.runs().map(|(r, v)| (r, *v)).collect();
        assert_eq!(runs, vec![(Run::new(12, 18), 2)]);
    }
}
