//! The ordered-inserter protocol: monotone run insertion with
//! canonicalization, and the all-or-nothing commit variants.
//!
//! An inserter accepts `(run, value)` pairs in non-decreasing offset order
//! and accumulates them into a fresh storage state. Along the way it
//! enforces the canonical-form invariants every backend relies on:
//!
//! - zero-valued runs are skipped, never materialized,
//! - a run adjacent to its predecessor with an equal value extends the
//!   predecessor instead of starting a new run,
//! - runs reaching −∞/+∞ land in the dedicated head/tail slots.
//!
//! `commit` replaces the destination's state with the accumulated result in
//! a single move. Dropping an uncommitted inserter leaves the destination
//! untouched, which is the library's only failure-atomicity guarantee.
//!
//! Out-of-order insertion is a programming error and panics; it is not a
//! recoverable condition.

use std::cell::RefCell;
use std::rc::Rc;

use tessella_runs::{OffsetType, Run};

use crate::series::{RunValue, Series, ValueType};

/// Write-only sink for runs arriving in non-decreasing offset order.
pub trait RunInserter<T: OffsetType, V: ValueType> {
    /// Accepts the next run. Empty runs are ignored.
    ///
    /// Panics if `run.start` precedes the end of the previously accepted
    /// run.
    fn insert(&mut self, run: Run<T>, value: V);

    /// Finalizes the build, publishing the accumulated state to the
    /// destination.
    fn commit(self)
    where
        Self: Sized;
}

/// The canonical outcome of an ordered build: optional infinite head and
/// tail segments plus the finite runs between them.
#[derive(Debug, Clone)]
pub struct RunParts<T, V> {
    pub pre: Option<RunValue<T, V>>,
    pub runs: Vec<RunValue<T, V>>,
    pub post: Option<RunValue<T, V>>,
}

impl<T, V> Default for RunParts<T, V> {
    fn default() -> Self {
        RunParts {
            pre: None,
            runs: Vec::new(),
            post: None,
        }
    }
}

/// A backend that can be rebuilt wholesale from canonical run parts.
///
/// `from_runs` must preserve the destination's discretization and zero
/// value, which the committing inserter passes through unchanged.
pub trait FromRuns: Series + Sized {
    fn from_runs(
        discretization: Self::Offset,
        zero: Self::Value,
        parts: RunParts<Self::Offset, Self::Value>,
    ) -> Self;
}

/// Shared canonicalization state: the monotone cursor plus the accumulated
/// parts.
struct RunAccumulator<T, V> {
    zero: V,
    cursor: T,
    parts: RunParts<T, V>,
}

impl<T: OffsetType, V: ValueType> RunAccumulator<T, V> {
    fn new(zero: V) -> Self {
        RunAccumulator {
            zero,
            cursor: T::neg_inf(),
            parts: RunParts::default(),
        }
    }

    fn insert(&mut self, mut run: Run<T>, value: V) {
        if run.is_empty() || value == self.zero {
            return;
        }
        assert!(
            run.start >= self.cursor,
            "ordered inserter requires non-decreasing runs: {run:?} begins before {:?}",
            self.cursor
        );
        assert!(
            self.parts.post.is_none(),
            "no run may follow the infinite tail segment"
        );
        if run.start.is_neg_inf() {
            if run.end.is_pos_inf() {
                // A run spanning the whole axis splits into head and tail
                // at offset zero.
                self.parts.pre = Some(RunValue::new(Run::head(T::zero()), value.clone()));
                self.parts.post = Some(RunValue::new(Run::tail(T::zero()), value));
                self.cursor = T::pos_inf();
                return;
            }
            self.parts.pre = Some(RunValue::new(run, value));
            self.cursor = run.end;
            return;
        }
        if run.end.is_pos_inf() {
            // Fold an adjacent equal-valued predecessor into the tail.
            if let Some(last) = self.parts.runs.last()
                && last.run.end == run.start
                && last.value == value
            {
                run.start = last.run.start;
                self.parts.runs.pop();
            }
            self.parts.post = Some(RunValue::new(run, value));
            self.cursor = T::pos_inf();
            return;
        }
        self.cursor = run.end;
        if self.parts.runs.is_empty()
            && let Some(pre) = self.parts.pre.as_mut()
            && pre.run.end == run.start
            && pre.value == value
        {
            pre.run.end = run.end;
            return;
        }
        if let Some(last) = self.parts.runs.last_mut()
            && last.run.end == run.start
            && last.value == value
        {
            last.run.end = run.end;
            return;
        }
        self.parts.runs.push(RunValue::new(run, value));
    }

    fn into_parts(self) -> (V, RunParts<T, V>) {
        (self.zero, self.parts)
    }
}

/// The always-safe inserter: builds a complete fresh storage on the side
/// and moves it into the destination at commit.
///
/// Works for every [`FromRuns`] backend, including ones without safe
/// partial mutation. If the build is abandoned (the inserter is dropped
/// without committing), the destination is untouched.
pub struct CopyAndSwapInserter<'a, S: FromRuns> {
    target: &'a mut S,
    acc: RunAccumulator<S::Offset, S::Value>,
}

impl<'a, S: FromRuns> CopyAndSwapInserter<'a, S> {
    pub fn new(target: &'a mut S) -> Self {
        let zero = target.zero().clone();
        CopyAndSwapInserter {
            target,
            acc: RunAccumulator::new(zero),
        }
    }
}

impl<'a, S: FromRuns> RunInserter<S::Offset, S::Value> for CopyAndSwapInserter<'a, S> {
    fn insert(&mut self, run: Run<S::Offset>, value: S::Value) {
        self.acc.insert(run, value);
    }

    fn commit(self) {
        let discretization = self.target.discretization();
        let (zero, parts) = self.acc.into_parts();
        *self.target = S::from_runs(discretization, zero, parts);
    }
}

struct SharedCore<'a, S: FromRuns> {
    target: &'a mut S,
    acc: Option<RunAccumulator<S::Offset, S::Value>>,
}

/// A copy-and-swap inserter whose in-progress build lives behind a
/// reference-counted handle.
///
/// Cloning the handle is cheap and lets adapter chains share one build
/// without deep-copying the temporary. The first handle to call `commit`
/// publishes the build; later commits are no-ops, and dropping all handles
/// without committing discards the build.
pub struct SharedInserter<'a, S: FromRuns> {
    core: Rc<RefCell<SharedCore<'a, S>>>,
}

impl<'a, S: FromRuns> SharedInserter<'a, S> {
    pub fn new(target: &'a mut S) -> Self {
        let zero = target.zero().clone();
        SharedInserter {
            core: Rc::new(RefCell::new(SharedCore {
                target,
                acc: Some(RunAccumulator::new(zero)),
            })),
        }
    }
}

impl<'a, S: FromRuns> Clone for SharedInserter<'a, S> {
    fn clone(&self) -> Self {
        SharedInserter {
            core: Rc::clone(&self.core),
        }
    }
}

impl<'a, S: FromRuns> RunInserter<S::Offset, S::Value> for SharedInserter<'a, S> {
    fn insert(&mut self, run: Run<S::Offset>, value: S::Value) {
        let mut core = self.core.borrow_mut();
        match core.acc.as_mut() {
            Some(acc) => acc.insert(run, value),
            None => panic!("shared inserter used after commit"),
        }
    }

    fn commit(self) {
        let mut core = self.core.borrow_mut();
        if let Some(acc) = core.acc.take() {
            let discretization = core.target.discretization();
            let (zero, parts) = acc.into_parts();
            *core.target = S::from_runs(discretization, zero, parts);
        }
    }
}

/// Adapter translating every run by a fixed delta before forwarding to an
/// inner inserter.
///
/// This is how windowed builds are assembled: the wrapped target never
/// sees absolute offsets. Infinite bounds stay pinned under translation.
pub struct OffsetInserter<T, I> {
    inner: I,
    delta: T,
}

impl<T, I> OffsetInserter<T, I> {
    pub fn new(inner: I, delta: T) -> Self {
        OffsetInserter { inner, delta }
    }
}

impl<T: OffsetType, V: ValueType, I: RunInserter<T, V>> RunInserter<T, V>
    for OffsetInserter<T, I>
{
    fn insert(&mut self, run: Run<T>, value: V) {
        self.inner.insert(run.translate(self.delta), value);
    }

    fn commit(self) {
        self.inner.commit();
    }
}

/// A backend supporting random-access overwrite of a run.
pub trait SetRun: Series {
    /// Overwrites `[run.start, run.end)` with `value`, merging and
    /// splitting neighbors as required to stay canonical. Writing the zero
    /// value clears the range.
    fn set_at(&mut self, run: Run<Self::Offset>, value: Self::Value);
}

/// Inserter that writes straight through to a target supporting in-place
/// overwrite; `commit` is a no-op.
///
/// Unlike the copy-and-swap variants this offers no atomicity: each
/// accepted run lands immediately. The monotone-order contract still
/// applies.
pub struct DirectInserter<'a, S: SetRun> {
    target: &'a mut S,
    cursor: S::Offset,
}

impl<'a, S: SetRun> DirectInserter<'a, S> {
    pub fn new(target: &'a mut S) -> Self {
        DirectInserter {
            target,
            cursor: S::Offset::neg_inf(),
        }
    }
}

impl<'a, S: SetRun> RunInserter<S::Offset, S::Value> for DirectInserter<'a, S> {
    fn insert(&mut self, run: Run<S::Offset>, value: S::Value) {
        if run.is_empty() {
            return;
        }
        assert!(
            run.start >= self.cursor,
            "ordered inserter requires non-decreasing runs: {run:?} begins before {:?}",
            self.cursor
        );
        self.cursor = run.end;
        self.target.set_at(run, value);
    }

    fn commit(self) {}
}

/// Fluent builder over a [`FromRuns`] backend.
///
/// Runs can be pushed as `(value, offset)` unit runs, `(value, start,
/// stop)` spans, or bare values continuing at the current cursor; the chain
/// is terminated by an explicit [`commit`](OrderedInserter::commit).
///
/// ```
/// use tessella_series::{OrderedInserter, SparseSeries};
///
/// let mut s = SparseSeries::<i64, i64>::new();
/// OrderedInserter::new(&mut s)
///     .push_at(1, 0)
///     .push(2)
///     .push(3)
///     .push_run(9, 10, 20)
///     .commit();
/// ```
pub struct OrderedInserter<'a, S: FromRuns> {
    next_offset: S::Offset,
    inner: CopyAndSwapInserter<'a, S>,
}

impl<'a, S: FromRuns> OrderedInserter<'a, S> {
    /// Creates an inserter with an unpositioned cursor; the first push must
    /// name an offset.
    pub fn new(series: &'a mut S) -> Self {
        OrderedInserter {
            next_offset: S::Offset::neg_inf(),
            inner: CopyAndSwapInserter::new(series),
        }
    }

    /// Creates an inserter whose cursor starts at `offset`.
    pub fn start_at(series: &'a mut S, offset: S::Offset) -> Self {
        OrderedInserter {
            next_offset: offset,
            inner: CopyAndSwapInserter::new(series),
        }
    }

    /// Pushes a unit run at the current cursor and advances it by one.
    ///
    /// Panics if the cursor has not been positioned yet.
    pub fn push(mut self, value: S::Value) -> Self {
        assert!(
            self.next_offset.is_finite_offset(),
            "push without an offset requires a positioned inserter"
        );
        let run = Run::unit(self.next_offset);
        self.inner.insert(run, value);
        self.next_offset = run.end;
        self
    }

    /// Pushes a unit run at `offset` and places the cursor just after it.
    pub fn push_at(mut self, value: S::Value, offset: S::Offset) -> Self {
        let run = Run::unit(offset);
        self.inner.insert(run, value);
        self.next_offset = run.end;
        self
    }

    /// Pushes the run `[start, stop)` and places the cursor at `stop`.
    pub fn push_run(mut self, value: S::Value, start: S::Offset, stop: S::Offset) -> Self {
        self.inner.insert(Run::new(start, stop), value);
        self.next_offset = stop;
        self
    }

    /// Publishes the accumulated runs into the destination series.
    pub fn commit(self) {
        self.inner.commit();
    }
}
