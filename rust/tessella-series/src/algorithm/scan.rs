//! Run-boundary scans: running totals and adjacent differences.
//!
//! Both scans operate on run boundaries, not individual offsets: a running
//! total is carried across runs and state changes are recorded only where
//! a run begins or ends. For sparse or long-run inputs this produces one
//! output event per boundary crossing instead of one per offset slot.

use std::ops::{Add, Sub};
use tessella_common::{Error, Result};
use tessella_runs::{OffsetType, Run};

use crate::inserter::{CopyAndSwapInserter, RunInserter};
use crate::piecewise::PiecewiseSeries;
use crate::series::Series;
use crate::sparse::SparseSeries;

fn require_bounded<S: Series>(series: &S, name: &'static str) -> Result<()> {
    if series.pre_run().is_some() || series.post_run().is_some() {
        return Err(Error::invalid_operation(name));
    }
    Ok(())
}

/// Writes the running total of `series` into `out` as a piecewise-constant
/// level: each input run raises the total by its value over `[start,
/// stop)`, gaps carry the total unchanged, and the final total extends
/// over `[last_end, +inf)`.
///
/// Requires a bounded series (no non-zero infinite head or tail).
pub fn partial_sum_into<S, I>(series: &S, out: &mut I) -> Result<()>
where
    S: Series,
    I: RunInserter<S::Offset, S::Value>,
    S::Value: Add<Output = S::Value>,
{
    require_bounded(series, "partial_sum over an unbounded series")?;
    let mut total = series.zero().clone();
    let mut cursor = S::Offset::neg_inf();
    for (run, value) in series.runs() {
        if cursor != run.start {
            // Carry the level across the gap; a zero level vanishes.
            out.insert(Run::new(cursor, run.start), total.clone());
        }
        total = total + value.clone();
        out.insert(run, total.clone());
        cursor = run.end;
    }
    if !cursor.is_pos_inf() {
        out.insert(Run::tail(cursor), total);
    }
    Ok(())
}

/// Convenience arity of [`partial_sum_into`] returning a fresh
/// piecewise-constant series.
pub fn partial_sum<S>(series: &S) -> Result<PiecewiseSeries<S::Offset, S::Value>>
where
    S: Series,
    S::Value: Add<Output = S::Value>,
{
    let mut result =
        PiecewiseSeries::with_zero(series.discretization(), series.zero().clone());
    let mut inserter = CopyAndSwapInserter::new(&mut result);
    partial_sum_into(series, &mut inserter)?;
    inserter.commit();
    Ok(result)
}

/// Writes the level changes of `series` into `out`: a unit run at every
/// boundary where the series value changes, carrying `new - old`,
/// including the drop back to zero where a run ends.
///
/// This is the inverse scan of [`partial_sum_into`]. Requires a bounded
/// series.
pub fn adjacent_difference_into<S, I>(series: &S, out: &mut I) -> Result<()>
where
    S: Series,
    I: RunInserter<S::Offset, S::Value>,
    S::Value: Sub<Output = S::Value>,
{
    require_bounded(series, "adjacent_difference over an unbounded series")?;
    let zero = series.zero().clone();
    let mut level = zero.clone();
    let mut cursor = S::Offset::neg_inf();
    for (run, value) in series.runs() {
        if cursor == run.start {
            out.insert(Run::unit(run.start), value.clone() - level);
        } else {
            if !cursor.is_neg_inf() {
                out.insert(Run::unit(cursor), zero.clone() - level);
            }
            out.insert(Run::unit(run.start), value.clone() - zero.clone());
        }
        level = value.clone();
        cursor = run.end;
    }
    if !cursor.is_neg_inf() {
        out.insert(Run::unit(cursor), zero - level);
    }
    Ok(())
}

/// Convenience arity of [`adjacent_difference_into`] returning a fresh
/// sparse series.
pub fn adjacent_difference<S>(series: &S) -> Result<SparseSeries<S::Offset, S::Value>>
where
    S: Series,
    S::Value: Sub<Output = S::Value>,
{
    let mut result =
        SparseSeries::with_zero(series.discretization(), series.zero().clone());
    let mut inserter = CopyAndSwapInserter::new(&mut result);
    adjacent_difference_into(series, &mut inserter)?;
    inserter.commit();
    Ok(result)
}
