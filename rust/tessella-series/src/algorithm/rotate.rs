//! Cyclic rotation of run contents.
//!
//! Rotation permutes the *values* of a series' runs while leaving the run
//! bounds in place: after `rotate_left(s, n)` the i-th run carries the
//! value previously held by the (i+n)-th run, wrapping around the end of
//! the run list. This is an index-space operation over the finite run
//! sequence, not an offset-space shift — for that, see
//! [`shift`](crate::view::shift).

use tessella_common::{Error, Result};

use crate::inserter::{CopyAndSwapInserter, RunInserter};
use crate::series::Series;
use crate::sparse::SparseSeries;

fn rotated_into<S, I>(series: &S, n: usize, to_left: bool, out: &mut I) -> Result<()>
where
    S: Series,
    I: RunInserter<S::Offset, S::Value>,
{
    if series.pre_run().is_some() || series.post_run().is_some() {
        return Err(Error::invalid_operation("rotate over an unbounded series"));
    }
    let items: Vec<_> = series.runs().collect();
    if items.is_empty() {
        return Ok(());
    }
    let len = items.len();
    let step = if to_left { n % len } else { len - n % len };
    for (index, (run, _)) in items.iter().enumerate() {
        let value = items[(index + step) % len].1;
        out.insert(*run, value.clone());
    }
    Ok(())
}

/// Rotates run values `n` positions to the left: the i-th run assumes the
/// value of the (i+n)-th run, cyclically. Requires a bounded series.
pub fn rotate_left_into<S, I>(series: &S, n: usize, out: &mut I) -> Result<()>
where
    S: Series,
    I: RunInserter<S::Offset, S::Value>,
{
    rotated_into(series, n, true, out)
}

/// Rotates run values `n` positions to the right: the i-th run assumes
/// the value of the (i−n)-th run, cyclically. Requires a bounded series.
pub fn rotate_right_into<S, I>(series: &S, n: usize, out: &mut I) -> Result<()>
where
    S: Series,
    I: RunInserter<S::Offset, S::Value>,
{
    rotated_into(series, n, false, out)
}

/// Convenience arity of [`rotate_left_into`] returning a fresh sparse
/// series.
pub fn rotate_left<S>(series: &S, n: usize) -> Result<SparseSeries<S::Offset, S::Value>>
where
    S: Series,
{
    let mut result =
        SparseSeries::with_zero(series.discretization(), series.zero().clone());
    let mut inserter = CopyAndSwapInserter::new(&mut result);
    rotate_left_into(series, n, &mut inserter)?;
    inserter.commit();
    Ok(result)
}

/// Convenience arity of [`rotate_right_into`] returning a fresh sparse
/// series.
pub fn rotate_right<S>(series: &S, n: usize) -> Result<SparseSeries<S::Offset, S::Value>>
where
    S: Series,
{
    let mut result =
        SparseSeries::with_zero(series.discretization(), series.zero().clone());
    let mut inserter = CopyAndSwapInserter::new(&mut result);
    rotate_right_into(series, n, &mut inserter)?;
    inserter.commit();
    Ok(result)
}
