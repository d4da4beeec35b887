//! Lock-step union merge of two series.

use std::ops::Add;
use tessella_common::{Error, Result};
use tessella_runs::Run;

use crate::inserter::{CopyAndSwapInserter, RunInserter};
use crate::piecewise::PiecewiseSeries;
use crate::series::{Series, all_segments};

/// Steps through `left` and `right` in lock-step over their boundary
/// events, writing one output segment per maximal interval on which both
/// inputs are constant.
///
/// Where runs of the two series overlap, `both(left_value, right_value)`
/// produces the output value; where only one side has a run, `left_only` /
/// `right_only` produces it. Segments where neither side has a run emit
/// nothing (the output keeps its own implicit zero). The inserter's usual
/// canonicalization applies, so zero results vanish and adjacent equal
/// results coalesce.
///
/// Fails with `IncompatibleSeries` when the discretizations differ.
pub fn transform_union<A, B, I, FB, FL, FR>(
    left: &A,
    right: &B,
    mut both: FB,
    mut left_only: FL,
    mut right_only: FR,
    out: &mut I,
) -> Result<()>
where
    A: Series,
    B: Series<Offset = A::Offset, Value = A::Value>,
    I: RunInserter<A::Offset, A::Value>,
    FB: FnMut(&A::Value, &A::Value) -> A::Value,
    FL: FnMut(&A::Value) -> A::Value,
    FR: FnMut(&A::Value) -> A::Value,
{
    if left.discretization() != right.discretization() {
        return Err(Error::incompatible_series("discretization mismatch"));
    }
    let mut left_iter = all_segments(left);
    let mut right_iter = all_segments(right);
    let mut cur_left = left_iter.next();
    let mut cur_right = right_iter.next();
    loop {
        match (&mut cur_left, &mut cur_right) {
            (None, None) => break,
            (Some(a), None) => {
                out.insert(a.0, left_only(a.1));
                cur_left = left_iter.next();
            }
            (None, Some(b)) => {
                out.insert(b.0, right_only(b.1));
                cur_right = right_iter.next();
            }
            (Some(a), Some(b)) => {
                if a.0.end <= b.0.start {
                    // Left run entirely before the next right run.
                    out.insert(a.0, left_only(a.1));
                    cur_left = left_iter.next();
                } else if b.0.end <= a.0.start {
                    out.insert(b.0, right_only(b.1));
                    cur_right = right_iter.next();
                } else if a.0.start < b.0.start {
                    // Left-only prefix of an overlapping pair.
                    out.insert(Run::new(a.0.start, b.0.start), left_only(a.1));
                    a.0.start = b.0.start;
                } else if b.0.start < a.0.start {
                    out.insert(Run::new(b.0.start, a.0.start), right_only(b.1));
                    b.0.start = a.0.start;
                } else {
                    let end = a.0.end.min(b.0.end);
                    out.insert(Run::new(a.0.start, end), both(a.1, b.1));
                    if a.0.end == end {
                        cur_left = left_iter.next();
                    } else {
                        a.0.start = end;
                    }
                    if b.0.end == end {
                        cur_right = right_iter.next();
                    } else {
                        b.0.start = end;
                    }
                }
            }
        }
    }
    Ok(())
}

/// The pointwise sum of two series, as a piecewise-constant series with
/// the left operand's discretization and zero.
///
/// Fails with `IncompatibleSeries` when discretizations or zero values
/// differ.
pub fn add<A, B>(left: &A, right: &B) -> Result<PiecewiseSeries<A::Offset, A::Value>>
where
    A: Series,
    B: Series<Offset = A::Offset, Value = A::Value>,
    A::Value: Add<Output = A::Value>,
{
    if left.zero() != right.zero() {
        return Err(Error::incompatible_series("zero value mismatch"));
    }
    let mut result =
        PiecewiseSeries::with_zero(left.discretization(), left.zero().clone());
    let mut inserter = CopyAndSwapInserter::new(&mut result);
    transform_union(
        left,
        right,
        |x, y| x.clone() + y.clone(),
        |x| x.clone(),
        |y| y.clone(),
        &mut inserter,
    )?;
    inserter.commit();
    Ok(result)
}
