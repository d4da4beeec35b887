//! Resampling a series onto a coarser or finer discretization grid.

use num_traits::{CheckedMul, NumCast, One, Zero};
use std::ops::{Add, Mul};
use tessella_common::{Error, Result};
use tessella_runs::{OffsetType, Run, find_period};

use crate::inserter::{CopyAndSwapInserter, RunInserter};
use crate::piecewise::PiecewiseSeries;
use crate::series::Series;
use crate::sparse::SparseSeries;

/// How a coarse-grain bucket derives its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Downsample {
    /// A bucket takes the value found at its grid-aligned sample offset,
    /// emitted as a unit run at the bucket start.
    StartSample,
    /// A bucket takes the sum of `value * overlap-length` over every run
    /// piece that falls inside it.
    OverlapSum,
}

/// How fine-grain expands each coarse slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsample {
    /// A run of n slots becomes one piecewise-constant run covering the
    /// expanded span.
    Piecewise,
    /// Each coarse slot becomes a unit run at its expansion point; the
    /// finer slots between them stay implicitly zero.
    Sparse,
}

fn cast_offset<T: OffsetType, V: NumCast>(offset: T) -> Result<V> {
    num_traits::cast(offset)
        .ok_or_else(|| Error::invalid_arg("offset", "not representable in the value type"))
}

/// Resamples `series` onto buckets of width `period / discretization`,
/// anchored at the first run's offset, writing the bucket results into
/// `out`.
///
/// Runs straddling a bucket boundary are split at the boundary before
/// aggregation. Bucket results are emitted as unit runs at the bucket
/// start offset (in source coordinates); the caller decides the output
/// series' discretization (conventionally `period`). Infinite head/tail
/// segments pass through unchanged — they are never bucketed.
///
/// `period` must be a strictly coarser multiple of the input
/// discretization.
pub fn coarse_grain_into<S, I>(
    series: &S,
    period: S::Offset,
    policy: Downsample,
    out: &mut I,
) -> Result<()>
where
    S: Series,
    I: RunInserter<S::Offset, S::Value>,
    S::Value: Zero + Add<Output = S::Value> + Mul<Output = S::Value> + NumCast,
{
    let step = series.discretization();
    tessella_common::verify_arg!(
        period,
        step > S::Offset::zero() && period > step && period % step == S::Offset::zero()
    );
    let width = period / step;

    if let Some((run, value)) = series.pre_run() {
        out.insert(run, value.clone());
    }
    let mut anchor = None;
    let mut pending: Option<(Run<S::Offset>, S::Value)> = None;
    for (run, value) in series.runs() {
        let anchor = *anchor.get_or_insert(run.start);
        let mut rest = run;
        while !rest.is_empty() {
            let bucket = find_period(rest.start, anchor, width);
            let piece = rest.overlap(bucket);
            match policy {
                Downsample::StartSample => {
                    if piece.start % width == S::Offset::zero() {
                        out.insert(Run::unit(bucket.start), value.clone());
                    }
                }
                Downsample::OverlapSum => {
                    let weight: S::Value = cast_offset(piece.len())?;
                    let contribution = value.clone() * weight;
                    pending = Some(match pending.take() {
                        Some((b, acc)) if b == bucket => (b, acc + contribution),
                        Some((b, acc)) => {
                            out.insert(Run::unit(b.start), acc);
                            (bucket, contribution)
                        }
                        None => (bucket, contribution),
                    });
                }
            }
            rest.start = piece.end;
        }
    }
    if let Some((bucket, acc)) = pending {
        out.insert(Run::unit(bucket.start), acc);
    }
    if let Some((run, value)) = series.post_run() {
        out.insert(run, value.clone());
    }
    Ok(())
}

/// Convenience arity of [`coarse_grain_into`]: resamples into a fresh
/// sparse series whose discretization is `period`.
pub fn coarse_grain<S>(
    series: &S,
    period: S::Offset,
    policy: Downsample,
) -> Result<SparseSeries<S::Offset, S::Value>>
where
    S: Series,
    S::Value: Zero + Add<Output = S::Value> + Mul<Output = S::Value> + NumCast,
{
    let mut result = SparseSeries::with_zero(period, series.zero().clone());
    let mut inserter = CopyAndSwapInserter::new(&mut result);
    coarse_grain_into(series, period, policy, &mut inserter)?;
    inserter.commit();
    Ok(result)
}

/// Expands each coarse slot of `series` onto the finer grid of width
/// `period`, writing the results into `out`.
///
/// The expansion factor is `discretization / period`; a run of n slots
/// expands to n consecutive coarse slots starting at its own offset.
/// Infinite head/tail segments pass through unchanged.
///
/// `period` must strictly divide the input discretization.
pub fn fine_grain_into<S, I>(
    series: &S,
    period: S::Offset,
    policy: Upsample,
    out: &mut I,
) -> Result<()>
where
    S: Series,
    I: RunInserter<S::Offset, S::Value>,
{
    let step = series.discretization();
    tessella_common::verify_arg!(
        period,
        period > S::Offset::zero() && period < step && step % period == S::Offset::zero()
    );
    let factor = step / period;

    if let Some((run, value)) = series.pre_run() {
        out.insert(run, value.clone());
    }
    for (run, value) in series.runs() {
        let slots = run.len();
        match policy {
            Upsample::Piecewise => {
                let span = slots.checked_mul(&factor).unwrap_or_else(|| {
                    panic!("offset overflow: cannot expand {slots:?} slots by {factor:?}")
                });
                out.insert(Run::new(run.start, run.start.translate(span)), value.clone());
            }
            Upsample::Sparse => {
                let mut offset = run.start;
                let mut slot = S::Offset::zero();
                while slot < slots {
                    out.insert(Run::unit(offset), value.clone());
                    offset = offset.translate(factor);
                    slot = slot + S::Offset::one();
                }
            }
        }
    }
    if let Some((run, value)) = series.post_run() {
        out.insert(run, value.clone());
    }
    Ok(())
}

/// Convenience arity of [`fine_grain_into`] with the piecewise policy:
/// expands into a fresh piecewise-constant series whose discretization is
/// `period`.
pub fn fine_grain<S>(
    series: &S,
    period: S::Offset,
) -> Result<PiecewiseSeries<S::Offset, S::Value>>
where
    S: Series,
{
    let mut result = PiecewiseSeries::with_zero(period, series.zero().clone());
    let mut inserter = CopyAndSwapInserter::new(&mut result);
    fine_grain_into(series, period, Upsample::Piecewise, &mut inserter)?;
    inserter.commit();
    Ok(result)
}

/// Convenience arity of [`fine_grain_into`] with the sparse policy: the
/// zero-valued output slots between expansion points stay implicit.
pub fn fine_grain_sparse<S>(
    series: &S,
    period: S::Offset,
) -> Result<SparseSeries<S::Offset, S::Value>>
where
    S: Series,
{
    let mut result = SparseSeries::with_zero(period, series.zero().clone());
    let mut inserter = CopyAndSwapInserter::new(&mut result);
    fine_grain_into(series, period, Upsample::Sparse, &mut inserter)?;
    inserter.commit();
    Ok(result)
}
