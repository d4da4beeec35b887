//! Run-weighted integration.

use num_traits::{NumCast, Zero};
use std::ops::Mul;
use tessella_common::{Error, Result};
use tessella_runs::OffsetType;

use crate::series::Series;

fn cast_offset<T: OffsetType, V: NumCast>(offset: T, what: &str) -> Result<V> {
    num_traits::cast(offset)
        .ok_or_else(|| Error::invalid_arg(what, "not representable in the value type"))
}

/// Calculates the integral of a series: the sum of `value * length` over
/// all explicit runs, multiplied by the series discretization.
///
/// Implicit zeros contribute nothing by construction — zero runs are never
/// materialized — so the cost is O(number of runs), independent of the
/// offset range.
///
/// A series with a non-zero infinite head or tail segment has no finite
/// integral; that is reported as an `InvalidOperation` error rather than
/// saturated or ignored.
pub fn integrate<S>(series: &S) -> Result<S::Value>
where
    S: Series,
    S::Value: Zero + Mul<Output = S::Value> + NumCast,
{
    if series.pre_run().is_some() || series.post_run().is_some() {
        return Err(Error::invalid_operation("integrate over an unbounded series"));
    }
    let mut total = S::Value::zero();
    for (run, value) in series.runs() {
        let length = run.finite_len().ok_or_else(|| {
            Error::invariant_violation("finite run sequence produced an unbounded run")
        })?;
        total = total + value.clone() * cast_offset(length, "run length")?;
    }
    let step: S::Value = cast_offset(series.discretization(), "discretization")?;
    Ok(total * step)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::closed_form::HeavisideSeries;
    use crate::inserter::OrderedInserter;
    use crate::options::SeriesOptions;
    use crate::sparse::SparseSeries;
    use tessella_common::ErrorKind;

    #[test]
    fn test_integrate_weights_runs_by_length() {
        let mut s = SparseSeries::<i64, i64>::new();
        OrderedInserter::new(&mut s)
            .push_at(3, 0)
            .push_run(2, 10, 15)
            .commit();
        assert_eq!(integrate(&s).unwrap(), 3 + 2 * 5);
    }

    #[test]
    fn test_integrate_scales_by_discretization() {
        let mut s =
            SparseSeries::<i64, i64>::from_options(SeriesOptions::new().discretization(10));
        OrderedInserter::new(&mut s).push_run(4, 0, 3).commit();
        assert_eq!(integrate(&s).unwrap(), 4 * 3 * 10);
    }

    #[test]
    fn test_integrate_empty_series_is_zero() {
        let s = SparseSeries::<i64, i64>::new();
        assert_eq!(integrate(&s).unwrap(), 0);
    }

    #[test]
    fn test_integrate_unbounded_series_is_an_error() {
        let h = HeavisideSeries::<i64, i64>::unit(0);
        let err = integrate(&h).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidOperation { .. }));
    }
}
