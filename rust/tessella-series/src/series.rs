//! The series read contract shared by every storage backend.

use tessella_runs::{OffsetType, Run};

/// A value storable in a series.
pub trait ValueType: Clone + PartialEq + std::fmt::Debug {}

impl<V: Clone + PartialEq + std::fmt::Debug> ValueType for V {}

/// A run paired with the value it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunValue<T, V> {
    pub run: Run<T>,
    pub value: V,
}

impl<T, V> RunValue<T, V> {
    #[inline]
    pub fn new(run: Run<T>, value: V) -> RunValue<T, V> {
        RunValue { run, value }
    }
}

/// The uniform read surface of a run-length-encoded series.
///
/// A series maps every offset to a value: offsets covered by an explicitly
/// stored run yield that run's value, everything else yields the implicit
/// [`zero`](Series::zero). Implementations must keep the stored run
/// sequence *canonical*:
///
/// - runs are strictly increasing by offset and pairwise non-overlapping,
/// - no stored run carries the zero value,
/// - no two adjacent runs carry equal values (they must have been merged
///   when the series was built).
///
/// Infinite head/tail segments are reported through
/// [`pre_run`](Series::pre_run) / [`post_run`](Series::post_run) and are
/// never enumerated by [`runs`](Series::runs), so iteration over a series
/// with unbounded reach stays finite.
pub trait Series {
    type Offset: OffsetType;
    type Value: ValueType;

    /// The scalar step size of the series, used to scale integrals.
    fn discretization(&self) -> Self::Offset;

    /// The implicit value of every offset not covered by a run.
    fn zero(&self) -> &Self::Value;

    /// Point query. Offsets outside all stored runs yield
    /// [`zero`](Series::zero).
    fn get_at(&self, offset: Self::Offset) -> &Self::Value;

    /// The finite explicitly-stored runs, in strictly increasing offset
    /// order.
    fn runs(&self) -> impl Iterator<Item = (Run<Self::Offset>, &Self::Value)> + '_;

    /// The infinite head segment `[-inf, x)`, if the series has one.
    fn pre_run(&self) -> Option<(Run<Self::Offset>, &Self::Value)> {
        None
    }

    /// The infinite tail segment `[x, +inf)`, if the series has one.
    fn post_run(&self) -> Option<(Run<Self::Offset>, &Self::Value)> {
        None
    }
}

/// Every segment of the series in offset order: the infinite head (if any),
/// the finite runs, the infinite tail (if any).
pub(crate) fn all_segments<S: Series>(
    series: &S,
) -> impl Iterator<Item = (Run<S::Offset>, &S::Value)> + '_ {
    series
        .pre_run()
        .into_iter()
        .chain(series.runs())
        .chain(series.post_run())
}

/// Compares two series for semantic equality: equal zero values, equal
/// infinite head/tail segments, and identical canonical run sequences.
///
/// This is the equality contract the scenario tests rely on; it is
/// meaningful precisely because stored runs are canonical. Backends with
/// matching offset and value types can be compared regardless of their
/// physical representation.
pub fn same_series<A, B>(a: &A, b: &B) -> bool
where
    A: Series,
    B: Series<Offset = A::Offset, Value = A::Value>,
{
    if a.zero() != b.zero() {
        return false;
    }
    if a.pre_run() != b.pre_run() || a.post_run() != b.post_run() {
        return false;
    }
    a.runs().eq(b.runs())
}
