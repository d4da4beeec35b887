//! Named-parameter-style construction options shared by all backends.

use num_traits::{One, Zero};
use tessella_runs::OffsetType;

use crate::series::ValueType;

/// Construction options for a series backend.
///
/// Any subset of the options may be supplied; each backend fills the rest
/// with its own defaults (`start` 0, `stop` 0, `value` one,
/// `discretization` 1, `zero` zero). The struct is consumed fluently:
///
/// ```
/// use tessella_series::{HeavisideSeries, SeriesOptions};
///
/// let step = HeavisideSeries::from_options(
///     SeriesOptions::new().start(-1).value(3).discretization(10),
/// );
/// ```
#[derive(Debug, Clone)]
pub struct SeriesOptions<T, V> {
    start: Option<T>,
    stop: Option<T>,
    value: Option<V>,
    discretization: Option<T>,
    zero: Option<V>,
}

impl<T, V> Default for SeriesOptions<T, V> {
    fn default() -> Self {
        SeriesOptions {
            start: None,
            stop: None,
            value: None,
            discretization: None,
            zero: None,
        }
    }
}

impl<T: OffsetType, V: ValueType> SeriesOptions<T, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The initial (inclusive) offset of the series' explicit window.
    pub fn start(mut self, start: T) -> Self {
        self.start = Some(start);
        self
    }

    /// The exclusive end offset of the series' explicit window.
    pub fn stop(mut self, stop: T) -> Self {
        self.stop = Some(stop);
        self
    }

    /// The fill value for backends that carry one (heaviside, constant,
    /// characteristic, delta, dense fill).
    pub fn value(mut self, value: V) -> Self {
        self.value = Some(value);
        self
    }

    /// The scalar step size of the series.
    pub fn discretization(mut self, discretization: T) -> Self {
        self.discretization = Some(discretization);
        self
    }

    /// The implicit value outside all stored runs.
    pub fn zero(mut self, zero: V) -> Self {
        self.zero = Some(zero);
        self
    }

    pub(crate) fn start_or_default(&self) -> T {
        self.start.unwrap_or_else(T::zero)
    }

    pub(crate) fn stop_or(&self, default: T) -> T {
        self.stop.unwrap_or(default)
    }

    pub(crate) fn discretization_or_default(&self) -> T {
        self.discretization.unwrap_or_else(T::one)
    }
}

impl<T: OffsetType, V: ValueType + Zero> SeriesOptions<T, V> {
    pub(crate) fn zero_or_default(&self) -> V {
        self.zero.clone().unwrap_or_else(V::zero)
    }

    /// The fill value: explicit `value` if given, else the zero value.
    pub(crate) fn value_or_zero(&self) -> V {
        self.value.clone().unwrap_or_else(|| self.zero_or_default())
    }
}

impl<T: OffsetType, V: ValueType + One> SeriesOptions<T, V> {
    pub(crate) fn value_or_one(&self) -> V {
        self.value.clone().unwrap_or_else(V::one)
    }
}
