//! Closed-form series: O(1)-state shapes, possibly extending to ±infinity.
//!
//! These backends store a transition offset or window plus a value, and
//! answer every query with comparison arithmetic. They are the cheap
//! building blocks of series expressions: a delta marks a single slot, a
//! heaviside a step, a characteristic a finite window, a constant the whole
//! axis.

use num_traits::{One, Zero};
use tessella_runs::{OffsetType, Run};

use crate::options::SeriesOptions;
use crate::series::{Series, ValueType};

/// A series holding `value` on the single slot `[at, at + 1)` and zero
/// elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeltaSeries<T, V> {
    at: T,
    value: V,
    discretization: T,
    zero: V,
}

impl<T: OffsetType, V: ValueType + Zero + One> DeltaSeries<T, V> {
    /// A delta of the unit value at `at`.
    pub fn unit(at: T) -> Self {
        Self::from_options(SeriesOptions::new().start(at))
    }

    pub fn from_options(options: SeriesOptions<T, V>) -> Self {
        DeltaSeries {
            at: options.start_or_default(),
            value: options.value_or_one(),
            discretization: options.discretization_or_default(),
            zero: options.zero_or_default(),
        }
    }
}

impl<T: OffsetType, V: ValueType> Series for DeltaSeries<T, V> {
    type Offset = T;
    type Value = V;

    fn discretization(&self) -> T {
        self.discretization
    }

    fn zero(&self) -> &V {
        &self.zero
    }

    fn get_at(&self, offset: T) -> &V {
        if offset == self.at { &self.value } else { &self.zero }
    }

    fn runs(&self) -> impl Iterator<Item = (Run<T>, &V)> + '_ {
        (self.value != self.zero)
            .then(|| (Run::unit(self.at), &self.value))
            .into_iter()
    }
}

/// A series holding `value` on `[start, +inf)` and zero before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeavisideSeries<T, V> {
    start: T,
    value: V,
    discretization: T,
    zero: V,
}

impl<T: OffsetType, V: ValueType + Zero + One> HeavisideSeries<T, V> {
    /// A unit step beginning at `start`.
    pub fn unit(start: T) -> Self {
        Self::from_options(SeriesOptions::new().start(start))
    }

    pub fn from_options(options: SeriesOptions<T, V>) -> Self {
        HeavisideSeries {
            start: options.start_or_default(),
            value: options.value_or_one(),
            discretization: options.discretization_or_default(),
            zero: options.zero_or_default(),
        }
    }
}

impl<T: OffsetType, V: ValueType> Series for HeavisideSeries<T, V> {
    type Offset = T;
    type Value = V;

    fn discretization(&self) -> T {
        self.discretization
    }

    fn zero(&self) -> &V {
        &self.zero
    }

    fn get_at(&self, offset: T) -> &V {
        if offset >= self.start {
            &self.value
        } else {
            &self.zero
        }
    }

    fn runs(&self) -> impl Iterator<Item = (Run<T>, &V)> + '_ {
        std::iter::empty()
    }

    fn post_run(&self) -> Option<(Run<T>, &V)> {
        (self.value != self.zero).then(|| (Run::tail(self.start), &self.value))
    }
}

/// A series holding `value` on `(-inf, stop)` and zero from `stop` on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InverseHeavisideSeries<T, V> {
    stop: T,
    value: V,
    discretization: T,
    zero: V,
}

impl<T: OffsetType, V: ValueType + Zero + One> InverseHeavisideSeries<T, V> {
    /// A unit step ending (exclusively) at `stop`.
    pub fn unit(stop: T) -> Self {
        Self::from_options(SeriesOptions::new().stop(stop))
    }

    pub fn from_options(options: SeriesOptions<T, V>) -> Self {
        InverseHeavisideSeries {
            stop: options.stop_or(T::zero()),
            value: options.value_or_one(),
            discretization: options.discretization_or_default(),
            zero: options.zero_or_default(),
        }
    }
}

impl<T: OffsetType, V: ValueType> Series for InverseHeavisideSeries<T, V> {
    type Offset = T;
    type Value = V;

    fn discretization(&self) -> T {
        self.discretization
    }

    fn zero(&self) -> &V {
        &self.zero
    }

    fn get_at(&self, offset: T) -> &V {
        if offset < self.stop { &self.value } else { &self.zero }
    }

    fn runs(&self) -> impl Iterator<Item = (Run<T>, &V)> + '_ {
        std::iter::empty()
    }

    fn pre_run(&self) -> Option<(Run<T>, &V)> {
        (self.value != self.zero).then(|| (Run::head(self.stop), &self.value))
    }
}

/// A series holding `value` over the entire offset axis.
///
/// The axis is reported as a head segment `(-inf, 0)` and a tail segment
/// `[0, +inf)`, matching how the ordered inserter splits an
/// axis-spanning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantSeries<T, V> {
    value: V,
    discretization: T,
    zero: V,
}

impl<T: OffsetType, V: ValueType + Zero + One> ConstantSeries<T, V> {
    pub fn from_options(options: SeriesOptions<T, V>) -> Self {
        ConstantSeries {
            value: options.value_or_one(),
            discretization: options.discretization_or_default(),
            zero: options.zero_or_default(),
        }
    }
}

impl<T: OffsetType, V: ValueType> Series for ConstantSeries<T, V> {
    type Offset = T;
    type Value = V;

    fn discretization(&self) -> T {
        self.discretization
    }

    fn zero(&self) -> &V {
        &self.zero
    }

    fn get_at(&self, _offset: T) -> &V {
        &self.value
    }

    fn runs(&self) -> impl Iterator<Item = (Run<T>, &V)> + '_ {
        std::iter::empty()
    }

    fn pre_run(&self) -> Option<(Run<T>, &V)> {
        (self.value != self.zero).then(|| (Run::head(T::zero()), &self.value))
    }

    fn post_run(&self) -> Option<(Run<T>, &V)> {
        (self.value != self.zero).then(|| (Run::tail(T::zero()), &self.value))
    }
}

/// A series holding `value` over the finite window `[start, stop)` and
/// zero outside it.
///
/// For a window carrying a full nested series rather than one constant
/// value, compose [`clip`](crate::view::clip) over that series instead;
/// the view satisfies the same read contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacteristicSeries<T, V> {
    window: Run<T>,
    value: V,
    discretization: T,
    zero: V,
}

impl<T: OffsetType, V: ValueType + Zero + One> CharacteristicSeries<T, V> {
    /// The unit-valued indicator of `[start, stop)`.
    pub fn unit(start: T, stop: T) -> Self {
        Self::from_options(SeriesOptions::new().start(start).stop(stop))
    }

    pub fn from_options(options: SeriesOptions<T, V>) -> Self {
        let start = options.start_or_default();
        let stop = options.stop_or(start);
        assert!(
            start.is_finite_offset() && stop.is_finite_offset() && start <= stop,
            "characteristic window must be finite with start <= stop"
        );
        CharacteristicSeries {
            window: Run::new(start, stop),
            value: options.value_or_one(),
            discretization: options.discretization_or_default(),
            zero: options.zero_or_default(),
        }
    }
}

impl<T: OffsetType, V: ValueType> Series for CharacteristicSeries<T, V> {
    type Offset = T;
    type Value = V;

    fn discretization(&self) -> T {
        self.discretization
    }

    fn zero(&self) -> &V {
        &self.zero
    }

    fn get_at(&self, offset: T) -> &V {
        if self.window.contains(offset) {
            &self.value
        } else {
            &self.zero
        }
    }

    fn runs(&self) -> impl Iterator<Item = (Run<T>, &V)> + '_ {
        (!self.window.is_empty() && self.value != self.zero)
            .then(|| (self.window, &self.value))
            .into_iter()
    }
}
