//! Internal ordered run list shared by the sparse and piecewise backends.

use itertools::Itertools;
use tessella_runs::{OffsetType, Run};

use crate::inserter::RunParts;
use crate::series::{RunValue, ValueType};

/// A sorted, non-overlapping list of finite value-bearing runs plus the
/// optional infinite head/tail slots.
///
/// Invariants mirror the series contract: strictly increasing, no overlaps,
/// and (as produced by the ordered inserter) no adjacent equal values and
/// no zero-valued runs.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RunList<T, V> {
    pre: Option<RunValue<T, V>>,
    data: Vec<RunValue<T, V>>,
    post: Option<RunValue<T, V>>,
}

impl<T: OffsetType, V: ValueType> RunList<T, V> {
    pub fn new() -> Self {
        RunList {
            pre: None,
            data: Vec::new(),
            post: None,
        }
    }

    pub fn from_parts(parts: RunParts<T, V>) -> Self {
        debug_assert!(
            parts
                .runs
                .iter()
                .tuple_windows()
                .all(|(a, b)| a.run.end <= b.run.start),
            "run list must be sorted and non-overlapping"
        );
        RunList {
            pre: parts.pre,
            data: parts.runs,
            post: parts.post,
        }
    }

    #[inline]
    pub fn pre(&self) -> Option<(Run<T>, &V)> {
        self.pre.as_ref().map(|rv| (rv.run, &rv.value))
    }

    #[inline]
    pub fn post(&self) -> Option<(Run<T>, &V)> {
        self.post.as_ref().map(|rv| (rv.run, &rv.value))
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (Run<T>, &V)> + '_ {
        self.data.iter().map(|rv| (rv.run, &rv.value))
    }

    /// Point lookup: head/tail slots first, then binary search over the
    /// finite runs. O(log N).
    pub fn get_at<'a>(&'a self, offset: T, zero: &'a V) -> &'a V {
        if let Some(pre) = &self.pre
            && offset < pre.run.end
        {
            return &pre.value;
        }
        if let Some(post) = &self.post
            && offset >= post.run.start
        {
            return &post.value;
        }
        let idx = self.data.partition_point(|rv| rv.run.end <= offset);
        match self.data.get(idx) {
            Some(rv) if rv.run.contains(offset) => &rv.value,
            _ => zero,
        }
    }

    #[inline]
    pub fn data(&self) -> &[RunValue<T, V>] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut Vec<RunValue<T, V>> {
        &mut self.data
    }
}
