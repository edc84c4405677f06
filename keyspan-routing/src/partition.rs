//! Partition key ranges as reported by the backing service.

use keyspan_core::RangeId;

use crate::range::KeyRange;

/// Lifecycle status of a partition key range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RangeStatus {
    /// Serving traffic.
    #[default]
    Online,
    /// Still routable, but excluded from the highest active id.
    Offline,
}

/// A contiguous slice `[min_inclusive, max_exclusive)` of the key space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionKeyRange {
    /// Identifier assigned by the backing service.
    pub id: RangeId,
    /// Inclusive lower bound.
    pub min_inclusive: String,
    /// Exclusive upper bound.
    pub max_exclusive: String,
    /// Ids of the ranges this one replaced in a split or merge.
    pub parents: Vec<RangeId>,
    /// Lifecycle status.
    pub status: RangeStatus,
}

impl PartitionKeyRange {
    /// Creates an online range with no parents.
    #[must_use]
    pub fn new(
        id: impl Into<RangeId>,
        min_inclusive: impl Into<String>,
        max_exclusive: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            min_inclusive: min_inclusive.into(),
            max_exclusive: max_exclusive.into(),
            parents: Vec::new(),
            status: RangeStatus::Online,
        }
    }

    /// Sets the parent ids.
    #[must_use]
    pub fn with_parents<I, P>(mut self, parents: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<RangeId>,
    {
        self.parents = parents.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the status.
    #[must_use]
    pub const fn with_status(mut self, status: RangeStatus) -> Self {
        self.status = status;
        self
    }

    /// Returns the bounds as a half-open `KeyRange`.
    #[must_use]
    pub fn to_key_range(&self) -> KeyRange {
        KeyRange::half_open(self.min_inclusive.clone(), self.max_exclusive.clone())
    }

    /// Returns true if this range owns the given key.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.min_inclusive.as_str() <= key && key < self.max_exclusive.as_str()
    }
}
