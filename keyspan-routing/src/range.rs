//! Key ranges over the effective partition key space.
//!
//! A `KeyRange` is an interval of effective keys whose bounds may each be
//! inclusive or exclusive. All comparisons are ordinal (byte-wise), which
//! matches the ordering the backing service uses for its key space.

use std::cmp::Ordering;

use keyspan_core::{EPK_MAX, EPK_MIN};

/// An interval of effective partition keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyRange {
    /// Lower bound.
    pub min: String,
    /// Upper bound.
    pub max: String,
    /// Whether `min` itself belongs to the range.
    pub min_inclusive: bool,
    /// Whether `max` itself belongs to the range.
    pub max_inclusive: bool,
}

impl KeyRange {
    /// Creates a new key range.
    #[must_use]
    pub fn new(
        min: impl Into<String>,
        max: impl Into<String>,
        min_inclusive: bool,
        max_inclusive: bool,
    ) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
            min_inclusive,
            max_inclusive,
        }
    }

    /// Creates the half-open range `[min, max)`.
    #[must_use]
    pub fn half_open(min: impl Into<String>, max: impl Into<String>) -> Self {
        Self::new(min, max, true, false)
    }

    /// Creates the single-key range `[key, key]`.
    #[must_use]
    pub fn point(key: impl Into<String>) -> Self {
        let key = key.into();
        Self::new(key.clone(), key, true, true)
    }

    /// Creates the range spanning the whole key space.
    #[must_use]
    pub fn full() -> Self {
        Self::half_open(EPK_MIN, EPK_MAX)
    }

    /// Returns true if no key satisfies both bounds.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min == self.max && !(self.min_inclusive && self.max_inclusive)
    }

    /// Returns true if this range contains the given key.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        let above_min = match self.min.as_str().cmp(key) {
            Ordering::Less => true,
            Ordering::Equal => self.min_inclusive,
            Ordering::Greater => false,
        };
        let below_max = match self.max.as_str().cmp(key) {
            Ordering::Greater => true,
            Ordering::Equal => self.max_inclusive,
            Ordering::Less => false,
        };
        above_min && below_max
    }

    /// Returns true if the two ranges share at least one key.
    ///
    /// Touching bounds count as overlap only when both touching sides are
    /// inclusive. Empty ranges never overlap anything.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }

        let self_min_vs_other_max = self.min.cmp(&other.max);
        let other_min_vs_self_max = other.min.cmp(&self.max);

        if self_min_vs_other_max == Ordering::Greater || other_min_vs_self_max == Ordering::Greater {
            return false;
        }
        if self_min_vs_other_max == Ordering::Equal && !(self.min_inclusive && other.max_inclusive) {
            return false;
        }
        if other_min_vs_self_max == Ordering::Equal && !(other.min_inclusive && self.max_inclusive) {
            return false;
        }
        true
    }

    /// Orders ranges by their lower bound.
    ///
    /// On equal bounds an inclusive lower bound sorts first, since it admits
    /// one more key.
    #[must_use]
    pub fn cmp_by_min(&self, other: &Self) -> Ordering {
        self.min.cmp(&other.min).then_with(|| {
            match (self.min_inclusive, other.min_inclusive) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => Ordering::Equal,
            }
        })
    }

    /// Orders ranges by their upper bound.
    ///
    /// On equal bounds an inclusive upper bound sorts last, since it admits
    /// one more key.
    #[must_use]
    pub fn cmp_by_max(&self, other: &Self) -> Ordering {
        self.max.cmp(&other.max).then_with(|| {
            match (self.max_inclusive, other.max_inclusive) {
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                _ => Ordering::Equal,
            }
        })
    }
}
