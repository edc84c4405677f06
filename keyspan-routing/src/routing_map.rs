//! Collection routing map - mapping of effective key ranges to partitions.
//!
//! The routing map holds the complete, gapless set of partition key ranges
//! of one collection generation, sorted by lower bound. Keys and key ranges
//! are resolved to partitions by binary search over that sequence.
//!
//! A map is immutable once built. Topology changes (splits and merges) are
//! folded in with [`CollectionRoutingMap::try_combine`], which returns a new
//! map and leaves the receiver untouched.

use std::collections::{BTreeMap, HashMap, HashSet};

use keyspan_core::{CollectionId, RangeId, EPK_MAX, EPK_MIN};
use tracing::{debug, error, info};

use crate::config::RoutingConfig;
use crate::definition::PartitionKeyDefinition;
use crate::error::{RoutingError, RoutingResult};
use crate::normalizer::normalize_ranges;
use crate::partition::{PartitionKeyRange, RangeStatus};
use crate::range::KeyRange;

/// Routes effective partition keys to the partition key ranges that own them.
///
/// `S` is the service identity of a range: whatever the caller needs to
/// reach the replica set serving it. The map stores and returns it but never
/// inspects it.
#[derive(Debug, Clone)]
pub struct CollectionRoutingMap<S> {
    /// Range id to range and service identity.
    range_by_id: HashMap<RangeId, (PartitionKeyRange, S)>,
    /// Ranges in ascending order of `min_inclusive`.
    ordered_ranges: Vec<PartitionKeyRange>,
    /// Bounds of `ordered_ranges`, index for index.
    ordered_bounds: Vec<KeyRange>,
    /// Ids retired by a split or merge.
    gone_ranges: HashSet<RangeId>,
    /// Highest numeric id among ranges that are not offline.
    highest_non_offline_id: Option<u32>,
    /// Collection generation this map belongs to.
    collection_id: CollectionId,
    /// Opaque change-feed resume position handed out with this map.
    continuation_token: Option<String>,
}

impl<S> CollectionRoutingMap<S> {
    /// Builds a routing map from a complete set of ranges.
    ///
    /// Ranges may arrive in any order; a later range with the same id
    /// replaces an earlier one. Returns `Ok(None)` if the ranges leave a gap
    /// or do not span the whole key space, which is expected while a listing
    /// is still being paged in.
    ///
    /// # Errors
    ///
    /// Returns `RoutingError::InvariantViolation` if two ranges overlap,
    /// `RoutingError::EmptyRange` if a range does not satisfy `min < max` and
    /// `RoutingError::MalformedId` if a range id is not an integer.
    pub fn try_create<I>(
        ranges: I,
        collection_id: CollectionId,
        continuation_token: Option<String>,
    ) -> RoutingResult<Option<Self>>
    where
        I: IntoIterator<Item = (PartitionKeyRange, S)>,
    {
        let mut range_by_id = HashMap::new();
        for (range, info) in ranges {
            range_by_id.insert(range.id.clone(), (range, info));
        }

        let ordered_ranges = sorted_ranges(&range_by_id);
        if !is_complete_set(&ordered_ranges)? {
            debug!(
                collection = %collection_id,
                range_count = ordered_ranges.len(),
                "Incomplete set of ranges, no routing map built"
            );
            return Ok(None);
        }

        let gone_ranges = ordered_ranges
            .iter()
            .flat_map(|range| range.parents.iter().cloned())
            .collect();

        Self::from_parts(
            range_by_id,
            ordered_ranges,
            gone_ranges,
            collection_id,
            continuation_token,
        )
        .map(Some)
    }

    fn from_parts(
        range_by_id: HashMap<RangeId, (PartitionKeyRange, S)>,
        ordered_ranges: Vec<PartitionKeyRange>,
        gone_ranges: HashSet<RangeId>,
        collection_id: CollectionId,
        continuation_token: Option<String>,
    ) -> RoutingResult<Self> {
        let mut highest_non_offline_id = None;
        for range in &ordered_ranges {
            let id = match range.id.numeric() {
                Ok(id) => id,
                Err(source) => {
                    error!(
                        range_id = %range.id,
                        collection = %collection_id,
                        error = %source,
                        "Could not parse partition key range id as integer"
                    );
                    return Err(RoutingError::MalformedId {
                        id: range.id.clone(),
                        collection: collection_id,
                        source,
                    });
                }
            };
            if range.status != RangeStatus::Offline {
                highest_non_offline_id = highest_non_offline_id.max(Some(id));
            }
        }

        let ordered_bounds = ordered_ranges.iter().map(PartitionKeyRange::to_key_range).collect();

        Ok(Self {
            range_by_id,
            ordered_ranges,
            ordered_bounds,
            gone_ranges,
            highest_non_offline_id,
            collection_id,
            continuation_token,
        })
    }

    /// Returns the ranges in ascending key order.
    #[must_use]
    pub fn ordered_ranges(&self) -> &[PartitionKeyRange] {
        &self.ordered_ranges
    }

    /// Returns the number of ranges in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ordered_ranges.len()
    }

    /// Returns true if the map holds no ranges, which a built map never does.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ordered_ranges.is_empty()
    }

    /// Returns an iterator over ranges and their service identities in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&PartitionKeyRange, &S)> + '_ {
        self.ordered_ranges
            .iter()
            .filter_map(|range| self.range_by_id.get(&range.id))
            .map(|(range, info)| (range, info))
    }

    /// Returns the collection generation this map belongs to.
    #[must_use]
    pub const fn collection_id(&self) -> &CollectionId {
        &self.collection_id
    }

    /// Returns the continuation token handed out with this map.
    #[must_use]
    pub fn continuation_token(&self) -> Option<&str> {
        self.continuation_token.as_deref()
    }

    /// Returns the highest numeric id among ranges that are not offline.
    ///
    /// Ids grow with every split or merge, so callers compare this across
    /// maps to tell whether a fold advanced the topology.
    #[must_use]
    pub const fn highest_non_offline_id(&self) -> Option<u32> {
        self.highest_non_offline_id
    }

    /// Returns true if the id was retired by a split or merge.
    #[must_use]
    pub fn is_gone(&self, id: &str) -> bool {
        self.gone_ranges.contains(id)
    }

    /// Returns the range with the given id.
    #[must_use]
    pub fn range_by_id(&self, id: &str) -> Option<&PartitionKeyRange> {
        self.range_by_id.get(id).map(|(range, _)| range)
    }

    /// Returns the service identity of the range with the given id.
    #[must_use]
    pub fn info_by_id(&self, id: &str) -> Option<&S> {
        self.range_by_id.get(id).map(|(_, info)| info)
    }

    /// Returns the range owning the given effective key.
    ///
    /// # Errors
    ///
    /// Returns `RoutingError::InvalidArgument` if the key is at or beyond
    /// the end of the key space.
    pub fn range_containing(&self, key: &str) -> RoutingResult<&PartitionKeyRange> {
        if key >= EPK_MAX {
            return Err(RoutingError::InvalidArgument {
                name: "key",
                reason: "at or beyond the end of the key space",
            });
        }

        if key == EPK_MIN {
            return Ok(&self.ordered_ranges[0]);
        }

        // The first range starts at EPK_MIN < key, so a miss never lands at 0.
        let probe = KeyRange::point(key);
        let index = match self.ordered_bounds.binary_search_by(|bounds| bounds.cmp_by_min(&probe)) {
            Ok(index) => index,
            Err(insert_at) => insert_at - 1,
        };
        debug_assert!(self.ordered_bounds[index].contains(key));

        Ok(&self.ordered_ranges[index])
    }

    /// Returns every range overlapping any of the query ranges.
    ///
    /// The result is deduplicated and in ascending key order. When the
    /// definition is hierarchical, query bounds are normalized first unless
    /// the config disables it. Definitions of any depth are padded; there is
    /// no level cap.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`normalize_ranges`].
    pub fn overlapping(
        &self,
        query_ranges: &[KeyRange],
        definition: Option<&PartitionKeyDefinition>,
        config: &RoutingConfig,
    ) -> RoutingResult<Vec<&PartitionKeyRange>> {
        let normalized;
        let queries = match definition {
            Some(definition) if definition.is_hierarchical() => {
                if config.epk_normalization_disabled {
                    debug!("Effective key normalization disabled, querying raw bounds");
                    query_ranges
                } else {
                    normalized = normalize_ranges(query_ranges, Some(definition))?;
                    normalized.as_slice()
                }
            }
            _ => query_ranges,
        };

        let mut found: BTreeMap<&str, &PartitionKeyRange> = BTreeMap::new();
        let last = self.ordered_bounds.len() - 1;

        for query in queries {
            // Both edges may land one range wide of the true matches; the
            // overlap test below is authoritative.
            let min_index = match self.ordered_bounds.binary_search_by(|bounds| bounds.cmp_by_min(query)) {
                Ok(index) => index,
                Err(insert_at) => insert_at.saturating_sub(1),
            };
            let max_index = match self.ordered_bounds.binary_search_by(|bounds| bounds.cmp_by_max(query)) {
                Ok(index) => index,
                Err(insert_at) => insert_at.min(last),
            };

            for index in min_index..=max_index {
                if self.ordered_bounds[index].overlaps(query) {
                    let range = &self.ordered_ranges[index];
                    found.insert(range.min_inclusive.as_str(), range);
                }
            }
        }

        Ok(found.into_values().collect())
    }

    /// Returns every range overlapping a single query range.
    ///
    /// # Errors
    ///
    /// See [`CollectionRoutingMap::overlapping`].
    pub fn overlapping_range(
        &self,
        query_range: &KeyRange,
        definition: Option<&PartitionKeyDefinition>,
        config: &RoutingConfig,
    ) -> RoutingResult<Vec<&PartitionKeyRange>> {
        self.overlapping(std::slice::from_ref(query_range), definition, config)
    }
}

impl<S: Clone> CollectionRoutingMap<S> {
    /// Folds newly online ranges into this map.
    ///
    /// Every id listed as a parent of a delta range is retired together with
    /// the ids this map already knows to be gone. Retired ranges are dropped
    /// from both this map and the delta; the delta wins on id collisions.
    /// Returns `Ok(None)` if the result leaves a gap, in which case this map
    /// stays authoritative and the caller should retry with more ranges.
    ///
    /// # Errors
    ///
    /// Returns `RoutingError::InvariantViolation` if the combined ranges
    /// overlap, `RoutingError::EmptyRange` if one of them is empty and
    /// `RoutingError::MalformedId` if a range id is not an integer.
    pub fn try_combine<I>(
        &self,
        ranges: I,
        continuation_token: Option<String>,
    ) -> RoutingResult<Option<Self>>
    where
        I: IntoIterator<Item = (PartitionKeyRange, S)>,
    {
        let delta: Vec<(PartitionKeyRange, S)> = ranges.into_iter().collect();

        let mut gone_ranges = self.gone_ranges.clone();
        gone_ranges.extend(delta.iter().flat_map(|(range, _)| range.parents.iter().cloned()));

        let mut range_by_id: HashMap<RangeId, (PartitionKeyRange, S)> = self
            .range_by_id
            .iter()
            .filter(|(id, _)| !gone_ranges.contains(*id))
            .map(|(id, entry)| (id.clone(), entry.clone()))
            .collect();

        for (range, info) in delta {
            if gone_ranges.contains(&range.id) {
                debug!(range_id = %range.id, "Skipping range that is already gone");
                continue;
            }
            info!(
                collection = %self.collection_id,
                range_id = %range.id,
                min = %range.min_inclusive,
                max = %range.max_exclusive,
                "Combining range into routing map"
            );
            range_by_id.insert(range.id.clone(), (range, info));
        }

        let ordered_ranges = sorted_ranges(&range_by_id);
        if !is_complete_set(&ordered_ranges)? {
            debug!(
                collection = %self.collection_id,
                range_count = ordered_ranges.len(),
                "Combined ranges incomplete, keeping previous routing map"
            );
            return Ok(None);
        }

        Self::from_parts(
            range_by_id,
            ordered_ranges,
            gone_ranges,
            self.collection_id.clone(),
            continuation_token,
        )
        .map(Some)
    }

    /// Returns a copy of this map carrying a new continuation token.
    #[must_use]
    pub fn with_continuation(&self, continuation_token: Option<String>) -> Self {
        Self {
            continuation_token,
            ..self.clone()
        }
    }
}

/// Returns the ranges sorted by lower bound, then upper bound, then id.
///
/// The full ordering keeps the result independent of hash iteration order.
fn sorted_ranges<S>(range_by_id: &HashMap<RangeId, (PartitionKeyRange, S)>) -> Vec<PartitionKeyRange> {
    let mut ranges: Vec<PartitionKeyRange> =
        range_by_id.values().map(|(range, _)| range.clone()).collect();
    ranges.sort_by(|a, b| {
        a.min_inclusive
            .cmp(&b.min_inclusive)
            .then_with(|| a.max_exclusive.cmp(&b.max_exclusive))
            .then_with(|| a.id.cmp(&b.id))
    });
    ranges
}

/// Checks that sorted ranges abut and span `[EPK_MIN, EPK_MAX)`.
///
/// A gap makes the set incomplete; an empty range or an overlap anywhere is
/// an error.
fn is_complete_set(ordered_ranges: &[PartitionKeyRange]) -> RoutingResult<bool> {
    if let Some(range) = ordered_ranges
        .iter()
        .find(|range| range.min_inclusive >= range.max_exclusive)
    {
        error!(
            range_id = %range.id,
            min = %range.min_inclusive,
            max = %range.max_exclusive,
            "Range is empty"
        );
        return Err(RoutingError::EmptyRange {
            id: range.id.clone(),
            min: range.min_inclusive.clone(),
            max: range.max_exclusive.clone(),
        });
    }

    let (Some(first), Some(last)) = (ordered_ranges.first(), ordered_ranges.last()) else {
        return Ok(false);
    };

    let mut complete = first.min_inclusive == EPK_MIN && last.max_exclusive == EPK_MAX;

    for pair in ordered_ranges.windows(2) {
        let (previous, current) = (&pair[0], &pair[1]);
        if previous.max_exclusive > current.min_inclusive {
            error!(
                previous = %previous.id,
                previous_max = %previous.max_exclusive,
                current = %current.id,
                current_min = %current.min_inclusive,
                "Ranges overlap"
            );
            return Err(RoutingError::InvariantViolation {
                previous: previous.id.clone(),
                previous_max: previous.max_exclusive.clone(),
                current: current.id.clone(),
                current_min: current.min_inclusive.clone(),
            });
        }
        complete &= previous.max_exclusive == current.min_inclusive;
    }

    Ok(complete)
}
