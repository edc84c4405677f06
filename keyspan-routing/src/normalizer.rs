//! Hierarchical key normalization.
//!
//! Routing maps of collections with hierarchical partition keys may store
//! fully expanded effective keys (every level padded to `EPK_LEVEL_WIDTH`)
//! while callers hold partial keys covering only some levels. A partial key
//! and its expansion are not ordered the way the key space intends, e.g.
//! `"AB"` sorts before `"AB00"` although both denote the same prefix.
//! Right-padding partial keys with `EPK_PAD_CHAR` up to the full width makes
//! them comparable.

use std::borrow::Cow;

use keyspan_core::{EPK_LEVEL_WIDTH, EPK_MAX, EPK_MIN, EPK_PAD_CHAR};

use crate::definition::PartitionKeyDefinition;
use crate::error::{RoutingError, RoutingResult};
use crate::range::KeyRange;

/// Pads partial effective keys to the canonical width of a key definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyNormalizer {
    normalized_len: usize,
}

impl KeyNormalizer {
    /// Creates a normalizer for the given key definition.
    ///
    /// A definition without paths normalizes as a single level. There is no
    /// upper bound on the number of levels.
    #[must_use]
    pub fn for_definition(definition: &PartitionKeyDefinition) -> Self {
        Self {
            normalized_len: definition.levels().max(1) * EPK_LEVEL_WIDTH,
        }
    }

    /// Returns the canonical key length in characters.
    #[must_use]
    pub const fn normalized_len(&self) -> usize {
        self.normalized_len
    }

    /// Normalizes a single effective key.
    ///
    /// The key-space sentinels and keys already at full width are returned
    /// unchanged.
    #[must_use]
    pub fn normalize_key<'a>(&self, key: &'a str) -> Cow<'a, str> {
        if key.len() >= self.normalized_len || key == EPK_MIN || key == EPK_MAX {
            return Cow::Borrowed(key);
        }

        let mut padded = String::with_capacity(self.normalized_len);
        padded.push_str(key);
        padded.extend(std::iter::repeat(EPK_PAD_CHAR).take(self.normalized_len - key.len()));
        Cow::Owned(padded)
    }

    /// Normalizes both bounds of every range, keeping inclusivity flags.
    #[must_use]
    pub fn normalize(&self, ranges: &[KeyRange]) -> Vec<KeyRange> {
        ranges
            .iter()
            .map(|range| {
                KeyRange::new(
                    self.normalize_key(&range.min),
                    self.normalize_key(&range.max),
                    range.min_inclusive,
                    range.max_inclusive,
                )
            })
            .collect()
    }
}

/// Normalizes query ranges for the given key definition.
///
/// # Errors
///
/// Returns `RoutingError::InvalidArgument` if no definition is supplied.
pub fn normalize_ranges(
    ranges: &[KeyRange],
    definition: Option<&PartitionKeyDefinition>,
) -> RoutingResult<Vec<KeyRange>> {
    let definition = definition.ok_or(RoutingError::InvalidArgument {
        name: "partition_key_definition",
        reason: "required for normalization",
    })?;
    Ok(KeyNormalizer::for_definition(definition).normalize(ranges))
}
