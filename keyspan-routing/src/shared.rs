//! Shared routing map - lock-free snapshot publication.
//!
//! Readers load the current map without locking and keep using it for as
//! long as they hold the `Arc`. A single writer folds deltas into the
//! current snapshot and swaps the result in.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use tracing::{debug, info};

use crate::error::RoutingResult;
use crate::partition::PartitionKeyRange;
use crate::routing_map::CollectionRoutingMap;

/// Holds the current routing map of a collection, if one is known.
#[derive(Debug)]
pub struct SharedRoutingMap<S> {
    current: ArcSwapOption<CollectionRoutingMap<S>>,
}

impl<S> SharedRoutingMap<S> {
    /// Creates an empty handle.
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: ArcSwapOption::empty(),
        }
    }

    /// Creates a handle publishing the given map.
    #[must_use]
    pub fn with_map(map: CollectionRoutingMap<S>) -> Self {
        Self {
            current: ArcSwapOption::from_pointee(map),
        }
    }

    /// Returns the current snapshot.
    #[must_use]
    pub fn load(&self) -> Option<Arc<CollectionRoutingMap<S>>> {
        self.current.load_full()
    }

    /// Replaces the current snapshot.
    pub fn publish(&self, map: CollectionRoutingMap<S>) {
        info!(
            collection = %map.collection_id(),
            range_count = map.len(),
            highest_id = ?map.highest_non_offline_id(),
            "Publishing routing map"
        );
        self.current.store(Some(Arc::new(map)));
    }

    /// Drops the current snapshot, e.g. when the collection is recreated.
    pub fn clear(&self) {
        self.current.store(None);
    }
}

impl<S: Clone> SharedRoutingMap<S> {
    /// Folds ranges into the current snapshot and publishes the result.
    ///
    /// Returns `Ok(false)` without publishing if there is no snapshot yet or
    /// the fold is incomplete. Must only be called from a single writer.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`CollectionRoutingMap::try_combine`]; the
    /// current snapshot is left in place.
    pub fn try_combine<I>(&self, ranges: I, continuation_token: Option<String>) -> RoutingResult<bool>
    where
        I: IntoIterator<Item = (PartitionKeyRange, S)>,
    {
        let Some(current) = self.load() else {
            debug!("No routing map published yet, nothing to combine into");
            return Ok(false);
        };

        match current.try_combine(ranges, continuation_token)? {
            Some(combined) => {
                self.publish(combined);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl<S> Default for SharedRoutingMap<S> {
    fn default() -> Self {
        Self::new()
    }
}
