//! Keyspan Routing - Partition routing for range-sharded collections.
//!
//! This crate maps effective partition keys to the partition key ranges of
//! a collection and keeps that mapping correct as ranges split and merge.
//!
//! # Design (`TigerStyle`)
//!
//! - **Immutable snapshots**: Folding a split or merge yields a new map
//! - **Incomplete is not an error**: Gaps return `Ok(None)`, overlaps fail hard
//! - **Opaque payloads**: Service identities are carried, never inspected
//! - **No I/O**: Callers fetch metadata and decide when to refresh
//!
//! # Example
//!
//! ```
//! use keyspan_core::CollectionId;
//! use keyspan_routing::{CollectionRoutingMap, KeyRange, PartitionKeyRange, RoutingConfig};
//!
//! let ranges = vec![
//!     (PartitionKeyRange::new("0", "", "80"), "replica-a"),
//!     (PartitionKeyRange::new("1", "80", "FF"), "replica-b"),
//! ];
//! let map = CollectionRoutingMap::try_create(ranges, CollectionId::new("coll"), None)?
//!     .expect("ranges cover the key space");
//!
//! assert_eq!(map.range_containing("9A")?.id.as_str(), "1");
//!
//! let config = RoutingConfig::default();
//! let hits = map.overlapping_range(&KeyRange::half_open("70", "90"), None, &config)?;
//! assert_eq!(hits.len(), 2);
//! # Ok::<(), keyspan_routing::RoutingError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

mod config;
mod definition;
mod error;
mod normalizer;
mod partition;
mod range;
mod routing_map;
mod shared;

pub use config::{RoutingConfig, EPK_NORMALIZATION_DISABLED_ENV};
pub use definition::{PartitionKeyDefinition, PartitionKind};
pub use error::{RoutingError, RoutingResult};
pub use normalizer::{normalize_ranges, KeyNormalizer};
pub use partition::{PartitionKeyRange, RangeStatus};
pub use range::KeyRange;
pub use routing_map::CollectionRoutingMap;
pub use shared::SharedRoutingMap;
