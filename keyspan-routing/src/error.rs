//! Routing error types.
//!
//! An incomplete set of ranges is not an error: construction and folding
//! report it as `Ok(None)`. Everything here is unrecoverable for the call
//! that raised it.

use keyspan_core::{CollectionId, RangeId};
use thiserror::Error;

/// Result type for routing operations.
pub type RoutingResult<T> = Result<T, RoutingError>;

/// Errors that can occur while building or querying a routing map.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoutingError {
    /// Two ranges overlap instead of abutting.
    #[error(
        "ranges overlap: {previous} [.., {previous_max}) and {current} [{current_min}, ..)"
    )]
    InvariantViolation {
        /// The lower of the two ranges.
        previous: RangeId,
        /// Exclusive upper bound of the lower range.
        previous_max: String,
        /// The higher of the two ranges.
        current: RangeId,
        /// Inclusive lower bound of the higher range.
        current_min: String,
    },

    /// A range's lower bound is not below its upper bound.
    #[error("range {id} is empty: [{min}, {max})")]
    EmptyRange {
        /// The offending range id.
        id: RangeId,
        /// Inclusive lower bound.
        min: String,
        /// Exclusive upper bound.
        max: String,
    },

    /// A range id could not be parsed as an integer.
    #[error("could not parse partition key range id '{id}' as integer for collection {collection}")]
    MalformedId {
        /// The offending range id.
        id: RangeId,
        /// The collection the range belongs to.
        collection: CollectionId,
        /// The parse failure.
        #[source]
        source: keyspan_core::Error,
    },

    /// A query argument violated a precondition.
    #[error("invalid argument '{name}': {reason}")]
    InvalidArgument {
        /// The name of the argument.
        name: &'static str,
        /// Why it was invalid.
        reason: &'static str,
    },
}
