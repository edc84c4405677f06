//! Keyspan Core - Strongly-typed identifiers and key-space constants.
//!
//! This crate provides the vocabulary shared by the routing layer: the
//! identifiers of partition key ranges and collections, the bounds of the
//! effective partition key space, and the validation errors raised when an
//! identifier is malformed.
//!
//! # Design Principles (TigerStyle)
//!
//! - **Strongly-typed IDs**: Prevent mixing up a `RangeId` with a `CollectionId`
//! - **Explicit limits**: Key-space bounds and widths are named constants
//! - **No unsafe code**: Safety > Performance

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod error;
mod limits;
mod types;

pub use error::{Error, Result};
pub use limits::{EPK_LEVEL_WIDTH, EPK_MAX, EPK_MIN, EPK_PAD_CHAR};
pub use types::{CollectionId, RangeId};
