//! Error types for keyspan core operations.
//!
//! Following `TigerStyle`: all errors must be handled explicitly.
//! No silent failures, no ignored errors.

use thiserror::Error;

/// The result type for keyspan core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while validating identifiers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// An identifier that must be numeric could not be parsed.
    #[error("malformed id '{id}': {reason}")]
    MalformedId {
        /// The offending identifier.
        id: String,
        /// Why it was rejected.
        reason: &'static str,
    },
}
