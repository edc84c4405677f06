//! Bounds of the effective partition key space.
//!
//! Effective partition keys are upper-case hex strings compared ordinally.
//! Every routing map spans `[EPK_MIN, EPK_MAX)`.

/// Inclusive lower bound of the effective key space.
pub const EPK_MIN: &str = "";

/// Exclusive upper bound of the effective key space.
pub const EPK_MAX: &str = "FF";

/// Width in characters of one fully expanded partition key level.
pub const EPK_LEVEL_WIDTH: usize = 32;

/// Character used to right-pad partial hierarchical keys.
///
/// Must be the ordinal minimum of the effective key alphabet, otherwise
/// padding reorders keys that share a prefix.
pub const EPK_PAD_CHAR: char = '0';
