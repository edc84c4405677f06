//! Strongly-typed identifiers for keyspan entities.
//!
//! Following `TigerStyle`: explicit types prevent bugs from mixing up IDs.
//! Identifiers are assigned by the backing service and are opaque strings
//! on the wire, so they wrap `String` rather than an integer.

use std::borrow::Borrow;
use std::fmt;

use crate::error::{Error, Result};

/// Macro to generate strongly-typed string ID wrappers.
///
/// Each ID type wraps a `String` and provides:
/// - Type safety (can't mix `RangeId` with `CollectionId`)
/// - Debug/Display formatting
/// - `Borrow<str>` so maps keyed by the ID can be queried with `&str`
macro_rules! define_id {
    ($name:ident, $prefix:expr, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[repr(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new ID from its string form.
            #[inline]
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the ID as a string slice.
            #[inline]
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", $prefix, self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(RangeId, "pkrange", "Identifier of a partition key range within a collection.");
define_id!(CollectionId, "coll", "Stable identifier of one collection generation.");

impl RangeId {
    /// Parses the ID as the non-negative integer the backing service assigns.
    ///
    /// Range IDs grow monotonically across splits and merges, so the numeric
    /// value orders ranges by recency. Accepts plain decimal digits in
    /// `0..=u32::MAX`; a leading `+` is tolerated, signs and whitespace
    /// otherwise are not.
    ///
    /// # Errors
    ///
    /// Returns `Error::MalformedId` if the ID is not a decimal integer in
    /// `0..=u32::MAX`.
    pub fn numeric(&self) -> Result<u32> {
        self.0.parse::<u32>().map_err(|_| Error::MalformedId {
            id: self.0.clone(),
            reason: "not a non-negative integer",
        })
    }
}
