//! Routing configuration.

use std::env;

/// Environment variable that disables hierarchical key normalization.
pub const EPK_NORMALIZATION_DISABLED_ENV: &str = "KEYSPAN_EPK_NORMALIZATION_DISABLED";

/// Configuration consulted by overlap queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoutingConfig {
    /// Skip padding of partial hierarchical keys before overlap queries.
    ///
    /// Diagnostic escape hatch; normalization is on by default.
    pub epk_normalization_disabled: bool,
}

impl RoutingConfig {
    /// Creates the default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            epk_normalization_disabled: false,
        }
    }

    /// Loads configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `KEYSPAN_EPK_NORMALIZATION_DISABLED`: Set to `"true"` (any case) to
    ///   disable hierarchical key normalization
    #[must_use]
    pub fn from_env() -> Self {
        let value = env::var(EPK_NORMALIZATION_DISABLED_ENV).ok();
        Self {
            epk_normalization_disabled: parse_disabled(value.as_deref()),
        }
    }

    /// Disables hierarchical key normalization.
    #[must_use]
    pub const fn with_normalization_disabled(mut self) -> Self {
        self.epk_normalization_disabled = true;
        self
    }
}

/// Interprets the raw value of `EPK_NORMALIZATION_DISABLED_ENV`.
///
/// Only `"true"` in any case disables normalization.
fn parse_disabled(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.eq_ignore_ascii_case("true"))
}
