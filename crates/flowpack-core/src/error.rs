//! Error types for flowpack-core.

use thiserror::Error;

/// Invalid container configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Row spacing below zero.
    #[error("row spacing must be non-negative, got {0}")]
    NegativeRowSpacing(i32),

    /// One or more padding sides below zero.
    #[error("padding must be non-negative on every side, got {side} = {value}")]
    NegativePadding {
        /// Offending side name
        side: &'static str,
        /// Offending value
        value: i32,
    },
}
