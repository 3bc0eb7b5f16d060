//! Error types for supply network generation and queries.

use crate::models::Tier;
use thiserror::Error;

/// Result type for supply network operations.
pub type Result<T> = std::result::Result<T, SupplyNetError>;

/// Supply network error type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SupplyNetError {
    /// Invalid generator configuration (node budget, ranges, grid).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A sampled tier transition had no candidates on one side.
    ///
    /// Only returned when the configuration asks for empty tiers to be fatal;
    /// otherwise the condition is recorded as a
    /// [`GenerationWarning`](crate::models::GenerationWarning).
    #[error("Empty tier: no candidates for {upstream} -> {downstream}")]
    EmptyTier {
        /// Upstream tier of the transition.
        upstream: Tier,
        /// Downstream tier of the transition.
        downstream: Tier,
    },

    /// Node id not present in the network.
    #[error("Node not found: {0}")]
    NotFound(String),

    /// No route between two nodes.
    #[error("No path from {from} to {to}")]
    NoPath {
        /// Start node id.
        from: String,
        /// End node id.
        to: String,
    },
}

impl SupplyNetError {
    /// Shorthand for a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        SupplyNetError::Configuration(message.into())
    }

    /// Check if this error stems from the configuration.
    pub fn is_configuration(&self) -> bool {
        matches!(self, SupplyNetError::Configuration(_))
    }

    /// Check if this error is a missing node lookup.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SupplyNetError::NotFound(_))
    }
}
