//! Error types for the beacon registry.

use thiserror::Error;

/// Errors that can occur when using the registry.
#[derive(Error, Debug)]
pub enum BeaconError {
    /// A required key was missing or expired.
    ///
    /// `storage_key` is the resolved, namespace-qualified form
    /// (`"namespace:key"` when a namespace was supplied).
    #[error("beacon key '{storage_key}' is required but not found")]
    KeyRequired {
        /// The resolved storage key that was looked up
        storage_key: String,
    },

    /// JSON serialization error (requires `json` feature)
    #[cfg(feature = "json")]
    #[error("serialization error: {0}")]
    Serialization(#[source] serde_json::Error),

    /// JSON deserialization error (requires `json` feature)
    #[cfg(feature = "json")]
    #[error("deserialization error: {0}")]
    Deserialization(#[source] serde_json::Error),
}

impl BeaconError {
    /// Returns `true` if this error indicates a required key was not found.
    pub fn is_key_required(&self) -> bool {
        matches!(self, BeaconError::KeyRequired { .. })
    }
}
