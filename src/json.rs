//! JSON convenience layer for string-valued registries.
//!
//! Available with the `json` feature. Lets callers stash any serde-compatible
//! type in a `Beacon<String>` without hand-rolling the serialization.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{Beacon, BeaconError};

impl Beacon<String> {
    /// Serializes a value as JSON and registers it under the given key
    ///
    /// # Errors
    ///
    /// Returns [`BeaconError::Serialization`] if the value cannot be
    /// encoded. Nothing is stored in that case.
    pub fn register_json<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        namespace: Option<&str>,
        ttl: Option<Duration>,
    ) -> Result<(), BeaconError> {
        let payload = serde_json::to_string(value).map_err(BeaconError::Serialization)?;
        self.register(key, payload, namespace, ttl);
        Ok(())
    }

    /// Retrieves a value by key and deserializes it from JSON
    ///
    /// Returns `Ok(None)` when the key is absent or expired, with the same
    /// hit/miss accounting as [`get`](Beacon::get).
    ///
    /// # Errors
    ///
    /// Returns [`BeaconError::Deserialization`] if the stored payload is
    /// not valid JSON for `T`.
    pub fn get_json<T: DeserializeOwned>(
        &self,
        key: &str,
        namespace: Option<&str>,
    ) -> Result<Option<T>, BeaconError> {
        match self.get(key, namespace) {
            Some(payload) => serde_json::from_str(&payload)
                .map(Some)
                .map_err(BeaconError::Deserialization),
            None => Ok(None),
        }
    }
}
