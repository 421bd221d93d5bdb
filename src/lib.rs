//! # Beacon Core
//!
//! A thread-safe in-process key/value registry with namespaces, TTL
//! (time-to-live) support, and hit/miss statistics.
//!
//! ## Features
//!
//! - String keys, optionally partitioned by a string namespace
//! - Arbitrary value types via a generic container (`Beacon<V>`)
//! - Optional per-entry TTL; expired entries are invisible to every read
//! - Lazy expiry cleanup on access, opportunistic sweeps on write, explicit
//!   sweeps on demand, and an optional periodic background sweeper
//! - Hit/miss counters maintained by `get` lookups
//! - Cheap `Clone` handles sharing one registry across threads
//!
//! ## Example
//!
//! ```rust
//! use beacon_core::Beacon;
//! use std::time::Duration;
//!
//! let beacon = Beacon::new();
//!
//! // Stash an ambient value for other call sites to pick up
//! beacon.register("api_key", "secret123", Some("aws"), None);
//! assert_eq!(beacon.get("api_key", Some("aws")), Some("secret123"));
//!
//! // Short-lived entries disappear on their own
//! beacon.register("token", "abc", Some("auth"), Some(Duration::from_secs(60)));
//! assert!(beacon.has("token", Some("auth")));
//!
//! let stats = beacon.stats();
//! assert_eq!(stats.hits, 1);
//! ```
//!
//! ## Background sweeping
//!
//! By default expired entries are only removed when something touches them.
//! Inside a Tokio runtime a registry can also sweep itself periodically:
//!
//! ```rust,no_run
//! use beacon_core::{Beacon, BeaconConfig};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = BeaconConfig::default()
//!         .with_sweep_interval(Duration::from_secs(60));
//!     let beacon: Beacon<String> = Beacon::with_config(config);
//!
//!     beacon.register("session", "s1".into(), None, Some(Duration::from_secs(300)));
//! }
//! ```

mod config;
mod entry;
mod error;
#[cfg(feature = "json")]
mod json;
mod registry;

pub use config::BeaconConfig;
pub use entry::Entry;
pub use error::BeaconError;
pub use registry::{Beacon, Stats};
