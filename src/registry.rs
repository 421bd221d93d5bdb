use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tokio::sync::watch;

use crate::config::BeaconConfig;
use crate::entry::Entry;
use crate::error::BeaconError;

/// Hit/miss counters and the physical entry count of a registry
///
/// `size` is the raw size of the storage map, including logically expired
/// entries that have not been swept yet. `hits` and `misses` only count
/// `get` lookups; `has` and the bulk read operations never touch them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Number of `get` calls that found a live entry
    pub hits: u64,
    /// Number of `get` calls that found nothing (absent or expired)
    pub misses: u64,
    /// Physical entry count, including unswept expired entries
    pub size: usize,
}

/// Storage map and counters, guarded as one unit so every public
/// operation is a single critical section.
struct State<V> {
    entries: HashMap<String, Entry<V>>,
    hits: u64,
    misses: u64,
}

impl<V> State<V> {
    fn new() -> Self {
        Self {
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Removes every entry expired as of `now`, returning the count removed.
    fn sweep(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));
        before - self.entries.len()
    }
}

/// Internal shared state for the registry
struct Inner<V> {
    state: Mutex<State<V>>,
    /// Sender to signal shutdown to the sweep task
    shutdown_tx: watch::Sender<bool>,
}

impl<V> Drop for Inner<V> {
    fn drop(&mut self) {
        // Signal the sweep task to stop when the registry is dropped
        let _ = self.shutdown_tx.send(true);
    }
}

/// Thread-safe in-process key/value registry with namespaces and TTL support
///
/// Keys are strings, optionally qualified by a namespace; values are an
/// arbitrary type `V`. Each entry carries an optional expiry instant, after
/// which every read treats it as absent. A single mutex guards the storage
/// map and the hit/miss counters together, so each operation is observed
/// atomically by all other callers.
///
/// `Beacon` is a cheap handle: cloning it shares the underlying storage,
/// which makes it suitable as a process-wide coordination point for
/// ephemeral state (credentials, feature flags, short-lived tokens).
///
/// Expired entries are removed lazily when a read discovers them, swept
/// opportunistically on every `register`, on demand via
/// [`clear_expired`](Beacon::clear_expired), or periodically by an optional
/// background task (see [`BeaconConfig`]).
///
/// # Example
///
/// ```rust
/// use beacon_core::Beacon;
/// use std::time::Duration;
///
/// let beacon = Beacon::new();
///
/// beacon.register("api_key", "secret123", Some("aws"), None);
/// assert_eq!(beacon.get("api_key", Some("aws")), Some("secret123"));
///
/// // A bare lookup does not see namespaced entries
/// assert_eq!(beacon.get("api_key", None), None);
///
/// // Entries with a TTL disappear once it elapses
/// beacon.register("token", "abc", Some("auth"), Some(Duration::from_secs(60)));
/// assert!(beacon.has("token", Some("auth")));
/// ```
pub struct Beacon<V> {
    inner: Arc<Inner<V>>,
}

impl<V> Clone for Beacon<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> Default for Beacon<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Beacon<V> {
    /// Creates an empty registry with no background sweep task
    ///
    /// Purely synchronous; does not require an async runtime. Expired
    /// entries are removed lazily on access, opportunistically on
    /// `register`, or explicitly via [`clear_expired`](Beacon::clear_expired).
    pub fn new() -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(State::new()),
                shutdown_tx,
            }),
        }
    }

    /// Creates a registry from a configuration
    ///
    /// If the configuration enables a sweep interval, a background task is
    /// spawned that periodically removes expired entries. The task holds
    /// only a weak reference and exits on its own once every handle to the
    /// registry has been dropped.
    ///
    /// # Panics
    ///
    /// Panics if a sweep interval is configured and no Tokio runtime is
    /// available to host the background task.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use beacon_core::{Beacon, BeaconConfig};
    /// use std::time::Duration;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let config = BeaconConfig::default()
    ///         .with_sweep_interval(Duration::from_secs(30));
    ///     let beacon: Beacon<String> = Beacon::with_config(config);
    /// }
    /// ```
    pub fn with_config(config: BeaconConfig) -> Self
    where
        V: Send + 'static,
    {
        let beacon = Self::new();

        if let Some(interval) = config.sweep_interval {
            // Fail loudly up front instead of with a cryptic panic from tokio::spawn.
            if tokio::runtime::Handle::try_current().is_err() {
                panic!(
                    "beacon_core::Beacon requires a Tokio runtime when a sweep \
                     interval is configured. Create the registry from code running \
                     on a Tokio runtime, or leave `sweep_interval` unset."
                );
            }

            let weak = Arc::downgrade(&beacon.inner);
            let shutdown_rx = beacon.inner.shutdown_tx.subscribe();
            tokio::spawn(Self::sweep_task(weak, interval, shutdown_rx));
        }

        beacon
    }

    /// Background task that periodically sweeps expired entries
    async fn sweep_task(
        inner: Weak<Inner<V>>,
        interval: Duration,
        mut shutdown_rx: watch::Receiver<bool>,
    ) where
        V: Send + 'static,
    {
        let mut ticker = tokio::time::interval(interval);
        // Skip the first immediate tick - we want to wait for the interval first
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let Some(inner) = inner.upgrade() else {
                        break;
                    };
                    let removed = inner.state.lock().sweep(Instant::now());
                    if removed > 0 {
                        tracing::debug!(removed, "background sweep removed expired entries");
                    }
                }
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                }
            }
        }
    }

    /// Builds the storage key for a key/namespace pair
    ///
    /// A supplied namespace (including the empty string) is prefixed with a
    /// `:` separator; without one the bare key is used as-is. A bare key
    /// that itself contains `:` can therefore collide with a namespaced
    /// entry (`"a:b"` vs `key="b"` under namespace `"a"`). That ambiguity
    /// is part of the contract; callers that need strict separation should
    /// keep `:` out of bare keys.
    fn storage_key(key: &str, namespace: Option<&str>) -> String {
        match namespace {
            Some(ns) => format!("{ns}:{key}"),
            None => key.to_string(),
        }
    }

    fn namespace_prefix(namespace: &str) -> String {
        format!("{namespace}:")
    }

    /// Registers a value under a key, optionally namespaced, with an optional TTL
    ///
    /// Overwrites any existing entry for the same key and namespace,
    /// including its TTL: re-registering without a TTL makes the entry
    /// permanent. A TTL of `None` means the entry never expires;
    /// `Duration::ZERO` makes it expired immediately (it occupies storage
    /// until swept but no read will ever return it).
    ///
    /// Every `register` also opportunistically sweeps all expired entries
    /// before inserting, inside the same critical section.
    ///
    /// Accepts any key, value, and namespace, including empty and
    /// non-ASCII strings. Never fails.
    pub fn register(&self, key: &str, value: V, namespace: Option<&str>, ttl: Option<Duration>) {
        let expires_at = ttl.map(|ttl| Instant::now() + ttl);
        let storage_key = Self::storage_key(key, namespace);

        let mut state = self.inner.state.lock();
        state.sweep(Instant::now());
        state.entries.insert(storage_key, Entry::new(value, expires_at));
    }

    /// Retrieves a value by key
    ///
    /// Returns `None` if the key is absent or expired; an expired entry is
    /// removed on discovery. This is the only read operation that updates
    /// the hit/miss counters: a live entry counts as a hit, anything else
    /// as a miss.
    ///
    /// The value is returned by clone. Store an `Arc<T>` when callers need
    /// to observe the same allocation.
    pub fn get(&self, key: &str, namespace: Option<&str>) -> Option<V>
    where
        V: Clone,
    {
        let storage_key = Self::storage_key(key, namespace);

        let mut state = self.inner.state.lock();
        let found = match state.entries.get(&storage_key) {
            Some(entry) if entry.is_expired() => {
                state.entries.remove(&storage_key);
                None
            }
            Some(entry) => Some(entry.value().clone()),
            None => None,
        };

        match found {
            Some(value) => {
                state.hits += 1;
                Some(value)
            }
            None => {
                state.misses += 1;
                None
            }
        }
    }

    /// Retrieves a value by key, falling back to a default
    ///
    /// Counts hits and misses exactly like [`get`](Beacon::get).
    pub fn get_or(&self, key: &str, namespace: Option<&str>, default: V) -> V
    where
        V: Clone,
    {
        self.get(key, namespace).unwrap_or(default)
    }

    /// Retrieves a value that must be present
    ///
    /// # Errors
    ///
    /// Returns [`BeaconError::KeyRequired`] naming the resolved storage key
    /// if the key is absent or expired. Counts hits and misses exactly like
    /// [`get`](Beacon::get).
    pub fn get_required(&self, key: &str, namespace: Option<&str>) -> Result<V, BeaconError>
    where
        V: Clone,
    {
        self.get(key, namespace).ok_or_else(|| BeaconError::KeyRequired {
            storage_key: Self::storage_key(key, namespace),
        })
    }

    /// Checks if a key exists and is not expired
    ///
    /// Expired entries are lazily removed when checked. Never updates the
    /// hit/miss counters.
    #[must_use]
    pub fn has(&self, key: &str, namespace: Option<&str>) -> bool {
        let storage_key = Self::storage_key(key, namespace);

        let mut state = self.inner.state.lock();
        match state.entries.get(&storage_key) {
            Some(entry) if entry.is_expired() => {
                state.entries.remove(&storage_key);
                false
            }
            Some(_) => true,
            None => false,
        }
    }

    /// Removes a key from the registry
    ///
    /// Returns `true` if an entry existed, expired or not. Does not affect
    /// statistics.
    #[must_use = "returns whether the key existed"]
    pub fn unregister(&self, key: &str, namespace: Option<&str>) -> bool {
        let storage_key = Self::storage_key(key, namespace);
        self.inner.state.lock().entries.remove(&storage_key).is_some()
    }

    /// Removes every entry from every namespace
    ///
    /// The hit/miss counters are left untouched; use
    /// [`reset_stats`](Beacon::reset_stats) to zero them.
    pub fn clear(&self) {
        let mut state = self.inner.state.lock();
        let removed = state.entries.len();
        state.entries.clear();
        tracing::debug!(removed, "cleared all beacon entries");
    }

    /// Removes every entry whose expiry has passed
    ///
    /// All entries are judged against the scan's start instant. Returns the
    /// count removed. Does not affect statistics, even though the removed
    /// entries would have counted as misses had they been read.
    pub fn clear_expired(&self) -> usize {
        self.inner.state.lock().sweep(Instant::now())
    }

    /// Lists the storage keys of all non-expired entries
    ///
    /// Keys are returned in their full storage form, so namespaced entries
    /// appear as `"namespace:key"`. With a namespace, only keys under that
    /// namespace are returned (still in full form). Expired entries are
    /// skipped but not removed; this is a pure read. Order is unspecified.
    pub fn list_keys(&self, namespace: Option<&str>) -> Vec<String> {
        let state = self.inner.state.lock();
        let now = Instant::now();

        match namespace {
            None => state
                .entries
                .iter()
                .filter(|(_, entry)| !entry.is_expired_at(now))
                .map(|(key, _)| key.clone())
                .collect(),
            Some(ns) => {
                let prefix = Self::namespace_prefix(ns);
                state
                    .entries
                    .iter()
                    .filter(|(key, entry)| key.starts_with(&prefix) && !entry.is_expired_at(now))
                    .map(|(key, _)| key.clone())
                    .collect()
            }
        }
    }

    /// Returns all non-expired entries under a namespace, keyed by bare key
    ///
    /// The namespace prefix is stripped from each key. Returns a fresh map;
    /// storage and statistics are untouched.
    pub fn get_namespace(&self, namespace: &str) -> HashMap<String, V>
    where
        V: Clone,
    {
        let prefix = Self::namespace_prefix(namespace);
        let state = self.inner.state.lock();
        let now = Instant::now();

        state
            .entries
            .iter()
            .filter(|(key, entry)| key.starts_with(&prefix) && !entry.is_expired_at(now))
            .map(|(key, entry)| (key[prefix.len()..].to_string(), entry.value().clone()))
            .collect()
    }

    /// Removes every entry under a namespace, expired or not
    ///
    /// Returns the count removed.
    pub fn clear_namespace(&self, namespace: &str) -> usize {
        let prefix = Self::namespace_prefix(namespace);

        let mut state = self.inner.state.lock();
        let before = state.entries.len();
        state.entries.retain(|key, _| !key.starts_with(&prefix));
        let removed = before - state.entries.len();

        if removed > 0 {
            tracing::debug!(namespace, removed, "cleared beacon namespace");
        }
        removed
    }

    /// Returns the current hit/miss counters and physical entry count
    pub fn stats(&self) -> Stats {
        let state = self.inner.state.lock();
        Stats {
            hits: state.hits,
            misses: state.misses,
            size: state.entries.len(),
        }
    }

    /// Zeroes the hit/miss counters without touching storage
    pub fn reset_stats(&self) {
        let mut state = self.inner.state.lock();
        state.hits = 0;
        state.misses = 0;
    }

    /// Returns the physical number of entries, including unswept expired ones
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.state.lock().entries.len()
    }

    /// Returns `true` if the registry holds no entries at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.state.lock().entries.is_empty()
    }

    /// Stops the background sweep task, if one is running
    ///
    /// Also happens automatically once every handle to the registry has
    /// been dropped. The registry itself remains fully usable afterwards;
    /// only the periodic sweep stops.
    pub fn shutdown(&self) {
        let _ = self.inner.shutdown_tx.send(true);
    }
}
