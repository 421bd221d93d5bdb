use std::time::Duration;

/// Configuration for a registry's optional background sweep task
///
/// # Example
///
/// ```rust
/// use beacon_core::BeaconConfig;
/// use std::time::Duration;
///
/// let config = BeaconConfig::default()
///     .with_sweep_interval(Duration::from_secs(30));
/// ```
#[derive(Debug, Clone, Default)]
pub struct BeaconConfig {
    /// Interval between background sweeps of expired entries.
    /// `None` (the default) disables the background task entirely;
    /// expired entries are then removed lazily on access or explicitly
    /// via `clear_expired`.
    pub sweep_interval: Option<Duration>,
}

impl BeaconConfig {
    /// Creates a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables the background sweep task and sets its interval
    ///
    /// A registry built with a sweep interval must be created inside a
    /// Tokio runtime, which hosts the background task.
    ///
    /// # Arguments
    ///
    /// * `interval` - The duration between sweep runs
    ///
    /// # Example
    ///
    /// ```rust
    /// use beacon_core::BeaconConfig;
    /// use std::time::Duration;
    ///
    /// // Sweep expired entries every 30 seconds
    /// let config = BeaconConfig::default()
    ///     .with_sweep_interval(Duration::from_secs(30));
    /// ```
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = Some(interval);
        self
    }
}
