use std::time::Instant;

/// Represents a stored value with its optional expiration time
///
/// An entry with no expiration time never expires. An entry whose
/// expiration time has passed is treated as absent by every read
/// operation, even before it has been physically removed.
#[derive(Debug, Clone)]
pub struct Entry<V> {
    value: V,
    expires_at: Option<Instant>,
}

impl<V> Entry<V> {
    /// Creates a new entry with the given value and optional expiration time
    pub fn new(value: V, expires_at: Option<Instant>) -> Self {
        Self { value, expires_at }
    }

    /// Returns a reference to the stored value
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Returns the expiration time, if any
    pub fn expires_at(&self) -> Option<Instant> {
        self.expires_at
    }

    /// Checks if this entry has expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Checks expiry against a caller-supplied instant, so a full-table
    /// sweep evaluates every entry against the same point in time.
    pub(crate) fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(deadline) => now >= deadline,
            None => false,
        }
    }
}
