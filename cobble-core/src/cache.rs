//! Shared block cache handle
//!
//! The block cache is owned jointly by every `Options` (and engine
//! component) holding a `Cache`. Cloning a handle takes a reference,
//! dropping it gives the reference back; the cache is freed when the last
//! handle goes away.

use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Reference-counted handle to the block cache
#[derive(Clone)]
pub struct Cache {
    shared: Arc<Shared>,
}

struct Shared {
    capacity: u64,
}

impl Drop for Shared {
    fn drop(&mut self) {
        trace!(capacity = self.capacity, "block cache released");
    }
}

impl Cache {
    /// Create a cache of `capacity` bytes; the caller holds the only reference
    pub fn new(capacity: u64) -> Self {
        trace!(capacity, "block cache acquired");
        Self {
            shared: Arc::new(Shared { capacity }),
        }
    }

    /// Capacity in bytes
    pub fn capacity(&self) -> u64 {
        self.shared.capacity
    }

    /// Number of live handles to this cache
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.shared)
    }

    /// Check if two handles refer to the same cache
    pub fn ptr_eq(&self, other: &Cache) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }

    /// Give this reference back. Equivalent to dropping the handle.
    pub fn release(self) {}
}

impl fmt::Debug for Cache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("capacity", &self.capacity())
            .field("refs", &self.ref_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_counting() {
        let cache = Cache::new(1 << 20);
        assert_eq!(cache.capacity(), 1 << 20);
        assert_eq!(cache.ref_count(), 1);

        let other = cache.clone();
        assert!(cache.ptr_eq(&other));
        assert_eq!(cache.ref_count(), 2);

        other.release();
        assert_eq!(cache.ref_count(), 1);
    }

    #[test]
    fn test_distinct_caches() {
        let a = Cache::new(10);
        let b = Cache::new(10);
        assert!(!a.ptr_eq(&b));
    }
}
