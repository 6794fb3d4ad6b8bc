//! Atomic snapshot publication for configuration reload.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::resolver::engine::Resolver;

/// Shared handle over the current resolver snapshot.
///
/// Readers `load()` an immutable snapshot and keep using it for the whole
/// resolution; the reload path `store()`s a fully built replacement. No
/// reader ever observes a partially updated table, and no locking is needed
/// beyond the swap itself.
#[derive(Debug)]
pub struct SharedResolver {
    inner: ArcSwap<Resolver>,
}

impl SharedResolver {
    pub fn new(resolver: Resolver) -> Self {
        Self {
            inner: ArcSwap::from_pointee(resolver),
        }
    }

    /// The current snapshot. Cheap; safe to call per request.
    pub fn load(&self) -> Arc<Resolver> {
        self.inner.load_full()
    }

    /// Publish a new snapshot. In-flight resolutions finish on the old one.
    pub fn store(&self, resolver: Resolver) {
        self.inner.store(Arc::new(resolver));
    }
}
