//! Provide the memoization store used for resolved metadata.
//!
//! ## Menu
//!
//! - [`MetadataCache`]: the `get_or_compute` interface the engine consumes.
//! - [`UnboundedCache`]: entries live as long as the cache.
//! - [`ExpiringCache`]: entries expire after a period without access,
//!   optionally bounded with least-recently-used eviction.
//! - [`CachePolicy`]: a serializable choice between the two.

// -----------------------------------------------------------------------------
// Modules

mod expiring;
mod policy;
mod unbounded;

// -----------------------------------------------------------------------------
// Exports

pub use expiring::ExpiringCache;
pub use policy::CachePolicy;
pub use unbounded::UnboundedCache;

use crate::error::BeanError;

// -----------------------------------------------------------------------------
// MetadataCache

/// A concurrent memoized `key -> value` store.
///
/// At most one value is stored per key. The loader runs without holding
/// any lock, so two callers racing on the same key may both compute a
/// value; the first one stored wins and both receive it. Loader errors
/// are returned as is and nothing is stored.
pub trait MetadataCache<K, V>: Send + Sync {
    /// Returns the cached value for `key`, computing it with `loader` on a miss.
    fn get_or_compute(
        &self,
        key: K,
        loader: &mut dyn FnMut(&K) -> Result<V, BeanError>,
    ) -> Result<V, BeanError>;

    /// The number of stored entries.
    fn len(&self) -> usize;

    /// Drops every entry.
    fn clear(&self);
}
