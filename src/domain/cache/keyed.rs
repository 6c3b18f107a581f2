//! The "has a cache key" capability

use std::sync::Arc;

use super::CacheKey;

/// Implemented by computations that carry an explicit cache identity.
///
/// This identity is independent of the computation's own `PartialEq`/`Hash`;
/// caches index results by [`CacheKeyFilter::cache_key`], while collections
/// that deduplicate computations use the computation's native equality.
pub trait CacheKeyFilter {
    /// Returns the key attached to this computation
    fn cache_key(&self) -> &CacheKey;
}

impl<T: CacheKeyFilter + ?Sized> CacheKeyFilter for &T {
    fn cache_key(&self) -> &CacheKey {
        (**self).cache_key()
    }
}

impl<T: CacheKeyFilter + ?Sized> CacheKeyFilter for Box<T> {
    fn cache_key(&self) -> &CacheKey {
        (**self).cache_key()
    }
}

impl<T: CacheKeyFilter + ?Sized> CacheKeyFilter for Arc<T> {
    fn cache_key(&self) -> &CacheKey {
        (**self).cache_key()
    }
}
