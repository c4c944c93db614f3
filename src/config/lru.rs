//! Configuration for the Least Recently Used (LRU) cache.

use crate::error::{CacheError, Result};
use core::fmt;
use core::num::NonZeroUsize;

/// Capacity used by [`LruCacheConfig::default`].
pub const DEFAULT_MAX_ELEMENTS: usize = 1000;

/// Configuration for an LRU (Least Recently Used) cache.
///
/// # Fields
///
/// - `capacity`: Maximum number of entries the cache can hold. Inserting
///   beyond it evicts the least recently used entries.
///
/// # Examples
///
/// ```
/// use forgetful::config::LruCacheConfig;
/// use forgetful::{CacheError, LruCache};
/// use core::num::NonZeroUsize;
///
/// let config = LruCacheConfig {
///     capacity: NonZeroUsize::new(500).unwrap(),
/// };
/// let cache: LruCache<&str, i32> = LruCache::init(config, None);
/// assert_eq!(cache.cap().get(), 500);
///
/// assert_eq!(LruCacheConfig::new(0).unwrap_err(), CacheError::ZeroCapacity);
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LruCacheConfig {
    /// Maximum number of key-value pairs the cache can hold.
    pub capacity: NonZeroUsize,
}

impl LruCacheConfig {
    /// Validates `max_elements` and builds a config from it.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ZeroCapacity`] when `max_elements` is zero.
    pub fn new(max_elements: usize) -> Result<Self> {
        let capacity = NonZeroUsize::new(max_elements).ok_or(CacheError::ZeroCapacity)?;
        Ok(Self { capacity })
    }
}

impl Default for LruCacheConfig {
    fn default() -> Self {
        Self {
            capacity: NonZeroUsize::MIN.saturating_add(DEFAULT_MAX_ELEMENTS - 1),
        }
    }
}

impl fmt::Debug for LruCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}
