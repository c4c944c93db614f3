//! Configuration for the concurrent Least Recently Used (LRU) cache.
//!
//! # Examples
//!
//! ```
//! use forgetful::config::{ConcurrentLruCacheConfig, LruCacheConfig};
//! use forgetful::ConcurrentLruCache;
//!
//! let config = ConcurrentLruCacheConfig {
//!     base: LruCacheConfig::new(10_000).unwrap(),
//!     segments: 16,
//! };
//! let cache: ConcurrentLruCache<String, i64> = ConcurrentLruCache::init(config, None).unwrap();
//! assert_eq!(cache.capacity(), 10_000);
//! ```

extern crate std;

use super::LruCacheConfig;
use core::fmt;
use core::num::NonZeroUsize;

/// Returns the default number of segments based on available parallelism.
fn default_segment_count() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(16)
        .clamp(4, 64)
}

/// Configuration for a concurrent LRU cache with segmented storage.
///
/// # Fields
///
/// - `base`: Total capacity shared by all segments.
/// - `segments`: Number of independently locked segments. Must be at least 1
///   and at most the total capacity.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ConcurrentLruCacheConfig {
    /// Base configuration (total capacity across all segments)
    pub base: LruCacheConfig,
    /// Number of segments for sharding (more segments = less contention)
    pub segments: usize,
}

impl ConcurrentLruCacheConfig {
    /// Creates a configuration with a segment count derived from the number
    /// of available CPUs, never exceeding `capacity`.
    #[must_use]
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            base: LruCacheConfig { capacity },
            segments: default_segment_count().min(capacity.get()),
        }
    }

    /// Returns the total capacity across all segments.
    #[inline]
    pub fn capacity(&self) -> NonZeroUsize {
        self.base.capacity
    }
}

impl fmt::Debug for ConcurrentLruCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcurrentLruCacheConfig")
            .field("capacity", &self.base.capacity)
            .field("segments", &self.segments)
            .finish()
    }
}
