//! Cache Configuration Module
//!
//! The cache has a single tuning knob: how many entries it may hold at once.
//! Capacity is counted in entries, never in bytes, and is fixed for the
//! lifetime of a cache instance.
//!
//! Configuration structs have public fields for simple instantiation. Where a
//! raw integer has to be validated (for example a value read from a command
//! line or a config file), use the fallible constructors, which reject zero
//! with [`CacheError::ZeroCapacity`](crate::CacheError::ZeroCapacity).
//!
//! | Config | Cache |
//! |--------|-------|
//! | `LruCacheConfig` | [`LruCache`](crate::LruCache) |
//! | `ConcurrentLruCacheConfig` | `ConcurrentLruCache` (requires `concurrent` feature) |
//!
//! # Examples
//!
//! ```
//! use forgetful::config::LruCacheConfig;
//! use forgetful::LruCache;
//!
//! let config = LruCacheConfig::new(10_000).unwrap();
//! let cache: LruCache<String, i64> = LruCache::init(config, None);
//! assert_eq!(cache.cap().get(), 10_000);
//!
//! // The default mirrors a typical deployment: 1000 entries.
//! assert_eq!(LruCacheConfig::default().capacity.get(), 1000);
//! ```

pub mod lru;

#[cfg(feature = "concurrent")]
pub mod concurrent_lru;

pub use lru::{LruCacheConfig, DEFAULT_MAX_ELEMENTS};

#[cfg(feature = "concurrent")]
pub use concurrent_lru::ConcurrentLruCacheConfig;
