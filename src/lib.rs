#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Operations
//!
//! | Operation | Recency | Notes |
//! |-----------|---------|-------|
//! | [`LruCache::get`] | promotes on hit | `None` on miss |
//! | [`LruCache::get_or`] | promotes on hit | returns the default on miss |
//! | [`LruCache::get_with_touch`] | caller decides | |
//! | [`LruCache::peek`] | unchanged | not counted in metrics |
//! | [`LruCache::set`] | promotes | may evict |
//! | [`LruCache::add`] / [`LruCache::add_or`] | promotes on write | read does not promote |
//! | [`LruCache::delete`] / [`LruCache::forget`] | n/a | absent keys are a no-op |
//! | [`LruCache::len`] | unchanged | never exceeds `cap` |
//!
//! ## Eviction
//!
//! ```rust
//! use forgetful::LruCache;
//! use forgetful::config::LruCacheConfig;
//!
//! let mut cache = LruCache::init(LruCacheConfig::new(3).unwrap(), None);
//! for (key, value) in [("a", 1), ("b", 2), ("c", 3)] {
//!     cache.set(key, value);
//! }
//!
//! // "a" is read, so "b" becomes the least recently used entry.
//! cache.get(&"a");
//! cache.set("d", 4);
//!
//! let order: Vec<_> = cache.iter().map(|(k, _)| *k).collect();
//! assert_eq!(order, ["c", "a", "d"]);
//! ```
//!
//! ## Dynamic Values
//!
//! [`Value`] lets one cache hold payloads of different kinds, including an
//! explicit `Nil` that is distinct from a miss:
//!
//! ```rust
//! use forgetful::{CacheError, LruCache, Value};
//!
//! let mut cache: LruCache<String, Value> = LruCache::try_new(100).unwrap();
//! cache.set("user".to_string(), Value::from("ada"));
//! cache.set("tombstone".to_string(), Value::Nil);
//!
//! assert_eq!(cache.get("tombstone"), Some(&Value::Nil));
//! assert_eq!(cache.get("absent"), None);
//!
//! assert_eq!(cache.add("visits".to_string(), Value::Int(1)), Ok(Value::Int(1)));
//! assert!(matches!(
//!     cache.add("user".to_string(), Value::Int(1)),
//!     Err(CacheError::IncompatibleTypes { .. })
//! ));
//! ```
//!
//! ## Modules
//!
//! - [`lru`]: the cache engine
//! - [`value`]: the [`Accumulate`] trait and the dynamic [`Value`] payload
//! - [`config`]: configuration structures
//! - [`metrics`]: passive usage counters
//! - [`error`]: the crate error type
//! - `concurrent`: segmented thread-safe cache (requires the `concurrent` feature)

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

#[cfg(test)]
extern crate scoped_threadpool;

/// Error type returned by fallible cache operations.
pub mod error;

/// Arena-backed doubly linked list used as the recency order.
///
/// Internal infrastructure: entries are addressed by slot index, and every
/// cache operation keeps it in lock step with the key index.
pub(crate) mod list;

/// Values that can be accumulated by `add`, plus a dynamic payload type.
pub mod value;

/// Cache configuration structures.
pub mod config;

/// Least Recently Used (LRU) cache implementation.
///
/// Provides a fixed-capacity cache that evicts the least recently used
/// entries once the capacity is exceeded.
pub mod lru;

/// Cache metrics system.
///
/// Passive counters reported through the [`metrics::CacheMetrics`] trait.
pub mod metrics;

/// Concurrent cache implementations.
///
/// Thread-safe variant of the LRU cache using segmented storage. Each segment
/// is protected by its own lock.
///
/// Available when the `concurrent` feature is enabled.
#[cfg(feature = "concurrent")]
pub mod concurrent;

pub use error::{CacheError, Result};
pub use lru::LruCache;
pub use metrics::CacheMetrics;
pub use value::{Accumulate, Value};

#[cfg(feature = "concurrent")]
pub use concurrent::ConcurrentLruCache;
