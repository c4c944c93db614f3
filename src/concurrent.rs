//! Concurrent Cache Implementations
//!
//! Thread-safe caches built from the same segment type as the
//! single-threaded ones, one `parking_lot::Mutex` per segment.
//!
//! # Architecture
//!
//! - The key space is partitioned across segments by hash.
//! - Each segment is protected by its own lock.
//! - Operations only lock the segment owning their key, so different keys
//!   can be used in parallel.
//!
//! ## Why Mutex Instead of RwLock?
//!
//! An LRU read is a write: `get` moves the entry to the most recently used
//! position. Every access therefore needs exclusive access to its segment,
//! and an `RwLock` would only add bookkeeping.
//!
//! `add` runs entirely under the segment lock, so concurrent counters never
//! lose updates.
//!
//! # Example
//!
//! ```
//! use forgetful::concurrent::ConcurrentLruCache;
//!
//! let cache = ConcurrentLruCache::with_segments(1000, 8).unwrap();
//! cache.set("key", 42);
//! assert_eq!(cache.get(&"key"), Some(42));
//! assert_eq!(cache.segment_count(), 8);
//! ```

mod lru;

pub use self::lru::ConcurrentLruCache;
