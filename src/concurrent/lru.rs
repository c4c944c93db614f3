//! Concurrent LRU Cache Implementation
//!
//! A thread-safe LRU cache using lock striping (segmented storage). This is
//! the multi-threaded counterpart to [`LruCache`](crate::LruCache).
//!
//! # How It Works
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                      ConcurrentLruCache                              │
//! │                                                                      │
//! │  hash(key) % N  ──▶  Segment Selection                               │
//! │                                                                      │
//! │  ┌──────────────┐ ┌──────────────┐     ┌──────────────┐              │
//! │  │  Segment 0   │ │  Segment 1   │ ... │  Segment N-1 │              │
//! │  │   Mutex<     │ │   Mutex<     │     │   Mutex<     │              │
//! │  │  LruSegment> │ │  LruSegment> │     │  LruSegment> │              │
//! │  └──────────────┘ └──────────────┘     └──────────────┘              │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The total capacity is split across segments so that the segment
//! capacities add up to exactly the configured capacity. The first
//! `capacity % N` segments hold one extra entry.
//!
//! ## Trade-offs
//!
//! Recency is tracked per segment, not globally. An entry can be evicted from
//! one segment while another segment still holds entries that were used less
//! recently in wall-clock time. Use `Mutex<LruCache>` when strict global LRU
//! order matters.

extern crate alloc;

use crate::config::ConcurrentLruCacheConfig;
use crate::error::{CacheError, Result};
use crate::lru::LruSegment;
use crate::metrics::{CacheMetrics, LruCacheMetrics};
use crate::value::Accumulate;
use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;
use log::debug;
use parking_lot::Mutex;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;

/// Splits `capacity` into `segments` shares that sum to `capacity`.
///
/// Callers guarantee `1 <= segments <= capacity`, so every share is at
/// least one.
fn segment_capacities(
    capacity: NonZeroUsize,
    segments: usize,
) -> impl Iterator<Item = NonZeroUsize> {
    let base = capacity.get() / segments;
    let extra = capacity.get() % segments;
    (0..segments).map(move |i| {
        let share = base + usize::from(i < extra);
        NonZeroUsize::new(share).unwrap_or(NonZeroUsize::MIN)
    })
}

fn validate(config: &ConcurrentLruCacheConfig) -> Result<()> {
    let capacity = config.capacity().get();
    if config.segments == 0 || config.segments > capacity {
        return Err(CacheError::InvalidSegmentCount {
            segments: config.segments,
            capacity,
        });
    }
    Ok(())
}

/// A thread-safe LRU cache with segmented storage.
///
/// Keys are partitioned across segments by hash; each segment is an
/// independent LRU behind its own `parking_lot::Mutex`. All operations take
/// `&self`, so the cache can be shared through an `Arc`.
///
/// # Example
///
/// ```
/// use forgetful::ConcurrentLruCache;
/// use std::num::NonZeroUsize;
/// use std::sync::Arc;
/// use std::thread;
///
/// let cache = Arc::new(ConcurrentLruCache::new(NonZeroUsize::new(1000).unwrap()));
///
/// let handles: Vec<_> = (0..4)
///     .map(|_| {
///         let cache = Arc::clone(&cache);
///         thread::spawn(move || {
///             for _ in 0..100 {
///                 cache.add("requests", 1u64).unwrap();
///             }
///         })
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap();
/// }
///
/// assert_eq!(cache.get(&"requests"), Some(400));
/// ```
pub struct ConcurrentLruCache<K, V, S = DefaultHashBuilder> {
    segments: Box<[Mutex<LruSegment<K, V, S>>]>,
    hash_builder: S,
}

impl<K, V> ConcurrentLruCache<K, V, DefaultHashBuilder>
where
    K: Hash + Eq + Clone + Send,
    V: Clone + Send,
{
    /// Creates a cache of `capacity` entries with a segment count derived
    /// from the available parallelism.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self::build(
            ConcurrentLruCacheConfig::new(capacity),
            DefaultHashBuilder::default(),
        )
    }

    /// Creates a cache with an explicit segment count.
    ///
    /// # Errors
    ///
    /// Fails when `capacity` is zero, or when `segments` is zero or larger
    /// than `capacity`.
    pub fn with_segments(capacity: usize, segments: usize) -> Result<Self> {
        let base = crate::config::LruCacheConfig::new(capacity)?;
        Self::init(ConcurrentLruCacheConfig { base, segments }, None)
    }

    /// Creates a cache from a configuration with an optional hasher.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidSegmentCount`] when the segment count is
    /// zero or exceeds the capacity.
    pub fn init(
        config: ConcurrentLruCacheConfig,
        hasher: Option<DefaultHashBuilder>,
    ) -> Result<Self> {
        Self::init_with_hasher(config, hasher.unwrap_or_default())
    }
}

impl<K, V, S> ConcurrentLruCache<K, V, S>
where
    K: Hash + Eq + Clone + Send,
    V: Clone + Send,
    S: BuildHasher + Clone + Send,
{
    /// Creates a cache with a custom hash builder, cloned into every segment.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidSegmentCount`] when the segment count is
    /// zero or exceeds the capacity.
    pub fn init_with_hasher(config: ConcurrentLruCacheConfig, hash_builder: S) -> Result<Self> {
        validate(&config)?;
        Ok(Self::build(config, hash_builder))
    }

    fn build(config: ConcurrentLruCacheConfig, hash_builder: S) -> Self {
        debug!(
            "creating concurrent LRU cache with capacity {} across {} segments",
            config.capacity(),
            config.segments
        );
        let segments: Vec<_> = segment_capacities(config.capacity(), config.segments)
            .map(|cap| Mutex::new(LruSegment::with_hasher(cap, hash_builder.clone())))
            .collect();

        Self {
            segments: segments.into_boxed_slice(),
            hash_builder,
        }
    }

    #[inline]
    fn segment<Q>(&self, key: &Q) -> &Mutex<LruSegment<K, V, S>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash,
    {
        let idx = (self.hash_builder.hash_one(key) as usize) % self.segments.len();
        &self.segments[idx]
    }

    /// Returns the total capacity across all segments.
    pub fn capacity(&self) -> usize {
        self.segments.iter().map(|s| s.lock().cap().get()).sum()
    }

    /// Returns the number of segments in the cache.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Returns the total number of entries across all segments.
    ///
    /// Segments are locked one after another, so the result may be stale
    /// while other threads are writing.
    pub fn len(&self) -> usize {
        self.segments.iter().map(|s| s.lock().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.iter().all(|s| s.lock().is_empty())
    }

    /// Returns a clone of the value and marks it most recently used within
    /// its segment.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment(key).lock().lookup(key, true).cloned()
    }

    /// Returns a clone of the value, or `default` when absent.
    pub fn get_or<Q>(&self, key: &Q, default: V) -> V
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get(key).unwrap_or(default)
    }

    /// Applies `f` to the value while the segment lock is held, avoiding a
    /// clone. Marks the entry most recently used.
    pub fn get_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&V) -> R,
    {
        self.segment(key).lock().lookup(key, true).map(f)
    }

    /// Returns a clone of the value without changing its recency.
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment(key).lock().peek(key).cloned()
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment(key).lock().contains_key(key)
    }

    /// Stores `value` under `key`, evicting within the key's segment if it
    /// overflows.
    pub fn set(&self, key: K, value: V) {
        self.segment(&key).lock().put(key, value);
    }

    /// Adds `delta` to the value under `key` (starting from `V::default()`)
    /// as one atomic step and returns the new value.
    ///
    /// # Errors
    ///
    /// Fails if the stored value and `delta` cannot be combined; the cache is
    /// left unchanged.
    pub fn add(&self, key: K, delta: V) -> Result<V>
    where
        V: Accumulate + Default,
    {
        self.segment(&key).lock().add(key, delta, V::default())
    }

    /// Like [`add`](Self::add), with an explicit starting value.
    ///
    /// # Errors
    ///
    /// Fails if the stored value (or `default`) and `delta` cannot be combined.
    pub fn add_or(&self, key: K, delta: V, default: V) -> Result<V>
    where
        V: Accumulate,
    {
        self.segment(&key).lock().add(key, delta, default)
    }

    /// Removes `key`, returning its value.
    pub fn delete<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment(key).lock().remove(key)
    }

    /// Removes `key`, discarding its value.
    pub fn forget<Q>(&self, key: &Q)
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment(key).lock().remove(key);
    }

    /// Removes every entry from every segment.
    pub fn clear(&self) {
        for segment in self.segments.iter() {
            segment.lock().clear();
        }
    }

    fn merged_metrics(&self) -> LruCacheMetrics {
        let mut merged = LruCacheMetrics::default();
        for segment in self.segments.iter() {
            merged.merge(segment.lock().metrics());
        }
        merged
    }
}

impl<K, V, S> CacheMetrics for ConcurrentLruCache<K, V, S>
where
    K: Hash + Eq + Clone + Send,
    V: Clone + Send,
    S: BuildHasher + Clone + Send,
{
    fn metrics(&self) -> BTreeMap<String, f64> {
        // Merge the raw counters first so rates are computed over the whole cache.
        self.merged_metrics().to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "ConcurrentLRU"
    }
}

impl<K, V, S> fmt::Debug for ConcurrentLruCache<K, V, S>
where
    K: Hash + Eq + Clone + Send,
    V: Clone + Send,
    S: BuildHasher + Clone + Send,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcurrentLruCache")
            .field("segment_count", &self.segments.len())
            .field("capacity", &self.capacity())
            .field("total_len", &self.len())
            .finish()
    }
}
