//! Least Recently Used (LRU) Cache Implementation
//!
//! A fixed-capacity key-value cache that forgets the entries it has not seen
//! for the longest time once it is full.
//!
//! # Algorithm
//!
//! Two structures are kept in lock step:
//!
//! - an **index** (`HashMap<K, Index>`) mapping every key to the arena slot of
//!   its entry, and
//! - a **recency list** threading all live entries from least recently used
//!   (front) to most recently used (back).
//!
//! Writing a key, or reading it with promotion, moves its entry to the back.
//! After every write the cache drops entries from the front until the entry
//! count is back within capacity.
//!
//! ```text
//!   index: { "a" -> 2, "b" -> 0, "c" -> 1 }
//!
//!   recency list (front = next to evict):
//!
//!   head                                 tail
//!    [0] "b" <-> [1] "c" <-> [2] "a"
//!     LRU                       MRU
//! ```
//!
//! # Performance Characteristics
//!
//! - **Time Complexity**: get, set, delete, add and eviction are all O(1)
//!   (amortized, average case for the hash index).
//! - **Space Complexity**: O(n) for n live entries. Keys are stored twice
//!   (index and list), so `K: Clone` is required for writes.
//!
//! # Thread Safety
//!
//! `LruCache` is not synchronized. Wrap it in a `Mutex`, or enable the
//! `concurrent` feature for a segmented, thread-safe variant.

extern crate alloc;

use crate::config::LruCacheConfig;
use crate::error::Result;
use crate::list::{self, Index, List};
use crate::metrics::{CacheMetrics, LruCacheMetrics};
use crate::value::Accumulate;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;
use log::{debug, trace};

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
extern crate std;
#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Upper bound on the slots reserved up front; larger caches grow on demand.
const MAX_PREALLOCATED_ENTRIES: usize = 1 << 16;

/// Internal LRU segment containing the actual cache algorithm.
///
/// Shared between `LruCache` (single-threaded) and `ConcurrentLruCache`
/// (one segment per lock), so the algorithm lives in exactly one place.
///
/// The map stores list handles, never entries, so every key has exactly one
/// entry and the entry count is simply the list length.
pub(crate) struct LruSegment<K, V, S = DefaultHashBuilder> {
    config: LruCacheConfig,
    list: List<(K, V)>,
    map: HashMap<K, Index, S>,
    metrics: LruCacheMetrics,
}

impl<K: Hash + Eq, V, S: BuildHasher> LruSegment<K, V, S> {
    pub(crate) fn with_hasher(cap: NonZeroUsize, hash_builder: S) -> Self {
        let reserved = cap.get().min(MAX_PREALLOCATED_ENTRIES);
        debug!("creating LRU segment with capacity {}", cap);
        LruSegment {
            config: LruCacheConfig { capacity: cap },
            list: List::with_capacity(reserved),
            map: HashMap::with_capacity_and_hasher(reserved, hash_builder),
            metrics: LruCacheMetrics::default(),
        }
    }

    #[inline]
    pub(crate) fn cap(&self) -> NonZeroUsize {
        self.config.capacity
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    #[inline]
    pub(crate) fn metrics(&self) -> &LruCacheMetrics {
        &self.metrics
    }

    #[inline]
    fn index_of<Q>(&self, key: &Q) -> Option<Index>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.get(key).copied()
    }

    /// Makes the entry at `idx` the most recently used one.
    fn touch(&mut self, idx: Index) {
        if self.list.tail() == Some(idx) {
            return;
        }
        if self.list.move_to_back(idx) {
            self.metrics.record_promotion();
        }
    }

    /// Looks a key up, promoting it when `touch` is set.
    pub(crate) fn lookup<Q>(&mut self, key: &Q, touch: bool) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let Some(idx) = self.index_of(key) else {
            self.metrics.core.record_miss();
            return None;
        };
        self.metrics.core.record_hit();
        if touch {
            self.touch(idx);
        }
        self.list.get(idx).map(|(_, v)| v)
    }

    pub(crate) fn lookup_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let Some(idx) = self.index_of(key) else {
            self.metrics.core.record_miss();
            return None;
        };
        self.metrics.core.record_hit();
        self.touch(idx);
        self.list.get_mut(idx).map(|(_, v)| v)
    }

    /// Reads a value without promoting it or counting the lookup.
    pub(crate) fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = self.index_of(key)?;
        self.list.get(idx).map(|(_, v)| v)
    }

    #[inline]
    pub(crate) fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(key)
    }

    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = self.map.remove(key)?;
        let (_, value) = self.list.remove(idx)?;
        self.metrics.core.record_removal();
        Some(value)
    }

    pub(crate) fn peek_lru(&self) -> Option<(&K, &V)> {
        let idx = self.list.head()?;
        self.list.get(idx).map(|(k, v)| (k, v))
    }

    pub(crate) fn peek_mru(&self) -> Option<(&K, &V)> {
        let idx = self.list.tail()?;
        self.list.get(idx).map(|(k, v)| (k, v))
    }

    pub(crate) fn iter(&self) -> list::Iter<'_, (K, V)> {
        self.list.iter()
    }

    pub(crate) fn clear(&mut self) {
        debug!("clearing LRU segment holding {} entries", self.list.len());
        self.map.clear();
        self.list.clear();
    }

    /// Drops least recently used entries until the count fits the capacity.
    fn evict_overflow(&mut self) {
        while self.list.len() > self.cap().get() {
            let Some((key, _)) = self.list.pop_front() else {
                break;
            };
            self.map.remove(&key);
            self.metrics.core.record_eviction();
            trace!(
                "evicted least recently used entry ({} of {} slots in use)",
                self.list.len(),
                self.cap()
            );
        }
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> LruSegment<K, V, S> {
    /// Inserts or replaces a value and makes it the most recently used entry.
    pub(crate) fn put(&mut self, key: K, value: V) {
        match self.index_of(&key) {
            Some(idx) => {
                if let Some((_, slot)) = self.list.get_mut(idx) {
                    *slot = value;
                }
                self.touch(idx);
                self.metrics.core.record_update();
            }
            None => {
                let idx = self.list.push_back((key.clone(), value));
                self.map.insert(key, idx);
                self.metrics.core.record_insertion();
            }
        }
        self.evict_overflow();
    }

    /// Adds `delta` to the stored value (or to `default` when the key is
    /// absent) and stores the sum.
    ///
    /// The read does not promote the entry; the write does. On error the
    /// cache is left unchanged.
    pub(crate) fn add(&mut self, key: K, delta: V, default: V) -> Result<V>
    where
        V: Accumulate + Clone,
    {
        let sum = match self.lookup(&key, false) {
            Some(current) => current.accumulate(&delta),
            None => default.accumulate(&delta),
        };
        match sum {
            Ok(sum) => {
                self.put(key, sum.clone());
                Ok(sum)
            }
            Err(err) => {
                self.metrics.record_rejected_add();
                debug!("rejected add: {}", err);
                Err(err)
            }
        }
    }
}

impl<K, V, S> fmt::Debug for LruSegment<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruSegment")
            .field("capacity", &self.config.capacity)
            .field("len", &self.list.len())
            .finish()
    }
}

/// A fixed-capacity cache that evicts its least recently used entries.
///
/// Writing a key (`set`, `add`) or reading it with [`get`](Self::get) marks it
/// as most recently used. Once more than `cap` entries are stored, the least
/// recently used ones are dropped silently.
///
/// # Examples
///
/// ```
/// use forgetful::LruCache;
/// use core::num::NonZeroUsize;
///
/// let mut cache = LruCache::new(NonZeroUsize::new(2).unwrap());
///
/// cache.set("a", 1);
/// cache.set("b", 2);
///
/// // Reading "a" makes it the most recently used entry...
/// assert_eq!(cache.get(&"a"), Some(&1));
///
/// // ...so "b" is the one forgotten when "c" arrives.
/// cache.set("c", 3);
/// assert_eq!(cache.get(&"b"), None);
/// assert_eq!(cache.get(&"a"), Some(&1));
/// assert_eq!(cache.get(&"c"), Some(&3));
/// assert_eq!(cache.len(), 2);
/// ```
///
/// Counters:
///
/// ```
/// use forgetful::LruCache;
///
/// let mut hits: LruCache<&str, u64> = LruCache::try_new(100).unwrap();
/// assert_eq!(hits.add("/index.html", 5), Ok(5));
/// assert_eq!(hits.add("/index.html", 3), Ok(8));
/// assert_eq!(hits.peek(&"/index.html"), Some(&8));
/// ```
pub struct LruCache<K, V, S = DefaultHashBuilder> {
    segment: LruSegment<K, V, S>,
}

impl<K: Hash + Eq, V, S: BuildHasher> LruCache<K, V, S> {
    /// Creates a new LRU cache with the specified capacity and hash builder.
    pub fn with_hasher(cap: NonZeroUsize, hash_builder: S) -> Self {
        Self {
            segment: LruSegment::with_hasher(cap, hash_builder),
        }
    }

    /// Maximum number of entries the cache holds.
    #[inline]
    pub fn cap(&self) -> NonZeroUsize {
        self.segment.cap()
    }

    /// Number of live entries. Never exceeds [`cap`](Self::cap).
    #[inline]
    pub fn len(&self) -> usize {
        self.segment.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segment.is_empty()
    }

    /// Returns the value for `key` and marks it most recently used.
    #[inline]
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.lookup(key, true)
    }

    /// Returns the value for `key`, promoting it only when `touch` is set.
    ///
    /// Unlike [`peek`](Self::peek), the lookup is counted in the metrics.
    #[inline]
    pub fn get_with_touch<Q>(&mut self, key: &Q, touch: bool) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.lookup(key, touch)
    }

    /// Returns a clone of the value for `key`, or `default` when absent.
    ///
    /// A hit marks the key most recently used; a miss has no side effects
    /// besides the metrics.
    pub fn get_or<Q>(&mut self, key: &Q, default: V) -> V
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        self.segment.lookup(key, true).cloned().unwrap_or(default)
    }

    /// Returns a mutable reference to the value and marks it most recently used.
    #[inline]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.lookup_mut(key)
    }

    /// Returns the value for `key` without changing its recency.
    #[inline]
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.peek(key)
    }

    /// Returns `true` if `key` is cached. Does not change its recency.
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.contains_key(key)
    }

    /// Removes `key`, returning its value. Removing an absent key is a no-op
    /// that returns `None`.
    #[inline]
    pub fn delete<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.remove(key)
    }

    /// Removes `key`, discarding its value. Absent keys are ignored.
    #[inline]
    pub fn forget<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.remove(key);
    }

    /// The entry that would be evicted next, if any.
    #[inline]
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.segment.peek_lru()
    }

    /// The most recently used entry, if any.
    #[inline]
    pub fn peek_mru(&self) -> Option<(&K, &V)> {
        self.segment.peek_mru()
    }

    /// Iterates from the least to the most recently used entry without
    /// changing recency.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.segment.iter(),
        }
    }

    /// Removes every entry.
    #[inline]
    pub fn clear(&mut self) {
        self.segment.clear()
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> LruCache<K, V, S> {
    /// Stores `value` under `key` and marks it most recently used.
    ///
    /// If the cache grows beyond capacity the least recently used entries
    /// are evicted.
    #[inline]
    pub fn set(&mut self, key: K, value: V) {
        self.segment.put(key, value)
    }

    /// Adds `delta` to the value stored under `key`, starting from
    /// `V::default()` when the key is absent, and returns the new value.
    ///
    /// Reading the old value does not promote the entry; storing the new one
    /// does.
    ///
    /// # Errors
    ///
    /// Fails if the stored value and `delta` cannot be combined (see
    /// [`Accumulate`]). The cache is left unchanged in that case.
    #[inline]
    pub fn add(&mut self, key: K, delta: V) -> Result<V>
    where
        V: Accumulate + Clone + Default,
    {
        self.segment.add(key, delta, V::default())
    }

    /// Like [`add`](Self::add), with an explicit starting value for absent keys.
    ///
    /// # Errors
    ///
    /// Fails if the stored value (or `default`) and `delta` cannot be combined.
    #[inline]
    pub fn add_or(&mut self, key: K, delta: V, default: V) -> Result<V>
    where
        V: Accumulate + Clone,
    {
        self.segment.add(key, delta, default)
    }
}

impl<K: Hash + Eq, V> LruCache<K, V> {
    /// Creates a cache holding at most `cap` entries.
    pub fn new(cap: NonZeroUsize) -> LruCache<K, V, DefaultHashBuilder> {
        LruCache::with_hasher(cap, DefaultHashBuilder::default())
    }

    /// Creates a cache from an unchecked entry count.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ZeroCapacity`](crate::CacheError::ZeroCapacity)
    /// when `max_elements` is zero.
    pub fn try_new(max_elements: usize) -> Result<Self> {
        let config = LruCacheConfig::new(max_elements)?;
        Ok(Self::init(config, None))
    }

    /// Creates a cache from a configuration with an optional hasher.
    pub fn init(config: LruCacheConfig, hasher: Option<DefaultHashBuilder>) -> Self {
        LruCache::with_hasher(config.capacity, hasher.unwrap_or_default())
    }
}

impl<K: Hash + Eq, V> Default for LruCache<K, V> {
    fn default() -> Self {
        Self::init(LruCacheConfig::default(), None)
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> Extend<(K, V)> for LruCache<K, V, S> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> CacheMetrics for LruCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.segment.metrics().metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.segment.metrics().algorithm_name()
    }
}

impl<K, V, S> fmt::Debug for LruCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("segment", &self.segment)
            .finish()
    }
}

/// Iterator over cache entries, from least to most recently used.
pub struct Iter<'a, K, V> {
    inner: list::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.inner.len())
            .finish()
    }
}

impl<'a, K: Hash + Eq, V, S: BuildHasher> IntoIterator for &'a LruCache<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
