//! Correctness Tests for the LRU Cache
//!
//! Validates eviction order and the read/write contract of `LruCache` using
//! small caches and explicit access patterns. Each scenario checks which key
//! is gone after the write that overflows the cache.
//!
//! ## Test Strategy
//! - Small cache sizes (1-5 entries) for predictable behavior
//! - Explicit checks for which key was evicted after each set
//! - A seeded random workload replayed against a simple reference model

use forgetful::config::LruCacheConfig;
use forgetful::{CacheError, CacheMetrics, LruCache, Value};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use std::num::NonZeroUsize;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Helper to create an LruCache with the given capacity
fn make_lru<K: std::hash::Hash + Eq + Clone, V>(cap: usize) -> LruCache<K, V> {
    let config = LruCacheConfig {
        capacity: NonZeroUsize::new(cap).unwrap(),
    };
    LruCache::init(config, None)
}

/// Keys from least to most recently used.
fn order<K: std::hash::Hash + Eq + Clone, V>(cache: &LruCache<K, V>) -> Vec<K> {
    cache.iter().map(|(k, _)| k.clone()).collect()
}

// ============================================================================
// EVICTION ORDER
// ============================================================================

#[test]
fn test_lru_evicts_least_recently_used() {
    let mut cache = make_lru(3);
    cache.set(1, "one");
    cache.set(2, "two");
    cache.set(3, "three");

    cache.set(4, "four");
    assert_eq!(cache.get(&1), None, "key 1 should be evicted first");
    assert_eq!(order(&cache), vec![2, 3, 4]);

    cache.set(5, "five");
    assert_eq!(cache.get(&2), None, "key 2 should be evicted second");
    assert_eq!(order(&cache), vec![3, 4, 5]);
}

#[test]
fn test_lru_access_protects_from_eviction() {
    let mut cache = make_lru(3);
    cache.set(1, 10);
    cache.set(2, 20);
    cache.set(3, 30);

    cache.get(&1);
    cache.set(4, 40);
    assert_eq!(cache.peek(&2), None, "key 2 was least recently used");
    assert_eq!(cache.peek(&1), Some(&10));

    cache.get(&3);
    cache.set(5, 50);
    assert_eq!(cache.peek(&1), None, "key 1 was least recently used");
    assert_eq!(order(&cache), vec![4, 3, 5]);
}

#[test]
fn test_lru_update_promotes_and_keeps_len() {
    let mut cache = make_lru(3);
    cache.set("a", 1);
    cache.set("b", 2);
    cache.set("c", 3);
    cache.set("a", 100);
    assert_eq!(cache.len(), 3);

    cache.set("d", 4);
    assert_eq!(cache.peek(&"b"), None);
    assert_eq!(cache.peek(&"a"), Some(&100));
}

#[test]
fn test_lru_capacity_one_keeps_latest_write() {
    let mut cache = make_lru(1);
    for i in 0..10 {
        cache.set(i, i * 2);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.peek_lru(), Some((&i, &(i * 2))));
    }
    assert_eq!(cache.get(&8), None);
    assert_eq!(cache.get(&9), Some(&18));
}

#[test]
fn test_lru_non_touching_read_does_not_protect() {
    let mut cache = make_lru(2);
    cache.set("a", 1);
    cache.set("b", 2);

    assert_eq!(cache.get_with_touch(&"a", false), Some(&1));
    assert_eq!(cache.peek(&"a"), Some(&1));
    cache.set("c", 3);

    assert_eq!(cache.get(&"a"), None);
    assert_eq!(order(&cache), vec!["b", "c"]);
}

#[test]
fn test_lru_get_or_default_on_miss() {
    let mut cache: LruCache<&str, i32> = make_lru(2);
    assert_eq!(cache.get_or(&"missing", 7), 7);
    assert!(cache.is_empty(), "a miss must not create an entry");
}

// ============================================================================
// DELETE
// ============================================================================

#[test]
fn test_delete_least_recently_used_entry_repairs_order() {
    let mut cache = make_lru(3);
    cache.set("a", 1);
    cache.set("b", 2);
    cache.set("c", 3);

    assert_eq!(cache.delete(&"a"), Some(1));
    assert_eq!(order(&cache), vec!["b", "c"]);
    assert_eq!(cache.peek_lru(), Some((&"b", &2)));

    cache.set("d", 4);
    cache.set("e", 5);
    assert_eq!(cache.peek(&"b"), None, "b is the new least recently used entry");
    assert_eq!(order(&cache), vec!["c", "d", "e"]);
}

#[test]
fn test_delete_middle_entry() {
    let mut cache = make_lru(3);
    cache.set("a", 1);
    cache.set("b", 2);
    cache.set("c", 3);

    cache.forget(&"b");
    assert_eq!(order(&cache), vec!["a", "c"]);
    cache.set("d", 4);
    cache.set("e", 5);
    assert_eq!(order(&cache), vec!["c", "d", "e"]);
}

#[test]
fn test_delete_is_idempotent() {
    let mut cache = make_lru(2);
    cache.set("a", 1);
    assert_eq!(cache.delete(&"a"), Some(1));
    assert_eq!(cache.delete(&"a"), None);
    cache.forget(&"a");
    cache.forget(&"never-inserted");
    assert_eq!(cache.len(), 0);
}

#[test]
fn test_reinsert_after_delete() {
    let mut cache = make_lru(2);
    cache.set("a", 1);
    cache.set("b", 2);
    cache.forget(&"a");
    cache.set("a", 3);
    assert_eq!(order(&cache), vec!["b", "a"]);
    cache.set("c", 4);
    assert_eq!(order(&cache), vec!["a", "c"]);
}

// ============================================================================
// ADD
// ============================================================================

#[test]
fn test_add_counts_from_default() {
    let mut cache: LruCache<&str, i64> = make_lru(10);
    assert_eq!(cache.add("k", 5), Ok(5));
    assert_eq!(cache.add("k", 3), Ok(8));
    assert_eq!(cache.get(&"k"), Some(&8));
    assert_eq!(cache.add("k", -10), Ok(-2));
}

#[test]
fn test_add_write_promotes_key() {
    let mut cache: LruCache<&str, i64> = make_lru(2);
    cache.set("a", 1);
    cache.set("b", 1);
    cache.add("a", 1).unwrap();
    cache.set("c", 1);
    assert_eq!(order(&cache), vec!["a", "c"]);
}

#[test]
fn test_add_to_absent_key_may_evict() {
    let mut cache: LruCache<&str, u32> = make_lru(2);
    cache.set("a", 1);
    cache.set("b", 2);
    assert_eq!(cache.add("c", 3), Ok(3));
    assert_eq!(order(&cache), vec!["b", "c"]);
}

#[test]
fn test_add_float_accumulates() {
    let mut cache: LruCache<&str, f64> = make_lru(2);
    assert_eq!(cache.add("x", 0.5), Ok(0.5));
    assert_eq!(cache.add("x", 0.25), Ok(0.75));
}

#[test]
fn test_add_rejects_incompatible_values() {
    let mut cache: LruCache<&str, Value> = make_lru(2);
    cache.set("name", Value::from("forgetful"));
    cache.set("other", Value::Bool(true));

    let err = cache.add("name", Value::Int(1)).unwrap_err();
    assert_eq!(
        err,
        CacheError::IncompatibleTypes {
            stored: "str",
            delta: "int"
        }
    );
    assert_eq!(err.to_string(), "cannot add a int delta to a stored str value");

    assert_eq!(cache.peek(&"name"), Some(&Value::from("forgetful")));
    assert_eq!(order(&cache), vec!["name", "other"]);
}

// ============================================================================
// CONSTRUCTION AND METRICS
// ============================================================================

#[test]
fn test_zero_capacity_is_rejected() {
    assert_eq!(
        LruCache::<u8, u8>::try_new(0).unwrap_err(),
        CacheError::ZeroCapacity
    );
    assert_eq!(LruCacheConfig::new(0), Err(CacheError::ZeroCapacity));
}

#[test]
fn test_default_capacity() {
    let cache: LruCache<u8, u8> = LruCache::default();
    assert_eq!(cache.cap().get(), 1000);
}

#[test]
fn test_metrics_track_evictions() {
    let mut cache = make_lru(2);
    for i in 0..10 {
        cache.set(i, i);
    }
    let metrics = cache.metrics();
    assert_eq!(metrics.get("insertions"), Some(&10.0));
    assert_eq!(metrics.get("evictions"), Some(&8.0));
    assert_eq!(metrics.get("eviction_rate"), Some(&0.8));
}

// ============================================================================
// RANDOMIZED MODEL CHECK
// ============================================================================

/// Reference model: a deque ordered from least to most recently used.
struct Model {
    cap: usize,
    entries: VecDeque<(u16, u32)>,
}

impl Model {
    fn position(&self, key: u16) -> Option<usize> {
        self.entries.iter().position(|(k, _)| *k == key)
    }

    fn get(&mut self, key: u16, touch: bool) -> Option<u32> {
        let pos = self.position(key)?;
        let entry = self.entries[pos];
        if touch {
            self.entries.remove(pos);
            self.entries.push_back(entry);
        }
        Some(entry.1)
    }

    fn set(&mut self, key: u16, value: u32) {
        if let Some(pos) = self.position(key) {
            self.entries.remove(pos);
        }
        self.entries.push_back((key, value));
        while self.entries.len() > self.cap {
            self.entries.pop_front();
        }
    }

    fn delete(&mut self, key: u16) -> Option<u32> {
        let pos = self.position(key)?;
        self.entries.remove(pos).map(|(_, v)| v)
    }
}

#[test]
fn test_random_workload_matches_model() {
    for (seed, cap) in [(1u64, 1usize), (7, 3), (42, 8), (1234, 32)] {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut cache = make_lru(cap);
        let mut model = Model {
            cap,
            entries: VecDeque::new(),
        };

        for step in 0..5_000 {
            let key: u16 = rng.gen_range(0..(cap as u16 * 3));
            match rng.gen_range(0..6) {
                0 | 1 => {
                    let value: u32 = rng.gen_range(0..1000);
                    cache.set(key, value);
                    model.set(key, value);
                }
                2 => assert_eq!(
                    cache.get(&key).copied(),
                    model.get(key, true),
                    "get mismatch at step {step} (seed {seed})"
                ),
                3 => assert_eq!(
                    cache.get_with_touch(&key, false).copied(),
                    model.get(key, false),
                    "untouched get mismatch at step {step} (seed {seed})"
                ),
                4 => assert_eq!(
                    cache.delete(&key),
                    model.delete(key),
                    "delete mismatch at step {step} (seed {seed})"
                ),
                _ => {
                    let delta: u32 = rng.gen_range(0..10);
                    let expected = model.get(key, false).unwrap_or(0) + delta;
                    assert_eq!(cache.add(key, delta), Ok(expected));
                    model.set(key, expected);
                }
            }

            assert!(cache.len() <= cap);
            assert_eq!(cache.len(), model.entries.len());
            let expected: Vec<(u16, u32)> = model.entries.iter().copied().collect();
            let actual: Vec<(u16, u32)> = cache.iter().map(|(k, v)| (*k, *v)).collect();
            assert_eq!(actual, expected, "order mismatch at step {step} (seed {seed})");
        }
    }
}
