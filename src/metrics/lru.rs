//! LRU Cache Metrics
//!
//! Metrics specific to the LRU (Least Recently Used) cache algorithm.

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// LRU-specific metrics (extends CoreCacheMetrics)
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LruCacheMetrics {
    /// Core metrics common to all cache algorithms
    pub core: CoreCacheMetrics,

    /// Number of touches that actually moved an entry to the most recently
    /// used position (touching the current tail is free and not counted)
    pub promotions: u64,

    /// Number of `add` calls rejected because the values could not be combined
    pub rejected_adds: u64,
}

impl LruCacheMetrics {
    /// Records a promotion to the most recently used position.
    #[inline]
    pub fn record_promotion(&mut self) {
        self.promotions += 1;
    }

    /// Records a rejected `add`.
    #[inline]
    pub fn record_rejected_add(&mut self) {
        self.rejected_adds += 1;
    }

    /// Adds another set of counters into this one.
    pub fn merge(&mut self, other: &LruCacheMetrics) {
        self.core.merge(&other.core);
        self.promotions += other.promotions;
        self.rejected_adds += other.rejected_adds;
    }

    /// Converts LRU metrics to a BTreeMap for reporting
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();
        metrics.insert("promotions".to_string(), self.promotions as f64);
        metrics.insert("rejected_adds".to_string(), self.rejected_adds as f64);
        metrics
    }
}

impl CacheMetrics for LruCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "LRU"
    }
}
