//! Error types for cache construction and value accumulation.
//!
//! Lookups, inserts and removals never fail: a missing key is reported as
//! `None`, not as an error. Errors only arise from invalid configuration and
//! from [`add`](crate::LruCache::add) when the stored value cannot absorb the
//! delta.

use thiserror::Error;

/// Result type alias for fallible cache operations.
pub type Result<T> = core::result::Result<T, CacheError>;

/// Errors reported by the cache.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    /// A cache was configured to hold zero entries.
    #[error("cache capacity must be at least 1")]
    ZeroCapacity,

    /// A concurrent cache was configured with zero segments, or with more
    /// segments than entries.
    #[error("invalid segment count {segments} for capacity {capacity}")]
    InvalidSegmentCount {
        /// Requested number of segments.
        segments: usize,
        /// Total capacity the segments would share.
        capacity: usize,
    },

    /// The stored value and the delta cannot be combined.
    #[error("cannot add a {delta} delta to a stored {stored} value")]
    IncompatibleTypes {
        /// Kind of the value currently stored (or the default).
        stored: &'static str,
        /// Kind of the delta passed to `add`.
        delta: &'static str,
    },

    /// Combining the stored value and the delta overflowed.
    #[error("adding to a stored {kind} value overflowed")]
    Overflow {
        /// Kind of the value that overflowed.
        kind: &'static str,
    },
}
