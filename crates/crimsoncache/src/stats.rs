//! Per-cache counters
//!
//! Counters are relaxed atomics so they can be read through `&Cache` while
//! the cache itself is only mutated through `&mut`.

use std::sync::atomic::{AtomicU64, Ordering};

/// Read and write counters of one [`Cache`](crate::Cache)
///
/// `get` and `contains` feed hits and misses; `peek` is not counted. Every
/// successful `put` is either an insert or an update, and an insert that
/// overflows capacity also counts one eviction.
#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
    inserts: AtomicU64,
    updates: AtomicU64,
    evictions: AtomicU64,
}

fn bump(counter: &AtomicU64) {
    counter.fetch_add(1, Ordering::Relaxed);
}

fn read(counter: &AtomicU64) -> u64 {
    counter.load(Ordering::Relaxed)
}

impl CacheStats {
    /// All counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_hit(&self) {
        bump(&self.hits);
    }

    pub(crate) fn record_miss(&self) {
        bump(&self.misses);
    }

    pub(crate) fn record_insert(&self) {
        bump(&self.inserts);
    }

    pub(crate) fn record_update(&self) {
        bump(&self.updates);
    }

    pub(crate) fn record_eviction(&self) {
        bump(&self.evictions);
    }

    /// Reads that found their key
    pub fn hits(&self) -> u64 {
        read(&self.hits)
    }

    /// Reads that did not
    pub fn misses(&self) -> u64 {
        read(&self.misses)
    }

    /// Reads of either outcome
    pub fn reads(&self) -> u64 {
        self.hits() + self.misses()
    }

    /// Puts of a new key
    pub fn inserts(&self) -> u64 {
        read(&self.inserts)
    }

    /// Puts over an existing key
    pub fn updates(&self) -> u64 {
        read(&self.updates)
    }

    /// Entries dropped to stay within capacity
    pub fn evictions(&self) -> u64 {
        read(&self.evictions)
    }

    /// Fraction of reads that hit; 0.0 before the first read
    pub fn hit_ratio(&self) -> f64 {
        match self.reads() {
            0 => 0.0,
            reads => self.hits() as f64 / reads as f64,
        }
    }

    /// Zero every counter
    pub fn reset(&self) {
        for counter in [
            &self.hits,
            &self.misses,
            &self.inserts,
            &self.updates,
            &self.evictions,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_hit_ratio() {
        let stats = CacheStats::new();
        assert_eq!(stats.hit_ratio(), 0.0);

        stats.record_hit();
        stats.record_hit();
        stats.record_miss();

        assert_eq!(stats.reads(), 3);
        assert_eq!(stats.hit_ratio(), 2.0 / 3.0);
    }

    #[test]
    fn test_stats_writes() {
        let stats = CacheStats::new();

        stats.record_insert();
        stats.record_insert();
        stats.record_update();
        stats.record_eviction();

        assert_eq!(stats.inserts(), 2);
        assert_eq!(stats.updates(), 1);
        assert_eq!(stats.evictions(), 1);
        assert_eq!(stats.reads(), 0);
    }

    #[test]
    fn test_stats_reset_zeroes_everything() {
        let stats = CacheStats::new();

        stats.record_hit();
        stats.record_miss();
        stats.record_insert();
        stats.record_update();
        stats.record_eviction();
        stats.reset();

        assert_eq!(
            (
                stats.hits(),
                stats.misses(),
                stats.inserts(),
                stats.updates(),
                stats.evictions()
            ),
            (0, 0, 0, 0, 0)
        );
    }
}
