//! Lookup counters for one identity map
//!
//! Plain `Cell`s: the owning map never leaves its execution context.

use std::cell::Cell;

/// Hit, miss and mutation counts
#[derive(Debug, Default, Clone)]
pub struct CacheStats {
    hits: Cell<u64>,
    misses: Cell<u64>,
    inserts: Cell<u64>,
    removals: Cell<u64>,
}

fn bump(counter: &Cell<u64>) {
    counter.set(counter.get().saturating_add(1));
}

impl CacheStats {
    /// Zeroed counters
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

    /// Only counted when an entry was actually present
    pub(crate) fn record_removal(&self) {
        bump(&self.removals);
    }

    /// Lookups answered from the map
    pub fn hits(&self) -> u64 {
        self.hits.get()
    }

    /// Lookups that found nothing usable, foreign-type entries included
    pub fn misses(&self) -> u64 {
        self.misses.get()
    }

    /// Records added (overwrites count too)
    pub fn inserts(&self) -> u64 {
        self.inserts.get()
    }

    /// Entries removed
    pub fn removals(&self) -> u64 {
        self.removals.get()
    }

    /// Share of lookups that hit, 0.0 before any lookup
    pub fn hit_ratio(&self) -> f64 {
        match self.hits() + self.misses() {
            0 => 0.0,
            total => self.hits() as f64 / total as f64,
        }
    }

    /// Zero every counter
    pub fn reset(&self) {
        for counter in [&self.hits, &self.misses, &self.inserts, &self.removals] {
            counter.set(0);
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
        stats.record_hit();
        stats.record_miss();

        assert_eq!(stats.hits(), 3);
        assert_eq!(stats.misses(), 1);
        assert_eq!(stats.hit_ratio(), 0.75);
    }

    #[test]
    fn test_stats_snapshot_is_independent() {
        let stats = CacheStats::new();
        stats.record_insert();

        let snapshot = stats.clone();
        stats.record_insert();
        stats.record_removal();

        assert_eq!(snapshot.inserts(), 1);
        assert_eq!(stats.inserts(), 2);

        stats.reset();
        assert_eq!(stats.inserts(), 0);
        assert_eq!(stats.removals(), 0);
        assert_eq!(snapshot.inserts(), 1);
    }
}
