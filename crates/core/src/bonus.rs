//! Bonus bookkeeping - how many bonus tiles of each value are in play.
//!
//! Uses a small stack-allocated table: the set of bonus values is fixed by
//! configuration and tiny.

use arrayvec::ArrayVec;

use crate::config::BonusConfig;
use crate::types::MAX_BONUS_VALUES;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BonusCount {
    pub value: u32,
    pub count: u8,
}

/// Per-value counts of bonus tiles currently on the grid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BonusCounters {
    entries: ArrayVec<BonusCount, MAX_BONUS_VALUES>,
}

impl BonusCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, value: u32) -> u8 {
        self.entries
            .iter()
            .find(|e| e.value == value)
            .map_or(0, |e| e.count)
    }

    pub fn total(&self) -> u32 {
        self.entries.iter().map(|e| e.count as u32).sum()
    }

    /// Whether one more bonus tile of `value` fits under both caps.
    pub fn can_add(&self, value: u32, config: &BonusConfig) -> bool {
        self.count(value) < config.per_value_cap && self.total() < config.total_cap as u32
    }

    /// Record a spawned bonus tile. Returns false when the table is full
    /// (more distinct values than [`MAX_BONUS_VALUES`]).
    pub fn increment(&mut self, value: u32) -> bool {
        if let Some(e) = self.entries.iter_mut().find(|e| e.value == value) {
            e.count = e.count.saturating_add(1);
            return true;
        }
        self.entries.try_push(BonusCount { value, count: 1 }).is_ok()
    }

    /// Record a bonus tile leaving play.
    pub fn decrement(&mut self, value: u32) {
        if let Some(e) = self.entries.iter_mut().find(|e| e.value == value) {
            e.count = e.count.saturating_sub(1);
        }
        self.entries.retain(|e| e.count > 0);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &BonusCount> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_start_at_zero() {
        let c = BonusCounters::new();
        assert_eq!(c.count(64), 0);
        assert_eq!(c.total(), 0);
    }

    #[test]
    fn per_value_cap_blocks_third_tile() {
        let cfg = BonusConfig::default();
        let mut c = BonusCounters::new();
        assert!(c.can_add(4, &cfg));
        c.increment(4);
        c.increment(4);
        assert_eq!(c.count(4), 2);
        assert!(!c.can_add(4, &cfg));
        assert!(c.can_add(64, &cfg));
    }

    #[test]
    fn total_cap_blocks_fifth_tile() {
        let cfg = BonusConfig::default();
        let mut c = BonusCounters::new();
        for v in [4, 4, 64, 256] {
            assert!(c.can_add(v, &cfg));
            c.increment(v);
        }
        assert_eq!(c.total(), 4);
        assert!(!c.can_add(256, &cfg));
    }

    #[test]
    fn decrement_saturates_and_drops_empty_entries() {
        let mut c = BonusCounters::new();
        c.increment(256);
        c.decrement(256);
        c.decrement(256);
        assert_eq!(c.count(256), 0);
        assert_eq!(c.iter().count(), 0);
    }
}
