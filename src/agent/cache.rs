use std::collections::hash_map::Entry;

use crate::agent::evaluator::Score;
use crate::pylos::prelude::*;

/// What a cached score says about the true value of a position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    Exact,
    /// The search failed high; the true value is at least the score.
    Lower,
    /// The search failed low; the true value is at most the score.
    Upper,
}

/// The same arrangement of spheres means different things depending on who moves and in which sub-turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub fingerprint: u64,
    pub color: Color,
    pub state: GameState,
}

impl CacheKey {
    pub fn of(sim: &Simulator) -> CacheKey {
        CacheKey { fingerprint: sim.board().zobrist(), color: sim.color(), state: sim.state() }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheEntry {
    pub score: Score,
    pub depth: u8,
    pub bound: Bound,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub probes: u64,
    pub hits: u64,
    pub stores: u64,
    pub dropped: u64,
}

/// A bounded transposition cache with depth-preferred replacement.
///
/// Once full, entries for positions not seen before are dropped rather than evicting anything.
#[derive(Clone, Debug)]
pub struct TranspositionCache {
    entries: HashMap<CacheKey, CacheEntry>,
    capacity: usize,
    stats: CacheStats,
}

impl TranspositionCache {
    pub fn new(capacity: usize) -> TranspositionCache {
        TranspositionCache { entries: HashMap::new(), capacity, stats: CacheStats::default() }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats = CacheStats::default();
    }

    pub fn get(&mut self, key: &CacheKey) -> Option<CacheEntry> {
        self.stats.probes += 1;
        let entry = self.entries.get(key).copied();
        if entry.is_some() {
            self.stats.hits += 1;
        }
        entry
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn put(&mut self, key: CacheKey, entry: CacheEntry) {
        let full = self.entries.len() >= self.capacity;
        match self.entries.entry(key) {
            Entry::Occupied(mut slot) => {
                if entry.depth >= slot.get().depth {
                    slot.insert(entry);
                    self.stats.stores += 1;
                }
            },
            Entry::Vacant(slot) if !full => {
                slot.insert(entry);
                self.stats.stores += 1;
            },
            Entry::Vacant(_) => {
                self.stats.dropped += 1;
            }
        }
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(fingerprint: u64) -> CacheKey {
        CacheKey { fingerprint, color: Color::Light, state: GameState::Move }
    }

    #[test]
    fn deeper_entries_win() {
        let mut cache = TranspositionCache::new(8);
        cache.put(key(1), CacheEntry { score: 5, depth: 2, bound: Bound::Exact });
        cache.put(key(1), CacheEntry { score: 9, depth: 1, bound: Bound::Lower });
        assert_eq!(cache.get(&key(1)).unwrap().score, 5);

        cache.put(key(1), CacheEntry { score: 7, depth: 3, bound: Bound::Upper });
        assert_eq!(cache.get(&key(1)), Some(CacheEntry { score: 7, depth: 3, bound: Bound::Upper }));
        assert_eq!(cache.get(&key(2)), None);
        assert_eq!(cache.stats(), CacheStats { probes: 3, hits: 2, stores: 2, dropped: 0 });
    }

    #[test]
    fn full_cache_drops_new_keys() {
        let mut cache = TranspositionCache::new(1);
        cache.put(key(1), CacheEntry { score: 1, depth: 1, bound: Bound::Exact });
        cache.put(key(2), CacheEntry { score: 2, depth: 9, bound: Bound::Exact });
        assert_eq!(cache.len(), 1);
        assert!(cache.get(&key(2)).is_none());
        assert_eq!(cache.stats().dropped, 1);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn full_cache_still_deepens_known_keys() {
        let mut cache = TranspositionCache::new(1);
        cache.put(key(1), CacheEntry { score: 1, depth: 1, bound: Bound::Upper });
        cache.put(key(1), CacheEntry { score: 4, depth: 3, bound: Bound::Exact });
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&key(1)), Some(CacheEntry { score: 4, depth: 3, bound: Bound::Exact }));
        assert_eq!(cache.stats(), CacheStats { probes: 1, hits: 1, stores: 2, dropped: 0 });
    }

    #[test]
    fn keys_distinguish_sub_turns() {
        let sim = Simulator::new(GameState::Move, Color::Light, Board::new());
        let removing = Simulator::new(GameState::RemoveSecond, Color::Light, Board::new());
        let dark = Simulator::new(GameState::Move, Color::Dark, Board::new());
        assert_ne!(CacheKey::of(&sim), CacheKey::of(&removing));
        assert_ne!(CacheKey::of(&sim), CacheKey::of(&dark));
        assert_eq!(CacheKey::of(&sim).fingerprint, CacheKey::of(&dark).fingerprint);
    }
}
