//! Transposition tables: score windows and killer moves.
//!
//! Two independent stores back the search. The score table maps a
//! `(hash, depth, can_null)` key to the fail-soft window the last visit
//! established; the move table remembers the best move seen at a
//! position regardless of depth. Both are size-capped and simply clear
//! when full; retention is an optimization, never a correctness
//! concern, because [`bound`](crate::Searcher) recomputes anything a
//! lost entry would have answered.

use std::collections::HashMap;

use tracing::debug;

use redfin_core::{Move, MATE_UPPER};

/// Default capacity of the score table.
pub const SCORE_TABLE_SIZE: usize = 10_000_000;

/// Default capacity of the killer-move table.
pub const MOVE_TABLE_SIZE: usize = 1_000_000;

/// A fail-soft score window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    /// Proven lower bound on the true score.
    pub lower: i32,
    /// Proven upper bound on the true score.
    pub upper: i32,
}

impl Entry {
    /// The window of a never-visited node.
    pub const UNBOUNDED: Entry = Entry {
        lower: -MATE_UPPER,
        upper: MATE_UPPER,
    };
}

/// Maps `(hash, depth, can_null)` to the proven score window.
pub struct ScoreTable {
    map: HashMap<(u64, i32, bool), Entry>,
    cap: usize,
}

impl ScoreTable {
    /// Create an empty table holding at most `cap` entries.
    pub fn new(cap: usize) -> ScoreTable {
        ScoreTable {
            map: HashMap::new(),
            cap: cap.max(1),
        }
    }

    /// Look up the window for a key, unbounded when absent.
    pub fn get(&self, hash: u64, depth: i32, can_null: bool) -> Entry {
        self.map
            .get(&(hash, depth, can_null))
            .copied()
            .unwrap_or(Entry::UNBOUNDED)
    }

    /// Store the window for a key, overwriting any previous value.
    pub fn insert(&mut self, hash: u64, depth: i32, can_null: bool, entry: Entry) {
        let key = (hash, depth, can_null);
        if self.map.len() >= self.cap && !self.map.contains_key(&key) {
            debug!(entries = self.map.len(), "score table full, clearing");
            self.map.clear();
        }
        self.map.insert(key, entry);
    }

    /// How full the table is, in permill, for UCI `hashfull`.
    pub fn permill_full(&self) -> u32 {
        ((self.map.len() * 1000) / self.cap).min(1000) as u32
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Return `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.map.clear();
    }
}

/// Maps a position hash to the best move found there so far.
pub struct MoveTable {
    map: HashMap<u64, Move>,
    cap: usize,
}

impl MoveTable {
    /// Create an empty table holding at most `cap` entries.
    pub fn new(cap: usize) -> MoveTable {
        MoveTable {
            map: HashMap::new(),
            cap: cap.max(1),
        }
    }

    /// Look up the remembered move for a position.
    pub fn get(&self, hash: u64) -> Option<Move> {
        self.map.get(&hash).copied()
    }

    /// Remember `mv` as the best move at `hash`.
    pub fn insert(&mut self, hash: u64, mv: Move) {
        if self.map.len() >= self.cap && !self.map.contains_key(&hash) {
            debug!(entries = self.map.len(), "move table full, clearing");
            self.map.clear();
        }
        self.map.insert(hash, mv);
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.map.clear();
    }
}
