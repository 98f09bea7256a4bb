//! The searcher and its MTD-bi root driver.

pub mod bound;
pub mod tt;

use redfin_core::{Move, Position, MATE_LOWER};

use self::tt::{MoveTable, ScoreTable, MOVE_TABLE_SIZE, SCORE_TABLE_SIZE};

/// MTD-bi stops once the root window has shrunk to this width.
pub const EVAL_ROUGHNESS: i32 = 20;

/// The engine's search state: transposition tables, the game history
/// the current search runs against, and a node counter.
pub struct Searcher {
    pub(crate) tp_score: ScoreTable,
    pub(crate) tp_move: MoveTable,
    pub(crate) history: Vec<Position>,
    pub(crate) nodes: u64,
}

impl Searcher {
    /// Create a searcher with default table sizes.
    pub fn new() -> Searcher {
        Searcher {
            tp_score: ScoreTable::new(SCORE_TABLE_SIZE),
            tp_move: MoveTable::new(MOVE_TABLE_SIZE),
            history: vec![Position::initial()],
            nodes: 0,
        }
    }

    /// Install the game history the next search runs against. The last
    /// entry is the root position; earlier entries feed repetition
    /// detection.
    pub fn set_history(&mut self, history: &[Position]) {
        if !history.is_empty() {
            self.history = history.to_vec();
        }
    }

    /// The root position of the installed history.
    pub fn root(&self) -> Position {
        // set_history never installs an empty history.
        self.history[self.history.len() - 1]
    }

    /// Nodes visited since the last [`reset_nodes`](Self::reset_nodes).
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Reset the node counter (once per `go`).
    pub fn reset_nodes(&mut self) {
        self.nodes = 0;
    }

    /// Forget everything learned from previous games (`ucinewgame`).
    pub fn clear_tables(&mut self) {
        self.tp_score.clear();
        self.tp_move.clear();
    }

    /// Run MTD-bi at a fixed depth, as a lazy stream of root probes.
    ///
    /// Each [`RootProbe`] is one zero-window [`bound`](Self::bound)
    /// call; the stream ends when the root window has converged to
    /// [`EVAL_ROUGHNESS`]. The caller typically prints one UCI `info`
    /// line per probe and checks its clock in between.
    pub fn search_depth(&mut self, depth: i32) -> RootSearch<'_> {
        RootSearch {
            searcher: self,
            depth,
            lower: -MATE_LOWER,
            upper: MATE_LOWER,
            gamma: 0,
        }
    }
}

impl Default for Searcher {
    fn default() -> Searcher {
        Searcher::new()
    }
}

impl std::fmt::Debug for Searcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Searcher")
            .field("tt_entries", &self.tp_score.len())
            .field("history_len", &self.history.len())
            .field("nodes", &self.nodes)
            .finish()
    }
}

/// One MTD-bi probe result at the root.
#[derive(Debug, Clone, Copy)]
pub struct RootProbe {
    /// The zero-window threshold this probe used.
    pub gamma: i32,
    /// The fail-soft score the probe returned.
    pub score: i32,
    /// Best root move known so far; null until some probe fails high.
    pub best_move: Move,
    /// Nodes searched so far in this `go`.
    pub nodes: u64,
    /// Score-table fill factor in permill, for `hashfull`.
    pub hashfull: u32,
}

/// Lazy MTD-bi bisection over the root score at one depth.
pub struct RootSearch<'a> {
    searcher: &'a mut Searcher,
    depth: i32,
    lower: i32,
    upper: i32,
    gamma: i32,
}

impl Iterator for RootSearch<'_> {
    type Item = RootProbe;

    fn next(&mut self) -> Option<RootProbe> {
        if self.lower >= self.upper - EVAL_ROUGHNESS {
            return None;
        }
        let root = self.searcher.root();
        let score = self
            .searcher
            .bound(&root, self.gamma, self.depth, false);
        if score >= self.gamma {
            self.lower = score;
        } else {
            self.upper = score;
        }
        let probe = RootProbe {
            gamma: self.gamma,
            score,
            best_move: self.searcher.tp_move.get(root.hash()).unwrap_or(Move::NULL),
            nodes: self.searcher.nodes,
            hashfull: self.searcher.tp_score.permill_full(),
        };
        self.gamma = (self.lower + self.upper + 1).div_euclid(2);
        Some(probe)
    }
}
