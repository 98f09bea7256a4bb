//! The fail-soft zero-window search.

use redfin_core::{Move, Position, MATE_LOWER, MATE_UPPER};

use crate::search::tt::Entry;
use crate::search::Searcher;

/// Quiescence threshold: at depth 0 only moves gaining at least this
/// much are searched, which keeps leaf evaluations tactically stable.
pub const QS: i32 = 40;

/// Remaining depth must exceed this for null-move pruning to fire.
pub const NULLMOVE_DEPTH: i32 = 2;

impl Searcher {
    /// Zero-window scout search.
    ///
    /// Returns a fail-soft score `s`: `s >= gamma` proves the true
    /// score is at least `s`, while `s < gamma` proves it is at most
    /// `s`. Negative depths behave as depth 0, which is the quiescence
    /// regime. The routine is total: any malformed line ends in the
    /// king-capture guard, never an error.
    pub fn bound(&mut self, pos: &Position, gamma: i32, depth: i32, can_null: bool) -> i32 {
        self.nodes += 1;
        let depth = depth.max(0);

        // Our king was captured earlier in the line.
        if pos.is_lost() {
            return -MATE_UPPER;
        }

        let entry = self.tp_score.get(pos.hash(), depth, can_null);
        if entry.lower >= gamma {
            return entry.lower;
        }
        if entry.upper < gamma {
            return entry.upper;
        }

        // A position we have already been in is a draw by repetition.
        if can_null && depth > 0 && self.history.contains(pos) {
            return 0;
        }

        let mut best = -MATE_UPPER;
        'phases: {
            // Null move: give the opponent a free shot. If they still
            // cannot reach gamma at reduced depth, we are safely above
            // it. Requires some real material so zugzwang positions do
            // not get pruned away.
            if can_null && depth > NULLMOVE_DEPTH && pos.board().has_any(b"RBNQ") {
                let score = -self.bound(&pos.nullmove(), 1 - gamma, depth - 3, true);
                best = best.max(score);
                if best >= gamma {
                    break 'phases;
                }
            }

            // Stand pat at the leaves.
            if depth == 0 {
                best = best.max(pos.score());
                if best >= gamma {
                    break 'phases;
                }
            }

            let val_lower = if depth == 0 { QS } else { -MATE_LOWER };

            // Killer move, refreshed by an internal reduced-depth pass
            // so stale table entries do not steer deep nodes.
            if depth > 2 && self.tp_move.get(pos.hash()).is_some() {
                self.bound(pos, gamma, depth - 3, false);
                if let Some(killer) = self.tp_move.get(pos.hash()) {
                    if pos.value(killer) >= val_lower {
                        let score = -self.bound(&pos.play(killer), 1 - gamma, depth - 1, true);
                        best = best.max(score);
                        if best >= gamma {
                            self.tp_move.insert(pos.hash(), killer);
                            break 'phases;
                        }
                    }
                }
            }

            // Main moves, best static value first.
            let mut scored: Vec<(i32, Move)> = pos
                .gen_moves()
                .as_slice()
                .iter()
                .map(|&mv| (pos.value(mv), mv))
                .collect();
            scored.sort_unstable_by(|a, b| b.0.cmp(&a.0));

            for (val, mv) in scored {
                // Everything from here on is a worse capture or a quiet
                // move below the quiescence threshold.
                if val < val_lower {
                    break;
                }
                // Futility at the frontier: when even the static gain
                // cannot reach gamma, credit it and stop expanding.
                if depth <= 1 && pos.score() + val < gamma {
                    let score = if val < MATE_LOWER {
                        pos.score() + val
                    } else {
                        MATE_UPPER
                    };
                    best = best.max(score);
                    if best >= gamma {
                        self.tp_move.insert(pos.hash(), mv);
                    }
                    break;
                }
                let score = -self.bound(&pos.play(mv), 1 - gamma, depth - 1, true);
                best = best.max(score);
                if best >= gamma {
                    self.tp_move.insert(pos.hash(), mv);
                    break 'phases;
                }
            }
        }

        // Nothing searchable: either we are mated or stalemated. Asking
        // whether a pass would let the opponent take our king tells the
        // two apart.
        if depth > 0 && best == -MATE_UPPER {
            let in_check = self.bound(&pos.nullmove(), MATE_UPPER, 0, true) == MATE_UPPER;
            best = if in_check { -MATE_LOWER } else { 0 };
        }

        if best >= gamma {
            self.tp_score.insert(
                pos.hash(),
                depth,
                can_null,
                Entry {
                    lower: best,
                    upper: entry.upper,
                },
            );
        } else {
            self.tp_score.insert(
                pos.hash(),
                depth,
                can_null,
                Entry {
                    lower: entry.lower,
                    upper: best,
                },
            );
        }
        best
    }
}
