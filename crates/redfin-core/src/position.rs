//! The immutable position snapshot.

use std::fmt;

use crate::board::{Board, INITIAL};
use crate::castle_rights::CastleRights;
use crate::chess_move::Move;
use crate::pst::{evaluate, MATE_LOWER};
use crate::zobrist;

/// A complete game state, always oriented to the side to move.
///
/// Every "make move" produces a fresh `Position` (a 120-byte copy), so
/// the search never has to undo anything. The board keeps the side to
/// move's pieces uppercase; [`Position::play`] rotates the result so
/// the invariant holds after every ply.
#[derive(Clone, Copy)]
pub struct Position {
    pub(crate) board: Board,
    pub(crate) score: i32,
    /// Own castling rights (positional, see [`CastleRights`]).
    pub(crate) wc: CastleRights,
    /// Opponent castling rights.
    pub(crate) bc: CastleRights,
    /// En-passant landing square, or 0 when none.
    pub(crate) ep: u8,
    /// Square the king crossed while castling last ply, or 0.
    pub(crate) kp: u8,
    hash: u64,
}

impl Position {
    /// Assemble a position and compute its hash.
    ///
    /// `score` must be the piece-square evaluation of `board` for the
    /// side to move; [`Position::initial`] and [`Position::play`] keep
    /// that bookkeeping automatically.
    pub fn new(
        board: Board,
        score: i32,
        wc: CastleRights,
        bc: CastleRights,
        ep: u8,
        kp: u8,
    ) -> Position {
        let hash = zobrist::hash_position(&board, wc, bc, ep, kp);
        Position {
            board,
            score,
            wc,
            bc,
            ep,
            kp,
            hash,
        }
    }

    /// The standard starting position, White to move.
    pub fn initial() -> Position {
        Position::new(
            INITIAL,
            evaluate(&INITIAL),
            CastleRights::BOTH,
            CastleRights::BOTH,
            0,
            0,
        )
    }

    /// The board, oriented to the side to move.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Incremental piece-square evaluation for the side to move.
    #[inline]
    pub fn score(&self) -> i32 {
        self.score
    }

    /// Zobrist hash over board, castling rights, ep and kp.
    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// En-passant landing square (0 when none).
    #[inline]
    pub fn ep(&self) -> u8 {
        self.ep
    }

    /// King-passant square (0 when none).
    #[inline]
    pub fn kp(&self) -> u8 {
        self.kp
    }

    /// Own castling rights.
    #[inline]
    pub fn own_rights(&self) -> CastleRights {
        self.wc
    }

    /// Opponent castling rights.
    #[inline]
    pub fn their_rights(&self) -> CastleRights {
        self.bc
    }

    /// View the position from the other side: rotate the board, negate
    /// the score, swap the rights pairs and mirror the passant squares.
    pub fn rotate(&self) -> Position {
        Position::new(
            self.board.rotated(),
            -self.score,
            self.bc,
            self.wc,
            mirror_flag(self.ep),
            mirror_flag(self.kp),
        )
    }

    /// Rotate as a pass (null move): the passant squares are cleared so
    /// the opponent cannot capture en passant against a side that did
    /// not actually move.
    pub fn nullmove(&self) -> Position {
        Position::new(self.board.rotated(), -self.score, self.bc, self.wc, 0, 0)
    }

    /// Is this position already lost because the own king is gone?
    ///
    /// Any score at or below `-MATE_LOWER` means a king was captured
    /// somewhere along the line.
    #[inline]
    pub fn is_lost(&self) -> bool {
        self.score <= -MATE_LOWER
    }

    /// Can the side to move capture the opponent king right now?
    ///
    /// Used to filter pseudo-legal moves: a move is illegal when the
    /// resulting position is "dead" in this sense.
    pub fn can_capture_king(&self) -> bool {
        self.gen_moves()
            .as_slice()
            .iter()
            .any(|&m| self.value(m) >= MATE_LOWER)
    }

    /// Generate the moves that do not leave the own king capturable.
    pub fn legal_moves(&self) -> Vec<Move> {
        self.gen_moves()
            .as_slice()
            .iter()
            .copied()
            .filter(|&m| !self.play(m).can_capture_king())
            .collect()
    }
}

fn mirror_flag(square: u8) -> u8 {
    if square == 0 { 0 } else { 119 - square }
}

impl PartialEq for Position {
    fn eq(&self, other: &Position) -> bool {
        self.hash == other.hash
            && self.board == other.board
            && self.wc == other.wc
            && self.bc == other.bc
            && self.ep == other.ep
            && self.kp == other.kp
    }
}

impl Eq for Position {}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Position(score={} ep={} kp={} wc={:?} bc={:?})",
            self.score, self.ep, self.kp, self.wc, self.bc
        )
    }
}
