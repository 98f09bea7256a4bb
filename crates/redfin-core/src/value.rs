//! Move pricing and execution.
//!
//! [`Position::value`] computes the evaluation delta a move would cause
//! without touching the board; [`Position::play`] applies the move by
//! copy, keeps the score incremental, and hands back the successor
//! rotated to the opponent's point of view.

use crate::castle_rights::CastleRights;
use crate::chess_move::Move;
use crate::movegen::{N, S};
use crate::piece::{self, Piece, EMPTY};
use crate::position::Position;
use crate::pst::pst_value;
use crate::square::Square;

impl Position {
    /// The incremental evaluation delta of applying `mv`.
    ///
    /// Covers piece movement, captures (the captured piece stands on the
    /// opponent's mirrored square), the castling rook relocation,
    /// promotion upgrades and the en-passant pawn removal. A capture on
    /// or next to the king-passant square prices as a king capture: that
    /// is what lets the search refute castling through check.
    pub fn value(&self, mv: Move) -> i32 {
        let i = mv.source().index();
        let j = mv.dest().index();
        let p = self.board.get(i);
        let q = self.board.get(j);
        let Some(moved) = Piece::from_byte(p) else {
            return 0;
        };

        // The piece leaves `i` and lands on `j`.
        let mut score = pst_value(moved, j) - pst_value(moved, i);

        // Capture: the victim was standing on the mirrored square.
        if piece::is_opponent(q) {
            if let Some(taken) = Piece::from_byte(q) {
                score += pst_value(taken, 119 - j);
            }
        }

        // Landing on or beside the king-passant square counts as
        // catching the king mid-castle.
        if (j as i32 - self.kp as i32).abs() < 2 {
            score += pst_value(Piece::King, 119 - j);
        }

        // Castling also relocates the rook.
        if p == b'K' && (j as i32 - i as i32).abs() == 2 {
            let rook_from = if j < i { Square::A1 } else { Square::H1 };
            score += pst_value(Piece::Rook, (i + j) / 2);
            score -= pst_value(Piece::Rook, rook_from.index());
        }

        if p == b'P' {
            if (Square::A8.index()..=Square::H8.index()).contains(&j) {
                if let Some(promo) = mv.promotion() {
                    score += pst_value(promo.piece(), j) - pst_value(Piece::Pawn, j);
                }
            }
            if j == self.ep as usize {
                score += pst_value(Piece::Pawn, 119 - (j + S as usize));
            }
        }

        score
    }

    /// Apply `mv` and return the successor position, rotated so the
    /// opponent is the new side to move.
    pub fn play(&self, mv: Move) -> Position {
        let i = mv.source().index();
        let j = mv.dest().index();
        let p = self.board.get(i);

        let mut board = self.board;
        let mut wc = self.wc;
        let mut bc = self.bc;
        let mut ep = 0u8;
        let mut kp = 0u8;
        let score = self.score + self.value(mv);

        // Move the piece.
        board.set(j, p);
        board.set(i, EMPTY);

        // Moving a corner rook, or capturing one, forfeits that castle.
        if i == Square::A1.index() {
            wc.west = false;
        }
        if i == Square::H1.index() {
            wc.east = false;
        }
        if j == Square::A8.index() {
            bc.east = false;
        }
        if j == Square::H8.index() {
            bc.west = false;
        }

        if p == b'K' {
            wc = CastleRights::NONE;
            if (j as i32 - i as i32).abs() == 2 {
                // Castle: drop the rook on the square the king crossed.
                kp = ((i + j) / 2) as u8;
                let rook_from = if j < i { Square::A1 } else { Square::H1 };
                board.set(rook_from.index(), EMPTY);
                board.set(kp as usize, b'R');
            }
        }

        if p == b'P' {
            if (Square::A8.index()..=Square::H8.index()).contains(&j) {
                let promoted = mv.promotion().map_or(b'Q', |promo| promo.byte());
                board.set(j, promoted);
            }
            if j as i32 - i as i32 == 2 * N {
                ep = (i as i32 + N) as u8;
            }
            if j == self.ep as usize {
                // En passant: the captured pawn stands one square south.
                board.set(j + S as usize, EMPTY);
            }
        }

        Position::new(board, score, wc, bc, ep, kp).rotate()
    }
}
