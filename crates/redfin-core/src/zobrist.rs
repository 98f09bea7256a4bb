//! Zobrist keys for hashing positions.
//!
//! Keys are generated at compile time from a fixed xorshift64 stream,
//! so hashes are deterministic across builds. The hash covers piece
//! placement, both castling-rights pairs, and the en-passant and
//! king-passant squares: everything that distinguishes two positions
//! for the transposition table.

use crate::board::Board;
use crate::castle_rights::CastleRights;
use crate::square::Square;

const SEED: u64 = 0x5245_4446_494e_2131; // "REDFIN!1"

/// Xorshift64 step. Returns (value, next state).
const fn xorshift64(mut state: u64) -> (u64, u64) {
    state ^= state << 13;
    state ^= state >> 7;
    state ^= state << 17;
    (state, state)
}

/// Advance the stream `n` steps past the seed.
const fn stream_at(n: usize) -> u64 {
    let mut state = SEED;
    let mut i = 0;
    while i < n {
        let (_, next) = xorshift64(state);
        state = next;
        i += 1;
    }
    state
}

/// Index of a piece byte in the key tables: `PNBRQK` then `pnbrqk`.
const fn piece_slot(byte: u8) -> Option<usize> {
    match byte {
        b'P' => Some(0),
        b'N' => Some(1),
        b'B' => Some(2),
        b'R' => Some(3),
        b'Q' => Some(4),
        b'K' => Some(5),
        b'p' => Some(6),
        b'n' => Some(7),
        b'b' => Some(8),
        b'r' => Some(9),
        b'q' => Some(10),
        b'k' => Some(11),
        _ => None,
    }
}

/// One key per (piece byte, mailbox square).
static PIECE_SQUARE: [[u64; Square::BOARD_SIZE]; 12] = {
    let mut table = [[0u64; Square::BOARD_SIZE]; 12];
    let mut state = SEED;
    let mut slot = 0;
    while slot < 12 {
        let mut sq = 0;
        while sq < Square::BOARD_SIZE {
            let (val, next) = xorshift64(state);
            table[slot][sq] = val;
            state = next;
            sq += 1;
        }
        slot += 1;
    }
    table
};

/// One key per castling-rights nibble (own west/east, opponent west/east).
static CASTLING: [u64; 16] = {
    let mut table = [0u64; 16];
    let mut state = stream_at(12 * Square::BOARD_SIZE);
    let mut i = 0;
    while i < 16 {
        let (val, next) = xorshift64(state);
        table[i] = val;
        state = next;
        i += 1;
    }
    table
};

/// One key per possible en-passant square.
static EN_PASSANT: [u64; Square::BOARD_SIZE] = {
    let mut table = [0u64; Square::BOARD_SIZE];
    let mut state = stream_at(12 * Square::BOARD_SIZE + 16);
    let mut i = 0;
    while i < Square::BOARD_SIZE {
        let (val, next) = xorshift64(state);
        table[i] = val;
        state = next;
        i += 1;
    }
    table
};

/// One key per possible king-passant square.
static KING_PASSANT: [u64; Square::BOARD_SIZE] = {
    let mut table = [0u64; Square::BOARD_SIZE];
    let mut state = stream_at(13 * Square::BOARD_SIZE + 16);
    let mut i = 0;
    while i < Square::BOARD_SIZE {
        let (val, next) = xorshift64(state);
        table[i] = val;
        state = next;
        i += 1;
    }
    table
};

const fn rights_nibble(own: CastleRights, theirs: CastleRights) -> usize {
    (own.west as usize)
        | (own.east as usize) << 1
        | (theirs.west as usize) << 2
        | (theirs.east as usize) << 3
}

/// Compute the hash of a full position state from scratch.
pub(crate) fn hash_position(
    board: &Board,
    own_rights: CastleRights,
    their_rights: CastleRights,
    ep: u8,
    kp: u8,
) -> u64 {
    let mut hash = 0u64;
    let mut i = 0;
    while i < Square::BOARD_SIZE {
        if let Some(slot) = piece_slot(board.get(i)) {
            hash ^= PIECE_SQUARE[slot][i];
        }
        i += 1;
    }
    hash ^= CASTLING[rights_nibble(own_rights, their_rights)];
    if ep != 0 {
        hash ^= EN_PASSANT[ep as usize];
    }
    if kp != 0 {
        hash ^= KING_PASSANT[kp as usize];
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::INITIAL;

    #[test]
    fn deterministic() {
        let a = hash_position(&INITIAL, CastleRights::BOTH, CastleRights::BOTH, 0, 0);
        let b = hash_position(&INITIAL, CastleRights::BOTH, CastleRights::BOTH, 0, 0);
        assert_eq!(a, b);
    }

    #[test]
    fn board_changes_change_the_hash() {
        let base = hash_position(&INITIAL, CastleRights::BOTH, CastleRights::BOTH, 0, 0);
        let mut moved = INITIAL;
        let e2 = Square::from_algebraic("e2").unwrap().index();
        let e4 = Square::from_algebraic("e4").unwrap().index();
        moved.set(e4, b'P');
        moved.set(e2, b'.');
        let after = hash_position(&moved, CastleRights::BOTH, CastleRights::BOTH, 0, 0);
        assert_ne!(base, after);
    }

    #[test]
    fn flags_change_the_hash() {
        let base = hash_position(&INITIAL, CastleRights::BOTH, CastleRights::BOTH, 0, 0);
        let no_castle = hash_position(&INITIAL, CastleRights::NONE, CastleRights::BOTH, 0, 0);
        let with_ep = hash_position(&INITIAL, CastleRights::BOTH, CastleRights::BOTH, 41, 0);
        let with_kp = hash_position(&INITIAL, CastleRights::BOTH, CastleRights::BOTH, 0, 96);
        assert_ne!(base, no_castle);
        assert_ne!(base, with_ep);
        assert_ne!(base, with_kp);
        assert_ne!(with_ep, with_kp);
    }

    #[test]
    fn rotation_changes_the_hash() {
        let base = hash_position(&INITIAL, CastleRights::BOTH, CastleRights::BOTH, 0, 0);
        let rotated = hash_position(
            &INITIAL.rotated(),
            CastleRights::BOTH,
            CastleRights::BOTH,
            0,
            0,
        );
        assert_ne!(base, rotated);
    }

    #[test]
    fn piece_slot_covers_both_cases() {
        assert_eq!(piece_slot(b'P'), Some(0));
        assert_eq!(piece_slot(b'k'), Some(11));
        assert_eq!(piece_slot(b'.'), None);
        assert_eq!(piece_slot(b' '), None);
    }
}
