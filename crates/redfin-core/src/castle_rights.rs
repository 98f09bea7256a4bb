//! Castling rights for one side of the board.

use std::fmt;

/// Castling rights for one side, stored positionally.
///
/// `west` gates the castle toward A1 and `east` the castle toward H1,
/// *in the frame where that side's pieces are uppercase*. For White
/// that makes `west` the queenside castle; for the rotated opponent the
/// meanings swap, because rotation mirrors files. Rotating a position
/// therefore exchanges the two sides' rights without reordering the
/// flags.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastleRights {
    /// May still castle toward the A1 corner of the own frame.
    pub west: bool,
    /// May still castle toward the H1 corner of the own frame.
    pub east: bool,
}

impl CastleRights {
    /// Both castles still available.
    pub const BOTH: CastleRights = CastleRights {
        west: true,
        east: true,
    };

    /// No castles left.
    pub const NONE: CastleRights = CastleRights {
        west: false,
        east: false,
    };
}

impl fmt::Debug for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.west, self.east) {
            (true, true) => write!(f, "CastleRights(west|east)"),
            (true, false) => write!(f, "CastleRights(west)"),
            (false, true) => write!(f, "CastleRights(east)"),
            (false, false) => write!(f, "CastleRights(none)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CastleRights;

    #[test]
    fn constants() {
        assert!(CastleRights::BOTH.west && CastleRights::BOTH.east);
        assert!(!CastleRights::NONE.west && !CastleRights::NONE.east);
    }
}
