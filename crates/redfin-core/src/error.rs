//! Parse errors for squares and moves.

/// Errors from parsing algebraic squares and UCI move strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The text is not a valid algebraic square (a1..h8).
    #[error("invalid square: \"{text}\"")]
    InvalidSquare {
        /// The text that failed to parse.
        text: String,
    },

    /// The text is not a valid UCI move (e2e4, e7e8q).
    #[error("invalid move: \"{text}\"")]
    InvalidMove {
        /// The text that failed to parse.
        text: String,
    },

    /// The promotion letter is not one of n, b, r, q.
    #[error("invalid promotion piece: '{letter}'")]
    InvalidPromotion {
        /// The offending letter.
        letter: char,
    },
}
