//! UCI protocol errors.

use redfin_core::ParseError;

/// Errors that can occur during UCI protocol handling.
///
/// Per the UCI convention these never abort the engine: the shell logs
/// the malformed line and keeps reading.
#[derive(Debug, thiserror::Error)]
pub enum UciError {
    /// The `position` command is missing the `startpos` keyword.
    #[error("malformed position command: missing startpos keyword")]
    MalformedPosition,

    /// `position fen` is recognized but not supported.
    #[error("position fen is not supported")]
    FenUnsupported,

    /// A move string in the `position` command could not be parsed.
    #[error("bad move in position command")]
    InvalidMove {
        /// The underlying parse failure.
        #[from]
        source: ParseError,
    },

    /// A `go` parameter is missing its required value.
    #[error("missing value for go parameter: {param}")]
    MissingGoValue {
        /// The parameter name (e.g. "wtime", "depth").
        param: String,
    },

    /// A `go` parameter value could not be parsed.
    #[error("invalid value for go parameter {param}: {value}")]
    InvalidGoValue {
        /// The parameter name.
        param: String,
        /// The value string that failed to parse.
        value: String,
    },

    /// An I/O error occurred while reading from stdin.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
