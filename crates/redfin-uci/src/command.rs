//! UCI command parsing.

use std::time::Duration;

use redfin_core::{Move, Position};

use crate::error::UciError;

/// A parsed UCI command.
#[derive(Debug)]
pub enum Command {
    /// `uci` -- identify the engine.
    Uci,
    /// `isready` -- synchronization ping.
    IsReady,
    /// `ucinewgame` -- reset engine state.
    UciNewGame,
    /// `position startpos [moves ...]` -- the game history to search,
    /// one position per ply including the start position.
    Position(Vec<Position>),
    /// `go` with its clock and depth arguments.
    Go(GoParams),
    /// `stop` -- halt an infinite search.
    Stop,
    /// `quit` -- exit the engine.
    Quit,
    /// `debug board` / `debug moves` -- inspection helpers.
    Debug(DebugKind),
    /// Unrecognized command (silently ignored per the UCI convention).
    Unknown(String),
}

/// What the `debug` command should print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugKind {
    /// The current board, pretty-printed.
    Board,
    /// The legal moves of the current position.
    Moves,
}

/// Arguments of a `go` command.
#[derive(Debug, Default, Clone, Copy)]
pub struct GoParams {
    /// White's remaining clock time.
    pub wtime: Option<Duration>,
    /// Black's remaining clock time.
    pub btime: Option<Duration>,
    /// White's per-move increment.
    pub winc: Option<Duration>,
    /// Black's per-move increment.
    pub binc: Option<Duration>,
    /// Fixed time for this move.
    pub movetime: Option<Duration>,
    /// Moves until the next time control.
    pub movestogo: Option<u32>,
    /// Depth cap for the iterative deepener.
    pub depth: Option<i32>,
    /// Search until `stop`.
    pub infinite: bool,
}

/// Parse a single line of UCI input into a [`Command`].
pub fn parse_command(line: &str) -> Result<Command, UciError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some(&head) = tokens.first() else {
        return Ok(Command::Unknown(String::new()));
    };

    match head {
        "uci" => Ok(Command::Uci),
        "isready" => Ok(Command::IsReady),
        "ucinewgame" => Ok(Command::UciNewGame),
        "stop" => Ok(Command::Stop),
        "quit" => Ok(Command::Quit),
        "position" => parse_position(&tokens[1..]),
        "go" => parse_go(&tokens[1..]),
        "debug" => Ok(parse_debug(&tokens[1..])),
        _ => Ok(Command::Unknown(head.to_string())),
    }
}

/// Parse `position startpos [moves e2e4 ...]` into the game history.
///
/// Moves arrive in real board coordinates; every odd ply belongs to the
/// rotated side and is mirrored before being applied.
fn parse_position(tokens: &[&str]) -> Result<Command, UciError> {
    match tokens.first() {
        Some(&"startpos") => {}
        Some(&"fen") => return Err(UciError::FenUnsupported),
        _ => return Err(UciError::MalformedPosition),
    }

    let mut history = vec![Position::initial()];
    if tokens.get(1) == Some(&"moves") {
        for (ply, text) in tokens[2..].iter().enumerate() {
            let mut mv = Move::from_uci(text)?;
            if ply % 2 == 1 {
                mv = mv.mirrored();
            }
            let next = history[history.len() - 1].play(mv);
            history.push(next);
        }
    }
    Ok(Command::Position(history))
}

fn parse_go(tokens: &[&str]) -> Result<Command, UciError> {
    let mut params = GoParams::default();

    let mut i = 0;
    while i < tokens.len() {
        match tokens[i] {
            "infinite" => {
                params.infinite = true;
                i += 1;
            }
            key @ ("wtime" | "btime" | "winc" | "binc" | "movetime") => {
                let ms: u64 = parse_go_value(tokens, i)?;
                let value = Some(Duration::from_millis(ms));
                match key {
                    "wtime" => params.wtime = value,
                    "btime" => params.btime = value,
                    "winc" => params.winc = value,
                    "binc" => params.binc = value,
                    _ => params.movetime = value,
                }
                i += 2;
            }
            "movestogo" => {
                params.movestogo = Some(parse_go_value(tokens, i)?);
                i += 2;
            }
            "depth" => {
                params.depth = Some(parse_go_value(tokens, i)?);
                i += 2;
            }
            _ => i += 1,
        }
    }

    Ok(Command::Go(params))
}

fn parse_go_value<T: std::str::FromStr>(tokens: &[&str], key_index: usize) -> Result<T, UciError> {
    let key = tokens[key_index];
    let value = tokens
        .get(key_index + 1)
        .ok_or_else(|| UciError::MissingGoValue {
            param: key.to_string(),
        })?;
    value.parse().map_err(|_| UciError::InvalidGoValue {
        param: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_debug(tokens: &[&str]) -> Command {
    match tokens.first() {
        Some(&"board") => Command::Debug(DebugKind::Board),
        Some(&"moves") => Command::Debug(DebugKind::Moves),
        _ => Command::Unknown("debug".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redfin_core::Square;

    #[test]
    fn parse_simple_commands() {
        assert!(matches!(parse_command("uci").unwrap(), Command::Uci));
        assert!(matches!(parse_command("isready").unwrap(), Command::IsReady));
        assert!(matches!(
            parse_command("ucinewgame").unwrap(),
            Command::UciNewGame
        ));
        assert!(matches!(parse_command("stop").unwrap(), Command::Stop));
        assert!(matches!(parse_command("quit").unwrap(), Command::Quit));
    }

    #[test]
    fn parse_unknown_and_empty() {
        assert!(matches!(
            parse_command("foobar").unwrap(),
            Command::Unknown(_)
        ));
        assert!(matches!(parse_command("").unwrap(), Command::Unknown(_)));
    }

    #[test]
    fn parse_position_startpos() {
        let cmd = parse_command("position startpos").unwrap();
        let Command::Position(history) = cmd else {
            panic!("expected Position");
        };
        assert_eq!(history.len(), 1);
        assert_eq!(history[0], Position::initial());
    }

    #[test]
    fn parse_position_with_moves_builds_history() {
        let cmd = parse_command("position startpos moves e2e4 e7e5").unwrap();
        let Command::Position(history) = cmd else {
            panic!("expected Position");
        };
        assert_eq!(history.len(), 3);
        // White to move again; both center pawns are where they belong.
        let board = history[2].board();
        assert_eq!(
            board.get(Square::from_algebraic("e4").unwrap().index()),
            b'P'
        );
        assert_eq!(
            board.get(Square::from_algebraic("e5").unwrap().index()),
            b'p'
        );
    }

    #[test]
    fn parse_position_black_moves_are_mirrored() {
        let cmd = parse_command("position startpos moves e2e4 c7c5").unwrap();
        let Command::Position(history) = cmd else {
            panic!("expected Position");
        };
        let board = history[2].board();
        assert_eq!(
            board.get(Square::from_algebraic("c5").unwrap().index()),
            b'p'
        );
        assert_eq!(
            board.get(Square::from_algebraic("c7").unwrap().index()),
            b'.'
        );
    }

    #[test]
    fn parse_position_fen_is_rejected() {
        let result = parse_command(
            "position fen rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        );
        assert!(matches!(result, Err(UciError::FenUnsupported)));
    }

    #[test]
    fn parse_position_without_keyword_fails() {
        assert!(parse_command("position").is_err());
        assert!(parse_command("position nonsense").is_err());
    }

    #[test]
    fn parse_position_with_bad_move_fails() {
        assert!(parse_command("position startpos moves e2e4 zz99").is_err());
    }

    #[test]
    fn parse_go_clock_arguments() {
        let cmd = parse_command("go wtime 60000 btime 58000 winc 1000 binc 1000").unwrap();
        let Command::Go(params) = cmd else {
            panic!("expected Go");
        };
        assert_eq!(params.wtime, Some(Duration::from_millis(60000)));
        assert_eq!(params.btime, Some(Duration::from_millis(58000)));
        assert_eq!(params.winc, Some(Duration::from_millis(1000)));
        assert_eq!(params.binc, Some(Duration::from_millis(1000)));
        assert!(!params.infinite);
        assert_eq!(params.movetime, None);
    }

    #[test]
    fn parse_go_movetime_and_depth() {
        let cmd = parse_command("go movetime 500 depth 6 movestogo 12").unwrap();
        let Command::Go(params) = cmd else {
            panic!("expected Go");
        };
        assert_eq!(params.movetime, Some(Duration::from_millis(500)));
        assert_eq!(params.depth, Some(6));
        assert_eq!(params.movestogo, Some(12));
    }

    #[test]
    fn parse_go_infinite() {
        let cmd = parse_command("go infinite").unwrap();
        let Command::Go(params) = cmd else {
            panic!("expected Go");
        };
        assert!(params.infinite);
    }

    #[test]
    fn parse_bare_go() {
        let cmd = parse_command("go").unwrap();
        let Command::Go(params) = cmd else {
            panic!("expected Go");
        };
        assert!(!params.infinite);
        assert_eq!(params.movetime, None);
        assert_eq!(params.wtime, None);
    }

    #[test]
    fn parse_go_missing_value_fails() {
        assert!(parse_command("go wtime").is_err());
        assert!(parse_command("go movetime abc").is_err());
    }

    #[test]
    fn parse_go_ignores_unknown_tokens() {
        let cmd = parse_command("go ponder wtime 1000").unwrap();
        let Command::Go(params) = cmd else {
            panic!("expected Go");
        };
        assert_eq!(params.wtime, Some(Duration::from_millis(1000)));
    }

    #[test]
    fn parse_debug_commands() {
        assert!(matches!(
            parse_command("debug board").unwrap(),
            Command::Debug(DebugKind::Board)
        ));
        assert!(matches!(
            parse_command("debug moves").unwrap(),
            Command::Debug(DebugKind::Moves)
        ));
        assert!(matches!(
            parse_command("debug on").unwrap(),
            Command::Unknown(_)
        ));
    }
}
