//! The UCI shell: reads commands, drives the searcher, prints results.
//!
//! Timed searches run on the calling thread; the iterative deepener
//! checks the clock between root probes. An infinite search runs on a
//! scoped worker thread; the only state it shares with the reader is a
//! stop flag, and the reader always joins the worker before handling
//! further commands.

use std::io::{self, BufRead};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use redfin_core::{Color, Move, Position};
use redfin_engine::{think_budget, RootProbe, Searcher};

use crate::command::{parse_command, Command, DebugKind, GoParams};
use crate::error::UciError;

/// Engine name and version reported to `uci`.
pub const VERSION: &str = "Redfin 0.1";

const AUTHOR: &str = "the Redfin authors";

/// Depth cap standing in for "unbounded" deepening.
const MAX_DEPTH: i32 = 1000;

/// The UCI engine, holding the game history and the searcher.
pub struct UciEngine {
    history: Vec<Position>,
    searcher: Searcher,
}

impl UciEngine {
    /// Create an engine at the starting position.
    pub fn new() -> UciEngine {
        UciEngine {
            history: vec![Position::initial()],
            searcher: Searcher::new(),
        }
    }

    /// Run the UCI loop until `quit` or end of input.
    pub fn run(&mut self) -> Result<(), UciError> {
        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();

        while let Some(line) = lines.next() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            debug!(cmd = %trimmed, "received UCI command");

            match parse_command(trimmed) {
                Ok(Command::Uci) => {
                    println!("id name {VERSION}");
                    println!("id author {AUTHOR}");
                    println!("uciok");
                }
                Ok(Command::IsReady) => println!("readyok"),
                Ok(Command::UciNewGame) => {
                    self.history = vec![Position::initial()];
                    self.searcher.clear_tables();
                }
                Ok(Command::Position(history)) => self.history = history,
                Ok(Command::Go(params)) => {
                    if params.infinite {
                        let quit = self.go_infinite(&mut lines)?;
                        if quit {
                            break;
                        }
                    } else {
                        self.go_timed(&params);
                    }
                }
                // Nothing is searching on this thread, so there is
                // nothing to stop.
                Ok(Command::Stop) => {}
                Ok(Command::Quit) => break,
                Ok(Command::Debug(kind)) => self.handle_debug(kind),
                Ok(Command::Unknown(_)) => {}
                Err(err) => warn!(error = %err, "ignoring malformed command"),
            }
        }

        info!("redfin shutting down");
        Ok(())
    }

    /// Deepen until the time budget runs out, then print `bestmove`.
    fn go_timed(&mut self, params: &GoParams) {
        let side = Color::from_history_len(self.history.len());
        let mirror = side == Color::Black;
        let budget = think_budget(
            params.movetime,
            params.wtime,
            params.btime,
            params.winc,
            params.binc,
            side,
        );
        let max_depth = params.depth.unwrap_or(MAX_DEPTH);

        self.searcher.reset_nodes();
        self.searcher.set_history(&self.history);

        let start = Instant::now();
        let mut best: Option<Move> = None;
        'deepening: for depth in 1..=max_depth {
            for probe in self.searcher.search_depth(depth) {
                best = remember_best(best, &probe, mirror);
                println!("{}", format_info(depth, &probe, start.elapsed(), best));
                if best.is_some() && start.elapsed() >= budget {
                    break 'deepening;
                }
            }
        }
        print_bestmove(best);
    }

    /// Search on a worker thread until `stop` (or `quit` / end of
    /// input) arrives. Returns `true` when the engine should exit.
    fn go_infinite<I>(&mut self, lines: &mut I) -> Result<bool, UciError>
    where
        I: Iterator<Item = io::Result<String>>,
    {
        let stop = AtomicBool::new(false);
        let mirror = Color::from_history_len(self.history.len()) == Color::Black;
        self.searcher.reset_nodes();
        self.searcher.set_history(&self.history);
        let searcher = &mut self.searcher;

        let mut quit = false;
        thread::scope(|scope| {
            scope.spawn(|| infinite_worker(searcher, &stop, mirror));
            loop {
                match lines.next() {
                    Some(Ok(line)) => {
                        let cmd = line.trim();
                        if cmd == "stop" {
                            break;
                        }
                        if cmd == "quit" {
                            quit = true;
                            break;
                        }
                        debug!(cmd = %cmd, "ignored during infinite search");
                    }
                    Some(Err(_)) | None => {
                        quit = true;
                        break;
                    }
                }
            }
            stop.store(true, Ordering::Release);
            // The scope joins the worker here, so the searcher is idle
            // again before the next command is read.
        });
        Ok(quit)
    }

    fn handle_debug(&self, kind: DebugKind) {
        let current = self.history[self.history.len() - 1];
        match kind {
            DebugKind::Board => print!("{}", current.board()),
            DebugKind::Moves => {
                let rendered: Vec<String> =
                    current.legal_moves().iter().map(|m| m.to_uci()).collect();
                println!("moves: {}", rendered.join(" "));
            }
        }
    }
}

impl Default for UciEngine {
    fn default() -> UciEngine {
        UciEngine::new()
    }
}

fn infinite_worker(searcher: &mut Searcher, stop: &AtomicBool, mirror: bool) {
    let start = Instant::now();
    let mut best: Option<Move> = None;
    'deepening: for depth in 1..=MAX_DEPTH {
        for probe in searcher.search_depth(depth) {
            if stop.load(Ordering::Acquire) {
                break 'deepening;
            }
            best = remember_best(best, &probe, mirror);
            println!("{}", format_info(depth, &probe, start.elapsed(), best));
        }
        if stop.load(Ordering::Acquire) {
            break;
        }
    }
    print_bestmove(best);
}

/// Keep the newest non-null root move, mirrored into real coordinates.
fn remember_best(current: Option<Move>, probe: &RootProbe, mirror: bool) -> Option<Move> {
    if probe.best_move.is_null() {
        current
    } else if mirror {
        Some(probe.best_move.mirrored())
    } else {
        Some(probe.best_move)
    }
}

/// Render one `info` line for a root probe.
fn format_info(depth: i32, probe: &RootProbe, elapsed: Duration, best: Option<Move>) -> String {
    let ms = elapsed.as_millis().max(1);
    let nps = probe.nodes as u128 * 1000 / ms;
    let mut line = format!(
        "info depth {depth} score cp {} nodes {} nps {nps} hashfull {} time {ms}",
        probe.score, probe.nodes, probe.hashfull
    );
    if let Some(mv) = best {
        line.push_str(" pv ");
        line.push_str(&mv.to_uci());
    }
    line
}

fn print_bestmove(best: Option<Move>) {
    match best {
        Some(mv) => println!("bestmove {}", mv.to_uci()),
        None => println!("bestmove (none)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe(score: i32, best: Move) -> RootProbe {
        RootProbe {
            gamma: 0,
            score,
            best_move: best,
            nodes: 4096,
            hashfull: 7,
        }
    }

    #[test]
    fn info_line_format() {
        let mv = Move::from_uci("e2e4").unwrap();
        let line = format_info(3, &probe(25, mv), Duration::from_millis(128), Some(mv));
        assert_eq!(
            line,
            "info depth 3 score cp 25 nodes 4096 nps 32000 hashfull 7 time 128 pv e2e4"
        );
    }

    #[test]
    fn info_line_without_move_has_no_pv() {
        let line = format_info(
            1,
            &probe(0, Move::NULL),
            Duration::from_millis(10),
            None,
        );
        assert!(!line.contains("pv"));
        assert!(line.starts_with("info depth 1 "));
    }

    #[test]
    fn elapsed_time_is_clamped_for_nps() {
        let mv = Move::from_uci("e2e4").unwrap();
        // Zero elapsed must not divide by zero.
        let line = format_info(1, &probe(0, mv), Duration::ZERO, Some(mv));
        assert!(line.contains("time 1"));
    }

    #[test]
    fn remember_best_keeps_previous_on_null() {
        let mv = Move::from_uci("e2e4").unwrap();
        let kept = remember_best(Some(mv), &probe(0, Move::NULL), false);
        assert_eq!(kept, Some(mv));
    }

    #[test]
    fn remember_best_mirrors_for_black() {
        let mv = Move::from_uci("e2e4").unwrap();
        let kept = remember_best(None, &probe(0, mv), true);
        assert_eq!(kept.unwrap().to_uci(), "d7d5");
    }

    #[test]
    fn engine_starts_at_the_initial_position() {
        let engine = UciEngine::new();
        assert_eq!(engine.history.len(), 1);
        assert_eq!(engine.history[0], Position::initial());
    }
}
