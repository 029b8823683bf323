//! Alpha-beta driver
//!
//! Iterative deepening from `min_depth` to `max_depth`. The deadline
//! and the cancellation flag are polled at depth boundaries only: a
//! started iteration always completes, and the result is the best move
//! of the deepest completed depth.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, info};

use super::eval::evaluate;
use super::params::SearchParams;
use crate::board::SearchBoard;
use crate::errors::EngineError;
use crate::oracle::Candidates;
use crate::tt::{diag, Bound, TranspositionTable, TtEntry};
use crate::types::{loss_in, win_in, Cell, Value, INFINITY};

/// External limits on one search run.
#[derive(Clone, Default)]
pub struct SearchLimits {
    /// Absolute wall-clock deadline.
    pub deadline: Option<Instant>,
    /// Cooperative cancellation flag, set by the orchestrator.
    pub stop: Option<Arc<AtomicBool>>,
}

impl SearchLimits {
    fn should_stop(&self) -> bool {
        if let Some(stop) = &self.stop {
            if stop.load(Ordering::Relaxed) {
                return true;
            }
        }
        matches!(self.deadline, Some(d) if Instant::now() >= d)
    }
}

/// Result of one search run.
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    /// Best move at the deepest completed depth.
    pub best_move: Cell,
    /// Its value from the side to move's perspective.
    pub value: Value,
    /// Deepest fully completed iteration.
    pub depth_completed: u32,
    /// Nodes expanded across all iterations.
    pub nodes: u64,
    pub elapsed: Duration,
    /// Principal variation, from the table when one is attached.
    pub pv: Vec<Cell>,
    /// True when the deadline or a cancellation cut the deepening
    /// short.
    pub aborted: bool,
}

/// One-shot search driver over an augmented board.
pub struct Searcher<'a> {
    board: &'a mut SearchBoard,
    tt: Option<&'a mut TranspositionTable>,
    params: &'a SearchParams,
    limits: SearchLimits,
    nodes: u64,
}

impl<'a> Searcher<'a> {
    pub fn new(
        board: &'a mut SearchBoard,
        tt: Option<&'a mut TranspositionTable>,
        params: &'a SearchParams,
        limits: SearchLimits,
    ) -> Self {
        Self {
            board,
            tt,
            params,
            limits,
            nodes: 0,
        }
    }

    /// Runs the iterative-deepening loop to completion or cutoff.
    pub fn run(&mut self) -> Result<SearchOutcome, EngineError> {
        let start = Instant::now();
        let root_cands = self.board.candidates();
        if root_cands.is_empty() {
            return Err(EngineError::NoLegalMoves);
        }

        // Root moves carry their last-iteration score for reordering.
        let mut root: Vec<(Cell, Value)> = root_cands.iter().map(|&c| (c, 0)).collect();
        let mut best: Option<(Cell, Value)> = None;
        let mut depth_completed = 0;
        let mut aborted = false;

        let min_depth = self.params.min_depth.max(1);
        let max_depth = self.params.max_depth.max(min_depth);

        for depth in min_depth..=max_depth {
            let width = self.params.width_at(0).min(root.len());
            let mut iter_best: Option<(Cell, Value)> = None;
            let mut alpha = -INFINITY;

            for i in 0..width {
                let mv = root[i].0;
                self.board.position_mut().play(mv)?;
                let v = -self.negamax(1, depth - 1, -INFINITY, -alpha);
                self.board.position_mut().undo_play(mv);
                root[i].1 = v;
                if iter_best.is_none() || v > iter_best.unwrap().1 {
                    iter_best = Some((mv, v));
                }
                alpha = alpha.max(v);
            }

            // The iteration ran to the end; commit it.
            let (mv, v) = iter_best.expect("non-empty root");
            best = Some((mv, v));
            depth_completed = depth;
            root[..width].sort_by_key(|&(_, v)| -v);

            if let Some(tt) = self.tt.as_deref_mut() {
                tt.store(TtEntry {
                    key: self.board.position().key(),
                    value: v,
                    best_move: Some(mv),
                    depth,
                    bound: Bound::Exact,
                });
            }

            debug!(
                "depth {depth}: best {mv} value {v} nodes {} elapsed {:?}",
                self.nodes,
                start.elapsed()
            );
            if self.params.use_guifx {
                info!(target: "guifx", "VAR {mv} TEXT d{depth} {v}");
            }

            if depth < max_depth && self.limits.should_stop() {
                aborted = true;
                break;
            }
        }

        let (best_move, value) = best.expect("at least one completed depth");
        let pv = match self.tt.as_deref() {
            Some(tt) => diag::extract_pv(self.board.position(), tt),
            None => vec![best_move],
        };
        Ok(SearchOutcome {
            best_move,
            value,
            depth_completed,
            nodes: self.nodes,
            elapsed: start.elapsed(),
            pv,
            aborted,
        })
    }

    fn negamax(&mut self, ply: u32, depth: u32, mut alpha: Value, mut beta: Value) -> Value {
        self.nodes += 1;

        let pos = self.board.position();
        if let Some(winner) = pos.winner() {
            // The side to move never finds the board already won for
            // itself; the previous mover completed the chain.
            return if winner == pos.to_move() {
                win_in(ply)
            } else {
                loss_in(ply)
            };
        }
        if depth == 0 {
            return evaluate(pos, pos.to_move(), ply);
        }

        let key = pos.key();
        let alpha_orig = alpha;
        let mut tt_move: Option<Cell> = None;
        if let Some(tt) = self.tt.as_deref() {
            if let Some(entry) = tt.probe(key) {
                tt_move = entry.best_move;
                if entry.depth >= depth {
                    match entry.bound {
                        Bound::Exact => return entry.value,
                        Bound::Lower => alpha = alpha.max(entry.value),
                        Bound::Upper => beta = beta.min(entry.value),
                    }
                    if alpha >= beta {
                        return entry.value;
                    }
                }
            }
        }

        let mut cands: Candidates = self.board.candidates();
        let width = self.params.width_at(ply).min(cands.len());
        cands.truncate(width);
        // The cached best move is searched first even when the width
        // cut or the oracle dropped it.
        if let Some(mv) = tt_move {
            if let Some(i) = cands.iter().position(|&c| c == mv) {
                cands.remove(i);
            }
            cands.insert(0, mv);
        }

        let mut best_value = -INFINITY;
        let mut best_move: Option<Cell> = None;
        for &mv in cands.iter() {
            if self.board.position_mut().play(mv).is_err() {
                continue;
            }
            let v = -self.negamax(ply + 1, depth - 1, -beta, -alpha);
            self.board.position_mut().undo_play(mv);
            if v > best_value {
                best_value = v;
                best_move = Some(mv);
            }
            alpha = alpha.max(v);
            if alpha >= beta {
                break;
            }
        }

        if best_move.is_none() {
            // Full board without a winner cannot happen in Hex; treat
            // an empty candidate set as a static leaf regardless.
            let pos = self.board.position();
            return evaluate(pos, pos.to_move(), ply);
        }

        let bound = if best_value <= alpha_orig {
            Bound::Upper
        } else if best_value >= beta {
            Bound::Lower
        } else {
            Bound::Exact
        };
        if let Some(tt) = self.tt.as_deref_mut() {
            tt.store(TtEntry {
                key,
                value: best_value,
                best_move,
                depth,
                bound,
            });
        }
        best_value
    }

    /// Nodes expanded so far.
    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{is_winning, Color};

    fn winning_setup() -> SearchBoard {
        // Black to move with b1/b2 on a 3x3 board: b3 wins outright.
        let mut board = SearchBoard::new(3, 3).unwrap();
        let pos = board.position_mut();
        pos.play(Cell::new(1, 0)).unwrap(); // black b1
        pos.play(Cell::new(0, 0)).unwrap(); // white a1
        pos.play(Cell::new(1, 1)).unwrap(); // black b2
        pos.play(Cell::new(0, 1)).unwrap(); // white a2
        assert_eq!(board.position().to_move(), Color::Black);
        board
    }

    #[test]
    fn test_finds_immediate_win() {
        let mut board = winning_setup();
        let params = SearchParams {
            max_depth: 2,
            ..SearchParams::default()
        };
        let mut tt = TranspositionTable::new(12);
        let outcome = Searcher::new(&mut board, Some(&mut tt), &params, SearchLimits::default())
            .run()
            .unwrap();
        assert!(is_winning(outcome.value));
        assert!(!outcome.aborted);
        // The chosen move completes Black's chain on the spot.
        board.position_mut().play(outcome.best_move).unwrap();
        assert_eq!(board.position().winner(), Some(Color::Black));
    }

    #[test]
    fn test_table_presence_does_not_change_decision() {
        let params = SearchParams {
            max_depth: 3,
            ..SearchParams::default()
        };

        let mut board = winning_setup();
        let mut tt = TranspositionTable::new(12);
        let with_table =
            Searcher::new(&mut board, Some(&mut tt), &params, SearchLimits::default())
                .run()
                .unwrap();

        let mut board = winning_setup();
        let without_table = Searcher::new(&mut board, None, &params, SearchLimits::default())
            .run()
            .unwrap();

        assert_eq!(with_table.best_move, without_table.best_move);
        assert_eq!(is_winning(with_table.value), is_winning(without_table.value));
    }

    #[test]
    fn test_no_legal_moves_is_an_error() {
        let mut board = SearchBoard::new(1, 1).unwrap();
        board.position_mut().play(Cell::new(0, 0)).unwrap();
        let params = SearchParams::default();
        let err = Searcher::new(&mut board, None, &params, SearchLimits::default())
            .run()
            .unwrap_err();
        assert_eq!(err, EngineError::NoLegalMoves);
    }

    #[test]
    fn test_preset_stop_still_completes_one_depth() {
        let mut board = winning_setup();
        let stop = Arc::new(AtomicBool::new(true));
        let params = SearchParams {
            min_depth: 1,
            max_depth: 6,
            ..SearchParams::default()
        };
        let limits = SearchLimits {
            deadline: None,
            stop: Some(stop),
        };
        let outcome = Searcher::new(&mut board, None, &params, limits).run().unwrap();
        assert_eq!(outcome.depth_completed, 1);
        assert!(outcome.aborted);
    }

    #[test]
    fn test_expired_deadline_reports_completed_depth() {
        let mut board = SearchBoard::new(5, 5).unwrap();
        let params = SearchParams {
            min_depth: 1,
            max_depth: 8,
            ..SearchParams::default()
        };
        let limits = SearchLimits {
            deadline: Some(Instant::now()),
            stop: None,
        };
        let outcome = Searcher::new(&mut board, None, &params, limits).run().unwrap();
        assert!(outcome.aborted);
        assert_eq!(outcome.depth_completed, 1);
    }

    #[test]
    fn test_ply_width_one_still_returns_move() {
        let mut board = winning_setup();
        let params = SearchParams {
            max_depth: 2,
            ply_width: vec![1],
            ..SearchParams::default()
        };
        let outcome = Searcher::new(&mut board, None, &params, SearchLimits::default())
            .run()
            .unwrap();
        assert!(board.position().is_empty_cell(outcome.best_move));
    }
}
