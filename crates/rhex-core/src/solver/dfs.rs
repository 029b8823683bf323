//! Baseline exact solver
//!
//! Exhaustive depth-first proof over the oracle-pruned move set, with
//! the shared position cache short-circuiting transpositions. The
//! deadline and the stop flag are honored at node-count checkpoints;
//! hitting either yields `Unresolved`, never a wrong verdict.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use log::debug;

use super::{PositionCache, ProofSolver, SolverOutcome};
use crate::board::SearchBoard;
use crate::types::Color;

/// Nodes between deadline/stop checks.
const CHECKPOINT_INTERVAL: u64 = 1024;

/// Exhaustive solver; proves small or nearly decided positions.
#[derive(Debug, Default, Clone, Copy)]
pub struct DfsSolver;

impl DfsSolver {
    pub fn new() -> Self {
        Self
    }

    /// Winner of the current position, or `None` when interrupted.
    fn winner_of(
        &self,
        board: &mut SearchBoard,
        cache: &PositionCache,
        deadline: Instant,
        stop: &Arc<AtomicBool>,
        nodes: &mut u64,
    ) -> Option<Color> {
        if let Some(w) = board.position().winner() {
            return Some(w);
        }
        let key = board.position().key();
        if let Some(w) = cache.lookup(key) {
            return Some(w);
        }

        *nodes += 1;
        if *nodes % CHECKPOINT_INTERVAL == 0
            && (stop.load(Ordering::Relaxed) || Instant::now() >= deadline)
        {
            return None;
        }

        let us = board.position().to_move();
        let cands = board.candidates();
        for &mv in cands.iter() {
            if board.position_mut().play(mv).is_err() {
                continue;
            }
            let child = self.winner_of(board, cache, deadline, stop, nodes);
            board.position_mut().undo_play(mv);
            match child {
                None => return None,
                Some(w) if w == us => {
                    cache.insert(key, us);
                    return Some(us);
                }
                Some(_) => {}
            }
        }
        // Every reply loses; the position is lost for the mover.
        let loser_verdict = us.opponent();
        cache.insert(key, loser_verdict);
        Some(loser_verdict)
    }
}

impl ProofSolver for DfsSolver {
    fn try_solve(
        &self,
        board: &mut SearchBoard,
        cache: &Arc<PositionCache>,
        deadline: Instant,
        stop: &Arc<AtomicBool>,
    ) -> SolverOutcome {
        if let Some(winner) = board.position().winner() {
            return SolverOutcome::Proven {
                winner,
                best_move: None,
            };
        }

        let us = board.position().to_move();
        let mut nodes = 0u64;
        let cands = board.candidates();
        for &mv in cands.iter() {
            if stop.load(Ordering::Relaxed) || Instant::now() >= deadline {
                return SolverOutcome::Unresolved;
            }
            if board.position_mut().play(mv).is_err() {
                continue;
            }
            let child = self.winner_of(board, cache, deadline, stop, &mut nodes);
            board.position_mut().undo_play(mv);
            match child {
                None => return SolverOutcome::Unresolved,
                Some(w) if w == us => {
                    debug!("solver proved win for {us} with {mv} after {nodes} nodes");
                    cache.insert(board.position().key(), us);
                    return SolverOutcome::Proven {
                        winner: us,
                        best_move: Some(mv),
                    };
                }
                Some(_) => {}
            }
        }

        debug!("solver proved loss for {us} after {nodes} nodes");
        let winner = us.opponent();
        cache.insert(board.position().key(), winner);
        SolverOutcome::Proven {
            winner,
            best_move: None,
        }
    }
}
