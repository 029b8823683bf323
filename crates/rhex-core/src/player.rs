//! Heuristic player
//!
//! Owns the search parameters and the optional transposition table,
//! and turns one position plus one budget into one move.

use std::time::{Duration, Instant};

use log::info;

use crate::board::SearchBoard;
use crate::errors::EngineError;
use crate::search::{SearchLimits, SearchParams, Searcher};
use crate::tt::TranspositionTable;
use crate::types::{Cell, Value};

/// Default transposition table size exponent.
pub const DEFAULT_TT_BITS: u32 = 20;

/// Result of one heuristic decision.
#[derive(Debug, Clone)]
pub struct PlayerResult {
    pub best_move: Cell,
    pub value: Value,
    /// Nodes expanded; zero for the singleton short-circuit.
    pub nodes: u64,
    /// Deepest completed iteration; zero for the singleton
    /// short-circuit.
    pub depth: u32,
    pub pv: Vec<Cell>,
}

/// The heuristic side of the decision engine.
pub struct Player {
    params: SearchParams,
    tt: Option<TranspositionTable>,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            params: SearchParams::default(),
            tt: Some(TranspositionTable::new(DEFAULT_TT_BITS)),
        }
    }

    #[inline]
    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    #[inline]
    pub fn params_mut(&mut self) -> &mut SearchParams {
        &mut self.params
    }

    #[inline]
    pub fn table(&self) -> Option<&TranspositionTable> {
        self.tt.as_ref()
    }

    #[inline]
    pub fn table_mut(&mut self) -> Option<&mut TranspositionTable> {
        self.tt.as_mut()
    }

    /// Resizes the table to `2^bits` entries, discarding its contents;
    /// zero disables memoization entirely.
    pub fn set_table_bits(&mut self, bits: u32) {
        self.tt = if bits == 0 {
            None
        } else {
            Some(TranspositionTable::new(bits))
        };
    }

    /// Table size exponent; zero when the table is disabled.
    pub fn table_bits(&self) -> u32 {
        self.tt.as_ref().map_or(0, |t| t.bits())
    }

    /// Picks a move for the position on `board` within `budget`.
    pub fn gen_move(
        &mut self,
        board: &mut SearchBoard,
        budget: Duration,
        limits: SearchLimits,
    ) -> Result<PlayerResult, EngineError> {
        let cands = board.candidates();
        if cands.is_empty() {
            return Err(EngineError::NoLegalMoves);
        }
        if self.params.search_singleton && cands.len() == 1 {
            info!("singleton {}; skipping search", cands[0]);
            return Ok(PlayerResult {
                best_move: cands[0],
                value: 0,
                nodes: 0,
                depth: 0,
                pv: vec![cands[0]],
            });
        }

        let limits = SearchLimits {
            deadline: Some(
                limits
                    .deadline
                    .unwrap_or_else(|| Instant::now() + budget),
            ),
            stop: limits.stop,
        };
        let outcome =
            Searcher::new(board, self.tt.as_mut(), &self.params, limits).run()?;
        info!(
            "search: {} value {} depth {} nodes {} in {:?}{}",
            outcome.best_move,
            outcome.value,
            outcome.depth_completed,
            outcome.nodes,
            outcome.elapsed,
            if outcome.aborted { " (cut)" } else { "" }
        );
        Ok(PlayerResult {
            best_move: outcome.best_move,
            value: outcome.value,
            nodes: outcome.nodes,
            depth: outcome.depth_completed,
            pv: outcome.pv,
        })
    }
}
