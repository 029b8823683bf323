//! Exact solving
//!
//! - `ProofSolver`: the contract the orchestrator consumes
//! - `PositionCache`: proven verdicts shared across invocations
//! - `DfsSolver`: baseline exhaustive solver for small positions

mod cache;
mod dfs;

pub use cache::PositionCache;
pub use dfs::DfsSolver;

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Instant;

use crate::board::SearchBoard;
use crate::types::{Cell, Color};

/// Result of one solving attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverOutcome {
    /// The position is decided. `best_move` carries a winning move when
    /// the side to move wins; a proven loss has none.
    Proven {
        winner: Color,
        best_move: Option<Cell>,
    },
    /// Not determined within the budget.
    Unresolved,
}

/// Contract between the orchestrator and any exact solver.
///
/// Implementations must return [`SolverOutcome::Unresolved`] rather
/// than run past `deadline`, and must honor `stop` at their internal
/// checkpoints. Cache writes are monotonic: a position once proven is
/// never re-proven differently.
pub trait ProofSolver: Send {
    fn try_solve(
        &self,
        board: &mut SearchBoard,
        cache: &Arc<PositionCache>,
        deadline: Instant,
        stop: &Arc<AtomicBool>,
    ) -> SolverOutcome;
}
