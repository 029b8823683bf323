//! Table diagnostics
//!
//! Read-only queries the command layer offers against the current
//! table: principal variation, per-move scores, raw entry inspection.
//! Callers must not issue these while a search is writing the table.

use super::{TranspositionTable, TtEntry};
use crate::position::Position;
use crate::types::{Cell, Value};

/// Walks best moves from `pos` through the table.
pub fn extract_pv(pos: &Position, tt: &TranspositionTable) -> Vec<Cell> {
    let mut work = pos.clone();
    let mut pv = Vec::new();
    // Bounded by the board area; a corrupt chain cannot loop.
    while pv.len() < work.area() {
        let Some(entry) = tt.probe(work.key()) else {
            break;
        };
        let Some(mv) = entry.best_move else {
            break;
        };
        if work.play(mv).is_err() {
            break;
        }
        pv.push(mv);
    }
    pv
}

/// Score of every legal move whose child position is cached, from the
/// mover's perspective.
pub fn move_scores(pos: &Position, tt: &TranspositionTable) -> Vec<(Cell, Value)> {
    let mut work = pos.clone();
    let mut scores = Vec::new();
    for mv in pos.legal_moves() {
        if work.play(mv).is_err() {
            continue;
        }
        if let Some(entry) = tt.probe(work.key()) {
            scores.push((mv, -entry.value));
        }
        work.undo_play(mv);
    }
    scores
}

/// The raw entry cached for `pos`, if any.
pub fn current_data(pos: &Position, tt: &TranspositionTable) -> Option<TtEntry> {
    tt.probe(pos.key()).copied()
}
