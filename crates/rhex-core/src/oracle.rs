//! Pruning oracle seam
//!
//! The virtual-connection and inferior-cell engines proper are external
//! collaborators; the search core only consumes this seam: given a
//! position and a candidate set, drop cells that provably cannot matter
//! and order the rest by connection potential. `LocalOracle` is the
//! built-in baseline so the engine plays out of the box; a full VC/ICE
//! engine plugs in behind the same trait.

use smallvec::SmallVec;

use crate::position::Position;
use crate::types::{Cell, Color};

/// Candidate move buffer sized for common boards.
pub type Candidates = SmallVec<[Cell; 64]>;

/// Inferior-cell analysis tuning.
///
/// The baseline oracle honors `use_capture` and `iterative_dead_regions`;
/// the remaining flags are forwarded to plugged-in engines untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct IceParam {
    pub find_all_pattern_superiors: bool,
    pub find_all_pattern_killers: bool,
    pub find_presimplicial_pairs: bool,
    pub find_three_sided_dead_regions: bool,
    pub iterative_dead_regions: bool,
    pub use_capture: bool,
    pub find_reversible: bool,
    pub use_s_reversible_as_reversible: bool,
}

impl Default for IceParam {
    fn default() -> Self {
        Self {
            find_all_pattern_superiors: true,
            find_all_pattern_killers: true,
            find_presimplicial_pairs: true,
            find_three_sided_dead_regions: false,
            iterative_dead_regions: false,
            use_capture: true,
            find_reversible: false,
            use_s_reversible_as_reversible: false,
        }
    }
}

/// Virtual-connection builder tuning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VcBuildParam {
    pub and_over_edge: bool,
    pub use_patterns: bool,
    pub use_non_edge_patterns: bool,
    pub incremental_builds: bool,
    pub limit_fulls: bool,
    pub limit_or: bool,
}

impl Default for VcBuildParam {
    fn default() -> Self {
        Self {
            and_over_edge: false,
            use_patterns: true,
            use_non_edge_patterns: true,
            incremental_builds: true,
            limit_fulls: true,
            limit_or: true,
        }
    }
}

/// The pruning/ordering capability attached to an augmented board.
pub trait PruningOracle: Send {
    /// Removes candidates that provably cannot affect the game. Must
    /// never empty a non-empty candidate set.
    fn remove_inferior(&self, pos: &Position, param: &IceParam, cands: &mut Candidates);

    /// Orders candidates most-promising-first.
    fn order_by_connection(&self, pos: &Position, param: &VcBuildParam, cands: &mut Candidates);
}

/// Baseline oracle: dead-cell removal plus adjacency/center ordering.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalOracle;

impl LocalOracle {
    /// A cell whose entire neighborhood (stones and adjoining board
    /// edges) belongs to one color can never change either connection.
    fn is_dead(&self, pos: &Position, cell: Cell) -> bool {
        let mut owner: Option<Color> = None;
        // Board edges count as stones of the edge's owner.
        let on_black_edge = cell.row() == 0 || cell.row() == pos.height() - 1;
        let on_white_edge = cell.col() == 0 || cell.col() == pos.width() - 1;
        if on_black_edge && on_white_edge {
            return false;
        }
        if on_black_edge {
            owner = Some(Color::Black);
        }
        if on_white_edge {
            owner = Some(Color::White);
        }
        for n in pos.neighbors(cell) {
            match (pos.cell(n), owner) {
                (None, _) => return false,
                (Some(c), None) => owner = Some(c),
                (Some(c), Some(o)) if c != o => return false,
                _ => {}
            }
        }
        owner.is_some()
    }

    fn connection_score(&self, pos: &Position, cell: Cell) -> i32 {
        let us = pos.to_move();
        let mut score = 0;
        for n in pos.neighbors(cell) {
            match pos.cell(n) {
                Some(c) if c == us => score += 4,
                Some(_) => score += 1,
                None => {}
            }
        }
        // Center proximity, halved so adjacency dominates.
        let w = pos.width() as i32;
        let h = pos.height() as i32;
        let dc = (2 * cell.col() as i32 - (w - 1)).abs();
        let dr = (2 * cell.row() as i32 - (h - 1)).abs();
        score + (w + h - dc - dr) / 2
    }
}

impl PruningOracle for LocalOracle {
    fn remove_inferior(&self, pos: &Position, param: &IceParam, cands: &mut Candidates) {
        if !param.use_capture && !param.iterative_dead_regions {
            // Dead-cell analysis is the only local capability; both of
            // its driving flags off means nothing to do.
            return;
        }
        let kept: Candidates = cands
            .iter()
            .copied()
            .filter(|&c| !self.is_dead(pos, c))
            .collect();
        if !kept.is_empty() {
            *cands = kept;
        }
    }

    fn order_by_connection(&self, pos: &Position, _param: &VcBuildParam, cands: &mut Candidates) {
        cands.sort_by_key(|&c| -self.connection_score(pos, c));
    }
}
