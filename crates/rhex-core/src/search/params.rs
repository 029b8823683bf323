//! Heuristic search parameters
//!
//! The tuning surface exposed through `param_player`. `ply_width`
//! travels as a dash- or space-separated token string on the wire.

use serde::{Deserialize, Serialize};

/// Tuning knobs of the iterative-deepening search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    /// Deepest iteration to run, >= 1.
    pub max_depth: u32,
    /// First iteration to run, >= 1.
    pub min_depth: u32,
    /// Fixed per-move budget in seconds, used when time management is
    /// off.
    pub max_time: f64,
    /// Candidate cap per ply; the last entry extends to deeper plies.
    pub ply_width: Vec<usize>,
    /// Skip the search entirely when only one legal move exists.
    pub search_singleton: bool,
    /// Derive the budget from the game clock instead of `max_time`.
    pub use_time_management: bool,
    /// Propagate inferior-cell conclusions back up the search.
    pub backup_ice_info: bool,
    /// Emit GUI move-highlighting diagnostics. No effect on the
    /// decision.
    pub use_guifx: bool,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            max_depth: 4,
            min_depth: 1,
            max_time: 10.0,
            ply_width: vec![20, 20, 20, 20],
            search_singleton: true,
            use_time_management: false,
            backup_ice_info: true,
            use_guifx: false,
        }
    }
}

impl SearchParams {
    /// Candidate cap at `ply` (0-based from the root). An empty list
    /// means unlimited.
    #[inline]
    pub fn width_at(&self, ply: u32) -> usize {
        self.ply_width
            .get(ply as usize)
            .or_else(|| self.ply_width.last())
            .copied()
            .unwrap_or(usize::MAX)
    }
}

/// Parses a dash- or space-separated width list. Malformed tokens are
/// skipped; the parse itself never fails.
pub fn parse_ply_width(s: &str) -> Vec<usize> {
    s.split(['-', ' '])
        .filter_map(|tok| tok.parse::<usize>().ok())
        .filter(|&w| w > 0)
        .collect()
}

/// Formats a width list in the wire format.
pub fn print_ply_width(widths: &[usize]) -> String {
    widths
        .iter()
        .map(|w| w.to_string())
        .collect::<Vec<_>>()
        .join("-")
}
