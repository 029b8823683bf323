//! Augmented search board
//!
//! A `SearchBoard` wraps one mutable working `Position` together with a
//! pruning oracle and the feature toggles that decide which of the
//! oracle's capabilities are consulted. The heuristic player and the
//! exact solver each own one; the two never share mutable state.

use crate::oracle::{Candidates, IceParam, LocalOracle, PruningOracle, VcBuildParam};
use crate::position::Position;

/// Feature toggles of one augmented board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BoardConfig {
    /// Consult the oracle's connection ordering.
    pub use_vcs: bool,
    /// Consult the oracle's inferior-cell pruning.
    pub use_ice: bool,
    /// Split the board into independent regions when possible.
    pub use_decompositions: bool,
    /// Propagate inferior-cell conclusions back up the search.
    pub backup_ice_info: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            use_vcs: true,
            use_ice: true,
            use_decompositions: false,
            backup_ice_info: true,
        }
    }
}

/// Working position plus oracle plus configuration.
pub struct SearchBoard {
    position: Position,
    config: BoardConfig,
    ice_param: IceParam,
    vc_param: VcBuildParam,
    oracle: Box<dyn PruningOracle>,
}

impl SearchBoard {
    /// Creates a board with the baseline oracle attached.
    pub fn new(width: u8, height: u8) -> Result<Self, crate::EngineError> {
        Ok(Self {
            position: Position::new(width, height)?,
            config: BoardConfig::default(),
            ice_param: IceParam::default(),
            vc_param: VcBuildParam::default(),
            oracle: Box::new(LocalOracle),
        })
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    #[inline]
    pub fn position_mut(&mut self) -> &mut Position {
        &mut self.position
    }

    #[inline]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    #[inline]
    pub fn config_mut(&mut self) -> &mut BoardConfig {
        &mut self.config
    }

    #[inline]
    pub fn ice_param(&self) -> &IceParam {
        &self.ice_param
    }

    #[inline]
    pub fn ice_param_mut(&mut self) -> &mut IceParam {
        &mut self.ice_param
    }

    #[inline]
    pub fn vc_param(&self) -> &VcBuildParam {
        &self.vc_param
    }

    #[inline]
    pub fn vc_param_mut(&mut self) -> &mut VcBuildParam {
        &mut self.vc_param
    }

    /// Replaces the attached oracle.
    pub fn set_oracle(&mut self, oracle: Box<dyn PruningOracle>) {
        self.oracle = oracle;
    }

    /// Candidate moves for the side to move: legal moves, pruned and
    /// ordered according to the active toggles.
    pub fn candidates(&self) -> Candidates {
        let mut cands: Candidates = self.position.legal_moves().into_iter().collect();
        if self.config.use_ice {
            self.oracle.remove_inferior(&self.position, &self.ice_param, &mut cands);
        }
        if self.config.use_vcs {
            self.oracle.order_by_connection(&self.position, &self.vc_param, &mut cands);
        }
        cands
    }
}
