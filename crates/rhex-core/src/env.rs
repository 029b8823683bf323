//! Per-algorithm board environment
//!
//! Each search algorithm (heuristic player, exact solver) owns one
//! `HexEnv`. Replacing the working board on a resize preserves every
//! toggle the user has set; syncing overwrites stones only.

use crate::board::SearchBoard;
use crate::errors::EngineError;
use crate::position::Position;

/// One algorithm's augmented board environment.
pub struct HexEnv {
    board: SearchBoard,
}

impl HexEnv {
    pub fn new(width: u8, height: u8) -> Result<Self, EngineError> {
        Ok(Self {
            board: SearchBoard::new(width, height)?,
        })
    }

    #[inline]
    pub fn board(&self) -> &SearchBoard {
        &self.board
    }

    #[inline]
    pub fn board_mut(&mut self) -> &mut SearchBoard {
        &mut self.board
    }

    /// Starts a new game, resizing the working board if the dimensions
    /// changed. All configuration survives the resize; only the working
    /// position and any oracle state built against it are discarded.
    /// With unchanged dimensions the board is kept as is (a rebuild
    /// would throw away pruning state for nothing) and just restarted.
    pub fn new_game(&mut self, width: u8, height: u8) -> Result<(), EngineError> {
        let pos = self.board.position();
        if pos.width() != width || pos.height() != height {
            let config = *self.board.config();
            let ice_param = *self.board.ice_param();
            let vc_param = *self.board.vc_param();
            let mut board = SearchBoard::new(width, height)?;
            *board.config_mut() = config;
            *board.ice_param_mut() = ice_param;
            *board.vc_param_mut() = vc_param;
            self.board = board;
        }
        self.board.position_mut().start_new_game();
        Ok(())
    }

    /// Overwrites the working position from a snapshot and hands back
    /// the board to drive a search against. Configuration is untouched.
    pub fn sync_board(&mut self, snapshot: &Position) -> &mut SearchBoard {
        self.board.position_mut().sync_from(snapshot);
        &mut self.board
    }
}
