//! Game record
//!
//! The caller-owned record of the game in progress: current position,
//! move history, and the remaining wall clock per color. Searches read
//! it; only the command layer mutates it.

use std::time::Duration;

use crate::errors::EngineError;
use crate::position::Position;
use crate::types::{Color, Move};

/// Clock value assigned when no time settings were given.
const DEFAULT_REMAINING: Duration = Duration::from_secs(0);

/// The game in progress.
#[derive(Clone, Debug)]
pub struct Game {
    position: Position,
    history: Vec<Move>,
    remaining: [Duration; Color::NUM],
}

impl Game {
    pub fn new(width: u8, height: u8) -> Result<Self, EngineError> {
        Ok(Self {
            position: Position::new(width, height)?,
            history: Vec::new(),
            remaining: [DEFAULT_REMAINING; Color::NUM],
        })
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    #[inline]
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    #[inline]
    pub fn moves_played(&self) -> usize {
        self.history.len()
    }

    /// Remaining clock time for `color`; zero when no clock is in use.
    #[inline]
    pub fn time_remaining(&self, color: Color) -> Duration {
        self.remaining[color.index()]
    }

    pub fn set_time_remaining(&mut self, color: Color, remaining: Duration) {
        self.remaining[color.index()] = remaining;
    }

    /// Starts a fresh game, resizing the board if asked. Clocks are
    /// kept; they belong to the match, not to one game.
    pub fn new_game(&mut self, width: u8, height: u8) -> Result<(), EngineError> {
        if self.position.width() != width || self.position.height() != height {
            self.position = Position::new(width, height)?;
        } else {
            self.position.start_new_game();
        }
        self.history.clear();
        Ok(())
    }

    /// Commits a move for `color` to the record.
    pub fn play(&mut self, color: Color, mv: Move) -> Result<(), EngineError> {
        self.position.set_to_move(color);
        match mv {
            Move::Play(cell) => self.position.play(cell)?,
            Move::Swap => self.position.apply_swap()?,
        }
        self.history.push(mv);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    #[test]
    fn test_game_records_history() {
        let mut g = Game::new(5, 5).unwrap();
        g.play(Color::Black, Move::Play(Cell::new(2, 2))).unwrap();
        g.play(Color::White, Move::Play(Cell::new(1, 1))).unwrap();
        assert_eq!(g.moves_played(), 2);
        assert_eq!(g.position().stones_on_board(), 2);
    }

    #[test]
    fn test_new_game_clears_history_keeps_clock() {
        let mut g = Game::new(5, 5).unwrap();
        g.set_time_remaining(Color::Black, Duration::from_secs(60));
        g.play(Color::Black, Move::Play(Cell::new(0, 0))).unwrap();
        g.new_game(5, 5).unwrap();
        assert_eq!(g.moves_played(), 0);
        assert_eq!(g.position().stones_on_board(), 0);
        assert_eq!(g.time_remaining(Color::Black), Duration::from_secs(60));
    }

    #[test]
    fn test_swap_as_second_move() {
        let mut g = Game::new(5, 5).unwrap();
        g.play(Color::Black, Move::Play(Cell::new(2, 2))).unwrap();
        g.play(Color::White, Move::Swap).unwrap();
        assert_eq!(g.moves_played(), 2);
        assert_eq!(g.position().to_move(), Color::Black);
    }
}
