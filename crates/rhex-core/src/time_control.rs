//! Per-move time allocation
//!
//! Splits the remaining game clock across the moves the game is still
//! expected to last. The estimate is driven by the board fill ratio, so
//! early moves get a larger slice and the allocation tapers as the game
//! shortens. Deterministic: equal inputs yield equal budgets.

use std::time::Duration;

use crate::game::Game;
use crate::types::Color;

/// Lower bound on any budget while the clock is positive.
const MIN_BUDGET: Duration = Duration::from_millis(100);

/// Divisor turning empty cells into an expected-moves estimate: one
/// side fills roughly a third of the open board in a typical game.
const MOVES_PER_EMPTY_CELLS: usize = 3;

/// Floor on the expected remaining moves, so one move never gets the
/// whole clock.
const MIN_MOVES_LEFT: usize = 8;

/// Budget for the next move of `color` from its remaining clock.
pub fn time_for_move(game: &Game, color: Color) -> Duration {
    let remaining = game.time_remaining(color);
    if remaining.is_zero() {
        return MIN_BUDGET;
    }
    let moves_left = (game.position().empty_count() / MOVES_PER_EMPTY_CELLS).max(MIN_MOVES_LEFT);
    let budget = remaining / moves_left as u32;
    budget.max(MIN_BUDGET)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    #[test]
    fn test_budget_deterministic() {
        let mut game = Game::new(11, 11).unwrap();
        game.set_time_remaining(Color::Black, Duration::from_secs(300));
        let a = time_for_move(&game, Color::Black);
        let b = time_for_move(&game, Color::Black);
        assert_eq!(a, b);
    }

    #[test]
    fn test_budget_monotonic_in_remaining() {
        let mut game = Game::new(11, 11).unwrap();
        game.set_time_remaining(Color::Black, Duration::from_secs(600));
        let rich = time_for_move(&game, Color::Black);
        game.set_time_remaining(Color::Black, Duration::from_secs(60));
        let poor = time_for_move(&game, Color::Black);
        assert!(rich > poor);
    }

    #[test]
    fn test_budget_never_zero() {
        let mut game = Game::new(11, 11).unwrap();
        game.set_time_remaining(Color::White, Duration::from_millis(1));
        assert!(time_for_move(&game, Color::White) >= MIN_BUDGET);
        game.set_time_remaining(Color::White, Duration::ZERO);
        assert!(time_for_move(&game, Color::White) >= MIN_BUDGET);
    }

    #[test]
    fn test_budget_grows_as_board_fills() {
        // Same clock, fuller board: fewer expected moves, larger slice.
        let mut game = Game::new(11, 11).unwrap();
        game.set_time_remaining(Color::Black, Duration::from_secs(300));
        let early = time_for_move(&game, Color::Black);

        let mut color = Color::Black;
        for col in 0..11 {
            for row in 0..6 {
                game.play(color, crate::types::Move::Play(Cell::new(col, row))).unwrap();
                color = color.opponent();
            }
        }
        let late = time_for_move(&game, Color::Black);
        assert!(late >= early);
    }
}
