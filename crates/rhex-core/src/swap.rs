//! Opening pie-rule check
//!
//! Consulted once per game, before any search: when the opponent's
//! opening stone is strong, the side to move takes it over instead of
//! searching. Never consulted again after the second move.

use crate::game::Game;
use crate::types::{Color, Move};

/// True when the engine should answer the opening with the swap move.
///
/// The opening stone is considered strong when it keeps a margin of at
/// least a quarter of the board span to every edge; edge and
/// near-corner openings are left alone.
pub fn play_swap(game: &Game, to_move: Color) -> bool {
    if game.moves_played() != 1 {
        return false;
    }
    let Some(Move::Play(cell)) = game.history().first().copied() else {
        return false;
    };
    // The opener owns the stone; only the other side may swap.
    if game.position().cell(cell) == Some(to_move) {
        return false;
    }

    let pos = game.position();
    let span = pos.width().min(pos.height());
    let margin = cell
        .col()
        .min(pos.width() - 1 - cell.col())
        .min(cell.row())
        .min(pos.height() - 1 - cell.row());
    margin >= span / 4
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    fn game_after_opening(cell: Cell) -> Game {
        let mut game = Game::new(11, 11).unwrap();
        game.play(Color::Black, Move::Play(cell)).unwrap();
        game
    }

    #[test]
    fn test_swap_center_opening() {
        let game = game_after_opening(Cell::new(5, 5));
        assert!(play_swap(&game, Color::White));
    }

    #[test]
    fn test_keep_corner_opening() {
        let game = game_after_opening(Cell::new(0, 0));
        assert!(!play_swap(&game, Color::White));
    }

    #[test]
    fn test_keep_edge_opening() {
        let game = game_after_opening(Cell::new(0, 5));
        assert!(!play_swap(&game, Color::White));
    }

    #[test]
    fn test_no_swap_after_second_move() {
        let mut game = game_after_opening(Cell::new(5, 5));
        game.play(Color::White, Move::Play(Cell::new(4, 4))).unwrap();
        assert!(!play_swap(&game, Color::Black));
    }

    #[test]
    fn test_no_swap_on_empty_board() {
        let game = Game::new(11, 11).unwrap();
        assert!(!play_swap(&game, Color::Black));
    }
}
