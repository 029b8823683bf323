//! Static evaluation
//!
//! Connection-distance potential: the cheapest number of stones a side
//! still needs to place to link its two edges (own stones free, empty
//! cells cost one, opponent stones impassable), computed with a 0-1
//! BFS. The score is the opponent's need minus ours.

use std::collections::VecDeque;

use crate::position::Position;
use crate::types::{loss_in, win_in, Cell, Color, Value};

/// Scale applied to the distance difference.
const DISTANCE_WEIGHT: Value = 64;

/// Evaluates `pos` from `color`'s perspective.
pub fn evaluate(pos: &Position, color: Color, ply: u32) -> Value {
    if let Some(winner) = pos.winner() {
        return if winner == color { win_in(ply) } else { loss_in(ply) };
    }
    let my = connection_distance(pos, color);
    let opp = connection_distance(pos, color.opponent());
    match (my, opp) {
        (Some(m), Some(o)) => (o as Value - m as Value) * DISTANCE_WEIGHT,
        // A side with no path at all has already lost the connection
        // race even though the winning chain is not complete yet.
        (None, _) => loss_in(ply) / 2,
        (_, None) => win_in(ply) / 2,
    }
}

/// Stones `color` still needs to connect its edges, or `None` when the
/// opponent has cut every route.
pub fn connection_distance(pos: &Position, color: Color) -> Option<u32> {
    const UNSEEN: u32 = u32::MAX;
    let mut dist = vec![UNSEEN; pos.area()];
    let mut queue: VecDeque<Cell> = VecDeque::new();

    let enter_cost = |cell: Cell| -> Option<u32> {
        match pos.cell(cell) {
            Some(c) if c == color => Some(0),
            Some(_) => None,
            None => Some(1),
        }
    };

    // Seed from the owner's first edge.
    let first_edge: Vec<Cell> = match color {
        Color::Black => (0..pos.width()).map(|c| Cell::new(c, 0)).collect(),
        Color::White => (0..pos.height()).map(|r| Cell::new(0, r)).collect(),
    };
    for cell in first_edge {
        if let Some(cost) = enter_cost(cell) {
            let i = cell.index(pos.width());
            if cost < dist[i] {
                dist[i] = cost;
                if cost == 0 {
                    queue.push_front(cell);
                } else {
                    queue.push_back(cell);
                }
            }
        }
    }

    // 0-1 BFS relaxation.
    while let Some(cell) = queue.pop_front() {
        let d = dist[cell.index(pos.width())];
        for n in pos.neighbors(cell) {
            if let Some(cost) = enter_cost(n) {
                let i = n.index(pos.width());
                if d + cost < dist[i] {
                    dist[i] = d + cost;
                    if cost == 0 {
                        queue.push_front(n);
                    } else {
                        queue.push_back(n);
                    }
                }
            }
        }
    }

    let far_edge: Vec<Cell> = match color {
        Color::Black => (0..pos.width()).map(|c| Cell::new(c, pos.height() - 1)).collect(),
        Color::White => (0..pos.height()).map(|r| Cell::new(pos.width() - 1, r)).collect(),
    };
    far_edge
        .into_iter()
        .map(|c| dist[c.index(pos.width())])
        .min()
        .filter(|&d| d != UNSEEN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::is_losing;

    #[test]
    fn test_distance_on_empty_board() {
        let pos = Position::new(5, 5).unwrap();
        assert_eq!(connection_distance(&pos, Color::Black), Some(5));
        assert_eq!(connection_distance(&pos, Color::White), Some(5));
    }

    #[test]
    fn test_own_stones_shorten_distance() {
        let mut pos = Position::new(5, 5).unwrap();
        pos.play(Cell::new(2, 2)).unwrap();
        assert_eq!(connection_distance(&pos, Color::Black), Some(4));
    }

    #[test]
    fn test_blocked_side_has_no_distance() {
        let mut pos = Position::new(3, 3).unwrap();
        // White wall across row 1 cuts Black completely.
        pos.set_to_move(Color::White);
        for col in 0..3 {
            pos.play(Cell::new(col, 1)).unwrap();
            pos.set_to_move(Color::White);
        }
        assert_eq!(connection_distance(&pos, Color::Black), None);
    }

    #[test]
    fn test_eval_symmetry_on_empty_board() {
        let pos = Position::new(7, 7).unwrap();
        assert_eq!(evaluate(&pos, Color::Black, 0), 0);
        assert_eq!(evaluate(&pos, Color::White, 0), 0);
    }

    #[test]
    fn test_eval_sees_terminal_position() {
        let mut pos = Position::new(2, 2).unwrap();
        pos.play(Cell::new(0, 0)).unwrap();
        pos.set_to_move(Color::Black);
        pos.play(Cell::new(0, 1)).unwrap();
        assert!(is_losing(evaluate(&pos, Color::White, 0)));
    }
}
