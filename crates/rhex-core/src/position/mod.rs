//! Stone placement and connectivity
//!
//! `Position` is the raw game state: stones, side to move, and an
//! incrementally maintained Zobrist key. Searches never share one
//! mutable `Position`; each augmented board owns its own working copy.

mod zobrist;

pub use zobrist::{side_key, stone_key, ZOBRIST};

use crate::errors::EngineError;
use crate::types::{Cell, Color};

/// Maximum supported board edge length.
pub const MAX_BOARD_SIZE: u8 = 13;

/// Maximum supported board area.
pub const MAX_AREA: usize = (MAX_BOARD_SIZE as usize) * (MAX_BOARD_SIZE as usize);

/// Neighbor offsets on the hex grid (parallelogram representation).
const NEIGHBORS: [(i16, i16); 6] = [(-1, 0), (1, 0), (0, -1), (0, 1), (1, -1), (-1, 1)];

/// A Hex position: stones, side to move, Zobrist key.
#[derive(Clone, Debug)]
pub struct Position {
    width: u8,
    height: u8,
    cells: Vec<Option<Color>>,
    to_move: Color,
    key: u64,
    stones: u32,
}

impl Position {
    /// Creates an empty position. Black moves first.
    pub fn new(width: u8, height: u8) -> Result<Self, EngineError> {
        if width == 0 || height == 0 || width > MAX_BOARD_SIZE || height > MAX_BOARD_SIZE {
            return Err(EngineError::BadBoardSize(format!("{width}x{height}")));
        }
        Ok(Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
            to_move: Color::Black,
            key: 0,
            stones: 0,
        })
    }

    #[inline]
    pub fn width(&self) -> u8 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u8 {
        self.height
    }

    #[inline]
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    #[inline]
    pub fn to_move(&self) -> Color {
        self.to_move
    }

    /// Zobrist key including the side-to-move component.
    #[inline]
    pub fn key(&self) -> u64 {
        self.key
    }

    #[inline]
    pub fn stones_on_board(&self) -> u32 {
        self.stones
    }

    #[inline]
    pub fn empty_count(&self) -> usize {
        self.area() - self.stones as usize
    }

    #[inline]
    pub fn is_on_board(&self, cell: Cell) -> bool {
        cell.col() < self.width && cell.row() < self.height
    }

    /// Stone on `cell`, if any.
    #[inline]
    pub fn cell(&self, cell: Cell) -> Option<Color> {
        self.cells[cell.index(self.width)]
    }

    #[inline]
    pub fn is_empty_cell(&self, cell: Cell) -> bool {
        self.is_on_board(cell) && self.cell(cell).is_none()
    }

    /// Clears all stones and hands the move to Black.
    pub fn start_new_game(&mut self) {
        self.cells.fill(None);
        self.to_move = Color::Black;
        self.key = 0;
        self.stones = 0;
    }

    /// Sets the side to move, keeping the key consistent.
    pub fn set_to_move(&mut self, color: Color) {
        if self.to_move != color {
            self.to_move = color;
            self.key ^= side_key();
        }
    }

    /// Overwrites stones and side to move from a snapshot. Dimensions
    /// follow the snapshot; configuration held by callers is untouched.
    pub fn sync_from(&mut self, other: &Position) {
        self.width = other.width;
        self.height = other.height;
        self.cells.clear();
        self.cells.extend_from_slice(&other.cells);
        self.to_move = other.to_move;
        self.key = other.key;
        self.stones = other.stones;
    }

    /// Plays a stone for the side to move and flips the turn.
    pub fn play(&mut self, cell: Cell) -> Result<(), EngineError> {
        if !self.is_on_board(cell) || self.cell(cell).is_some() {
            return Err(EngineError::InvalidMove(cell.to_string()));
        }
        let color = self.to_move;
        self.cells[cell.index(self.width)] = Some(color);
        self.key ^= stone_key(color, cell, self.width);
        self.key ^= side_key();
        self.to_move = color.opponent();
        self.stones += 1;
        Ok(())
    }

    /// Undoes the most recent [`Position::play`] of `cell`.
    pub fn undo_play(&mut self, cell: Cell) {
        let color = self.to_move.opponent();
        debug_assert_eq!(self.cell(cell), Some(color));
        self.cells[cell.index(self.width)] = None;
        self.key ^= stone_key(color, cell, self.width);
        self.key ^= side_key();
        self.to_move = color;
        self.stones -= 1;
    }

    /// Applies the pie rule: the single opening stone changes owner and
    /// is mirrored across the long diagonal.
    pub fn apply_swap(&mut self) -> Result<(), EngineError> {
        if self.stones != 1 {
            return Err(EngineError::InvalidMove(
                "swap-pieces requires exactly one stone".to_string(),
            ));
        }
        let (cell, color) = self
            .occupied_cells()
            .next()
            .expect("one stone on board");
        self.cells[cell.index(self.width)] = None;
        self.key ^= stone_key(color, cell, self.width);

        // Mirroring assumes a square board; on rectangular boards the
        // stone changes owner in place.
        let mirrored = if self.width == self.height {
            cell.mirrored()
        } else {
            cell
        };
        let taken = color.opponent();
        self.cells[mirrored.index(self.width)] = Some(taken);
        self.key ^= stone_key(taken, mirrored, self.width);

        self.key ^= side_key();
        self.to_move = color;
        Ok(())
    }

    /// All empty cells, row-major.
    pub fn legal_moves(&self) -> Vec<Cell> {
        (0..self.area())
            .filter(|&i| self.cells[i].is_none())
            .map(|i| Cell::from_index(i, self.width))
            .collect()
    }

    /// Occupied cells with their colors.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (Cell, Color)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.map(|color| (Cell::from_index(i, self.width), color)))
    }

    /// On-board neighbors of `cell` on the hex grid.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        NEIGHBORS.iter().filter_map(move |&(dc, dr)| {
            let col = cell.col() as i16 + dc;
            let row = cell.row() as i16 + dr;
            if col >= 0 && row >= 0 && (col as u8) < self.width && (row as u8) < self.height {
                Some(Cell::new(col as u8, row as u8))
            } else {
                None
            }
        })
    }

    /// The connected winner, if either side has linked its edges.
    ///
    /// Black owns the top and bottom edges, White the left and right.
    /// Hex admits no draws, so a filled board always has a winner.
    pub fn winner(&self) -> Option<Color> {
        if self.connects_edges(Color::Black) {
            Some(Color::Black)
        } else if self.connects_edges(Color::White) {
            Some(Color::White)
        } else {
            None
        }
    }

    fn connects_edges(&self, color: Color) -> bool {
        let mut visited = vec![false; self.area()];
        let mut stack: Vec<Cell> = Vec::new();

        // Seed from the owner's first edge.
        match color {
            Color::Black => {
                for col in 0..self.width {
                    let c = Cell::new(col, 0);
                    if self.cell(c) == Some(color) {
                        visited[c.index(self.width)] = true;
                        stack.push(c);
                    }
                }
            }
            Color::White => {
                for row in 0..self.height {
                    let c = Cell::new(0, row);
                    if self.cell(c) == Some(color) {
                        visited[c.index(self.width)] = true;
                        stack.push(c);
                    }
                }
            }
        }

        while let Some(cell) = stack.pop() {
            let reached = match color {
                Color::Black => cell.row() == self.height - 1,
                Color::White => cell.col() == self.width - 1,
            };
            if reached {
                return true;
            }
            for n in self.neighbors(cell) {
                let i = n.index(self.width);
                if !visited[i] && self.cell(n) == Some(color) {
                    visited[i] = true;
                    stack.push(n);
                }
            }
        }
        false
    }
}

impl std::fmt::Display for Position {
    /// Slanted ASCII rendering, rows shifted to show the hex geometry.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "  ")?;
        for col in 0..self.width {
            write!(f, "{} ", (b'a' + col) as char)?;
        }
        writeln!(f)?;
        for row in 0..self.height {
            write!(f, "{:>2}{}", row + 1, " ".repeat(row as usize))?;
            for col in 0..self.width {
                let ch = match self.cell(Cell::new(col, row)) {
                    Some(Color::Black) => 'B',
                    Some(Color::White) => 'W',
                    None => '.',
                };
                write!(f, " {ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
