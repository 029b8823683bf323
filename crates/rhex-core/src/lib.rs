//! rhex engine core
//!
//! A hybrid move-decision engine for the board game Hex. Two search
//! strategies share one clock: a depth-limited iterative-deepening
//! alpha-beta player and an exact solver, each working against its own
//! augmented board so that concurrent execution needs no board locking.
//!
//! Module map:
//! - `types`: colors, cells, moves, search values
//! - `position`: stone placement, Zobrist keys, connectivity
//! - `game`: the caller-owned game record (history + clocks)
//! - `board` / `env`: augmented board with pruning oracle and toggles
//! - `oracle`: the inferior-cell / connection-ordering seam
//! - `tt`: transposition table and its diagnostics
//! - `search`: heuristic iterative-deepening search
//! - `solver`: exact solving contract, baseline solver, position cache
//! - `time_control`: per-move budget allocation
//! - `swap`: opening pie-rule check
//! - `player` / `play_and_solve`: decision entry points

pub mod board;
pub mod env;
pub mod errors;
pub mod game;
pub mod oracle;
pub mod play_and_solve;
pub mod player;
pub mod position;
pub mod search;
pub mod solver;
pub mod swap;
pub mod time_control;
pub mod tt;
pub mod types;

pub use errors::EngineError;
pub use game::Game;
pub use position::Position;
pub use types::{Cell, Color, Move};
