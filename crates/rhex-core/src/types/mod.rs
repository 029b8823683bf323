//! Core value types shared across the engine.

mod cell;
mod color;
mod moves;
mod value;

pub use cell::Cell;
pub use color::Color;
pub use moves::Move;
pub use moves::SWAP_TOKEN;
pub use value::{is_losing, is_winning, loss_in, win_in, Value, INFINITY, LOSS_VALUE, WIN_VALUE};
