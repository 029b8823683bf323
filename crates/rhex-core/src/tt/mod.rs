//! Transposition table
//!
//! - `TtEntry`: one cached search result
//! - `TranspositionTable`: power-of-two table, replace-if-deeper
//! - `diag`: PV extraction and score listing against the table

pub mod diag;
mod table;

pub use table::{TranspositionTable, TtEntry};

/// Bound classification of a cached value, per the alpha-beta outcome
/// that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// Score inside the window (PV node).
    Exact,
    /// Fail high; the score is only a lower bound.
    Lower,
    /// Fail low; the score is only an upper bound.
    Upper,
}
