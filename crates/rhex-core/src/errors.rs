//! Engine error taxonomy
//!
//! Configuration and usage errors are synchronous and recoverable; a
//! timeout is never an error (it is the normal terminating condition of
//! a timed search).

use thiserror::Error;

/// Errors surfaced to the command layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Wrong argument count or malformed argument for a command.
    #[error("{0}")]
    Usage(String),

    /// Parameter name not in the closed parameter set.
    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),

    /// Diagnostic query against a disabled transposition table.
    #[error("No hashtable!")]
    NoTable,

    /// The position offers no legal move; the caller violated the
    /// engine precondition.
    #[error("No legal moves in position")]
    NoLegalMoves,

    /// A move string or move application that the board rejects.
    #[error("Invalid move: {0}")]
    InvalidMove(String),

    /// Board dimensions outside the supported range.
    #[error("Unsupported board size: {0}")]
    BadBoardSize(String),
}
