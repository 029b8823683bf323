//! Search values
//!
//! Plain centipawn-style integers. Win and loss scores are offset by
//! the ply at which they occur so that shorter wins rank higher.

/// Search score from the side to move's perspective.
pub type Value = i32;

/// Upper bound on any score; used as the initial alpha-beta window.
pub const INFINITY: Value = 32000;

/// Score of a proven win at the root.
pub const WIN_VALUE: Value = 30000;

/// Score of a proven loss at the root.
pub const LOSS_VALUE: Value = -WIN_VALUE;

/// Win detected `ply` plies below the root.
#[inline]
pub const fn win_in(ply: u32) -> Value {
    WIN_VALUE - ply as Value
}

/// Loss detected `ply` plies below the root.
#[inline]
pub const fn loss_in(ply: u32) -> Value {
    -win_in(ply)
}

/// True for any score that can only come from a proven win.
#[inline]
pub const fn is_winning(v: Value) -> bool {
    v > WIN_VALUE - 1000
}

/// True for any score that can only come from a proven loss.
#[inline]
pub const fn is_losing(v: Value) -> bool {
    v < LOSS_VALUE + 1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorter_win_ranks_higher() {
        assert!(win_in(2) > win_in(4));
        assert!(loss_in(2) < loss_in(4));
    }

    #[test]
    fn test_win_loss_classification() {
        assert!(is_winning(win_in(10)));
        assert!(is_losing(loss_in(10)));
        assert!(!is_winning(500));
        assert!(!is_losing(-500));
    }
}
