//! End-to-end decision flow over the public API: swap check, time
//! budget, sequential search, and the concurrent race with the real
//! solver.

use std::sync::Arc;
use std::time::Duration;

use rhex_core::env::HexEnv;
use rhex_core::play_and_solve::PlayAndSolve;
use rhex_core::player::Player;
use rhex_core::search::SearchLimits;
use rhex_core::solver::{DfsSolver, PositionCache, ProofSolver, SolverOutcome};
use rhex_core::{swap, time_control, Cell, Color, Game, Move, Position};

#[test]
fn test_first_decision_swaps_center_opening() {
    let mut game = Game::new(11, 11).unwrap();
    game.play(Color::Black, Move::Play(Cell::new(5, 5))).unwrap();
    assert!(swap::play_swap(&game, Color::White));

    // Committing the swap flips stone ownership; no search ran.
    game.play(Color::White, Move::Swap).unwrap();
    assert_eq!(game.position().cell(Cell::new(5, 5)), Some(Color::White));
}

#[test]
fn test_sequential_decision_plays_legal_move() {
    let mut env = HexEnv::new(5, 5).unwrap();
    let mut player = Player::new();
    player.params_mut().max_depth = 2;

    let mut game = Game::new(5, 5).unwrap();
    game.play(Color::Black, Move::Play(Cell::new(2, 2))).unwrap();

    let mut snapshot = game.position().clone();
    snapshot.set_to_move(Color::White);
    let board = env.sync_board(&snapshot);
    let result = player
        .gen_move(board, Duration::from_secs(2), SearchLimits::default())
        .unwrap();
    assert!(snapshot.is_empty_cell(result.best_move));
}

#[test]
fn test_managed_budget_never_zero() {
    let mut game = Game::new(11, 11).unwrap();
    game.set_time_remaining(Color::Black, Duration::from_millis(5));
    let budget = time_control::time_for_move(&game, Color::Black);
    assert!(budget > Duration::ZERO);
}

#[test]
fn test_concurrent_race_preserves_first_player_win() {
    let mut player_env = HexEnv::new(3, 3).unwrap();
    let mut solver_env = HexEnv::new(3, 3).unwrap();
    let mut player = Player::new();
    // Keep the player deepening so the solver's proof decides the race.
    player.params_mut().max_depth = 12;
    let solver = DfsSolver::new();
    let cache = Arc::new(PositionCache::new());
    let snapshot = Position::new(3, 3).unwrap();

    let (mv, _) = PlayAndSolve::new(
        &mut player_env,
        &mut solver_env,
        &mut player,
        &solver,
        Arc::clone(&cache),
    )
    .gen_move(&snapshot, Duration::from_secs(60))
    .unwrap();

    // 3x3 Hex is a first-player win; the decision must keep it.
    let Move::Play(cell) = mv else {
        panic!("expected a placement");
    };
    let mut after = snapshot.clone();
    after.play(cell).unwrap();
    let mut board = rhex_core::board::SearchBoard::new(3, 3).unwrap();
    board.position_mut().sync_from(&after);
    let verdict = DfsSolver::new().try_solve(
        &mut board,
        &cache,
        std::time::Instant::now() + Duration::from_secs(60),
        &Arc::new(std::sync::atomic::AtomicBool::new(false)),
    );
    assert_eq!(
        verdict,
        SolverOutcome::Proven {
            winner: Color::Black,
            best_move: None,
        }
    );
}
