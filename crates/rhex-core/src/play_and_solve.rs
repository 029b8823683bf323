//! Decision orchestrator
//!
//! Runs the heuristic player and the exact solver concurrently against
//! the same logical position, each on its own board environment, and
//! resolves their outputs into one move:
//!
//! 1. a solver proof delivered before the deadline is authoritative;
//! 2. at the deadline the player's best-at-deepest-completed-depth
//!    wins and the solver is cancelled;
//! 3. a player that finishes naturally while the solver is still
//!    unresolved cancels the solver without waiting out the budget.
//!
//! Cancellation is cooperative: each search polls its flag at its own
//! safe points and finishes the unit of work in flight first.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};

use log::info;

use crate::env::HexEnv;
use crate::errors::EngineError;
use crate::player::{Player, PlayerResult};
use crate::position::Position;
use crate::search::SearchLimits;
use crate::solver::{PositionCache, ProofSolver, SolverOutcome};
use crate::types::{Move, Value, LOSS_VALUE, WIN_VALUE};

enum Raced {
    Player(Result<PlayerResult, EngineError>),
    Solver(SolverOutcome),
}

/// One concurrent decision over two board environments.
pub struct PlayAndSolve<'a, S: ProofSolver + Sync> {
    player_env: &'a mut HexEnv,
    solver_env: &'a mut HexEnv,
    player: &'a mut Player,
    solver: &'a S,
    cache: Arc<PositionCache>,
}

impl<'a, S: ProofSolver + Sync> PlayAndSolve<'a, S> {
    pub fn new(
        player_env: &'a mut HexEnv,
        solver_env: &'a mut HexEnv,
        player: &'a mut Player,
        solver: &'a S,
        cache: Arc<PositionCache>,
    ) -> Self {
        Self {
            player_env,
            solver_env,
            player,
            solver,
            cache,
        }
    }

    /// Races the two searches and resolves their outputs.
    pub fn gen_move(
        &mut self,
        snapshot: &Position,
        budget: Duration,
    ) -> Result<(Move, Value), EngineError> {
        let deadline = Instant::now() + budget;
        let to_move = snapshot.to_move();
        let player_stop = Arc::new(AtomicBool::new(false));
        let solver_stop = Arc::new(AtomicBool::new(false));
        let (tx, rx) = mpsc::channel::<Raced>();

        let player_board = self.player_env.sync_board(snapshot);
        let solver_board = self.solver_env.sync_board(snapshot);
        let player = &mut *self.player;
        let solver = self.solver;
        let cache = Arc::clone(&self.cache);

        thread::scope(|s| {
            let ptx = tx.clone();
            let pstop = Arc::clone(&player_stop);
            s.spawn(move || {
                let limits = SearchLimits {
                    deadline: Some(deadline),
                    stop: Some(pstop),
                };
                let _ = ptx.send(Raced::Player(player.gen_move(player_board, budget, limits)));
            });

            let sstop = Arc::clone(&solver_stop);
            s.spawn(move || {
                let outcome = solver.try_solve(solver_board, &cache, deadline, &sstop);
                let _ = tx.send(Raced::Solver(outcome));
            });

            // A proven loss needs the player's move as its carrier; a
            // losing side still has to put a stone somewhere.
            let mut proven_loss = false;
            loop {
                match rx.recv() {
                    Ok(Raced::Solver(SolverOutcome::Proven { winner, best_move })) => {
                        player_stop.store(true, Ordering::Relaxed);
                        if winner == to_move {
                            if let Some(mv) = best_move {
                                info!("solver proved win for {to_move}: {mv}");
                                return Ok((Move::Play(mv), WIN_VALUE));
                            }
                        } else {
                            info!("solver proved loss for {to_move}");
                        }
                        proven_loss = winner != to_move;
                    }
                    Ok(Raced::Solver(SolverOutcome::Unresolved)) => {
                        // The player decides; nothing to do but wait.
                    }
                    Ok(Raced::Player(result)) => {
                        solver_stop.store(true, Ordering::Relaxed);
                        let result = result?;
                        let value = if proven_loss { LOSS_VALUE } else { result.value };
                        return Ok((Move::Play(result.best_move), value));
                    }
                    Err(_) => {
                        // Both searches gone without a decision; cannot
                        // happen while the player sends exactly once.
                        return Err(EngineError::NoLegalMoves);
                    }
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::SearchBoard;
    use crate::solver::DfsSolver;
    use crate::types::{Cell, Color};

    /// Solver stub that proves a fixed verdict instantly.
    struct FixedSolver(SolverOutcome);

    impl ProofSolver for FixedSolver {
        fn try_solve(
            &self,
            _board: &mut SearchBoard,
            _cache: &Arc<PositionCache>,
            _deadline: Instant,
            _stop: &Arc<AtomicBool>,
        ) -> SolverOutcome {
            self.0
        }
    }

    fn slow_player() -> Player {
        // Deep enough that the player never finishes naturally before
        // the race is decided by the solver or the deadline.
        let mut player = Player::new();
        player.params_mut().max_depth = 12;
        player
    }

    #[test]
    fn test_solver_proof_overrides_heuristic() {
        let mut player_env = HexEnv::new(5, 5).unwrap();
        let mut solver_env = HexEnv::new(5, 5).unwrap();
        let mut player = slow_player();
        // A corner move no heuristic ordering would put first.
        let solver = FixedSolver(SolverOutcome::Proven {
            winner: Color::Black,
            best_move: Some(Cell::new(4, 4)),
        });
        let cache = Arc::new(PositionCache::new());
        let snapshot = Position::new(5, 5).unwrap();

        let mut ps =
            PlayAndSolve::new(&mut player_env, &mut solver_env, &mut player, &solver, cache);
        let (mv, value) = ps.gen_move(&snapshot, Duration::from_secs(10)).unwrap();
        assert_eq!(mv, Move::Play(Cell::new(4, 4)));
        assert_eq!(value, WIN_VALUE);
    }

    #[test]
    fn test_unresolved_solver_yields_heuristic_move() {
        let mut player_env = HexEnv::new(5, 5).unwrap();
        let mut solver_env = HexEnv::new(5, 5).unwrap();
        let mut player = slow_player();
        let solver = FixedSolver(SolverOutcome::Unresolved);
        let cache = Arc::new(PositionCache::new());
        let snapshot = Position::new(5, 5).unwrap();

        let mut ps =
            PlayAndSolve::new(&mut player_env, &mut solver_env, &mut player, &solver, cache);
        let (mv, _) = ps.gen_move(&snapshot, Duration::from_millis(200)).unwrap();
        let Move::Play(cell) = mv else {
            panic!("expected a placement");
        };
        assert!(snapshot.is_empty_cell(cell));
    }

    #[test]
    fn test_proven_loss_keeps_heuristic_carrier() {
        let mut player_env = HexEnv::new(5, 5).unwrap();
        let mut solver_env = HexEnv::new(5, 5).unwrap();
        let mut player = slow_player();
        let solver = FixedSolver(SolverOutcome::Proven {
            winner: Color::White,
            best_move: None,
        });
        let cache = Arc::new(PositionCache::new());
        let snapshot = Position::new(5, 5).unwrap();

        let mut ps =
            PlayAndSolve::new(&mut player_env, &mut solver_env, &mut player, &solver, cache);
        let (mv, value) = ps.gen_move(&snapshot, Duration::from_secs(10)).unwrap();
        let Move::Play(cell) = mv else {
            panic!("expected a placement");
        };
        assert!(snapshot.is_empty_cell(cell));
        assert_eq!(value, LOSS_VALUE);
    }

    #[test]
    fn test_real_solver_decides_tiny_board() {
        let mut player_env = HexEnv::new(2, 2).unwrap();
        let mut solver_env = HexEnv::new(2, 2).unwrap();
        let mut player = slow_player();
        let solver = DfsSolver::new();
        let cache = Arc::new(PositionCache::new());
        let snapshot = Position::new(2, 2).unwrap();

        let mut ps = PlayAndSolve::new(
            &mut player_env,
            &mut solver_env,
            &mut player,
            &solver,
            Arc::clone(&cache),
        );
        let (mv, _) = ps.gen_move(&snapshot, Duration::from_secs(30)).unwrap();

        // Whichever search won the race, the move must preserve the
        // first player's win.
        let Move::Play(cell) = mv else {
            panic!("expected a placement");
        };
        let mut after = snapshot.clone();
        after.play(cell).unwrap();
        let mut board = SearchBoard::new(2, 2).unwrap();
        board.position_mut().sync_from(&after);
        let verdict = DfsSolver::new().try_solve(
            &mut board,
            &cache,
            Instant::now() + Duration::from_secs(30),
            &Arc::new(AtomicBool::new(false)),
        );
        assert_eq!(
            verdict,
            SolverOutcome::Proven {
                winner: Color::Black,
                best_move: None,
            }
        );
    }
}
