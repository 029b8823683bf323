//! HTP command engine
//!
//! One engine instance owns the game record, the two board
//! environments (player-side and solver-side), the heuristic player,
//! the exact solver, and the shared proven-position cache. `execute`
//! dispatches one parsed command line.

use std::sync::Arc;
use std::time::Duration;

use log::info;

use rhex_core::env::HexEnv;
use rhex_core::play_and_solve::PlayAndSolve;
use rhex_core::player::Player;
use rhex_core::search::{parse_ply_width, print_ply_width, SearchLimits};
use rhex_core::solver::{DfsSolver, PositionCache};
use rhex_core::time_control;
use rhex_core::tt::diag;
use rhex_core::types::SWAP_TOKEN;
use rhex_core::{swap, Cell, Color, EngineError, Game, Move};

use crate::config::EngineConfig;
use crate::params;

/// Highest accepted `tt_bits`; the table grows as `2^bits` entries.
const MAX_TT_BITS: u32 = 30;

const COMMANDS: &[&str] = &[
    "boardsize",
    "clear_board",
    "genmove",
    "list_commands",
    "name",
    "param_player",
    "param_player_board",
    "param_player_ice",
    "param_player_vc",
    "param_solver_board",
    "param_solver_ice",
    "param_solver_vc",
    "play",
    "player-clear-hash",
    "player-data",
    "player-get-pv",
    "player-scores",
    "protocol_version",
    "quit",
    "showboard",
    "time_left",
    "version",
];

pub struct HtpEngine {
    game: Game,
    player_env: HexEnv,
    solver_env: HexEnv,
    player: Player,
    solver: DfsSolver,
    cache: Arc<PositionCache>,
    use_parallel_solver: bool,
}

impl HtpEngine {
    pub fn new(size: u8) -> Result<Self, EngineError> {
        Ok(Self {
            game: Game::new(size, size)?,
            player_env: HexEnv::new(size, size)?,
            solver_env: HexEnv::new(size, size)?,
            player: Player::new(),
            solver: DfsSolver::new(),
            cache: Arc::new(PositionCache::new()),
            use_parallel_solver: false,
        })
    }

    /// Applies a startup configuration file over the defaults.
    pub fn apply_config(&mut self, cfg: &EngineConfig) {
        let p = self.player.params_mut();
        if let Some(v) = cfg.max_depth {
            p.max_depth = v.max(1);
        }
        if let Some(v) = cfg.min_depth {
            p.min_depth = v.max(1);
        }
        if let Some(v) = cfg.max_time {
            p.max_time = v;
        }
        if let Some(v) = &cfg.ply_width {
            p.ply_width = parse_ply_width(v);
        }
        if let Some(v) = cfg.search_singleton {
            p.search_singleton = v;
        }
        if let Some(v) = cfg.use_time_management {
            p.use_time_management = v;
        }
        if let Some(v) = cfg.backup_ice_info {
            p.backup_ice_info = v;
        }
        if let Some(v) = cfg.use_guifx {
            p.use_guifx = v;
        }
        if let Some(v) = cfg.tt_bits {
            self.player.set_table_bits(v.min(MAX_TT_BITS));
        }
        if let Some(v) = cfg.use_parallel_solver {
            self.use_parallel_solver = v;
        }
    }

    /// Executes one command; the caller frames the response.
    pub fn execute(&mut self, command: &str, args: &[&str]) -> Result<String, EngineError> {
        match command {
            "name" => Ok("rhex".to_string()),
            "version" => Ok(env!("CARGO_PKG_VERSION").to_string()),
            "protocol_version" => Ok("2".to_string()),
            "list_commands" => Ok(COMMANDS.join("\n")),
            "boardsize" => self.cmd_boardsize(args),
            "clear_board" => self.cmd_clear_board(),
            "play" => self.cmd_play(args),
            "genmove" => self.cmd_genmove(args),
            "showboard" => Ok(format!("\n{}", self.game.position())),
            "time_left" => self.cmd_time_left(args),
            "param_player" => self.cmd_param_player(args),
            "param_player_board" => params::board_param(self.player_env.board_mut(), args),
            "param_player_vc" => params::vc_param(self.player_env.board_mut(), args),
            "param_player_ice" => params::ice_param(self.player_env.board_mut(), args),
            "param_solver_board" => params::board_param(self.solver_env.board_mut(), args),
            "param_solver_vc" => params::vc_param(self.solver_env.board_mut(), args),
            "param_solver_ice" => params::ice_param(self.solver_env.board_mut(), args),
            "player-get-pv" => self.cmd_get_pv(),
            "player-scores" => self.cmd_scores(),
            "player-data" => self.cmd_data(),
            "player-clear-hash" => self.cmd_clear_hash(),
            other => Err(EngineError::Usage(format!("unknown command: {other}"))),
        }
    }

    fn cmd_boardsize(&mut self, args: &[&str]) -> Result<String, EngineError> {
        let (w, h) = match args {
            [w] => (parse_size(w)?, parse_size(w)?),
            [w, h] => (parse_size(w)?, parse_size(h)?),
            _ => return Err(EngineError::Usage("Expected 1 or 2 arguments".to_string())),
        };
        self.game.new_game(w, h)?;
        self.player_env.new_game(w, h)?;
        self.solver_env.new_game(w, h)?;
        Ok(String::new())
    }

    fn cmd_clear_board(&mut self) -> Result<String, EngineError> {
        let (w, h) = (self.game.position().width(), self.game.position().height());
        self.game.new_game(w, h)?;
        self.player_env.new_game(w, h)?;
        self.solver_env.new_game(w, h)?;
        Ok(String::new())
    }

    fn cmd_play(&mut self, args: &[&str]) -> Result<String, EngineError> {
        let [color, mv] = args else {
            return Err(EngineError::Usage("Expected 2 arguments".to_string()));
        };
        let color = parse_color(color)?;
        let mv = Move::from_htp(mv)
            .ok_or_else(|| EngineError::InvalidMove(mv.to_string()))?;
        self.game.play(color, mv)?;
        Ok(String::new())
    }

    fn cmd_time_left(&mut self, args: &[&str]) -> Result<String, EngineError> {
        let [color, seconds] = args else {
            return Err(EngineError::Usage("Expected 2 arguments".to_string()));
        };
        let color = parse_color(color)?;
        let seconds: f64 = seconds
            .parse()
            .ok()
            .filter(|s| *s >= 0.0)
            .ok_or_else(|| EngineError::Usage(format!("bad time: {}", seconds)))?;
        self.game.set_time_remaining(color, Duration::from_secs_f64(seconds));
        Ok(String::new())
    }

    fn cmd_genmove(&mut self, args: &[&str]) -> Result<String, EngineError> {
        let [color] = args else {
            return Err(EngineError::Usage("Expected 1 argument".to_string()));
        };
        let color = parse_color(color)?;

        // The pie rule short-circuits both searches.
        if swap::play_swap(&self.game, color) {
            info!("opening swap favored for {color}");
            self.game.play(color, Move::Swap)?;
            return Ok(SWAP_TOKEN.to_string());
        }

        let budget = self.budget_for(color);
        let mut snapshot = self.game.position().clone();
        snapshot.set_to_move(color);

        let (mv, value) = if self.use_parallel_solver {
            PlayAndSolve::new(
                &mut self.player_env,
                &mut self.solver_env,
                &mut self.player,
                &self.solver,
                Arc::clone(&self.cache),
            )
            .gen_move(&snapshot, budget)?
        } else {
            let board = self.player_env.sync_board(&snapshot);
            let result = self.player.gen_move(board, budget, SearchLimits::default())?;
            (Move::Play(result.best_move), result.value)
        };

        info!("genmove {color}: {mv} (value {value}, budget {budget:?})");
        self.game.play(color, mv)?;
        Ok(mv.to_string())
    }

    fn budget_for(&self, color: Color) -> Duration {
        if self.player.params().use_time_management {
            time_control::time_for_move(&self.game, color)
        } else {
            Duration::from_secs_f64(self.player.params().max_time)
        }
    }

    fn cmd_param_player(&mut self, args: &[&str]) -> Result<String, EngineError> {
        params::check_arg_shape(args)?;
        if args.is_empty() {
            let p = self.player.params();
            return Ok(format!(
                "[bool] backup_ice_info {}\n\
                 [bool] use_guifx {}\n\
                 [bool] search_singleton {}\n\
                 [bool] use_parallel_solver {}\n\
                 [bool] use_time_management {}\n\
                 [string] ply_width {}\n\
                 [string] max_depth {}\n\
                 [string] max_time {}\n\
                 [string] min_depth {}\n\
                 [string] tt_bits {}",
                params::fmt_bool(p.backup_ice_info),
                params::fmt_bool(p.use_guifx),
                params::fmt_bool(p.search_singleton),
                params::fmt_bool(self.use_parallel_solver),
                params::fmt_bool(p.use_time_management),
                print_ply_width(&p.ply_width),
                p.max_depth,
                p.max_time,
                p.min_depth,
                self.player.table_bits(),
            ));
        }

        let (name, value) = (args[0], args[1]);
        match name {
            "backup_ice_info" => self.player.params_mut().backup_ice_info = params::parse_bool(value)?,
            "use_guifx" => self.player.params_mut().use_guifx = params::parse_bool(value)?,
            "search_singleton" => {
                self.player.params_mut().search_singleton = params::parse_bool(value)?
            }
            "use_parallel_solver" => self.use_parallel_solver = params::parse_bool(value)?,
            "use_time_management" => {
                self.player.params_mut().use_time_management = params::parse_bool(value)?
            }
            "ply_width" => self.player.params_mut().ply_width = parse_ply_width(value),
            "max_depth" => self.player.params_mut().max_depth = parse_depth(name, value)?,
            "min_depth" => self.player.params_mut().min_depth = parse_depth(name, value)?,
            "max_time" => {
                self.player.params_mut().max_time = value
                    .parse()
                    .ok()
                    .filter(|t: &f64| *t > 0.0)
                    .ok_or_else(|| EngineError::Usage(format!("bad max_time: {value}")))?
            }
            "tt_bits" => {
                let bits: u32 = value
                    .parse()
                    .ok()
                    .filter(|b| *b <= MAX_TT_BITS)
                    .ok_or_else(|| EngineError::Usage(format!("bad tt_bits: {value}")))?;
                self.player.set_table_bits(bits);
            }
            other => return Err(EngineError::UnknownParameter(other.to_string())),
        }
        Ok(String::new())
    }

    fn cmd_get_pv(&self) -> Result<String, EngineError> {
        let tt = self.player.table().ok_or(EngineError::NoTable)?;
        let pv = diag::extract_pv(self.game.position(), tt);
        Ok(pv
            .iter()
            .map(Cell::to_string)
            .collect::<Vec<_>>()
            .join(" "))
    }

    fn cmd_scores(&self) -> Result<String, EngineError> {
        let tt = self.player.table().ok_or(EngineError::NoTable)?;
        let scores = diag::move_scores(self.game.position(), tt);
        Ok(scores
            .iter()
            .map(|(mv, v)| format!("{mv} {v}"))
            .collect::<Vec<_>>()
            .join(" "))
    }

    fn cmd_data(&self) -> Result<String, EngineError> {
        let tt = self.player.table().ok_or(EngineError::NoTable)?;
        match diag::current_data(self.game.position(), tt) {
            Some(entry) => {
                use rhex_core::tt::Bound;
                let best = entry
                    .best_move
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "none".to_string());
                Ok(format!(
                    "[score={} bestMove={} isExact={} isLower={} isUpper={} depth={}]",
                    entry.value,
                    best,
                    params::fmt_bool(entry.bound == Bound::Exact),
                    params::fmt_bool(entry.bound == Bound::Lower),
                    params::fmt_bool(entry.bound == Bound::Upper),
                    entry.depth,
                ))
            }
            None => Ok(String::new()),
        }
    }

    fn cmd_clear_hash(&mut self) -> Result<String, EngineError> {
        let tt = self.player.table_mut().ok_or(EngineError::NoTable)?;
        tt.clear();
        Ok(String::new())
    }
}

fn parse_size(s: &str) -> Result<u8, EngineError> {
    s.parse()
        .map_err(|_| EngineError::BadBoardSize(s.to_string()))
}

fn parse_color(s: &str) -> Result<Color, EngineError> {
    Color::from_htp(s).ok_or_else(|| EngineError::Usage(format!("bad color: {s}")))
}

fn parse_depth(name: &str, value: &str) -> Result<u32, EngineError> {
    value
        .parse()
        .ok()
        .filter(|d| *d >= 1)
        .ok_or_else(|| EngineError::Usage(format!("bad {name}: {value}")))
}
