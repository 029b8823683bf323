//! Parameter command surface
//!
//! Every `param_*` command shares one shape: no arguments lists all
//! parameters with their current values, exactly two arguments set one,
//! anything else is a usage error. Parameter names form a closed set;
//! an unknown name is rejected without mutating anything.

use std::fmt::Write as _;

use rhex_core::board::SearchBoard;
use rhex_core::EngineError;

/// Booleans travel as `0`/`1` on the wire; `true`/`false` are accepted
/// on input for convenience.
pub fn parse_bool(value: &str) -> Result<bool, EngineError> {
    match value {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        other => Err(EngineError::Usage(format!("expected 0 or 1, got '{other}'"))),
    }
}

pub fn fmt_bool(b: bool) -> &'static str {
    if b {
        "1"
    } else {
        "0"
    }
}

/// Guards the uniform 0-or-2 argument shape.
pub fn check_arg_shape(args: &[&str]) -> Result<(), EngineError> {
    if args.is_empty() || args.len() == 2 {
        Ok(())
    } else {
        Err(EngineError::Usage("Expected 0 or 2 arguments".to_string()))
    }
}

/// `param_{player,solver}_board`: the environment feature toggles.
pub fn board_param(board: &mut SearchBoard, args: &[&str]) -> Result<String, EngineError> {
    check_arg_shape(args)?;
    if args.is_empty() {
        let config = board.config();
        let mut out = String::new();
        let _ = writeln!(out, "[bool] backup_ice_info {}", fmt_bool(config.backup_ice_info));
        let _ = writeln!(out, "[bool] use_decompositions {}", fmt_bool(config.use_decompositions));
        let _ = writeln!(out, "[bool] use_ice {}", fmt_bool(config.use_ice));
        let _ = write!(out, "[bool] use_vcs {}", fmt_bool(config.use_vcs));
        return Ok(out);
    }
    let value = parse_bool(args[1])?;
    let config = board.config_mut();
    match args[0] {
        "backup_ice_info" => config.backup_ice_info = value,
        "use_decompositions" => config.use_decompositions = value,
        "use_ice" => config.use_ice = value,
        "use_vcs" => config.use_vcs = value,
        name => return Err(EngineError::UnknownParameter(name.to_string())),
    }
    Ok(String::new())
}

/// `param_{player,solver}_vc`: the connection-builder flags.
pub fn vc_param(board: &mut SearchBoard, args: &[&str]) -> Result<String, EngineError> {
    check_arg_shape(args)?;
    if args.is_empty() {
        let param = board.vc_param();
        let mut out = String::new();
        let _ = writeln!(out, "[bool] and_over_edge {}", fmt_bool(param.and_over_edge));
        let _ = writeln!(out, "[bool] use_patterns {}", fmt_bool(param.use_patterns));
        let _ = writeln!(out, "[bool] use_non_edge_patterns {}", fmt_bool(param.use_non_edge_patterns));
        let _ = writeln!(out, "[bool] incremental_builds {}", fmt_bool(param.incremental_builds));
        let _ = writeln!(out, "[bool] limit_fulls {}", fmt_bool(param.limit_fulls));
        let _ = write!(out, "[bool] limit_or {}", fmt_bool(param.limit_or));
        return Ok(out);
    }
    let value = parse_bool(args[1])?;
    let param = board.vc_param_mut();
    match args[0] {
        "and_over_edge" => param.and_over_edge = value,
        "use_patterns" => param.use_patterns = value,
        "use_non_edge_patterns" => param.use_non_edge_patterns = value,
        "incremental_builds" => param.incremental_builds = value,
        "limit_fulls" => param.limit_fulls = value,
        "limit_or" => param.limit_or = value,
        name => return Err(EngineError::UnknownParameter(name.to_string())),
    }
    Ok(String::new())
}

/// `param_{player,solver}_ice`: the inferior-cell analysis flags.
pub fn ice_param(board: &mut SearchBoard, args: &[&str]) -> Result<String, EngineError> {
    check_arg_shape(args)?;
    if args.is_empty() {
        let param = board.ice_param();
        let mut out = String::new();
        let _ = writeln!(out, "[bool] find_all_pattern_superiors {}", fmt_bool(param.find_all_pattern_superiors));
        let _ = writeln!(out, "[bool] find_all_pattern_killers {}", fmt_bool(param.find_all_pattern_killers));
        let _ = writeln!(out, "[bool] find_presimplicial_pairs {}", fmt_bool(param.find_presimplicial_pairs));
        let _ = writeln!(out, "[bool] find_three_sided_dead_regions {}", fmt_bool(param.find_three_sided_dead_regions));
        let _ = writeln!(out, "[bool] iterative_dead_regions {}", fmt_bool(param.iterative_dead_regions));
        let _ = writeln!(out, "[bool] use_capture {}", fmt_bool(param.use_capture));
        let _ = writeln!(out, "[bool] find_reversible {}", fmt_bool(param.find_reversible));
        let _ = write!(out, "[bool] use_s_reversible_as_reversible {}", fmt_bool(param.use_s_reversible_as_reversible));
        return Ok(out);
    }
    let value = parse_bool(args[1])?;
    let param = board.ice_param_mut();
    match args[0] {
        "find_all_pattern_superiors" => param.find_all_pattern_superiors = value,
        "find_all_pattern_killers" => param.find_all_pattern_killers = value,
        "find_presimplicial_pairs" => param.find_presimplicial_pairs = value,
        "find_three_sided_dead_regions" => param.find_three_sided_dead_regions = value,
        "iterative_dead_regions" => param.iterative_dead_regions = value,
        "use_capture" => param.use_capture = value,
        "find_reversible" => param.find_reversible = value,
        "use_s_reversible_as_reversible" => param.use_s_reversible_as_reversible = value,
        name => return Err(EngineError::UnknownParameter(name.to_string())),
    }
    Ok(String::new())
}
