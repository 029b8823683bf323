//! Startup configuration file
//!
//! Optional TOML file applied over the built-in defaults before the
//! command loop starts. Field names match the `param_player` surface.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub max_depth: Option<u32>,
    pub min_depth: Option<u32>,
    pub max_time: Option<f64>,
    /// Dash- or space-separated width list, as on the wire.
    pub ply_width: Option<String>,
    pub tt_bits: Option<u32>,
    pub search_singleton: Option<bool>,
    pub use_time_management: Option<bool>,
    pub use_parallel_solver: Option<bool>,
    pub backup_ice_info: Option<bool>,
    pub use_guifx: Option<bool>,
}

pub fn load(path: &Path) -> anyhow::Result<EngineConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let cfg: EngineConfig = toml::from_str("max_depth = 6\nply_width = \"8-8-4\"\n").unwrap();
        assert_eq!(cfg.max_depth, Some(6));
        assert_eq!(cfg.ply_width.as_deref(), Some("8-8-4"));
        assert_eq!(cfg.tt_bits, None);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(toml::from_str::<EngineConfig>("warp = true\n").is_err());
    }
}
