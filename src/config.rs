//! Loading game configuration (catalog location + setup limits) from TOML.
//!
//! Expected schema (every section optional):
//!
//! ```toml
//! [catalog]
//! path = "data/catalog.toml"
//!
//! [game]
//! min_players = 1
//! max_players = 6
//! min_rounds = 5
//! max_rounds = 23
//! available_sources = 23
//! ```

use serde::Deserialize;
use tracing::{error, info};

use crate::constraints::GameConstraints;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct GameConfig {
  #[serde(default)]
  pub catalog: CatalogCfg,
  #[serde(default)]
  pub game: GameConstraints,
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct CatalogCfg {
  /// TOML catalog file. Built-in seeds are used when absent.
  #[serde(default)]
  pub path: Option<String>,
}

pub fn parse_game_config(s: &str) -> Result<GameConfig, toml::de::Error> {
  toml::from_str::<GameConfig>(s)
}

/// Attempt to load `GameConfig` from GAME_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_game_config_from_env() -> Option<GameConfig> {
  let path = std::env::var("GAME_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match parse_game_config(&s) {
      Ok(cfg) => {
        info!(target: "motosound", %path, "Loaded game config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "motosound", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "motosound", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_config_uses_defaults() {
    let cfg = parse_game_config("").expect("cfg");
    assert!(cfg.catalog.path.is_none());
    assert_eq!(cfg.game, GameConstraints::default());
  }

  #[test]
  fn partial_game_section_keeps_other_defaults() {
    let cfg = parse_game_config("[catalog]\npath = \"motos.toml\"\n[game]\navailable_sources = 40\n").expect("cfg");
    assert_eq!(cfg.catalog.path.as_deref(), Some("motos.toml"));
    assert_eq!(cfg.game.available_sources, 40);
    assert_eq!(cfg.game.max_players, 6);
  }
}
