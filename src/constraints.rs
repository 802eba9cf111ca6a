//! Game setup limits for multiplayer sessions.

use serde::{Deserialize, Serialize};

pub const ROUND_PRESETS: [u32; 4] = [5, 10, 15, 20];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConstraints {
  pub min_players: u32,
  pub max_players: u32,
  pub min_rounds: u32,
  pub max_rounds: u32,
  /// Each player-round consumes one distinct sound source.
  pub available_sources: u32,
}

impl Default for GameConstraints {
  fn default() -> Self {
    Self { min_players: 1, max_players: 6, min_rounds: 5, max_rounds: 23, available_sources: 23 }
  }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConfigValidation {
  pub valid: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

impl ConfigValidation {
  fn ok() -> Self { Self { valid: true, error: None } }
  fn err(msg: String) -> Self { Self { valid: false, error: Some(msg) } }
}

impl GameConstraints {
  fn players_in_range(&self, players: u32) -> bool {
    (self.min_players..=self.max_players).contains(&players)
  }

  pub fn validate(&self, players: u32, rounds: u32) -> ConfigValidation {
    if !self.players_in_range(players) {
      return ConfigValidation::err(format!(
        "Le nombre de joueurs doit être entre {} et {}",
        self.min_players, self.max_players
      ));
    }
    if !(self.min_rounds..=self.max_rounds).contains(&rounds) {
      return ConfigValidation::err(format!(
        "Le nombre de manches doit être entre {} et {}",
        self.min_rounds, self.max_rounds
      ));
    }
    let needed = u64::from(players) * u64::from(rounds);
    if needed > u64::from(self.available_sources) {
      return ConfigValidation::err(format!(
        "Impossible: {players} joueurs × {rounds} manches = {needed} sources nécessaires, mais seulement {} disponibles. Maximum: {} manches pour {players} joueurs.",
        self.available_sources,
        self.max_rounds_for(players)
      ));
    }
    ConfigValidation::ok()
  }

  /// Most rounds the source pool allows for `players`; 0 when out of range.
  pub fn max_rounds_for(&self, players: u32) -> u32 {
    if !self.players_in_range(players) || players == 0 {
      return 0;
    }
    self.available_sources / players
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn accepts_feasible_setup() {
    let c = GameConstraints::default();
    assert!(c.validate(1, 20).valid);
    assert!(c.validate(4, 5).valid);
  }

  #[test]
  fn rejects_out_of_range() {
    let c = GameConstraints::default();
    assert!(!c.validate(0, 5).valid);
    assert!(!c.validate(7, 5).valid);
    assert!(!c.validate(2, 4).valid);
    assert!(!c.validate(1, 24).valid);
  }

  #[test]
  fn rejects_when_sources_run_out() {
    let c = GameConstraints::default();
    let v = c.validate(3, 10);
    assert!(!v.valid);
    let msg = v.error.expect("reason");
    assert!(msg.contains("30 sources"));
    assert!(msg.contains("Maximum: 7 manches"));
  }

  #[test]
  fn max_rounds() {
    let c = GameConstraints::default();
    assert_eq!(c.max_rounds_for(1), 23);
    assert_eq!(c.max_rounds_for(4), 5);
    assert_eq!(c.max_rounds_for(9), 0);
    assert!(ROUND_PRESETS.iter().all(|r| c.validate(1, *r).valid));
  }

  #[test]
  fn large_configured_limits_do_not_overflow() {
    let c = GameConstraints { max_players: 200_000, max_rounds: 200_000, ..Default::default() };
    let v = c.validate(100_000, 100_000);
    assert!(!v.valid);
    assert!(v.error.expect("reason").contains("10000000000 sources"));
  }
}
