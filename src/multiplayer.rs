//! Multiplayer round scoring on a 100-point scale.
//!
//! Only the fields the player answered are scored. The speed bonus is worth
//! up to 5 points and the round's joker (if any) is subtracted before the
//! total is rounded and clamped to `[0, 100]`.

use std::collections::HashSet;

use serde::Serialize;
use tracing::warn;

use crate::domain::{FieldAnswer, JokerKind, Subject};
use crate::field::{
  field_accuracy, multiplayer_weight, score_field, speed_factor, FieldEvaluation,
  MULTIPLAYER_SPEED_WEIGHT,
};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundScore {
  pub field_results: Vec<FieldEvaluation>,
  pub field_points_total: f64,
  pub speed_bonus: f64,
  pub joker_penalty: f64,
  pub total_score: u32,
}

/// Score one player's round. A field answered twice is scored once (first wins).
pub fn calculate_round_score(
  field_answers: &[FieldAnswer],
  subject: &Subject,
  joker: Option<JokerKind>,
  elapsed_ms: u64,
) -> RoundScore {
  let mut seen = HashSet::new();
  let mut field_results = Vec::with_capacity(field_answers.len());
  for fa in field_answers {
    if !seen.insert(fa.field_name) {
      warn!(target: "scoring", field = %fa.field_name, "Duplicate field answer ignored");
      continue;
    }
    let expected = subject.get(fa.field_name);
    let accuracy = field_accuracy(fa.field_name, expected, Some(fa.answer.as_str()));
    field_results.push(score_field(
      fa.field_name,
      multiplayer_weight(fa.field_name),
      fa.response_type,
      accuracy,
      expected.unwrap_or_default(),
    ));
  }

  let field_points_total: f64 = field_results.iter().map(|r| r.points).sum();
  let speed_bonus = speed_factor(elapsed_ms) * MULTIPLAYER_SPEED_WEIGHT;
  let joker_penalty = joker.map(JokerKind::cost).unwrap_or(0.0);
  let raw = field_points_total + speed_bonus - joker_penalty;
  let total_score = raw.round().clamp(0.0, 100.0) as u32;

  RoundScore { field_results, field_points_total, speed_bonus, joker_penalty, total_score }
}
