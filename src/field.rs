//! Per-field scoring shared by the solo and multiplayer paths.
//!
//! Two weight tables exist on purpose: the solo path scores on a `[0, 1]`
//! scale with fractional weights, the multiplayer path on a 100-point scale.
//! Engine and year are weighted differently in each, so neither table is
//! derived from the other.

use serde::Serialize;

use crate::domain::{FieldName, ResponseMode};
use crate::similarity::similarity;
use crate::tolerance::compare_numbers;

/// Accuracy above which a field counts as correct.
pub const CORRECT_THRESHOLD: f64 = 0.75;

/// Elapsed time at which the speed bonus reaches zero.
pub const SPEED_WINDOW_MS: f64 = 20_000.0;

/// Multiplayer points per field (out of 100 with the speed bonus).
pub fn multiplayer_weight(field: FieldName) -> f64 {
  match field {
    FieldName::Manufacturer => 25.0,
    FieldName::Model => 25.0,
    FieldName::Engine => 20.0,
    FieldName::Cylinders => 15.0,
    FieldName::Year => 10.0,
  }
}
pub const MULTIPLAYER_SPEED_WEIGHT: f64 = 5.0;

/// Solo weights (sum to 1 with the speed bonus).
pub fn solo_weight(field: FieldName) -> f64 {
  match field {
    FieldName::Manufacturer => 0.25,
    FieldName::Model => 0.25,
    FieldName::Engine => 0.15,
    FieldName::Cylinders => 0.15,
    FieldName::Year => 0.15,
  }
}
pub const SOLO_SPEED_WEIGHT: f64 = 0.05;

/// Accuracy of one answer against the expected value. A missing side scores 0.
pub fn field_accuracy(field: FieldName, expected: Option<&str>, actual: Option<&str>) -> f64 {
  match (expected, actual) {
    (Some(e), Some(a)) if !e.is_empty() && !a.is_empty() => {
      if field.is_numeric() { compare_numbers(e, a) } else { similarity(e, a) }
    }
    _ => 0.0,
  }
}

/// Linear decay from 1 at 0 ms to 0 at [`SPEED_WINDOW_MS`] and beyond.
pub fn speed_factor(elapsed_ms: u64) -> f64 {
  (1.0 - elapsed_ms as f64 / SPEED_WINDOW_MS).max(0.0)
}

/// Scored field, produced fresh per submission.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldEvaluation {
  pub field_name: FieldName,
  pub accuracy: f64,
  pub points: f64,
  pub max_points: f64,
  pub correct: bool,
  pub correct_answer: String,
}

/// `points = weight × accuracy × multiplier`, `max_points = weight × multiplier`.
pub fn score_field(
  field: FieldName,
  weight: f64,
  mode: ResponseMode,
  accuracy: f64,
  correct_answer: &str,
) -> FieldEvaluation {
  let multiplier = mode.multiplier();
  FieldEvaluation {
    field_name: field,
    accuracy,
    points: weight * accuracy * multiplier,
    max_points: weight * multiplier,
    correct: accuracy > CORRECT_THRESHOLD,
    correct_answer: correct_answer.to_string(),
  }
}
