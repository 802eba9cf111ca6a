//! Solo round evaluation: five fields + speed bonus on a `[0, 1]` scale,
//! pass/fail at [`ACCEPTANCE`], and a short explanation for the player.

use serde::Serialize;

use crate::domain::{AnswerSet, FieldName, Subject};
use crate::field::{field_accuracy, solo_weight, speed_factor, SOLO_SPEED_WEIGHT};

/// Minimum total for a round to count as won.
pub const ACCEPTANCE: f64 = 0.7;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessEvaluation {
  pub brand_score: f64,
  pub model_score: f64,
  pub engine_score: f64,
  pub cylinders_score: f64,
  pub year_score: f64,
  pub speed_bonus: f64,
  pub total: f64,
  pub correct: bool,
  pub explanation: Vec<String>,
}

impl GuessEvaluation {
  pub fn score(&self, field: FieldName) -> f64 {
    match field {
      FieldName::Manufacturer => self.brand_score,
      FieldName::Model => self.model_score,
      FieldName::Engine => self.engine_score,
      FieldName::Cylinders => self.cylinders_score,
      FieldName::Year => self.year_score,
    }
  }
}

/// Threshold above which a field earns its explanation line, and the line.
fn explanation_rule(field: FieldName) -> (f64, &'static str) {
  match field {
    FieldName::Manufacturer => (0.75, "Marque validée"),
    FieldName::Model => (0.75, "Modèle identifié"),
    FieldName::Engine => (0.5, "Architecture moteur cohérente"),
    FieldName::Cylinders => (0.5, "Nombre de cylindres OK"),
    FieldName::Year => (0.5, "Période respectée"),
  }
}

pub fn is_accepted(total: f64) -> bool {
  total >= ACCEPTANCE
}

/// Score a solo guess. Never fails: bad or missing input scores 0.
pub fn evaluate_guess(answers: &AnswerSet, subject: &Subject, elapsed_ms: u64) -> GuessEvaluation {
  let mut scores = [0.0_f64; 5];
  let mut explanation = Vec::new();
  for (i, field) in FieldName::ALL.into_iter().enumerate() {
    let s = field_accuracy(field, subject.get(field), answers.get(field));
    let (threshold, line) = explanation_rule(field);
    if s > threshold {
      explanation.push(line.to_string());
    }
    scores[i] = s;
  }

  let speed_bonus = speed_factor(elapsed_ms) * SOLO_SPEED_WEIGHT;
  let total = FieldName::ALL
    .into_iter()
    .zip(scores)
    .fold(0.0, |acc, (f, s)| acc + s * solo_weight(f))
    + speed_bonus;
  let correct = is_accepted(total);
  explanation.push(if correct {
    "Score suffisant, manche gagnée.".to_string()
  } else {
    "Continue, tu te rapproches.".to_string()
  });

  GuessEvaluation {
    brand_score: scores[0],
    model_score: scores[1],
    engine_score: scores[2],
    cylinders_score: scores[3],
    year_score: scores[4],
    speed_bonus,
    total,
    correct,
    explanation,
  }
}

/// Solo total as a rounded percentage, clamped to `[0, 100]`.
pub fn score_to_percentage(total: f64) -> u8 {
  (total.clamp(0.0, 1.0) * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
  use super::*;

  fn panigale() -> Subject {
    Subject {
      manufacturer: "Ducati".into(),
      model: "Panigale V4S".into(),
      engine: "V4".into(),
      cylinders: "4".into(),
      year: "2018".into(),
      ..Default::default()
    }
  }

  fn answers(m: &str, model: &str, e: &str, c: &str, y: &str) -> AnswerSet {
    let opt = |s: &str| Some(s.to_string()).filter(|s| !s.is_empty());
    AnswerSet {
      manufacturer: opt(m),
      model: opt(model),
      engine: opt(e),
      cylinders: opt(c),
      year: opt(y),
    }
  }

  #[test]
  fn perfect_instant_guess_scores_one() {
    let ev = evaluate_guess(&answers("Ducati", "Panigale V4S", "V4", "4", "2018"), &panigale(), 0);
    assert!((ev.total - 1.0).abs() < 1e-9);
    assert!(ev.correct);
    assert_eq!(score_to_percentage(ev.total), 100);
    assert_eq!(ev.explanation.len(), 6);
    assert_eq!(ev.explanation.last().map(String::as_str), Some("Score suffisant, manche gagnée."));
  }

  #[test]
  fn acceptance_boundary() {
    // brand + model + cylinders + full speed bonus = 0.70
    let at = evaluate_guess(&answers("Ducati", "Panigale V4S", "", "4", ""), &panigale(), 0);
    assert!((at.total - 0.7).abs() < 1e-9);
    assert!(at.correct);

    // same fields, speed bonus 0.04 -> 0.69
    let below = evaluate_guess(&answers("Ducati", "Panigale V4S", "", "4", ""), &panigale(), 4_000);
    assert!((below.total - 0.69).abs() < 1e-9);
    assert!(!below.correct);

    assert!(is_accepted(ACCEPTANCE));
    assert!(!is_accepted(0.69));
  }

  #[test]
  fn correct_iff_total_reaches_acceptance() {
    let cases = [
      answers("", "", "", "", ""),
      answers("Ducati", "", "", "", ""),
      answers("Ducati", "Panigale", "V4", "", "2017"),
      answers("Ducatti", "Panigale V4", "V-4", "4", "2020"),
      answers("Honda", "CBR", "I4", "6", "1990"),
    ];
    for a in cases {
      for elapsed in [0, 7_500, 30_000] {
        let ev = evaluate_guess(&a, &panigale(), elapsed);
        assert_eq!(ev.correct, ev.total >= ACCEPTANCE, "{a:?} @ {elapsed}");
      }
    }
  }

  #[test]
  fn explanation_follows_thresholds_in_field_order() {
    let ev = evaluate_guess(&answers("Ducati", "", "V4", "", "2020"), &panigale(), 25_000);
    // year diff 2 -> 0.6 > 0.5
    assert_eq!(
      ev.explanation,
      vec![
        "Marque validée".to_string(),
        "Architecture moteur cohérente".to_string(),
        "Période respectée".to_string(),
        "Continue, tu te rapproches.".to_string(),
      ]
    );
    assert_eq!(ev.speed_bonus, 0.0);
    assert_eq!(ev.score(FieldName::Year), 0.6);
  }

  #[test]
  fn missing_expected_value_scores_zero() {
    let mut s = panigale();
    s.engine.clear();
    let ev = evaluate_guess(&answers("", "", "V4", "", ""), &s, 0);
    assert_eq!(ev.engine_score, 0.0);
  }

  #[test]
  fn percentage_is_clamped() {
    assert_eq!(score_to_percentage(-0.2), 0);
    assert_eq!(score_to_percentage(0.456), 46);
    assert_eq!(score_to_percentage(1.3), 100);
  }
}
