//! Round orchestration shared by the HTTP handlers.
//!
//! This includes:
//!   - solo guesses (evaluate, close the round on success)
//!   - multiplayer field answers (score with the round's joker, close the round)
//!   - hints and jokers
//!   - option sets for multiple-choice and 50/50 fields

use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::domain::{JokerKind, ResponseMode};
use crate::error::{ApiError, ApiResult};
use crate::multiplayer::calculate_round_score;
use crate::options::DEFAULT_OPTION_COUNT;
use crate::protocol::*;
use crate::solo::{evaluate_guess, score_to_percentage};
use crate::state::AppState;
use crate::util::trunc_for_log;

const MIN_OPTION_COUNT: usize = 2;
const MAX_OPTION_COUNT: usize = 4;

/// Fewer than two options means the field can only be answered as free text.
fn mode_for(option_count: usize, requested: ResponseMode) -> ResponseMode {
  if option_count < 2 { ResponseMode::Expert } else { requested }
}

fn checked_count(count: Option<usize>) -> ApiResult<usize> {
  let n = count.unwrap_or(DEFAULT_OPTION_COUNT);
  if !(MIN_OPTION_COUNT..=MAX_OPTION_COUNT).contains(&n) {
    return Err(ApiError::BadRequest(format!(
      "count must be between {MIN_OPTION_COUNT} and {MAX_OPTION_COUNT}"
    )));
  }
  Ok(n)
}

#[instrument(level = "info", skip(state, input), fields(round_id = %input.round_id, elapsed_ms = input.elapsed_ms))]
pub async fn submit_guess(state: &AppState, input: &GuessIn) -> ApiResult<GuessOut> {
  debug!(
    target: "scoring",
    model = %trunc_for_log(input.answers.model.as_deref().unwrap_or_default(), 64),
    "Solo guess received"
  );
  let (record, (breakdown, solution)) = state
    .settle_round(input.round_id, |_, entry| {
      let breakdown = evaluate_guess(&input.answers, &entry.subject, input.elapsed_ms);
      let correct = breakdown.correct;
      ((breakdown, entry.subject.clone()), correct)
    })
    .await?;
  info!(target: "scoring", id = %record.id, total = breakdown.total, correct = breakdown.correct, "Solo guess evaluated");
  Ok(GuessOut {
    total: score_to_percentage(breakdown.total),
    breakdown,
    solution,
  })
}

#[instrument(level = "info", skip(state, input), fields(round_id = %input.round_id, answers = input.answers.len()))]
pub async fn submit_field_answers(state: &AppState, input: &FieldAnswersIn) -> ApiResult<FieldAnswersOut> {
  let (record, score) = state
    .settle_round(input.round_id, |record, entry| {
      (calculate_round_score(&input.answers, &entry.subject, record.joker, input.elapsed_ms), true)
    })
    .await?;
  info!(
    target: "scoring",
    id = %record.id,
    total = score.total_score,
    joker_penalty = score.joker_penalty,
    "Field answers scored"
  );
  Ok(FieldAnswersOut { score, joker_used: record.joker })
}

#[instrument(level = "info", skip(state))]
pub async fn request_hint(state: &AppState, round_id: Uuid) -> ApiResult<crate::hints::HintResult> {
  let hint = state.advance_hint(round_id).await?;
  info!(target: "round", id = %round_id, level = hint.level, remaining = hint.remaining, "Hint served");
  Ok(hint)
}

#[instrument(level = "info", skip(state))]
pub async fn use_joker(state: &AppState, round_id: Uuid, joker: JokerKind) -> ApiResult<JokerOut> {
  let grant = state.use_joker(round_id, joker).await?;
  info!(target: "round", id = %round_id, joker = %String::from(joker), "Joker granted");
  Ok(JokerOut { joker, penalty: joker.cost(), hint: grant.hint, revealed: grant.revealed })
}

#[instrument(level = "info", skip(state), fields(round_id = %q.round_id, field = %q.field_name))]
pub async fn field_options(state: &AppState, q: &OptionsQuery) -> ApiResult<OptionsOut> {
  let count = checked_count(q.count)?;
  let (_, entry) = state.round(q.round_id).await?;
  let correct = entry
    .subject
    .get(q.field_name)
    .ok_or_else(|| ApiError::BadRequest(format!("no value for {} on this subject", q.field_name)))?;
  let options = state.options.generate_field_options(q.field_name, correct, count)?;
  let response_type = mode_for(options.len(), ResponseMode::MultipleChoice);
  Ok(OptionsOut { options, response_type })
}

#[instrument(level = "info", skip(state), fields(round_id = %q.round_id, field = %q.field_name))]
pub async fn half_options(state: &AppState, q: &OptionsQuery) -> ApiResult<OptionsOut> {
  let (_, entry) = state.round(q.round_id).await?;
  let correct = entry
    .subject
    .get(q.field_name)
    .ok_or_else(|| ApiError::BadRequest(format!("no value for {} on this subject", q.field_name)))?;
  let options = state.options.generate_half_options(q.field_name, correct)?;
  let response_type = mode_for(options.len(), ResponseMode::HalfChoice);
  Ok(OptionsOut { options, response_type })
}

#[instrument(level = "info", skip(state), fields(round_id = %q.round_id))]
pub async fn coherent_options(state: &AppState, q: &CoherentQuery) -> ApiResult<CoherentOut> {
  let count = checked_count(q.count)?;
  let (_, entry) = state.round(q.round_id).await?;
  let options = state
    .options
    .generate_coherent_options(&entry.subject.manufacturer, &entry.subject.model, count)?;
  let response_type = mode_for(options.len(), ResponseMode::MultipleChoice);
  Ok(CoherentOut { options, response_type })
}

pub fn validate_setup(state: &AppState, input: &GameSetupIn) -> GameSetupOut {
  let v = state.constraints.validate(input.players, input.rounds);
  GameSetupOut {
    valid: v.valid,
    error: v.error,
    max_rounds: state.constraints.max_rounds_for(input.players),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::constraints::GameConstraints;
  use crate::domain::{AnswerSet, FieldAnswer, FieldName};
  use crate::seeds::seed_catalog;

  async fn state() -> AppState {
    AppState::with_catalog(seed_catalog(), GameConstraints::default()).await.expect("state")
  }

  async fn round(state: &AppState, key: &str) -> Uuid {
    state.start_round(Some(key)).await.expect("round").0.id
  }

  #[tokio::test]
  async fn winning_solo_guess_closes_round() {
    let st = state().await;
    let id = round(&st, "ducati-panigale-v4s").await;
    let input = GuessIn {
      round_id: id,
      answers: AnswerSet {
        manufacturer: Some("ducati".into()),
        model: Some("panigale v4".into()),
        engine: Some("V4".into()),
        cylinders: Some("4".into()),
        year: Some("2018".into()),
      },
      elapsed_ms: 0,
    };
    let out = submit_guess(&st, &input).await.expect("guess");
    assert_eq!(out.total, 100);
    assert!(out.breakdown.correct);
    assert!(matches!(submit_guess(&st, &input).await, Err(ApiError::Conflict(_))));
  }

  #[tokio::test]
  async fn losing_solo_guess_keeps_round_open() {
    let st = state().await;
    let id = round(&st, "ducati-panigale-v4s").await;
    let input = GuessIn {
      round_id: id,
      answers: AnswerSet { manufacturer: Some("Honda".into()), ..Default::default() },
      elapsed_ms: 1_000,
    };
    let out = submit_guess(&st, &input).await.expect("guess");
    assert!(!out.breakdown.correct);
    assert!(submit_guess(&st, &input).await.is_ok());
  }

  #[tokio::test]
  async fn reveal_joker_discloses_field_and_is_charged() {
    let st = state().await;
    let id = round(&st, "ducati-panigale-v4s").await;
    let j = use_joker(&st, id, JokerKind::Reveal(FieldName::Year)).await.expect("joker");
    assert_eq!(j.revealed.as_deref(), Some("2018"));
    assert_eq!(j.penalty, 15.0);
    assert!(matches!(use_joker(&st, id, JokerKind::Hint).await, Err(ApiError::Conflict(_))));

    let input = FieldAnswersIn {
      round_id: id,
      answers: vec![FieldAnswer::new(FieldName::Year, ResponseMode::Expert, "2018")],
      elapsed_ms: 20_000,
    };
    let out = submit_field_answers(&st, &input).await.expect("score");
    assert_eq!(out.score.total_score, 0);
    assert_eq!(out.joker_used, Some(JokerKind::Reveal(FieldName::Year)));
  }

  #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
  async fn racing_reveal_is_charged_and_answers_score_once() {
    let st = std::sync::Arc::new(state().await);
    for _ in 0..200 {
      let id = round(&st, "ducati-panigale-v4s").await;
      let submit = move |st: std::sync::Arc<AppState>| {
        tokio::spawn(async move {
          let input = FieldAnswersIn {
            round_id: id,
            answers: vec![FieldAnswer::new(FieldName::Model, ResponseMode::Expert, "Panigale V4S")],
            elapsed_ms: 20_000,
          };
          submit_field_answers(&st, &input).await.ok()
        })
      };
      let first = submit(st.clone());
      let second = submit(st.clone());
      let reveal = {
        let st = st.clone();
        tokio::spawn(async move { use_joker(&st, id, JokerKind::Reveal(FieldName::Model)).await.is_ok() })
      };

      let scored: Vec<FieldAnswersOut> = [first.await.expect("join"), second.await.expect("join")]
        .into_iter()
        .flatten()
        .collect();
      let revealed = reveal.await.expect("join");
      assert_eq!(scored.len(), 1);
      let expected_penalty = if revealed { 15.0 } else { 0.0 };
      assert_eq!(scored[0].score.joker_penalty, expected_penalty);
      assert_eq!(scored[0].joker_used.is_some(), revealed);
    }
  }

  #[tokio::test]
  async fn hint_joker_returns_first_hint() {
    let st = state().await;
    let id = round(&st, "yamaha-yzf-r1").await;
    let j = use_joker(&st, id, JokerKind::Hint).await.expect("joker");
    let hint = j.hint.expect("hint");
    assert_eq!(hint.level, 1);
    assert_eq!(request_hint(&st, id).await.expect("hint").level, 2);
  }

  #[tokio::test]
  async fn option_endpoints_validate_count_and_modes() {
    let st = state().await;
    let id = round(&st, "ducati-panigale-v4s").await;
    let q = OptionsQuery { round_id: id, field_name: FieldName::Manufacturer, count: Some(5) };
    assert!(matches!(field_options(&st, &q).await, Err(ApiError::BadRequest(_))));

    let q = OptionsQuery { round_id: id, field_name: FieldName::Manufacturer, count: None };
    let out = field_options(&st, &q).await.expect("options");
    assert_eq!(out.options.len(), 4);
    assert!(out.options.contains(&"Ducati".to_string()));
    assert_eq!(out.response_type, ResponseMode::MultipleChoice);

    let half = half_options(&st, &q).await.expect("half");
    assert_eq!(half.options.len(), 2);
    assert_eq!(half.response_type, ResponseMode::HalfChoice);

    let c = coherent_options(&st, &CoherentQuery { round_id: id, count: Some(3) }).await.expect("coherent");
    assert_eq!(c.options.len(), 3);
    assert_eq!(c.options.iter().filter(|o| o.model == "Panigale V4S").count(), 1);
  }

  #[test]
  fn single_option_forces_expert() {
    assert_eq!(mode_for(1, ResponseMode::MultipleChoice), ResponseMode::Expert);
    assert_eq!(mode_for(2, ResponseMode::HalfChoice), ResponseMode::HalfChoice);
  }
}
