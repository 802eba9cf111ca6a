//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs parameters and basic result info.

use std::sync::Arc;
use axum::{extract::{State, Query}, Json, response::IntoResponse};
use tracing::{info, instrument};

use crate::error::{ApiError, ApiResult};
use crate::hints::HintResult;
use crate::logic::*;
use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn http_health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(HealthOut {
    ok: true,
    catalog_entries: state.catalog.len(),
    options_ready: state.options.is_ready(),
  })
}

#[instrument(level = "info", skip(state, body), fields(subject = ?body.subject_key))]
pub async fn http_post_round(
  State(state): State<Arc<AppState>>,
  Json(body): Json<StartRoundIn>,
) -> ApiResult<Json<RoundOut>> {
  let (record, entry) = state
    .start_round(body.subject_key.as_deref())
    .await
    .ok_or_else(|| ApiError::NotFound("no matching catalog entry".into()))?;
  info!(target: "round", id = %record.id, "HTTP round started");
  Ok(Json(round_out(&record, &entry)))
}

#[instrument(level = "info", skip(state, body), fields(round_id = %body.round_id))]
pub async fn http_post_guess(
  State(state): State<Arc<AppState>>,
  Json(body): Json<GuessIn>,
) -> ApiResult<Json<GuessOut>> {
  let out = submit_guess(&state, &body).await?;
  info!(target: "scoring", id = %body.round_id, total = out.total, "HTTP guess evaluated");
  Ok(Json(out))
}

#[instrument(level = "info", skip(state, body), fields(round_id = %body.round_id))]
pub async fn http_post_hint(
  State(state): State<Arc<AppState>>,
  Json(body): Json<RoundRef>,
) -> ApiResult<Json<HintResult>> {
  Ok(Json(request_hint(&state, body.round_id).await?))
}

#[instrument(level = "info", skip(state, body), fields(round_id = %body.round_id, joker = ?body.joker))]
pub async fn http_post_joker(
  State(state): State<Arc<AppState>>,
  Json(body): Json<JokerIn>,
) -> ApiResult<Json<JokerOut>> {
  Ok(Json(use_joker(&state, body.round_id, body.joker).await?))
}

#[instrument(level = "info", skip(state, body), fields(round_id = %body.round_id))]
pub async fn http_post_field_answers(
  State(state): State<Arc<AppState>>,
  Json(body): Json<FieldAnswersIn>,
) -> ApiResult<Json<FieldAnswersOut>> {
  let out = submit_field_answers(&state, &body).await?;
  info!(target: "scoring", id = %body.round_id, total = out.score.total_score, "HTTP field answers scored");
  Ok(Json(out))
}

#[instrument(level = "info", skip(state, q), fields(round_id = %q.round_id, field = %q.field_name))]
pub async fn http_get_options(
  State(state): State<Arc<AppState>>,
  Query(q): Query<OptionsQuery>,
) -> ApiResult<Json<OptionsOut>> {
  Ok(Json(field_options(&state, &q).await?))
}

#[instrument(level = "info", skip(state, q), fields(round_id = %q.round_id, field = %q.field_name))]
pub async fn http_get_half_options(
  State(state): State<Arc<AppState>>,
  Query(q): Query<OptionsQuery>,
) -> ApiResult<Json<OptionsOut>> {
  Ok(Json(half_options(&state, &q).await?))
}

#[instrument(level = "info", skip(state, q), fields(round_id = %q.round_id))]
pub async fn http_get_coherent_options(
  State(state): State<Arc<AppState>>,
  Query(q): Query<CoherentQuery>,
) -> ApiResult<Json<CoherentOut>> {
  Ok(Json(coherent_options(&state, &q).await?))
}

#[instrument(level = "info", skip(state, body), fields(players = body.players, rounds = body.rounds))]
pub async fn http_post_validate_game(
  State(state): State<Arc<AppState>>,
  Json(body): Json<GameSetupIn>,
) -> impl IntoResponse {
  Json(validate_setup(&state, &body))
}
