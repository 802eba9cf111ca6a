//! Public protocol structs for the HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::CatalogEntry;
use crate::domain::{AnswerSet, FieldAnswer, FieldName, JokerKind, ResponseMode, Subject};
use crate::hints::HintResult;
use crate::multiplayer::RoundScore;
use crate::options::MotoOption;
use crate::solo::GuessEvaluation;
use crate::state::RoundRecord;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthOut {
    pub ok: bool,
    pub catalog_entries: usize,
    pub options_ready: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartRoundIn {
    /// Catalog key (manufacturer + model slug). Random when absent.
    #[serde(default)]
    pub subject_key: Option<String>,
}

/// What the player may see before guessing: the clip, never the answer.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundOut {
    pub round_id: Uuid,
    pub video_id: Option<String>,
    pub start_seconds: Option<u32>,
    pub end_seconds: Option<u32>,
}

pub fn round_out(record: &RoundRecord, entry: &CatalogEntry) -> RoundOut {
    let clip = entry.clip.as_ref();
    RoundOut {
        round_id: record.id,
        video_id: clip.map(|c| c.video_id.clone()),
        start_seconds: clip.and_then(|c| c.start_seconds),
        end_seconds: clip.and_then(|c| c.end_seconds),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessIn {
    pub round_id: Uuid,
    pub answers: AnswerSet,
    #[serde(default)]
    pub elapsed_ms: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessOut {
    /// Percentage, 0..=100.
    pub total: u8,
    pub breakdown: GuessEvaluation,
    pub solution: Subject,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundRef {
    pub round_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JokerIn {
    pub round_id: Uuid,
    pub joker: JokerKind,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JokerOut {
    pub joker: JokerKind,
    pub penalty: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<HintResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revealed: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldAnswersIn {
    pub round_id: Uuid,
    pub answers: Vec<FieldAnswer>,
    #[serde(default)]
    pub elapsed_ms: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldAnswersOut {
    pub score: RoundScore,
    pub joker_used: Option<JokerKind>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsQuery {
    pub round_id: Uuid,
    pub field_name: FieldName,
    #[serde(default)]
    pub count: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoherentQuery {
    pub round_id: Uuid,
    #[serde(default)]
    pub count: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsOut {
    pub options: Vec<String>,
    /// Mode the field must be answered in: expert when fewer than 2 options.
    pub response_type: ResponseMode,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoherentOut {
    pub options: Vec<MotoOption>,
    pub response_type: ResponseMode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSetupIn {
    pub players: u32,
    pub rounds: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSetupOut {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub max_rounds: u32,
}
