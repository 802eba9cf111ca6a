//! Domain models: the catalogued motorcycle (subject), guessable fields,
//! response modes, jokers and the submitted answers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the five guessable attributes of a motorcycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
  Manufacturer,
  Model,
  Engine,
  Cylinders,
  Year,
}

impl FieldName {
  /// Fixed presentation/evaluation order.
  pub const ALL: [FieldName; 5] = [
    FieldName::Manufacturer,
    FieldName::Model,
    FieldName::Engine,
    FieldName::Cylinders,
    FieldName::Year,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      FieldName::Manufacturer => "manufacturer",
      FieldName::Model => "model",
      FieldName::Engine => "engine",
      FieldName::Cylinders => "cylinders",
      FieldName::Year => "year",
    }
  }

  pub fn parse(s: &str) -> Option<FieldName> {
    FieldName::ALL.into_iter().find(|f| f.as_str() == s)
  }

  /// Cylinders and year are compared numerically, the rest as free text.
  pub fn is_numeric(self) -> bool {
    matches!(self, FieldName::Cylinders | FieldName::Year)
  }
}

impl fmt::Display for FieldName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// How the player answered a field. Each mode scales the field's points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseMode {
  /// Free text.
  Expert,
  /// Pick one of up to four options.
  #[serde(alias = "qcm")]
  MultipleChoice,
  /// Pick one of two options (50/50).
  #[serde(alias = "fifty_fifty")]
  HalfChoice,
}

impl ResponseMode {
  pub fn multiplier(self) -> f64 {
    match self {
      ResponseMode::Expert => 1.0,
      ResponseMode::MultipleChoice => 0.6,
      ResponseMode::HalfChoice => 0.3,
    }
  }
}

impl Default for ResponseMode {
  fn default() -> Self { ResponseMode::Expert }
}

/// Point-penalized aid. At most one per round.
///
/// Wire form is `"hint"` or `"reveal_<field>"` (e.g. `"reveal_year"`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum JokerKind {
  Hint,
  Reveal(FieldName),
}

pub const JOKER_HINT_COST: f64 = 10.0;
pub const JOKER_REVEAL_COST: f64 = 15.0;

impl JokerKind {
  pub fn cost(self) -> f64 {
    match self {
      JokerKind::Hint => JOKER_HINT_COST,
      JokerKind::Reveal(_) => JOKER_REVEAL_COST,
    }
  }

  pub fn parse(s: &str) -> Option<JokerKind> {
    if s == "hint" {
      return Some(JokerKind::Hint);
    }
    s.strip_prefix("reveal_")
      .and_then(FieldName::parse)
      .map(JokerKind::Reveal)
  }
}

impl TryFrom<String> for JokerKind {
  type Error = String;

  fn try_from(s: String) -> Result<Self, Self::Error> {
    JokerKind::parse(&s).ok_or_else(|| format!("unknown joker '{s}'"))
  }
}

impl From<JokerKind> for String {
  fn from(j: JokerKind) -> String {
    match j {
      JokerKind::Hint => "hint".into(),
      JokerKind::Reveal(f) => format!("reveal_{}", f.as_str()),
    }
  }
}

/// Where the engine sound comes from: a video id and a time window.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Clip {
  pub video_id: String,
  #[serde(default)] pub start_seconds: Option<u32>,
  #[serde(default)] pub end_seconds: Option<u32>,
  #[serde(default)] pub channel: Option<String>,
}

/// A catalogued motorcycle. Empty strings mean "unknown".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Subject {
  pub manufacturer: String,
  pub model: String,
  #[serde(default)] pub engine: String,
  #[serde(default)] pub cylinders: String,
  #[serde(default)] pub year: String,
  #[serde(default)] pub era: String,
  #[serde(default)] pub fun_fact: String,
}

impl Subject {
  /// Stable key: manufacturer + model slug.
  pub fn key(&self) -> String {
    crate::util::slug(&format!("{} {}", self.manufacturer, self.model))
  }

  /// Raw value for a field, possibly empty.
  pub fn value(&self, field: FieldName) -> &str {
    match field {
      FieldName::Manufacturer => &self.manufacturer,
      FieldName::Model => &self.model,
      FieldName::Engine => &self.engine,
      FieldName::Cylinders => &self.cylinders,
      FieldName::Year => &self.year,
    }
  }

  /// Value for a field, `None` when empty.
  pub fn get(&self, field: FieldName) -> Option<&str> {
    Some(self.value(field)).filter(|v| !v.is_empty())
  }

  /// True when all five guessable fields are populated.
  pub fn is_complete(&self) -> bool {
    FieldName::ALL.iter().all(|f| self.get(*f).is_some())
  }
}

/// Free-form answers keyed by field, as submitted in solo mode.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AnswerSet {
  #[serde(default)] pub manufacturer: Option<String>,
  #[serde(default)] pub model: Option<String>,
  #[serde(default)] pub engine: Option<String>,
  #[serde(default)] pub cylinders: Option<String>,
  #[serde(default)] pub year: Option<String>,
}

impl AnswerSet {
  pub fn get(&self, field: FieldName) -> Option<&str> {
    let v = match field {
      FieldName::Manufacturer => &self.manufacturer,
      FieldName::Model => &self.model,
      FieldName::Engine => &self.engine,
      FieldName::Cylinders => &self.cylinders,
      FieldName::Year => &self.year,
    };
    v.as_deref().filter(|s| !s.is_empty())
  }
}

/// One answered field in multiplayer mode.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldAnswer {
  pub field_name: FieldName,
  #[serde(default)]
  pub response_type: ResponseMode,
  #[serde(default)]
  pub answer: String,
}

impl FieldAnswer {
  pub fn new(field_name: FieldName, response_type: ResponseMode, answer: impl Into<String>) -> Self {
    Self { field_name, response_type, answer: answer.into() }
  }
}
