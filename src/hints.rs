//! Progressive hints for a round.
//!
//! The sequence is rebuilt from the subject on every call, so advancing is a
//! pure function of `(current_level, context)`. Absent attributes are skipped.

use serde::Serialize;

use crate::catalog::CatalogEntry;

pub const NO_MORE_HINTS: &str = "Pas d'indice supplémentaire disponible.";

/// Attributes a hint can be derived from.
#[derive(Clone, Debug, Default)]
pub struct HintContext {
  pub manufacturer: Option<String>,
  pub model: Option<String>,
  pub engine: Option<String>,
  pub era: Option<String>,
  pub year: Option<String>,
  pub cylinders: Option<String>,
  pub fun_fact: Option<String>,
  pub channel: Option<String>,
}

impl From<&CatalogEntry> for HintContext {
  fn from(e: &CatalogEntry) -> Self {
    let s = &e.subject;
    let opt = |v: &str| Some(v.to_string()).filter(|v| !v.trim().is_empty());
    HintContext {
      manufacturer: opt(&s.manufacturer),
      model: opt(&s.model),
      engine: opt(&s.engine),
      era: opt(&s.era),
      year: opt(&s.year),
      cylinders: opt(&s.cylinders),
      fun_fact: opt(&s.fun_fact),
      channel: e.channel().map(str::to_string),
    }
  }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HintResult {
  pub level: u32,
  pub message: String,
  pub remaining: u32,
}

fn present(v: &Option<String>) -> Option<String> {
  v.as_deref()
    .map(|s| s.split_whitespace().collect::<Vec<_>>().join(" "))
    .filter(|s| !s.is_empty())
}

/// Ordered clues: manufacturer initial, era, engine, cylinders, year,
/// source channel, fun fact, model word count.
pub fn build_sequence(ctx: &HintContext) -> Vec<String> {
  let mut seq = Vec::new();
  if let Some(initial) = present(&ctx.manufacturer).and_then(|m| m.chars().next()) {
    seq.push(format!("Première lettre de la marque : {initial}"));
  }
  if let Some(era) = present(&ctx.era) {
    seq.push(format!("Période de production : {era}"));
  }
  if let Some(engine) = present(&ctx.engine) {
    seq.push(format!("Architecture moteur : {engine}"));
  }
  if let Some(cylinders) = present(&ctx.cylinders) {
    seq.push(format!("Nombre de cylindres : {cylinders}"));
  }
  if let Some(year) = present(&ctx.year) {
    seq.push(format!("Année clé : {year}"));
  }
  if let Some(channel) = present(&ctx.channel) {
    seq.push(format!("Indice YouTube : vidéo postée par {channel}"));
  }
  if let Some(fact) = present(&ctx.fun_fact) {
    seq.push(format!("Fun fact : {fact}"));
  }
  if let Some(model) = present(&ctx.model) {
    let words = model.split_whitespace().count();
    let plural = if words > 1 { "s" } else { "" };
    seq.push(format!("Le nom du modèle contient {words} mot{plural}."));
  }
  seq
}

/// Next hint after `current_level`, saturating at the last clue.
pub fn next_hint(current_level: u32, ctx: &HintContext) -> HintResult {
  let seq = build_sequence(ctx);
  if seq.is_empty() {
    return HintResult { level: current_level, message: NO_MORE_HINTS.to_string(), remaining: 0 };
  }
  let len = seq.len() as u32;
  let level = len.min(current_level.saturating_add(1));
  HintResult {
    level,
    message: seq[(level - 1) as usize].clone(),
    remaining: len - level,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn full() -> HintContext {
    HintContext {
      manufacturer: Some("ducati".into()),
      model: Some("Panigale  V4S".into()),
      engine: Some("V4".into()),
      era: Some("2010s".into()),
      year: Some("2018".into()),
      cylinders: Some("4".into()),
      fun_fact: Some("Desmosedici derived".into()),
      channel: Some("Moto Sound".into()),
    }
  }

  #[test]
  fn full_sequence_order() {
    let seq = build_sequence(&full());
    assert_eq!(seq.len(), 8);
    assert_eq!(seq[0], "Première lettre de la marque : d");
    assert_eq!(seq[1], "Période de production : 2010s");
    assert_eq!(seq[5], "Indice YouTube : vidéo postée par Moto Sound");
    assert_eq!(seq[7], "Le nom du modèle contient 2 mots.");
  }

  #[test]
  fn absent_attributes_are_skipped() {
    let ctx = HintContext { model: Some("R1".into()), year: Some(" ".into()), ..Default::default() };
    let seq = build_sequence(&ctx);
    assert_eq!(seq, vec!["Le nom du modèle contient 1 mot.".to_string()]);
  }

  #[test]
  fn stabilizes_at_the_end() {
    let ctx = full();
    let mut level = 0;
    let mut last = None;
    for _ in 0..12 {
      let h = next_hint(level, &ctx);
      assert!(h.level >= level);
      level = h.level;
      last = Some(h);
    }
    let last = last.expect("hint");
    assert_eq!(last.level, 8);
    assert_eq!(last.remaining, 0);
    assert_eq!(next_hint(level, &ctx), last);
  }

  #[test]
  fn first_hint_reports_remaining() {
    let h = next_hint(0, &full());
    assert_eq!(h.level, 1);
    assert_eq!(h.remaining, 7);
  }

  #[test]
  fn empty_context_keeps_level() {
    let h = next_hint(3, &HintContext::default());
    assert_eq!(h, HintResult { level: 3, message: NO_MORE_HINTS.to_string(), remaining: 0 });
  }
}
