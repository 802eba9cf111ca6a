//! Multiple-choice option generation.
//!
//! The cache is loaded once from a catalog snapshot and then serves:
//! - per-field option sets (distinct catalog values, correct answer included)
//! - 50/50 option sets (correct answer + one distractor)
//! - coherent option sets: whole catalog rows, so a distractor's manufacturer
//!   always belongs with its own model.
//!
//! Sampling is "shuffle the pool, take a prefix" and every final set is
//! shuffled again, both with Fisher-Yates (`SliceRandom::shuffle`).
//! A set smaller than 2 tells the caller to fall back to free-text mode.

use std::collections::{BTreeSet, HashMap};

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{info, instrument, warn};

use crate::catalog::{CatalogError, CatalogProvider};
use crate::domain::{FieldName, Subject};

pub const DEFAULT_OPTION_COUNT: usize = 4;

#[derive(Debug, Error)]
pub enum OptionsError {
  #[error("options cache not initialized; call initialize() at startup")]
  NotInitialized,
  #[error(transparent)]
  Catalog(#[from] CatalogError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheState {
  Uninitialized,
  Ready,
}

/// A complete catalog row offered as a coherent option.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MotoOption {
  pub manufacturer: String,
  pub model: String,
  pub engine: String,
  pub cylinders: String,
  pub year: String,
}

impl MotoOption {
  fn from_subject(s: &Subject) -> Self {
    Self {
      manufacturer: s.manufacturer.clone(),
      model: s.model.clone(),
      engine: s.engine.clone(),
      cylinders: s.cylinders.clone(),
      year: s.year.clone(),
    }
  }

  fn same_pair(&self, manufacturer: &str, model: &str) -> bool {
    self.manufacturer == manufacturer && self.model == model
  }
}

#[derive(Debug, Default)]
struct OptionIndex {
  values: HashMap<FieldName, BTreeSet<String>>,
  rows: Vec<MotoOption>,
}

impl OptionIndex {
  fn build(subjects: &[Subject]) -> Self {
    let mut index = OptionIndex::default();
    for s in subjects {
      for field in FieldName::ALL {
        if let Some(v) = s.get(field) {
          index.values.entry(field).or_default().insert(v.to_string());
        }
      }
      if s.is_complete() {
        index.rows.push(MotoOption::from_subject(s));
      }
    }
    index
  }

  fn count(&self, field: FieldName) -> usize {
    self.values.get(&field).map_or(0, BTreeSet::len)
  }
}

/// Uniform sample of `n` items without replacement.
fn sample<T: Clone, R: Rng + ?Sized>(pool: &[T], n: usize, rng: &mut R) -> Vec<T> {
  let mut shuffled = pool.to_vec();
  shuffled.shuffle(rng);
  shuffled.truncate(n);
  shuffled
}

/// Process-wide option generator. Build one per process (or per test);
/// `initialize` must complete before any generation call.
#[derive(Debug, Default)]
pub struct OptionsCache {
  index: OnceCell<OptionIndex>,
}

impl OptionsCache {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn state(&self) -> CacheState {
    if self.index.initialized() { CacheState::Ready } else { CacheState::Uninitialized }
  }

  pub fn is_ready(&self) -> bool {
    self.state() == CacheState::Ready
  }

  /// Load the catalog snapshot once. Concurrent callers share the single
  /// in-flight load; calls after `Ready` are no-ops.
  #[instrument(level = "info", skip_all)]
  pub async fn initialize<P: CatalogProvider + ?Sized>(&self, provider: &P) -> Result<(), OptionsError> {
    if self.index.initialized() {
      info!(target: "options", "Options cache already initialized, skipping");
      return Ok(());
    }
    self
      .index
      .get_or_try_init(|| async {
        let subjects = provider.load_subjects().await?;
        let index = OptionIndex::build(&subjects);
        info!(
          target: "options",
          subjects = subjects.len(),
          manufacturers = index.count(FieldName::Manufacturer),
          models = index.count(FieldName::Model),
          engines = index.count(FieldName::Engine),
          cylinders = index.count(FieldName::Cylinders),
          years = index.count(FieldName::Year),
          complete_rows = index.rows.len(),
          "Options cache initialized"
        );
        Ok::<_, OptionsError>(index)
      })
      .await?;
    Ok(())
  }

  /// Back to `Uninitialized`. Meant for tests.
  pub fn reset(&mut self) {
    self.index.take();
  }

  fn ready(&self) -> Result<&OptionIndex, OptionsError> {
    self.index.get().ok_or(OptionsError::NotInitialized)
  }

  /// Up to `count` distinct values for `field`, always containing
  /// `correct_answer` exactly once, shuffled. `[correct_answer]` alone when
  /// the catalog offers no alternative.
  pub fn generate_field_options_with<R: Rng + ?Sized>(
    &self,
    field: FieldName,
    correct_answer: &str,
    count: usize,
    rng: &mut R,
  ) -> Result<Vec<String>, OptionsError> {
    let index = self.ready()?;
    let alternatives: Vec<String> = index
      .values
      .get(&field)
      .into_iter()
      .flatten()
      .filter(|v| v.as_str() != correct_answer)
      .cloned()
      .collect();

    if alternatives.is_empty() {
      warn!(target: "options", %field, "No alternative values; forcing expert mode");
      return Ok(vec![correct_answer.to_string()]);
    }

    let take = count.saturating_sub(1).min(alternatives.len());
    let mut options = sample(&alternatives, take, rng);
    options.push(correct_answer.to_string());
    options.shuffle(rng);
    Ok(options)
  }

  pub fn generate_field_options(
    &self,
    field: FieldName,
    correct_answer: &str,
    count: usize,
  ) -> Result<Vec<String>, OptionsError> {
    self.generate_field_options_with(field, correct_answer, count, &mut rand::thread_rng())
  }

  /// Two options (50/50), or `[correct_answer]` when no distractor exists.
  pub fn generate_half_options_with<R: Rng + ?Sized>(
    &self,
    field: FieldName,
    correct_answer: &str,
    rng: &mut R,
  ) -> Result<Vec<String>, OptionsError> {
    let options = self.generate_field_options_with(field, correct_answer, 2, rng)?;
    if options.len() < 2 {
      warn!(target: "options", %field, "Not enough options for 50/50; forcing expert mode");
      return Ok(vec![correct_answer.to_string()]);
    }
    Ok(options)
  }

  pub fn generate_half_options(&self, field: FieldName, correct_answer: &str) -> Result<Vec<String>, OptionsError> {
    self.generate_half_options_with(field, correct_answer, &mut rand::thread_rng())
  }

  /// Whole catalog rows: the row matching `manufacturer`/`model` plus up to
  /// `count - 1` other complete rows, shuffled. Unknown pairs degrade to a
  /// single partial row built from the pair.
  pub fn generate_coherent_options_with<R: Rng + ?Sized>(
    &self,
    manufacturer: &str,
    model: &str,
    count: usize,
    rng: &mut R,
  ) -> Result<Vec<MotoOption>, OptionsError> {
    let index = self.ready()?;
    let Some(correct) = index.rows.iter().find(|r| r.same_pair(manufacturer, model)) else {
      warn!(target: "options", %manufacturer, %model, "Subject not found in complete catalog rows");
      return Ok(vec![MotoOption {
        manufacturer: manufacturer.to_string(),
        model: model.to_string(),
        engine: String::new(),
        cylinders: String::new(),
        year: String::new(),
      }]);
    };

    let others: Vec<MotoOption> = index
      .rows
      .iter()
      .filter(|r| !r.same_pair(manufacturer, model))
      .cloned()
      .collect();
    if others.is_empty() {
      warn!(target: "options", "Single complete row in catalog; forcing expert mode");
      return Ok(vec![correct.clone()]);
    }

    let take = count.saturating_sub(1).min(others.len());
    let mut options = sample(&others, take, rng);
    options.push(correct.clone());
    options.shuffle(rng);
    Ok(options)
  }

  pub fn generate_coherent_options(
    &self,
    manufacturer: &str,
    model: &str,
    count: usize,
  ) -> Result<Vec<MotoOption>, OptionsError> {
    self.generate_coherent_options_with(manufacturer, model, count, &mut rand::thread_rng())
  }
}
