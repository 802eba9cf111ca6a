//! Application state: catalog, options cache, setup limits and the in-memory
//! round store.
//!
//! A round is one player-turn on one catalog entry. Its hint level, joker and
//! final scoring are all done under the store's write lock, so concurrent
//! requests for the same round cannot skip or double-spend. Finished and
//! abandoned rounds are swept whenever a new round is opened.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde::Serialize;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::catalog::{Catalog, CatalogEntry};
use crate::config::{load_game_config_from_env, GameConfig};
use crate::constraints::GameConstraints;
use crate::domain::JokerKind;
use crate::hints::{next_hint, HintContext, HintResult};
use crate::options::{OptionsCache, OptionsError};
use crate::seeds::seed_catalog;

/// Closed rounds keep answering 409 for this long before they are swept.
pub const COMPLETED_ROUND_RETENTION: Duration = Duration::from_secs(10 * 60);
/// Rounds never closed are swept after this long.
pub const ABANDONED_ROUND_TTL: Duration = Duration::from_secs(2 * 60 * 60);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundStatus {
    Active,
    Completed,
}

#[derive(Clone, Debug)]
pub struct RoundRecord {
    pub id: Uuid,
    pub subject_key: String,
    pub hint_level: u32,
    pub joker: Option<JokerKind>,
    pub status: RoundStatus,
    pub started_at: Instant,
    pub completed_at: Option<Instant>,
}

impl RoundRecord {
    fn expired(&self, now: Instant) -> bool {
        match self.completed_at {
            Some(done) => now.saturating_duration_since(done) >= COMPLETED_ROUND_RETENTION,
            None => now.saturating_duration_since(self.started_at) >= ABANDONED_ROUND_TTL,
        }
    }

    fn step_hint(&mut self, entry: &CatalogEntry) -> HintResult {
        let hint = next_hint(self.hint_level, &HintContext::from(entry));
        self.hint_level = hint.level;
        hint
    }
}

/// Outcome of a granted joker: the hint it served or the value it revealed.
#[derive(Clone, Debug)]
pub struct JokerGrant {
    pub record: RoundRecord,
    pub hint: Option<HintResult>,
    pub revealed: Option<String>,
}

#[derive(Debug, Error)]
pub enum RoundError {
    #[error("unknown round {0}")]
    NotFound(Uuid),
    #[error("round {0} is already completed")]
    Closed(Uuid),
    #[error("a joker ({0}) was already used this round")]
    JokerAlreadyUsed(String),
    #[error("round {0} points at a subject missing from the catalog")]
    SubjectMissing(Uuid),
}

pub struct AppState {
    pub catalog: Catalog,
    pub options: OptionsCache,
    pub constraints: GameConstraints,
    rounds: RwLock<HashMap<Uuid, RoundRecord>>,
}

impl AppState {
    /// Build state from env: load config, load the catalog (file or seeds),
    /// and initialize the options cache.
    #[instrument(level = "info", skip_all)]
    pub async fn from_env() -> Result<Self, OptionsError> {
        let cfg = load_game_config_from_env().unwrap_or_default();
        let catalog = load_catalog(&cfg).await;
        Self::with_catalog(catalog, cfg.game).await
    }

    pub async fn with_catalog(catalog: Catalog, constraints: GameConstraints) -> Result<Self, OptionsError> {
        let options = OptionsCache::new();
        options.initialize(&catalog).await?;
        info!(
            target: "motosound",
            entries = catalog.len(),
            sources = catalog.source_count(),
            available_sources = constraints.available_sources,
            "Startup catalog inventory"
        );
        Ok(Self { catalog, options, constraints, rounds: RwLock::new(HashMap::new()) })
    }

    /// Open a round on `subject_key`, or on a random entry when `None`.
    #[instrument(level = "info", skip(self))]
    pub async fn start_round(&self, subject_key: Option<&str>) -> Option<(RoundRecord, CatalogEntry)> {
        let entry = match subject_key {
            Some(key) => self.catalog.find(key),
            None => self.catalog.choose(&mut rand::thread_rng()),
        }?
        .clone();

        let now = Instant::now();
        let record = RoundRecord {
            id: Uuid::new_v4(),
            subject_key: entry.subject.key(),
            hint_level: 0,
            joker: None,
            status: RoundStatus::Active,
            started_at: now,
            completed_at: None,
        };
        let mut rounds = self.rounds.write().await;
        sweep(&mut rounds, now);
        rounds.insert(record.id, record.clone());
        drop(rounds);
        info!(target: "round", id = %record.id, subject = %record.subject_key, "Round started");
        Some((record, entry))
    }

    fn entry_for(&self, record: &RoundRecord) -> Result<&CatalogEntry, RoundError> {
        self.catalog
            .find(&record.subject_key)
            .ok_or(RoundError::SubjectMissing(record.id))
    }

    /// Snapshot of a round and its catalog entry.
    pub async fn round(&self, id: Uuid) -> Result<(RoundRecord, &CatalogEntry), RoundError> {
        let record = self
            .rounds
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(RoundError::NotFound(id))?;
        let entry = self.entry_for(&record)?;
        Ok((record, entry))
    }

    /// Score an active round and, when `score` says it is finished, close it.
    /// The check, the scoring and the status change share one write guard, so
    /// `score` sees the joker that will be charged and a round is settled once.
    pub async fn settle_round<T>(
        &self,
        id: Uuid,
        score: impl FnOnce(&RoundRecord, &CatalogEntry) -> (T, bool),
    ) -> Result<(RoundRecord, T), RoundError> {
        let mut rounds = self.rounds.write().await;
        let record = rounds.get_mut(&id).ok_or(RoundError::NotFound(id))?;
        if record.status != RoundStatus::Active {
            return Err(RoundError::Closed(id));
        }
        let entry = self.entry_for(record)?;
        let (out, finished) = score(record, entry);
        if finished {
            record.status = RoundStatus::Completed;
            record.completed_at = Some(Instant::now());
            info!(target: "round", %id, "Round completed");
        }
        Ok((record.clone(), out))
    }

    /// Advance the round's hint level by one step.
    #[instrument(level = "debug", skip(self))]
    pub async fn advance_hint(&self, id: Uuid) -> Result<HintResult, RoundError> {
        let mut rounds = self.rounds.write().await;
        let record = rounds.get_mut(&id).ok_or(RoundError::NotFound(id))?;
        let entry = self.entry_for(record)?;
        Ok(record.step_hint(entry))
    }

    /// Register the round's single joker and apply it. The first joker locks
    /// out all others.
    #[instrument(level = "info", skip(self))]
    pub async fn use_joker(&self, id: Uuid, joker: JokerKind) -> Result<JokerGrant, RoundError> {
        let mut rounds = self.rounds.write().await;
        let record = rounds.get_mut(&id).ok_or(RoundError::NotFound(id))?;
        if record.status != RoundStatus::Active {
            return Err(RoundError::Closed(id));
        }
        if let Some(used) = record.joker {
            warn!(target: "round", %id, used = %String::from(used), "Second joker refused");
            return Err(RoundError::JokerAlreadyUsed(used.into()));
        }
        let entry = self.entry_for(record)?;
        record.joker = Some(joker);
        let (hint, revealed) = match joker {
            JokerKind::Hint => (Some(record.step_hint(entry)), None),
            JokerKind::Reveal(field) => (None, Some(entry.subject.value(field).to_string())),
        };
        Ok(JokerGrant { record: record.clone(), hint, revealed })
    }

    /// Drop rounds that expired at `now`; returns how many were removed.
    pub async fn prune_rounds(&self, now: Instant) -> usize {
        sweep(&mut *self.rounds.write().await, now)
    }

    pub async fn round_count(&self) -> usize {
        self.rounds.read().await.len()
    }
}

fn sweep(rounds: &mut HashMap<Uuid, RoundRecord>, now: Instant) -> usize {
    let before = rounds.len();
    rounds.retain(|_, r| !r.expired(now));
    let removed = before - rounds.len();
    if removed > 0 {
        debug!(target: "round", removed, remaining = rounds.len(), "Swept expired rounds");
    }
    removed
}

async fn load_catalog(cfg: &GameConfig) -> Catalog {
    let Some(path) = cfg.catalog.path.as_deref() else {
        info!(target: "catalog", "No catalog file configured; using built-in seeds");
        return seed_catalog();
    };
    match Catalog::load_file(path).await {
        Ok(c) if !c.is_empty() => c,
        Ok(_) => {
            warn!(target: "catalog", %path, "Catalog file is empty; using built-in seeds");
            seed_catalog()
        }
        Err(e) => {
            warn!(target: "catalog", %path, error = %e, "Catalog load failed; using built-in seeds");
            seed_catalog()
        }
    }
}
