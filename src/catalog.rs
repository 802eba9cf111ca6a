//! Motorcycle catalog: entries (subject + sound clip), TOML loading, and the
//! provider seam the options cache reads its snapshot through.
//!
//! Expected TOML schema:
//!
//! ```toml
//! [[motos]]
//! manufacturer = "Ducati"
//! model = "Panigale V4S"
//! engine = "V4"
//! cylinders = "4"
//! year = "2018"
//! era = "2010s"
//! fun_fact = "..."
//! verified = true          # optional, false entries are dropped
//!
//! [motos.clip]
//! video_id = "abc123"
//! start_seconds = 12
//! end_seconds = 32
//! channel = "Some Channel"
//! ```

use std::collections::HashSet;
use std::future::Future;
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::domain::{Clip, Subject};

#[derive(Debug, Error)]
pub enum CatalogError {
  #[error("failed to read catalog file {path}: {source}")]
  Io { path: String, #[source] source: std::io::Error },
  #[error("failed to parse catalog: {0}")]
  Parse(#[from] toml::de::Error),
}

fn default_verified() -> bool { true }

/// One catalog row: the motorcycle and (optionally) where its sound comes from.
#[derive(Clone, Debug, Deserialize)]
pub struct CatalogEntry {
  #[serde(flatten)]
  pub subject: Subject,
  #[serde(default)]
  pub clip: Option<Clip>,
  #[serde(default = "default_verified")]
  pub verified: bool,
}

impl CatalogEntry {
  pub fn new(subject: Subject, clip: Option<Clip>) -> Self {
    Self { subject, clip, verified: true }
  }

  pub fn channel(&self) -> Option<&str> {
    self.clip.as_ref().and_then(|c| c.channel.as_deref()).filter(|c| !c.is_empty())
  }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
  #[serde(default)]
  motos: Vec<CatalogEntry>,
}

/// Verified catalog entries, in file order, unique by subject key.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
  entries: Vec<CatalogEntry>,
}

impl Catalog {
  pub fn new(entries: Vec<CatalogEntry>) -> Self {
    let total = entries.len();
    let entries: Vec<CatalogEntry> = entries.into_iter().filter(|e| e.verified).collect();
    if entries.len() < total {
      warn!(target: "catalog", dropped = total - entries.len(), "Dropped unverified catalog entries");
    }

    // First entry per subject key wins.
    let mut seen = HashSet::new();
    let entries = entries
      .into_iter()
      .filter(|e| {
        let key = e.subject.key();
        let fresh = seen.insert(key.clone());
        if !fresh {
          warn!(target: "catalog", %key, model = %e.subject.model, "Dropped catalog entry with duplicate key");
        }
        fresh
      })
      .collect();
    Self { entries }
  }

  pub fn from_toml_str(s: &str) -> Result<Self, CatalogError> {
    let file: CatalogFile = toml::from_str(s)?;
    Ok(Self::new(file.motos))
  }

  #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
  pub async fn load_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
    let path = path.as_ref();
    let text = tokio::fs::read_to_string(path).await.map_err(|source| CatalogError::Io {
      path: path.display().to_string(),
      source,
    })?;
    let catalog = Self::from_toml_str(&text)?;
    info!(target: "catalog", entries = catalog.len(), "Loaded catalog file");
    Ok(catalog)
  }

  pub fn len(&self) -> usize { self.entries.len() }

  pub fn is_empty(&self) -> bool { self.entries.is_empty() }

  pub fn entries(&self) -> &[CatalogEntry] { &self.entries }

  /// Number of playable sound sources (entries with a clip).
  pub fn source_count(&self) -> usize {
    self.entries.iter().filter(|e| e.clip.is_some()).count()
  }

  pub fn find(&self, key: &str) -> Option<&CatalogEntry> {
    self.entries.iter().find(|e| e.subject.key() == key)
  }

  pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&CatalogEntry> {
    self.entries.choose(rng)
  }
}

/// Supplies the catalog snapshot consumed once by the options cache.
pub trait CatalogProvider {
  fn load_subjects(&self) -> impl Future<Output = Result<Vec<Subject>, CatalogError>> + Send;
}

impl CatalogProvider for Catalog {
  async fn load_subjects(&self) -> Result<Vec<Subject>, CatalogError> {
    Ok(self.entries.iter().map(|e| e.subject.clone()).collect())
  }
}

impl CatalogProvider for Vec<Subject> {
  async fn load_subjects(&self) -> Result<Vec<Subject>, CatalogError> {
    Ok(self.clone())
  }
}
