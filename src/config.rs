// WHY: Every knob of the normalizer in one TOML file; each field has a default so an
// empty file (or no file at all) gives a working Basel setup

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::lexicon::Dialect;
use crate::temporal::{DocumentType, HeidelTimeConfig};

/// Which temporal tagger produces DATE/TIME candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TemporalBackend {
    /// Built-in pattern tagger
    #[default]
    Rules,
    /// External HeidelTime worker pool
    Heideltime,
    /// No DATE/TIME detection
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MorphConfig {
    pub timeout_ms: u64,
}

impl Default for MorphConfig {
    fn default() -> Self {
        Self { timeout_ms: 2000 }
    }
}

impl MorphConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemporalConfig {
    pub backend: TemporalBackend,
    pub timeout_ms: u64,
    pub language: String,
    pub document_type: DocumentType,
    pub reference_date: Option<NaiveDate>,
    pub heideltime: HeidelTimeConfig,
}

impl Default for TemporalConfig {
    fn default() -> Self {
        Self {
            backend: TemporalBackend::default(),
            timeout_ms: 5000,
            language: "german".to_string(),
            document_type: DocumentType::default(),
            reference_date: None,
            heideltime: HeidelTimeConfig::default(),
        }
    }
}

impl TemporalConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NormalizerConfig {
    pub dialect: Dialect,
    pub gazetteer_path: PathBuf,
    pub declension_path: PathBuf,
    pub morph: MorphConfig,
    pub temporal: TemporalConfig,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::Basel,
            gazetteer_path: PathBuf::from("data/plz_ortschaften.csv"),
            declension_path: PathBuf::from("data/ordinal_declension.csv"),
            morph: MorphConfig::default(),
            temporal: TemporalConfig::default(),
        }
    }
}

impl NormalizerConfig {
    /// Read a TOML config; unknown keys and unknown enum values are errors
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = Self::from_toml(&raw)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        info!(
            "Loaded config from {} (dialect {}, temporal backend {:?})",
            path.display(),
            config.dialect,
            config.temporal.backend
        );
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        toml::from_str(raw).context("Failed to parse TOML config")
    }
}
