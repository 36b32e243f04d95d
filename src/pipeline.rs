// WHY: Wires the stages together: detect (regex and temporal tagger side by side),
// validate, resolve overlaps, generate, rewrite. Shared tables are loaded once into
// `Resources` and only read afterwards.

use anyhow::{bail, Result};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::{NormalizerConfig, TemporalBackend};
use crate::detector::SpanDetector;
use crate::error::GenerateError;
use crate::gazetteer::Gazetteer;
use crate::generator::WordGenerator;
use crate::lexicon::{Dialect, OrdinalDeclensionTable};
use crate::resolver::resolve_overlaps;
use crate::rewriter::{rewrite, Replacement};
use crate::span::{NumberKind, NumberSpan};
use crate::temporal::{HeidelTimePool, PatternTagger, TemporalAdapter, TemporalTagger};
use crate::validator::{ContextValidator, LexiconTagger, MorphTagger, ValidationContext};

const DEFAULT_MORPH_TIMEOUT: Duration = Duration::from_secs(2);
const DEFAULT_TEMPORAL_TIMEOUT: Duration = Duration::from_secs(5);

/// Read-only lookup data shared by every normalizer instance
#[derive(Debug, Default)]
pub struct Resources {
    pub gazetteer: Gazetteer,
    pub declensions: Option<Arc<OrdinalDeclensionTable>>,
}

impl Resources {
    pub fn new(gazetteer: Gazetteer, declensions: Option<OrdinalDeclensionTable>) -> Self {
        Self {
            gazetteer,
            declensions: declensions.map(Arc::new),
        }
    }

    /// Load the gazetteer, plus the declension table when the dialect declines ordinals
    pub async fn load(config: &NormalizerConfig) -> Result<Self> {
        let gazetteer = Gazetteer::load(&config.gazetteer_path).await?;
        let declensions = if config.dialect.needs_declension() {
            Some(OrdinalDeclensionTable::load(&config.declension_path).await?)
        } else {
            None
        };
        Ok(Self::new(gazetteer, declensions))
    }
}

/// A span that was accepted but could not be rendered; its text is left as is
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanFailure {
    pub kind: NumberKind,
    pub start: usize,
    pub end: usize,
    pub original: String,
    pub error: GenerateError,
}

/// Result of normalizing one text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub text: String,
    pub replacements: Vec<Replacement>,
    pub failures: Vec<SpanFailure>,
}

pub struct Normalizer {
    detector: SpanDetector,
    validator: ContextValidator,
    generator: WordGenerator,
    resources: Arc<Resources>,
    morph: Arc<dyn MorphTagger>,
    morph_timeout: Duration,
    temporal: Option<TemporalAdapter>,
}

impl Normalizer {
    /// Compile the patterns for `dialect`. The built-in morphological and temporal
    /// taggers are installed; replace them with the `with_*` methods.
    pub fn new(dialect: Dialect, resources: Arc<Resources>) -> Result<Self> {
        if dialect.needs_declension() && resources.declensions.is_none() {
            bail!("Dialect {dialect} declines ordinals but no declension table was loaded");
        }

        let temporal =
            TemporalAdapter::new(Arc::new(PatternTagger::new()?), DEFAULT_TEMPORAL_TIMEOUT);
        let normalizer = Self {
            detector: SpanDetector::new()?,
            validator: ContextValidator::new()?,
            generator: WordGenerator::new(dialect, resources.declensions.clone()),
            resources,
            morph: Arc::new(LexiconTagger::new()),
            morph_timeout: DEFAULT_MORPH_TIMEOUT,
            temporal: Some(temporal),
        };

        info!("Normalizer ready for dialect {}", dialect);
        Ok(normalizer)
    }

    pub fn with_temporal_tagger(mut self, adapter: TemporalAdapter) -> Self {
        self.temporal = Some(adapter);
        self
    }

    pub fn without_temporal_tagger(mut self) -> Self {
        self.temporal = None;
        self
    }

    pub fn with_morph_tagger(mut self, tagger: Arc<dyn MorphTagger>, timeout: Duration) -> Self {
        self.morph = tagger;
        self.morph_timeout = timeout;
        self
    }

    /// Build a normalizer with everything the config names. A HeidelTime backend that
    /// cannot start is replaced by the built-in tagger.
    pub async fn from_config(config: &NormalizerConfig) -> Result<Self> {
        let resources = Arc::new(Resources::load(config).await?);
        let normalizer = Self::new(config.dialect, resources)?;
        let temporal = &config.temporal;

        let tagger: Arc<dyn TemporalTagger> = match temporal.backend {
            TemporalBackend::Disabled => {
                info!("Temporal tagging disabled");
                return Ok(normalizer.without_temporal_tagger());
            }
            TemporalBackend::Rules => Arc::new(PatternTagger::new()?),
            TemporalBackend::Heideltime => {
                let settings = temporal.clone();
                let started = tokio::task::spawn_blocking(move || {
                    HeidelTimePool::new(
                        &settings.heideltime,
                        &settings.language,
                        settings.document_type,
                        settings.reference_date,
                    )
                })
                .await?;
                match started {
                    Ok(pool) => Arc::new(pool),
                    Err(error) => {
                        warn!("HeidelTime unavailable, using built-in temporal patterns: {}", error);
                        Arc::new(PatternTagger::new()?)
                    }
                }
            }
        };

        let adapter = TemporalAdapter::new(tagger, temporal.timeout())
            .with_language(temporal.language.clone())
            .with_document_type(temporal.document_type)
            .with_reference_date(temporal.reference_date);

        Ok(normalizer
            .with_temporal_tagger(adapter)
            .with_morph_tagger(Arc::new(LexiconTagger::new()), config.morph.timeout()))
    }

    pub fn dialect(&self) -> Dialect {
        self.generator.dialect()
    }

    /// Accepted, non-overlapping spans of `text` in start order
    pub fn detect<'a>(&self, text: &'a str) -> Vec<NumberSpan<'a>> {
        let candidates = match &self.temporal {
            Some(adapter) => thread::scope(|scope| {
                let temporal = scope.spawn(|| adapter.candidates(text));
                let mut candidates = self.detector.detect(text);
                match temporal.join() {
                    Ok(found) => candidates.extend(found),
                    Err(_) => warn!("Temporal tagging thread panicked, continuing without it"),
                }
                candidates
            }),
            None => self.detector.detect(text),
        };

        let context = ValidationContext {
            gazetteer: &self.resources.gazetteer,
            morph: self.morph.as_ref(),
            morph_timeout: self.morph_timeout,
            dialect: self.dialect(),
        };
        let validated = self.validator.validate(text, candidates, &context);
        resolve_overlaps(validated)
    }

    pub fn normalize(&self, text: &str) -> Normalized {
        let mut replacements = Vec::new();
        let mut failures = Vec::new();

        for span in self.detect(text) {
            match self.generator.generate(&span) {
                Ok(spoken) => {
                    debug!("{} '{}' -> '{}'", span.kind, span.text, spoken);
                    replacements.push(Replacement::new(&span, spoken));
                }
                Err(error) => {
                    warn!(
                        "Leaving {} '{}' at {} unconverted: {}",
                        span.kind, span.text, span.start, error
                    );
                    failures.push(SpanFailure {
                        kind: span.kind,
                        start: span.start,
                        end: span.end,
                        original: span.text.to_string(),
                        error,
                    });
                }
            }
        }

        Normalized {
            text: rewrite(text, &replacements),
            replacements,
            failures,
        }
    }

    /// Normalized text only
    pub fn convert(&self, text: &str) -> String {
        self.normalize(text).text
    }
}
