// WHY: ZIP and ORDINAL candidates are ambiguous with plain numbers; they are confirmed here
// from local context. Every other kind passes through unchanged.

use anyhow::{Context, Result};
use regex_automata::meta::Regex;
use std::time::Duration;
use tracing::{debug, warn};

use crate::detector::patterns;
use crate::gazetteer::Gazetteer;
use crate::lexicon::Dialect;
use crate::span::{
    chars_after, chars_before, Case, Declension, DeclensionClass, Gender, NumberKind, NumberSpan,
    SpanValue,
};

pub mod morph;

pub use morph::{LexiconTagger, MorphTagger, TokenAnalysis};

use morph::{Definiteness, GrammaticalNumber, PartOfSpeech};

/// Characters inspected for a postal-code indicator on either side
const ZIP_INDICATOR_WINDOW: usize = 20;
/// Characters inspected for a place name after the number
const PLACE_WINDOW: usize = 25;
/// Characters of context on each side handed to the morphological tagger
const ORDINAL_CONTEXT: usize = 30;

/// Collaborators the validator consults
pub struct ValidationContext<'r> {
    pub gazetteer: &'r Gazetteer,
    pub morph: &'r dyn MorphTagger,
    pub morph_timeout: Duration,
    pub dialect: Dialect,
}

pub struct ContextValidator {
    zip_left: Regex,
    zip_right: Regex,
    place: Regex,
}

impl ContextValidator {
    pub fn new() -> Result<Self> {
        Ok(Self {
            zip_left: Regex::new(&patterns::zip_left_indicator())
                .context("Failed to compile ZIP left indicator")?,
            zip_right: Regex::new(&patterns::zip_right_indicator())
                .context("Failed to compile ZIP right indicator")?,
            place: Regex::new(&patterns::place_name()).context("Failed to compile place pattern")?,
        })
    }

    /// Keep confirmed candidates; rejected ZIP/ORDINAL candidates are dropped so the
    /// NUMBER reading of the same digits can take over.
    pub fn validate<'a>(
        &self,
        text: &'a str,
        candidates: Vec<NumberSpan<'a>>,
        context: &ValidationContext<'_>,
    ) -> Vec<NumberSpan<'a>> {
        candidates
            .into_iter()
            .filter_map(|span| match span.kind {
                NumberKind::Zip => {
                    if self.is_zip(text, &span, context.gazetteer) {
                        Some(span)
                    } else {
                        debug!("Rejected ZIP candidate '{}' at {}", span.text, span.start);
                        None
                    }
                }
                NumberKind::Ordinal => self.confirm_ordinal(text, span, context),
                _ => Some(span),
            })
            .collect()
    }

    /// Indicator word before, country after, or a known place name right after
    pub fn is_zip(&self, text: &str, span: &NumberSpan<'_>, gazetteer: &Gazetteer) -> bool {
        let left = &text[chars_before(text, span.start, ZIP_INDICATOR_WINDOW)..span.start];
        if self.zip_left.is_match(left) {
            return true;
        }

        let right = &text[span.end..chars_after(text, span.end, ZIP_INDICATOR_WINDOW)];
        if self.zip_right.is_match(right) {
            return true;
        }

        self.place_follows(&text[span.end..chars_after(text, span.end, PLACE_WINDOW)], gazetteer)
    }

    /// Longest gazetteer-listed place name at the start of `window`
    fn place_follows(&self, window: &str, gazetteer: &Gazetteer) -> bool {
        let Some(found) = self.place.find(window) else {
            return false;
        };
        let words: Vec<&str> = window[found.range()].split_whitespace().collect();
        (1..=words.len())
            .rev()
            .any(|count| gazetteer.contains(&words[..count].join(" ")))
    }

    fn confirm_ordinal<'a>(
        &self,
        text: &'a str,
        span: NumberSpan<'a>,
        context: &ValidationContext<'_>,
    ) -> Option<NumberSpan<'a>> {
        let window_start = chars_before(text, span.start, ORDINAL_CONTEXT);
        let window_end = chars_after(text, span.end, ORDINAL_CONTEXT);
        let window = &text[window_start..window_end];
        let digits = span.text.trim_end_matches('.').len();
        let target = span.start - window_start..span.start - window_start + digits;

        let analysis = match context.morph.analyze(window, target, context.morph_timeout) {
            Ok(Some(analysis)) => analysis,
            Ok(None) => {
                debug!("No token at ordinal candidate '{}'", span.text);
                return None;
            }
            Err(error) => {
                warn!("Morphological tagger failed for '{}': {}", span.text, error);
                return None;
            }
        };

        let preceding = analysis.preceding.as_ref()?;
        if !matches!(preceding.pos, PartOfSpeech::Determiner | PartOfSpeech::Adposition) {
            debug!(
                "Rejected ordinal candidate '{}' after '{}'",
                span.text, preceding.text
            );
            return None;
        }

        if context.dialect.needs_declension() {
            let declension = derive_declension(&analysis)?;
            debug!("Ordinal '{}' declined as {}", span.text, declension);
            Some(span.with_value(SpanValue::Ordinal(declension)))
        } else {
            Some(span)
        }
    }
}

/// Class, gender and case of an ordinal from the determiner or adposition before it.
///
/// A definite determiner (or an article fused into a preposition) selects the weak class;
/// indefinite and possessive determiners select mixed, as does a determiner whose case is
/// ambiguous. A bare preposition with no determiner earlier in the clause selects strong.
/// Plural number overrides gender; unknown gender reads as masculine.
pub fn derive_declension(analysis: &TokenAnalysis) -> Option<Declension> {
    let preceding = analysis.preceding.as_ref()?;
    let features = preceding.features;

    let gender = if features.number == Some(GrammaticalNumber::Plural) {
        Gender::Plural
    } else {
        features.gender.unwrap_or(Gender::Masculine)
    };

    let definite = features.definiteness == Some(Definiteness::Definite) && !features.possessive;
    let (class, case) = match (preceding.pos, features.case) {
        (PartOfSpeech::Determiner, None) => (DeclensionClass::Mixed, Case::Nominative),
        (PartOfSpeech::Determiner, Some(case)) if definite => (DeclensionClass::Weak, case),
        (PartOfSpeech::Determiner, Some(case)) => (DeclensionClass::Mixed, case),
        (PartOfSpeech::Adposition, case) if definite => {
            (DeclensionClass::Weak, case.unwrap_or(Case::Dative))
        }
        (PartOfSpeech::Adposition, case) if !analysis.clause_has_determiner => {
            (DeclensionClass::Strong, case.unwrap_or(Case::Dative))
        }
        (PartOfSpeech::Adposition, case) => (DeclensionClass::Mixed, case.unwrap_or(Case::Dative)),
        _ => return None,
    };

    Some(Declension {
        class,
        gender,
        case,
    })
}
