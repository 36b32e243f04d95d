// WHY: Raw candidate recognition, one compiled pattern per kind. Candidates of different
// kinds may overlap freely; validation and overlap resolution decide later.

use anyhow::{Context, Result};
use regex_automata::meta::Regex;
use tracing::{debug, info};

use crate::span::{NumberKind, NumberSpan};

pub mod patterns;

/// Pattern-based detector for every non-temporal kind
pub struct SpanDetector {
    patterns: Vec<(NumberKind, Regex)>,
}

impl SpanDetector {
    /// Compile all kind patterns. A pattern that fails to compile is a configuration error.
    pub fn new() -> Result<Self> {
        let sources = [
            (NumberKind::Phone, patterns::phone()),
            (NumberKind::Zip, patterns::zip()),
            (NumberKind::Ordinal, patterns::ordinal()),
            (NumberKind::Year, patterns::year()),
            (NumberKind::Money, patterns::money()),
            (NumberKind::CarPlate, patterns::car_plate()),
            (NumberKind::Model, patterns::model()),
            (NumberKind::Number, patterns::number()),
        ];

        let mut compiled = Vec::with_capacity(sources.len());
        for (kind, source) in sources {
            let regex = Regex::new(&source)
                .with_context(|| format!("Failed to compile {kind} pattern"))?;
            compiled.push((kind, regex));
        }

        info!("Compiled {} span detection patterns", compiled.len());
        Ok(Self { patterns: compiled })
    }

    /// Every raw candidate in `text`, grouped by kind in detection order
    pub fn detect<'a>(&self, text: &'a str) -> Vec<NumberSpan<'a>> {
        let mut spans = Vec::new();

        for (kind, regex) in &self.patterns {
            let before = spans.len();
            for found in regex.find_iter(text) {
                let (start, end) = (found.start(), found.end());
                if start == end {
                    continue;
                }
                let accepted = match kind {
                    NumberKind::Ordinal => ordinal_is_terminated(text, end),
                    NumberKind::Model => is_model_token(&text[start..end]),
                    _ => true,
                };
                if accepted {
                    spans.push(NumberSpan::new(*kind, text, start, end));
                }
            }
            debug!("{} raw {} candidates", spans.len() - before, kind);
        }

        spans
    }
}

/// An ordinal period must be followed by whitespace or the end of the text
fn ordinal_is_terminated(text: &str, end: usize) -> bool {
    text[end..].chars().next().map_or(true, char::is_whitespace)
}

/// Product codes mix at least one ASCII letter with at least one digit
fn is_model_token(token: &str) -> bool {
    token.chars().any(|c| c.is_ascii_alphabetic()) && token.chars().any(|c| c.is_ascii_digit())
}
