// WHY: Typed failures for the two places the pipeline degrades instead of aborting:
// external tagger calls and per-span word generation

use std::time::Duration;
use thiserror::Error;

use crate::span::{Declension, NumberKind};

/// Failure of an external tagging collaborator (temporal or morphological)
#[derive(Debug, Error)]
pub enum TaggerError {
    #[error("tagger unavailable: {0}")]
    Unavailable(String),

    #[error("tagger did not answer within {0:?}")]
    Timeout(Duration),

    #[error("malformed tagger output: {0}")]
    Malformed(String),

    #[error("tagger I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure to render one accepted span; the span is left untouched in the text
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerateError {
    #[error("ordinal declension table has no row for {0}")]
    MissingDeclension(Declension),

    #[error("{0} span needs declension features but none were derived")]
    MissingDeclensionFeatures(NumberKind),

    #[error("{kind} span carries no usable value: {reason}")]
    InvalidValue { kind: NumberKind, reason: String },
}
