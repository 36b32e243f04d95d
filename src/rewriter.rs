// WHY: Accepted spans are spliced back-to-front so offsets of spans not yet
// replaced stay valid; text outside the spans is copied unchanged

use serde::Serialize;

use crate::span::{NumberKind, NumberSpan};

/// One span of the source and the words that replace it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Replacement {
    pub kind: NumberKind,
    pub start: usize,
    pub end: usize,
    pub original: String,
    pub spoken: String,
}

impl Replacement {
    pub fn new(span: &NumberSpan<'_>, spoken: String) -> Self {
        Self {
            kind: span.kind,
            start: span.start,
            end: span.end,
            original: span.text.to_string(),
            spoken,
        }
    }
}

/// Apply non-overlapping replacements to `text`.
/// Replacements whose range is out of bounds or not on char boundaries are skipped.
pub fn rewrite(text: &str, replacements: &[Replacement]) -> String {
    let mut ordered: Vec<&Replacement> = replacements.iter().collect();
    ordered.sort_by(|a, b| b.start.cmp(&a.start));

    let mut output = text.to_string();
    let mut limit = text.len();
    for replacement in ordered {
        let (start, end) = (replacement.start, replacement.end);
        if start > end || end > limit {
            continue;
        }
        if !output.is_char_boundary(start) || !output.is_char_boundary(end) {
            continue;
        }
        output.replace_range(start..end, &replacement.spoken);
        limit = start;
    }
    output
}
