// WHY: Several kinds routinely claim the same digits ("15." is ORDINAL, DATE and NUMBER);
// exactly one reading per text position survives, chosen by kind precedence.

use tracing::debug;

use crate::span::NumberSpan;

/// Reduce validated candidates to a pairwise disjoint set.
///
/// Candidates are visited by `(priority, start, longest first)`; a candidate nested in or
/// partially overlapping an already accepted span is dropped. The result is in text order.
pub fn resolve_overlaps<'a>(mut candidates: Vec<NumberSpan<'a>>) -> Vec<NumberSpan<'a>> {
    candidates.sort_by(|a, b| {
        a.kind
            .priority()
            .cmp(&b.kind.priority())
            .then(a.start.cmp(&b.start))
            .then(b.len().cmp(&a.len()))
    });

    let mut accepted: Vec<NumberSpan<'a>> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if let Some(winner) = accepted.iter().find(|span| span.overlaps(&candidate)) {
            debug!(
                "{} '{}' at {} loses to {} '{}'",
                candidate.kind, candidate.text, candidate.start, winner.kind, winner.text
            );
            continue;
        }
        accepted.push(candidate);
    }

    accepted.sort_by_key(|span| span.start);
    accepted
}
