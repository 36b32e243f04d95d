// A failing or misbehaving temporal tagger only costs the DATE/TIME readings

#[path = "integration/mod.rs"]
mod test_utils;
use test_utils::basel;

use std::sync::Arc;
use std::time::Duration;
use zahlwort::temporal::{
    HeidelTimeConfig, HeidelTimePool, TemporalAdapter, TemporalExpression, TemporalRequest,
    TemporalTagger, TimexType,
};
use zahlwort::{Dialect, NumberKind, Normalizer, Resources, TaggerError};

struct Broken;

impl TemporalTagger for Broken {
    fn tag(
        &self,
        _request: &TemporalRequest<'_>,
        _timeout: Duration,
    ) -> Result<Vec<TemporalExpression>, TaggerError> {
        Err(TaggerError::Unavailable("java not installed".into()))
    }
}

/// Reports an expression past the end of the text next to a valid one
struct OutOfBounds;

impl TemporalTagger for OutOfBounds {
    fn tag(
        &self,
        request: &TemporalRequest<'_>,
        _timeout: Duration,
    ) -> Result<Vec<TemporalExpression>, TaggerError> {
        let length = request.text.chars().count();
        Ok(vec![
            TemporalExpression {
                timex_type: TimexType::Time,
                surface: "14:30".to_string(),
                value: "XXXX-XX-XXT14:30".to_string(),
                start: 3,
                end: 8,
            },
            TemporalExpression {
                timex_type: TimexType::Date,
                surface: "2024".to_string(),
                value: "2024".to_string(),
                start: length + 5,
                end: length + 9,
            },
        ])
    }
}

fn normalizer_with(tagger: Arc<dyn TemporalTagger>) -> Normalizer {
    let resources = Arc::new(Resources::default());
    Normalizer::new(Dialect::Basel, resources)
        .expect("Basel needs no declension table")
        .with_temporal_tagger(TemporalAdapter::new(tagger, Duration::from_millis(50)))
}

#[test]
fn test_unavailable_tagger_keeps_other_kinds() {
    let normalizer = normalizer_with(Arc::new(Broken));
    let result = normalizer.normalize("Um 14:30 kamen 5 Gäste.");
    assert!(result.failures.is_empty());
    assert!(result
        .replacements
        .iter()
        .all(|replacement| replacement.kind != NumberKind::Time));
    assert!(result.text.contains("fünf Gäste"), "got: {}", result.text);
}

#[test]
fn test_out_of_bounds_expression_is_dropped() {
    let normalizer = normalizer_with(Arc::new(OutOfBounds));
    let spans = normalizer.detect("um 14:30 Uhr");
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].kind, NumberKind::Time);
    assert_eq!(spans[0].text, "14:30");
}

#[test]
fn test_missing_heideltime_jar_is_unavailable() {
    let config = HeidelTimeConfig {
        jar_path: "/nonexistent/heideltime.jar".into(),
        workers: 1,
        ..HeidelTimeConfig::default()
    };
    let started = HeidelTimePool::new(&config, "german", Default::default(), None);
    assert!(matches!(started, Err(TaggerError::Unavailable(_))));
}

#[tokio::test]
async fn test_heideltime_backend_falls_back_to_rules() {
    let mut config = test_utils::config_for(Dialect::Basel);
    config.temporal.backend = zahlwort::TemporalBackend::Heideltime;
    config.temporal.heideltime.jar_path = "/nonexistent/heideltime.jar".into();

    let normalizer = Normalizer::from_config(&config)
        .await
        .expect("a missing HeidelTime install is not fatal");
    assert_eq!(
        normalizer.convert("Treffpunkt um 14:30."),
        basel().convert("Treffpunkt um 14:30.")
    );
}
