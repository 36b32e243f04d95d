// St. Gallen ordinals take their ending from the declension table

#[path = "integration/mod.rs"]
mod test_utils;
use test_utils::{config_for, st_gallen};

use std::sync::Arc;
use zahlwort::lexicon::OrdinalDeclensionTable;
use zahlwort::span::{Case, Declension, DeclensionClass, Gender, SpanValue};
use zahlwort::{Dialect, GenerateError, NumberKind, Normalizer, Resources};

#[test]
fn test_definite_nominative_ordinal() {
    assert_eq!(
        st_gallen().convert("Das ist der 3. Platz."),
        "Das ist der dritti Platz."
    );
}

#[test]
fn test_definite_dative_ordinal() {
    assert_eq!(
        st_gallen().convert("Er kam mit dem 3. Zug."),
        "Er kam mit dem dritte Zug."
    );
}

#[test]
fn test_declension_attached_to_span() {
    let spans = st_gallen().detect("Er kam mit dem 3. Zug.");
    let ordinal = spans
        .iter()
        .find(|span| span.kind == NumberKind::Ordinal)
        .expect("ordinal accepted");
    assert_eq!(
        ordinal.value,
        Some(SpanValue::Ordinal(Declension {
            class: DeclensionClass::Weak,
            gender: Gender::Masculine,
            case: Case::Dative,
        }))
    );
}

#[test]
fn test_plural_noun_selects_plural_row() {
    assert_eq!(
        st_gallen().convert("Die 3. Klassen reisen ab."),
        "Die dritte Klassen reisen ab."
    );
    assert_eq!(
        st_gallen().convert("Die 3. Klasse reist ab."),
        "Die dritti Klasse reist ab."
    );

    let spans = st_gallen().detect("Er spielte mit den 3. Plätzen.");
    let ordinal = spans
        .iter()
        .find(|span| span.kind == NumberKind::Ordinal)
        .expect("ordinal accepted");
    assert_eq!(
        ordinal.declension(),
        Some(Declension {
            class: DeclensionClass::Weak,
            gender: Gender::Plural,
            case: Case::Dative,
        })
    );
}

#[test]
fn test_bare_preposition_is_strong() {
    let spans = st_gallen().detect("Sie wechselte nach 3. Runde.");
    let ordinal = spans
        .iter()
        .find(|span| span.kind == NumberKind::Ordinal)
        .expect("ordinal accepted");
    let declension = ordinal.declension().expect("declension derived");
    assert_eq!(declension.class, DeclensionClass::Strong);
    assert_eq!(declension.case, Case::Dative);
}

#[test]
fn test_missing_row_is_reported_not_guessed() {
    let table = OrdinalDeclensionTable::from_entries([(
        Declension {
            class: DeclensionClass::Weak,
            gender: Gender::Masculine,
            case: Case::Nominative,
        },
        "i",
    )]);
    let resources = Arc::new(Resources::new(Default::default(), Some(table)));
    let normalizer = Normalizer::new(Dialect::StGallen, resources)
        .expect("table present")
        .without_temporal_tagger();

    let result = normalizer.normalize("Er kam mit dem 3. Zug, der 4. Zug fiel aus.");
    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.failures[0].original, "3.");
    assert!(matches!(
        result.failures[0].error,
        GenerateError::MissingDeclension(Declension {
            case: Case::Dative,
            ..
        })
    ));
    assert_eq!(result.text, "Er kam mit dem 3. Zug, der vierti Zug fiel aus.");
}

#[tokio::test]
async fn test_loaded_table_is_complete() {
    let config = config_for(Dialect::StGallen);
    let table = OrdinalDeclensionTable::load(&config.declension_path)
        .await
        .expect("sample declension table loads");
    assert_eq!(table.len(), 48);
}

#[test]
fn test_st_gallen_without_table_fails_at_startup() {
    let resources = Arc::new(Resources::default());
    assert!(Normalizer::new(Dialect::StGallen, resources).is_err());
}
