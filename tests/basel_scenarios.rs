// End-to-end conversions for the Basel dialect

#[path = "integration/mod.rs"]
mod test_utils;
use test_utils::basel;

#[test]
fn test_plain_number() {
    assert_eq!(basel().convert("Ich habe 5 Äpfel."), "Ich habe fünf Äpfel.");
}

#[test]
fn test_hundred_keeps_one_prefix() {
    assert_eq!(basel().convert("Die Zahl ist 100."), "Die Zahl ist eihundärd.");
}

#[test]
fn test_ordinal_after_definite_article() {
    assert_eq!(
        basel().convert("Das ist der 1. Platz."),
        "Das ist der erst Platz."
    );
}

#[test]
fn test_ordinal_without_determiner_reads_as_number() {
    let converted = basel().convert("Die Antwort ist 2.");
    assert!(converted.contains("zwei"), "got: {converted}");
    assert!(!converted.contains("zweit"), "got: {converted}");
}

#[test]
fn test_zip_after_indicator() {
    let converted = basel().convert("PLZ 4410");
    assert!(converted.contains("vierävierzig zäh"), "got: {converted}");
}

#[test]
fn test_international_phone() {
    assert_eq!(
        basel().convert("Tel: +41 23 056 789"),
        "Tel: plus vier eis zwei drei null fünf sechs siebe acht nün"
    );
}

#[test]
fn test_ordinal_date_and_split_year() {
    assert_eq!(
        basel().convert("Der 2. Termin ist am 15. Januar im Jahr 1983."),
        "Der zweit Termin ist am füfzähnt Januar im Jahr nünzäh dreiäachzig."
    );
}

#[test]
fn test_clock_time() {
    assert_eq!(
        basel().convert("Treffpunkt um 14:30."),
        "Treffpunkt um halbi drei."
    );
}

#[test]
fn test_text_without_numbers_is_unchanged() {
    let text = "Grüezi mitenand, wie gohts?";
    assert_eq!(basel().convert(text), text);
}
