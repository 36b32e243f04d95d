// Basel-Stadt tables

use super::{DialectLexicon, OrdinalSuffix};

pub static LEXICON: DialectLexicon = DialectLexicon {
    name: "Basel",
    low_words: [
        "null", "eis", "zwei", "drei", "vier", "fünf", "sechs", "siebe", "acht", "nün", "zäh",
        "elf", "zwölf", "drizäh", "vierzäh", "füfzäh", "sechzäh", "siebzäh", "achzäh", "nünzäh",
        "zwanzig",
    ],
    tens: [
        "drissig", "vierzig", "füfzig", "sächzig", "sibzig", "achzig", "nünzig",
    ],
    hundred: "hundärd",
    thousand: "tusig",
    magnitude_stems: &["M", "B", "Tr", "Quadr", "Quint", "Sext"],
    mega_suffix: "illion",
    giga_suffix: "illiardä",
    one_prefix: "ei",
    one_before_ten: "ein",
    unit_linker: "ä",
    mega_plural_suffix: "illione",
    giga_plural_suffix: "illiardä",
    ordinal_stems: &[
        ("eis", "ers"),
        ("drei", "drit"),
        ("acht", "ach"),
        ("siebe", "sieb"),
        ("ig", "igs"),
        ("ert", "erts"),
        ("end", "ends"),
        ("ione", "ions"),
        ("ion", "ions"),
        ("nen", "ns"),
        ("rde", "rds"),
        ("rden", "rds"),
        ("zäh", "zähn"),
        ("ärd", "ärds"),
        ("rdä", "rdäs"),
    ],
    ordinal_suffix: OrdinalSuffix::Fixed("t"),
    hours: [
        "eis", "zwei", "drei", "vieri", "fünfi", "sächsi", "siebni", "achti", "nüni", "zääni",
        "elfi", "zwölfi",
    ],
    idiomatic_minutes: &[
        (15, "viertel ab"),
        (25, "fünf vor halbi"),
        (30, "halbi"),
        (35, "fünf ab halbi"),
        (45, "viertel vor"),
    ],
    minutes_past: "ab",
    minutes_to: "vor",
    second: "sekunde",
    months: [
        "Januar", "Februar", "März", "April", "Mai", "Juni", "Juli", "Auguscht", "Septämber",
        "Oktober", "Novämber", "Dezämber",
    ],
    plus: "plus",
    comma: "Komma",
    currency: "Frangge",
};
