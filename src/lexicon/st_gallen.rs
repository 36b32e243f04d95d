// St. Gallen tables; ordinal endings come from the declension table

use super::{DialectLexicon, OrdinalSuffix};

pub static LEXICON: DialectLexicon = DialectLexicon {
    name: "St. Gallen",
    low_words: [
        "null", "eis", "zwei", "drü", "vio", "füf", "sechs", "siebe", "acht", "nün", "zäh", "elf",
        "zwölf", "drizäh", "vierzäh", "füfzäh", "sechzäh", "siebzäh", "achzäh", "nünzäh", "zwanzg",
    ],
    tens: [
        "driisg", "vierzg", "füfzg", "sechzg", "siebezg", "achzg", "nünzg",
    ],
    hundred: "hundert",
    thousand: "tuusig",
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
        ("drü", "drit"),
        ("vio", "vier"),
        ("acht", "ach"),
        ("siebe", "sib"),
        ("zg", "zgs"),
        ("sg", "sgs"),
        ("ig", "igs"),
        ("ert", "erts"),
        ("ione", "ions"),
        ("ion", "ions"),
        ("zäh", "zähn"),
        ("rdä", "rdäs"),
    ],
    ordinal_suffix: OrdinalSuffix::Declined { stem: "t" },
    hours: [
        "eis", "zwei", "drü", "vieri", "füfi", "sechsi", "sibni", "achti", "nüni", "zäni", "elfi",
        "zwölfi",
    ],
    idiomatic_minutes: &[
        (15, "viertl ab"),
        (25, "fünf vor halb"),
        (30, "halbi"),
        (35, "fünf ab halb"),
        (45, "viertl vor"),
    ],
    minutes_past: "ab",
    minutes_to: "vor",
    second: "sekunde",
    months: [
        "Januar", "Februar", "März", "April", "Mai", "Juni", "Juli", "August", "Septämbor",
        "Oktobor", "Novämbor", "Dezämbor",
    ],
    plus: "plus",
    comma: "Komma",
    currency: "Franke",
};
