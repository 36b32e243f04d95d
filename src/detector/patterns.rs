// WHY: Pattern sources composed from named fragments so each kind's shape stays readable.
// The regex engine has no look-around; checks that need it are done by the detector.

/// Separators tolerated between phone-number digits
const PHONE_SEPARATOR: &str = r"[\s\-/.()]*";

/// The 26 two-letter canton codes used on Swiss licence plates
pub const CANTON_CODES: &[&str] = &[
    "AG", "AI", "AR", "BE", "BL", "BS", "FR", "GE", "GL", "GR", "JU", "LU", "NE", "NW", "OW", "SG",
    "SH", "SO", "SZ", "TG", "TI", "UR", "VD", "VS", "ZG", "ZH",
];

/// Currency tokens accepted next to an amount
const CURRENCY: &str = r"\b(?:CHF|SFr\.?|Fr\.?)";

/// Amount with optional thousands groups and up to two decimals
const GROUPED_AMOUNT: &str = r"[0-9]{1,3}(?:['’ ][0-9]{3})*(?:[.,][0-9]{1,2})?";

pub fn year() -> String {
    r"\b(?:1[5-9][0-9]{2}|20[0-9]{2})\b".to_string()
}

pub fn zip() -> String {
    r"\b[1-9][0-9]{3}\b".to_string()
}

pub fn phone() -> String {
    let international = format!(r"(?:\+|00)[1-9](?:{PHONE_SEPARATOR}[0-9]){{6,12}}");
    let national = format!(r"0[0-9](?:{PHONE_SEPARATOR}[0-9]){{8,11}}");
    format!("(?:{international})|(?:{national})")
}

pub fn car_plate() -> String {
    let cantons = CANTON_CODES.join("|");
    format!(r"\b(?:{cantons}) ?[0-9]{{1,6}}\b")
}

/// Digits followed by a period; the following-whitespace condition is checked separately
pub fn ordinal() -> String {
    r"\b[0-9]+\.".to_string()
}

pub fn money() -> String {
    let prefixed = format!(r"{CURRENCY}\s*{GROUPED_AMOUNT}(?:[-–]|\.[-–])?");
    let suffixed = format!(r"{GROUPED_AMOUNT}\s*{CURRENCY}");
    format!("(?:{prefixed})|(?:{suffixed})")
}

/// Alphanumeric token; the letter-and-digit condition is checked separately
pub fn model() -> String {
    r"\b[A-Za-z0-9_-]{3,}\b".to_string()
}

pub fn number() -> String {
    r"\b[0-9]+(?:['’][0-9]{3})*(?:[.,][0-9]+)?\b".to_string()
}

// Context patterns used by ZIP validation

pub fn zip_left_indicator() -> String {
    r"(?i)\b(?:plz|postleitzahl|ch)[\s:\-]*$".to_string()
}

pub fn zip_right_indicator() -> String {
    r"(?i)^\s*(?:ch|schweiz)\b".to_string()
}

/// Place name directly after a number: optional "St." prefix, capitalised words,
/// hyphen/apostrophe joined components
pub fn place_name() -> String {
    let upper = r"[A-ZÀ-ÖØ-Þ]";
    let letter = r"[A-Za-zÀ-ÖØ-öø-ÿ]";
    let word = format!(r"{upper}{letter}*(?:[-'’]{letter}+)*");
    format!(r"^\s*(?:St\.?\s*)?{word}(?:\s+{word})*")
}
