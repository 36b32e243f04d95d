// WHY: Shared data model for every pipeline stage - detection, validation, resolution,
// generation and rewriting all exchange NumberSpan values

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classified reading of a span of source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NumberKind {
    Year,
    Zip,
    Phone,
    CarPlate,
    Ordinal,
    Money,
    Model,
    Number,
    Date,
    Time,
}

impl NumberKind {
    /// Every kind, in the order the detector reports them
    pub const ALL: [NumberKind; 10] = [
        NumberKind::Date,
        NumberKind::Time,
        NumberKind::Phone,
        NumberKind::Zip,
        NumberKind::Ordinal,
        NumberKind::Year,
        NumberKind::Money,
        NumberKind::CarPlate,
        NumberKind::Model,
        NumberKind::Number,
    ];

    /// Overlap precedence, lowest value wins
    pub fn priority(self) -> u8 {
        match self {
            NumberKind::Date | NumberKind::Time => 0,
            NumberKind::Phone => 1,
            NumberKind::Zip => 2,
            NumberKind::Ordinal => 3,
            NumberKind::Year => 4,
            NumberKind::Money => 5,
            NumberKind::CarPlate => 6,
            NumberKind::Model => 7,
            NumberKind::Number => 8,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NumberKind::Year => "YEAR",
            NumberKind::Zip => "ZIP",
            NumberKind::Phone => "PHONE",
            NumberKind::CarPlate => "CAR_PLATE",
            NumberKind::Ordinal => "ORDINAL",
            NumberKind::Money => "MONEY",
            NumberKind::Model => "MODEL",
            NumberKind::Number => "NUMBER",
            NumberKind::Date => "DATE",
            NumberKind::Time => "TIME",
        }
    }
}

impl fmt::Display for NumberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Adjective declension class governing the ordinal ending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclensionClass {
    Weak,
    Mixed,
    Strong,
}

/// Grammatical gender slot of the declension table; plural replaces gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[serde(alias = "masc", alias = "m")]
    Masculine,
    #[serde(alias = "fem", alias = "f")]
    Feminine,
    #[serde(alias = "neut", alias = "n")]
    Neuter,
    #[serde(alias = "plur", alias = "pl")]
    Plural,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Case {
    #[serde(alias = "nom")]
    Nominative,
    #[serde(alias = "acc", alias = "akk")]
    Accusative,
    #[serde(alias = "dat")]
    Dative,
    #[serde(alias = "gen")]
    Genitive,
}

/// Key into the ordinal declension table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Declension {
    pub class: DeclensionClass,
    pub gender: Gender,
    pub case: Case,
}

impl Declension {
    /// Declension used for the day of a date ("am 15. Januar")
    pub const DATE_DAY: Declension = Declension {
        class: DeclensionClass::Weak,
        gender: Gender::Masculine,
        case: Case::Dative,
    };
}

impl fmt::Display for Declension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}/{:?}/{:?}", self.class, self.gender, self.case)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeValue {
    pub hour: u32,
    pub minute: u32,
    pub second: Option<u32>,
}

/// Calendar date; any component may be unknown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateValue {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

impl DateValue {
    pub fn is_empty(&self) -> bool {
        self.year.is_none() && self.month.is_none() && self.day.is_none()
    }
}

/// Structured payload attached to a span, shape depends on its kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpanValue {
    Ordinal(Declension),
    Time(TimeValue),
    Date(DateValue),
}

/// A classified region of the source text.
///
/// `start`/`end` are half-open byte offsets into the source and always fall on
/// char boundaries, so `text == &source[start..end]` at detection time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberSpan<'a> {
    pub kind: NumberKind,
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
    pub value: Option<SpanValue>,
}

impl<'a> NumberSpan<'a> {
    /// Create a span over `source[start..end]`
    pub fn new(kind: NumberKind, source: &'a str, start: usize, end: usize) -> Self {
        Self {
            kind,
            text: &source[start..end],
            start,
            end,
            value: None,
        }
    }

    pub fn with_value(mut self, value: SpanValue) -> Self {
        self.value = Some(value);
        self
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True when `other` lies entirely inside this span
    pub fn contains(&self, other: &NumberSpan<'_>) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    pub fn overlaps(&self, other: &NumberSpan<'_>) -> bool {
        !(other.end <= self.start || other.start >= self.end)
    }

    pub fn declension(&self) -> Option<Declension> {
        match self.value {
            Some(SpanValue::Ordinal(declension)) => Some(declension),
            _ => None,
        }
    }
}

/// Byte offset `count` characters before `pos`, clamped at the start of `text`
pub fn chars_before(text: &str, pos: usize, count: usize) -> usize {
    text[..pos]
        .char_indices()
        .rev()
        .take(count)
        .last()
        .map_or(pos, |(index, _)| index)
}

/// Byte offset `count` characters after `pos`, clamped at the end of `text`
pub fn chars_after(text: &str, pos: usize, count: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(count)
        .map_or(text.len(), |(index, _)| pos + index)
}

/// Byte offset of the character with index `char_index`; `None` past the end
pub fn char_to_byte(text: &str, char_index: usize) -> Option<usize> {
    let mut indices = text.char_indices().map(|(index, _)| index).chain(Some(text.len()));
    indices.nth(char_index)
}
