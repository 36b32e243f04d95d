// WHY: Dates and clock times come from a temporal tagger behind a synchronous trait with an
// explicit timeout. The adapter turns its character-offset output into DATE/TIME spans and
// swallows every tagger failure so the other detectors are never blocked.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::TaggerError;
use crate::span::{char_to_byte, DateValue, NumberKind, NumberSpan, SpanValue, TimeValue};

pub mod heideltime;
pub mod rules;

pub use heideltime::{HeidelTimeConfig, HeidelTimePool, HeidelTimeWorker};
pub use rules::PatternTagger;

/// TIMEX3 type of a tagged expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimexType {
    Date,
    Time,
    Duration,
    Set,
}

impl FromStr for TimexType {
    type Err = TaggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DATE" => Ok(TimexType::Date),
            "TIME" => Ok(TimexType::Time),
            "DURATION" => Ok(TimexType::Duration),
            "SET" => Ok(TimexType::Set),
            other => Err(TaggerError::Malformed(format!("unknown TIMEX3 type {other}"))),
        }
    }
}

/// Genre hint passed to the tagger; it changes how relative expressions are anchored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    News,
    Narrative,
    Colloquial,
    #[default]
    Scientific,
}

impl DocumentType {
    /// Name understood by the HeidelTime command line
    pub fn heideltime_name(self) -> &'static str {
        match self {
            DocumentType::News => "NEWS",
            DocumentType::Narrative => "NARRATIVES",
            DocumentType::Colloquial => "COLLOQUIAL",
            DocumentType::Scientific => "SCIENTIFIC",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.heideltime_name())
    }
}

/// One temporal expression; `start`/`end` count characters, not bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemporalExpression {
    pub timex_type: TimexType,
    pub surface: String,
    /// Normalized value, e.g. `2024-01-15`, `XXXX-01-15`, `2024-01-15T14:30`
    pub value: String,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone)]
pub struct TemporalRequest<'a> {
    pub text: &'a str,
    pub language: &'a str,
    pub document_type: DocumentType,
    pub reference_date: Option<NaiveDate>,
}

/// Temporal tagging service. Implementations must return within `timeout` and report
/// failure as an error, distinct from an empty result.
pub trait TemporalTagger: Send + Sync {
    fn tag(
        &self,
        request: &TemporalRequest<'_>,
        timeout: Duration,
    ) -> Result<Vec<TemporalExpression>, TaggerError>;
}

/// Words that may stay at the edge of a trimmed expression without containing a digit
const MONTH_NAMES: &[&str] = &[
    "januar", "jänner", "februar", "märz", "april", "mai", "juni", "juli", "august",
    "september", "oktober", "november", "dezember",
];
const CLOCK_WORD: &str = "uhr";

/// Maps tagger output to DATE/TIME candidate spans
#[derive(Clone)]
pub struct TemporalAdapter {
    tagger: Arc<dyn TemporalTagger>,
    language: String,
    document_type: DocumentType,
    reference_date: Option<NaiveDate>,
    timeout: Duration,
}

impl TemporalAdapter {
    pub fn new(tagger: Arc<dyn TemporalTagger>, timeout: Duration) -> Self {
        Self {
            tagger,
            language: "german".to_string(),
            document_type: DocumentType::default(),
            reference_date: None,
            timeout,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_document_type(mut self, document_type: DocumentType) -> Self {
        self.document_type = document_type;
        self
    }

    pub fn with_reference_date(mut self, reference_date: Option<NaiveDate>) -> Self {
        self.reference_date = reference_date;
        self
    }

    /// DATE/TIME candidates for `text`; empty when the tagger fails
    pub fn candidates<'a>(&self, text: &'a str) -> Vec<NumberSpan<'a>> {
        let request = TemporalRequest {
            text,
            language: &self.language,
            document_type: self.document_type,
            reference_date: self.reference_date,
        };

        let expressions = match self.tagger.tag(&request, self.timeout) {
            Ok(expressions) => expressions,
            Err(error) => {
                warn!("Temporal tagger failed, continuing without dates and times: {}", error);
                return Vec::new();
            }
        };

        expressions
            .iter()
            .filter_map(|expression| to_span(text, expression))
            .collect()
    }
}

fn to_span<'a>(text: &'a str, expression: &TemporalExpression) -> Option<NumberSpan<'a>> {
    let kind = match expression.timex_type {
        TimexType::Date => NumberKind::Date,
        TimexType::Time => NumberKind::Time,
        TimexType::Duration | TimexType::Set => return None,
    };

    if expression.start >= expression.end {
        return None;
    }
    let Some((start, end)) = locate(text, expression) else {
        debug!(
            "Dropping temporal expression '{}' at {}..{}",
            expression.surface, expression.start, expression.end
        );
        return None;
    };

    let (start, end) = trim_filler_words(text, start, end);
    let surface = &text[start..end];
    if !surface.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let value = match kind {
        NumberKind::Time => SpanValue::Time(parse_time_value(&expression.value)?),
        _ => {
            let mut date = parse_date_value(&expression.value);
            // A year the tagger inferred from the reference date is not spoken
            if date.year.is_some_and(|year| !surface.contains(&year.to_string())) {
                date.year = None;
            }
            if date.is_empty() {
                return None;
            }
            SpanValue::Date(date)
        }
    };

    Some(NumberSpan::new(kind, text, start, end).with_value(value))
}

/// Byte range of an in-bounds expression. A surface that does not sit exactly at the
/// reported character offsets is looked for up to two characters to either side.
fn locate(text: &str, expression: &TemporalExpression) -> Option<(usize, usize)> {
    let start = char_to_byte(text, expression.start)?;
    let end = char_to_byte(text, expression.end)?;
    if expression.surface.is_empty() || text[start..end] == *expression.surface {
        return Some((start, end));
    }

    let length = expression.end - expression.start;
    [-1isize, 1, -2, 2].into_iter().find_map(|shift| {
        let shifted = expression.start.checked_add_signed(shift)?;
        let start = char_to_byte(text, shifted)?;
        let end = char_to_byte(text, shifted + length)?;
        (text[start..end] == *expression.surface).then_some((start, end))
    })
}

fn is_anchor_word(word: &str, trailing: bool) -> bool {
    let bare = word
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();
    word.chars().any(|c| c.is_ascii_digit())
        || MONTH_NAMES.contains(&bare.as_str())
        || (trailing && bare == CLOCK_WORD)
}

/// Shrink `start..end` past leading and trailing words that carry no numeral
pub fn trim_filler_words(text: &str, mut start: usize, mut end: usize) -> (usize, usize) {
    loop {
        let slice = &text[start..end];
        let leading_ws = slice.len() - slice.trim_start().len();
        let rest = &slice[leading_ws..];
        let word_len = rest.find(char::is_whitespace).unwrap_or(rest.len());
        if word_len == 0 || word_len == rest.len() || is_anchor_word(&rest[..word_len], false) {
            start += leading_ws;
            break;
        }
        start += leading_ws + word_len;
    }

    loop {
        let slice = &text[start..end];
        let trimmed = slice.trim_end();
        let word_start = trimmed.rfind(char::is_whitespace).map_or(0, |index| {
            index + trimmed[index..].chars().next().map_or(1, char::len_utf8)
        });
        if word_start == 0 || is_anchor_word(&trimmed[word_start..], true) {
            end = start + trimmed.len();
            break;
        }
        end = start + word_start;
    }

    (start, end)
}

/// Time of day from `...THH:MM[:SS]`
pub fn parse_time_value(value: &str) -> Option<TimeValue> {
    let (_, clock) = value.split_once('T')?;
    let mut fields = clock.split(':');
    let hour = two_digits(fields.next()?)?;
    let minute = two_digits(fields.next()?)?;
    let second = match fields.next() {
        Some(field) => Some(two_digits(field.get(..2)?)?),
        None => None,
    };
    if hour > 24 || minute > 59 || second.is_some_and(|second| second > 59) {
        return None;
    }
    Some(TimeValue {
        hour,
        minute,
        second,
    })
}

/// Year, month and day from `YYYY[-MM[-DD]]`; `X` placeholders read as absent
pub fn parse_date_value(value: &str) -> DateValue {
    let date = value.split('T').next().unwrap_or_default();
    let mut fields = date.split('-');

    let year = fields
        .next()
        .filter(|field| field.len() == 4)
        .and_then(|field| field.parse::<i32>().ok());
    let month = fields
        .next()
        .and_then(two_digits)
        .filter(|month| (1..=12).contains(month));
    let day = fields
        .next()
        .and_then(|field| two_digits(field.get(..2)?))
        .filter(|day| (1..=31).contains(day));

    DateValue { year, month, day }
}

fn two_digits(field: &str) -> Option<u32> {
    if field.len() == 2 && field.bytes().all(|b| b.is_ascii_digit()) {
        field.parse().ok()
    } else {
        None
    }
}
