// WHY: One dispatch over NumberKind turns an accepted span into spoken words; every
// dialect difference is read from the lexicon tables

use std::sync::Arc;

use crate::error::GenerateError;
use crate::lexicon::{Dialect, OrdinalDeclensionTable};
use crate::span::{DateValue, Declension, NumberKind, NumberSpan, SpanValue};

pub mod cardinal;
pub mod clock;

pub use cardinal::CardinalSpeller;

/// Thousands separators dropped before a number is spelled
const GROUP_SEPARATORS: &[char] = &['\'', '’'];

pub struct WordGenerator {
    dialect: Dialect,
    speller: CardinalSpeller,
    declensions: Option<Arc<OrdinalDeclensionTable>>,
}

impl WordGenerator {
    pub fn new(dialect: Dialect, declensions: Option<Arc<OrdinalDeclensionTable>>) -> Self {
        Self {
            dialect,
            speller: CardinalSpeller::new(dialect.lexicon()),
            declensions,
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn speller(&self) -> &CardinalSpeller {
        &self.speller
    }

    /// Spoken replacement for one accepted span
    pub fn generate(&self, span: &NumberSpan<'_>) -> Result<String, GenerateError> {
        match span.kind {
            NumberKind::Number => self.number(span),
            NumberKind::Zip => self.zip(span),
            NumberKind::Phone => Ok(self.phone(span.text)),
            NumberKind::Ordinal => self.ordinal(span),
            NumberKind::Year => self.year(span),
            NumberKind::Money => self.money(span),
            NumberKind::Time => self.time(span),
            NumberKind::Date => self.date(span),
            NumberKind::CarPlate | NumberKind::Model => Ok(span.text.to_string()),
        }
    }

    fn number(&self, span: &NumberSpan<'_>) -> Result<String, GenerateError> {
        let cleaned: String = span
            .text
            .chars()
            .filter(|c| !GROUP_SEPARATORS.contains(c))
            .collect();

        match cleaned.split_once(['.', ',']) {
            Some((integer, fraction)) => {
                if integer.is_empty() || !is_digits(integer) || !is_digits(fraction) {
                    return Err(invalid(span, "malformed decimal"));
                }
                Ok(format!(
                    "{} {} {}",
                    self.speller.digits(integer),
                    self.dialect.lexicon().comma,
                    self.speller.digit_by_digit(fraction)
                ))
            }
            None if is_digits(&cleaned) => Ok(self.speller.digits(&cleaned)),
            None => Err(invalid(span, "not a digit string")),
        }
    }

    fn zip(&self, span: &NumberSpan<'_>) -> Result<String, GenerateError> {
        let digits = span.text.as_bytes();
        if digits.len() != 4 || !is_digits(span.text) {
            return Err(invalid(span, "postal code must have four digits"));
        }
        let text = span.text;
        let speller = &self.speller;

        if &text[1..] == "000" {
            Ok(speller.digits(text))
        } else if digits[2] == b'0' {
            Ok(format!(
                "{} {} {}",
                speller.digits(&text[..2]),
                self.dialect.lexicon().zero(),
                speller.digits(&text[3..])
            ))
        } else {
            Ok(format!(
                "{} {}",
                speller.digits(&text[..2]),
                speller.digits(&text[2..])
            ))
        }
    }

    fn phone(&self, text: &str) -> String {
        let mut words = Vec::new();
        if text.trim_start().starts_with('+') {
            words.push(self.dialect.lexicon().plus.to_string());
        }
        let digits = self.speller.digit_by_digit(text);
        if !digits.is_empty() {
            words.push(digits);
        }
        words.join(" ")
    }

    fn ordinal(&self, span: &NumberSpan<'_>) -> Result<String, GenerateError> {
        let digits = span.text.trim_end_matches('.');
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid(span, "ordinal is not a number"));
        }
        match digits.parse::<u128>() {
            Ok(value) => self
                .speller
                .ordinal(value, span.declension(), self.declensions.as_deref()),
            Err(_) => Ok(self.speller.digit_by_digit(digits)),
        }
    }

    fn year(&self, span: &NumberSpan<'_>) -> Result<String, GenerateError> {
        let year = span
            .text
            .parse::<u32>()
            .map_err(|_| invalid(span, "year is not a number"))?;
        Ok(self.speller.year(year))
    }

    fn money(&self, span: &NumberSpan<'_>) -> Result<String, GenerateError> {
        let amount = amount_of(span.text).ok_or_else(|| invalid(span, "no amount"))?;
        let cleaned: String = amount
            .chars()
            .filter(|c| !GROUP_SEPARATORS.contains(c) && !c.is_whitespace())
            .collect();

        let (francs, cents) = match cleaned.split_once(['.', ',']) {
            Some((francs, cents)) => (francs, cents),
            None => (cleaned.as_str(), ""),
        };
        if !is_digits(francs) {
            return Err(invalid(span, "malformed amount"));
        }

        let lexicon = self.dialect.lexicon();
        let mut words = vec![self.speller.digits(francs), lexicon.currency.to_string()];

        let cents = match cents.len() {
            0 => 0,
            1 => cents.parse::<u128>().map(|tenths| tenths * 10).unwrap_or(0),
            _ => cents.parse::<u128>().unwrap_or(0),
        };
        if cents > 0 {
            words.push(self.speller.cardinal(cents));
        }
        Ok(words.join(" "))
    }

    fn time(&self, span: &NumberSpan<'_>) -> Result<String, GenerateError> {
        let Some(SpanValue::Time(value)) = span.value else {
            return Err(invalid(span, "missing time value"));
        };
        clock::time(&self.speller, &value).ok_or_else(|| invalid(span, "time out of range"))
    }

    fn date(&self, span: &NumberSpan<'_>) -> Result<String, GenerateError> {
        let Some(SpanValue::Date(value)) = span.value else {
            return Err(invalid(span, "missing date value"));
        };
        self.render_date(span, &value)
    }

    /// Day as a declined ordinal, month name, year reading; absent parts are left out
    fn render_date(&self, span: &NumberSpan<'_>, value: &DateValue) -> Result<String, GenerateError> {
        if value.is_empty() {
            return Err(invalid(span, "date has no components"));
        }

        let mut parts = Vec::with_capacity(3);
        if let Some(day) = value.day {
            let day = self
                .speller
                .ordinal(
                    day as u128,
                    Some(Declension::DATE_DAY),
                    self.declensions.as_deref(),
                )
                .map_err(|error| match error {
                    GenerateError::MissingDeclensionFeatures(_) => {
                        GenerateError::MissingDeclensionFeatures(NumberKind::Date)
                    }
                    other => other,
                })?;
            parts.push(day);
        }
        if let Some(month) = value.month {
            let name = self
                .dialect
                .lexicon()
                .month(month)
                .ok_or_else(|| invalid(span, "month out of range"))?;
            parts.push(name.to_string());
        }
        if let Some(year) = value.year {
            let year = u32::try_from(year).map_err(|_| invalid(span, "negative year"))?;
            parts.push(self.speller.year(year));
        }

        Ok(parts.join(" "))
    }
}

fn invalid(span: &NumberSpan<'_>, reason: &str) -> GenerateError {
    GenerateError::InvalidValue {
        kind: span.kind,
        reason: format!("{reason} in '{}'", span.text),
    }
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// The numeric part of a money span without currency token or zero-cents dash
fn amount_of(text: &str) -> Option<&str> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let end = text.rfind(|c: char| c.is_ascii_digit())? + 1;
    Some(&text[start..end])
}
