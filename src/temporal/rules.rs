// WHY: Built-in temporal tagger for explicit German dates and clock times, used when no
// external tagger is configured. Emits the same normalized values HeidelTime does.

use anyhow::{Context, Result};
use regex_automata::meta::Regex;
use std::time::Duration;
use tracing::info;

use super::{TemporalExpression, TemporalRequest, TemporalTagger, TimexType};
use crate::error::TaggerError;

const MONTHS: &str =
    "Januar|Jänner|Februar|März|April|Mai|Juni|Juli|August|September|Oktober|November|Dezember";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Form {
    /// 15.01.2024
    NumericDate,
    /// 15. Januar 2024, 15. Januar
    TextualDate,
    /// Januar 2024
    MonthYear,
    /// 14:30, 14:30:15, optionally followed by "Uhr"
    ColonTime,
    /// 14.30 Uhr
    DottedTime,
    /// 14 Uhr
    FullHour,
}

/// Regex-based tagger; forms are tried in order and earlier matches win overlaps
pub struct PatternTagger {
    forms: Vec<(Form, Regex)>,
}

impl PatternTagger {
    pub fn new() -> Result<Self> {
        let day = r"(?P<day>[0-3]?[0-9])";
        let hour = r"(?P<hour>[01]?[0-9]|2[0-4])";
        let sources = [
            (
                Form::NumericDate,
                format!(r"\b{day}\.(?P<month>[01]?[0-9])\.(?P<year>[0-9]{{4}})\b"),
            ),
            (
                Form::TextualDate,
                format!(r"\b{day}\.\s*(?P<month>{MONTHS})\b(?:\s+(?P<year>[0-9]{{4}})\b)?"),
            ),
            (
                Form::MonthYear,
                format!(r"\b(?P<month>{MONTHS})\s+(?P<year>[0-9]{{4}})\b"),
            ),
            (
                Form::ColonTime,
                format!(
                    r"\b{hour}:(?P<minute>[0-5][0-9])(?::(?P<second>[0-5][0-9]))?\b(?:\s*Uhr\b)?"
                ),
            ),
            (
                Form::DottedTime,
                format!(r"\b{hour}\.(?P<minute>[0-5][0-9])\s*Uhr\b"),
            ),
            (Form::FullHour, format!(r"\b{hour}\s*Uhr\b")),
        ];

        let mut forms = Vec::with_capacity(sources.len());
        for (form, source) in sources {
            let regex = Regex::new(&source)
                .with_context(|| format!("Failed to compile temporal pattern {form:?}"))?;
            forms.push((form, regex));
        }

        info!("Compiled {} temporal patterns", forms.len());
        Ok(Self { forms })
    }

    fn expressions(&self, request: &TemporalRequest<'_>) -> Vec<TemporalExpression> {
        let text = request.text;
        let mut taken: Vec<(usize, usize)> = Vec::new();
        let mut found = Vec::new();

        for (form, regex) in &self.forms {
            for caps in regex.captures_iter(text) {
                let Some(whole) = caps.get_match() else {
                    continue;
                };
                let (start, end) = (whole.start(), whole.end());
                if taken.iter().any(|&(s, e)| start < e && s < end) {
                    continue;
                }

                let group = |name: &str| caps.get_group_by_name(name).map(|span| &text[span.range()]);
                let number = |name: &str| group(name).and_then(|value| value.parse::<u32>().ok());

                let normalized = match form {
                    Form::NumericDate | Form::TextualDate | Form::MonthYear => {
                        let month = match group("month") {
                            Some(value) if *form != Form::NumericDate => month_number(value),
                            Some(value) => value.parse::<u32>().ok(),
                            None => None,
                        };
                        let day = number("day");
                        date_value(group("year"), month, day)
                    }
                    Form::ColonTime | Form::DottedTime | Form::FullHour => time_value(
                        request,
                        number("hour"),
                        number("minute").unwrap_or(0),
                        number("second"),
                    ),
                };

                let Some((timex_type, value)) = normalized else {
                    continue;
                };
                taken.push((start, end));
                found.push(TemporalExpression {
                    timex_type,
                    surface: text[start..end].to_string(),
                    value,
                    start: text[..start].chars().count(),
                    end: text[..end].chars().count(),
                });
            }
        }

        found.sort_by_key(|expression| expression.start);
        found
    }
}

impl TemporalTagger for PatternTagger {
    fn tag(
        &self,
        request: &TemporalRequest<'_>,
        _timeout: Duration,
    ) -> Result<Vec<TemporalExpression>, TaggerError> {
        Ok(self.expressions(request))
    }
}

fn month_number(name: &str) -> Option<u32> {
    MONTHS
        .split('|')
        .position(|month| month == name)
        .map(|index| match index {
            0 | 1 => 1,
            other => other as u32,
        })
}

fn date_value(
    year: Option<&str>,
    month: Option<u32>,
    day: Option<u32>,
) -> Option<(TimexType, String)> {
    let month = month.filter(|month| (1..=12).contains(month))?;
    if day.is_some_and(|day| !(1..=31).contains(&day)) {
        return None;
    }
    let year = year.unwrap_or("XXXX");
    let value = match day {
        Some(day) => format!("{year}-{month:02}-{day:02}"),
        None => format!("{year}-{month:02}"),
    };
    Some((TimexType::Date, value))
}

fn time_value(
    request: &TemporalRequest<'_>,
    hour: Option<u32>,
    minute: u32,
    second: Option<u32>,
) -> Option<(TimexType, String)> {
    let hour = hour.filter(|hour| *hour <= 24)?;
    let date = request
        .reference_date
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "XXXX-XX-XX".to_string());
    let value = match second {
        Some(second) => format!("{date}T{hour:02}:{minute:02}:{second:02}"),
        None => format!("{date}T{hour:02}:{minute:02}"),
    };
    Some((TimexType::Time, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::temporal::DocumentType;
    use chrono::NaiveDate;

    fn tag(text: &str) -> Vec<TemporalExpression> {
        let request = TemporalRequest {
            text,
            language: "german",
            document_type: DocumentType::Scientific,
            reference_date: None,
        };
        PatternTagger::new()
            .unwrap()
            .tag(&request, Duration::from_secs(1))
            .unwrap()
    }

    fn values(text: &str) -> Vec<(String, String)> {
        tag(text)
            .into_iter()
            .map(|expression| (expression.surface, expression.value))
            .collect()
    }

    #[test]
    fn test_textual_and_numeric_dates() {
        assert_eq!(
            values("Am 15. Januar 2024 und am 03.02.2023"),
            vec![
                ("15. Januar 2024".to_string(), "2024-01-15".to_string()),
                ("03.02.2023".to_string(), "2023-02-03".to_string()),
            ]
        );
    }

    #[test]
    fn test_date_without_year_and_month_year() {
        assert_eq!(
            values("am 1. Mai, seit März 1983"),
            vec![
                ("1. Mai".to_string(), "XXXX-05-01".to_string()),
                ("März 1983".to_string(), "1983-03".to_string()),
            ]
        );
    }

    #[test]
    fn test_clock_times() {
        assert_eq!(
            values("um 14:30, um 8.15 Uhr, um 9 Uhr und 07:05:30"),
            vec![
                ("14:30".to_string(), "XXXX-XX-XXT14:30".to_string()),
                ("8.15 Uhr".to_string(), "XXXX-XX-XXT08:15".to_string()),
                ("9 Uhr".to_string(), "XXXX-XX-XXT09:00".to_string()),
                ("07:05:30".to_string(), "XXXX-XX-XXT07:05:30".to_string()),
            ]
        );
    }

    #[test]
    fn test_reference_date_anchors_times() {
        let request = TemporalRequest {
            text: "um 14:30 Uhr",
            language: "german",
            document_type: DocumentType::News,
            reference_date: NaiveDate::from_ymd_opt(2024, 1, 15),
        };
        let found = PatternTagger::new()
            .unwrap()
            .tag(&request, Duration::from_secs(1))
            .unwrap();
        assert_eq!(found[0].value, "2024-01-15T14:30");
        assert_eq!(found[0].surface, "14:30 Uhr");
    }

    #[test]
    fn test_invalid_dates_are_skipped() {
        assert!(values("am 32.01.2024 oder 12.13.2024").is_empty());
    }

    #[test]
    fn test_offsets_count_characters() {
        let found = tag("Grüezi um 9 Uhr");
        assert_eq!(found[0].start, 10);
        assert_eq!(found[0].end, 15);
    }
}
