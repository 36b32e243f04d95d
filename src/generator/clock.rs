// Time-of-day reading: minutes before the hour, 12-hour clock, "halbi" counts toward the next hour

use super::cardinal::CardinalSpeller;
use crate::span::TimeValue;

/// Hour as spoken for the given minute: from :25 on the phrase refers to the next hour
pub fn spoken_hour(hour: u32, minute: u32) -> u32 {
    let mut hour = match hour % 24 {
        0 => 12,
        other => other,
    };
    if minute == 25 || minute >= 30 {
        hour += 1;
    }
    while hour > 12 {
        hour -= 12;
    }
    hour
}

fn minute_phrase(speller: &CardinalSpeller, minute: u32) -> Option<String> {
    let lexicon = speller.lexicon();
    if minute == 0 {
        return None;
    }
    if let Some(phrase) = lexicon.idiomatic_minute(minute) {
        return Some(phrase.to_string());
    }
    if minute < 30 {
        Some(format!("{} {}", speller.cardinal(minute as u128), lexicon.minutes_past))
    } else {
        Some(format!(
            "{} {}",
            speller.cardinal(60u32.saturating_sub(minute) as u128),
            lexicon.minutes_to
        ))
    }
}

/// Render a clock time, e.g. 14:30 as "halbi drei"
pub fn time(speller: &CardinalSpeller, value: &TimeValue) -> Option<String> {
    if value.hour > 24 || value.minute > 59 {
        return None;
    }
    let lexicon = speller.lexicon();
    let hour = lexicon.hour(spoken_hour(value.hour, value.minute))?;

    let mut words = Vec::with_capacity(4);
    if let Some(phrase) = minute_phrase(speller, value.minute) {
        words.push(phrase);
    }
    words.push(hour.to_string());
    if let Some(second) = value.second.filter(|second| *second > 0) {
        words.push(speller.cardinal(second as u128));
        words.push(lexicon.second.to_string());
    }

    Some(words.join(" "))
}
