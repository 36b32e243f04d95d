// WHY: Cardinal and ordinal spelling. A number is split into magnitude fragments, largest
// first, and the fragments are folded left to right with the dialect's fusion rules.

use crate::error::GenerateError;
use crate::lexicon::{DialectLexicon, OrdinalDeclensionTable, OrdinalSuffix};
use crate::span::{Declension, NumberKind};

const MILLION: u128 = 1_000_000;

/// A spelled fragment and the value it stands for
type Fragment = (String, u128);

/// Cardinal speller for one dialect; holds the magnitude cards, largest first
pub struct CardinalSpeller {
    lexicon: &'static DialectLexicon,
    cards: Vec<(u128, String)>,
    plurals: Vec<(u128, String)>,
}

impl CardinalSpeller {
    pub fn new(lexicon: &'static DialectLexicon) -> Self {
        let mut cards = Vec::new();
        let mut plurals = Vec::new();

        let mut exponent = 6u32;
        for stem in lexicon.magnitude_stems {
            for (suffix, plural) in [
                (lexicon.mega_suffix, lexicon.mega_plural_suffix),
                (lexicon.giga_suffix, lexicon.giga_plural_suffix),
            ] {
                if let Some(value) = 10u128.checked_pow(exponent) {
                    cards.push((value, format!("{stem}{suffix}")));
                    plurals.push((value, format!("{stem}{plural}")));
                }
                exponent += 3;
            }
        }
        cards.reverse();

        cards.push((1000, lexicon.thousand.to_string()));
        cards.push((100, lexicon.hundred.to_string()));
        for (index, word) in lexicon.tens.iter().enumerate().rev() {
            cards.push((30 + 10 * index as u128, word.to_string()));
        }
        for (value, word) in lexicon.low_words.iter().enumerate().rev() {
            cards.push((value as u128, word.to_string()));
        }

        Self {
            lexicon,
            cards,
            plurals,
        }
    }

    pub fn lexicon(&self) -> &'static DialectLexicon {
        self.lexicon
    }

    /// Spell `value` as one cardinal word group
    pub fn cardinal(&self, value: u128) -> String {
        self.split(value).0
    }

    /// Spell a digit string; leading zeros are read one by one, anything too large for the
    /// magnitude table is spelled digit by digit
    pub fn digits(&self, digits: &str) -> String {
        let significant = digits.trim_start_matches('0');
        let zeros = digits.len() - significant.len();

        let mut words: Vec<String> = std::iter::repeat(self.lexicon.zero().to_string())
            .take(zeros)
            .collect();
        if !significant.is_empty() {
            match significant.parse::<u128>() {
                Ok(value) => words.push(self.cardinal(value)),
                Err(_) => words.push(self.digit_by_digit(significant)),
            }
        }
        words.join(" ")
    }

    /// Every ASCII digit as its own word
    pub fn digit_by_digit(&self, digits: &str) -> String {
        digits
            .chars()
            .filter_map(|c| c.to_digit(10))
            .map(|digit| self.lexicon.digit(digit))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn split(&self, value: u128) -> Fragment {
        let Some((card, word)) = self.cards.iter().find(|(card, _)| *card <= value) else {
            return (self.lexicon.zero().to_string(), 0);
        };

        let (div, rem) = if value == 0 {
            (1, 0)
        } else {
            (value / card, value % card)
        };

        let head = if div == 1 {
            (self.lexicon.low_words[1].to_string(), 1)
        } else {
            self.split(div)
        };

        let mut merged = self.merge(head, (word.clone(), *card));
        if rem > 0 {
            merged = self.merge(merged, self.split(rem));
        }
        merged
    }

    fn merge(&self, current: Fragment, next: Fragment) -> Fragment {
        let (mut ctext, cnum) = current;
        let (mut ntext, nnum) = next;

        if cnum == 1 {
            if nnum == 100 || nnum == 1000 {
                return (format!("{}{}", self.lexicon.one_prefix, ntext), nnum);
            } else if nnum < MILLION {
                return (ntext, nnum);
            }
            ctext = self.lexicon.one_prefix.to_string();
        }

        let value = if nnum > cnum {
            if nnum >= MILLION {
                if cnum > 1 {
                    let plural = self.plurals.iter().find(|(card, _)| *card == nnum);
                    if let Some((_, plural)) = plural {
                        ntext = plural.clone();
                    }
                }
                ctext.push(' ');
            }
            cnum * nnum
        } else {
            if nnum < 10 && 10 < cnum && cnum < 100 {
                let unit = if nnum == 1 {
                    self.lexicon.one_before_ten.to_string()
                } else {
                    ntext
                };
                ntext = ctext;
                ctext = format!("{unit}{}", self.lexicon.unit_linker);
            } else if cnum >= MILLION {
                ctext.push(' ');
            }
            cnum + nnum
        };

        (ctext + &ntext, value)
    }

    /// Ordinal stem: lower-cased cardinal with the first matching irregular ending replaced
    /// and the ordinal `t` appended
    fn ordinal_stem(&self, value: u128) -> String {
        let mut word = self.cardinal(value).to_lowercase();
        if let Some((ending, replacement)) = self
            .lexicon
            .ordinal_stems
            .iter()
            .find(|(ending, _)| word.ends_with(ending))
        {
            word.truncate(word.len() - ending.len());
            word.push_str(replacement);
        }
        word
    }

    /// Ordinal word for `value`. Dialects with a declined suffix need `declension` and a
    /// table row for it.
    pub fn ordinal(
        &self,
        value: u128,
        declension: Option<Declension>,
        table: Option<&OrdinalDeclensionTable>,
    ) -> Result<String, GenerateError> {
        let mut word = self.ordinal_stem(value);

        match self.lexicon.ordinal_suffix {
            OrdinalSuffix::Fixed(suffix) => word.push_str(suffix),
            OrdinalSuffix::Declined { stem } => {
                let declension =
                    declension.ok_or(GenerateError::MissingDeclensionFeatures(NumberKind::Ordinal))?;
                let ending = table
                    .and_then(|table| table.lookup(&declension))
                    .ok_or(GenerateError::MissingDeclension(declension))?;
                word.push_str(stem);
                word.push_str(ending);
            }
        }

        if value == 100 || value == 1000 {
            if let Some(bare) = word.strip_prefix(self.lexicon.one_prefix) {
                word = bare.to_string();
            }
        }

        Ok(self.join_magnitude_ordinal(word))
    }

    /// "zwei millionst" reads as one word, "ei millionst" drops the article
    fn join_magnitude_ordinal(&self, word: String) -> String {
        let Some((head, tail)) = word.rsplit_once(' ') else {
            return word;
        };
        let magnitude = tail.contains(self.lexicon.mega_suffix)
            || tail.contains(self.lexicon.giga_suffix.trim_end_matches(|c: char| !c.is_ascii()));
        if !magnitude {
            return word;
        }
        if head == self.lexicon.one_prefix {
            tail.to_string()
        } else {
            format!("{head}{tail}")
        }
    }

    /// Year reading: a four-digit year up to 1999 is two two-digit halves ("nünzäh
    /// dreiäachzig", "nünzäh null"); everything else is one cardinal
    pub fn year(&self, year: u32) -> String {
        if !(1000..=1999).contains(&year) {
            return self.cardinal(year as u128);
        }
        format!(
            "{} {}",
            self.cardinal((year / 100) as u128),
            self.cardinal((year % 100) as u128)
        )
    }
}
