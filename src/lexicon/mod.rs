// WHY: Per-dialect word tables are static data; everything that varies between
// Basel and St. Gallen lives here so the generator algorithms stay dialect-agnostic

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod basel;
pub mod declension;
pub mod st_gallen;

pub use declension::OrdinalDeclensionTable;

/// Supported Swiss-German dialect variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Dialect {
    #[serde(alias = "ch_bs", alias = "ch-bs")]
    #[value(alias = "ch_bs")]
    Basel,
    #[serde(alias = "ch_sg", alias = "ch-sg")]
    #[value(alias = "ch_sg")]
    StGallen,
}

impl Dialect {
    pub fn lexicon(self) -> &'static DialectLexicon {
        match self {
            Dialect::Basel => &basel::LEXICON,
            Dialect::StGallen => &st_gallen::LEXICON,
        }
    }

    /// Whether ordinals in this dialect are declined through the declension table
    pub fn needs_declension(self) -> bool {
        matches!(self.lexicon().ordinal_suffix, OrdinalSuffix::Declined { .. })
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.lexicon().name)
    }
}

impl FromStr for Dialect {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "basel" | "ch_bs" | "ch-bs" => Ok(Dialect::Basel),
            "st-gallen" | "st. gallen" | "stgallen" | "ch_sg" | "ch-sg" => Ok(Dialect::StGallen),
            other => bail!("Unknown dialect: {other}"),
        }
    }
}

/// How the ordinal-forming suffix is obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrdinalSuffix {
    /// Literal suffix appended to every ordinal stem
    Fixed(&'static str),
    /// `stem` followed by a declension-table ending keyed by class/gender/case
    Declined { stem: &'static str },
}

/// Immutable lexical and phonological tables of one dialect
#[derive(Debug)]
pub struct DialectLexicon {
    pub name: &'static str,
    /// Words for 0 through 20
    pub low_words: [&'static str; 21],
    /// Words for 30, 40, ... 90
    pub tens: [&'static str; 7],
    pub hundred: &'static str,
    pub thousand: &'static str,
    /// Stems of the -illion/-illiard magnitudes, smallest first (10^6 and 10^9 share "M")
    pub magnitude_stems: &'static [&'static str],
    pub mega_suffix: &'static str,
    pub giga_suffix: &'static str,
    /// Stem a leading "one" fuses into before hundred/thousand and the article form before 10^6+
    pub one_prefix: &'static str,
    /// Form of "one" placed before a ten ("ein" + linker + "zwanzig")
    pub one_before_ten: &'static str,
    /// Particle linking a unit to the following ten
    pub unit_linker: &'static str,
    /// Magnitude suffixes used after a count above one ("zwei Millione")
    pub mega_plural_suffix: &'static str,
    pub giga_plural_suffix: &'static str,
    /// Irregular ordinal stem endings, first match wins
    pub ordinal_stems: &'static [(&'static str, &'static str)],
    pub ordinal_suffix: OrdinalSuffix,
    /// Hour names for 1 through 12
    pub hours: [&'static str; 12],
    /// Idiomatic phrases for exact minute values
    pub idiomatic_minutes: &'static [(u32, &'static str)],
    pub minutes_past: &'static str,
    pub minutes_to: &'static str,
    pub second: &'static str,
    pub months: [&'static str; 12],
    pub plus: &'static str,
    pub comma: &'static str,
    pub currency: &'static str,
}

impl DialectLexicon {
    pub fn zero(&self) -> &'static str {
        self.low_words[0]
    }

    pub fn digit(&self, digit: u32) -> &'static str {
        self.low_words[(digit % 10) as usize]
    }

    pub fn hour(&self, hour: u32) -> Option<&'static str> {
        match hour {
            1..=12 => Some(self.hours[(hour - 1) as usize]),
            _ => None,
        }
    }

    pub fn month(&self, month: u32) -> Option<&'static str> {
        match month {
            1..=12 => Some(self.months[(month - 1) as usize]),
            _ => None,
        }
    }

    pub fn idiomatic_minute(&self, minute: u32) -> Option<&'static str> {
        self.idiomatic_minutes
            .iter()
            .find(|(value, _)| *value == minute)
            .map(|(_, phrase)| *phrase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_parsing_accepts_aliases() {
        assert_eq!("basel".parse::<Dialect>().unwrap(), Dialect::Basel);
        assert_eq!("ch_bs".parse::<Dialect>().unwrap(), Dialect::Basel);
        assert_eq!("St-Gallen".parse::<Dialect>().unwrap(), Dialect::StGallen);
        assert_eq!("ch_sg".parse::<Dialect>().unwrap(), Dialect::StGallen);
        assert!("zurich".parse::<Dialect>().is_err());
    }

    #[test]
    fn test_only_st_gallen_declines_ordinals() {
        assert!(!Dialect::Basel.needs_declension());
        assert!(Dialect::StGallen.needs_declension());
    }

    #[test]
    fn test_table_accessors() {
        let lexicon = Dialect::Basel.lexicon();
        assert_eq!(lexicon.zero(), "null");
        assert_eq!(lexicon.digit(7), "siebe");
        assert_eq!(lexicon.hour(12), Some("zwölfi"));
        assert_eq!(lexicon.hour(0), None);
        assert_eq!(lexicon.month(1), Some("Januar"));
        assert_eq!(lexicon.idiomatic_minute(30), Some("halbi"));
        assert_eq!(lexicon.idiomatic_minute(20), None);
    }
}
