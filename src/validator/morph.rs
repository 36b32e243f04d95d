// WHY: Ordinal gating only needs the word class and features of the token in front of a
// "2."-style candidate. The tagger is a trait so an out-of-process analyser can replace the
// built-in closed-class lexicon without touching validation.

use std::ops::Range;
use std::time::Duration;

use crate::error::TaggerError;
use crate::span::{Case, Gender};

/// Coarse part-of-speech categories the validator distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartOfSpeech {
    Determiner,
    Adposition,
    Numeral,
    Punctuation,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammaticalNumber {
    Singular,
    Plural,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Definiteness {
    Definite,
    Indefinite,
}

/// Grammatical features; any of them may be unknown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MorphFeatures {
    pub gender: Option<Gender>,
    pub case: Option<Case>,
    pub number: Option<GrammaticalNumber>,
    pub definiteness: Option<Definiteness>,
    pub possessive: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MorphToken {
    pub text: String,
    /// Byte range inside the analysed window
    pub range: Range<usize>,
    pub pos: PartOfSpeech,
    pub features: MorphFeatures,
}

/// Tagger answer for one target offset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenAnalysis {
    pub token: MorphToken,
    pub preceding: Option<MorphToken>,
    /// A determiner occurs before the token within the same clause
    pub clause_has_determiner: bool,
}

/// Morphological analysis of a context window
pub trait MorphTagger: Send + Sync {
    /// Analyse `window` and return the token starting inside `target` (byte range within
    /// the window) with its left neighbour, or `None` when no token starts there.
    fn analyze(
        &self,
        window: &str,
        target: Range<usize>,
        timeout: Duration,
    ) -> Result<Option<TokenAnalysis>, TaggerError>;
}

/// In-process tagger for German closed-class words (articles, possessives, demonstratives,
/// prepositions and their article contractions). Every other word is `Other`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconTagger;

impl LexiconTagger {
    pub fn new() -> Self {
        Self
    }

    /// Split into word, number and single-character punctuation tokens
    pub fn tokenize(window: &str) -> Vec<MorphToken> {
        let mut tokens = Vec::new();
        let mut chars = window.char_indices().peekable();

        while let Some((start, c)) = chars.next() {
            if c.is_whitespace() {
                continue;
            }
            if c.is_alphanumeric() {
                let mut end = start + c.len_utf8();
                while let Some(&(index, next)) = chars.peek() {
                    if !next.is_alphanumeric() {
                        break;
                    }
                    end = index + next.len_utf8();
                    chars.next();
                }
                tokens.push(classify(&window[start..end], start..end));
            } else {
                let end = start + c.len_utf8();
                tokens.push(MorphToken {
                    text: window[start..end].to_string(),
                    range: start..end,
                    pos: PartOfSpeech::Punctuation,
                    features: MorphFeatures::default(),
                });
            }
        }

        tokens
    }
}

impl MorphTagger for LexiconTagger {
    fn analyze(
        &self,
        window: &str,
        target: Range<usize>,
        _timeout: Duration,
    ) -> Result<Option<TokenAnalysis>, TaggerError> {
        let mut tokens = Self::tokenize(window);
        let Some(index) = tokens
            .iter()
            .position(|token| target.contains(&token.range.start))
        else {
            return Ok(None);
        };

        let clause_has_determiner = tokens[..index]
            .iter()
            .rev()
            .take_while(|token| !is_clause_boundary(token))
            .any(|token| {
                token.pos == PartOfSpeech::Determiner
                    || token.features.definiteness == Some(Definiteness::Definite)
            });

        let noun = tokens[index + 1..]
            .iter()
            .find(|token| token.pos != PartOfSpeech::Punctuation);
        let preceding = index.checked_sub(1).map(|prev| {
            let mut preceding = tokens[prev].clone();
            agree_with_noun(&mut preceding, noun);
            preceding
        });
        let token = tokens.swap_remove(index);

        Ok(Some(TokenAnalysis {
            token,
            preceding,
            clause_has_determiner,
        }))
    }
}

/// "die", "den" and the demonstrative and possessive forms ending like them are singular or
/// plural depending on the noun they govern. A plural "-en" determiner is dative.
fn agree_with_noun(determiner: &mut MorphToken, noun: Option<&MorphToken>) {
    if determiner.pos != PartOfSpeech::Determiner || determiner.features.number.is_some() {
        return;
    }
    let plural = noun
        .is_some_and(|noun| noun.pos == PartOfSpeech::Other && is_plural_noun(&noun.text));
    if !plural {
        determiner.features.number = Some(GrammaticalNumber::Singular);
        return;
    }

    let case = if determiner.text.to_lowercase().ends_with("en") {
        Case::Dative
    } else {
        Case::Nominative
    };
    determiner.features = MorphFeatures {
        gender: None,
        case: Some(case),
        number: Some(GrammaticalNumber::Plural),
        ..determiner.features
    };
}

/// Capitalized nouns with a plural "-en"/"-ern" ending ("Klassen", "Plätzen", "Kindern")
fn is_plural_noun(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
        && (word.ends_with("en") || word.ends_with("ern"))
}

fn is_clause_boundary(token: &MorphToken) -> bool {
    token.pos == PartOfSpeech::Punctuation
        && matches!(token.text.as_str(), "." | "," | ";" | ":" | "!" | "?")
}

fn classify(word: &str, range: Range<usize>) -> MorphToken {
    let (pos, features) = if word.chars().all(|c| c.is_ascii_digit()) {
        (PartOfSpeech::Numeral, MorphFeatures::default())
    } else {
        let lower = word.to_lowercase();
        determiner_features(&lower)
            .map(|features| (PartOfSpeech::Determiner, features))
            .or_else(|| adposition_features(&lower).map(|features| (PartOfSpeech::Adposition, features)))
            .unwrap_or((PartOfSpeech::Other, MorphFeatures::default()))
    };

    MorphToken {
        text: word.to_string(),
        range,
        pos,
        features,
    }
}

fn features(
    gender: Option<Gender>,
    case: Option<Case>,
    number: Option<GrammaticalNumber>,
    definiteness: Definiteness,
    possessive: bool,
) -> MorphFeatures {
    MorphFeatures {
        gender,
        case,
        number,
        definiteness: Some(definiteness),
        possessive,
    }
}

/// Endings shared by a feminine or masculine singular and a plural form; the number is left
/// open for the governed noun to settle
fn number_of_ending(ending: &str) -> Option<GrammaticalNumber> {
    match ending {
        "e" | "en" => None,
        _ => Some(GrammaticalNumber::Singular),
    }
}

const POSSESSIVE_STEMS: &[&str] = &["mein", "dein", "sein", "ihr", "unser", "euer", "eur"];

/// Features of the ending shared by "ein" and possessive determiners
fn ein_ending(ending: &str) -> Option<(Option<Gender>, Option<Case>)> {
    match ending {
        "" => Some((Some(Gender::Masculine), Some(Case::Nominative))),
        "e" => Some((Some(Gender::Feminine), None)),
        "em" => Some((Some(Gender::Masculine), Some(Case::Dative))),
        "en" => Some((Some(Gender::Masculine), Some(Case::Accusative))),
        "er" => Some((Some(Gender::Feminine), Some(Case::Dative))),
        "es" => Some((Some(Gender::Masculine), Some(Case::Genitive))),
        _ => None,
    }
}

/// Features of the "dies-"/"jen-" endings
fn definite_ending(ending: &str) -> Option<(Option<Gender>, Option<Case>)> {
    match ending {
        "er" => Some((Some(Gender::Masculine), Some(Case::Nominative))),
        "e" => Some((Some(Gender::Feminine), None)),
        "es" => Some((Some(Gender::Neuter), None)),
        "em" => Some((Some(Gender::Masculine), Some(Case::Dative))),
        "en" => Some((Some(Gender::Masculine), Some(Case::Accusative))),
        _ => None,
    }
}

fn determiner_features(word: &str) -> Option<MorphFeatures> {
    let article = match word {
        "der" => Some((Some(Gender::Masculine), Some(Case::Nominative))),
        "die" => Some((Some(Gender::Feminine), None)),
        "das" => Some((Some(Gender::Neuter), None)),
        "dem" => Some((Some(Gender::Masculine), Some(Case::Dative))),
        "den" => Some((Some(Gender::Masculine), Some(Case::Accusative))),
        "des" => Some((Some(Gender::Masculine), Some(Case::Genitive))),
        _ => None,
    };
    if let Some((gender, case)) = article {
        let number = match word {
            "die" | "den" => None,
            _ => Some(GrammaticalNumber::Singular),
        };
        return Some(features(gender, case, number, Definiteness::Definite, false));
    }

    let plural_case = match word {
        "alle" => Some(Case::Nominative),
        "allen" => Some(Case::Dative),
        _ => None,
    };
    if let Some(case) = plural_case {
        let plural = Some(GrammaticalNumber::Plural);
        return Some(features(None, Some(case), plural, Definiteness::Definite, false));
    }

    for stem in ["dies", "jen"] {
        if let Some(ending) = word.strip_prefix(stem) {
            if let Some((gender, case)) = definite_ending(ending) {
                let number = number_of_ending(ending);
                return Some(features(gender, case, number, Definiteness::Definite, false));
            }
        }
    }

    let singular = Some(GrammaticalNumber::Singular);
    if let Some((gender, case)) = word.strip_prefix("ein").and_then(ein_ending) {
        return Some(features(gender, case, singular, Definiteness::Indefinite, false));
    }

    POSSESSIVE_STEMS.iter().find_map(|stem| {
        let ending = word.strip_prefix(stem)?;
        let (gender, case) = ein_ending(ending)?;
        let number = number_of_ending(ending);
        Some(features(gender, case, number, Definiteness::Indefinite, true))
    })
}

fn adposition_features(word: &str) -> Option<MorphFeatures> {
    let contraction = |gender, case| {
        let singular = Some(GrammaticalNumber::Singular);
        Some(features(Some(gender), Some(case), singular, Definiteness::Definite, false))
    };
    match word {
        "am" | "im" | "vom" | "beim" | "zum" => contraction(Gender::Masculine, Case::Dative),
        "zur" => contraction(Gender::Feminine, Case::Dative),
        "ins" | "ans" | "aufs" => contraction(Gender::Neuter, Case::Accusative),
        "aus" | "bei" | "mit" | "nach" | "seit" | "von" | "zu" | "ab" | "gemäss" | "gemäß"
        | "laut" | "gegenüber" => Some(MorphFeatures {
            case: Some(Case::Dative),
            ..MorphFeatures::default()
        }),
        "durch" | "für" | "gegen" | "ohne" | "um" | "bis" | "per" | "pro" => Some(MorphFeatures {
            case: Some(Case::Accusative),
            ..MorphFeatures::default()
        }),
        "an" | "auf" | "hinter" | "in" | "neben" | "über" | "unter" | "vor" | "zwischen" => {
            Some(MorphFeatures::default())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(1);

    fn analyze(window: &str, target: &str) -> Option<TokenAnalysis> {
        let start = window.find(target).expect("target in window");
        LexiconTagger::new()
            .analyze(window, start..start + target.len(), TIMEOUT)
            .expect("lexicon tagger never fails")
    }

    #[test]
    fn test_tokenize_splits_punctuation() {
        let tokens = LexiconTagger::tokenize("der 1. Platz, oder?");
        let texts: Vec<_> = tokens.iter().map(|token| token.text.as_str()).collect();
        assert_eq!(texts, vec!["der", "1", ".", "Platz", ",", "oder", "?"]);
        assert_eq!(tokens[1].pos, PartOfSpeech::Numeral);
        assert_eq!(tokens[2].pos, PartOfSpeech::Punctuation);
    }

    #[test]
    fn test_definite_article_before_number() {
        let analysis = analyze("Das ist der 1. Platz.", "1").unwrap();
        let preceding = analysis.preceding.unwrap();
        assert_eq!(preceding.pos, PartOfSpeech::Determiner);
        assert_eq!(preceding.features.definiteness, Some(Definiteness::Definite));
        assert_eq!(preceding.features.case, Some(Case::Nominative));
        assert!(analysis.clause_has_determiner);
    }

    #[test]
    fn test_contraction_is_a_definite_adposition() {
        let analysis = analyze("Wir treffen uns am 3. Mai", "3").unwrap();
        let preceding = analysis.preceding.unwrap();
        assert_eq!(preceding.pos, PartOfSpeech::Adposition);
        assert_eq!(preceding.features.definiteness, Some(Definiteness::Definite));
        assert_eq!(preceding.features.case, Some(Case::Dative));
    }

    #[test]
    fn test_possessive_determiner() {
        let analysis = analyze("Das war meinem 2. Versuch", "2").unwrap();
        let features = analysis.preceding.unwrap().features;
        assert!(features.possessive);
        assert_eq!(features.definiteness, Some(Definiteness::Indefinite));
        assert_eq!(features.case, Some(Case::Dative));
    }

    #[test]
    fn test_article_agrees_with_plural_noun() {
        let analysis = analyze("Er spielte mit den 3. Plätzen", "3").unwrap();
        let features = analysis.preceding.unwrap().features;
        assert_eq!(features.number, Some(GrammaticalNumber::Plural));
        assert_eq!(features.case, Some(Case::Dative));

        let analysis = analyze("Die 3. Klassen kommen", "3").unwrap();
        let features = analysis.preceding.unwrap().features;
        assert_eq!(features.number, Some(GrammaticalNumber::Plural));
        assert_eq!(features.case, Some(Case::Nominative));
    }

    #[test]
    fn test_article_with_singular_noun_stays_singular() {
        let analysis = analyze("Er nahm den 3. Platz", "3").unwrap();
        let features = analysis.preceding.unwrap().features;
        assert_eq!(features.number, Some(GrammaticalNumber::Singular));
        assert_eq!(features.case, Some(Case::Accusative));
        assert_eq!(features.gender, Some(Gender::Masculine));
    }

    #[test]
    fn test_alle_is_plural() {
        let analysis = analyze("Der Bus fährt alle 3. Tage", "3").unwrap();
        let preceding = analysis.preceding.unwrap();
        assert_eq!(preceding.pos, PartOfSpeech::Determiner);
        assert_eq!(preceding.features.number, Some(GrammaticalNumber::Plural));
    }

    #[test]
    fn test_verb_is_other() {
        let analysis = analyze("Die Antwort ist 2.", "2").unwrap();
        assert_eq!(analysis.preceding.unwrap().pos, PartOfSpeech::Other);
    }

    #[test]
    fn test_clause_boundary_stops_determiner_search() {
        let analysis = analyze("Der Hund bellt, in 2. Linie", "2").unwrap();
        assert_eq!(analysis.preceding.unwrap().pos, PartOfSpeech::Adposition);
        assert!(!analysis.clause_has_determiner);
    }

    #[test]
    fn test_no_token_at_target() {
        let result = LexiconTagger::new().analyze("der Platz", 3..4, TIMEOUT).unwrap();
        assert!(result.is_none());
    }
}
