//! Heuristic location inference over event text.
//!
//! Text is lower-cased and split into alphanumeric tokens, so every phrase
//! match is whole-word and punctuation-insensitive ("U.S." and "u s" are the
//! same phrase). Rules are evaluated in [`RULE_CASCADE`] order; the first rule
//! that resolves a location wins.

pub mod places;

use std::collections::HashMap;

use crate::models::GeoConfidence::{High, Medium};
use crate::models::{GeoConfidence, GeoResult, GeoSource};
use places::{
    CountryPlace, StatePlace, COUNTRIES, GLOBAL_LAT, GLOBAL_LNG,
    US_CAPITAL_LAT, US_CAPITAL_LNG, US_STATES,
};

const GLOBAL_WORDS: &[&str] = &["global", "worldwide", "world"];
const FEDERAL_WORDS: &[&str] = &["fed", "federal", "nationwide"];
const US_NAME_ALIASES: &[&str] = &[
    "united states",
    "united states of america",
    "usa",
    "u.s.a.",
    "u.s.",
    "us",
];
const OFFICE_TITLES: &[&str] = &[
    "governor",
    "senate",
    "senator",
    "house",
    "governorship",
    "attorney general",
];
const OFFICE_CONNECTORS: &[&str] = &["of", "in"];
const LOCATIVES: &[&str] = &["in", "at", "of"];

/// One step of the inference cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoRule {
    GlobalTopic,
    UsFederal,
    OfficeHolder,
    Locative,
    StateName,
    CountryName,
    StateAbbreviation,
}

pub const RULE_CASCADE: [GeoRule; 7] = [
    GeoRule::GlobalTopic,
    GeoRule::UsFederal,
    GeoRule::OfficeHolder,
    GeoRule::Locative,
    GeoRule::StateName,
    GeoRule::CountryName,
    GeoRule::StateAbbreviation,
];

fn is_apostrophe(c: char) -> bool {
    matches!(c, '\'' | '\u{2019}')
}

/// Lower-case and split on anything that is not a letter, digit or
/// apostrophe. A possessive `'s` is dropped with its word intact, so
/// "Trump's" yields `trump` and never a stray `s` token.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || is_apostrophe(c)))
        .map(|word| {
            let stem = word
                .strip_suffix("'s")
                .or_else(|| word.strip_suffix("\u{2019}s"))
                .unwrap_or(word);
            stem.replace(is_apostrophe, "")
        })
        .filter(|t| !t.is_empty())
        .collect()
}

/// Memo key for free text: lower-cased with whitespace collapsed.
pub fn normalize_text(title: &str, question: &str) -> String {
    format!("{title} {question}")
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn starts_with_phrase<S: AsRef<str>>(tokens: &[String], phrase: &[S]) -> bool {
    !phrase.is_empty()
        && tokens.len() >= phrase.len()
        && tokens
            .iter()
            .zip(phrase)
            .all(|(t, p)| t.as_str() == p.as_ref())
}

fn find_phrase<S: AsRef<str>>(tokens: &[String], phrase: &[S]) -> Option<usize> {
    (0..tokens.len()).find(|&i| starts_with_phrase(&tokens[i..], phrase))
}

fn contains_word(tokens: &[String], words: &[&str]) -> bool {
    tokens.iter().any(|t| words.contains(&t.as_str()))
}

/// A place name pre-split into tokens.
struct Phrase<P: 'static> {
    tokens: Vec<String>,
    place: &'static P,
}

impl<P: 'static> Phrase<P> {
    fn new(text: &str, place: &'static P) -> Self {
        Self {
            tokens: tokenize(text),
            place,
        }
    }
}

/// Leftmost occurrence wins; at the same position the longer phrase wins.
fn leftmost_match<'a, P: 'static>(
    tokens: &[String],
    phrases: impl IntoIterator<Item = &'a Phrase<P>>,
) -> Option<&'static P> {
    let mut best: Option<(usize, usize, &'static P)> = None;
    for phrase in phrases {
        let Some(pos) = find_phrase(tokens, &phrase.tokens) else {
            continue;
        };
        let len = phrase.tokens.len();
        let better = match best {
            None => true,
            Some((best_pos, best_len, _)) => pos < best_pos || (pos == best_pos && len > best_len),
        };
        if better {
            best = Some((pos, len, phrase.place));
        }
    }
    best.map(|(_, _, place)| place)
}

fn longest_prefix<'a, P: 'static>(
    tokens: &[String],
    phrases: impl IntoIterator<Item = &'a Phrase<P>>,
) -> Option<&'static P> {
    phrases
        .into_iter()
        .filter(|p| starts_with_phrase(tokens, &p.tokens))
        .max_by_key(|p| p.tokens.len())
        .map(|p| p.place)
}

fn state_result(place: &StatePlace, confidence: GeoConfidence, source: GeoSource) -> GeoResult {
    GeoResult {
        lat: place.lat,
        lng: place.lng,
        region: Some(place.name.to_string()),
        country: Some("US".to_string()),
        confidence,
        source,
    }
}

fn country_result(place: &CountryPlace, confidence: GeoConfidence, source: GeoSource) -> GeoResult {
    GeoResult {
        lat: place.lat,
        lng: place.lng,
        region: None,
        country: Some(place.name.to_string()),
        confidence,
        source,
    }
}

fn global_result() -> GeoResult {
    GeoResult {
        lat: GLOBAL_LAT,
        lng: GLOBAL_LNG,
        region: None,
        country: Some("Global".to_string()),
        confidence: GeoConfidence::Low,
        source: GeoSource::Inferred,
    }
}

fn federal_result() -> GeoResult {
    GeoResult {
        lat: US_CAPITAL_LAT,
        lng: US_CAPITAL_LNG,
        region: Some("Federal".to_string()),
        country: Some("US".to_string()),
        confidence: GeoConfidence::Medium,
        source: GeoSource::Inferred,
    }
}

/// Pre-tokenized place tables plus the rule cascade. Pure: the same text
/// always yields the same result.
pub struct GeoMatcher {
    /// Full state names, excluding pseudo-states.
    state_names: Vec<Phrase<StatePlace>>,
    state_aliases: Vec<Phrase<StatePlace>>,
    state_abbrs: HashMap<String, &'static StatePlace>,
    country_names: Vec<Phrase<CountryPlace>>,
    country_aliases: Vec<Phrase<CountryPlace>>,
    us_aliases: Vec<Vec<String>>,
    office_titles: Vec<Vec<String>>,
}

impl Default for GeoMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl GeoMatcher {
    pub fn new() -> Self {
        let state_names = US_STATES
            .iter()
            .filter(|s| s.name_matchable)
            .map(|s| Phrase::new(s.name, s))
            .collect();
        let state_aliases = US_STATES
            .iter()
            .flat_map(|s| s.aliases.iter().map(move |a| Phrase::new(a, s)))
            .collect();
        let state_abbrs = US_STATES
            .iter()
            .map(|s| (s.abbr.to_lowercase(), s))
            .collect();
        let country_names = COUNTRIES.iter().map(|c| Phrase::new(c.name, c)).collect();
        let country_aliases = COUNTRIES
            .iter()
            .flat_map(|c| c.aliases.iter().map(move |a| Phrase::new(a, c)))
            .collect();

        Self {
            state_names,
            state_aliases,
            state_abbrs,
            country_names,
            country_aliases,
            us_aliases: US_NAME_ALIASES.iter().map(|a| tokenize(a)).collect(),
            office_titles: OFFICE_TITLES.iter().map(|t| tokenize(t)).collect(),
        }
    }

    /// Run the cascade over `title` followed by `question`.
    pub fn infer(&self, title: &str, question: &str) -> Option<GeoResult> {
        self.infer_text(&normalize_text(title, question))
    }

    pub fn infer_text(&self, text: &str) -> Option<GeoResult> {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return None;
        }
        RULE_CASCADE
            .iter()
            .find_map(|&rule| self.apply(rule, &tokens))
    }

    /// Evaluate a single rule against tokenized text.
    pub fn apply(&self, rule: GeoRule, tokens: &[String]) -> Option<GeoResult> {
        match rule {
            GeoRule::GlobalTopic => contains_word(tokens, GLOBAL_WORDS).then(global_result),
            GeoRule::UsFederal => {
                let hit = contains_word(tokens, FEDERAL_WORDS)
                    || self
                        .us_aliases
                        .iter()
                        .any(|alias| find_phrase(tokens, alias).is_some());
                hit.then(federal_result)
            }
            GeoRule::OfficeHolder => self.office_holder(tokens),
            GeoRule::Locative => (0..tokens.len())
                .filter(|&i| LOCATIVES.contains(&tokens[i].as_str()))
                .find_map(|i| self.resolve_fragment(&tokens[i + 1..])),
            GeoRule::StateName => leftmost_match(tokens, &self.state_names)
                .map(|s| state_result(s, High, GeoSource::Title)),
            GeoRule::CountryName => leftmost_match(tokens, &self.country_names)
                .map(|c| country_result(c, High, GeoSource::Title))
                .or_else(|| {
                    leftmost_match(tokens, &self.country_aliases)
                        .map(|c| country_result(c, Medium, GeoSource::Title))
                }),
            GeoRule::StateAbbreviation => tokens
                .iter()
                .find_map(|t| self.state_abbrs.get(t.as_str()).copied())
                .map(|s| state_result(s, Medium, GeoSource::Title)),
        }
    }

    /// `<office> (of|in) <location>`, trying every occurrence left to right.
    fn office_holder(&self, tokens: &[String]) -> Option<GeoResult> {
        (0..tokens.len()).find_map(|i| {
            self.office_titles.iter().find_map(|title| {
                if !starts_with_phrase(&tokens[i..], title) {
                    return None;
                }
                let after = i + title.len();
                let connector = tokens.get(after)?;
                if !OFFICE_CONNECTORS.contains(&connector.as_str()) {
                    return None;
                }
                self.resolve_fragment(&tokens[after + 1..])
            })
        })
    }

    /// Resolve the location that starts a text fragment: state name (or a
    /// pseudo-state alias), state abbreviation, country name, country alias.
    fn resolve_fragment(&self, fragment: &[String]) -> Option<GeoResult> {
        let fragment = match fragment.first() {
            Some(first) if first == "the" => &fragment[1..],
            _ => fragment,
        };
        let first = fragment.first()?;

        let source = GeoSource::Question;

        if let Some(state) =
            longest_prefix(fragment, self.state_names.iter().chain(&self.state_aliases))
        {
            return Some(state_result(state, High, source));
        }
        if let Some(state) = self.state_abbrs.get(first.as_str()) {
            return Some(state_result(state, Medium, source));
        }
        if let Some(country) = longest_prefix(fragment, &self.country_names) {
            return Some(country_result(country, High, source));
        }
        longest_prefix(fragment, &self.country_aliases)
            .map(|c| country_result(c, Medium, source))
    }

    /// Canonical country for a free-text query: by name first, then by alias.
    pub fn resolve_country_name(&self, query: &str) -> Option<&'static str> {
        let tokens = tokenize(query);
        leftmost_match(&tokens, &self.country_names)
            .or_else(|| leftmost_match(&tokens, &self.country_aliases))
            .map(|c| c.name)
    }

    /// First US state named in the text, by full name (or pseudo-state alias)
    /// and otherwise by abbreviation.
    pub fn match_us_state(&self, text: &str) -> Option<GeoResult> {
        let tokens = tokenize(text);
        leftmost_match(&tokens, self.state_names.iter().chain(&self.state_aliases))
            .map(|s| state_result(s, High, GeoSource::Title))
            .or_else(|| self.apply(GeoRule::StateAbbreviation, &tokens))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
