//! Ordered fallback table consulted when the streaming provider cannot answer
//!
//! Rules are evaluated top to bottom and the first match wins. A rule whose
//! data has no sources never matches, so a selection always yields something
//! playable.

use super::public_domain;
use super::streaming_source::{PlaybackRequest, StreamingData};
use serde::{Deserialize, Serialize};

/// Release years before this count as classics
pub const CLASSIC_CUTOFF_YEAR: i32 = 1950;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum FallbackMatcher {
    /// Exact catalog ids with a known asset of their own
    MovieIds(Vec<u32>),
    /// Case-insensitive substring match on the title
    TitleKeywords(Vec<String>),
    /// Release year strictly before the given year; unknown years never match
    ReleasedBefore(i32),
    AnyOf(Vec<FallbackMatcher>),
    Always,
}

impl FallbackMatcher {
    pub fn keywords(words: &[&str]) -> Self {
        FallbackMatcher::TitleKeywords(words.iter().map(|w| w.to_lowercase()).collect())
    }

    pub fn matches(&self, request: &PlaybackRequest) -> bool {
        match self {
            FallbackMatcher::MovieIds(ids) => ids.contains(&request.movie_id),
            FallbackMatcher::TitleKeywords(words) => {
                let title = request.title.to_lowercase();
                words.iter().any(|word| title.contains(word.to_lowercase().as_str()))
            }
            FallbackMatcher::ReleasedBefore(year) => {
                request.release_year.is_some_and(|released| released < *year)
            }
            FallbackMatcher::AnyOf(matchers) => matchers.iter().any(|m| m.matches(request)),
            FallbackMatcher::Always => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackRule {
    pub name: String,
    pub matcher: FallbackMatcher,
    pub data: StreamingData,
}

impl FallbackRule {
    pub fn new(name: impl Into<String>, matcher: FallbackMatcher, data: StreamingData) -> Self {
        Self {
            name: name.into(),
            matcher,
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackRules {
    rules: Vec<FallbackRule>,
}

impl Default for FallbackRules {
    fn default() -> Self {
        Self::standard()
    }
}

impl FallbackRules {
    pub fn new(rules: Vec<FallbackRule>) -> Self {
        Self { rules }
    }

    /// Table with no rules; every selection falls through to the default pair
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Pinned assets, genre keywords, classics, then a generic demo
    pub fn standard() -> Self {
        Self::new(vec![
            FallbackRule::new(
                "pinned: night of the living dead",
                FallbackMatcher::MovieIds(vec![12644]),
                StreamingData::new(
                    vec![public_domain::night_of_the_living_dead_hd()],
                    vec![public_domain::night_of_the_living_dead_subtitles()],
                ),
            ),
            FallbackRule::new(
                "horror",
                FallbackMatcher::keywords(&["horror", "zombie", "scary"]),
                StreamingData::without_subtitles(vec![
                    public_domain::night_of_the_living_dead_hd(),
                ]),
            ),
            FallbackRule::new(
                "sci-fi",
                FallbackMatcher::keywords(&["sci-fi", "space", "alien"]),
                StreamingData::without_subtitles(vec![public_domain::plan_9_hd()]),
            ),
            FallbackRule::new(
                "classic",
                FallbackMatcher::AnyOf(vec![
                    FallbackMatcher::keywords(&["classic"]),
                    FallbackMatcher::ReleasedBefore(CLASSIC_CUTOFF_YEAR),
                ]),
                StreamingData::without_subtitles(vec![public_domain::nosferatu_hd()]),
            ),
            FallbackRule::new(
                "general",
                FallbackMatcher::Always,
                StreamingData::without_subtitles(vec![public_domain::big_buck_bunny_hd()]),
            ),
        ])
    }

    /// Append a rule after the existing ones
    pub fn with_rule(mut self, rule: FallbackRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Insert a rule ahead of every existing one
    pub fn with_priority_rule(mut self, rule: FallbackRule) -> Self {
        self.rules.insert(0, rule);
        self
    }

    pub fn rules(&self) -> &[FallbackRule] {
        &self.rules
    }

    /// First rule that matches and actually carries a source
    pub fn select(&self, request: &PlaybackRequest) -> Option<&FallbackRule> {
        self.rules
            .iter()
            .find(|rule| !rule.data.is_empty() && rule.matcher.matches(request))
    }
}
