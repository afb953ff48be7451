//! Weighted-signal ranker
//!
//! Scores every document in the corpus against a query with a single
//! deterministic pass: exact and substring title/content matches, per-word
//! hits, fuzzy near misses, and a location boost when the query smells
//! locational. Weights are design choices; relative ordering between the
//! tiers is what matters.

use serde::{Deserialize, Serialize};

use crate::knowledge::Document;
use crate::retrieval::fuzzy::fuzzy_match;

/// Keywords the ranker itself uses to detect location intent.
///
/// Independent of the phrase-based query classifier: the classifier gates
/// the map/text branch, this list only boosts ordering.
const LOCATION_KEYWORDS: &[&str] = &[
    "where",
    "location",
    "find",
    "map",
    "office",
    "building",
    "library",
    "faculty",
    "department",
];

/// Category/type groupings that name physical places
const PLACE_GROUPS: &[&str] = &[
    "campus-navigation",
    "academic-buildings",
    "dining",
    "accommodation",
    "banking",
    "shopping",
    "sports-recreation",
    "healthcare",
    "cultural-events",
    "location",
    "building",
];

/// Scoring weights, one field per signal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Normalized title equals the normalized query
    pub exact_title: f64,
    /// Title contains the full query as a substring
    pub title_phrase: f64,
    /// Content contains the full query as a substring
    pub content_phrase: f64,
    /// Title contains a query word, per word
    pub title_word: f64,
    /// Whole-word content hit, per occurrence
    pub content_word: f64,
    /// Fuzzy content-word near miss, per query word
    pub fuzzy_word: f64,
    /// Category or type contains a query word, per word
    pub category_word: f64,
    /// Document carries coordinates or a map embed (location queries only)
    pub geo_boost: f64,
    /// Category/type is a place-like grouping (location queries only)
    pub place_boost: f64,
    /// Below this, long queries get damped
    pub damping_threshold: f64,
    /// Multiplier applied to weak scores on long queries
    pub damping_factor: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            exact_title: 1000.0,
            title_phrase: 500.0,
            content_phrase: 100.0,
            title_word: 20.0,
            content_word: 3.0,
            fuzzy_word: 2.0,
            category_word: 10.0,
            geo_boost: 40.0,
            place_boost: 15.0,
            damping_threshold: 50.0,
            damping_factor: 0.5,
        }
    }
}

/// A query normalized once, shared across all documents
#[derive(Debug, Clone)]
pub struct QueryTokens {
    /// Lowercased, trimmed query text
    pub normalized: String,
    /// Significant words: length > 2 after lowercasing
    pub words: Vec<String>,
}

impl QueryTokens {
    pub fn parse(query: &str) -> Self {
        let normalized = query.trim().to_lowercase();
        let words = normalized
            .split_whitespace()
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
            .filter(|w| w.len() > 2)
            .map(|w| w.to_string())
            .collect();

        Self { normalized, words }
    }

    /// True when any ranker location keyword appears in the query
    pub fn has_location_keyword(&self) -> bool {
        LOCATION_KEYWORDS
            .iter()
            .any(|kw| self.normalized.contains(kw))
    }
}

/// A document paired with its relevance score
#[derive(Debug, Clone)]
pub struct RankedDocument {
    pub document: Document,
    pub score: f64,
}

fn content_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
}

fn is_place_group(value: &str) -> bool {
    PLACE_GROUPS.contains(&value)
}

/// Score one document against a parsed query.
///
/// Pure: identical `(document, tokens, location_query, weights)` always
/// yields the same score.
pub fn score_document(
    document: &Document,
    tokens: &QueryTokens,
    location_query: bool,
    weights: &ScoreWeights,
) -> f64 {
    let content_lower = document.content.to_lowercase();
    let title_lower = document.metadata.title.to_lowercase();
    let category = document.metadata.category.as_str();
    let doc_type = document.metadata.doc_type.as_str();

    let mut score = 0.0;

    // Whole-phrase tiers
    if title_lower == tokens.normalized {
        score += weights.exact_title;
    }
    if title_lower.contains(&tokens.normalized) {
        score += weights.title_phrase;
    }
    if content_lower.contains(&tokens.normalized) {
        score += weights.content_phrase;
    }

    // Location boost: geo data outranks place-like grouping
    if location_query {
        if document.has_geo_data() {
            score += weights.geo_boost;
        }
        if is_place_group(category) || is_place_group(doc_type) {
            score += weights.place_boost;
        }
    }

    // Per-word signals
    for word in &tokens.words {
        if title_lower.contains(word.as_str()) {
            score += weights.title_word;
        }

        let occurrences = content_words(&content_lower)
            .filter(|&w| w == word.as_str())
            .count();
        score += occurrences as f64 * weights.content_word;

        if content_words(&content_lower).any(|w| fuzzy_match(word, w)) {
            score += weights.fuzzy_word;
        }

        if category.contains(word.as_str()) || doc_type.contains(word.as_str()) {
            score += weights.category_word;
        }
    }

    // Long queries with only weak partial matches get damped
    if tokens.words.len() > 3 && score < weights.damping_threshold {
        score *= weights.damping_factor;
    }

    score
}

/// Ranker over a read-only corpus slice
#[derive(Debug, Clone, Default)]
pub struct Ranker {
    weights: ScoreWeights,
}

impl Ranker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    /// Score and order the corpus against `query`, returning at most `k`
    /// documents with positive scores.
    ///
    /// Stable ordering: ties keep insertion order, so identical
    /// `(corpus, query, k)` always produce identical output.
    pub fn search(&self, corpus: &[Document], query: &str, k: usize) -> Vec<RankedDocument> {
        let tokens = QueryTokens::parse(query);
        let location_query = tokens.has_location_keyword();

        let mut ranked: Vec<RankedDocument> = corpus
            .iter()
            .map(|doc| RankedDocument {
                document: doc.clone(),
                score: score_document(doc, &tokens, location_query, &self.weights),
            })
            .filter(|r| r.score > 0.0)
            .collect();

        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(k);
        ranked
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }
}
