//! Lexical retrieval over the knowledge corpus
//!
//! Components:
//! - Fuzzy: edit-distance matching for typo tolerance
//! - Ranker: weighted-signal scoring and ordering of documents

pub mod fuzzy;
pub mod ranker;

pub use fuzzy::{fuzzy_match, levenshtein};
pub use ranker::{score_document, QueryTokens, RankedDocument, Ranker, ScoreWeights};
