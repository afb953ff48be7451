//! unibot - Campus Assistant Engine
//!
//! Answers natural-language questions about a university campus by ranking
//! a curated knowledge corpus against the query, deciding whether the user
//! is asking *where* something is, and producing either an interactive map
//! card or a retrieval-augmented text reply from a generative provider.
//!
//! # Architecture
//!
//! - **knowledge**: document model + persistent corpus store
//! - **retrieval**: lexical/heuristic ranker with fuzzy matching
//! - **classifier**: locational vs informational query detection
//! - **response**: map/text response assembly
//! - **provider**: external chat-completions collaborator
//! - **engine**: request validation and end-to-end orchestration

pub mod errors;
pub mod types;

pub mod knowledge;
pub mod retrieval;
pub mod classifier;
pub mod response;
pub mod provider;
pub mod engine;

pub mod config;
pub mod cli;

// Re-export commonly used types
pub use errors::{AssistantError, Result};
pub use engine::ChatEngine;
pub use knowledge::{Document, DocumentMetadata, DocumentStore, NewDocument};
pub use response::Response;
