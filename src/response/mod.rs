//! Response assembly: map cards and retrieval-augmented text
//!
//! Components:
//! - Response: the tagged union handed to the presentation layer
//! - maps: deep-link and embed URL construction, legacy markup handling
//! - Assembler: branches between the map and text paths

pub mod assembler;
pub mod maps;

pub use assembler::{AssemblerConfig, ResponseAssembler};

use serde::{Deserialize, Serialize};

/// Outbound response contract: plain prose or an interactive map card
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Response {
    Text {
        message: String,
    },
    #[serde(rename_all = "camelCase")]
    Map {
        title: String,
        message: String,
        embed_url: String,
        maps_url: String,
        coordinates: Option<String>,
    },
}

impl Response {
    /// The human-readable message regardless of variant
    pub fn message(&self) -> &str {
        match self {
            Response::Text { message } => message,
            Response::Map { message, .. } => message,
        }
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Response::Map { .. })
    }
}
