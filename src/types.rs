//! Inbound request contract and outbound answer envelope

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{AssistantError, Result};
use crate::response::Response;

/// Maximum accepted query length, in characters
pub const MAX_MESSAGE_LEN: usize = 1000;

/// Topic categories the assistant understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QueryCategory {
    CampusNavigation,
    Admissions,
    Courses,
    #[default]
    General,
}

impl QueryCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryCategory::CampusNavigation => "campus-navigation",
            QueryCategory::Admissions => "admissions",
            QueryCategory::Courses => "courses",
            QueryCategory::General => "general",
        }
    }

    /// Parse the wire name, rejecting anything outside the fixed set
    pub fn parse(raw: &str) -> Result<Self> {
        match raw {
            "campus-navigation" => Ok(QueryCategory::CampusNavigation),
            "admissions" => Ok(QueryCategory::Admissions),
            "courses" => Ok(QueryCategory::Courses),
            "general" => Ok(QueryCategory::General),
            other => Err(AssistantError::Validation(format!(
                "unknown category '{}'",
                other
            ))),
        }
    }
}

/// A user query as received from the transport layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    pub message: String,
    #[serde(default)]
    pub category: QueryCategory,
}

impl QueryRequest {
    pub fn new(message: &str, category: QueryCategory) -> Self {
        Self {
            message: message.to_string(),
            category,
        }
    }

    /// Enforce the inbound contract: non-empty after trim, bounded length
    pub fn validate(&self) -> Result<()> {
        if self.message.trim().is_empty() {
            return Err(AssistantError::Validation(
                "message must not be empty".to_string(),
            ));
        }
        if self.message.chars().count() > MAX_MESSAGE_LEN {
            return Err(AssistantError::Validation(format!(
                "message exceeds {} characters",
                MAX_MESSAGE_LEN
            )));
        }
        Ok(())
    }
}

/// A completed answer, wrapped with the category and a timestamp the way
/// the transport layer expects it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub response: Response,
    pub category: QueryCategory,
    pub timestamp: DateTime<Utc>,
}
