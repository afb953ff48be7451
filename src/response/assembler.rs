//! Response assembler
//!
//! Branches on the classifier verdict: a locational query whose top-ranked
//! document carries geographic data becomes a map card built entirely
//! locally; everything else becomes a context block handed to the
//! generative provider. Provider failures propagate to the caller.

use std::sync::Arc;

use crate::errors::Result;
use crate::knowledge::document::MAP_MARKUP_MARKER;
use crate::knowledge::Document;
use crate::provider::GenerativeProvider;
use crate::response::maps;
use crate::response::Response;
use crate::retrieval::RankedDocument;
use crate::types::QueryCategory;

/// Fixed reply for an empty retrieval result; the provider is not called
const FALLBACK_MESSAGE: &str = "I couldn't find anything relevant in the campus \
knowledge base. I can help with campus navigation and building locations, \
admissions, courses, and general university services - try asking about one \
of those.";

/// Assembler configuration
#[derive(Debug, Clone)]
pub struct AssemblerConfig {
    /// Maximum documents concatenated into the provider context block
    pub context_limit: usize,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self { context_limit: 5 }
    }
}

/// Everything needed to render a map card
struct MapCard {
    title: String,
    message: String,
    embed_url: String,
    maps_url: String,
    coordinates: Option<String>,
}

/// Turns a classifier verdict and ranked documents into a `Response`
pub struct ResponseAssembler {
    provider: Arc<dyn GenerativeProvider>,
    config: AssemblerConfig,
}

impl ResponseAssembler {
    pub fn new(provider: Arc<dyn GenerativeProvider>) -> Self {
        Self::with_config(provider, AssemblerConfig::default())
    }

    pub fn with_config(provider: Arc<dyn GenerativeProvider>, config: AssemblerConfig) -> Self {
        Self { provider, config }
    }

    /// Assemble the final response for a query.
    ///
    /// Locational verdict + geographic top document => map card, no
    /// provider call. Otherwise the top documents become a context block
    /// for the provider. An empty ranked list short-circuits to a fixed
    /// fallback.
    pub async fn assemble(
        &self,
        query: &str,
        category: QueryCategory,
        ranked: &[RankedDocument],
        location_query: bool,
    ) -> Result<Response> {
        let Some(top) = ranked.first() else {
            return Ok(Response::Text {
                message: FALLBACK_MESSAGE.to_string(),
            });
        };

        if location_query {
            if let Some(card) = build_map_card(&top.document) {
                return Ok(Response::Map {
                    title: card.title,
                    message: card.message,
                    embed_url: card.embed_url,
                    maps_url: card.maps_url,
                    coordinates: card.coordinates,
                });
            }
        }

        let context = self.build_context(ranked);
        let prompt = system_prompt(category, &context);
        let message = self.provider.generate(&prompt, query).await?;

        Ok(Response::Text { message })
    }

    /// Concatenate the top documents into a bounded, markup-free context
    /// block
    fn build_context(&self, ranked: &[RankedDocument]) -> String {
        ranked
            .iter()
            .take(self.config.context_limit)
            .map(|r| maps::strip_map_markup(&r.document.content))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Build the map card for a document, or `None` when it has no usable
/// geographic data (unparseable coordinates fall through to the text path)
fn build_map_card(document: &Document) -> Option<MapCard> {
    let metadata = &document.metadata;
    let coords = metadata.parsed_coordinates();

    let embed_url = metadata
        .map_embed
        .as_deref()
        .and_then(maps::extract_embed_src)
        .or_else(|| {
            document
                .content
                .contains(MAP_MARKUP_MARKER)
                .then(|| maps::extract_embed_src(&document.content))
                .flatten()
        })
        .or_else(|| coords.map(maps::osm_embed_url))?;

    let maps_url = match coords {
        Some(point) => maps::maps_search_url(point),
        None => maps::maps_search_url_for_title(&metadata.title),
    };

    let mut message = maps::strip_map_markup(&document.content);
    if let Some(hours) = metadata.extra_str("workingHours") {
        message.push_str(&format!("\nWorking hours: {}", hours));
    }
    if let Some(contact) = metadata.extra_str("contact") {
        message.push_str(&format!("\nContact: {}", contact));
    }

    // Keep the stored string so the value round-trips exactly
    let coordinates = coords.and(metadata.coordinates.clone());

    Some(MapCard {
        title: metadata.title.clone(),
        message,
        embed_url,
        maps_url,
        coordinates,
    })
}

/// Category-specific system context for the generative provider
fn system_prompt(category: QueryCategory, context: &str) -> String {
    let base = format!(
        "You are a helpful university campus assistant. Your role is to help \
students with information about the university.\n\n\
Use the following context to answer the student's question. If the context \
doesn't contain relevant information, politely say so and provide general \
guidance.\n\n\
Context:\n{}\n\n\
Guidelines:\n\
- Be friendly, helpful, and concise\n\
- Provide accurate information based on the context\n\
- If you're unsure, admit it and suggest who the student should contact\n\
- Use bullet points for lists when appropriate\n\
- Keep responses clear and easy to understand",
        context
    );

    match category {
        QueryCategory::CampusNavigation => format!(
            "{}\n\nFocus on: Building locations, directions, parking, campus \
facilities, and getting around campus.",
            base
        ),
        QueryCategory::Admissions => format!(
            "{}\n\nFocus on: Admission requirements, application process, \
deadlines, scholarships, and enrollment information.",
            base
        ),
        QueryCategory::Courses => format!(
            "{}\n\nFocus on: Course information, prerequisites, schedules, \
registration, and academic programs.",
            base
        ),
        QueryCategory::General => base,
    }
}
