//! End-to-end query orchestration
//!
//! Validate the request, rank the corpus, classify the query, assemble the
//! response. The store is injected explicitly and read-only during query
//! processing; mutation runs as offline maintenance through the store
//! accessors.

use std::sync::Arc;

use chrono::Utc;

use crate::classifier::is_location_query;
use crate::errors::Result;
use crate::knowledge::DocumentStore;
use crate::provider::GenerativeProvider;
use crate::response::{AssemblerConfig, ResponseAssembler};
use crate::retrieval::{RankedDocument, Ranker, ScoreWeights};
use crate::types::{Answer, QueryRequest};

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// How many documents the ranker returns per query
    pub max_results: usize,
    /// Scoring weights for the ranker
    pub weights: ScoreWeights,
    /// Assembly settings (context cap)
    pub assembler: AssemblerConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_results: 5,
            weights: ScoreWeights::default(),
            assembler: AssemblerConfig::default(),
        }
    }
}

/// The retrieval-and-response-routing engine
pub struct ChatEngine {
    store: DocumentStore,
    ranker: Ranker,
    assembler: ResponseAssembler,
    config: EngineConfig,
}

impl ChatEngine {
    pub fn new(store: DocumentStore, provider: Arc<dyn GenerativeProvider>) -> Self {
        Self::with_config(store, provider, EngineConfig::default())
    }

    pub fn with_config(
        store: DocumentStore,
        provider: Arc<dyn GenerativeProvider>,
        config: EngineConfig,
    ) -> Self {
        Self {
            store,
            ranker: Ranker::with_weights(config.weights.clone()),
            assembler: ResponseAssembler::with_config(provider, config.assembler.clone()),
            config,
        }
    }

    /// Answer one query end to end
    pub async fn answer(&self, request: &QueryRequest) -> Result<Answer> {
        request.validate()?;

        let ranked = self.ranker.search(
            self.store.documents(),
            &request.message,
            self.config.max_results,
        );
        let location_query = is_location_query(&request.message);

        let response = self
            .assembler
            .assemble(&request.message, request.category, &ranked, location_query)
            .await?;

        Ok(Answer {
            response,
            category: request.category,
            timestamp: Utc::now(),
        })
    }

    /// Raw ranked retrieval, without assembly
    pub fn search_knowledge(&self, query: &str, limit: usize) -> Vec<RankedDocument> {
        self.ranker.search(self.store.documents(), query, limit)
    }

    /// Read access to the corpus
    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    /// Mutable access for offline maintenance (bulk add, clear)
    pub fn store_mut(&mut self) -> &mut DocumentStore {
        &mut self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AssistantError;
    use crate::knowledge::{DocumentMetadata, NewDocument, StoreConfig};
    use crate::types::QueryCategory;
    use async_trait::async_trait;
    use tempfile::TempDir;

    struct StubProvider;

    #[async_trait]
    impl GenerativeProvider for StubProvider {
        async fn generate(&self, _system_prompt: &str, _user_message: &str) -> Result<String> {
            Ok("stub prose".to_string())
        }
    }

    fn engine_with_docs(docs: Vec<NewDocument>) -> (ChatEngine, TempDir) {
        let temp = TempDir::new().unwrap();
        let mut store = DocumentStore::with_config(StoreConfig {
            data_path: temp.path().join("vector_store.json"),
        });
        store.add_documents(docs).unwrap();
        (ChatEngine::new(store, Arc::new(StubProvider)), temp)
    }

    fn place(title: &str, coordinates: &str) -> NewDocument {
        let mut metadata = DocumentMetadata::titled(title);
        metadata.category = "campus-navigation".to_string();
        metadata.coordinates = Some(coordinates.to_string());
        NewDocument {
            content: format!("{}: a campus location.", title),
            metadata,
        }
    }

    #[tokio::test]
    async fn test_answer_rejects_invalid_request() {
        let (engine, _temp) = engine_with_docs(vec![]);
        let request = QueryRequest::new("  ", QueryCategory::General);
        let err = engine.answer(&request).await.unwrap_err();
        assert!(matches!(err, AssistantError::Validation(_)));
    }

    #[tokio::test]
    async fn test_answer_empty_corpus_is_fallback_text() {
        let (engine, _temp) = engine_with_docs(vec![]);
        let request = QueryRequest::new("Where is the library?", QueryCategory::General);
        let answer = engine.answer(&request).await.unwrap();
        assert!(!answer.response.is_map());
    }

    #[tokio::test]
    async fn test_answer_routes_location_query_to_map() {
        let (engine, _temp) = engine_with_docs(vec![place("Grand Library", "33.123,35.456")]);
        let request = QueryRequest::new(
            "Where is the Grand Library?",
            QueryCategory::CampusNavigation,
        );

        let answer = engine.answer(&request).await.unwrap();
        assert!(answer.response.is_map());
        assert_eq!(answer.category, QueryCategory::CampusNavigation);
    }

    #[tokio::test]
    async fn test_answer_routes_informational_query_to_text() {
        let (engine, _temp) = engine_with_docs(vec![place("Grand Library", "33.123,35.456")]);
        let request = QueryRequest::new(
            "Tell me about the Grand Library",
            QueryCategory::General,
        );

        let answer = engine.answer(&request).await.unwrap();
        assert_eq!(answer.response.message(), "stub prose");
    }

    #[test]
    fn test_search_knowledge_caps_results() {
        let (engine, _temp) = engine_with_docs(vec![
            place("Library North", "33.1,35.2"),
            place("Library South", "33.2,35.3"),
            place("Library West", "33.3,35.4"),
        ]);

        let results = engine.search_knowledge("library", 2);
        assert_eq!(results.len(), 2);
    }
}
