//! Persistent document store
//!
//! Owns the corpus and its single-file JSON snapshot. Bulk add and clear
//! are the only mutation paths and are expected to run as offline
//! maintenance; query-time access is read-only, so no internal locking.
//! Updates happen by clearing and reloading the whole corpus.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

use crate::errors::{AssistantError, Result};
use crate::knowledge::document::{Document, NewDocument};

/// Store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Snapshot file holding the persisted corpus
    pub data_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        let data_path = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".unibot")
            .join("vector_store.json");

        Self { data_path }
    }
}

/// On-disk snapshot format
#[derive(Debug, Serialize, Deserialize)]
struct StoreSnapshot {
    documents: Vec<Document>,
}

/// In-memory corpus backed by a JSON snapshot on disk
pub struct DocumentStore {
    documents: Vec<Document>,
    config: StoreConfig,
}

impl DocumentStore {
    /// Create an empty store with default snapshot location
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Create an empty store with a custom snapshot location
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            documents: Vec::new(),
            config,
        }
    }

    /// Load the persisted corpus if a snapshot exists.
    ///
    /// Idempotent: the snapshot replaces the in-memory set, so a second
    /// call never duplicates records. A missing snapshot means an empty
    /// corpus, not an error.
    pub fn initialize(&mut self) -> Result<()> {
        if !self.config.data_path.exists() {
            self.documents = Vec::new();
            return Ok(());
        }

        let json = fs::read_to_string(&self.config.data_path).map_err(|e| {
            AssistantError::Storage(format!(
                "failed to read corpus snapshot {}: {}",
                self.config.data_path.display(),
                e
            ))
        })?;

        let snapshot: StoreSnapshot = serde_json::from_str(&json).map_err(|e| {
            AssistantError::Storage(format!("corrupt corpus snapshot: {}", e))
        })?;

        self.documents = snapshot.documents;
        Ok(())
    }

    /// Append documents, assigning each a fresh unique id, then persist.
    ///
    /// At-least-once semantics toward durability: the in-memory set is
    /// updated even when the snapshot write fails. Empty content is
    /// rejected before anything is inserted.
    pub fn add_documents(&mut self, incoming: Vec<NewDocument>) -> Result<()> {
        if let Some(bad) = incoming.iter().find(|d| d.content.trim().is_empty()) {
            return Err(AssistantError::Validation(format!(
                "document '{}' has empty content",
                bad.metadata.title
            )));
        }

        for doc in incoming {
            self.documents.push(Document {
                id: Uuid::new_v4().to_string(),
                content: doc.content,
                metadata: doc.metadata,
            });
        }

        self.save()
    }

    /// Empty the in-memory set and delete the snapshot.
    ///
    /// A missing snapshot is not an error.
    pub fn clear(&mut self) -> Result<()> {
        self.documents.clear();

        if self.config.data_path.exists() {
            fs::remove_file(&self.config.data_path).map_err(|e| {
                AssistantError::Storage(format!("failed to delete corpus snapshot: {}", e))
            })?;
        }

        Ok(())
    }

    /// Write the full corpus to the snapshot file
    fn save(&self) -> Result<()> {
        if let Some(parent) = self.config.data_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AssistantError::Storage(format!("failed to create corpus directory: {}", e))
            })?;
        }

        let snapshot = StoreSnapshot {
            documents: self.documents.clone(),
        };
        let json = serde_json::to_string_pretty(&snapshot)?;

        fs::write(&self.config.data_path, json).map_err(|e| {
            AssistantError::Storage(format!(
                "failed to write corpus snapshot {}: {}",
                self.config.data_path.display(),
                e
            ))
        })
    }

    /// All documents in insertion order
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Snapshot file location
    pub fn data_path(&self) -> &PathBuf {
        &self.config.data_path
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}
