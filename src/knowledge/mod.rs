//! Knowledge corpus: document model and persistent store

pub mod document;
pub mod store;

pub use document::{Coordinates, Document, DocumentMetadata, NewDocument};
pub use store::{DocumentStore, StoreConfig};
