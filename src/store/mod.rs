//! Product storage.
//!
//! Handlers only ever see [`ProductStore`]; which backend sits behind it is
//! decided once at startup by the system coordinator.

use crate::domain::{Product, ProductDraft};
use async_trait::async_trait;
use thiserror::Error;

pub mod document;
pub mod memory;

pub use document::{DocumentCollection, DocumentStore, JsonFileCollection};
pub use memory::ActorStore;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("Product not found: {0}")]
    NotFound(String),
    #[error("Product already exists: {0}")]
    Conflict(String),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    #[error("Store backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait ProductStore: Send + Sync {
    /// All records in insertion order.
    async fn list(&self) -> StoreResult<Vec<Product>>;
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Product>>;
    /// Assigns a fresh ID and appends.
    async fn insert(&self, draft: ProductDraft) -> StoreResult<Product>;
    /// Swaps the stored record for `id`; the ID itself never changes.
    async fn replace(&self, id: &str, draft: ProductDraft) -> StoreResult<Product>;
    /// Removes and returns the record.
    async fn delete(&self, id: &str) -> StoreResult<Product>;
    fn backend_name(&self) -> &'static str;
}
