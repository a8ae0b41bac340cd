//! Document-collection backend.
//!
//! The collection is an opaque collaborator keyed by the `id` field: the store
//! only relies on find-all, find-one, insert, replace and remove. [`JsonFileCollection`]
//! is the bundled implementation, one JSON array on disk.

use super::{ProductStore, StoreError, StoreResult};
use crate::domain::{Product, ProductDraft};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

/// Every method is one atomic step against the collection; the store never
/// splits a check and a write across two calls.
#[async_trait]
pub trait DocumentCollection: Send + Sync {
    async fn find_all(&self) -> StoreResult<Vec<Product>>;
    async fn find_one(&self, id: &str) -> StoreResult<Option<Product>>;
    /// Appends `doc` unless its `id` is taken. Returns whether it was stored.
    async fn insert_one(&self, doc: Product) -> StoreResult<bool>;
    /// Swaps the document with `doc.id` in place. `None` if there was none.
    async fn replace_one(&self, doc: Product) -> StoreResult<Option<Product>>;
    /// Removes and returns the document, if present.
    async fn remove(&self, id: &str) -> StoreResult<Option<Product>>;
}

pub struct DocumentStore<C> {
    collection: C,
}

impl<C: DocumentCollection> DocumentStore<C> {
    pub fn new(collection: C) -> Self {
        Self { collection }
    }
}

#[async_trait]
impl<C: DocumentCollection> ProductStore for DocumentStore<C> {
    async fn list(&self) -> StoreResult<Vec<Product>> {
        self.collection.find_all().await
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Product>> {
        self.collection.find_one(id).await
    }

    #[instrument(skip(self, draft), fields(name = %draft.name))]
    async fn insert(&self, draft: ProductDraft) -> StoreResult<Product> {
        let doc = Product::from_draft(uuid::Uuid::new_v4().to_string(), draft);
        if !self.collection.insert_one(doc.clone()).await? {
            return Err(StoreError::Conflict(doc.id));
        }
        debug!(id = %doc.id, "Document inserted");
        Ok(doc)
    }

    #[instrument(skip(self, draft))]
    async fn replace(&self, id: &str, draft: ProductDraft) -> StoreResult<Product> {
        self.collection
            .replace_one(Product::from_draft(id, draft))
            .await?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> StoreResult<Product> {
        self.collection
            .remove(id)
            .await?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn backend_name(&self) -> &'static str {
        "document"
    }
}

// =============================================================================
// JSON FILE COLLECTION
// =============================================================================

/// Documents kept as a JSON array in a single file.
///
/// A missing file reads as an empty collection. The mutex covers every
/// read-modify-write so concurrent writes in this process never lose updates;
/// other processes writing the same file are not coordinated with.
pub struct JsonFileCollection {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileCollection {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        info!(path = %path.display(), "Using JSON document collection");
        Self { path, lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> StoreResult<Vec<Product>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(Vec::new()),
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| StoreError::Backend(format!("decode {}: {e}", self.path.display()))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(StoreError::Backend(format!("read {}: {e}", self.path.display()))),
        }
    }

    async fn persist(&self, docs: &[Product]) -> StoreResult<()> {
        let bytes = serde_json::to_vec_pretty(docs)
            .map_err(|e| StoreError::Backend(format!("encode documents: {e}")))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::Backend(format!("create {}: {e}", parent.display())))?;
        }
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes)
            .await
            .map_err(|e| StoreError::Backend(format!("write {}: {e}", tmp.display())))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| StoreError::Backend(format!("rename {}: {e}", tmp.display())))
    }
}

#[async_trait]
impl DocumentCollection for JsonFileCollection {
    async fn find_all(&self) -> StoreResult<Vec<Product>> {
        let _guard = self.lock.lock().await;
        self.load().await
    }

    async fn find_one(&self, id: &str) -> StoreResult<Option<Product>> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.into_iter().find(|doc| doc.id == id))
    }

    async fn insert_one(&self, doc: Product) -> StoreResult<bool> {
        let _guard = self.lock.lock().await;
        let mut docs = self.load().await?;
        if docs.iter().any(|existing| existing.id == doc.id) {
            return Ok(false);
        }
        docs.push(doc);
        self.persist(&docs).await?;
        Ok(true)
    }

    async fn replace_one(&self, doc: Product) -> StoreResult<Option<Product>> {
        let _guard = self.lock.lock().await;
        let mut docs = self.load().await?;
        let Some(existing) = docs.iter_mut().find(|existing| existing.id == doc.id) else {
            return Ok(None);
        };
        *existing = doc.clone();
        self.persist(&docs).await?;
        Ok(Some(doc))
    }

    async fn remove(&self, id: &str) -> StoreResult<Option<Product>> {
        let _guard = self.lock.lock().await;
        let mut docs = self.load().await?;
        let Some(idx) = docs.iter().position(|doc| doc.id == id) else {
            return Ok(None);
        };
        let removed = docs.remove(idx);
        self.persist(&docs).await?;
        Ok(Some(removed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::seed_products;
    use std::sync::Arc;

    fn draft(name: &str, category: &str) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            description: String::new(),
            price: 0.0,
            category: category.to_string(),
            in_stock: true,
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(JsonFileCollection::new(dir.path().join("none.json")));
        assert!(store.list().await.unwrap().is_empty());
        assert_eq!(store.find_by_id("1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_crud_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("products.json");

        let store = DocumentStore::new(JsonFileCollection::new(&path));
        let mug = store.insert(draft("Mug", "kitchen")).await.unwrap();
        let lamp = store.insert(draft("Lamp", "home")).await.unwrap();
        assert_ne!(mug.id, lamp.id);

        let replaced = store.replace(&mug.id, draft("Big Mug", "kitchen")).await.unwrap();
        assert_eq!(replaced.id, mug.id);

        let reopened = DocumentStore::new(JsonFileCollection::new(&path));
        let names: Vec<_> = reopened.list().await.unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Big Mug", "Lamp"]);

        assert_eq!(reopened.delete(&lamp.id).await.unwrap().name, "Lamp");
        assert_eq!(
            reopened.delete(&lamp.id).await,
            Err(StoreError::NotFound(lamp.id.clone()))
        );
    }

    #[tokio::test]
    async fn test_reads_existing_documents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(&path, serde_json::to_vec(&seed_products()).unwrap()).unwrap();

        let store = DocumentStore::new(JsonFileCollection::new(&path));
        let laptop = store.find_by_id("1").await.unwrap().unwrap();
        assert_eq!(laptop.name, "Laptop");
        assert_eq!(
            store.replace("42", draft("Nope", "none")).await,
            Err(StoreError::NotFound("42".into()))
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_replace_racing_delete_never_revives() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(DocumentStore::new(JsonFileCollection::new(dir.path().join("race.json"))));

        for round in 0..50 {
            let id = store.insert(draft(&format!("Item {round}"), "race")).await.unwrap().id;

            let replacer = {
                let (store, id) = (Arc::clone(&store), id.clone());
                tokio::spawn(async move { store.replace(&id, draft("Replaced", "race")).await })
            };
            let deleter = {
                let (store, id) = (Arc::clone(&store), id.clone());
                tokio::spawn(async move { store.delete(&id).await })
            };

            let replaced = replacer.await.unwrap();
            assert!(deleter.await.unwrap().is_ok(), "delete of a live record failed");
            assert!(matches!(replaced, Ok(_) | Err(StoreError::NotFound(_))));
            assert_eq!(store.find_by_id(&id).await.unwrap(), None, "record revived in round {round}");
        }
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_backend_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(&path, b"{not json").unwrap();

        let store = DocumentStore::new(JsonFileCollection::new(&path));
        assert!(matches!(store.list().await, Err(StoreError::Backend(_))));
    }
}
