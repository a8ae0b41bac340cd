use super::{ProductStore, StoreError, StoreResult};
use crate::actor_framework::{FrameworkError, ResourceClient};
use crate::domain::{Product, ProductDraft};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// In-memory backend: a thin client over the product [`ResourceActor`].
///
/// [`ResourceActor`]: crate::actor_framework::ResourceActor
#[derive(Clone)]
pub struct ActorStore {
    inner: ResourceClient<Product>,
}

impl ActorStore {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }
}

impl From<FrameworkError> for StoreError {
    fn from(err: FrameworkError) -> Self {
        match err {
            FrameworkError::NotFound(id) => StoreError::NotFound(id),
            FrameworkError::Conflict(id) => StoreError::Conflict(id),
            other @ (FrameworkError::ActorClosed | FrameworkError::ActorDropped) => {
                StoreError::Unavailable(other.to_string())
            }
        }
    }
}

#[async_trait]
impl ProductStore for ActorStore {
    #[instrument(skip(self))]
    async fn list(&self) -> StoreResult<Vec<Product>> {
        debug!("Sending request");
        Ok(self.inner.list().await?)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Product>> {
        debug!("Sending request");
        Ok(self.inner.get(id.to_string()).await?)
    }

    #[instrument(skip(self, draft), fields(name = %draft.name))]
    async fn insert(&self, draft: ProductDraft) -> StoreResult<Product> {
        debug!("Sending request");
        Ok(self.inner.create(draft).await?)
    }

    #[instrument(skip(self, draft))]
    async fn replace(&self, id: &str, draft: ProductDraft) -> StoreResult<Product> {
        debug!("Sending request");
        Ok(self.inner.replace(id.to_string(), draft).await?)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> StoreResult<Product> {
        debug!("Sending request");
        Ok(self.inner.delete(id.to_string()).await?)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
