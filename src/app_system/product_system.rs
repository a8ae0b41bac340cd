use crate::actor_framework::ResourceActor;
use crate::config::{AppConfig, StoreBackend};
use crate::domain::{seed_products, Product};
use crate::http::{build_router, AppState};
use crate::product_actor::sequential_ids;
use crate::store::{ActorStore, DocumentStore, JsonFileCollection, ProductStore};
use axum::Router;
use std::sync::Arc;
use tracing::{error, info, instrument};

const ACTOR_BUFFER: usize = 100;

/// Owns the product store and any actor tasks behind it.
///
/// Created once at startup; [`ProductSystem::router`] hands handlers a shared
/// store and [`ProductSystem::shutdown`] waits for the actor to drain.
pub struct ProductSystem {
    store: Arc<dyn ProductStore>,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl ProductSystem {
    /// Start the configured backend. Must be called inside a Tokio runtime.
    #[instrument(name = "product_system", skip(config))]
    pub fn start(config: &AppConfig) -> Self {
        let mut handles = Vec::new();

        let store: Arc<dyn ProductStore> = match &config.backend {
            StoreBackend::Memory { seed } => {
                let items = if *seed { seed_products() } else { Vec::new() };
                let (actor, client) =
                    ResourceActor::<Product>::new(ACTOR_BUFFER, sequential_ids(items.len() as u64));
                handles.push(tokio::spawn(actor.with_items(items).run()));
                Arc::new(ActorStore::new(client))
            }
            StoreBackend::Document { path } => {
                let collection = JsonFileCollection::new(path);
                info!(path = %collection.path().display(), "Opening document store");
                Arc::new(DocumentStore::new(collection))
            }
        };

        info!(backend = store.backend_name(), "Product system started");
        Self { store, handles }
    }

    pub fn store(&self) -> Arc<dyn ProductStore> {
        Arc::clone(&self.store)
    }

    pub fn router(&self, config: &AppConfig) -> Router {
        build_router(AppState::new(self.store(), config))
    }

    /// Drops this handle on the store and waits for actor tasks.
    ///
    /// Every router built from this system must be dropped first: the actor
    /// only stops once its last client is gone.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down product system");
        drop(self.store);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Actor task failed");
                return Err(format!("Actor task failed: {e}"));
            }
        }

        info!("Product system shutdown complete");
        Ok(())
    }
}
