use crate::actor_framework::Entity;
use crate::domain::{Product, ProductDraft};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

impl Entity for Product {
    type Id = String;
    type CreateParams = ProductDraft;

    fn id(&self) -> &String {
        &self.id
    }

    /// Creates a new Product from a validated draft.
    ///
    /// # Arguments
    /// * `id` - Identifier produced by the actor's generator
    /// * `draft` - Trimmed fields with `in_stock` already defaulted
    fn from_create(id: String, draft: ProductDraft) -> Self {
        Product::from_draft(id, draft)
    }

    /// Full replace: every field comes from the draft, the ID stays.
    fn on_replace(&mut self, draft: ProductDraft) {
        self.apply(draft);
    }
}

/// Sequential string IDs continuing after `start_after` (`"4"`, `"5"`, ...
/// when three products were seeded).
pub fn sequential_ids(start_after: u64) -> impl Fn() -> String + Send + Sync + 'static {
    let counter = Arc::new(AtomicU64::new(start_after + 1));
    move || counter.fetch_add(1, Ordering::SeqCst).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids_continue_after_seed() {
        let next = sequential_ids(3);
        assert_eq!(next(), "4");
        assert_eq!(next(), "5");
    }
}
