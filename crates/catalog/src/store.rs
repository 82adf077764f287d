//! Catalog store seam.
//!
//! The catalog store is an external collaborator reachable behind this
//! trait; `InMemoryCatalogStore` is the provided implementation and the
//! stand-in used by tests and the dev binary.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

use stockbridge_core::{Page, PageRequest, ProductId};

use crate::product::Product;

/// Failure of the catalog store collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("catalog store unavailable: {0}")]
    Unavailable(String),
}

/// Keyed record store for products.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Insert or replace by id.
    async fn save(&self, product: Product) -> Result<Product, StoreError>;

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    /// Page through all products, ordered by name.
    async fn find_all(&self, page: PageRequest) -> Result<Page<Product>, StoreError>;

    /// Delete by id; reports whether a row existed.
    async fn delete_by_id(&self, id: ProductId) -> Result<bool, StoreError>;
}

/// In-memory catalog store. Serializes its own writes with an `RwLock`,
/// matching the keyed-store contract of the real collaborator.
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    rows: RwLock<HashMap<ProductId, Product>>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn save(&self, product: Product) -> Result<Product, StoreError> {
        self.rows.write().await.insert(product.id, product.clone());
        Ok(product)
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn find_all(&self, page: PageRequest) -> Result<Page<Product>, StoreError> {
        let rows = self.rows.read().await;
        let mut all: Vec<&Product> = rows.values().collect();
        // Name order, id as tiebreaker for a stable listing.
        all.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));

        let total = all.len() as u64;
        let items = all
            .into_iter()
            .skip(page.offset())
            .take(page.size as usize)
            .cloned()
            .collect();
        Ok(Page::new(items, page, total))
    }

    async fn delete_by_id(&self, id: ProductId) -> Result<bool, StoreError> {
        Ok(self.rows.write().await.remove(&id).is_some())
    }
}
