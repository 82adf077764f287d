//! Dependency wiring for the HTTP layer.

use std::sync::Arc;

use stockbridge_catalog::{CatalogStore, ProductService};
use stockbridge_stock::StockGateway;

/// Services shared by all request handlers.
pub struct AppServices {
    pub products: ProductService,
}

impl AppServices {
    pub fn new(store: Arc<dyn CatalogStore>, stock: Arc<dyn StockGateway>) -> Self {
        Self {
            products: ProductService::new(store, stock),
        }
    }
}
