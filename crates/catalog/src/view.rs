//! Combined-view assembler.
//!
//! Pure mapping from (catalog record, stock lookup result) to the
//! externally visible product-with-stock representation. Total by
//! construction: absent stock maps to quantity 0, so the combined view is
//! always buildable even when the ledger is degraded.

use chrono::{DateTime, Utc};
use serde::Serialize;

use stockbridge_core::{Price, ProductId};
use stockbridge_stock::StockRecord;

use crate::product::Product;

/// A product enriched with its current stock quantity (derived, never
/// persisted).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductWithStock {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Merge a product with an optional ledger record.
pub fn combine(product: Product, stock: Option<StockRecord>) -> ProductWithStock {
    ProductWithStock {
        id: product.id,
        name: product.name,
        description: product.description,
        price: product.price,
        quantity: stock.map(|record| record.quantity).unwrap_or(0),
        created_at: product.created_at,
        updated_at: product.updated_at,
    }
}
