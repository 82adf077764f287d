//! Request DTOs and JSON mapping helpers.

use serde::Deserialize;

use stockbridge_catalog::{NewProduct, Product, ProductWithStock, UpdateProduct};
use stockbridge_core::{Page, Price};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(req: CreateProductRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            price: req.price,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
}

impl From<UpdateProductRequest> for UpdateProduct {
    fn from(req: UpdateProductRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            price: req.price,
        }
    }
}

/// Paging query parameters (`?page=&size=`).
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<u32>,
    pub size: Option<u32>,
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn product_to_json(product: Product) -> serde_json::Value {
    serde_json::json!({
        "id": product.id.to_string(),
        "name": product.name,
        "description": product.description,
        "price": product.price,
        "created_at": product.created_at.to_rfc3339(),
        "updated_at": product.updated_at.to_rfc3339(),
    })
}

pub fn product_with_stock_to_json(view: ProductWithStock) -> serde_json::Value {
    serde_json::json!({
        "id": view.id.to_string(),
        "name": view.name,
        "description": view.description,
        "price": view.price,
        "quantity": view.quantity,
        "created_at": view.created_at.to_rfc3339(),
        "updated_at": view.updated_at.to_rfc3339(),
    })
}

pub fn page_to_json(page: Page<Product>) -> serde_json::Value {
    serde_json::json!({
        "items": page.items.into_iter().map(product_to_json).collect::<Vec<_>>(),
        "page": page.page,
        "size": page.size,
        "total_items": page.total_items,
        "total_pages": page.total_pages,
    })
}
