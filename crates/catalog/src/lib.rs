//! `stockbridge-catalog` — product catalog domain and orchestration.
//!
//! The catalog owns product metadata; stock quantities live in the remote
//! ledger behind `stockbridge_stock::StockGateway`. `ProductService` is the
//! orchestration between the two: detached stock initialization on create,
//! degrade-to-zero combined reads, and the strict decrement-then-refetch
//! reduce path.

pub mod product;
pub mod service;
pub mod store;
pub mod view;

pub use product::{NewProduct, Product, UpdateProduct};
pub use service::{ProductService, ServiceError};
pub use store::{CatalogStore, InMemoryCatalogStore, StoreError};
pub use view::{ProductWithStock, combine};
