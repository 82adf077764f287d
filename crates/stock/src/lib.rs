//! `stockbridge-stock` — typed client for the stock ledger service.
//!
//! The ledger owns stock quantities; this crate owns how we talk to it:
//! the wire contract, the error taxonomy, and the timeout/retry policy
//! applied to every remote call.

pub mod client;
pub mod gateway;
pub mod record;
pub mod retry;

pub use client::{API_KEY_HEADER, HttpStockClient, StockClientConfig};
pub use gateway::{StockError, StockGateway};
pub use record::{StockRecord, StockUpsert};
pub use retry::RetryPolicy;
