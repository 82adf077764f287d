//! Stock gateway seam: the operations the catalog side needs from the
//! ledger, plus the failure taxonomy the retry and boundary layers key off.

use async_trait::async_trait;
use thiserror::Error;

use stockbridge_core::ProductId;

use crate::record::StockRecord;

/// Classified failure of a remote stock operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StockError {
    /// The ledger has no record for the product.
    #[error("stock record not found")]
    NotFound,

    /// Business rejection: requested amount exceeds the available quantity.
    /// Never retried.
    #[error("insufficient stock: {0}")]
    InsufficientStock(String),

    /// Transport-level failure (connect refused, DNS, reset). Retryable.
    #[error("stock service unreachable: {0}")]
    Unreachable(String),

    /// The per-attempt deadline elapsed. Retryable.
    #[error("stock service request timed out")]
    Timeout,

    /// Any other remote failure class.
    #[error("unexpected stock service response ({status}): {detail}")]
    Unexpected { status: u16, detail: String },
}

impl StockError {
    /// Only transport failures and timeouts are safe to retry; business
    /// responses surface immediately.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unreachable(_) | Self::Timeout)
    }
}

/// Remote stock operations used by the catalog service.
///
/// `HttpStockClient` is the production implementation; tests substitute a
/// recording mock.
#[async_trait]
pub trait StockGateway: Send + Sync {
    /// Upsert a ledger record for the product. Single attempt, best-effort:
    /// callers on the product-creation path observe the outcome via logs only.
    async fn create_stock(
        &self,
        product_id: ProductId,
        initial_quantity: i64,
    ) -> Result<StockRecord, StockError>;

    /// Fetch the ledger record for a product. A remote 404 is `Ok(None)`,
    /// not an error.
    async fn get_stock(&self, product_id: ProductId) -> Result<Option<StockRecord>, StockError>;

    /// Decrement-if-sufficient. Fails with `InsufficientStock` on business
    /// rejection and `NotFound` when no record exists.
    async fn reduce_stock(
        &self,
        product_id: ProductId,
        amount: i64,
    ) -> Result<StockRecord, StockError>;
}
