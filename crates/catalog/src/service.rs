//! Product service: catalog persistence orchestrated with ledger calls.
//!
//! Failure policy, per call path:
//! - stock initialization on create is detached and only logged;
//! - stock reads degrade to quantity 0;
//! - stock decrements propagate their classification verbatim.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;

use stockbridge_core::{DomainError, Page, PageRequest, ProductId};
use stockbridge_stock::{StockError, StockGateway};

use crate::product::{NewProduct, Product, UpdateProduct};
use crate::store::{CatalogStore, StoreError};
use crate::view::{ProductWithStock, combine};

/// Error surfaced by `ProductService` operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("product not found")]
    NotFound,

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("insufficient stock: {0}")]
    InsufficientStock(String),

    /// Transport or unexpected ledger failure on the critical path.
    #[error("stock service error: {0}")]
    Stock(StockError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound => Self::NotFound,
            DomainError::Validation(msg) | DomainError::InvalidId(msg) => Self::Validation(msg),
        }
    }
}

/// Map a decrement failure, preserving its classification for the boundary.
fn map_reduce_error(err: StockError) -> ServiceError {
    match err {
        StockError::NotFound => ServiceError::NotFound,
        StockError::InsufficientStock(detail) => ServiceError::InsufficientStock(detail),
        other => ServiceError::Stock(other),
    }
}

/// Single source of truth for product metadata; owns every interaction
/// between the catalog store and the stock gateway.
pub struct ProductService {
    store: Arc<dyn CatalogStore>,
    stock: Arc<dyn StockGateway>,
}

impl ProductService {
    pub fn new(store: Arc<dyn CatalogStore>, stock: Arc<dyn StockGateway>) -> Self {
        Self { store, stock }
    }

    /// Persist a new product, then initialize its ledger record with a
    /// detached call. The response never waits on the ledger: a product
    /// without a stock record is a valid degraded state, recoverable by a
    /// later explicit stock upsert.
    pub async fn create_product(&self, input: NewProduct) -> Result<Product, ServiceError> {
        let product = Product::create(input, Utc::now())?;
        let saved = self.store.save(product).await?;
        self.spawn_stock_init(saved.id);
        Ok(saved)
    }

    fn spawn_stock_init(&self, product_id: ProductId) {
        let stock = Arc::clone(&self.stock);
        tokio::spawn(async move {
            match stock.create_stock(product_id, 0).await {
                Ok(record) => {
                    tracing::info!(%product_id, quantity = record.quantity, "stock record initialized");
                }
                Err(err) => {
                    tracing::warn!(
                        %product_id,
                        error = %err,
                        "stock initialization failed; product remains without a ledger record"
                    );
                }
            }
        });
    }

    /// Catalog-only read; never touches the ledger.
    pub async fn get_product(&self, id: ProductId) -> Result<Option<Product>, ServiceError> {
        Ok(self.store.find_by_id(id).await?)
    }

    pub async fn list_products(&self, page: PageRequest) -> Result<Page<Product>, ServiceError> {
        Ok(self.store.find_all(page).await?)
    }

    pub async fn update_product(
        &self,
        id: ProductId,
        update: UpdateProduct,
    ) -> Result<Product, ServiceError> {
        let Some(mut product) = self.store.find_by_id(id).await? else {
            return Err(ServiceError::NotFound);
        };
        product.apply_update(update, Utc::now())?;
        Ok(self.store.save(product).await?)
    }

    /// Combined read. An absent product returns `Ok(None)` with no remote
    /// call made; ledger degradation (absent record or any stock error)
    /// falls back to quantity 0 rather than failing the read.
    pub async fn get_product_with_stock(
        &self,
        id: ProductId,
    ) -> Result<Option<ProductWithStock>, ServiceError> {
        let Some(product) = self.store.find_by_id(id).await? else {
            return Ok(None);
        };

        let stock = match self.stock.get_stock(id).await {
            Ok(stock) => stock,
            Err(err) => {
                tracing::warn!(product_id = %id, error = %err, "stock lookup failed; serving quantity 0");
                None
            }
        };

        Ok(Some(combine(product, stock)))
    }

    /// Decrement stock, then re-fetch the combined view for the
    /// authoritative post-decrement state. The decrement strictly precedes
    /// the re-fetch; on failure no partial view is built.
    pub async fn reduce_stock(
        &self,
        product_id: ProductId,
        amount: i64,
    ) -> Result<ProductWithStock, ServiceError> {
        if amount < 0 {
            return Err(ServiceError::Validation("amount cannot be negative".to_string()));
        }

        self.stock
            .reduce_stock(product_id, amount)
            .await
            .map_err(map_reduce_error)?;

        self.get_product_with_stock(product_id)
            .await?
            .ok_or(ServiceError::NotFound)
    }

    /// Delete the catalog row only; ledger cleanup is out of scope.
    pub async fn delete_product(&self, id: ProductId) -> Result<(), ServiceError> {
        if self.store.delete_by_id(id).await? {
            Ok(())
        } else {
            Err(ServiceError::NotFound)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryCatalogStore;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;
    use stockbridge_core::StockRecordId;
    use stockbridge_stock::StockRecord;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum StockCall {
        Create(ProductId, i64),
        Get(ProductId),
        Reduce(ProductId, i64),
    }

    /// Recording stock gateway with programmable responses.
    struct MockStock {
        calls: Mutex<Vec<StockCall>>,
        create_response: Mutex<Result<StockRecord, StockError>>,
        get_response: Mutex<Result<Option<StockRecord>, StockError>>,
        reduce_response: Mutex<Result<StockRecord, StockError>>,
    }

    impl MockStock {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                create_response: Mutex::new(Ok(record(ProductId::new(), 0))),
                get_response: Mutex::new(Ok(None)),
                reduce_response: Mutex::new(Err(StockError::NotFound)),
            }
        }

        fn calls(&self) -> Vec<StockCall> {
            self.calls.lock().unwrap().clone()
        }

        async fn wait_for_call(&self, expected: &StockCall) {
            for _ in 0..100 {
                if self.calls().contains(expected) {
                    return;
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
            panic!("gateway never saw {expected:?}; calls: {:?}", self.calls());
        }
    }

    #[async_trait]
    impl StockGateway for MockStock {
        async fn create_stock(
            &self,
            product_id: ProductId,
            initial_quantity: i64,
        ) -> Result<StockRecord, StockError> {
            self.calls
                .lock()
                .unwrap()
                .push(StockCall::Create(product_id, initial_quantity));
            self.create_response.lock().unwrap().clone()
        }

        async fn get_stock(&self, product_id: ProductId) -> Result<Option<StockRecord>, StockError> {
            self.calls.lock().unwrap().push(StockCall::Get(product_id));
            self.get_response.lock().unwrap().clone()
        }

        async fn reduce_stock(
            &self,
            product_id: ProductId,
            amount: i64,
        ) -> Result<StockRecord, StockError> {
            self.calls
                .lock()
                .unwrap()
                .push(StockCall::Reduce(product_id, amount));
            self.reduce_response.lock().unwrap().clone()
        }
    }

    fn record(product_id: ProductId, quantity: i64) -> StockRecord {
        StockRecord {
            id: StockRecordId::new(),
            product_id,
            quantity,
        }
    }

    fn widget() -> NewProduct {
        NewProduct {
            name: "Widget".to_string(),
            description: String::new(),
            price: "9.99".parse().unwrap(),
        }
    }

    fn service(stock: Arc<MockStock>) -> ProductService {
        ProductService::new(Arc::new(InMemoryCatalogStore::new()), stock)
    }

    #[tokio::test]
    async fn create_product_dispatches_detached_stock_init() {
        let stock = Arc::new(MockStock::new());
        let svc = service(Arc::clone(&stock));

        let product = svc.create_product(widget()).await.unwrap();

        // The detached task is not awaited by the create path; poll for it.
        stock.wait_for_call(&StockCall::Create(product.id, 0)).await;
    }

    #[tokio::test]
    async fn create_product_succeeds_even_when_stock_init_fails() {
        let stock = Arc::new(MockStock::new());
        *stock.create_response.lock().unwrap() =
            Err(StockError::Unreachable("connect refused".into()));
        let svc = service(Arc::clone(&stock));

        let product = svc.create_product(widget()).await.unwrap();
        stock.wait_for_call(&StockCall::Create(product.id, 0)).await;

        // The failure is absorbed: the product is still readable with stock 0.
        let view = svc.get_product_with_stock(product.id).await.unwrap().unwrap();
        assert_eq!(view.quantity, 0);
    }

    #[tokio::test]
    async fn fresh_product_reads_quantity_zero() {
        let stock = Arc::new(MockStock::new());
        let svc = service(Arc::clone(&stock));

        let product = svc.create_product(widget()).await.unwrap();
        let view = svc.get_product_with_stock(product.id).await.unwrap().unwrap();
        assert_eq!(view.quantity, 0);
        assert_eq!(view.name, "Widget");
    }

    #[tokio::test]
    async fn missing_product_makes_no_stock_call() {
        let stock = Arc::new(MockStock::new());
        let svc = service(Arc::clone(&stock));

        let result = svc.get_product_with_stock(ProductId::new()).await.unwrap();
        assert!(result.is_none());
        assert!(stock.calls().is_empty());
    }

    #[tokio::test]
    async fn stock_error_degrades_to_quantity_zero() {
        let stock = Arc::new(MockStock::new());
        *stock.get_response.lock().unwrap() = Err(StockError::Timeout);
        let svc = service(Arc::clone(&stock));

        let product = svc.create_product(widget()).await.unwrap();
        let view = svc.get_product_with_stock(product.id).await.unwrap().unwrap();
        assert_eq!(view.quantity, 0);
    }

    #[tokio::test]
    async fn present_stock_record_is_reflected() {
        let stock = Arc::new(MockStock::new());
        let svc = service(Arc::clone(&stock));

        let product = svc.create_product(widget()).await.unwrap();
        *stock.get_response.lock().unwrap() = Ok(Some(record(product.id, 7)));

        let view = svc.get_product_with_stock(product.id).await.unwrap().unwrap();
        assert_eq!(view.quantity, 7);
    }

    #[tokio::test]
    async fn reduce_decrements_then_refetches() {
        let stock = Arc::new(MockStock::new());
        let svc = service(Arc::clone(&stock));

        let product = svc.create_product(widget()).await.unwrap();
        stock.wait_for_call(&StockCall::Create(product.id, 0)).await;

        *stock.reduce_response.lock().unwrap() = Ok(record(product.id, 6));
        *stock.get_response.lock().unwrap() = Ok(Some(record(product.id, 6)));

        let view = svc.reduce_stock(product.id, 4).await.unwrap();
        assert_eq!(view.quantity, 6);

        // Decrement strictly precedes the re-fetch.
        let calls = stock.calls();
        let reduce_pos = calls
            .iter()
            .position(|c| matches!(c, StockCall::Reduce(_, 4)))
            .unwrap();
        let get_pos = calls
            .iter()
            .position(|c| matches!(c, StockCall::Get(_)))
            .unwrap();
        assert!(reduce_pos < get_pos);
    }

    #[tokio::test]
    async fn insufficient_stock_propagates_and_skips_refetch() {
        let stock = Arc::new(MockStock::new());
        let svc = service(Arc::clone(&stock));

        let product = svc.create_product(widget()).await.unwrap();
        stock.wait_for_call(&StockCall::Create(product.id, 0)).await;
        *stock.reduce_response.lock().unwrap() =
            Err(StockError::InsufficientStock("have 0, requested 1".into()));

        let err = svc.reduce_stock(product.id, 1).await.unwrap_err();
        assert!(matches!(err, ServiceError::InsufficientStock(_)));

        // No combined view was assembled after the failure.
        assert!(!stock.calls().iter().any(|c| matches!(c, StockCall::Get(_))));
    }

    #[tokio::test]
    async fn reduce_on_absent_ledger_record_is_not_found() {
        let stock = Arc::new(MockStock::new());
        let svc = service(Arc::clone(&stock));

        let product = svc.create_product(widget()).await.unwrap();
        // Default reduce response is StockError::NotFound.
        let err = svc.reduce_stock(product.id, 1).await.unwrap_err();
        assert_eq!(err, ServiceError::NotFound);
    }

    #[tokio::test]
    async fn reduce_transport_failure_is_propagated_with_classification() {
        let stock = Arc::new(MockStock::new());
        let svc = service(Arc::clone(&stock));

        let product = svc.create_product(widget()).await.unwrap();
        *stock.reduce_response.lock().unwrap() = Err(StockError::Timeout);

        let err = svc.reduce_stock(product.id, 1).await.unwrap_err();
        assert_eq!(err, ServiceError::Stock(StockError::Timeout));
    }

    #[tokio::test]
    async fn reduce_rejects_negative_amounts_before_any_remote_call() {
        let stock = Arc::new(MockStock::new());
        let svc = service(Arc::clone(&stock));

        let err = svc.reduce_stock(ProductId::new(), -1).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(stock.calls().is_empty());
    }

    #[tokio::test]
    async fn update_and_delete_report_not_found_for_missing_products() {
        let stock = Arc::new(MockStock::new());
        let svc = service(Arc::clone(&stock));

        let err = svc
            .update_product(
                ProductId::new(),
                UpdateProduct {
                    name: "X".to_string(),
                    description: String::new(),
                    price: "1.00".parse().unwrap(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err, ServiceError::NotFound);

        let err = svc.delete_product(ProductId::new()).await.unwrap_err();
        assert_eq!(err, ServiceError::NotFound);
    }

    #[tokio::test]
    async fn update_does_not_touch_the_ledger() {
        let stock = Arc::new(MockStock::new());
        let svc = service(Arc::clone(&stock));

        let product = svc.create_product(widget()).await.unwrap();
        stock.wait_for_call(&StockCall::Create(product.id, 0)).await;
        let calls_before = stock.calls().len();

        let updated = svc
            .update_product(
                product.id,
                UpdateProduct {
                    name: "Widget Mk2".to_string(),
                    description: String::new(),
                    price: "12.50".parse().unwrap(),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Widget Mk2");
        assert_eq!(stock.calls().len(), calls_before);
    }

    #[tokio::test]
    async fn delete_removes_only_the_catalog_row() {
        let stock = Arc::new(MockStock::new());
        let svc = service(Arc::clone(&stock));

        let product = svc.create_product(widget()).await.unwrap();
        stock.wait_for_call(&StockCall::Create(product.id, 0)).await;
        let calls_before = stock.calls().len();

        svc.delete_product(product.id).await.unwrap();
        assert_eq!(svc.get_product(product.id).await.unwrap(), None);
        // No ledger delete or zeroing was attempted.
        assert_eq!(stock.calls().len(), calls_before);
    }
}
