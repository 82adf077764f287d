//! HTTP implementation of the stock gateway.
//!
//! Wire contract (stock ledger service):
//! - `POST {base}/stock` with `{"productId", "quantity"}` → record (upsert)
//! - `GET {base}/stock/{productId}` → record | 404
//! - `PUT {base}/stock/{productId}/reduce/{amount}` → record | 400 | 404
//!
//! Every request carries the shared-secret `X-API-Key` header and is bounded
//! by a per-attempt timeout; transient failures go through `with_retry`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use stockbridge_core::ProductId;

use crate::gateway::{StockError, StockGateway};
use crate::record::{StockRecord, StockUpsert};
use crate::retry::{RetryPolicy, with_retry};

/// Header carrying the shared secret expected by the ledger service.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Configuration for `HttpStockClient`.
#[derive(Debug, Clone)]
pub struct StockClientConfig {
    /// Ledger base URL, e.g. `http://inventory:8081/api`.
    pub base_url: String,
    /// Shared secret sent on every request.
    pub api_key: String,
    /// Hard deadline per attempt.
    pub attempt_timeout: Duration,
    /// Retry policy for transient failures on reads and decrements.
    pub retry: RetryPolicy,
}

impl StockClientConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            attempt_timeout: Duration::from_secs(3),
            retry: RetryPolicy::default(),
        }
    }
}

/// Reqwest-backed stock ledger client.
pub struct HttpStockClient {
    http: reqwest::Client,
    config: StockClientConfig,
}

impl HttpStockClient {
    pub fn new(config: StockClientConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.attempt_timeout)
            .build()?;
        Ok(Self { http, config })
    }

    fn stock_url(&self) -> String {
        format!("{}/stock", self.config.base_url.trim_end_matches('/'))
    }

    /// Decode a ledger response, classifying non-success statuses.
    async fn decode_record(res: reqwest::Response) -> Result<StockRecord, StockError> {
        let status = res.status();
        if status.is_success() {
            return res.json::<StockRecord>().await.map_err(|e| StockError::Unexpected {
                status: status.as_u16(),
                detail: format!("invalid response body: {e}"),
            });
        }

        let detail = res.text().await.unwrap_or_default();
        match status {
            StatusCode::NOT_FOUND => Err(StockError::NotFound),
            // The ledger's only 400 is the decrement business rule.
            StatusCode::BAD_REQUEST => Err(StockError::InsufficientStock(detail)),
            _ => Err(StockError::Unexpected {
                status: status.as_u16(),
                detail,
            }),
        }
    }
}

/// Classify a transport-level reqwest failure.
fn classify_transport(err: reqwest::Error) -> StockError {
    if err.is_timeout() {
        StockError::Timeout
    } else {
        StockError::Unreachable(err.to_string())
    }
}

#[async_trait]
impl StockGateway for HttpStockClient {
    async fn create_stock(
        &self,
        product_id: ProductId,
        initial_quantity: i64,
    ) -> Result<StockRecord, StockError> {
        let url = self.stock_url();
        let body = StockUpsert {
            product_id,
            quantity: initial_quantity,
        };

        // Single attempt: the upsert is best-effort and its caller only logs
        // the outcome, so retries would add nothing but ledger load.
        with_retry(&RetryPolicy::none(), "create_stock", || {
            let req = self
                .http
                .post(&url)
                .header(API_KEY_HEADER, &self.config.api_key)
                .json(&body);
            async move {
                let res = req.send().await.map_err(classify_transport)?;
                Self::decode_record(res).await
            }
        })
        .await
    }

    async fn get_stock(&self, product_id: ProductId) -> Result<Option<StockRecord>, StockError> {
        let url = format!("{}/{}", self.stock_url(), product_id);

        with_retry(&self.config.retry, "get_stock", || {
            let req = self
                .http
                .get(&url)
                .header(API_KEY_HEADER, &self.config.api_key);
            async move {
                let res = req.send().await.map_err(classify_transport)?;
                if res.status() == StatusCode::NOT_FOUND {
                    return Ok(None);
                }
                Ok(Some(Self::decode_record(res).await?))
            }
        })
        .await
    }

    async fn reduce_stock(
        &self,
        product_id: ProductId,
        amount: i64,
    ) -> Result<StockRecord, StockError> {
        let url = format!("{}/{}/reduce/{}", self.stock_url(), product_id, amount);

        with_retry(&self.config.retry, "reduce_stock", || {
            let req = self
                .http
                .put(&url)
                .header(API_KEY_HEADER, &self.config.api_key);
            async move {
                let res = req.send().await.map_err(classify_transport)?;
                Self::decode_record(res).await
            }
        })
        .await
    }
}
