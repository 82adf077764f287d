//! Consistent error responses.
//!
//! The single mapping from the service error taxonomy to client-visible
//! statuses; handlers never choose statuses themselves.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use stockbridge_catalog::ServiceError;
use stockbridge_core::ProductId;
use stockbridge_stock::StockError;

pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match err {
        ServiceError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
        ServiceError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        ServiceError::InsufficientStock(detail) => {
            let message = if detail.is_empty() {
                "insufficient stock".to_string()
            } else {
                detail
            };
            json_error(StatusCode::BAD_REQUEST, "insufficient_stock", message)
        }
        ServiceError::Stock(e @ (StockError::Unreachable(_) | StockError::Timeout)) => {
            json_error(StatusCode::BAD_GATEWAY, "stock_unavailable", e.to_string())
        }
        ServiceError::Stock(e) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "stock_error", e.to_string())
        }
        ServiceError::Store(e) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", e.to_string())
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Parse a path id, mapping failure to the uniform 400 response.
pub fn parse_product_id(s: &str) -> Result<ProductId, axum::response::Response> {
    s.parse().map_err(|_| {
        json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id")
    })
}
