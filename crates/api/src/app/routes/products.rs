use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};

use stockbridge_core::PageRequest;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", axum::routing::post(create_product).get(list_products))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/:id/with-stock", get(get_product_with_stock))
        .route("/:id/reduce-stock/:amount", put(reduce_stock))
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateProductRequest>,
) -> axum::response::Response {
    match services.products.create_product(body.into()).await {
        Ok(product) => {
            (StatusCode::CREATED, Json(dto::product_to_json(product))).into_response()
        }
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match errors::parse_product_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.products.get_product(id).await {
        Ok(Some(product)) => (StatusCode::OK, Json(dto::product_to_json(product))).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_product_with_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match errors::parse_product_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.products.get_product_with_stock(id).await {
        Ok(Some(view)) => {
            (StatusCode::OK, Json(dto::product_with_stock_to_json(view))).into_response()
        }
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::ListParams>,
) -> axum::response::Response {
    let defaults = PageRequest::default();
    let page = PageRequest::new(
        params.page.unwrap_or(defaults.page),
        params.size.unwrap_or(defaults.size),
    );
    match services.products.list_products(page).await {
        Ok(page) => (StatusCode::OK, Json(dto::page_to_json(page))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateProductRequest>,
) -> axum::response::Response {
    let id = match errors::parse_product_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.products.update_product(id, body.into()).await {
        Ok(product) => (StatusCode::OK, Json(dto::product_to_json(product))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match errors::parse_product_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.products.delete_product(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn reduce_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Path((id, amount)): Path<(String, i64)>,
) -> axum::response::Response {
    let id = match errors::parse_product_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.products.reduce_stock(id, amount).await {
        Ok(view) => (StatusCode::OK, Json(dto::product_with_stock_to_json(view))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
