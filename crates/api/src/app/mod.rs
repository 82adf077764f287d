//! HTTP API application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: dependency wiring (catalog store + stock gateway)
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request DTOs and JSON mapping helpers
//! - `errors.rs`: the one place service errors become HTTP responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
pub fn build_app(services: Arc<services::AppServices>) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/products", routes::products::router())
        .layer(Extension(services))
}
