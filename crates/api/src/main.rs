use std::sync::Arc;

use anyhow::Context;

use stockbridge_api::app::{self, services::AppServices};
use stockbridge_api::config::ApiConfig;
use stockbridge_catalog::InMemoryCatalogStore;
use stockbridge_stock::{HttpStockClient, StockClientConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stockbridge_observability::init();

    let config = ApiConfig::from_env();

    let stock_client = HttpStockClient::new(StockClientConfig::new(
        config.stock_service_url.clone(),
        config.stock_api_key.clone(),
    ))
    .context("failed to build stock client")?;

    let services = Arc::new(AppServices::new(
        Arc::new(InMemoryCatalogStore::new()),
        Arc::new(stock_client),
    ));

    let app = app::build_app(services);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
