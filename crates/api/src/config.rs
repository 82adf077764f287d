//! Process configuration from environment variables.

/// Runtime configuration for the API process.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: String,
    /// Base URL of the stock ledger service.
    pub stock_service_url: String,
    /// Shared secret sent to the ledger on every call.
    pub stock_api_key: String,
}

impl ApiConfig {
    /// Read configuration from the environment, falling back to logged dev
    /// defaults.
    pub fn from_env() -> Self {
        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let stock_service_url = std::env::var("STOCK_SERVICE_URL").unwrap_or_else(|_| {
            tracing::warn!("STOCK_SERVICE_URL not set; using dev default");
            "http://127.0.0.1:8081/api".to_string()
        });

        let stock_api_key = std::env::var("STOCK_API_KEY").unwrap_or_else(|_| {
            tracing::warn!("STOCK_API_KEY not set; using insecure dev default");
            "dev-api-key".to_string()
        });

        Self {
            bind_addr,
            stock_service_url,
            stock_api_key,
        }
    }
}
