use reqwest::{header, Client};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use serde::de::DeserializeOwned;

use super::{CompanyInfo, PricePoint, StockClient, StockError};
use crate::types::StockApiConfig;

/// Maximum number of idle connections to maintain per host
const MAX_IDLE_CONNECTIONS_PER_HOST: usize = 10;

/// HTTP client for the stock data provider
///
/// Provider contract:
/// - `GET {base}/companies` returns the full listing
/// - `GET {base}/companies/{companyID}/prices?days=N` returns daily OHLCV rows
pub struct HttpStockClient {
    base_url: String,
    api_key: Option<String>,
    http_client: ClientWithMiddleware,
}

impl HttpStockClient {
    /// Creates a new stock provider client
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built
    pub fn new(config: &StockApiConfig) -> Result<Self, StockError> {
        let reqwest_client = Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(MAX_IDLE_CONNECTIONS_PER_HOST)
            .build()
            .map_err(|e| StockError::Network(format!("Failed to create HTTP client: {e}")))?;

        let http_client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        Ok(Self {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            http_client,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, StockError> {
        let url = format!("{}{path}", self.base_url);
        let mut request = self
            .http_client
            .get(url)
            .header(header::ACCEPT, "application/json");
        if let Some(api_key) = &self.api_key {
            request = request.header("X-API-Key", api_key.as_str());
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(StockError::Http {
                status: status.as_u16(),
                body,
            });
        }

        response.json::<T>().await.map_err(|e| StockError::Decode(e.to_string()))
    }
}

#[async_trait::async_trait]
impl StockClient for HttpStockClient {
    async fn companies(&self) -> Result<Vec<CompanyInfo>, StockError> {
        let companies: Vec<CompanyInfo> = self.get_json("/companies").await?;
        tracing::debug!(count = companies.len(), "Fetched company listing");
        Ok(companies)
    }

    async fn price_history(&self, company_id: u64, days: u32) -> Result<Vec<PricePoint>, StockError> {
        self.get_json(&format!("/companies/{company_id}/prices?days={days}"))
            .await
    }
}
