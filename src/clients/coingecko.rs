// CoinGecko REST client for current prices and the coin listing

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::catalog::Asset;
use crate::config::ApiConfig;
use crate::core::scheduler::PriceSource;
use crate::error::{TrackerError, TrackerResult};

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com";

#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    client: reqwest::Client,
    base_url: String,
}

impl CoinGeckoClient {
    pub fn new(config: &ApiConfig) -> TrackerResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| TrackerError::Internal(format!("HTTP client init failed: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Client against a non-default endpoint (mock servers in tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Current price of one asset in one quote currency.
    ///
    /// A non-200 response or a body without the asset/currency key both
    /// mean the price is unavailable this round.
    pub async fn simple_price(&self, asset_id: &str, vs_currency: &str) -> Result<f64, ApiError> {
        let url = format!("{}/api/v3/simple/price", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("ids", asset_id), ("vs_currencies", vs_currency)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::Http(response.status().as_u16()));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        body[asset_id][vs_currency]
            .as_f64()
            .ok_or_else(|| ApiError::PriceUnavailable {
                asset_id: asset_id.to_string(),
                vs_currency: vs_currency.to_string(),
            })
    }

    /// Full coin listing: id, symbol and name per entry.
    pub async fn coins_list(&self) -> Result<Vec<Asset>, ApiError> {
        let url = format!("{}/api/v3/coins/list", self.base_url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(ApiError::Http(response.status().as_u16()));
        }

        response
            .json::<Vec<Asset>>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[async_trait]
impl PriceSource for CoinGeckoClient {
    async fn current_price(&self, asset_id: &str, vs_currency: &str) -> TrackerResult<f64> {
        Ok(self.simple_price(asset_id, vs_currency).await?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("HTTP error: {0}")]
    Http(u16),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("no {vs_currency} price for {asset_id} in response")]
    PriceUnavailable {
        asset_id: String,
        vs_currency: String,
    },
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout(err.to_string())
        } else if err.is_status() {
            ApiError::Http(err.status().map(|s| s.as_u16()).unwrap_or(0))
        } else {
            ApiError::Network(err.to_string())
        }
    }
}
