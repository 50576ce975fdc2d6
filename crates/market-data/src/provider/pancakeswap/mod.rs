//! PancakeSwap Info adapter.
//!
//! Price-only fallback: `/api/v2/tokens/{token}` returns the token's USD
//! price (and its BNB price) with no pool statistics.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::config::DEFAULT_REQUEST_TIMEOUT;
use crate::errors::MarketDataError;
use crate::models::{ProviderKind, ProviderOutcome, ProviderRequest};
use crate::numeric::de_positive_f64;
use crate::provider::{build_client, get_json, MarketDataProvider};

const BASE_URL: &str = "https://api.pancakeswap.info";
const PROVIDER_ID: &str = "PANCAKESWAP";

/// Response from /api/v2/tokens/{token}
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    data: Option<TokenData>,
}

#[derive(Debug, Deserialize)]
struct TokenData {
    /// USD price as a decimal string
    #[serde(default, deserialize_with = "de_positive_f64")]
    price: Option<f64>,
}

/// Price-only provider backed by the PancakeSwap Info API.
pub struct PancakeSwapProvider {
    client: Client,
    base_url: String,
}

impl PancakeSwapProvider {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: build_client(timeout),
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn url(&self, token_address: &str) -> String {
        format!("{}/api/v2/tokens/{}", self.base_url, token_address)
    }

    async fn fetch_price(
        &self,
        request: &ProviderRequest<'_>,
    ) -> Result<ProviderOutcome, MarketDataError> {
        let response: TokenResponse =
            get_json(&self.client, PROVIDER_ID, &self.url(request.token_address)).await?;
        extract_price(response).map(ProviderOutcome::PriceOnly)
    }
}

fn extract_price(response: TokenResponse) -> Result<f64, MarketDataError> {
    response
        .data
        .and_then(|d| d.price)
        .ok_or_else(|| MarketDataError::InvalidData {
            provider: PROVIDER_ID.to_string(),
            message: "missing or non-positive data.price".to_string(),
        })
}

impl Default for PancakeSwapProvider {
    fn default() -> Self {
        Self::new(DEFAULT_REQUEST_TIMEOUT)
    }
}

#[async_trait]
impl MarketDataProvider for PancakeSwapProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::PriceOnly
    }

    async fn fetch(&self, request: &ProviderRequest<'_>) -> ProviderOutcome {
        self.fetch_price(request).await.into()
    }
}
