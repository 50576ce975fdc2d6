//! GeckoTerminal adapter.
//!
//! Price-only fallback: `/api/v2/networks/{network}/tokens/{token}` returns
//! `data.attributes.price_usd`.
//!
//! API documentation: https://www.geckoterminal.com/dex-api

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::config::DEFAULT_REQUEST_TIMEOUT;
use crate::errors::MarketDataError;
use crate::models::{ProviderKind, ProviderOutcome, ProviderRequest};
use crate::numeric::de_positive_f64;
use crate::provider::{build_client, get_json, MarketDataProvider};

const BASE_URL: &str = "https://api.geckoterminal.com";
const PROVIDER_ID: &str = "GECKOTERMINAL";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    data: Option<TokenData>,
}

#[derive(Debug, Deserialize)]
struct TokenData {
    #[serde(default)]
    attributes: Option<TokenAttributes>,
}

#[derive(Debug, Deserialize)]
struct TokenAttributes {
    #[serde(default, deserialize_with = "de_positive_f64")]
    price_usd: Option<f64>,
}

/// Price-only provider backed by GeckoTerminal.
pub struct GeckoTerminalProvider {
    client: Client,
    base_url: String,
}

impl GeckoTerminalProvider {
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

    fn url(&self, network: &str, token_address: &str) -> String {
        format!(
            "{}/api/v2/networks/{}/tokens/{}",
            self.base_url, network, token_address
        )
    }

    async fn fetch_price(
        &self,
        request: &ProviderRequest<'_>,
    ) -> Result<ProviderOutcome, MarketDataError> {
        let url = self.url(request.chain_id, request.token_address);
        let response: TokenResponse = get_json(&self.client, PROVIDER_ID, &url).await?;
        extract_price(response).map(ProviderOutcome::PriceOnly)
    }
}

fn extract_price(response: TokenResponse) -> Result<f64, MarketDataError> {
    response
        .data
        .and_then(|d| d.attributes)
        .and_then(|a| a.price_usd)
        .ok_or_else(|| MarketDataError::InvalidData {
            provider: PROVIDER_ID.to_string(),
            message: "missing or non-positive data.attributes.price_usd".to_string(),
        })
}

impl Default for GeckoTerminalProvider {
    fn default() -> Self {
        Self::new(DEFAULT_REQUEST_TIMEOUT)
    }
}

#[async_trait]
impl MarketDataProvider for GeckoTerminalProvider {
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
