//! DexScreener adapters.
//!
//! Two adapters share the same response shape:
//! - [`DexScreenerProvider`] discovers every pair for a token
//!   (`/latest/dex/tokens/{token}`)
//! - [`DexScreenerPairProvider`] looks up one known pair
//!   (`/latest/dex/pairs/{chain}/{pair}`)
//!
//! API documentation: https://docs.dexscreener.com/api/reference

mod models;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use self::models::PairsResponse;
use crate::config::DEFAULT_REQUEST_TIMEOUT;
use crate::errors::MarketDataError;
use crate::models::{ProviderKind, ProviderOutcome, ProviderRequest, TradingPair};
use crate::provider::{build_client, get_json, MarketDataProvider};

const BASE_URL: &str = "https://api.dexscreener.com";
const PROVIDER_ID: &str = "DEXSCREENER";
const PAIR_PROVIDER_ID: &str = "DEXSCREENER_PAIR";

/// Keep pairs on the target chain that actually contain the token.
fn eligible_pairs(response: PairsResponse, request: &ProviderRequest<'_>) -> Vec<TradingPair> {
    response
        .into_pairs()
        .into_iter()
        .filter_map(|p| p.into_trading_pair())
        .filter(|p| p.chain_id.eq_ignore_ascii_case(request.chain_id))
        .filter(|p| p.orientation(request.token_address).is_some())
        .collect()
}

// ============================================================================
// Pair discovery
// ============================================================================

/// Pair-discovery provider backed by DexScreener's token endpoint.
pub struct DexScreenerProvider {
    client: Client,
    base_url: String,
}

impl DexScreenerProvider {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: build_client(timeout),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the adapter at another host (mirrors, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn url(&self, token_address: &str) -> String {
        format!("{}/latest/dex/tokens/{}", self.base_url, token_address)
    }

    async fn fetch_pairs(
        &self,
        request: &ProviderRequest<'_>,
    ) -> Result<ProviderOutcome, MarketDataError> {
        let response: PairsResponse =
            get_json(&self.client, PROVIDER_ID, &self.url(request.token_address)).await?;

        let pairs = eligible_pairs(response, request);
        debug!(
            "DexScreener returned {} eligible pairs on '{}'",
            pairs.len(),
            request.chain_id
        );
        Ok(ProviderOutcome::Pairs(pairs))
    }
}

impl Default for DexScreenerProvider {
    fn default() -> Self {
        Self::new(DEFAULT_REQUEST_TIMEOUT)
    }
}

#[async_trait]
impl MarketDataProvider for DexScreenerProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Discovery
    }

    async fn fetch(&self, request: &ProviderRequest<'_>) -> ProviderOutcome {
        self.fetch_pairs(request).await.into()
    }
}

// ============================================================================
// Pair lookup
// ============================================================================

/// Pair-lookup provider backed by DexScreener's pair endpoint.
pub struct DexScreenerPairProvider {
    client: Client,
    base_url: String,
}

impl DexScreenerPairProvider {
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

    fn url(&self, chain_id: &str, pair_address: &str) -> String {
        format!(
            "{}/latest/dex/pairs/{}/{}",
            self.base_url, chain_id, pair_address
        )
    }

    async fn fetch_pair(
        &self,
        request: &ProviderRequest<'_>,
    ) -> Result<ProviderOutcome, MarketDataError> {
        let pair_address = request
            .pair_address
            .ok_or_else(|| MarketDataError::InvalidData {
                provider: PAIR_PROVIDER_ID.to_string(),
                message: "no pair address".to_string(),
            })?;

        let response: PairsResponse = get_json(
            &self.client,
            PAIR_PROVIDER_ID,
            &self.url(request.chain_id, pair_address),
        )
        .await?;

        let pair = eligible_pairs(response, request)
            .into_iter()
            .find(|p| p.pair_address.eq_ignore_ascii_case(pair_address))
            .ok_or_else(|| MarketDataError::NoPairs {
                provider: PAIR_PROVIDER_ID.to_string(),
            })?;

        Ok(ProviderOutcome::Pairs(vec![pair]))
    }
}

impl Default for DexScreenerPairProvider {
    fn default() -> Self {
        Self::new(DEFAULT_REQUEST_TIMEOUT)
    }
}

#[async_trait]
impl MarketDataProvider for DexScreenerPairProvider {
    fn id(&self) -> &'static str {
        PAIR_PROVIDER_ID
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Lookup
    }

    async fn fetch(&self, request: &ProviderRequest<'_>) -> ProviderOutcome {
        self.fetch_pair(request).await.into()
    }
}
