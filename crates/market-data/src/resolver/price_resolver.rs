//! Price resolver: runs the resolution strategies in a fixed order.
//!
//! Strategies, in order:
//! 1. Discovery: all pairs for the token, best pair by liquidity
//! 2. Explicit pair: lookup of the configured pair address
//! 3. Price-only fallbacks, in priority order
//!
//! Each strategy is a step from the current partial state to the next one.
//! Once a USD price is accepted the remaining strategies are recorded as
//! skipped without any network call. Statistics gathered by earlier
//! strategies stay attached to the final result.

use std::borrow::Cow;
use std::sync::Arc;

use log::{debug, info, warn};

use super::state::ResolutionState;
use crate::config::PricingConfig;
use crate::errors::MarketDataError;
use crate::models::{
    AttemptStatus, PriceResult, ProviderOutcome, ProviderRequest, SkipReason, Strategy,
};
use crate::provider::dexscreener::{DexScreenerPairProvider, DexScreenerProvider};
use crate::provider::geckoterminal::GeckoTerminalProvider;
use crate::provider::pancakeswap::PancakeSwapProvider;
use crate::provider::MarketDataProvider;

/// Resolves a USD price and market statistics for a token.
///
/// Holds no per-request state; one resolver can serve concurrent requests.
pub struct PriceResolver {
    discovery: Arc<dyn MarketDataProvider>,
    lookup: Option<Arc<dyn MarketDataProvider>>,
    fallbacks: Vec<Arc<dyn MarketDataProvider>>,
}

impl PriceResolver {
    /// Create a resolver from explicit providers.
    ///
    /// # Arguments
    ///
    /// * `discovery` - Pair-discovery provider queried first
    /// * `lookup` - Pair-lookup provider for the explicit-pair strategy
    /// * `fallbacks` - Price-only providers, highest priority first
    pub fn new(
        discovery: Arc<dyn MarketDataProvider>,
        lookup: Option<Arc<dyn MarketDataProvider>>,
        fallbacks: Vec<Arc<dyn MarketDataProvider>>,
    ) -> Self {
        Self {
            discovery,
            lookup,
            fallbacks,
        }
    }

    /// DexScreener discovery and lookup, then PancakeSwap and GeckoTerminal.
    pub fn with_default_providers(config: &PricingConfig) -> Self {
        let timeout = config.request_timeout;
        Self::new(
            Arc::new(DexScreenerProvider::new(timeout)),
            Some(Arc::new(DexScreenerPairProvider::new(timeout))),
            vec![
                Arc::new(PancakeSwapProvider::new(timeout)),
                Arc::new(GeckoTerminalProvider::new(timeout)),
            ],
        )
    }

    /// The strategies in execution order.
    fn plan(&self) -> Vec<Strategy> {
        let mut plan = vec![Strategy::Discovery, Strategy::ExplicitPair];
        plan.extend((0..self.fallbacks.len()).map(Strategy::PriceOnly));
        plan
    }

    fn provider_for(&self, strategy: Strategy) -> Option<&Arc<dyn MarketDataProvider>> {
        match strategy {
            Strategy::Discovery => Some(&self.discovery),
            Strategy::ExplicitPair => self.lookup.as_ref(),
            Strategy::PriceOnly(index) => self.fallbacks.get(index),
        }
    }

    /// Resolve the price for `config.token_address`.
    ///
    /// Never fails: when no strategy yields a price the result has
    /// `usd_price == None` and the diagnostics explain why.
    pub async fn resolve(&self, config: &PricingConfig) -> PriceResult {
        let mut state = ResolutionState::default();

        for strategy in self.plan() {
            state = self.step(config, strategy, state).await;
        }

        let mut result = state.into_result(&config.token_address);
        result.native_price = result.derive_native_price(&config.wrapped_native_address);

        match (result.usd_price, &result.source) {
            (Some(price), Some(source)) => info!(
                "Resolved {} at ${} via '{}'",
                config.token_address, price, source
            ),
            _ => warn!(
                "No USD price for {}: {}",
                config.token_address,
                result.diagnostics.summary()
            ),
        }

        result
    }

    async fn step(
        &self,
        config: &PricingConfig,
        strategy: Strategy,
        mut state: ResolutionState,
    ) -> ResolutionState {
        let provider = self.provider_for(strategy);
        let provider_id = provider.map(|p| Cow::Borrowed(p.id()));

        if state.has_price() {
            state
                .diagnostics
                .record_skip(strategy, provider_id, SkipReason::PriceAlreadyAccepted);
            return state;
        }

        let pair_address = config.pair_address.as_deref();
        let provider = match (strategy, provider, pair_address) {
            (Strategy::ExplicitPair, _, None) | (_, None, _) => {
                state
                    .diagnostics
                    .record_skip(strategy, provider_id, SkipReason::NotConfigured);
                return state;
            }
            (_, Some(provider), _) => provider,
        };

        let request = ProviderRequest {
            token_address: &config.token_address,
            pair_address,
            chain_id: &config.chain_id,
        };

        debug!("Running {} strategy with '{}'", strategy, provider.id());
        let outcome = self.call(config, provider.as_ref(), &request).await;
        let status = Self::apply(&mut state, strategy, provider.id(), &config.token_address, outcome);
        debug!("{} strategy with '{}': {}", strategy, provider.id(), status);

        state.record(strategy, provider.id(), status);
        state
    }

    /// Call a provider under the configured timeout.
    async fn call(
        &self,
        config: &PricingConfig,
        provider: &dyn MarketDataProvider,
        request: &ProviderRequest<'_>,
    ) -> ProviderOutcome {
        match tokio::time::timeout(config.request_timeout, provider.fetch(request)).await {
            Ok(outcome) => outcome,
            Err(_) => ProviderOutcome::unavailable(&MarketDataError::Timeout {
                provider: provider.id().to_string(),
            }),
        }
    }

    /// Fold one provider outcome into the state.
    fn apply(
        state: &mut ResolutionState,
        strategy: Strategy,
        provider: &'static str,
        token: &str,
        outcome: ProviderOutcome,
    ) -> AttemptStatus {
        match (strategy, outcome) {
            (_, ProviderOutcome::Unavailable(reason)) => AttemptStatus::Unavailable { reason },
            (_, ProviderOutcome::PriceOnly(price)) => state.offer_price(provider, price),
            (Strategy::PriceOnly(_), ProviderOutcome::Pairs(_)) => AttemptStatus::UnexpectedOutcome,
            (Strategy::Discovery | Strategy::ExplicitPair, ProviderOutcome::Pairs(pairs)) => {
                state.offer_pairs(provider, token, &pairs)
            }
        }
    }
}
