use std::borrow::Cow;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use pricebot_market_data::format::{format_quantity, format_usd};
use pricebot_market_data::{
    AttemptStatus, MarketDataProvider, PriceResolver, PricingConfig, ProviderKind,
    ProviderOutcome, ProviderRequest, SkipReason, Strategy, TokenRef, TradingPair,
};

const TOKEN: &str = "0x1111111111111111111111111111111111111111";
const WBNB: &str = "0xbb4cdb9cbd36b01bd1cbaebf2de08d9173bc095c";
const PAIR: &str = "0x2222222222222222222222222222222222222222";

/// Provider that answers with a fixed outcome and counts its calls.
struct ScriptedProvider {
    id: &'static str,
    kind: ProviderKind,
    outcome: ProviderOutcome,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    fn new(id: &'static str, kind: ProviderKind, outcome: ProviderOutcome) -> Arc<Self> {
        Arc::new(Self {
            id,
            kind,
            outcome,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketDataProvider for ScriptedProvider {
    fn id(&self) -> &'static str {
        self.id
    }

    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn fetch(&self, request: &ProviderRequest<'_>) -> ProviderOutcome {
        assert_eq!(request.token_address, TOKEN);
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

fn bsc_pair(address: &str, liquidity: f64, price_in_quote: f64, price_usd: Option<f64>) -> TradingPair {
    TradingPair {
        pair_address: address.to_string(),
        chain_id: Cow::Borrowed("bsc"),
        dex_id: Some("pancakeswap".to_string()),
        base_token: TokenRef::new(TOKEN).with_symbol("LABV2"),
        quote_token: TokenRef::new(WBNB).with_symbol("WBNB"),
        price_in_quote: Some(price_in_quote),
        price_usd,
        liquidity_usd: Some(liquidity),
        volume_24h_usd: Some(12_000.0),
        price_change_24h: Some(-2.5),
        fdv_usd: Some(1_230_000.0),
        ..Default::default()
    }
}

fn unavailable(reason: &str) -> ProviderOutcome {
    ProviderOutcome::Unavailable(reason.to_string())
}

#[tokio::test]
async fn scenario_a_discovery_price_is_accepted_directly() {
    let discovery = ScriptedProvider::new(
        "DEXSCREENER",
        ProviderKind::Discovery,
        ProviderOutcome::Pairs(vec![bsc_pair(PAIR, 50_000.0, 0.000000002, Some(0.00000123))]),
    );
    let lookup = ScriptedProvider::new("DEXSCREENER_PAIR", ProviderKind::Lookup, unavailable("x"));
    let first = ScriptedProvider::new("PANCAKESWAP", ProviderKind::PriceOnly, unavailable("x"));
    let second = ScriptedProvider::new("GECKOTERMINAL", ProviderKind::PriceOnly, unavailable("x"));

    let resolver = PriceResolver::new(
        discovery.clone(),
        Some(lookup.clone()),
        vec![first.clone(), second.clone()],
    );
    let config = PricingConfig::new(TOKEN).with_pair_address(Some(PAIR));
    let result = resolver.resolve(&config).await;

    assert_eq!(result.usd_price, Some(0.00000123));
    assert_eq!(result.source.as_deref(), Some("DEXSCREENER"));
    assert_eq!(format_usd(result.usd_price), "$0.00000123");
    assert_eq!(
        result.representative_pair.as_ref().map(|p| p.pair_address.as_str()),
        Some(PAIR)
    );

    assert_eq!(discovery.calls(), 1);
    assert_eq!(lookup.calls(), 0);
    assert_eq!(first.calls(), 0);
    assert_eq!(second.calls(), 0);

    for strategy in [Strategy::ExplicitPair, Strategy::PriceOnly(0), Strategy::PriceOnly(1)] {
        assert_eq!(
            result.diagnostics.attempt(strategy).map(|a| &a.status),
            Some(&AttemptStatus::Skipped(SkipReason::PriceAlreadyAccepted))
        );
    }

    // 1 / 0.00000123 tokens per dollar
    assert_eq!(format_quantity(result.tokens_per_usd(1.0)), "813,008");
}

#[tokio::test]
async fn scenario_b_total_failure_keeps_diagnostics() {
    let discovery = ScriptedProvider::new(
        "DEXSCREENER",
        ProviderKind::Discovery,
        unavailable("HTTP 502: DEXSCREENER - Bad Gateway"),
    );
    let lookup = ScriptedProvider::new(
        "DEXSCREENER_PAIR",
        ProviderKind::Lookup,
        ProviderOutcome::Pairs(vec![bsc_pair(PAIR, 800.0, 2.0, None)]),
    );
    let first = ScriptedProvider::new(
        "PANCAKESWAP",
        ProviderKind::PriceOnly,
        unavailable("Timeout: PANCAKESWAP"),
    );
    let second = ScriptedProvider::new(
        "GECKOTERMINAL",
        ProviderKind::PriceOnly,
        unavailable("HTTP 429: GECKOTERMINAL - Too Many Requests"),
    );

    let resolver = PriceResolver::new(
        discovery.clone(),
        Some(lookup.clone()),
        vec![first.clone(), second.clone()],
    );
    let config = PricingConfig::new(TOKEN).with_pair_address(Some(PAIR));
    let result = resolver.resolve(&config).await;

    assert!(!result.is_resolved());
    assert_eq!(result.usd_price, None);
    assert_eq!(result.native_price, None);
    assert_eq!(result.source, None);
    assert_eq!(result.tokens_per_usd(1.0), None);

    // The looked-up pair still supplies statistics.
    assert_eq!(result.liquidity_usd(), Some(800.0));

    // One entry per strategy; the three unavailable providers are the failures.
    assert_eq!(result.diagnostics.len(), 4);
    let failed: Vec<_> = result
        .diagnostics
        .failures()
        .map(|a| a.provider_id.as_deref().unwrap_or_default().to_string())
        .collect();
    assert_eq!(failed, vec!["DEXSCREENER", "PANCAKESWAP", "GECKOTERMINAL"]);
    assert_eq!(
        result.diagnostics.attempt(Strategy::ExplicitPair).map(|a| &a.status),
        Some(&AttemptStatus::PairsWithoutPrice { pairs: 1 })
    );

    assert_eq!(
        (discovery.calls(), lookup.calls(), first.calls(), second.calls()),
        (1, 1, 1, 1)
    );
}

#[tokio::test]
async fn scenario_c_fallback_price_with_discovery_statistics() {
    let discovery = ScriptedProvider::new(
        "DEXSCREENER",
        ProviderKind::Discovery,
        ProviderOutcome::Pairs(vec![
            bsc_pair("0xshallow", 1_000.0, 0.0001, None),
            bsc_pair("0xdeep", 90_000.0, 0.0001, None),
        ]),
    );
    let first = ScriptedProvider::new(
        "PANCAKESWAP",
        ProviderKind::PriceOnly,
        unavailable("HTTP 404: PANCAKESWAP - Not Found"),
    );
    let second = ScriptedProvider::new(
        "GECKOTERMINAL",
        ProviderKind::PriceOnly,
        ProviderOutcome::PriceOnly(0.05),
    );

    let resolver = PriceResolver::new(
        discovery,
        Some(ScriptedProvider::new(
            "DEXSCREENER_PAIR",
            ProviderKind::Lookup,
            unavailable("x"),
        )),
        vec![first, second],
    );
    let result = resolver.resolve(&PricingConfig::new(TOKEN)).await;

    assert_eq!(result.usd_price, Some(0.05));
    assert_eq!(result.source.as_deref(), Some("GECKOTERMINAL"));
    assert_eq!(
        result.representative_pair.as_ref().map(|p| p.pair_address.as_str()),
        Some("0xdeep")
    );
    assert_eq!(result.liquidity_usd(), Some(90_000.0));
    assert_eq!(result.tokens_per_usd(100.0), Some(100.0 / 0.05));

    let statuses: Vec<_> = result
        .diagnostics
        .attempts
        .iter()
        .map(|a| a.status.clone())
        .collect();
    assert_eq!(
        statuses,
        vec![
            AttemptStatus::PairsWithoutPrice { pairs: 2 },
            AttemptStatus::Skipped(SkipReason::NotConfigured),
            AttemptStatus::Unavailable {
                reason: "HTTP 404: PANCAKESWAP - Not Found".to_string()
            },
            AttemptStatus::Accepted { price: 0.05 },
        ]
    );
}

#[tokio::test]
async fn concurrent_resolutions_are_independent() {
    let resolver = Arc::new(PriceResolver::new(
        ScriptedProvider::new(
            "DEXSCREENER",
            ProviderKind::Discovery,
            ProviderOutcome::Pairs(vec![bsc_pair(PAIR, 10.0, 0.001, Some(0.6))]),
        ),
        None,
        vec![],
    ));
    let config = Arc::new(PricingConfig::new(TOKEN));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let resolver = resolver.clone();
            let config = config.clone();
            tokio::spawn(async move { resolver.resolve(&config).await })
        })
        .collect();

    for handle in handles {
        let result = handle.await.unwrap();
        assert_eq!(result.usd_price, Some(0.6));
        assert_eq!(result.diagnostics.len(), 2);
    }
}
