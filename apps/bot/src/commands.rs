//! Chat commands and the text replies they produce.

use chrono::{DateTime, Utc};
use pricebot_market_data::format::{
    format_percent_change, format_quantity, format_relative_time, format_usd, format_usd_whole,
};
use pricebot_market_data::PriceResult;
use tracing::debug;

use crate::config::Config;
use crate::main_lib::AppState;

pub const PRICE_UNAVAILABLE: &str = "❌ Could not fetch price right now.";

const HELP_TEXT: &str = "Hi! Use /price, /ca, /chart, /buy, /links";

/// Dollar amounts quoted in the price card.
const QUOTE_AMOUNTS: [u32; 3] = [1, 10, 100];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Price,
    Ca,
    Chart,
    Buy,
    Links,
    Unknown(String),
}

impl Command {
    /// Parse `price`, `/price` or `/price@SomeBot`, ignoring case and
    /// trailing arguments.
    pub fn parse(input: &str) -> Self {
        let word = input.split_whitespace().next().unwrap_or_default();
        let name = word
            .trim_start_matches('/')
            .split('@')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match name.as_str() {
            "start" | "help" => Self::Start,
            "price" => Self::Price,
            "ca" | "contract" => Self::Ca,
            "chart" => Self::Chart,
            "buy" => Self::Buy,
            "links" => Self::Links,
            _ => Self::Unknown(name),
        }
    }
}

pub async fn respond(state: &AppState, command: &Command, debug: bool) -> String {
    debug!("Answering {:?}", command);
    match command {
        Command::Price => {
            let result = state.resolver.resolve(&state.pricing).await;
            price_reply(
                &result,
                &state.config,
                &state.pricing.native_symbol,
                Utc::now(),
                debug,
            )
        }
        Command::Ca => ca_reply(&state.config),
        Command::Chart => format!("📈 Chart: {}", chart_url(&state.config)),
        Command::Buy => format!("🛒 Buy: {}", buy_url(&state.config)),
        Command::Links => links_reply(&state.config),
        Command::Start | Command::Unknown(_) => HELP_TEXT.to_string(),
    }
}

pub fn price_reply(
    result: &PriceResult,
    config: &Config,
    native_symbol: &str,
    now: DateTime<Utc>,
    debug: bool,
) -> String {
    let mut lines = if result.is_resolved() {
        price_card(result, config, native_symbol, now)
    } else {
        vec![PRICE_UNAVAILABLE.to_string()]
    };

    if debug {
        lines.push(String::new());
        lines.push("Diagnostics:".to_string());
        lines.extend(
            result
                .diagnostics
                .notes()
                .into_iter()
                .map(|note| format!("• {}", note)),
        );
    }

    lines.join("\n")
}

fn price_card(
    result: &PriceResult,
    config: &Config,
    native_symbol: &str,
    now: DateTime<Utc>,
) -> Vec<String> {
    let symbol = &config.token_symbol;
    let mut lines = vec![format!("💹 {} Price: {}", symbol, format_usd(result.usd_price))];

    lines.extend(QUOTE_AMOUNTS.iter().map(|amount| {
        format!(
            "• ${} ≈ {} {}",
            amount,
            format_quantity(result.tokens_per_usd(f64::from(*amount))),
            symbol
        )
    }));

    lines.push(format!(
        "• 24h Change: {}",
        format_percent_change(result.price_change_24h())
    ));
    lines.push(format!(
        "• 24h Volume: {}",
        format_usd_whole(result.volume_24h_usd())
    ));
    lines.push(format!(
        "• Liquidity: {}",
        format_usd_whole(result.liquidity_usd())
    ));
    lines.push(format!(
        "• FDV/MC: {}",
        format_usd_whole(result.market_cap_usd())
    ));

    if let Some(native) = result.native_price {
        lines.push(format!(
            "• Price in {}: {}",
            native_symbol,
            format_quantity(Some(native))
        ));
    }

    let updated = match result.updated_at() {
        Some(at) => format_relative_time(Some(at), now),
        None => "just now".to_string(),
    };
    lines.push(format!("• Updated: {}", updated));

    if let Some(source) = &result.source {
        lines.push(format!("• Source: {}", source));
    }

    lines
}

fn ca_reply(config: &Config) -> String {
    format!("📜 {} contract:\n{}", config.token_symbol, config.token_address)
}

/// DexScreener page for the configured pair, or the token when no pair is set.
pub fn chart_url(config: &Config) -> String {
    let target = config
        .pair_address
        .as_deref()
        .unwrap_or(&config.token_address);
    format!("https://dexscreener.com/{}/{}", config.chain_id, target)
}

pub fn buy_url(config: &Config) -> String {
    format!(
        "https://pancakeswap.finance/swap?outputCurrency={}",
        config.token_address
    )
}

fn links_reply(config: &Config) -> String {
    [
        format!("🌐 Website: {}", config.website_url),
        format!("🐦 Twitter: {}", config.twitter_url),
        format!("💬 Telegram: {}", config.telegram_url),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{Duration as ChronoDuration, TimeZone};
    use pricebot_market_data::{
        AttemptStatus, FetchDiagnostics, MarketDataProvider, PriceResolver, ProviderKind,
        ProviderOutcome, ProviderRequest, Strategy, TokenRef, TradingPair,
    };
    use std::borrow::Cow;
    use std::sync::Arc;
    use std::time::Duration;

    const TOKEN: &str = "0x1111111111111111111111111111111111111111";
    const WBNB: &str = "0xbb4cdb9cbd36b01bd1cbaebf2de08d9173bc095c";

    fn config(pair_address: Option<&str>) -> Config {
        Config {
            token_address: TOKEN.to_string(),
            pair_address: pair_address.map(str::to_string),
            chain_id: "bsc".to_string(),
            token_symbol: "LABV2".to_string(),
            website_url: "https://example.org".to_string(),
            twitter_url: "#".to_string(),
            telegram_url: "#".to_string(),
            request_timeout: Duration::from_secs(15),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap()
    }

    fn pair() -> TradingPair {
        TradingPair {
            pair_address: "0xpair".to_string(),
            chain_id: Cow::Borrowed("bsc"),
            base_token: TokenRef::new(TOKEN),
            quote_token: TokenRef::new(WBNB),
            price_in_quote: Some(0.0001),
            price_usd: Some(0.05),
            liquidity_usd: Some(50_000.0),
            volume_24h_usd: Some(12_345.6),
            price_change_24h: Some(1.234),
            fdv_usd: Some(1_000_000.0),
            updated_at: Some(now() - ChronoDuration::minutes(12)),
            ..Default::default()
        }
    }

    fn resolved() -> PriceResult {
        PriceResult {
            token_address: TOKEN.to_string(),
            usd_price: Some(0.05),
            native_price: Some(0.0001),
            source: Some(Cow::Borrowed("DEXSCREENER")),
            representative_pair: Some(pair()),
            diagnostics: FetchDiagnostics::new(),
        }
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("price"), Command::Price);
        assert_eq!(Command::parse("/PRICE"), Command::Price);
        assert_eq!(Command::parse("/price@LabBot extra"), Command::Price);
        assert_eq!(Command::parse(" /ca "), Command::Ca);
        assert_eq!(Command::parse("/start"), Command::Start);
        assert_eq!(Command::parse("/chart"), Command::Chart);
        assert_eq!(Command::parse("/buy"), Command::Buy);
        assert_eq!(Command::parse("/links"), Command::Links);
        assert_eq!(Command::parse("/moon"), Command::Unknown("moon".to_string()));
        assert_eq!(Command::parse(""), Command::Unknown(String::new()));
    }

    #[test]
    fn test_price_card() {
        let reply = price_reply(&resolved(), &config(None), "BNB", now(), false);
        let lines: Vec<_> = reply.lines().collect();

        assert_eq!(
            lines,
            vec![
                "💹 LABV2 Price: $0.0500",
                "• $1 ≈ 20 LABV2",
                "• $10 ≈ 200 LABV2",
                "• $100 ≈ 2,000 LABV2",
                "• 24h Change: +1.23%",
                "• 24h Volume: $12,346",
                "• Liquidity: $50,000",
                "• FDV/MC: $1,000,000",
                "• Price in BNB: 0.0001",
                "• Updated: 12m ago",
                "• Source: DEXSCREENER",
            ]
        );
    }

    #[test]
    fn test_price_card_without_statistics() {
        let result = PriceResult {
            token_address: TOKEN.to_string(),
            usd_price: Some(0.05),
            source: Some(Cow::Borrowed("GECKOTERMINAL")),
            ..Default::default()
        };

        let reply = price_reply(&result, &config(None), "BNB", now(), false);
        assert!(reply.contains("• Liquidity: —"));
        assert!(reply.contains("• 24h Change: —"));
        assert!(reply.contains("• Updated: just now"));
        assert!(!reply.contains("Price in BNB"));
    }

    #[test]
    fn test_unresolved_price() {
        let mut diagnostics = FetchDiagnostics::new();
        diagnostics.record(
            Strategy::Discovery,
            Some(Cow::Borrowed("DEXSCREENER")),
            AttemptStatus::NoPairs,
        );
        let result = PriceResult {
            token_address: TOKEN.to_string(),
            diagnostics,
            ..Default::default()
        };

        assert_eq!(
            price_reply(&result, &config(None), "BNB", now(), false),
            PRICE_UNAVAILABLE
        );
        assert_eq!(
            price_reply(&result, &config(None), "BNB", now(), true),
            format!(
                "{}\n\nDiagnostics:\n• discovery [DEXSCREENER]: no pairs",
                PRICE_UNAVAILABLE
            )
        );
    }

    #[test]
    fn test_links() {
        assert_eq!(
            chart_url(&config(None)),
            format!("https://dexscreener.com/bsc/{}", TOKEN)
        );
        assert_eq!(
            chart_url(&config(Some("0xpair"))),
            "https://dexscreener.com/bsc/0xpair"
        );
        assert_eq!(
            buy_url(&config(None)),
            format!("https://pancakeswap.finance/swap?outputCurrency={}", TOKEN)
        );
        assert_eq!(
            links_reply(&config(None)),
            "🌐 Website: https://example.org\n🐦 Twitter: #\n💬 Telegram: #"
        );
    }

    struct FixedPrice(f64);

    #[async_trait]
    impl MarketDataProvider for FixedPrice {
        fn id(&self) -> &'static str {
            "FIXED"
        }

        fn kind(&self) -> ProviderKind {
            ProviderKind::PriceOnly
        }

        async fn fetch(&self, _request: &ProviderRequest<'_>) -> ProviderOutcome {
            ProviderOutcome::PriceOnly(self.0)
        }
    }

    fn state(price: f64) -> AppState {
        let config = config(None);
        AppState {
            pricing: config.pricing_config(),
            config,
            resolver: PriceResolver::new(Arc::new(FixedPrice(price)), None, vec![]),
        }
    }

    #[tokio::test]
    async fn test_respond() {
        let state = state(0.5);

        let price = respond(&state, &Command::Price, false).await;
        assert!(price.starts_with("💹 LABV2 Price: $0.5000"));
        assert!(price.contains("• $1 ≈ 2 LABV2"));
        assert!(price.contains("• Source: FIXED"));

        let debug = respond(&state, &Command::Price, true).await;
        assert!(debug.contains("discovery [FIXED]: ok (0.5)"));
        assert!(debug.contains("explicit: skipped (price already accepted)"));

        assert_eq!(respond(&state, &Command::Start, false).await, HELP_TEXT);
        assert_eq!(
            respond(&state, &Command::Unknown("moon".into()), false).await,
            HELP_TEXT
        );
        assert!(respond(&state, &Command::Ca, false).await.ends_with(TOKEN));
    }

    #[tokio::test]
    async fn test_respond_price_failure() {
        let state = state(0.0);
        assert_eq!(
            respond(&state, &Command::Price, false).await,
            PRICE_UNAVAILABLE
        );
    }
}
