use std::time::Duration;

use anyhow::bail;
use pricebot_market_data::config::DEFAULT_CHAIN_ID;
use pricebot_market_data::PricingConfig;

const DEFAULT_TOKEN_SYMBOL: &str = "TOKEN";
const DEFAULT_LINK: &str = "#";
const DEFAULT_TIMEOUT_MS: u64 = 15_000;

pub struct Config {
    pub token_address: String,
    pub pair_address: Option<String>,
    pub chain_id: String,
    pub token_symbol: String,
    pub website_url: String,
    pub twitter_url: String,
    pub telegram_url: String,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. The first non-blank value among a
    /// variable and its aliases wins.
    fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |keys: &[&str]| {
            keys.iter().find_map(|key| {
                lookup(key)
                    .map(|value| value.trim().to_string())
                    .filter(|value| !value.is_empty())
            })
        };

        let Some(token_address) = var(&["PRICEBOT_CA", "CA"]) else {
            bail!("Missing PRICEBOT_CA (or CA): the token contract address is required");
        };

        let timeout_ms = var(&["PRICEBOT_REQUEST_TIMEOUT_MS"])
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_MS);

        Ok(Self {
            token_address,
            pair_address: var(&["PRICEBOT_PAIR", "PAIR"]),
            chain_id: var(&["PRICEBOT_CHAIN"]).unwrap_or_else(|| DEFAULT_CHAIN_ID.into()),
            token_symbol: var(&["PRICEBOT_TOKEN_SYMBOL"])
                .unwrap_or_else(|| DEFAULT_TOKEN_SYMBOL.into()),
            website_url: var(&["PRICEBOT_WEBSITE_URL", "WEBSITE_URL"])
                .unwrap_or_else(|| DEFAULT_LINK.into()),
            twitter_url: var(&["PRICEBOT_TWITTER_URL", "TWITTER_URL"])
                .unwrap_or_else(|| DEFAULT_LINK.into()),
            telegram_url: var(&["PRICEBOT_TELEGRAM_URL", "TELEGRAM_URL"])
                .unwrap_or_else(|| DEFAULT_LINK.into()),
            request_timeout: Duration::from_millis(timeout_ms),
        })
    }

    pub fn pricing_config(&self) -> PricingConfig {
        PricingConfig::new(self.token_address.as_str())
            .with_pair_address(self.pair_address.as_deref())
            .with_chain_id(self.chain_id.as_str())
            .with_request_timeout(self.request_timeout)
    }
}
