use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::{same_address, ChainId};
use crate::numeric::{checked_div, positive};

/// One side of a trading pair.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenRef {
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

impl TokenRef {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            symbol: None,
        }
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }
}

/// Which side of a pair the tracked token sits on.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Orientation {
    Base,
    Quote,
}

/// One on-chain liquidity pool for the tracked token.
///
/// All numeric fields are already validated by the adapter that built the
/// pair: prices and USD statistics are positive finite or `None`, the 24h
/// change is finite or `None`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TradingPair {
    /// Pool address, unique per chain.
    pub pair_address: String,

    /// Chain the pool lives on.
    pub chain_id: ChainId,

    /// DEX the pool belongs to (e.g. "pancakeswap").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dex_id: Option<String>,

    pub base_token: TokenRef,
    pub quote_token: TokenRef,

    /// Price of the base token expressed in quote-token units.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_in_quote: Option<f64>,

    /// Provider-asserted USD price of the base token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_usd: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub liquidity_usd: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_24h_usd: Option<f64>,

    /// 24h price change in percent, may be negative.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_change_24h: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fdv_usd: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_cap_usd: Option<f64>,

    /// Provider's last observation of this pool.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// Provider page for this pool.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl TradingPair {
    /// Liquidity used for ranking; absent liquidity ranks as zero.
    pub fn liquidity_or_zero(&self) -> f64 {
        self.liquidity_usd.unwrap_or(0.0)
    }

    /// Side of the pair `token` sits on, or `None` if it is in neither.
    pub fn orientation(&self, token: &str) -> Option<Orientation> {
        if same_address(&self.base_token.address, token) {
            Some(Orientation::Base)
        } else if same_address(&self.quote_token.address, token) {
            Some(Orientation::Quote)
        } else {
            None
        }
    }

    /// The asset on the other side of the pair from `token`.
    pub fn counter_token(&self, token: &str) -> Option<&TokenRef> {
        match self.orientation(token)? {
            Orientation::Base => Some(&self.quote_token),
            Orientation::Quote => Some(&self.base_token),
        }
    }

    /// Price of `token` in units of the counter asset.
    ///
    /// The provider's reference price is always base-per-quote, so it is
    /// inverted when `token` is the quote asset.
    pub fn reference_ratio(&self, token: &str) -> Option<f64> {
        let price = self.price_in_quote?;
        match self.orientation(token)? {
            Orientation::Base => Some(price),
            Orientation::Quote => positive(checked_div(1.0, price)),
        }
    }

    /// USD price of `token` implied by this pair.
    ///
    /// `price_usd` always refers to the base token. When `token` is the
    /// quote asset, its USD price is the base price divided by the
    /// base-per-quote reference price.
    pub fn token_usd_price(&self, token: &str) -> Option<f64> {
        let base_usd = self.price_usd?;
        match self.orientation(token)? {
            Orientation::Base => Some(base_usd),
            Orientation::Quote => positive(checked_div(base_usd, self.price_in_quote?)),
        }
    }

    /// USD value of one unit of the counter asset, from the same observation.
    pub fn counter_usd_price(&self, token: &str) -> Option<f64> {
        let base_usd = self.price_usd?;
        match self.orientation(token)? {
            Orientation::Base => positive(checked_div(base_usd, self.price_in_quote?)),
            Orientation::Quote => Some(base_usd),
        }
    }

    /// Market cap, falling back to fully diluted valuation.
    pub fn market_cap_or_fdv(&self) -> Option<f64> {
        self.market_cap_usd.or(self.fdv_usd)
    }
}
