//! DexScreener API response shapes.
//!
//! Every field is optional and numeric fields are decoded leniently: the API
//! mixes numbers and numeric strings, and any of them may be null.

use std::borrow::Cow;

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::models::{TokenRef, TradingPair};
use crate::numeric::{de_lenient_f64, de_positive_f64};

/// Response of `/latest/dex/tokens/{token}` and `/latest/dex/pairs/{chain}/{pair}`.
///
/// Pairs are kept as raw values so that one malformed record does not
/// discard the others.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct PairsResponse {
    #[serde(default)]
    pub pairs: Option<Vec<Value>>,
    #[serde(default)]
    pub pair: Option<Value>,
}

impl PairsResponse {
    /// All decodable pair records, in response order.
    pub fn into_pairs(self) -> Vec<DexPair> {
        self.pairs
            .unwrap_or_default()
            .into_iter()
            .chain(self.pair)
            .filter_map(|value| serde_json::from_value::<DexPair>(value).ok())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DexPair {
    pub chain_id: Option<String>,
    pub dex_id: Option<String>,
    pub url: Option<String>,
    pub pair_address: Option<String>,
    pub base_token: Option<DexToken>,
    pub quote_token: Option<DexToken>,
    #[serde(default, deserialize_with = "de_positive_f64")]
    pub price_native: Option<f64>,
    #[serde(default, deserialize_with = "de_positive_f64")]
    pub price_usd: Option<f64>,
    #[serde(default)]
    pub volume: Option<Window>,
    #[serde(default)]
    pub price_change: Option<ChangeWindow>,
    #[serde(default)]
    pub liquidity: Option<Liquidity>,
    #[serde(default, deserialize_with = "de_positive_f64")]
    pub fdv: Option<f64>,
    #[serde(default, deserialize_with = "de_positive_f64")]
    pub market_cap: Option<f64>,
    /// Milliseconds since epoch.
    #[serde(default, deserialize_with = "de_positive_f64")]
    pub updated_at: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DexToken {
    pub address: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Window {
    #[serde(default, deserialize_with = "de_positive_f64")]
    pub h24: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChangeWindow {
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub h24: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Liquidity {
    #[serde(default, deserialize_with = "de_positive_f64")]
    pub usd: Option<f64>,
}

impl DexToken {
    fn into_token_ref(self) -> Option<TokenRef> {
        let address = self.address.filter(|a| !a.trim().is_empty())?;
        Some(TokenRef {
            address,
            symbol: self.symbol,
        })
    }
}

impl DexPair {
    /// Convert into a [`TradingPair`]. Records without a pair address, chain
    /// or token addresses are unusable and yield `None`.
    pub fn into_trading_pair(self) -> Option<TradingPair> {
        let pair_address = self.pair_address.filter(|a| !a.trim().is_empty())?;
        let chain_id = self.chain_id.filter(|c| !c.trim().is_empty())?;
        let base_token = self.base_token?.into_token_ref()?;
        let quote_token = self.quote_token?.into_token_ref()?;

        Some(TradingPair {
            pair_address,
            chain_id: Cow::Owned(chain_id),
            dex_id: self.dex_id,
            base_token,
            quote_token,
            price_in_quote: self.price_native,
            price_usd: self.price_usd,
            liquidity_usd: self.liquidity.and_then(|l| l.usd),
            volume_24h_usd: self.volume.and_then(|v| v.h24),
            price_change_24h: self.price_change.and_then(|c| c.h24),
            fdv_usd: self.fdv,
            market_cap_usd: self.market_cap,
            updated_at: self.updated_at.and_then(millis_to_datetime),
            url: self.url,
        })
    }
}

fn millis_to_datetime(millis: f64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis as i64).single()
}
