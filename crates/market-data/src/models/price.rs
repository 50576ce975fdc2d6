use chrono::{DateTime, Utc};

use super::diagnostics::FetchDiagnostics;
use super::pair::TradingPair;
use super::types::ProviderId;
use crate::numeric::{checked_div, positive, positive_finite};

/// Resolved output of one price resolution.
///
/// Built fresh for every request. `usd_price` is `None` when every strategy
/// was exhausted; that is a normal result, not an error.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PriceResult {
    /// Token the result is for.
    pub token_address: String,

    /// Accepted USD price, always positive and finite.
    pub usd_price: Option<f64>,

    /// Token price in the chain's native currency, when derivable.
    pub native_price: Option<f64>,

    /// Provider that supplied `usd_price`.
    pub source: Option<ProviderId>,

    /// Pair whose statistics are attached to the result. Independent of
    /// which provider supplied the USD price.
    pub representative_pair: Option<TradingPair>,

    /// One entry per strategy, in execution order.
    pub diagnostics: FetchDiagnostics,
}

impl PriceResult {
    pub fn is_resolved(&self) -> bool {
        self.usd_price.is_some()
    }

    /// How many tokens `usd_amount` dollars buy.
    pub fn tokens_per_usd(&self, usd_amount: f64) -> Option<f64> {
        let price = positive(self.usd_price)?;
        checked_div(usd_amount, price)
    }

    /// Token price in units of the representative pair's counter asset,
    /// orientation-corrected.
    pub fn reference_ratio(&self) -> Option<f64> {
        self.representative_pair
            .as_ref()?
            .reference_ratio(&self.token_address)
    }

    pub fn liquidity_usd(&self) -> Option<f64> {
        self.representative_pair.as_ref()?.liquidity_usd
    }

    pub fn volume_24h_usd(&self) -> Option<f64> {
        self.representative_pair.as_ref()?.volume_24h_usd
    }

    pub fn price_change_24h(&self) -> Option<f64> {
        self.representative_pair.as_ref()?.price_change_24h
    }

    pub fn market_cap_usd(&self) -> Option<f64> {
        self.representative_pair.as_ref()?.market_cap_or_fdv()
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.representative_pair.as_ref()?.updated_at
    }

    /// Derive the native-currency price of the token from `usd_price` and
    /// the representative pair.
    ///
    /// The pair yields the USD value of its counter asset for the same
    /// observation. When that counter asset is the chain's wrapped native
    /// token, the native price is `usd_price / native_usd`. Returns `None`
    /// rather than guessing when any input is missing.
    pub fn derive_native_price(&self, wrapped_native_address: &str) -> Option<f64> {
        let usd_price = positive(self.usd_price)?;
        let pair = self.representative_pair.as_ref()?;
        let counter = pair.counter_token(&self.token_address)?;
        if !super::types::same_address(&counter.address, wrapped_native_address) {
            return None;
        }

        let native_usd = pair.counter_usd_price(&self.token_address)?;
        checked_div(usd_price, native_usd).and_then(positive_finite)
    }
}
