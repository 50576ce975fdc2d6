//! Partial resolution state threaded through the strategies.

use std::borrow::Cow;

use crate::models::{
    AttemptStatus, FetchDiagnostics, PriceResult, ProviderId, SkipReason, Strategy, TradingPair,
};
use crate::numeric::positive_finite;
use crate::selector::{prefer_deeper, select_representative};

#[derive(Debug, Default)]
pub(crate) struct ResolutionState {
    pub usd_price: Option<f64>,
    pub source: Option<ProviderId>,
    pub representative: Option<TradingPair>,
    pub diagnostics: FetchDiagnostics,
}

impl ResolutionState {
    pub fn has_price(&self) -> bool {
        self.usd_price.is_some()
    }

    /// Accept `price` from `provider` if it is valid and nothing was accepted
    /// yet. Returns the status to record.
    pub fn offer_price(&mut self, provider: &'static str, price: f64) -> AttemptStatus {
        let Some(price) = positive_finite(price) else {
            return AttemptStatus::InvalidPrice;
        };

        if self.has_price() {
            return AttemptStatus::Skipped(SkipReason::PriceAlreadyAccepted);
        }

        self.usd_price = Some(price);
        self.source = Some(Cow::Borrowed(provider));
        AttemptStatus::Accepted { price }
    }

    /// Fold a set of candidate pairs into the state.
    ///
    /// The best candidate competes with the current representative on
    /// liquidity. Its USD price for `token` is accepted when present and no
    /// price was accepted yet.
    pub fn offer_pairs(
        &mut self,
        provider: &'static str,
        token: &str,
        pairs: &[TradingPair],
    ) -> AttemptStatus {
        let Some(candidate) = select_representative(pairs) else {
            return AttemptStatus::NoPairs;
        };

        let price = candidate.token_usd_price(token);
        self.representative = Some(prefer_deeper(self.representative.take(), candidate.clone()));

        match price {
            Some(price) if !self.has_price() => self.offer_price(provider, price),
            _ => AttemptStatus::PairsWithoutPrice { pairs: pairs.len() },
        }
    }

    pub fn record(&mut self, strategy: Strategy, provider: &'static str, status: AttemptStatus) {
        self.diagnostics
            .record(strategy, Some(Cow::Borrowed(provider)), status);
    }

    pub fn into_result(self, token_address: &str) -> PriceResult {
        PriceResult {
            token_address: token_address.to_string(),
            usd_price: self.usd_price,
            native_price: None,
            source: self.source,
            representative_pair: self.representative,
            diagnostics: self.diagnostics,
        }
    }
}
