use super::pair::TradingPair;
use crate::errors::MarketDataError;

/// The three kinds of provider the resolver knows how to use.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProviderKind {
    /// Returns every known pair for a token.
    Discovery,
    /// Returns the record of one known pair address.
    Lookup,
    /// Returns a scalar USD price and nothing else.
    PriceOnly,
}

/// Inputs handed to a provider adapter.
#[derive(Clone, Copy, Debug)]
pub struct ProviderRequest<'a> {
    pub token_address: &'a str,
    pub pair_address: Option<&'a str>,
    pub chain_id: &'a str,
}

/// Normalized result of one adapter call.
#[derive(Clone, Debug, PartialEq)]
pub enum ProviderOutcome {
    /// Zero or more candidate pairs, already chain-filtered.
    Pairs(Vec<TradingPair>),
    /// A scalar USD price with no pair statistics.
    PriceOnly(f64),
    /// The provider could not answer; carries a short diagnostic.
    Unavailable(String),
}

impl ProviderOutcome {
    /// Outcome for an adapter error.
    pub fn unavailable(error: &MarketDataError) -> Self {
        Self::Unavailable(error.diagnostic())
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

impl From<Result<ProviderOutcome, MarketDataError>> for ProviderOutcome {
    fn from(result: Result<ProviderOutcome, MarketDataError>) -> Self {
        result.unwrap_or_else(|e| Self::unavailable(&e))
    }
}
