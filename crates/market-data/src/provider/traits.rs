//! Market data provider trait definition.

use async_trait::async_trait;

use crate::models::{ProviderKind, ProviderOutcome, ProviderRequest};

/// Trait for market data providers.
///
/// Implement this trait to add a new data source. The resolver uses
/// [`kind`](Self::kind) to decide which strategy the provider can serve.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use pricebot_market_data::models::{ProviderKind, ProviderOutcome, ProviderRequest};
/// use pricebot_market_data::provider::MarketDataProvider;
///
/// struct FixedPrice(f64);
///
/// #[async_trait]
/// impl MarketDataProvider for FixedPrice {
///     fn id(&self) -> &'static str {
///         "FIXED"
///     }
///
///     fn kind(&self) -> ProviderKind {
///         ProviderKind::PriceOnly
///     }
///
///     async fn fetch(&self, _request: &ProviderRequest<'_>) -> ProviderOutcome {
///         ProviderOutcome::PriceOnly(self.0)
///     }
/// }
/// ```
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "DEXSCREENER". Used for logging and
    /// diagnostics.
    fn id(&self) -> &'static str;

    /// Which kind of answer this provider gives.
    fn kind(&self) -> ProviderKind;

    /// Query the provider once.
    ///
    /// Must not panic and must not return early with an error: failures are
    /// reported as [`ProviderOutcome::Unavailable`].
    async fn fetch(&self, request: &ProviderRequest<'_>) -> ProviderOutcome;
}
