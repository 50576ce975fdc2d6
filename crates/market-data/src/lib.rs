//! Pricebot Market Data Crate
//!
//! Resolves a reliable USD price and market statistics for one token by
//! querying several decentralized-exchange data providers in a fixed
//! fallback order.
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |  PricingConfig   |  (token, optional pair, chain)
//! +------------------+
//!          |
//!          v
//! +------------------+     +------------------+
//! |  PriceResolver   | --> |  Pair selector   |  (deepest liquidity wins)
//! +------------------+     +------------------+
//!          |
//!          v
//! +------------------+
//! |    Providers     |  discovery -> explicit pair -> price-only fallbacks
//! +------------------+
//!          |
//!          v
//! +------------------+     +------------------+
//! |   PriceResult    | --> |    Formatter     |  (display strings)
//! +------------------+     +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`TradingPair`] - One liquidity pool for the token
//! - [`ProviderOutcome`] - Normalized answer of one adapter call
//! - [`PriceResult`] - Resolved price, statistics and diagnostics
//! - [`PricingConfig`] - Immutable per-token configuration

pub mod config;
pub mod errors;
pub mod format;
pub mod models;
pub mod numeric;
pub mod provider;
pub mod resolver;
pub mod selector;

pub use config::PricingConfig;
pub use errors::MarketDataError;
pub use models::{
    AttemptStatus, FetchDiagnostics, Orientation, PriceResult, ProviderAttempt, ProviderId,
    ProviderKind, ProviderOutcome, ProviderRequest, SkipReason, Strategy, TokenRef, TradingPair,
};
pub use provider::dexscreener::{DexScreenerPairProvider, DexScreenerProvider};
pub use provider::geckoterminal::GeckoTerminalProvider;
pub use provider::pancakeswap::PancakeSwapProvider;
pub use provider::MarketDataProvider;
pub use resolver::PriceResolver;
pub use selector::select_representative;
