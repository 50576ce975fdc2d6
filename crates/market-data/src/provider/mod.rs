//! Market data provider abstractions and implementations.
//!
//! This module contains:
//! - The `MarketDataProvider` trait that all adapters implement
//! - A shared HTTP helper for GET + JSON decoding
//! - Concrete adapters (DexScreener, PancakeSwap, GeckoTerminal)
//!
//! Adapters never fail outward: every transport, protocol or data error is
//! converted to [`ProviderOutcome::Unavailable`](crate::models::ProviderOutcome::Unavailable)
//! at the trait boundary.

mod http;
mod traits;

pub mod dexscreener;
pub mod geckoterminal;
pub mod pancakeswap;

pub use http::{build_client, get_json};
pub use traits::MarketDataProvider;
