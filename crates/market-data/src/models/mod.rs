//! Market data models
//!
//! - `types` - Type aliases for common identifiers (ProviderId, ChainId)
//! - `pair` - One on-chain liquidity pool for the tracked token (TradingPair)
//! - `outcome` - Normalized adapter outcome (ProviderOutcome, ProviderRequest)
//! - `diagnostics` - Per-strategy attempt log (FetchDiagnostics)
//! - `price` - Resolved output of the pipeline (PriceResult)

mod diagnostics;
mod outcome;
mod pair;
mod price;
mod types;

pub use diagnostics::{AttemptStatus, FetchDiagnostics, ProviderAttempt, SkipReason, Strategy};
pub use outcome::{ProviderKind, ProviderOutcome, ProviderRequest};
pub use pair::{Orientation, TokenRef, TradingPair};
pub use price::PriceResult;
pub use types::{same_address, ChainId, ProviderId};
