//! Price resolution.
//!
//! [`PriceResolver`] orchestrates the provider adapters in priority order,
//! merges partial results and stops at the first accepted USD price.

mod price_resolver;
mod state;

pub use price_resolver::PriceResolver;
