//! Immutable resolver configuration.
//!
//! Built once at startup by the host and passed by reference. The resolver
//! never reads the process environment itself.

use std::borrow::Cow;
use std::time::Duration;

use crate::models::ChainId;

/// Default chain used by every provider.
pub const DEFAULT_CHAIN_ID: &str = "bsc";

/// Wrapped BNB on BNB Smart Chain.
pub const DEFAULT_WRAPPED_NATIVE: &str = "0xbb4cdb9cbd36b01bd1cbaebf2de08d9173bc095c";

pub const DEFAULT_NATIVE_SYMBOL: &str = "BNB";

/// Bound on each external call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Configuration for one tracked token.
#[derive(Clone, Debug)]
pub struct PricingConfig {
    /// Contract address of the tracked token.
    pub token_address: String,

    /// Known trading pair address for the explicit-pair strategy.
    pub pair_address: Option<String>,

    /// Target chain; discovery results on other chains are dropped.
    pub chain_id: ChainId,

    /// Wrapped native token, used to derive the native-currency price.
    pub wrapped_native_address: String,

    pub native_symbol: String,

    /// Timeout applied to every provider call.
    pub request_timeout: Duration,
}

impl PricingConfig {
    pub fn new(token_address: impl Into<String>) -> Self {
        Self {
            token_address: token_address.into().trim().to_string(),
            pair_address: None,
            chain_id: Cow::Borrowed(DEFAULT_CHAIN_ID),
            wrapped_native_address: DEFAULT_WRAPPED_NATIVE.to_string(),
            native_symbol: DEFAULT_NATIVE_SYMBOL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Set the explicit pair address. Blank values clear it.
    pub fn with_pair_address(mut self, pair_address: Option<impl Into<String>>) -> Self {
        self.pair_address = pair_address
            .map(Into::into)
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());
        self
    }

    pub fn with_chain_id(mut self, chain_id: impl Into<String>) -> Self {
        self.chain_id = Cow::Owned(chain_id.into());
        self
    }

    pub fn with_wrapped_native(
        mut self,
        address: impl Into<String>,
        symbol: impl Into<String>,
    ) -> Self {
        self.wrapped_native_address = address.into();
        self.native_symbol = symbol.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
