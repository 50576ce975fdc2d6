//! Error types for the market data crate.
//!
//! Adapters use [`MarketDataError`] internally and propagate it with `?`.
//! At the adapter boundary every error is flattened into a short diagnostic
//! string via [`MarketDataError::diagnostic`] and reported as
//! [`ProviderOutcome::Unavailable`](crate::models::ProviderOutcome::Unavailable).
//! None of these errors ever reach the caller of the resolver.

use thiserror::Error;

/// Upper bound on the length of a diagnostic string.
pub const MAX_DIAGNOSTIC_LEN: usize = 160;

/// Errors that can occur while talking to a market data provider.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The request did not complete (DNS, connect, TLS, reset).
    #[error("Transport error: {provider} - {message}")]
    Transport {
        /// The provider that failed
        provider: String,
        /// The underlying error message
        message: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// The provider answered with a non-success HTTP status.
    #[error("HTTP {status}: {provider} - {body}")]
    HttpStatus {
        /// The provider that returned the status
        provider: String,
        /// Numeric HTTP status code
        status: u16,
        /// Truncated response body
        body: String,
    },

    /// The response body could not be decoded.
    #[error("Malformed payload: {provider} - {message}")]
    MalformedPayload {
        /// The provider that returned the payload
        provider: String,
        /// Decoder error message
        message: String,
    },

    /// The payload decoded but a required value is missing or invalid
    /// (absent, non-numeric, zero, negative or non-finite).
    #[error("Invalid data: {provider} - {message}")]
    InvalidData {
        /// The provider that returned the data
        provider: String,
        /// Description of the invalid field
        message: String,
    },

    /// The provider knows no pair for the token on the target chain.
    #[error("No pairs: {provider}")]
    NoPairs {
        /// The provider that returned no pairs
        provider: String,
    },
}

impl MarketDataError {
    /// Build a [`MarketDataError`] from a `reqwest` error, separating
    /// timeouts from other transport failures.
    pub fn from_reqwest(provider: &str, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout {
                provider: provider.to_string(),
            }
        } else if error.is_decode() {
            Self::MalformedPayload {
                provider: provider.to_string(),
                message: error.to_string(),
            }
        } else {
            Self::Transport {
                provider: provider.to_string(),
                message: error.to_string(),
            }
        }
    }

    /// Short, bounded diagnostic string for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricebot_market_data::errors::MarketDataError;
    ///
    /// let error = MarketDataError::Timeout { provider: "DEXSCREENER".to_string() };
    /// assert_eq!(error.diagnostic(), "Timeout: DEXSCREENER");
    /// ```
    pub fn diagnostic(&self) -> String {
        truncate(&self.to_string(), MAX_DIAGNOSTIC_LEN)
    }
}

/// Truncate `text` to at most `max_chars` characters, marking the cut with `…`.
pub fn truncate(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}
