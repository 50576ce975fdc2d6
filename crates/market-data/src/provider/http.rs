//! Shared HTTP plumbing for the adapters.

use std::time::Duration;

use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::errors::{truncate, MarketDataError};

const USER_AGENT: &str = concat!("pricebot/", env!("CARGO_PKG_VERSION"));

/// Maximum number of body characters kept in an HTTP status diagnostic.
const MAX_BODY_CHARS: usize = 120;

/// Build a client with a bounded per-request timeout.
pub fn build_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// GET `url` and decode the JSON body into `T`.
///
/// Non-success statuses become [`MarketDataError::HttpStatus`] carrying a
/// truncated body. Decoding failures become
/// [`MarketDataError::MalformedPayload`].
pub async fn get_json<T: DeserializeOwned>(
    client: &Client,
    provider: &str,
    url: &str,
) -> Result<T, MarketDataError> {
    debug!("{} request: {}", provider, url);

    let response = client
        .get(url)
        .header(header::ACCEPT, "application/json")
        .send()
        .await
        .map_err(|e| MarketDataError::from_reqwest(provider, e))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| MarketDataError::from_reqwest(provider, e))?;

    if !status.is_success() {
        warn!("{} returned HTTP {}", provider, status.as_u16());
        return Err(MarketDataError::HttpStatus {
            provider: provider.to_string(),
            status: status.as_u16(),
            body: truncate(&body, MAX_BODY_CHARS),
        });
    }

    decode(provider, &body)
}

/// Decode a JSON body, mapping failures to [`MarketDataError::MalformedPayload`].
pub(crate) fn decode<T: DeserializeOwned>(provider: &str, body: &str) -> Result<T, MarketDataError> {
    serde_json::from_str(body).map_err(|e| MarketDataError::MalformedPayload {
        provider: provider.to_string(),
        message: e.to_string(),
    })
}
