use std::sync::Arc;

use pricebot_market_data::{PriceResolver, PricingConfig};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

pub struct AppState {
    pub config: Config,
    pub pricing: PricingConfig,
    pub resolver: PriceResolver,
}

pub fn init_tracing() {
    let log_format = std::env::var("PRICEBOT_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    // Replies go to stdout; logs stay on stderr.
    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

pub fn build_state(config: Config) -> Arc<AppState> {
    let pricing = config.pricing_config();
    let resolver = PriceResolver::with_default_providers(&pricing);
    tracing::info!(
        "Tracking {} ({}) on '{}', pair {}",
        config.token_symbol,
        pricing.token_address,
        pricing.chain_id,
        pricing.pair_address.as_deref().unwrap_or("not configured")
    );

    Arc::new(AppState {
        config,
        pricing,
        resolver,
    })
}
