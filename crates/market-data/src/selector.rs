//! Representative pair selection.
//!
//! The deepest pool is the most price-representative one, so candidates are
//! ranked by USD liquidity with absent liquidity counted as zero. Ties keep
//! the first-seen pair.

use crate::models::TradingPair;

/// Pick the pair with the highest liquidity. `None` only for empty input.
pub fn select_representative(candidates: &[TradingPair]) -> Option<&TradingPair> {
    candidates.iter().fold(None, |best, pair| match best {
        Some(current) if current.liquidity_or_zero() >= pair.liquidity_or_zero() => Some(current),
        _ => Some(pair),
    })
}

/// Of the current representative and a challenger, keep the one with more
/// liquidity. The incumbent wins ties.
pub fn prefer_deeper(current: Option<TradingPair>, challenger: TradingPair) -> TradingPair {
    match current {
        Some(current) if current.liquidity_or_zero() >= challenger.liquidity_or_zero() => current,
        _ => challenger,
    }
}
