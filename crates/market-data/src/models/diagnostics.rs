//! Per-strategy attempt log for a single resolution.
//!
//! Diagnostics are informational only. The resolver never branches on them.

use std::fmt;

use super::types::ProviderId;

/// Resolution strategy a diagnostic entry belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Strategy {
    /// Pair discovery by token address.
    Discovery,
    /// Lookup of the configured pair address.
    ExplicitPair,
    /// Scalar USD price fallback, with its position in the fallback order.
    PriceOnly(usize),
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Discovery => write!(f, "discovery"),
            Self::ExplicitPair => write!(f, "explicit"),
            Self::PriceOnly(index) => write!(f, "fallback{}", index + 1),
        }
    }
}

/// Why a strategy was not attempted.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SkipReason {
    /// No pair address configured, or no provider for the strategy.
    NotConfigured,
    /// An earlier strategy already accepted a USD price.
    PriceAlreadyAccepted,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConfigured => write!(f, "not configured"),
            Self::PriceAlreadyAccepted => write!(f, "price already accepted"),
        }
    }
}

/// What happened when a strategy ran.
#[derive(Clone, Debug, PartialEq)]
pub enum AttemptStatus {
    /// A USD price was accepted from this strategy.
    Accepted { price: f64 },
    /// Pairs were returned but none carried a usable USD price.
    PairsWithoutPrice { pairs: usize },
    /// The provider answered with no pair on the target chain.
    NoPairs,
    /// The provider answered with a price that failed validation.
    InvalidPrice,
    /// The provider answered with a shape this strategy cannot use.
    UnexpectedOutcome,
    /// The provider failed (transport, status, payload, timeout).
    Unavailable { reason: String },
    /// The strategy did not run.
    Skipped(SkipReason),
}

impl AttemptStatus {
    /// True when the strategy ran but yielded nothing usable.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::NoPairs | Self::InvalidPrice | Self::UnexpectedOutcome | Self::Unavailable { .. }
        )
    }
}

impl fmt::Display for AttemptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accepted { price } => write!(f, "ok ({price})"),
            Self::PairsWithoutPrice { pairs } => write!(f, "ok, no price ({pairs} pairs)"),
            Self::NoPairs => write!(f, "no pairs"),
            Self::InvalidPrice => write!(f, "invalid price"),
            Self::UnexpectedOutcome => write!(f, "unexpected outcome"),
            Self::Unavailable { reason } => write!(f, "unavailable ({reason})"),
            Self::Skipped(reason) => write!(f, "skipped ({reason})"),
        }
    }
}

/// Record of a single strategy during a resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct ProviderAttempt {
    pub strategy: Strategy,
    pub provider_id: Option<ProviderId>,
    pub status: AttemptStatus,
}

impl fmt::Display for ProviderAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.provider_id {
            Some(id) => write!(f, "{} [{}]: {}", self.strategy, id, self.status),
            None => write!(f, "{}: {}", self.strategy, self.status),
        }
    }
}

/// Ordered list of attempts, one per strategy.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FetchDiagnostics {
    pub attempts: Vec<ProviderAttempt>,
}

impl FetchDiagnostics {
    pub fn new() -> Self {
        Self {
            attempts: Vec::new(),
        }
    }

    pub fn record(
        &mut self,
        strategy: Strategy,
        provider_id: Option<ProviderId>,
        status: AttemptStatus,
    ) {
        self.attempts.push(ProviderAttempt {
            strategy,
            provider_id,
            status,
        });
    }

    pub fn record_skip(
        &mut self,
        strategy: Strategy,
        provider_id: Option<ProviderId>,
        reason: SkipReason,
    ) {
        self.record(strategy, provider_id, AttemptStatus::Skipped(reason));
    }

    pub fn len(&self) -> usize {
        self.attempts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }

    /// Human-readable notes, one per attempt.
    pub fn notes(&self) -> Vec<String> {
        self.attempts.iter().map(ToString::to_string).collect()
    }

    /// Summary for logging/debugging.
    pub fn summary(&self) -> String {
        self.notes().join(" -> ")
    }

    /// Attempts that ran and produced nothing usable.
    pub fn failures(&self) -> impl Iterator<Item = &ProviderAttempt> {
        self.attempts.iter().filter(|a| a.status.is_failure())
    }

    /// Attempt for `strategy`, if one was recorded.
    pub fn attempt(&self, strategy: Strategy) -> Option<&ProviderAttempt> {
        self.attempts.iter().find(|a| a.strategy == strategy)
    }
}
