//! Replay configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bankfold_events::SequenceCheck;

/// Largest amount a single deposit may carry.
pub const DEFAULT_MAX_DEPOSIT: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);

pub const MAX_DEPOSIT_ENV: &str = "BANKFOLD_MAX_DEPOSIT";
pub const SEQUENCE_CHECK_ENV: &str = "BANKFOLD_SEQUENCE_CHECK";

/// Tunables for rebuilding an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    /// Per-event cap on a deposit's amount (not on the resulting balance).
    pub max_deposit: Decimal,
    pub sequence_check: SequenceCheck,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            max_deposit: DEFAULT_MAX_DEPOSIT,
            sequence_check: SequenceCheck::Tail,
        }
    }
}

impl ReplayConfig {
    /// Read overrides from `BANKFOLD_MAX_DEPOSIT` / `BANKFOLD_SEQUENCE_CHECK`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset keys keep their defaults;
    /// unparsable ones are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(MAX_DEPOSIT_ENV) {
            match raw.trim().parse::<Decimal>() {
                Ok(limit) if limit > Decimal::ZERO => config.max_deposit = limit,
                _ => tracing::warn!(
                    value = %raw,
                    default = %config.max_deposit,
                    "{MAX_DEPOSIT_ENV} is not a positive decimal; using default"
                ),
            }
        }

        if let Some(raw) = lookup(SEQUENCE_CHECK_ENV) {
            match raw.parse::<SequenceCheck>() {
                Ok(check) => config.sequence_check = check,
                Err(e) => {
                    tracing::warn!(error = %e, "{SEQUENCE_CHECK_ENV} ignored; using tail check")
                }
            }
        }

        config
    }
}
