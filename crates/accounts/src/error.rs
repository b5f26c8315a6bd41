//! Replay failures.
//!
//! Every variant describes bad history, not a transient fault: the fold stops
//! at the first one and the caller decides whether to re-fetch upstream.

use rust_decimal::Decimal;
use thiserror::Error;

use bankfold_events::SequenceError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccountError {
    /// Event numbering check failed; nothing was applied.
    #[error("sequence integrity violated: {0}")]
    SequenceIntegrity(#[from] SequenceError),

    /// An event arrived before `AccountCreated`.
    #[error("account has not been created")]
    UninitializedAccount,

    #[error("deposit of {amount} exceeds the per-deposit limit of {limit}")]
    MaxBalanceExceeded { amount: Decimal, limit: Decimal },

    #[error("withdrawal of {amount} exceeds the balance of {balance}")]
    InsufficientBalance { amount: Decimal, balance: Decimal },

    /// Applying the amount would leave the balance outside the decimal range.
    #[error("applying {amount} overflows the balance")]
    BalanceOverflow { amount: Decimal },

    #[error("account is disabled")]
    AccountDisabled,

    /// Closed is terminal; no event applies afterwards, not even another closure.
    #[error("account is closed")]
    AccountClosed,

    #[error("unsupported event kind: {0}")]
    UnsupportedEventKind(String),

    #[error("account has already been created")]
    AccountAlreadyCreated,

    #[error("malformed {event_type} payload: {reason}")]
    MalformedPayload { event_type: String, reason: String },
}

impl AccountError {
    pub fn malformed(event_type: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedPayload {
            event_type: event_type.into(),
            reason: reason.into(),
        }
    }

    /// Stable machine-readable kind, suitable for logs and API mapping.
    pub fn code(&self) -> &'static str {
        match self {
            AccountError::SequenceIntegrity(_) => "sequence_integrity",
            AccountError::UninitializedAccount => "uninitialized_account",
            AccountError::MaxBalanceExceeded { .. } => "max_balance_exceeded",
            AccountError::InsufficientBalance { .. } => "insufficient_balance",
            AccountError::BalanceOverflow { .. } => "balance_overflow",
            AccountError::AccountDisabled => "account_disabled",
            AccountError::AccountClosed => "account_closed",
            AccountError::UnsupportedEventKind(_) => "unsupported_event_kind",
            AccountError::AccountAlreadyCreated => "account_already_created",
            AccountError::MalformedPayload { .. } => "malformed_payload",
        }
    }
}
