//! Event sequence validation.
//!
//! Histories are expected to be numbered `1..=N` with no gaps, duplicates or
//! reordering. The default check only looks at the tail: the last event must
//! carry `N`. That catches truncated or padded histories but not a swap in
//! the middle (`[1, 3, 2]` passes). `SequenceCheck::Strict` walks every
//! element instead.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::EventEnvelope;

/// How thoroughly a history's numbering is checked before replay.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SequenceCheck {
    /// Last sequence number must equal the number of events.
    #[default]
    Tail,
    /// Every event at index `i` must carry sequence number `i + 1`.
    Strict,
}

impl FromStr for SequenceCheck {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tail" => Ok(Self::Tail),
            "strict" => Ok(Self::Strict),
            other => Err(format!("unknown sequence check: {other}")),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SequenceError {
    /// The last event's sequence number does not match the event count.
    #[error("last sequence number is {found}, expected {expected}")]
    TailMismatch { expected: u64, found: u64 },

    /// An event in the middle of the history is out of place.
    #[error("sequence number at position {position} is {found}, expected {expected}")]
    Gap {
        position: usize,
        expected: u64,
        found: u64,
    },
}

/// Validate the numbering of `envelopes`, returning them unchanged on success.
///
/// An empty history is valid.
pub fn validate_sequence<E>(
    envelopes: &[EventEnvelope<E>],
    check: SequenceCheck,
) -> Result<&[EventEnvelope<E>], SequenceError> {
    match check {
        SequenceCheck::Tail => {
            if let Some(last) = envelopes.last() {
                let expected = envelopes.len() as u64;
                if last.sequence_number() != expected {
                    return Err(SequenceError::TailMismatch {
                        expected,
                        found: last.sequence_number(),
                    });
                }
            }
        }
        SequenceCheck::Strict => {
            for (position, env) in envelopes.iter().enumerate() {
                let expected = position as u64 + 1;
                if env.sequence_number() != expected {
                    return Err(SequenceError::Gap {
                        position,
                        expected,
                        found: env.sequence_number(),
                    });
                }
            }
        }
    }
    Ok(envelopes)
}
