use serde::{Deserialize, Serialize};

/// A typed event together with its position in the aggregate's history.
///
/// `sequence_number` is expected to run `1..=N` over a stream; whether that
/// holds is checked by [`crate::validate_sequence`], not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope<E> {
    /// Monotonically increasing position in the aggregate stream.
    sequence_number: u64,

    payload: E,
}

impl<E> EventEnvelope<E> {
    pub fn new(sequence_number: u64, payload: E) -> Self {
        Self {
            sequence_number,
            payload,
        }
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }

    pub fn into_payload(self) -> E {
        self.payload
    }
}
