use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// An untyped event as handed over by an event-log reader.
///
/// Carries the stream position, a type tag and a JSON payload. Aggregate
/// crates decode it into their own closed event enum; tags they do not know
/// are rejected at that point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedEvent {
    /// Monotonically increasing position in the aggregate stream.
    pub sequence_number: u64,

    pub event_type: String,
    pub event_version: u32,

    pub payload: JsonValue,
}

impl RecordedEvent {
    pub fn new(
        sequence_number: u64,
        event_type: impl Into<String>,
        event_version: u32,
        payload: JsonValue,
    ) -> Self {
        Self {
            sequence_number,
            event_type: event_type.into(),
            event_version,
            payload,
        }
    }
}
