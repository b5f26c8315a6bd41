//! Event plumbing consumed by the replay core.
//!
//! Events arrive from an external log reader as an ordered, finite list. This
//! crate defines their envelope, checks that the list is well-formed, and
//! drives an aggregate through it. Storage and transport are out of scope.

pub mod envelope;
pub mod event;
pub mod recorded;
pub mod replay;
pub mod sequence;

pub use envelope::EventEnvelope;
pub use event::Event;
pub use recorded::RecordedEvent;
pub use replay::rehydrate;
pub use sequence::{SequenceCheck, SequenceError, validate_sequence};
