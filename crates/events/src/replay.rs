//! Aggregate rehydration (replay) from an ordered history.
//!
//! State is never stored; it is derived by folding the history from scratch.
//! The fold is pure and synchronous, owns its accumulator for its whole
//! duration, and only hands the aggregate out once every event was accepted.

use bankfold_core::Aggregate;

use crate::sequence::{SequenceCheck, SequenceError, validate_sequence};
use crate::{Event, EventEnvelope};

/// Rebuild an aggregate by replaying `envelopes` in order.
///
/// - empty history: `Ok(None)`, there is nothing to rebuild
/// - numbering is validated with `check` before any event is applied
/// - the first rejected event aborts the replay; no partial state is returned
pub fn rehydrate<A>(
    envelopes: &[EventEnvelope<A::Event>],
    check: SequenceCheck,
    policy: &A::Policy,
) -> Result<Option<A>, A::Error>
where
    A: Aggregate,
    A::Event: Event,
    A::Error: From<SequenceError>,
{
    if envelopes.is_empty() {
        return Ok(None);
    }

    let span = tracing::debug_span!("rehydrate", events = envelopes.len());
    let _guard = span.enter();

    let history = validate_sequence(envelopes, check).inspect_err(|err| {
        tracing::debug!(error = %err, "history rejected before replay");
    })?;

    history
        .iter()
        .try_fold(A::default(), |state, env| {
            let event = env.payload();
            match state.apply(event, policy) {
                Ok(next) => {
                    tracing::trace!(
                        sequence = env.sequence_number(),
                        event_type = event.event_type(),
                        "event applied"
                    );
                    Ok(next)
                }
                Err(err) => {
                    tracing::debug!(
                        sequence = env.sequence_number(),
                        event_type = event.event_type(),
                        error = ?err,
                        "event rejected"
                    );
                    Err(err)
                }
            }
        })
        .map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bankfold_core::AggregateRoot;

    #[derive(Debug, Clone)]
    enum TallyEvent {
        Opened,
        Added(u32),
    }

    impl Event for TallyEvent {
        fn event_type(&self) -> &'static str {
            match self {
                TallyEvent::Opened => "tally.opened",
                TallyEvent::Added(_) => "tally.added",
            }
        }

        fn version(&self) -> u32 {
            1
        }
    }

    #[derive(Debug, PartialEq, Eq)]
    enum TallyError {
        Sequence(SequenceError),
        NotOpened,
        TooLarge(u32),
    }

    impl From<SequenceError> for TallyError {
        fn from(value: SequenceError) -> Self {
            TallyError::Sequence(value)
        }
    }

    #[derive(Debug, Default, PartialEq, Eq)]
    struct Tally {
        id: Option<u8>,
        total: u32,
        version: u64,
    }

    impl AggregateRoot for Tally {
        type Id = u8;

        fn id(&self) -> Option<&u8> {
            self.id.as_ref()
        }

        fn version(&self) -> u64 {
            self.version
        }
    }

    impl Aggregate for Tally {
        type Event = TallyEvent;
        type Error = TallyError;
        type Policy = u32;

        fn apply(mut self, event: &TallyEvent, cap: &u32) -> Result<Self, TallyError> {
            match event {
                TallyEvent::Opened => self.id = Some(1),
                TallyEvent::Added(n) => {
                    if self.id.is_none() {
                        return Err(TallyError::NotOpened);
                    }
                    if n > cap {
                        return Err(TallyError::TooLarge(*n));
                    }
                    self.total += n;
                }
            }
            self.version += 1;
            Ok(self)
        }
    }

    fn history(events: Vec<TallyEvent>) -> Vec<EventEnvelope<TallyEvent>> {
        events
            .into_iter()
            .enumerate()
            .map(|(i, e)| EventEnvelope::new(i as u64 + 1, e))
            .collect()
    }

    #[test]
    fn empty_history_yields_nothing() {
        let result = rehydrate::<Tally>(&[], SequenceCheck::Tail, &10).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn folds_left_to_right_and_counts_versions() {
        let events = history(vec![
            TallyEvent::Opened,
            TallyEvent::Added(3),
            TallyEvent::Added(4),
        ]);
        let tally = rehydrate::<Tally>(&events, SequenceCheck::Strict, &10)
            .unwrap()
            .unwrap();
        assert_eq!(tally.total, 7);
        assert_eq!(tally.version(), 3);
        assert_eq!(tally.id(), Some(&1));
    }

    #[test]
    fn sequence_failure_happens_before_any_event() {
        // The first event would be rejected too, but numbering is checked first.
        let events = vec![
            EventEnvelope::new(1, TallyEvent::Added(1)),
            EventEnvelope::new(5, TallyEvent::Opened),
        ];
        let err = rehydrate::<Tally>(&events, SequenceCheck::Tail, &10).unwrap_err();
        assert_eq!(
            err,
            TallyError::Sequence(SequenceError::TailMismatch { expected: 2, found: 5 })
        );
    }

    #[test]
    fn first_rejection_aborts_the_replay() {
        let events = history(vec![
            TallyEvent::Opened,
            TallyEvent::Added(50),
            TallyEvent::Added(1),
        ]);
        let err = rehydrate::<Tally>(&events, SequenceCheck::Tail, &10).unwrap_err();
        assert_eq!(err, TallyError::TooLarge(50));
    }
}
