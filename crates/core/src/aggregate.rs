//! Aggregate root traits for event-sourced domain models.

/// Aggregate root marker + minimal interface.
///
/// Aggregates in this workspace are rebuilt from history and never persisted
/// directly, so the identifier is only known once the creating event has been
/// applied.
pub trait AggregateRoot {
    /// Strongly-typed aggregate identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the aggregate identifier, if the aggregate has been created.
    fn id(&self) -> Option<&Self::Id>;

    /// Number of events applied to reach this state.
    fn version(&self) -> u64;
}

/// Event application semantics (pure, deterministic).
///
/// `apply` consumes the current state and returns the next one, so a replay is
/// a plain `try_fold` over the history. Rejected events yield `Self::Error` and
/// the partially built state is dropped with them.
///
/// Aggregates must not perform IO or side effects.
pub trait Aggregate: AggregateRoot + Default + Sized {
    type Event: Clone + core::fmt::Debug;
    type Error: core::fmt::Debug;

    /// Tunable rule parameters consulted while applying events (limits etc.).
    type Policy;

    /// Evolve state by a single event.
    ///
    /// Implementations should bump `version()` by one per accepted event.
    fn apply(self, event: &Self::Event, policy: &Self::Policy) -> Result<Self, Self::Error>;
}
