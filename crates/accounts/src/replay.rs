//! Account rebuild entry points.

use bankfold_core::AggregateRoot;
use bankfold_events::{EventEnvelope, RecordedEvent, rehydrate};

use crate::account::AccountState;
use crate::config::ReplayConfig;
use crate::error::AccountError;
use crate::event::AccountEvent;

/// Rebuild an account from its history using the default configuration.
///
/// Returns `Ok(None)` for an empty history.
pub fn fold(events: &[EventEnvelope<AccountEvent>]) -> Result<Option<AccountState>, AccountError> {
    fold_with(events, &ReplayConfig::default())
}

/// Rebuild an account from its history.
///
/// The history is only borrowed. Numbering is checked per
/// `config.sequence_check` before the first event is applied, and the first
/// rejected event aborts the fold.
pub fn fold_with(
    events: &[EventEnvelope<AccountEvent>],
    config: &ReplayConfig,
) -> Result<Option<AccountState>, AccountError> {
    let span = tracing::debug_span!("account_replay", events = events.len());
    let _guard = span.enter();

    match rehydrate::<AccountState>(events, config.sequence_check, config) {
        Ok(Some(state)) => {
            tracing::debug!(
                account_id = state.account_id().map(|id| id.as_str()),
                version = state.version(),
                status = ?state.status(),
                "account rebuilt"
            );
            Ok(Some(state))
        }
        Ok(None) => Ok(None),
        Err(err) => {
            tracing::debug!(code = err.code(), error = %err, "account replay failed");
            Err(err)
        }
    }
}

/// Decode untyped records from an event log and rebuild the account.
///
/// Every record is decoded before anything is applied, so an unknown kind or a
/// malformed payload fails the whole fold up front.
pub fn fold_recorded(
    records: &[RecordedEvent],
    config: &ReplayConfig,
) -> Result<Option<AccountState>, AccountError> {
    let events = records
        .iter()
        .map(|r| AccountEvent::decode(r).map(|e| EventEnvelope::new(r.sequence_number, e)))
        .collect::<Result<Vec<_>, _>>()?;
    fold_with(&events, config)
}
