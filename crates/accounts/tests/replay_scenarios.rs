//! End-to-end account rebuilds from complete histories.

use rust_decimal::Decimal;
use serde_json::json;

use bankfold_accounts::{
    AccountCreated, AccountError, AccountEvent, AccountStatus, Currency, Deposit, ReplayConfig,
    Withdrawal, fold, fold_recorded, fold_with,
};
use bankfold_core::{AccountId, AggregateRoot, CustomerId};
use bankfold_events::{EventEnvelope, RecordedEvent, SequenceCheck, SequenceError};

fn created(balance: i64) -> AccountEvent {
    AccountEvent::AccountCreated(AccountCreated {
        account_id: AccountId::new("A1"),
        initial_balance: Decimal::from(balance),
        currency: Currency::Usd,
        customer_id: CustomerId::new("C1"),
    })
}

fn deposit(amount: i64) -> AccountEvent {
    AccountEvent::Deposit(Deposit {
        amount: Decimal::from(amount),
    })
}

fn withdrawal(amount: i64) -> AccountEvent {
    AccountEvent::Withdrawal(Withdrawal {
        amount: Decimal::from(amount),
    })
}

fn history(events: Vec<AccountEvent>) -> Vec<EventEnvelope<AccountEvent>> {
    bankfold_observability::init_for_tests();
    events
        .into_iter()
        .enumerate()
        .map(|(i, e)| EventEnvelope::new(i as u64 + 1, e))
        .collect()
}

#[test]
fn empty_history_has_no_aggregate() {
    assert_eq!(fold(&[]), Ok(None));
    assert_eq!(fold_recorded(&[], &ReplayConfig::default()), Ok(None));
}

#[test]
fn creation_only() -> anyhow::Result<()> {
    let state = fold(&history(vec![created(100)]))?.expect("aggregate");

    assert_eq!(state.account_id(), Some(&AccountId::new("A1")));
    assert_eq!(state.customer_id(), Some(&CustomerId::new("C1")));
    assert_eq!(state.balance(), Decimal::from(100));
    assert_eq!(state.currency(), Some(Currency::Usd));
    assert_eq!(state.status(), AccountStatus::Enabled);
    assert_eq!(state.version(), 1);
    Ok(())
}

#[test]
fn deposit_adds_to_balance() -> anyhow::Result<()> {
    let state = fold(&history(vec![created(100), deposit(50)]))?.expect("aggregate");
    assert_eq!(state.balance(), Decimal::from(150));
    Ok(())
}

#[test]
fn deposit_into_disabled_account_fails() {
    let events = history(vec![created(100), AccountEvent::Deactivation, deposit(10)]);
    assert_eq!(fold(&events), Err(AccountError::AccountDisabled));
}

#[test]
fn deposit_into_closed_account_fails() {
    let events = history(vec![created(100), AccountEvent::Closure, deposit(10)]);
    assert_eq!(fold(&events), Err(AccountError::AccountClosed));
}

#[test]
fn tail_mismatch_fails_before_any_transition() {
    // Would also fail with UninitializedAccount if the deposit were applied.
    let events = vec![
        EventEnvelope::new(1, deposit(10)),
        EventEnvelope::new(3, created(100)),
    ];
    assert_eq!(
        fold(&events),
        Err(AccountError::SequenceIntegrity(SequenceError::TailMismatch {
            expected: 2,
            found: 3
        }))
    );
}

#[test]
fn strict_check_catches_what_the_tail_check_misses() -> anyhow::Result<()> {
    let events = vec![
        EventEnvelope::new(1, created(100)),
        EventEnvelope::new(1, deposit(5)),
        EventEnvelope::new(3, deposit(5)),
    ];

    let lenient = fold(&events)?.expect("aggregate");
    assert_eq!(lenient.balance(), Decimal::from(110));

    let strict = ReplayConfig {
        sequence_check: SequenceCheck::Strict,
        ..ReplayConfig::default()
    };
    let err = fold_with(&events, &strict).unwrap_err();
    assert_eq!(err.code(), "sequence_integrity");
    Ok(())
}

#[test]
fn full_lifecycle() -> anyhow::Result<()> {
    let events = history(vec![
        created(1_000),
        deposit(500),
        withdrawal(200),
        AccountEvent::Deactivation,
        AccountEvent::Activation,
        withdrawal(1_300),
        AccountEvent::Closure,
    ]);
    let state = fold(&events)?.expect("aggregate");

    assert_eq!(state.balance(), Decimal::ZERO);
    assert_eq!(state.status(), AccountStatus::Closed);
    assert_eq!(state.account_log().len(), 1);
    assert_eq!(state.account_log()[0].kind, "CLOSURE");
    assert_eq!(state.version(), 7);
    Ok(())
}

#[test]
fn overdrawn_withdrawal_fails() {
    let events = history(vec![created(100), withdrawal(101)]);
    assert_eq!(
        fold(&events),
        Err(AccountError::InsufficientBalance {
            amount: Decimal::from(101),
            balance: Decimal::from(100),
        })
    );
}

#[test]
fn deposit_past_decimal_range_fails_cleanly() {
    let events = history(vec![
        AccountEvent::AccountCreated(AccountCreated {
            account_id: AccountId::new("A1"),
            initial_balance: Decimal::MAX,
            currency: Currency::Usd,
            customer_id: CustomerId::new("C1"),
        }),
        deposit(1),
    ]);
    assert_eq!(
        fold(&events),
        Err(AccountError::BalanceOverflow {
            amount: Decimal::ONE
        })
    );
}

#[test]
fn folding_leaves_the_input_untouched() -> anyhow::Result<()> {
    let events = history(vec![created(100), deposit(1), AccountEvent::Deactivation]);
    let before = events.clone();

    let first = fold(&events)?;
    let second = fold(&events)?;

    assert_eq!(events, before);
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn recorded_history_is_decoded_then_folded() -> anyhow::Result<()> {
    let records = vec![
        RecordedEvent::new(
            1,
            "account.created",
            1,
            json!({
                "account_id": "A1",
                "initial_balance": "100",
                "currency": "USD",
                "customer_id": "C1"
            }),
        ),
        RecordedEvent::new(2, "account.deposit", 1, json!({ "amount": "25.50" })),
        RecordedEvent::new(3, "account.currency_changed", 1, json!({ "new_currency": "SEK" })),
    ];

    let state = fold_recorded(&records, &ReplayConfig::default())?.expect("aggregate");
    assert_eq!(state.new_currency(), Some(Currency::Sek));
    assert_eq!(state.currency(), Some(Currency::Usd));
    assert_eq!(state.balance(), Decimal::from(51_000));
    Ok(())
}

#[test]
fn unknown_recorded_kind_is_unsupported() {
    let records = vec![
        RecordedEvent::new(
            1,
            "account.created",
            1,
            json!({
                "account_id": "A1",
                "initial_balance": "0",
                "currency": "GBP",
                "customer_id": "C1"
            }),
        ),
        RecordedEvent::new(2, "account.interest_accrued", 1, json!({ "amount": "1" })),
    ];

    assert_eq!(
        fold_recorded(&records, &ReplayConfig::default()),
        Err(AccountError::UnsupportedEventKind(
            "account.interest_accrued".to_string()
        ))
    );
}

#[test]
fn typed_events_survive_the_recorded_shape() -> anyhow::Result<()> {
    let events = vec![created(100), deposit(7), AccountEvent::Deactivation];
    let records = events
        .iter()
        .enumerate()
        .map(|(i, e)| e.to_recorded(i as u64 + 1))
        .collect::<Result<Vec<_>, _>>()?;

    let from_records = fold_recorded(&records, &ReplayConfig::default())?;
    let from_events = fold(&history(events))?;
    assert_eq!(from_records, from_events);
    Ok(())
}
