use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use bankfold_core::{AccountId, CustomerId};
use bankfold_events::{Event, RecordedEvent};

use crate::account::Currency;
use crate::error::AccountError;

/// Event: AccountCreated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountCreated {
    pub account_id: AccountId,
    /// Opening balance, taken as given.
    pub initial_balance: Decimal,
    pub currency: Currency,
    pub customer_id: CustomerId,
}

/// Event: Deposit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposit {
    pub amount: Decimal,
}

/// Event: Withdrawal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Withdrawal {
    pub amount: Decimal,
}

/// Event: CurrencyChange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyChange {
    pub new_currency: Currency,
}

/// Everything that can happen to an account.
///
/// The set is closed: adding a kind means adding a variant here and a rule in
/// `AccountState::apply`, which the compiler enforces through the exhaustive
/// match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountEvent {
    AccountCreated(AccountCreated),
    Deposit(Deposit),
    Withdrawal(Withdrawal),
    Deactivation,
    Activation,
    Closure,
    CurrencyChange(CurrencyChange),
}

pub const ACCOUNT_CREATED: &str = "account.created";
pub const DEPOSIT: &str = "account.deposit";
pub const WITHDRAWAL: &str = "account.withdrawal";
pub const DEACTIVATION: &str = "account.deactivated";
pub const ACTIVATION: &str = "account.activated";
pub const CLOSURE: &str = "account.closed";
pub const CURRENCY_CHANGE: &str = "account.currency_changed";

const SCHEMA_VERSION: u32 = 1;

impl Event for AccountEvent {
    fn event_type(&self) -> &'static str {
        match self {
            AccountEvent::AccountCreated(_) => ACCOUNT_CREATED,
            AccountEvent::Deposit(_) => DEPOSIT,
            AccountEvent::Withdrawal(_) => WITHDRAWAL,
            AccountEvent::Deactivation => DEACTIVATION,
            AccountEvent::Activation => ACTIVATION,
            AccountEvent::Closure => CLOSURE,
            AccountEvent::CurrencyChange(_) => CURRENCY_CHANGE,
        }
    }

    fn version(&self) -> u32 {
        SCHEMA_VERSION
    }
}

impl AccountEvent {
    /// Decode an untyped record from the event log into a typed event.
    ///
    /// Payloads of the kinds that carry no data are ignored.
    pub fn decode(record: &RecordedEvent) -> Result<Self, AccountError> {
        let event_type = record.event_type.as_str();
        let event = match event_type {
            ACCOUNT_CREATED => AccountEvent::AccountCreated(payload(record)?),
            DEPOSIT => AccountEvent::Deposit(payload(record)?),
            WITHDRAWAL => AccountEvent::Withdrawal(payload(record)?),
            DEACTIVATION => AccountEvent::Deactivation,
            ACTIVATION => AccountEvent::Activation,
            CLOSURE => AccountEvent::Closure,
            CURRENCY_CHANGE => AccountEvent::CurrencyChange(payload(record)?),
            other => return Err(AccountError::UnsupportedEventKind(other.to_owned())),
        };

        if record.event_version != SCHEMA_VERSION {
            return Err(AccountError::malformed(
                event_type,
                format!("unsupported schema version {}", record.event_version),
            ));
        }

        Ok(event)
    }

    /// Encode into the untyped record shape, at the given stream position.
    pub fn to_recorded(&self, sequence_number: u64) -> Result<RecordedEvent, AccountError> {
        let payload = match self {
            AccountEvent::AccountCreated(e) => serde_json::to_value(e),
            AccountEvent::Deposit(e) => serde_json::to_value(e),
            AccountEvent::Withdrawal(e) => serde_json::to_value(e),
            AccountEvent::CurrencyChange(e) => serde_json::to_value(e),
            AccountEvent::Deactivation | AccountEvent::Activation | AccountEvent::Closure => {
                Ok(serde_json::Value::Null)
            }
        }
        .map_err(|e| AccountError::malformed(self.event_type(), e.to_string()))?;

        Ok(RecordedEvent::new(
            sequence_number,
            self.event_type(),
            self.version(),
            payload,
        ))
    }
}

fn payload<T: DeserializeOwned>(record: &RecordedEvent) -> Result<T, AccountError> {
    serde_json::from_value(record.payload.clone())
        .map_err(|e| AccountError::malformed(&record.event_type, e.to_string()))
}
