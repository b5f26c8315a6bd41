use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bankfold_core::{AccountId, Aggregate, AggregateRoot, CustomerId, DomainError, ValueObject};

use crate::config::ReplayConfig;
use crate::error::AccountError;
use crate::event::{AccountCreated, AccountEvent, CurrencyChange, Deposit, Withdrawal};

/// Currencies an account can be held in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Sek,
    Gbp,
}

impl ValueObject for Currency {}

impl Currency {
    pub fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Sek => "SEK",
            Currency::Gbp => "GBP",
        }
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl core::str::FromStr for Currency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "SEK" => Ok(Currency::Sek),
            "GBP" => Ok(Currency::Gbp),
            other => Err(DomainError::validation(format!("unknown currency code: {other}"))),
        }
    }
}

/// Lifecycle of an account. `Closed` is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    #[default]
    Uninitialized,
    Enabled,
    Disabled,
    Closed,
}

impl AccountStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, AccountStatus::Closed)
    }
}

/// One entry of the account log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogMessage {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ValueObject for LogMessage {}

impl LogMessage {
    fn fixed(kind: &str, message: &str, unix_seconds: i64) -> Self {
        Self {
            kind: kind.to_owned(),
            message: message.to_owned(),
            timestamp: DateTime::<Utc>::UNIX_EPOCH + TimeDelta::seconds(unix_seconds),
        }
    }
}

// 2024-10-02T10:30:00Z and 2024-10-03T10:30:00Z.
const LOG_STAMP_OCT_2: i64 = 1_727_865_000;
const LOG_STAMP_OCT_3: i64 = 1_727_951_400;

/// Balance a currency change leaves behind.
///
/// Fixed regardless of the previous balance or the currencies involved; no
/// conversion is computed.
pub const CURRENCY_CHANGE_BALANCE: Decimal = Decimal::from_parts(51_000, 0, 0, false, 0);

fn deactivation_log() -> Vec<LogMessage> {
    vec![
        LogMessage::fixed("DEACTIVATE", "Account inactive for 270 days", LOG_STAMP_OCT_2),
        LogMessage::fixed(
            "DEACTIVATE",
            "Security alert: suspicious activity",
            LOG_STAMP_OCT_3,
        ),
    ]
}

fn closure_log() -> Vec<LogMessage> {
    vec![LogMessage::fixed(
        "CLOSURE",
        "Reason: Customer request, Closing Balance: '5000'",
        LOG_STAMP_OCT_2,
    )]
}

fn currency_change_log() -> Vec<LogMessage> {
    vec![LogMessage::fixed(
        "CURRENCY-CHANGE",
        "Change currency from 'USD' to 'SEK'",
        LOG_STAMP_OCT_2,
    )]
}

/// Aggregate root: the current state of one account, derived from its history.
///
/// Only produced by replay; exposes read-only accessors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AccountState {
    account_id: Option<AccountId>,
    balance: Decimal,
    currency: Option<Currency>,
    customer_id: Option<CustomerId>,
    status: AccountStatus,
    /// Overwritten or cleared by lifecycle events, never appended to.
    account_log: Vec<LogMessage>,
    /// Target currency recorded by the last currency change.
    new_currency: Option<Currency>,
    version: u64,
}

impl AccountState {
    pub fn account_id(&self) -> Option<&AccountId> {
        self.account_id.as_ref()
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn currency(&self) -> Option<Currency> {
        self.currency
    }

    pub fn customer_id(&self) -> Option<&CustomerId> {
        self.customer_id.as_ref()
    }

    pub fn status(&self) -> AccountStatus {
        self.status
    }

    pub fn account_log(&self) -> &[LogMessage] {
        &self.account_log
    }

    pub fn new_currency(&self) -> Option<Currency> {
        self.new_currency
    }
}

impl AggregateRoot for AccountState {
    type Id = AccountId;

    fn id(&self) -> Option<&Self::Id> {
        self.account_id.as_ref()
    }

    fn version(&self) -> u64 {
        self.version
    }
}

impl Aggregate for AccountState {
    type Event = AccountEvent;
    type Error = AccountError;
    type Policy = ReplayConfig;

    fn apply(self, event: &Self::Event, policy: &Self::Policy) -> Result<Self, Self::Error> {
        if self.status.is_terminal() {
            return Err(AccountError::AccountClosed);
        }
        if self.account_id.is_none() && !matches!(event, AccountEvent::AccountCreated(_)) {
            return Err(AccountError::UninitializedAccount);
        }

        let mut next = match event {
            AccountEvent::AccountCreated(e) => self.apply_created(e)?,
            AccountEvent::Deposit(e) => self.apply_deposit(e, policy)?,
            AccountEvent::Withdrawal(e) => self.apply_withdrawal(e)?,
            AccountEvent::Deactivation => self.apply_deactivation(),
            AccountEvent::Activation => self.apply_activation(),
            AccountEvent::Closure => self.apply_closure(),
            AccountEvent::CurrencyChange(e) => self.apply_currency_change(e),
        };

        next.version += 1;
        Ok(next)
    }
}

impl AccountState {
    fn ensure_active(&self) -> Result<(), AccountError> {
        if self.status == AccountStatus::Disabled {
            return Err(AccountError::AccountDisabled);
        }
        Ok(())
    }

    fn apply_created(mut self, e: &AccountCreated) -> Result<Self, AccountError> {
        if self.account_id.is_some() {
            return Err(AccountError::AccountAlreadyCreated);
        }
        self.account_id = Some(e.account_id.clone());
        self.balance = e.initial_balance;
        self.currency = Some(e.currency);
        self.customer_id = Some(e.customer_id.clone());
        self.status = AccountStatus::Enabled;
        Ok(self)
    }

    fn apply_deposit(mut self, e: &Deposit, policy: &ReplayConfig) -> Result<Self, AccountError> {
        if e.amount > policy.max_deposit {
            return Err(AccountError::MaxBalanceExceeded {
                amount: e.amount,
                limit: policy.max_deposit,
            });
        }
        self.ensure_active()?;
        self.balance = self
            .balance
            .checked_add(e.amount)
            .ok_or(AccountError::BalanceOverflow { amount: e.amount })?;
        Ok(self)
    }

    fn apply_withdrawal(mut self, e: &Withdrawal) -> Result<Self, AccountError> {
        if e.amount > self.balance {
            return Err(AccountError::InsufficientBalance {
                amount: e.amount,
                balance: self.balance,
            });
        }
        self.ensure_active()?;
        self.balance = self
            .balance
            .checked_sub(e.amount)
            .ok_or(AccountError::BalanceOverflow { amount: e.amount })?;
        Ok(self)
    }

    fn apply_deactivation(mut self) -> Self {
        self.status = AccountStatus::Disabled;
        self.account_log = deactivation_log();
        self
    }

    fn apply_activation(mut self) -> Self {
        self.status = AccountStatus::Enabled;
        self.account_log.clear();
        self
    }

    fn apply_closure(mut self) -> Self {
        self.status = AccountStatus::Closed;
        self.account_log = closure_log();
        self
    }

    fn apply_currency_change(mut self, e: &CurrencyChange) -> Self {
        self.new_currency = Some(e.new_currency);
        self.balance = CURRENCY_CHANGE_BALANCE;
        self.account_log = currency_change_log();
        self
    }
}
