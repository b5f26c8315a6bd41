//! Account aggregate (event-sourced).
//!
//! The state of an account is never stored: it is rebuilt on demand by folding
//! its ordered event history. Pure domain logic only: no IO, no persistence.

pub mod account;
pub mod config;
pub mod error;
pub mod event;
pub mod replay;

pub use account::{AccountState, AccountStatus, Currency, LogMessage};
pub use config::ReplayConfig;
pub use error::AccountError;
pub use event::{AccountCreated, AccountEvent, CurrencyChange, Deposit, Withdrawal};
pub use replay::{fold, fold_recorded, fold_with};
