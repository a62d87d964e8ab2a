//! Account ledger: balances, transaction records, and transfer planning.
//!
//! The ledger owns the invariants of the system:
//! - a balance never drops below the negative overdraft allowance,
//! - every balance mutation emits exactly one posting whose `balance_after`
//!   snapshots the account balance immediately after the mutation,
//! - replaying an account's full posting history reproduces every stored
//!   `balance_after`.

pub mod balance;
pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::LedgerError;
pub use service::Ledger;
pub use types::{Account, AccountStatus, NewAccount, Posting, TransactionKind, TransferPlan};
