//! Core business logic for BankLink.
//!
//! This crate contains the ledger core: account balance accounting,
//! transaction recording, and transfer planning. It performs no I/O;
//! persistence lives in `banklink-db` and calls into this crate.

pub mod auth;
pub mod ledger;

pub use ledger::{Account, Ledger, LedgerError, Posting, TransactionKind, TransferPlan};
