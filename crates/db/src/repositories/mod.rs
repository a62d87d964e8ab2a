//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application. Balance-mutating operations live in `LedgerRepository`,
//! which owns the transactional boundary.

pub mod account;
pub mod ledger;
pub mod user;

pub use account::{AccountError, AccountRepository};
pub use ledger::{LedgerRepository, LedgerStoreError};
pub use user::UserRepository;
