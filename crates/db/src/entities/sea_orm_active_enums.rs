//! `SeaORM` active enums backing the Postgres enum types.

use banklink_core::ledger::types as domain;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a bank account (`account_status` Postgres enum).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_status")]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountStatus {
    /// Account is open and may be mutated.
    #[sea_orm(string_value = "active")]
    Active,
    /// Account is dormant.
    #[sea_orm(string_value = "inactive")]
    Inactive,
    /// Account is administratively suspended.
    #[sea_orm(string_value = "suspended")]
    Suspended,
    /// Account has been closed.
    #[sea_orm(string_value = "closed")]
    Closed,
    /// Account is frozen pending review.
    #[sea_orm(string_value = "frozen")]
    Frozen,
}

/// Kind of a ledger transaction (`transaction_kind` Postgres enum).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_kind")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    /// Money paid into an account.
    #[sea_orm(string_value = "deposit")]
    Deposit,
    /// Money taken out of an account.
    #[sea_orm(string_value = "withdrawal")]
    Withdrawal,
    /// Credit leg of a transfer.
    #[sea_orm(string_value = "transfer_in")]
    TransferIn,
    /// Debit leg of a transfer.
    #[sea_orm(string_value = "transfer_out")]
    TransferOut,
}

impl From<domain::AccountStatus> for AccountStatus {
    fn from(status: domain::AccountStatus) -> Self {
        match status {
            domain::AccountStatus::Active => Self::Active,
            domain::AccountStatus::Inactive => Self::Inactive,
            domain::AccountStatus::Suspended => Self::Suspended,
            domain::AccountStatus::Closed => Self::Closed,
            domain::AccountStatus::Frozen => Self::Frozen,
        }
    }
}

impl From<AccountStatus> for domain::AccountStatus {
    fn from(status: AccountStatus) -> Self {
        match status {
            AccountStatus::Active => Self::Active,
            AccountStatus::Inactive => Self::Inactive,
            AccountStatus::Suspended => Self::Suspended,
            AccountStatus::Closed => Self::Closed,
            AccountStatus::Frozen => Self::Frozen,
        }
    }
}

impl From<domain::TransactionKind> for TransactionKind {
    fn from(kind: domain::TransactionKind) -> Self {
        match kind {
            domain::TransactionKind::Deposit => Self::Deposit,
            domain::TransactionKind::Withdrawal => Self::Withdrawal,
            domain::TransactionKind::TransferIn => Self::TransferIn,
            domain::TransactionKind::TransferOut => Self::TransferOut,
        }
    }
}

impl From<TransactionKind> for domain::TransactionKind {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Deposit => Self::Deposit,
            TransactionKind::Withdrawal => Self::Withdrawal,
            TransactionKind::TransferIn => Self::TransferIn,
            TransactionKind::TransferOut => Self::TransferOut,
        }
    }
}
