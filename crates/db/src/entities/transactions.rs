//! `SeaORM` Entity for the transactions table.
//!
//! Rows are append-only: no repository exposes an update or delete path.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::TransactionKind;

/// A ledger transaction row.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    /// Surrogate key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Monotonic insertion counter; breaks timestamp ties in history
    /// ordering. Assigned by the database.
    pub seq: i64,
    /// Externally visible transaction reference, time-derived and unique.
    #[sea_orm(unique)]
    pub reference: String,
    /// Owning account id.
    pub account_id: String,
    /// Transaction kind.
    pub kind: TransactionKind,
    /// Positive magnitude; sign is implied by `kind`.
    pub amount: Decimal,
    /// Account balance immediately after this transaction was applied.
    pub balance_after: Decimal,
    /// Human-readable description.
    pub description: String,
    /// Correlation id linking the two legs of a transfer.
    pub transfer_id: Option<Uuid>,
    /// When the transaction was created; sort key for history retrieval.
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::bank_accounts::Entity",
        from = "Column::AccountId",
        to = "super::bank_accounts::Column::Id"
    )]
    BankAccounts,
}

impl Related<super::bank_accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BankAccounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
