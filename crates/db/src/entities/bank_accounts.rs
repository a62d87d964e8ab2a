//! `SeaORM` Entity for the bank_accounts table.

use banklink_core::ledger::types::Account;
use chrono::Utc;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::AccountStatus;

/// A bank account row. Transactions reference accounts by id only;
/// there is no back-pointer cycle.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "bank_accounts")]
pub struct Model {
    /// Opaque account identifier (e.g. "ACC001").
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Owning user, if any.
    pub user_id: Option<Uuid>,
    /// Account category for display.
    pub account_type: String,
    /// Current balance.
    pub balance: Decimal,
    /// Negative-balance allowance.
    pub overdraft_limit: Decimal,
    /// Lifecycle status.
    pub status: AccountStatus,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Refreshed on every balance mutation.
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
    #[sea_orm(has_many = "super::transactions::Entity")]
    Transactions,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Converts the row into the ledger core's account snapshot.
    #[must_use]
    pub fn to_domain(&self) -> Account {
        Account {
            id: self.id.clone(),
            account_type: self.account_type.clone(),
            balance: self.balance,
            overdraft_limit: self.overdraft_limit,
            status: self.status.clone().into(),
            currency: self.currency.clone(),
            created_at: self.created_at.with_timezone(&Utc),
            updated_at: self.updated_at.with_timezone(&Utc),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use banklink_core::ledger::types as domain;
    use rust_decimal_macros::dec;

    #[test]
    fn test_to_domain_preserves_fields() {
        let now = Utc::now();
        let row = Model {
            id: "ACC001".to_string(),
            user_id: None,
            account_type: "Cheque".to_string(),
            balance: dec!(1000.00),
            overdraft_limit: dec!(200.00),
            status: AccountStatus::Frozen,
            currency: "ZAR".to_string(),
            created_at: now.into(),
            updated_at: now.into(),
        };

        let acc = row.to_domain();
        assert_eq!(acc.id, "ACC001");
        assert_eq!(acc.balance, dec!(1000.00));
        assert_eq!(acc.overdraft_limit, dec!(200.00));
        assert_eq!(acc.status, domain::AccountStatus::Frozen);
        assert_eq!(acc.available_balance(), dec!(1200.00));
        assert_eq!(acc.created_at, now);
        assert!(!acc.is_active());
    }
}
