//! Account repository: the durable account store.
//!
//! Creation, lookup, listing, and deletion. Balance mutations go
//! through `LedgerRepository` instead, which pairs every balance update
//! with a transaction record inside one storage transaction.

use banklink_core::ledger::{Ledger, LedgerError, types::NewAccount};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait, PaginatorTrait,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::bank_accounts;

/// Error types for account store operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// A ledger validation failure (duplicate id, non-zero balance, ...).
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Account repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new account with validation.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateAccount` if the id is already taken and
    /// `InvalidAmount` if the opening balance or overdraft limit is
    /// negative.
    pub async fn create_account(
        &self,
        input: NewAccount,
        user_id: Option<Uuid>,
    ) -> Result<bank_accounts::Model, AccountError> {
        let existing = bank_accounts::Entity::find_by_id(&input.id)
            .one(&self.db)
            .await?;

        if existing.is_some() {
            return Err(LedgerError::DuplicateAccount(input.id).into());
        }

        let account = Ledger::new_account(input)?;

        let row = bank_accounts::ActiveModel {
            id: Set(account.id),
            user_id: Set(user_id),
            account_type: Set(account.account_type),
            balance: Set(account.balance),
            overdraft_limit: Set(account.overdraft_limit),
            status: Set(account.status.into()),
            currency: Set(account.currency),
            created_at: Set(account.created_at.into()),
            updated_at: Set(account.updated_at.into()),
        };

        let row = row.insert(&self.db).await?;
        Ok(row)
    }

    /// Finds an account by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_account(
        &self,
        id: &str,
    ) -> Result<Option<bank_accounts::Model>, AccountError> {
        let account = bank_accounts::Entity::find_by_id(id).one(&self.db).await?;
        Ok(account)
    }

    /// Lists all accounts ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_accounts(&self) -> Result<Vec<bank_accounts::Model>, AccountError> {
        let accounts = bank_accounts::Entity::find()
            .order_by_asc(bank_accounts::Column::Id)
            .all(&self.db)
            .await?;
        Ok(accounts)
    }

    /// Deletes an account. Only allowed at exactly zero balance.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the account does not exist and
    /// `NonZeroBalance` if it still holds a balance.
    pub async fn delete_account(&self, id: &str) -> Result<(), AccountError> {
        let account = bank_accounts::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| LedgerError::AccountNotFound(id.to_string()))?;

        Ledger::check_deletable(&account.to_domain())?;

        account.delete(&self.db).await?;
        Ok(())
    }

    /// Checks whether an account id exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn account_exists(&self, id: &str) -> Result<bool, AccountError> {
        let count = bank_accounts::Entity::find_by_id(id).count(&self.db).await?;
        Ok(count > 0)
    }
}
