//! Ledger repository: balance mutations and transaction history.
//!
//! Every mutation runs inside one database transaction: the account
//! row is locked with `SELECT ... FOR UPDATE`, the pure ledger logic
//! computes the new state, and the balance update plus its transaction
//! record are committed together. A transfer locks both rows in the
//! global lock order and commits all four writes atomically.

use banklink_core::ledger::{Ledger, LedgerError, Posting};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    NotSet, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::entities::{bank_accounts, transactions};

/// Error types for ledger store operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerStoreError {
    /// A ledger rule rejected the mutation.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Ledger repository for deposits, withdrawals, transfers and history.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    db: DatabaseConnection,
}

impl LedgerRepository {
    /// Creates a new ledger repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Deposits into an account and records the transaction.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` for a non-positive amount,
    /// `AccountNotFound` if the account does not exist, and
    /// `AccountNotActive` if the account is frozen or closed.
    pub async fn deposit(
        &self,
        account_id: &str,
        amount: rust_decimal::Decimal,
        description: Option<String>,
    ) -> Result<(bank_accounts::Model, transactions::Model), LedgerStoreError> {
        let txn = self.db.begin().await?;

        let row = Self::find_for_update(&txn, account_id).await?;
        let (updated, posting) = Ledger::apply_deposit(&row.to_domain(), amount, description)?;

        let row = Self::write_balance(&txn, row, &updated).await?;
        let record = Self::insert_posting(&txn, &posting).await?;

        txn.commit().await?;

        tracing::debug!(
            account_id = %row.id,
            reference = %record.reference,
            "deposit committed"
        );

        Ok((row, record))
    }

    /// Withdraws from an account and records the transaction.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientFunds` when the amount exceeds the
    /// available balance, in addition to the deposit error cases.
    pub async fn withdraw(
        &self,
        account_id: &str,
        amount: rust_decimal::Decimal,
        description: Option<String>,
    ) -> Result<(bank_accounts::Model, transactions::Model), LedgerStoreError> {
        let txn = self.db.begin().await?;

        let row = Self::find_for_update(&txn, account_id).await?;
        let (updated, posting) = Ledger::apply_withdrawal(&row.to_domain(), amount, description)?;

        let row = Self::write_balance(&txn, row, &updated).await?;
        let record = Self::insert_posting(&txn, &posting).await?;

        txn.commit().await?;

        tracing::debug!(
            account_id = %row.id,
            reference = %record.reference,
            "withdrawal committed"
        );

        Ok((row, record))
    }

    /// Transfers between two accounts atomically.
    ///
    /// Both account rows are locked in the global lock order before
    /// any state is read, so two opposing transfers cannot deadlock.
    /// Either all four writes commit or none do.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransfer` when source and destination are the
    /// same account, plus the deposit and withdrawal error cases for
    /// the respective legs.
    pub async fn transfer(
        &self,
        from_id: &str,
        to_id: &str,
        amount: rust_decimal::Decimal,
    ) -> Result<(transactions::Model, transactions::Model), LedgerStoreError> {
        if from_id == to_id {
            return Err(LedgerError::InvalidTransfer.into());
        }

        let txn = self.db.begin().await?;

        let (first, second) = Ledger::lock_order(from_id, to_id);
        let first_row = Self::find_for_update(&txn, first).await?;
        let second_row = Self::find_for_update(&txn, second).await?;

        let (from_row, to_row) = if first == from_id {
            (first_row, second_row)
        } else {
            (second_row, first_row)
        };

        let plan = Ledger::plan_transfer(&from_row.to_domain(), &to_row.to_domain(), amount)?;

        Self::write_balance(&txn, from_row, &plan.from).await?;
        Self::write_balance(&txn, to_row, &plan.to).await?;
        let debit = Self::insert_posting(&txn, &plan.debit).await?;
        let credit = Self::insert_posting(&txn, &plan.credit).await?;

        txn.commit().await?;

        tracing::debug!(
            transfer_id = %plan.transfer_id,
            from = %debit.account_id,
            to = %credit.account_id,
            "transfer committed"
        );

        Ok((debit, credit))
    }

    /// Returns an account's transaction history, newest first.
    ///
    /// Records with identical timestamps keep their insertion order
    /// via the monotonic sequence column.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the account does not exist.
    pub async fn history(
        &self,
        account_id: &str,
    ) -> Result<Vec<transactions::Model>, LedgerStoreError> {
        let exists = bank_accounts::Entity::find_by_id(account_id)
            .count(&self.db)
            .await?;
        if exists == 0 {
            return Err(LedgerError::AccountNotFound(account_id.to_string()).into());
        }

        let records = transactions::Entity::find()
            .filter(transactions::Column::AccountId.eq(account_id))
            .order_by_desc(transactions::Column::CreatedAt)
            .order_by_asc(transactions::Column::Seq)
            .all(&self.db)
            .await?;
        Ok(records)
    }

    async fn find_for_update(
        txn: &DatabaseTransaction,
        account_id: &str,
    ) -> Result<bank_accounts::Model, LedgerStoreError> {
        let row = bank_accounts::Entity::find_by_id(account_id)
            .lock_exclusive()
            .one(txn)
            .await?
            .ok_or_else(|| LedgerError::AccountNotFound(account_id.to_string()))?;
        Ok(row)
    }

    async fn write_balance(
        txn: &DatabaseTransaction,
        row: bank_accounts::Model,
        updated: &banklink_core::ledger::Account,
    ) -> Result<bank_accounts::Model, LedgerStoreError> {
        let mut active: bank_accounts::ActiveModel = row.into();
        active.balance = Set(updated.balance);
        active.updated_at = Set(updated.updated_at.into());
        let row = active.update(txn).await?;
        Ok(row)
    }

    async fn insert_posting(
        txn: &DatabaseTransaction,
        posting: &Posting,
    ) -> Result<transactions::Model, LedgerStoreError> {
        let record = transactions::ActiveModel {
            id: Set(uuid::Uuid::new_v4()),
            seq: NotSet,
            reference: Set(posting.reference.clone()),
            account_id: Set(posting.account_id.clone()),
            kind: Set(posting.kind.into()),
            amount: Set(posting.amount),
            balance_after: Set(posting.balance_after),
            description: Set(posting.description.clone()),
            transfer_id: Set(posting.transfer_id),
            created_at: Set(posting.posted_at.into()),
        };
        let record = record.insert(txn).await?;
        Ok(record)
    }
}
