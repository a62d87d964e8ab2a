//! Ledger service: validation and application of balance mutations.
//!
//! This service contains pure business logic with no database
//! dependencies. It validates an operation against an account snapshot
//! and produces the updated snapshot together with the posting to
//! append. The repository layer persists both inside one storage
//! transaction, so either everything lands or nothing does.

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::error::LedgerError;
use super::types::{
    Account, AccountStatus, NewAccount, Posting, TransactionKind, TransferPlan, next_reference,
};

/// Stateless ledger operations.
pub struct Ledger;

impl Ledger {
    /// Validates that an amount is strictly positive.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidAmount` for zero or negative amounts.
    pub fn validate_amount(amount: Decimal) -> Result<(), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(amount));
        }
        Ok(())
    }

    /// Validates that an account is in Active status.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::AccountNotActive` otherwise.
    pub fn ensure_active(account: &Account) -> Result<(), LedgerError> {
        if !account.is_active() {
            return Err(LedgerError::AccountNotActive {
                id: account.id.clone(),
                status: account.status,
            });
        }
        Ok(())
    }

    /// Builds a new Active account from creation input.
    ///
    /// Duplicate-id detection is the account store's concern and is not
    /// checked here.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidAmount` if the opening balance or
    /// overdraft limit is negative.
    pub fn new_account(input: NewAccount) -> Result<Account, LedgerError> {
        if input.initial_balance < Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(input.initial_balance));
        }
        if input.overdraft_limit < Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(input.overdraft_limit));
        }

        let now = Utc::now();
        Ok(Account {
            id: input.id,
            account_type: input.account_type,
            balance: input.initial_balance,
            overdraft_limit: input.overdraft_limit,
            status: AccountStatus::Active,
            currency: input.currency,
            created_at: now,
            updated_at: now,
        })
    }

    /// Validates that an account may be deleted.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NonZeroBalance` unless the balance is
    /// exactly zero.
    pub fn check_deletable(account: &Account) -> Result<(), LedgerError> {
        if account.balance != Decimal::ZERO {
            return Err(LedgerError::NonZeroBalance {
                id: account.id.clone(),
                balance: account.balance,
            });
        }
        Ok(())
    }

    /// Applies a deposit to an account snapshot.
    ///
    /// Returns the updated snapshot and the Deposit posting whose
    /// `balance_after` equals the new balance.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` for non-positive amounts and
    /// `AccountNotActive` for accounts outside Active status.
    pub fn apply_deposit(
        account: &Account,
        amount: Decimal,
        description: Option<String>,
    ) -> Result<(Account, Posting), LedgerError> {
        Self::validate_amount(amount)?;
        Self::ensure_active(account)?;

        let now = Utc::now();
        let mut updated = account.clone();
        // checked: a Decimal overflow must surface as a rejection, not a panic
        updated.balance = account
            .balance
            .checked_add(amount)
            .ok_or(LedgerError::InvalidAmount(amount))?;
        updated.updated_at = now;

        let posting = Posting {
            reference: next_reference(now),
            account_id: account.id.clone(),
            kind: TransactionKind::Deposit,
            amount,
            balance_after: updated.balance,
            description: description
                .unwrap_or_else(|| format!("Deposit to account {}", account.id)),
            transfer_id: None,
            posted_at: now,
        };

        Ok((updated, posting))
    }

    /// Applies a withdrawal to an account snapshot.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientFunds` (reporting the available balance)
    /// when `balance + overdraft_limit < amount`, in addition to the
    /// deposit preconditions.
    pub fn apply_withdrawal(
        account: &Account,
        amount: Decimal,
        description: Option<String>,
    ) -> Result<(Account, Posting), LedgerError> {
        Self::validate_amount(amount)?;
        Self::ensure_active(account)?;

        if !account.can_withdraw(amount) {
            return Err(LedgerError::InsufficientFunds {
                requested: amount,
                available: account.available_balance(),
            });
        }

        let now = Utc::now();
        let mut updated = account.clone();
        updated.balance = account
            .balance
            .checked_sub(amount)
            .ok_or(LedgerError::InvalidAmount(amount))?;
        updated.updated_at = now;

        let posting = Posting {
            reference: next_reference(now),
            account_id: account.id.clone(),
            kind: TransactionKind::Withdrawal,
            amount,
            balance_after: updated.balance,
            description: description
                .unwrap_or_else(|| format!("Withdrawal from account {}", account.id)),
            transfer_id: None,
            posted_at: now,
        };

        Ok((updated, posting))
    }

    /// Plans a transfer between two accounts.
    ///
    /// The plan carries both updated snapshots and both postings
    /// (TransferOut on the source, TransferIn on the destination),
    /// cross-referenced by one correlation id. The caller must persist
    /// all four writes inside a single storage transaction.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransfer` for self-transfers, `InvalidAmount`,
    /// `AccountNotActive` for either side, and `InsufficientFunds` when
    /// the source's available balance does not cover the amount.
    pub fn plan_transfer(
        from: &Account,
        to: &Account,
        amount: Decimal,
    ) -> Result<TransferPlan, LedgerError> {
        if from.id == to.id {
            return Err(LedgerError::InvalidTransfer);
        }
        Self::validate_amount(amount)?;
        Self::ensure_active(from)?;
        Self::ensure_active(to)?;

        if !from.can_withdraw(amount) {
            return Err(LedgerError::InsufficientFunds {
                requested: amount,
                available: from.available_balance(),
            });
        }

        let now = Utc::now();
        let transfer_id = Uuid::new_v4();

        let mut updated_from = from.clone();
        updated_from.balance = from
            .balance
            .checked_sub(amount)
            .ok_or(LedgerError::InvalidAmount(amount))?;
        updated_from.updated_at = now;

        let mut updated_to = to.clone();
        updated_to.balance = to
            .balance
            .checked_add(amount)
            .ok_or(LedgerError::InvalidAmount(amount))?;
        updated_to.updated_at = now;

        let debit = Posting {
            reference: next_reference(now),
            account_id: from.id.clone(),
            kind: TransactionKind::TransferOut,
            amount,
            balance_after: updated_from.balance,
            description: format!("Transfer to account {}", to.id),
            transfer_id: Some(transfer_id),
            posted_at: now,
        };

        let credit = Posting {
            reference: next_reference(now),
            account_id: to.id.clone(),
            kind: TransactionKind::TransferIn,
            amount,
            balance_after: updated_to.balance,
            description: format!("Transfer from account {}", from.id),
            transfer_id: Some(transfer_id),
            posted_at: now,
        };

        Ok(TransferPlan {
            transfer_id,
            from: updated_from,
            to: updated_to,
            debit,
            credit,
        })
    }

    /// Fixed global lock order for two account ids.
    ///
    /// Transfers touch two rows; locking them in ascending id order
    /// prevents deadlock between concurrent opposite-direction
    /// transfers.
    #[must_use]
    pub fn lock_order<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
        if a <= b { (a, b) } else { (b, a) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn account(id: &str, balance: Decimal) -> Account {
        let now = Utc::now();
        Account {
            id: id.to_string(),
            account_type: "Cheque".to_string(),
            balance,
            overdraft_limit: Decimal::ZERO,
            status: AccountStatus::Active,
            currency: "ZAR".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_deposit_increments_balance() {
        let acc = account("ACC001", dec!(1000));
        let (updated, posting) = Ledger::apply_deposit(&acc, dec!(250), None).unwrap();

        assert_eq!(updated.balance, dec!(1250));
        assert_eq!(posting.kind, TransactionKind::Deposit);
        assert_eq!(posting.amount, dec!(250));
        assert_eq!(posting.balance_after, dec!(1250));
        assert_eq!(posting.description, "Deposit to account ACC001");
        assert!(posting.transfer_id.is_none());
        assert!(updated.updated_at >= acc.updated_at);
    }

    #[test]
    fn test_deposit_rejects_non_positive_amounts() {
        let acc = account("ACC001", dec!(1000));

        assert_eq!(
            Ledger::apply_deposit(&acc, dec!(0), None),
            Err(LedgerError::InvalidAmount(dec!(0)))
        );
        assert_eq!(
            Ledger::apply_deposit(&acc, dec!(-10), None),
            Err(LedgerError::InvalidAmount(dec!(-10)))
        );
    }

    #[test]
    fn test_deposit_rejects_inactive_account() {
        let mut acc = account("ACC001", dec!(1000));
        acc.status = AccountStatus::Frozen;

        assert!(matches!(
            Ledger::apply_deposit(&acc, dec!(10), None),
            Err(LedgerError::AccountNotActive { .. })
        ));
    }

    #[test]
    fn test_deposit_overflow_rejected_not_panicking() {
        let acc = account("ACC001", dec!(1));

        assert_eq!(
            Ledger::apply_deposit(&acc, Decimal::MAX, None),
            Err(LedgerError::InvalidAmount(Decimal::MAX))
        );
        // The snapshot the caller handed in is untouched
        assert_eq!(acc.balance, dec!(1));
    }

    #[test]
    fn test_transfer_credit_overflow_rejected() {
        let from = account("ACC001", dec!(10));
        let to = account("SAV001", Decimal::MAX);

        assert_eq!(
            Ledger::plan_transfer(&from, &to, dec!(5)),
            Err(LedgerError::InvalidAmount(dec!(5)))
        );
    }

    #[test]
    fn test_withdrawal_decrements_balance() {
        let acc = account("ACC001", dec!(1000));
        let (updated, posting) = Ledger::apply_withdrawal(&acc, dec!(400), None).unwrap();

        assert_eq!(updated.balance, dec!(600));
        assert_eq!(posting.kind, TransactionKind::Withdrawal);
        assert_eq!(posting.balance_after, dec!(600));
    }

    #[test]
    fn test_withdrawal_insufficient_funds_reports_available() {
        let acc = account("ACC001", dec!(100));

        let err = Ledger::apply_withdrawal(&acc, dec!(500), None).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientFunds {
                requested: dec!(500),
                available: dec!(100),
            }
        );
    }

    #[test]
    fn test_withdrawal_into_overdraft_allowance() {
        let mut acc = account("ACC001", dec!(100));
        acc.overdraft_limit = dec!(200);

        let (updated, _) = Ledger::apply_withdrawal(&acc, dec!(250), None).unwrap();
        assert_eq!(updated.balance, dec!(-150));

        // Past the allowance is still rejected
        assert!(matches!(
            Ledger::apply_withdrawal(&acc, dec!(300.01), None),
            Err(LedgerError::InsufficientFunds { .. })
        ));
    }

    #[test]
    fn test_transfer_produces_both_legs() {
        let from = account("ACC001", dec!(500));
        let to = account("SAV001", dec!(200));

        let plan = Ledger::plan_transfer(&from, &to, dec!(150)).unwrap();

        assert_eq!(plan.from.balance, dec!(350));
        assert_eq!(plan.to.balance, dec!(350));
        assert_eq!(plan.debit.kind, TransactionKind::TransferOut);
        assert_eq!(plan.credit.kind, TransactionKind::TransferIn);
        assert_eq!(plan.debit.amount, plan.credit.amount);
        assert_eq!(plan.debit.balance_after, dec!(350));
        assert_eq!(plan.credit.balance_after, dec!(350));
        assert_eq!(plan.debit.transfer_id, Some(plan.transfer_id));
        assert_eq!(plan.credit.transfer_id, Some(plan.transfer_id));
        assert_eq!(plan.debit.description, "Transfer to account SAV001");
        assert_eq!(plan.credit.description, "Transfer from account ACC001");
    }

    #[test]
    fn test_self_transfer_rejected_regardless_of_amount() {
        let acc = account("ACC001", dec!(500));

        for amount in [dec!(0), dec!(-5), dec!(10), dec!(10000)] {
            assert_eq!(
                Ledger::plan_transfer(&acc, &acc, amount),
                Err(LedgerError::InvalidTransfer)
            );
        }
    }

    #[test]
    fn test_transfer_insufficient_funds() {
        let from = account("ACC001", dec!(100));
        let to = account("SAV001", dec!(200));

        assert!(matches!(
            Ledger::plan_transfer(&from, &to, dec!(100.01)),
            Err(LedgerError::InsufficientFunds { .. })
        ));
    }

    #[test]
    fn test_transfer_rejects_inactive_destination() {
        let from = account("ACC001", dec!(500));
        let mut to = account("SAV001", dec!(200));
        to.status = AccountStatus::Closed;

        assert!(matches!(
            Ledger::plan_transfer(&from, &to, dec!(50)),
            Err(LedgerError::AccountNotActive { .. })
        ));
    }

    #[test]
    fn test_new_account_defaults() {
        let acc = Ledger::new_account(NewAccount {
            id: "ACC001".to_string(),
            account_type: "Cheque".to_string(),
            initial_balance: dec!(1000),
            overdraft_limit: Decimal::ZERO,
            currency: "ZAR".to_string(),
        })
        .unwrap();

        assert_eq!(acc.status, AccountStatus::Active);
        assert_eq!(acc.balance, dec!(1000));
        assert_eq!(acc.created_at, acc.updated_at);
    }

    #[test]
    fn test_new_account_rejects_negative_opening_balance() {
        let result = Ledger::new_account(NewAccount {
            id: "ACC001".to_string(),
            account_type: "Cheque".to_string(),
            initial_balance: dec!(-1),
            overdraft_limit: Decimal::ZERO,
            currency: "ZAR".to_string(),
        });

        assert_eq!(result, Err(LedgerError::InvalidAmount(dec!(-1))));
    }

    #[test]
    fn test_check_deletable() {
        let zero = account("ACC001", Decimal::ZERO);
        assert!(Ledger::check_deletable(&zero).is_ok());

        let nonzero = account("ACC001", dec!(0.01));
        assert_eq!(
            Ledger::check_deletable(&nonzero),
            Err(LedgerError::NonZeroBalance {
                id: "ACC001".to_string(),
                balance: dec!(0.01),
            })
        );
    }

    #[test]
    fn test_lock_order_is_symmetric() {
        assert_eq!(Ledger::lock_order("ACC001", "SAV001"), ("ACC001", "SAV001"));
        assert_eq!(Ledger::lock_order("SAV001", "ACC001"), ("ACC001", "SAV001"));
        assert_eq!(Ledger::lock_order("ACC001", "ACC001"), ("ACC001", "ACC001"));
    }
}
