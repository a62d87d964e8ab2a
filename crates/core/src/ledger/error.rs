//! Ledger error types.

use rust_decimal::Decimal;
use thiserror::Error;

use super::types::AccountStatus;

/// Errors raised by ledger operations.
///
/// All variants are caller-recoverable validation failures; storage
/// failures are a separate category carried by the repository layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Amount must be strictly positive (or non-negative for opening balances).
    #[error("Invalid amount: {0}")]
    InvalidAmount(Decimal),

    /// Account does not exist.
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Account id already exists.
    #[error("Account '{0}' already exists")]
    DuplicateAccount(String),

    /// Available balance (balance + overdraft limit) is below the requested amount.
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        /// The amount that was requested.
        requested: Decimal,
        /// The available balance (balance + overdraft limit).
        available: Decimal,
    },

    /// Source and destination of a transfer are the same account.
    #[error("Cannot transfer to the same account")]
    InvalidTransfer,

    /// Account is not in Active status.
    #[error("Account '{id}' is not active (status: {status})")]
    AccountNotActive {
        /// The account id.
        id: String,
        /// The account's current status.
        status: AccountStatus,
    },

    /// Account still holds a balance and cannot be deleted.
    #[error("Cannot delete account '{id}' with non-zero balance: {balance}")]
    NonZeroBalance {
        /// The account id.
        id: String,
        /// The remaining balance.
        balance: Decimal,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_display() {
        assert_eq!(
            LedgerError::InvalidAmount(dec!(-5)).to_string(),
            "Invalid amount: -5"
        );
        assert_eq!(
            LedgerError::AccountNotFound("ACC001".into()).to_string(),
            "Account not found: ACC001"
        );
        assert_eq!(
            LedgerError::InsufficientFunds {
                requested: dec!(500),
                available: dec!(100),
            }
            .to_string(),
            "Insufficient funds: requested 500, available 100"
        );
        assert_eq!(
            LedgerError::AccountNotActive {
                id: "ACC001".into(),
                status: AccountStatus::Frozen,
            }
            .to_string(),
            "Account 'ACC001' is not active (status: Frozen)"
        );
    }
}
