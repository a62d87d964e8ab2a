//! Ledger domain types: accounts, postings, and transfer plans.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a bank account.
///
/// Only `Active` accounts participate in deposits, withdrawals, and
/// transfers. Status transitions are an external concern; the ledger
/// only reads the status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountStatus {
    /// Account is open and may be mutated.
    Active,
    /// Account is dormant.
    Inactive,
    /// Account is administratively suspended.
    Suspended,
    /// Account has been closed.
    Closed,
    /// Account is frozen pending review.
    Frozen,
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Inactive => write!(f, "Inactive"),
            Self::Suspended => write!(f, "Suspended"),
            Self::Closed => write!(f, "Closed"),
            Self::Frozen => write!(f, "Frozen"),
        }
    }
}

impl std::str::FromStr for AccountStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ACTIVE" => Ok(Self::Active),
            "INACTIVE" => Ok(Self::Inactive),
            "SUSPENDED" => Ok(Self::Suspended),
            "CLOSED" => Ok(Self::Closed),
            "FROZEN" => Ok(Self::Frozen),
            _ => Err(format!("Unknown account status: {s}")),
        }
    }
}

/// Kind of a ledger transaction. Sign is implied by the kind; amounts
/// are always stored as positive magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    /// Money paid into an account.
    Deposit,
    /// Money taken out of an account.
    Withdrawal,
    /// Credit leg of a transfer.
    TransferIn,
    /// Debit leg of a transfer.
    TransferOut,
}

impl TransactionKind {
    /// Returns true if this kind increases the account balance.
    #[must_use]
    pub const fn is_credit(self) -> bool {
        matches!(self, Self::Deposit | Self::TransferIn)
    }

    /// Returns true if this kind decreases the account balance.
    #[must_use]
    pub const fn is_debit(self) -> bool {
        !self.is_credit()
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Deposit => write!(f, "DEPOSIT"),
            Self::Withdrawal => write!(f, "WITHDRAWAL"),
            Self::TransferIn => write!(f, "TRANSFER_IN"),
            Self::TransferOut => write!(f, "TRANSFER_OUT"),
        }
    }
}

/// Snapshot of a bank account as the ledger sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique account identifier (opaque string, e.g. "ACC001").
    pub id: String,
    /// Account category for display (e.g. "Cheque", "Savings"). Open set,
    /// no behavioral differentiation.
    pub account_type: String,
    /// Current balance.
    pub balance: Decimal,
    /// Negative-balance allowance. Zero for accounts without overdraft.
    pub overdraft_limit: Decimal,
    /// Lifecycle status.
    pub status: AccountStatus,
    /// ISO 4217 currency code, display only.
    pub currency: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every balance mutation.
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// The ceiling against which withdrawals are checked.
    #[must_use]
    pub fn available_balance(&self) -> Decimal {
        self.balance.saturating_add(self.overdraft_limit)
    }

    /// Returns true if the account may be mutated.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }

    /// Returns true if the available balance covers the amount.
    #[must_use]
    pub fn can_withdraw(&self, amount: Decimal) -> bool {
        self.available_balance() >= amount
    }
}

/// Input for creating a new account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Unique account identifier.
    pub id: String,
    /// Account category (e.g. "Cheque", "Savings").
    pub account_type: String,
    /// Opening balance. Must not be negative.
    pub initial_balance: Decimal,
    /// Negative-balance allowance.
    pub overdraft_limit: Decimal,
    /// ISO 4217 currency code.
    pub currency: String,
}

/// An immutable transaction record emitted for every balance mutation.
///
/// Postings are append-only: once written they are never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    /// Externally visible transaction reference, time-derived.
    pub reference: String,
    /// Owning account id.
    pub account_id: String,
    /// Transaction kind.
    pub kind: TransactionKind,
    /// Positive magnitude; sign is implied by `kind`.
    pub amount: Decimal,
    /// Account balance immediately after this posting was applied.
    pub balance_after: Decimal,
    /// Human-readable description.
    pub description: String,
    /// Correlation id linking the two legs of a transfer.
    pub transfer_id: Option<Uuid>,
    /// When the posting was created; sort key for history retrieval.
    pub posted_at: DateTime<Utc>,
}

/// Result of planning a transfer: both updated account snapshots and
/// both postings, sharing one correlation id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferPlan {
    /// Correlation id shared by both legs.
    pub transfer_id: Uuid,
    /// Updated source account snapshot.
    pub from: Account,
    /// Updated destination account snapshot.
    pub to: Account,
    /// TransferOut posting on the source account.
    pub debit: Posting,
    /// TransferIn posting on the destination account.
    pub credit: Posting,
}

/// Counter disambiguating references generated within one millisecond.
static REFERENCE_SEQ: AtomicU64 = AtomicU64::new(0);

/// Generates an externally visible transaction reference.
///
/// Time-derived ("TXN" + epoch milliseconds) like the references the
/// system has always handed out, with a rolling counter suffix so two
/// postings created in the same millisecond stay unique.
#[must_use]
pub fn next_reference(now: DateTime<Utc>) -> String {
    let seq = REFERENCE_SEQ.fetch_add(1, Ordering::Relaxed) % 10_000;
    format!("TXN{}{seq:04}", now.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    fn account(balance: Decimal, overdraft: Decimal) -> Account {
        let now = Utc::now();
        Account {
            id: "ACC001".to_string(),
            account_type: "Cheque".to_string(),
            balance,
            overdraft_limit: overdraft,
            status: AccountStatus::Active,
            currency: "ZAR".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_available_balance_includes_overdraft() {
        let acc = account(dec!(100), dec!(50));
        assert_eq!(acc.available_balance(), dec!(150));
        assert!(acc.can_withdraw(dec!(150)));
        assert!(!acc.can_withdraw(dec!(150.01)));
    }

    #[test]
    fn test_kind_sign_classification() {
        assert!(TransactionKind::Deposit.is_credit());
        assert!(TransactionKind::TransferIn.is_credit());
        assert!(TransactionKind::Withdrawal.is_debit());
        assert!(TransactionKind::TransferOut.is_debit());
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            AccountStatus::Active,
            AccountStatus::Inactive,
            AccountStatus::Suspended,
            AccountStatus::Closed,
            AccountStatus::Frozen,
        ] {
            let parsed = AccountStatus::from_str(&status.to_string()).unwrap();
            assert_eq!(parsed, status);
        }
        assert!(AccountStatus::from_str("bogus").is_err());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(TransactionKind::Deposit.to_string(), "DEPOSIT");
        assert_eq!(TransactionKind::TransferOut.to_string(), "TRANSFER_OUT");
    }

    #[test]
    fn test_references_are_unique_at_same_instant() {
        let now = Utc::now();
        let a = next_reference(now);
        let b = next_reference(now);
        assert_ne!(a, b);
        assert!(a.starts_with("TXN"));
    }
}
