//! Balance arithmetic and history replay.
//!
//! Replay is the audit primitive behind the ledger's central invariant:
//! starting from an account's opening balance and applying its postings
//! in chronological order must reproduce every stored `balance_after`.

use rust_decimal::Decimal;

use super::types::{Posting, TransactionKind};

/// Returns the signed contribution of a posting to its account balance.
///
/// Deposits and transfer-ins count positive, withdrawals and
/// transfer-outs negative. Amounts themselves are always stored positive.
#[must_use]
pub fn signed_amount(kind: TransactionKind, amount: Decimal) -> Decimal {
    if kind.is_credit() { amount } else { -amount }
}

/// A stored `balance_after` that disagrees with the replayed running balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayMismatch {
    /// Reference of the offending posting.
    pub reference: String,
    /// Balance the replay computed.
    pub expected: Decimal,
    /// Balance the posting recorded.
    pub recorded: Decimal,
}

/// Replays postings (oldest first) from an opening balance.
///
/// Returns the final balance, or the first posting whose recorded
/// `balance_after` disagrees with the running balance.
///
/// # Errors
///
/// Returns `ReplayMismatch` describing the first disagreement.
pub fn replay(initial_balance: Decimal, postings: &[Posting]) -> Result<Decimal, ReplayMismatch> {
    let mut running = initial_balance;

    for posting in postings {
        running += signed_amount(posting.kind, posting.amount);
        if running != posting.balance_after {
            return Err(ReplayMismatch {
                reference: posting.reference.clone(),
                expected: running,
                recorded: posting.balance_after,
            });
        }
    }

    Ok(running)
}

/// Sums the signed amounts of a posting slice.
///
/// For a consistent history this equals `balance - initial_balance`.
#[must_use]
pub fn net_change(postings: &[Posting]) -> Decimal {
    postings
        .iter()
        .map(|p| signed_amount(p.kind, p.amount))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn posting(kind: TransactionKind, amount: Decimal, balance_after: Decimal) -> Posting {
        Posting {
            reference: format!("TXN-test-{kind}-{amount}"),
            account_id: "ACC001".to_string(),
            kind,
            amount,
            balance_after,
            description: String::new(),
            transfer_id: None,
            posted_at: Utc::now(),
        }
    }

    #[rstest]
    #[case(TransactionKind::Deposit, dec!(10))]
    #[case(TransactionKind::TransferIn, dec!(10))]
    #[case(TransactionKind::Withdrawal, dec!(-10))]
    #[case(TransactionKind::TransferOut, dec!(-10))]
    fn test_signed_amount(#[case] kind: TransactionKind, #[case] expected: Decimal) {
        assert_eq!(signed_amount(kind, dec!(10)), expected);
    }

    #[test]
    fn test_replay_consistent_history() {
        let history = vec![
            posting(TransactionKind::Deposit, dec!(100), dec!(1100)),
            posting(TransactionKind::Withdrawal, dec!(250), dec!(850)),
            posting(TransactionKind::TransferOut, dec!(50), dec!(800)),
            posting(TransactionKind::TransferIn, dec!(25), dec!(825)),
        ];

        let result = replay(dec!(1000), &history);
        assert_eq!(result, Ok(dec!(825)));
    }

    #[test]
    fn test_replay_detects_mismatch() {
        let history = vec![
            posting(TransactionKind::Deposit, dec!(100), dec!(1100)),
            // Recorded balance disagrees with 1100 - 40 = 1060
            posting(TransactionKind::Withdrawal, dec!(40), dec!(1050)),
        ];

        let err = replay(dec!(1000), &history).unwrap_err();
        assert_eq!(err.expected, dec!(1060));
        assert_eq!(err.recorded, dec!(1050));
    }

    #[test]
    fn test_replay_empty_history() {
        assert_eq!(replay(dec!(42), &[]), Ok(dec!(42)));
    }

    #[test]
    fn test_net_change_equals_balance_delta() {
        let history = vec![
            posting(TransactionKind::Deposit, dec!(100), dec!(1100)),
            posting(TransactionKind::Withdrawal, dec!(250), dec!(850)),
        ];

        // balance - initial_balance = 850 - 1000
        assert_eq!(net_change(&history), dec!(-150));
    }
}
