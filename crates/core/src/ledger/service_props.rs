//! Property tests for ledger invariants.

use chrono::Utc;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::balance::{net_change, replay};
use super::error::LedgerError;
use super::service::Ledger;
use super::types::{Account, AccountStatus, Posting};

fn account(id: &str, balance: Decimal, overdraft: Decimal) -> Account {
    let now = Utc::now();
    Account {
        id: id.to_string(),
        account_type: "Cheque".to_string(),
        balance,
        overdraft_limit: overdraft,
        status: AccountStatus::Active,
        currency: "ZAR".to_string(),
        created_at: now,
        updated_at: now,
    }
}

/// Positive cent-precision amounts up to 1,000,000.00.
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..=100_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Non-negative cent-precision opening balances.
fn balance_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=100_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

#[derive(Debug, Clone)]
enum Op {
    Deposit(Decimal),
    Withdraw(Decimal),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        amount_strategy().prop_map(Op::Deposit),
        amount_strategy().prop_map(Op::Withdraw),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Replaying any history the ledger produced reproduces every stored
    /// `balance_after`, and the signed sum equals `balance - initial`.
    #[test]
    fn prop_replay_reproduces_history(
        initial in balance_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..30),
    ) {
        let mut acc = account("ACC001", initial, Decimal::ZERO);
        let mut history: Vec<Posting> = Vec::new();

        for op in ops {
            let result = match op {
                Op::Deposit(amount) => Ledger::apply_deposit(&acc, amount, None),
                Op::Withdraw(amount) => Ledger::apply_withdrawal(&acc, amount, None),
            };
            // Rejected operations must leave no trace
            if let Ok((updated, posting)) = result {
                acc = updated;
                history.push(posting);
            }
        }

        prop_assert_eq!(replay(initial, &history), Ok(acc.balance));
        prop_assert_eq!(net_change(&history), acc.balance - initial);
        prop_assert!(acc.balance >= Decimal::ZERO);
    }

    /// A deposit of `a` followed by a withdrawal of `a` (or the reverse,
    /// when funds allow) restores the original balance and produces
    /// exactly two postings.
    #[test]
    fn prop_deposit_withdraw_same_amount_is_identity(
        initial in balance_strategy(),
        amount in amount_strategy(),
        deposit_first in any::<bool>(),
    ) {
        let acc = account("ACC001", initial, Decimal::ZERO);

        let outcome = if deposit_first {
            let (mid, p1) = Ledger::apply_deposit(&acc, amount, None).unwrap();
            let (fin, p2) = Ledger::apply_withdrawal(&mid, amount, None).unwrap();
            Some((fin, p1, p2))
        } else if initial >= amount {
            let (mid, p1) = Ledger::apply_withdrawal(&acc, amount, None).unwrap();
            let (fin, p2) = Ledger::apply_deposit(&mid, amount, None).unwrap();
            Some((fin, p1, p2))
        } else {
            None
        };

        if let Some((fin, p1, p2)) = outcome {
            prop_assert_eq!(fin.balance, initial);
            prop_assert_eq!(replay(initial, &[p1, p2]), Ok(initial));
        }
    }

    /// Transfers conserve money: the sum of both balances is unchanged,
    /// and both legs carry the same amount and correct `balance_after`.
    #[test]
    fn prop_transfer_conserves_total(
        from_balance in balance_strategy(),
        to_balance in balance_strategy(),
        amount in amount_strategy(),
    ) {
        let from = account("ACC001", from_balance, Decimal::ZERO);
        let to = account("SAV001", to_balance, Decimal::ZERO);

        match Ledger::plan_transfer(&from, &to, amount) {
            Ok(plan) => {
                prop_assert_eq!(
                    plan.from.balance + plan.to.balance,
                    from_balance + to_balance
                );
                prop_assert_eq!(plan.from.balance, from_balance - amount);
                prop_assert_eq!(plan.to.balance, to_balance + amount);
                prop_assert_eq!(plan.debit.amount, amount);
                prop_assert_eq!(plan.credit.amount, amount);
                prop_assert_eq!(plan.debit.balance_after, plan.from.balance);
                prop_assert_eq!(plan.credit.balance_after, plan.to.balance);
            }
            Err(LedgerError::InsufficientFunds { available, .. }) => {
                prop_assert!(amount > available);
            }
            Err(e) => return Err(TestCaseError::fail(format!("unexpected error: {e}"))),
        }
    }

    /// A failed withdrawal has zero side effects on the snapshot it was
    /// given (the repository never writes anything for it).
    #[test]
    fn prop_rejected_withdrawal_changes_nothing(
        initial in balance_strategy(),
        excess in amount_strategy(),
    ) {
        let acc = account("ACC001", initial, Decimal::ZERO);
        let amount = initial + excess;

        let result = Ledger::apply_withdrawal(&acc, amount, None);
        prop_assert_eq!(
            result,
            Err(LedgerError::InsufficientFunds {
                requested: amount,
                available: initial,
            })
        );
        prop_assert_eq!(acc.balance, initial);
    }

    /// Lock order is independent of argument order, so two concurrent
    /// opposite-direction transfers always acquire locks identically.
    #[test]
    fn prop_lock_order_symmetric(a in "[A-Z]{3}[0-9]{3}", b in "[A-Z]{3}[0-9]{3}") {
        prop_assert_eq!(Ledger::lock_order(&a, &b), Ledger::lock_order(&b, &a));
        let (first, second) = Ledger::lock_order(&a, &b);
        prop_assert!(first <= second);
    }
}
