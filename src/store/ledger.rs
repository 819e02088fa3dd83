// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Append-only transaction log.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{credentials::User, StoreError};
use crate::models::{Amount, TransactionKind, MONEY_SCALE};

/// An immutable ledger entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub id: Uuid,
    /// Username of the owning account.
    pub user_id: String,
    pub kind: TransactionKind,
    pub amount: Amount,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct Ledger {
    entries: Vec<Transaction>,
    /// Positions in `entries` for each username, in recording order.
    by_user: HashMap<String, Vec<usize>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a transaction for `account` and apply it to the cached balance.
    ///
    /// The new balance is computed before anything is written, so a failure
    /// leaves both the log and the balance unchanged. No funds check happens
    /// here; see [`super::InMemoryStore::withdraw_if_sufficient`].
    pub fn record(
        &mut self,
        account: &mut User,
        kind: TransactionKind,
        amount: Amount,
    ) -> Result<Transaction, StoreError> {
        let balance = account.balance();
        // `User::new` starts at 0.00 and every `Amount` is scale 2, so a
        // scale change below can only come from mantissa overflow.
        debug_assert_eq!(balance.scale(), MONEY_SCALE);
        let updated = match kind {
            TransactionKind::Deposit => balance.checked_add(amount.value()),
            TransactionKind::Withdrawal => balance.checked_sub(amount.value()),
        }
        // Decimal drops scale instead of failing when the mantissa is full.
        .filter(|updated| updated.scale() == MONEY_SCALE)
        .ok_or(StoreError::BalanceOverflow)?;

        let transaction = Transaction {
            id: Uuid::new_v4(),
            user_id: account.username.clone(),
            kind,
            amount,
            timestamp: Utc::now(),
        };

        self.by_user
            .entry(transaction.user_id.clone())
            .or_default()
            .push(self.entries.len());
        self.entries.push(transaction.clone());
        account.set_balance(updated);

        Ok(transaction)
    }

    /// Transactions owned by `username`, oldest first.
    pub fn list_for_user<'a>(&'a self, username: &str) -> impl Iterator<Item = &'a Transaction> + 'a {
        self.by_user
            .get(username)
            .map(|positions| positions.as_slice())
            .unwrap_or_default()
            .iter()
            .map(move |&position| &self.entries[position])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn amount(value: rust_decimal::Decimal) -> Amount {
        Amount::try_from(value).unwrap()
    }

    #[test]
    fn record_updates_balance_and_appends() {
        let mut ledger = Ledger::new();
        let mut alice = User::new("alice", "Alice A", "h");

        let deposit = ledger
            .record(&mut alice, TransactionKind::Deposit, amount(dec!(100)))
            .unwrap();
        assert_eq!(deposit.user_id, "alice");
        assert_eq!(alice.balance(), dec!(100.00));

        ledger
            .record(&mut alice, TransactionKind::Withdrawal, amount(dec!(40)))
            .unwrap();
        assert_eq!(alice.balance(), dec!(60.00));
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn record_assigns_unique_ids() {
        let mut ledger = Ledger::new();
        let mut alice = User::new("alice", "Alice A", "h");

        let first = ledger
            .record(&mut alice, TransactionKind::Deposit, amount(dec!(1)))
            .unwrap();
        let second = ledger
            .record(&mut alice, TransactionKind::Deposit, amount(dec!(1)))
            .unwrap();
        assert_ne!(first.id, second.id);
        assert!(first.timestamp <= second.timestamp);
    }

    #[test]
    fn list_for_user_filters_and_keeps_order() {
        let mut ledger = Ledger::new();
        let mut alice = User::new("alice", "Alice A", "h");
        let mut bob = User::new("bob", "Bob B", "h");

        ledger
            .record(&mut alice, TransactionKind::Deposit, amount(dec!(10)))
            .unwrap();
        ledger
            .record(&mut bob, TransactionKind::Deposit, amount(dec!(99)))
            .unwrap();
        ledger
            .record(&mut alice, TransactionKind::Withdrawal, amount(dec!(3)))
            .unwrap();

        let amounts: Vec<_> = ledger
            .list_for_user("alice")
            .map(|tx| tx.amount.value())
            .collect();
        assert_eq!(amounts, vec![dec!(10.00), dec!(3.00)]);

        // Listing again yields the same sequence.
        assert_eq!(ledger.list_for_user("alice").count(), 2);
        assert_eq!(ledger.list_for_user("carol").count(), 0);
    }

    #[test]
    fn overflow_leaves_log_and_balance_untouched() {
        let mut ledger = Ledger::new();
        let mut alice = User::new("alice", "Alice A", "h");
        let huge = amount(dec!(500000000000000000000000000));

        ledger
            .record(&mut alice, TransactionKind::Deposit, huge)
            .unwrap();
        let err = ledger
            .record(&mut alice, TransactionKind::Deposit, huge)
            .unwrap_err();

        assert_eq!(err, StoreError::BalanceOverflow);
        assert_eq!(ledger.len(), 1);
        assert_eq!(alice.balance(), huge.value());
    }
}
