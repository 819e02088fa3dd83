// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # In-Memory Account Store
//!
//! [`InMemoryStore`] owns the [`CredentialStore`] and the [`Ledger`] and is the
//! only place where the two are touched together. It is shared between
//! requests as `Arc<tokio::sync::RwLock<InMemoryStore>>` (see
//! [`crate::state::AppState`]).
//!
//! ## Consistency
//!
//! - A user's balance always equals the sum of their deposits minus the sum of
//!   their withdrawals. It only changes inside [`Ledger::record`].
//! - Every compound operation takes `&mut self`, so holding the write lock for
//!   a single call is enough to make it atomic. In particular the funds check
//!   and the withdrawal happen in one call to
//!   [`InMemoryStore::withdraw_if_sufficient`].
//! - [`InMemoryStore::statement`] reads the balance and the transaction list
//!   under the same borrow, so a reader never sees one without the other.

pub mod credentials;
pub mod ledger;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{Amount, TransactionKind};

pub use credentials::{CredentialStore, User};
pub use ledger::{Ledger, Transaction};

/// Store-level failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("username `{0}` is already registered")]
    DuplicateUser(String),
    #[error("user `{0}` does not exist")]
    UnknownUser(String),
    #[error("insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds { balance: Decimal, requested: Decimal },
    #[error("balance would leave the supported range")]
    BalanceOverflow,
}

/// Snapshot of one account for the statement endpoint.
#[derive(Debug, Clone)]
pub struct Statement {
    pub user: User,
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    credentials: CredentialStore,
    ledger: Ledger,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find_user(&self, username: &str) -> Option<&User> {
        self.credentials.find_user(username)
    }

    pub fn create_user(&mut self, user: User) -> Result<&User, StoreError> {
        self.credentials.create_user(user)
    }

    /// Record a transaction unconditionally. Withdrawals are not checked
    /// against the balance here.
    pub fn record(
        &mut self,
        username: &str,
        kind: TransactionKind,
        amount: Amount,
    ) -> Result<Transaction, StoreError> {
        let account = self
            .credentials
            .find_user_mut(username)
            .ok_or_else(|| StoreError::UnknownUser(username.to_string()))?;
        self.ledger.record(account, kind, amount)
    }

    /// Check the balance and record the withdrawal in one step.
    pub fn withdraw_if_sufficient(
        &mut self,
        username: &str,
        amount: Amount,
    ) -> Result<Transaction, StoreError> {
        let account = self
            .credentials
            .find_user_mut(username)
            .ok_or_else(|| StoreError::UnknownUser(username.to_string()))?;

        if amount.value() > account.balance() {
            return Err(StoreError::InsufficientFunds {
                balance: account.balance(),
                requested: amount.value(),
            });
        }

        self.ledger
            .record(account, TransactionKind::Withdrawal, amount)
    }

    /// Apply a client-requested transaction, enforcing the funds rule for
    /// withdrawals.
    pub fn apply(
        &mut self,
        username: &str,
        kind: TransactionKind,
        amount: Amount,
    ) -> Result<Transaction, StoreError> {
        match kind {
            TransactionKind::Deposit => self.record(username, kind, amount),
            TransactionKind::Withdrawal => self.withdraw_if_sufficient(username, amount),
        }
    }

    pub fn list_for_user<'a>(&'a self, username: &str) -> impl Iterator<Item = &'a Transaction> + 'a {
        self.ledger.list_for_user(username)
    }

    pub fn statement(&self, username: &str) -> Result<Statement, StoreError> {
        let user = self
            .find_user(username)
            .ok_or_else(|| StoreError::UnknownUser(username.to_string()))?;

        Ok(Statement {
            user: user.clone(),
            transactions: self.list_for_user(username).cloned().collect(),
        })
    }

    pub fn user_count(&self) -> usize {
        self.credentials.len()
    }

    pub fn transaction_count(&self) -> usize {
        self.ledger.len()
    }
}
