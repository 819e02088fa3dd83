// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Credential store: user records keyed by username.

use std::collections::HashMap;

use rust_decimal::Decimal;

use super::StoreError;
use crate::models::zero_balance;

/// A registered account holder.
///
/// The balance is a materialized sum of the user's ledger entries. It can only
/// be changed by [`super::Ledger::record`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub full_name: String,
    /// PHC-formatted Argon2id hash.
    pub password_hash: String,
    balance: Decimal,
}

impl User {
    /// New account with a `0.00` balance.
    pub fn new(
        username: impl Into<String>,
        full_name: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            full_name: full_name.into(),
            password_hash: password_hash.into(),
            balance: zero_balance(),
        }
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub(super) fn set_balance(&mut self, balance: Decimal) {
        self.balance = balance;
    }
}

#[derive(Debug, Default)]
pub struct CredentialStore {
    users: HashMap<String, User>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find_user(&self, username: &str) -> Option<&User> {
        self.users.get(username)
    }

    /// Insert a user unless the username is taken. An existing record is left
    /// untouched.
    pub fn create_user(&mut self, user: User) -> Result<&User, StoreError> {
        use std::collections::hash_map::Entry;

        match self.users.entry(user.username.clone()) {
            Entry::Occupied(_) => Err(StoreError::DuplicateUser(user.username)),
            Entry::Vacant(slot) => Ok(slot.insert(user)),
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub(super) fn find_user_mut(&mut self, username: &str) -> Option<&mut User> {
        self.users.get_mut(username)
    }
}
