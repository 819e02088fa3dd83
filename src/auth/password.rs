// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Password hashing with Argon2id.
//!
//! Hashes are PHC strings (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`), so
//! each one carries its own salt and cost parameters. Verification always
//! uses the parameters embedded in the stored hash, which keeps old hashes
//! valid after the configured cost changes.
//!
//! Hashing is deliberately slow. Handlers call into this module from
//! `tokio::task::spawn_blocking`.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use thiserror::Error;

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordCost {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Number of passes.
    pub iterations: u32,
    /// Degree of parallelism.
    pub parallelism: u32,
}

impl Default for PasswordCost {
    /// OWASP baseline for Argon2id: 19 MiB, 2 passes, 1 lane.
    fn default() -> Self {
        Self {
            memory_kib: 19_456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("invalid password hashing parameters: {0}")]
    InvalidCost(String),
    #[error("password hashing failed: {0}")]
    Hashing(String),
}

/// Hashes and verifies account passwords.
pub struct PasswordService {
    argon2: Argon2<'static>,
    /// Hash of a random throwaway password, verified against when the login
    /// username does not exist.
    dummy_hash: String,
}

impl PasswordService {
    pub fn new(cost: PasswordCost) -> Result<Self, PasswordError> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(|e| PasswordError::InvalidCost(e.to_string()))?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        let throwaway = SaltString::generate(&mut OsRng);
        let dummy_hash = hash_with(&argon2, throwaway.as_str())?;

        Ok(Self { argon2, dummy_hash })
    }

    /// Salted one-way hash of `plain`.
    pub fn hash_password(&self, plain: &str) -> Result<String, PasswordError> {
        hash_with(&self.argon2, plain)
    }

    /// True iff `plain` matches `hash`. A malformed hash never matches.
    pub fn verify_password(&self, plain: &str, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };
        self.argon2
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok()
    }

    /// Burn one verification's worth of work and return false.
    pub fn verify_dummy(&self, plain: &str) -> bool {
        let _ = self.verify_password(plain, &self.dummy_hash);
        false
    }
}

fn hash_with(argon2: &Argon2<'_>, plain: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    argon2
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::Hashing(e.to_string()))
}

#[cfg(test)]
pub(crate) fn cheap_cost() -> PasswordCost {
    PasswordCost {
        memory_kib: Params::MIN_M_COST,
        iterations: 1,
        parallelism: 1,
    }
}
