// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::{PasswordError, PasswordService, TokenService};
use crate::config::AppConfig;
use crate::store::InMemoryStore;

/// Shared handles injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<InMemoryStore>>,
    pub tokens: Arc<TokenService>,
    pub passwords: Arc<PasswordService>,
}

impl AppState {
    pub fn new(store: InMemoryStore, tokens: TokenService, passwords: PasswordService) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            tokens: Arc::new(tokens),
            passwords: Arc::new(passwords),
        }
    }

    /// Empty store with the configured secret, token TTL and hashing cost.
    pub fn from_config(config: &AppConfig) -> Result<Self, PasswordError> {
        Ok(Self::new(
            InMemoryStore::new(),
            TokenService::new(config.secret_key.as_bytes(), config.token_ttl),
            PasswordService::new(config.password_cost)?,
        ))
    }

    #[cfg(test)]
    pub(crate) fn for_tests() -> Self {
        Self::new(
            InMemoryStore::new(),
            TokenService::new(b"test-secret", chrono::Duration::minutes(30)),
            PasswordService::new(crate::auth::password::cheap_cost())
                .expect("cheap password cost is valid"),
        )
    }
}
