// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ledger Bank Server - Account Ledger Service
//!
//! Users register, log in for a bearer token, deposit and withdraw funds, and
//! read a statement. Balances are derived from an append-only transaction log
//! kept in memory.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Password hashing, session tokens and the request gate
//! - `store` - Credential store and ledger
//! - `config` - Environment configuration
//! - `logging` - Tracing subscriber setup

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod state;
pub mod store;
