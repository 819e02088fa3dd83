// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Password hashing, session tokens and the request gate for protected routes.
//!
//! ## Auth Flow
//!
//! 1. Client registers; the password is stored as an Argon2id hash
//! 2. Client logs in with a form-encoded username/password and receives an
//!    HS256 JWT (`sub` = username, `exp` = now + TTL)
//! 3. Client sends `Authorization: Bearer <token>` on protected routes
//! 4. Server:
//!    - Verifies the JWT signature and expiry
//!    - Resolves `sub` to a registered account
//!
//! ## Security
//!
//! - Login failures look the same whether the username exists or not
//! - Token verification failures are not distinguished from each other
//! - No server-side sessions: a token is valid until it expires

pub mod claims;
pub mod error;
pub mod extractor;
pub mod password;
pub mod token;

pub use claims::{AuthenticatedUser, Claims};
pub use error::AuthError;
pub use extractor::Auth;
pub use password::{PasswordCost, PasswordError, PasswordService};
pub use token::{TokenService, TOKEN_TYPE};
