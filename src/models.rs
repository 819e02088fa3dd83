// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! This module defines the value types shared by the ledger and the REST API,
//! plus the request and response bodies. Wire types derive `ToSchema` for the
//! OpenAPI document.
//!
//! ## Money
//!
//! Monetary values are [`rust_decimal::Decimal`], serialized as JSON strings
//! (`"60.00"`). The [`Amount`] newtype is the only way to express the value of
//! a transaction, so a non-positive or over-precise amount can never reach the
//! ledger.
//!
//! ## Model Categories
//!
//! - **Accounts**: registration input and the public user view
//! - **Sessions**: login form and issued token
//! - **Transactions**: transaction request, transaction view and statement

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::store::{Transaction, User};

/// Number of decimal places carried by every amount and balance.
pub const MONEY_SCALE: u32 = 2;

/// A zero balance at money scale (`0.00`).
pub fn zero_balance() -> Decimal {
    Decimal::new(0, MONEY_SCALE)
}

// =============================================================================
// Transaction Kind
// =============================================================================

/// Direction of a ledger transaction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    /// Funds added to the account.
    #[serde(rename = "deposito")]
    Deposit,
    /// Funds taken from the account.
    #[serde(rename = "saque")]
    Withdrawal,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Deposit => write!(f, "deposito"),
            TransactionKind::Withdrawal => write!(f, "saque"),
        }
    }
}

// =============================================================================
// Amount
// =============================================================================

/// Why a decimal was refused as a transaction amount.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("amount must be greater than zero")]
    NotPositive,
    #[error("amount must have at most 2 decimal places")]
    TooManyDecimalPlaces,
    #[error("amount is too large")]
    OutOfRange,
}

/// Strictly positive monetary amount with at most two decimal places.
///
/// The value is stored rescaled to exactly [`MONEY_SCALE`] places, so `10.5`
/// is kept and rendered as `10.50`. Trailing zeros do not count against the
/// precision limit (`10.500` is accepted).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, PartialOrd, Ord)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub fn value(self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = AmountError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        if value <= Decimal::ZERO {
            return Err(AmountError::NotPositive);
        }
        if value.normalize().scale() > MONEY_SCALE {
            return Err(AmountError::TooManyDecimalPlaces);
        }
        let mut value = value;
        value.rescale(MONEY_SCALE);
        if value.scale() != MONEY_SCALE {
            return Err(AmountError::OutOfRange);
        }
        Ok(Amount(value))
    }
}

impl From<Amount> for Decimal {
    fn from(value: Amount) -> Self {
        value.0
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Account Models
// =============================================================================

/// Request to register a new account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterRequest {
    /// Unique login name.
    pub username: String,
    /// Plain-text password. Only its hash is stored.
    pub password: String,
    /// Display name of the account owner.
    pub full_name: String,
}

/// Public view of an account. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct UserResponse {
    pub username: String,
    pub full_name: String,
    /// Current balance.
    pub balance: Decimal,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            balance: user.balance(),
        }
    }
}

// =============================================================================
// Session Models
// =============================================================================

/// Form-encoded login credentials.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Issued bearer token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// Signed JWT to send as `Authorization: Bearer <token>`.
    pub access_token: String,
    /// Always `"bearer"`.
    pub token_type: String,
}

// =============================================================================
// Transaction Models
// =============================================================================

/// Request to record a deposit or withdrawal.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateTransactionRequest {
    /// `"deposito"` or `"saque"`.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Positive amount with at most 2 decimal places.
    pub amount: Amount,
}

/// A recorded transaction as returned to its owner.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct TransactionResponse {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub timestamp: DateTime<Utc>,
}

impl From<&Transaction> for TransactionResponse {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: tx.id,
            kind: tx.kind,
            amount: tx.amount.value(),
            timestamp: tx.timestamp,
        }
    }
}

/// Account statement: owner, balance and every transaction in recording order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatementResponse {
    /// Full name of the account owner.
    pub account_owner: String,
    pub current_balance: Decimal,
    pub transactions: Vec<TransactionResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn amount_rejects_zero_and_negative() {
        assert_eq!(Amount::try_from(dec!(0)), Err(AmountError::NotPositive));
        assert_eq!(Amount::try_from(dec!(-5.00)), Err(AmountError::NotPositive));
    }

    #[test]
    fn amount_rejects_more_than_two_places() {
        assert_eq!(
            Amount::try_from(dec!(10.125)),
            Err(AmountError::TooManyDecimalPlaces)
        );
    }

    #[test]
    fn amount_rejects_values_without_room_for_cents() {
        assert_eq!(
            Amount::try_from(rust_decimal::Decimal::MAX),
            Err(AmountError::OutOfRange)
        );
    }

    #[test]
    fn amount_is_rescaled_to_two_places() {
        let amount = Amount::try_from(dec!(10.5)).unwrap();
        assert_eq!(amount.to_string(), "10.50");

        let trailing = Amount::try_from(dec!(7.500)).unwrap();
        assert_eq!(trailing.to_string(), "7.50");

        let whole = Amount::try_from(dec!(100)).unwrap();
        assert_eq!(whole.to_string(), "100.00");
    }

    #[test]
    fn transaction_request_accepts_numbers_and_strings() {
        let from_number: CreateTransactionRequest =
            serde_json::from_str(r#"{"type":"deposito","amount":100.25}"#).unwrap();
        assert_eq!(from_number.kind, TransactionKind::Deposit);
        assert_eq!(from_number.amount.value(), dec!(100.25));

        let from_string: CreateTransactionRequest =
            serde_json::from_str(r#"{"type":"saque","amount":"40"}"#).unwrap();
        assert_eq!(from_string.kind, TransactionKind::Withdrawal);
        assert_eq!(from_string.amount.to_string(), "40.00");
    }

    #[test]
    fn transaction_request_rejects_bad_input() {
        assert!(serde_json::from_str::<CreateTransactionRequest>(
            r#"{"type":"transferencia","amount":"1.00"}"#
        )
        .is_err());
        assert!(serde_json::from_str::<CreateTransactionRequest>(
            r#"{"type":"deposito","amount":"-1.00"}"#
        )
        .is_err());
        assert!(serde_json::from_str::<CreateTransactionRequest>(
            r#"{"type":"deposito","amount":"1.001"}"#
        )
        .is_err());
    }

    #[test]
    fn decimals_serialize_as_strings() {
        let user = UserResponse {
            username: "alice".into(),
            full_name: "Alice A".into(),
            balance: zero_balance(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["balance"], "0.00");
    }
}
