// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Deposit and withdrawal endpoint.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::Auth,
    error::ApiError,
    models::{CreateTransactionRequest, TransactionResponse},
    state::AppState,
    store::StoreError,
};

/// Record a deposit or withdrawal for the authenticated user.
///
/// A withdrawal larger than the current balance is refused and nothing is
/// recorded. The balance check and the write happen under one lock.
#[utoipa::path(
    post,
    path = "/transacoes",
    tag = "Transactions",
    security(("bearer" = [])),
    request_body = CreateTransactionRequest,
    responses(
        (status = 201, description = "Transaction recorded", body = TransactionResponse),
        (status = 400, description = "Insufficient funds"),
        (status = 401, description = "Unauthorized - invalid or missing token"),
        (status = 422, description = "Unknown type, non-positive amount or more than 2 decimal places")
    )
)]
pub async fn create_transaction(
    Auth(user): Auth,
    State(state): State<AppState>,
    payload: Result<Json<CreateTransactionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TransactionResponse>), ApiError> {
    let Json(request) = payload?;

    let result = state
        .store
        .write()
        .await
        .apply(&user.username, request.kind, request.amount);

    let transaction = match result {
        Ok(transaction) => transaction,
        Err(err @ StoreError::InsufficientFunds { .. }) => {
            tracing::info!(username = %user.username, amount = %request.amount, "withdrawal refused");
            return Err(err.into());
        }
        Err(err) => return Err(err.into()),
    };

    tracing::info!(
        username = %user.username,
        transaction_id = %transaction.id,
        kind = %transaction.kind,
        amount = %transaction.amount,
        "transaction recorded"
    );

    Ok((StatusCode::CREATED, Json(TransactionResponse::from(&transaction))))
}
