// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account statement endpoint.

use axum::{extract::State, Json};

use crate::{
    auth::Auth,
    error::ApiError,
    models::{StatementResponse, TransactionResponse},
    state::AppState,
};

/// Get the authenticated user's balance and transactions, oldest first.
#[utoipa::path(
    get,
    path = "/meu-extrato",
    tag = "Transactions",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Account statement", body = StatementResponse),
        (status = 401, description = "Unauthorized - invalid or missing token"),
    )
)]
pub async fn get_statement(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Result<Json<StatementResponse>, ApiError> {
    let statement = state.store.read().await.statement(&user.username)?;

    Ok(Json(StatementResponse {
        account_owner: statement.user.full_name.clone(),
        current_balance: statement.user.balance(),
        transactions: statement
            .transactions
            .iter()
            .map(TransactionResponse::from)
            .collect(),
    }))
}
