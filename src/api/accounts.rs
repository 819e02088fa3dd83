// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Registration and login endpoints.

use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection},
        State,
    },
    http::StatusCode,
    Form, Json,
};

use crate::{
    auth::TOKEN_TYPE,
    error::ApiError,
    models::{LoginForm, RegisterRequest, TokenResponse, UserResponse},
    state::AppState,
    store::User,
};

/// Register a new account.
///
/// The password is stored as a salted Argon2id hash and never returned. New
/// accounts start with a `0.00` balance.
#[utoipa::path(
    post,
    path = "/auth/registro",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Username already exists"),
        (status = 422, description = "Malformed request body")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let Json(request) = payload?;

    if request.username.trim().is_empty() {
        return Err(ApiError::unprocessable("username must not be empty"));
    }
    if request.password.is_empty() {
        return Err(ApiError::unprocessable("password must not be empty"));
    }

    // Skip the expensive hash when the name is obviously taken. The insert
    // below still re-checks under the write lock.
    if state.store.read().await.find_user(&request.username).is_some() {
        return Err(ApiError::bad_request("Username already exists."));
    }

    let passwords = state.passwords.clone();
    let password = request.password;
    let password_hash = tokio::task::spawn_blocking(move || passwords.hash_password(&password))
        .await
        .map_err(|e| ApiError::internal(format!("Password hashing task failed: {e}")))?
        .map_err(|e| ApiError::internal(e.to_string()))?;

    let user = User::new(request.username, request.full_name, password_hash);
    let response = {
        let mut store = state.store.write().await;
        UserResponse::from(store.create_user(user)?)
    };

    tracing::info!(username = %response.username, "account registered");

    Ok((StatusCode::CREATED, Json(response)))
}

/// Exchange username and password for a bearer token.
///
/// Unknown usernames and wrong passwords produce the same response.
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Auth",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Login failed"),
        (status = 422, description = "Malformed form body")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    let Form(credentials) = form?;

    let stored_hash = state
        .store
        .read()
        .await
        .find_user(&credentials.username)
        .map(|user| user.password_hash.clone());

    let passwords = state.passwords.clone();
    let password = credentials.password;
    let verified = tokio::task::spawn_blocking(move || match stored_hash {
        Some(hash) => passwords.verify_password(&password, &hash),
        None => passwords.verify_dummy(&password),
    })
    .await
    .map_err(|e| ApiError::internal(format!("Password verification task failed: {e}")))?;

    if !verified {
        tracing::warn!(username = %credentials.username, "login failed");
        return Err(ApiError::authentication_failed());
    }

    let access_token = state
        .tokens
        .issue_token(&credentials.username)
        .map_err(|e| ApiError::internal(format!("Failed to issue token: {e}")))?;

    tracing::info!(username = %credentials.username, "token issued");

    Ok(Json(TokenResponse {
        access_token,
        token_type: TOKEN_TYPE.to_string(),
    }))
}
