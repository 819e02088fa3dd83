// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for authenticated users.
//!
//! Use the `Auth` extractor in handlers to require authentication:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user is AuthenticatedUser
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use super::{AuthError, AuthenticatedUser};
use crate::state::AppState;

/// Extractor for authenticated users.
///
/// Reads `Authorization: Bearer <token>`, verifies the token and resolves its
/// subject to a registered account. Any failure rejects the request with a
/// 401.
///
/// # Example
///
/// ```rust,ignore
/// async fn get_statement(
///     Auth(user): Auth,
///     State(state): State<AppState>,
/// ) -> Result<Json<StatementResponse>, ApiError> {
///     // user.username is the caller
/// }
/// ```
pub struct Auth(pub AuthenticatedUser);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        let username = state
            .tokens
            .verify_token(token)
            .ok_or(AuthError::InvalidToken)?;

        let store = state.store.read().await;
        let user = store.find_user(&username).ok_or_else(|| {
            tracing::warn!(username = %username, "valid token for missing account");
            AuthError::UnknownUser
        })?;

        Ok(Auth(AuthenticatedUser::from(user)))
    }
}

fn bearer_token(parts: &Parts) -> Result<&str, AuthError> {
    let auth_header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidAuthHeader)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .or_else(|| auth_header.strip_prefix("bearer "))
        .map(str::trim)
        .ok_or(AuthError::InvalidAuthHeader)?;

    if token.is_empty() {
        return Err(AuthError::InvalidAuthHeader);
    }
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::User;
    use axum::http::Request;
    use chrono::{Duration, Utc};

    async fn state_with_alice() -> AppState {
        let state = AppState::for_tests();
        state
            .store
            .write()
            .await
            .create_user(User::new("alice", "Alice A", "hash"))
            .unwrap();
        state
    }

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/meu-extrato");
        if let Some(value) = value {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn auth_extractor_requires_auth_header() {
        let state = state_with_alice().await;
        let mut parts = parts_with_auth(None);

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::MissingAuthHeader)));
    }

    #[tokio::test]
    async fn auth_extractor_rejects_other_schemes() {
        let state = state_with_alice().await;
        let mut parts = parts_with_auth(Some("Basic YWxpY2U6cHcx"));

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::InvalidAuthHeader)));
    }

    #[tokio::test]
    async fn auth_extractor_succeeds_with_valid_token() {
        let state = state_with_alice().await;
        let token = state.tokens.issue_token("alice").unwrap();
        let mut parts = parts_with_auth(Some(&format!("Bearer {token}")));

        let Auth(user) = Auth::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(user.full_name, "Alice A");
    }

    #[tokio::test]
    async fn auth_extractor_rejects_expired_token() {
        let state = state_with_alice().await;
        let token = state
            .tokens
            .issue_token_at("alice", Utc::now() - Duration::hours(1))
            .unwrap();
        let mut parts = parts_with_auth(Some(&format!("Bearer {token}")));

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn auth_extractor_rejects_token_for_missing_account() {
        let state = state_with_alice().await;
        let token = state.tokens.issue_token("bob").unwrap();
        let mut parts = parts_with_auth(Some(&format!("Bearer {token}")));

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::UnknownUser)));
    }
}
