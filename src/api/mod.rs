// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::HeaderName,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{
        CreateTransactionRequest, LoginForm, RegisterRequest, StatementResponse, TokenResponse,
        TransactionKind, TransactionResponse, UserResponse,
    },
    state::AppState,
};

pub mod accounts;
pub mod health;
pub mod statement;
pub mod transactions;

const REQUEST_ID_HEADER: &str = "x-request-id";

pub fn router(state: AppState) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let routes = Router::new()
        .route("/auth/registro", post(accounts::register))
        .route("/auth/login", post(accounts::login))
        .route("/transacoes", post(transactions::create_transaction))
        .route("/meu-extrato", get(statement::get_statement))
        .route("/health", get(health::liveness))
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::new(request_id))
                .layer(CorsLayer::permissive()),
        )
}

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        accounts::register,
        accounts::login,
        transactions::create_transaction,
        statement::get_statement,
        health::liveness
    ),
    components(
        schemas(
            RegisterRequest,
            UserResponse,
            LoginForm,
            TokenResponse,
            CreateTransactionRequest,
            TransactionKind,
            TransactionResponse,
            StatementResponse,
            health::HealthResponse
        )
    ),
    modifiers(&BearerSecurity),
    tags(
        (name = "Auth", description = "Registration and login"),
        (name = "Transactions", description = "Deposits, withdrawals and statements"),
        (name = "Health", description = "Liveness probe")
    )
)]
pub struct ApiDoc;
