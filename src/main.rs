// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::error::Error;

use axum_server::tls_rustls::RustlsConfig;
use ledger_bank_server::{
    api::router,
    config::{AppConfig, DEFAULT_LOG_FILTER},
    logging::init_logging,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::from_env()?;
    init_logging(DEFAULT_LOG_FILTER, config.log_format);

    if config.uses_default_secret() {
        tracing::warn!("SECRET_KEY is not set; tokens are signed with the insecure default secret");
    }

    // Initialize application state
    let state = AppState::from_config(&config)?;
    let app = router(state);

    let addr = config.bind_addr()?;

    match &config.tls {
        Some(tls) => {
            // Install the ring crypto provider for rustls (must be done before any TLS operations)
            rustls::crypto::ring::default_provider()
                .install_default()
                .map_err(|_| "failed to install rustls crypto provider")?;

            let tls_config = RustlsConfig::from_pem_file(&tls.cert, &tls.key).await?;

            tracing::info!(%addr, "Ledger bank server listening on https (docs at /docs)");
            axum_server::bind_rustls(addr, tls_config)
                .serve(app.into_make_service())
                .await?;
        }
        None => {
            tracing::info!(%addr, "Ledger bank server listening on http (docs at /docs)");
            axum_server::bind(addr)
                .serve(app.into_make_service())
                .await?;
        }
    }

    Ok(())
}
