// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names, default values and the
//! [`AppConfig`] loaded from them at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `SECRET_KEY` | HMAC secret for session tokens | insecure built-in value |
//! | `ACCESS_TOKEN_EXPIRE_MINUTES` | Session token lifetime | `30` |
//! | `PASSWORD_HASH_MEMORY_KIB` | Argon2id memory cost | `19456` |
//! | `PASSWORD_HASH_ITERATIONS` | Argon2id passes | `2` |
//! | `PASSWORD_HASH_PARALLELISM` | Argon2id lanes | `1` |
//! | `TLS_CERT_PATH` | PEM certificate chain; enables HTTPS with `TLS_KEY_PATH` | unset |
//! | `TLS_KEY_PATH` | PEM private key | unset |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::net::SocketAddr;
use std::path::PathBuf;

use chrono::Duration;
use thiserror::Error;

use crate::auth::{token::DEFAULT_TOKEN_TTL_MINUTES, PasswordCost};
use crate::logging::LogFormat;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";

/// Environment variable name for the token signing secret.
///
/// # Default
/// [`DEFAULT_SECRET_KEY`]. Startup logs a warning while it is in use.
pub const SECRET_KEY_ENV: &str = "SECRET_KEY";
pub const TOKEN_TTL_ENV: &str = "ACCESS_TOKEN_EXPIRE_MINUTES";
pub const HASH_MEMORY_ENV: &str = "PASSWORD_HASH_MEMORY_KIB";
pub const HASH_ITERATIONS_ENV: &str = "PASSWORD_HASH_ITERATIONS";
pub const HASH_PARALLELISM_ENV: &str = "PASSWORD_HASH_PARALLELISM";
pub const TLS_CERT_ENV: &str = "TLS_CERT_PATH";
pub const TLS_KEY_ENV: &str = "TLS_KEY_PATH";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Development-only signing secret. Anyone who knows it can mint tokens.
pub const DEFAULT_SECRET_KEY: &str = "insecure-development-secret-change-me";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} has invalid value `{value}`")]
    InvalidValue { var: &'static str, value: String },
    #[error("TLS_CERT_PATH and TLS_KEY_PATH must be set together")]
    IncompleteTls,
    #[error("SECRET_KEY must not be empty")]
    EmptySecret,
}

/// Certificate and key for HTTPS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsPaths {
    pub cert: PathBuf,
    pub key: PathBuf,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub secret_key: String,
    pub token_ttl: Duration,
    pub password_cost: PasswordCost,
    pub tls: Option<TlsPaths>,
    pub log_format: LogFormat,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret_key = lookup(SECRET_KEY_ENV).unwrap_or_else(|| DEFAULT_SECRET_KEY.to_string());
        if secret_key.is_empty() {
            return Err(ConfigError::EmptySecret);
        }

        let ttl_minutes: i64 = parse_or(&lookup, TOKEN_TTL_ENV, DEFAULT_TOKEN_TTL_MINUTES)?;
        if ttl_minutes <= 0 {
            return Err(ConfigError::InvalidValue {
                var: TOKEN_TTL_ENV,
                value: ttl_minutes.to_string(),
            });
        }

        let default_cost = PasswordCost::default();
        let password_cost = PasswordCost {
            memory_kib: parse_or(&lookup, HASH_MEMORY_ENV, default_cost.memory_kib)?,
            iterations: parse_or(&lookup, HASH_ITERATIONS_ENV, default_cost.iterations)?,
            parallelism: parse_or(&lookup, HASH_PARALLELISM_ENV, default_cost.parallelism)?,
        };

        let tls = match (lookup(TLS_CERT_ENV), lookup(TLS_KEY_ENV)) {
            (Some(cert), Some(key)) => Some(TlsPaths {
                cert: cert.into(),
                key: key.into(),
            }),
            (None, None) => None,
            _ => return Err(ConfigError::IncompleteTls),
        };

        Ok(Self {
            host: lookup(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or(&lookup, PORT_ENV, DEFAULT_PORT)?,
            secret_key,
            token_ttl: Duration::minutes(ttl_minutes),
            password_cost,
            tls,
            log_format: lookup(LOG_FORMAT_ENV)
                .map(|format| LogFormat::from_str_lossy(&format))
                .unwrap_or(LogFormat::Pretty),
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                var: HOST_ENV,
                value: self.host.clone(),
            })
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }
}

fn parse_or<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { var, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.token_ttl, Duration::minutes(30));
        assert_eq!(config.password_cost, PasswordCost::default());
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(config.tls.is_none());
        assert!(config.uses_default_secret());
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = config_from(&[
            (SECRET_KEY_ENV, "s3cret"),
            (PORT_ENV, "9000"),
            (TOKEN_TTL_ENV, "5"),
            (HASH_MEMORY_ENV, "4096"),
            (LOG_FORMAT_ENV, "JSON"),
        ])
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.token_ttl, Duration::minutes(5));
        assert_eq!(config.password_cost.memory_kib, 4096);
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(!config.uses_default_secret());
    }

    #[test]
    fn invalid_numbers_are_reported() {
        let err = config_from(&[(PORT_ENV, "eighty")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                var: PORT_ENV,
                value: "eighty".into()
            }
        );

        assert!(config_from(&[(TOKEN_TTL_ENV, "0")]).is_err());
        assert_eq!(
            config_from(&[(SECRET_KEY_ENV, "")]).unwrap_err(),
            ConfigError::EmptySecret
        );
    }

    #[test]
    fn tls_requires_both_paths() {
        assert_eq!(
            config_from(&[(TLS_CERT_ENV, "/certs/cert.pem")]).unwrap_err(),
            ConfigError::IncompleteTls
        );

        let config = config_from(&[
            (TLS_CERT_ENV, "/certs/cert.pem"),
            (TLS_KEY_ENV, "/certs/key.pem"),
        ])
        .unwrap();
        assert_eq!(
            config.tls,
            Some(TlsPaths {
                cert: "/certs/cert.pem".into(),
                key: "/certs/key.pem".into(),
            })
        );
    }

    #[test]
    fn bind_addr_combines_host_and_port() {
        let config = config_from(&[(HOST_ENV, "127.0.0.1"), (PORT_ENV, "3000")]).unwrap();
        assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:3000");

        let bad = config_from(&[(HOST_ENV, "not a host")]).unwrap();
        assert!(bad.bind_addr().is_err());
    }
}
