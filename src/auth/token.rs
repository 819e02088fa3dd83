// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bearer token issuance and verification (HS256 JWT).
//!
//! ## Token Lifecycle
//!
//! ```text
//! Issued --(now < exp)--> Valid --(now >= exp)--> Expired
//! ```
//!
//! Tokens are self-contained: nothing is stored server-side, there is no
//! refresh flow and no revocation list. An expired token can never become
//! valid again.
//!
//! Verification failures are not distinguished. A bad signature, a malformed
//! token and an expired token all yield `None`.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::claims::Claims;

/// Default token lifetime (30 minutes).
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 30;

/// Value of `token_type` in login responses.
pub const TOKEN_TYPE: &str = "bearer";

/// Signs and checks session tokens with a process-wide secret.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is exact: no clock skew allowance.
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    /// Issue a token for `subject` expiring `ttl` from now.
    pub fn issue_token(&self, subject: &str) -> Result<String, jsonwebtoken::errors::Error> {
        self.issue_token_at(subject, Utc::now())
    }

    pub(crate) fn issue_token_at(
        &self,
        subject: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims {
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
    }

    /// Subject of `token` if its signature is valid and it has not expired.
    pub fn verify_token(&self, token: &str) -> Option<String> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).ok()?;

        // jsonwebtoken still accepts a token in its expiry second.
        if data.claims.exp <= Utc::now().timestamp() {
            return None;
        }

        Some(data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

    fn service() -> TokenService {
        TokenService::new(b"test-secret", Duration::minutes(DEFAULT_TOKEN_TTL_MINUTES))
    }

    #[test]
    fn fresh_token_resolves_to_subject() {
        let tokens = service();
        let token = tokens.issue_token("alice").unwrap();
        assert_eq!(tokens.verify_token(&token), Some("alice".to_string()));
    }

    #[test]
    fn token_carries_sub_and_exp() {
        let tokens = service();
        let issued_at = Utc::now();
        let token = tokens.issue_token_at("alice", issued_at).unwrap();

        let payload = token.split('.').nth(1).unwrap();
        let claims: serde_json::Value =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(payload).unwrap()).unwrap();
        assert_eq!(claims["sub"], "alice");
        assert_eq!(
            claims["exp"].as_i64().unwrap(),
            (issued_at + Duration::minutes(30)).timestamp()
        );
    }

    #[test]
    fn expired_token_is_rejected() {
        let tokens = service();
        let token = tokens
            .issue_token_at("alice", Utc::now() - Duration::minutes(31))
            .unwrap();
        assert_eq!(tokens.verify_token(&token), None);
    }

    #[test]
    fn token_expiring_now_is_rejected() {
        let tokens = service();
        let token = tokens
            .issue_token_at("alice", Utc::now() - Duration::minutes(30))
            .unwrap();
        assert_eq!(tokens.verify_token(&token), None);
    }

    #[test]
    fn token_from_another_secret_is_rejected() {
        let other = TokenService::new(b"other-secret", Duration::minutes(30));
        let token = other.issue_token("alice").unwrap();
        assert_eq!(service().verify_token(&token), None);
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let tokens = service();
        let token = tokens.issue_token("alice").unwrap();
        let parts: Vec<&str> = token.split('.').collect();

        let forged_claims = format!(
            r#"{{"sub":"mallory","iat":0,"exp":{}}}"#,
            (Utc::now() + Duration::minutes(30)).timestamp()
        );
        let forged = format!(
            "{}.{}.{}",
            parts[0],
            URL_SAFE_NO_PAD.encode(forged_claims),
            parts[2]
        );
        assert_eq!(tokens.verify_token(&forged), None);
    }

    #[test]
    fn malformed_token_is_rejected() {
        let tokens = service();
        assert_eq!(tokens.verify_token(""), None);
        assert_eq!(tokens.verify_token("not.a.jwt"), None);
        assert_eq!(tokens.verify_token("garbage"), None);
    }
}
