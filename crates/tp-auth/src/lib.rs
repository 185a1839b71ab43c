//! # tp-auth
//!
//! Argon2- and JWT-based implementation of `AuthProvider`.
//! Passwords are only ever stored as Argon2id hashes; access tokens are
//! HS256 JWTs carrying the user id and admin flag, validated statelessly.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use tp_core::error::{AppError, Result};
use tp_core::models::User;
use tp_core::traits::{AuthClaims, AuthProvider};

/// JWT claims for access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TokenClaims {
    /// Subject: the user id, as a string per JWT convention
    sub: String,
    /// Admin flag, so admin checks don't need a DB round trip
    admin: bool,
    /// Issued at (Unix epoch seconds)
    iat: i64,
    /// Expiration (Unix epoch seconds)
    exp: i64,
    /// Issuer
    iss: String,
}

/// Token-based auth provider. One instance lives in the app state for the
/// lifetime of the process.
pub struct TokenAuthProvider {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl: Duration,
    issuer: String,
}

impl TokenAuthProvider {
    pub fn new(secret: &str, token_ttl: Duration, issuer: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_ttl,
            issuer: issuer.to_string(),
        }
    }
}

impl AuthProvider for TokenAuthProvider {
    fn hash_password(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))?;
        Ok(hash.to_string())
    }

    fn verify_password(&self, password: &str, hash: &str) -> bool {
        let parsed = match PasswordHash::new(hash) {
            Ok(p) => p,
            Err(e) => {
                // A hash we can't parse means corrupted account data, not
                // a wrong password; log it, but still deny.
                tracing::warn!("stored password hash is unparseable: {e}");
                return false;
            }
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    fn issue_token(&self, user: &User) -> Result<String> {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: user.user_id.to_string(),
            admin: user.is_admin,
            iat: now.timestamp(),
            exp: (now + self.token_ttl).timestamp(),
            iss: self.issuer.clone(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("token signing failed: {e}")))
    }

    fn verify_token(&self, token: &str) -> Result<AuthClaims> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::Unauthorized(format!("invalid token: {e}")))?;

        let user_id = data
            .claims
            .sub
            .parse::<i64>()
            .map_err(|_| AppError::Unauthorized("malformed token subject".to_string()))?;

        Ok(AuthClaims {
            user_id,
            is_admin: data.claims.admin,
        })
    }
}
