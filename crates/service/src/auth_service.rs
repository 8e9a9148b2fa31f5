//! Login and bearer token handling.
//!
//! A single configured account may log in; on success an HS256 JWT is issued
//! that the HTTP layer later checks on every book route.

use std::fmt::{self, Debug, Formatter};

use bookshelf_core::AuthConfig;
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::AuthError;

/// JWT claims carried by issued tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Username the token was issued to.
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

pub struct AuthService {
    username: String,
    password: String,
    token_ttl: chrono::Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl Debug for AuthService {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthService").field("username", &self.username).finish_non_exhaustive()
    }
}

impl AuthService {
    #[must_use]
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        Self {
            username: config.username.clone(),
            password: config.password.clone(),
            token_ttl: chrono::Duration::from_std(config.token_ttl)
                .unwrap_or(chrono::Duration::MAX),
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Check credentials and issue a token.
    pub fn login(&self, username: &str, password: &str) -> Result<IssuedToken, AuthError> {
        if username != self.username || password != self.password {
            tracing::warn!(username, "login rejected");
            return Err(AuthError::InvalidCredentials);
        }
        let now = Utc::now();
        let expires_at = now.checked_add_signed(self.token_ttl).unwrap_or(DateTime::<Utc>::MAX_UTC);
        let claims =
            Claims { sub: username.to_owned(), iat: now.timestamp(), exp: expires_at.timestamp() };
        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(AuthError::Encode)?;
        tracing::info!(username, "token issued");
        Ok(IssuedToken { token, expires_at })
    }

    /// Validate signature and expiry of a raw token (without the `Bearer` prefix).
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "token rejected");
                AuthError::InvalidToken
            })
    }
}
