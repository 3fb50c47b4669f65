//! JWT Token Service
//!
//! Issues and verifies the HS256 access/refresh token pair. Both tokens
//! carry the same claims and differ only in secret and lifetime.

use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use kernel::id::UserId;
use serde::{Deserialize, Serialize};

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::error::AuthResult;

/// JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: UserId,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct TokenService {
    config: Arc<AuthConfig>,
}

impl TokenService {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    fn secret(&self, kind: TokenKind) -> &[u8] {
        match kind {
            TokenKind::Access => self.config.access_secret.as_bytes(),
            TokenKind::Refresh => self.config.refresh_secret.as_bytes(),
        }
    }

    /// Issue a fresh access/refresh pair for the user
    pub fn issue(&self, user: &User) -> AuthResult<TokenPair> {
        let now = Utc::now().timestamp();
        let claims = |ttl: std::time::Duration| Claims {
            id: user.id,
            email: user.email.as_str().to_string(),
            iat: now,
            exp: now + ttl.as_secs() as i64,
        };

        Ok(TokenPair {
            access_token: self.sign(&claims(self.config.access_ttl), TokenKind::Access)?,
            refresh_token: self.sign(&claims(self.config.refresh_ttl), TokenKind::Refresh)?,
        })
    }

    fn sign(&self, claims: &Claims, kind: TokenKind) -> AuthResult<String> {
        let key = EncodingKey::from_secret(self.secret(kind));
        Ok(encode(&Header::new(Algorithm::HS256), claims, &key)?)
    }

    /// Verify signature and expiry. Returns `None` for any invalid token.
    pub fn verify(&self, token: &str, kind: TokenKind) -> Option<Claims> {
        let key = DecodingKey::from_secret(self.secret(kind));
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        match decode::<Claims>(token, &key, &validation) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                tracing::debug!(error = %e, ?kind, "Rejected token");
                None
            }
        }
    }
}
