//! Session Issuer
//!
//! Turns a verified identity into a signed, time-bounded bearer token and
//! back. Tokens are stateless: no server-side session table, no revocation,
//! no refresh. A token is valid until `exp`.

use std::sync::Arc;

use chrono::Utc;
use platform::token;
use serde::{Deserialize, Serialize};

use crate::application::config::AuthConfig;
use crate::domain::entity::{actor::Actor, user::User};
use crate::domain::value_object::{UserId, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

/// Claims carried by a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User id
    pub sub: UserId,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    /// Issued at, Unix seconds
    pub iat: i64,
    /// Expires at, Unix seconds
    pub exp: i64,
}

impl SessionClaims {
    pub fn actor(&self) -> Actor {
        Actor::new(self.sub, self.role)
    }
}

/// A freshly signed token together with what it says
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub access_token: String,
    pub claims: SessionClaims,
}

#[derive(Debug, Clone)]
pub struct SessionIssuer {
    config: Arc<AuthConfig>,
}

impl SessionIssuer {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    pub fn issue(&self, user: &User) -> AuthResult<IssuedSession> {
        self.issue_at(user, Utc::now().timestamp())
    }

    pub fn verify(&self, access_token: &str) -> AuthResult<SessionClaims> {
        self.verify_at(access_token, Utc::now().timestamp())
    }

    fn issue_at(&self, user: &User, now: i64) -> AuthResult<IssuedSession> {
        let claims = SessionClaims {
            sub: user.id,
            email: user.email.as_str().to_owned(),
            name: user.name.as_str().to_owned(),
            role: user.role,
            iat: now,
            exp: now.saturating_add(self.config.token_ttl_secs()),
        };
        let access_token = token::sign(&self.config.token_key, &claims)?;

        Ok(IssuedSession {
            access_token,
            claims,
        })
    }

    fn verify_at(&self, access_token: &str, now: i64) -> AuthResult<SessionClaims> {
        let claims: SessionClaims = token::verify(&self.config.token_key, access_token)
            .map_err(|e| {
                tracing::debug!(error = %e, "Session token rejected");
                AuthError::SessionInvalid
            })?;

        if claims.exp <= now {
            tracing::debug!(user_id = %claims.sub, exp = claims.exp, "Session token expired");
            return Err(AuthError::SessionInvalid);
        }

        Ok(claims)
    }
}
