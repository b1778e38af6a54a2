//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::token::TokenKey;

/// Email of the deployment's single Owner account
pub const OWNER_EMAIL: &str = "m0570398993@gmail.com";

/// Display name of the Owner account
pub const OWNER_NAME: &str = "The White Wolf";

/// Seed credential used when none is configured
pub const DEFAULT_OWNER_PASSWORD: &str = "Mm@123456";

/// Who gets seeded as Owner at startup
#[derive(Clone)]
pub struct OwnerSeed {
    pub email: String,
    pub name: String,
    pub password: String,
}

impl Default for OwnerSeed {
    fn default() -> Self {
        Self {
            email: OWNER_EMAIL.to_string(),
            name: OWNER_NAME.to_string(),
            password: DEFAULT_OWNER_PASSWORD.to_string(),
        }
    }
}

impl std::fmt::Debug for OwnerSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OwnerSeed")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC key for session tokens
    pub token_key: TokenKey,
    /// Fixed lifetime of an issued session token
    pub token_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    pub owner_seed: OwnerSeed,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_key: TokenKey::new(vec![0u8; 32]),
            token_ttl: Duration::from_secs(24 * 3600), // 1 day
            password_pepper: None,
            owner_seed: OwnerSeed::default(),
        }
    }
}

impl AuthConfig {
    /// Create config with a random token key
    ///
    /// Tokens stop verifying when the process restarts.
    pub fn with_random_secret() -> Self {
        Self {
            token_key: TokenKey::random(),
            ..Default::default()
        }
    }

    /// Create config for development
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    /// Token TTL in whole seconds
    pub fn token_ttl_secs(&self) -> i64 {
        i64::try_from(self.token_ttl.as_secs()).unwrap_or(i64::MAX)
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}
