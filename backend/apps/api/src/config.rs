//! Server Configuration
//!
//! Everything comes from environment variables (a `.env` file is loaded
//! first). Lookup is injected so parsing can be tested without touching the
//! process environment.

use std::net::SocketAddr;
use std::time::Duration;

use ai::AiConfig;
use anyhow::{Context, bail};
use auth::AuthConfig;
use base64::Engine;
use base64::engine::general_purpose;
use platform::token::TokenKey;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";
pub const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";

/// Minimum decoded length of `TOKEN_SECRET`
const MIN_SECRET_BYTES: usize = 32;

#[derive(Debug)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    /// In-memory stores when absent
    pub database_url: Option<String>,
    pub auth: AuthConfig,
    pub ai: AiConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), cfg!(debug_assertions))
    }

    /// `allow_random_secret` is on in debug builds: a missing
    /// `TOKEN_SECRET` then yields a per-process key instead of an error
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        allow_random_secret: bool,
    ) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = var("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be a socket address")?;

        let frontend_origins = var("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_owned)
            .collect();

        let token_key = match var("TOKEN_SECRET") {
            Some(secret_b64) => {
                let secret = general_purpose::STANDARD
                    .decode(secret_b64.trim())
                    .context("TOKEN_SECRET must be base64")?;
                if secret.len() < MIN_SECRET_BYTES {
                    bail!("TOKEN_SECRET must decode to at least {MIN_SECRET_BYTES} bytes");
                }
                TokenKey::new(secret)
            }
            None if allow_random_secret => {
                tracing::warn!("TOKEN_SECRET not set; using a random key for this process");
                TokenKey::random()
            }
            None => bail!("TOKEN_SECRET must be set in production"),
        };

        let mut auth = AuthConfig {
            token_key,
            password_pepper: var("PASSWORD_PEPPER").map(String::into_bytes),
            ..AuthConfig::default()
        };
        if let Some(ttl) = var("TOKEN_TTL_SECS") {
            auth.token_ttl = Duration::from_secs(
                ttl.trim().parse().context("TOKEN_TTL_SECS must be an integer")?,
            );
        }
        if let Some(password) = var("OWNER_SEED_PASSWORD") {
            auth.owner_seed.password = password;
        }

        let mut ai = if allow_random_secret {
            AiConfig::development()
        } else {
            AiConfig::default()
        };
        ai.api_key = var("GEMINI_API_KEY").or_else(|| var("API_KEY"));
        if let Some(base_url) = var("GEMINI_BASE_URL") {
            ai.base_url = base_url;
        }
        if let Some(timeout) = var("AI_TIMEOUT_SECS") {
            ai.timeout = Duration::from_secs(
                timeout.trim().parse().context("AI_TIMEOUT_SECS must be an integer")?,
            );
        }

        Ok(Self {
            bind_addr,
            frontend_origins,
            database_url: var("DATABASE_URL"),
            auth,
            ai,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_in_debug() {
        let config = ServerConfig::from_lookup(lookup(&[]), true).unwrap();
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR.parse().unwrap());
        assert_eq!(config.frontend_origins.len(), 2);
        assert!(config.database_url.is_none());
        assert!(!config.ai.is_configured());
        assert_eq!(config.auth.token_ttl, Duration::from_secs(86_400));
    }

    #[test]
    fn test_release_requires_secret() {
        assert!(ServerConfig::from_lookup(lookup(&[]), false).is_err());

        let short = general_purpose::STANDARD.encode([7u8; 16]);
        assert!(ServerConfig::from_lookup(lookup(&[("TOKEN_SECRET", &short)]), false).is_err());

        let good = general_purpose::STANDARD.encode([7u8; 32]);
        assert!(ServerConfig::from_lookup(lookup(&[("TOKEN_SECRET", &good)]), false).is_ok());
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(
            lookup(&[
                ("BIND_ADDR", "127.0.0.1:8080"),
                ("FRONTEND_ORIGINS", "https://a.example, ,https://b.example"),
                ("DATABASE_URL", "postgres://localhost/darkshield"),
                ("TOKEN_TTL_SECS", "60"),
                ("OWNER_SEED_PASSWORD", "S3cret!!"),
                ("GEMINI_API_KEY", "key"),
                ("AI_TIMEOUT_SECS", "5"),
            ]),
            true,
        )
        .unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.frontend_origins, vec!["https://a.example", "https://b.example"]);
        assert_eq!(config.auth.token_ttl_secs(), 60);
        assert_eq!(config.auth.owner_seed.password, "S3cret!!");
        assert!(config.ai.is_configured());
        assert_eq!(config.ai.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_placeholder_api_key_is_unconfigured() {
        let config =
            ServerConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "YOUR_API_KEY")]), true).unwrap();
        assert!(!config.ai.is_configured());
    }
}
