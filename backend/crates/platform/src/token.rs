//! Signed Tokens
//!
//! Compact `header.payload.signature` tokens in the JWT HS256 layout:
//! each part is URL-safe base64 without padding, and the signature is
//! HMAC-SHA256 over `header.payload`.
//!
//! This module only checks integrity. Claim semantics (expiry, subject)
//! belong to the caller.

use std::fmt;

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::{from_base64url, hmac_sha256, random_key, to_base64url, verify_hmac_sha256};

/// `{"alg":"HS256","typ":"JWT"}`
const HEADER: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9";

/// Token errors
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token is malformed")]
    Malformed,

    #[error("Token signature is invalid")]
    BadSignature,

    #[error("Token claims could not be decoded: {0}")]
    Claims(#[from] serde_json::Error),
}

/// HMAC signing key, zeroized on drop
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct TokenKey(Vec<u8>);

impl TokenKey {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Fresh random 256-bit key; tokens signed with it die with the process
    pub fn random() -> Self {
        Self(random_key().to_vec())
    }

    fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for TokenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TokenKey").field(&"[REDACTED]").finish()
    }
}

/// Sign `claims` into a compact token
pub fn sign<C: Serialize>(key: &TokenKey, claims: &C) -> Result<String, TokenError> {
    let payload = to_base64url(&serde_json::to_vec(claims)?);
    let signing_input = format!("{HEADER}.{payload}");
    let signature = to_base64url(&hmac_sha256(key.as_bytes(), signing_input.as_bytes()));
    Ok(format!("{signing_input}.{signature}"))
}

/// Check the signature and decode the claims
pub fn verify<C: DeserializeOwned>(key: &TokenKey, token: &str) -> Result<C, TokenError> {
    let (signing_input, signature) = token.rsplit_once('.').ok_or(TokenError::Malformed)?;
    let (header, payload) = signing_input
        .split_once('.')
        .ok_or(TokenError::Malformed)?;

    if header != HEADER {
        return Err(TokenError::Malformed);
    }

    let tag = from_base64url(signature).map_err(|_| TokenError::Malformed)?;
    if !verify_hmac_sha256(key.as_bytes(), signing_input.as_bytes(), &tag) {
        return Err(TokenError::BadSignature);
    }

    decode_payload(payload)
}

fn decode_payload<C: DeserializeOwned>(payload: &str) -> Result<C, TokenError> {
    let bytes = from_base64url(payload).map_err(|_| TokenError::Malformed)?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Claims {
        sub: i64,
        exp: i64,
    }

    fn claims() -> Claims {
        Claims {
            sub: 7,
            exp: 1_900_000_000,
        }
    }

    #[test]
    fn test_header_constant_matches_json() {
        let decoded = from_base64url(HEADER).unwrap();
        assert_eq!(decoded, br#"{"alg":"HS256","typ":"JWT"}"#);
    }

    #[test]
    fn test_sign_then_verify() {
        let key = TokenKey::new(b"0123456789abcdef0123456789abcdef".to_vec());
        let token = sign(&key, &claims()).unwrap();
        assert_eq!(token.split('.').count(), 3);
        assert_eq!(verify::<Claims>(&key, &token).unwrap(), claims());
    }

    #[test]
    fn test_wrong_key_is_rejected() {
        let token = sign(&TokenKey::random(), &claims()).unwrap();
        let result = verify::<Claims>(&TokenKey::random(), &token);
        assert!(matches!(result, Err(TokenError::BadSignature)));
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        let key = TokenKey::random();
        let token = sign(&key, &claims()).unwrap();
        let forged_payload = to_base64url(br#"{"sub":1,"exp":1900000000}"#);
        let mut parts: Vec<&str> = token.split('.').collect();
        parts[1] = &forged_payload;
        let forged = parts.join(".");
        assert!(matches!(
            verify::<Claims>(&key, &forged),
            Err(TokenError::BadSignature)
        ));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let key = TokenKey::random();
        for token in ["", "abc", "a.b", "x.y.z", "eyJ.!!.??"] {
            assert!(
                matches!(verify::<Claims>(&key, token), Err(TokenError::Malformed)),
                "{token:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_key_debug_is_redacted() {
        let key = TokenKey::new(b"super-secret".to_vec());
        assert!(!format!("{key:?}").contains("super-secret"));
    }
}
