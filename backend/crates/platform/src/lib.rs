//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no DarkShield vocabulary in them:
//! - Cryptographic utilities (HMAC-SHA256, Base64url, random keys)
//! - Password hashing (Argon2id) and the registration password policy
//! - Compact HMAC-signed tokens (JWT HS256 layout)
//! - Bearer token extraction from HTTP headers

pub mod bearer;
pub mod crypto;
pub mod password;
pub mod token;
