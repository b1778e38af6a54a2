//! Bearer Token Extraction

use http::{HeaderMap, header};

/// Extract the token from an `Authorization: Bearer <token>` header
///
/// The scheme is matched case-insensitively (RFC 6750 / RFC 9110).
/// Returns `None` for a missing header, another scheme, or an empty token.
pub fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
