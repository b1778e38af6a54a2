//! User Name Value Object
//!
//! The display name shown next to articles and in the user list. It is not
//! an identifier (the email is), so only basic hygiene is enforced:
//! NFKC normalization, trimming, a length window and no control characters.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Maximum length for a display name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 60;

#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserName(String);

impl UserName {
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let normalized: String = raw.as_ref().nfkc().collect();
        let trimmed = normalized.trim();

        if trimmed.is_empty() {
            return Err(AppError::bad_request("Name cannot be empty")
                .with_action("Please enter your name"));
        }

        let char_count = trimmed.chars().count();
        if char_count > USER_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Name must be at most {} characters (got {})",
                USER_NAME_MAX_LENGTH, char_count
            )));
        }

        if trimmed.chars().any(char::is_control) {
            return Err(AppError::bad_request("Name contains invalid characters"));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Create from database value
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UserName").field(&self.0).finish()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_name_trims() {
        let name = UserName::new("  The White Wolf ").unwrap();
        assert_eq!(name.as_str(), "The White Wolf");
    }

    #[test]
    fn test_user_name_rejects_blank_and_control() {
        assert!(UserName::new("").is_err());
        assert!(UserName::new(" \t ").is_err());
        assert!(UserName::new("Ann\u{0}").is_err());
    }

    #[test]
    fn test_user_name_length_limit() {
        assert!(UserName::new("a".repeat(USER_NAME_MAX_LENGTH)).is_ok());
        assert!(UserName::new("a".repeat(USER_NAME_MAX_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_user_name_nfkc() {
        // Fullwidth "Ann"
        let name = UserName::new("\u{FF21}\u{FF4E}\u{FF4E}").unwrap();
        assert_eq!(name.as_str(), "Ann");
    }
}
