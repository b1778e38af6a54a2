//! Value Objects
//!
//! Article category and validated article text fields.

use derive_more::Display;
use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ============================================================================
// Category
// ============================================================================

/// Closed set of article categories
///
/// Serialized with the human-readable label, which is also what the
/// database stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Tech News")]
    #[display("Tech News")]
    TechNews,
    #[serde(rename = "Ethical Hacking")]
    #[display("Ethical Hacking")]
    EthicalHacking,
    #[serde(rename = "AI Tools")]
    #[display("AI Tools")]
    AiTools,
    #[serde(rename = "Digital Library")]
    #[display("Digital Library")]
    DigitalLibrary,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::TechNews,
        Category::EthicalHacking,
        Category::AiTools,
        Category::DigitalLibrary,
    ];

    pub const fn label(&self) -> &'static str {
        match self {
            Category::TechNews => "Tech News",
            Category::EthicalHacking => "Ethical Hacking",
            Category::AiTools => "AI Tools",
            Category::DigitalLibrary => "Digital Library",
        }
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        Category::ALL
            .into_iter()
            .find(|c| c.label() == s.trim())
            .ok_or_else(|| {
                AppError::bad_request(format!("Unknown category: {}", s.trim())).with_action(
                    "Use one of: Tech News, Ethical Hacking, AI Tools, Digital Library",
                )
            })
    }
}

// ============================================================================
// Article Text
// ============================================================================

pub const TITLE_MAX_LENGTH: usize = 200;
pub const SUMMARY_MAX_LENGTH: usize = 1_000;
pub const CONTENT_MAX_LENGTH: usize = 100_000;

/// A non-blank, length-bounded, trimmed text field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleText(String);

impl ArticleText {
    pub fn title(raw: impl Into<String>) -> AppResult<Self> {
        Self::new("Title", raw.into(), TITLE_MAX_LENGTH)
    }

    pub fn summary(raw: impl Into<String>) -> AppResult<Self> {
        Self::new("Summary", raw.into(), SUMMARY_MAX_LENGTH)
    }

    /// Markdown body; may contain `![gen-image: prompt]` tags
    pub fn content(raw: impl Into<String>) -> AppResult<Self> {
        Self::new("Content", raw.into(), CONTENT_MAX_LENGTH)
    }

    fn new(field: &'static str, raw: String, max: usize) -> AppResult<Self> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(AppError::bad_request(format!("{field} cannot be empty")));
        }

        let count = trimmed.chars().count();
        if count > max {
            return Err(AppError::bad_request(format!(
                "{field} must be at most {max} characters (got {count})"
            )));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Create from database value
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ArticleText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels_roundtrip() {
        for category in Category::ALL {
            assert_eq!(category.label().parse::<Category>().unwrap(), category);
            assert_eq!(category.to_string(), category.label());
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.label()));
        }
    }

    #[test]
    fn test_unknown_category() {
        let err = "All".parse::<Category>().unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(serde_json::from_str::<Category>("\"tech news\"").is_err());
    }

    #[test]
    fn test_article_text_trims_and_validates() {
        assert_eq!(ArticleText::title("  Zero Days ").unwrap().as_str(), "Zero Days");
        assert!(ArticleText::title("   ").is_err());
        assert!(ArticleText::title("x".repeat(TITLE_MAX_LENGTH + 1)).is_err());
        assert!(ArticleText::summary("x".repeat(SUMMARY_MAX_LENGTH)).is_ok());
        assert!(ArticleText::content("").is_err());
    }
}
