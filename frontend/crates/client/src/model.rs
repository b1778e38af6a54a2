//! Wire and cache types
//!
//! Mirrors of the backend's JSON bodies. Credentials never appear here.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    User,
    Admin,
    Owner,
}

impl Role {
    pub fn is_admin_or_higher(&self) -> bool {
        matches!(self, Role::Admin | Role::Owner)
    }
}

/// A user as the client remembers it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Signed-in user plus the bearer token for the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    #[serde(flatten)]
    pub user: CachedUser,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
}

/// GET /auth/me
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub issued_at: i64,
    pub expires_at: i64,
}

impl From<&SessionInfo> for CachedUser {
    fn from(session: &SessionInfo) -> Self {
        Self {
            id: session.id,
            name: session.name.clone(),
            email: session.email.clone(),
            role: session.role,
        }
    }
}

/// GET /users
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&UserSummary> for CachedUser {
    fn from(user: &UserSummary) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Author {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub summary: String,
    pub category: String,
    pub content: String,
    pub image_url: String,
    pub author_id: i64,
    pub author: Option<Author>,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewArticle {
    pub title: String,
    pub summary: String,
    pub category: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ArticleChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// GET /articles/stats
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleStats {
    pub total: usize,
    pub categories: Vec<CategoryCount>,
    pub most_populated: Option<String>,
    pub last_updated: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextState {
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextReply {
    pub state: TextState,
    pub response: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedImage {
    pub image_data: String,
}

/// RFC 7807 error body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Problem {
    pub status: Option<u16>,
    pub title: Option<String>,
    pub detail: Option<String>,
    pub action: Option<String>,
}
