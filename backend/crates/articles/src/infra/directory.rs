//! Author Directory backed by the identity store

use std::collections::HashMap;
use std::sync::Arc;

use auth::domain::repository::UserRepository;
use kernel::id::UserId;

use crate::domain::entities::AuthorProfile;
use crate::domain::repository::AuthorDirectory;
use crate::error::ArticleResult;

/// Reads author profiles straight from a `UserRepository`
#[derive(Debug)]
pub struct UserDirectory<R> {
    users: Arc<R>,
}

impl<R> UserDirectory<R> {
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

impl<R> Clone for UserDirectory<R> {
    fn clone(&self) -> Self {
        Self {
            users: self.users.clone(),
        }
    }
}

impl<R> AuthorDirectory for UserDirectory<R>
where
    R: UserRepository + Send + Sync,
{
    async fn find_authors(&self, ids: &[UserId]) -> ArticleResult<HashMap<UserId, AuthorProfile>> {
        let mut authors = HashMap::with_capacity(ids.len());
        for &id in ids {
            if authors.contains_key(&id) {
                continue;
            }
            if let Some(user) = self.users.find_by_id(id).await? {
                authors.insert(
                    id,
                    AuthorProfile {
                        id,
                        name: user.name.as_str().to_owned(),
                        email: user.email.as_str().to_owned(),
                    },
                );
            }
        }
        Ok(authors)
    }
}
