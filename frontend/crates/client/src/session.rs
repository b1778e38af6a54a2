//! Persisted session cache
//!
//! Remembers known users, the next local user id and the signed-in user
//! across restarts. A missing key means empty; a key holding corrupt JSON is
//! logged and treated as missing.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::error::ClientResult;
use crate::model::{CachedUser, CurrentUser, Role};
use crate::signal::Signal;
use crate::storage::KeyValueStore;

pub const USERS_KEY: &str = "darkshield_users";
pub const NEXT_USER_ID_KEY: &str = "darkshield_nextUserId";
pub const CURRENT_USER_KEY: &str = "darkshield_currentUser";

pub struct SessionCache<S> {
    store: S,
    users: Signal<Vec<CachedUser>>,
    next_user_id: Signal<i64>,
    current: Signal<Option<CurrentUser>>,
}

impl<S> SessionCache<S>
where
    S: KeyValueStore,
{
    /// Read whatever the store holds
    pub fn load(store: S) -> Self {
        let users: Vec<CachedUser> = read_json(&store, USERS_KEY).unwrap_or_default();
        let next_user_id: i64 = read_json(&store, NEXT_USER_ID_KEY)
            .unwrap_or_else(|| i64::try_from(users.len()).unwrap_or(i64::MAX - 1) + 1);
        let current = read_json(&store, CURRENT_USER_KEY);

        Self {
            store,
            users: Signal::new(users),
            next_user_id: Signal::new(next_user_id),
            current: Signal::new(current),
        }
    }

    pub fn users(&self) -> Arc<Vec<CachedUser>> {
        self.users.get()
    }

    pub fn next_user_id(&self) -> i64 {
        *self.next_user_id.get()
    }

    pub fn current_user(&self) -> Option<CurrentUser> {
        (*self.current.get()).clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.current_user().and_then(|c| c.access_token)
    }

    fn current_role(&self) -> Option<Role> {
        self.current_user().map(|c| c.user.role)
    }

    pub fn is_admin(&self) -> bool {
        self.current_role().is_some_and(|r| r.is_admin_or_higher())
    }

    pub fn is_owner(&self) -> bool {
        self.current_role() == Some(Role::Owner)
    }

    /// Everyone but the signed-in user; empty unless that user is the Owner
    pub fn users_for_management(&self) -> Vec<CachedUser> {
        let Some(current) = self.current_user() else {
            return Vec::new();
        };
        if current.user.role != Role::Owner {
            return Vec::new();
        }
        self.users
            .get()
            .iter()
            .filter(|u| u.id != current.user.id)
            .cloned()
            .collect()
    }

    /// Replace the known users with a fresh list from the server
    pub fn replace_users(&self, users: Vec<CachedUser>) -> ClientResult<()> {
        let next = users.iter().map(|u| u.id + 1).max().unwrap_or(1);
        self.users.set(users);
        self.bump_next_id(next);
        self.persist_users()
    }

    /// Insert or refresh one user
    pub fn remember_user(&self, user: CachedUser) -> ClientResult<()> {
        let next = user.id + 1;
        self.users.update(|users| {
            let mut users = users.clone();
            match users.iter_mut().find(|u| u.id == user.id) {
                Some(existing) => *existing = user.clone(),
                None => users.push(user.clone()),
            }
            users
        });
        self.bump_next_id(next);
        self.persist_users()
    }

    pub fn forget_user(&self, id: i64) -> ClientResult<()> {
        self.users
            .update(|users| users.iter().filter(|u| u.id != id).cloned().collect());
        self.persist_users()
    }

    /// `None` signs out and removes the stored key
    pub fn set_current(&self, current: Option<CurrentUser>) -> ClientResult<()> {
        match &current {
            Some(user) => self
                .store
                .set(CURRENT_USER_KEY, &serde_json::to_string(user)?)?,
            None => self.store.remove(CURRENT_USER_KEY)?,
        }
        self.current.set(current);
        Ok(())
    }

    fn bump_next_id(&self, candidate: i64) {
        self.next_user_id.update(|next| (*next).max(candidate));
    }

    fn persist_users(&self) -> ClientResult<()> {
        write_json(&self.store, USERS_KEY, &*self.users.get())?;
        write_json(&self.store, NEXT_USER_ID_KEY, &self.next_user_id())
    }
}

fn read_json<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(raw) => raw?,
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read stored value");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "Ignoring corrupt stored value");
            None
        }
    }
}

fn write_json<T: Serialize + ?Sized>(
    store: &impl KeyValueStore,
    key: &str,
    value: &T,
) -> ClientResult<()> {
    store.set(key, &serde_json::to_string(value)?)
}
