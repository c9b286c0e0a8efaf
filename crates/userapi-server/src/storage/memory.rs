//! In-memory user cache using DashMap
//!
//! An identifier-keyed map of previously materialized users. The store
//! stays the source of truth; everything in here is a disposable copy that
//! the owning service refreshes or evicts alongside its writes.

use dashmap::DashMap;
use userapi_types::User;

/// Id-keyed cache of users.
///
/// No TTL and no size bound: an entry lives until the service replaces it
/// (update) or evicts it (delete). Dropping the whole cache at any point is
/// always safe - reads fall through to the store and repopulate it.
pub struct UserCache {
    data: DashMap<i64, User>,
}

impl UserCache {
    pub fn new() -> Self {
        Self {
            data: DashMap::new(),
        }
    }

    /// Get a cached user
    pub fn get(&self, id: i64) -> Option<User> {
        self.data.get(&id).map(|entry| entry.value().clone())
    }

    /// Cache a user under its assigned id. A user without an id has no
    /// cache key and is ignored.
    pub fn insert(&self, user: &User) {
        if let Some(id) = user.id {
            self.data.insert(id, user.clone());
        }
    }

    /// Evict a cached user
    pub fn remove(&self, id: i64) {
        self.data.remove(&id);
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Default for UserCache {
    fn default() -> Self {
        Self::new()
    }
}
