//! User orchestration service

use crate::storage::UserCache;
use std::sync::Arc;
use tracing::{debug, info};
use userapi_core::{Result, UserStore};
use userapi_types::{User, UserRequest};

/// Coordinates the persistence port and the in-memory cache.
///
/// The store is the source of truth; the cache only ever holds copies of
/// rows the store has confirmed, so an abandoned request cannot leave the
/// two out of sync.
pub struct UserService {
    store: Arc<dyn UserStore>,
    cache: UserCache,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self {
            store,
            cache: UserCache::new(),
        }
    }

    /// Create a user. A duplicate email propagates as `UniqueViolation`;
    /// nothing is cached for a fresh row until it is first read.
    pub async fn create(&self, req: UserRequest) -> Result<User> {
        info!("Creating user: email={}", req.email);

        self.store.create(req.into()).await
    }

    /// Get a user by id, read-through cached.
    pub async fn get(&self, id: i64) -> Result<Option<User>> {
        // Try cache first
        if let Some(user) = self.cache.get(id) {
            debug!("Cache hit for user {}", id);
            return Ok(Some(user));
        }

        // Fall back to the store, caching only a confirmed row
        let user = self.store.get(id).await?;
        if let Some(user) = &user {
            self.cache.insert(user);
        }

        Ok(user)
    }

    /// Update a user's name and email. Returns `None` when the incoming
    /// value has no id or no row with that id exists; neither case mutates
    /// anything.
    pub async fn update(&self, user: User) -> Result<Option<User>> {
        let Some(id) = user.id else {
            return Ok(None);
        };

        // Read the current row from the store, not the cache: a stale entry
        // must not feed this read-modify-write. There is no compare-and-set
        // here; two concurrent updates of the same id can interleave and the
        // last write wins.
        let Some(mut current) = self.store.get(id).await? else {
            return Ok(None);
        };

        // Nothing would change: skip the write entirely
        if current.name == user.name && current.email == user.email {
            return Ok(Some(current));
        }

        debug!("Updating user {}", id);

        current.name = user.name;
        current.email = user.email;

        let updated = self.store.update(&current).await?;

        // Refresh the cache entry only after the store confirmed the write
        self.cache.insert(&updated);

        Ok(Some(updated))
    }

    /// Delete a user by id. Returns `false` for an unknown id without
    /// touching the store or the cache.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        if self.store.get(id).await?.is_none() {
            return Ok(false);
        }

        info!("Deleting user {}", id);

        self.store.delete(id).await?;

        // Evict only after the store confirmed the delete
        self.cache.remove(id);

        Ok(true)
    }

    /// List all users, straight from the store.
    pub async fn list(&self) -> Result<Vec<User>> {
        self.store.list().await
    }
}
