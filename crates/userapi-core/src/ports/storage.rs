//! Storage traits for persistence

use crate::Result;
use async_trait::async_trait;
use userapi_types::User;

/// User store
///
/// The single seam between the orchestration layer and a concrete database.
/// Implementations are chosen once at startup and injected as
/// `Arc<dyn UserStore>`.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user (`id: None`) and return it with the
    /// store-generated id assigned. A duplicate email fails with
    /// [`StoreError::UniqueViolation`](crate::StoreError::UniqueViolation).
    async fn create(&self, user: User) -> Result<User>;

    /// Fetch by id. A missing row is `Ok(None)`, never an error.
    async fn get(&self, id: i64) -> Result<Option<User>>;

    /// Write `name` and `email` for an existing row and return the stored
    /// state. Callers must have checked that the id exists; updating a
    /// missing id is outside the contract.
    async fn update(&self, user: &User) -> Result<User>;

    /// Delete by id. `true` iff a row was removed.
    async fn delete(&self, id: i64) -> Result<bool>;

    /// All users, in no guaranteed order, re-read from the store per call.
    async fn list(&self) -> Result<Vec<User>>;
}
