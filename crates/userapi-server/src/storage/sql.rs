//! Direct-statement SQLite adapter (sqlx)

use anyhow::Context;
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::sync::Arc;
use userapi_core::{Result, StoreError, UserStore};
use userapi_types::User;

/// `UserStore` backed by hand-written SQL statements.
pub struct SqlUserStore {
    pool: Arc<SqlitePool>,
}

impl SqlUserStore {
    /// Open (or create) the database file and ensure the schema.
    pub async fn connect(database_path: &str) -> anyhow::Result<Self> {
        tracing::info!("Opening SQLite database at: {}", database_path);

        // Create parent directory if needed
        if let Some(parent) = std::path::Path::new(database_path).parent() {
            tokio::fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create database directory: {}", parent.display())
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .with_context(|| {
                format!("Failed to connect to SQLite database at: {}", database_path)
            })?;

        tracing::info!("SQLite connection established, ensuring schema...");

        Self::ensure_schema(&pool)
            .await
            .context("Failed to create users table")?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Wrap an existing pool, ensuring the schema. Tests use this with a
    /// single-connection in-memory database.
    pub async fn with_pool(pool: SqlitePool) -> anyhow::Result<Self> {
        Self::ensure_schema(&pool)
            .await
            .context("Failed to create users table")?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    async fn ensure_schema(pool: &SqlitePool) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl UserStore for SqlUserStore {
    async fn create(&self, user: User) -> Result<User> {
        let mut tx = self.pool.begin().await.map_err(store_err)?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (name, email) VALUES (?1, ?2) RETURNING id
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .fetch_one(&mut *tx)
        .await
        .map_err(store_err)?;

        tx.commit().await.map_err(store_err)?;

        Ok(User {
            id: Some(id),
            ..user
        })
    }

    async fn get(&self, id: i64) -> Result<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, name, email FROM users WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await
        .map_err(store_err)?;

        Ok(row.map(|r| r.into()))
    }

    async fn update(&self, user: &User) -> Result<User> {
        let mut tx = self.pool.begin().await.map_err(store_err)?;

        sqlx::query(
            r#"
            UPDATE users SET name = ?1, email = ?2 WHERE id = ?3
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.id)
        .execute(&mut *tx)
        .await
        .map_err(store_err)?;

        tx.commit().await.map_err(store_err)?;

        Ok(user.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut tx = self.pool.begin().await.map_err(store_err)?;

        let result = sqlx::query(
            r#"
            DELETE FROM users WHERE id = ?1
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(store_err)?;

        tx.commit().await.map_err(store_err)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> Result<Vec<User>> {
        let rows: Vec<UserRow> = sqlx::query_as(
            r#"
            SELECT id, name, email FROM users ORDER BY id
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(store_err)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }
}

// Helper struct for sqlx query_as
#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        User {
            id: Some(r.id),
            name: r.name,
            email: r.email,
        }
    }
}

fn store_err(e: sqlx::Error) -> StoreError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            StoreError::UniqueViolation(db.message().to_string())
        }
        _ => StoreError::Database(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn mem_store() -> SqlUserStore {
        // A single connection keeps the in-memory database alive across
        // pool checkouts.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        SqlUserStore::with_pool(pool).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_assigns_ids() {
        let store = mem_store().await;

        let ivan = store.create(User::new("Ivan", "ivan@ya.ru")).await.unwrap();
        assert_eq!(ivan.id, Some(1));
        assert_eq!(ivan.name, "Ivan");

        let oleg = store.create(User::new("Oleg", "oleg@ya.ru")).await.unwrap();
        assert_eq!(oleg.id, Some(2));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = mem_store().await;

        store.create(User::new("Ivan", "ivan@ya.ru")).await.unwrap();
        let err = store
            .create(User::new("Ivan 2", "ivan@ya.ru"))
            .await
            .unwrap_err();
        assert!(err.is_unique_violation());

        // The failed insert must not leave a row behind
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_row_lifecycle() {
        let store = mem_store().await;

        let created = store.create(User::new("Ivan", "ivan@ya.ru")).await.unwrap();
        let id = created.id.unwrap();

        let fetched = store.get(id).await.unwrap().unwrap();
        assert_eq!(fetched.email, "ivan@ya.ru");

        let updated = store
            .update(&User {
                email: "ivan@gmail.com".to_string(),
                ..fetched
            })
            .await
            .unwrap();
        assert_eq!(updated.email, "ivan@gmail.com");
        assert_eq!(
            store.get(id).await.unwrap().unwrap().email,
            "ivan@gmail.com"
        );

        assert!(store.delete(id).await.unwrap());
        assert!(store.get(id).await.unwrap().is_none());
        assert!(!store.delete(id).await.unwrap());
    }

    #[tokio::test]
    async fn test_get_and_list() {
        let store = mem_store().await;

        assert!(store.get(42).await.unwrap().is_none());
        assert!(store.list().await.unwrap().is_empty());

        store.create(User::new("Ivan", "ivan@ya.ru")).await.unwrap();
        store.create(User::new("Oleg", "oleg@ya.ru")).await.unwrap();

        let all = store.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Ivan");
        assert_eq!(all[1].name, "Oleg");
    }
}
