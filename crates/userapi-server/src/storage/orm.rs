//! Session-style SQLite adapter (SeaORM)

use anyhow::Context;
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection,
    DbErr, EntityTrait, QueryFilter, Schema, SqlErr, TryIntoModel,
};
use userapi_core::{Result, StoreError, UserStore};
use userapi_types::User;

use super::entity::{self, Column, Entity};

/// `UserStore` backed by the ORM's merge/find session semantics.
///
/// Create and update are the same operation here: a merge of the given user
/// into the session, flushed on commit. Which statement the ORM emits is
/// decided by whether the primary key is set.
pub struct OrmUserStore {
    db: DatabaseConnection,
}

impl OrmUserStore {
    /// Open (or create) the database file and ensure the schema.
    pub async fn connect(database_path: &str) -> anyhow::Result<Self> {
        tracing::info!("Opening SQLite database (ORM) at: {}", database_path);

        // Create parent directory if needed
        if let Some(parent) = std::path::Path::new(database_path).parent() {
            tokio::fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create database directory: {}", parent.display())
            })?;
        }

        let mut options = ConnectOptions::new(format!("sqlite://{}?mode=rwc", database_path));
        options.max_connections(5).sqlx_logging(false);

        let db = Database::connect(options).await.with_context(|| {
            format!("Failed to connect to SQLite database at: {}", database_path)
        })?;

        tracing::info!("ORM connection established, ensuring schema...");

        Self::ensure_schema(&db)
            .await
            .context("Failed to create users table")?;

        Ok(Self { db })
    }

    /// Wrap an existing connection, ensuring the schema. Tests use this with
    /// a single-connection in-memory database.
    pub async fn with_connection(db: DatabaseConnection) -> anyhow::Result<Self> {
        Self::ensure_schema(&db)
            .await
            .context("Failed to create users table")?;

        Ok(Self { db })
    }

    async fn ensure_schema(db: &DatabaseConnection) -> anyhow::Result<()> {
        let backend = db.get_database_backend();
        let mut stmt = Schema::new(backend).create_table_from_entity(Entity);
        stmt.if_not_exists();
        db.execute(backend.build(&stmt)).await?;

        Ok(())
    }

    /// Merge the given user into the session and flush.
    async fn save(&self, user: &User) -> Result<User> {
        use sea_orm::TransactionTrait;

        let txn = self.db.begin().await.map_err(store_err)?;

        let model = entity::ActiveModel::from(user)
            .save(&txn)
            .await
            .map_err(store_err)?
            .try_into_model()
            .map_err(store_err)?;

        txn.commit().await.map_err(store_err)?;

        Ok(model.into())
    }
}

#[async_trait]
impl UserStore for OrmUserStore {
    async fn create(&self, user: User) -> Result<User> {
        self.save(&user).await
    }

    async fn get(&self, id: i64) -> Result<Option<User>> {
        let model = Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(store_err)?;

        Ok(model.map(Into::into))
    }

    async fn update(&self, user: &User) -> Result<User> {
        self.save(user).await
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = Entity::delete_many()
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(store_err)?;

        Ok(result.rows_affected > 0)
    }

    async fn list(&self) -> Result<Vec<User>> {
        let models = Entity::find().all(&self.db).await.map_err(store_err)?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}

fn store_err(e: DbErr) -> StoreError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => StoreError::UniqueViolation(msg),
        _ => StoreError::Database(e.to_string()),
    }
}
