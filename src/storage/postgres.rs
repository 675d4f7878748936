//! Postgres storage

use std::time::Duration;

use axum::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use crate::friendships::Friendship;

use super::CreateFriendshipValues;
use super::Error;
use super::Result;
use super::Storage;

/// Migrator to run migrations on startup
static MIGRATOR: Migrator = sqlx::migrate!();

/// Postgres row for a friendship
///
/// The sender column is called `sender`, `from` is reserved in SQL
#[derive(sqlx::FromRow)]
struct SqlxFriendship {
    id: Uuid,
    message: String,
    sender: String,
    created_at: DateTime<Utc>,
}

impl SqlxFriendship {
    /// Create a friendship from a row
    fn into_friendship(self) -> Friendship {
        Friendship {
            id: self.id,
            message: self.message,
            from: self.sender,
            created_at: self.created_at,
        }
    }
}

/// Postgres storage
#[derive(Clone)]
pub struct Postgres {
    /// Pool of connections
    connection_pool: PgPool,
}

impl Postgres {
    /// Create Postgres storage
    ///
    /// Use the `DATABASE_URL` environment variable
    ///
    /// Migrations will be run
    pub async fn new() -> Self {
        let database_connection_string = std::env::var("DATABASE_URL").expect("Valid DATABASE_URL");

        let connection_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_connection_string)
            .await
            .expect("Valid connection");

        let migration_result = MIGRATOR.run(&connection_pool).await;

        if let Err(err) = migration_result {
            panic!("Migrations could not run: {err}");
        }

        Self { connection_pool }
    }
}

#[async_trait]
impl Storage for Postgres {
    async fn insert_friendship(&self, values: &CreateFriendshipValues) -> Result<Friendship> {
        let friendship = sqlx::query_as::<_, SqlxFriendship>(
            "
            INSERT INTO friendships (id, message, sender, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, message, sender, created_at
            ",
        )
        .bind(Uuid::new_v4())
        .bind(values.message)
        .bind(values.from)
        .bind(Utc::now())
        .fetch_one(&self.connection_pool)
        .await
        .map_err(connection_error)?;

        Ok(friendship.into_friendship())
    }

    async fn find_all_friendships(&self) -> Result<Vec<Friendship>> {
        let friendships = sqlx::query_as::<_, SqlxFriendship>(
            "
            SELECT id, message, sender, created_at
            FROM friendships
            ORDER BY created_at
            ",
        )
        .fetch_all(&self.connection_pool)
        .await
        .map_err(connection_error)?;

        Ok(friendships
            .into_iter()
            .map(SqlxFriendship::into_friendship)
            .collect())
    }

    async fn find_single_friendship_by_id(&self, id: &Uuid) -> Result<Option<Friendship>> {
        let friendship = sqlx::query_as::<_, SqlxFriendship>(
            "
            SELECT id, message, sender, created_at
            FROM friendships
            WHERE id = $1
            ",
        )
        .bind(*id)
        .fetch_optional(&self.connection_pool)
        .await
        .map_err(connection_error)?;

        Ok(friendship.map(SqlxFriendship::into_friendship))
    }

    async fn delete_single_friendship_by_id(&self, id: &Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM friendships WHERE id = $1")
            .bind(*id)
            .execute(&self.connection_pool)
            .await
            .map_err(connection_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_all_friendships(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM friendships")
            .execute(&self.connection_pool)
            .await
            .map_err(connection_error)?;

        Ok(result.rows_affected())
    }
}

/// Utility function for mapping sqlx errors into storage errors
fn connection_error(error: sqlx::Error) -> Error {
    Error::Connection(error.to_string())
}
