//! All things related to the storage of friendships

use axum::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::friendships::Friendship;

#[cfg(not(feature = "postgres"))]
use memory::Memory;
#[cfg(feature = "postgres")]
use postgres::Postgres;

#[cfg(not(feature = "postgres"))]
mod memory;
#[cfg(feature = "postgres")]
mod postgres;

/// Setup the storage
#[cfg(not(feature = "postgres"))]
#[allow(clippy::unused_async)]
pub async fn setup() -> Memory {
    Memory::new()
}

/// Setup the storage
#[cfg(feature = "postgres")]
pub async fn setup() -> Postgres {
    Postgres::new().await
}

/// Storage errors
#[derive(Debug, Error)]
pub enum Error {
    /// A connection error with the storage
    #[error("Connection error: {0}")]
    Connection(String),
}

/// Result type for all storage interactions
pub type Result<T> = core::result::Result<T, Error>;

/// Values to create a Friendship
///
/// Identifier and creation timestamp are assigned by the storage itself
pub struct CreateFriendshipValues<'a> {
    /// The message on the wall
    pub message: &'a str,

    /// Who the message is from
    pub from: &'a str,
}

/// Storage with all supported operations
#[async_trait]
pub trait Storage: Clone + Send + Sync + 'static {
    /// Insert a single friendship
    ///
    /// Assigns a fresh unique ID and the current timestamp
    async fn insert_friendship(&self, values: &CreateFriendshipValues) -> Result<Friendship>;

    /// Find all friendships
    ///
    /// Full collection scan, no filter
    async fn find_all_friendships(&self) -> Result<Vec<Friendship>>;

    /// Find a single friendship by its ID
    async fn find_single_friendship_by_id(&self, id: &Uuid) -> Result<Option<Friendship>>;

    /// Delete a single friendship by its ID
    ///
    /// Reports whether a friendship matched the ID
    async fn delete_single_friendship_by_id(&self, id: &Uuid) -> Result<bool>;

    /// Delete all friendships
    ///
    /// Reports the number of friendships removed
    async fn delete_all_friendships(&self) -> Result<u64>;
}
