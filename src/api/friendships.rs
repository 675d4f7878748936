//! Friendships API endpoints
//!
//! Everything related to the friendship wall

use std::future::Future;
use std::time::Duration;

use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use tokio::time::timeout;
use uuid::Uuid;

use crate::friendships::Friendship;
use crate::storage;
use crate::storage::CreateFriendshipValues;
use crate::storage::Storage;

use super::Error;
use super::Form;
use super::PathParameters;
use super::Success;

/// Ceiling for a single storage operation
const STORAGE_TIMEOUT: Duration = Duration::from_secs(10);

/// Friendship response going to the user
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendshipResponse {
    /// Friendship ID
    pub id: Uuid,

    /// The message on the wall
    pub message: String,

    /// Who the message is from
    pub from: String,

    /// Creation date
    pub created_at: DateTime<Utc>,
}

impl FriendshipResponse {
    /// Create a response from a [`Friendship`](Friendship)
    fn from_friendship(friendship: Friendship) -> Self {
        Self {
            id: friendship.id,
            message: friendship.message,
            from: friendship.from,
            created_at: friendship.created_at,
        }
    }

    /// Create a response from multiple [`Friendship`](Friendship)s
    fn from_friendship_multiple(mut friendships: Vec<Friendship>) -> Vec<Self> {
        friendships
            .drain(..)
            .map(Self::from_friendship)
            .collect::<Vec<Self>>()
    }
}

/// Form to create a friendship
///
/// Absent fields decode to empty strings, unknown fields are ignored
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFriendshipForm {
    #[serde(default)]
    message: String,

    #[serde(default)]
    from: String,
}

/// Create a new friendship
///
/// Request:
/// ```sh
/// curl -v -H 'Content-Type: application/json' \
///     -d '{"message": "hi", "from": "alice"}' \
///     http://localhost:8000/friendships
/// ```
///
/// Response:
/// ```json
/// { "id": "<uuid>", "message": "hi", "from": "alice", "createdAt": "<timestamp>" }
/// ```
pub async fn create<S: Storage>(
    Extension(storage): Extension<S>,
    Form(form): Form<CreateFriendshipForm>,
) -> Result<Success<FriendshipResponse>, Error> {
    let values = CreateFriendshipValues {
        message: &form.message,
        from: &form.from,
    };

    let friendship = bounded(storage.insert_friendship(&values)).await?;

    Ok(Success::created(FriendshipResponse::from_friendship(
        friendship,
    )))
}

/// List all friendships
///
/// An empty wall is an empty array, not an error
pub async fn list<S: Storage>(
    Extension(storage): Extension<S>,
) -> Result<Success<Vec<FriendshipResponse>>, Error> {
    let friendships = bounded(storage.find_all_friendships()).await?;

    Ok(Success::ok(FriendshipResponse::from_friendship_multiple(
        friendships,
    )))
}

/// Get a single friendship
pub async fn single<S: Storage>(
    Extension(storage): Extension<S>,
    PathParameters(friendship_id): PathParameters<Uuid>,
) -> Result<Success<FriendshipResponse>, Error> {
    let friendship = bounded(storage.find_single_friendship_by_id(&friendship_id)).await?;

    friendship.map_or_else(
        || Err(Error::not_found("Friendship not found")),
        |friendship| Ok(Success::ok(FriendshipResponse::from_friendship(friendship))),
    )
}

/// Delete a single friendship
///
/// The filter uses the parsed ID, a raw path string would never match
pub async fn delete<S: Storage>(
    Extension(storage): Extension<S>,
    PathParameters(friendship_id): PathParameters<Uuid>,
) -> Result<Success<&'static str>, Error> {
    let deleted = bounded(storage.delete_single_friendship_by_id(&friendship_id)).await?;

    if deleted {
        Ok(Success::<&'static str>::no_content())
    } else {
        Err(Error::not_found("Friendship not found"))
    }
}

/// Delete all friendships
///
/// No content, no matter how many were removed
pub async fn delete_all<S: Storage>(
    Extension(storage): Extension<S>,
) -> Result<Success<&'static str>, Error> {
    let removed = bounded(storage.delete_all_friendships()).await?;

    tracing::debug!("Removed {removed} friendships");

    Ok(Success::<&'static str>::no_content())
}

/// Bound a storage operation to the timeout ceiling
///
/// Expiry and storage failure both surface as a generic server error, the
/// detail only goes to the log
async fn bounded<F, T>(operation: F) -> Result<T, Error>
where
    F: Future<Output = storage::Result<T>>,
{
    match timeout(STORAGE_TIMEOUT, operation).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => {
            tracing::error!("Storage error: {err}");

            Err(Error::internal_server_error("Storage error"))
        }
        Err(_) => {
            tracing::error!("Storage operation timed out after {STORAGE_TIMEOUT:?}");

            Err(Error::internal_server_error("Storage error"))
        }
    }
}
