//! Memory storage
//!
//! Will be destroyed on system shutdown

use std::collections::HashMap;
use std::sync::Arc;

use axum::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::friendships::Friendship;

use super::CreateFriendshipValues;
use super::Result;
use super::Storage;

/// An in-memory storage
///
/// Will be destroyed on system shutdown
#[derive(Clone, Debug)]
pub struct Memory {
    /// All friendships in storage
    friendships: Arc<Mutex<HashMap<Uuid, Friendship>>>,
}

impl Memory {
    /// Create a new empty Memory storage
    pub fn new() -> Self {
        Self {
            friendships: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl Storage for Memory {
    async fn insert_friendship(&self, values: &CreateFriendshipValues) -> Result<Friendship> {
        let friendship = Friendship {
            id: Uuid::new_v4(),
            message: values.message.to_string(),
            from: values.from.to_string(),
            created_at: Utc::now(),
        };

        self.friendships
            .lock()
            .await
            .insert(friendship.id, friendship.clone());

        Ok(friendship)
    }

    async fn find_all_friendships(&self) -> Result<Vec<Friendship>> {
        let mut friendships = self
            .friendships
            .lock()
            .await
            .values()
            .cloned()
            .collect::<Vec<Friendship>>();

        friendships.sort_by_key(|friendship| friendship.created_at);

        Ok(friendships)
    }

    async fn find_single_friendship_by_id(&self, id: &Uuid) -> Result<Option<Friendship>> {
        Ok(self.friendships.lock().await.get(id).cloned())
    }

    async fn delete_single_friendship_by_id(&self, id: &Uuid) -> Result<bool> {
        Ok(self.friendships.lock().await.remove(id).is_some())
    }

    async fn delete_all_friendships(&self) -> Result<u64> {
        let mut friendships = self.friendships.lock().await;

        let removed = friendships.len() as u64;
        friendships.clear();

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_assigns_id_and_timestamp() {
        let storage = Memory::new();

        let values = CreateFriendshipValues {
            message: "hi",
            from: "alice",
        };

        let friendship = storage.insert_friendship(&values).await.unwrap();
        assert_eq!("hi", friendship.message);
        assert_eq!("alice", friendship.from);

        let found = storage
            .find_single_friendship_by_id(&friendship.id)
            .await
            .unwrap();
        assert!(found.is_some());
        assert_eq!(friendship.created_at, found.unwrap().created_at);
    }

    #[tokio::test]
    async fn test_find_all_is_ordered_by_creation() {
        let storage = Memory::new();

        let mut ids = Vec::new();
        for message in ["one", "two", "three"] {
            let values = CreateFriendshipValues {
                message,
                from: "alice",
            };

            ids.push(storage.insert_friendship(&values).await.unwrap().id);
        }

        let friendships = storage.find_all_friendships().await.unwrap();
        assert_eq!(3, friendships.len());

        for pair in friendships.windows(2) {
            assert!(pair[0].created_at <= pair[1].created_at);
        }

        for id in ids {
            assert!(friendships.iter().any(|friendship| friendship.id == id));
        }
    }

    #[tokio::test]
    async fn test_delete_reports_match() {
        let storage = Memory::new();

        let absent = Uuid::new_v4();
        assert!(!storage
            .delete_single_friendship_by_id(&absent)
            .await
            .unwrap());

        let values = CreateFriendshipValues {
            message: "hi",
            from: "alice",
        };
        let friendship = storage.insert_friendship(&values).await.unwrap();

        assert!(storage
            .delete_single_friendship_by_id(&friendship.id)
            .await
            .unwrap());
        assert!(!storage
            .delete_single_friendship_by_id(&friendship.id)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_delete_all_reports_count() {
        let storage = Memory::new();

        assert_eq!(0, storage.delete_all_friendships().await.unwrap());

        for _ in 0..2 {
            let values = CreateFriendshipValues {
                message: "hi",
                from: "alice",
            };
            storage.insert_friendship(&values).await.unwrap();
        }

        assert_eq!(2, storage.delete_all_friendships().await.unwrap());
        assert!(storage.find_all_friendships().await.unwrap().is_empty());
    }
}
