use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

/// A single entry on the friendship wall
#[derive(Clone, Debug)]
pub struct Friendship {
    pub id: Uuid,
    pub message: String,
    pub from: String,
    pub created_at: DateTime<Utc>,
}
