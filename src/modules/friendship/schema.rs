use serde::{Deserialize, Serialize};
use sqlx::prelude::{FromRow, Type};
use uuid::Uuid;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Type, Serialize, Deserialize)]
#[sqlx(type_name = "friendship_status", rename_all = "UPPERCASE")]
pub enum FriendshipStatus {
    #[sqlx(rename = "PENDING")]
    Pending,
    #[sqlx(rename = "ACCEPTED")]
    Accepted,
    #[sqlx(rename = "REJECTED")]
    Rejected,
}

/// Directed relationship record. Exactly one row exists per ordered pair
/// `(from_account, to_account)`; it is mutated in place across its lifecycle
/// and never replaced, so the activity log is the only history. A row never
/// leaves ACCEPTED; a REJECTED row can return to PENDING once the rejection
/// cooldown has elapsed and the original sender re-sends.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FriendshipEntity {
    pub from_account: Uuid,
    pub to_account: Uuid,
    pub status: FriendshipStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
