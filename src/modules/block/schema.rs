use serde::Serialize;
use sqlx::prelude::FromRow;
use uuid::Uuid;

/// Directional block record. A row in either direction between two accounts
/// forbids new friend requests, but only `blocker` may remove this row.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BlockedAccountEntity {
    pub blocker: Uuid,
    pub blocked: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
