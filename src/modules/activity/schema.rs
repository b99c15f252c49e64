use serde::Serialize;
use sqlx::prelude::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ActivityEntity {
    pub id: Uuid,
    pub account_id: Uuid,
    pub description: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
