use sqlx::prelude::FromRow;
use uuid::Uuid;

/// Account record as owned by the directory. This service only reads it;
/// signup and profile management live elsewhere.
#[allow(unused)]
#[derive(Debug, Clone, FromRow)]
pub struct AccountEntity {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
