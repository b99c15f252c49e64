use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::modules::account::model::AccountResponse;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FriendRequestBody {
    pub recipient_id: Uuid,
}

#[derive(FromRow)]
pub struct PendingRequestRow {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub requested_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingRequestResponse {
    pub account: AccountResponse,
    pub requested_at: chrono::DateTime<chrono::Utc>,
}

impl From<PendingRequestRow> for PendingRequestResponse {
    fn from(row: PendingRequestRow) -> Self {
        PendingRequestResponse {
            account: AccountResponse {
                id: row.id,
                email: row.email,
                first_name: row.first_name,
                last_name: row.last_name,
            },
            requested_at: row.requested_at,
        }
    }
}
