use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::activity::schema::ActivityEntity;

/// An audit entry waiting to be written. Every state-changing repository verb
/// takes the entries it must append and writes them inside its own
/// transaction, so a committed mutation always carries its audit trail.
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub account: Uuid,
    pub description: String,
}

impl NewActivity {
    pub fn new(account: Uuid, description: impl Into<String>) -> Self {
        NewActivity { account, description: description.into() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityResponse {
    pub description: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<ActivityEntity> for ActivityResponse {
    fn from(entry: ActivityEntity) -> Self {
        ActivityResponse { description: entry.description, created_at: entry.created_at }
    }
}
