use uuid::Uuid;

use crate::api::error;
use crate::modules::activity::schema::ActivityEntity;

#[async_trait::async_trait]
pub trait ActivityRepository {
    /// All entries for `account`, newest first. Entries are append-only;
    /// there is no update or delete path anywhere in the system.
    async fn list_for(&self, account: &Uuid) -> Result<Vec<ActivityEntity>, error::SystemError>;
}
