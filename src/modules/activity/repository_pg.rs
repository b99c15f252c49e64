use sqlx::PgConnection;
use uuid::Uuid;

use crate::{
    api::error,
    modules::activity::{model::NewActivity, repository::ActivityRepository, schema::ActivityEntity},
};

/// Append primitive shared by every module's transactions. Taking the open
/// connection keeps the audit write inside the caller's atomic unit.
pub async fn insert_activity(
    conn: &mut PgConnection,
    activity: &NewActivity,
) -> Result<(), error::SystemError> {
    sqlx::query("INSERT INTO activity_log (account_id, description) VALUES ($1, $2)")
        .bind(activity.account)
        .bind(&activity.description)
        .execute(conn)
        .await?;

    Ok(())
}

#[derive(Clone)]
pub struct ActivityRepositoryPg {
    pool: sqlx::PgPool,
}

impl ActivityRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ActivityRepository for ActivityRepositoryPg {
    async fn list_for(&self, account: &Uuid) -> Result<Vec<ActivityEntity>, error::SystemError> {
        let entries = sqlx::query_as::<_, ActivityEntity>(
            "SELECT * FROM activity_log WHERE account_id = $1 ORDER BY created_at DESC",
        )
        .bind(account)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }
}
