use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        activity::{model::NewActivity, repository_pg::insert_activity},
        block::{repository::BlockRepository, schema::BlockedAccountEntity},
    },
};

#[derive(Clone)]
pub struct BlockRepositoryPg {
    pool: sqlx::PgPool,
}

impl BlockRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl BlockRepository for BlockRepositoryPg {
    async fn is_blocked(&self, a: &Uuid, b: &Uuid) -> Result<bool, error::SystemError> {
        let blocked = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM blocked_accounts
                WHERE (blocker = $1 AND blocked = $2)
                   OR (blocker = $2 AND blocked = $1)
            )
            "#,
        )
        .bind(a)
        .bind(b)
        .fetch_one(&self.pool)
        .await?;

        Ok(blocked)
    }

    async fn block(
        &self,
        blocker: &Uuid,
        blocked: &Uuid,
        activity: &NewActivity,
    ) -> Result<(), error::SystemError> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(
            "INSERT INTO blocked_accounts (blocker, blocked) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(blocker)
        .bind(blocked)
        .execute(&mut *tx)
        .await?;

        if inserted.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(error::SystemError::conflict("User already blocked"));
        }

        insert_activity(&mut *tx, activity).await?;

        tx.commit().await?;

        Ok(())
    }

    async fn unblock(
        &self,
        blocker: &Uuid,
        blocked: &Uuid,
        activity: &NewActivity,
    ) -> Result<(), error::SystemError> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query_as::<_, BlockedAccountEntity>(
            "DELETE FROM blocked_accounts WHERE blocker = $1 AND blocked = $2 RETURNING *",
        )
        .bind(blocker)
        .bind(blocked)
        .fetch_optional(&mut *tx)
        .await?;

        if deleted.is_none() {
            tx.rollback().await?;
            return Err(error::SystemError::not_blocked("User not blocked"));
        }

        insert_activity(&mut *tx, activity).await?;

        tx.commit().await?;

        Ok(())
    }

    async fn blocked_counterparts(
        &self,
        account: &Uuid,
    ) -> Result<Vec<Uuid>, error::SystemError> {
        let counterparts = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT CASE
                WHEN blocker = $1 THEN blocked
                ELSE blocker
            END
            FROM blocked_accounts
            WHERE blocker = $1
               OR blocked = $1
            "#,
        )
        .bind(account)
        .fetch_all(&self.pool)
        .await?;

        Ok(counterparts)
    }
}
