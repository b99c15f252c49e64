use chrono::Utc;
use uuid::Uuid;

use crate::{
    api::error,
    constants::REJECTION_COOLDOWN_HOURS,
    modules::{
        account::model::AccountResponse,
        activity::{model::NewActivity, repository_pg::insert_activity},
        friendship::{
            model::{PendingRequestResponse, PendingRequestRow},
            repository::FriendshipRepository,
            schema::{FriendshipEntity, FriendshipStatus},
        },
    },
};

#[derive(Clone)]
pub struct FriendshipRepositoryPg {
    pool: sqlx::PgPool,
}

impl FriendshipRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl FriendshipRepository for FriendshipRepositoryPg {
    async fn find(
        &self,
        from: &Uuid,
        to: &Uuid,
    ) -> Result<Option<FriendshipEntity>, error::SystemError> {
        let friendship = sqlx::query_as::<_, FriendshipEntity>(
            "SELECT * FROM friendships WHERE from_account = $1 AND to_account = $2",
        )
        .bind(from)
        .bind(to)
        .fetch_optional(&self.pool)
        .await?;

        Ok(friendship)
    }

    async fn find_rejected(
        &self,
        from: &Uuid,
        to: &Uuid,
    ) -> Result<Option<FriendshipEntity>, error::SystemError> {
        let friendship = sqlx::query_as::<_, FriendshipEntity>(
            r#"
            SELECT *
            FROM friendships
            WHERE from_account = $1
              AND to_account = $2
              AND status = 'REJECTED'
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_optional(&self.pool)
        .await?;

        Ok(friendship)
    }

    async fn upsert_pending(
        &self,
        from: &Uuid,
        to: &Uuid,
        activity: &NewActivity,
    ) -> Result<FriendshipEntity, error::SystemError> {
        let mut tx = self.pool.begin().await?;

        // Lock the ordered-pair row so the status and cooldown checks hold
        // until commit. The primary key backstops the insert race: the loser
        // surfaces 23505, reported as Conflict.
        let existing = sqlx::query_as::<_, FriendshipEntity>(
            "SELECT * FROM friendships WHERE from_account = $1 AND to_account = $2 FOR UPDATE",
        )
        .bind(from)
        .bind(to)
        .fetch_optional(&mut *tx)
        .await?;

        let friendship = match existing {
            None => {
                sqlx::query_as::<_, FriendshipEntity>(
                    r#"
                    INSERT INTO friendships (from_account, to_account, status)
                    VALUES ($1, $2, 'PENDING')
                    RETURNING *
                    "#,
                )
                .bind(from)
                .bind(to)
                .fetch_one(&mut *tx)
                .await?
            }
            Some(row) => match row.status {
                FriendshipStatus::Pending => {
                    tx.rollback().await?;
                    return Err(error::SystemError::conflict("Friend request already sent"));
                }
                FriendshipStatus::Accepted => {
                    tx.rollback().await?;
                    return Err(error::SystemError::conflict("You are already friends"));
                }
                FriendshipStatus::Rejected => {
                    let cooldown = chrono::Duration::hours(REJECTION_COOLDOWN_HOURS);
                    let elapsed = Utc::now() - row.updated_at;
                    if elapsed < cooldown {
                        tx.rollback().await?;
                        return Err(error::SystemError::cooldown(cooldown - elapsed));
                    }

                    sqlx::query_as::<_, FriendshipEntity>(
                        r#"
                        UPDATE friendships
                        SET status = 'PENDING', updated_at = now()
                        WHERE from_account = $1 AND to_account = $2
                        RETURNING *
                        "#,
                    )
                    .bind(from)
                    .bind(to)
                    .fetch_one(&mut *tx)
                    .await?
                }
            },
        };

        insert_activity(&mut *tx, activity).await?;

        tx.commit().await?;

        Ok(friendship)
    }

    async fn transition(
        &self,
        from: &Uuid,
        to: &Uuid,
        new_status: FriendshipStatus,
        expected: FriendshipStatus,
        activities: &[NewActivity],
    ) -> Result<FriendshipEntity, error::SystemError> {
        let mut tx = self.pool.begin().await?;

        // The conditional UPDATE is the concurrency guard: of two racing
        // resolutions, the second matches zero rows.
        let updated = sqlx::query_as::<_, FriendshipEntity>(
            r#"
            UPDATE friendships
            SET status = $3, updated_at = now()
            WHERE from_account = $1
              AND to_account = $2
              AND status = $4
            RETURNING *
            "#,
        )
        .bind(from)
        .bind(to)
        .bind(new_status)
        .bind(expected)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(friendship) = updated else {
            tx.rollback().await?;
            return Err(error::SystemError::not_found("Friend request not found"));
        };

        for activity in activities {
            insert_activity(&mut *tx, activity).await?;
        }

        tx.commit().await?;

        Ok(friendship)
    }

    async fn list_accepted(
        &self,
        account: &Uuid,
        excluded: &[Uuid],
    ) -> Result<Vec<AccountResponse>, error::SystemError> {
        // DISTINCT: mutual accepted rows for the same pair must not list the
        // counterpart twice.
        let friends = sqlx::query_as::<_, AccountResponse>(
            r#"
            SELECT DISTINCT
                a.id,
                a.email,
                a.first_name,
                a.last_name
            FROM friendships f
            JOIN accounts a
                ON a.id = CASE
                    WHEN f.from_account = $1 THEN f.to_account
                    ELSE f.from_account
                END
            WHERE (f.from_account = $1 OR f.to_account = $1)
              AND f.status = 'ACCEPTED'
              AND a.id <> ALL($2)
            ORDER BY a.id
            "#,
        )
        .bind(account)
        .bind(excluded)
        .fetch_all(&self.pool)
        .await?;

        Ok(friends)
    }

    async fn list_pending(
        &self,
        recipient: &Uuid,
        excluded: &[Uuid],
    ) -> Result<Vec<PendingRequestResponse>, error::SystemError> {
        let rows = sqlx::query_as::<_, PendingRequestRow>(
            r#"
            SELECT
                a.id,
                a.email,
                a.first_name,
                a.last_name,
                f.created_at AS requested_at
            FROM friendships f
            JOIN accounts a
                ON a.id = f.from_account
            WHERE f.to_account = $1
              AND f.status = 'PENDING'
              AND f.from_account <> ALL($2)
            ORDER BY f.created_at ASC
            "#,
        )
        .bind(recipient)
        .bind(excluded)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PendingRequestResponse::from).collect())
    }
}
