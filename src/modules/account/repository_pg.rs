use uuid::Uuid;

use crate::{
    api::error,
    modules::account::{repository::AccountRepository, schema::AccountEntity},
};

#[derive(Clone)]
pub struct AccountRepositoryPg {
    pool: sqlx::PgPool,
}

impl AccountRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl AccountRepository for AccountRepositoryPg {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<AccountEntity>, error::SystemError> {
        let account =
            sqlx::query_as::<_, AccountEntity>("SELECT * FROM accounts WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(account)
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AccountEntity>, error::SystemError> {
        let account = sqlx::query_as::<_, AccountEntity>(
            "SELECT * FROM accounts WHERE lower(email) = lower($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn search_by_name(
        &self,
        query: &str,
        excluded: &[Uuid],
        limit: i64,
    ) -> Result<Vec<AccountEntity>, error::SystemError> {
        let accounts = sqlx::query_as::<_, AccountEntity>(
            r#"
            SELECT *
            FROM accounts
            WHERE (first_name ILIKE '%' || $1 || '%' OR last_name ILIKE '%' || $1 || '%')
              AND id <> ALL($2)
            ORDER BY id
            LIMIT $3
            "#,
        )
        .bind(query)
        .bind(excluded)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(accounts)
    }
}
