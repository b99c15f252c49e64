use std::sync::Arc;

use uuid::Uuid;

use crate::{
    api::error,
    constants::SEARCH_RESULT_LIMIT,
    modules::{
        account::{model::AccountResponse, repository::AccountRepository},
        block::repository::BlockRepository,
    },
};

#[derive(Clone)]
pub struct AccountService<A, B>
where
    A: AccountRepository + Send + Sync,
    B: BlockRepository + Send + Sync,
{
    account_repo: Arc<A>,
    block_repo: Arc<B>,
}

impl<A, B> AccountService<A, B>
where
    A: AccountRepository + Send + Sync,
    B: BlockRepository + Send + Sync,
{
    pub fn with_dependencies(account_repo: Arc<A>, block_repo: Arc<B>) -> Self {
        AccountService { account_repo, block_repo }
    }

    /// Email-shaped queries resolve exactly; anything else matches names.
    /// Accounts in a block relation with the caller, and the caller itself,
    /// never appear in results.
    pub async fn search_accounts(
        &self,
        caller: Uuid,
        query: &str,
    ) -> Result<Vec<AccountResponse>, error::SystemError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let mut excluded = self.block_repo.blocked_counterparts(&caller).await?;
        excluded.push(caller);

        if query.contains('@') {
            let hit = self.account_repo.find_by_email(query).await?;
            return Ok(hit
                .filter(|account| !excluded.contains(&account.id))
                .map(AccountResponse::from)
                .into_iter()
                .collect());
        }

        let accounts =
            self.account_repo.search_by_name(query, &excluded, SEARCH_RESULT_LIMIT).await?;

        Ok(accounts.into_iter().map(AccountResponse::from).collect())
    }
}
