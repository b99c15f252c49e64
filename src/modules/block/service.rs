use std::sync::Arc;

use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        account::repository::AccountRepository,
        activity::model::NewActivity,
        block::repository::BlockRepository,
    },
};

#[derive(Clone)]
pub struct BlockService<B, A>
where
    B: BlockRepository + Send + Sync,
    A: AccountRepository + Send + Sync,
{
    block_repo: Arc<B>,
    account_repo: Arc<A>,
}

impl<B, A> BlockService<B, A>
where
    B: BlockRepository + Send + Sync,
    A: AccountRepository + Send + Sync,
{
    pub fn with_dependencies(block_repo: Arc<B>, account_repo: Arc<A>) -> Self {
        BlockService { block_repo, account_repo }
    }

    pub async fn block_account(
        &self,
        caller: Uuid,
        target_id: Uuid,
    ) -> Result<(), error::SystemError> {
        if target_id == caller {
            return Err(error::SystemError::bad_request("Cannot block yourself"));
        }

        let target = self
            .account_repo
            .find_by_id(&target_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("User to block not found"))?;

        let activity = NewActivity::new(caller, format!("Blocked user {}", target.email));
        self.block_repo.block(&caller, &target_id, &activity).await
    }

    pub async fn unblock_account(
        &self,
        caller: Uuid,
        target_id: Uuid,
    ) -> Result<(), error::SystemError> {
        let target = self
            .account_repo
            .find_by_id(&target_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("User to unblock not found"))?;

        let activity = NewActivity::new(caller, format!("Unblocked user {}", target.email));
        self.block_repo.unblock(&caller, &target_id, &activity).await
    }
}
