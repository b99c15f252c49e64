use std::sync::Arc;

use uuid::Uuid;

use crate::{
    api::error,
    modules::activity::{model::ActivityResponse, repository::ActivityRepository},
};

#[derive(Clone)]
pub struct ActivityService<L>
where
    L: ActivityRepository + Send + Sync,
{
    activity_repo: Arc<L>,
}

impl<L> ActivityService<L>
where
    L: ActivityRepository + Send + Sync,
{
    pub fn with_dependencies(activity_repo: Arc<L>) -> Self {
        ActivityService { activity_repo }
    }

    pub async fn activity_of(
        &self,
        caller: Uuid,
    ) -> Result<Vec<ActivityResponse>, error::SystemError> {
        let entries = self.activity_repo.list_for(&caller).await?;
        Ok(entries.into_iter().map(ActivityResponse::from).collect())
    }
}
