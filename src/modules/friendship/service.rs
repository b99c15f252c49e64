use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    api::error,
    constants::REJECTION_COOLDOWN_HOURS,
    modules::{
        account::{model::AccountResponse, repository::AccountRepository, schema::AccountEntity},
        activity::model::NewActivity,
        block::repository::BlockRepository,
        friendship::{
            model::PendingRequestResponse,
            repository::FriendshipRepository,
            schema::{FriendshipEntity, FriendshipStatus},
        },
    },
};

/// The request state machine. Validations run in order: account existence,
/// block gate, rejection cooldown, then the write verb, which re-validates
/// the record state inside its own transaction.
#[derive(Clone)]
pub struct FriendshipService<R, B, A>
where
    R: FriendshipRepository + Send + Sync,
    B: BlockRepository + Send + Sync,
    A: AccountRepository + Send + Sync,
{
    friendship_repo: Arc<R>,
    block_repo: Arc<B>,
    account_repo: Arc<A>,
}

impl<R, B, A> FriendshipService<R, B, A>
where
    R: FriendshipRepository + Send + Sync,
    B: BlockRepository + Send + Sync,
    A: AccountRepository + Send + Sync,
{
    pub fn with_dependencies(
        friendship_repo: Arc<R>,
        block_repo: Arc<B>,
        account_repo: Arc<A>,
    ) -> Self {
        FriendshipService { friendship_repo, block_repo, account_repo }
    }

    pub async fn send_request(
        &self,
        sender: Uuid,
        recipient_id: Uuid,
    ) -> Result<FriendshipEntity, error::SystemError> {
        if recipient_id == sender {
            return Err(error::SystemError::bad_request(
                "Cannot send a friend request to yourself",
            ));
        }

        let recipient = self
            .account_repo
            .find_by_id(&recipient_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Recipient account does not exist"))?;

        if self.block_repo.is_blocked(&sender, &recipient_id).await? {
            return Err(error::SystemError::forbidden(
                "Cannot send a friend request to this account",
            ));
        }

        if let Some(rejected) = self.friendship_repo.find_rejected(&sender, &recipient_id).await? {
            let cooldown = chrono::Duration::hours(REJECTION_COOLDOWN_HOURS);
            let elapsed = Utc::now() - rejected.updated_at;
            if elapsed < cooldown {
                return Err(error::SystemError::cooldown(cooldown - elapsed));
            }
        }

        // Only the (sender, recipient) ordered pair is consulted. A pending
        // request in the opposite direction is left alone, so mutual pending
        // records can coexist; they are not reconciled into an acceptance.
        let activity =
            NewActivity::new(sender, format!("Sent a friend request to {}", recipient.email));
        self.friendship_repo.upsert_pending(&sender, &recipient_id, &activity).await
    }

    pub async fn accept_request(
        &self,
        responder: Uuid,
        sender_id: Uuid,
    ) -> Result<AccountResponse, error::SystemError> {
        let (sender, responder_account) = self.resolve_parties(&sender_id, &responder).await?;

        let activities = [
            NewActivity::new(
                responder,
                format!("Accepted friend request from {}", sender.email),
            ),
            NewActivity::new(
                sender_id,
                format!("{} accepted your friend request", responder_account.email),
            ),
        ];

        // Keyed on (sender, responder): only the stored recipient can ever
        // match the row, so anyone else resolving it observes NotFound.
        self.friendship_repo
            .transition(
                &sender_id,
                &responder,
                FriendshipStatus::Accepted,
                FriendshipStatus::Pending,
                &activities,
            )
            .await?;

        Ok(AccountResponse::from(sender))
    }

    pub async fn reject_request(
        &self,
        responder: Uuid,
        sender_id: Uuid,
    ) -> Result<(), error::SystemError> {
        let (sender, responder_account) = self.resolve_parties(&sender_id, &responder).await?;

        let activities = [
            NewActivity::new(
                responder,
                format!("Rejected friend request from {}", sender.email),
            ),
            NewActivity::new(
                sender_id,
                format!("{} rejected your friend request", responder_account.email),
            ),
        ];

        // The transition stamps updated_at, which anchors the resend cooldown.
        self.friendship_repo
            .transition(
                &sender_id,
                &responder,
                FriendshipStatus::Rejected,
                FriendshipStatus::Pending,
                &activities,
            )
            .await
            .map_err(|err| match err {
                error::SystemError::NotFound(_) => error::SystemError::bad_request(
                    "Friend request not found or not sent to you",
                ),
                other => other,
            })?;

        Ok(())
    }

    pub async fn friends_of(
        &self,
        caller: Uuid,
    ) -> Result<Vec<AccountResponse>, error::SystemError> {
        let excluded = self.block_repo.blocked_counterparts(&caller).await?;
        self.friendship_repo.list_accepted(&caller, &excluded).await
    }

    pub async fn pending_requests(
        &self,
        caller: Uuid,
    ) -> Result<Vec<PendingRequestResponse>, error::SystemError> {
        let excluded = self.block_repo.blocked_counterparts(&caller).await?;
        self.friendship_repo.list_pending(&caller, &excluded).await
    }

    async fn resolve_parties(
        &self,
        sender_id: &Uuid,
        responder: &Uuid,
    ) -> Result<(AccountEntity, AccountEntity), error::SystemError> {
        if sender_id == responder {
            return Err(error::SystemError::bad_request("Cannot respond to your own request"));
        }

        let sender = self
            .account_repo
            .find_by_id(sender_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Friend request not found"))?;

        let responder_account = self
            .account_repo
            .find_by_id(responder)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Account not found"))?;

        Ok((sender, responder_account))
    }
}
