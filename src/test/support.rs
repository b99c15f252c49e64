use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::api::error::SystemError;
use crate::constants::REJECTION_COOLDOWN_HOURS;
use crate::modules::account::{
    model::AccountResponse, repository::AccountRepository, schema::AccountEntity,
};
use crate::modules::activity::{
    model::NewActivity, repository::ActivityRepository, schema::ActivityEntity,
};
use crate::modules::block::repository::BlockRepository;
use crate::modules::friendship::{
    model::PendingRequestResponse,
    repository::FriendshipRepository,
    schema::{FriendshipEntity, FriendshipStatus},
};

/// In-memory stand-in for the Postgres repositories, honoring the same
/// contracts (ordered-pair keys, write-time status re-validation, audit
/// entries written with the mutation). One instance backs all four traits so
/// a single store can be shared across the services under test.
#[derive(Default)]
pub struct InMemoryStore {
    accounts: Mutex<HashMap<Uuid, AccountEntity>>,
    friendships: Mutex<HashMap<(Uuid, Uuid), FriendshipEntity>>,
    blocks: Mutex<HashMap<(Uuid, Uuid), DateTime<Utc>>>,
    activities: Mutex<Vec<ActivityEntity>>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn add_account(&self, email: &str, first_name: &str, last_name: &str) -> Uuid {
        let id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        self.accounts.lock().unwrap().insert(
            id,
            AccountEntity {
                id,
                email: email.to_string(),
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                created_at: Utc::now(),
            },
        );
        id
    }

    pub fn friendship(&self, from: &Uuid, to: &Uuid) -> Option<FriendshipEntity> {
        self.friendships.lock().unwrap().get(&(*from, *to)).cloned()
    }

    pub fn friendship_count(&self) -> usize {
        self.friendships.lock().unwrap().len()
    }

    pub fn descriptions_for(&self, account: &Uuid) -> Vec<String> {
        self.activities
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.account_id == *account)
            .map(|e| e.description.clone())
            .collect()
    }

    pub fn activity_count(&self) -> usize {
        self.activities.lock().unwrap().len()
    }

    /// Shifts the rejection timestamp into the past, standing in for elapsed
    /// wall-clock time.
    pub fn backdate_rejection(&self, from: &Uuid, to: &Uuid, hours: i64) {
        let mut friendships = self.friendships.lock().unwrap();
        let row = friendships.get_mut(&(*from, *to)).expect("no friendship to backdate");
        row.updated_at = Utc::now() - Duration::hours(hours);
    }

    pub fn backdate_request(&self, from: &Uuid, to: &Uuid, hours: i64) {
        let mut friendships = self.friendships.lock().unwrap();
        let row = friendships.get_mut(&(*from, *to)).expect("no friendship to backdate");
        row.created_at = Utc::now() - Duration::hours(hours);
    }

    pub fn seed_activity(&self, account: &Uuid, description: &str, at: DateTime<Utc>) {
        self.activities.lock().unwrap().push(ActivityEntity {
            id: Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext)),
            account_id: *account,
            description: description.to_string(),
            created_at: at,
        });
    }

    fn append(&self, activity: &NewActivity) {
        self.seed_activity(&activity.account, &activity.description, Utc::now());
    }
}

#[async_trait::async_trait]
impl AccountRepository for InMemoryStore {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<AccountEntity>, SystemError> {
        Ok(self.accounts.lock().unwrap().get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<AccountEntity>, SystemError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .values()
            .find(|a| a.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn search_by_name(
        &self,
        query: &str,
        excluded: &[Uuid],
        limit: i64,
    ) -> Result<Vec<AccountEntity>, SystemError> {
        let needle = query.to_lowercase();
        let mut hits: Vec<AccountEntity> = self
            .accounts
            .lock()
            .unwrap()
            .values()
            .filter(|a| {
                (a.first_name.to_lowercase().contains(&needle)
                    || a.last_name.to_lowercase().contains(&needle))
                    && !excluded.contains(&a.id)
            })
            .cloned()
            .collect();
        hits.sort_by_key(|a| a.id);
        hits.truncate(limit as usize);
        Ok(hits)
    }
}

#[async_trait::async_trait]
impl ActivityRepository for InMemoryStore {
    async fn list_for(&self, account: &Uuid) -> Result<Vec<ActivityEntity>, SystemError> {
        let mut entries: Vec<ActivityEntity> = self
            .activities
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.account_id == *account)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(entries)
    }
}

#[async_trait::async_trait]
impl BlockRepository for InMemoryStore {
    async fn is_blocked(&self, a: &Uuid, b: &Uuid) -> Result<bool, SystemError> {
        let blocks = self.blocks.lock().unwrap();
        Ok(blocks.contains_key(&(*a, *b)) || blocks.contains_key(&(*b, *a)))
    }

    async fn block(
        &self,
        blocker: &Uuid,
        blocked: &Uuid,
        activity: &NewActivity,
    ) -> Result<(), SystemError> {
        {
            let mut blocks = self.blocks.lock().unwrap();
            if blocks.contains_key(&(*blocker, *blocked)) {
                return Err(SystemError::conflict("User already blocked"));
            }
            blocks.insert((*blocker, *blocked), Utc::now());
        }
        self.append(activity);
        Ok(())
    }

    async fn unblock(
        &self,
        blocker: &Uuid,
        blocked: &Uuid,
        activity: &NewActivity,
    ) -> Result<(), SystemError> {
        {
            let mut blocks = self.blocks.lock().unwrap();
            if blocks.remove(&(*blocker, *blocked)).is_none() {
                return Err(SystemError::not_blocked("User not blocked"));
            }
        }
        self.append(activity);
        Ok(())
    }

    async fn blocked_counterparts(&self, account: &Uuid) -> Result<Vec<Uuid>, SystemError> {
        Ok(self
            .blocks
            .lock()
            .unwrap()
            .keys()
            .filter_map(|(blocker, blocked)| {
                if blocker == account {
                    Some(*blocked)
                } else if blocked == account {
                    Some(*blocker)
                } else {
                    None
                }
            })
            .collect())
    }
}

#[async_trait::async_trait]
impl FriendshipRepository for InMemoryStore {
    async fn find(
        &self,
        from: &Uuid,
        to: &Uuid,
    ) -> Result<Option<FriendshipEntity>, SystemError> {
        Ok(self.friendships.lock().unwrap().get(&(*from, *to)).cloned())
    }

    async fn find_rejected(
        &self,
        from: &Uuid,
        to: &Uuid,
    ) -> Result<Option<FriendshipEntity>, SystemError> {
        Ok(self
            .friendships
            .lock()
            .unwrap()
            .get(&(*from, *to))
            .filter(|f| f.status == FriendshipStatus::Rejected)
            .cloned())
    }

    async fn upsert_pending(
        &self,
        from: &Uuid,
        to: &Uuid,
        activity: &NewActivity,
    ) -> Result<FriendshipEntity, SystemError> {
        let now = Utc::now();
        let friendship = {
            let mut friendships = self.friendships.lock().unwrap();
            match friendships.get(&(*from, *to)).cloned() {
                None => {
                    let row = FriendshipEntity {
                        from_account: *from,
                        to_account: *to,
                        status: FriendshipStatus::Pending,
                        created_at: now,
                        updated_at: now,
                    };
                    friendships.insert((*from, *to), row.clone());
                    row
                }
                Some(row) => match row.status {
                    FriendshipStatus::Pending => {
                        return Err(SystemError::conflict("Friend request already sent"));
                    }
                    FriendshipStatus::Accepted => {
                        return Err(SystemError::conflict("You are already friends"));
                    }
                    FriendshipStatus::Rejected => {
                        let cooldown = Duration::hours(REJECTION_COOLDOWN_HOURS);
                        let elapsed = now - row.updated_at;
                        if elapsed < cooldown {
                            return Err(SystemError::cooldown(cooldown - elapsed));
                        }
                        let row = friendships.get_mut(&(*from, *to)).unwrap();
                        row.status = FriendshipStatus::Pending;
                        row.updated_at = now;
                        row.clone()
                    }
                },
            }
        };
        self.append(activity);
        Ok(friendship)
    }

    async fn transition(
        &self,
        from: &Uuid,
        to: &Uuid,
        new_status: FriendshipStatus,
        expected: FriendshipStatus,
        activities: &[NewActivity],
    ) -> Result<FriendshipEntity, SystemError> {
        let friendship = {
            let mut friendships = self.friendships.lock().unwrap();
            match friendships.get_mut(&(*from, *to)) {
                Some(row) if row.status == expected => {
                    row.status = new_status;
                    row.updated_at = Utc::now();
                    row.clone()
                }
                _ => return Err(SystemError::not_found("Friend request not found")),
            }
        };
        for activity in activities {
            self.append(activity);
        }
        Ok(friendship)
    }

    async fn list_accepted(
        &self,
        account: &Uuid,
        excluded: &[Uuid],
    ) -> Result<Vec<AccountResponse>, SystemError> {
        let counterparts: Vec<Uuid> = {
            let friendships = self.friendships.lock().unwrap();
            friendships
                .values()
                .filter(|f| {
                    f.status == FriendshipStatus::Accepted
                        && (f.from_account == *account || f.to_account == *account)
                })
                .map(|f| {
                    if f.from_account == *account {
                        f.to_account
                    } else {
                        f.from_account
                    }
                })
                .filter(|id| !excluded.contains(id))
                .collect()
        };

        let accounts = self.accounts.lock().unwrap();
        let mut friends: Vec<AccountResponse> = counterparts
            .into_iter()
            .filter_map(|id| accounts.get(&id).cloned().map(AccountResponse::from))
            .collect();
        friends.sort_by_key(|a| a.id);
        // Mutual accepted rows name the same counterpart twice.
        friends.dedup_by_key(|a| a.id);
        Ok(friends)
    }

    async fn list_pending(
        &self,
        recipient: &Uuid,
        excluded: &[Uuid],
    ) -> Result<Vec<PendingRequestResponse>, SystemError> {
        let mut rows: Vec<FriendshipEntity> = {
            let friendships = self.friendships.lock().unwrap();
            friendships
                .values()
                .filter(|f| {
                    f.status == FriendshipStatus::Pending
                        && f.to_account == *recipient
                        && !excluded.contains(&f.from_account)
                })
                .cloned()
                .collect()
        };
        rows.sort_by_key(|f| f.created_at);

        let accounts = self.accounts.lock().unwrap();
        Ok(rows
            .into_iter()
            .filter_map(|f| {
                accounts.get(&f.from_account).cloned().map(|a| PendingRequestResponse {
                    account: AccountResponse::from(a),
                    requested_at: f.created_at,
                })
            })
            .collect())
    }
}
