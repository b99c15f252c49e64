use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

use crate::modules::account::schema::AccountEntity;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AccountResponse {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<AccountEntity> for AccountResponse {
    fn from(account: AccountEntity) -> Self {
        AccountResponse {
            id: account.id,
            email: account.email,
            first_name: account.first_name,
            last_name: account.last_name,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    pub query: Option<String>,
}
