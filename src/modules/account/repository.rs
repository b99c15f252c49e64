use uuid::Uuid;

use crate::api::error;
use crate::modules::account::schema::AccountEntity;

/// The Account Directory seam: resolves identifiers to accounts and answers
/// the two search shapes the visibility layer needs.
#[async_trait::async_trait]
pub trait AccountRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<AccountEntity>, error::SystemError>;

    /// Case-insensitive exact email lookup.
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AccountEntity>, error::SystemError>;

    /// Case-insensitive substring match on first or last name, excluding the
    /// given ids, ordered by account id.
    async fn search_by_name(
        &self,
        query: &str,
        excluded: &[Uuid],
        limit: i64,
    ) -> Result<Vec<AccountEntity>, error::SystemError>;
}
